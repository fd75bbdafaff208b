//! Column type inference for encoding.
//!
//! Attribute values carry no declared GDF type, so the writer picks the
//! narrowest header type that holds every value of a column.

use crate::codec::primitives::RowWriter;
use crate::limits::MAX_FLOAT_CHARS;
use crate::model::{format_float, AttributeValue, DeclaredType};

/// How one output column is declared and rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    declared: DeclaredType,
}

impl ColumnFormat {
    /// Format of identifier columns, which are always text.
    pub const TEXT: ColumnFormat = ColumnFormat {
        declared: DeclaredType::Text,
    };

    pub fn declared(self) -> DeclaredType {
        self.declared
    }

    /// Writes one value as a cell of this column.
    ///
    /// In a VARCHAR column every value is written as quoted text, so that a
    /// mixed column decodes back to text.
    pub fn write_value(self, writer: &mut RowWriter, value: &AttributeValue) {
        match (self.declared, value) {
            (_, AttributeValue::Text(text)) => writer.write_quoted(text),
            (DeclaredType::Text, other) => writer.write_quoted(&other.to_string()),
            (_, AttributeValue::Integer(v)) => writer.write_bare(&v.to_string()),
            (_, AttributeValue::Float(v)) => writer.write_bare(&format_float(*v)),
            (_, AttributeValue::Boolean(v)) => writer.write_bare(if *v { "true" } else { "false" }),
        }
    }
}

/// Picks the declared type for a column holding `values`.
///
/// Absent values are not passed in. Integers become INT when every value
/// fits 32 bits, otherwise LONG. Floats become FLOAT when every rendering is
/// short enough for single precision, otherwise DOUBLE. Booleans become
/// BOOLEAN. Anything else, including an empty or mixed column, is VARCHAR.
pub fn infer_column_type<'a, I>(values: I) -> ColumnFormat
where
    I: IntoIterator<Item = &'a AttributeValue>,
{
    #[derive(Clone, Copy, PartialEq)]
    enum Kind {
        Integer { wide: bool },
        Float { wide: bool },
        Boolean,
    }

    let mut kind: Option<Kind> = None;
    for value in values {
        let next = match value {
            AttributeValue::Integer(v) => Kind::Integer {
                wide: i32::try_from(*v).is_err(),
            },
            AttributeValue::Float(v) => Kind::Float {
                wide: format_float(*v).len() > MAX_FLOAT_CHARS,
            },
            AttributeValue::Boolean(_) => Kind::Boolean,
            AttributeValue::Text(_) => return ColumnFormat::TEXT,
        };
        kind = Some(match (kind, next) {
            (None, next) => next,
            (Some(Kind::Integer { wide: a }), Kind::Integer { wide: b }) => Kind::Integer { wide: a || b },
            (Some(Kind::Float { wide: a }), Kind::Float { wide: b }) => Kind::Float { wide: a || b },
            (Some(Kind::Boolean), Kind::Boolean) => Kind::Boolean,
            _ => return ColumnFormat::TEXT,
        });
    }

    let declared = match kind {
        None => DeclaredType::Text,
        Some(Kind::Integer { wide: false }) => DeclaredType::Integer,
        Some(Kind::Integer { wide: true }) => DeclaredType::IntegerWide,
        Some(Kind::Float { wide: false }) => DeclaredType::Float,
        Some(Kind::Float { wide: true }) => DeclaredType::FloatWide,
        Some(Kind::Boolean) => DeclaredType::Boolean,
    };
    ColumnFormat { declared }
}
