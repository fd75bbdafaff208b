//! Section bodies to typed records.
//!
//! Everything after the node header is split into rows with `'` as the
//! quote character. The node rows end at the first record that starts with
//! `edgedef>` outside a quoted cell, so the edge header is located by the
//! same pass. If any row of either section fails to split, the whole text
//! is split again with `"`. Only then are cells coerced to their declared
//! column types.

use tracing::debug;

use crate::codec::primitives::{Cell, Quote, Row, RowReader};
use crate::codec::schema::{header_line, parse_header, Column, ColumnSchema, Section, NODE_ID_COLUMN};
use crate::error::FormatError;
use crate::model::{AttributeValue, Attributes, DeclaredType, EdgeRecord, NodeRecord};

/// Body text of one section.
#[derive(Debug, Clone, Copy)]
pub struct SectionBody<'a> {
    pub section: Section,
    /// Line of the file on which the body starts.
    pub first_line: usize,
    pub text: &'a str,
}

/// Rows of both sections, split with one quote character.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRows<'a> {
    pub quote: Quote,
    pub nodes: Vec<Row>,
    /// The edge header line as found with `quote`.
    pub edges_header: &'a str,
    pub edge_schema: ColumnSchema,
    pub edges: Vec<Row>,
}

/// Splits the text following the node header into node rows, the edge
/// header and edge rows, falling back from `'` to `"` quoting.
///
/// `node_width` is the column count of the node header. Errors in the edge
/// header are returned as they are; only row splitting is retried.
pub fn split_rows(nodes: SectionBody<'_>, node_width: usize) -> Result<SplitRows<'_>, FormatError> {
    let [first, second] = Quote::FALLBACK_ORDER;
    let first_err = match split_with(nodes, node_width, first) {
        Err(err) if is_split_error(&err) => err,
        result => return result,
    };
    debug!(quote = %first.char(), error = %first_err, "retrying with alternate quote character");
    match split_with(nodes, node_width, second) {
        Err(second_err) if is_split_error(&second_err) => Err(FormatError::Unquotable {
            single: Box::new(first_err),
            double: Box::new(second_err),
        }),
        result => result,
    }
}

fn split_with(body: SectionBody<'_>, node_width: usize, quote: Quote) -> Result<SplitRows<'_>, FormatError> {
    let edges_marker = Section::Edges.marker();
    let mut reader =
        RowReader::new(body.text, body.first_line, Section::Nodes, quote, node_width).until(edges_marker);
    let nodes = reader.read_rows()?;
    if !reader.stopped() {
        return Err(FormatError::MissingSection {
            marker: edges_marker,
        });
    }

    let (edges_header, edges_body_at) = header_line(body.text, reader.offset());
    let edge_schema = parse_header(edges_header, Section::Edges)?;
    check_endpoint_columns(&edge_schema)?;
    let edges = RowReader::new(
        &body.text[edges_body_at..],
        reader.line() + 1,
        Section::Edges,
        quote,
        edge_schema.len(),
    )
    .read_all()?;

    Ok(SplitRows {
        quote,
        nodes,
        edges_header,
        edge_schema,
        edges,
    })
}

/// Errors that depend on the quote character and so warrant a retry.
fn is_split_error(err: &FormatError) -> bool {
    matches!(
        err,
        FormatError::UnterminatedQuote { .. }
            | FormatError::UnexpectedQuote { .. }
            | FormatError::MismatchedQuote { .. }
            | FormatError::TooManyFields { .. }
            | FormatError::MissingSection { .. }
    )
}

/// Position of the identifier column of the node section.
pub fn node_id_position(schema: &ColumnSchema) -> Result<usize, FormatError> {
    schema
        .position(NODE_ID_COLUMN)
        .ok_or(FormatError::MissingIdentifierColumn)
}

/// Checks that the edge section declares both endpoint columns.
pub fn check_endpoint_columns(schema: &ColumnSchema) -> Result<(), FormatError> {
    if schema.len() < 2 {
        return Err(FormatError::MissingEndpointColumns {
            found: schema.len(),
        });
    }
    Ok(())
}

/// Decodes node rows. The `name` column becomes the identifier.
pub fn decode_nodes(schema: &ColumnSchema, rows: &[Row]) -> Result<Vec<NodeRecord>, FormatError> {
    let id_position = node_id_position(schema)?;
    let id_column = &schema.columns()[id_position];
    rows.iter()
        .map(|row| {
            Ok(NodeRecord {
                id: identifier(Section::Nodes, id_column, row, id_position)?,
                attributes: attributes(Section::Nodes, schema, row, |p| p == id_position)?,
            })
        })
        .collect()
}

/// Decodes edge rows. The first two columns are the endpoints.
pub fn decode_edges(schema: &ColumnSchema, rows: &[Row]) -> Result<Vec<EdgeRecord>, FormatError> {
    check_endpoint_columns(schema)?;
    let (source, target) = (&schema.columns()[0], &schema.columns()[1]);
    rows.iter()
        .map(|row| {
            Ok(EdgeRecord {
                source: identifier(Section::Edges, source, row, 0)?,
                target: identifier(Section::Edges, target, row, 1)?,
                attributes: attributes(Section::Edges, schema, row, |p| p < 2)?,
            })
        })
        .collect()
}

fn identifier(
    section: Section,
    column: &Column,
    row: &Row,
    position: usize,
) -> Result<String, FormatError> {
    let cell = match row.cells.get(position) {
        Some(cell) if !cell.is_missing() => cell,
        _ => {
            return Err(FormatError::MissingIdentifier {
                section,
                row: row.index,
                line: row.line,
                column: column.name.clone(),
            });
        }
    };
    coerce(section, column, row, cell)?;
    Ok(match column.declared {
        DeclaredType::Text => cell.text.clone(),
        _ => cell.text.trim().to_string(),
    })
}

fn attributes(
    section: Section,
    schema: &ColumnSchema,
    row: &Row,
    skip: impl Fn(usize) -> bool,
) -> Result<Attributes, FormatError> {
    let mut attributes = Attributes::with_capacity(row.cells.len());
    for (position, (column, cell)) in schema.iter().zip(&row.cells).enumerate() {
        if skip(position) || cell.is_missing() {
            continue;
        }
        let value = coerce(section, column, row, cell)?;
        attributes.insert(column.name.clone(), value);
    }
    Ok(attributes)
}

fn coerce(
    section: Section,
    column: &Column,
    row: &Row,
    cell: &Cell,
) -> Result<AttributeValue, FormatError> {
    column
        .declared
        .coerce(&cell.text)
        .ok_or_else(|| FormatError::Coercion {
            section,
            row: row.index,
            line: row.line,
            column: column.name.clone(),
            expected: column.declared,
            value: cell.text.clone(),
        })
}
