//! Section headers.
//!
//! A header line such as `nodedef>name VARCHAR,age INT,label` declares the
//! columns of its section, in order. Cells of every body row are matched to
//! columns by position.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::error::FormatError;
use crate::limits::MAX_COLUMNS;
use crate::model::DeclaredType;

/// Identifier column of the node section.
pub const NODE_ID_COLUMN: &str = "name";
/// Conventional name of the edge source column.
pub const SOURCE_COLUMN: &str = "node1";
/// Conventional name of the edge target column.
pub const TARGET_COLUMN: &str = "node2";
/// Edge column carrying directedness.
pub const DIRECTED_COLUMN: &str = "directed";
/// Edge column carrying weights.
pub const WEIGHT_COLUMN: &str = "weight";

/// The two sections of a GDF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Nodes,
    Edges,
}

impl Section {
    /// Returns the marker that opens the section header.
    pub fn marker(self) -> &'static str {
        match self {
            Section::Nodes => "nodedef>",
            Section::Edges => "edgedef>",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Section::Nodes => "nodedef",
            Section::Edges => "edgedef",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One declared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub declared: DeclaredType,
}

/// Ordered columns of one section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSchema {
    columns: Vec<Column>,
}

impl ColumnSchema {
    /// Creates a schema from columns, in positional order.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the column at `position`.
    pub fn get(&self, position: usize) -> Option<&Column> {
        self.columns.get(position)
    }

    /// Returns the position of the column called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the column called `name`.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the columns in positional order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }
}

/// Returns the header line starting at byte `at` of `text` and the offset
/// just past it.
pub fn header_line(text: &str, at: usize) -> (&str, usize) {
    match text[at..].find('\n') {
        Some(len) => (&text[at..at + len], at + len + 1),
        None => (&text[at..], text.len()),
    }
}

/// Parses a section header line into its columns.
///
/// Everything up to and including the section marker is discarded. Each
/// comma-separated token is split on its last space; when the right-hand
/// part is a known type token it declares the column type, otherwise the
/// whole token is the column name and the type is VARCHAR.
pub fn parse_header(line: &str, section: Section) -> Result<ColumnSchema, FormatError> {
    let declarations = match line.split_once(section.marker()) {
        Some((_, rest)) => rest,
        None => line,
    };
    let declarations = declarations.trim();
    if declarations.is_empty() {
        return Ok(ColumnSchema::default());
    }

    let mut columns = Vec::new();
    let mut seen = FxHashSet::default();
    for (position, token) in declarations.split(',').enumerate() {
        if position >= MAX_COLUMNS {
            return Err(FormatError::LengthExceedsLimit {
                field: "header columns",
                len: declarations.split(',').count(),
                max: MAX_COLUMNS,
            });
        }
        let column = parse_column(token);
        if column.name.is_empty() {
            return Err(FormatError::EmptyColumnName { section, position });
        }
        if !seen.insert(column.name.clone()) {
            return Err(FormatError::DuplicateColumn {
                section,
                name: column.name,
            });
        }
        columns.push(column);
    }

    Ok(ColumnSchema { columns })
}

fn parse_column(token: &str) -> Column {
    let token = token.trim();
    if let Some((name, type_token)) = token.rsplit_once(' ') {
        if let Some(declared) = DeclaredType::from_token(type_token) {
            return Column {
                name: name.trim().to_string(),
                declared,
            };
        }
    }
    Column {
        name: token.to_string(),
        declared: DeclaredType::Text,
    }
}
