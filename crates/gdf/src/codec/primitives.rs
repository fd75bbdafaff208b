//! Row-level reading and writing for GDF section bodies.
//!
//! Bodies are comma-delimited. A cell may be enclosed in a quote character;
//! which one (`'` or `"`) is a property of the whole file, so the reader is
//! always told which quote is active.

use crate::codec::schema::Section;
use crate::error::FormatError;
use crate::model::DeclaredType;

/// Quote characters a GDF file may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    /// The order in which quote characters are tried when decoding.
    pub const FALLBACK_ORDER: [Quote; 2] = [Quote::Single, Quote::Double];

    pub fn char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    fn byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Double => b'"',
        }
    }

    /// The quote character that is not this one.
    pub fn other(self) -> Quote {
        match self {
            Quote::Single => Quote::Double,
            Quote::Double => Quote::Single,
        }
    }
}

/// One decoded cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell text with enclosing quotes removed and doubled quotes collapsed.
    pub text: String,
    /// Whether the cell was enclosed in quotes.
    pub quoted: bool,
}

impl Cell {
    /// An unquoted empty cell carries no value.
    pub fn is_missing(&self) -> bool {
        !self.quoted && self.text.is_empty()
    }
}

/// One non-blank record of a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Index among the data rows of the section, starting at 0.
    pub index: usize,
    /// Line of the file on which the row starts, starting at 1.
    pub line: usize,
    pub cells: Vec<Cell>,
}

// =============================================================================
// READING
// =============================================================================

/// Reader that splits a section body into rows of cells.
#[derive(Debug, Clone)]
pub struct RowReader<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    row: usize,
    section: Section,
    quote: Quote,
    width: usize,
    stop_at: Option<&'a str>,
    stopped: bool,
}

impl<'a> RowReader<'a> {
    /// Creates a reader over `input`, whose first line is line `first_line`
    /// of the file. Rows may hold at most `width` cells.
    pub fn new(input: &'a str, first_line: usize, section: Section, quote: Quote, width: usize) -> Self {
        Self {
            input,
            pos: 0,
            line: first_line,
            row: 0,
            section,
            quote,
            width,
            stop_at: None,
            stopped: false,
        }
    }

    /// Ends the body at the first record that begins with `marker`.
    ///
    /// Only record starts are checked, so a marker inside a quoted cell
    /// does not end the body.
    pub fn until(mut self, marker: &'a str) -> Self {
        self.stop_at = Some(marker);
        self
    }

    /// Whether reading ended at the marker given to [`RowReader::until`].
    pub fn stopped(&self) -> bool {
        self.stopped
    }

    /// Byte offset of the next unread record.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// File line of the next unread record.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Reads the next non-blank row, or `None` at the end of the body.
    pub fn next_row(&mut self) -> Result<Option<Row>, FormatError> {
        while self.pos < self.input.len() {
            if let Some(marker) = self.stop_at {
                if self.input[self.pos..].starts_with(marker) {
                    self.stopped = true;
                    return Ok(None);
                }
            }
            let line = self.line;
            let cells = self.read_record()?;
            if is_blank(&cells) {
                continue;
            }
            if cells.len() > self.width {
                return Err(FormatError::TooManyFields {
                    section: self.section,
                    row: self.row,
                    line,
                    expected: self.width,
                    found: cells.len(),
                });
            }
            let row = Row {
                index: self.row,
                line,
                cells,
            };
            self.row += 1;
            return Ok(Some(row));
        }
        Ok(None)
    }

    /// Reads every remaining row.
    pub fn read_all(mut self) -> Result<Vec<Row>, FormatError> {
        self.read_rows()
    }

    /// Reads rows up to the end of the body, leaving the reader in place.
    pub fn read_rows(&mut self) -> Result<Vec<Row>, FormatError> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row()? {
            rows.push(row);
        }
        Ok(rows)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Consumes a record terminator if one is next, returning true if so.
    fn eat_line_end(&mut self) -> bool {
        match (self.peek(), self.peek_at(1)) {
            (Some(b'\n'), _) => {
                self.pos += 1;
                self.line += 1;
                true
            }
            (Some(b'\r'), Some(b'\n')) => {
                self.pos += 2;
                self.line += 1;
                true
            }
            _ => false,
        }
    }

    fn read_record(&mut self) -> Result<Vec<Cell>, FormatError> {
        let line = self.line;
        let mut cells = Vec::new();
        loop {
            let cell_index = cells.len();
            let cell = match self.peek() {
                Some(b) if b == self.quote.byte() => self.read_quoted(line, cell_index)?,
                Some(b) if b == self.quote.other().byte() => {
                    return Err(FormatError::MismatchedQuote {
                        section: self.section,
                        row: self.row,
                        line,
                        cell: cell_index,
                        expected: self.quote.char(),
                        found: self.quote.other().char(),
                    });
                }
                _ => self.read_unquoted(line, cell_index)?,
            };
            cells.push(cell);

            if self.peek() == Some(b',') {
                self.pos += 1;
                continue;
            }
            // read_unquoted and read_quoted only stop at a delimiter, a
            // line end, or the end of input.
            self.eat_line_end();
            return Ok(cells);
        }
    }

    fn read_unquoted(&mut self, line: usize, cell: usize) -> Result<Cell, FormatError> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        while let Some(&b) = bytes.get(self.pos) {
            match b {
                b',' | b'\n' => break,
                b'\r' if bytes.get(self.pos + 1) == Some(&b'\n') => break,
                b if b == self.quote.byte() => {
                    return Err(self.unexpected_quote(line, cell));
                }
                _ => self.pos += 1,
            }
        }
        Ok(Cell {
            text: self.input[start..self.pos].to_string(),
            quoted: false,
        })
    }

    fn read_quoted(&mut self, line: usize, cell: usize) -> Result<Cell, FormatError> {
        let bytes = self.input.as_bytes();
        let quote = self.quote.byte();
        self.pos += 1;

        let mut text = String::new();
        let mut start = self.pos;
        loop {
            match bytes.get(self.pos) {
                None => {
                    return Err(FormatError::UnterminatedQuote {
                        section: self.section,
                        row: self.row,
                        line,
                    });
                }
                Some(&b) if b == quote => {
                    text.push_str(&self.input[start..self.pos]);
                    if bytes.get(self.pos + 1) == Some(&quote) {
                        text.push(self.quote.char());
                        self.pos += 2;
                        start = self.pos;
                    } else {
                        self.pos += 1;
                        break;
                    }
                }
                Some(&b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }

        match (self.peek(), self.peek_at(1)) {
            (None, _) | (Some(b','), _) | (Some(b'\n'), _) | (Some(b'\r'), Some(b'\n')) => Ok(Cell {
                text,
                quoted: true,
            }),
            _ => Err(self.unexpected_quote(line, cell)),
        }
    }

    fn unexpected_quote(&self, line: usize, cell: usize) -> FormatError {
        FormatError::UnexpectedQuote {
            section: self.section,
            row: self.row,
            line,
            cell,
            quote: self.quote.char(),
        }
    }
}

fn is_blank(cells: &[Cell]) -> bool {
    matches!(cells, [only] if !only.quoted && only.text.trim().is_empty())
}

// =============================================================================
// WRITING
// =============================================================================

/// Writer that renders section headers and rows.
///
/// Text cells are always quoted with `'`; quotes inside them are doubled.
#[derive(Debug, Clone, Default)]
pub struct RowWriter {
    buf: String,
    row_open: bool,
}

impl RowWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            row_open: false,
        }
    }

    /// Returns the written text.
    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a header line. Columns without a type are written bare.
    pub fn write_header<'c>(
        &mut self,
        section: Section,
        columns: impl IntoIterator<Item = (&'c str, Option<DeclaredType>)>,
    ) {
        self.buf.push_str(section.marker());
        for (i, (name, declared)) in columns.into_iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.buf.push_str(name);
            if let Some(declared) = declared {
                self.buf.push(' ');
                self.buf.push_str(declared.token());
            }
        }
        self.buf.push('\n');
    }

    fn begin_cell(&mut self) {
        if self.row_open {
            self.buf.push(',');
        }
        self.row_open = true;
    }

    /// Writes a cell verbatim.
    pub fn write_bare(&mut self, text: &str) {
        self.begin_cell();
        self.buf.push_str(text);
    }

    /// Writes a quoted text cell.
    pub fn write_quoted(&mut self, text: &str) {
        self.begin_cell();
        let quote = Quote::Single.char();
        self.buf.push(quote);
        for c in text.chars() {
            if c == quote {
                self.buf.push(quote);
            }
            self.buf.push(c);
        }
        self.buf.push(quote);
    }

    /// Writes a cell with no value.
    pub fn write_empty(&mut self) {
        self.begin_cell();
    }

    /// Terminates the current row.
    pub fn end_row(&mut self) {
        self.buf.push('\n');
        self.row_open = false;
    }
}
