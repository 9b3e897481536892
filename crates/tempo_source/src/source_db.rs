//! Database of loaded source files with line/column resolution.

use crate::span::{FileId, Span};
use serde::{Deserialize, Serialize};

/// A resolved 1-based line and column position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LineCol {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (in bytes).
    pub column: u32,
}

/// One registered source file: its name, text, and line-start offsets.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SourceFile {
    name: String,
    text: String,
    /// Byte offset of the start of each line.
    line_starts: Vec<u32>,
}

/// A database of source files, mapping [`FileId`]s to file contents and
/// resolving byte offsets to line/column positions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source file and returns its ID.
    pub fn add_file(&mut self, name: impl Into<String>, text: impl Into<String>) -> FileId {
        let text = text.into();
        let mut line_starts = vec![0u32];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile {
            name: name.into(),
            text,
            line_starts,
        });
        id
    }

    /// Returns the registered name of a file, or `None` for unknown IDs
    /// (including [`FileId::DUMMY`]).
    pub fn file_name(&self, file: FileId) -> Option<&str> {
        self.files
            .get(file.as_raw() as usize)
            .map(|f| f.name.as_str())
    }

    /// Returns the text covered by a span, or `None` if the span does not
    /// point into a registered file.
    pub fn snippet(&self, span: Span) -> Option<&str> {
        let file = self.files.get(span.file.as_raw() as usize)?;
        file.text.get(span.start as usize..span.end as usize)
    }

    /// Resolves a byte offset in a file to a 1-based line/column position.
    pub fn line_col(&self, file: FileId, offset: u32) -> Option<LineCol> {
        let file = self.files.get(file.as_raw() as usize)?;
        let line_idx = match file.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        Some(LineCol {
            line: line_idx as u32 + 1,
            column: offset - file.line_starts[line_idx] + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_name() {
        let mut db = SourceDb::new();
        let id = db.add_file("top.sv", "module top; endmodule\n");
        assert_eq!(db.file_name(id), Some("top.sv"));
        assert_eq!(db.file_name(FileId::DUMMY), None);
    }

    #[test]
    fn snippet() {
        let mut db = SourceDb::new();
        let id = db.add_file("a.sv", "wire x;");
        let span = Span::new(id, 5, 6);
        assert_eq!(db.snippet(span), Some("x"));
        assert_eq!(db.snippet(Span::DUMMY), None);
    }

    #[test]
    fn line_col_first_line() {
        let mut db = SourceDb::new();
        let id = db.add_file("a.sv", "abc\ndef\nghi");
        assert_eq!(db.line_col(id, 0), Some(LineCol { line: 1, column: 1 }));
        assert_eq!(db.line_col(id, 2), Some(LineCol { line: 1, column: 3 }));
    }

    #[test]
    fn line_col_later_lines() {
        let mut db = SourceDb::new();
        let id = db.add_file("a.sv", "abc\ndef\nghi");
        assert_eq!(db.line_col(id, 4), Some(LineCol { line: 2, column: 1 }));
        assert_eq!(db.line_col(id, 9), Some(LineCol { line: 3, column: 2 }));
    }

    #[test]
    fn line_col_at_newline_boundary() {
        let mut db = SourceDb::new();
        let id = db.add_file("a.sv", "a\nb");
        // Offset 1 is the newline itself, still on line 1.
        assert_eq!(db.line_col(id, 1), Some(LineCol { line: 1, column: 2 }));
        assert_eq!(db.line_col(id, 2), Some(LineCol { line: 2, column: 1 }));
    }

    #[test]
    fn unknown_file() {
        let db = SourceDb::new();
        assert_eq!(db.line_col(FileId::from_raw(3), 0), None);
    }
}
