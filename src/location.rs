//! `SourceLocation`: a file-anchored span borrowed from a source buffer.

/// A location for a diagnostic in a file.
///
/// The lifetime of a `SourceLocation` must be strictly shorter than the
/// source buffer it borrows `file_name` and `lines` from; the buffer must
/// not be mutated while any `SourceLocation` referencing it is alive.
///
/// Depending on which fields are populated, a `SourceLocation` can represent:
/// 1. An entire file (`line_number == 0`).
/// 2. A line in a file (`column_number == 0`).
/// 3. A specific character in a file (`length == 1`).
/// 4. A contiguous range of text in a file, possibly spanning several lines
///    of `lines`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation<'src> {
    /// Name of the file or buffer this location refers to.
    pub file_name: &'src str,
    /// The entire line, or range of lines, that this location touches.
    /// Starts at the first character of its first line; ends at or after the
    /// last character of its last line. Never contains a trailing partial
    /// line.
    pub lines: &'src str,
    /// 1-based line number of the first line, or 0 for "file only".
    pub line_number: i32,
    /// 1-based column number of the first character, or 0 for "line only".
    pub column_number: i32,
    /// Count of source characters covered, possibly spanning multiple lines
    /// of `lines`. Always at least 1.
    pub length: u32,
}

impl<'src> SourceLocation<'src> {
    /// A location spanning only the named file, with no line association.
    pub fn file_only(file_name: &'src str) -> Self {
        Self {
            file_name,
            lines: "",
            line_number: 0,
            column_number: 0,
            length: 1,
        }
    }

    /// Construct a location, asserting the invariants from spec.md §3 that
    /// a well-behaved translator is expected to uphold.
    pub fn new(
        file_name: &'src str,
        lines: &'src str,
        line_number: i32,
        column_number: i32,
        length: u32,
    ) -> Self {
        debug_assert!(length >= 1, "SourceLocation::length must be >= 1");
        debug_assert!(
            column_number <= 0 || line_number > 0,
            "a column_number without a line_number makes no sense"
        );
        Self {
            file_name,
            lines,
            line_number,
            column_number,
            length,
        }
    }

    /// Whether this location has a line number at all.
    pub fn has_line(&self) -> bool {
        self.line_number > 0
    }

    /// Whether this location has a column number at all.
    pub fn has_column(&self) -> bool {
        self.column_number > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_only_has_no_line_or_column() {
        let loc = SourceLocation::file_only("/f.cc");
        assert!(!loc.has_line());
        assert!(!loc.has_column());
        assert_eq!(loc.length, 1);
    }

    #[test]
    fn new_sets_all_fields() {
        let loc = SourceLocation::new("/f.cc", "let x = 1;", 5, 8, 4);
        assert_eq!(loc.file_name, "/f.cc");
        assert_eq!(loc.lines, "let x = 1;");
        assert_eq!(loc.line_number, 5);
        assert_eq!(loc.column_number, 8);
        assert_eq!(loc.length, 4);
        assert!(loc.has_line());
        assert!(loc.has_column());
    }
}
