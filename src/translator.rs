//! Translating a front-end's opaque location handle into a [`SourceLocation`].

use std::ops::Range;

use crate::location::SourceLocation;

/// Converts a front-end's location handle `L` (a token index, a parse-tree
/// node id, a byte offset range, ...) into a [`SourceLocation`].
///
/// Implementations live in the front-end; this crate only specifies the
/// contract. A conforming implementation must:
/// - return a location whose `lines` slice is borrowed from a buffer
///   outliving the emitter;
/// - treat an "invalid" sentinel value of `L` as a file-only location
///   (`SourceLocation::file_only`);
/// - for a composite `L` spanning several tokens, return a span whose
///   `length` is the total source character count of the covered tokens
///   (plus trailing whitespace between them) and whose `lines` covers the
///   first line of the first token through the last line of the last token,
///   inclusive.
pub trait LocationTranslator<L> {
    /// Translate `loc` into a `SourceLocation` borrowed from this
    /// translator's underlying buffer.
    fn translate(&self, loc: L) -> SourceLocation<'_>;
}

/// A front-end location expressed as a byte range into a flat source
/// string, or the sentinel meaning "no specific location".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteLocation {
    /// No specific location; only the file name is known.
    Invalid,
    /// A contiguous byte range `start..end` into the source buffer.
    Span(Range<usize>),
}

impl From<Range<usize>> for ByteLocation {
    fn from(range: Range<usize>) -> Self {
        ByteLocation::Span(range)
    }
}

/// Reference [`LocationTranslator`] over a flat `&str` source buffer,
/// addressed by byte ranges.
///
/// Grounded on Carbon's `Parse::NodeLocationTranslator::GetLocation`
/// (`examples/original_source/toolchain/parse/tree_node_location_translator.h`),
/// simplified from parse-tree node descendants to a plain byte range since
/// this crate owns no parse tree.
pub struct ByteOffsetTranslator<'src> {
    file_name: &'src str,
    source: &'src str,
}

impl<'src> ByteOffsetTranslator<'src> {
    pub fn new(file_name: &'src str, source: &'src str) -> Self {
        Self { file_name, source }
    }
}

impl<'src> LocationTranslator<ByteLocation> for ByteOffsetTranslator<'src> {
    fn translate(&self, loc: ByteLocation) -> SourceLocation<'src> {
        let range = match loc {
            ByteLocation::Invalid => return SourceLocation::file_only(self.file_name),
            ByteLocation::Span(range) => range,
        };

        let start = range.start.min(self.source.len());
        let end = range.end.min(self.source.len()).max(start);

        let line_start = self.source[..start]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        let line_end = self.source[end..]
            .find('\n')
            .map(|i| end + i)
            .unwrap_or(self.source.len());

        let line_number = 1 + self.source[..line_start].matches('\n').count() as i32;
        let column_number = (start - line_start) as i32 + 1;
        let length = (end - start).max(1) as u32;

        SourceLocation::new(
            self.file_name,
            &self.source[line_start..line_end],
            line_number,
            column_number,
            length,
        )
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn invalid_is_file_only() {
        let src = "hello\nworld\n";
        let t = ByteOffsetTranslator::new("/f.cc", src);
        let loc = t.translate(ByteLocation::Invalid);
        assert_eq!(loc.file_name, "/f.cc");
        assert!(!loc.has_line());
    }

    #[test]
    fn single_line_span() {
        let src = "let x = 1;\nlet y = 2;\n";
        let t = ByteOffsetTranslator::new("/f.cc", src);
        // "y" in the second line.
        let loc = t.translate(ByteLocation::Span(15..16));
        assert_eq!(loc.line_number, 2);
        assert_eq!(loc.column_number, 5);
        assert_eq!(loc.length, 1);
        assert_eq!(loc.lines, "let y = 2;");
    }

    #[test]
    fn zero_width_span_has_length_one() {
        let src = "abc";
        let t = ByteOffsetTranslator::new("/f.cc", src);
        let loc = t.translate(ByteLocation::Span(1..1));
        assert_eq!(loc.length, 1);
        assert_eq!(loc.column_number, 2);
    }

    #[test]
    fn multi_line_span_covers_every_line() {
        let src = "aaa\nbbb\nccc\n";
        let t = ByteOffsetTranslator::new("/f.cc", src);
        // spans from middle of line 1 through middle of line 3
        let loc = t.translate(ByteLocation::Span(1..9));
        assert_eq!(loc.line_number, 1);
        assert_eq!(loc.column_number, 2);
        assert_eq!(loc.lines, "aaa\nbbb\nccc");
    }

    #[test]
    fn span_covering_a_function_body() {
        let src = indoc! {"
            fn broken() {
                let x = ;
            }
        "};
        let t = ByteOffsetTranslator::new("/f.cc", src);
        let brace_open = src.find('{').unwrap();
        let brace_close = src.find('}').unwrap();
        let loc = t.translate(ByteLocation::Span(brace_open..brace_close + 1));
        assert_eq!(loc.line_number, 1);
        assert_eq!(loc.lines, "fn broken() {\n    let x = ;\n}");
    }
}
