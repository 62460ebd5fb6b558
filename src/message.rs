//! The diagnostic report value: primary message, inline annotations, notes,
//! and suggestions.

use serde::Serialize;

use crate::location::SourceLocation;
use crate::severity::Severity;
use crate::text::DiagnosticText;

/// The kind of an inline annotation, ordered by *underline priority*: when
/// two annotations claim the same column, the higher-priority kind wins the
/// underline slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineKind {
    /// A location included for contextual purposes only; its underline
    /// glyph is invisible (a space).
    Context,
    /// A plain underline (`~`).
    Basic,
    /// An emphasized underline (`^`), e.g. the exact offending token.
    Emphasis,
    /// Text proposed for insertion (`+`).
    SuggestionAddition,
    /// Text proposed for removal (`-`).
    SuggestionRemoval,
}

impl InlineKind {
    /// The glyph painted on the track line for columns this kind wins.
    pub fn glyph(self) -> char {
        match self {
            InlineKind::Context => ' ',
            InlineKind::Basic => '~',
            InlineKind::Emphasis => '^',
            InlineKind::SuggestionAddition => '+',
            InlineKind::SuggestionRemoval => '-',
        }
    }
}

/// A source-anchored underline, with optional legend text.
///
/// An annotation with no text solely underlines; with text, it additionally
/// prints a connector line ("legend line") once its underline finishes.
#[derive(Debug, Clone)]
pub struct InlineAnnotation<'src> {
    pub location: SourceLocation<'src>,
    pub kind: InlineKind,
    pub text: Option<DiagnosticText>,
}

impl<'src> InlineAnnotation<'src> {
    pub fn new(location: SourceLocation<'src>, kind: InlineKind) -> Self {
        Self {
            location,
            kind,
            text: None,
        }
    }

    pub fn with_text(mut self, text: DiagnosticText) -> Self {
        self.text = Some(text);
        self
    }
}

/// A message composing a diagnostic: the primary message, or a note, or a
/// suggestion.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage<'src> {
    pub(crate) kind_id: &'static str,
    /// The location the file:line:col banner is printed for. Individual
    /// `inline_messages` may point elsewhere (e.g. a matching opening
    /// brace on another line); this is always the position the diagnostic
    /// itself was raised at.
    pub(crate) location: SourceLocation<'src>,
    pub(crate) primary_text: DiagnosticText,
    /// Sorted by `(line_number asc, column_number asc)`; the renderer
    /// depends on this ordering and never re-sorts.
    pub(crate) inline_messages: Vec<InlineAnnotation<'src>>,
    /// Text to splice into source lines when rendering; carried on the
    /// model but not rendered by `StreamConsumer` (spec.md §9 Open
    /// Questions: "Implementations may ignore it until the front-end
    /// surface is firmed up").
    pub(crate) source_insertions: Vec<(SourceLocation<'src>, String)>,
}

impl<'src> DiagnosticMessage<'src> {
    pub fn new(kind_id: &'static str, location: SourceLocation<'src>, primary_text: DiagnosticText) -> Self {
        Self {
            kind_id,
            location,
            primary_text,
            inline_messages: Vec::new(),
            source_insertions: Vec::new(),
        }
    }

    pub fn kind_id(&self) -> &'static str {
        self.kind_id
    }

    pub fn location(&self) -> SourceLocation<'src> {
        self.location
    }

    pub fn primary_text(&self) -> &DiagnosticText {
        &self.primary_text
    }

    pub fn inline_messages(&self) -> &[InlineAnnotation<'src>] {
        &self.inline_messages
    }

    pub fn source_insertions(&self) -> &[(SourceLocation<'src>, String)] {
        &self.source_insertions
    }

    /// Insert `annotation` keeping `inline_messages` sorted by
    /// `(line_number, column_number)`, stable on ties so original emission
    /// order survives (spec.md §9's tie-break decision, see DESIGN.md).
    pub(crate) fn insert_inline(&mut self, annotation: InlineAnnotation<'src>) {
        let key = (annotation.location.line_number, annotation.location.column_number);
        let pos = self
            .inline_messages
            .iter()
            .position(|existing| {
                (existing.location.line_number, existing.location.column_number) > key
            })
            .unwrap_or(self.inline_messages.len());
        self.inline_messages.insert(pos, annotation);
    }
}

/// An instance of a single error, warning, note, or suggestion.
#[derive(Debug, Clone)]
pub struct Diagnostic<'src> {
    pub severity: Severity,
    pub message: DiagnosticMessage<'src>,
    pub notes: Vec<DiagnosticMessage<'src>>,
    pub suggestions: Vec<DiagnosticMessage<'src>>,
}

impl<'src> Diagnostic<'src> {
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;

    fn loc(line: i32, col: i32) -> SourceLocation<'static> {
        SourceLocation::new("/f.cc", "line", line, col, 1)
    }

    #[test]
    fn glyphs_match_spec() {
        assert_eq!(InlineKind::Context.glyph(), ' ');
        assert_eq!(InlineKind::Basic.glyph(), '~');
        assert_eq!(InlineKind::Emphasis.glyph(), '^');
        assert_eq!(InlineKind::SuggestionAddition.glyph(), '+');
        assert_eq!(InlineKind::SuggestionRemoval.glyph(), '-');
    }

    #[test]
    fn priority_ordering() {
        assert!(InlineKind::Context < InlineKind::Basic);
        assert!(InlineKind::Basic < InlineKind::Emphasis);
        assert!(InlineKind::Emphasis < InlineKind::SuggestionAddition);
        assert!(InlineKind::SuggestionAddition < InlineKind::SuggestionRemoval);
    }

    #[test]
    fn insert_inline_keeps_sorted_order() {
        let mut msg = DiagnosticMessage::new("test", loc(1, 1), DiagnosticText::plain("primary"));
        msg.insert_inline(InlineAnnotation::new(loc(5, 10), InlineKind::Basic));
        msg.insert_inline(InlineAnnotation::new(loc(3, 1), InlineKind::Basic));
        msg.insert_inline(InlineAnnotation::new(loc(5, 2), InlineKind::Basic));

        let lines: Vec<(i32, i32)> = msg
            .inline_messages()
            .iter()
            .map(|a| (a.location.line_number, a.location.column_number))
            .collect();
        assert_eq!(lines, vec![(3, 1), (5, 2), (5, 10)]);
    }

    #[test]
    fn stable_on_equal_keys() {
        let mut msg = DiagnosticMessage::new("test", loc(1, 1), DiagnosticText::plain("primary"));
        msg.insert_inline(InlineAnnotation::new(loc(5, 5), InlineKind::Basic));
        msg.insert_inline(InlineAnnotation::new(loc(5, 5), InlineKind::Emphasis));
        assert_eq!(msg.inline_messages()[0].kind, InlineKind::Basic);
        assert_eq!(msg.inline_messages()[1].kind, InlineKind::Emphasis);
    }
}
