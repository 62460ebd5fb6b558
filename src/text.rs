//! Type-erased format arguments and diagnostic message templates.

use std::borrow::Cow;

use serde::Serialize;

use crate::severity::Severity;

/// A single formatted diagnostic argument.
///
/// The spec's Design Notes prefer "a tagged-variant enumeration covering the
/// front-end's actual formatted types... over an open-ended type erasure,
/// for both safety and speed"; this is that enumeration, standing in for
/// the original's `llvm::Any` + `llvm::formatv` pairing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatArg {
    /// A borrowed or owned string, e.g. a token spelling.
    Str(Cow<'static, str>),
    /// A signed integer, e.g. an arity or a count.
    Int(i64),
    /// An identifier name, rendered distinctly from an arbitrary string so a
    /// front-end's formatter could special-case it (e.g. quoting).
    Ident(String),
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Str(s) => write!(f, "{s}"),
            FormatArg::Int(i) => write!(f, "{i}"),
            FormatArg::Ident(s) => write!(f, "{s}"),
        }
    }
}

impl From<&'static str> for FormatArg {
    fn from(s: &'static str) -> Self {
        FormatArg::Str(Cow::Borrowed(s))
    }
}

impl From<String> for FormatArg {
    fn from(s: String) -> Self {
        FormatArg::Str(Cow::Owned(s))
    }
}

impl From<i64> for FormatArg {
    fn from(i: i64) -> Self {
        FormatArg::Int(i)
    }
}

/// A format template paired with an ordered sequence of erased arguments.
///
/// The pairing is rendered by [`Template::format`]; a `DiagnosticText` only
/// stores the raw template text and its arguments, so the template string
/// itself can remain a `'static` literal while arguments vary per emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticText {
    pub(crate) format: &'static str,
    pub(crate) args: Vec<FormatArg>,
}

impl DiagnosticText {
    /// A diagnostic text with no arguments.
    pub fn plain(format: &'static str) -> Self {
        Self {
            format,
            args: Vec::new(),
        }
    }

    /// A diagnostic text with positional `{0}`, `{1}`, … arguments.
    pub fn new(format: &'static str, args: Vec<FormatArg>) -> Self {
        Self { format, args }
    }

    /// The raw, unformatted template string.
    pub fn format_str(&self) -> &'static str {
        self.format
    }

    /// The erased arguments, for non-standard consumers that want to
    /// inspect diagnostic details without parsing the formatted string.
    pub fn args(&self) -> &[FormatArg] {
        &self.args
    }

    /// Render this text by substituting `{0}`, `{1}`, … in `format` with
    /// the `Display` form of each argument, in order.
    pub fn render(&self) -> String {
        substitute(self.format, &self.args)
    }
}

/// Positional `{0}`, `{1}`, … substitution, the crate's default `format_fn`.
fn substitute(format: &str, args: &[FormatArg]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '{' {
            if let Some(end) = format[i + 1..].find('}') {
                let digits = &format[i + 1..i + 1 + end];
                if let Ok(index) = digits.parse::<usize>() {
                    let arg = args.get(index).unwrap_or_else(|| {
                        panic!(
                            "diagnostic template references argument {index} but only {} were supplied",
                            args.len()
                        )
                    });
                    out.push_str(&arg.to_string());
                    for _ in 0..=end {
                        chars.next();
                    }
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// A compile-time diagnostic declaration: a kind id, a severity, and a
/// format template.
///
/// This is the Rust analogue of Carbon's `CARBON_DIAGNOSTIC` macro, which
/// expands to a `static constexpr DiagnosticBase<Args...>`. Front-ends
/// declare one `Template` per diagnostic kind as a `const`:
///
/// ```
/// use compiler_diagnostics::{Severity, Template};
///
/// const UNDEFINED_NAME: Template = Template {
///     kind_id: "undefined_name",
///     severity: Severity::Error,
///     format: "name `{0}` is not defined",
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    /// Stable identifier for this diagnostic kind (the front-end's concern;
    /// this crate treats it as an opaque string).
    pub kind_id: &'static str,
    /// The severity every diagnostic built from this template carries.
    pub severity: Severity,
    /// The format template, with `{0}`, `{1}`, … placeholders.
    pub format: &'static str,
}

impl Template {
    /// Apply `args` to this template's format string.
    pub fn format(&self, args: &[FormatArg]) -> String {
        substitute(self.format, args)
    }

    /// Build the [`DiagnosticText`] this template produces for `args`.
    pub fn text(&self, args: Vec<FormatArg>) -> DiagnosticText {
        DiagnosticText::new(self.format, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_substitution() {
        let text = DiagnosticText::new(
            "found {0}, expected {1}",
            vec![FormatArg::from("bar"), FormatArg::from("baz")],
        );
        assert_eq!(text.render(), "found bar, expected baz");
    }

    #[test]
    fn repeated_argument() {
        let text = DiagnosticText::new("{0} vs {0}", vec![FormatArg::Int(4)]);
        assert_eq!(text.render(), "4 vs 4");
    }

    #[test]
    fn plain_text_has_no_args() {
        let text = DiagnosticText::plain("no placeholders here");
        assert_eq!(text.render(), "no placeholders here");
    }

    #[test]
    #[should_panic(expected = "only 1 were supplied")]
    fn missing_argument_panics() {
        DiagnosticText::new("{1}", vec![FormatArg::Int(1)]).render();
    }

    #[test]
    fn template_format() {
        const T: Template = Template {
            kind_id: "test",
            severity: Severity::Error,
            format: "{0} is invalid",
        };
        assert_eq!(T.format(&[FormatArg::from("x")]), "x is invalid");
    }
}
