//! A caret-annotated diagnostic rendering engine for compiler front-ends.
//!
//! A front-end translates its own location handles (token indices, parse
//! tree nodes, byte ranges, ...) through a [`LocationTranslator`] into
//! [`SourceLocation`]s, builds [`Diagnostic`]s with an [`Emitter`], and hands
//! them to a [`Consumer`] — typically a [`StreamConsumer`] writing to a file
//! or [`std::io::Stderr`] via [`console_consumer`].
//!
//! # Example
//!
//! ```
//! use compiler_diagnostics::{
//!     ByteLocation, ByteOffsetTranslator, Emitter, FormatArg, Severity, StreamConsumer, Template,
//! };
//!
//! const UNDEFINED_NAME: Template = Template {
//!     kind_id: "undefined_name",
//!     severity: Severity::Error,
//!     format: "name `{0}` is not defined",
//! };
//!
//! let source = "let y = x + 1;";
//! let translator = ByteOffsetTranslator::new("example.cc", source);
//! let emitter = Emitter::new(translator, StreamConsumer::new(Vec::new()));
//!
//! emitter
//!     .emit(ByteLocation::Span(8..9), &UNDEFINED_NAME, vec![FormatArg::from("x")])
//!     .expect("diagnostic sink write succeeds");
//! ```

mod consumer;
mod emitter;
mod location;
mod message;
mod render;
mod severity;
mod text;
mod translator;

pub use consumer::{console_consumer, Consumer, ConsumerError, ErrorTrackingConsumer};
pub use emitter::{AnnotationScope, Builder, Emitter};
pub use location::SourceLocation;
pub use message::{Diagnostic, DiagnosticMessage, InlineAnnotation, InlineKind};
pub use render::StreamConsumer;
pub use severity::Severity;
pub use text::{DiagnosticText, FormatArg, Template};
pub use translator::{ByteLocation, ByteOffsetTranslator, LocationTranslator};
