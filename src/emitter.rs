//! The builder-style facade front-ends drive: [`Emitter`], [`Builder`], and
//! RAII-scoped cross-cutting annotations via [`AnnotationScope`].
//!
//! Grounded on Carbon's `DiagnosticEmitter<LocationT>` / `DiagnosticBuilder`
//! / `DiagnosticAnnotationScopeBase`
//! (`examples/original_source/toolchain/diagnostics/diagnostic_emitter.h`).

use std::cell::RefCell;

use crate::consumer::{Consumer, ConsumerError};
use crate::message::{Diagnostic, DiagnosticMessage, InlineAnnotation, InlineKind};
use crate::severity::Severity;
use crate::text::{DiagnosticText, FormatArg, Template};
use crate::translator::LocationTranslator;

type Annotator<'src, L, T, C> = Box<dyn Fn(&mut Builder<'_, 'src, L, T, C>) + 'src>;

/// Translates front-end locations and hands finished diagnostics to a
/// [`Consumer`]. One `Emitter` is typically built per compilation unit and
/// shared (by reference) across every pass that reports diagnostics against
/// it.
pub struct Emitter<'src, L, T, C> {
    translator: T,
    consumer: RefCell<C>,
    annotators: RefCell<Vec<Annotator<'src, L, T, C>>>,
}

impl<'src, L, T, C> Emitter<'src, L, T, C>
where
    T: LocationTranslator<L>,
    C: Consumer<'src>,
{
    pub fn new(translator: T, consumer: C) -> Self {
        Self {
            translator,
            consumer: RefCell::new(consumer),
            annotators: RefCell::new(Vec::new()),
        }
    }

    /// Start building a diagnostic at `location` from `template`, applying
    /// every currently active annotation scope before returning it to the
    /// caller. The returned [`Builder`] seeds exactly one `Basic` inline
    /// annotation at the primary location with placeholder text, matching
    /// the original's `MakeMessage` default (see DESIGN.md); front-ends that
    /// need a different inline shape call [`Builder::with_inline`].
    pub fn build(&self, location: L, template: &'static Template, args: Vec<FormatArg>) -> Builder<'_, 'src, L, T, C> {
        let loc = self.translator.translate(location);
        let mut message = DiagnosticMessage::new(template.kind_id, loc, template.text(args));
        message.insert_inline(
            InlineAnnotation::new(loc, InlineKind::Basic).with_text(DiagnosticText::plain("temp inline msg")),
        );

        let diagnostic = Diagnostic {
            severity: template.severity,
            message,
            notes: Vec::new(),
            suggestions: Vec::new(),
        };

        let mut builder = Builder {
            emitter: self,
            diagnostic,
        };
        for annotator in self.annotators.borrow().iter() {
            annotator(&mut builder);
        }
        builder
    }

    /// Build and immediately emit a diagnostic with no notes or suggestions.
    pub fn emit(&self, location: L, template: &'static Template, args: Vec<FormatArg>) -> Result<(), ConsumerError> {
        self.build(location, template, args).emit()
    }

    /// Push `callback` onto the annotator stack; every `Builder` produced by
    /// [`Self::build`] while the returned guard is alive runs it before
    /// being handed back to the caller. Scopes must nest (LIFO) — the
    /// guard's `Drop` asserts this.
    pub fn annotate(&self, callback: Annotator<'src, L, T, C>) -> AnnotationScope<'_, 'src, L, T, C> {
        let depth = {
            let mut stack = self.annotators.borrow_mut();
            stack.push(callback);
            stack.len()
        };
        AnnotationScope { emitter: self, depth }
    }

    /// Run `body` with `callback` active as an annotation scope for its
    /// whole duration, guaranteeing the scope is popped even if `body`
    /// panics.
    pub fn with_annotation<R>(&self, callback: Annotator<'src, L, T, C>, body: impl FnOnce() -> R) -> R {
        let _scope = self.annotate(callback);
        body()
    }
}

/// RAII guard for one entry on an [`Emitter`]'s annotator stack. Dropping it
/// out of LIFO order is a programmer error and panics — in ordinary usage
/// this cannot happen, since Rust's scoping rules drop guards in reverse
/// creation order automatically.
pub struct AnnotationScope<'e, 'src, L, T, C> {
    emitter: &'e Emitter<'src, L, T, C>,
    depth: usize,
}

impl<'e, 'src, L, T, C> Drop for AnnotationScope<'e, 'src, L, T, C> {
    fn drop(&mut self) {
        let mut stack = self.emitter.annotators.borrow_mut();
        assert_eq!(
            stack.len(),
            self.depth,
            "AnnotationScope dropped out of LIFO order: expected depth {}, stack has {}",
            self.depth,
            stack.len()
        );
        stack.pop();
    }
}

/// A diagnostic under construction. Move-only in the original and in this
/// crate's idiom: every chaining method consumes `self` by value.
pub struct Builder<'a, 'src, L, T, C> {
    emitter: &'a Emitter<'src, L, T, C>,
    diagnostic: Diagnostic<'src>,
}

impl<'a, 'src, L, T, C> Builder<'a, 'src, L, T, C>
where
    T: LocationTranslator<L>,
    C: Consumer<'src>,
{
    /// Replace the primary message's default single inline annotation with
    /// `inline_messages`, sorted by `(line_number, column_number)`.
    pub fn with_inline(mut self, inline_messages: Vec<InlineAnnotation<'src>>) -> Self {
        self.diagnostic.message.inline_messages.clear();
        for annotation in inline_messages {
            self.diagnostic.message.insert_inline(annotation);
        }
        self
    }

    /// Attach a note. `template` must carry `Severity::Note` — a fatal,
    /// programmer-facing check, mirroring the original's level assertions.
    pub fn note(mut self, location: L, template: &'static Template, args: Vec<FormatArg>) -> Self {
        assert_eq!(
            template.severity,
            Severity::Note,
            "Builder::note requires a Severity::Note template, got {:?} ({})",
            template.severity,
            template.kind_id
        );
        let loc = self.emitter.translator.translate(location);
        self.diagnostic
            .notes
            .push(DiagnosticMessage::new(template.kind_id, loc, template.text(args)));
        self
    }

    /// Attach a suggestion. `template` must carry `Severity::Suggestion`.
    pub fn suggest(mut self, location: L, template: &'static Template, args: Vec<FormatArg>) -> Self {
        assert_eq!(
            template.severity,
            Severity::Suggestion,
            "Builder::suggest requires a Severity::Suggestion template, got {:?} ({})",
            template.severity,
            template.kind_id
        );
        let loc = self.emitter.translator.translate(location);
        self.diagnostic
            .suggestions
            .push(DiagnosticMessage::new(template.kind_id, loc, template.text(args)));
        self
    }

    /// Hand the finished diagnostic to the emitter's consumer.
    pub fn emit(self) -> Result<(), ConsumerError> {
        self.emitter.consumer.borrow_mut().handle(self.diagnostic)
    }
}
