use std::sync::{Arc, OnceLock};

use crate::{
    compile::{CompileFn, Matcher, Pattern},
    error::{Error, PatternError},
    signature::Signature,
};

/// A compile function with its pattern literal already applied.
///
/// Built once per call site by the linker and never changed afterwards. The
/// pattern is compiled at most once over the lifetime of the binding: either
/// while linking or on the first [`Binding::invoke`], depending on
/// [`Validation`](crate::Validation). A failed compile is kept and returned
/// again on every later call.
#[derive(Debug)]
pub struct Binding {
    pattern: Arc<str>,
    target: CompileFn,
    call_shape: Signature,
    compiled: OnceLock<Result<Pattern, PatternError>>,
}

impl Binding {
    pub(crate) fn deferred(pattern: Arc<str>, target: CompileFn, call_shape: Signature) -> Self {
        Self {
            pattern,
            target,
            call_shape,
            compiled: OnceLock::new(),
        }
    }

    pub(crate) fn compiled(
        pattern: Arc<str>,
        target: CompileFn,
        call_shape: Signature,
        compiled: Pattern,
    ) -> Self {
        Self {
            pattern,
            target,
            call_shape,
            compiled: OnceLock::from(Ok(compiled)),
        }
    }

    /// The bound pattern literal.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compile function this binding was resolved to.
    pub fn target(&self) -> &CompileFn {
        &self.target
    }

    /// Signature left for callers once the pattern has been applied.
    pub fn call_shape(&self) -> &Signature {
        &self.call_shape
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    pub fn invoke(&self) -> Result<&Pattern, Error> {
        self.compiled
            .get_or_init(|| {
                tracing::debug!(
                    "Compiling deferred pattern {:?} with {}",
                    self.pattern,
                    self.target.name()
                );
                self.target.call(&self.pattern)
            })
            .as_ref()
            .map_err(|e| Error::Pattern(e.clone()))
    }

    pub fn matcher<'b, 'h>(&'b self, haystack: &'h str) -> Result<Matcher<'b, 'h>, Error> {
        self.invoke().map(|pattern| pattern.matcher(haystack))
    }
}
