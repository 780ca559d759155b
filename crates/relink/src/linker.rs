use std::sync::Arc;

use crate::{
    binding::Binding,
    error::Error,
    registry::Lookup,
    signature::{Signature, TypeTag},
};

/// When the bound pattern is checked for syntax errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    /// Compile while linking; an invalid pattern fails the bind.
    #[default]
    Eager,
    /// Compile on the first call through the binding.
    Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub validation: Validation,
}

#[derive(Debug, Clone, Default)]
pub struct Linker {
    pub(crate) options: Options,
}

impl Linker {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn set_validation(&mut self, validation: Validation) {
        self.options.validation = validation;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolves `name`/`signature` in `lookup` and applies `pattern` to it.
    ///
    /// Resolution failures are reported here, never on a later call. With
    /// [`Validation::Eager`] a pattern syntax error is reported here as well.
    pub fn bind(
        &self,
        lookup: &dyn Lookup,
        name: &str,
        signature: &Signature,
        pattern: &str,
    ) -> Result<Binding, Error> {
        tracing::debug!(
            "Linking {} {} with pattern {:?}",
            name,
            signature,
            pattern
        );

        let target = lookup.find_static(name, signature)?;
        tracing::trace!("Resolved {} {}", target.name(), target.signature());

        let call_shape = target.signature().bind_first(TypeTag::Str)?;
        let pattern: Arc<str> = Arc::from(pattern);

        match self.options.validation {
            Validation::Eager => {
                let compiled = target.call(&pattern)?;
                Ok(Binding::compiled(pattern, target, call_shape, compiled))
            }
            Validation::Deferred => Ok(Binding::deferred(pattern, target, call_shape)),
        }
    }
}

/// [`Linker::bind`] with default options.
pub fn bind(
    lookup: &dyn Lookup,
    name: &str,
    signature: &Signature,
    pattern: &str,
) -> Result<Binding, Error> {
    Linker::default().bind(lookup, name, signature, pattern)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{
        compile::{self, CompileFn, Pattern},
        error::{LinkageError, PatternError},
        registry::{Registry, builtins},
    };

    #[test]
    fn test_bind_eager() {
        let binding = bind(builtins(), "compile", &Signature::compile(), "[0-9]+").unwrap();

        assert!(binding.is_compiled());
        assert_eq!(binding.call_shape(), &Signature::returning(TypeTag::Pattern));
        assert_eq!(
            binding.invoke().unwrap().find("abc123").map(|m| m.range()),
            Some(3..6)
        );
    }

    #[test]
    fn test_bind_eager_invalid_pattern() {
        let err = bind(builtins(), "compile", &Signature::compile(), "(").unwrap_err();
        assert!(err.is_pattern());
    }

    #[test]
    fn test_bind_deferred_invalid_pattern() {
        let linker = Linker::new(Options {
            validation: Validation::Deferred,
        });
        let binding = linker
            .bind(builtins(), "compile", &Signature::compile(), "(")
            .unwrap();

        assert!(!binding.is_compiled());
        assert!(binding.invoke().unwrap_err().is_pattern());
    }

    #[test]
    fn test_bind_linkage_error_precedes_pattern_error() {
        let err = bind(builtins(), "compile_all", &Signature::compile(), "(").unwrap_err();
        assert_eq!(
            err,
            Error::Linkage(LinkageError::NotDefined("compile_all".into()))
        );
    }

    #[test]
    fn test_bind_not_bindable() {
        fn compile_flagged(pattern: &str) -> Result<Pattern, PatternError> {
            compile::compile(pattern)
        }

        let signature = Signature::new([TypeTag::Bool, TypeTag::Str], TypeTag::Pattern);
        let mut registry = Registry::new();
        registry.register(CompileFn::new("compile", signature.clone(), compile_flagged));

        assert_eq!(
            bind(&registry, "compile", &signature, "a").unwrap_err(),
            Error::Linkage(LinkageError::NotBindable(signature))
        );
    }

    #[test]
    fn test_bind_does_not_compile_when_deferred() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn counting(pattern: &str) -> Result<Pattern, PatternError> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            compile::compile(pattern)
        }

        let mut registry = Registry::new();
        registry.register(CompileFn::new("compile", Signature::compile(), counting));

        let mut linker = Linker::default();
        linker.set_validation(Validation::Deferred);
        assert_eq!(linker.options().validation, Validation::Deferred);

        let binding = linker
            .bind(&registry, "compile", &Signature::compile(), "x")
            .unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);

        binding.invoke().unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }
}
