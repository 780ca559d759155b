use std::sync::OnceLock;

use crate::{
    LinkResult, binding::Binding, error::Error, linker::Linker, registry::Lookup,
    signature::Signature,
};

/// One textual call location and the binding it is linked to.
///
/// Meant to live in a `static`. The first [`CallSite::link`] resolves and
/// binds the pattern; the outcome, success or failure, is installed once and
/// every later call returns it without touching the linker again.
#[derive(Debug)]
pub struct CallSite {
    name: &'static str,
    descriptor: &'static str,
    pattern: &'static str,
    slot: OnceLock<Result<Binding, Error>>,
}

impl CallSite {
    pub const fn new(name: &'static str, descriptor: &'static str, pattern: &'static str) -> Self {
        Self {
            name,
            descriptor,
            pattern,
            slot: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn descriptor(&self) -> &'static str {
        self.descriptor
    }

    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    pub fn link(&self, lookup: &dyn Lookup) -> LinkResult<'_> {
        self.link_with(&Linker::default(), lookup)
    }

    pub fn link_with(&self, linker: &Linker, lookup: &dyn Lookup) -> LinkResult<'_> {
        if let Some(linked) = self.slot.get() {
            return linked.as_ref().map_err(Clone::clone);
        }

        // Threads racing here may each bind; only the first outcome is kept.
        let outcome = Signature::parse(self.descriptor)
            .map_err(Error::from)
            .and_then(|signature| linker.bind(lookup, self.name, &signature, self.pattern));

        if let Err(e) = &outcome {
            tracing::debug!("Linking {} failed: {}", self.name, e);
        }

        self.slot
            .get_or_init(|| outcome)
            .as_ref()
            .map_err(Clone::clone)
    }

    /// The installed binding, if linking has happened and succeeded.
    pub fn binding(&self) -> Option<&Binding> {
        self.slot.get().and_then(|linked| linked.as_ref().ok())
    }

    pub fn is_linked(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// Links a `static` call site for a literal pattern against the built-in
/// registry and evaluates to `Result<&'static Binding, Error>`.
///
/// ```
/// let binding = relink::regex!("[0-9]+").unwrap();
/// assert_eq!(binding.invoke().unwrap().find("abc123").map(|m| m.start()), Some(3));
///
/// let ignore_case = relink::regex!("compile_ignore_case", "hello").unwrap();
/// assert!(ignore_case.invoke().unwrap().is_match("HELLO"));
/// ```
#[macro_export]
macro_rules! regex {
    ($pattern:literal) => {
        $crate::regex!("compile", $pattern)
    };
    ($name:literal, $pattern:literal) => {{
        static SITE: $crate::CallSite =
            $crate::CallSite::new($name, "fn(str) -> pattern", $pattern);
        SITE.link($crate::builtins())
    }};
}
