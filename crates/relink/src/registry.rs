use std::sync::LazyLock;

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    compile::{self, CompileFn},
    error::LinkageError,
    signature::Signature,
};

/// Resolution context handed to the binder.
///
/// Implementations must be idempotent and free of side effects: racing
/// threads may resolve the same function for the same call site.
pub trait Lookup: Send + Sync {
    fn find_static(&self, name: &str, signature: &Signature) -> Result<CompileFn, LinkageError>;
}

/// Compile functions keyed by name, with overloads distinguished by signature.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    functions: FxHashMap<CompactString, SmallVec<[CompileFn; 1]>>,
}

pub static BUILTIN_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::new();

    registry.register(CompileFn::new(
        "compile",
        Signature::compile(),
        compile::compile,
    ));
    registry.register(CompileFn::new(
        "compile_ignore_case",
        Signature::compile(),
        compile::compile_ignore_case,
    ));

    registry
});

/// The registry populated with the built-in compile functions.
pub fn builtins() -> &'static Registry {
    &BUILTIN_REGISTRY
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `function`, replacing any entry with the same name and signature.
    pub fn register(&mut self, function: CompileFn) -> &mut Self {
        let overloads = self
            .functions
            .entry(CompactString::new(function.name()))
            .or_default();

        match overloads
            .iter_mut()
            .find(|f| f.signature() == function.signature())
        {
            Some(existing) => *existing = function,
            None => overloads.push(function),
        }

        self
    }

    pub fn get(&self, name: &str, signature: &Signature) -> Option<&CompileFn> {
        self.functions
            .get(name)?
            .iter()
            .find(|f| f.signature() == signature)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|name| name.as_str())
    }

    /// Number of registered functions, counting every overload.
    pub fn len(&self) -> usize {
        self.functions.values().map(|overloads| overloads.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Lookup for Registry {
    fn find_static(&self, name: &str, signature: &Signature) -> Result<CompileFn, LinkageError> {
        let overloads = self
            .functions
            .get(name)
            .ok_or_else(|| LinkageError::NotDefined(CompactString::new(name)))?;

        overloads
            .iter()
            .find(|f| f.signature() == signature)
            .cloned()
            .ok_or_else(|| LinkageError::SignatureMismatch {
                name: CompactString::new(name),
                expected: signature.clone(),
                found: overloads.iter().map(|f| f.signature().clone()).collect(),
            })
    }
}
