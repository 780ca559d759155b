//! `relink` binds literal regex patterns to call sites once, so every later
//! execution of the site reuses an already compiled pattern.
//!
//! ## Examples
//!
//! ```rust
//! use relink::{CallSite, Signature};
//!
//! // Resolve "compile" in the built-in registry and apply the pattern.
//! let binding = relink::bind(relink::builtins(), "compile", &Signature::compile(), "[0-9]+").unwrap();
//! let m = binding.invoke().unwrap().find("abc123").unwrap();
//! assert_eq!(m.range(), 3..6);
//!
//! // A call site links on first use and keeps the binding afterwards.
//! static SITE: CallSite = CallSite::new("compile", "fn(str) -> pattern", r"(\w+)@(\w+)");
//!
//! let mut matcher = SITE.link(relink::builtins()).unwrap().matcher("alice@example").unwrap();
//! assert!(matcher.find().is_some());
//! assert_eq!(matcher.group(2), Some("example"));
//!
//! // Invalid patterns fail while linking.
//! assert!(relink::regex!("(").unwrap_err().is_pattern());
//! ```
mod binding;
mod call_site;
mod compile;
mod error;
mod linker;
mod registry;
mod signature;

pub use binding::Binding;
pub use call_site::CallSite;
pub use compile::{CompileFn, CompileFnPtr, Matcher, Pattern, compile, compile_ignore_case};
pub use error::{Error, LinkageError, PatternError};
pub use linker::{Linker, Options, Validation, bind};
pub use registry::{BUILTIN_REGISTRY, Lookup, Registry, builtins};
pub use signature::{Signature, TypeTag};

/// Outcome of linking a [`CallSite`]: the installed binding, or the error the
/// site failed with. Returned by [`CallSite::link`] and [`CallSite::link_with`].
pub type LinkResult<'a> = Result<&'a Binding, Error>;
