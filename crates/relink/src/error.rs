use compact_str::CompactString;
use itertools::Itertools;
use miette::Diagnostic;
use thiserror::Error;

use crate::signature::Signature;

type FunctionName = CompactString;

/// The compile function could not be resolved or applied at link time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinkageError {
    #[error("\"{0}\" is not defined")]
    NotDefined(FunctionName),
    #[error("No \"{name}\" with signature {expected}, found {}", .found.iter().join(", "))]
    SignatureMismatch {
        name: FunctionName,
        expected: Signature,
        found: Vec<Signature>,
    },
    #[error("Cannot bind a pattern literal to {0}, the first parameter must be str")]
    NotBindable(Signature),
    #[error("Malformed signature descriptor \"{0}\"")]
    MalformedSignature(String),
}

/// The pattern literal was rejected by the compile function.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid regular expression \"{pattern}\": {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

impl PatternError {
    pub fn new(pattern: impl Into<String>, message: impl ToString) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Linkage(#[from] LinkageError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl Error {
    pub fn is_linkage(&self) -> bool {
        matches!(self, Error::Linkage(_))
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Error::Pattern(_))
    }
}

impl Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let c = match self {
            Error::Linkage(LinkageError::NotDefined(_)) => "LinkageError::NotDefined",
            Error::Linkage(LinkageError::SignatureMismatch { .. }) => {
                "LinkageError::SignatureMismatch"
            }
            Error::Linkage(LinkageError::NotBindable(_)) => "LinkageError::NotBindable",
            Error::Linkage(LinkageError::MalformedSignature(_)) => {
                "LinkageError::MalformedSignature"
            }
            Error::Pattern(_) => "PatternError",
        };

        Some(Box::new(c))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            Error::Linkage(LinkageError::NotDefined(_)) => Some(Box::new(
                "register the compile function in the registry used for linking",
            )),
            Error::Linkage(LinkageError::SignatureMismatch { .. }) => {
                Some(Box::new("the call site must use one of the listed signatures"))
            }
            Error::Linkage(LinkageError::MalformedSignature(_)) => {
                Some(Box::new("expected a descriptor like `fn(str) -> pattern`"))
            }
            Error::Linkage(LinkageError::NotBindable(_)) | Error::Pattern(_) => None,
        }
    }
}
