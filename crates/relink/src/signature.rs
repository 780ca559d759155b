use std::{fmt, str::FromStr};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::error::LinkageError;

/// Value shapes that can appear in a call-site signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Str,
    Pattern,
    Matcher,
    Bool,
    Unit,
}

impl TypeTag {
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Str => "str",
            TypeTag::Pattern => "pattern",
            TypeTag::Matcher => "matcher",
            TypeTag::Bool => "bool",
            TypeTag::Unit => "unit",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeTag {
    type Err = LinkageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "str" | "string" => Ok(TypeTag::Str),
            "pattern" | "regex" => Ok(TypeTag::Pattern),
            "matcher" => Ok(TypeTag::Matcher),
            "bool" => Ok(TypeTag::Bool),
            "unit" | "()" => Ok(TypeTag::Unit),
            _ => Err(LinkageError::MalformedSignature(s.to_string())),
        }
    }
}

/// Argument and return shape of a function, e.g. `fn(str) -> pattern`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    params: SmallVec<[TypeTag; 2]>,
    ret: TypeTag,
}

impl Signature {
    pub fn new(params: impl IntoIterator<Item = TypeTag>, ret: TypeTag) -> Self {
        Self {
            params: params.into_iter().collect(),
            ret,
        }
    }

    /// A signature without parameters.
    pub fn returning(ret: TypeTag) -> Self {
        Self {
            params: SmallVec::new(),
            ret,
        }
    }

    /// The shape shared by every compile function: one pattern string in,
    /// one pattern out.
    pub fn compile() -> Self {
        Self::new([TypeTag::Str], TypeTag::Pattern)
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.params
    }

    pub fn ret(&self) -> TypeTag {
        self.ret
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Parses a textual descriptor.
    ///
    /// The `fn` keyword is optional, whitespace is ignored and a missing
    /// `-> ret` means `unit`:
    ///
    /// ```
    /// use relink::{Signature, TypeTag};
    ///
    /// let sig = Signature::parse("fn(str) -> pattern").unwrap();
    /// assert_eq!(sig, Signature::compile());
    /// assert_eq!(Signature::parse("()").unwrap().ret(), TypeTag::Unit);
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self, LinkageError> {
        let malformed = || LinkageError::MalformedSignature(descriptor.to_string());

        let s = descriptor.trim();
        let s = s.strip_prefix("fn").map(str::trim_start).unwrap_or(s);
        let (params, rest) = s
            .strip_prefix('(')
            .and_then(|s| s.split_once(')'))
            .ok_or_else(malformed)?;

        let params = if params.trim().is_empty() {
            SmallVec::new()
        } else {
            params
                .split(',')
                .map(|p| p.trim().parse::<TypeTag>().map_err(|_| malformed()))
                .collect::<Result<SmallVec<_>, _>>()?
        };

        let rest = rest.trim();
        let ret = if rest.is_empty() {
            TypeTag::Unit
        } else {
            rest.strip_prefix("->")
                .ok_or_else(malformed)?
                .trim()
                .parse::<TypeTag>()
                .map_err(|_| malformed())?
        };

        Ok(Self { params, ret })
    }

    /// Call shape left after partially applying `arg` as the first parameter.
    pub fn bind_first(&self, arg: TypeTag) -> Result<Self, LinkageError> {
        match self.params.split_first() {
            Some((first, rest)) if *first == arg => Ok(Self::new(rest.iter().copied(), self.ret)),
            _ => Err(LinkageError::NotBindable(self.clone())),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn({}) -> {}", self.params.iter().join(", "), self.ret)
    }
}

impl FromStr for Signature {
    type Err = LinkageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
