use compact_str::CompactString;
use regex_lite::{Captures, Match, Regex, RegexBuilder};

use crate::{error::PatternError, signature::Signature};

pub type CompileFnPtr = fn(&str) -> Result<Pattern, PatternError>;

/// A resolvable compile function: name, declared signature and entry point.
#[derive(Clone, Debug)]
pub struct CompileFn {
    name: CompactString,
    signature: Signature,
    func: CompileFnPtr,
}

impl CompileFn {
    pub fn new(name: impl Into<CompactString>, signature: Signature, func: CompileFnPtr) -> Self {
        Self {
            name: name.into(),
            signature,
            func,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline(always)]
    pub fn call(&self, pattern: &str) -> Result<Pattern, PatternError> {
        (self.func)(pattern)
    }
}

/// Standard regex syntax.
pub fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    build(pattern, false)
}

pub fn compile_ignore_case(pattern: &str) -> Result<Pattern, PatternError> {
    build(pattern, true)
}

fn build(pattern: &str, case_insensitive: bool) -> Result<Pattern, PatternError> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| PatternError::new(pattern, e))?;
    let anchored = RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| PatternError::new(pattern, e))?;

    Ok(Pattern { regex, anchored })
}

/// A compiled pattern. Immutable; every search state lives in a [`Matcher`].
#[derive(Clone, Debug)]
pub struct Pattern {
    regex: Regex,
    // Same pattern wrapped in `^(?:..)$`, used for whole-input matching.
    anchored: Regex,
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Whether the pattern matches `haystack` as a whole.
    pub fn is_full_match(&self, haystack: &str) -> bool {
        self.anchored.is_match(haystack)
    }

    pub fn find<'h>(&self, haystack: &'h str) -> Option<Match<'h>> {
        self.regex.find(haystack)
    }

    pub fn captures<'h>(&self, haystack: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(haystack)
    }

    /// Number of groups including the implicit whole-match group.
    pub fn captures_len(&self) -> usize {
        self.regex.captures_len()
    }

    pub fn matcher<'p, 'h>(&'p self, haystack: &'h str) -> Matcher<'p, 'h> {
        Matcher {
            pattern: self,
            haystack,
            pos: Some(0),
            last: None,
        }
    }
}

/// Search cursor over one haystack.
///
/// Each call to [`Matcher::find`] resumes after the previous match. An empty
/// match advances the cursor by one character so the search always makes
/// progress.
#[derive(Debug)]
pub struct Matcher<'p, 'h> {
    pattern: &'p Pattern,
    haystack: &'h str,
    pos: Option<usize>,
    last: Option<Captures<'h>>,
}

impl<'p, 'h> Matcher<'p, 'h> {
    pub fn pattern(&self) -> &'p Pattern {
        self.pattern
    }

    pub fn haystack(&self) -> &'h str {
        self.haystack
    }

    pub fn find(&mut self) -> Option<Match<'h>> {
        let pos = self.pos?;
        let caps = self.pattern.regex.captures_at(self.haystack, pos);
        self.record(caps)
    }

    /// Attempts to match the entire haystack.
    ///
    /// On success the groups are available through [`Matcher::group`] and a
    /// later [`Matcher::find`] resumes at the end of the input.
    pub fn matches(&mut self) -> bool {
        let caps = self.pattern.anchored.captures(self.haystack);
        self.record(caps).is_some()
    }

    fn record(&mut self, caps: Option<Captures<'h>>) -> Option<Match<'h>> {
        match caps {
            Some(caps) => {
                let m = caps.get(0)?;
                self.pos = if m.is_empty() {
                    next_char_boundary(self.haystack, m.end())
                } else {
                    Some(m.end())
                };
                self.last = Some(caps);
                Some(m)
            }
            None => {
                self.pos = None;
                self.last = None;
                None
            }
        }
    }

    /// Groups of the most recent successful [`Matcher::find`].
    pub fn captures(&self) -> Option<&Captures<'h>> {
        self.last.as_ref()
    }

    pub fn group(&self, index: usize) -> Option<&'h str> {
        self.last
            .as_ref()
            .and_then(|caps| caps.get(index))
            .map(|m| m.as_str())
    }

    pub fn start(&self) -> Option<usize> {
        self.last.as_ref().and_then(|caps| caps.get(0)).map(|m| m.start())
    }

    pub fn end(&self) -> Option<usize> {
        self.last.as_ref().and_then(|caps| caps.get(0)).map(|m| m.end())
    }

    pub fn reset(&mut self) {
        self.pos = Some(0);
        self.last = None;
    }
}

impl<'h> Iterator for Matcher<'_, 'h> {
    type Item = Match<'h>;

    fn next(&mut self) -> Option<Self::Item> {
        self.find()
    }
}

fn next_char_boundary(haystack: &str, at: usize) -> Option<usize> {
    haystack[at..].chars().next().map(|c| at + c.len_utf8())
}
