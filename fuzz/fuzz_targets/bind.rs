#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use relink::{Error, Linker, Options, Signature, Validation};

#[derive(Debug, Clone, Arbitrary)]
enum Name {
    Compile,
    CompileIgnoreCase,
    Raw(String),
}

#[derive(Debug, Clone, Arbitrary)]
struct ArbitraryBind {
    name: Name,
    descriptor: Option<String>,
    pattern: String,
    haystack: String,
    deferred: bool,
}

impl ArbitraryBind {
    fn name(&self) -> &str {
        match &self.name {
            Name::Compile => "compile",
            Name::CompileIgnoreCase => "compile_ignore_case",
            Name::Raw(name) => name.as_str(),
        }
    }
}

fuzz_target!(|input: ArbitraryBind| {
    let signature = match &input.descriptor {
        Some(descriptor) => match Signature::parse(descriptor) {
            Ok(signature) => signature,
            Err(_) => return,
        },
        None => Signature::compile(),
    };
    let validation = if input.deferred {
        Validation::Deferred
    } else {
        Validation::Eager
    };

    let linker = Linker::new(Options { validation });
    match linker.bind(relink::builtins(), input.name(), &signature, &input.pattern) {
        Ok(binding) => {
            let first = binding.invoke().map(|p| p.find(&input.haystack).map(|m| m.range()));
            let second = binding.invoke().map(|p| p.find(&input.haystack).map(|m| m.range()));
            assert_eq!(first, second);

            if let Ok(mut matcher) = binding.matcher(&input.haystack) {
                let mut last_end = 0;
                while let Some(m) = matcher.find() {
                    assert!(m.start() >= last_end);
                    last_end = m.end();
                }
            }
        }
        Err(Error::Pattern(_)) => assert_eq!(validation, Validation::Eager),
        Err(Error::Linkage(_)) => {}
    }
});
