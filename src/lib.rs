//! Pubsuffix - public-suffix and base-domain resolution.
//!
//! This crate answers one question about a DNS hostname: where does the
//! registrable part begin? Rules compiled into a label-reversed byte trie
//! designate the suffixes under which independent parties register domains;
//! the matcher walks a host right-to-left over that trie and returns the
//! suffix plus one registrable label.
//!
//! # Features
//!
//! - **Strict resolution**: [`public_suffix`] returns empty unless a rule
//!   matches completely
//! - **Permissive resolution**: [`base_domain`] tolerates unknown or
//!   truncated suffixes and falls back to heuristics
//! - **Wildcard and exception rules**: single-label `*` positions
//!   (including mid-pattern, as in the `us` city rules) and `!` negations
//! - **One-shot compile**: the trie is built once per process and shared
//!   lock-free across threads afterwards
//!
//! # Quick Start
//!
//! ```
//! // The first call compiles the built-in corpora.
//! assert_eq!(pubsuffix::public_suffix("www.whitbread.co.uk"), "whitbread.co.uk");
//! assert_eq!(pubsuffix::public_suffix("www.foo.zz"), "");
//! assert_eq!(pubsuffix::base_domain("www.foo.zz"), "foo.zz");
//! assert!(pubsuffix::has_valid_tld("example.com"));
//! ```
//!
//! Applications that need their own ruleset build a [`SuffixEngine`]
//! directly:
//!
//! ```
//! use pubsuffix::SuffixEngine;
//!
//! let engine = SuffixEngine::from_corpora(&["com\nuk { co org }\n"]).unwrap();
//! assert_eq!(engine.public_suffix("www.foo.co.uk"), "foo.co.uk");
//! ```
//!
//! # Rule Format
//!
//! One rule per line; `#` starts a comment. The first token is the TLD and
//! each brace group lists the alternatives for the next label moving
//! leftward:
//!
//! ```text
//! com
//! uk { ac co gov ltd me net nhs org plc police sch }
//! bd { * }            # every label under bd is a suffix
//! ck { www } { ! }    # ...except www.ck, which is itself registrable
//! us { ca } { * } { ci town vil co }
//! ```
//!
//! Malformed lines are logged and skipped; the rest of the corpus still
//! compiles. Raising the log level to `debug` traces every matching step.
//!
//! # Host Handling
//!
//! Hosts are ASCII-lowercased before matching; everything else passes
//! through byte-for-byte. Internationalized names are expected to be
//! decoded to UTF-8 U-labels upstream. Hosts ending in a digit are treated
//! as IPv4-like literals and never walked against the trie.

mod compiler;
mod corpus;
mod engine;
mod error;
mod global;
mod matcher;
mod mode;
mod trie;

// Re-export core types
pub use corpus::Corpus;
pub use engine::SuffixEngine;
pub use error::{Error, Result, RuleLineError};
pub use mode::Mode;

// Re-export global API functions
pub use global::{base_domain, compile, compile_with, has_valid_tld, is_compiled, public_suffix};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_workflow() {
        let rules = r#"
# Generic suffixes
com
net

# Second-level registries
uk { ac co gov org }

# Wildcards and exceptions
bd { * }
ck { * }
ck { www } { ! }
"#;

        let engine = SuffixEngine::from_corpora(&[rules]).unwrap();
        assert_eq!(engine.rule_count(), 6);

        // Strict resolution
        assert_eq!(engine.public_suffix("www.example.com"), "example.com");
        assert_eq!(engine.public_suffix("www.example.co.uk"), "example.co.uk");
        assert_eq!(engine.public_suffix("x.y.bd"), "x.y.bd");
        assert_eq!(engine.public_suffix("y.bd"), "");
        assert_eq!(engine.public_suffix("www.ck"), "www.ck");

        // Permissive resolution
        assert_eq!(engine.base_domain("y.bd"), "y.bd");
        assert_eq!(engine.base_domain("example.unknown"), "example.unknown");

        // Mode dispatch mirrors the named entry points
        assert_eq!(
            engine.find("www.example.com", Mode::Strict),
            engine.public_suffix("www.example.com")
        );
        assert_eq!(
            engine.find("y.bd", Mode::Permissive),
            engine.base_domain("y.bd")
        );

        // TLD queries
        assert!(engine.has_valid_tld("foo.ck"));
        assert!(!engine.has_valid_tld("foo.de"));
    }
}
