//! Process-wide engine and public API.

use once_cell::sync::OnceCell;

use crate::corpus;
use crate::engine::SuffixEngine;
use crate::error::{Error, Result};

/// Global engine slot. `None` records a failed compile: later calls keep
/// returning empty results instead of retrying, since the compile runs
/// exactly once per process.
static ENGINE: OnceCell<Option<SuffixEngine>> = OnceCell::new();

/// The compiled engine, building it from the built-in corpora on first use.
/// Concurrent first-callers serialize inside `get_or_init`.
fn engine() -> &'static Option<SuffixEngine> {
    ENGINE.get_or_init(|| build(&corpus::default_corpora()))
}

fn build(corpora: &[&str]) -> Option<SuffixEngine> {
    match SuffixEngine::from_corpora(corpora) {
        Ok(engine) => {
            log::debug!(
                "compiled suffix rules: {} rules, {} TLDs, {} trie nodes",
                engine.rule_count(),
                engine.tld_count(),
                engine.node_count()
            );
            Some(engine)
        }
        Err(err) => {
            log::error!("failed to compile suffix rules: {}", err);
            None
        }
    }
}

/// Compile the built-in corpora into the global engine.
///
/// Idempotent pre-warm: the first caller performs the compile while
/// concurrent callers wait for it; afterwards this only reports the stored
/// outcome.
pub fn compile() -> Result<()> {
    match engine() {
        Some(_) => Ok(()),
        None => Err(Error::EmptyRuleSet),
    }
}

/// Compile the global engine from caller-supplied corpora instead of the
/// built-in ones. A no-op when the engine is already compiled: the guard
/// never rebuilds.
pub fn compile_with(corpora: &[&str]) -> Result<()> {
    match ENGINE.get_or_init(|| build(corpora)) {
        Some(_) => Ok(()),
        None => Err(Error::EmptyRuleSet),
    }
}

/// True once the global engine holds a compiled ruleset.
pub fn is_compiled() -> bool {
    matches!(ENGINE.get(), Some(Some(_)))
}

/// Public suffix plus one registrable label, strict mode: empty when no
/// rule applies or the host lacks a label the rules demand.
///
/// # Examples
/// ```
/// assert_eq!(pubsuffix::public_suffix("www.foo.com"), "foo.com");
/// assert_eq!(pubsuffix::public_suffix("www.foo.zz"), "");
/// ```
pub fn public_suffix(host: &str) -> String {
    match engine() {
        Some(e) => e.public_suffix(host),
        None => String::new(),
    }
}

/// Permissive variant of [`public_suffix`]: always returns a plausible
/// registrable domain, tolerating unknown or truncated suffixes.
///
/// # Examples
/// ```
/// assert_eq!(pubsuffix::base_domain("www.foo.zz"), "foo.zz");
/// assert_eq!(pubsuffix::base_domain("127.0.0.1"), "127.0.0.1");
/// ```
pub fn base_domain(host: &str) -> String {
    match engine() {
        Some(e) => e.base_domain(host),
        None => String::new(),
    }
}

/// True iff the rightmost label of the lowercased host is the TLD of at
/// least one rule.
pub fn has_valid_tld(host: &str) -> bool {
    match engine() {
        Some(e) => e.has_valid_tld(host),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_is_idempotent() {
        assert!(compile().is_ok());
        assert!(compile().is_ok());
        assert!(is_compiled());
    }

    #[test]
    fn test_first_query_triggers_compile() {
        assert_eq!(public_suffix("www.foo.com"), "foo.com");
        assert!(is_compiled());
    }

    #[test]
    fn test_compile_with_is_a_noop_once_compiled() {
        assert!(compile().is_ok());
        // The guard never rebuilds, so even an empty corpus succeeds here.
        assert!(compile_with(&[""]).is_ok());
        assert_eq!(public_suffix("www.foo.com"), "foo.com");
    }

    #[test]
    fn test_global_queries() {
        assert_eq!(base_domain("www.foo.zz"), "foo.zz");
        assert!(has_valid_tld("example.com"));
        assert!(!has_valid_tld("example.zz"));
    }
}
