//! Suffix engine: a compiled ruleset plus its query surface.

use std::io::Read;

use ahash::AHashSet;

use crate::compiler;
use crate::error::{Error, Result};
use crate::matcher::{self, Resolution};
use crate::mode::Mode;
use crate::trie::SuffixTrie;

/// Longest host treated as a candidate IPv4 literal ("255.255.255.255").
const MAX_IPV4_LEN: usize = 15;

/// A compiled, immutable suffix ruleset.
///
/// Built once from rule corpora; afterwards every query is read-only and
/// lock-free, so an engine can be shared freely across threads. Most
/// callers use the process-wide engine through the crate-level functions
/// instead of building their own.
pub struct SuffixEngine {
    trie: SuffixTrie,
    valid_tlds: AHashSet<String>,
    rule_count: usize,
}

impl SuffixEngine {
    /// Compile an engine from rule corpora, applied in order (set union).
    ///
    /// Returns [`Error::EmptyRuleSet`] when no well-formed rule survives.
    pub fn from_corpora(corpora: &[&str]) -> Result<Self> {
        let compiled = compiler::compile_corpora(corpora);
        if compiled.trie.is_empty() {
            return Err(Error::EmptyRuleSet);
        }
        Ok(SuffixEngine {
            trie: compiled.trie,
            valid_tlds: compiled.valid_tlds,
            rule_count: compiled.rule_count,
        })
    }

    /// Compile an engine from a reader containing rule text.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_corpora(&[&text])
    }

    /// Public suffix plus one registrable label, strict: returns the empty
    /// string when no rule applies or the host lacks a label a rule demands.
    pub fn public_suffix(&self, host: &str) -> String {
        self.find(host, Mode::Strict)
    }

    /// Permissive variant of [`public_suffix`](Self::public_suffix):
    /// tolerates unknown or truncated suffixes by falling back to the
    /// rightmost labels of the host.
    pub fn base_domain(&self, host: &str) -> String {
        self.find(host, Mode::Permissive)
    }

    /// Resolve `host` under the given mode. The result is either empty or
    /// a suffix of the lowercased host beginning at a label boundary.
    pub fn find(&self, host: &str, mode: Mode) -> String {
        let lower = host.to_ascii_lowercase();
        let bytes = lower.as_bytes();
        let Some(&tail) = bytes.last() else {
            return String::new();
        };
        if tail == b'.' {
            return String::new();
        }
        if tail.is_ascii_digit() {
            // IPv4-like literal; never walked against the trie.
            return match mode {
                Mode::Strict => String::new(),
                Mode::Permissive if is_ipv4_like(bytes) => lower,
                Mode::Permissive => String::new(),
            };
        }
        match matcher::resolve(&self.trie, bytes) {
            Resolution::Registrable { start } => slice_from(&lower, start),
            Resolution::MarkerBlocked { start } | Resolution::Suffix { start } => match mode {
                Mode::Strict => String::new(),
                Mode::Permissive => slice_from(&lower, start),
            },
            Resolution::NoRule | Resolution::Partial => match mode {
                Mode::Strict => String::new(),
                Mode::Permissive => trailing_labels(&lower),
            },
        }
    }

    /// True iff the rightmost label of the lowercased host is the TLD of
    /// at least one rule.
    pub fn has_valid_tld(&self, host: &str) -> bool {
        let lower = host.to_ascii_lowercase();
        match lower.rsplit('.').next() {
            Some(tld) if !tld.is_empty() => self.valid_tlds.contains(tld),
            _ => false,
        }
    }

    /// Number of well-formed rules compiled in.
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Number of distinct rule TLDs.
    pub fn tld_count(&self) -> usize {
        self.valid_tlds.len()
    }

    /// Every compiled rule path in host order. Diagnostics only.
    pub fn dump_rules(&self) -> Vec<String> {
        self.trie.paths()
    }
}

fn is_ipv4_like(host: &[u8]) -> bool {
    host.len() <= MAX_IPV4_LEN && host.iter().all(|b| b.is_ascii_digit() || *b == b'.')
}

/// Slice `lower` from `start`, which always sits on a label boundary.
fn slice_from(lower: &str, start: usize) -> String {
    lower.get(start..).unwrap_or_default().to_string()
}

/// The rightmost label, extended by one more label when a non-empty
/// neighbor exists.
fn trailing_labels(lower: &str) -> String {
    let bytes = lower.as_bytes();
    let mut start = bytes.len();
    while start > 0 && bytes[start - 1] != b'.' {
        start -= 1;
    }
    if start >= 2 {
        let dot = start - 1;
        let mut s = dot;
        while s > 0 && bytes[s - 1] != b'.' {
            s -= 1;
        }
        if s < dot {
            start = s;
        }
    }
    slice_from(lower, start)
}
