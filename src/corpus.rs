//! Embedded rule corpora.

const EFFECTIVE_TLD: &str = include_str!("../data/effective_tld.rules");
const SPECIAL: &str = include_str!("../data/special.rules");

/// Built-in rule corpora.
///
/// Corpora are compiled in the order of [`Corpus::ALL`]; later corpora only
/// ever add rules to the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corpus {
    /// Autogenerated public-suffix rules.
    EffectiveTld,
    /// Hand-maintained supplemental rules.
    Special,
}

impl Corpus {
    /// All built-in corpora, in compilation order.
    pub const ALL: [Corpus; 2] = [Corpus::EffectiveTld, Corpus::Special];

    /// Get the internal name of this corpus.
    pub fn name(&self) -> &'static str {
        match self {
            Corpus::EffectiveTld => "effective_tld",
            Corpus::Special => "special",
        }
    }

    /// Get the rule text of this corpus.
    pub fn text(&self) -> &'static str {
        match self {
            Corpus::EffectiveTld => EFFECTIVE_TLD,
            Corpus::Special => SPECIAL,
        }
    }
}

/// The built-in corpora texts, in compilation order.
pub(crate) fn default_corpora() -> [&'static str; 2] {
    [Corpus::EffectiveTld.text(), Corpus::Special.text()]
}
