//! Rule compilation: brace-grammar parsing and trie insertion.
//!
//! Each non-comment line is one rule: a TLD token followed by brace groups
//! of alternatives for the labels moving leftward. Alternatives expand into
//! the trie through shared prefixes, so the cross-product of the groups
//! exists implicitly. Malformed lines are reported and skipped; the rest of
//! the corpus still compiles.

use ahash::AHashSet;

use crate::error::RuleLineError;
use crate::trie::{NodeId, SuffixTrie, EXCEPTION, ROOT, SEPARATOR, WILDCARD};

/// Maximum label positions per rule, TLD included. Longer rules are
/// truncated with a warning.
const MAX_POSITIONS: usize = 6;

/// One alternative at a rule position.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Alt {
    Label(String),
    Wildcard,
    Exception,
}

/// A parsed rule line: the TLD plus alternative groups moving leftward.
#[derive(Debug)]
struct ParsedRule {
    tld: String,
    groups: Vec<Vec<Alt>>,
}

/// Output of compiling rule corpora.
pub(crate) struct CompiledRules {
    pub trie: SuffixTrie,
    pub valid_tlds: AHashSet<String>,
    pub rule_count: usize,
}

/// Compile rule corpora, in order, into a single trie. Later corpora only
/// ever add to the trie (set union).
pub(crate) fn compile_corpora(corpora: &[&str]) -> CompiledRules {
    let mut trie = SuffixTrie::new();
    let mut valid_tlds = AHashSet::new();
    let mut rule_count = 0;

    for corpus in corpora {
        for (lineno, raw) in corpus.lines().enumerate() {
            match parse_line(raw) {
                Ok(Some(rule)) => {
                    insert_rule(&mut trie, &rule);
                    valid_tlds.insert(rule.tld);
                    rule_count += 1;
                }
                Ok(None) => {}
                Err(err) => {
                    log::warn!("skipping rule line {}: {}: {}", lineno + 1, err, raw.trim());
                }
            }
        }
    }

    CompiledRules {
        trie,
        valid_tlds,
        rule_count,
    }
}

/// Parse one line. `Ok(None)` means the line carries no rule (blank,
/// comment, or zero positions); `Err` means it is malformed and skipped.
fn parse_line(raw: &str) -> Result<Option<ParsedRule>, RuleLineError> {
    let line = raw.find('#').map_or(raw, |i| &raw[..i]);
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let line = line.to_ascii_lowercase();
    let tokens = tokenize(&line);

    let mut iter = tokens.iter();
    let Some(&tld) = iter.next() else {
        return Ok(None);
    };
    if tld == "{" || tld == "}" {
        // No TLD position at all; a zero-position rule is silently ignored.
        return Ok(None);
    }
    if tld == "*" || tld == "!" {
        return Err(RuleLineError::MarkerTld(tld.to_string()));
    }
    if has_reserved_byte(tld) {
        return Err(RuleLineError::ReservedByte(tld.to_string()));
    }

    let mut groups: Vec<Vec<Alt>> = Vec::new();
    let mut current: Vec<Alt> = Vec::new();
    let mut open = false;
    for &tok in iter {
        match tok {
            "{" => {
                if open {
                    return Err(RuleLineError::UnbalancedBraces);
                }
                open = true;
            }
            "}" => {
                if !open {
                    return Err(RuleLineError::UnbalancedBraces);
                }
                open = false;
                if current.is_empty() {
                    // `{ }` ends the rule at the preceding depth.
                    break;
                }
                groups.push(std::mem::take(&mut current));
            }
            word if open => match word {
                "*" => current.push(Alt::Wildcard),
                "!" => current.push(Alt::Exception),
                w if has_reserved_byte(w) => {
                    return Err(RuleLineError::ReservedByte(w.to_string()));
                }
                w => current.push(Alt::Label(w.to_string())),
            },
            _ => return Err(RuleLineError::UnbalancedBraces),
        }
    }
    if open {
        return Err(RuleLineError::UnbalancedBraces);
    }

    if groups.len() > MAX_POSITIONS - 1 {
        log::warn!(
            "rule `{}` exceeds {} label positions; truncating",
            line,
            MAX_POSITIONS
        );
        groups.truncate(MAX_POSITIONS - 1);
    }

    Ok(Some(ParsedRule {
        tld: tld.to_string(),
        groups,
    }))
}

/// Split a line into words with `{` and `}` isolated as their own tokens.
fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let mut rest = word;
        while !rest.is_empty() {
            match rest.find(['{', '}']) {
                Some(0) => {
                    tokens.push(&rest[..1]);
                    rest = &rest[1..];
                }
                Some(i) => {
                    tokens.push(&rest[..i]);
                    tokens.push(&rest[i..=i]);
                    rest = &rest[i + 1..];
                }
                None => {
                    tokens.push(rest);
                    rest = "";
                }
            }
        }
    }
    tokens
}

fn has_reserved_byte(word: &str) -> bool {
    word.bytes()
        .any(|b| matches!(b, 0x00 | b'.' | b'!' | b'*'))
}

fn insert_rule(trie: &mut SuffixTrie, rule: &ParsedRule) {
    let node = trie.push_label(ROOT, rule.tld.as_bytes());
    insert_groups(trie, node, &rule.groups);
}

/// Recursively expand the remaining groups from `node`. Branching over each
/// group's alternatives materializes the cross-product in the trie.
fn insert_groups(trie: &mut SuffixTrie, node: NodeId, groups: &[Vec<Alt>]) {
    let Some((group, rest)) = groups.split_first() else {
        trie.mark_terminal(node);
        return;
    };
    for alt in group {
        let sep = trie.ensure_child(node, SEPARATOR);
        match alt {
            Alt::Exception => {
                // An exception ends its expansion branch at this depth.
                trie.ensure_child(sep, EXCEPTION);
            }
            Alt::Wildcard => {
                let star = trie.ensure_child(sep, WILDCARD);
                insert_groups(trie, star, rest);
            }
            Alt::Label(label) => {
                let next = trie.push_label(sep, label.as_bytes());
                insert_groups(trie, next, rest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(text: &str) -> CompiledRules {
        compile_corpora(&[text])
    }

    #[test]
    fn test_single_tld_rule() {
        let rules = compile("com\n");
        assert_eq!(rules.rule_count, 1);
        assert!(rules.valid_tlds.contains("com"));
        assert_eq!(rules.trie.paths(), vec!["com"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let rules = compile("# header\n\ncom # trailing\n   \n");
        assert_eq!(rules.rule_count, 1);
        assert_eq!(rules.trie.paths(), vec!["com"]);
    }

    #[test]
    fn test_group_cross_product() {
        let rules = compile("uk { co org } { a b }\n");
        assert_eq!(
            rules.trie.paths(),
            vec!["a.co.uk", "a.org.uk", "b.co.uk", "b.org.uk"]
        );
    }

    #[test]
    fn test_wildcard_and_exception() {
        let rules = compile("bd { * }\nck { * }\nck { www } { ! }\n");
        assert_eq!(rules.trie.paths(), vec!["!www.ck", "*.bd", "*.ck"]);
        assert!(rules.valid_tlds.contains("bd"));
        assert!(rules.valid_tlds.contains("ck"));
    }

    #[test]
    fn test_empty_group_ends_rule() {
        let a = compile("uk { }\n");
        let b = compile("uk\n");
        assert_eq!(a.trie.paths(), b.trie.paths());

        // Groups after `{ }` are ignored.
        let c = compile("uk { } { co }\n");
        assert_eq!(c.trie.paths(), vec!["uk"]);
    }

    #[test]
    fn test_rules_are_lowercased() {
        let rules = compile("COM\nUK { Co }\n");
        assert_eq!(rules.trie.paths(), vec!["co.uk", "com"]);
        assert!(rules.valid_tlds.contains("com"));
        assert!(rules.valid_tlds.contains("uk"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let rules = compile("com\nuk { co\nnet } }\n* { x }\nbad.label\norg\n");
        assert_eq!(rules.rule_count, 2);
        assert_eq!(rules.trie.paths(), vec!["com", "org"]);
    }

    #[test]
    fn test_zero_position_rule_is_ignored() {
        let rules = compile("{ co }\ncom\n");
        assert_eq!(rules.rule_count, 1);
        assert_eq!(rules.trie.paths(), vec!["com"]);
    }

    #[test]
    fn test_reserved_byte_in_alternative_skips_line() {
        let rules = compile("uk { co.org }\ncom\n");
        assert_eq!(rules.rule_count, 1);
        assert_eq!(rules.trie.paths(), vec!["com"]);
    }

    #[test]
    fn test_depth_truncation() {
        let rules = compile("a { b } { c } { d } { e } { f } { g } { h }\n");
        assert_eq!(rules.rule_count, 1);
        // Six positions survive: a plus five groups.
        assert_eq!(rules.trie.paths(), vec!["f.e.d.c.b.a"]);
    }

    #[test]
    fn test_braces_without_spaces() {
        let rules = compile("uk {co org}\n");
        assert_eq!(rules.trie.paths(), vec!["co.uk", "org.uk"]);
    }

    #[test]
    fn test_union_across_corpora() {
        let rules = compile_corpora(&["com\nuk { co }\n", "com\nuk { org }\n"]);
        assert_eq!(rules.trie.paths(), vec!["co.uk", "com", "org.uk"]);
        assert_eq!(rules.rule_count, 4);
    }

    #[test]
    fn test_idn_labels_pass_through() {
        let rules = compile("рф\n香港 { 公司 }\n");
        assert!(rules.valid_tlds.contains("рф"));
        assert_eq!(rules.trie.paths(), vec!["рф", "公司.香港"]);
    }
}
