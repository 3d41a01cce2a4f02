//! Right-to-left trie walk.
//!
//! The walk consumes one whole label per step, preferring a literal descent
//! and falling back to the wildcard edge. Its state is the current trie
//! node, the cursor, the last completed label endpoint, and a single
//! optional backtrack point captured when a wildcard edge is taken; a
//! literal match after a wildcard clears the backtrack point, and a dead
//! end restores it at most once.

use crate::trie::{NodeId, SuffixTrie, EXCEPTION, ROOT, SEPARATOR, TERMINAL, WILDCARD};

/// How the wildcard edge participated in reaching an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WildcardUse {
    /// No wildcard on the path.
    None,
    /// A wildcard consumed the innermost matched label.
    Tail,
    /// A wildcard was consumed and literal labels matched beyond it, so the
    /// wildcard already accounts for the registrable label.
    Mid,
}

/// A completed-label stopping point. `host[rem..]` is the matched suffix;
/// whenever `rem > 0`, `host[rem - 1]` is a separator.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    node: NodeId,
    rem: usize,
    wildcard: WildcardUse,
}

/// What a rule end at an endpoint means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndKind {
    /// The endpoint itself is the result; no extra label is consumed.
    Exception,
    /// Ordinary rule end; one more label to the left is the registrable one.
    Terminal,
}

/// Outcome of resolving a host against the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Not even the rightmost label matched a rule edge.
    NoRule,
    /// Labels matched but no rule end was recognized.
    Partial,
    /// A rule end was reached but the host lacks the registrable label.
    Suffix { start: usize },
    /// A rule end was reached, but the host byte adjacent to the suffix is
    /// a marker byte; strict mode rejects this.
    MarkerBlocked { start: usize },
    /// Full result: the matched suffix plus the registrable label, or an
    /// exception / wildcard-interior match that is its own result.
    Registrable { start: usize },
}

/// Resolve `host` (already lowercased) against the trie.
pub(crate) fn resolve(trie: &SuffixTrie, host: &[u8]) -> Resolution {
    let mut node = ROOT;
    let mut rem = host.len();
    let mut last: Option<Endpoint> = None;
    let mut backtrack: Option<Endpoint> = None;
    let mut wildcard = WildcardUse::None;

    loop {
        // Endpoint state entering this step; the wildcard backtrack point
        // restores to it, not to a partial attempt made within the step.
        let step_start = last;

        if let Some((n, r)) = literal_step(trie, node, host, rem) {
            if wildcard != WildcardUse::None {
                wildcard = WildcardUse::Mid;
                backtrack = None;
            }
            log::debug!("matched word: {}", fragment(host, r));
            last = Some(Endpoint {
                node: n,
                rem: r,
                wildcard,
            });
            if r == 0 {
                break;
            }
            if let Some(sep) = trie.child(n, SEPARATOR) {
                node = sep;
                rem = r - 1;
                continue;
            }
            // A completed label that cannot extend further: keep it when it
            // ends a rule (literal preference); otherwise the wildcard edge
            // may still swallow the same label and reach a rule end.
            if rule_end(trie, n).is_some() {
                break;
            }
        }

        // A wildcard edge may swallow the label the literal attempt could not.
        if let Some(star) = trie.child(node, WILDCARD) {
            if rem > 0 && host[rem - 1] != SEPARATOR {
                let mut r = rem;
                while r > 0 && host[r - 1] != SEPARATOR {
                    r -= 1;
                }
                backtrack = step_start;
                wildcard = WildcardUse::Tail;
                log::debug!("matched wildcard: {}", fragment(host, r));
                last = Some(Endpoint {
                    node: star,
                    rem: r,
                    wildcard,
                });
                if r > 0 {
                    if let Some(sep) = trie.child(star, SEPARATOR) {
                        node = sep;
                        rem = r - 1;
                        continue;
                    }
                }
            }
        }
        break;
    }

    let Some(end) = last else {
        return Resolution::NoRule;
    };

    let (end, kind) = match rule_end(trie, end.node) {
        Some(kind) => (end, kind),
        None => {
            let Some(prior) = backtrack else {
                return Resolution::Partial;
            };
            log::debug!("backtracking: {}", fragment(host, prior.rem));
            match rule_end(trie, prior.node) {
                Some(kind) => (prior, kind),
                None => return Resolution::Partial,
            }
        }
    };

    let suffix_start = end.rem;
    if kind == EndKind::Exception || end.wildcard == WildcardUse::Mid {
        log::debug!("VALID DOMAIN: {}", fragment(host, suffix_start));
        return Resolution::Registrable {
            start: suffix_start,
        };
    }

    // Ordinary rule end: consume one more label to the left.
    if end.rem == 0 {
        return Resolution::Suffix { start: 0 };
    }
    let dot = end.rem - 1;
    let mut start = dot;
    while start > 0 && host[start - 1] != SEPARATOR {
        start -= 1;
    }
    if start == dot {
        // Nothing but a separator to the left.
        return Resolution::Suffix {
            start: suffix_start,
        };
    }
    if host[dot - 1] == EXCEPTION || host[dot - 1] == WILDCARD {
        return Resolution::MarkerBlocked { start };
    }
    log::debug!("VALID DOMAIN: {}", fragment(host, start));
    Resolution::Registrable { start }
}

/// Consume one whole label from `host[..rem]` starting at `node`. Returns
/// the reached node and the remaining byte count, or `None` when the label
/// is empty, contains a marker byte, or leaves the trie.
fn literal_step(
    trie: &SuffixTrie,
    node: NodeId,
    host: &[u8],
    rem: usize,
) -> Option<(NodeId, usize)> {
    let mut n = node;
    let mut r = rem;
    while r > 0 {
        let b = host[r - 1];
        if b == SEPARATOR {
            break;
        }
        if b == TERMINAL || b == EXCEPTION || b == WILDCARD {
            return None;
        }
        n = trie.child(n, b)?;
        r -= 1;
    }
    if r == rem {
        None
    } else {
        Some((n, r))
    }
}

fn rule_end(trie: &SuffixTrie, node: NodeId) -> Option<EndKind> {
    if trie.is_exception(node) {
        return Some(EndKind::Exception);
    }
    if trie.is_terminal(node) {
        return Some(EndKind::Terminal);
    }
    None
}

fn fragment(host: &[u8], from: usize) -> String {
    String::from_utf8_lossy(&host[from..]).into_owned()
}
