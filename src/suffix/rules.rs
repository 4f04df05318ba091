//! Public suffix rule sources.
//!
//! The resolver never fetches anything: callers hand it a [`SuffixRules`]
//! value. [`BundledList`] uses the list compiled into the `psl` crate,
//! [`RuleList`] is built from Public Suffix List text the caller obtained.

use std::collections::HashSet;

use psl::{List, Psl};
use tracing::{debug, warn};

use crate::host::transcoder;
use crate::types::{SuffixKind, SuffixMatch};

/// A source of public suffix rules.
pub trait SuffixRules {
    /// Find the prevailing rule for `labels`, given right to left (TLD first),
    /// lower-case ASCII. `None` when no rule matches.
    fn resolve(&self, labels: &[&str]) -> Option<SuffixMatch>;
}

impl<T: SuffixRules + ?Sized> SuffixRules for &T {
    fn resolve(&self, labels: &[&str]) -> Option<SuffixMatch> {
        (**self).resolve(labels)
    }
}

/// Section of the Public Suffix List a rule comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Icann,
    Private,
}

const ICANN_BEGIN: &str = "===BEGIN ICANN DOMAINS===";
const ICANN_END: &str = "===END ICANN DOMAINS===";
const PRIVATE_BEGIN: &str = "===BEGIN PRIVATE DOMAINS===";
const PRIVATE_END: &str = "===END PRIVATE DOMAINS===";

/// Rules parsed from Public Suffix List text.
///
/// Keys are written left to right without the `*.`/`!` markers, e.g.
/// `*.ck` is stored as `ck` in the wildcard set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleList {
    normal: HashSet<String>,
    wildcard: HashSet<String>,
    exception: HashSet<String>,
}

impl RuleList {
    /// Parse every rule, whatever its section.
    pub fn parse(text: &str) -> Self {
        Self::parse_sections(text, &[Section::Icann, Section::Private])
    }

    /// Parse only the ICANN section.
    pub fn parse_icann(text: &str) -> Self {
        Self::parse_sections(text, &[Section::Icann])
    }

    /// Parse rules belonging to `sections`.
    ///
    /// Rules outside any section marker are kept. Rules that cannot be
    /// converted to ASCII are skipped with a warning.
    pub fn parse_sections(text: &str, sections: &[Section]) -> Self {
        let mut list = RuleList::default();
        let mut current: Option<Section> = None;

        for line in text.lines() {
            let line = line.trim();
            if let Some(comment) = line.strip_prefix("//") {
                match comment.trim() {
                    ICANN_BEGIN => current = Some(Section::Icann),
                    PRIVATE_BEGIN => current = Some(Section::Private),
                    ICANN_END | PRIVATE_END => current = None,
                    _ => {}
                }
                continue;
            }

            // a rule is the first whitespace-separated token of the line
            let rule = match line.split_whitespace().next() {
                Some(rule) => rule,
                None => continue,
            };

            if let Some(section) = current {
                if !sections.contains(&section) {
                    continue;
                }
            }

            if !list.insert(rule) {
                warn!(rule, "skipping malformed public suffix rule");
            }
        }

        debug!(
            normal = list.normal.len(),
            wildcard = list.wildcard.len(),
            exception = list.exception.len(),
            "public suffix rules loaded"
        );
        list
    }

    /// Add one rule in list syntax. Returns false when the rule is malformed.
    pub fn insert(&mut self, rule: &str) -> bool {
        let (kind, body) = if let Some(body) = rule.strip_prefix('!') {
            (SuffixKind::Exception, body)
        } else if let Some(body) = rule.strip_prefix("*.") {
            (SuffixKind::Wildcard, body)
        } else {
            (SuffixKind::Normal, rule)
        };

        let labels: Vec<&str> = body.split('.').collect();
        let ascii = match transcoder::to_ascii(&labels) {
            Ok(ascii) => ascii.join("."),
            Err(_) => return false,
        };

        let set = match kind {
            SuffixKind::Normal => &mut self.normal,
            SuffixKind::Wildcard => &mut self.wildcard,
            SuffixKind::Exception => &mut self.exception,
        };
        set.insert(ascii);
        true
    }

    pub fn len(&self) -> usize {
        self.normal.len() + self.wildcard.len() + self.exception.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> FromIterator<&'a str> for RuleList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(rules: I) -> Self {
        let mut list = RuleList::default();
        for rule in rules {
            if !list.insert(rule) {
                warn!(rule, "skipping malformed public suffix rule");
            }
        }
        list
    }
}

fn join_right_to_left(labels: &[&str]) -> String {
    labels.iter().rev().copied().collect::<Vec<_>>().join(".")
}

impl SuffixRules for RuleList {
    /// Longest match over right-anchored suffixes; an exception rule prevails
    /// over everything else and yields its parent as the suffix.
    fn resolve(&self, labels: &[&str]) -> Option<SuffixMatch> {
        let mut best: Option<SuffixMatch> = None;
        let mut exception: Option<SuffixMatch> = None;

        for len in 1..=labels.len() {
            let candidate = join_right_to_left(&labels[..len]);

            if self.exception.contains(&candidate) {
                exception = Some(SuffixMatch::new(SuffixKind::Exception, len - 1));
                continue;
            }

            if self.normal.contains(&candidate) {
                best = Some(SuffixMatch::new(SuffixKind::Normal, len));
            }

            if len >= 2 && self.wildcard.contains(&join_right_to_left(&labels[..len - 1])) {
                best = Some(SuffixMatch::new(SuffixKind::Wildcard, len));
            }
        }

        exception.or(best)
    }
}

/// The list bundled with the `psl` crate (ICANN and private sections).
///
/// That crate does not expose which kind of rule matched, so every match
/// is reported as [`SuffixKind::Normal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundledList;

impl SuffixRules for BundledList {
    fn resolve(&self, labels: &[&str]) -> Option<SuffixMatch> {
        let domain = join_right_to_left(labels);
        let suffix = List.suffix(domain.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }

        let matched = suffix.as_bytes().split(|b| *b == b'.').count();
        Some(SuffixMatch::new(SuffixKind::Normal, matched))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
// This Source Code Form is subject to the terms of the Mozilla Public License
// ===BEGIN ICANN DOMAINS===

// au
au
com.au

// ck
*.ck
!www.ck

// jp
jp
*.kawasaki.jp
!city.kawasaki.jp

// cn
公司.cn
cn

// ===END ICANN DOMAINS===
// ===BEGIN PRIVATE DOMAINS===

blogspot.com   some trailing note
// ===END PRIVATE DOMAINS===
";

    #[test]
    fn test_parse_sections() {
        let all = RuleList::parse(SAMPLE);
        let icann = RuleList::parse_icann(SAMPLE);
        assert_eq!(all.len(), icann.len() + 1);
        assert!(all.resolve(&["com", "blogspot", "foo"]).is_some());
        assert!(icann.resolve(&["com", "blogspot", "foo"]).is_none());
    }

    #[test]
    fn test_normal_rules() {
        let rules = RuleList::parse(SAMPLE);
        assert_eq!(
            rules.resolve(&["au", "com", "waxaudio", "www"]),
            Some(SuffixMatch::new(SuffixKind::Normal, 2))
        );
        assert_eq!(
            rules.resolve(&["au", "example"]),
            Some(SuffixMatch::new(SuffixKind::Normal, 1))
        );
        assert_eq!(rules.resolve(&["yyyy", "giant"]), None);
    }

    #[test]
    fn test_wildcard_and_exception() {
        let rules = RuleList::parse(SAMPLE);
        assert_eq!(
            rules.resolve(&["ck", "foo", "www"]),
            Some(SuffixMatch::new(SuffixKind::Wildcard, 2))
        );
        assert_eq!(
            rules.resolve(&["ck", "www"]),
            Some(SuffixMatch::new(SuffixKind::Exception, 1))
        );
        assert_eq!(
            rules.resolve(&["jp", "kawasaki", "city", "www"]),
            Some(SuffixMatch::new(SuffixKind::Exception, 2))
        );
        assert_eq!(
            rules.resolve(&["jp", "kawasaki", "other", "www"]),
            Some(SuffixMatch::new(SuffixKind::Wildcard, 3))
        );
    }

    #[test]
    fn test_unicode_rules_are_stored_as_ascii() {
        let rules = RuleList::parse(SAMPLE);
        assert_eq!(
            rules.resolve(&["cn", "xn--55qx5d", "example"]),
            Some(SuffixMatch::new(SuffixKind::Normal, 2))
        );
    }

    #[test]
    fn test_from_iterator_skips_malformed() {
        let rules: RuleList = vec!["com", "re view", "*.ck"].into_iter().collect();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_bundled_list() {
        assert_eq!(
            BundledList.resolve(&["au", "com", "waxaudio", "www"]),
            Some(SuffixMatch::new(SuffixKind::Normal, 2))
        );
        assert_eq!(
            BundledList.resolve(&["uk", "co", "example"]),
            Some(SuffixMatch::new(SuffixKind::Normal, 2))
        );
        assert_eq!(BundledList.resolve(&["yyyy", "giant"]), None);
    }
}
