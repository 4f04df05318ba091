//! Public suffix / registrable domain / subdomain decomposition.

use tracing::debug;

use crate::error::{HostError, Rule};
use crate::host::labels::join_labels;
use crate::host::Host;
use crate::suffix::rules::SuffixRules;
use crate::types::{Category, PublicSuffixResult};

/// Decompose right-to-left `labels` (TLD first) against `rules`.
///
/// Fewer than two labels gives the unknown result. When no rule matches,
/// the right-most label is taken as the suffix and the result is flagged
/// invalid.
pub fn resolve(labels: &[&str], rules: &dyn SuffixRules) -> PublicSuffixResult {
    if labels.len() < 2 {
        return PublicSuffixResult::unknown();
    }

    let found = rules
        .resolve(labels)
        .filter(|found| found.matched_labels > 0 && found.matched_labels <= labels.len());

    let (suffix_len, is_valid_suffix) = match found {
        Some(found) => (found.matched_labels, true),
        None => (1, false),
    };

    let part = |range: std::ops::Range<usize>| {
        if range.is_empty() {
            None
        } else {
            Some(join_labels(labels[range].iter().copied(), false))
        }
    };

    let registrable_len = if suffix_len < labels.len() { suffix_len + 1 } else { 0 };

    PublicSuffixResult {
        public_suffix: part(0..suffix_len),
        registrable_domain: part(0..registrable_len),
        sub_domain: if registrable_len == 0 {
            None
        } else {
            part(registrable_len..labels.len())
        },
        is_valid_suffix,
    }
}

/// Which slice of the label sequence a splice replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    PublicSuffix,
    RegistrableDomain,
    SubDomain,
}

impl Host {
    /// Full decomposition; only domain names have one.
    pub fn suffix_info(&self, rules: Option<&dyn SuffixRules>) -> PublicSuffixResult {
        match rules {
            Some(rules) if self.is_domain() => {
                let labels: Vec<&str> = self.labels().collect();
                resolve(&labels, rules)
            }
            _ => PublicSuffixResult::unknown(),
        }
    }

    pub fn public_suffix(&self, rules: Option<&dyn SuffixRules>) -> Option<String> {
        self.suffix_info(rules).public_suffix
    }

    pub fn registrable_domain(&self, rules: Option<&dyn SuffixRules>) -> Option<String> {
        self.suffix_info(rules).registrable_domain
    }

    pub fn sub_domain(&self, rules: Option<&dyn SuffixRules>) -> Option<String> {
        self.suffix_info(rules).sub_domain
    }

    /// Whether a rule of `rules` matched the host. False without a rule source.
    pub fn is_public_suffix_valid(&self, rules: Option<&dyn SuffixRules>) -> bool {
        self.suffix_info(rules).is_valid_suffix
    }

    /// Replace the public suffix; an empty value removes it.
    pub fn with_public_suffix(&self, value: &str, rules: &dyn SuffixRules) -> Result<Self, HostError> {
        self.splice(Part::PublicSuffix, value, rules)
    }

    /// Replace the registrable domain; an empty value removes it.
    pub fn with_registrable_domain(
        &self,
        value: &str,
        rules: &dyn SuffixRules,
    ) -> Result<Self, HostError> {
        self.splice(Part::RegistrableDomain, value, rules)
    }

    /// Replace everything left of the registrable domain; an empty value removes it.
    pub fn with_sub_domain(&self, value: &str, rules: &dyn SuffixRules) -> Result<Self, HostError> {
        self.splice(Part::SubDomain, value, rules)
    }

    fn splice(&self, part: Part, value: &str, rules: &dyn SuffixRules) -> Result<Self, HostError> {
        match self.category() {
            Category::Domain | Category::Empty | Category::Null => {}
            category if category.is_ip() => {
                return Err(HostError::component(self.to_string(), Rule::IpHost))
            }
            _ => return Err(HostError::component(self.to_string(), Rule::NotADomain)),
        }

        let value = match value.strip_suffix('.') {
            Some(_) if !self.is_absolute() => {
                return Err(HostError::component(value, Rule::AbsoluteConflict))
            }
            Some(stripped) => stripped,
            None => value,
        };

        let current: Vec<&str> = if self.is_domain() { self.labels().collect() } else { Vec::new() };
        let count = current.len();

        // storage ranges: public suffix 0..s, registrable 0..r, subdomain r..n
        let suffix_len = if count == 0 {
            0
        } else {
            rules
                .resolve(&current)
                .map(|found| found.matched_labels)
                .filter(|len| *len > 0)
                .unwrap_or(1)
                .min(count)
        };
        let registrable_len = (suffix_len + 1).min(count);
        let range = match part {
            Part::PublicSuffix => 0..suffix_len,
            Part::RegistrableDomain => 0..registrable_len,
            Part::SubDomain => registrable_len..count,
        };

        let replacement: Vec<&str> = if value.is_empty() {
            Vec::new()
        } else {
            value.rsplit('.').collect()
        };

        debug!(host = %self, ?part, ?range, value, "splicing labels");
        let mut spliced = current;
        spliced.splice(range, replacement);

        if spliced.is_empty() {
            return if count == 0 { Ok(self.clone()) } else { self.derive("") };
        }

        self.derive(&join_labels(spliced, self.is_absolute()))
    }
}
