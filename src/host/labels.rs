//! Label-indexed access and structural mutation.
//!
//! Labels are stored right to left. Non-negative offsets count from the
//! right (`0` is the TLD-most label), negative offsets count from the left
//! (`-1` is the left-most label). Every access goes through
//! [`resolve_offset`].

use std::collections::BTreeSet;
use std::iter::FusedIterator;

use crate::error::{HostError, Rule};
use crate::host::{classifier, transcoder, Host};
use crate::types::Category;

/// Map an offset onto a storage index: `offset >= 0 ? offset : count + offset`.
///
/// `None` when the index falls outside `[0, count)`.
pub fn resolve_offset(offset: isize, count: usize) -> Option<usize> {
    let index = if offset >= 0 {
        offset
    } else {
        count as isize + offset
    };

    if index >= 0 && (index as usize) < count {
        Some(index as usize)
    } else {
        None
    }
}

/// Split canonical content into right-to-left labels and the absolute flag.
pub(crate) fn split_labels(content: &str) -> (Vec<String>, bool) {
    let mut labels: Vec<String> = content.rsplit('.').map(str::to_string).collect();
    let absolute = labels.len() > 1 && labels[0].is_empty();
    if absolute {
        labels.remove(0);
    }
    (labels, absolute)
}

/// Join right-to-left labels back into host text.
pub(crate) fn join_labels<'a, I>(labels: I, absolute: bool) -> String
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut out = labels.into_iter().rev().collect::<Vec<_>>().join(".");
    if absolute && !out.is_empty() && !out.ends_with('.') {
        out.push('.');
    }
    out
}

/// Iterator over the labels of a host, TLD-most label first.
#[derive(Debug, Clone)]
pub struct Labels<'a> {
    inner: std::slice::Iter<'a, String>,
}

impl<'a> Iterator for Labels<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Labels<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Labels<'_> {}

impl FusedIterator for Labels<'_> {}

impl<'a> IntoIterator for &'a Host {
    type Item = &'a str;
    type IntoIter = Labels<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels()
    }
}

impl Host {
    /// Number of labels, root label excluded. The null host has none; the empty host has one.
    pub fn count(&self) -> usize {
        self.0.labels.len()
    }

    /// Labels right to left.
    pub fn labels(&self) -> Labels<'_> {
        Labels {
            inner: self.0.labels.iter(),
        }
    }

    /// Owned copy of the labels, right to left.
    pub fn label_list(&self) -> Vec<String> {
        self.0.labels.clone()
    }

    /// The label at `offset`, if any.
    pub fn label(&self, offset: isize) -> Option<&str> {
        resolve_offset(offset, self.count()).map(|index| self.0.labels[index].as_str())
    }

    /// The label at `offset`, or `default` when there is none.
    pub fn label_or<'a>(&'a self, offset: isize, default: &'a str) -> &'a str {
        self.label(offset).unwrap_or(default)
    }

    /// Every offset, in storage order.
    pub fn keys(&self) -> Vec<usize> {
        (0..self.count()).collect()
    }

    /// Offsets holding `label`, compared in canonical ASCII form.
    pub fn keys_of(&self, label: &str) -> Vec<usize> {
        let needle = if label.is_ascii() {
            label.to_ascii_lowercase()
        } else {
            match transcoder::to_ascii(&[label]) {
                Ok(mut ascii) => ascii.remove(0),
                Err(_) => return Vec::new(),
            }
        };

        self.0
            .labels
            .iter()
            .enumerate()
            .filter(|(_, candidate)| **candidate == needle)
            .map(|(index, _)| index)
            .collect()
    }

    /// Content without the root label dot.
    fn body(&self) -> &str {
        let content = self.0.content.as_deref().unwrap_or("");
        if self.0.absolute {
            content.strip_suffix('.').unwrap_or(content)
        } else {
            content
        }
    }

    fn refuse_on_literal(&self, candidate: &str) -> Result<(), HostError> {
        match self.0.category {
            Category::Ipv6 | Category::IpFuture => {
                Err(HostError::component(candidate, Rule::IpHost))
            }
            _ => Ok(()),
        }
    }

    /// Add `label` to the right of the host, keeping its absolute status.
    pub fn append(&self, label: &str) -> Result<Self, HostError> {
        let label = label.strip_suffix('.').unwrap_or(label);
        if label.is_empty() {
            return Ok(self.clone());
        }

        let mut candidate = match self.body() {
            "" => label.to_string(),
            body => format!("{}.{}", body, label),
        };
        self.refuse_on_literal(&candidate)?;
        if self.0.absolute {
            candidate.push('.');
        }

        self.derive(&candidate)
    }

    /// Add `label` to the left of the host, keeping its absolute status.
    pub fn prepend(&self, label: &str) -> Result<Self, HostError> {
        let label = label.strip_suffix('.').unwrap_or(label);
        if label.is_empty() {
            return Ok(self.clone());
        }

        let mut candidate = match self.body() {
            "" => label.to_string(),
            body => format!("{}.{}", label, body),
        };
        self.refuse_on_literal(&candidate)?;
        if self.0.absolute {
            candidate.push('.');
        }

        self.derive(&candidate)
    }

    /// Replace the label at `offset`.
    ///
    /// `value` may hold several dot-separated labels, none of them empty: an
    /// empty label would read back as a root label or an empty segment.
    pub fn with_label(&self, offset: isize, value: &str) -> Result<Self, HostError> {
        let count = self.count();
        let index = resolve_offset(offset, count).ok_or(HostError::InvalidKey { offset, count })?;

        if self.0.labels[index] == value {
            return Ok(self.clone());
        }

        if value.split('.').any(str::is_empty) {
            return Err(HostError::component(value, Rule::DomainLabel));
        }

        let mut labels: Vec<&str> = self.0.labels.iter().map(String::as_str).collect();
        labels[index] = value;
        self.derive(&join_labels(labels, self.0.absolute))
    }

    /// Remove the label at `offset`, which must exist.
    pub fn without_label(&self, offset: isize) -> Result<Self, HostError> {
        let count = self.count();
        let index = resolve_offset(offset, count).ok_or(HostError::InvalidKey { offset, count })?;
        self.without_indices(&BTreeSet::from([index]))
    }

    /// Remove the labels at `offsets`; offsets naming no label are ignored.
    pub fn without_labels(&self, offsets: &[isize]) -> Result<Self, HostError> {
        let count = self.count();
        let indices: BTreeSet<usize> = offsets
            .iter()
            .filter_map(|offset| resolve_offset(*offset, count))
            .collect();

        if indices.is_empty() {
            return Ok(self.clone());
        }

        self.without_indices(&indices)
    }

    fn without_indices(&self, indices: &BTreeSet<usize>) -> Result<Self, HostError> {
        let remaining: Vec<&str> = self
            .0
            .labels
            .iter()
            .enumerate()
            .filter(|(index, _)| !indices.contains(index))
            .map(|(_, label)| label.as_str())
            .collect();

        if remaining.is_empty() {
            return self.derive("");
        }

        self.derive(&join_labels(remaining, self.0.absolute))
    }

    /// Make the host absolute. IP, empty and null hosts are returned unchanged.
    pub fn with_root_label(&self) -> Result<Self, HostError> {
        match self.0.category {
            Category::Domain | Category::RegisteredName if !self.0.absolute => {
                self.derive(&format!("{}.", self.body()))
            }
            _ => Ok(self.clone()),
        }
    }

    /// Make the host relative.
    ///
    /// Fails when the content without its root dot still reads as absolute (`a..`).
    pub fn without_root_label(&self) -> Result<Self, HostError> {
        if !self.0.absolute {
            return Ok(self.clone());
        }

        let relative = self.derive(self.body())?;
        if relative.is_absolute() {
            return Err(HostError::component(self.body(), Rule::AbsoluteConflict));
        }

        Ok(relative)
    }

    /// Build a host from labels given right to left (TLD first).
    ///
    /// An empty sequence, or a single empty label, gives the empty host. A
    /// leading empty label marks the host absolute, as does `absolute`.
    pub fn create_from_labels<I>(labels: I, absolute: bool) -> Result<Self, HostError>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let labels: Vec<String> = labels.into_iter().map(|label| label.to_string()).collect();
        if labels.is_empty() || (labels.len() == 1 && labels[0].is_empty()) {
            return Ok(Host::empty());
        }

        let candidate = join_labels(labels.iter().map(String::as_str), absolute);
        if absolute && labels.iter().any(|label| label.contains(':')) {
            return Err(HostError::component(candidate, Rule::AbsoluteIpv6));
        }

        classifier::classify(Some(&candidate))
            .map(Host::from_classified)
            .map_err(HostError::into_component)
    }
}
