//! The immutable host value object.
//!
//! This module contains the host engine:
//! - IP literal grammars (IPv4, IPv6 with zone identifier, IPvFuture)
//! - IDNA transcoding between punycode and Unicode labels
//! - Classification of raw text into a host category
//! - Label-indexed access and structural mutation

pub mod classifier;
pub mod ip;
pub mod labels;
pub mod transcoder;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::error::{HostError, Rule};
use crate::types::{Category, Encoding};
use classifier::{Classified, IpInfo};

pub use labels::Labels;

/// A validated, immutable URI host.
///
/// Every `with_*`/`without_*` method returns a new host, or the receiver
/// itself (same allocation, see [`Host::same_instance`]) when the canonical
/// content would not change. Cloning is cheap.
#[derive(Clone)]
pub struct Host(Arc<Inner>);

struct Inner {
    category: Category,
    /// Canonical ASCII content, `None` for the null host.
    content: Option<String>,
    /// Labels right to left: index 0 is the TLD-most label. The root label is not stored.
    labels: Vec<String>,
    absolute: bool,
    ip: Option<IpInfo>,
    unicode: OnceLock<String>,
}

impl Host {
    /// Parse an optional raw host; `None` yields the null host.
    pub fn new(raw: Option<&str>) -> Result<Self, HostError> {
        classifier::classify(raw).map(Self::from_classified)
    }

    /// Parse a raw host string.
    pub fn parse(raw: &str) -> Result<Self, HostError> {
        Self::new(Some(raw))
    }

    /// The undefined host.
    pub fn null() -> Self {
        Self::from_classified(Classified {
            category: Category::Null,
            content: None,
            ip: None,
        })
    }

    /// The empty host, as in `file:///path`.
    pub fn empty() -> Self {
        Self::from_classified(Classified {
            category: Category::Empty,
            content: Some(String::new()),
            ip: None,
        })
    }

    /// Take the host of a parsed URL.
    pub fn from_url(url: &url::Url) -> Result<Self, HostError> {
        Self::new(url.host_str())
    }

    /// Build a bracketed or dotted IP host from bare IP text.
    ///
    /// IPv4 and IPv6 text is recognized directly (`fe80::1%eth0` style zones
    /// included). Anything else is read as an IPvFuture body, prefixed with
    /// `v<version>.` when a version is supplied.
    pub fn create_from_ip(text: &str, version: Option<&str>) -> Result<Self, HostError> {
        if ip::is_ipv4(text) {
            return Self::parse(text);
        }

        if let Ok(literal) = ip::parse_ipv6_literal(text) {
            return Self::parse(&literal.to_uri());
        }

        let body = match version {
            Some(version) if !version.is_empty() => format!("v{}.{}", version, text),
            _ => text.to_string(),
        };

        match ip::parse_ip_future(&body) {
            Ok(_) => Self::parse(&format!("[{}]", body)),
            Err(_) => Err(HostError::syntax(text, Rule::IpLiteral)),
        }
    }

    pub(crate) fn from_classified(classified: Classified) -> Self {
        let (labels, absolute) = match &classified.content {
            None => (Vec::new(), false),
            Some(content) if classified.category.is_ip() => (vec![content.clone()], false),
            Some(content) => labels::split_labels(content),
        };

        Host(Arc::new(Inner {
            category: classified.category,
            content: classified.content,
            labels,
            absolute,
            ip: classified.ip,
            unicode: OnceLock::new(),
        }))
    }

    /// Reuse the receiver when the new value has the same canonical content.
    fn reuse_or(&self, classified: Classified) -> Self {
        if classified.content == self.0.content {
            self.clone()
        } else {
            Self::from_classified(classified)
        }
    }

    /// Reparse a derived host string; failures become component errors.
    pub(crate) fn derive(&self, candidate: &str) -> Result<Self, HostError> {
        let classified =
            classifier::classify(Some(candidate)).map_err(HostError::into_component)?;
        debug!(from = %self, to = candidate, "host derived");
        Ok(self.reuse_or(classified))
    }

    /// Replace the whole content.
    pub fn with_content(&self, raw: Option<&str>) -> Result<Self, HostError> {
        classifier::classify(raw).map(|classified| self.reuse_or(classified))
    }

    /// Whether both handles point at the very same host instance.
    pub fn same_instance(a: &Host, b: &Host) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Which grammar accepted the host.
    pub fn category(&self) -> Category {
        self.0.category
    }

    /// Whether this is the undefined host.
    pub fn is_null(&self) -> bool {
        self.0.category == Category::Null
    }

    /// True for both the empty and the null host.
    pub fn is_empty(&self) -> bool {
        self.0.content.as_deref().map_or(true, str::is_empty)
    }

    /// Whether the host is a valid (possibly internationalized) domain name.
    pub fn is_domain(&self) -> bool {
        self.0.category == Category::Domain
    }

    /// Any IP literal: IPv4, IPv6 or IPvFuture.
    pub fn is_ip(&self) -> bool {
        self.0.category.is_ip()
    }

    /// Dotted-quad IPv4 address.
    pub fn is_ipv4(&self) -> bool {
        self.0.category == Category::Ipv4
    }

    /// Bracketed IPv6 address, zoned or not.
    pub fn is_ipv6(&self) -> bool {
        self.0.category == Category::Ipv6
    }

    /// Bracketed `vX.` literal.
    pub fn is_ip_future(&self) -> bool {
        self.0.category == Category::IpFuture
    }

    /// Whether the host ends with the root label (`example.com.`).
    pub fn is_absolute(&self) -> bool {
        self.0.absolute
    }

    /// Content in the requested form; `None` for the null host.
    pub fn content(&self, encoding: Encoding) -> Option<&str> {
        match encoding {
            Encoding::Ascii | Encoding::Raw => self.0.content.as_deref(),
            Encoding::Unicode => self.unicode(),
        }
    }

    /// ASCII form suitable for a URI authority; the null host renders as "".
    pub fn uri_component(&self) -> String {
        self.0.content.clone().unwrap_or_default()
    }

    fn unicode(&self) -> Option<&str> {
        let content = self.0.content.as_deref()?;
        if self.0.category != Category::Domain {
            return Some(content);
        }

        Some(self.0.unicode.get_or_init(|| {
            let ordered: Vec<&str> = self.0.labels.iter().rev().map(String::as_str).collect();
            match transcoder::to_unicode(&ordered) {
                Ok(unicode) => {
                    labels::join_labels(unicode.iter().rev().map(String::as_str), self.0.absolute)
                }
                Err(err) => {
                    warn!(host = content, error = %err, "unicode form unavailable");
                    content.to_string()
                }
            }
        }))
    }

    /// The IP address without brackets, zone introduced by a bare `%`.
    ///
    /// For IPvFuture this is the text after the version tag.
    pub fn ip(&self) -> Option<String> {
        match self.0.ip.as_ref()? {
            IpInfo::V4 => self.0.content.clone(),
            IpInfo::V6(literal) => Some(literal.to_ip()),
            IpInfo::Future(future) => Some(future.rest.clone()),
        }
    }

    /// "4", "6", or the IPvFuture version tag.
    pub fn ip_version(&self) -> Option<&str> {
        match self.0.ip.as_ref()? {
            IpInfo::V4 => Some("4"),
            IpInfo::V6(_) => Some("6"),
            IpInfo::Future(future) => Some(future.version.as_str()),
        }
    }

    /// Whether an IPv6 host carries a zone identifier.
    pub fn has_zone_identifier(&self) -> bool {
        matches!(&self.0.ip, Some(IpInfo::V6(literal)) if literal.zone_id.is_some())
    }

    /// Drop the zone identifier of a scoped IPv6 host.
    pub fn without_zone_identifier(&self) -> Result<Self, HostError> {
        match &self.0.ip {
            Some(IpInfo::V6(literal)) if literal.zone_id.is_some() => {
                self.derive(&format!("[{}]", literal.address))
            }
            _ => Ok(self.clone()),
        }
    }
}

impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        self.0.content == other.0.content
    }
}

impl Eq for Host {}

impl Hash for Host {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.content.hash(state);
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("category", &self.0.category)
            .field("content", &self.0.content)
            .field("absolute", &self.0.absolute)
            .finish()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.content.as_deref().unwrap_or(""))
    }
}

impl FromStr for Host {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&url::Url> for Host {
    type Error = HostError;

    fn try_from(url: &url::Url) -> Result<Self, Self::Error> {
        Self::from_url(url)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Host {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.0.content, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Host {
    /// Serialized content goes through the regular constructor and is fully revalidated.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let content = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
        Host::new(content.as_deref()).map_err(serde::de::Error::custom)
    }
}
