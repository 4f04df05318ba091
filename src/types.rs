//! Core data structures shared by the host engine and the suffix resolver.

use std::fmt;
use std::str::FromStr;

use crate::error::HostError;

/// The shape a host value was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// An IDNA-compatible domain name.
    Domain,
    /// Four decimal octets.
    Ipv4,
    /// A bracketed IPv6 literal, possibly scoped.
    Ipv6,
    /// A bracketed `vX.` literal.
    IpFuture,
    /// Any other RFC 3986 reg-name.
    RegisteredName,
    /// The empty string.
    Empty,
    /// No host at all.
    Null,
}

impl Category {
    /// Whether this category is one of the IP literal forms.
    pub fn is_ip(self) -> bool {
        matches!(self, Category::Ipv4 | Category::Ipv6 | Category::IpFuture)
    }
}

/// Output form for [`Host::content`](crate::Host::content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// RFC 3986 form: punycode, lower-cased.
    #[default]
    Ascii,
    /// RFC 3987 form: internationalized labels decoded for display.
    Unicode,
    /// Stored content as is, never touching the transcoder.
    Raw,
}

impl TryFrom<u8> for Encoding {
    type Error = HostError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Encoding::Ascii),
            1 => Ok(Encoding::Unicode),
            2 => Ok(Encoding::Raw),
            _ => Err(HostError::UnknownEncoding(code.to_string())),
        }
    }
}

impl FromStr for Encoding {
    type Err = HostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "rfc3986" => Ok(Encoding::Ascii),
            "unicode" | "rfc3987" => Ok(Encoding::Unicode),
            "raw" => Ok(Encoding::Raw),
            _ => Err(HostError::UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Ascii => f.write_str("ascii"),
            Encoding::Unicode => f.write_str("unicode"),
            Encoding::Raw => f.write_str("raw"),
        }
    }
}

/// How a public suffix rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuffixKind {
    /// A plain rule such as `com.au`.
    Normal,
    /// A `*.` rule such as `*.ck`.
    Wildcard,
    /// A `!` rule such as `!www.ck`.
    Exception,
}

/// The winning rule for a label sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuffixMatch {
    /// Kind of the rule that decided the match.
    pub kind: SuffixKind,
    /// Number of right-most labels forming the public suffix.
    pub matched_labels: usize,
}

impl SuffixMatch {
    /// Create a new match.
    pub fn new(kind: SuffixKind, matched_labels: usize) -> Self {
        Self { kind, matched_labels }
    }
}

/// Public suffix decomposition of a host.
///
/// Absent parts are `None`, never the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicSuffixResult {
    /// Public suffix (e.g., "com.au")
    pub public_suffix: Option<String>,
    /// Public suffix plus one label (e.g., "waxaudio.com.au")
    pub registrable_domain: Option<String>,
    /// Everything left of the registrable domain (e.g., "www")
    pub sub_domain: Option<String>,
    /// Whether a rule of the suffix source matched
    pub is_valid_suffix: bool,
}

impl PublicSuffixResult {
    /// The result for hosts that have no decomposition.
    pub fn unknown() -> Self {
        Self::default()
    }
}
