//! Error types for host parsing and host manipulation.

use std::fmt;
use thiserror::Error;

/// The grammar or constraint a rejected host violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Four dot-separated decimal octets, each 0-255.
    Ipv4,
    /// RFC 3986 IPv6address inside brackets.
    Ipv6,
    /// RFC 6874 zone identifier on a link-local IPv6 address.
    ZoneId,
    /// `v` HEXDIG+ `.` 1*( unreserved / sub-delims / ":" ).
    IpFuture,
    /// A bracketed literal that is neither IPv6 nor IPFuture, or a value that is not an IP at all.
    IpLiteral,
    /// ASCII domain label: letters, digits and inner hyphens.
    DomainLabel,
    /// A label longer than 63 octets once encoded.
    LabelLength,
    /// UTS-46 compatibility processing rejected the value.
    Idna,
    /// A punycode label that does not re-encode to itself.
    PunycodeRoundTrip,
    /// RFC 3986 reg-name: unreserved, percent-encoded and sub-delims characters.
    RegisteredName,
    /// Label surgery is not possible on an IP literal.
    IpHost,
    /// The operation needs a domain name.
    NotADomain,
    /// An absolute value cannot be spliced into a relative host.
    AbsoluteConflict,
    /// An IPv6 literal cannot appear in an absolute label sequence.
    AbsoluteIpv6,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rule::Ipv4 => "IPv4 address",
            Rule::Ipv6 => "IPv6 address",
            Rule::ZoneId => "IPv6 zone identifier",
            Rule::IpFuture => "IPvFuture literal",
            Rule::IpLiteral => "IP literal",
            Rule::DomainLabel => "domain label",
            Rule::LabelLength => "domain label of at most 63 octets",
            Rule::Idna => "IDNA domain name",
            Rule::PunycodeRoundTrip => "punycode round trip",
            Rule::RegisteredName => "registered name",
            Rule::IpHost => "IP literals carry no domain labels",
            Rule::NotADomain => "domain name",
            Rule::AbsoluteConflict => "matching absolute/relative status",
            Rule::AbsoluteIpv6 => "absolute hosts cannot hold IPv6 literals",
        };
        f.write_str(text)
    }
}

/// Errors that can occur while building or transforming a [`Host`](crate::Host).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The text does not match the grammar named by `rule`.
    #[error("The host `{input}` is invalid: expected a valid {rule}")]
    Syntax { input: String, rule: Rule },

    /// The encoding selector is not one of ASCII, Unicode or raw.
    #[error("Unknown host encoding: {0}")]
    UnknownEncoding(String),

    /// The offset resolves to no label.
    #[error("No label at offset {offset}: the host has {count} label(s)")]
    InvalidKey { offset: isize, count: usize },

    /// Valid pieces combine into an invalid host.
    #[error("The host `{input}` cannot be built: {rule}")]
    InvalidComponent { input: String, rule: Rule },
}

impl HostError {
    pub(crate) fn syntax(input: impl Into<String>, rule: Rule) -> Self {
        HostError::Syntax { input: input.into(), rule }
    }

    pub(crate) fn component(input: impl Into<String>, rule: Rule) -> Self {
        HostError::InvalidComponent { input: input.into(), rule }
    }

    /// The rule behind a syntax or component failure.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            HostError::Syntax { rule, .. } | HostError::InvalidComponent { rule, .. } => Some(*rule),
            _ => None,
        }
    }

    /// Turn a parse failure of a derived value into a component failure.
    pub(crate) fn into_component(self) -> Self {
        match self {
            HostError::Syntax { input, rule } => HostError::InvalidComponent { input, rule },
            other => other,
        }
    }
}
