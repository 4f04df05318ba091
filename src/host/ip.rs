//! IP literal grammars: IPv4, bracketed IPv6 with zone identifier, and IPvFuture.

use std::net::Ipv6Addr;

use crate::error::{HostError, Rule};

/// A validated IPv6 literal with its zone identifier kept apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ipv6Literal {
    pub address: Ipv6Addr,
    /// Zone text as it appears after the `%25` introducer.
    pub zone_id: Option<String>,
}

impl Ipv6Literal {
    /// Bracketed URI form, zone introduced by `%25`.
    pub fn to_uri(&self) -> String {
        match &self.zone_id {
            Some(zone) => format!("[{}%25{}]", self.address, zone),
            None => format!("[{}]", self.address),
        }
    }

    /// Bare form with a plain `%` before the zone.
    pub fn to_ip(&self) -> String {
        match &self.zone_id {
            Some(zone) => format!("{}%{}", self.address, zone),
            None => self.address.to_string(),
        }
    }
}

/// A validated IPvFuture literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IpFuture {
    pub version: String,
    pub rest: String,
}

pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

pub(crate) fn is_sub_delim(c: char) -> bool {
    matches!(c, '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=')
}

fn is_gen_delim(c: char) -> bool {
    matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

/// Validate a dotted-quad IPv4 literal. The text is kept verbatim.
pub(crate) fn parse_ipv4(text: &str) -> Result<&str, HostError> {
    if is_ipv4(text) {
        Ok(text)
    } else {
        Err(HostError::syntax(text, Rule::Ipv4))
    }
}

pub(crate) fn is_ipv4(text: &str) -> bool {
    let octets: Vec<&str> = text.split('.').collect();
    if octets.len() != 4 {
        return false;
    }

    octets.iter().all(|octet| {
        !octet.is_empty()
            && octet.len() <= 3
            && octet.bytes().all(|b| b.is_ascii_digit())
            && octet.parse::<u16>().map_or(false, |value| value <= 255)
    })
}

/// Parse the body of a bracketed literal, brackets already removed.
///
/// The zone may be introduced by `%25` (RFC 6874) or by a bare `%`.
pub(crate) fn parse_ipv6_literal(body: &str) -> Result<Ipv6Literal, HostError> {
    let (address_text, zone_raw) = match body.split_once('%') {
        Some((address, zone)) => (address, Some(zone)),
        None => (body, None),
    };

    let address: Ipv6Addr = address_text
        .parse()
        .map_err(|_| HostError::syntax(body, Rule::Ipv6))?;

    let zone_id = match zone_raw {
        None => None,
        Some(raw) => {
            let zone = match raw.strip_prefix("25") {
                Some("") => return Err(HostError::syntax(body, Rule::ZoneId)),
                Some(rest) => rest,
                None => raw,
            };
            validate_zone_id(zone).map_err(|rule| HostError::syntax(body, rule))?;
            if !is_link_local(&address) {
                return Err(HostError::syntax(body, Rule::ZoneId));
            }
            Some(zone.to_string())
        }
    };

    Ok(Ipv6Literal { address, zone_id })
}

fn is_link_local(address: &Ipv6Addr) -> bool {
    (address.segments()[0] & 0xffc0) == 0xfe80
}

fn validate_zone_id(zone: &str) -> Result<(), Rule> {
    if zone.is_empty() {
        return Err(Rule::ZoneId);
    }

    let bytes = zone.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '%' {
            let hex = zone.get(i + 1..i + 3).ok_or(Rule::ZoneId)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(Rule::ZoneId);
            }
            let decoded = u8::from_str_radix(hex, 16).map_err(|_| Rule::ZoneId)? as char;
            if !decoded.is_ascii_graphic() || is_gen_delim(decoded) {
                return Err(Rule::ZoneId);
            }
            i += 3;
        } else if c.is_ascii() && (is_unreserved(c) || is_sub_delim(c)) {
            i += 1;
        } else {
            return Err(Rule::ZoneId);
        }
    }

    Ok(())
}

/// Parse a `vX.rest` body. Versions 4 and 6 belong to real IP grammars and are refused.
pub(crate) fn parse_ip_future(body: &str) -> Result<IpFuture, HostError> {
    let err = || HostError::syntax(body, Rule::IpFuture);

    let tail = body
        .strip_prefix('v')
        .or_else(|| body.strip_prefix('V'))
        .ok_or_else(err)?;
    let (version, rest) = tail.split_once('.').ok_or_else(err)?;

    if version.is_empty() || !version.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(err());
    }
    if matches!(version.trim_start_matches('0'), "4" | "6") {
        return Err(err());
    }
    if rest.is_empty() || !rest.chars().all(|c| is_unreserved(c) || is_sub_delim(c) || c == ':') {
        return Err(err());
    }

    Ok(IpFuture {
        version: version.to_string(),
        rest: rest.to_string(),
    })
}
