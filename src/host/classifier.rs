//! Decide which shape a raw host has and produce its canonical content.
//!
//! Order of attempts: null/empty, bracketed IP literal, IPv4, IDNA domain,
//! generic registered name. The first grammar that accepts wins.

use tracing::debug;

use crate::error::{HostError, Rule};
use crate::host::ip::{self, IpFuture, Ipv6Literal};
use crate::host::transcoder;
use crate::types::Category;

/// IP details kept beside the canonical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IpInfo {
    V4,
    V6(Ipv6Literal),
    Future(IpFuture),
}

/// A fully validated host value, ready to be wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Classified {
    pub category: Category,
    pub content: Option<String>,
    pub ip: Option<IpInfo>,
}

impl Classified {
    fn new(category: Category, content: String, ip: Option<IpInfo>) -> Self {
        Self {
            category,
            content: Some(content),
            ip,
        }
    }
}

pub(crate) fn classify(raw: Option<&str>) -> Result<Classified, HostError> {
    let raw = match raw {
        None => {
            return Ok(Classified {
                category: Category::Null,
                content: None,
                ip: None,
            })
        }
        Some(raw) => raw,
    };

    let classified = classify_str(raw)?;
    debug!(host = raw, category = ?classified.category, "host classified");
    Ok(classified)
}

fn classify_str(raw: &str) -> Result<Classified, HostError> {
    if raw.is_empty() {
        return Ok(Classified::new(Category::Empty, String::new(), None));
    }

    if raw.starts_with('[') {
        return classify_literal(raw);
    }

    if let Ok(v4) = ip::parse_ipv4(raw) {
        return Ok(Classified::new(Category::Ipv4, v4.to_string(), Some(IpInfo::V4)));
    }

    if let Some(domain) = classify_domain(raw)? {
        return Ok(Classified::new(Category::Domain, domain, None));
    }

    if is_registered_name(raw) {
        return Ok(Classified::new(
            Category::RegisteredName,
            normalize_registered_name(raw),
            None,
        ));
    }

    Err(HostError::syntax(raw, Rule::RegisteredName))
}

fn classify_literal(raw: &str) -> Result<Classified, HostError> {
    let body = raw
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| HostError::syntax(raw, Rule::IpLiteral))?;

    if body.starts_with('v') || body.starts_with('V') {
        let future = ip::parse_ip_future(body)?;
        return Ok(Classified::new(
            Category::IpFuture,
            raw.to_string(),
            Some(IpInfo::Future(future)),
        ));
    }

    let literal = ip::parse_ipv6_literal(body)?;
    Ok(Classified::new(
        Category::Ipv6,
        literal.to_uri(),
        Some(IpInfo::V6(literal)),
    ))
}

/// Try the IDNA domain grammar.
///
/// `Ok(None)` means the value is simply not a domain and may still be a
/// registered name. Internationalized input (or input carrying punycode
/// labels) that fails IDNA processing is an error, never a fallback.
fn classify_domain(raw: &str) -> Result<Option<String>, HostError> {
    let (body, absolute) = match raw.strip_suffix('.') {
        Some(body) if !body.is_empty() => (body, true),
        _ => (raw, false),
    };

    let labels: Vec<&str> = body.split('.').collect();
    if labels.iter().any(|label| label.is_empty()) {
        return Ok(None);
    }

    match transcoder::to_ascii(&labels) {
        Ok(ascii) => {
            let mut content = ascii.join(".");
            if absolute {
                content.push('.');
            }
            Ok(Some(content))
        }
        Err(err) if !raw.is_ascii() || labels.iter().any(|l| transcoder::has_ace_prefix(l)) => {
            Err(err)
        }
        Err(_) => Ok(None),
    }
}

/// RFC 3986 reg-name: `*( unreserved / pct-encoded / sub-delims )`.
pub(crate) fn is_registered_name(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '%' {
            let escaped = bytes.get(i + 1..i + 3);
            if !escaped.map_or(false, |hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else if bytes[i].is_ascii() && (ip::is_unreserved(c) || ip::is_sub_delim(c)) {
            i += 1;
        } else {
            return false;
        }
    }
    true
}

/// Lower-case a registered name, leaving percent-encoded triplets untouched.
fn normalize_registered_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            out.push(c);
            out.extend(chars.by_ref().take(2));
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}
