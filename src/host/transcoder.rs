//! IDNA transcoding of domain labels between punycode and Unicode.
//!
//! Labels go through UTS-46 compatibility processing with the STD3 ASCII
//! deny list, then each resulting ASCII label is checked against the DNS
//! label grammar. Punycode labels must decode and re-encode to themselves.

use idna::AsciiDenyList;
use tracing::trace;

use crate::error::{HostError, Rule};

/// Maximum octets in one encoded label.
pub(crate) const MAX_LABEL_LEN: usize = 63;

const ACE_PREFIX: &str = "xn--";

pub(crate) fn has_ace_prefix(label: &str) -> bool {
    label
        .get(..ACE_PREFIX.len())
        .map_or(false, |prefix| prefix.eq_ignore_ascii_case(ACE_PREFIX))
}

/// Validate a single ASCII DNS label (1-63 bytes, letters, digits, inner hyphens).
pub(crate) fn validate_dns_label(label: &str) -> Result<(), Rule> {
    if label.is_empty() {
        return Err(Rule::DomainLabel);
    }

    if label.len() > MAX_LABEL_LEN {
        return Err(Rule::LabelLength);
    }

    if !label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
        return Err(Rule::DomainLabel);
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(Rule::DomainLabel);
    }

    Ok(())
}

/// Convert labels to their canonical lower-case ASCII form.
///
/// Label order is preserved. Fails when UTS-46 processing rejects the input,
/// when the mapping changes the number of labels, or when any encoded label
/// breaks the DNS label grammar.
pub fn to_ascii(labels: &[&str]) -> Result<Vec<String>, HostError> {
    if labels.is_empty() {
        return Ok(Vec::new());
    }

    let joined = labels.join(".");
    if labels.iter().any(|label| label.is_empty()) {
        return Err(HostError::syntax(joined, Rule::DomainLabel));
    }

    let ascii = idna::domain_to_ascii_cow(joined.as_bytes(), AsciiDenyList::STD3)
        .map_err(|_| HostError::syntax(joined.as_str(), Rule::Idna))?;

    let encoded: Vec<&str> = ascii.split('.').collect();
    if encoded.len() != labels.len() {
        return Err(HostError::syntax(joined, Rule::Idna));
    }

    let mut out = Vec::with_capacity(encoded.len());
    for label in encoded {
        validate_dns_label(label).map_err(|rule| HostError::syntax(joined.as_str(), rule))?;
        if has_ace_prefix(label) {
            check_round_trip(label)?;
        }
        out.push(label.to_string());
    }

    trace!(input = %joined, output = %ascii, "labels converted to ascii");
    Ok(out)
}

/// Convert labels to their Unicode display form.
///
/// Only `xn--` labels change; every decoded label must re-encode to the
/// exact ASCII label it came from.
pub fn to_unicode(labels: &[&str]) -> Result<Vec<String>, HostError> {
    labels
        .iter()
        .map(|label| {
            if has_ace_prefix(label) {
                check_round_trip(label)
            } else {
                Ok(label.to_string())
            }
        })
        .collect()
}

/// Decode one punycode label, verifying it is the canonical encoding of what it decodes to.
fn check_round_trip(label: &str) -> Result<String, HostError> {
    let decoded = idna::punycode::decode_to_string(&label[ACE_PREFIX.len()..])
        .ok_or_else(|| HostError::syntax(label, Rule::Idna))?;

    let reencoded = idna::domain_to_ascii_cow(decoded.as_bytes(), AsciiDenyList::STD3)
        .map_err(|_| HostError::syntax(label, Rule::Idna))?;

    if !reencoded.eq_ignore_ascii_case(label) {
        return Err(HostError::syntax(label, Rule::PunycodeRoundTrip));
    }

    Ok(decoded)
}
