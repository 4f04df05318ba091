//! urihost - Immutable URI host component
//!
//! This crate parses the host part of a URI authority into a validated,
//! immutable value, classifies it, converts it between its ASCII (punycode)
//! and Unicode forms, and supports label surgery and public-suffix based
//! decomposition.
//!
//! # Features
//!
//! - **Classification**: domain name, IPv4, IPv6 (with RFC 6874 zone), IPvFuture, registered name, empty or null
//! - **IDNA**: UTS-46 processing, punycode round-trip checks, 63-octet label limit
//! - **Labels**: right-to-left indexing with negative offsets counting from the left
//! - **Public suffixes**: decomposition against an injected rule source, bundled list included
//! - **Immutability**: every mutator returns a new host, or the receiver when nothing changes
//!
//! # Quick Start
//!
//! ```
//! use urihost::{BundledList, Encoding, Host};
//!
//! let host = Host::parse("www.Waxaudio.com.au")?;
//! assert!(host.is_domain());
//! assert_eq!(host.label(0), Some("au"));
//! assert_eq!(host.label(-1), Some("www"));
//!
//! let rules = BundledList;
//! assert_eq!(host.public_suffix(Some(&rules)).as_deref(), Some("com.au"));
//! assert_eq!(host.registrable_domain(Some(&rules)).as_deref(), Some("waxaudio.com.au"));
//! assert_eq!(host.sub_domain(Some(&rules)).as_deref(), Some("www"));
//!
//! let shop = host.with_sub_domain("shop", &rules)?;
//! assert_eq!(shop.to_string(), "shop.waxaudio.com.au");
//!
//! let idn = Host::parse("рф.ru")?;
//! assert_eq!(idn.content(Encoding::Ascii), Some("xn--p1ai.ru"));
//! assert_eq!(idn.content(Encoding::Unicode), Some("рф.ru"));
//!
//! let scoped = Host::parse("[fe80:1234::%251]")?;
//! assert_eq!(scoped.ip().as_deref(), Some("fe80:1234::%1"));
//! # Ok::<(), urihost::HostError>(())
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns `Result<T, HostError>`. Errors carry the
//! offending input and the [`Rule`] it broke:
//!
//! - `Syntax` when raw input does not parse
//! - `InvalidComponent` when valid pieces combine into an invalid host
//! - `InvalidKey` when a label offset names no label
//! - `UnknownEncoding` for an unrecognized encoding selector

// Re-export the host value and its label iterator
pub use host::{Host, Labels};

// Re-export grammar-level helpers
pub use host::labels::resolve_offset;
pub use host::transcoder::{to_ascii, to_unicode};

// Re-export public suffix support
pub use suffix::{BundledList, RuleList, Section, SuffixRules};

// Re-export public types
pub use error::{HostError, Rule};
pub use types::{Category, Encoding, PublicSuffixResult, SuffixKind, SuffixMatch};

// Module declarations
pub mod error;
pub mod host;
pub mod suffix;
pub mod types;
