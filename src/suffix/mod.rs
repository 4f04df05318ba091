//! Public suffix support.
//!
//! Rule sources implement [`SuffixRules`] and are passed in at call time;
//! nothing here performs I/O or keeps global state.

pub mod resolver;
pub mod rules;

pub use resolver::resolve;
pub use rules::{BundledList, RuleList, Section, SuffixRules};
