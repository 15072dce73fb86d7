//! Redaction round-trip tests
//!
//! End-to-end coverage of redact → edit → restore over real documents,
//! including nested placeholders, malformed syntax, and degrade paths.

mod malformed;
mod nested;
mod properties;
mod redaction;
mod restoration;
