//! Format-specific document implementations
//!
//! Implementations of the `document` traits for concrete formats. Only PDF
//! is supported; it wraps the lower-level MuPDF bindings.

pub mod pdf;
