//! Core types shared across keepass-compare facilities
//!
//! This crate provides foundational types used by the error, logging and
//! credential facilities:
//!
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction of passwords
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
