//! Common error types shared across the swap client crates

pub mod errors;
