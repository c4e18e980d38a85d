//! Error types for fixed-point unit conversion and identifier validation
//!
//! Conversion errors are precondition failures of the input layer: callers
//! decide whether to surface them or to skip downstream checks.

use thiserror::Error;

/// Errors that can occur while converting decimal strings to token units
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitsError {
    /// Nothing but whitespace was supplied
    #[error("Amount is empty")]
    Empty,

    /// Not an unsigned decimal number (signs, letters, several dots)
    #[error("Invalid decimal string: '{input}' - expected unsigned numeric format")]
    Invalid { input: String },

    /// More significant fractional digits than the token supports
    #[error("Amount '{input}' has more than {decimals} fractional digits")]
    ExcessPrecision { input: String, decimals: u8 },

    /// Scaled value does not fit in 256 bits
    #[error("Overflow: amount '{input}' exceeds the 256-bit range")]
    Overflow { input: String },

    /// 10^decimals itself would not fit in 256 bits
    #[error("Unsupported decimal count {decimals}, maximum is {max}")]
    UnsupportedDecimals { decimals: u8, max: u8 },
}

/// Errors that can occur during token identifier validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Address string is not `0x` followed by 40 hex characters
    #[error("Invalid address '{input}': expected 0x followed by 40 hex characters")]
    InvalidAddress { input: String },

    /// The zero address never names a token or pool
    #[error("Zero address is not a valid token")]
    ZeroAddress,

    /// Both sides of a pair are the same token
    #[error("Token pair must contain two distinct tokens")]
    IdenticalTokens,

    /// Custom validation failure with message
    #[error("Validation failed: {message}")]
    Custom { message: String },
}
