//! # Error Types
//!
//! Error handling for envelope access and the active-message layer.
//!
//! Width mismatches between an accessor and its field cannot occur at runtime:
//! every accessor is typed by the field it touches and every sub-block size is
//! asserted at compile time. What remains are the conditions a driver or a
//! higher layer checks against the fixed-size contract.
//!
//! ## Error Categories
//! - **Buffer errors**: slot and frame lengths that disagree with the layout
//! - **Payload errors**: logical lengths above the platform capacity
//! - **Integrity errors**: frame check sequence mismatches, corrupt headers
//! - **Configuration errors**: unreadable or invalid configuration
//!
//! ## Example Usage
//! ```rust
//! use radio_envelope::core::envelope::Envelope;
//! use radio_envelope::error::EnvelopeError;
//!
//! let mut envelope = Envelope::new();
//! match envelope.load_wire(&[0u8; 4]) {
//!     Err(EnvelopeError::TruncatedFrame { actual, .. }) => assert_eq!(actual, 4),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants shared by validation paths.
pub mod constants {
    pub const ERR_INVALID_HEADER: &str = "Invalid radio header";
    pub const ERR_BROADCAST_ADDRESS: &str = "Node address cannot be the broadcast address";
}

// EnvelopeError is the primary error type for all envelope operations
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Buffer slot size mismatch: expected {expected} bytes, got {actual}")]
    SlotSize { expected: usize, actual: usize },

    #[error("Truncated frame: expected {expected} bytes, got {actual}")]
    TruncatedFrame { expected: usize, actual: usize },

    #[error("Frame too long: expected {expected} bytes, got {actual}")]
    OversizedFrame { expected: usize, actual: usize },

    #[error("Payload too large: {0} bytes")]
    OversizedPayload(usize),

    #[error("Invalid radio header")]
    InvalidHeader,

    #[error("Frame check mismatch: expected {expected:#06x}, computed {actual:#06x}")]
    ChecksumMismatch { expected: u16, actual: u16 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to allocate envelope buffer")]
    AllocFailed,
}

/// Type alias for Results using EnvelopeError
pub type Result<T> = std::result::Result<T, EnvelopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EnvelopeError::TruncatedFrame {
            expected: 42,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "Truncated frame: expected 42 bytes, got 10"
        );

        let err = EnvelopeError::ChecksumMismatch {
            expected: 0x1234,
            actual: 0x00ff,
        };
        assert_eq!(
            err.to_string(),
            "Frame check mismatch: expected 0x1234, computed 0x00ff"
        );

        assert_eq!(
            EnvelopeError::InvalidHeader.to_string(),
            constants::ERR_INVALID_HEADER
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: EnvelopeError = io_err.into();
        assert!(matches!(err, EnvelopeError::Io(_)));
    }
}
