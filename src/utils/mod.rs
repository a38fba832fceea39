//! # Utility Modules
//!
//! Supporting utilities used by the envelope and the active-message layer.
//!
//! ## Components
//! - **Checksum**: CRC-16 frame check sequence
//! - **Logging**: structured logging configuration

pub mod checksum;
pub mod logging;
