//! # Core Envelope Components
//!
//! Memory layout and byte-order contract of a single radio packet buffer.
//!
//! Each sub-block is an independent zero-copy structure with its own
//! canonical-order accessors; the envelope composes them at fixed offsets.
//!
//! ## Components
//! - **nx**: network byte-order integer types
//! - **header**: link-layer addressing and framing fields
//! - **footer**: frame check sequence
//! - **metadata**: local-only reception/transmission annotations
//! - **envelope**: the aggregate buffer and its raw views
//!
//! ## Wire Format
//! ```text
//! [Header(12)] [Payload(28)] [Footer(2)]      -> on the medium
//! [Metadata(10)]                              -> local memory only
//! ```

pub mod envelope;
pub mod footer;
pub mod header;
pub mod metadata;
pub mod nx;

/// Payload capacity of the target radio platform, in bytes
pub const PAYLOAD_CAPACITY: usize = 28;
