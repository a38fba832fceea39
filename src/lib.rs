//! # Radio Envelope
//!
//! Fixed-size packet buffer for a wireless sensor radio stack, with a byte-order
//! contract that holds across heterogeneous microcontrollers.
//!
//! An [`Envelope`] is four blocks laid out back to back with no padding:
//!
//! ```text
//! [Header(12)] [Payload(28)] [Footer(2)] [Metadata(10)]
//! ```
//!
//! Every multi-byte field is stored in network byte order and is only
//! reachable through a typed accessor, so a value written on a little-endian
//! node reads back identically on a big-endian one and the raw bytes can be
//! handed to the radio without a conversion pass.
//!
//! ## Modules
//! - [`core`](crate::core): the envelope and its sub-blocks
//! - [`protocol`]: active-message layer (payload length, addressing, receive checks)
//! - [`config`]: node, radio and logging configuration
//! - [`utils`]: frame check sequence and logging setup
//!
//! ## Example
//! ```rust
//! use radio_envelope::{ActiveMessageLayer, Envelope, RxInfo, StackConfig};
//!
//! let node_a = ActiveMessageLayer::new(&StackConfig::default_with_overrides(|c| {
//!     c.node.address = 1;
//! }));
//! let node_b = ActiveMessageLayer::new(&StackConfig::default_with_overrides(|c| {
//!     c.node.address = 2;
//! }));
//!
//! let mut tx = Envelope::new();
//! let frame = node_a.prepare_send(&mut tx, 2, 0x06, b"hello").unwrap().to_vec();
//!
//! let mut rx = Envelope::new();
//! assert!(node_b.accept_frame(&mut rx, &frame, RxInfo::default()).unwrap());
//! assert_eq!(&rx.payload()[..5], b"hello");
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::config::StackConfig;
pub use crate::core::envelope::Envelope;
pub use crate::core::footer::RadioFooter;
pub use crate::core::header::{FrameControl, RadioHeader};
pub use crate::core::metadata::{MetadataFlags, RadioMetadata};
pub use crate::error::{EnvelopeError, Result};
pub use crate::protocol::{ActiveMessageLayer, RxInfo};
