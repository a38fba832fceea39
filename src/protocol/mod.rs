//! # Active-Message Layer
//!
//! The layer directly above the envelope. It owns the decisions the
//! envelope deliberately does not make: how many payload bytes are in use,
//! who a frame is addressed to, and whether a received frame is intact and
//! meant for this node.
//!
//! ## Components
//! - **packet**: access traits (`Packet`, `AmPacket`, acknowledgements, timestamps)
//! - **active_message**: [`ActiveMessageLayer`], the per-node implementation
//!
//! ## Send path
//! ```text
//! payload -> length check -> header fill -> seal (FCS) -> wire bytes
//! ```
//!
//! ## Receive path
//! ```text
//! frame -> length contract -> header sanity -> FCS -> metadata stamp -> deliver?
//! ```

pub mod active_message;
pub mod packet;

pub use active_message::{ActiveMessageLayer, RxInfo};
