//! # Canonical Byte Order
//!
//! Integer types stored in network (big-endian) order regardless of the host.
//!
//! Reads go through `get()` and writes through `set()`; both compile down to a
//! plain load/store on big-endian targets and to a byte swap on little-endian
//! ones. The swap is selected by `target_endian` at compile time, there is no
//! runtime detection.
//!
//! Each type has the exact width of its logical value and alignment 1, so a
//! struct built from them has no padding and an accessor can only ever touch
//! the bytes of its own field.

use zerocopy::byteorder::network_endian;

/// 16-bit unsigned integer in network byte order.
pub type NxU16 = network_endian::U16;

/// 32-bit unsigned integer in network byte order.
pub type NxU32 = network_endian::U32;

/// Whether the host stores integers most-significant byte first.
pub const HOST_IS_BIG_ENDIAN: bool = cfg!(target_endian = "big");

/// Human-readable name of the host byte order, for diagnostics.
pub fn host_order() -> &'static str {
    if HOST_IS_BIG_ENDIAN {
        "big-endian"
    } else {
        "little-endian"
    }
}
