//! # Radio Footer
//!
//! Trailer transmitted after the payload. Carries the 2-byte frame check
//! sequence in network byte order.

use super::nx::NxU16;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Radio footer size in bytes
pub const FOOTER_SIZE: usize = 2;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct RadioFooter {
    fcs: NxU16,
}

const _: () = assert!(std::mem::size_of::<RadioFooter>() == FOOTER_SIZE);

impl RadioFooter {
    pub const SIZE: usize = FOOTER_SIZE;

    /// Frame check sequence as stored on the wire
    pub fn fcs(&self) -> u16 {
        self.fcs.get()
    }

    pub fn set_fcs(&mut self, fcs: u16) {
        self.fcs.set(fcs);
    }
}

impl Default for RadioFooter {
    fn default() -> Self {
        Self::new_zeroed()
    }
}
