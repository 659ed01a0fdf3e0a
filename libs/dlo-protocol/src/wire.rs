//! Fixed byte sequences the adapter's command grammar requires. Opcodes
//! and framing bytes are fixed by hardware (spec.md 6); nothing here is
//! negotiable or configurable.

/// Vendor opcode prefix shared by every register write.
pub const VREG_OPCODE: [u8; 2] = [0xAF, 0x20];

/// Begins a video-register write block.
pub const VIDREG_LOCK: [u8; 4] = [0xAF, 0x20, 0xFF, 0x00];

/// Ends a video-register write block.
pub const VIDREG_UNLOCK: [u8; 6] = [0xAF, 0x20, 0xFF, 0xFF, 0xAF, 0xA0];

/// Sent on the control channel after the mode-program blob during a mode
/// change (spec.md 4.5 step 6). Contents are fixed by hardware; opaque to
/// this crate beyond being issued verbatim.
pub const POSTAMBLE: &[u8] = &[0xAF, 0xA1, 0x00];

/// Register addresses for the six-word base-address programming sequence
/// (spec.md 4.5 step 5): three bytes of `base`, then three bytes of
/// `base8`, each written most-significant byte first.
pub const BASE_REGS: [u8; 3] = [0x20, 0x21, 0x22];
pub const BASE8_REGS: [u8; 3] = [0x26, 0x27, 0x28];

/// Bytes per pixel of the 8-bit fine-detail plane `base8` addresses,
/// independent of the 24bpp front buffer (spec.md 4.5 step 4).
pub const BYTES_PER_16BPP: usize = 2;
