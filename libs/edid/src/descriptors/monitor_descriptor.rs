/// An 18-byte monitor descriptor other than a detailed timing: the
/// display name, serial number, range limits, or a manufacturer-specific
/// block. The payload is kept opaque — only the range-limits descriptor
/// (tag `0xFD`) carries any semantics the mode resolver touches, and the
/// resolver never needs it, so there is no reason to break this out
/// further here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorDescriptor {
    pub tag: u8,
    pub payload: [u8; 13],
}

impl MonitorDescriptor {
    /// Parses bytes 3..18 of an 18-byte descriptor block once the caller
    /// has established (via [`super::is_detail`]) that it is not a
    /// detailed timing.
    pub fn from_bytes(b: &[u8; 18]) -> Self {
        let mut payload = [0u8; 13];
        payload.copy_from_slice(&b[5..18]);
        Self { tag: b[3], payload }
    }
}
