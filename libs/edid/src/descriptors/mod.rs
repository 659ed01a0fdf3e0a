mod detailed_timing;
mod monitor_descriptor;

pub use detailed_timing::*;
pub use monitor_descriptor::*;

/// One of the four 18-byte descriptor blocks at 0x36..0x7E.
///
/// The discriminator is whether the first three bytes are all zero: real
/// pixel clocks never encode to all-zero bytes, so `00 00 00` is reserved
/// by the EDID spec to mark a monitor descriptor instead of a detailed
/// timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingDescriptor {
    Detail(DetailedTiming),
    Monitor(MonitorDescriptor),
}

impl TimingDescriptor {
    pub fn from_bytes(b: &[u8; 18]) -> Self {
        if is_detail(b) {
            TimingDescriptor::Detail(DetailedTiming::from_bytes(b))
        } else {
            TimingDescriptor::Monitor(MonitorDescriptor::from_bytes(b))
        }
    }

    pub fn as_detail(&self) -> Option<&DetailedTiming> {
        match self {
            TimingDescriptor::Detail(d) => Some(d),
            TimingDescriptor::Monitor(_) => None,
        }
    }
}

/// `true` if this 18-byte block is a detailed timing rather than a
/// monitor descriptor (first three bytes not all zero).
pub fn is_detail(b: &[u8; 18]) -> bool {
    b[0] != 0 || b[1] != 0 || b[2] != 0
}
