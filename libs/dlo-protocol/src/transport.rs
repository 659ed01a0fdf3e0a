use thiserror::Error;

/// Reported by the caller-supplied bulk/control transport. The protocol
/// engine never inspects the variant beyond propagating it; it exists so
/// a transport implementation (nusb, rusb, a test double) has somewhere
/// to put its own failure detail.
#[derive(Error, Debug, PartialEq)]
pub enum TransportError {
    #[error("transport operation timed out")]
    Timeout,
    #[error("device was disconnected")]
    Disconnected,
    #[error("transport error: {0}")]
    Other(String),
}

/// The opaque write/control sink a [`crate::Device`] streams framed bytes
/// through. Out of scope per spec.md 1: the protocol engine only defines
/// this boundary, a real adapter driver plugs in its own USB backend.
pub trait Transport {
    /// A generic write, used for one-off control-style commands.
    fn write(&mut self, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError>;

    /// Selects a logical channel and writes `bytes` to it. Used for the
    /// mode-enable blob and the `POSTAMBLE` blob (spec.md 4.5 step 6).
    fn control_channel(&mut self, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError>;

    /// Bulk-transfers `bytes` to the adapter's command endpoint. Used to
    /// flush the staged command buffer and to send the mode-program blob.
    fn bulk_write(&mut self, bytes: &[u8], timeout_ms: u32) -> Result<(), TransportError>;
}
