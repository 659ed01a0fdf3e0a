use thiserror::Error;

/// Reasons a 128-byte EDID block failed to validate.
///
/// The public protocol crate collapses all of these into a single
/// `EDID_FAIL` result (per the wire contract), but keeping them distinct
/// here lets callers log the actual cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdidError {
    #[error("EDID block must be exactly {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },

    #[error("EDID header does not match the fixed magic sequence")]
    BadHeader,

    #[error("EDID checksum does not sum to 0 mod 256")]
    BadChecksum,
}
