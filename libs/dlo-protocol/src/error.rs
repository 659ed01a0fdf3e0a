use thiserror::Error;

use crate::transport::TransportError;

/// Unified error/result taxonomy for the protocol engine (spec.md 6/7).
///
/// `EDID_FAIL` collapses `edid::EdidError`'s finer-grained reasons into
/// one variant, matching the wire contract; callers who want the cause
/// should log it themselves (`resolver::parse_edid` already does).
///
/// There is no `InvalidMode` variant: `INVALID_MODE` is only ever a
/// sentinel `usize` (see `catalogue::INVALID_MODE`), never a caller-
/// facing error — a failed mode-select reports `BadMode`, and the one
/// historical case where a transport failure surfaced as that sentinel
/// is now reported as `Transport` instead (see DESIGN.md).
#[derive(Error, Debug, PartialEq)]
pub enum DloError {
    #[error("command buffer full")]
    BufFull,

    #[error("EDID validation failed")]
    EdidFail,

    #[error("requested mode is not supported")]
    BadMode,

    #[error(transparent)]
    Transport(#[from] TransportError),
}
