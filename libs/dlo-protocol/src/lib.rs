//! Protocol framing, EDID-driven mode negotiation, and device lifecycle
//! for DisplayLink-class USB display adapters.
//!
//! This crate speaks the adapter's side of the wire: it does not open a
//! USB handle itself (see [`transport::Transport`]), does not draw
//! anything into a claimed frame buffer, and does not know the contents
//! of a mode's program/enable blobs beyond issuing them verbatim.

pub mod byteio;
pub mod catalogue;
pub mod config;
pub mod device;
pub mod error;
pub mod mode_select;
pub mod registry;
pub mod resolver;
pub mod transport;
pub mod wire;

pub use catalogue::{CatalogueEntry, DL120_MODES, INVALID_MODE};
pub use config::{ConfigError, DriverConfig};
pub use device::{AdapterType, Device, ModeView};
pub use error::DloError;
pub use mode_select::{mode_change, SelectOutcome};
pub use registry::{ReconcileReport, Registry, ScannedAdapter};
pub use resolver::{build_supported_from_edid, lookup, parse_edid, use_default_modes};
pub use transport::{Transport, TransportError};
