//! Parses 128-byte EDID blocks pulled from an attached monitor.
//!
//! This crate only parses; it has no opinion about how the bytes reached
//! it (I2C/DDC, a USB control transfer, a file on disk) and no dependency
//! on the adapter protocol crate that consumes [`Edid`].

pub mod descriptors;
mod edid;
pub mod error;

pub use descriptors::{DetailedTiming, MonitorDescriptor, TimingDescriptor};
pub use edid::{
    ChromaticityCoordinates, DigitalBitDepth, DigitalVideoInterface, DisplayFeatures,
    DpmsDisplayType, Edid, EstablishedTimingSupport, InputDefinition, StandardTiming,
    StandardTimingAspectRatio, EDID_BLOCK_SIZE,
};
pub use error::EdidError;
