use crate::error::DloError;
use crate::transport::Transport;
use crate::wire;

/// DL120-class adapters only support the first `DL120_MODES` catalogue
/// entries; DL160-class adapters support the full table (spec.md 4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterType {
    Dl120,
    Dl160,
}

/// A resolved raster mode, either the one currently programmed on a
/// device or a monitor's preferred native mode (spec.md 3).
///
/// Constructed only through [`ModeView::new`], which enforces the
/// invariants spec.md requires of any mode ever assigned to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeView {
    pub width: u16,
    pub height: u16,
    pub bpp: u8,
    pub base: usize,
    pub refresh: u16,
}

impl ModeView {
    /// Fails if `bpp != 24`, `base` is odd, or the frame doesn't fit in
    /// `memory` bytes (spec.md 3 mode invariants; 24bpp-only per
    /// Non-goals).
    pub fn new(
        width: u16,
        height: u16,
        bpp: u8,
        base: usize,
        refresh: u16,
        memory: usize,
    ) -> Result<Self, DloError> {
        if bpp != 24 {
            return Err(DloError::BadMode);
        }
        if base % 2 != 0 {
            return Err(DloError::BadMode);
        }
        let frame_bytes = usize::from(width) * usize::from(height) * 3;
        if base.checked_add(frame_bytes).is_none_or(|end| end > memory) {
            return Err(DloError::BadMode);
        }
        Ok(Self {
            width,
            height,
            bpp,
            base,
            refresh,
        })
    }
}

/// A claimed or claimable adapter and its staged command buffer.
///
/// `transport` is the caller-supplied sink; everything else is state this
/// crate owns exclusively while the device is claimed (spec.md 5).
pub struct Device<T: Transport> {
    pub serial: String,
    pub kind: AdapterType,
    pub claimed: bool,
    pub check: u64,
    pub timeout_ms: u32,
    pub transport: T,
    buffer: Vec<u8>,
    base: usize,
    ptr: usize,
    end: usize,
    pub mode: ModeView,
    pub base8: usize,
    pub low_blank: bool,
    pub native: Option<ModeView>,
    pub supported: Vec<usize>,
    pub memory: usize,
}

impl<T: Transport> Device<T> {
    pub fn new(
        serial: String,
        kind: AdapterType,
        transport: T,
        timeout_ms: u32,
        buffer_capacity: usize,
        memory: usize,
    ) -> Self {
        Self {
            serial,
            kind,
            claimed: false,
            check: 0,
            timeout_ms,
            transport,
            buffer: vec![0u8; buffer_capacity],
            base: 0,
            ptr: 0,
            end: buffer_capacity,
            mode: ModeView {
                width: 0,
                height: 0,
                bpp: 24,
                base: 0,
                refresh: 0,
            },
            base8: 0,
            low_blank: false,
            native: None,
            supported: Vec::new(),
            memory,
        }
    }

    /// Claims the device for exclusive use; fails if already claimed
    /// (spec.md 4.6).
    pub fn claim(&mut self) -> Result<(), DloError> {
        if self.claimed {
            return Err(DloError::BadMode);
        }
        self.claimed = true;
        log::debug!("device {} claimed", self.serial);
        Ok(())
    }

    /// Releases the device. Idempotent (spec.md 4.6).
    pub fn release(&mut self) {
        if self.claimed {
            log::debug!("device {} released", self.serial);
        }
        self.claimed = false;
    }

    /// Bytes currently staged and not yet flushed.
    pub fn staged_len(&self) -> usize {
        self.ptr - self.base
    }

    /// Appends `bytes` to the command buffer. Fails with `BufFull` if
    /// insufficient room remains; never partially stages (spec.md 4.1).
    pub fn stage(&mut self, bytes: &[u8]) -> Result<(), DloError> {
        if self.ptr + bytes.len() > self.end {
            log::warn!(
                "command buffer full on device {} staging {} bytes",
                self.serial,
                bytes.len()
            );
            return Err(DloError::BufFull);
        }
        self.buffer[self.ptr..self.ptr + bytes.len()].copy_from_slice(bytes);
        self.ptr += bytes.len();
        Ok(())
    }

    /// Stages the 4-byte register-write shorthand `0xAF 0x20 reg val`
    /// (spec.md 4.1).
    pub fn stage_vreg(&mut self, reg: u8, val: u8) -> Result<(), DloError> {
        let mut frame = [0u8; 4];
        frame[0..2].copy_from_slice(&wire::VREG_OPCODE);
        frame[2] = reg;
        frame[3] = val;
        self.stage(&frame)
    }

    /// Drains `[base, ptr)` through the transport, resetting the cursor
    /// to `base` whether the write succeeds or fails — no partial
    /// transmission state survives a flush (spec.md 5).
    pub fn flush(&mut self) -> Result<(), DloError> {
        let pending = self.ptr - self.base;
        if pending == 0 {
            return Ok(());
        }
        let result = self
            .transport
            .bulk_write(&self.buffer[self.base..self.ptr], self.timeout_ms);
        self.ptr = self.base;
        result.map_err(|e| {
            log::error!("flush failed on device {}: {}", self.serial, e);
            DloError::Transport(e)
        })
    }

    /// Resets the staging cursor without flushing, for callers that need
    /// to abandon a partially staged sequence (spec.md 7).
    pub fn reset_staging(&mut self) {
        self.ptr = self.base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    struct RecordingTransport {
        bulk_writes: Vec<Vec<u8>>,
        fail_next: bool,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                bulk_writes: Vec::new(),
                fail_next: false,
            }
        }
    }

    impl Transport for RecordingTransport {
        fn write(&mut self, _bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
            Ok(())
        }
        fn control_channel(&mut self, _bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
            Ok(())
        }
        fn bulk_write(&mut self, bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
            if self.fail_next {
                return Err(TransportError::Timeout);
            }
            self.bulk_writes.push(bytes.to_vec());
            Ok(())
        }
    }

    fn device() -> Device<RecordingTransport> {
        Device::new(
            "serial-1".into(),
            AdapterType::Dl160,
            RecordingTransport::new(),
            1000,
            8,
            1 << 20,
        )
    }

    #[test]
    fn stage_fails_when_buffer_is_full() {
        let mut dev = device();
        dev.stage(&[0u8; 8]).unwrap();
        assert_eq!(dev.stage(&[0u8]).unwrap_err(), DloError::BufFull);
    }

    #[test]
    fn flush_resets_cursor_on_success() {
        let mut dev = device();
        dev.stage_vreg(0x20, 0x01).unwrap();
        assert_eq!(dev.staged_len(), 4);
        dev.flush().unwrap();
        assert_eq!(dev.staged_len(), 0);
        assert_eq!(dev.transport.bulk_writes.len(), 1);
    }

    #[test]
    fn flush_resets_cursor_even_on_transport_failure() {
        let mut dev = device();
        dev.stage_vreg(0x20, 0x01).unwrap();
        dev.transport.fail_next = true;
        assert!(dev.flush().is_err());
        assert_eq!(dev.staged_len(), 0);
    }

    #[test]
    fn claim_fails_when_already_claimed() {
        let mut dev = device();
        dev.claim().unwrap();
        assert_eq!(dev.claim().unwrap_err(), DloError::BadMode);
    }

    #[test]
    fn release_is_idempotent() {
        let mut dev = device();
        dev.release();
        dev.claim().unwrap();
        dev.release();
        dev.release();
        assert!(!dev.claimed);
    }

    #[test]
    fn mode_view_rejects_non_24bpp() {
        assert!(ModeView::new(640, 480, 16, 0, 60, 1 << 20).is_err());
    }

    #[test]
    fn mode_view_rejects_odd_base() {
        assert!(ModeView::new(640, 480, 24, 1, 60, 1 << 20).is_err());
    }

    #[test]
    fn mode_view_rejects_frame_not_fitting_memory() {
        assert!(ModeView::new(640, 480, 24, 0, 60, 100).is_err());
    }
}
