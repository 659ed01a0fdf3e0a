//! Tracks the set of known adapters across repeated enumeration sweeps
//! (spec.md 4.6), replacing the source's process-wide doubly-linked list
//! and toggle-based "check" flag with an owned collection and a
//! monotonic generation counter.

use crate::device::{AdapterType, Device};
use crate::error::DloError;
use crate::transport::Transport;

/// One adapter observed by a USB enumeration pass, before it becomes a
/// tracked [`Device`]. Carried in by the caller; this crate never
/// performs USB enumeration itself (out of scope, spec.md 1).
pub struct ScannedAdapter<T: Transport> {
    pub serial: String,
    pub kind: AdapterType,
    pub transport: T,
    pub timeout_ms: u32,
    pub buffer_capacity: usize,
    pub memory: usize,
}

/// Reports what an enumeration sweep changed, so callers (and tests) can
/// observe reconciliation instead of only the resulting device set. The
/// source's sweep mutated the global list silently; this is an ambient
/// addition, not a change to removal semantics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub retained: Vec<String>,
}

/// The set of adapters this driver instance currently knows about.
/// Caller-serialised (spec.md 5): this type does no internal locking, so
/// concurrent access from multiple threads needs an external `Mutex`.
pub struct Registry<T: Transport> {
    devices: Vec<Device<T>>,
    generation: u64,
}

impl<T: Transport> Registry<T> {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            generation: 0,
        }
    }

    pub fn devices(&self) -> &[Device<T>] {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut [Device<T>] {
        &mut self.devices
    }

    pub fn get_mut(&mut self, serial: &str) -> Option<&mut Device<T>> {
        self.devices.iter_mut().find(|d| d.serial == serial)
    }

    /// Reconciles `scanned` against tracked devices: every scanned
    /// adapter is found-or-inserted by serial and stamped with the
    /// current generation; afterward, any tracked device whose
    /// generation fell behind is released and dropped (spec.md 4.6).
    pub fn reconcile(&mut self, scanned: Vec<ScannedAdapter<T>>) -> ReconcileReport {
        self.generation += 1;
        let current = self.generation;
        let mut report = ReconcileReport::default();

        for adapter in scanned {
            if let Some(existing) = self.get_mut(&adapter.serial) {
                existing.check = current;
                report.retained.push(adapter.serial);
                continue;
            }
            let mut device = Device::new(
                adapter.serial.clone(),
                adapter.kind,
                adapter.transport,
                adapter.timeout_ms,
                adapter.buffer_capacity,
                adapter.memory,
            );
            device.check = current;
            log::info!("device {} discovered", device.serial);
            report.added.push(adapter.serial);
            self.devices.push(device);
        }

        let mut removed = Vec::new();
        self.devices.retain_mut(|device| {
            let stale = device.check != current;
            if stale {
                device.release();
                log::info!("device {} no longer present", device.serial);
                removed.push(device.serial.clone());
            }
            !stale
        });
        report.removed = removed;
        report
    }

    /// Claims the named device for exclusive use (spec.md 4.6).
    pub fn claim(&mut self, serial: &str) -> Result<(), DloError> {
        self.get_mut(serial)
            .ok_or(DloError::BadMode)?
            .claim()
    }

    /// Releases the named device. A no-op if it isn't tracked.
    pub fn release(&mut self, serial: &str) {
        if let Some(device) = self.get_mut(serial) {
            device.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    struct NullTransport;
    impl Transport for NullTransport {
        fn write(&mut self, _bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
            Ok(())
        }
        fn control_channel(&mut self, _bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
            Ok(())
        }
        fn bulk_write(&mut self, _bytes: &[u8], _timeout_ms: u32) -> Result<(), TransportError> {
            Ok(())
        }
    }

    fn adapter(serial: &str) -> ScannedAdapter<NullTransport> {
        ScannedAdapter {
            serial: serial.to_string(),
            kind: AdapterType::Dl160,
            transport: NullTransport,
            timeout_ms: 1000,
            buffer_capacity: 4096,
            memory: 1 << 24,
        }
    }

    #[test]
    fn first_sweep_adds_every_scanned_adapter() {
        let mut registry: Registry<NullTransport> = Registry::new();
        let report = registry.reconcile(vec![adapter("a"), adapter("b")]);
        assert_eq!(report.added, vec!["a", "b"]);
        assert!(report.removed.is_empty());
        assert_eq!(registry.devices().len(), 2);
    }

    #[test]
    fn repeated_sweep_retains_still_present_devices() {
        let mut registry: Registry<NullTransport> = Registry::new();
        registry.reconcile(vec![adapter("a")]);
        let report = registry.reconcile(vec![adapter("a")]);
        assert_eq!(report.retained, vec!["a"]);
        assert!(report.added.is_empty());
        assert_eq!(registry.devices().len(), 1);
    }

    #[test]
    fn sweep_removes_devices_no_longer_scanned() {
        let mut registry: Registry<NullTransport> = Registry::new();
        registry.reconcile(vec![adapter("a"), adapter("b")]);
        let report = registry.reconcile(vec![adapter("a")]);
        assert_eq!(report.removed, vec!["b"]);
        assert_eq!(registry.devices().len(), 1);
    }

    #[test]
    fn claim_then_reclaim_fails() {
        let mut registry: Registry<NullTransport> = Registry::new();
        registry.reconcile(vec![adapter("a")]);
        registry.claim("a").unwrap();
        assert!(registry.claim("a").is_err());
    }

    #[test]
    fn claim_unknown_serial_fails() {
        let mut registry: Registry<NullTransport> = Registry::new();
        assert!(registry.claim("ghost").is_err());
    }
}
