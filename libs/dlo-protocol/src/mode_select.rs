//! The mode-change sequence: programs a catalogue mode onto a claimed
//! device and brings it live (spec.md 4.5).

use crate::catalogue::{catalogue, DL120_MODES, INVALID_MODE};
use crate::device::{Device, ModeView};
use crate::error::DloError;
use crate::resolver::lookup;
use crate::transport::Transport;
use crate::wire;

/// Outcome of a successful mode change. `RestrictedSubset` models the
/// source's `WARN_DL160_MODE` out-of-band warning as a Rust-idiomatic
/// success variant rather than a second error path (spec.md 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Ok,
    RestrictedSubset,
}

/// Runs the 8-step mode-change sequence (spec.md 4.5):
///
/// 1. Resolve `(width, height, refresh)` against `dev.supported`; fail
///    with `BadMode` if nothing matches.
/// 2. Validate the caller-supplied `base` (the framebuffer byte offset to
///    place this mode's front buffer at); fail with `BadMode` if it is
///    odd.
/// 3. Flush any bytes already staged, so the register block below isn't
///    preceded by unrelated commands. A transport failure here reports
///    as `DloError::Transport`, not the sentinel-as-error quirk the
///    source used (see DESIGN.md).
/// 4. Compute `base`/`base8`, the latter offset by
///    `BYTES_PER_16BPP * width * height` bytes past `base`.
/// 5. Stage the six base-address register writes inside a
///    `VIDREG_LOCK`/`VIDREG_UNLOCK` bracket and flush them as their own
///    bulk transfer, ahead of any mode-program blob.
/// 6. If the matched entry's `(width, height, bpp)` differs from the
///    currently-programmed mode, issue the mode-program sequence:
///    channel-select the `enable` blob, bulk-write the `program` blob,
///    then channel-select the fixed `POSTAMBLE` blob.
/// 7. Update `dev.mode`/`dev.base8`/`dev.low_blank`.
/// 8. Flush (a no-op here, nothing is staged after step 5). Report
///    `RestrictedSubset` if the matched index falls below
///    `DL120_MODES`, otherwise `Ok`.
pub fn mode_change<T: Transport>(
    dev: &mut Device<T>,
    width: u16,
    height: u16,
    refresh: u16,
    base: usize,
) -> Result<SelectOutcome, DloError> {
    let idx = lookup(dev, width, height, refresh, 24);
    if idx == INVALID_MODE {
        log::warn!(
            "no supported mode for {}x{}@{} on device {}",
            width,
            height,
            refresh,
            dev.serial
        );
        return Err(DloError::BadMode);
    }
    let entry = catalogue()[idx];

    if base % 2 != 0 {
        return Err(DloError::BadMode);
    }

    dev.flush()?;

    let base8 = base + wire::BYTES_PER_16BPP * usize::from(entry.width) * usize::from(entry.height);
    let new_mode =
        ModeView::new(entry.width, entry.height, entry.bpp, base, entry.refresh, dev.memory)?;
    let geometry_changed = (new_mode.width, new_mode.height, new_mode.bpp)
        != (dev.mode.width, dev.mode.height, dev.mode.bpp);

    dev.stage(&wire::VIDREG_LOCK)?;
    for (i, &reg) in wire::BASE_REGS.iter().enumerate() {
        let shift = 16 - i * 8;
        dev.stage_vreg(reg, ((base >> shift) & 0xFF) as u8)?;
    }
    for (i, &reg) in wire::BASE8_REGS.iter().enumerate() {
        let shift = 16 - i * 8;
        dev.stage_vreg(reg, ((base8 >> shift) & 0xFF) as u8)?;
    }
    dev.stage(&wire::VIDREG_UNLOCK)?;
    dev.flush()?;

    if geometry_changed {
        dev.transport
            .control_channel(entry.enable, dev.timeout_ms)
            .map_err(DloError::Transport)?;
        dev.transport
            .bulk_write(entry.program, dev.timeout_ms)
            .map_err(DloError::Transport)?;
        dev.transport
            .control_channel(wire::POSTAMBLE, dev.timeout_ms)
            .map_err(DloError::Transport)?;
    }

    dev.mode = new_mode;
    dev.base8 = base8;
    dev.low_blank = entry.low_blank;

    dev.flush()?;

    log::info!(
        "device {} switched to {}x{}@{}",
        dev.serial,
        entry.width,
        entry.height,
        entry.refresh
    );

    if idx < DL120_MODES {
        Ok(SelectOutcome::RestrictedSubset)
    } else {
        Ok(SelectOutcome::Ok)
    }
}
