//! Reconciles the adapter's fixed mode catalogue against whatever a
//! monitor's EDID (or nothing at all) says it can display (spec.md 4.4).

use edid::{Edid, EstablishedTimingSupport, TimingDescriptor};

use crate::catalogue::{catalogue, INVALID_MODE};
use crate::device::{Device, ModeView};
use crate::error::DloError;
use crate::transport::Transport;

/// Finds the first catalogue index in `dev.supported` matching `width`
/// exactly, and `height`/`refresh`/`bpp` where `0` means "don't care"
/// (spec.md 4.4 — `width` is never a wildcard). A `bpp` other than `0`
/// or `24` can never match, since every catalogue entry is 24bpp
/// (Non-goals unchanged), and is rejected immediately rather than
/// walking the list.
pub fn lookup<T: Transport>(dev: &Device<T>, width: u16, height: u16, refresh: u16, bpp: u8) -> usize {
    if bpp != 0 && bpp != 24 {
        return INVALID_MODE;
    }
    dev.supported
        .iter()
        .copied()
        .find(|&idx| catalogue_matches(idx, width, height, refresh))
        .unwrap_or(INVALID_MODE)
}

/// Finds the first catalogue index matching `width`/`height`/`refresh`
/// against the full static catalogue (not a device's supported subset) —
/// used while building `dev.supported` itself, where there is not yet a
/// supported list to search. `width` is always an exact match per
/// spec.md 4.4; only `height`/`refresh` (and, in `lookup`, `bpp`) treat
/// `0` as "don't care".
fn lookup_catalogue(width: u16, height: u16, refresh: u16) -> usize {
    catalogue()
        .iter()
        .position(|e| {
            e.width == width
                && (height == 0 || e.height == height)
                && (refresh == 0 || e.refresh == refresh)
        })
        .unwrap_or(INVALID_MODE)
}

fn catalogue_matches(idx: usize, width: u16, height: u16, refresh: u16) -> bool {
    let Some(entry) = catalogue().get(idx) else {
        return false;
    };
    entry.width == width
        && (height == 0 || entry.height == height)
        && (refresh == 0 || entry.refresh == refresh)
}

/// Fills `dev.supported` with every catalogue index, with no EDID to
/// consult (spec.md 4.4 `use_default_modes`).
pub fn use_default_modes<T: Transport>(dev: &mut Device<T>) {
    dev.supported = (0..catalogue().len()).collect();
    dev.native = None;
}

/// Established-timings table, in catalogue-order width/height/refresh
/// triples, per the bit walk spec.md 4.4 requires: `timings[0]` low-to-
/// high bit, then `timings[1]`, then the 8 reserved high bits of
/// `timings[2]` (only bit 7 of which is defined).
fn established_timing_modes(t: &EstablishedTimingSupport) -> Vec<(u16, u16, u16)> {
    let mut modes = Vec::new();
    let mut push = |supported: bool, w: u16, h: u16, r: u16| {
        if supported {
            modes.push((w, h, r));
        }
    };
    push(t.t800x600_56hz, 800, 600, 56);
    push(t.t800x600_60hz, 800, 600, 60);
    push(t.t640x480_60hz, 640, 480, 60);
    push(t.t640x480_67hz, 640, 480, 67);
    push(t.t640x480_72hz, 640, 480, 72);
    push(t.t640x480_75hz, 640, 480, 75);
    push(t.t720x400_70hz, 720, 400, 70);
    push(t.t720x400_88hz, 720, 400, 88);
    push(t.t1280x1024_75hz, 1280, 1024, 75);
    push(t.t1024x768_75hz, 1024, 768, 75);
    push(t.t1024x768_70hz, 1024, 768, 70);
    push(t.t1024x768_60hz, 1024, 768, 60);
    push(t.t1024x768_87hz, 1024, 768, 87);
    push(t.t832x624_75hz, 832, 624, 75);
    push(t.t800x600_75hz, 800, 600, 75);
    push(t.t800x600_72hz, 800, 600, 72);
    push(t.t1152x870_75hz, 1152, 870, 75);
    modes
}

/// Builds `dev.supported` and `dev.native` from a parsed EDID, per
/// spec.md 4.4: clears `dev.native`, walks the established-timings
/// bitfield, matching each against the catalogue by exact `(width,
/// height, refresh)`; then, for each of the four descriptor slots
/// flagged as `Detail`, extracts `(width, height)` and tries every `hz`
/// in `[50, 100)` in order against the catalogue — the descriptor's own
/// pixel clock is not consulted, matching the source's behaviour of
/// scanning the refresh range rather than computing it. The first `hz`
/// that yields a hit is recorded for that descriptor; the first hit
/// across all descriptors becomes the device's native mode.
pub fn build_supported_from_edid<T: Transport>(
    dev: &mut Device<T>,
    edid: &Edid,
) -> Result<(), DloError> {
    let mut supported = Vec::new();
    for (w, h, r) in established_timing_modes(&edid.established_timings) {
        let idx = lookup_catalogue(w, h, r);
        if idx != INVALID_MODE {
            supported.push(idx);
        }
    }

    let mut native = None;
    for descriptor in &edid.descriptors {
        let TimingDescriptor::Detail(detail) = descriptor else {
            continue;
        };
        let (width, height) = detail.geometry();
        let Some(idx) = (50..100)
            .map(|hz| lookup_catalogue(width, height, hz))
            .find(|&idx| idx != INVALID_MODE)
        else {
            continue;
        };
        supported.push(idx);
        if native.is_none() {
            let entry = &catalogue()[idx];
            native = Some(ModeView::new(
                entry.width,
                entry.height,
                entry.bpp,
                0,
                entry.refresh,
                dev.memory,
            )?);
        }
    }

    dev.supported = supported;
    dev.native = native;
    Ok(())
}

/// Validates and parses a 128-byte EDID block, then derives the
/// device's `supported`/`native` modes from it in one call (spec.md
/// 4.3: "after parsing, calls the resolver to derive the supported-
/// modes list"). `edid::EdidError`'s finer-grained reasons collapse
/// into `DloError::EdidFail` per the wire contract (spec.md 6); the
/// actual cause is still logged.
pub fn parse_edid<T: Transport>(dev: &mut Device<T>, bytes: &[u8]) -> Result<Edid, DloError> {
    let edid = Edid::parse(bytes).map_err(|e| {
        log::warn!("EDID parse failed for device {}: {}", dev.serial, e);
        DloError::EdidFail
    })?;
    build_supported_from_edid(dev, &edid)?;
    Ok(edid)
}
