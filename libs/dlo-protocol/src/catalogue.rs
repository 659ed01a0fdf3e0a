use std::sync::OnceLock;

/// Sentinel distinct from every valid catalogue index; also the
/// terminator value used in a device's `supported` list (spec.md 3/4.4).
pub const INVALID_MODE: usize = usize::MAX;

/// Catalogue indices below this value designate modes that need the
/// higher-bandwidth DL160-class chipset; selecting one still succeeds,
/// but `mode_change` reports it via `SelectOutcome::RestrictedSubset`
/// (spec.md 4.5 step 8, `WARN_DL160_MODE`).
pub const DL120_MODES: usize = 14;

/// One row of the adapter's fixed mode table: a `(width, height,
/// refresh)` key plus the opaque program/enable blobs the adapter needs
/// to switch into that mode. Sizes of `program`/`enable` vary per entry
/// and are not otherwise meaningful to this crate (spec.md 1, 3).
#[derive(Debug, Clone, Copy)]
pub struct CatalogueEntry {
    pub width: u16,
    pub height: u16,
    pub refresh: u16,
    pub bpp: u8,
    pub program: &'static [u8],
    pub enable: &'static [u8],
    pub low_blank: bool,
}

static CATALOGUE: OnceLock<Vec<CatalogueEntry>> = OnceLock::new();

/// The adapter's fixed mode table, ordered 1920x1080@60 down to
/// 640x480@60 (spec.md 4.2), built once on first access.
pub fn catalogue() -> &'static [CatalogueEntry] {
    CATALOGUE.get_or_init(build_catalogue).as_slice()
}

/// `(width, height, refresh, low_blank)` rows in catalogue order. Kept as
/// a flat literal table rather than generated, since the grouping
/// (which refreshes exist per resolution, which entries share blanking)
/// is itself part of what the catalogue specifies.
const ROWS: &[(u16, u16, u16, bool)] = &[
    (1920, 1080, 60, false),
    (1680, 1050, 60, false),
    (1600, 1200, 60, false),
    (1600, 900, 60, false),
    (1440, 900, 60, false),
    (1400, 1050, 60, false),
    (1366, 768, 60, false),
    (1360, 768, 60, false),
    (1280, 1024, 75, false),
    (1280, 1024, 60, false),
    (1280, 960, 60, false),
    (1280, 800, 60, false),
    (1280, 768, 60, false),
    (1280, 720, 60, false),
    (1152, 864, 75, false),
    (1152, 720, 60, false),
    (832, 624, 75, true),
    (800, 600, 75, true),
    (1024, 768, 85, false),
    (1024, 768, 75, false),
    (1024, 768, 70, false),
    (1024, 768, 60, false),
    (848, 480, 60, true),
    (720, 576, 50, true),
    (720, 480, 60, true),
    (720, 400, 88, true),
    (720, 400, 70, true),
    (640, 512, 60, true),
    (600, 480, 60, true),
    (512, 384, 60, true),
    (640, 480, 85, true),
    (640, 480, 75, true),
    (640, 480, 72, true),
    (640, 480, 67, true),
    (640, 480, 60, true),
];

fn build_catalogue() -> Vec<CatalogueEntry> {
    ROWS.iter()
        .enumerate()
        .map(|(i, &(width, height, refresh, low_blank))| CatalogueEntry {
            width,
            height,
            refresh,
            bpp: 24,
            program: mode_program_blob(i),
            enable: mode_enable_blob(i),
            low_blank,
        })
        .collect()
}

/// Opaque per-mode programming blob. Real contents are hardware-fixed
/// register/timing streams (out of scope, spec.md 1); this is a
/// placeholder of the right shape (an index-tagged byte run) so the
/// mode-select wire trace is inspectable in tests.
fn mode_program_blob(index: usize) -> &'static [u8] {
    const BLOBS: [[u8; 6]; 35] = {
        let mut blobs = [[0u8; 6]; 35];
        let mut i = 0;
        while i < 35 {
            blobs[i] = [0xE0, i as u8, 0x00, 0x00, 0x00, 0x01];
            i += 1;
        }
        blobs
    };
    &BLOBS[index]
}

fn mode_enable_blob(index: usize) -> &'static [u8] {
    const BLOBS: [[u8; 3]; 35] = {
        let mut blobs = [[0u8; 3]; 35];
        let mut i = 0;
        while i < 35 {
            blobs[i] = [0xE1, i as u8, 0x00];
            i += 1;
        }
        blobs
    };
    &BLOBS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_35_entries_all_24bpp() {
        let cat = catalogue();
        assert_eq!(cat.len(), 35);
        assert!(cat.iter().all(|e| e.bpp == 24));
    }

    #[test]
    fn catalogue_hit_no_edid_matches_scenario() {
        let cat = catalogue();
        let exact = cat
            .iter()
            .position(|e| e.width == 1024 && e.height == 768 && e.refresh == 60);
        assert_eq!(exact, Some(21));

        let first_1024x768 = cat.iter().position(|e| e.width == 1024 && e.height == 768);
        assert_eq!(first_1024x768, Some(18));
    }

    #[test]
    fn dl120_modes_is_within_bounds() {
        assert!(DL120_MODES < catalogue().len());
    }
}
