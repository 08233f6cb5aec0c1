//! Process-wide zone-id and zone-offset caches.
//!
//! The zone-id cache is a `dashmap::DashMap` behind a `OnceLock`: lock-free
//! reads, last-writer-wins inserts, which is safe here because every value
//! mapped to a given key is canonical (the same zone identifier always
//! resolves to the same `Tz`). Keys own their bytes, copied out of the
//! reader's transient char buffer before insertion.

use std::sync::OnceLock;

use chrono::FixedOffset;
use chrono_tz::Tz;
use dashmap::DashMap;

use crate::error::{Position, ReaderError, SyntaxError};

static ZONE_ID_CACHE: OnceLock<DashMap<Box<[u8]>, Tz>> = OnceLock::new();

fn zone_id_cache() -> &'static DashMap<Box<[u8]>, Tz> {
    ZONE_ID_CACHE.get_or_init(DashMap::new)
}

/// Resolves an IANA zone identifier (e.g. `Europe/Kyiv`), populating the
/// process-wide cache on first lookup.
pub(crate) fn resolve_zone_id(name: &[u8], pos: Position) -> Result<Tz, ReaderError> {
    let cache = zone_id_cache();
    if let Some(tz) = cache.get(name) {
        return Ok(*tz);
    }
    let text =
        core::str::from_utf8(name).map_err(|_| ReaderError::syntax(SyntaxError::IllegalTimezone, pos, None))?;
    let tz: Tz = text
        .parse()
        .map_err(|_| ReaderError::syntax(SyntaxError::IllegalTimezone, pos, None))?;
    tracing::debug!(zone = text, "zone-id cache miss, resolved and cached");
    cache.insert(name.into(), tz);
    Ok(tz)
}

const QUARTER_HOUR_SECONDS: i32 = 900;
const QUARTER_HOUR_COUNT: usize = 145; // -18h..=+18h inclusive, in 15-minute steps.

static ZONE_OFFSET_CACHE: OnceLock<[FixedOffset; QUARTER_HOUR_COUNT]> = OnceLock::new();

fn zone_offset_cache() -> &'static [FixedOffset; QUARTER_HOUR_COUNT] {
    ZONE_OFFSET_CACHE.get_or_init(|| {
        std::array::from_fn(|i| {
            let quarter_hours = i as i32 - 72; // index 72 == offset 0.
            FixedOffset::east_opt(quarter_hours * QUARTER_HOUR_SECONDS)
                .expect("quarter-hour offsets are always within chrono's +/-86400s range")
        })
    })
}

/// Looks up a canonical [`FixedOffset`] instance for a whole-quarter-hour
/// offset given in total seconds; falls back to constructing a fresh one
/// for any offset that is not a multiple of 900 seconds (rare in practice,
/// per spec's "all common zones fall in this set").
pub(crate) fn offset_for_total_seconds(total_seconds: i32) -> Option<FixedOffset> {
    if total_seconds % QUARTER_HOUR_SECONDS == 0 {
        let index = total_seconds / QUARTER_HOUR_SECONDS + 72;
        if (0..QUARTER_HOUR_COUNT as i32).contains(&index) {
            return Some(zone_offset_cache()[index as usize]);
        }
    }
    FixedOffset::east_opt(total_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_and_caches_iana_zone() {
        let pos = Position::default();
        let tz1 = resolve_zone_id(b"Europe/Kyiv", pos).unwrap();
        let tz2 = resolve_zone_id(b"Europe/Kyiv", pos).unwrap();
        assert_eq!(tz1, tz2);
    }

    #[test]
    fn rejects_unknown_zone() {
        assert!(resolve_zone_id(b"Not/AZone", Position::default()).is_err());
    }

    #[test]
    fn quarter_hour_offset_cache_hits() {
        let offset = offset_for_total_seconds(2 * 3600).unwrap();
        assert_eq!(offset.local_minus_utc(), 7200);
    }

    #[test]
    fn negative_quarter_hour_offset() {
        let offset = offset_for_total_seconds(-5 * 3600 - 1800).unwrap();
        assert_eq!(offset.local_minus_utc(), -5 * 3600 - 1800);
    }
}
