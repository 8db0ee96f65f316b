//! Ticket Selector: stratified sampling with duplicate avoidance
//!
//! The ticket range is cut into one contiguous segment per prize. The draw
//! at index `i` samples segment `i`, which spreads winners over the whole
//! range instead of letting them cluster. The last segment absorbs the
//! remainder so every ticket belongs to exactly one segment.
//!
//! Segment choice follows draw order, not prize number. Under descending
//! prize order the first draw (labelled with the highest prize number)
//! samples the lowest segment. This coupling is the observed contract and
//! is kept as is.
//!
//! `minGap` is not consulted here: two winners may be adjacent tickets even
//! when a gap is configured.

use std::collections::HashSet;

use ld_core::{DrawSettings, LdError, LdResult};
use rand::Rng;

/// Contiguous, inclusive sub-range of the ticket pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: u32,
    pub end: u32,
}

impl Segment {
    /// The whole configured range
    pub fn full(settings: &DrawSettings) -> Self {
        Self {
            start: settings.ticket_start,
            end: settings.ticket_end,
        }
    }

    /// Segment sampled by the draw at `draw_index`.
    ///
    /// `None` when the index is past the last prize, when the settings are
    /// invalid, or when there are more prizes than tickets and this is not
    /// the last segment (segments are then empty).
    pub fn for_draw(settings: &DrawSettings, draw_index: usize) -> Option<Self> {
        settings.validate().ok()?;

        let prizes = u64::from(settings.number_of_prizes);
        let index = u64::try_from(draw_index).ok()?;
        if index >= prizes {
            return None;
        }

        let size = settings.total_tickets() / prizes;
        let start = u64::from(settings.ticket_start) + index * size;
        let end = if index == prizes - 1 {
            u64::from(settings.ticket_end)
        } else if size == 0 {
            return None;
        } else {
            start + size - 1
        };

        Some(Self {
            start: u32::try_from(start).ok()?,
            end: u32::try_from(end).ok()?,
        })
    }

    pub fn len(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, ticket: u32) -> bool {
        (self.start..=self.end).contains(&ticket)
    }
}

/// Pick one ticket for the draw at `draw_index`.
///
/// Samples uniformly among the unawarded tickets of the draw's segment; if
/// that segment has none left, samples uniformly among every unawarded
/// ticket in the range. `awarded` is ignored when duplicates are allowed.
///
/// Fails with `PoolExhausted` when no unawarded ticket remains anywhere.
pub fn select_ticket<R: Rng>(
    settings: &DrawSettings,
    awarded: &HashSet<u32>,
    draw_index: usize,
    rng: &mut R,
) -> LdResult<u32> {
    settings.validate()?;
    let exclude = !settings.allow_duplicates;

    if let Some(segment) = Segment::for_draw(settings, draw_index)
        && let Some(ticket) = pick_free(segment, awarded, exclude, rng)
    {
        return Ok(ticket);
    }

    log::debug!(
        "Segment for draw {} exhausted, falling back to the full range",
        draw_index
    );

    pick_free(Segment::full(settings), awarded, exclude, rng).ok_or(LdError::PoolExhausted {
        start: settings.ticket_start,
        end: settings.ticket_end,
    })
}

/// Uniform pick among the tickets of `segment` not in `awarded`.
///
/// Draws a rank among the free tickets, then walks the sorted awarded
/// tickets inside the segment to turn the rank into a ticket number, so the
/// segment itself is never materialised.
fn pick_free<R: Rng>(
    segment: Segment,
    awarded: &HashSet<u32>,
    exclude: bool,
    rng: &mut R,
) -> Option<u32> {
    if segment.is_empty() {
        return None;
    }

    let mut taken: Vec<u32> = if exclude {
        awarded
            .iter()
            .copied()
            .filter(|t| segment.contains(*t))
            .collect()
    } else {
        Vec::new()
    };
    taken.sort_unstable();

    let free = segment.len() - taken.len() as u64;
    if free == 0 {
        return None;
    }

    let mut ticket = u64::from(segment.start) + rng.random_range(0..free);
    for t in taken {
        if u64::from(t) <= ticket {
            ticket += 1;
        } else {
            break;
        }
    }
    u32::try_from(ticket).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_segments_cover_range() {
        let settings = DrawSettings::with_range(1, 503, 5);
        let segments: Vec<_> = (0..5)
            .map(|i| Segment::for_draw(&settings, i).unwrap())
            .collect();

        assert_eq!(segments[0], Segment { start: 1, end: 100 });
        assert_eq!(segments[1], Segment { start: 101, end: 200 });
        // Last segment absorbs the remainder
        assert_eq!(segments[4], Segment { start: 401, end: 503 });
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
        assert!(Segment::for_draw(&settings, 5).is_none());
    }

    #[test]
    fn test_more_prizes_than_tickets() {
        let settings = DrawSettings::with_range(1, 3, 5);
        assert!(Segment::for_draw(&settings, 0).is_none());
        assert_eq!(
            Segment::for_draw(&settings, 4),
            Some(Segment { start: 1, end: 3 })
        );

        // Empty segment falls back to the full range
        let ticket = select_ticket(&settings, &HashSet::new(), 0, &mut rng(1)).unwrap();
        assert!(settings.contains(ticket));
    }

    #[test]
    fn test_ticket_within_segment() {
        let settings = DrawSettings::with_range(1, 1000, 4);
        for seed in 0..50 {
            for index in 0..4 {
                let segment = Segment::for_draw(&settings, index).unwrap();
                let ticket =
                    select_ticket(&settings, &HashSet::new(), index, &mut rng(seed)).unwrap();
                assert!(segment.contains(ticket), "{} not in {:?}", ticket, segment);
            }
        }
    }

    #[test]
    fn test_skips_awarded_tickets() {
        let settings = DrawSettings::with_range(1, 10, 2);
        let awarded: HashSet<u32> = [1, 2, 3, 4].into_iter().collect();
        for seed in 0..50 {
            let ticket = select_ticket(&settings, &awarded, 0, &mut rng(seed)).unwrap();
            assert_eq!(ticket, 5);
        }
    }

    #[test]
    fn test_rank_select_reaches_every_free_ticket() {
        let settings = DrawSettings::with_range(1, 6, 1);
        let awarded: HashSet<u32> = [2, 5].into_iter().collect();
        let mut seen = HashSet::new();
        let mut r = rng(7);
        for _ in 0..400 {
            seen.insert(select_ticket(&settings, &awarded, 0, &mut r).unwrap());
        }
        let expected: HashSet<u32> = [1, 3, 4, 6].into_iter().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_fallback_to_other_segment() {
        let settings = DrawSettings::with_range(1, 10, 2);
        let awarded: HashSet<u32> = (1..=5).collect();
        for seed in 0..50 {
            let ticket = select_ticket(&settings, &awarded, 0, &mut rng(seed)).unwrap();
            assert!((6..=10).contains(&ticket));
        }
    }

    #[test]
    fn test_pool_exhausted() {
        let settings = DrawSettings::with_range(1, 3, 3);
        let awarded: HashSet<u32> = [1, 2, 3].into_iter().collect();
        let result = select_ticket(&settings, &awarded, 1, &mut rng(0));
        assert!(matches!(
            result,
            Err(LdError::PoolExhausted { start: 1, end: 3 })
        ));
    }

    #[test]
    fn test_duplicates_allowed_ignores_awarded() {
        let mut settings = DrawSettings::with_range(1, 2, 2);
        settings.allow_duplicates = true;
        let awarded: HashSet<u32> = [1, 2].into_iter().collect();
        let ticket = select_ticket(&settings, &awarded, 0, &mut rng(3)).unwrap();
        assert_eq!(ticket, 1);
    }

    #[test]
    fn test_min_gap_not_enforced() {
        let mut settings = DrawSettings::with_range(1, 2, 1);
        settings.min_gap = 100;
        let awarded: HashSet<u32> = [1].into_iter().collect();
        // Ticket 2 is adjacent to the awarded ticket 1 and still chosen
        assert_eq!(select_ticket(&settings, &awarded, 0, &mut rng(0)).unwrap(), 2);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = DrawSettings::with_range(5, 1, 1);
        assert!(matches!(
            select_ticket(&settings, &HashSet::new(), 0, &mut rng(0)),
            Err(LdError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_deterministic_for_seed() {
        let settings = DrawSettings::default();
        let a = select_ticket(&settings, &HashSet::new(), 2, &mut rng(42)).unwrap();
        let b = select_ticket(&settings, &HashSet::new(), 2, &mut rng(42)).unwrap();
        assert_eq!(a, b);
    }
}
