//! Non-repeating random picker
//!
//! Picks uniformly from a fixed option list, never returning the previous
//! pick twice in a row when more than one option exists. Used for draw
//! phases and suspense styles. History lives in the picker, so each owner
//! has its own and clears it on reset.

use rand::Rng;
use rand::seq::IndexedRandom;

#[derive(Debug, Clone)]
pub struct NonRepeatingPicker<T> {
    options: Vec<T>,
    previous: Option<T>,
}

impl<T: Copy + PartialEq> NonRepeatingPicker<T> {
    pub fn new(options: impl IntoIterator<Item = T>) -> Self {
        Self {
            options: options.into_iter().collect(),
            previous: None,
        }
    }

    /// Next pick; `None` only when there are no options
    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> Option<T> {
        let pool: Vec<T> = match self.previous {
            Some(prev) if self.options.len() > 1 => self
                .options
                .iter()
                .copied()
                .filter(|o| *o != prev)
                .collect(),
            _ => self.options.clone(),
        };

        let choice = *pool.choose(rng)?;
        self.previous = Some(choice);
        Some(choice)
    }

    pub fn previous(&self) -> Option<T> {
        self.previous
    }

    /// Forget the history
    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_stage::PhaseType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_never_repeats() {
        let mut picker = NonRepeatingPicker::new(PhaseType::ALL);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let mut last = picker.pick(&mut rng).unwrap();
        for _ in 0..500 {
            let next = picker.pick(&mut rng).unwrap();
            assert_ne!(next, last);
            last = next;
        }
    }

    #[test]
    fn test_uses_every_option() {
        let mut picker = NonRepeatingPicker::new(PhaseType::ALL);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let seen: std::collections::HashSet<_> =
            (0..100).filter_map(|_| picker.pick(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_single_option_repeats() {
        let mut picker = NonRepeatingPicker::new([PhaseType::Radar]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(picker.pick(&mut rng), Some(PhaseType::Radar));
        assert_eq!(picker.pick(&mut rng), Some(PhaseType::Radar));
    }

    #[test]
    fn test_empty_and_reset() {
        let mut empty: NonRepeatingPicker<PhaseType> = NonRepeatingPicker::new([]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(empty.pick(&mut rng), None);

        let mut picker = NonRepeatingPicker::new(PhaseType::ALL);
        picker.pick(&mut rng);
        assert!(picker.previous().is_some());
        picker.reset();
        assert!(picker.previous().is_none());
    }
}
