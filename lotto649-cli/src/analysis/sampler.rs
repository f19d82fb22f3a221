use anyhow::{Result, bail};
use log::{debug, warn};
use rand::Rng;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;

use lotto649_db::models::{FrequencyEntry, PICK_COUNT};

pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

pub fn weights(frequency: &[FrequencyEntry]) -> Vec<u32> {
    frequency.iter().map(|f| f.weight()).collect()
}

/// Picks six distinct numbers with probability proportional to `count + 1`.
///
/// Each attempt draws over the whole pool and repeats are rejected. After
/// `max_attempts` draws the remaining slots are filled by sampling without
/// replacement, so the call always terminates. The result is sorted.
pub fn predict<R: Rng + ?Sized>(
    frequency: &[FrequencyEntry],
    max_attempts: usize,
    rng: &mut R,
) -> Result<[u8; PICK_COUNT]> {
    if frequency.len() < PICK_COUNT {
        bail!(
            "Need at least {} candidate numbers, got {}",
            PICK_COUNT,
            frequency.len()
        );
    }

    let dist = WeightedIndex::new(&weights(frequency))?;
    let mut selected: Vec<u8> = Vec::with_capacity(PICK_COUNT);
    let mut attempts = 0;

    while selected.len() < PICK_COUNT && attempts < max_attempts {
        attempts += 1;
        let number = frequency[dist.sample(rng)].number;
        if !selected.contains(&number) {
            selected.push(number);
        }
    }

    if selected.len() < PICK_COUNT {
        warn!(
            "{} weighted draws yielded only {} distinct numbers, filling the rest without replacement",
            attempts,
            selected.len()
        );
        fill_without_replacement(frequency, &mut selected, rng)?;
    }
    debug!("Prediction drawn in {} attempts", attempts);

    let mut numbers = [0u8; PICK_COUNT];
    numbers.copy_from_slice(&selected);
    numbers.sort();
    Ok(numbers)
}

fn fill_without_replacement<R: Rng + ?Sized>(
    frequency: &[FrequencyEntry],
    selected: &mut Vec<u8>,
    rng: &mut R,
) -> Result<()> {
    let mut available: Vec<(u8, u32)> = frequency
        .iter()
        .filter(|f| !selected.contains(&f.number))
        .map(|f| (f.number, f.weight()))
        .collect();

    while selected.len() < PICK_COUNT {
        let weights: Vec<u32> = available.iter().map(|(_, w)| *w).collect();
        let dist = WeightedIndex::new(&weights)?;
        let (number, _) = available.remove(dist.sample(rng));
        selected.push(number);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_frequency;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_valid(numbers: &[u8; PICK_COUNT]) {
        assert!(numbers.windows(2).all(|w| w[0] < w[1]), "not strictly ascending: {:?}", numbers);
        assert!(numbers.iter().all(|&n| (1..=49).contains(&n)), "out of range: {:?}", numbers);
    }

    #[test]
    fn test_weights_are_count_plus_one() {
        let freq = compute_frequency(&[[7, 7, 1, 2, 3, 4]]);
        let w = weights(&freq);
        assert_eq!(w.len(), 49);
        assert_eq!(w[6], 3);
        assert_eq!(w[0], 2);
        assert_eq!(w[48], 1);
    }

    #[test]
    fn test_prediction_is_six_distinct_sorted() {
        let freq = compute_frequency(&[[1, 2, 3, 4, 5, 6], [1, 2, 3, 4, 5, 6]]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let numbers = predict(&freq, DEFAULT_MAX_ATTEMPTS, &mut rng).unwrap();
            assert_valid(&numbers);
        }
    }

    #[test]
    fn test_fallback_without_attempts() {
        let freq = compute_frequency(&[]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let numbers = predict(&freq, 0, &mut rng).unwrap();
            assert_valid(&numbers);
        }
    }

    #[test]
    fn test_heavily_skewed_weights_still_terminate() {
        // One number dominates, so repeats are rejected most of the time.
        let draws: Vec<[u8; PICK_COUNT]> = vec![[9, 9, 9, 9, 9, 9]; 2000];
        let freq = compute_frequency(&draws);
        let mut rng = StdRng::seed_from_u64(3);
        let numbers = predict(&freq, 10, &mut rng).unwrap();
        assert_valid(&numbers);
        assert!(numbers.contains(&9));
    }

    #[test]
    fn test_empty_store_is_roughly_uniform() {
        let freq = compute_frequency(&[]);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 10_000;
        let mut hits = [0u32; 49];

        for _ in 0..trials {
            for n in predict(&freq, DEFAULT_MAX_ATTEMPTS, &mut rng).unwrap() {
                hits[(n - 1) as usize] += 1;
            }
        }

        let expected = (trials * PICK_COUNT) as f64 / 49.0;
        for (i, &h) in hits.iter().enumerate() {
            let ratio = h as f64 / expected;
            assert!(
                (0.8..1.2).contains(&ratio),
                "number {} drawn {} times, expected about {:.0}",
                i + 1,
                h,
                expected
            );
        }
    }

    #[test]
    fn test_frequent_number_is_favoured() {
        let draws: Vec<[u8; PICK_COUNT]> = (0..10).map(|i| [7, 10 + i, 20 + i, 30 + i, 40, 41]).collect();
        let freq = compute_frequency(&draws);
        let mut rng = StdRng::seed_from_u64(11);

        let mut seven = 0;
        let mut eight = 0;
        for _ in 0..2000 {
            let numbers = predict(&freq, DEFAULT_MAX_ATTEMPTS, &mut rng).unwrap();
            seven += numbers.contains(&7) as u32;
            eight += numbers.contains(&8) as u32;
        }
        assert!(seven > eight * 2, "7 drawn {seven} times, 8 drawn {eight} times");
    }

    #[test]
    fn test_seed_determinism() {
        let freq = compute_frequency(&[[3, 6, 9, 12, 15, 18]]);
        let a = predict(&freq, DEFAULT_MAX_ATTEMPTS, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = predict(&freq, DEFAULT_MAX_ATTEMPTS, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_small_pool_is_an_error() {
        let freq = compute_frequency(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(predict(&freq[..5], DEFAULT_MAX_ATTEMPTS, &mut rng).is_err());
    }
}
