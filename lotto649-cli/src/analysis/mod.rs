pub mod sampler;

use lotto649_db::models::{FrequencyEntry, PICK_COUNT, POOL_SIZE};

/// Counts every main number across `draws`, one entry per number 1..=49 in
/// ascending order. Numbers outside the pool are ignored.
pub fn compute_frequency(draws: &[[u8; PICK_COUNT]]) -> Vec<FrequencyEntry> {
    let mut counts = vec![0u32; POOL_SIZE as usize];

    for numbers in draws {
        for &n in numbers {
            if let Some(idx) = (n as usize).checked_sub(1) {
                if idx < counts.len() {
                    counts[idx] += 1;
                }
            }
        }
    }

    (1..=POOL_SIZE)
        .map(|n| FrequencyEntry {
            number: n,
            count: counts[(n - 1) as usize],
        })
        .collect()
}
