use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDateTime};

/// Highest number that can be drawn; the pool is 1..=49.
pub const POOL_SIZE: u8 = 49;

/// Main numbers per draw and per prediction.
pub const PICK_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub date: NaiveDateTime,
    pub numbers: [u8; PICK_COUNT],
    pub bonus: u8,
}

/// Occurrences of one number across the main numbers of every recorded draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub number: u8,
    pub count: u32,
}

impl FrequencyEntry {
    /// Sampling weight, smoothed by one so an unseen number stays possible.
    pub fn weight(&self) -> u32 {
        self.count + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub date: DateTime<Local>,
    pub prediction: [u8; PICK_COUNT],
}

impl PredictionRecord {
    pub fn joined(&self) -> String {
        join_numbers(&self.prediction)
    }
}

pub fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn validate_number(n: i64) -> Result<u8> {
    if n < 1 || n > POOL_SIZE as i64 {
        bail!("Number {} out of range (1-{})", n, POOL_SIZE);
    }
    Ok(n as u8)
}

pub fn validate_draw(numbers: &[u8; PICK_COUNT], bonus: u8, reject_duplicates: bool) -> Result<()> {
    for &n in numbers {
        validate_number(n as i64)?;
    }
    validate_number(bonus as i64)?;
    if reject_duplicates {
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                if numbers[i] == numbers[j] {
                    bail!("Duplicate number: {}", numbers[i]);
                }
            }
        }
    }
    Ok(())
}
