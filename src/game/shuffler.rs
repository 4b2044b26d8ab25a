//! Seeded shuffling for the daily challenge.
//!
//! Every player on the same calendar day must see the same symbol set, so the
//! generator here is a fixed linear congruential recurrence rather than a
//! platform RNG whose algorithm may change between releases.

use chrono::NaiveDate;

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterministicShuffler {
    state: u64,
}

impl DeterministicShuffler {
    pub fn new(seed: i64) -> Self {
        Self { state: seed as u64 }
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(seed_for_date(date))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Value in `[0, bound)`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        // high bits of an LCG are far better distributed than the low ones
        ((self.next_u64() >> 32) * bound) >> 32
    }

    /// Fisher-Yates, walking from the back.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u64) as usize;
            slice.swap(i, j);
        }
    }
}

impl Iterator for DeterministicShuffler {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        Some(self.next_u64())
    }
}

/// Stable across runs and platforms: FNV-1a over the `YYYYMMDD` rendering of the date.
pub fn seed_for_date(date: NaiveDate) -> i64 {
    let formatted = date.format("%Y%m%d").to_string();
    formatted
        .bytes()
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        }) as i64
}
