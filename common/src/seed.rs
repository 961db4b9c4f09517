use std::{convert::Infallible, fmt, str::FromStr};

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{RngCore, SeedableRng, rngs::ThreadRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Config and wire value meaning "no shared seed, use system randomness".
pub const UNSEEDED: i64 = -1;

const MINTED_SEED_RANGE: u32 = 1_000_000_000;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seed {
    Unseeded,
    Fixed(String),
}

impl Seed {
    /// Mints a fresh shared seed: base64 text of a random integer below 10^9.
    pub fn generate() -> Self {
        let value = rand::random_range(0..MINTED_SEED_RANGE);
        Seed::Fixed(STANDARD.encode(value.to_string()))
    }

    pub fn is_unseeded(&self) -> bool {
        matches!(self, Seed::Unseeded)
    }

    /// Key of the reproducible stream, `None` for `Unseeded`.
    pub fn stream_key(&self) -> Option<u64> {
        match self {
            Seed::Unseeded => None,
            Seed::Fixed(text) => Some(fnv1a(text.as_bytes())),
        }
    }

    pub fn rng(&self) -> MazeRng {
        match self.stream_key() {
            Some(key) => MazeRng::Seeded(ChaCha8Rng::seed_from_u64(key)),
            None => MazeRng::System(rand::rng()),
        }
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        if value == UNSEEDED {
            Seed::Unseeded
        } else {
            Seed::Fixed(value.to_string())
        }
    }
}

impl From<&str> for Seed {
    fn from(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == UNSEEDED.to_string() {
            Seed::Unseeded
        } else {
            Seed::Fixed(trimmed.to_string())
        }
    }
}

impl FromStr for Seed {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Seed::from(input))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Unseeded => write!(f, "{}", UNSEEDED),
            Seed::Fixed(text) => f.write_str(text),
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Random stream a maze is carved with, fixed once at construction.
#[derive(Clone, Debug)]
pub enum MazeRng {
    Seeded(ChaCha8Rng),
    System(ThreadRng),
}

impl MazeRng {
    /// Maps a single `u32` draw onto `0..len` by multiply-shift. The stream
    /// consumption must not depend on the `rand` version, otherwise clients
    /// built against different releases would carve different mazes.
    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty set");
        ((u64::from(self.next_u32()) * len as u64) >> 32) as usize
    }
}

impl RngCore for MazeRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            MazeRng::Seeded(rng) => rng.next_u32(),
            MazeRng::System(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            MazeRng::Seeded(rng) => rng.next_u64(),
            MazeRng::System(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            MazeRng::Seeded(rng) => rng.fill_bytes(dst),
            MazeRng::System(rng) => rng.fill_bytes(dst),
        }
    }
}
