//! Deterministic randomness.
//!
//! The engine never owns a mutable generator. Each roll derives a fresh seed
//! from the battle seed, a monotonically increasing nonce, the rolling
//! combatant and a [`RollContext`], then asks the stateless [`RngOracle`] for
//! one value. Replaying the same requests against the same seed therefore
//! reproduces every roll.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Uniform value in `[0, bound)`. Returns 0 for an empty range.
    fn below(&self, seed: u64, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32(seed) % bound
    }
}

/// PCG-XSH-RR: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Independent roll slots inside one resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Hit = 0,
    Critical = 1,
    Status = 2,
    Paralysis = 3,
    StartGauge = 4,
}

/// Mix the battle seed with per-roll entropy.
///
/// The constants are SplitMix64 / FxHash multipliers followed by a
/// MurmurHash3 finalizer.
pub fn compute_seed(battle_seed: u64, nonce: u64, actor: u32, context: u32) -> u64 {
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Seed plus nonce; every draw consumes one nonce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollStream {
    seed: u64,
    nonce: u64,
}

impl RollStream {
    pub fn new(seed: u64) -> Self {
        Self { seed, nonce: 0 }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, actor: u32, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, actor, context as u32);
        self.nonce += 1;
        seed
    }

    /// 1..=100.
    pub fn d100(&mut self, rng: &dyn RngOracle, actor: u32, context: RollContext) -> u32 {
        rng.roll_d100(self.next_seed(actor, context))
    }

    /// `[0, bound)`.
    pub fn below(
        &mut self,
        rng: &dyn RngOracle,
        actor: u32,
        context: RollContext,
        bound: u32,
    ) -> u32 {
        rng.below(self.next_seed(actor, context), bound)
    }
}
