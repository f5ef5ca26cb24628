//! RNG module - deterministic piece generation
//!
//! [`PieceSource`] yields an endless, restartable stream of piece kinds under
//! one of three policies:
//!
//! - **Bag** (default): the "7-bag" used by modern games. Each bag holds one
//!   of each kind, shuffled, dealt out before the next bag is drawn. Any run of
//!   7 draws starting at a bag boundary contains every kind exactly once.
//! - **Uniform**: each draw is an independent unweighted pick of the 7 kinds.
//! - **Sequence**: a fixed script of kinds, repeated forever. Useful for
//!   reproducing a specific game in tests.
//!
//! Randomness comes from a small LCG so that the same seed always produces the
//! same game on every platform.

use crate::error::CoreError;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // The high bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Which policy a [`PieceSource`] draws with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Randomizer {
    Bag,
    Uniform,
    Sequence(Vec<PieceKind>),
}

impl Randomizer {
    /// Parse a policy name (`bag` or `uniform`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            "uniform" | "random" => Some(Randomizer::Uniform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Bag => "bag",
            Randomizer::Uniform => "uniform",
            Randomizer::Sequence(_) => "sequence",
        }
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Randomizer::Bag
    }
}

/// Endless, seeded stream of piece kinds
#[derive(Debug, Clone)]
pub struct PieceSource {
    randomizer: Randomizer,
    /// Seed the stream restarts from
    seed: u32,
    rng: SimpleRng,
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index into the current bag (bag policy) or the script (sequence policy)
    cursor: usize,
}

impl PieceSource {
    /// Create a source with the given policy and seed.
    ///
    /// Fails only for an empty `Randomizer::Sequence`.
    pub fn new(randomizer: Randomizer, seed: u32) -> Result<Self, CoreError> {
        if let Randomizer::Sequence(kinds) = &randomizer {
            if kinds.is_empty() {
                return Err(CoreError::EmptySequence);
            }
        }
        Ok(Self::from_parts(randomizer, seed))
    }

    /// 7-bag source
    pub fn bag(seed: u32) -> Self {
        Self::from_parts(Randomizer::Bag, seed)
    }

    /// Unweighted independent picks
    pub fn uniform(seed: u32) -> Self {
        Self::from_parts(Randomizer::Uniform, seed)
    }

    /// Scripted source repeating `kinds` forever
    pub fn sequence(kinds: &[PieceKind]) -> Result<Self, CoreError> {
        Self::new(Randomizer::Sequence(kinds.to_vec()), 0)
    }

    fn from_parts(randomizer: Randomizer, seed: u32) -> Self {
        let mut source = Self {
            randomizer,
            seed,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            cursor: 0,
        };
        source.restart();
        source
    }

    /// Replay the stream from its seed.
    pub fn restart(&mut self) {
        self.rng = SimpleRng::new(self.seed);
        self.cursor = 0;
        if self.randomizer == Randomizer::Bag {
            self.refill_bag();
        }
    }

    /// Switch to a new seed and restart from it.
    ///
    /// A sequence source has no randomness; it just restarts its script.
    pub fn reseed(&mut self, seed: u32) {
        self.seed = seed;
        self.restart();
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.cursor = 0;
    }

    /// Draw the next piece from the stream
    pub fn next(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Bag => {
                if self.cursor >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.cursor];
                self.cursor += 1;
                piece
            }
            Randomizer::Uniform => {
                PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            Randomizer::Sequence(ref kinds) => {
                let len = kinds.len();
                let piece = kinds[self.cursor % len];
                self.cursor = (self.cursor + 1) % len;
                piece
            }
        }
    }

    /// Peek at the next piece without consuming it
    pub fn peek(&self) -> PieceKind {
        self.clone().next()
    }

    /// The seed the stream restarts from
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::bag(1)
    }
}
