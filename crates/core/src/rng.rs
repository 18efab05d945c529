//! Piece sources
//!
//! The engine asks its [`PieceSource`] for one shape per spawn. The default
//! source draws uniformly over the seven shapes from a small deterministic
//! LCG; a scripted source replays a fixed sequence for tests and replays.

use crate::types::PieceKind;

/// Supplies the next shape for the preview slot.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Generate random value in range [0, max).
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform random shapes from a seeded [`SimpleRng`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomPieces {
    rng: SimpleRng,
}

impl RandomPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomPieces {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::from_index(self.rng.next_range(PieceKind::ALL.len() as u32) as usize)
    }
}

/// Cycles through a fixed sequence of shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedPieces {
    sequence: Vec<PieceKind>,
    next: usize,
}

impl ScriptedPieces {
    /// Returns None for an empty sequence
    pub fn new(sequence: Vec<PieceKind>) -> Option<Self> {
        if sequence.is_empty() {
            return None;
        }
        Some(Self { sequence, next: 0 })
    }

    /// Parse a sequence such as `"IOTSZJL"` (case-insensitive, whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        let mut sequence = Vec::with_capacity(s.len());
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let mut buf = [0u8; 4];
            sequence.push(PieceKind::from_str(c.encode_utf8(&mut buf))?);
        }
        Self::new(sequence)
    }

    /// Number of shapes handed out so far
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl PieceSource for ScriptedPieces {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.sequence[self.next % self.sequence.len()];
        self.next += 1;
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_piece(&mut self) -> PieceKind {
        (**self).next_piece()
    }
}
