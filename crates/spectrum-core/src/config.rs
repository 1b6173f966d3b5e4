//! Configuration for a game session.

/// Configuration for a round controller.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// RNG seed for reproducible draws. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
