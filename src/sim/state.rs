//! Session state and core simulation types
//!
//! Everything a play-through needs lives in [`GameSession`]. The drivers in
//! `stack`, `oscillate` and `place` take it by `&mut` and report what changed
//! through [`GameEvent`]s.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::block::{Block, Overhang};
use crate::consts::SEED_LAYERS;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Top block sweeping, waiting for placement
    #[default]
    Playing,
    /// Last placement missed; only a restart leaves this phase
    GameOver,
}

/// Notifications for the session controller (scene and overlay updates)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// All blocks and fragments were discarded
    StackCleared,
    BlockAdded { id: u32 },
    /// Block footprint or position changed by a placement
    BlockTrimmed { id: u32 },
    OverhangAdded { id: u32 },
    OverhangRemoved { id: u32 },
    GameOver { score: u32 },
}

/// One play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Placed layers, bottom to top; the last one is the moving block
    pub stack: Vec<Block>,
    /// Discarded trim fragments
    pub overhangs: Vec<Overhang>,
    pub phase: GamePhase,
    /// Signed sweep step; magnitude is constant, sign flips at the bounds.
    /// Resets keep whatever sign it last had.
    pub speed: f32,
    /// Base footprint and sweep bound
    pub box_size: f32,
    /// Whether trims spawn overhang fragments
    pub spawn_overhangs: bool,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create an empty session. Call [`super::reset`] to lay the seed blocks.
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            stack: Vec::new(),
            overhangs: Vec::new(),
            phase: GamePhase::Playing,
            speed: settings.speed,
            box_size: settings.box_size,
            spawn_overhangs: settings.overhangs,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of layers, seeds included
    pub fn height(&self) -> usize {
        self.stack.len()
    }

    /// Layers placed by the player
    pub fn score(&self) -> u32 {
        self.height().saturating_sub(SEED_LAYERS) as u32
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn top(&self) -> Option<&Block> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Block> {
        self.stack.last_mut()
    }

    /// Allocate a new block ID
    pub fn next_block_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Random color, each channel drawn independently
    pub fn next_color(&mut self) -> [f32; 3] {
        [
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
            self.rng.random::<f32>(),
        ]
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
