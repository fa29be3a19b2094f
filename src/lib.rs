//! Stack Tower - A 3D block-stacking arcade game
//!
//! Core modules:
//! - `sim`: Gameplay simulation (stack, oscillation, placement, session state)
//! - `camera`: Perspective camera and damped orbit controls
//! - `game`: Session controller wiring the simulation to its collaborators
//! - `platform`: Scene / game-over collaborator contracts and the frame loop guard
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Data-driven gameplay and camera configuration

pub mod camera;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Seed layers placed by every reset (never scored)
    pub const SEED_LAYERS: usize = 2;
    /// Vertical size of one layer
    pub const BLOCK_HEIGHT: f32 = 1.0;

    /// Overhang fragments below this height are discarded
    pub const OVERHANG_FLOOR: f32 = -30.0;
}
