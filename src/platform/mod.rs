//! Platform abstraction layer
//!
//! Contracts for the collaborators the gameplay core drives but does not own:
//! - `Scene`: block visuals and frame presentation
//! - `GameOverScreen`: the end-of-session overlay
//! - `FrameLoop`: start-once guard for the display refresh loop

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::{HeadlessOverlay, HeadlessScene};

use glam::Vec3;

use crate::sim::Block;

/// Scene-side identifier of a block visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockHandle(pub u32);

/// Rendering collaborator
pub trait Scene {
    /// Create a visual for `block`
    fn add_block(&mut self, block: &Block) -> BlockHandle;
    /// Refresh a visual after its block moved or was trimmed
    fn update_block(&mut self, handle: BlockHandle, block: &Block);
    fn remove_block(&mut self, handle: BlockHandle);
    /// Present the current scene
    fn render_frame(&mut self);
    /// Match the output to a new viewport size
    fn resize(&mut self, width: u32, height: u32);
    /// Move the camera eye; the look-at target stays put
    fn set_eye(&mut self, eye: Vec3);
}

/// Game-over presentation collaborator.
///
/// `show` must surface a restart control bound to [`crate::Game::restart`].
pub trait GameOverScreen {
    fn show(&mut self, score: u32);
    fn dismiss(&mut self);
}

/// Guards the display refresh loop against being started twice
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
}

impl FrameLoop {
    /// Returns true only for the call that actually starts the loop
    pub fn start(&mut self) -> bool {
        if self.running {
            log::warn!("Frame loop already running");
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
