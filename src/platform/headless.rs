//! Headless collaborators for the native demo and tests

use std::collections::BTreeMap;

use glam::Vec3;

use super::{BlockHandle, GameOverScreen, Scene};
use crate::sim::Block;

/// Scene that keeps block copies in memory and logs instead of drawing
#[derive(Debug, Default)]
pub struct HeadlessScene {
    pub blocks: BTreeMap<BlockHandle, Block>,
    pub frames: u64,
    pub size: (u32, u32),
    /// Last eye position pushed by the orbit controls
    pub eye: Option<Vec3>,
    next_handle: u32,
}

impl HeadlessScene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Scene for HeadlessScene {
    fn add_block(&mut self, block: &Block) -> BlockHandle {
        self.next_handle += 1;
        let handle = BlockHandle(self.next_handle);
        self.blocks.insert(handle, block.clone());
        log::trace!("Scene add {:?} for block {}", handle, block.id);
        handle
    }

    fn update_block(&mut self, handle: BlockHandle, block: &Block) {
        if let Some(slot) = self.blocks.get_mut(&handle) {
            *slot = block.clone();
        }
    }

    fn remove_block(&mut self, handle: BlockHandle) {
        self.blocks.remove(&handle);
    }

    fn render_frame(&mut self) {
        self.frames += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_eye(&mut self, eye: Vec3) {
        self.eye = Some(eye);
    }
}

/// Overlay that records what it was asked to show
#[derive(Debug, Default)]
pub struct HeadlessOverlay {
    pub shown: Option<u32>,
    pub show_count: u32,
}

impl GameOverScreen for HeadlessOverlay {
    fn show(&mut self, score: u32) {
        log::info!("Game Over! Score: {}", score);
        self.shown = Some(score);
        self.show_count += 1;
    }

    fn dismiss(&mut self) {
        self.shown = None;
    }
}
