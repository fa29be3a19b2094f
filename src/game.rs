//! Session controller
//!
//! Owns a [`GameSession`] and relays its events to the scene and the
//! game-over overlay. Score is always read from the session, never cached.
//! Pointer input either places a block (tap) or orbits the camera (drag).

use std::collections::HashMap;

use crate::camera::{DragGesture, OrbitControls};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::platform::{BlockHandle, FrameLoop, GameOverScreen, Scene};
use crate::settings::Settings;
use crate::sim::{self, Block, GameEvent, GameSession, Placement};

/// Game instance holding the session and its collaborators
pub struct Game<S: Scene, O: GameOverScreen> {
    session: GameSession,
    settings: Settings,
    scene: S,
    overlay: O,
    /// Block id -> scene visual, for stack blocks and overhangs alike
    handles: HashMap<u32, BlockHandle>,
    frame_loop: FrameLoop,
    accumulator: f32,
    orbit: OrbitControls,
    gesture: DragGesture,
}

impl<S: Scene, O: GameOverScreen> Game<S, O> {
    /// Build a game and lay the seed layers
    pub fn new(settings: Settings, seed: u64, scene: S, overlay: O) -> Self {
        let session = GameSession::new(&settings, seed);
        let orbit = OrbitControls::from_settings(&settings);
        let mut game = Self {
            session,
            settings,
            scene,
            overlay,
            handles: HashMap::new(),
            frame_loop: FrameLoop::default(),
            accumulator: 0.0,
            orbit,
            gesture: DragGesture::default(),
        };
        sim::reset(&mut game.session);
        game.flush_events();
        log::info!("Game initialized with seed: {}", seed);
        game
    }

    /// Player action: drop the moving block
    pub fn place(&mut self) -> Placement {
        let result = sim::place_block(&mut self.session);
        self.flush_events();
        result
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.gesture.press(x, y);
    }

    /// Orbit the camera while the pointer is held
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(delta) = self.gesture.move_to(x, y) {
            if self.gesture.is_dragging() {
                self.orbit.rotate(delta.x, delta.y);
            }
        }
    }

    /// A release that ends a tap places the block; one that ends a drag does not
    pub fn pointer_up(&mut self) -> Option<Placement> {
        if self.gesture.release() {
            Some(self.place())
        } else {
            None
        }
    }

    /// Dismiss the overlay and start a fresh session.
    ///
    /// The frame loop is left alone; it keeps reading the same session.
    pub fn restart(&mut self) {
        self.overlay.dismiss();
        sim::reset(&mut self.session);
        self.accumulator = 0.0;
        self.flush_events();
        log::info!("Game restarted");
    }

    /// Run simulation steps for `dt` seconds of wall time, then present
    pub fn frame(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        let mut view_moved = false;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim::step(&mut self.session, self.settings.overhang_gravity);
            view_moved |= self.orbit.update();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than catching up over several frames
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.flush_events();
        self.sync_moving();
        if view_moved {
            self.scene.set_eye(self.orbit.eye());
        }
        self.scene.render_frame();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.scene.resize(width, height);
    }

    /// Returns true exactly once; callers only schedule the loop when it does
    pub fn start_frame_loop(&mut self) -> bool {
        self.frame_loop.start()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn game_over(&self) -> bool {
        self.session.game_over()
    }

    /// Apply pending session events to the collaborators
    fn flush_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::StackCleared => {
                    for (_, handle) in self.handles.drain() {
                        self.scene.remove_block(handle);
                    }
                }
                GameEvent::BlockAdded { id } | GameEvent::OverhangAdded { id } => {
                    if let Some(block) = lookup(&self.session, id) {
                        let handle = self.scene.add_block(block);
                        self.handles.insert(id, handle);
                    }
                }
                GameEvent::BlockTrimmed { id } => {
                    if let (Some(block), Some(handle)) =
                        (lookup(&self.session, id), self.handles.get(&id))
                    {
                        self.scene.update_block(*handle, block);
                    }
                }
                GameEvent::OverhangRemoved { id } => {
                    if let Some(handle) = self.handles.remove(&id) {
                        self.scene.remove_block(handle);
                    }
                }
                GameEvent::GameOver { score } => {
                    self.overlay.show(score);
                }
            }
        }
    }

    /// Push positions of the sweeping block and falling fragments to the scene
    fn sync_moving(&mut self) {
        if let Some(top) = self.session.top() {
            if let Some(handle) = self.handles.get(&top.id) {
                self.scene.update_block(*handle, top);
            }
        }
        for overhang in &self.session.overhangs {
            if let Some(handle) = self.handles.get(&overhang.block.id) {
                self.scene.update_block(*handle, &overhang.block);
            }
        }
    }
}

/// Find a live block (stack first, newest first) by id
fn lookup(session: &GameSession, id: u32) -> Option<&Block> {
    session
        .stack
        .iter()
        .rev()
        .find(|b| b.id == id)
        .or_else(|| {
            session
                .overhangs
                .iter()
                .map(|o| &o.block)
                .find(|b| b.id == id)
        })
}
