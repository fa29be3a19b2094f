//! Stack management: reset to the seed layers and append new layers

use glam::Vec3;

use super::block::{Axis, Block};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::BLOCK_HEIGHT;

/// Discard every block and lay the two seed layers.
///
/// The base sits at the origin; the first moving block starts one full block
/// width out on X and sweeps along X. `speed` is left as it stood, so the new
/// sweep keeps the last direction.
pub fn reset(session: &mut GameSession) {
    session.stack.clear();
    session.overhangs.clear();
    session.phase = GamePhase::Playing;
    session.emit(GameEvent::StackCleared);

    let size = session.box_size;
    add_layer(session, 0.0, 0.0, size, size, Axis::None);
    add_layer(session, -size, 0.0, size, size, Axis::X);

    log::debug!("Stack reset (box size {})", size);
}

/// Append a layer on top of the stack. Does nothing once the game is over.
pub fn add_layer(session: &mut GameSession, x: f32, z: f32, width: f32, depth: f32, axis: Axis) {
    if session.game_over() {
        return;
    }

    let id = session.next_block_id();
    let color = session.next_color();
    let y = session.height() as f32 * BLOCK_HEIGHT;
    let block = Block::new(id, Vec3::new(x, y, z), width, depth, axis).with_color(color);
    session.stack.push(block);
    session.emit(GameEvent::BlockAdded { id });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn session() -> GameSession {
        let mut session = GameSession::new(&Settings::default(), 42);
        reset(&mut session);
        session
    }

    #[test]
    fn test_reset_lays_two_seed_blocks() {
        let session = session();
        assert_eq!(session.height(), 2);
        assert_eq!(session.score(), 0);

        let base = &session.stack[0];
        assert_eq!(base.position, Vec3::ZERO);
        assert_eq!(base.axis, Axis::None);
        assert_eq!((base.width, base.depth), (3.0, 3.0));

        let mover = &session.stack[1];
        assert_eq!(mover.position, Vec3::new(-3.0, 1.0, 0.0));
        assert_eq!(mover.axis, Axis::X);
        assert_eq!((mover.width, mover.depth), (3.0, 3.0));
    }

    #[test]
    fn test_reset_emits_clear_then_adds() {
        let mut session = session();
        let events = session.drain_events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], GameEvent::StackCleared);
        assert!(matches!(events[1], GameEvent::BlockAdded { .. }));
        assert!(matches!(events[2], GameEvent::BlockAdded { .. }));
    }

    #[test]
    fn test_add_layer_uses_height_as_y() {
        let mut session = session();
        add_layer(&mut session, 0.5, -3.0, 2.5, 3.0, Axis::Z);
        let top = session.top().unwrap();
        assert_eq!(session.height(), 3);
        assert_eq!(top.position, Vec3::new(0.5, 2.0, -3.0));
        assert_eq!(top.axis, Axis::Z);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_add_layer_is_noop_after_game_over() {
        let mut session = session();
        session.phase = GamePhase::GameOver;
        session.drain_events();

        add_layer(&mut session, 0.0, 0.0, 3.0, 3.0, Axis::X);
        assert_eq!(session.height(), 2);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_reset_restores_playing_state() {
        let mut session = session();
        add_layer(&mut session, 0.0, 0.0, 1.0, 1.0, Axis::Z);
        session.phase = GamePhase::GameOver;
        session.speed = -0.04;

        reset(&mut session);
        assert_eq!(session.height(), 2);
        assert!(!session.game_over());
        assert!(session.overhangs.is_empty());
    }

    #[test]
    fn test_reset_keeps_speed_sign() {
        let mut session = session();
        session.speed = -0.04;
        session.phase = GamePhase::GameOver;

        reset(&mut session);
        assert_eq!(session.speed, -0.04);
    }
}
