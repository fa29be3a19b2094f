//! Fixed-step motion: the sweeping top block and falling overhangs

use super::state::{GameEvent, GameSession};
use crate::consts::OVERHANG_FLOOR;

/// Advance the session by one fixed step
pub fn step(session: &mut GameSession, gravity: f32) {
    oscillate(session);
    advance_overhangs(session, gravity);
}

/// Move the top block one step along its axis, reversing at `±box_size`.
///
/// The bound is not clamped: the block may overshoot by at most one step
/// before turning around. Reversal only happens while heading outward, so a
/// block resting on the bound keeps its direction.
pub fn oscillate(session: &mut GameSession) {
    if session.game_over() {
        return;
    }

    let speed = session.speed;
    let bound = session.box_size;
    let Some(top) = session.top_mut() else {
        return;
    };
    let axis = top.axis;
    if !axis.is_moving() {
        return;
    }

    let coord = top.coord_mut(axis);
    *coord += speed;
    let pos = *coord;

    if (pos > bound && speed > 0.0) || (pos < -bound && speed < 0.0) {
        session.speed = -speed;
    }
}

/// Let overhang fragments fall and drop the ones that left the scene
pub fn advance_overhangs(session: &mut GameSession, gravity: f32) {
    for overhang in &mut session.overhangs {
        overhang.block.position.y -= overhang.fall_speed;
        overhang.fall_speed += gravity;
    }

    let mut removed = Vec::new();
    session.overhangs.retain(|o| {
        let keep = o.block.position.y >= OVERHANG_FLOOR;
        if !keep {
            removed.push(o.block.id);
        }
        keep
    });
    for id in removed {
        session.emit(GameEvent::OverhangRemoved { id });
    }
}
