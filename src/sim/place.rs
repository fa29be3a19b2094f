//! Placement resolution
//!
//! Trims the moving block to its overlap with the block below and spawns the
//! next layer on the other axis, or ends the session on a miss.

use super::block::{Axis, Block, Overhang};
use super::stack::add_layer;
use super::state::{GameEvent, GamePhase, GameSession};

/// Outcome of a placement action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Action rejected (game over, or a stack too short to resolve)
    Ignored,
    /// Block trimmed to `overlap` and the next layer spawned
    Placed { overlap: f32 },
    /// No overlap; the session is over
    Missed { score: u32 },
}

/// Offset of `top` from `below` along `axis`, and their shared extent.
///
/// The overlap is non-positive when the blocks do not touch.
pub fn overlap(top: &Block, below: &Block, axis: Axis) -> (f32, f32) {
    let delta = top.coord(axis) - below.coord(axis);
    (delta, below.extent(axis) - delta.abs())
}

/// Resolve a player placement against the current stack
pub fn place_block(session: &mut GameSession) -> Placement {
    if session.game_over() {
        return Placement::Ignored;
    }

    let len = session.stack.len();
    if len < 2 {
        log::warn!("Placement ignored: stack has {} block(s)", len);
        return Placement::Ignored;
    }

    let axis = session.stack[len - 1].axis.resolved();
    let (delta, overlap) = overlap(&session.stack[len - 1], &session.stack[len - 2], axis);

    if overlap <= 0.0 {
        let score = session.score();
        session.phase = GamePhase::GameOver;
        session.emit(GameEvent::GameOver { score });
        log::info!("Game over: missed by {:.3}, score {}", -overlap, score);
        return Placement::Missed { score };
    }

    let fragment = if session.spawn_overhangs {
        let id = session.next_block_id();
        cut_overhang(&session.stack[len - 1], id, axis, delta, overlap)
    } else {
        None
    };

    let top = &mut session.stack[len - 1];
    top.set_extent(axis, overlap);
    *top.coord_mut(axis) -= delta / 2.0;
    let top_id = top.id;
    let (width, depth) = (top.width, top.depth);
    let next = top.coord(axis);
    let (x, z) = match axis {
        Axis::Z => (-session.box_size, next),
        _ => (next, -session.box_size),
    };

    session.emit(GameEvent::BlockTrimmed { id: top_id });
    if let Some(fragment) = fragment {
        let id = fragment.id;
        session.overhangs.push(Overhang::new(fragment));
        session.emit(GameEvent::OverhangAdded { id });
    }

    add_layer(session, x, z, width, depth, axis.other());
    log::debug!(
        "Placed layer {} (overlap {:.3} on {:?})",
        session.height() - 1,
        overlap,
        axis
    );

    Placement::Placed { overlap }
}

/// Piece of `top` outside the overlap region, before `top` is trimmed
fn cut_overhang(top: &Block, id: u32, axis: Axis, delta: f32, overlap: f32) -> Option<Block> {
    let cut = top.extent(axis) - overlap;
    if cut <= 0.0 {
        return None;
    }

    let kept_center = top.coord(axis) - delta / 2.0;
    let mut fragment = top.clone();
    fragment.id = id;
    fragment.axis = Axis::None;
    fragment.set_extent(axis, cut);
    *fragment.coord_mut(axis) = kept_center + delta.signum() * (overlap + cut) / 2.0;
    Some(fragment)
}
