//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod block;
pub mod oscillate;
pub mod place;
pub mod stack;
pub mod state;

pub use block::{Axis, Block, Overhang};
pub use oscillate::{advance_overhangs, oscillate, step};
pub use place::{Placement, overlap, place_block};
pub use stack::{add_layer, reset};
pub use state::{GameEvent, GamePhase, GameSession};
