//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, storage or platform dependencies

pub mod action;
pub mod collision;
pub mod geom;
pub mod random;
pub mod state;
pub mod tick;

pub use action::{FlapAnimation, MoveThenRemove, RepeatTimer, ScrollLoop, Spin};
pub use collision::{CollisionResult, circle_rect_collision, clip_velocity};
pub use geom::Rect;
pub use random::{ScriptedRandom, SpawnRandom, entropy_seed, seeded};
pub use state::{
    BIRD_ID, Bird, BodyRef, Contact, GROUND_ID, GameEvent, GamePhase, GameState, WallPair,
};
pub use tick::{
    StepResult, TickInput, advance, apply_input, flap, game_over, handle_contact, restart,
    spawn_wall_pair, tick,
};
