//! Fixed timestep simulation tick
//!
//! Core game loop: input, scrolling, spawning, bird physics, contact
//! detection and the contact rules (score or game over).

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::{circle_rect_collision, clip_velocity};
use super::random::SpawnRandom;
use super::state::{BIRD_ID, BodyRef, Contact, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/click/space: flap while running, restart after game over
    pub flap: bool,
}

/// Output of one world step
#[derive(Debug, Clone, Default)]
pub struct StepResult {
    /// Spawn/remove events
    pub events: Vec<GameEvent>,
    /// Contacts that began this step, in body order
    pub contacts: Vec<Contact>,
}

/// Advance the game state by one timestep, handling input and contacts
pub fn tick<R: SpawnRandom>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.flap {
        events.extend(apply_input(state));
    }

    let step = advance(state, dt, rng);
    events.extend(step.events);

    for contact in step.contacts {
        events.extend(handle_contact(state, contact.a, contact.b));
    }

    events
}

/// Single-button input: flap while running, restart after game over
pub fn apply_input(state: &mut GameState) -> Option<GameEvent> {
    match state.phase {
        GamePhase::Running => {
            flap(state);
            Some(GameEvent::Flapped)
        }
        GamePhase::GameOver => restart(state).then_some(GameEvent::Restarted),
    }
}

/// Zero the bird's velocity, then kick it upward
pub fn flap(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    let impulse = state.settings.flap_impulse;
    state.bird.vel = Vec2::ZERO;
    state.bird.apply_impulse(Vec2::new(0.0, impulse));
}

/// Start a new run; only valid after game over
pub fn restart(state: &mut GameState) -> bool {
    if state.phase != GamePhase::GameOver {
        return false;
    }

    state.score = 0;
    let spawn = state.settings.bird_spawn();
    state.bird.reset(spawn);
    state.walls.clear();
    state.touching.clear();
    state.scroll_speed = 1.0;
    state.phase = GamePhase::Running;
    true
}

/// Freeze the world and start the terminal spin
pub fn game_over(state: &mut GameState) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.phase = GamePhase::GameOver;
    state.scroll_speed = 0.0;

    let bird = &mut state.bird;
    bird.collision_mask = GROUND_CATEGORY;
    let angle = SPIN_PER_HEIGHT * bird.pos.y;
    bird.spin = Some(super::action::Spin::new(angle, state.settings.spin_duration));
}

/// Create one wall pair at the right edge with a random gap position
pub fn spawn_wall_pair<R: SpawnRandom>(state: &mut GameState, rng: &mut R) -> GameEvent {
    let draw = rng.below(state.settings.gap_random_range());
    let gap_center = state.settings.gap_center_min() + draw as f32;

    let pair = state.make_wall_pair(gap_center);
    let id = pair.id;
    state.walls.push(pair);

    GameEvent::Spawned { id, gap_center }
}

/// Step scrolling, spawning and bird physics; report new contacts
///
/// `dt` is clamped to `[0, MAX_FRAME_DT]`; non-finite deltas step nothing.
pub fn advance<R: SpawnRandom>(state: &mut GameState, dt: f32, rng: &mut R) -> StepResult {
    let mut result = StepResult::default();
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    };

    // Everything on the scrolling layer runs on scaled time
    let scroll_dt = dt * state.scroll_speed;

    let fired = state.spawn_timer.advance(scroll_dt);
    for _ in 0..fired {
        result.events.push(spawn_wall_pair(state, rng));
    }

    for pair in &mut state.walls {
        pair.x += pair.motion.advance(scroll_dt).x;
    }
    let touching = &mut state.touching;
    state.walls.retain(|pair| {
        if pair.motion.is_done() {
            result.events.push(GameEvent::Removed { id: pair.id });
            touching.retain(|&(_, b)| b != pair.lower_id && b != pair.upper_id && b != pair.zone_id);
            false
        } else {
            true
        }
    });

    state.ground.advance(scroll_dt);
    state.clouds.advance(scroll_dt);

    // Bird actions run on the bird's own speed
    state.bird.animate(dt);

    // Bird physics is never scaled
    let gravity = state.settings.gravity;
    let bird = &mut state.bird;
    bird.vel.y += gravity * dt;
    bird.pos += bird.vel * dt;

    result.contacts = resolve_bodies(state);
    result
}

/// Push the bird out of solid bodies and collect contacts that just began
fn resolve_bodies(state: &mut GameState) -> Vec<Contact> {
    let mut bodies = Vec::with_capacity(1 + state.walls.len() * 3);
    bodies.push((BodyRef::GROUND, state.ground_rect()));
    for pair in &state.walls {
        bodies.extend(pair.bodies());
    }

    let mut contacts = Vec::new();
    let mut now_touching = BTreeSet::new();
    let bird = &mut state.bird;

    for (body, rect) in bodies {
        let hit = circle_rect_collision(bird.pos, bird.radius, &rect);
        if !hit.hit {
            continue;
        }

        if bird.collision_mask & body.category != 0 {
            bird.pos += hit.normal * hit.penetration;
            bird.vel = clip_velocity(bird.vel, hit.normal);
        }

        if reports_contact(bird.contact_mask, body.category) {
            let key = (BIRD_ID, body.entity);
            if !state.touching.contains(&key) {
                contacts.push(Contact {
                    a: BodyRef::BIRD,
                    b: body,
                });
            }
            now_touching.insert(key);
        }
    }

    state.touching = now_touching;
    contacts
}

/// Contact filter: either side lists the other's category
fn reports_contact(bird_contact_mask: u32, category: u32) -> bool {
    let other_contact_mask = if category & SCORE_CATEGORY != 0 {
        BIRD_CATEGORY
    } else {
        0
    };
    bird_contact_mask & category != 0 || other_contact_mask & BIRD_CATEGORY != 0
}

/// Apply the contact rules for a pair of bodies that began touching
///
/// Ignored after game over. A score zone counts once per wall pair; a wall or
/// the ground ends the run.
pub fn handle_contact(state: &mut GameState, a: BodyRef, b: BodyRef) -> Option<GameEvent> {
    if !state.is_running() {
        return None;
    }

    let other = if a.is(BIRD_CATEGORY) {
        b
    } else if b.is(BIRD_CATEGORY) {
        a
    } else {
        return None;
    };

    if other.is(SCORE_CATEGORY) {
        // Zones of removed (or unknown) pairs never score
        let idx = state.wall_pair_of(other.entity)?;
        let pair = &mut state.walls[idx];
        if pair.scored {
            return None;
        }
        pair.scored = true;
        state.score += 1;
        return Some(GameEvent::Scored { score: state.score });
    }

    if other.is(GROUND_CATEGORY | WALL_CATEGORY) {
        game_over(state);
        return Some(GameEvent::GameOver { score: state.score });
    }

    None
}
