//! Game state and core simulation types
//!
//! Everything the session mutates per frame lives here. Geometry is in
//! screen pixels with the origin at the bottom-left and y growing upward.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::{FlapAnimation, MoveThenRemove, RepeatTimer, ScrollLoop, Spin};
use super::geom::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// Entity id of the bird
pub const BIRD_ID: u32 = 0;
/// Entity id of the ground strip
pub const GROUND_ID: u32 = 1;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird is flying, world is scrolling
    Running,
    /// Bird hit something; world frozen until the next input
    GameOver,
}

/// A physics body taking part in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyRef {
    pub entity: u32,
    /// One of the `*_CATEGORY` bits
    pub category: u32,
}

impl BodyRef {
    pub const BIRD: BodyRef = BodyRef {
        entity: BIRD_ID,
        category: BIRD_CATEGORY,
    };

    pub const GROUND: BodyRef = BodyRef {
        entity: GROUND_ID,
        category: GROUND_CATEGORY,
    };

    pub fn wall(entity: u32) -> Self {
        Self {
            entity,
            category: WALL_CATEGORY,
        }
    }

    pub fn score_zone(entity: u32) -> Self {
        Self {
            entity,
            category: SCORE_CATEGORY,
        }
    }

    #[inline]
    pub fn is(&self, category: u32) -> bool {
        self.category & category != 0
    }
}

/// Two bodies that began touching this step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyRef,
    pub b: BodyRef,
}

/// Something the session or a front end may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A wall pair entered on the right
    Spawned { id: u32, gap_center: f32 },
    /// A wall pair finished crossing and was removed
    Removed { id: u32 },
    /// Upward impulse applied
    Flapped,
    /// Bird passed a wall pair
    Scored { score: u32 },
    /// Score beat the stored best
    NewBest { best: u32 },
    /// Bird hit a wall or the ground
    GameOver { score: u32 },
    /// New run started
    Restarted,
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    pub radius: f32,
    pub mass: f32,
    /// Categories the bird physically bounces off
    pub collision_mask: u32,
    /// Categories that report contacts with the bird
    pub contact_mask: u32,
    /// Animation speed (0 once the game-over spin has finished)
    pub speed: f32,
    /// Game-over spin in progress
    pub spin: Option<Spin>,
    pub wings: FlapAnimation,
}

impl Bird {
    pub fn new(settings: &Settings) -> Self {
        Self {
            pos: settings.bird_spawn(),
            vel: Vec2::ZERO,
            rotation: 0.0,
            radius: settings.bird_radius(),
            mass: settings.bird_mass,
            collision_mask: GROUND_CATEGORY | WALL_CATEGORY,
            contact_mask: GROUND_CATEGORY | WALL_CATEGORY,
            speed: 1.0,
            spin: None,
            wings: FlapAnimation::new(settings.flap_frame_time),
        }
    }

    /// Apply an instantaneous impulse
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.mass > 0.0 {
            self.vel += impulse / self.mass;
        }
    }

    /// Put the bird back at its start point, upright and at rest
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.collision_mask = GROUND_CATEGORY | WALL_CATEGORY;
        self.speed = 1.0;
        self.spin = None;
    }

    /// Advance wing frames and any spin; stops animating when the spin ends
    pub fn animate(&mut self, dt: f32) {
        let dt = dt * self.speed;
        self.wings.advance(dt);
        if let Some(spin) = self.spin.as_mut() {
            self.rotation += spin.advance(dt);
            if spin.is_done() {
                self.spin = None;
                self.speed = 0.0;
            }
        }
    }
}

/// A lower/upper wall pair with its trailing score zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallPair {
    pub id: u32,
    pub lower_id: u32,
    pub upper_id: u32,
    pub zone_id: u32,
    /// Centre x of the walls
    pub x: f32,
    /// Centre y of the slit
    pub gap_center: f32,
    pub gap_height: f32,
    pub wall_size: Vec2,
    /// Zone centre relative to the pair centre
    pub zone_offset: Vec2,
    pub zone_size: Vec2,
    pub motion: MoveThenRemove,
    /// Score zone already counted
    pub scored: bool,
}

impl WallPair {
    /// Wall whose top edge is the bottom of the slit
    pub fn lower_rect(&self) -> Rect {
        let y = self.gap_center - self.gap_height / 2.0 - self.wall_size.y / 2.0;
        Rect::new(Vec2::new(self.x, y), self.wall_size)
    }

    /// Wall whose bottom edge is the top of the slit
    pub fn upper_rect(&self) -> Rect {
        let y = self.gap_center + self.gap_height / 2.0 + self.wall_size.y / 2.0;
        Rect::new(Vec2::new(self.x, y), self.wall_size)
    }

    pub fn zone_rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x + self.zone_offset.x, self.zone_offset.y), self.zone_size)
    }

    /// Solid and trigger bodies in contact order
    pub fn bodies(&self) -> [(BodyRef, Rect); 3] {
        [
            (BodyRef::wall(self.lower_id), self.lower_rect()),
            (BodyRef::wall(self.upper_id), self.upper_rect()),
            (BodyRef::score_zone(self.zone_id), self.zone_rect()),
        ]
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Current phase
    pub phase: GamePhase,
    /// Score of the current run
    pub score: u32,
    /// Best score shown next to the run score
    pub best_score: u32,
    /// Global multiplier for everything on the scrolling layer
    pub scroll_speed: f32,
    pub bird: Bird,
    /// Live wall pairs (sorted by id)
    pub walls: Vec<WallPair>,
    pub ground: ScrollLoop,
    pub clouds: ScrollLoop,
    pub spawn_timer: RepeatTimer,
    /// (entity, entity) pairs touching after the last step
    pub touching: BTreeSet<(u32, u32)>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new running game
    pub fn new(settings: Settings) -> Self {
        Self {
            phase: GamePhase::Running,
            score: 0,
            best_score: 0,
            scroll_speed: 1.0,
            bird: Bird::new(&settings),
            walls: Vec::new(),
            ground: ScrollLoop::new(
                settings.ground_tile_width,
                settings.ground_scroll_period,
                settings.screen_width,
            ),
            clouds: ScrollLoop::new(
                settings.cloud_tile_width,
                settings.cloud_scroll_period,
                settings.screen_width,
            ),
            spawn_timer: RepeatTimer::new(settings.spawn_interval),
            touching: BTreeSet::new(),
            next_id: GROUND_ID + 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Solid ground strip (extends one tile past each screen edge)
    pub fn ground_rect(&self) -> Rect {
        let s = &self.settings;
        Rect::from_min_max(
            Vec2::new(-s.ground_tile_width, 0.0),
            Vec2::new(s.screen_width + s.ground_tile_width, s.ground_height),
        )
    }

    /// Build a wall pair at the spawn edge around `gap_center`
    pub fn make_wall_pair(&mut self, gap_center: f32) -> WallPair {
        let id = self.next_entity_id();
        let lower_id = self.next_entity_id();
        let upper_id = self.next_entity_id();
        let zone_id = self.next_entity_id();
        let s = &self.settings;
        WallPair {
            id,
            lower_id,
            upper_id,
            zone_id,
            x: s.wall_spawn_x(),
            gap_center,
            gap_height: s.gap_height(),
            wall_size: Vec2::new(s.wall_width, s.wall_height),
            zone_offset: Vec2::new(s.wall_width + s.bird_width / 2.0, s.screen_height / 2.0),
            zone_size: Vec2::new(s.wall_width, s.screen_height),
            motion: MoveThenRemove::new(Vec2::new(-s.wall_travel(), 0.0), s.scroll_duration),
            scored: false,
        }
    }

    /// Find the pair owning a body id
    pub fn wall_pair_of(&self, entity: u32) -> Option<usize> {
        self.walls
            .iter()
            .position(|w| w.lower_id == entity || w.upper_id == entity || w.zone_id == entity)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
