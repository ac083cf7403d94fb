//! All game entity types: plain data plus geometry helpers.
//!
//! Behaviour lives elsewhere: falling and landing in `physics`, autonomous
//! movement in `movers`, input handling in `player` and the per-frame
//! orchestration in `level`.

use serde::Deserialize;

/// Tolerance used by every geometric comparison so that a body snapped onto
/// a platform still counts as touching it.
pub const EPSILON: f64 = 1e-6;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }
}

/// Axis-aligned box in screen space (y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Box of `size` centred on `center`, the way sprites are drawn.
    pub fn centered(center: Point, size: Size) -> Self {
        Self {
            left: center.x - size.half_width(),
            top: center.y - size.half_height(),
            right: center.x + size.half_width(),
            bottom: center.y + size.half_height(),
        }
    }

    /// Inclusive overlap test: boxes that share an edge intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left <= other.right + EPSILON
            && other.left <= self.right + EPSILON
            && self.top <= other.bottom + EPSILON
            && other.top <= self.bottom + EPSILON
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left - EPSILON
            && point.x <= self.right + EPSILON
            && point.y >= self.top - EPSILON
            && point.y <= self.bottom + EPSILON
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, 1.0 for right.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Anything with a position and a sprite-sized bounding box.
pub trait Bounded {
    fn position(&self) -> Point;
    fn size(&self) -> Size;

    fn bounds(&self) -> Rect {
        Rect::centered(self.position(), self.size())
    }

    fn collides_with<T: Bounded>(&self, other: &T) -> bool
    where
        Self: Sized,
    {
        self.bounds().intersects(&other.bounds())
    }
}

macro_rules! impl_bounded {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Bounded for $ty {
                fn position(&self) -> Point {
                    self.position
                }

                fn size(&self) -> Size {
                    self.size
                }
            }
        )+
    };
}

// ── Gravity ───────────────────────────────────────────────────────────────────

/// Vertical motion state attached to every entity that falls.
#[derive(Clone, Debug, PartialEq)]
pub struct GravityBody {
    pub velocity_y: f64,
    /// Added to `velocity_y` once per unsupported frame.
    pub gravity: f64,
    /// Resting on a platform; gravity is skipped while set.
    pub supported: bool,
}

impl GravityBody {
    pub fn new(gravity: f64) -> Self {
        Self {
            velocity_y: 0.0,
            gravity,
            supported: false,
        }
    }
}

// ── Scenery ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    pub position: Point,
    pub size: Size,
}

impl Platform {
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }
}

/// A climbable zone. Ladders fall like everything else so they can settle
/// onto a platform when the level starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Ladder {
    pub position: Point,
    pub size: Size,
    pub body: GravityBody,
}

impl Ladder {
    pub fn new(position: Point, size: Size, gravity: f64) -> Self {
        Self {
            position,
            size,
            body: GravityBody::new(gravity),
        }
    }
}

// ── Hazards ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Barrel {
    pub position: Point,
    pub size: Size,
    pub body: GravityBody,
    pub destroyed: bool,
    /// One-shot latch set when the player crosses the barrel top mid-jump,
    /// cleared again once the jump is scored.
    pub jumped: bool,
}

impl Barrel {
    pub fn new(position: Point, size: Size, gravity: f64) -> Self {
        Self {
            position,
            size,
            body: GravityBody::new(gravity),
            destroyed: false,
            jumped: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn mark_jumped(&mut self) {
        self.jumped = true;
    }

    pub fn reset_jumped(&mut self) {
        self.jumped = false;
    }
}

/// The boss.
#[derive(Clone, Debug, PartialEq)]
pub struct Donkey {
    pub position: Point,
    pub size: Size,
    pub body: GravityBody,
    pub health: i32,
}

impl Donkey {
    pub fn new(position: Point, size: Size, gravity: f64, health: i32) -> Self {
        Self {
            position,
            size,
            body: GravityBody::new(gravity),
            health,
        }
    }

    pub fn reduce_health(&mut self, damage: i32) {
        self.health -= damage;
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MonkeyKind {
    Normal,
    /// Throws a banana every `shoot_interval` frames.
    Intelligent { shoot_timer: u32, shoot_interval: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monkey {
    pub position: Point,
    pub size: Size,
    pub body: GravityBody,
    pub kind: MonkeyKind,
    pub facing: Direction,
    pub alive: bool,
    /// Patrol legs, each the distance walked before turning round.
    pub route: Vec<f64>,
    pub route_index: usize,
    pub travelled: f64,
    pub speed: f64,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Thrown by intelligent monkeys; lethal to the player.
    Banana,
    /// Fired by the player's blaster.
    Bullet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub size: Size,
    pub kind: ProjectileKind,
    pub direction: Direction,
    pub speed: f64,
    pub max_range: f64,
    pub travelled: f64,
    pub active: bool,
}

// ── Collectables ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectableKind {
    Hammer,
    Blaster { bullets: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectable {
    pub position: Point,
    pub size: Size,
    pub kind: CollectableKind,
    pub collected: bool,
}

impl Collectable {
    pub fn hammer(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            kind: CollectableKind::Hammer,
            collected: false,
        }
    }

    pub fn blaster(position: Point, size: Size, bullets: u32) -> Self {
        Self {
            position,
            size,
            kind: CollectableKind::Blaster { bullets },
            collected: false,
        }
    }

    pub fn collect(&mut self) {
        self.collected = true;
    }
}

impl_bounded!(Platform, Ladder, Barrel, Donkey, Monkey, Projectile, Collectable);
