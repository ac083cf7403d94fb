//! Autonomous movers: projectiles, monkey patrols and the intelligent
//! monkey's banana timer.

use tracing::debug;

use crate::config::{MonkeySpawn, ProjectileTuning};
use crate::entities::{
    Bounded, Direction, GravityBody, Monkey, MonkeyKind, Platform, Point, Projectile,
    ProjectileKind, Size, EPSILON,
};
use crate::physics;

// ── Projectiles ───────────────────────────────────────────────────────────────

impl Projectile {
    pub fn new(
        kind: ProjectileKind,
        position: Point,
        direction: Direction,
        size: Size,
        tuning: &ProjectileTuning,
    ) -> Self {
        Self {
            position,
            size,
            kind,
            direction,
            speed: tuning.speed,
            max_range: tuning.max_range,
            travelled: 0.0,
            active: true,
        }
    }

    /// Moves one step along the locked direction. Deactivates on the frame
    /// the travelled distance reaches the maximum range.
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.position.x += self.direction.sign() * self.speed;
        self.travelled += self.speed;
        if self.travelled >= self.max_range - EPSILON {
            self.active = false;
        }
    }

    pub fn expire_on_platforms(&mut self, platforms: &[Platform]) {
        if self.active && platforms.iter().any(|p| physics::collides(&*self, p)) {
            self.active = false;
        }
    }

    /// Deactivates once the centre leaves the playable strip
    /// `[half width, screen width - half width]`.
    pub fn expire_at_screen_edge(&mut self, screen_width: f64) {
        let half = self.size.half_width();
        if self.position.x < half || self.position.x > screen_width - half {
            self.active = false;
        }
    }
}

// ── Monkeys ───────────────────────────────────────────────────────────────────

impl Monkey {
    /// Builds a patrolling monkey. Routes are checked by
    /// `MonkeySpawn::validate` before a level is constructed.
    pub fn new(spawn: &MonkeySpawn, kind: MonkeyKind, size: Size, gravity: f64, speed: f64) -> Self {
        assert!(!spawn.route.is_empty(), "monkey route must have at least one segment");
        Self {
            position: spawn.position,
            size,
            body: GravityBody::new(gravity),
            kind,
            facing: spawn.facing,
            alive: true,
            route: spawn.route.clone(),
            route_index: 0,
            travelled: 0.0,
            speed,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn is_intelligent(&self) -> bool {
        matches!(self.kind, MonkeyKind::Intelligent { .. })
    }

    /// Falls, lands, then walks one patrol step. Dead monkeys stay frozen.
    pub fn update(&mut self, platforms: &[Platform], screen_width: f64) {
        if !self.alive {
            return;
        }
        physics::settle(&mut self.position, self.size, &mut self.body, platforms);
        self.patrol(platforms, screen_width);
        if let MonkeyKind::Intelligent { shoot_timer, .. } = &mut self.kind {
            *shoot_timer += 1;
        }
    }

    /// Walks one step and turns round when the current leg is done, the
    /// platform edge is reached or the screen edge is reached.
    ///
    /// Returns whether the monkey turned this frame.
    pub fn patrol(&mut self, platforms: &[Platform], screen_width: f64) -> bool {
        self.position.x += self.facing.sign() * self.speed;
        self.travelled += self.speed;

        let leg_done = self.travelled >= self.route[self.route_index] - EPSILON;
        let at_platform_edge = self.reached_platform_edge(platforms);
        let at_screen_edge = self.clamp_to_screen(screen_width);

        if leg_done || at_platform_edge || at_screen_edge {
            self.travelled = 0.0;
            self.facing = self.facing.reversed();
            self.route_index = (self.route_index + 1) % self.route.len();
            return true;
        }
        false
    }

    /// True when the leading edge has reached the end of the platform the
    /// monkey is standing on.
    fn reached_platform_edge(&self, platforms: &[Platform]) -> bool {
        let bounds = self.bounds();
        platforms
            .iter()
            .map(Bounded::bounds)
            .filter(|p| {
                (bounds.bottom - p.top).abs() <= EPSILON
                    && self.position.x >= p.left - EPSILON
                    && self.position.x <= p.right + EPSILON
            })
            .any(|p| match self.facing {
                Direction::Right => bounds.right >= p.right - EPSILON,
                Direction::Left => bounds.left <= p.left + EPSILON,
            })
    }

    fn clamp_to_screen(&mut self, screen_width: f64) -> bool {
        let half = self.size.half_width();
        if self.position.x < half {
            self.position.x = half;
            return true;
        }
        if self.position.x > screen_width - half {
            self.position.x = screen_width - half;
            return true;
        }
        false
    }

    /// Polled once per frame. Intelligent monkeys throw a banana from their
    /// centre every `shoot_interval` frames while alive.
    pub fn poll_banana(&mut self, size: Size, tuning: &ProjectileTuning) -> Option<Projectile> {
        let alive = self.alive;
        let MonkeyKind::Intelligent {
            shoot_timer,
            shoot_interval,
        } = &mut self.kind
        else {
            return None;
        };
        if !alive || *shoot_timer < *shoot_interval {
            return None;
        }
        *shoot_timer = 0;
        debug!(x = self.position.x, y = self.position.y, "monkey throws banana");
        Some(Projectile::new(
            ProjectileKind::Banana,
            self.position,
            self.facing,
            size,
            tuning,
        ))
    }
}
