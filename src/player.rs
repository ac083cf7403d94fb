//! The player character: keyboard-driven movement, ladders, jumping, items
//! and shooting.
//!
//! The per-frame order inside [`Player::update`] matters: the previous
//! position is recorded first, then gravity and landing, then horizontal
//! input, then ladders, and finally the jump.

use tracing::debug;

use crate::config::{PlayerTuning, ProjectileTuning, SpriteTable};
use crate::entities::{
    Barrel, Bounded, Collectable, CollectableKind, Direction, GravityBody, Ladder, Platform, Point,
    Projectile, ProjectileKind, Rect, Size, EPSILON,
};
use crate::input::{InputSnapshot, Key};
use crate::physics;

/// Sprite sizes the player switches between depending on what is held.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSprites {
    pub plain: Size,
    pub hammer: Size,
    pub blaster: Size,
}

impl PlayerSprites {
    pub fn from_table(sprites: &SpriteTable) -> Self {
        Self {
            plain: sprites.player,
            hammer: sprites.player_hammer,
            blaster: sprites.player_blaster,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Point,
    pub body: GravityBody,
    pub facing: Direction,
    pub has_hammer: bool,
    pub has_blaster: bool,
    pub bullets: u32,
    pub on_platform: bool,
    pub on_ladder: bool,
    pub can_climb_down: bool,
    pub climbing: bool,
    pub jumping: bool,
    pub jump_start_y: f64,
    pub previous_position: Point,
    /// Bottom of the ladder the player is centred on, if any.
    ladder_base: Option<f64>,
    sprites: PlayerSprites,
    tuning: PlayerTuning,
}

impl Bounded for Player {
    fn position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Size {
        if self.has_hammer {
            self.sprites.hammer
        } else if self.has_blaster {
            self.sprites.blaster
        } else {
            self.sprites.plain
        }
    }
}

impl Player {
    pub fn new(position: Point, sprites: PlayerSprites, tuning: PlayerTuning) -> Self {
        Self {
            position,
            body: GravityBody::new(tuning.gravity),
            facing: Direction::Right,
            has_hammer: false,
            has_blaster: false,
            bullets: 0,
            on_platform: false,
            on_ladder: false,
            can_climb_down: false,
            climbing: false,
            jumping: false,
            jump_start_y: position.y,
            previous_position: position,
            ladder_base: None,
            sprites,
            tuning,
        }
    }

    /// Runs one frame of player control.
    pub fn update(
        &mut self,
        input: &InputSnapshot,
        platforms: &[Platform],
        ladders: &[Ladder],
        screen_width: f64,
    ) {
        self.previous_position = self.position;

        self.apply_gravity();
        self.align_to_platforms(platforms);

        self.move_horizontal(input, screen_width);
        self.move_vertical(input, ladders);
        self.handle_jump(input);

        assert!(
            !(self.has_hammer && self.has_blaster),
            "player holds both hammer and blaster"
        );
    }

    // ── Physics ──────────────────────────────────────────────────────────────

    /// Falls only when neither standing nor climbing.
    fn apply_gravity(&mut self) {
        if !self.on_platform && !self.climbing {
            physics::apply_gravity(&mut self.position, &mut self.body);
        }
    }

    /// Lands on the platform under the bottom-centre probe. While climbing
    /// the support flag is tracked but the position is left alone.
    fn align_to_platforms(&mut self, platforms: &[Platform]) {
        let Some(top) = self.platform_underfoot(platforms) else {
            self.on_platform = false;
            return;
        };
        self.on_platform = true;
        if !self.climbing {
            self.position.y = top - self.size().half_height();
            self.jumping = false;
            self.body.velocity_y = 0.0;
        }
    }

    /// Top of the first platform containing the bottom-centre point, provided
    /// the player is above that platform's centre.
    fn platform_underfoot(&self, platforms: &[Platform]) -> Option<f64> {
        let probe = self.bottom_centre();
        platforms
            .iter()
            .find(|p| p.bounds().contains(probe) && self.position.y < p.position.y)
            .map(|p| p.bounds().top)
    }

    fn bottom_centre(&self) -> Point {
        Point::new(self.position.x, self.bounds().bottom)
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    fn move_horizontal(&mut self, input: &InputSnapshot, screen_width: f64) {
        if input.is_down(Key::Left) {
            self.position.x -= self.tuning.move_speed;
            self.facing = Direction::Left;
            self.climbing = false;
        }
        if input.is_down(Key::Right) {
            self.position.x += self.tuning.move_speed;
            self.facing = Direction::Right;
            self.climbing = false;
        }
        self.clamp_to_screen(screen_width);
    }

    fn clamp_to_screen(&mut self, screen_width: f64) {
        let half = self.size().half_width();
        self.position.x = self.position.x.max(half).min(screen_width - half);
    }

    fn move_vertical(&mut self, input: &InputSnapshot, ladders: &[Ladder]) {
        self.track_ladders(ladders);

        let climbing_down = self.can_climb_down && input.is_down(Key::Down);
        if !(self.on_ladder || climbing_down) {
            self.climbing = false;
            return;
        }

        self.jumping = false;
        self.climbing = true;
        self.body.velocity_y = 0.0;

        if input.is_down(Key::Up) {
            self.position.y -= self.tuning.climb_speed;
        }
        if climbing_down {
            match self.ladder_base.filter(|_| self.on_ladder) {
                // Inside a ladder: descend until the feet reach its base.
                Some(base) => {
                    let lowest = base - self.size().half_height();
                    self.position.y = (self.position.y + self.tuning.climb_speed).min(lowest);
                }
                // Standing on top of a ladder: step into it.
                None => self.position.y += self.tuning.climb_speed,
            }
        }
    }

    /// Recomputes the ladder flags from scratch. `on_ladder` needs the
    /// player's centre within the ladder's span, not just an overlap.
    fn track_ladders(&mut self, ladders: &[Ladder]) {
        self.on_ladder = false;
        self.can_climb_down = false;
        self.ladder_base = None;

        let bounds = self.bounds();
        let feet = self.bottom_centre();
        for ladder in ladders {
            let ladder_bounds = ladder.bounds();
            if bounds.intersects(&ladder_bounds) && self.is_centred_on(&ladder_bounds) {
                self.on_ladder = true;
                self.ladder_base = Some(ladder_bounds.bottom);
            }
            if ladder_bounds.contains(feet) {
                self.can_climb_down = true;
            }
        }
    }

    fn is_centred_on(&self, ladder: &Rect) -> bool {
        self.position.x >= ladder.left && self.position.x <= ladder.right
    }

    /// Starts a jump from a platform and ends it once the rise reaches the
    /// cap. The player is held at the cap height and left to gravity.
    fn handle_jump(&mut self, input: &InputSnapshot) {
        if input.was_pressed(Key::Jump) && !self.jumping && self.on_platform {
            self.jumping = true;
            self.jump_start_y = self.position.y;
            self.body.velocity_y = self.tuning.jump_velocity;
            self.on_platform = false;
        }

        let cap = self.tuning.max_jump_height;
        if self.jumping && self.jump_start_y - self.position.y >= cap - EPSILON {
            self.position.y = self.jump_start_y - cap;
            self.jumping = false;
            self.body.velocity_y = 0.0;
        }
    }

    /// Height above the current jump's starting point.
    pub fn jump_height(&self) -> f64 {
        self.jump_start_y - self.position.y
    }

    // ── Items ────────────────────────────────────────────────────────────────

    /// Picks up an uncollected hammer on contact. Drops the blaster and its
    /// bullets.
    pub fn pick_up_hammer(&mut self, hammer: &mut Collectable) -> bool {
        if hammer.collected || !self.collides_with(&*hammer) {
            return false;
        }
        self.has_hammer = true;
        self.has_blaster = false;
        self.bullets = 0;
        hammer.collect();
        debug!(x = hammer.position.x, y = hammer.position.y, "hammer collected");
        true
    }

    /// Picks up every uncollected blaster in contact, adding its bullets.
    pub fn pick_up_blasters(&mut self, blasters: &mut [Collectable]) {
        for blaster in blasters.iter_mut() {
            let CollectableKind::Blaster { bullets } = blaster.kind else {
                continue;
            };
            if blaster.collected || !self.collides_with(&*blaster) {
                continue;
            }
            self.has_blaster = true;
            self.has_hammer = false;
            self.bullets += bullets;
            blaster.collect();
            debug!(bullets = self.bullets, "blaster collected");
        }
    }

    /// Creates a bullet when the shoot key went down and ammunition is left.
    /// The caller spends the bullet with [`Player::spend_bullet`].
    pub fn try_shoot(
        &self,
        input: &InputSnapshot,
        size: Size,
        tuning: &ProjectileTuning,
    ) -> Option<Projectile> {
        if !(input.was_pressed(Key::Shoot) && self.has_blaster && self.bullets > 0) {
            return None;
        }
        Some(Projectile::new(
            ProjectileKind::Bullet,
            self.position,
            self.facing,
            size,
            tuning,
        ))
    }

    pub fn spend_bullet(&mut self) {
        assert!(self.bullets > 0, "spent a bullet with an empty blaster");
        self.bullets -= 1;
        if self.bullets == 0 {
            self.has_blaster = false;
        }
    }

    // ── Barrels ──────────────────────────────────────────────────────────────

    /// Two-phase jump-over check. A crossing of the barrel top between the
    /// previous and current frame latches the barrel; the jump is confirmed
    /// (and the latch cleared) once the player's centre is above the barrel
    /// top and within its horizontal span, still mid-jump.
    pub fn jumped_over_barrel(&self, barrel: &mut Barrel) -> bool {
        let barrel_bounds = barrel.bounds();
        let previous_bottom = self.previous_position.y + self.size().half_height();
        let crossed = previous_bottom >= barrel_bounds.top && self.bounds().bottom < barrel_bounds.top;

        if !barrel.jumped && self.jumping && crossed {
            barrel.mark_jumped();
        }

        let above = self.position.y < barrel_bounds.top;
        let over = self.position.x > barrel_bounds.left && self.position.x < barrel_bounds.right;
        if barrel.jumped && self.jumping && above && over {
            barrel.reset_jumped();
            return true;
        }
        false
    }
}
