//! Per-frame level simulation.
//!
//! One call to [`Level::update`] runs a whole frame in a fixed order:
//! clock, ladders, player, boss, barrels, monkeys and bananas, bullets.
//! Later steps see the positions and health already updated by earlier
//! steps of the same frame, so the order must not change.

use tracing::{debug, info, trace};

use crate::config::{GameConfig, LevelLayout, ScoringConfig, SpriteTable, Tuning};
use crate::entities::{
    Barrel, Bounded, Collectable, Donkey, Ladder, Monkey, MonkeyKind, Platform, Projectile,
};
use crate::error::ConfigError;
use crate::input::InputSnapshot;
use crate::physics;
use crate::player::{Player, PlayerSprites};
use crate::render::{Canvas, Held, Sprite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelOutcome {
    Won,
    Lost,
}

#[derive(Clone, Debug)]
pub struct Level {
    number: u32,
    platforms: Vec<Platform>,
    ladders: Vec<Ladder>,
    barrels: Vec<Barrel>,
    hammer: Option<Collectable>,
    blasters: Vec<Collectable>,
    donkey: Donkey,
    player: Player,
    monkeys: Vec<Monkey>,
    bananas: Vec<Projectile>,
    bullets: Vec<Projectile>,

    score: u32,
    frame: u32,
    outcome: Option<LevelOutcome>,

    screen_width: f64,
    max_frames: u32,
    frames_per_second: u32,
    sprites: SpriteTable,
    tuning: Tuning,
    scoring: ScoringConfig,
}

impl Level {
    /// Builds level `number` from the configuration's layouts.
    pub fn new(config: &GameConfig, number: u32) -> Result<Self, ConfigError> {
        let layout = config.level(number)?;
        Self::from_layout(config, number, layout)
    }

    /// Builds a level from an explicit layout; the layout is validated first.
    pub fn from_layout(
        config: &GameConfig,
        number: u32,
        layout: &LevelLayout,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        layout.validate(number)?;

        let sprites = &config.sprites;
        let tuning = &config.tuning;

        let platforms = layout
            .platforms
            .iter()
            .map(|&p| Platform::new(p, sprites.platform))
            .collect();
        let ladders = layout
            .ladders
            .iter()
            .map(|&p| Ladder::new(p, sprites.ladder, tuning.ladder_gravity))
            .collect();
        let barrels = layout
            .barrels
            .iter()
            .map(|&p| Barrel::new(p, sprites.barrel, tuning.barrel_gravity))
            .collect();
        let hammer = layout.hammer.map(|p| Collectable::hammer(p, sprites.hammer));
        let blasters = layout
            .blasters
            .iter()
            .map(|&p| Collectable::blaster(p, sprites.blaster, tuning.blaster_bullets))
            .collect();

        let normal = layout.normal_monkeys.iter().map(|spawn| {
            Monkey::new(
                spawn,
                MonkeyKind::Normal,
                sprites.normal_monkey,
                tuning.monkey_gravity,
                tuning.monkey_speed,
            )
        });
        let shoot_interval = config.banana_interval_frames();
        let intelligent = layout.intelligent_monkeys.iter().map(|spawn| {
            Monkey::new(
                spawn,
                MonkeyKind::Intelligent {
                    shoot_timer: 0,
                    shoot_interval,
                },
                sprites.intelligent_monkey,
                tuning.monkey_gravity,
                tuning.monkey_speed,
            )
        });
        let monkeys: Vec<Monkey> = normal.chain(intelligent).collect();

        let level = Self {
            number,
            platforms,
            ladders,
            barrels,
            hammer,
            blasters,
            donkey: Donkey::new(
                layout.donkey,
                sprites.donkey,
                tuning.donkey_gravity,
                tuning.donkey_health,
            ),
            player: Player::new(
                layout.player,
                PlayerSprites::from_table(sprites),
                tuning.player.clone(),
            ),
            monkeys,
            bananas: Vec::new(),
            bullets: Vec::new(),
            score: 0,
            frame: 0,
            outcome: None,
            screen_width: config.screen.width,
            max_frames: config.timing.max_frames,
            frames_per_second: config.timing.frames_per_second,
            sprites: sprites.clone(),
            tuning: tuning.clone(),
            scoring: config.scoring.clone(),
        };
        info!(
            level = number,
            platforms = level.platforms.len(),
            barrels = level.barrels.len(),
            monkeys = level.monkeys.len(),
            "level started"
        );
        Ok(level)
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// Advances one frame. Returns true once the level has been won or lost;
    /// after that further calls change nothing.
    pub fn update(&mut self, input: &InputSnapshot) -> bool {
        if self.outcome.is_some() {
            return true;
        }

        self.track_time();
        self.update_ladders();
        self.update_player(input);
        self.update_donkey();
        self.update_barrels();
        self.update_monkeys();
        self.update_bananas();
        self.update_bullets();

        if let Some(outcome) = self.outcome {
            info!(
                level = self.number,
                ?outcome,
                score = self.score,
                frame = self.frame,
                "level finished"
            );
            return true;
        }
        false
    }

    /// Later calls in the same frame overwrite earlier ones.
    fn finish(&mut self, outcome: LevelOutcome) {
        self.outcome = Some(outcome);
    }

    fn track_time(&mut self) {
        self.frame += 1;
        trace!(frame = self.frame, remaining = self.time_remaining(), "tick");
        if self.frame >= self.max_frames {
            self.finish(LevelOutcome::Lost);
        }
    }

    fn update_ladders(&mut self) {
        for ladder in &mut self.ladders {
            physics::settle(&mut ladder.position, ladder.size, &mut ladder.body, &self.platforms);
        }
    }

    fn update_player(&mut self, input: &InputSnapshot) {
        if let Some(hammer) = &mut self.hammer {
            self.player.pick_up_hammer(hammer);
        }
        self.player.pick_up_blasters(&mut self.blasters);

        if let Some(bullet) = self
            .player
            .try_shoot(input, self.sprites.bullet, &self.tuning.bullet)
        {
            self.bullets.push(bullet);
            self.player.spend_bullet();
            debug!(remaining = self.player.bullets, "bullet fired");
        }

        self.player
            .update(input, &self.platforms, &self.ladders, self.screen_width);
    }

    fn update_donkey(&mut self) {
        let donkey = &mut self.donkey;
        physics::settle(&mut donkey.position, donkey.size, &mut donkey.body, &self.platforms);

        if self.donkey.is_defeated() {
            self.finish(LevelOutcome::Won);
        }
        if self.player.collides_with(&self.donkey) {
            let outcome = if self.player.has_hammer {
                LevelOutcome::Won
            } else {
                LevelOutcome::Lost
            };
            self.finish(outcome);
        }
    }

    fn update_barrels(&mut self) {
        let mut hit = false;
        for barrel in &mut self.barrels {
            if self.player.jumped_over_barrel(barrel) && barrel.is_alive() {
                self.score += self.scoring.barrel_jump;
                debug!(score = self.score, "barrel jumped");
            }
            if barrel.is_alive() && self.player.collides_with(&*barrel) {
                if self.player.has_hammer {
                    barrel.destroy();
                    self.score += self.scoring.barrel_destroy;
                    debug!(score = self.score, "barrel destroyed");
                } else {
                    hit = true;
                }
            }
            physics::settle(&mut barrel.position, barrel.size, &mut barrel.body, &self.platforms);
        }
        if hit {
            self.finish(LevelOutcome::Lost);
        }
    }

    fn update_monkeys(&mut self) {
        let mut hit = false;
        for monkey in &mut self.monkeys {
            if let Some(banana) = monkey.poll_banana(self.sprites.banana, &self.tuning.banana) {
                self.bananas.push(banana);
            }
            if monkey.is_alive() && self.player.collides_with(&*monkey) {
                if self.player.has_hammer {
                    monkey.destroy();
                    self.score += self.scoring.monkey_destroy;
                    debug!(score = self.score, "monkey smashed");
                } else {
                    hit = true;
                }
            }
            monkey.update(&self.platforms, self.screen_width);
        }
        if hit {
            self.finish(LevelOutcome::Lost);
        }
    }

    /// Any banana contact is lethal, hammer or not.
    fn update_bananas(&mut self) {
        let mut hit = false;
        for banana in &mut self.bananas {
            if banana.active && self.player.collides_with(&*banana) {
                banana.active = false;
                hit = true;
            }
            banana.advance();
        }
        self.bananas.retain(|banana| banana.active);
        if hit {
            self.finish(LevelOutcome::Lost);
        }
    }

    fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            if bullet.active && physics::collides(&*bullet, &self.donkey) {
                self.donkey.reduce_health(self.tuning.bullet_damage);
                bullet.active = false;
                debug!(health = self.donkey.health, "boss hit");
            }
            if bullet.active {
                let target = self
                    .monkeys
                    .iter_mut()
                    .find(|monkey| monkey.is_alive() && physics::collides(&*bullet, &**monkey));
                if let Some(monkey) = target {
                    monkey.destroy();
                    bullet.active = false;
                    self.score += self.scoring.monkey_destroy;
                    debug!(score = self.score, "monkey shot");
                }
            }
            bullet.advance();
            bullet.expire_on_platforms(&self.platforms);
            bullet.expire_at_screen_edge(self.screen_width);
        }
        self.bullets.retain(|bullet| bullet.active);
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Draws every visible entity, back to front.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for platform in &self.platforms {
            canvas.draw(Sprite::Platform, platform.bounds());
        }
        if let Some(hammer) = self.hammer.as_ref().filter(|h| !h.collected) {
            canvas.draw(Sprite::Hammer, hammer.bounds());
        }
        for blaster in self.blasters.iter().filter(|b| !b.collected) {
            canvas.draw(Sprite::Blaster, blaster.bounds());
        }
        for ladder in &self.ladders {
            canvas.draw(Sprite::Ladder, ladder.bounds());
        }

        let held = if self.player.has_hammer {
            Held::Hammer
        } else if self.player.has_blaster {
            Held::Blaster
        } else {
            Held::Nothing
        };
        canvas.draw(
            Sprite::Player {
                held,
                facing: self.player.facing,
            },
            self.player.bounds(),
        );
        canvas.draw(Sprite::Donkey, self.donkey.bounds());

        for barrel in self.barrels.iter().filter(|b| b.is_alive()) {
            canvas.draw(Sprite::Barrel, barrel.bounds());
        }
        for monkey in self.monkeys.iter().filter(|m| m.is_alive()) {
            let sprite = if monkey.is_intelligent() {
                Sprite::IntelligentMonkey {
                    facing: monkey.facing,
                }
            } else {
                Sprite::NormalMonkey {
                    facing: monkey.facing,
                }
            };
            canvas.draw(sprite, monkey.bounds());
        }
        for banana in &self.bananas {
            canvas.draw(Sprite::Banana, banana.bounds());
        }
        for bullet in &self.bullets {
            canvas.draw(
                Sprite::Bullet {
                    facing: bullet.direction,
                },
                bullet.bounds(),
            );
        }
    }

    // ── Reporting ────────────────────────────────────────────────────────────

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Whole seconds left, rounded up; zero exactly when the frame budget
    /// is spent.
    pub fn time_remaining(&self) -> u32 {
        let frames_left = self.max_frames.saturating_sub(self.frame);
        frames_left.div_ceil(self.frames_per_second)
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    pub fn is_game_won(&self) -> bool {
        self.outcome == Some(LevelOutcome::Won)
    }

    pub fn donkey_health(&self) -> i32 {
        self.donkey.health
    }

    // ── Entity access ────────────────────────────────────────────────────────

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn donkey(&self) -> &Donkey {
        &self.donkey
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn ladders(&self) -> &[Ladder] {
        &self.ladders
    }

    pub fn barrels(&self) -> &[Barrel] {
        &self.barrels
    }

    pub fn barrels_mut(&mut self) -> &mut [Barrel] {
        &mut self.barrels
    }

    pub fn hammer(&self) -> Option<&Collectable> {
        self.hammer.as_ref()
    }

    pub fn blasters(&self) -> &[Collectable] {
        &self.blasters
    }

    pub fn monkeys(&self) -> &[Monkey] {
        &self.monkeys
    }

    pub fn monkeys_mut(&mut self) -> &mut [Monkey] {
        &mut self.monkeys
    }

    pub fn bananas(&self) -> &[Projectile] {
        &self.bananas
    }

    pub fn bullets(&self) -> &[Projectile] {
        &self.bullets
    }
}
