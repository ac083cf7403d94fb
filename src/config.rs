//! Read-only game configuration: screen, frame budget, sprite sizes, tuning
//! constants, scoring and level layouts.
//!
//! Built once at startup and handed to constructors by reference. Every
//! section falls back to the stock values when omitted from the JSON.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::entities::{Direction, Point, Size};
use crate::error::ConfigError;

const BUILTIN_CONFIG: &str = include_str!("../assets/game.json");

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub timing: TimingConfig,
    pub sprites: SpriteTable,
    pub tuning: Tuning,
    pub scoring: ScoringConfig,
    pub levels: BTreeMap<u32, LevelLayout>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Frame budget per level; running out is a loss.
    pub max_frames: u32,
    pub frames_per_second: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_frames: 10_800,
            frames_per_second: 60,
        }
    }
}

/// Sprite dimensions, from which every bounding box is derived.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SpriteTable {
    pub player: Size,
    pub player_hammer: Size,
    pub player_blaster: Size,
    pub platform: Size,
    pub ladder: Size,
    pub barrel: Size,
    pub donkey: Size,
    pub hammer: Size,
    pub blaster: Size,
    pub normal_monkey: Size,
    pub intelligent_monkey: Size,
    pub banana: Size,
    pub bullet: Size,
}

impl Default for SpriteTable {
    fn default() -> Self {
        Self {
            player: Size::new(32.0, 40.0),
            player_hammer: Size::new(48.0, 40.0),
            player_blaster: Size::new(44.0, 40.0),
            platform: Size::new(256.0, 20.0),
            ladder: Size::new(40.0, 120.0),
            barrel: Size::new(30.0, 30.0),
            donkey: Size::new(80.0, 70.0),
            hammer: Size::new(30.0, 30.0),
            blaster: Size::new(30.0, 20.0),
            normal_monkey: Size::new(36.0, 36.0),
            intelligent_monkey: Size::new(36.0, 36.0),
            banana: Size::new(16.0, 12.0),
            bullet: Size::new(14.0, 6.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub move_speed: f64,
    pub climb_speed: f64,
    pub gravity: f64,
    /// Upward impulse applied when a jump starts (negative is up).
    pub jump_velocity: f64,
    pub max_jump_height: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.5,
            climb_speed: 2.0,
            gravity: 0.2,
            jump_velocity: -5.0,
            max_jump_height: 62.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f64,
    pub max_range: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 3.8,
            max_range: 300.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub ladder_gravity: f64,
    pub barrel_gravity: f64,
    pub donkey_gravity: f64,
    pub monkey_gravity: f64,
    pub monkey_speed: f64,
    pub banana: ProjectileTuning,
    pub bullet: ProjectileTuning,
    pub donkey_health: i32,
    pub bullet_damage: i32,
    pub blaster_bullets: u32,
    pub banana_interval_seconds: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            ladder_gravity: 0.25,
            barrel_gravity: 0.4,
            donkey_gravity: 0.4,
            monkey_gravity: 0.4,
            monkey_speed: 0.5,
            banana: ProjectileTuning {
                speed: 1.8,
                max_range: 300.0,
            },
            bullet: ProjectileTuning::default(),
            donkey_health: 5,
            bullet_damage: 1,
            blaster_bullets: 5,
            banana_interval_seconds: 5,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub barrel_destroy: u32,
    pub barrel_jump: u32,
    pub monkey_destroy: u32,
    /// Awarded per remaining second when the final level is won.
    pub time_bonus_per_second: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            barrel_destroy: 100,
            barrel_jump: 30,
            monkey_destroy: 100,
            time_bonus_per_second: 3,
        }
    }
}

/// Initial placement of one level's entities.
#[derive(Clone, Debug, Deserialize)]
pub struct LevelLayout {
    pub player: Point,
    pub donkey: Point,
    #[serde(default)]
    pub platforms: Vec<Point>,
    #[serde(default)]
    pub ladders: Vec<Point>,
    #[serde(default)]
    pub barrels: Vec<Point>,
    #[serde(default)]
    pub hammer: Option<Point>,
    #[serde(default)]
    pub blasters: Vec<Point>,
    #[serde(default)]
    pub normal_monkeys: Vec<MonkeySpawn>,
    #[serde(default)]
    pub intelligent_monkeys: Vec<MonkeySpawn>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MonkeySpawn {
    pub position: Point,
    pub facing: Direction,
    pub route: Vec<f64>,
}

impl MonkeySpawn {
    /// Rejects routes a patrol could never follow.
    pub fn validate(&self, level: u32, index: usize) -> Result<(), ConfigError> {
        if self.route.is_empty() {
            return Err(ConfigError::EmptyRoute { level, index });
        }
        if let Some(&segment) = self.route.iter().find(|s| s.is_nan() || **s <= 0.0) {
            return Err(ConfigError::InvalidRouteSegment {
                level,
                index,
                segment,
            });
        }
        Ok(())
    }
}

impl LevelLayout {
    pub fn validate(&self, level: u32) -> Result<(), ConfigError> {
        self.normal_monkeys
            .iter()
            .chain(&self.intelligent_monkeys)
            .enumerate()
            .try_for_each(|(index, spawn)| spawn.validate(level, index))
    }
}

impl GameConfig {
    /// The configuration shipped with the game.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(BUILTIN_CONFIG)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        info!(path = %path.display(), levels = config.levels.len(), "loaded game config");
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let config: GameConfig = serde_path_to_error::deserialize(&mut deserializer).map_err(
            |error| {
                let path = error.path().to_string();
                ConfigError::Parse {
                    path,
                    message: error.into_inner().to_string(),
                }
            },
        )?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("timing.max_frames", f64::from(self.timing.max_frames))?;
        positive(
            "timing.frames_per_second",
            f64::from(self.timing.frames_per_second),
        )?;
        for (field, size) in self.sprites.entries() {
            positive(field, size.width)?;
            positive(field, size.height)?;
        }
        self.tuning.validate()?;
        for (&number, layout) in &self.levels {
            layout.validate(number)?;
        }
        Ok(())
    }

    pub fn level(&self, number: u32) -> Result<&LevelLayout, ConfigError> {
        self.levels
            .get(&number)
            .ok_or(ConfigError::UnknownLevel(number))
    }

    /// Frames between two banana throws of an intelligent monkey.
    pub fn banana_interval_frames(&self) -> u32 {
        self.tuning.banana_interval_seconds * self.timing.frames_per_second
    }
}

impl Tuning {
    /// Every rate, range and count must be positive; the jump impulse must
    /// point upwards.
    fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        positive("tuning.player.move_speed", player.move_speed)?;
        positive("tuning.player.climb_speed", player.climb_speed)?;
        positive("tuning.player.gravity", player.gravity)?;
        positive("tuning.player.max_jump_height", player.max_jump_height)?;
        if player.jump_velocity >= 0.0 {
            return Err(ConfigError::NotUpward {
                field: "tuning.player.jump_velocity",
                value: player.jump_velocity,
            });
        }

        positive("tuning.ladder_gravity", self.ladder_gravity)?;
        positive("tuning.barrel_gravity", self.barrel_gravity)?;
        positive("tuning.donkey_gravity", self.donkey_gravity)?;
        positive("tuning.monkey_gravity", self.monkey_gravity)?;
        positive("tuning.monkey_speed", self.monkey_speed)?;
        positive("tuning.banana.speed", self.banana.speed)?;
        positive("tuning.banana.max_range", self.banana.max_range)?;
        positive("tuning.bullet.speed", self.bullet.speed)?;
        positive("tuning.bullet.max_range", self.bullet.max_range)?;

        positive("tuning.donkey_health", f64::from(self.donkey_health))?;
        positive("tuning.bullet_damage", f64::from(self.bullet_damage))?;
        positive("tuning.blaster_bullets", f64::from(self.blaster_bullets))?;
        positive(
            "tuning.banana_interval_seconds",
            f64::from(self.banana_interval_seconds),
        )
    }
}

impl SpriteTable {
    fn entries(&self) -> [(&'static str, Size); 13] {
        [
            ("sprites.player", self.player),
            ("sprites.player_hammer", self.player_hammer),
            ("sprites.player_blaster", self.player_blaster),
            ("sprites.platform", self.platform),
            ("sprites.ladder", self.ladder),
            ("sprites.barrel", self.barrel),
            ("sprites.donkey", self.donkey),
            ("sprites.hammer", self.hammer),
            ("sprites.blaster", self.blaster),
            ("sprites.normal_monkey", self.normal_monkey),
            ("sprites.intelligent_monkey", self.intelligent_monkey),
            ("sprites.banana", self.banana),
            ("sprites.bullet", self.bullet),
        ]
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
