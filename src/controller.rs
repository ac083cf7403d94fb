//! Screen flow: home screen, the running level and the game-over screen,
//! plus the running total carried from one level to the next.

use tracing::info;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::{InputSnapshot, Key};
use crate::level::{Level, LevelOutcome};

#[derive(Clone, Debug)]
pub enum Screen {
    Home,
    Playing(Level),
    GameOver { won: bool, score: u32 },
}

/// What the controller needs from a level once it has ended.
#[derive(Clone, Copy, Debug)]
struct Finished {
    number: u32,
    outcome: Option<LevelOutcome>,
    score: u32,
    time_remaining: u32,
}

#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    screen: Screen,
    total_score: u32,
}

impl GameController {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            screen: Screen::Home,
            total_score: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Runs one frame of whatever screen is showing.
    pub fn update(&mut self, input: &InputSnapshot) -> Result<(), ConfigError> {
        match &mut self.screen {
            Screen::Home => {
                if input.was_pressed(Key::Enter) {
                    self.start(1)?;
                } else if input.was_pressed(Key::LevelTwo) {
                    self.start(2)?;
                }
            }
            Screen::Playing(level) => {
                if level.update(input) {
                    let finished = Finished {
                        number: level.number(),
                        outcome: level.outcome(),
                        score: level.score(),
                        time_remaining: level.time_remaining(),
                    };
                    self.finish_level(finished)?;
                }
            }
            Screen::GameOver { .. } => {
                if input.was_pressed(Key::Jump) {
                    self.total_score = 0;
                    self.screen = Screen::Home;
                    info!("back to home screen");
                }
            }
        }
        Ok(())
    }

    /// Starting from the home screen always resets the total.
    fn start(&mut self, number: u32) -> Result<(), ConfigError> {
        self.total_score = 0;
        self.screen = Screen::Playing(Level::new(&self.config, number)?);
        Ok(())
    }

    fn finish_level(&mut self, level: Finished) -> Result<(), ConfigError> {
        let next = level.number + 1;
        match level.outcome {
            Some(LevelOutcome::Won) if self.config.levels.contains_key(&next) => {
                self.total_score += level.score;
                info!(total = self.total_score, next, "level cleared");
                self.screen = Screen::Playing(Level::new(&self.config, next)?);
            }
            Some(LevelOutcome::Won) => {
                let bonus = level.time_remaining * self.config.scoring.time_bonus_per_second;
                self.total_score += level.score + bonus;
                info!(total = self.total_score, bonus, "game won");
                self.screen = Screen::GameOver {
                    won: true,
                    score: self.total_score,
                };
            }
            Some(LevelOutcome::Lost) | None => {
                self.total_score = 0;
                info!(level = level.number, "game lost");
                self.screen = Screen::GameOver {
                    won: false,
                    score: 0,
                };
            }
        }
        Ok(())
    }
}
