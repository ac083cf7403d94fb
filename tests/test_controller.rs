use kong_climber::config::{GameConfig, LevelLayout};
use kong_climber::controller::{GameController, Screen};
use kong_climber::entities::{Point, Size};
use kong_climber::input::{InputSnapshot, Key};

/// Ground at y = 738 with the player standing next to the boss. With a
/// hammer and a barrel under the player the level is won on the first frame
/// with 100 points; without the hammer it is lost on the first frame.
fn instant_layout(hammer: bool) -> LevelLayout {
    LevelLayout {
        player: Point::new(100.0, 718.0),
        donkey: Point::new(150.0, 703.0),
        platforms: vec![Point::new(512.0, 748.0)],
        ladders: Vec::new(),
        barrels: if hammer {
            vec![Point::new(100.0, 723.0)]
        } else {
            Vec::new()
        },
        hammer: hammer.then(|| Point::new(100.0, 718.0)),
        blasters: Vec::new(),
        normal_monkeys: Vec::new(),
        intelligent_monkeys: Vec::new(),
    }
}

fn config(level_two_hammer: bool) -> GameConfig {
    let mut config = GameConfig::default();
    config.sprites.platform = Size::new(1024.0, 20.0);
    config.levels.insert(1, instant_layout(true));
    config.levels.insert(2, instant_layout(level_two_hammer));
    config
}

fn idle() -> InputSnapshot {
    InputSnapshot::new()
}

fn playing_level(game: &GameController) -> Option<u32> {
    match game.screen() {
        Screen::Playing(level) => Some(level.number()),
        _ => None,
    }
}

#[test]
fn home_screen_waits_for_a_choice() {
    let mut game = GameController::new(config(true));
    game.update(&idle().hold(Key::Left)).expect("update");
    assert!(matches!(game.screen(), Screen::Home));

    game.update(&idle().press(Key::Enter)).expect("update");
    assert_eq!(playing_level(&game), Some(1));
}

#[test]
fn digit_two_starts_the_second_level() {
    let mut game = GameController::new(config(true));
    game.update(&idle().press(Key::LevelTwo)).expect("update");
    assert_eq!(playing_level(&game), Some(2));
}

#[test]
fn winning_level_one_carries_score_into_level_two() {
    let mut game = GameController::new(config(false));
    game.update(&idle().press(Key::Enter)).expect("update");

    game.update(&idle()).expect("update");
    assert_eq!(playing_level(&game), Some(2));
    assert_eq!(game.total_score(), 100);

    // Level two is lost straight away, which wipes the total.
    game.update(&idle()).expect("update");
    assert!(matches!(
        game.screen(),
        Screen::GameOver {
            won: false,
            score: 0
        }
    ));
    assert_eq!(game.total_score(), 0);

    game.update(&idle().press(Key::Jump)).expect("update");
    assert!(matches!(game.screen(), Screen::Home));
}

#[test]
fn winning_the_last_level_adds_the_time_bonus() {
    let mut game = GameController::new(config(true));
    game.update(&idle().press(Key::LevelTwo)).expect("update");
    game.update(&idle()).expect("update");

    // One frame used: ceil(10799 / 60) = 180 seconds left, 3 points each.
    let expected = 100 + 180 * 3;
    assert!(matches!(
        game.screen(),
        Screen::GameOver { won: true, score } if *score == expected
    ));
    assert_eq!(game.total_score(), expected);
}

#[test]
fn starting_an_undefined_level_fails() {
    let mut config = config(true);
    config.levels.remove(&2);
    let mut game = GameController::new(config);
    assert!(game.update(&idle().press(Key::LevelTwo)).is_err());
    assert!(matches!(game.screen(), Screen::Home));
}
