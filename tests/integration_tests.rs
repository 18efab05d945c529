//! Integration tests for the frame loop: whole sessions driven through the
//! public facade.

use blockfall::core::{
    dispatch, Cue, EngineConfig, Event, GameState, PhaseKind, PieceSource, RankingSink,
    ScriptedPieces,
};
use blockfall::types::{Buttons, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, LOCKED_OUT_TILE};

fn scripted(config: EngineConfig, pieces: &str) -> GameState<ScriptedPieces> {
    GameState::with_source(config, ScriptedPieces::parse(pieces).unwrap())
}

/// Fill `row` with `tile` except the listed columns
fn fill_row_except(game: &mut GameState<impl PieceSource>, row: i8, holes: &[i8]) {
    for x in 0..BOARD_WIDTH as i8 {
        if !holes.contains(&x) {
            game.board_mut().set(x, row, 4);
        }
    }
}

fn idle(game: &mut GameState<impl PieceSource>, frames: usize) -> bool {
    let mut done = false;
    for _ in 0..frames {
        done = game.tick(Buttons::NONE, Buttons::NONE);
    }
    done
}

#[derive(Default)]
struct Rankings(Vec<u8>);

impl RankingSink for Rankings {
    fn setup(&mut self, ranking: u8) {
        self.0.push(ranking);
    }
}

#[test]
fn test_blocked_spawn_wipes_board_and_reports_ranking_once() {
    let mut game = scripted(EngineConfig::default(), "IT");
    fill_row_except(&mut game, 1, &[0]);
    let mut rankings = Rankings::default();

    // soft drop onto the stack: quiet lock on the first frame
    assert!(!game.tick(Buttons::DOWN, Buttons::DOWN));
    assert_eq!(game.phase(), PhaseKind::SpawnDelay);
    let events = game.take_events();
    assert!(!events.contains(&Event::Sound(Cue::Lock)));
    assert!(!events.contains(&Event::Sound(Cue::Land)));

    // spawn delay runs out and the T cannot enter
    assert!(!idle(&mut game, 31));
    assert_eq!(game.phase(), PhaseKind::GameOver);

    // 20 rows, 6 frames each
    assert!(!idle(&mut game, 119));
    assert!(game.tick(Buttons::NONE, Buttons::NONE));
    assert!(game.finished());
    dispatch(&game.take_events(), &mut (), &mut rankings, &mut ());

    let mut filled = 0;
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let tile = game.board().get(x, y).unwrap();
            if tile != 0 {
                assert_eq!(tile, LOCKED_OUT_TILE, "({}, {})", x, y);
                filled += 1;
            }
        }
    }
    // I on row 0 (T merged over it) plus the nine prefilled cells
    assert_eq!(filled, 13);

    // terminal state is sticky and silent
    for _ in 0..10 {
        assert!(game.tick(Buttons::PAUSE, Buttons::PAUSE));
    }
    dispatch(&game.take_events(), &mut (), &mut rankings, &mut ());
    assert_eq!(rankings.0, vec![0]);
    assert_eq!(game.phase(), PhaseKind::GameOverDone);
}

#[test]
fn test_clearing_past_last_level_wins_with_top_ranking() {
    let config = EngineConfig::default().with_start_level(999);
    let mut game = scripted(config, "I");
    fill_row_except(&mut game, 19, &[3, 4, 5, 6]);
    game.take_events();

    assert!(!game.tick(Buttons::HARD_DROP, Buttons::HARD_DROP));
    assert!(game.tick(Buttons::DOWN, Buttons::NONE));

    assert_eq!(game.phase(), PhaseKind::GameOverDone);
    assert_eq!(game.level(), 1000);
    assert_eq!(game.ranking(), 9);
    // ((1000 + 1) / 4 + 1 + 19) * 1 * 1
    assert_eq!(game.score(), 270);

    let events = game.take_events();
    let setups: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::RankingSetup(_)))
        .collect();
    assert_eq!(setups, vec![&Event::RankingSetup(9)]);
}

#[test]
fn test_double_clear_scores_with_combo() {
    let mut game = scripted(EngineConfig::default(), "OI");
    fill_row_except(&mut game, 18, &[4, 5]);
    fill_row_except(&mut game, 19, &[4, 5]);

    game.tick(Buttons::HARD_DROP, Buttons::HARD_DROP);
    assert_eq!(game.progression().drop_distance(), 18);
    game.tick(Buttons::DOWN, Buttons::NONE);

    assert_eq!(game.phase(), PhaseKind::LineClear);
    assert_eq!(game.combo(), 3);
    assert_eq!(game.level(), 2);
    // ((2 + 2) / 4 + 1 + 18) * 2 * 3
    assert_eq!(game.score(), 120);
    assert_eq!(game.progression().drop_distance(), 0);

    // rows stay zeroed until the clear delay runs out
    assert_eq!(game.board().filled_count(), 0);
    idle(&mut game, 42);
    assert_eq!(game.phase(), PhaseKind::SpawnDelay);
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_century_lock_advances_backdrop_and_song() {
    let config = EngineConfig::default().with_start_level(498);
    let mut game = scripted(config, "OI");
    fill_row_except(&mut game, 18, &[4, 5]);
    fill_row_except(&mut game, 19, &[4, 5]);
    assert_eq!(game.progression().song(), 0);
    game.take_events();

    game.tick(Buttons::HARD_DROP, Buttons::HARD_DROP);
    game.take_events();
    game.tick(Buttons::DOWN, Buttons::NONE);

    assert_eq!(game.level(), 500);
    assert_eq!(game.progression().song(), 1);
    assert_eq!(
        game.take_events().as_slice(),
        &[
            Event::Sound(Cue::Clear),
            Event::BackdropAdvance,
            Event::MusicVolume { left: 0, right: 0 },
            Event::SelectTrack(4),
            Event::MusicVolume { left: 6, right: 6 },
            Event::Sound(Cue::Lock),
        ]
    );
}

#[test]
fn test_fast_gravity_reaches_floor_in_one_frame() {
    let config = EngineConfig::default().with_start_level(500);
    let mut game = scripted(config, "O");
    assert_eq!(game.take_events().last(), Some(&Event::SelectTrack(4)));

    game.tick(Buttons::NONE, Buttons::NONE);
    assert_eq!(game.active().y, 17);
    assert_eq!(game.lock_timer(), None);

    game.tick(Buttons::NONE, Buttons::NONE);
    assert_eq!(game.lock_timer(), Some(29));
    assert_eq!(game.take_events().as_slice(), &[Event::Sound(Cue::Land)]);
}

#[test]
fn test_pause_is_a_pure_freeze() {
    let mut game = GameState::new(4242);
    for _ in 0..40 {
        game.tick(Buttons::RIGHT, Buttons::NONE);
    }
    game.take_events();
    let before = game.clone();

    assert!(!game.tick(Buttons::PAUSE, Buttons::PAUSE));
    assert!(game.paused());
    for _ in 0..100 {
        assert!(!game.tick(Buttons::LEFT | Buttons::DOWN, Buttons::HARD_DROP));
    }
    assert!(game.snapshot().board.iter().flatten().all(|&t| t == 0));
    assert!(game.snapshot().active.is_none());

    assert!(!game.tick(Buttons::PAUSE, Buttons::PAUSE));
    assert_eq!(game, before);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut game = GameState::new(seed);
        for frame in 0..2000u32 {
            let pressed = match frame % 97 {
                0 => Buttons::ROTATE_CW,
                50 => Buttons::HARD_DROP,
                _ => Buttons::NONE,
            };
            let held = if frame % 300 < 40 {
                Buttons::LEFT
            } else {
                Buttons::NONE
            };
            game.tick(held, pressed);
            game.take_events();
        }
        game.snapshot()
    };
    assert_eq!(play(7), play(7));
}

#[test]
fn test_holding_down_stacks_up_until_game_over() {
    let mut game = GameState::new(99);
    let mut rankings = Rankings::default();
    let mut frames = 0;
    while !game.tick(Buttons::DOWN, Buttons::NONE) {
        dispatch(&game.take_events(), &mut (), &mut rankings, &mut ());
        frames += 1;
        assert!(frames < 10_000, "never topped out");
    }
    dispatch(&game.take_events(), &mut (), &mut rankings, &mut ());

    // nothing moves sideways, so nothing clears
    assert_eq!(game.score(), 0);
    assert_eq!(rankings.0, vec![0]);
    assert!(PieceKind::ALL.contains(&game.active().kind));
}
