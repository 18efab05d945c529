//! Terminal runner (default binary).
//!
//! Polls crossterm for keys, steps the engine once per 16 ms frame and draws
//! the snapshot through the canvas renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent};

use blockfall::core::{dispatch, BackdropSink, EngineConfig, GameSnapshot, GameState, RankingSink};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{Canvas, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

/// Final ranking index, once the session hands it over
#[derive(Debug, Default)]
struct RankingSlot(Option<u8>);

impl RankingSink for RankingSlot {
    fn setup(&mut self, ranking: u8) {
        self.0 = Some(ranking);
    }
}

#[derive(Debug, Default)]
struct BackdropCounter(u32);

impl BackdropSink for BackdropCounter {
    fn advance(&mut self) {
        self.0 += 1;
    }
}

#[derive(Debug, Default)]
struct Outcome {
    ranking: RankingSlot,
    backdrop: BackdropCounter,
    frames: u64,
}

fn main() -> Result<()> {
    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[Config] {e}; using defaults");
            EngineConfig::default()
        }
    };
    eprintln!(
        "[Config] seed={} lock_mode={} start_level={} debug={}",
        config.seed,
        config.lock_mode.as_str(),
        config.start_level,
        config.debug
    );

    let mut game = GameState::from_config(config);
    let mut outcome = Outcome::default();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &mut outcome);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    let ranking = match outcome.ranking.0 {
        Some(r) => r.to_string(),
        None => "-".to_string(),
    };
    println!(
        "score {} level {} ranking {} ({} frames, {} backdrop changes)",
        game.score(),
        game.level(),
        ranking,
        outcome.frames,
        outcome.backdrop.0
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, outcome: &mut Outcome) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snapshot = GameSnapshot::default();
    let mut canvas = Canvas::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                TermEvent::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    input.handle_key_event(key, Instant::now());
                }
                TermEvent::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_frame.elapsed() < frame {
            continue;
        }
        last_frame = Instant::now();

        let frame_input = input.frame_at(last_frame);
        if frame_input.held.is_exit_combo() {
            return Ok(());
        }

        let finished = game.tick_input(frame_input);
        outcome.frames += 1;

        let events = game.take_events();
        dispatch(&events, &mut (), &mut outcome.ranking, &mut outcome.backdrop);

        game.snapshot_into(&mut snapshot);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Viewport::new(w, h), &mut canvas);
        term.present(&mut canvas)?;

        if finished {
            return Ok(());
        }
    }
}
