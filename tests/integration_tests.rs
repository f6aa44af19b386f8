//! Integration tests for keyfall
//!
//! Drives whole sessions through the public API on an off-screen surface.

use keyfall::config;
use keyfall::game::{self, FINISHED_MARKER, ScoreBoard, Tick};
use keyfall::input::Input;
use keyfall::melody::{self, Melody};
use keyfall::surface::HeadlessSurface;
use keyfall::synth::Silent;
use keyfall::{GameConfig, GameError, NoteName, Session};

const WIDTH: f32 = 600.0;
const HEIGHT: f32 = 400.0;

fn ccg_session() -> Session {
    Session::new(melody::parse("C C G").unwrap(), GameConfig::default(), HEIGHT).unwrap()
}

/// Tick until the first note sits inside the hit window.
fn tick_until_active(session: &mut Session, surface: &mut HeadlessSurface, board: &mut ScoreBoard) {
    while session.active_note().is_none() {
        assert_eq!(game::tick(session, surface, board), Tick::Continue);
    }
}

#[test]
fn test_correct_key_in_window_scores() {
    let mut session = ccg_session();
    let mut surface = HeadlessSurface::new(WIDTH, HEIGHT);
    let mut board = ScoreBoard::default();
    tick_until_active(&mut session, &mut surface, &mut board);

    assert_eq!(session.active_note().map(|n| n.name), Some(NoteName::C));
    assert_eq!(session.score(), 0);
    session.handle(Input::Key('C'));
    assert!(session.notes()[0].hit);
    assert_eq!(session.score(), 1);
}

#[test]
fn test_wrong_key_in_window_is_ignored() {
    let mut session = ccg_session();
    let mut surface = HeadlessSurface::new(WIDTH, HEIGHT);
    let mut board = ScoreBoard::default();
    tick_until_active(&mut session, &mut surface, &mut board);

    let before = session.notes().to_vec();
    session.handle(Input::Key('G'));
    assert_eq!(session.notes(), &before[..]);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_input_with_empty_window_is_ignored() {
    let mut session = ccg_session();
    let before = session.notes().to_vec();
    for key in ['c', 'd', 'e', 'f', 'g', 'a', 'b', 'H', '?'] {
        session.handle(Input::Key(key));
    }
    assert_eq!(session.notes(), &before[..]);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_click_on_key_scores() {
    let mut session = ccg_session();
    let mut surface = HeadlessSurface::new(WIDTH, HEIGHT);
    let mut board = ScoreBoard::default();
    tick_until_active(&mut session, &mut surface, &mut board);

    // Above the keyboard strip: no key there.
    session.handle(Input::Pointer { x: 40.0, y: 100.0 });
    assert_eq!(session.score(), 0);

    // Inside the C key (first column, bottom 80 pixels).
    session.handle(Input::Pointer { x: 40.0, y: 370.0 });
    assert_eq!(session.score(), 1);
}

#[test]
fn test_loop_stops_once_notes_leave_surface() {
    let mut session = ccg_session();
    let mut surface = HeadlessSurface::new(WIDTH, HEIGHT);
    let mut board = ScoreBoard::default();
    let mut frames = 1;
    while game::tick(&mut session, &mut surface, &mut board) == Tick::Continue {
        frames += 1;
    }
    assert!(session.is_complete());
    assert!(session.notes().iter().all(|n| n.position > HEIGHT));
    assert_eq!(frames, 301);
    assert!(board.text().ends_with(FINISHED_MARKER));
}

#[test]
fn test_perfect_play_of_full_melody() {
    let mut session = Session::new(Melody::twinkle(), GameConfig::default(), HEIGHT).unwrap();
    let report = game::autoplay(
        &mut session,
        &mut HeadlessSurface::new(WIDTH, HEIGHT),
        &Silent,
    );
    assert_eq!(report.score, 14);
    assert_eq!(report.total, 14);
    assert_eq!(report.text, "Score: 14 / 14 ✅ Finished!");
    assert_eq!(report.text.matches(FINISHED_MARKER).count(), 1);
    // Last note starts at -1300 and must get past 400.
    assert_eq!(report.ticks, 851);
}

#[test]
fn test_score_never_decreases() {
    let mut session = Session::new(Melody::twinkle(), GameConfig::default(), HEIGHT).unwrap();
    let mut surface = HeadlessSurface::new(WIDTH, HEIGHT);
    let mut board = ScoreBoard::default();
    let mut last = 0;
    let mut keys = "cdefgabh".chars().cycle();
    loop {
        // Mash one key per frame; some land, most don't.
        session.handle(Input::Key(keys.next().unwrap()));
        assert!(session.score() >= last);
        assert!(session.score() as usize <= session.total());
        last = session.score();
        if game::tick(&mut session, &mut surface, &mut board) == Tick::Finished {
            break;
        }
    }
    let hits = session.notes().iter().filter(|n| n.hit).count();
    assert_eq!(session.score() as usize, hits);
}

#[test]
fn test_faster_step_from_config_file() {
    let path = std::env::temp_dir().join(format!("keyfall-test-{}.conf", std::process::id()));
    std::fs::write(&path, "# double speed\nstep: 4\n").unwrap();
    let config = config::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.step, 4.0);
    let mut session = Session::new(Melody::twinkle(), config, HEIGHT).unwrap();
    let report = game::autoplay(
        &mut session,
        &mut HeadlessSurface::new(WIDTH, HEIGHT),
        &Silent,
    );
    assert_eq!(report.score, 14);
    assert_eq!(report.ticks, 426);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let path = std::env::temp_dir().join("keyfall-test-does-not-exist.conf");
    assert!(matches!(config::load(&path), Err(GameError::Io(_))));
}

#[test]
fn test_unknown_melody_note_fails_at_startup() {
    assert!(matches!(melody::parse("C C H"), Err(GameError::Melody(_))));
}

#[test]
fn test_unusable_surface_height_is_rejected() {
    for height in [f32::NAN, f32::INFINITY, 0.0, 80.0] {
        assert!(
            matches!(
                Session::new(Melody::twinkle(), GameConfig::default(), height),
                Err(GameError::InvalidConfig(_))
            ),
            "accepted height {}",
            height
        );
    }
}

#[test]
fn test_step_too_small_to_move_notes_is_rejected() {
    let config = GameConfig {
        step: 0.01,
        spacing: 1.0e6,
        ..GameConfig::default()
    };
    assert!(matches!(
        Session::new(Melody::twinkle(), config, HEIGHT),
        Err(GameError::InvalidConfig(_))
    ));
}
