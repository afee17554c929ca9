use tetris_assist::core::GameState;
use tetris_assist::engine::{AssistConfig, EventLog, GameSession, ManualClock, SessionSnapshot};
use tetris_assist::term::{AnchorY, GameView, Viewport};
use tetris_assist::types::{AssistMode, PieceKind};

fn assisted(mode: AssistMode) -> GameSession<ManualClock> {
    GameSession::assisted(GameState::new(1), AssistConfig::default(), mode, ManualClock::new(0))
}

fn text(fb: &tetris_assist::term::FrameBuffer) -> String {
    fb.to_lines().join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = SessionSnapshot::default();
    let view = GameView::default();

    // 10*2 by 20*1 board cells plus border => 22x22.
    let fb = view.render(&snap, &EventLog::new(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = SessionSnapshot::default();
    snap.game.board[19][0] = PieceKind::I.code();

    let fb = GameView::default().render(&snap, &EventLog::new(), Viewport::new(22, 22));

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
}

#[test]
fn term_view_draws_ghost_at_top_suggestion_in_timed_mode() {
    let session = assisted(AssistMode::Timed);
    let snap = session.snapshot();
    let ghost = snap.ghost.unwrap();
    let best = session.suggestions()[0];
    assert_eq!((ghost.x, ghost.y, ghost.rotation), (best.x, best.y, best.rotation));

    let fb = GameView::default()
        .with_anchor_y(AnchorY::Top)
        .render(&snap, session.log(), Viewport::new(22, 22));
    let (cx, cy) = best.cells()[0];
    assert_eq!(fb.get(1 + 2 * cx as u16, 1 + cy as u16).unwrap().ch, '░');
}

#[test]
fn term_view_side_panel_shows_assist_state() {
    let session = assisted(AssistMode::Timed);
    let fb = GameView::default().render(&session.snapshot(), session.log(), Viewport::new(80, 30));
    let all = text(&fb);
    assert!(all.contains("SCORE"));
    assert!(all.contains("Timed assist"));
    assert!(all.contains("2.2s"));
    assert!(all.contains("SUGGESTIONS"));
    assert!(all.contains("1. "));
    assert!(all.contains("Game: Started session"));
}

#[test]
fn term_view_simple_mode_hides_suggestions() {
    let session = GameSession::unassisted(GameState::new(1), ManualClock::new(0));
    let fb = GameView::default().render(&session.snapshot(), session.log(), Viewport::new(80, 30));
    let all = text(&fb);
    assert!(all.contains("off"));
    assert!(!all.contains("SUGGESTIONS"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let fb = GameView::default().render(&SessionSnapshot::default(), &EventLog::new(), Viewport::new(22, 30));
    // start_y = (30 - 22) / 2 = 4
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}
