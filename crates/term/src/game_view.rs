//! GameView: maps a [`SessionSnapshot`] and the event log into a framebuffer.
//!
//! This module is pure (no I/O) and allocation-free per frame apart from
//! framebuffer resizes. Text with numbers is formatted into fixed-capacity
//! stack strings.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::core::get_shape;
use crate::engine::{Countdown, EventLog, Placement, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{AssistMode, PieceKind, RiskClass, BOARD_HEIGHT, BOARD_WIDTH};

/// Stack buffer for one formatted panel line.
type Line = ArrayString<64>;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board frame position inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the assisted game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render one frame into an existing framebuffer.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        log: &EventLog,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let w = board_w + 2;
        let h = board_h + 2;
        let frame = Frame {
            x: 0,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', bg);
        fb.draw_box(frame.x, frame.y, frame.w, frame.h, CellStyle::default());

        self.draw_board(fb, frame, snap);
        self.draw_side_panel(fb, frame, snap, log, viewport);

        if snap.game.game_over {
            self.draw_game_over(fb, frame, snap);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, log: &EventLog, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, log, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: Frame, snap: &SessionSnapshot) {
        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for (y, row) in snap.game.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match PieceKind::from_code(code) {
                    Some(kind) => self.fill_cell(fb, frame, x as i8, y as i8, '█', piece_style(kind)),
                    None => self.fill_cell(fb, frame, x as i8, y as i8, '·', empty),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let suggested = matches!(snap.mode, Some(mode) if mode != AssistMode::Advise);
            let fg = if suggested {
                Rgb::new(90, 200, 190)
            } else {
                Rgb::new(140, 140, 140)
            };
            let style = CellStyle::new(fg, BOARD_BG).dim();
            for (dx, dy) in get_shape(ghost.kind, ghost.rotation) {
                self.fill_cell(fb, frame, ghost.x + dx, ghost.y + dy, '░', style);
            }
        }

        if let Some(active) = snap.game.active {
            let style = piece_style(active.kind).bold();
            for (dx, dy) in get_shape(active.kind, active.rotation) {
                self.fill_cell(fb, frame, active.x + dx, active.y + dy, '█', style);
            }
        }
    }

    /// Fill one board cell; coordinates outside the visible board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &SessionSnapshot,
        log: &EventLog,
        viewport: Viewport,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, v) in [
            ("SCORE", snap.game.score),
            ("LEVEL", snap.game.level),
            ("LINES", snap.game.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 7, y, v, value);
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "NEXT", label);
        let mut nx = panel_x + 7;
        for kind in snap.game.next_queue {
            fb.put_str(nx, y, kind.letter(), piece_style(kind).bold());
            nx += 2;
        }
        y += 2;

        fb.put_str(panel_x, y, "MODE", label);
        match snap.mode {
            Some(mode) => {
                fb.put_str_clipped(panel_x + 7, y, mode.label(), panel_w.saturating_sub(7), value);
            }
            None => {
                fb.put_str(panel_x + 7, y, "off", dim);
            }
        }
        y += 1;

        if snap.mode.is_some() {
            let mut line = Line::new();
            match snap.countdown {
                Countdown::Idle => line.push('-'),
                Countdown::Remaining(ms) => {
                    let _ = write!(line, "{:.1}s", ms as f64 / 1000.0);
                }
                Countdown::Manual => line.push_str("manual"),
            }
            fb.put_str(panel_x, y, "TIMER", label);
            fb.put_str(panel_x + 7, y, &line, value);
            y += 2;

            fb.put_str(panel_x, y, "SUGGESTIONS", label);
            y += 1;
            for (i, placement) in snap.suggestions.iter().enumerate() {
                y = self.draw_suggestion(fb, panel_x, y, panel_w, i, placement);
            }
        }
        y += 1;

        if y < viewport.height {
            fb.put_str(panel_x, y, "LOG", label);
            y += 1;
        }
        for entry in log.iter() {
            if y >= viewport.height {
                break;
            }
            let used = fb.put_str_clipped(panel_x, y, entry.channel.as_str(), panel_w, label.dim());
            let used = used + fb.put_str_clipped(panel_x + used, y, ": ", panel_w - used, dim);
            fb.put_str_clipped(panel_x + used, y, &entry.message, panel_w - used, value);
            y += 1;
        }
    }

    /// `1. T @ x3 r1  +4.2  safe`; returns the next free row.
    fn draw_suggestion(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        max_w: u16,
        index: usize,
        placement: &Placement,
    ) -> u16 {
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let mut line = Line::new();
        let _ = write!(
            line,
            "{}. {} @ x{} r{}  {:+.1}  ",
            index + 1,
            placement.kind.letter(),
            placement.x,
            placement.rotation.index(),
            placement.score,
        );
        let used = fb.put_str_clipped(x, y, &line, max_w, value);
        let risk = placement.risk_class();
        fb.put_str_clipped(x + used, y, risk.as_str(), max_w - used, risk_style(risk));
        y + 1
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: Frame, snap: &SessionSnapshot) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let body = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
        let mid = frame.y + frame.h / 2;
        let top = mid.saturating_sub(2);

        let mut lines: [Line; 5] = Default::default();
        let _ = lines[0].write_str("GAME OVER");
        let _ = write!(lines[1], "Score {}", snap.game.score);
        let _ = write!(lines[2], "Lines {}", snap.game.lines);
        let _ = write!(lines[3], "Level {}", snap.game.level);
        let _ = lines[4].write_str("r: restart");

        for (i, line) in lines.iter().enumerate() {
            let text_w = line.chars().count() as u16;
            let x = frame.x + frame.w.saturating_sub(text_w) / 2;
            let style = if i == 0 { title } else { body };
            fb.put_str(x, top + i as u16, line, style);
        }
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::new(fg, BOARD_BG)
}

fn risk_style(risk: RiskClass) -> CellStyle {
    let fg = match risk {
        RiskClass::Safe => Rgb::new(100, 220, 120),
        RiskClass::Neutral => Rgb::new(240, 200, 80),
        RiskClass::Risky => Rgb::new(230, 80, 80),
    };
    CellStyle::new(fg, PANEL_BG).bold()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{GameSession, ManualClock};
    use crate::core::GameState;

    #[test]
    fn overlay_lists_final_stats() {
        let mut game = GameState::new(1);
        for x in 0..10 {
            game.board_mut().set(x, 0, Some(PieceKind::Z));
            game.board_mut().set(x, 1, Some(PieceKind::Z));
        }
        let session = GameSession::unassisted(game, ManualClock::new(0));
        let snap = session.snapshot();
        assert!(snap.game.game_over);

        let fb = GameView::default().render(&snap, session.log(), Viewport::new(22, 22));
        let text = fb.to_lines().join("\n");
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Score 0"));
        assert!(text.contains("r: restart"));
    }

    #[test]
    fn suggestion_line_format() {
        let session = GameSession::assisted(
            GameState::new(3),
            Default::default(),
            AssistMode::Autopilot,
            ManualClock::new(0),
        );
        let snap = session.snapshot();
        let mut fb = FrameBuffer::new(40, 1);
        let view = GameView::default();
        view.draw_suggestion(&mut fb, 0, 0, 40, 0, &snap.suggestions[0]);
        let line = fb.to_lines().remove(0);
        let best = snap.suggestions[0];
        let expected = format!(
            "1. {} @ x{} r{}  {:+.1}  {}",
            best.kind.letter(),
            best.x,
            best.rotation.index(),
            best.score,
            best.risk_class().as_str()
        );
        assert_eq!(line.trim_end(), expected);
    }
}
