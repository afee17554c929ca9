//! Scoring module - line clear points, levels and gravity
//!
//! - A lock that clears `n` lines earns `LINE_SCORES[min(n, 4)] * level`.
//! - `level = lines / 10 + 1`.
//! - Gravity is `max(200, 800 - (level - 1) * 60)` ms per row.

use crate::types::{BASE_DROP_MS, DROP_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows in one lock at `level`.
///
/// Four or more lines all score as four.
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level reached after clearing `total_lines` (1-based).
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(speedup).max(DROP_FLOOR_MS)
}
