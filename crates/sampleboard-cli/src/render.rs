//! Terminal rendering of board columns

use sampleboard_core::{board_columns, Board};
use std::fmt::Write;

/// Render every board column with its request cards
#[must_use]
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    for column in board_columns(board) {
        let _ = writeln!(out, "## {} ({})", column.title, column.count());
        if column.requests.is_empty() {
            out.push_str("   (no requests)\n");
        }
        for id in &column.requests {
            let Some(request) = board.request(*id) else {
                continue;
            };
            let assignee = board
                .specialist_for(*id)
                .map_or_else(|| "unassigned".to_string(), |s| s.name.clone());
            let _ = writeln!(
                out,
                " - [{}] {} | {} | {} | {} | {}",
                request.priority,
                request.customer_name,
                request.sample_type,
                request.address,
                request.status.label(),
                assignee,
            );
        }
    }
    out
}
