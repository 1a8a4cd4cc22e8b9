use amaze_core::{CellKind, MoveOutcome, PlaySession, Position, ValidationReport};

/// Board with paint and balls: `@` ball, `*` painted, `.` unpainted
pub fn render_session(session: &PlaySession) -> String {
    let grid = session.grid();
    let balls = session.ball_positions();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let pos = Position::new(x, y);
            let ch = if balls.contains(&pos) {
                '@'
            } else {
                match grid.cell_kind(pos) {
                    Ok(CellKind::Wall) => '#',
                    Ok(CellKind::Empty) => ' ',
                    _ if session.coverage().is_painted(pos) => '*',
                    _ => '.',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

pub fn describe_move(outcome: &MoveOutcome) -> String {
    if !outcome.any_ball_moved {
        return format!("{}: no ball moved", outcome.direction);
    }
    let mut line = format!(
        "{}: {}/{} painted",
        outcome.direction, outcome.painted_count, outcome.total_paintable
    );
    for slide in outcome.slides.iter().filter(|s| s.from != s.rest) {
        line.push_str(&format!("; ball {} {} -> {}", slide.ball, slide.from, slide.rest));
    }
    if outcome.level_complete {
        line.push_str(" (level complete)");
    }
    line
}

pub fn describe_report(report: &ValidationReport) -> String {
    if let Some(failure) = report.failure {
        return format!("invalid level: {}", failure);
    }
    let verdict = if report.solvable {
        "solvable"
    } else {
        "unsolvable"
    };
    let mut line = format!(
        "{}: {}/{} cells reachable ({:.0}%), {} states searched",
        verdict,
        report.max_painted,
        report.total_paintable,
        report.coverage() * 100.0,
        report.states_explored
    );
    if report.truncated {
        line.push_str(" (search cut short)");
    }
    line
}
