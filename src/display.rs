//! Plain-text rendering of a game for the terminal.

use strictly_baseball::{Base, GameState, Phase, Side};

/// One-line scoreboard: score, inning, count, outs and runners.
///
/// ```text
/// Cubs 2 - Tigers 1 | top 3 | 2-1, 1 out | runners: 1st 3rd | up: Ana
/// ```
pub fn status_line(state: &GameState) -> String {
    let score = format!(
        "{} {} - {} {}",
        state.away_team().name(),
        state.runs(Side::Away),
        state.home_team().name(),
        state.runs(Side::Home),
    );
    let inning = match state.phase() {
        Phase::Setup => "not started".to_string(),
        Phase::Live(half) => half.to_string(),
        Phase::Final(half) => format!("final ({})", half),
    };
    let outs = match state.outs() {
        1 => "1 out".to_string(),
        n => format!("{} outs", n),
    };
    let runners = [(Base::First, "1st"), (Base::Second, "2nd"), (Base::Third, "3rd")]
        .into_iter()
        .filter(|(base, _)| state.bases().is_occupied(*base))
        .map(|(_, name)| name)
        .collect::<Vec<_>>();
    let runners = if runners.is_empty() {
        "bases empty".to_string()
    } else {
        format!("runners: {}", runners.join(" "))
    };
    let batter = state
        .current_batter_id()
        .and_then(|id| state.batting_team().player(id))
        .map_or("-", |p| p.name());

    format!(
        "{} | {} | {}-{}, {} | {} | up: {}",
        score,
        inning,
        state.balls(),
        state.strikes(),
        outs,
        runners,
        batter
    )
}
