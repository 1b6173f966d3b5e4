//! Screen rendering.
//!
//! Pure functions from session state to text; nothing here mutates.

use spectrum_core::question::display_label;
use spectrum_core::{GuesserPoints, QuestionRepository, RoundController, SessionState, Step};

const MEDALS: [&str; 3] = ["🏆", "🥈", "🥉"];

/// Render the screen for the session's current step.
pub fn screen(controller: &RoundController) -> String {
    let state = controller.state();
    match state.step() {
        Step::Setup => setup(state),
        Step::CategorySelect => categories(state, controller.repository()),
        Step::Play => play(state, controller.remaining_questions()),
        Step::ContinuePrompt => continue_prompt(state),
        Step::End => end(state),
    }
}

fn setup(state: &SessionState) -> String {
    let mut out = String::from("🎭 Enter player names\n");
    for (i, name) in state.players().iter().enumerate() {
        let shown = if name.is_empty() { "—" } else { name.as_str() };
        out.push_str(&format!("  Player {}: {shown}\n", i + 1));
    }
    out.push_str("Commands: player <1|2> <name>, next");
    out
}

fn categories(state: &SessionState, repo: &QuestionRepository) -> String {
    let mut out = String::from("📚 Choose question categories\n");
    for (i, cat) in repo.categories().iter().enumerate() {
        let mark = if state.category_selection().contains(&cat.name) {
            "x"
        } else {
            " "
        };
        out.push_str(&format!(
            "  {}. [{mark}] {} ({})\n",
            i + 1,
            display_label(&cat.name),
            cat.questions.len()
        ));
    }

    let selected: Vec<String> = state
        .category_selection()
        .iter()
        .map(|c| display_label(c.as_str()))
        .collect();
    let selected = if selected.is_empty() {
        "none".to_string()
    } else {
        selected.join(", ")
    };
    out.push_str(&format!("Selected: {selected}\n"));
    out.push_str("Commands: toggle <name|number>, back, start");
    out
}

fn play(state: &SessionState, remaining: usize) -> String {
    let Some(q) = state.current_question() else {
        return "No question drawn.".to_string();
    };

    let mut out = format!(
        "🥊 Round {}\n🧠 Question {} – category: {}\n",
        state.current_round(),
        state.next_question_number(),
        display_label(&q.category)
    );
    out.push_str(&format!("  {}\n", q.text));
    let noun = if remaining == 1 { "question" } else { "questions" };
    out.push_str(&format!("  (id: {}, {remaining} more {noun} left)\n", q.id));
    out.push_str(&format!(
        "Answering: {}   |   Guessing: {}\n",
        state.responder(),
        state.guesser()
    ));

    let choices: Vec<String> = GuesserPoints::ALL
        .iter()
        .map(|p| {
            if state.pending_guesser_points() == Some(*p) {
                format!("[✅ {p}]")
            } else {
                format!("[{p}]")
            }
        })
        .collect();
    out.push_str(&format!(
        "How many points does {} get? {}\n",
        state.guesser(),
        choices.join(" ")
    ));

    if state.pending_guesser_points().is_some() {
        out.push_str("Commands: 0|2|3|4, swap, save");
    } else {
        out.push_str("Commands: 0|2|3|4, swap");
    }
    out
}

fn continue_prompt(state: &SessionState) -> String {
    format!(
        "❓ Keep playing?\n🥊 Rounds played: {} → {} questions 🧠\nCommands: continue, end",
        state.rounds_played(),
        state.questions_asked()
    )
}

fn end(state: &SessionState) -> String {
    let mut out = format!(
        "🎉 Game over! Final scores:\n🥊 Rounds: {} → {} questions 🧠\n",
        state.rounds_played(),
        state.questions_asked()
    );
    for (i, (name, points)) in state.scores().standings().iter().enumerate() {
        let medal = MEDALS.get(i).copied().unwrap_or(" ");
        out.push_str(&format!("  {medal} {name}: {points} points\n"));
    }
    out.push_str("Commands: resume, again, export [file]");
    out
}

/// Help text for a step.
pub fn help(step: Step) -> String {
    let specific = match step {
        Step::Setup => concat!(
            "  player <1|2> <name>   Set a player's name\n",
            "  next                  Confirm players\n",
        ),
        Step::CategorySelect => concat!(
            "  toggle <name|number>  Select or deselect a category\n",
            "  back                  Return to player setup\n",
            "  start                 Start the game\n",
        ),
        Step::Play => concat!(
            "  0 | 2 | 3 | 4         Points for the guesser\n",
            "  swap                  Draw a different question\n",
            "  save                  Save points and move on\n",
        ),
        Step::ContinuePrompt => concat!(
            "  continue              Play another round\n",
            "  end                   Finish and show results\n",
        ),
        Step::End => concat!(
            "  resume                Keep playing with the same scores\n",
            "  again                 Start a new game\n",
            "  export [file]         Write the results (.txt for a text log)\n",
        ),
    };
    format!(
        "Commands ({step}):\n{specific}{}",
        concat!(
            "  status                Show scores\n",
            "  help                  Show this help\n",
            "  quit                  Exit",
        )
    )
}

/// One-line scores summary.
pub fn status(state: &SessionState) -> String {
    if state.scores().is_empty() {
        return format!("Step: {}", state.step());
    }
    let scores: Vec<String> = state
        .scores()
        .standings()
        .iter()
        .map(|(name, points)| format!("{name} {points}"))
        .collect();
    format!(
        "Step: {} | Questions: {} | Scores: {}",
        state.step(),
        state.questions_asked(),
        scores.join(", ")
    )
}
