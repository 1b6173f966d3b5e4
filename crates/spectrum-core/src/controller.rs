//! Round controller.
//!
//! `RoundController` owns the session state, the question repository and the
//! RNG. Each public method is one user action: it validates everything first
//! and only then mutates, so a rejected action leaves the session untouched.
//!
//! Steps flow setup → category selection → play → continue prompt → end.
//! Play alternates the responder every question; after every second scored
//! question the session pauses on the continue prompt. Running out of
//! questions moves the session to the end screen, which can be resumed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::draw;
use crate::error::{GameError, GameResult};
use crate::question::QuestionRepository;
use crate::results::{ResultRecord, ResultsLog};
use crate::scoring::{GuesserPoints, Scoreboard};
use crate::session::{SessionState, Step};

/// What happened after a question was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The next question was drawn; play continues.
    NextQuestion,
    /// Both players have answered once; the session waits on the prompt.
    RoundComplete,
    /// No questions left; the session is on the end screen.
    Exhausted,
}

/// Drives a single game session.
pub struct RoundController {
    repo: QuestionRepository,
    state: SessionState,
    rng: StdRng,
}

impl RoundController {
    /// Create a controller on the setup screen.
    pub fn new(repo: QuestionRepository, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            repo,
            state: SessionState::new(),
            rng,
        }
    }

    /// The session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The loaded questions.
    pub fn repository(&self) -> &QuestionRepository {
        &self.repo
    }

    /// The current screen.
    pub fn step(&self) -> Step {
        self.state.step
    }

    /// Questions still available in the chosen categories.
    pub fn remaining_questions(&self) -> usize {
        draw::remaining(
            &self.state.chosen_categories,
            &self.state.used_ids,
            &self.repo,
        )
    }

    fn expect_step(&self, expected: Step) -> GameResult<()> {
        if self.state.step == expected {
            Ok(())
        } else {
            Err(GameError::WrongStep {
                expected,
                actual: self.state.step,
            })
        }
    }

    /// Draw the next question into the session, or move to the end screen
    /// when none is left. Returns whether a question was drawn.
    fn draw_next(&mut self) -> bool {
        let drawn = draw::draw(
            &self.state.chosen_categories,
            &self.state.used_ids,
            &self.repo,
            &mut self.rng,
        )
        .cloned();

        match drawn {
            Some(q) => {
                debug!(id = q.id, category = %q.category, "question drawn");
                self.state.used_ids.insert(q.id);
                self.state.current_question = Some(q);
                true
            }
            None => {
                info!(
                    asked = self.state.questions_asked,
                    "question pool exhausted"
                );
                self.state.current_question = None;
                self.state.step = Step::End;
                false
            }
        }
    }

    // -- setup ------------------------------------------------------------

    /// Set the name in a player slot (0 or 1). Surrounding whitespace is
    /// dropped.
    pub fn set_player_name(&mut self, slot: usize, name: &str) -> GameResult<()> {
        self.expect_step(Step::Setup)?;
        let player = self
            .state
            .players
            .get_mut(slot)
            .ok_or(GameError::InvalidPlayerSlot(slot))?;
        *player = name.trim().to_string();
        Ok(())
    }

    /// Accept the player names and move to category selection.
    ///
    /// Scores start at zero for both players and the results log is cleared.
    pub fn confirm_players(&mut self) -> GameResult<()> {
        self.expect_step(Step::Setup)?;
        for (i, name) in self.state.players.iter().enumerate() {
            if name.is_empty() {
                return Err(GameError::MissingPlayerName(i + 1));
            }
        }
        let [first, second] = &self.state.players;
        if first == second {
            return Err(GameError::DuplicatePlayer(first.clone()));
        }

        self.state.scores = Scoreboard::new(self.state.players.iter().cloned());
        self.state.results = ResultsLog::new();
        self.state.step = Step::CategorySelect;
        info!(players = ?self.state.players, "players confirmed");
        Ok(())
    }

    // -- category selection ----------------------------------------------

    /// Toggle a category in the selection. Returns whether it is now selected.
    pub fn toggle_category(&mut self, name: &str) -> GameResult<bool> {
        self.expect_step(Step::CategorySelect)?;
        if !self.repo.contains_category(name) {
            return Err(GameError::UnknownCategory(name.to_string()));
        }
        let selection = &mut self.state.category_selection;
        let selected = if selection.remove(name) {
            false
        } else {
            selection.insert(name.to_string());
            true
        };
        debug!(category = name, selected, "category toggled");
        Ok(selected)
    }

    /// Drop the selection and go back to player setup.
    pub fn back_to_setup(&mut self) -> GameResult<()> {
        self.expect_step(Step::CategorySelect)?;
        self.state.category_selection.clear();
        self.state.step = Step::Setup;
        Ok(())
    }

    /// Lock in the selected categories and start play with the first question.
    pub fn confirm_categories(&mut self) -> GameResult<Step> {
        self.expect_step(Step::CategorySelect)?;
        if self.state.category_selection.is_empty() {
            return Err(GameError::NoCategoriesSelected);
        }
        self.state.chosen_categories = self.state.category_selection.clone();
        self.state.step = Step::Play;
        info!(categories = ?self.state.chosen_categories, "play started");
        self.draw_next();
        Ok(self.state.step)
    }

    // -- play ---------------------------------------------------------------

    /// Make sure a question is on the table, drawing one if needed.
    ///
    /// Returns the resulting step: `Play`, or `End` when the pool is empty.
    pub fn ensure_question(&mut self) -> GameResult<Step> {
        self.expect_step(Step::Play)?;
        if self.state.current_question.is_none() {
            self.draw_next();
        }
        Ok(self.state.step)
    }

    /// Swap the current question for another unused one.
    ///
    /// The replaced question stays used. Returns `false` and keeps the
    /// current question when nothing else is left.
    pub fn replace_question(&mut self) -> GameResult<bool> {
        self.expect_step(Step::Play)?;
        let drawn = draw::draw(
            &self.state.chosen_categories,
            &self.state.used_ids,
            &self.repo,
            &mut self.rng,
        )
        .cloned();

        match drawn {
            Some(q) => {
                debug!(id = q.id, "question replaced");
                self.state.used_ids.insert(q.id);
                self.state.current_question = Some(q);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Record the guesser's points for the current question. Selecting again
    /// overwrites the previous choice.
    pub fn select_points(&mut self, points: GuesserPoints) -> GameResult<()> {
        self.expect_step(Step::Play)?;
        if self.state.current_question.is_none() {
            return Err(GameError::NoCurrentQuestion);
        }
        self.state.pending_guesser_points = Some(points);
        Ok(())
    }

    /// Score the current question and move on.
    ///
    /// Adds the guesser's points and the derived responder points, appends a
    /// result record, then either draws the next question or, after every
    /// second question, stops on the continue prompt.
    pub fn save_and_continue(&mut self) -> GameResult<RoundOutcome> {
        self.expect_step(Step::Play)?;
        let points = self
            .state
            .pending_guesser_points
            .ok_or(GameError::NoPendingPoints)?;
        let question = self
            .state
            .current_question
            .take()
            .ok_or(GameError::NoCurrentQuestion)?;

        let responder = self.state.responder().to_string();
        let guesser = self.state.guesser().to_string();
        let responder_points = points.responder_points();

        self.state.scores.add(&guesser, u32::from(points.value()));
        self.state.scores.add(&responder, u32::from(responder_points));
        self.state.results.append(ResultRecord {
            question_index: self.state.next_question_number(),
            category: question.category,
            question_text: question.text,
            responder,
            guesser,
            responder_points,
            guesser_points: points.value(),
        });
        self.state.pending_guesser_points = None;
        self.state.questions_asked += 1;

        info!(
            question = self.state.questions_asked,
            guesser_points = points.value(),
            responder_points,
            "question scored"
        );

        if self.state.questions_asked % 2 == 0 {
            self.state.step = Step::ContinuePrompt;
            return Ok(RoundOutcome::RoundComplete);
        }
        if self.draw_next() {
            Ok(RoundOutcome::NextQuestion)
        } else {
            Ok(RoundOutcome::Exhausted)
        }
    }

    // -- continue prompt ----------------------------------------------------

    /// Play another round. Returns `Play`, or `End` when no question is left.
    pub fn continue_game(&mut self) -> GameResult<Step> {
        self.expect_step(Step::ContinuePrompt)?;
        self.state.step = Step::Play;
        self.draw_next();
        Ok(self.state.step)
    }

    /// Stop and show the standings.
    pub fn end_game(&mut self) -> GameResult<()> {
        self.expect_step(Step::ContinuePrompt)?;
        self.state.step = Step::End;
        info!(asked = self.state.questions_asked, "game ended");
        Ok(())
    }

    // -- end ----------------------------------------------------------------

    /// Players sorted by points, highest first; ties keep player order.
    pub fn standings(&self) -> Vec<(String, u32)> {
        self.state.scores.standings()
    }

    /// Go back to play without touching scores or the question count.
    ///
    /// Returns `Play`, or `End` again when no question is left.
    pub fn resume(&mut self) -> GameResult<Step> {
        self.expect_step(Step::End)?;
        self.state.step = Step::Play;
        self.state.pending_guesser_points = None;
        self.draw_next();
        if self.state.step == Step::Play {
            info!("game resumed");
        }
        Ok(self.state.step)
    }

    /// Start over from player setup. The question repository is kept.
    pub fn reset(&mut self) -> GameResult<()> {
        self.expect_step(Step::End)?;
        self.state.reset();
        info!("session reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Question;
    use proptest::prelude::*;

    fn q(id: u32, category: &str) -> Question {
        Question {
            id,
            category: category.to_string(),
            text: format!("{category} question {id}"),
        }
    }

    fn repo() -> QuestionRepository {
        QuestionRepository::from_questions(vec![
            q(1, "Luźne"),
            q(2, "Luźne"),
            q(3, "Luźne"),
            q(10, "Wolisz"),
            q(11, "Wolisz"),
            q(12, "Wolisz"),
            q(13, "Wolisz"),
            q(20, "Dylematy"),
        ])
        .unwrap()
    }

    fn pts(v: u8) -> GuesserPoints {
        GuesserPoints::new(v).unwrap()
    }

    fn controller() -> RoundController {
        RoundController::new(repo(), GameConfig::default().with_seed(42))
    }

    fn playing(categories: &[&str]) -> RoundController {
        let mut c = controller();
        c.set_player_name(0, "Anna").unwrap();
        c.set_player_name(1, "Bob").unwrap();
        c.confirm_players().unwrap();
        for cat in categories {
            c.toggle_category(cat).unwrap();
        }
        assert_eq!(c.confirm_categories().unwrap(), Step::Play);
        c
    }

    fn score(c: &mut RoundController, v: u8) -> RoundOutcome {
        c.select_points(pts(v)).unwrap();
        c.save_and_continue().unwrap()
    }

    #[test]
    fn setup_requires_two_names() {
        let mut c = controller();
        c.set_player_name(0, "Anna").unwrap();
        assert_eq!(c.confirm_players(), Err(GameError::MissingPlayerName(2)));
        c.set_player_name(1, "   ").unwrap();
        assert_eq!(c.confirm_players(), Err(GameError::MissingPlayerName(2)));
        assert_eq!(c.step(), Step::Setup);
    }

    #[test]
    fn setup_trims_names_and_rejects_duplicates() {
        let mut c = controller();
        c.set_player_name(0, " Anna ").unwrap();
        c.set_player_name(1, "Anna").unwrap();
        assert_eq!(
            c.confirm_players(),
            Err(GameError::DuplicatePlayer("Anna".to_string()))
        );
        assert_eq!(
            c.set_player_name(2, "Cleo"),
            Err(GameError::InvalidPlayerSlot(2))
        );
    }

    #[test]
    fn player_slot_error_names_valid_slots() {
        let mut c = controller();
        let e = c.set_player_name(2, "Cleo").unwrap_err();
        assert_eq!(e.to_string(), "invalid player slot 2, expected 0 or 1");
    }

    #[test]
    fn confirm_players_initialises_scores() {
        let mut c = controller();
        c.set_player_name(0, "Anna").unwrap();
        c.set_player_name(1, "Bob").unwrap();
        c.confirm_players().unwrap();
        assert_eq!(c.step(), Step::CategorySelect);
        let players: Vec<_> = c.state().scores().players().collect();
        assert_eq!(players, vec!["Anna", "Bob"]);
        assert_eq!(c.state().scores().total(), 0);
    }

    #[test]
    fn category_toggle_and_back() {
        let mut c = controller();
        c.set_player_name(0, "Anna").unwrap();
        c.set_player_name(1, "Bob").unwrap();
        c.confirm_players().unwrap();

        assert_eq!(c.toggle_category("Luźne"), Ok(true));
        assert_eq!(c.toggle_category("Wolisz"), Ok(true));
        assert_eq!(c.toggle_category("Luźne"), Ok(false));
        assert_eq!(
            c.toggle_category("Nope"),
            Err(GameError::UnknownCategory("Nope".to_string()))
        );
        assert_eq!(c.state().category_selection().len(), 1);

        c.back_to_setup().unwrap();
        assert_eq!(c.step(), Step::Setup);
        assert!(c.state().category_selection().is_empty());
    }

    #[test]
    fn empty_selection_cannot_start() {
        let mut c = controller();
        c.set_player_name(0, "Anna").unwrap();
        c.set_player_name(1, "Bob").unwrap();
        c.confirm_players().unwrap();
        assert_eq!(c.confirm_categories(), Err(GameError::NoCategoriesSelected));
        assert_eq!(c.step(), Step::CategorySelect);
    }

    #[test]
    fn play_starts_with_a_used_question_from_the_pool() {
        let c = playing(&["Wolisz"]);
        let q = c.state().current_question().unwrap();
        assert_eq!(q.category, "Wolisz");
        assert!(c.state().used_ids().contains(&q.id));
        assert_eq!(c.remaining_questions(), 3);
    }

    #[test]
    fn actions_in_wrong_step_are_rejected() {
        let mut c = controller();
        assert_eq!(
            c.toggle_category("Luźne"),
            Err(GameError::WrongStep {
                expected: Step::CategorySelect,
                actual: Step::Setup
            })
        );
        assert!(c.save_and_continue().is_err());
        assert!(c.continue_game().is_err());
        assert!(c.resume().is_err());
        assert!(c.reset().is_err());
        assert_eq!(c.state(), &SessionState::new());
    }

    #[test]
    fn save_requires_points() {
        let mut c = playing(&["Luźne"]);
        let before = c.state().clone();
        assert_eq!(c.save_and_continue(), Err(GameError::NoPendingPoints));
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn point_selection_overwrites() {
        let mut c = playing(&["Luźne"]);
        c.select_points(pts(2)).unwrap();
        c.select_points(pts(4)).unwrap();
        assert_eq!(c.state().pending_guesser_points(), Some(pts(4)));
        score(&mut c, 4);
        assert_eq!(c.state().scores().get("Bob"), Some(4));
        assert_eq!(c.state().scores().get("Anna"), Some(2));
    }

    #[test]
    fn replace_keeps_old_question_used() {
        let mut c = playing(&["Wolisz"]);
        let first = c.state().current_question().unwrap().id;
        assert!(c.replace_question().unwrap());
        let second = c.state().current_question().unwrap().id;
        assert_ne!(first, second);
        assert!(c.state().used_ids().contains(&first));
        assert!(c.state().used_ids().contains(&second));
        assert_eq!(c.state().questions_asked(), 0);
    }

    #[test]
    fn replace_with_empty_pool_keeps_current() {
        let mut c = playing(&["Dylematy"]);
        let current = c.state().current_question().cloned();
        assert!(!c.replace_question().unwrap());
        assert_eq!(c.state().current_question().cloned(), current);
        assert_eq!(c.step(), Step::Play);
    }

    #[test]
    fn two_player_scenario() {
        let mut c = playing(&["Luźne"]);

        // Q1: Anna answers, Bob guesses 3.
        assert_eq!(c.state().responder(), "Anna");
        assert_eq!(c.state().guesser(), "Bob");
        assert_eq!(score(&mut c, 3), RoundOutcome::NextQuestion);
        assert_eq!(c.state().scores().get("Bob"), Some(3));
        assert_eq!(c.state().scores().get("Anna"), Some(1));

        // Q2: Bob answers, Anna guesses 4.
        assert_eq!(c.state().responder(), "Bob");
        assert_eq!(score(&mut c, 4), RoundOutcome::RoundComplete);
        assert_eq!(c.step(), Step::ContinuePrompt);
        assert!(c.state().current_question().is_none());
        assert_eq!(c.state().scores().get("Anna"), Some(5));
        assert_eq!(c.state().scores().get("Bob"), Some(5));

        // Q3 is the last Luźne question.
        assert_eq!(c.continue_game(), Ok(Step::Play));
        assert_eq!(c.state().responder(), "Anna");
        assert_eq!(score(&mut c, 0), RoundOutcome::Exhausted);
        assert_eq!(c.step(), Step::End);
        assert_eq!(c.state().questions_asked(), 3);

        let log = c.state().results().entries();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].responder, "Anna");
        assert_eq!(log[0].guesser_points, 3);
        assert_eq!(log[0].responder_points, 1);
        assert_eq!(log[1].responder, "Bob");
        assert_eq!(log[2].question_index, 3);
    }

    #[test]
    fn continue_with_empty_pool_ends() {
        let mut c = playing(&["Luźne"]);
        score(&mut c, 2);
        score(&mut c, 2);
        assert!(c.replace_question().is_err());
        c.continue_game().unwrap();
        score(&mut c, 0);
        assert_eq!(c.step(), Step::End);
        assert_eq!(c.resume(), Ok(Step::End));
    }

    #[test]
    fn end_game_from_prompt() {
        let mut c = playing(&["Wolisz"]);
        score(&mut c, 4);
        score(&mut c, 0);
        c.end_game().unwrap();
        assert_eq!(c.step(), Step::End);
        let standings = c.standings();
        assert_eq!(standings[0], ("Bob".to_string(), 4));
        assert_eq!(standings[1], ("Anna".to_string(), 2));
    }

    #[test]
    fn resume_keeps_scores_and_count() {
        let mut c = playing(&["Wolisz"]);
        score(&mut c, 3);
        score(&mut c, 2);
        c.end_game().unwrap();
        let scores = c.state().scores().clone();

        assert_eq!(c.resume(), Ok(Step::Play));
        assert_eq!(c.state().questions_asked(), 2);
        assert_eq!(c.state().scores(), &scores);
        assert!(c.state().current_question().is_some());
        assert_eq!(c.state().responder(), "Anna");
    }

    #[test]
    fn reset_returns_to_setup_and_keeps_repository() {
        let mut c = playing(&["Wolisz", "Luźne"]);
        score(&mut c, 3);
        score(&mut c, 4);
        c.end_game().unwrap();
        let repo_before = c.repository().clone();

        c.reset().unwrap();
        assert_eq!(c.step(), Step::Setup);
        assert_eq!(c.state(), &SessionState::new());
        assert!(c.state().used_ids().is_empty());
        assert_eq!(c.state().questions_asked(), 0);
        assert!(c.state().results().is_empty());
        assert_eq!(c.repository(), &repo_before);
    }

    #[test]
    fn ensure_question_is_idempotent() {
        let mut c = playing(&["Wolisz"]);
        let id = c.state().current_question().unwrap().id;
        assert_eq!(c.ensure_question(), Ok(Step::Play));
        assert_eq!(c.state().current_question().unwrap().id, id);
    }

    proptest! {
        #[test]
        fn scores_match_log_and_turns_alternate(
            seed in any::<u64>(),
            guesses in proptest::collection::vec(
                proptest::sample::select(vec![0u8, 2, 3, 4]), 1..8),
        ) {
            let mut c = RoundController::new(repo(), GameConfig::default().with_seed(seed));
            c.set_player_name(0, "Anna").unwrap();
            c.set_player_name(1, "Bob").unwrap();
            c.confirm_players().unwrap();
            for cat in ["Luźne", "Wolisz", "Dylematy"] {
                c.toggle_category(cat).unwrap();
            }
            c.confirm_categories().unwrap();

            for g in guesses {
                match c.step() {
                    Step::ContinuePrompt => { c.continue_game().unwrap(); }
                    Step::End => break,
                    _ => {}
                }
                if c.step() != Step::Play {
                    break;
                }
                score(&mut c, g);
            }

            let state = c.state();
            let log = state.results();
            prop_assert_eq!(state.scores().total(), log.total_points());
            prop_assert_eq!(state.questions_asked() as usize, log.len());
            for (n, rec) in log.entries().iter().enumerate() {
                prop_assert_eq!(rec.question_index as usize, n + 1);
                prop_assert_eq!(&rec.responder, &state.players()[n % 2]);
                prop_assert_eq!(&rec.guesser, &state.players()[1 - n % 2]);
                prop_assert_eq!(
                    rec.responder_points,
                    crate::scoring::responder_points(rec.guesser_points)
                );
            }
        }

        #[test]
        fn questions_are_never_repeated(seed in any::<u64>(), swaps in 0usize..10) {
            let mut c = RoundController::new(repo(), GameConfig::default().with_seed(seed));
            c.set_player_name(0, "Anna").unwrap();
            c.set_player_name(1, "Bob").unwrap();
            c.confirm_players().unwrap();
            c.toggle_category("Wolisz").unwrap();
            c.toggle_category("Luźne").unwrap();
            c.confirm_categories().unwrap();

            let mut seen = std::collections::HashSet::new();
            if let Some(q) = c.state().current_question() {
                seen.insert(q.id);
            }
            for _ in 0..swaps {
                if c.replace_question().unwrap() {
                    let id = c.state().current_question().unwrap().id;
                    prop_assert!(seen.insert(id));
                }
            }
            prop_assert_eq!(seen.len(), c.state().used_ids().len());
            prop_assert!(seen.len() <= 7);
        }
    }
}
