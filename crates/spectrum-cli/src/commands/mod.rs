pub mod categories;
pub mod play;

use std::path::Path;

use spectrum_core::QuestionRepository;

/// Load the question table. Failure here is fatal.
fn load_questions(path: &Path) -> Result<QuestionRepository, String> {
    QuestionRepository::load(path).map_err(|e| format!("cannot load questions: {e}"))
}
