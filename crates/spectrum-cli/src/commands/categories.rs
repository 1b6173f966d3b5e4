use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use spectrum_core::question::display_label;

pub fn run(questions: &Path) -> Result<(), String> {
    let repo = super::load_questions(questions)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Category", "Questions"]);

    for (i, cat) in repo.categories().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            display_label(&cat.name),
            cat.questions.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} questions in {} categories",
        repo.len(),
        repo.categories().len()
    );

    Ok(())
}
