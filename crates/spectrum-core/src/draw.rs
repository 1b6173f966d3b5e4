//! Question drawing.
//!
//! Picks an unused question uniformly at random from the union of the chosen
//! categories. Drawing never marks the question as used; the caller records
//! the returned id before the next draw.

use std::collections::{BTreeSet, HashSet};

use rand::Rng;
use rand::rngs::StdRng;

use crate::question::{Question, QuestionRepository};

fn available<'r>(
    chosen: &BTreeSet<String>,
    used: &HashSet<u32>,
    repo: &'r QuestionRepository,
) -> impl Iterator<Item = &'r Question> {
    chosen
        .iter()
        .filter_map(move |name| repo.category(name))
        .flat_map(|c| c.questions.iter())
        .filter(move |q| !used.contains(&q.id))
}

/// Draw an unused question from the chosen categories.
///
/// Returns `None` when every question in the chosen categories has been
/// used. Categories are visited in sorted order and questions in source
/// order, so a seeded RNG reproduces the same sequence.
pub fn draw<'a>(
    chosen: &BTreeSet<String>,
    used: &HashSet<u32>,
    repo: &'a QuestionRepository,
    rng: &mut StdRng,
) -> Option<&'a Question> {
    let pool: Vec<&'a Question> = available(chosen, used, repo).collect();

    if pool.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..pool.len());
    Some(pool[idx])
}

/// Number of questions still available in the chosen categories.
pub fn remaining(
    chosen: &BTreeSet<String>,
    used: &HashSet<u32>,
    repo: &QuestionRepository,
) -> usize {
    available(chosen, used, repo).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn repo() -> QuestionRepository {
        let qs = vec![
            (1, "A", "a1"),
            (2, "A", "a2"),
            (3, "B", "b1"),
            (4, "C", "c1"),
        ]
        .into_iter()
        .map(|(id, cat, text)| Question {
            id,
            category: cat.to_string(),
            text: text.to_string(),
        })
        .collect();
        QuestionRepository::from_questions(qs).unwrap()
    }

    fn chosen(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn draws_only_from_chosen_categories() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(1);
        let cats = chosen(&["A"]);
        for _ in 0..20 {
            let q = draw(&cats, &HashSet::new(), &repo, &mut rng).unwrap();
            assert_eq!(q.category, "A");
        }
    }

    #[test]
    fn skips_used_questions() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(7);
        let cats = chosen(&["A", "B"]);
        let used: HashSet<u32> = [1, 3].into_iter().collect();
        for _ in 0..20 {
            assert_eq!(draw(&cats, &used, &repo, &mut rng).unwrap().id, 2);
        }
    }

    #[test]
    fn exhausted_pool_returns_none() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(7);
        let cats = chosen(&["A"]);
        let used: HashSet<u32> = [1, 2].into_iter().collect();
        assert!(draw(&cats, &used, &repo, &mut rng).is_none());
        assert!(draw(&cats, &used, &repo, &mut rng).is_none());
        assert_eq!(remaining(&cats, &used, &repo), 0);
    }

    #[test]
    fn does_not_mark_used() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(3);
        let cats = chosen(&["B"]);
        let used = HashSet::new();
        assert_eq!(draw(&cats, &used, &repo, &mut rng).unwrap().id, 3);
        assert_eq!(draw(&cats, &used, &repo, &mut rng).unwrap().id, 3);
        assert!(used.is_empty());
    }

    #[test]
    fn unknown_category_contributes_nothing() {
        let repo = repo();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(draw(&chosen(&["Z"]), &HashSet::new(), &repo, &mut rng).is_none());
    }

    #[test]
    fn same_seed_same_sequence() {
        let repo = repo();
        let cats = chosen(&["A", "B", "C"]);
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut used = HashSet::new();
            let mut order = Vec::new();
            while let Some(q) = draw(&cats, &used, &repo, &mut rng) {
                used.insert(q.id);
                order.push(q.id);
            }
            order
        };
        assert_eq!(run(99), run(99));
        assert_eq!(run(99).len(), 4);
    }
}
