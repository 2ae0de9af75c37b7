use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use sqlx::SqlitePool;

use crate::db::{queries::questions, Question};

/// Which questions a quiz round draws from. The wire value 0 means all categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelector {
    #[default]
    All,
    Category(i64),
}

impl From<i64> for CategorySelector {
    fn from(id: i64) -> Self {
        match id {
            0 => CategorySelector::All,
            id => CategorySelector::Category(id),
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::All => write!(f, "all"),
            CategorySelector::Category(id) => write!(f, "{id}"),
        }
    }
}

/// Chooses uniformly among `questions` whose id is not in `previous`.
/// `None` means the candidate set is exhausted.
pub fn pick_question<R: Rng + ?Sized>(
    questions: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    let mut candidates: Vec<Question> = questions
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

pub async fn next_question(
    pool: &SqlitePool,
    selector: CategorySelector,
    previous: &[i64],
) -> sqlx::Result<Option<Question>> {
    let questions = match selector {
        CategorySelector::All => questions::get_all_questions(pool).await?,
        CategorySelector::Category(id) => questions::get_questions_for_category(pool, id).await?,
    };
    tracing::debug!(
        "Quiz round for {selector}: {} questions, {} previous",
        questions.len(),
        previous.len()
    );
    Ok(pick_question(questions, previous, &mut rand::thread_rng()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{queries::questions::create_question, test_pool, NewQuestion};
    use rand::{rngs::StdRng, SeedableRng};

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}?"),
            answer: "answer".to_owned(),
            category,
            difficulty: 2,
        }
    }

    #[test]
    fn zero_selects_all_categories() {
        assert_eq!(CategorySelector::from(0), CategorySelector::All);
        assert_eq!(CategorySelector::from(3), CategorySelector::Category(3));
        assert_eq!(CategorySelector::default().to_string(), "all");
    }

    #[test]
    fn previous_questions_are_never_picked() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions: Vec<Question> = (1..=5).map(|id| question(id, 1)).collect();
        for _ in 0..200 {
            let picked = pick_question(questions.clone(), &[1, 2, 4], &mut rng).unwrap();
            assert!(picked.id == 3 || picked.id == 5);
        }
    }

    #[test]
    fn every_candidate_can_be_picked() {
        let mut rng = StdRng::seed_from_u64(11);
        let questions: Vec<Question> = (1..=4).map(|id| question(id, 1)).collect();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_question(questions.clone(), &[], &mut rng).unwrap().id);
        }
        assert_eq!(seen, HashSet::from([1, 2, 3, 4]));
    }

    #[test]
    fn exhausted_candidates_give_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let questions = vec![question(1, 1), question(2, 1)];
        assert!(pick_question(questions, &[2, 1], &mut rng).is_none());
        assert!(pick_question(vec![], &[], &mut rng).is_none());
    }

    #[tokio::test]
    async fn next_question_respects_category() {
        let pool = test_pool().await;
        for (text, category) in [("Sci?", 1), ("Art?", 2), ("Geo?", 3)] {
            create_question(
                &pool,
                &NewQuestion {
                    question: text.to_owned(),
                    answer: "a".to_owned(),
                    category,
                    difficulty: 1,
                },
            )
            .await
            .unwrap();
        }

        for _ in 0..20 {
            let q = next_question(&pool, CategorySelector::Category(2), &[])
                .await
                .unwrap()
                .unwrap();
            assert_eq!(q.question, "Art?");
        }
        let q = next_question(&pool, CategorySelector::Category(2), &[2])
            .await
            .unwrap();
        assert!(q.is_none());
        assert!(next_question(&pool, CategorySelector::All, &[])
            .await
            .unwrap()
            .is_some());
    }
}
