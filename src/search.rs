use crate::db::Question;

/// Case-insensitive substring match. An empty term matches everything.
pub fn matches_term(text: &str, term: &str) -> bool {
    term.is_empty() || text.to_lowercase().contains(&term.to_lowercase())
}

pub fn search_questions(questions: Vec<Question>, term: &str) -> Vec<Question> {
    questions
        .into_iter()
        .filter(|q| matches_term(&q.question, term))
        .collect()
}
