use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{delete, get, post},
    Json, Router,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories::get_all_categories, questions},
        NewQuestion, Question,
    },
    pagination::{paginate, PageQuery},
    search::search_questions,
    server::app::AppState,
};

use super::{categories::categories_map, ApiError, ApiResponse};

const DIFFICULTIES: std::ops::RangeInclusive<i64> = 1..=5;

#[derive(Deserialize)]
struct NewQuestionBody {
    question: String,
    answer: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    difficulty: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    category: i64,
}

impl NewQuestionBody {
    fn validate(self) -> Result<NewQuestion, ApiError> {
        let question = self.question.trim().to_owned();
        let answer = self.answer.trim().to_owned();

        let mut problems = vec![];
        if question.is_empty() {
            problems.push("question is empty".to_owned());
        }
        if answer.is_empty() {
            problems.push("answer is empty".to_owned());
        }
        if !DIFFICULTIES.contains(&self.difficulty) {
            problems.push(format!("difficulty {} is out of range", self.difficulty));
        }
        if !problems.is_empty() {
            return Err(ApiError::Unprocessable(problems.iter().join("; ")));
        }

        Ok(NewQuestion {
            question,
            answer,
            category: self.category,
            difficulty: self.difficulty,
        })
    }
}

#[derive(Deserialize)]
struct SearchBody {
    // null is treated like a missing term
    #[serde(rename = "searchTerm", default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPage>> {
    let Query(query) = query?;
    let questions = questions::get_all_questions(&pool).await?;
    let current = paginate(&questions, query.page());
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionsPage {
        success: true,
        questions: current.to_vec(),
        total_questions: questions.len(),
        categories: categories_map(get_all_categories(&pool).await?),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    body: Result<Json<NewQuestionBody>, JsonRejection>,
) -> ApiResponse<Json<Created>> {
    let Json(body) = body?;
    let new_question = body.validate()?;
    let id = questions::create_question(&pool, &new_question).await?;
    tracing::info!("Created question {id} in category {}", new_question.category);

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<Deleted>> {
    let Path(id) = path?;
    questions::delete_question(&pool, id).await?;
    tracing::info!("Deleted question {id}");

    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

async fn search(
    State(pool): State<SqlitePool>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<SearchResults>> {
    let Json(body) = body?;
    let term = body.search_term.as_deref().unwrap_or_default();
    let found = search_questions(questions::get_all_questions(&pool).await?, term);

    Ok(Json(SearchResults {
        success: true,
        total_questions: found.len(),
        questions: found,
        current_category: None,
    }))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
}
