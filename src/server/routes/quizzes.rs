use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{queries::categories::get_category, Question},
    quiz::{next_question, CategorySelector},
    server::{
        app::AppState,
        deserializers::{deserialize_category_selector, deserialize_ids},
    },
    telemetry::{QUIZ_QUESTIONS_SERVED, QUIZ_ROUNDS_EXHAUSTED},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default, deserialize_with = "deserialize_ids")]
    previous_questions: Vec<i64>,
    #[serde(default, deserialize_with = "deserialize_category_selector")]
    quiz_category: CategorySelector,
}

#[derive(Serialize)]
struct QuizRound {
    success: bool,
    // absent once every candidate has been asked
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

async fn play(
    State(pool): State<SqlitePool>,
    body: Result<Json<QuizRequest>, JsonRejection>,
) -> ApiResponse<Json<QuizRound>> {
    let Json(request) = body?;
    let selector = request.quiz_category;
    if let CategorySelector::Category(id) = selector {
        get_category(&pool, id).await?;
    }

    let question = next_question(&pool, selector, &request.previous_questions).await?;
    let label = selector.to_string();
    match &question {
        Some(q) => {
            QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
            tracing::debug!("Serving question {} for category {label}", q.id);
        }
        None => {
            QUIZ_ROUNDS_EXHAUSTED.inc();
            tracing::debug!("No questions left for category {label}");
        }
    }

    Ok(Json(QuizRound {
        success: true,
        question,
    }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/quizzes", post(play))
}
