use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions::get_questions_for_category},
        Category, Question,
    },
    pagination::{paginate, PageQuery},
    server::app::AppState,
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

/// `{id: type}` map the web client renders its category sidebar from.
pub(super) fn categories_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(CategoriesBody {
        success: true,
        categories: categories_map(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let Path(id) = path?;
    let Query(query) = query?;
    let category = categories::get_category(&pool, id).await?;
    let questions = get_questions_for_category(&pool, category.id).await?;

    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: paginate(&questions, query.page()).to_vec(),
        total_questions: questions.len(),
        current_category: category.kind,
    }))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
}
