use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.category = ?1
ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(
        r#"
SELECT id, question, answer, category, difficulty
FROM questions
WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, new: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&new.question)
    .bind(&new.answer)
    .bind(new.category)
    .bind(new.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Fails with `RowNotFound` when nothing was deleted.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    let deleted = sqlx::query(
        r#"
DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();

    if deleted == 0 {
        return Err(sqlx::Error::RowNotFound);
    }
    Ok(())
}

pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (id) DO UPDATE SET
    question = excluded.question,
    answer = excluded.answer,
    category = excluded.category,
    difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_question(text: &str, category: i64) -> NewQuestion {
        NewQuestion {
            question: text.to_owned(),
            answer: "42".to_owned(),
            category,
            difficulty: 3,
        }
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("What is the answer?", 1))
            .await
            .unwrap();

        let stored = get_question_by_id(&pool, id).await.unwrap();
        assert_eq!(stored.question, "What is the answer?");
        assert_eq!(stored.category, 1);
        assert_eq!(stored.difficulty, 3);
    }

    #[tokio::test]
    async fn duplicate_question_is_unique_violation() {
        let pool = test_pool().await;
        create_question(&pool, &new_question("Twice?", 1)).await.unwrap();
        let err = create_question(&pool, &new_question("Twice?", 2))
            .await
            .unwrap_err();
        let db_err = err.as_database_error().expect("database error");
        assert!(db_err.is_unique_violation());
    }

    #[tokio::test]
    async fn unknown_category_is_foreign_key_violation() {
        let pool = test_pool().await;
        let err = create_question(&pool, &new_question("Orphan?", 99))
            .await
            .unwrap_err();
        let db_err = err.as_database_error().expect("database error");
        assert!(db_err.is_foreign_key_violation());
    }

    #[tokio::test]
    async fn questions_for_category_are_filtered_and_ordered() {
        let pool = test_pool().await;
        let a = create_question(&pool, &new_question("A?", 2)).await.unwrap();
        create_question(&pool, &new_question("B?", 3)).await.unwrap();
        let c = create_question(&pool, &new_question("C?", 2)).await.unwrap();

        let ids: Vec<i64> = get_questions_for_category(&pool, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.id)
            .collect();
        assert_eq!(ids, [a, c]);
    }

    #[tokio::test]
    async fn delete_missing_question_is_row_not_found() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("Gone?", 1)).await.unwrap();

        delete_question(&pool, id).await.unwrap();
        let err = delete_question(&pool, id).await.unwrap_err();
        assert!(matches!(err, sqlx::Error::RowNotFound));
    }

    #[tokio::test]
    async fn import_upserts_by_id() {
        let pool = test_pool().await;
        let id = create_question(&pool, &new_question("Old text?", 1)).await.unwrap();

        import_questions(
            &pool,
            vec![
                Question {
                    id,
                    question: "New text?".to_owned(),
                    answer: "yes".to_owned(),
                    category: 4,
                    difficulty: 1,
                },
                Question {
                    id: 100,
                    question: "Imported?".to_owned(),
                    answer: "yes".to_owned(),
                    category: 5,
                    difficulty: 5,
                },
            ],
        )
        .await
        .unwrap();

        let all = get_all_questions(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].question, "New text?");
        assert_eq!(all[0].category, 4);
        assert_eq!(all[1].id, 100);
    }
}
