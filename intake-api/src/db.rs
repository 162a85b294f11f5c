//! Form persistence operations
//!
//! Single-statement writes only: a denied update never reaches this module,
//! and each write that does is atomic at the store level.

use intake_common::db::models::Form;
use intake_common::Result;
use sqlx::SqlitePool;

use crate::listing::QueryPlan;

/// Field set for a new form row
pub struct NewForm<'a> {
    pub id: &'a str,
    pub question: &'a str,
    pub answer: Option<&'a str>,
    pub urgency: Option<&'a str>,
    pub created_at: &'a str,
}

/// Insert a new form with status draft
pub async fn insert_form(pool: &SqlitePool, form: &NewForm<'_>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO forms (id, question, answer, urgency, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'draft', ?, ?)
        "#,
    )
    .bind(form.id)
    .bind(form.question)
    .bind(form.answer)
    .bind(form.urgency)
    .bind(form.created_at)
    .bind(form.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Current status of a form, or None when the id is unknown
pub async fn get_status(pool: &SqlitePool, id: &str) -> Result<Option<String>> {
    let status = sqlx::query_scalar("SELECT status FROM forms WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(status)
}

/// Update status only; the stored answer and urgency keep their values
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: &str,
    updated_at: &str,
) -> Result<()> {
    sqlx::query("UPDATE forms SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Replace answer, urgency, and status in one atomic write
pub async fn update_answer_and_status(
    pool: &SqlitePool,
    id: &str,
    answer: &str,
    urgency: &str,
    status: &str,
    updated_at: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE forms
        SET answer = ?, urgency = ?, status = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(answer)
    .bind(urgency)
    .bind(status)
    .bind(updated_at)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Execute a listing query plan
pub async fn list_forms(pool: &SqlitePool, plan: &QueryPlan) -> Result<Vec<Form>> {
    let mut query = sqlx::query_as::<_, Form>(&plan.sql);
    for bind in &plan.binds {
        query = query.bind(bind);
    }

    let rows = query
        .bind(plan.limit)
        .bind(plan.offset)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
