// src/db/message_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::message::SentMessage};

#[derive(Clone)]
pub struct MessageRepository;

impl MessageRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        user_id: Uuid,
        sent_date: NaiveDate,
        note: Option<&str>,
    ) -> Result<SentMessage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let message = sqlx::query_as::<_, SentMessage>(
            r#"
            INSERT INTO sent_messages (client_id, user_id, sent_date, note)
            VALUES ($1, $2, $3, $4)
            RETURNING id, client_id, user_id, sent_date, note, created_at
            "#,
        )
        .bind(client_id)
        .bind(user_id)
        .bind(sent_date)
        .bind(note)
        .fetch_one(executor)
        .await?;

        Ok(message)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        client_id: Option<Uuid>,
    ) -> Result<Vec<SentMessage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let messages = sqlx::query_as::<_, SentMessage>(
            r#"
            SELECT id, client_id, user_id, sent_date, note, created_at
            FROM sent_messages
            WHERE ($1::uuid IS NULL OR client_id = $1)
            ORDER BY sent_date DESC, created_at DESC
            "#,
        )
        .bind(client_id)
        .fetch_all(executor)
        .await?;

        Ok(messages)
    }
}
