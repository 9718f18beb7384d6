//! PostgreSQL implementation of MessageRepository.
//!
//! Reasoning is not stored on messages; reads join it from the newest
//! negotiation log entry that points at the message. The partial unique
//! index `messages_one_pending_draft` backs the one-draft-per-item rule.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ItemId, MessageId, Timestamp};
use crate::domain::negotiation::{DraftState, Message, NegotiationLog};
use crate::ports::MessageRepository;

use super::negotiation_log_repository::insert_log;
use super::{column, is_unique_violation, optional_price_column, user_column};

const SELECT_MESSAGE: &str = r#"
    SELECT m.id, m.item_id, m.sender_id, m.content, m.is_ai_response, m.state,
           m.suggested_price, m.created_at,
           (SELECT l.ai_reasoning FROM negotiation_logs l
             WHERE l.message_id = m.id
             ORDER BY l.created_at DESC, l.id DESC
             LIMIT 1) AS reasoning
    FROM messages m
"#;

const INSERT_MESSAGE: &str = r#"
    INSERT INTO messages (
        id, item_id, sender_id, content, is_ai_response, state, suggested_price, created_at
    ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguish "gone" from "no longer pending" after a conditional write missed.
    async fn miss_error(&self, id: &MessageId) -> DomainError {
        let exists = sqlx::query_as::<_, (bool,)>(
            "SELECT EXISTS (SELECT 1 FROM messages WHERE id = $1)",
        )
        .bind(id.as_uuid())
        .fetch_one(&self.pool)
        .await;

        match exists {
            Ok((true,)) => {
                DomainError::conflict(format!("Message {} is no longer a pending draft", id))
            }
            Ok((false,)) => DomainError::message_not_found(id),
            Err(e) => DomainError::database("Failed to check message existence", e),
        }
    }
}

fn insert_error(err: sqlx::Error, message: &Message) -> DomainError {
    if is_unique_violation(&err) {
        DomainError::conflict(format!(
            "Item {} already has a pending draft",
            message.item_id
        ))
    } else {
        DomainError::database("Failed to insert message", err)
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: &Message) -> Result<(), DomainError> {
        sqlx::query(INSERT_MESSAGE)
            .bind(message.id.as_uuid())
            .bind(message.item_id.as_uuid())
            .bind(message.sender_id.as_str())
            .bind(&message.content)
            .bind(message.is_ai_response)
            .bind(message.state.as_str())
            .bind(message.suggested_price.map(|p| p.amount()))
            .bind(message.created_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, message))?;

        Ok(())
    }

    async fn replace_pending_draft(
        &self,
        draft: &Message,
        log: &NegotiationLog,
    ) -> Result<Option<MessageId>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let replaced: Option<(uuid::Uuid,)> = sqlx::query_as(
            r#"
            DELETE FROM messages
            WHERE item_id = $1 AND is_ai_response AND state = 'pending'
            RETURNING id
            "#,
        )
        .bind(draft.item_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to remove pending draft", e))?;

        sqlx::query(INSERT_MESSAGE)
            .bind(draft.id.as_uuid())
            .bind(draft.item_id.as_uuid())
            .bind(draft.sender_id.as_str())
            .bind(&draft.content)
            .bind(draft.is_ai_response)
            .bind(draft.state.as_str())
            .bind(draft.suggested_price.map(|p| p.amount()))
            .bind(draft.created_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error(e, draft))?;

        insert_log(&mut *tx, log).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit draft replacement", e))?;

        Ok(replaced.map(|(id,)| MessageId::from_uuid(id)))
    }

    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE m.item_id = $1 ORDER BY m.created_at ASC, m.id ASC",
            SELECT_MESSAGE
        ))
        .bind(item_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch messages", e))?;

        rows.iter().map(row_to_message).collect()
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE m.id = $1", SELECT_MESSAGE))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch message", e))?;

        row.map(|row| row_to_message(&row)).transpose()
    }

    async fn find_pending_draft(&self, item_id: &ItemId) -> Result<Option<Message>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE m.item_id = $1 AND m.is_ai_response AND m.state = 'pending'",
            SELECT_MESSAGE
        ))
        .bind(item_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch pending draft", e))?;

        row.map(|row| row_to_message(&row)).transpose()
    }

    async fn approve(&self, id: &MessageId) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE messages SET state = 'approved'
            WHERE id = $1 AND is_ai_response AND state = 'pending'
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to approve draft", e))?;

        if result.rows_affected() == 0 {
            return Err(self.miss_error(id).await);
        }
        Ok(())
    }

    async fn delete_pending_draft(&self, id: &MessageId) -> Result<(), DomainError> {
        let result = sqlx::query(
            "DELETE FROM messages WHERE id = $1 AND is_ai_response AND state = 'pending'",
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to delete draft", e))?;

        if result.rows_affected() == 0 {
            return Err(self.miss_error(id).await);
        }
        Ok(())
    }
}

fn row_to_message(row: &PgRow) -> Result<Message, DomainError> {
    let state: String = column(row, "state")?;
    let state: DraftState = state.parse()?;

    Ok(Message {
        id: MessageId::from_uuid(column(row, "id")?),
        item_id: ItemId::from_uuid(column(row, "item_id")?),
        sender_id: user_column(row, "sender_id")?,
        content: column(row, "content")?,
        is_ai_response: column(row, "is_ai_response")?,
        state,
        suggested_price: optional_price_column(row, "suggested_price")?,
        reasoning: column(row, "reasoning")?,
        created_at: Timestamp::from_datetime(column(row, "created_at")?),
    })
}
