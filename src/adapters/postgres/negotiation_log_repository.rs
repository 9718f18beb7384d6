//! PostgreSQL implementation of NegotiationLogRepository.

use async_trait::async_trait;
use sqlx::postgres::{PgExecutor, PgRow};
use sqlx::PgPool;

use crate::domain::foundation::{
    DomainError, ItemId, MessageId, NegotiationLogId, Timestamp,
};
use crate::domain::negotiation::NegotiationLog;
use crate::ports::NegotiationLogRepository;

use super::{column, price_column, user_column};

#[derive(Clone)]
pub struct PostgresNegotiationLogRepository {
    pool: PgPool,
}

impl PostgresNegotiationLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NegotiationLogRepository for PostgresNegotiationLogRepository {
    async fn create(&self, log: &NegotiationLog) -> Result<(), DomainError> {
        insert_log(&self.pool, log).await
    }

    async fn find_by_item(&self, item_id: &ItemId) -> Result<Vec<NegotiationLog>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, user_id, message_id, proposed_price, ai_decision,
                   counter_price, ai_reasoning, created_at
            FROM negotiation_logs
            WHERE item_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(item_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch negotiation logs", e))?;

        rows.iter().map(row_to_log).collect()
    }
}

/// Shared with the draft swap, which appends its entry inside a transaction.
pub(super) async fn insert_log<'e, E>(executor: E, log: &NegotiationLog) -> Result<(), DomainError>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO negotiation_logs (
            id, item_id, user_id, message_id, proposed_price, ai_decision,
            counter_price, ai_reasoning, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(log.id.as_uuid())
    .bind(log.item_id.as_uuid())
    .bind(log.user_id.as_str())
    .bind(log.message_id.map(|id| *id.as_uuid()))
    .bind(log.proposed_price.amount())
    .bind(log.decision_label())
    .bind(log.counter_price.amount())
    .bind(&log.reasoning)
    .bind(log.logged_at.as_datetime())
    .execute(executor)
    .await
    .map_err(|e| DomainError::database("Failed to insert negotiation log", e))?;

    Ok(())
}

fn row_to_log(row: &PgRow) -> Result<NegotiationLog, DomainError> {
    let label: String = column(row, "ai_decision")?;
    let (decision, is_retry) = NegotiationLog::parse_decision_label(&label)?;
    let message_id: Option<uuid::Uuid> = column(row, "message_id")?;

    Ok(NegotiationLog {
        id: NegotiationLogId::from_uuid(column(row, "id")?),
        item_id: ItemId::from_uuid(column(row, "item_id")?),
        user_id: user_column(row, "user_id")?,
        message_id: message_id.map(MessageId::from_uuid),
        proposed_price: price_column(row, "proposed_price")?,
        decision,
        is_retry,
        counter_price: price_column(row, "counter_price")?,
        reasoning: column(row, "ai_reasoning")?,
        logged_at: Timestamp::from_datetime(column(row, "created_at")?),
    })
}
