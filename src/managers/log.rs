// ABOUTME: Append-only audit log writer tied to the active session and project
// ABOUTME: Categories are seeded at install time and never created on demand

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::timestamp;
use crate::access::{authorize, Access};
use crate::connector::Context;
use crate::entities::{log, log_category};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct LogManager {
    db: DatabaseConnection,
}

impl LogManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record(&self, context: &Context, category: &str, text: &str) -> Result<log::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        let category_row = log_category::Entity::find()
            .filter(log_category::Column::Category.eq(category))
            .one(&txn)
            .await?
            .ok_or_else(|| Error::CategoryNotFound(category.to_string()))?;

        let sequence = log::Entity::find()
            .order_by_desc(log::Column::Sequence)
            .one(&txn)
            .await?
            .map_or(1, |last| last.sequence + 1);

        let entry = log::ActiveModel {
            id: Set(Uuid::new_v4()),
            record: Set(text.to_string()),
            category_id: Set(category_row.id),
            session_id: Set(actor.session.id),
            project_id: Set(context.project().map(|project| project.id)),
            sequence: Set(sequence),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::debug!("[{}] @{}: {}", category, actor.user.login, text);
        Ok(entry)
    }

    /// Records written while `project_id` was open, in write order.
    pub async fn project_logs(&self, context: &Context, project_id: Uuid) -> Result<Vec<log::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let entries = log::Entity::find()
            .filter(log::Column::ProjectId.eq(project_id))
            .order_by_asc(log::Column::Sequence)
            .all(&self.db)
            .await?;
        Ok(entries)
    }

    /// Records written in one session, in write order.
    pub async fn session_logs(&self, context: &Context, session_id: Uuid) -> Result<Vec<log::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let entries = log::Entity::find()
            .filter(log::Column::SessionId.eq(session_id))
            .order_by_asc(log::Column::Sequence)
            .all(&self.db)
            .await?;
        Ok(entries)
    }
}
