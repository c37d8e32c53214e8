// ABOUTME: Per-project version marker, last write wins
// ABOUTME: The marker row is upserted inside one transaction

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::{fetch, timestamp};
use crate::access::{authorize, Access};
use crate::connector::Context;
use crate::entities::{project, project_version};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct VersionManager {
    db: DatabaseConnection,
}

impl VersionManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the version marker of `project_id`.
    pub async fn set_version(
        &self,
        context: &Context,
        project_id: Uuid,
        value: &str,
    ) -> Result<project_version::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        fetch::<project::Entity, _>(&txn, project_id, "project").await?;

        let existing = project_version::Entity::find()
            .filter(project_version::Column::ProjectId.eq(project_id))
            .one(&txn)
            .await?;
        let marker = match existing {
            Some(found) => {
                let mut changed: project_version::ActiveModel = found.into();
                changed.value = Set(value.to_string());
                changed.session_id = Set(actor.session.id);
                changed.updated_at = Set(timestamp());
                changed.update(&txn).await?
            }
            None => {
                project_version::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    project_id: Set(project_id),
                    value: Set(value.to_string()),
                    session_id: Set(actor.session.id),
                    updated_at: Set(timestamp()),
                }
                .insert(&txn)
                .await?
            }
        };
        txn.commit().await?;

        tracing::info!("Project {} version set to {}", project_id, value);
        Ok(marker)
    }

    pub async fn get_version(&self, context: &Context, project_id: Uuid) -> Result<Option<String>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let marker = project_version::Entity::find()
            .filter(project_version::Column::ProjectId.eq(project_id))
            .one(&self.db)
            .await?;
        Ok(marker.map(|found| found.value))
    }
}
