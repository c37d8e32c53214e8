// ABOUTME: Project records and the current-project slot of the request context
// ABOUTME: Projects are owned by the user who created them

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use uuid::Uuid;

use super::{fetch, timestamp};
use crate::access::{authorize, Access};
use crate::connector::Context;
use crate::entities::project;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct ProjectManager {
    db: DatabaseConnection,
}

impl ProjectManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_project(
        &self,
        context: &Context,
        name: &str,
        description: Option<&str>,
    ) -> Result<project::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        let created = project::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
            owner_id: Set(actor.user.id),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!("Project {:?} created by @{}", name, actor.user.login);
        Ok(created)
    }

    /// Makes `project_id` the current project of the context.
    pub async fn open_project(&self, context: &mut Context, project_id: Uuid) -> Result<project::Model> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let opened = fetch::<project::Entity, _>(&self.db, project_id, "project").await?;
        context.set_project(Some(opened.clone()));
        tracing::info!("Project {:?} opened", opened.name);
        Ok(opened)
    }

    pub fn close_project(&self, context: &mut Context) {
        if let Some(closed) = context.project() {
            tracing::info!("Project {:?} closed", closed.name);
        }
        context.set_project(None);
    }

    pub async fn projects(&self, context: &Context) -> Result<Vec<project::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let all = project::Entity::find()
            .order_by_asc(project::Column::Name)
            .all(&self.db)
            .await?;
        Ok(all)
    }
}
