// ABOUTME: Authentication gate: sign-in, sign-out, role checks and session record lifecycle
// ABOUTME: Also provisions users and their roles for administrators

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, ModelTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::{timestamp, LogManager};
use crate::access::{authorize, has_role, Access, RoleName};
use crate::connector::Context;
use crate::crypto;
use crate::entities::{role, session, user, user_role};
use crate::error::{Error, Result};
use crate::seed;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub name_first: String,
    pub name_last: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct UserManager {
    db: DatabaseConnection,
    logs: LogManager,
}

impl UserManager {
    pub fn new(db: DatabaseConnection, logs: LogManager) -> Self {
        Self { db, logs }
    }

    /// Opens a session for `login`.
    ///
    /// Signing in again as the user already signed in returns the open
    /// session. Any session the user left open elsewhere is closed first,
    /// so a user never has more than one open session.
    pub async fn sign_in(
        &self,
        context: &mut Context,
        login: &str,
        password: &str,
    ) -> Result<session::Model> {
        if let (Some(current), Some(open)) = (context.user(), context.session()) {
            let still_open = session::Entity::find_by_id(open.id)
                .filter(session::Column::EndedAt.is_null())
                .one(&self.db)
                .await?;
            match still_open {
                Some(open) => {
                    if current.login != login {
                        return Err(Error::AlreadySignedIn(current.login.clone()));
                    }
                    if !crypto::verify_password(password, &current.password_hash) {
                        return Err(Error::Authentication(login.to_string()));
                    }
                    return Ok(open);
                }
                None => {
                    tracing::info!("Dropping closed session of @{}", current.login);
                    context.clear();
                }
            }
        }

        let found = user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await?;
        let user = match found {
            Some(user) if user.active && crypto::verify_password(password, &user.password_hash) => {
                user
            }
            _ => {
                tracing::warn!("Failed sign-in attempt for @{}", login);
                return Err(Error::Authentication(login.to_string()));
            }
        };

        let now = timestamp();
        let txn = self.db.begin().await?;
        let stale = session::Entity::update_many()
            .col_expr(session::Column::EndedAt, Expr::value(now))
            .filter(session::Column::UserId.eq(user.id))
            .filter(session::Column::EndedAt.is_null())
            .exec(&txn)
            .await?;
        if stale.rows_affected > 0 {
            tracing::warn!(
                "Closed {} stale session(s) of @{}",
                stale.rows_affected,
                user.login
            );
        }

        let opened = session::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            token: Set(Uuid::new_v4().to_string()),
            started_at: Set(now),
            ended_at: Set(None),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!("User @{} signed in", user.login);
        context.set_user(Some(user));
        context.set_session(Some(opened.clone()));
        self.audit(context, &format!("User @{} signed in", login)).await;

        Ok(opened)
    }

    /// Closes the open session. Does nothing when signed out.
    pub async fn sign_out(&self, context: &mut Context) -> Result<()> {
        let (login, open) = match (context.user(), context.session()) {
            (Some(user), Some(open)) => (user.login.clone(), open.clone()),
            _ => return Ok(()),
        };
        self.audit(context, &format!("User @{} signed out", login)).await;

        // A session closed by a newer sign-in keeps its original end time.
        let txn = self.db.begin().await?;
        session::Entity::update_many()
            .col_expr(session::Column::EndedAt, Expr::value(timestamp()))
            .filter(session::Column::Id.eq(open.id))
            .filter(session::Column::EndedAt.is_null())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        context.clear();
        tracing::info!("User @{} signed out", login);
        Ok(())
    }

    pub fn signed_in(&self, context: &Context) -> bool {
        context.signed_in()
    }

    pub fn current_session<'a>(&self, context: &'a Context) -> Option<&'a session::Model> {
        context.session()
    }

    pub async fn check_if_user_is_administrator(&self, context: &Context) -> Result<bool> {
        match context.user() {
            Some(user) if context.signed_in() => {
                has_role(&self.db, user, RoleName::Administrator).await
            }
            _ => Ok(false),
        }
    }

    pub async fn create_user(
        &self,
        context: &Context,
        new_user: &NewUser,
        roles: &[RoleName],
    ) -> Result<user::Model> {
        let actor = authorize(&self.db, context, Access::Role(RoleName::Administrator)).await?;

        let txn = self.db.begin().await?;
        let created = insert_user(&txn, new_user, roles).await?;
        txn.commit().await?;

        tracing::info!("User @{} created by @{}", created.login, actor.user.login);
        self.audit(
            context,
            &format!("User @{} created by @{}", created.login, actor.user.login),
        )
        .await;
        Ok(created)
    }

    pub async fn set_user_active(
        &self,
        context: &Context,
        login: &str,
        active: bool,
    ) -> Result<user::Model> {
        authorize(&self.db, context, Access::Role(RoleName::Administrator)).await?;

        let txn = self.db.begin().await?;
        let found = user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .one(&txn)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user @{}", login)))?;
        let mut changed: user::ActiveModel = found.into();
        changed.active = Set(active);
        let updated = changed.update(&txn).await?;
        txn.commit().await?;

        tracing::info!("User @{} active: {}", login, active);
        Ok(updated)
    }

    pub async fn roles(&self, context: &Context, login: &str) -> Result<Vec<String>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let found = user::Entity::find()
            .filter(user::Column::Login.eq(login))
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user @{}", login)))?;
        let mut names: Vec<String> = found
            .find_related(role::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect();
        names.sort();
        Ok(names)
    }

    // Audit failures never fail the operation being audited.
    async fn audit(&self, context: &Context, text: &str) {
        if let Err(err) = self.logs.record(context, seed::INFORMATION, text).await {
            tracing::warn!("Could not write audit record: {}", err);
        }
    }
}

/// Inserts a user and links the named roles. Uniqueness violations on
/// login or email surface as `DuplicateName`.
pub(crate) async fn insert_user<C: ConnectionTrait>(
    conn: &C,
    new_user: &NewUser,
    roles: &[RoleName],
) -> Result<user::Model> {
    let digest = crypto::hash_password(&new_user.password)?;
    let created = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        login: Set(new_user.login.clone()),
        password_hash: Set(digest),
        name_first: Set(new_user.name_first.clone()),
        name_last: Set(new_user.name_last.clone()),
        email: Set(new_user.email.clone()),
        active: Set(true),
        created_at: Set(timestamp()),
    }
    .insert(conn)
    .await
    .map_err(|err| Error::from_write(err, "user", &new_user.login))?;

    for required in roles {
        let role_row = role::Entity::find()
            .filter(role::Column::Name.eq(required.as_str()))
            .one(conn)
            .await?
            .ok_or_else(|| Error::NotFound(format!("role {}", required.as_str())))?;
        user_role::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(created.id),
            role_id: Set(role_row.id),
        }
        .insert(conn)
        .await?;
    }

    Ok(created)
}
