// ABOUTME: Single authorization gate used by every manager operation
// ABOUTME: Checks the signed-in state and, where required, the actor's role membership

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
};

use crate::connector::Context;
use crate::entities::{role, session, user};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleName {
    Administrator,
    User,
    System,
    Bot,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::Administrator,
        RoleName::User,
        RoleName::System,
        RoleName::Bot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleName::Administrator => "administrator",
            RoleName::User => "user",
            RoleName::System => "system",
            RoleName::Bot => "bot",
        }
    }
}

/// What an operation demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Role(RoleName),
}

/// The signed-in user and session an authorized operation runs as.
#[derive(Debug, Clone, Copy)]
pub struct Actor<'a> {
    pub user: &'a user::Model,
    pub session: &'a session::Model,
}

pub async fn authorize<'a, C>(conn: &C, context: &'a Context, access: Access) -> Result<Actor<'a>>
where
    C: ConnectionTrait,
{
    let (user, session) = match (context.user(), context.session()) {
        (Some(user), Some(session)) => (user, session),
        _ => return Err(Error::NotAuthenticated),
    };
    ensure_live(conn, user, session).await?;

    if let Access::Role(required) = access {
        if !has_role(conn, user, required).await? {
            tracing::warn!(
                "User @{} denied: {} role required",
                user.login,
                required.as_str()
            );
            return Err(Error::Authorization {
                login: user.login.clone(),
                role: required.as_str(),
            });
        }
    }

    Ok(Actor { user, session })
}

/// The cached context can outlive its rows: another sign-in may have closed
/// the session, or an administrator may have deactivated the user.
async fn ensure_live<C>(conn: &C, user: &user::Model, session: &session::Model) -> Result<()>
where
    C: ConnectionTrait,
{
    let open = session::Entity::find_by_id(session.id)
        .filter(session::Column::EndedAt.is_null())
        .filter(session::Column::UserId.eq(user.id))
        .count(conn)
        .await?;
    if open == 0 {
        tracing::warn!("Session of @{} is no longer open", user.login);
        return Err(Error::NotAuthenticated);
    }

    let active = user::Entity::find_by_id(user.id)
        .filter(user::Column::Active.eq(true))
        .count(conn)
        .await?;
    if active == 0 {
        tracing::warn!("User @{} is no longer active", user.login);
        return Err(Error::NotAuthenticated);
    }
    Ok(())
}

pub async fn has_role<C>(conn: &C, user: &user::Model, role: RoleName) -> Result<bool>
where
    C: ConnectionTrait,
{
    let matching = user
        .find_related(role::Entity)
        .filter(role::Column::Name.eq(role.as_str()))
        .count(conn)
        .await?;
    Ok(matching > 0)
}
