// ABOUTME: Entity managers operating on the shared database handle
// ABOUTME: Each call takes the request Context explicitly and runs in its own transaction

use sea_orm::{ConnectionTrait, EntityTrait, PrimaryKeyTrait};
use uuid::Uuid;

use crate::error::{Error, Result};

pub mod equipment;
pub mod log;
pub mod parameter;
pub mod project;
pub mod user;
pub mod version;

pub use equipment::{EquipmentManager, NewEquipment};
pub use log::LogManager;
pub use parameter::{NewParameter, ParameterManager, ParameterValue};
pub use project::ProjectManager;
pub use user::{NewUser, UserManager};
pub use version::VersionManager;

pub(crate) fn timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Loads a row by primary key, failing with `NotFound` when it is missing.
pub(crate) async fn fetch<E, C>(conn: &C, id: Uuid, kind: &str) -> Result<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    Uuid: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    E::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("{} {}", kind, id)))
}
