// ABOUTME: Composition roots: Installer bootstraps schema and seed data, Client wires the managers
// ABOUTME: Both share one Connector and keep the request Context for the caller

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use sea_orm_migration::{MigratorTrait, SchemaManager};
use std::path::Path;
use uuid::Uuid;

use crate::access::RoleName;
use crate::config::ConnectionConfig;
use crate::connector::{Connector, Context};
use crate::crypto;
use crate::entities::{log_category, parameter_type, role, session, user};
use crate::error::{is_unique_violation, Error, Result};
use crate::managers::parameter::insert_parameter_type;
use crate::managers::user::insert_user;
use crate::managers::{
    timestamp, EquipmentManager, LogManager, NewUser, ParameterManager, ProjectManager,
    UserManager, VersionManager,
};
use crate::migration::Migrator;
use crate::seed;

/// Everyday handle on an installed store.
pub struct Client {
    pub connector: Connector,
    pub context: Context,
    pub users: UserManager,
    pub logs: LogManager,
    pub versions: VersionManager,
    pub projects: ProjectManager,
    pub parameters: ParameterManager,
    pub equipment: EquipmentManager,
}

impl Client {
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let connector = Connector::connect(config).await?;
        Self::from_connector(connector).await
    }

    pub async fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let connector = Connector::from_config_file(path).await?;
        Self::from_connector(connector).await
    }

    pub(crate) async fn from_connector(connector: Connector) -> Result<Self> {
        let db = connector.db().clone();
        let installed = SchemaManager::new(&db).has_table("users").await?;
        let found = if installed {
            user::Entity::find()
                .filter(user::Column::Login.eq(seed::SERVICE_ACCOUNT_LOGIN))
                .one(&db)
                .await?
        } else {
            None
        };
        let service_account = found.ok_or_else(|| {
            Error::NotFound(format!(
                "service account @{}; run the installer first",
                seed::SERVICE_ACCOUNT_LOGIN
            ))
        })?;

        let logs = LogManager::new(db.clone());
        Ok(Self {
            users: UserManager::new(db.clone(), logs.clone()),
            versions: VersionManager::new(db.clone()),
            projects: ProjectManager::new(db.clone()),
            parameters: ParameterManager::new(db.clone()),
            equipment: EquipmentManager::new(db),
            logs,
            context: Context::new(Some(service_account)),
            connector,
        })
    }

    pub fn db(&self) -> &DatabaseConnection {
        self.connector.db()
    }

    pub async fn sign_in(&mut self, login: &str, password: &str) -> Result<session::Model> {
        self.users.sign_in(&mut self.context, login, password).await
    }

    pub async fn sign_out(&mut self) -> Result<()> {
        self.users.sign_out(&mut self.context).await
    }

    pub fn signed_in(&self) -> bool {
        self.users.signed_in(&self.context)
    }

    pub async fn check_if_user_is_administrator(&self) -> Result<bool> {
        self.users.check_if_user_is_administrator(&self.context).await
    }

    /// Signs out, closing the open session, and releases the handle.
    pub async fn close(mut self) -> Result<()> {
        self.sign_out().await?;
        tracing::debug!("Client closed");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub administrator_password: String,
    pub administrator_email: Option<String>,
    /// Drop every table and start from an empty schema.
    pub overwrite: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            administrator_password: seed::DEFAULT_ADMINISTRATOR_PASSWORD.to_string(),
            administrator_email: None,
            overwrite: false,
        }
    }
}

/// Creates the schema and seed data. Installing again without `overwrite`
/// leaves existing rows untouched.
#[derive(Debug, Clone, Default)]
pub struct Installer {
    options: InstallOptions,
}

impl Installer {
    pub fn new(options: InstallOptions) -> Self {
        Self { options }
    }

    pub async fn install(&self, config: &ConnectionConfig) -> Result<Client> {
        let connector = Connector::connect(config).await?;
        let db = connector.db().clone();

        if self.options.overwrite {
            tracing::warn!("Dropping existing schema before install");
            Migrator::reset(&db).await?;
        }
        Migrator::up(&db, None).await?;
        tracing::info!("Schema is up to date");

        seed_log_categories(&db).await?;
        seed_roles(&db).await?;
        seed_system_accounts(&db).await?;
        self.seed_administrator(&db).await?;

        let mut client = Client::from_connector(connector).await?;
        match client
            .sign_in(seed::ADMINISTRATOR_LOGIN, &self.options.administrator_password)
            .await
        {
            Ok(opened) => {
                seed_parameter_types(&db, Some(opened.id)).await?;
                client.sign_out().await?;
            }
            Err(Error::Authentication(_)) => {
                tracing::warn!(
                    "Administrator password differs from the installed one; seeding parameter types without a session"
                );
                seed_parameter_types(&db, None).await?;
            }
            Err(err) => return Err(err),
        }

        tracing::info!("Installation complete");
        Ok(client)
    }

    async fn seed_administrator(&self, db: &DatabaseConnection) -> Result<()> {
        if login_exists(db, seed::ADMINISTRATOR_LOGIN).await? {
            tracing::info!("Administrator @{} already installed", seed::ADMINISTRATOR_LOGIN);
            return Ok(());
        }

        let administrator = NewUser {
            login: seed::ADMINISTRATOR_LOGIN.to_string(),
            password: self.options.administrator_password.clone(),
            name_first: "Storage".to_string(),
            name_last: "Administrator".to_string(),
            email: self
                .options
                .administrator_email
                .clone()
                .unwrap_or_else(|| seed::DEFAULT_ADMINISTRATOR_EMAIL.to_string()),
        };
        let txn = db.begin().await?;
        match insert_user(&txn, &administrator, seed::ADMINISTRATOR_ROLES).await {
            Ok(_) => {
                txn.commit().await?;
                tracing::info!("Administrator @{} installed", administrator.login);
            }
            Err(Error::DuplicateName { name, .. }) => {
                tracing::warn!("Skipping duplicate administrator @{}", name);
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

async fn login_exists(db: &DatabaseConnection, login: &str) -> Result<bool> {
    let found = user::Entity::find()
        .filter(user::Column::Login.eq(login))
        .count(db)
        .await?;
    Ok(found > 0)
}

async fn seed_log_categories(db: &DatabaseConnection) -> Result<()> {
    for (category, description) in seed::DEFAULT_LOG_CATEGORIES {
        let exists = log_category::Entity::find()
            .filter(log_category::Column::Category.eq(*category))
            .count(db)
            .await?;
        if exists > 0 {
            continue;
        }

        let txn = db.begin().await?;
        let inserted = log_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            category: Set(category.to_string()),
            description: Set(Some(description.to_string())),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await;
        match inserted {
            Ok(_) => txn.commit().await?,
            Err(err) if is_unique_violation(&err) => {
                tracing::warn!("Skipping duplicate log category {:?}", category);
            }
            Err(err) => return Err(err.into()),
        }
    }
    tracing::info!("Log categories seeded");
    Ok(())
}

async fn seed_roles(db: &DatabaseConnection) -> Result<()> {
    for seeded in seed::DEFAULT_ROLES {
        let name = seeded.role.as_str();
        let exists = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .count(db)
            .await?;
        if exists > 0 {
            continue;
        }

        let txn = db.begin().await?;
        let inserted = role::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(seeded.description.to_string())),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await;
        match inserted {
            Ok(_) => txn.commit().await?,
            Err(err) if is_unique_violation(&err) => {
                tracing::warn!("Skipping duplicate role {}", name);
            }
            Err(err) => return Err(err.into()),
        }
    }
    tracing::info!("Roles seeded: {}", RoleName::ALL.len());
    Ok(())
}

async fn seed_system_accounts(db: &DatabaseConnection) -> Result<()> {
    for account in seed::SYSTEM_ACCOUNTS {
        if login_exists(db, account.login).await? {
            continue;
        }

        let new_user = NewUser {
            login: account.login.to_string(),
            password: crypto::generate_password(),
            name_first: account.name_first.to_string(),
            name_last: account.name_last.to_string(),
            email: account.email.to_string(),
        };
        let txn = db.begin().await?;
        match insert_user(&txn, &new_user, account.roles).await {
            Ok(_) => {
                txn.commit().await?;
                tracing::info!("System account @{} installed", account.login);
            }
            Err(Error::DuplicateName { name, .. }) => {
                tracing::warn!("Skipping duplicate system account @{}", name);
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

async fn seed_parameter_types(db: &DatabaseConnection, session_id: Option<Uuid>) -> Result<()> {
    for (name, description) in seed::DEFAULT_PARAMETER_TYPES {
        let exists = parameter_type::Entity::find()
            .filter(parameter_type::Column::Name.eq(*name))
            .count(db)
            .await?;
        if exists > 0 {
            continue;
        }

        let txn = db.begin().await?;
        match insert_parameter_type(&txn, name, Some(*description), session_id).await {
            Ok(_) => txn.commit().await?,
            Err(Error::DuplicateName { .. }) => {
                tracing::warn!("Skipping duplicate parameter type {:?}", name);
            }
            Err(err) => return Err(err),
        }
    }
    tracing::info!("Parameter types seeded");
    Ok(())
}
