// ABOUTME: Parameter types and typed parameter values stored as tagged JSON
// ABOUTME: Only administrators add parameter types; any signed-in user records parameters

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;
use crate::access::{authorize, Access, RoleName};
use crate::connector::Context;
use crate::entities::{parameter, parameter_type};
use crate::error::{Error, Result};
use crate::seed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParameterValue {
    Numeric { value: f64 },
    Range { start: f64, stop: f64 },
    Text { value: String },
    Boolean { value: bool },
}

impl ParameterValue {
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            ParameterValue::Range { start, stop } => Some((*start, *stop)),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Numeric { .. } => "numeric",
            ParameterValue::Range { .. } => "range",
            ParameterValue::Text { .. } => "text",
            ParameterValue::Boolean { .. } => "boolean",
        }
    }

    /// JSON has no NaN or infinity, and a range must not run backwards.
    pub fn validate(&self) -> Result<()> {
        match self {
            ParameterValue::Numeric { value } if !value.is_finite() => Err(Error::InvalidValue(
                format!("numeric value {} is not finite", value),
            )),
            ParameterValue::Range { start, stop } if !start.is_finite() || !stop.is_finite() => {
                Err(Error::InvalidValue(format!(
                    "range {}..{} has a non-finite bound",
                    start, stop
                )))
            }
            ParameterValue::Range { start, stop } if start > stop => Err(Error::InvalidValue(
                format!("range start {} is above stop {}", start, stop),
            )),
            _ => Ok(()),
        }
    }

    /// Whether this value fits a parameter type of the given name. Types
    /// other than the seeded shaped ones accept any value.
    pub fn fits_type(&self, type_name: &str) -> bool {
        match type_name {
            seed::NUMERIC_VALUE => matches!(self, ParameterValue::Numeric { .. }),
            seed::NUMERIC_RANGE => matches!(self, ParameterValue::Range { .. }),
            seed::STRING_VALUE => matches!(self, ParameterValue::Text { .. }),
            seed::BOOLEAN_VALUE => matches!(self, ParameterValue::Boolean { .. }),
            _ => true,
        }
    }

    fn encode(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(self)?)
    }

    fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone)]
pub struct NewParameter {
    pub name: String,
    pub type_name: String,
    pub value: ParameterValue,
    pub unit: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ParameterManager {
    db: DatabaseConnection,
}

impl ParameterManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_parameter_type(
        &self,
        context: &Context,
        name: &str,
        description: Option<&str>,
    ) -> Result<parameter_type::Model> {
        let actor = authorize(&self.db, context, Access::Role(RoleName::Administrator)).await?;

        let txn = self.db.begin().await?;
        let created = insert_parameter_type(&txn, name, description, Some(actor.session.id)).await?;
        txn.commit().await?;

        tracing::info!("Parameter type {:?} created", name);
        Ok(created)
    }

    pub async fn parameter_types(&self, context: &Context) -> Result<Vec<parameter_type::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let all = parameter_type::Entity::find()
            .order_by_asc(parameter_type::Column::Name)
            .all(&self.db)
            .await?;
        Ok(all)
    }

    pub async fn create_parameter(
        &self,
        context: &Context,
        new_parameter: &NewParameter,
    ) -> Result<parameter::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;
        let encoded = new_parameter.value.encode()?;

        let txn = self.db.begin().await?;
        let kind = parameter_type::Entity::find()
            .filter(parameter_type::Column::Name.eq(&new_parameter.type_name))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                Error::NotFound(format!("parameter type {:?}", new_parameter.type_name))
            })?;
        if !new_parameter.value.fits_type(&kind.name) {
            return Err(Error::InvalidValue(format!(
                "{} value does not fit parameter type {:?}",
                new_parameter.value.kind(),
                kind.name
            )));
        }

        let created = parameter::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_parameter.name.clone()),
            type_id: Set(kind.id),
            value: Set(encoded),
            unit: Set(new_parameter.unit.clone()),
            description: Set(new_parameter.description.clone()),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!("Parameter {:?} ({}) created", new_parameter.name, kind.name);
        Ok(created)
    }

    pub fn parameter_value(&self, parameter: &parameter::Model) -> Result<ParameterValue> {
        ParameterValue::decode(&parameter.value)
    }

    /// The `(start, stop)` pair of a range parameter, `None` for other shapes.
    pub fn get_range_parameter_value(
        &self,
        parameter: &parameter::Model,
    ) -> Result<Option<(f64, f64)>> {
        Ok(self.parameter_value(parameter)?.range())
    }
}

pub(crate) async fn insert_parameter_type<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    description: Option<&str>,
    session_id: Option<Uuid>,
) -> Result<parameter_type::Model> {
    parameter_type::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        session_id: Set(session_id),
        created_at: Set(timestamp()),
    }
    .insert(conn)
    .await
    .map_err(|err| Error::from_write(err, "parameter type", name))
}
