// ABOUTME: Parameter entity with a typed value stored as JSON text
// ABOUTME: Parameters are attached to equipment through equipment_parameters

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parameters")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub type_id: Uuid,
    pub value: String, // JSON encoded ParameterValue
    pub unit: Option<String>,
    pub description: Option<String>,
    pub session_id: Uuid,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parameter_type::Entity",
        from = "Column::TypeId",
        to = "super::parameter_type::Column::Id"
    )]
    ParameterType,
    #[sea_orm(has_many = "super::equipment_parameter::Entity")]
    EquipmentParameters,
}

impl Related<super::parameter_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParameterType.def()
    }
}

impl Related<super::equipment_parameter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EquipmentParameters.def()
    }
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        super::equipment_parameter::Relation::Equipment.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::equipment_parameter::Relation::Parameter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
