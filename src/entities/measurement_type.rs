// ABOUTME: Self-referential measurement type entity with globally unique names
// ABOUTME: Subtypes point at their parent type through parent_id

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurement_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub session_id: Uuid,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        super::equipment_measurement_type::Relation::Equipment.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::equipment_measurement_type::Relation::MeasurementType.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
