// ABOUTME: Association entity attaching measurement types to equipment
// ABOUTME: The (equipment_id, measurement_type_id) pair is unique

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment_measurement_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub equipment_id: Uuid,
    pub measurement_type_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::equipment::Entity",
        from = "Column::EquipmentId",
        to = "super::equipment::Column::Id"
    )]
    Equipment,
    #[sea_orm(
        belongs_to = "super::measurement_type::Entity",
        from = "Column::MeasurementTypeId",
        to = "super::measurement_type::Column::Id"
    )]
    MeasurementType,
}

impl Related<super::equipment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Equipment.def()
    }
}

impl Related<super::measurement_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MeasurementType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
