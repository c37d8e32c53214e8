// ABOUTME: Equipment entity linked to a manufacturer, a category and an assembly
// ABOUTME: (name, serial_number) is unique; parameters and measurement types attach many-to-many

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub serial_number: String,
    pub manufacturer_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub assembly_id: Option<Uuid>,
    pub description: Option<String>,
    pub session_id: Uuid,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::manufacturer::Entity",
        from = "Column::ManufacturerId",
        to = "super::manufacturer::Column::Id"
    )]
    Manufacturer,
    #[sea_orm(
        belongs_to = "super::equipment_category::Entity",
        from = "Column::CategoryId",
        to = "super::equipment_category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::equipment_assembly::Entity",
        from = "Column::AssemblyId",
        to = "super::equipment_assembly::Column::Id"
    )]
    Assembly,
}

impl Related<super::manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl Related<super::equipment_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::equipment_assembly::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assembly.def()
    }
}

impl Related<super::parameter::Entity> for Entity {
    fn to() -> RelationDef {
        super::equipment_parameter::Relation::Parameter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::equipment_parameter::Relation::Equipment.def().rev())
    }
}

impl Related<super::measurement_type::Entity> for Entity {
    fn to() -> RelationDef {
        super::equipment_measurement_type::Relation::MeasurementType.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::equipment_measurement_type::Relation::Equipment.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
