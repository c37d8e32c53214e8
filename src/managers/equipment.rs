// ABOUTME: Equipment taxonomy manager: category and measurement type trees, manufacturers, assemblies
// ABOUTME: Many-to-many attachments are idempotent and tree moves are checked for cycles

use sea_orm::{
    sea_query::SimpleExpr, ActiveModelTrait, ColumnTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::{fetch, timestamp};
use crate::access::{authorize, Access, RoleName};
use crate::connector::Context;
use crate::entities::{
    assembly_part, equipment, equipment_assembly, equipment_category, equipment_measurement_type,
    equipment_parameter, manufacturer, measurement_type, parameter,
};
use crate::error::{is_unique_violation, Error, Result};
use crate::hierarchy::{build_forest, check_reparent, subtree_ids, TreeNode};

#[derive(Debug, Clone, Default)]
pub struct NewEquipment {
    pub name: String,
    pub serial_number: String,
    pub manufacturer_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub assembly_id: Option<Uuid>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EquipmentManager {
    db: DatabaseConnection,
}

impl EquipmentManager {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a category under `parent`, or a root category when `parent` is `None`.
    ///
    /// Sibling names are unique. The check runs inside the write transaction
    /// because engines treat NULL parents as distinct in unique indexes.
    pub async fn create_equipment_category(
        &self,
        context: &Context,
        name: &str,
        description: Option<&str>,
        parent: Option<Uuid>,
    ) -> Result<equipment_category::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        if let Some(parent_id) = parent {
            fetch::<equipment_category::Entity, _>(&txn, parent_id, "equipment category").await?;
        }
        let siblings = equipment_category::Entity::find()
            .filter(equipment_category::Column::Name.eq(name))
            .filter(parent_filter(parent))
            .count(&txn)
            .await?;
        if siblings > 0 {
            return Err(Error::DuplicateName {
                entity: "equipment category",
                name: name.to_string(),
            });
        }

        let created = equipment_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            parent_id: Set(parent),
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await
        .map_err(|err| Error::from_write(err, "equipment category", name))?;
        txn.commit().await?;

        tracing::info!("Equipment category {:?} created", name);
        Ok(created)
    }

    pub async fn get_equipment_categories_tree(
        &self,
        context: &Context,
        root: Option<Uuid>,
    ) -> Result<Vec<TreeNode>> {
        authorize(&self.db, context, Access::Authenticated).await?;
        let rows = equipment_category::Entity::find().all(&self.db).await?;
        build_forest(&rows, root)
    }

    pub async fn move_equipment_category(
        &self,
        context: &Context,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> Result<equipment_category::Model> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        let rows = equipment_category::Entity::find().all(&txn).await?;
        let node = rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("equipment category {}", id)))?;
        check_reparent(&rows, id, new_parent)?;
        if rows
            .iter()
            .any(|row| row.id != id && row.parent_id == new_parent && row.name == node.name)
        {
            return Err(Error::DuplicateName {
                entity: "equipment category",
                name: node.name,
            });
        }

        let name = node.name.clone();
        let mut moved: equipment_category::ActiveModel = node.into();
        moved.parent_id = Set(new_parent);
        let updated = moved
            .update(&txn)
            .await
            .map_err(|err| Error::from_write(err, "equipment category", name))?;
        txn.commit().await?;

        tracing::info!("Equipment category {:?} moved", updated.name);
        Ok(updated)
    }

    /// Deletes a category with its subcategories, the equipment filed under
    /// any of them and that equipment's attachments. Returns the number of
    /// categories removed.
    pub async fn delete_equipment_category(&self, context: &Context, id: Uuid) -> Result<usize> {
        authorize(&self.db, context, Access::Role(RoleName::Administrator)).await?;

        let txn = self.db.begin().await?;
        let rows = equipment_category::Entity::find().all(&txn).await?;
        if !rows.iter().any(|row| row.id == id) {
            return Err(Error::NotFound(format!("equipment category {}", id)));
        }
        let category_ids = subtree_ids(&rows, id);

        let equipment_ids: Vec<Uuid> = equipment::Entity::find()
            .filter(equipment::Column::CategoryId.is_in(category_ids.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();

        if !equipment_ids.is_empty() {
            equipment_parameter::Entity::delete_many()
                .filter(equipment_parameter::Column::EquipmentId.is_in(equipment_ids.clone()))
                .exec(&txn)
                .await?;
            equipment_measurement_type::Entity::delete_many()
                .filter(
                    equipment_measurement_type::Column::EquipmentId.is_in(equipment_ids.clone()),
                )
                .exec(&txn)
                .await?;
            assembly_part::Entity::delete_many()
                .filter(assembly_part::Column::EquipmentId.is_in(equipment_ids.clone()))
                .exec(&txn)
                .await?;
            equipment::Entity::delete_many()
                .filter(equipment::Column::Id.is_in(equipment_ids.clone()))
                .exec(&txn)
                .await?;
        }
        equipment_category::Entity::delete_many()
            .filter(equipment_category::Column::Id.is_in(category_ids.clone()))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Deleted {} equipment categories and {} equipment",
            category_ids.len(),
            equipment_ids.len()
        );
        Ok(category_ids.len())
    }

    pub async fn create_measurement_type(
        &self,
        context: &Context,
        name: &str,
        description: Option<&str>,
        parent: Option<Uuid>,
    ) -> Result<measurement_type::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        if let Some(parent_id) = parent {
            fetch::<measurement_type::Entity, _>(&txn, parent_id, "measurement type").await?;
        }
        let created = measurement_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            parent_id: Set(parent),
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await
        .map_err(|err| Error::from_write(err, "measurement type", name))?;
        txn.commit().await?;

        tracing::info!("Measurement type {:?} created", name);
        Ok(created)
    }

    pub async fn get_measurement_types_tree(
        &self,
        context: &Context,
        root: Option<Uuid>,
    ) -> Result<Vec<TreeNode>> {
        authorize(&self.db, context, Access::Authenticated).await?;
        let rows = measurement_type::Entity::find().all(&self.db).await?;
        build_forest(&rows, root)
    }

    pub async fn move_measurement_type(
        &self,
        context: &Context,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> Result<measurement_type::Model> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        let rows = measurement_type::Entity::find().all(&txn).await?;
        let node = rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("measurement type {}", id)))?;
        check_reparent(&rows, id, new_parent)?;

        let mut moved: measurement_type::ActiveModel = node.into();
        moved.parent_id = Set(new_parent);
        let updated = moved.update(&txn).await?;
        txn.commit().await?;

        tracing::info!("Measurement type {:?} moved", updated.name);
        Ok(updated)
    }

    pub async fn create_manufacturer(
        &self,
        context: &Context,
        name: &str,
        name_short: &str,
        description: Option<&str>,
    ) -> Result<manufacturer::Model> {
        let actor = authorize(&self.db, context, Access::Role(RoleName::Administrator)).await?;

        let txn = self.db.begin().await?;
        let created = manufacturer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            name_short: Set(name_short.to_string()),
            description: Set(description.map(str::to_string)),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await
        .map_err(|err| Error::from_write(err, "manufacturer", name))?;
        txn.commit().await?;

        tracing::info!("Manufacturer {:?} created", name);
        Ok(created)
    }

    pub async fn create_assembly(
        &self,
        context: &Context,
        name: &str,
        description: Option<&str>,
    ) -> Result<equipment_assembly::Model> {
        let actor = authorize(&self.db, context, Access::Role(RoleName::Administrator)).await?;

        let txn = self.db.begin().await?;
        let created = equipment_assembly::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(description.map(str::to_string)),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await
        .map_err(|err| Error::from_write(err, "equipment assembly", name))?;
        txn.commit().await?;

        tracing::info!("Equipment assembly {:?} created", name);
        Ok(created)
    }

    pub async fn create_equipment(
        &self,
        context: &Context,
        new_equipment: &NewEquipment,
    ) -> Result<equipment::Model> {
        let actor = authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        if let Some(id) = new_equipment.manufacturer_id {
            fetch::<manufacturer::Entity, _>(&txn, id, "manufacturer").await?;
        }
        if let Some(id) = new_equipment.category_id {
            fetch::<equipment_category::Entity, _>(&txn, id, "equipment category").await?;
        }
        if let Some(id) = new_equipment.assembly_id {
            fetch::<equipment_assembly::Entity, _>(&txn, id, "equipment assembly").await?;
        }

        let created = equipment::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new_equipment.name.clone()),
            serial_number: Set(new_equipment.serial_number.clone()),
            manufacturer_id: Set(new_equipment.manufacturer_id),
            category_id: Set(new_equipment.category_id),
            assembly_id: Set(new_equipment.assembly_id),
            description: Set(new_equipment.description.clone()),
            session_id: Set(actor.session.id),
            created_at: Set(timestamp()),
        }
        .insert(&txn)
        .await
        .map_err(|err| {
            Error::from_write(
                err,
                "equipment",
                format!("{} #{}", new_equipment.name, new_equipment.serial_number),
            )
        })?;
        txn.commit().await?;

        tracing::info!(
            "Equipment {:?} #{} created",
            created.name,
            created.serial_number
        );
        Ok(created)
    }

    /// Lists `equipment_id` as a part of `assembly_id`. Returns `false` when
    /// it already was one.
    pub async fn attach_part(
        &self,
        context: &Context,
        assembly_id: Uuid,
        equipment_id: Uuid,
    ) -> Result<bool> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        fetch::<equipment_assembly::Entity, _>(&txn, assembly_id, "equipment assembly").await?;
        fetch::<equipment::Entity, _>(&txn, equipment_id, "equipment").await?;
        let attached = assembly_part::Entity::find()
            .filter(assembly_part::Column::AssemblyId.eq(assembly_id))
            .filter(assembly_part::Column::EquipmentId.eq(equipment_id))
            .count(&txn)
            .await?;
        if attached > 0 {
            return Ok(false);
        }

        let link = assembly_part::ActiveModel {
            id: Set(Uuid::new_v4()),
            assembly_id: Set(assembly_id),
            equipment_id: Set(equipment_id),
        };
        attach(txn, link, "assembly part").await
    }

    pub async fn attach_parameter(
        &self,
        context: &Context,
        equipment_id: Uuid,
        parameter_id: Uuid,
    ) -> Result<bool> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        fetch::<equipment::Entity, _>(&txn, equipment_id, "equipment").await?;
        fetch::<parameter::Entity, _>(&txn, parameter_id, "parameter").await?;
        let attached = equipment_parameter::Entity::find()
            .filter(equipment_parameter::Column::EquipmentId.eq(equipment_id))
            .filter(equipment_parameter::Column::ParameterId.eq(parameter_id))
            .count(&txn)
            .await?;
        if attached > 0 {
            return Ok(false);
        }

        let link = equipment_parameter::ActiveModel {
            id: Set(Uuid::new_v4()),
            equipment_id: Set(equipment_id),
            parameter_id: Set(parameter_id),
        };
        attach(txn, link, "equipment parameter").await
    }

    pub async fn attach_measurement_type(
        &self,
        context: &Context,
        equipment_id: Uuid,
        measurement_type_id: Uuid,
    ) -> Result<bool> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let txn = self.db.begin().await?;
        fetch::<equipment::Entity, _>(&txn, equipment_id, "equipment").await?;
        fetch::<measurement_type::Entity, _>(&txn, measurement_type_id, "measurement type")
            .await?;
        let attached = equipment_measurement_type::Entity::find()
            .filter(equipment_measurement_type::Column::EquipmentId.eq(equipment_id))
            .filter(equipment_measurement_type::Column::MeasurementTypeId.eq(measurement_type_id))
            .count(&txn)
            .await?;
        if attached > 0 {
            return Ok(false);
        }

        let link = equipment_measurement_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            equipment_id: Set(equipment_id),
            measurement_type_id: Set(measurement_type_id),
        };
        attach(txn, link, "equipment measurement type").await
    }

    pub async fn equipment_parameters(
        &self,
        context: &Context,
        equipment_id: Uuid,
    ) -> Result<Vec<parameter::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let found = fetch::<equipment::Entity, _>(&self.db, equipment_id, "equipment").await?;
        let parameters = found
            .find_related(parameter::Entity)
            .order_by_asc(parameter::Column::Name)
            .all(&self.db)
            .await?;
        Ok(parameters)
    }

    pub async fn equipment_measurement_types(
        &self,
        context: &Context,
        equipment_id: Uuid,
    ) -> Result<Vec<measurement_type::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        let found = fetch::<equipment::Entity, _>(&self.db, equipment_id, "equipment").await?;
        let kinds = found
            .find_related(measurement_type::Entity)
            .order_by_asc(measurement_type::Column::Name)
            .all(&self.db)
            .await?;
        Ok(kinds)
    }

    pub async fn assembly_parts(
        &self,
        context: &Context,
        assembly_id: Uuid,
    ) -> Result<Vec<equipment::Model>> {
        authorize(&self.db, context, Access::Authenticated).await?;

        fetch::<equipment_assembly::Entity, _>(&self.db, assembly_id, "equipment assembly").await?;
        let part_ids: Vec<Uuid> = assembly_part::Entity::find()
            .filter(assembly_part::Column::AssemblyId.eq(assembly_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|part| part.equipment_id)
            .collect();
        if part_ids.is_empty() {
            return Ok(Vec::new());
        }

        let parts = equipment::Entity::find()
            .filter(equipment::Column::Id.is_in(part_ids))
            .order_by_asc(equipment::Column::Name)
            .all(&self.db)
            .await?;
        Ok(parts)
    }
}

fn parent_filter(parent: Option<Uuid>) -> SimpleExpr {
    match parent {
        Some(id) => equipment_category::Column::ParentId.eq(id),
        None => equipment_category::Column::ParentId.is_null(),
    }
}

// A concurrent writer may insert the same pair between the check and the
// insert; the unique index turns that into a no-op as well.
async fn attach<A>(txn: DatabaseTransaction, link: A, what: &str) -> Result<bool>
where
    A: ActiveModelTrait + Send,
{
    match A::Entity::insert(link).exec(&txn).await {
        Ok(_) => {
            txn.commit().await?;
            tracing::debug!("Attached {}", what);
            Ok(true)
        }
        Err(err) if is_unique_violation(&err) => {
            tracing::debug!("{} already attached", what);
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

