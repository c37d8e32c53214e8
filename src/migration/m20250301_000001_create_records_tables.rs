// ABOUTME: Initial migration creating users, sessions, projects, logs, parameters and equipment tables
// ABOUTME: Declares the uniqueness constraints the managers translate into DuplicateName errors

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users and roles
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Login).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::NameFirst).string().not_null())
                    .col(ColumnDef::new(Users::NameLast).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Active).boolean().not_null().default(true))
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Roles::Description).text())
                    .col(ColumnDef::new(Roles::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserRoles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserRoles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(UserRoles::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserRoles::RoleId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_user_id")
                            .from(UserRoles::Table, UserRoles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_roles_role_id")
                            .from(UserRoles::Table, UserRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_user_role_unique")
                            .table(UserRoles::Table)
                            .col(UserRoles::UserId)
                            .col(UserRoles::RoleId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Sessions
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sessions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sessions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Sessions::Token).string().not_null().unique_key())
                    .col(ColumnDef::new(Sessions::StartedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sessions::EndedAt).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sessions_user_id")
                            .from(Sessions::Table, Sessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Projects and version markers
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Projects::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text())
                    .col(ColumnDef::new(Projects::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Projects::SessionId).uuid().not_null())
                    .col(ColumnDef::new(Projects::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_owner_id")
                            .from(Projects::Table, Projects::OwnerId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_session_id")
                            .from(Projects::Table, Projects::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectVersions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProjectVersions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ProjectVersions::ProjectId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(ProjectVersions::Value).string().not_null())
                    .col(ColumnDef::new(ProjectVersions::SessionId).uuid().not_null())
                    .col(ColumnDef::new(ProjectVersions::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_versions_project_id")
                            .from(ProjectVersions::Table, ProjectVersions::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_versions_session_id")
                            .from(ProjectVersions::Table, ProjectVersions::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Audit log
        manager
            .create_table(
                Table::create()
                    .table(LogCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LogCategories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LogCategories::Category).string().not_null().unique_key())
                    .col(ColumnDef::new(LogCategories::Description).text())
                    .col(ColumnDef::new(LogCategories::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Logs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Logs::Record).text().not_null())
                    .col(ColumnDef::new(Logs::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(Logs::SessionId).uuid().not_null())
                    .col(ColumnDef::new(Logs::ProjectId).uuid())
                    .col(ColumnDef::new(Logs::Sequence).big_integer().not_null())
                    .col(ColumnDef::new(Logs::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_category_id")
                            .from(Logs::Table, Logs::CategoryId)
                            .to(LogCategories::Table, LogCategories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_session_id")
                            .from(Logs::Table, Logs::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_project_id")
                            .from(Logs::Table, Logs::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_logs_sequence")
                            .table(Logs::Table)
                            .col(Logs::Sequence)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Parameters
        manager
            .create_table(
                Table::create()
                    .table(ParameterTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ParameterTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ParameterTypes::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(ParameterTypes::Description).text())
                    .col(ColumnDef::new(ParameterTypes::SessionId).uuid())
                    .col(ColumnDef::new(ParameterTypes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parameter_types_session_id")
                            .from(ParameterTypes::Table, ParameterTypes::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parameters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Parameters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Parameters::Name).string().not_null())
                    .col(ColumnDef::new(Parameters::TypeId).uuid().not_null())
                    .col(ColumnDef::new(Parameters::Value).text().not_null())
                    .col(ColumnDef::new(Parameters::Unit).string())
                    .col(ColumnDef::new(Parameters::Description).text())
                    .col(ColumnDef::new(Parameters::SessionId).uuid().not_null())
                    .col(ColumnDef::new(Parameters::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parameters_type_id")
                            .from(Parameters::Table, Parameters::TypeId)
                            .to(ParameterTypes::Table, ParameterTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parameters_session_id")
                            .from(Parameters::Table, Parameters::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Equipment taxonomy
        manager
            .create_table(
                Table::create()
                    .table(Manufacturers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Manufacturers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Manufacturers::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Manufacturers::NameShort).string().not_null().unique_key())
                    .col(ColumnDef::new(Manufacturers::Description).text())
                    .col(ColumnDef::new(Manufacturers::SessionId).uuid().not_null())
                    .col(ColumnDef::new(Manufacturers::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_manufacturers_session_id")
                            .from(Manufacturers::Table, Manufacturers::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EquipmentCategories::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EquipmentCategories::ParentId).uuid())
                    .col(ColumnDef::new(EquipmentCategories::Name).string().not_null())
                    .col(ColumnDef::new(EquipmentCategories::Description).text())
                    .col(ColumnDef::new(EquipmentCategories::SessionId).uuid().not_null())
                    .col(ColumnDef::new(EquipmentCategories::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_categories_parent_id")
                            .from(EquipmentCategories::Table, EquipmentCategories::ParentId)
                            .to(EquipmentCategories::Table, EquipmentCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_categories_session_id")
                            .from(EquipmentCategories::Table, EquipmentCategories::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .index(
                        Index::create()
                            .name("idx_equipment_category_name_parent")
                            .table(EquipmentCategories::Table)
                            .col(EquipmentCategories::Name)
                            .col(EquipmentCategories::ParentId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MeasurementTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MeasurementTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(MeasurementTypes::ParentId).uuid())
                    .col(ColumnDef::new(MeasurementTypes::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(MeasurementTypes::Description).text())
                    .col(ColumnDef::new(MeasurementTypes::SessionId).uuid().not_null())
                    .col(ColumnDef::new(MeasurementTypes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measurement_types_parent_id")
                            .from(MeasurementTypes::Table, MeasurementTypes::ParentId)
                            .to(MeasurementTypes::Table, MeasurementTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measurement_types_session_id")
                            .from(MeasurementTypes::Table, MeasurementTypes::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentAssemblies::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EquipmentAssemblies::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EquipmentAssemblies::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(EquipmentAssemblies::Description).text())
                    .col(ColumnDef::new(EquipmentAssemblies::SessionId).uuid().not_null())
                    .col(ColumnDef::new(EquipmentAssemblies::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_assemblies_session_id")
                            .from(EquipmentAssemblies::Table, EquipmentAssemblies::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Equipment::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Equipment::Name).string().not_null())
                    .col(ColumnDef::new(Equipment::SerialNumber).string().not_null())
                    .col(ColumnDef::new(Equipment::ManufacturerId).uuid())
                    .col(ColumnDef::new(Equipment::CategoryId).uuid())
                    .col(ColumnDef::new(Equipment::AssemblyId).uuid())
                    .col(ColumnDef::new(Equipment::Description).text())
                    .col(ColumnDef::new(Equipment::SessionId).uuid().not_null())
                    .col(ColumnDef::new(Equipment::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_manufacturer_id")
                            .from(Equipment::Table, Equipment::ManufacturerId)
                            .to(Manufacturers::Table, Manufacturers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_category_id")
                            .from(Equipment::Table, Equipment::CategoryId)
                            .to(EquipmentCategories::Table, EquipmentCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_assembly_id")
                            .from(Equipment::Table, Equipment::AssemblyId)
                            .to(EquipmentAssemblies::Table, EquipmentAssemblies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_session_id")
                            .from(Equipment::Table, Equipment::SessionId)
                            .to(Sessions::Table, Sessions::Id),
                    )
                    .index(
                        Index::create()
                            .name("idx_equipment_name_serial_number")
                            .table(Equipment::Table)
                            .col(Equipment::Name)
                            .col(Equipment::SerialNumber)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Many-to-many associations
        manager
            .create_table(
                Table::create()
                    .table(AssemblyParts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AssemblyParts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(AssemblyParts::AssemblyId).uuid().not_null())
                    .col(ColumnDef::new(AssemblyParts::EquipmentId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assembly_parts_assembly_id")
                            .from(AssemblyParts::Table, AssemblyParts::AssemblyId)
                            .to(EquipmentAssemblies::Table, EquipmentAssemblies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assembly_parts_equipment_id")
                            .from(AssemblyParts::Table, AssemblyParts::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_assembly_part_unique")
                            .table(AssemblyParts::Table)
                            .col(AssemblyParts::AssemblyId)
                            .col(AssemblyParts::EquipmentId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentParameters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EquipmentParameters::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(EquipmentParameters::EquipmentId).uuid().not_null())
                    .col(ColumnDef::new(EquipmentParameters::ParameterId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_parameters_equipment_id")
                            .from(EquipmentParameters::Table, EquipmentParameters::EquipmentId)
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_parameters_parameter_id")
                            .from(EquipmentParameters::Table, EquipmentParameters::ParameterId)
                            .to(Parameters::Table, Parameters::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_equipment_parameter_unique")
                            .table(EquipmentParameters::Table)
                            .col(EquipmentParameters::EquipmentId)
                            .col(EquipmentParameters::ParameterId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EquipmentMeasurementTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EquipmentMeasurementTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EquipmentMeasurementTypes::EquipmentId).uuid().not_null())
                    .col(
                        ColumnDef::new(EquipmentMeasurementTypes::MeasurementTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_measurement_types_equipment_id")
                            .from(
                                EquipmentMeasurementTypes::Table,
                                EquipmentMeasurementTypes::EquipmentId,
                            )
                            .to(Equipment::Table, Equipment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_equipment_measurement_types_measurement_type_id")
                            .from(
                                EquipmentMeasurementTypes::Table,
                                EquipmentMeasurementTypes::MeasurementTypeId,
                            )
                            .to(MeasurementTypes::Table, MeasurementTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_equipment_measurement_type_unique")
                            .table(EquipmentMeasurementTypes::Table)
                            .col(EquipmentMeasurementTypes::EquipmentId)
                            .col(EquipmentMeasurementTypes::MeasurementTypeId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EquipmentMeasurementTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EquipmentParameters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssemblyParts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EquipmentAssemblies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MeasurementTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EquipmentCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Manufacturers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parameters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ParameterTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Logs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LogCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectVersions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Login,
    PasswordHash,
    NameFirst,
    NameLast,
    Email,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserRoles {
    Table,
    Id,
    UserId,
    RoleId,
}

#[derive(DeriveIden)]
enum Sessions {
    Table,
    Id,
    UserId,
    Token,
    StartedAt,
    EndedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    Description,
    OwnerId,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProjectVersions {
    Table,
    Id,
    ProjectId,
    Value,
    SessionId,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LogCategories {
    Table,
    Id,
    Category,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Logs {
    Table,
    Id,
    Record,
    CategoryId,
    SessionId,
    ProjectId,
    Sequence,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ParameterTypes {
    Table,
    Id,
    Name,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Parameters {
    Table,
    Id,
    Name,
    TypeId,
    Value,
    Unit,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Manufacturers {
    Table,
    Id,
    Name,
    NameShort,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EquipmentCategories {
    Table,
    Id,
    ParentId,
    Name,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MeasurementTypes {
    Table,
    Id,
    ParentId,
    Name,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EquipmentAssemblies {
    Table,
    Id,
    Name,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Equipment {
    Table,
    Id,
    Name,
    SerialNumber,
    ManufacturerId,
    CategoryId,
    AssemblyId,
    Description,
    SessionId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssemblyParts {
    Table,
    Id,
    AssemblyId,
    EquipmentId,
}

#[derive(DeriveIden)]
enum EquipmentParameters {
    Table,
    Id,
    EquipmentId,
    ParameterId,
}

#[derive(DeriveIden)]
enum EquipmentMeasurementTypes {
    Table,
    Id,
    EquipmentId,
    MeasurementTypeId,
}
