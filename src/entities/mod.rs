// ABOUTME: SeaORM entities module for the project records schema
// ABOUTME: Exports users, sessions, projects, logs, parameters and the equipment taxonomy

pub mod assembly_part;
pub mod equipment;
pub mod equipment_assembly;
pub mod equipment_category;
pub mod equipment_measurement_type;
pub mod equipment_parameter;
pub mod log;
pub mod log_category;
pub mod manufacturer;
pub mod measurement_type;
pub mod parameter;
pub mod parameter_type;
pub mod project;
pub mod project_version;
pub mod role;
pub mod session;
pub mod user;
pub mod user_role;

pub use assembly_part::Entity as AssemblyPart;
pub use equipment::Entity as Equipment;
pub use equipment_assembly::Entity as EquipmentAssembly;
pub use equipment_category::Entity as EquipmentCategory;
pub use equipment_measurement_type::Entity as EquipmentMeasurementType;
pub use equipment_parameter::Entity as EquipmentParameter;
pub use log::Entity as Log;
pub use log_category::Entity as LogCategory;
pub use manufacturer::Entity as Manufacturer;
pub use measurement_type::Entity as MeasurementType;
pub use parameter::Entity as Parameter;
pub use parameter_type::Entity as ParameterType;
pub use project::Entity as Project;
pub use project_version::Entity as ProjectVersion;
pub use role::Entity as Role;
pub use session::Entity as Session;
pub use user::Entity as User;
pub use user_role::Entity as UserRole;
