// ABOUTME: Ordered schema migrations for the records store
// ABOUTME: The installer runs them forward, and backward on overwrite

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250301_000001_create_records_tables::Migration)]
    }
}

pub mod m20250301_000001_create_records_tables;
