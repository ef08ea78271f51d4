pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_accounts;
mod m20250101_000002_create_tournaments;
mod m20250101_000003_create_moderation;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_accounts::Migration),
            Box::new(m20250101_000002_create_tournaments::Migration),
            Box::new(m20250101_000003_create_moderation::Migration),
        ]
    }
}
