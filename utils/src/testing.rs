use migration::sea_orm::{Database, DatabaseConnection, DbErr};

use crate::migrate;

/// Connects to `db_url` (normally `sqlite::memory:`) and applies every migration.
pub async fn setup_test_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let conn = Database::connect(db_url).await?;
    migrate(&conn).await?;
    Ok(conn)
}
