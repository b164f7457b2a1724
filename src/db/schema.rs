use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityName, EntityTrait, Schema};
use tracing::debug;

use crate::db::entities::prelude::{Item, Post, Standup, User};

/// Creates any missing tables. Parents are created before the tables that reference them.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, User).await?;
    create_table(db, &schema, Standup).await?;
    create_table(db, &schema, Post).await?;
    create_table(db, &schema, Item).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let table = entity.table_name();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;
    debug!(table, "Ensured table exists.");
    Ok(())
}
