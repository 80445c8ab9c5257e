use sqlx::SqlitePool;

use crate::{
    connection::establish_in_memory_database_connection_pool,
    migrations::apply_pending_migrations,
};


/// An in-memory database with the full schema applied.
pub(crate) async fn migrated_in_memory_pool() -> SqlitePool {
    let pool = establish_in_memory_database_connection_pool()
        .await
        .unwrap();

    let mut connection = pool.acquire().await.unwrap();
    apply_pending_migrations(&mut connection).await.unwrap();
    drop(connection);

    pool
}
