//! Helpers shared by service tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied. One connection,
/// because every `:memory:` connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    pool
}

/// Insert an active user with a bcrypt-hashed password, returning its id.
/// Low cost factor keeps the tests fast.
pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, password: &str) -> i64 {
    let hash = bcrypt::hash(password, 4).expect("bcrypt hash");
    let result = sqlx::query("INSERT INTO users (name, email, passwd, active) VALUES (?, ?, ?, 1)")
        .bind(name)
        .bind(email)
        .bind(&hash)
        .execute(pool)
        .await
        .expect("insert user");

    result.last_insert_rowid()
}
