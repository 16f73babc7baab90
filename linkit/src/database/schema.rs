//! Schema management
//!
//! The SQLite file is created on first open and upgraded in place. Each
//! entry in `MIGRATIONS` runs once inside a transaction and is recorded
//! by version in the `migrations` table, so reopening an up-to-date
//! database is a no-op.

use crate::error::Result;
use sqlx::sqlite::SqlitePool;

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("migrations/001_initial_schema.sql"))];

/// Bring the database up to the current schema version.
pub async fn initialize_database(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    let applied = latest_applied_version(pool).await?;

    for &(version, sql) in MIGRATIONS {
        if version > applied {
            apply_migration(pool, version, sql).await?;
        }
    }

    Ok(())
}

async fn latest_applied_version(pool: &SqlitePool) -> Result<i32> {
    let version = sqlx::query_scalar("SELECT COALESCE(MAX(version), 0) FROM migrations")
        .fetch_one(pool)
        .await?;

    Ok(version)
}

/// One migration, one transaction. The SQL is split on ';' because sqlx
/// runs a single statement per query.
async fn apply_migration(pool: &SqlitePool, version: i32, sql: &str) -> Result<()> {
    tracing::info!("Applying schema migration {}", version);

    let mut tx = pool.begin().await?;

    for statement in sql.split(';').filter(|s| !s.trim().is_empty()) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    sqlx::query("INSERT INTO migrations (version) VALUES (?)")
        .bind(version)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn fresh_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_all_entity_tables_exist() {
        let pool = fresh_db().await;

        for table in [
            "users",
            "sessions",
            "collections",
            "products",
            "product_links",
            "external_sources",
            "product_notes",
        ] {
            let found: i32 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&pool)
            .await
            .unwrap();

            assert_eq!(found, 1, "missing table: {}", table);
        }
    }

    #[tokio::test]
    async fn test_one_note_per_product_and_user() {
        let pool = fresh_db().await;

        sqlx::query("INSERT INTO users (id, email, password_hash, created_at) VALUES ('u1', 'a@b.c', '', '2026-01-01')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO products (id, user_id, title, created_at) VALUES ('p1', 'u1', 'Lamp', '2026-01-01')")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query(
            "INSERT INTO product_notes (id, product_id, user_id, content, created_at, updated_at)
             VALUES ('n1', 'p1', 'u1', 'first', '2026-01-01', '2026-01-01')",
        )
        .execute(&pool)
        .await
        .unwrap();

        // A second row for the same (product, user) violates the
        // uniqueness the note upsert relies on
        let duplicate = sqlx::query(
            "INSERT INTO product_notes (id, product_id, user_id, content, created_at, updated_at)
             VALUES ('n2', 'p1', 'u1', 'second', '2026-01-01', '2026-01-01')",
        )
        .execute(&pool)
        .await;

        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_reopening_runs_no_further_migrations() {
        let pool = fresh_db().await;

        initialize_database(&pool).await.unwrap();

        let applied: i32 = sqlx::query_scalar("SELECT COUNT(*) FROM migrations")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(applied as usize, MIGRATIONS.len());
    }
}
