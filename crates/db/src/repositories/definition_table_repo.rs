//! Repository for raw manifest `definition_tables`.

use sqlx::PgPool;

use crate::models::definition_table::DefinitionTable;

const COLUMNS: &str = "id, version, table_name, language, content, created_at";

pub struct DefinitionTableRepo;

impl DefinitionTableRepo {
    /// Version of the stored tables for `language`, if any were stored.
    pub async fn current_version(
        pool: &PgPool,
        language: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT version FROM definition_tables
             WHERE language = $1
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(language)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(version,)| version))
    }

    /// Replace every table of `language` with `tables`, atomically.
    pub async fn replace_all(
        pool: &PgPool,
        version: &str,
        language: &str,
        tables: &[(String, serde_json::Value)],
    ) -> Result<usize, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM definition_tables WHERE language = $1")
            .bind(language)
            .execute(&mut *tx)
            .await?;

        for (table_name, content) in tables {
            sqlx::query(
                "INSERT INTO definition_tables (version, table_name, language, content)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(version)
            .bind(table_name)
            .bind(language)
            .bind(content)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(tables.len())
    }

    pub async fn find(
        pool: &PgPool,
        table_name: &str,
        language: &str,
    ) -> Result<Option<DefinitionTable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM definition_tables WHERE table_name = $1 AND language = $2"
        );
        sqlx::query_as::<_, DefinitionTable>(&query)
            .bind(table_name)
            .bind(language)
            .fetch_optional(pool)
            .await
    }

    /// One entry of a stored table, looked up by its hash key.
    pub async fn find_entry(
        pool: &PgPool,
        table_name: &str,
        language: &str,
        hash: &str,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let row: Option<(Option<serde_json::Value>,)> = sqlx::query_as(
            "SELECT content -> $3 FROM definition_tables WHERE table_name = $1 AND language = $2",
        )
        .bind(table_name)
        .bind(language)
        .bind(hash)
        .fetch_optional(pool)
        .await?;
        Ok(row.and_then(|(entry,)| entry))
    }
}
