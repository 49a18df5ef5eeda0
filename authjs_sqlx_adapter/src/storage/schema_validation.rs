use sqlx::{Pool, Postgres, Sqlite};

/// Postgres type names accepted for a text column
pub(crate) const PG_TEXT: &[&str] = &["text", "character varying"];
pub(crate) const PG_INTEGER: &[&str] = &["integer"];
pub(crate) const PG_BIGINT: &[&str] = &["bigint"];
pub(crate) const PG_BOOLEAN: &[&str] = &["boolean"];
pub(crate) const PG_TIMESTAMP: &[&str] = &["timestamp with time zone"];

// Both lookups stay inside the connection's current schema
const PG_TABLE_EXISTS_QUERY: &str = "SELECT EXISTS (SELECT FROM information_schema.tables
     WHERE table_schema = current_schema() AND table_name = $1)";
const PG_TABLE_COLUMNS_QUERY: &str = "SELECT column_name::text, data_type::text FROM information_schema.columns
     WHERE table_schema = current_schema() AND table_name = $1 ORDER BY column_name";

/// Validates that a Postgres table exists and carries the expected columns
///
/// Each expected column lists the `information_schema` data types it may have.
/// Extra columns are tolerated and only logged.
pub(crate) async fn validate_postgres_table_schema<E>(
    pool: &Pool<Postgres>,
    table_name: &str,
    expected_columns: &[(&str, &[&str])],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    // Check if table exists
    let table_exists: bool = sqlx::query_scalar(PG_TABLE_EXISTS_QUERY)
        .bind(table_name)
        .fetch_one(pool)
        .await
        .map_err(|e| error_mapper(e.to_string()))?;

    if !table_exists {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    // Query actual schema from database
    let actual_columns: Vec<(String, String)> = sqlx::query_as(PG_TABLE_COLUMNS_QUERY)
        .bind(table_name)
        .fetch_all(pool)
        .await
        .map_err(|e| error_mapper(e.to_string()))?;

    for (expected_name, allowed_types) in expected_columns {
        match actual_columns
            .iter()
            .find(|(name, _)| name == expected_name)
        {
            Some((_, actual_type)) if allowed_types.contains(&actual_type.as_str()) => {}
            Some((_, actual_type)) => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Column '{expected_name}' has type '{actual_type}' but expected one of {allowed_types:?}"
                )));
            }
            None => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Missing column '{expected_name}' in table '{table_name}'"
                )));
            }
        }
    }

    let actual_names: Vec<String> = actual_columns.into_iter().map(|(name, _)| name).collect();
    let expected_names: Vec<&str> = expected_columns.iter().map(|(name, _)| *name).collect();
    warn_extra_columns(table_name, &actual_names, &expected_names);

    Ok(())
}

/// Validates that a SQLite table exists and carries the expected columns
///
/// SQLite column types are only declarations, so just presence is checked.
pub(crate) async fn validate_sqlite_table_schema<E>(
    pool: &Pool<Sqlite>,
    table_name: &str,
    expected_columns: &[&str],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let actual_columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info(?) ORDER BY name")
            .bind(table_name)
            .fetch_all(pool)
            .await
            .map_err(|e| error_mapper(e.to_string()))?;

    if actual_columns.is_empty() {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    for expected_name in expected_columns {
        if !actual_columns.iter().any(|name| name == expected_name) {
            return Err(error_mapper(format!(
                "Schema validation failed: Missing column '{expected_name}' in table '{table_name}'"
            )));
        }
    }

    warn_extra_columns(table_name, &actual_columns, expected_columns);

    Ok(())
}

fn warn_extra_columns(table_name: &str, actual: &[String], expected: &[&str]) {
    for actual_name in actual {
        if !expected.iter().any(|name| name == actual_name) {
            tracing::warn!(
                "Extra column '{}' found in table '{}'",
                actual_name,
                table_name
            );
        }
    }
}
