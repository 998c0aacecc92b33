//! Batch persistence into Postgres.
//!
//! Default semantics are destructive replacement: drop the destination
//! table, recreate it with the fixed schema, bulk-insert the coerced
//! batch, all in one transaction. The table holds only the latest run.
//! An opt-in append mode creates the table once and accumulates.

use anyhow::{Context, Result};
use moodwire_common::config::validate_identifier;
use moodwire_common::{LoadMode, TableRef};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

use crate::artifact::Table;

/// Rows per bulk INSERT statement. Keeps bind counts well under the
/// Postgres protocol limit.
const INSERT_CHUNK: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Float,
    BigInt,
}

/// Fixed destination schema, in column order.
pub const DEST_COLUMNS: [(&str, ColumnKind, &str); 11] = [
    ("id", ColumnKind::Text, "VARCHAR(255)"),
    ("created_utc", ColumnKind::BigInt, "BIGINT"),
    ("body", ColumnKind::Text, "TEXT"),
    ("cleaned_text", ColumnKind::Text, "TEXT"),
    ("vader_compound", ColumnKind::Float, "FLOAT"),
    ("vader_positive", ColumnKind::Float, "FLOAT"),
    ("vader_negative", ColumnKind::Float, "FLOAT"),
    ("vader_neutral", ColumnKind::Float, "FLOAT"),
    ("textblob_polarity", ColumnKind::Float, "FLOAT"),
    ("textblob_subjectivity", ColumnKind::Float, "FLOAT"),
    ("sentiment_category", ColumnKind::Text, "VARCHAR(50)"),
];

#[derive(Debug)]
pub struct LoadResult {
    pub rows_written: u64,
    pub table: TableRef,
}

/// A value coerced and typed for insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Float(f64),
    BigInt(i64),
}

/// Coerce one raw field. Absent or unparseable values get the column
/// default: empty string, 0.0, or 0.
pub fn coerce(kind: ColumnKind, raw: Option<&str>) -> SqlValue {
    match kind {
        ColumnKind::Text => SqlValue::Text(raw.unwrap_or("").to_string()),
        ColumnKind::Float => SqlValue::Float(
            raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0),
        ),
        // created_utc sometimes arrives as a float string; truncate it.
        ColumnKind::BigInt => SqlValue::BigInt(
            raw.and_then(|s| {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
            })
            .unwrap_or(0),
        ),
    }
}

/// Destination columns present in the batch, with their source index.
/// Destination columns the batch lacks are omitted from the insert; batch
/// columns outside the destination schema are dropped.
pub fn project_columns(table: &Table) -> Vec<(&'static str, ColumnKind, usize)> {
    DEST_COLUMNS
        .iter()
        .filter_map(|&(name, kind, _)| table.column_index(name).map(|idx| (name, kind, idx)))
        .collect()
}

/// Coerce every row of the batch onto the projected columns.
pub fn coerced_rows(
    table: &Table,
    projection: &[(&'static str, ColumnKind, usize)],
) -> Vec<Vec<SqlValue>> {
    table
        .rows
        .iter()
        .map(|row| {
            projection
                .iter()
                .map(|&(_, kind, idx)| coerce(kind, row.get(idx).map(String::as_str)))
                .collect()
        })
        .collect()
}

fn create_table_sql(dest: &TableRef) -> String {
    let columns: Vec<String> = DEST_COLUMNS
        .iter()
        .map(|(name, _, sql_type)| format!("{name} {sql_type}"))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        dest.qualified(),
        columns.join(", ")
    )
}

/// Load a scored batch into the destination table.
///
/// Any error aborts the whole operation; on failure the destination state
/// is unknown and callers should re-run the full pipeline rather than
/// retry the load alone.
pub async fn load(
    pool: &PgPool,
    table: &Table,
    dest: &TableRef,
    mode: LoadMode,
) -> Result<LoadResult> {
    validate_identifier(&dest.schema)?;
    validate_identifier(&dest.table)?;

    let projection = project_columns(table);
    let rows = coerced_rows(table, &projection);
    let column_list: Vec<&str> = projection.iter().map(|&(name, _, _)| name).collect();

    let mut tx = pool.begin().await.context("begin load transaction")?;

    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", dest.schema))
        .execute(&mut *tx)
        .await
        .context("create destination schema")?;

    match mode {
        LoadMode::Replace => {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", dest.qualified()))
                .execute(&mut *tx)
                .await
                .context("drop destination table")?;
            sqlx::query(&create_table_sql(dest))
                .execute(&mut *tx)
                .await
                .context("create destination table")?;
        }
        LoadMode::Append => {
            let sql = create_table_sql(dest)
                .replacen("CREATE TABLE", "CREATE TABLE IF NOT EXISTS", 1);
            sqlx::query(&sql)
                .execute(&mut *tx)
                .await
                .context("ensure destination table")?;
        }
    }

    let mut rows_written = 0u64;
    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            dest.qualified(),
            column_list.join(", ")
        ));
        qb.push_values(chunk, |mut b, row| {
            for value in row {
                match value {
                    SqlValue::Text(s) => b.push_bind(s.clone()),
                    SqlValue::Float(f) => b.push_bind(*f),
                    SqlValue::BigInt(i) => b.push_bind(*i),
                };
            }
        });
        qb.build()
            .execute(&mut *tx)
            .await
            .context("bulk insert scored batch")?;
        rows_written += chunk.len() as u64;
    }

    tx.commit().await.context("commit load transaction")?;

    info!(
        rows_written,
        table = dest.qualified().as_str(),
        mode = ?mode,
        "Batch loaded"
    );

    Ok(LoadResult {
        rows_written,
        table: dest.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn coercion_defaults() {
        assert_eq!(coerce(ColumnKind::Text, None), SqlValue::Text(String::new()));
        assert_eq!(coerce(ColumnKind::Float, None), SqlValue::Float(0.0));
        assert_eq!(coerce(ColumnKind::Float, Some("")), SqlValue::Float(0.0));
        assert_eq!(coerce(ColumnKind::Float, Some("junk")), SqlValue::Float(0.0));
        assert_eq!(coerce(ColumnKind::BigInt, None), SqlValue::BigInt(0));
        assert_eq!(coerce(ColumnKind::BigInt, Some("")), SqlValue::BigInt(0));
    }

    #[test]
    fn coercion_parses_values() {
        assert_eq!(
            coerce(ColumnKind::Float, Some("0.6369")),
            SqlValue::Float(0.6369)
        );
        assert_eq!(
            coerce(ColumnKind::BigInt, Some("1714000000")),
            SqlValue::BigInt(1_714_000_000)
        );
        // Float-formatted epoch seconds truncate to the integer part.
        assert_eq!(
            coerce(ColumnKind::BigInt, Some("1714000000.0")),
            SqlValue::BigInt(1_714_000_000)
        );
    }

    #[test]
    fn projection_keeps_destination_order_and_drops_extras() {
        let t = table(
            &["author", "body", "id", "vader_compound"],
            &[&["a", "text", "x1", "0.5"]],
        );
        let projection = project_columns(&t);
        let names: Vec<&str> = projection.iter().map(|&(n, _, _)| n).collect();
        // Destination order, not batch order; "author" is not a
        // destination column and is dropped.
        assert_eq!(names, vec!["id", "body", "vader_compound"]);
    }

    #[test]
    fn absent_destination_columns_are_omitted() {
        let t = table(&["id"], &[&["x1"]]);
        let projection = project_columns(&t);
        assert_eq!(projection.len(), 1);
        let rows = coerced_rows(&t, &projection);
        assert_eq!(rows, vec![vec![SqlValue::Text("x1".to_string())]]);
    }

    #[test]
    fn coerced_rows_follow_projection() {
        let t = table(
            &["id", "created_utc", "vader_compound", "sentiment_category"],
            &[
                &["a1", "1714000000.0", "0.4404", "positive"],
                &["a2", "", "", ""],
            ],
        );
        let projection = project_columns(&t);
        let rows = coerced_rows(&t, &projection);
        assert_eq!(
            rows[0],
            vec![
                SqlValue::Text("a1".to_string()),
                SqlValue::BigInt(1_714_000_000),
                SqlValue::Float(0.4404),
                SqlValue::Text("positive".to_string()),
            ]
        );
        assert_eq!(
            rows[1],
            vec![
                SqlValue::Text("a2".to_string()),
                SqlValue::BigInt(0),
                SqlValue::Float(0.0),
                SqlValue::Text(String::new()),
            ]
        );
    }

    #[test]
    fn create_table_sql_matches_fixed_schema() {
        let dest = TableRef::new("raw_data", "processed_comments");
        assert_eq!(
            create_table_sql(&dest),
            "CREATE TABLE raw_data.processed_comments (id VARCHAR(255), \
             created_utc BIGINT, body TEXT, cleaned_text TEXT, \
             vader_compound FLOAT, vader_positive FLOAT, vader_negative FLOAT, \
             vader_neutral FLOAT, textblob_polarity FLOAT, \
             textblob_subjectivity FLOAT, sentiment_category VARCHAR(50))"
        );
    }
}
