#![allow(dead_code)]

use relex_core::ast::SqlValue;
use relex_core::builder::{CommandBuilder, SqlCommand};
use relex_sqlite::SqliteDialect;
use rusqlite::types::Value;
use rusqlite::{Connection, ToSql};

pub fn builder() -> CommandBuilder {
    CommandBuilder::new(SqliteDialect::new())
}

/// Opens an in-memory database with a small `users` table.
pub fn users_db() -> Connection {
    let conn = Connection::open_in_memory().expect("open in-memory database");
    conn.execute_batch(
        r#"
        CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER, city TEXT);
        CREATE TABLE orders (id INTEGER PRIMARY KEY, user_id INTEGER, total REAL);
        INSERT INTO users (id, name, age, city) VALUES
            (1, 'Anna', 34, 'Oslo'),
            (2, 'Bob', 17, 'Bergen'),
            (3, 'Carl', 52, NULL),
            (4, 'Dora', 25, 'Oslo');
        INSERT INTO orders (user_id, total) VALUES (1, 120.0), (1, 15.5), (3, 300.0);
        "#,
    )
    .expect("create schema");
    conn
}

fn to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null | SqlValue::List(_) => Value::Null,
        SqlValue::Bool(b) => Value::Integer(i64::from(*b)),
        SqlValue::Int(n) => Value::Integer(*n),
        SqlValue::Float(f) => Value::Real(*f),
        other => Value::Text(other.to_text()),
    }
}

fn named(command: &SqlCommand) -> Vec<(String, Value)> {
    command
        .parameters
        .iter()
        .map(|p| (p.placeholder.clone(), to_sqlite(&p.value)))
        .collect()
}

/// Runs a command and returns the first column of every row as text.
pub fn query_column(conn: &Connection, command: &SqlCommand) -> Vec<String> {
    let values = named(command);
    let params: Vec<(&str, &dyn ToSql)> = values
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
        .collect();
    let mut stmt = conn
        .prepare(&command.text)
        .unwrap_or_else(|e| panic!("Failed to prepare: {}\nError: {e}", command.text));
    let rows = stmt
        .query_map(params.as_slice(), |row| {
            let value: Value = row.get(0)?;
            Ok(match value {
                Value::Null => String::from("NULL"),
                Value::Integer(n) => n.to_string(),
                Value::Real(f) => f.to_string(),
                Value::Text(s) => s,
                Value::Blob(_) => String::from("<blob>"),
            })
        })
        .expect("run query");
    rows.map(|row| row.expect("read row")).collect()
}

/// Executes a command and returns the number of changed rows.
pub fn execute(conn: &Connection, command: &SqlCommand) -> usize {
    let values = named(command);
    let params: Vec<(&str, &dyn ToSql)> = values
        .iter()
        .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
        .collect();
    conn.execute(&command.text, params.as_slice())
        .unwrap_or_else(|e| panic!("Failed to execute: {}\nError: {e}", command.text))
}
