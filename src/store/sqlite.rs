//! The embedded-file side of the store.
//!
//! All durable storage is delegated to SQLite through `rusqlite`. The
//! layout is one SQL table per [`Table`], one column per declared
//! field and a row-for-row correspondence; structured values travel as
//! JSON text. Nothing here is reachable outside explicit
//! [`super::Database::save`] and [`super::Database::load`] calls.

use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, params_from_iter};

use super::error::Error;
use super::row::Row;
use super::schema::DataType;
use super::table::TableHandle;
use super::value::Value;

/// A table as it comes off the file: name, declared fields, rows.
pub(super) type LoadedTable = (String, Vec<(String, DataType)>, Vec<Row>);

pub(super) fn save(tables: &IndexMap<String, TableHandle>, path: &Path) -> Result<(), Error> {
    let connection = Connection::open(path)?;

    for (table_name, table) in tables.iter() {
        let table_ro = table.read().unwrap();

        let column_definitions: Vec<String> = table_ro
            .fields()
            .values()
            .map(|field| format!("\"{}\" {}", field.name(), field.data_type().sql_type()))
            .collect();

        connection.execute(
            format!("DROP TABLE IF EXISTS \"{}\"", table_name).as_str(),
            [],
        )?;
        connection.execute(
            format!(
                "CREATE TABLE \"{}\" ({})",
                table_name,
                column_definitions.join(", ")
            )
            .as_str(),
            [],
        )?;

        for row in table_ro.scan() {
            let row_ro = row.read().unwrap();

            let columns: Vec<String> = row_ro
                .field_names()
                .iter()
                .map(|name| format!("\"{}\"", name))
                .collect();
            let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();

            let mut parameters = Vec::new();
            for (_, value) in row_ro.fields() {
                parameters.push(encode_value(&value)?);
            }

            connection.execute(
                format!(
                    "INSERT INTO \"{}\" ({}) VALUES ({})",
                    table_name,
                    columns.join(", "),
                    placeholders.join(", ")
                )
                .as_str(),
                params_from_iter(parameters),
            )?;
        }

        debug!("table '{}' written with {} row(s)", table_name, table_ro.len());
    }

    Ok(())
}

pub(super) fn load(path: &Path) -> Result<Vec<LoadedTable>, Error> {
    let connection = Connection::open(path)?;
    let mut loaded = Vec::new();

    let table_names: Vec<String> = {
        let mut statement =
            connection.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = statement.query_map([], |sql_row| sql_row.get(0))?;
        names.collect::<Result<_, _>>()?
    };

    for table_name in table_names {
        // SQLite bookkeeping, not ours.
        if table_name == "sqlite_sequence" {
            continue;
        }

        let fields: Vec<(String, DataType)> = {
            let mut statement =
                connection.prepare(format!("PRAGMA table_info(\"{}\")", table_name).as_str())?;
            let columns = statement.query_map([], |sql_row| {
                let column_name: String = sql_row.get(1)?;
                let declared_type: String = sql_row.get(2)?;
                Ok((column_name, declared_type))
            })?;

            columns
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|(name, declared)| (name, DataType::from_sql_type(&declared)))
                .collect()
        };

        let rows = {
            let mut statement =
                connection.prepare(format!("SELECT * FROM \"{}\"", table_name).as_str())?;
            let mut sql_rows = statement.query([])?;

            let mut rows = Vec::new();
            while let Some(sql_row) = sql_rows.next()? {
                let mut row = Row::new();
                for (index, (field_name, data_type)) in fields.iter().enumerate() {
                    let value = decode_value(*data_type, sql_row.get_ref(index)?)?;
                    row.add_field(field_name, value);
                }
                rows.push(row);
            }
            rows
        };

        debug!("table '{}' read with {} row(s)", table_name, rows.len());
        loaded.push((table_name, fields, rows));
    }

    Ok(loaded)
}

fn encode_value(value: &Value) -> Result<rusqlite::types::Value, Error> {
    //! Map a store value onto its SQLite storage class. Structured
    //! values become JSON text.

    let encoded = match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Boolean(flag) => rusqlite::types::Value::Integer(*flag as i64),
        Value::Integer(number) => rusqlite::types::Value::Integer(*number),
        Value::Float(number) => rusqlite::types::Value::Real(*number),
        Value::Text(text) => rusqlite::types::Value::Text(text.clone()),
        structured => rusqlite::types::Value::Text(serde_json::to_string(structured)?),
    };
    Ok(encoded)
}

fn decode_value(data_type: DataType, raw: ValueRef<'_>) -> Result<Value, Error> {
    //! Map a raw SQLite value back onto a store value, guided by the
    //! column's declared type: BOOLEAN columns turn integers back into
    //! booleans, JSON columns are parsed back into their structured
    //! shapes.

    let value = match raw {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(number) => match data_type {
            DataType::Boolean => Value::Boolean(number != 0),
            _ => Value::Integer(number),
        },
        ValueRef::Real(number) => Value::Float(number),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            match data_type {
                DataType::Map | DataType::List => serde_json::from_str(&text)?,
                _ => Value::Text(text),
            }
        }
        // The file format never writes blobs.
        ValueRef::Blob(_) => Value::Null,
    };
    Ok(value)
}
