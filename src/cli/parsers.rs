//! The place where the CLI argument parser and the small REPL literal
//! parsers are defined.
//!
//! When the functionality becomes extensive, they will each have their
//! own files.

use clap::{Parser, ValueEnum, arg, command};

use crate::cli::messages::{highlight_argument, system_message};
use crate::store::{DataType, Value};

#[derive(Parser)]
#[command(name = "reladb")]
#[command(about = "A lightweight object-style layer over an embedded SQLite store", long_about = None)]
pub struct CliParser {
    // Either operate in the client or server mode.
    #[arg(required = true)]
    pub mode: Option<CliMode>,
}

#[derive(Clone, ValueEnum)]
pub enum CliMode {
    // Start a deployment that listens for requests.
    Server,

    // Start a REPL client instance (no-remote).
    Client,
}

pub fn parse_data_type(text: &str) -> Result<DataType, String> {
    //! Parse a type tag as written in REPL column definitions.

    match text {
        "int" => Ok(DataType::Integer),
        "float" => Ok(DataType::Float),
        "text" => Ok(DataType::Text),
        "bool" => Ok(DataType::Boolean),
        "map" => Ok(DataType::Map),
        "list" => Ok(DataType::List),
        other => Err(system_message(
            "parser",
            format!(
                "Unknown type {}; try one of int, float, text, bool, map, list.",
                highlight_argument(other)
            ),
        )),
    }
}

pub fn parse_column_definition(text: &str) -> Result<(String, DataType), String> {
    //! Parse a `name:type` column definition.

    let (name, datatype) = text.split_once(':').ok_or_else(|| {
        system_message(
            "parser",
            format!(
                "Column definitions look like {}.",
                highlight_argument("name:type")
            ),
        )
    })?;

    Ok((name.to_string(), parse_data_type(datatype)?))
}

pub fn parse_assignment(text: &str) -> Result<(String, Value), String> {
    //! Parse a `field=value` pair, with the value parsed leniently.

    let (field, value) = text.split_once('=').ok_or_else(|| {
        system_message(
            "parser",
            format!(
                "Assignments and filters look like {}.",
                highlight_argument("field=value")
            ),
        )
    })?;

    Ok((field.to_string(), parse_value(value)))
}

pub fn parse_value(text: &str) -> Value {
    //! Guess the tag of a literal typed on the REPL.
    //!
    //! Booleans first, then integers, then floats, then JSON arrays
    //! and objects; anything else is text. `nil` is the null literal.

    if text == "nil" {
        return Value::Null;
    }
    if let Ok(flag) = text.parse::<bool>() {
        return Value::Boolean(flag);
    }
    if let Ok(number) = text.parse::<i64>() {
        return Value::Integer(number);
    }
    if let Ok(number) = text.parse::<f64>() {
        return Value::Float(number);
    }
    if text.starts_with('[') || text.starts_with('{') {
        if let Ok(structured) = serde_json::from_str::<Value>(text) {
            return structured;
        }
    }

    Value::Text(text.to_string())
}
