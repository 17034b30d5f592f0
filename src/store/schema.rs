use std::fmt::Display;

use crate::store::error::Error;

/// The fixed set of type tags a column can be declared with.
///
/// Structured tags (MAP and LIST) are both written to the embedded file
/// as JSON columns, the same way the original file format stores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    Text,
    Boolean,
    Map,
    List,
}

impl DataType {
    pub fn sql_type(&self) -> &'static str {
        //! The declared column type used when the owning table is
        //! written to the embedded file.

        match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "REAL",
            DataType::Text => "TEXT",
            DataType::Boolean => "BOOLEAN",
            DataType::Map | DataType::List => "JSON",
        }
    }

    pub fn from_sql_type(declared: &str) -> DataType {
        //! Recover a type tag from a declared column type.
        //!
        //! JSON columns come back as [`DataType::Map`]; the file format
        //! does not distinguish the two structured tags, and stored
        //! values keep their true shapes regardless.

        match declared.to_ascii_uppercase().as_str() {
            "INTEGER" => DataType::Integer,
            "REAL" => DataType::Float,
            "BOOLEAN" => DataType::Boolean,
            "JSON" => DataType::Map,
            _ => DataType::Text,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let datatype = match self {
            DataType::Integer => "int",
            DataType::Float => "float",
            DataType::Text => "text",
            DataType::Boolean => "bool",
            DataType::Map => "map",
            DataType::List => "list",
        };
        write!(f, "{}", datatype)
    }
}

/// A single column declaration: a name and its type tag.
///
/// Pure value holder. Once created it never changes; schema evolution
/// happens by replacing the entry on the owning [`super::Table`].
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    data_type: DataType,
}

impl Field {
    pub fn new(name: &str, data_type: DataType) -> Result<Field, Error> {
        //! Create a new column declaration.
        //!
        //! The only failure mode is an empty name.

        if name.is_empty() {
            return Err(Error::InvalidSchema(
                "a field cannot have an empty name".to_string(),
            ));
        }

        Ok(Field {
            name: name.to_string(),
            data_type,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.data_type)
    }
}
