use std::fmt::Display;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use super::value::Value;

/// A shared, mutable handle to a stored row.
///
/// [`super::Table::find`] hands these out instead of copies so that
/// updating a found row updates the data already inserted.
pub type RowHandle = Arc<RwLock<Row>>;

/// One record: an ordered bag of named values.
///
/// A row's field set may diverge from the owning table's declared
/// schema. That is deliberate; the schema describes intent, the row
/// stores whatever it was given.
#[derive(Clone, Debug, Default)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row {
            fields: IndexMap::new(),
        }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
    where
        K: Into<String>,
        V: Into<Value>,
    {
        //! Build a row from an arbitrary set of field/value pairs.
        //! No shape validation takes place.

        let mut row = Row::new();
        for (name, value) in pairs {
            row.fields.insert(name.into(), value.into());
        }
        row
    }

    pub fn get(&self, field: &str) -> Value {
        //! Get the stored value for `field`.
        //!
        //! A field that was never set comes back as [`Value::Null`],
        //! never as an error, since rows are schema-flexible.

        self.fields.get(field).cloned().unwrap_or(Value::Null)
    }

    pub fn fields(&self) -> IndexMap<String, Value> {
        //! A snapshot of every field on the row, in order. Mutations
        //! after the call do not show up in the returned mapping.

        self.fields.clone()
    }

    pub fn add_field(&mut self, field_name: &str, field_value: impl Into<Value>) {
        //! Add or overwrite a field in place.
        //!
        //! Overwriting keeps the field's position; a new field is
        //! appended after the existing ones.

        self.fields.insert(field_name.to_string(), field_value.into());
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self
            .fields
            .values()
            .map(|value| format!("{}", value))
            .collect();
        write!(f, "{}", row.join(" | "))
    }
}
