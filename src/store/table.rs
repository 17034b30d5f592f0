use std::fmt::Display;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use log::debug;

use super::error::Error;
use super::row::{Row, RowHandle};
use super::schema::{DataType, Field};

/// A shared, mutable handle to a table held by a [`super::Database`].
pub type TableHandle = Arc<RwLock<Table>>;

/// A named schema plus its data.
///
/// The schema is an ordered mapping of unique field names to their
/// declarations; the data is the ordered sequence of rows, in insertion
/// order. The table is the dumb half of the pair: it mutates its own
/// structure and scans its own rows, nothing more. The
/// [`super::Database`] does the bookkeeping above it.
pub struct Table {
    name: String,
    fields: IndexMap<String, Field>,
    rows: Vec<RowHandle>,
}

impl Table {
    pub fn new(name: &str) -> Result<Table, Error> {
        //! Create an empty table with no declared fields.
        //!
        //! The only failure mode is an empty name.

        if name.is_empty() {
            return Err(Error::InvalidSchema(
                "a table cannot have an empty name".to_string(),
            ));
        }

        Ok(Table {
            name: name.to_string(),
            fields: IndexMap::new(),
            rows: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn add_field(&mut self, field_name: &str, data_type: DataType) -> Result<(), Error> {
        //! Declare a single field on the schema.
        //!
        //! A name that is already declared has its type overwritten in
        //! place (last write wins); this is not an error.

        let field = Field::new(field_name, data_type)?;
        self.fields.insert(field_name.to_string(), field);
        Ok(())
    }

    pub fn add_fields<K>(
        &mut self,
        fields: impl IntoIterator<Item = (K, DataType)>,
    ) -> Result<(), Error>
    where
        K: AsRef<str>,
    {
        //! Declare several fields at once, in the order given.

        for (field_name, data_type) in fields {
            self.add_field(field_name.as_ref(), data_type)?;
        }
        Ok(())
    }

    pub fn delete_fields(&mut self, field_names: &[&str]) {
        //! Remove the named fields from the schema. Names that are not
        //! declared are silently ignored.
        //!
        //! Stored rows keep whatever values they hold for a removed
        //! field; schema deletion never cascades into row data.

        for field_name in field_names {
            self.fields.shift_remove(*field_name);
        }
    }

    pub fn fields(&self) -> &IndexMap<String, Field> {
        &self.fields
    }

    pub fn add_row(&mut self, row: Row) -> RowHandle {
        //! Append a row and return a live handle to it.
        //!
        //! Values are not checked against the declared schema; rows are
        //! allowed to diverge from it.

        debug!("row appended to table '{}'", self.name);

        let handle = Arc::new(RwLock::new(row));
        self.rows.push(Arc::clone(&handle));
        handle
    }

    pub fn add_rows(&mut self, rows: impl IntoIterator<Item = Row>) -> usize {
        //! Bulk append, using the singular insertion under the hood.
        //!
        //! Returns the number of rows appended.

        let mut n_insertions = 0;
        for row in rows {
            self.add_row(row);
            n_insertions += 1;
        }
        n_insertions
    }

    pub fn delete_row<F>(&mut self, condition: F) -> usize
    where
        F: Fn(&Row) -> bool,
    {
        //! Remove every row the condition matches. Surviving rows keep
        //! their original relative order. Zero matches leaves the table
        //! unchanged, which is not an error.
        //!
        //! Returns the number of rows removed.

        let before = self.rows.len();
        self.rows.retain(|row| !condition(&row.read().unwrap()));
        let n_deleted = before - self.rows.len();

        debug!("{} row(s) deleted from table '{}'", n_deleted, self.name);
        n_deleted
    }

    pub fn delete_all(&mut self) -> usize {
        let n_deleted = self.rows.len();
        self.rows.clear();
        n_deleted
    }

    pub fn find<F>(&self, condition: F, amount: usize) -> Vec<RowHandle>
    where
        F: Fn(&Row) -> bool,
    {
        //! Scan the rows in order and collect live handles to the ones
        //! the condition matches.
        //!
        //! An `amount` of 0 means no limit; otherwise the scan stops as
        //! soon as `amount` matches have been collected.

        let mut matches = Vec::new();

        for row in self.rows.iter() {
            if condition(&row.read().unwrap()) {
                matches.push(Arc::clone(row));
                if amount > 0 && matches.len() == amount {
                    break;
                }
            }
        }

        matches
    }

    pub fn scan(&self) -> Vec<RowHandle> {
        //! Handles to every row, in insertion order. The default
        //! match-everything form of [`Table::find`].

        self.rows.iter().map(Arc::clone).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self
            .fields
            .values()
            .map(|field| format!("{}", field))
            .collect();

        let rows: Vec<String> = self
            .rows
            .iter()
            .map(|row| format!("{}", row.read().unwrap()))
            .collect();

        writeln!(f, "{}\n{}", schema.join(" | "), rows.join("\n"))
    }
}
