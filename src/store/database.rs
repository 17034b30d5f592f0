use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use log::info;

use super::error::Error;
use super::schema::DataType;
use super::sqlite;
use super::table::{Table, TableHandle};

/// The collective of multiple [`Table`] objects.
///
/// A [`Database`] owns an ordered mapping of unique table names to
/// tables and, optionally, the path of the embedded SQLite file that
/// `save` and `load` synchronize with. This is the smart class of the
/// pair: it enforces name uniqueness and drives persistence, while
/// [`Table`] only knows how to mutate and scan itself.
///
/// Tables are handed out as [`TableHandle`]s so callers can keep a
/// handle and mutate the table directly, the same way rows are handed
/// out by [`Table::find`].
pub struct Database {
    tables: IndexMap<String, TableHandle>,
    file_path: Option<PathBuf>,
}

impl Database {
    pub fn new() -> Database {
        //! Create a fresh database with no tables and no backing file.

        Database {
            tables: IndexMap::new(),
            file_path: None,
        }
    }

    pub fn open(file_path: impl Into<PathBuf>) -> Database {
        //! Create a database bound to an embedded file path.
        //!
        //! The file is not touched until [`Database::save`] or
        //! [`Database::load`] is called.

        Database {
            tables: IndexMap::new(),
            file_path: Some(file_path.into()),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn create<K>(
        &mut self,
        table_name: &str,
        fields: impl IntoIterator<Item = (K, DataType)>,
    ) -> Result<TableHandle, Error>
    where
        K: AsRef<str>,
    {
        //! Create a [`Table`] with the given schema and store it under
        //! its name for quick retrieval.
        //!
        //! A name that is already taken is rejected with
        //! [`Error::AlreadyExists`].

        if self.tables.contains_key(table_name) {
            return Err(Error::AlreadyExists(format!("table '{}'", table_name)));
        }

        let mut table = Table::new(table_name)?;
        table.add_fields(fields)?;

        let handle = Arc::new(RwLock::new(table));
        self.tables
            .insert(table_name.to_string(), Arc::clone(&handle));

        info!("table '{}' created", table_name);
        Ok(handle)
    }

    pub fn delete(&mut self, table_name: &str) -> Result<(), Error> {
        //! Remove a table and all of its rows.

        self.tables
            .shift_remove(table_name)
            .map(|_| info!("table '{}' deleted", table_name))
            .ok_or_else(|| Error::NotFound(format!("table '{}'", table_name)))
    }

    pub fn get(&self, table_name: &str) -> Result<TableHandle, Error> {
        //! Get a live handle to a table by name.

        let table = self
            .tables
            .get(table_name)
            .ok_or_else(|| Error::NotFound(format!("table '{}'", table_name)))?;
        Ok(Arc::clone(table))
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn contains_table(&self, table_name: &str) -> bool {
        self.tables.contains_key(table_name)
    }

    pub fn save(&self) -> Result<(), Error> {
        //! Write every table to the backing embedded file: one SQL
        //! table per [`Table`], one column per declared field, one SQL
        //! row per row. Existing file contents are replaced.

        let file_path = self.file_path.as_deref().ok_or(Error::NoFilePath)?;
        sqlite::save(&self.tables, file_path)?;

        info!(
            "{} table(s) saved to '{}'",
            self.tables.len(),
            file_path.display()
        );
        Ok(())
    }

    pub fn load(&mut self) -> Result<(), Error> {
        //! Read every table from the backing embedded file into
        //! memory.
        //!
        //! Loading goes through [`Database::create`], so a file table
        //! whose name is already taken in memory surfaces as
        //! [`Error::AlreadyExists`].

        let file_path = self.file_path.clone().ok_or(Error::NoFilePath)?;
        let loaded = sqlite::load(&file_path)?;

        let n_tables = loaded.len();
        for (table_name, fields, rows) in loaded {
            let table = self.create(&table_name, fields)?;
            table.write().unwrap().add_rows(rows);
        }

        info!("{} table(s) loaded from '{}'", n_tables, file_path.display());
        Ok(())
    }
}

impl Default for Database {
    fn default() -> Database {
        Database::new()
    }
}
