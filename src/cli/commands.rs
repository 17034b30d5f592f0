//! This module is where all the REPL commands are implemented.
//!
//! RelaDB command line syntax:
//!
//! - reladb --help | Command Line Help
//! - reladb client | Run the CLI app.
//! - reladb server | Run the server listener (soon).
//!
//! Once the user is inside the REPL, the command executor takes over.
//! The store commands it understands:
//!
//! - open file
//! - save | load
//! - tables
//! - create table (name:type)*
//! - drop table
//! - alter table add (name:type)* | alter table drop name*
//! - insert table (field=value)*
//! - show table
//! - find table (field=value)* [limit n]
//! - update table (field=value)* where (field=value)*
//! - delete table (field=value)*
//!
//! Here * means more than one such values separated by spaces.

use std::sync::{Arc, RwLock};

use crate::cli::messages::{highlight_argument, system_message};
use crate::cli::parsers::{parse_assignment, parse_column_definition};
use crate::sessions::session::Session;
use crate::store::{Database, Error, Row, RowHandle, TableHandle, Value};

/// The executor that runs one REPL command against the session's
/// database.
///
/// Every command gets its own executor, the same way every statement
/// would in a bigger engine; the REPL loop stays a thin shell around
/// it.
pub struct CommandExecutor {
    tokens: Vec<String>,
    session: Arc<RwLock<Session>>,
}

/// After a command runs, whatever it produced that is worth showing
/// goes back to the main terminal loop inside a [`CommandResult`].
pub struct CommandResult {
    pub table: Option<TableHandle>,
    pub rows: Option<Vec<RowHandle>>,
    pub n_rows_processed: Option<usize>,
}

impl CommandResult {
    fn empty() -> CommandResult {
        CommandResult {
            table: None,
            rows: None,
            n_rows_processed: None,
        }
    }

    fn processed(n_rows: usize) -> CommandResult {
        CommandResult {
            table: None,
            rows: None,
            n_rows_processed: Some(n_rows),
        }
    }
}

impl CommandExecutor {
    pub fn new(command: &str, session: &Arc<RwLock<Session>>) -> CommandExecutor {
        CommandExecutor {
            tokens: command.split_whitespace().map(str::to_string).collect(),
            session: Arc::clone(session),
        }
    }

    pub fn execute(&self) -> Result<CommandResult, String> {
        //! Dispatch on the command word and run it.

        let command = self
            .tokens
            .first()
            .ok_or_else(|| system_message("system", "Nothing to run.".to_string()))?;

        match command.as_str() {
            "open" => self._execute_open(),
            "save" => self._execute_save(),
            "load" => self._execute_load(),
            "tables" => self._execute_tables(),
            "create" => self._execute_create(),
            "drop" => self._execute_drop(),
            "alter" => self._execute_alter(),
            "insert" => self._execute_insert(),
            "show" => self._execute_show(),
            "find" => self._execute_find(),
            "update" => self._execute_update(),
            "delete" => self._execute_delete(),
            other => Err(system_message(
                "system",
                format!(
                    "Unknown command {}; try '{}'.",
                    highlight_argument(other),
                    highlight_argument("help")
                ),
            )),
        }
    }

    fn _database(&self) -> Arc<RwLock<Database>> {
        self.session.read().unwrap().database()
    }

    fn _argument(&self, index: usize, what: &str) -> Result<&str, String> {
        //! Get a required positional argument or explain what was
        //! expected there.

        self.tokens.get(index).map(|t| t.as_str()).ok_or_else(|| {
            system_message(
                "system",
                format!("Expected {} here.", highlight_argument(what)),
            )
        })
    }

    fn _store_error(error: Error) -> String {
        system_message("store", format!("{}.", error))
    }

    fn _get_table(&self, table_name: &str) -> Result<TableHandle, String> {
        self._database()
            .read()
            .unwrap()
            .get(table_name)
            .map_err(Self::_store_error)
    }

    fn _parse_filters(&self, tokens: &[String]) -> Result<Vec<(String, Value)>, String> {
        tokens.iter().map(|t| parse_assignment(t)).collect()
    }

    fn _matches(filters: &[(String, Value)], row: &Row) -> bool {
        //! The equality predicate the REPL offers: every
        //! `field=value` filter must hold on the row.

        filters.iter().all(|(field, value)| row.get(field) == *value)
    }

    fn _execute_open(&self) -> Result<CommandResult, String> {
        let file_path = self._argument(1, "a file path")?.to_string();

        let mut session = self.session.write().unwrap();
        session
            .open_database(&file_path)
            .map_err(Self::_store_error)?;

        println!(
            "{}",
            system_message(
                "reladb",
                format!("Database '{}' is open.", highlight_argument(&file_path)),
            )
        );
        Ok(CommandResult::empty())
    }

    fn _execute_save(&self) -> Result<CommandResult, String> {
        self._database()
            .read()
            .unwrap()
            .save()
            .map_err(Self::_store_error)?;
        Ok(CommandResult::empty())
    }

    fn _execute_load(&self) -> Result<CommandResult, String> {
        self._database()
            .write()
            .unwrap()
            .load()
            .map_err(Self::_store_error)?;
        Ok(CommandResult::empty())
    }

    fn _execute_tables(&self) -> Result<CommandResult, String> {
        let database = self._database();
        let database_ro = database.read().unwrap();

        for table_name in database_ro.table_names() {
            let n_rows = database_ro
                .get(&table_name)
                .map(|table| table.read().unwrap().len())
                .unwrap_or(0);
            println!("{:6} row(s) | {}", n_rows, highlight_argument(&table_name));
        }

        Ok(CommandResult::empty())
    }

    fn _execute_create(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;

        let mut fields = Vec::new();
        for definition in self.tokens.iter().skip(2) {
            fields.push(parse_column_definition(definition)?);
        }

        self._database()
            .write()
            .unwrap()
            .create(table_name, fields)
            .map_err(Self::_store_error)?;

        Ok(CommandResult::empty())
    }

    fn _execute_drop(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;

        self._database()
            .write()
            .unwrap()
            .delete(table_name)
            .map_err(Self::_store_error)?;

        Ok(CommandResult::empty())
    }

    fn _execute_alter(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;
        let action = self._argument(2, "'add' or 'drop'")?.to_string();
        let table = self._get_table(table_name)?;

        match action.as_str() {
            "add" => {
                let mut fields = Vec::new();
                for definition in self.tokens.iter().skip(3) {
                    fields.push(parse_column_definition(definition)?);
                }
                table
                    .write()
                    .unwrap()
                    .add_fields(fields)
                    .map_err(Self::_store_error)?;
            }
            "drop" => {
                let names: Vec<&str> = self.tokens.iter().skip(3).map(|t| t.as_str()).collect();
                table.write().unwrap().delete_fields(&names);
            }
            other => {
                return Err(system_message(
                    "system",
                    format!(
                        "Unknown alter action {}; try 'add' or 'drop'.",
                        highlight_argument(other)
                    ),
                ));
            }
        }

        Ok(CommandResult::empty())
    }

    fn _execute_insert(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;
        let table = self._get_table(table_name)?;

        let mut row = Row::new();
        for assignment in self.tokens.iter().skip(2) {
            let (field, value) = parse_assignment(assignment)?;
            row.add_field(&field, value);
        }

        table.write().unwrap().add_row(row);
        Ok(CommandResult::processed(1))
    }

    fn _execute_show(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;
        let table = self._get_table(table_name)?;

        Ok(CommandResult {
            table: Some(table),
            rows: None,
            n_rows_processed: None,
        })
    }

    fn _execute_find(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;
        let table = self._get_table(table_name)?;

        let mut filter_tokens: Vec<String> = self.tokens.iter().skip(2).cloned().collect();
        let mut amount = 0;

        // A trailing 'limit n' caps the matches collected.
        if filter_tokens.len() >= 2 && filter_tokens[filter_tokens.len() - 2] == "limit" {
            let limit_token = filter_tokens.pop().unwrap();
            filter_tokens.pop();
            amount = limit_token.parse::<usize>().map_err(|_| {
                system_message(
                    "parser",
                    format!(
                        "The limit wants a number, not {}.",
                        highlight_argument(&limit_token)
                    ),
                )
            })?;
        }

        let filters = self._parse_filters(&filter_tokens)?;
        let rows = table
            .read()
            .unwrap()
            .find(|row| Self::_matches(&filters, row), amount);

        Ok(CommandResult {
            table: None,
            n_rows_processed: Some(rows.len()),
            rows: Some(rows),
        })
    }

    fn _execute_update(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;
        let table = self._get_table(table_name)?;

        let rest: Vec<String> = self.tokens.iter().skip(2).cloned().collect();
        let split_at = rest.iter().position(|t| t == "where").ok_or_else(|| {
            system_message(
                "system",
                format!(
                    "Updates look like {}.",
                    highlight_argument("update table field=value where field=value")
                ),
            )
        })?;

        let assignments = self._parse_filters(&rest[..split_at])?;
        let filters = self._parse_filters(&rest[split_at + 1..])?;

        // Found rows are live handles; writing through them updates
        // the stored rows.
        let found = table
            .read()
            .unwrap()
            .find(|row| Self::_matches(&filters, row), 0);

        for row in found.iter() {
            let mut row_rw = row.write().unwrap();
            for (field, value) in assignments.iter() {
                row_rw.add_field(field, value.clone());
            }
        }

        Ok(CommandResult::processed(found.len()))
    }

    fn _execute_delete(&self) -> Result<CommandResult, String> {
        let table_name = self._argument(1, "a table name")?;
        let table = self._get_table(table_name)?;

        let filter_tokens: Vec<String> = self.tokens.iter().skip(2).cloned().collect();

        let n_deleted = if filter_tokens.is_empty() {
            table.write().unwrap().delete_all()
        } else {
            let filters = self._parse_filters(&filter_tokens)?;
            table
                .write()
                .unwrap()
                .delete_row(|row| Self::_matches(&filters, row))
        };

        Ok(CommandResult::processed(n_deleted))
    }
}
