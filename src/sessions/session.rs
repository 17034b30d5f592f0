//! The only point of truth for all information that is related to the
//! current client session. A session holds the command history, the
//! session start time and the one open [`Database`] the commands act
//! on.
//!
//! A database can be swapped mid-session by opening another file; the
//! previous in-memory tables are discarded when that happens.

use std::{
    fmt::Display,
    path::Path,
    sync::{Arc, RwLock},
    time::SystemTime,
};

use chrono::{DateTime, Local};

use crate::store::{Database, Error};

struct CommandHistory {
    command: String,
    command_time: SystemTime,
}

impl CommandHistory {
    pub fn command_time_string(&self) -> String {
        let datetime: DateTime<Local> = self.command_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Display for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.command_time_string(), self.command)
    }
}

pub struct Session {
    command_history: Vec<CommandHistory>,
    start_time: SystemTime,
    database: Arc<RwLock<Database>>,
}

impl Session {
    pub fn client() -> Session {
        //! Returns a new client session with a fresh, unbound
        //! database.

        Session {
            command_history: vec![],
            start_time: SystemTime::now(),
            database: Arc::new(RwLock::new(Database::new())),
        }
    }

    pub fn database(&self) -> Arc<RwLock<Database>> {
        //! Get a handle to the database this session acts on.

        Arc::clone(&self.database)
    }

    pub fn open_database(&mut self, file_path: &str) -> Result<(), Error> {
        //! Bind the session to an embedded file, loading its contents
        //! when the file already exists.
        //!
        //! The previously open database is discarded.

        let mut database = Database::open(file_path);
        if Path::new(file_path).exists() {
            database.load()?;
        }

        self.database = Arc::new(RwLock::new(database));
        Ok(())
    }

    pub fn add_to_command_history(&mut self, command: &str) {
        self.command_history.push(CommandHistory {
            command: command.to_string(),
            command_time: SystemTime::now(),
        });
    }

    pub fn start_time_string(&self) -> String {
        //! Convert the [`SystemTime`] object into a string
        //! representation to be more readable.

        let datetime: DateTime<Local> = self.start_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn show_command_history(&self, n_prev: Option<usize>) {
        //! Show the list of previously invoked commands.
        //! Use `n_prev` to limit the number of commands you see.

        let limit = n_prev.unwrap_or(self.command_history.len());

        for (index, command) in self.command_history.iter().rev().enumerate() {
            if index < limit {
                println!("{:3} | {}", index, command);
            }
        }
    }

    pub fn get_last_command(&self, nth_back: usize) -> Option<&str> {
        //! Gets the `nth_back`th last command from the history.

        self.command_history
            .iter()
            .nth_back(nth_back - 1)
            .map(|cmd| cmd.command.as_str())
    }
}
