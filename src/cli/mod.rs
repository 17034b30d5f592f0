use std::{
    io::{self, Write},
    sync::{Arc, RwLock},
};

use colored::Colorize;

use crate::{
    cli::{
        colors::RELA_BLUE,
        commands::{CommandExecutor, CommandResult},
        messages::{highlight_argument, system_message},
    },
    sessions::session::Session,
};

mod colors;
mod commands;
mod messages;
pub mod parsers;
mod splash_screen;

const DEFAULT_LAST_COMMAND_DELIMITER: &str = "!";

// The file the client opens on startup when the variable is set.
const DATABASE_FILE_VAR: &str = "RELADB_FILE";

const RELADB_COMMANDS_LIST: [(&str, &str); 16] = [
    ("!", "execute the last command, add more to go further back"),
    ("help", "list all available commands"),
    ("history", "list command history for this session"),
    ("open", "open <file> - bind and load an embedded database file"),
    ("save", "write every table to the open file"),
    ("load", "read every table from the open file"),
    ("tables", "list the tables of the open database"),
    ("create", "create <table> <name:type>* - create a table"),
    ("drop", "drop <table> - delete a table"),
    ("alter", "alter <table> add <name:type>* | drop <name>*"),
    ("insert", "insert <table> <field=value>* - append a row"),
    ("show", "show <table> - print schema and rows"),
    ("find", "find <table> <field=value>* [limit n]"),
    ("update", "update <table> <field=value>* where <field=value>*"),
    ("delete", "delete <table> <field=value>* - remove matching rows"),
    (
        "sever",
        "all relations end eventually and so does this session when you exit",
    ),
];

pub fn run_client() {
    splash_screen::splash_screen();

    let session = Arc::new(RwLock::new(Session::client()));

    // A .env next to the binary can name the startup database file.
    dotenvy::dotenv().ok();
    if let Ok(file_path) = std::env::var(DATABASE_FILE_VAR) {
        let opened = session.write().unwrap().open_database(&file_path);
        match opened {
            Ok(()) => println!(
                "{}",
                system_message(
                    "info",
                    format!(
                        "Database '{}' was opened from {}.",
                        highlight_argument(&file_path),
                        highlight_argument(DATABASE_FILE_VAR)
                    )
                )
            ),
            Err(error) => println!("{}", system_message("store", format!("{}.", error))),
        }
    } else {
        println!(
            "{}",
            system_message(
                "info",
                "A fresh in-memory database was created at the session level.".to_string()
            )
        );
    }

    start_repl(session);
}

pub fn run_server() {
    println!("Mode server is not supported yet. Try 'client'.");
}

pub fn show_help() {
    println!("{:10} {}", "COMMAND".color(RELA_BLUE), "DETAILS");
    for (command, details) in RELADB_COMMANDS_LIST {
        println!("{:10} {}", command.color(RELA_BLUE), details)
    }
}

fn start_repl(client_session: Arc<RwLock<Session>>) {
    println!(
        "{}",
        system_message(
            "system",
            format!(
                "Use '{}' to quit and '{}' to know all commands available.",
                highlight_argument("sever"),
                highlight_argument("help"),
            ),
        )
    );

    {
        let session = client_session.read().unwrap();
        let session_start_time = session.start_time_string();
        println!(
            "{}",
            system_message(
                "system",
                format!(
                    "New session initiated at '{}'.",
                    highlight_argument(&session_start_time)
                ),
            )
        );
    }

    loop {
        let mut command_result: Option<CommandResult> = None;

        println!();
        print!("{:6} > ", "reladb".color(RELA_BLUE).bold());
        io::stdout().flush().unwrap();

        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer).unwrap();

        if buffer.starts_with(DEFAULT_LAST_COMMAND_DELIMITER) {
            let session = client_session.read().unwrap();
            let last = buffer.matches(DEFAULT_LAST_COMMAND_DELIMITER).count();
            let last_command = session.get_last_command(last);

            if last_command.is_none() {
                println!(
                    "{}",
                    system_message(
                        "system",
                        format!(
                            "No command {} steps back.",
                            highlight_argument(&last.to_string())
                        ),
                    )
                );
                continue;
            } else {
                buffer = last_command.unwrap().to_string();
            }
        }

        {
            let mut session = client_session.write().unwrap();
            session.add_to_command_history(buffer.clone().trim());
        }

        match buffer.trim() {
            "history" => {
                let session = client_session.read().unwrap();
                session.show_command_history(None);
            }
            "help" => show_help(),
            "exit" => println!("did you mean '{}'?", "sever".color(RELA_BLUE)),
            "sever" => break,
            command => {
                let executor = CommandExecutor::new(command, &client_session);
                match executor.execute() {
                    Ok(result) => {
                        if let Some(n_rows) = result.n_rows_processed {
                            println!(
                                "{}",
                                system_message("reladb", format!("{} row(s) processed!", n_rows))
                            );
                        }
                        command_result = Some(result);
                    }
                    Err(error) => println!("{}", error),
                }
            }
        }

        if let Some(result) = command_result.take() {
            if let Some(table) = result.table {
                println!("{}", table.read().unwrap())
            }

            if let Some(rows) = result.rows {
                for row in rows {
                    let pairs: Vec<String> = row
                        .read()
                        .unwrap()
                        .fields()
                        .iter()
                        .map(|(field, value)| format!("{}={}", field, value))
                        .collect();
                    println!("{}", pairs.join(" | "));
                }
            }
        }
    }

    println!("Goodbye!")
}
