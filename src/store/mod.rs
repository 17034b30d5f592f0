//! The in-memory relational model and its embedded-file round trip.
//! The store is made of the following components:
//! - Value (the tagged union a cell can hold)
//! - Field (a named, typed column declaration; Schema entries are unique per table)
//! - Row (an ordered, schema-flexible bag of named values)
//! - Table (a named schema plus ordered rows, with predicate find/delete)
//! - Database (named tables plus the optional embedded SQLite file)

//  All modules of this lib
mod database;
mod error;
mod row;
mod schema;
mod sqlite;
mod table;
mod value;

//  External API
pub use database::Database;
pub use error::Error;
pub use row::{Row, RowHandle};
pub use schema::{DataType, Field};
pub use table::{Table, TableHandle};
pub use value::Value;
