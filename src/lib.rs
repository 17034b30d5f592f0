//! RelaDB: a lightweight object-style layer over an embedded SQLite
//! store. The `store` module is the programmatic API; `cli` and
//! `sessions` carry the interactive client on top of it.

pub mod cli;
pub mod sessions;
pub mod store;
