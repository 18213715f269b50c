//! THE MACHINE: a text-adventure console.
//!
//! The operator types commands at a prompt. Each command either prints help,
//! opens one of the scripted narrative branches, or ends the session. Every
//! command/response pair is appended to a transcript store.
//!
//! - [`engine`]: command dispatch and the narrative branches.
//! - [`console`]: prompt/read/print over injectable input and output.
//! - [`assets`]: ASCII-art rewards loaded from a directory.
//! - [`db`]: SQLite-backed transcript sink.
//! - [`models`]: progress flags and transcript records.

pub mod assets;
pub mod config;
pub mod console;
pub mod db;
pub mod engine;
pub mod models;
pub mod render;
