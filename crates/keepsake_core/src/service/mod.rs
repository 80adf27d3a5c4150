//! Use-case services over the record stores.
//!
//! # Responsibility
//! - Validate user input before anything is persisted.
//! - Orchestrate load → in-memory change → save for each command.
//!
//! # Invariants
//! - A validation failure never touches the store file.

pub mod commit_service;
pub mod journal_service;
