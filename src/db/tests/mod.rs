//! Shared database repository test infrastructure
//!
//! Fast in-memory SQLite tests that run with every `cargo test`, using the
//! real migration files so the test schema matches production.


mod executions;
mod live_actions;
mod pool;
