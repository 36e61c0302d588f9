//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: lock-guarded in-process tables, used when no database is
//!   configured and by integration tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
