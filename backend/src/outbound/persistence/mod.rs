//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types; rules live in the domain.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: every Diesel or pool failure is mapped onto
//!   the port's persistence error.
//!
//! # Example
//!
//! ```ignore
//! use shareit::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/shareit")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_booking_repository;
mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_item_repository;
mod diesel_item_request_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_item_repository::DieselItemRepository;
pub use diesel_item_request_repository::DieselItemRequestRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
