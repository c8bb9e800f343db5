//! PostgreSQL persistence adapters using Diesel.
//!
//! Concrete implementations of the domain's storage ports, backed by
//! PostgreSQL through `diesel-async` with bb8 connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate
//!   between Diesel rows and domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   definition (`schema.rs`) never leak past this module.
//! - **Strongly typed errors**: every database failure is mapped onto
//!   the port's error enum.

mod diesel_contact_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_contact_repository::DieselContactRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
