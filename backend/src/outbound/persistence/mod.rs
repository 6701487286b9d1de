//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain entities. Connections come from a `bb8` pool driven by
//! `diesel-async`; database errors are mapped to the typed repository errors
//! of the domain ports.
//!
//! # Example
//!
//! ```ignore
//! use courses_backend::outbound::persistence::{
//!     DbPool, DieselCourseRepository, DieselInstructorRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/courses")).await?;
//! let courses = DieselCourseRepository::new(pool.clone());
//! let instructors = DieselInstructorRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_course_repository;
mod diesel_instructor_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_instructor_repository::DieselInstructorRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
