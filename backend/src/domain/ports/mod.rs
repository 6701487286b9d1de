//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe what the domain needs from storage
//! and expose strongly typed errors. Driving ports (`*Command`, `*Query`,
//! [`CourseReport`], [`CourseImport`]) are the use-cases inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod course_import;
mod course_query;
mod course_report;
mod course_repository;
mod instructor_command;
mod instructor_query;
mod instructor_repository;

pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_import::{CourseImport, ImportSummary};
#[cfg(test)]
pub use course_import::MockCourseImport;
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_query::MockCourseQuery;
pub use course_report::CourseReport;
#[cfg(test)]
pub use course_report::MockCourseReport;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use instructor_command::InstructorCommand;
#[cfg(test)]
pub use instructor_command::MockInstructorCommand;
pub use instructor_query::InstructorQuery;
#[cfg(test)]
pub use instructor_query::MockInstructorQuery;
pub use instructor_repository::{
    InstructorDeletion, InstructorRepository, InstructorRepositoryError,
};
#[cfg(test)]
pub use instructor_repository::MockInstructorRepository;
