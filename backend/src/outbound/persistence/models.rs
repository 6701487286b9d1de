//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{
    Course, CourseDraft, CourseId, DepartmentSet, Instructor, InstructorDraft, InstructorId,
};

use super::schema::{courses, instructors};

/// Row struct for reading from the instructors table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = instructors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InstructorRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<InstructorRow> for Instructor {
    fn from(row: InstructorRow) -> Self {
        Self::restore(
            InstructorId::new(row.id),
            row.first_name,
            row.last_name,
            row.email,
        )
    }
}

/// Insertable and changeset struct for instructor writes.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = instructors)]
pub(crate) struct InstructorChanges<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a InstructorDraft> for InstructorChanges<'a> {
    fn from(draft: &'a InstructorDraft) -> Self {
        Self {
            first_name: draft.first_name(),
            last_name: draft.last_name(),
            email: draft.email(),
        }
    }
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub credits: Option<i32>,
    pub departments: String,
    pub instructor_id: i64,
}

impl TryFrom<CourseRow> for Course {
    type Error = String;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let departments = DepartmentSet::decode(&row.departments)
            .map_err(|err| format!("course {} has unreadable departments: {err}", row.id))?;
        Ok(Self::restore(
            CourseId::new(row.id),
            row.name,
            row.code,
            row.description,
            row.credits,
            departments,
            InstructorId::new(row.instructor_id),
        ))
    }
}

/// Insertable and changeset struct for course writes.
///
/// `description` and `credits` are written even when `None` so updates
/// clear them.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseChanges<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub description: Option<&'a str>,
    pub credits: Option<i32>,
    pub departments: String,
    pub instructor_id: i64,
}

impl<'a> From<&'a CourseDraft> for CourseChanges<'a> {
    fn from(draft: &'a CourseDraft) -> Self {
        Self {
            name: draft.name(),
            code: draft.code(),
            description: draft.description(),
            credits: draft.credits(),
            departments: draft.departments().encode(),
            instructor_id: draft.instructor_id().get(),
        }
    }
}
