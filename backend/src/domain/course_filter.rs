//! Course filters and the predicates built from them.
//!
//! A [`CourseFilter`] lists optional criteria. [`CoursePredicate::from_filter`]
//! turns each present criterion into a [`CourseClause`]; the predicate is the
//! conjunction of its clauses, so every criterion narrows the result and no
//! criteria match every course. Storage adapters translate the clauses into
//! their own query language while [`CoursePredicate::matches`] evaluates them
//! against an in-memory [`Course`].

use std::collections::BTreeSet;

use pagination::PageRequest;

use super::{Course, Department, InstructorId};

/// Optional criteria narrowing a course listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub instructor_id: Option<InstructorId>,
    pub credits: Option<i32>,
    /// A course must belong to every listed department.
    pub departments: BTreeSet<Department>,
}

/// A filter plus the page to fetch.
///
/// The report generator walks pages by rewriting `page`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseListRequest {
    pub filter: CourseFilter,
    pub page: PageRequest,
}

/// Single condition a course must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseClause {
    /// Taught by the given instructor.
    InstructorIs(InstructorId),
    /// Awards exactly this many credits.
    CreditsEqual(i32),
    /// Department set contains this department.
    InDepartment(Department),
}

impl CourseClause {
    fn matches(self, course: &Course) -> bool {
        match self {
            Self::InstructorIs(id) => course.instructor_id() == id,
            Self::CreditsEqual(credits) => course.credits() == Some(credits),
            Self::InDepartment(department) => course.departments().contains(department),
        }
    }
}

/// Conjunction of [`CourseClause`]s.
///
/// # Examples
/// ```
/// use courses_backend::domain::{CourseClause, CourseFilter, CoursePredicate, Department};
///
/// let filter = CourseFilter {
///     credits: Some(5),
///     departments: [Department::Physics].into_iter().collect(),
///     ..CourseFilter::default()
/// };
/// let predicate = CoursePredicate::from_filter(&filter);
/// assert_eq!(
///     predicate.clauses(),
///     [
///         CourseClause::CreditsEqual(5),
///         CourseClause::InDepartment(Department::Physics),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePredicate {
    clauses: Vec<CourseClause>,
}

impl CoursePredicate {
    /// Predicate without clauses; matches every course.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// One clause per present criterion and one per requested department.
    pub fn from_filter(filter: &CourseFilter) -> Self {
        let predicate = Self::unconstrained();
        let predicate = match filter.instructor_id {
            Some(id) => predicate.and(CourseClause::InstructorIs(id)),
            None => predicate,
        };
        let predicate = match filter.credits {
            Some(credits) => predicate.and(CourseClause::CreditsEqual(credits)),
            None => predicate,
        };
        filter
            .departments
            .iter()
            .fold(predicate, |acc, department| {
                acc.and(CourseClause::InDepartment(*department))
            })
    }

    /// Append a clause to the conjunction.
    #[must_use]
    pub fn and(mut self, clause: CourseClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[CourseClause] {
        &self.clauses
    }

    pub fn is_unconstrained(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate every clause against `course`.
    pub fn matches(&self, course: &Course) -> bool {
        self.clauses.iter().all(|clause| clause.matches(course))
    }
}
