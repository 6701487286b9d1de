//! Course data model and field validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Department, DepartmentSet, FieldError, Instructor, InstructorId};

/// Shortest accepted course name, in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Longest accepted course name, in characters.
pub const NAME_MAX_CHARS: usize = 30;
/// Upper bound on credits awarded by a course.
pub const MAX_CREDITS: i32 = 100;

/// Surrogate course identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(i64);

impl CourseId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated course fields as supplied by a client or an import file.
///
/// Every field is optional at this layer so that missing values surface as
/// field errors instead of parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub credits: Option<i32>,
    #[serde(default)]
    pub departments: Option<Vec<Department>>,
    #[serde(default)]
    pub instructor_id: Option<i64>,
}

/// Course fields that passed validation but have not been stored.
///
/// Code uniqueness and instructor existence need storage access and are
/// checked by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    name: String,
    code: String,
    description: Option<String>,
    credits: Option<i32>,
    departments: DepartmentSet,
    instructor_id: InstructorId,
}

impl CourseDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn credits(&self) -> Option<i32> {
        self.credits
    }

    pub fn departments(&self) -> &DepartmentSet {
        &self.departments
    }

    pub fn instructor_id(&self) -> InstructorId {
        self.instructor_id
    }
}

fn validate_name(value: Option<String>, errors: &mut Vec<FieldError>) -> Option<String> {
    let message = format!("Name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters");
    let Some(value) = value else {
        errors.push(FieldError::new("name", message));
        return None;
    };
    let length = value.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&length) {
        errors.push(FieldError::new("name", message));
        return None;
    }
    Some(value)
}

fn validate_code(value: Option<String>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Some(code) if !code.trim().is_empty() => Some(code),
        _ => {
            errors.push(FieldError::new("code", "Code is required"));
            None
        }
    }
}

fn validate_credits(value: Option<i32>, errors: &mut Vec<FieldError>) -> Option<i32> {
    if value.is_some_and(|credits| credits > MAX_CREDITS) {
        errors.push(FieldError::new(
            "credits",
            format!("No more than {MAX_CREDITS} credits"),
        ));
    }
    value
}

fn validate_departments(
    value: Option<Vec<Department>>,
    errors: &mut Vec<FieldError>,
) -> Option<DepartmentSet> {
    match value.map(DepartmentSet::new) {
        Some(Ok(departments)) => Some(departments),
        _ => {
            errors.push(FieldError::new(
                "departments",
                "At least one department is required",
            ));
            None
        }
    }
}

fn validate_instructor(value: Option<i64>, errors: &mut Vec<FieldError>) -> Option<InstructorId> {
    if value.is_none() {
        errors.push(FieldError::new("instructorId", "Instructor id is required"));
    }
    value.map(InstructorId::new)
}

impl TryFrom<CoursePayload> for CourseDraft {
    type Error = Vec<FieldError>;

    fn try_from(payload: CoursePayload) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();
        let name = validate_name(payload.name, &mut errors);
        let code = validate_code(payload.code, &mut errors);
        let credits = validate_credits(payload.credits, &mut errors);
        let departments = validate_departments(payload.departments, &mut errors);
        let instructor_id = validate_instructor(payload.instructor_id, &mut errors);

        match (name, code, departments, instructor_id) {
            (Some(name), Some(code), Some(departments), Some(instructor_id))
                if errors.is_empty() =>
            {
                Ok(Self {
                    name,
                    code,
                    description: payload.description,
                    credits,
                    departments,
                    instructor_id,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Stored course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    name: String,
    code: String,
    description: Option<String>,
    credits: Option<i32>,
    departments: DepartmentSet,
    instructor_id: InstructorId,
}

impl Course {
    /// Rebuild a course read back from storage without revalidating it.
    pub fn restore(
        id: CourseId,
        name: String,
        code: String,
        description: Option<String>,
        credits: Option<i32>,
        departments: DepartmentSet,
        instructor_id: InstructorId,
    ) -> Self {
        Self {
            id,
            name,
            code,
            description,
            credits,
            departments,
            instructor_id,
        }
    }

    /// Attach a storage identifier to validated fields.
    pub fn new(id: CourseId, draft: CourseDraft) -> Self {
        let CourseDraft {
            name,
            code,
            description,
            credits,
            departments,
            instructor_id,
        } = draft;
        Self {
            id,
            name,
            code,
            description,
            credits,
            departments,
            instructor_id,
        }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn credits(&self) -> Option<i32> {
        self.credits
    }

    pub fn departments(&self) -> &DepartmentSet {
        &self.departments
    }

    pub fn instructor_id(&self) -> InstructorId {
        self.instructor_id
    }
}

/// A course together with the instructor it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetail {
    pub course: Course,
    pub instructor: Instructor,
}
