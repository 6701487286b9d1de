//! Academic departments and the department set carried by each course.
//!
//! Department sets are persisted as a single comma-delimited string of
//! department names. [`DepartmentSet::encode`] and [`DepartmentSet::decode`]
//! convert between the two forms.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator between department names in the stored form.
pub const DEPARTMENT_DELIMITER: &str = ",";

/// Department a course belongs to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    ComputerScience,
    Mathematics,
    Electronics,
    Physics,
    Chemistry,
    Biology,
    Engineering,
    ElectricalEngineering,
    Economics,
    Literature,
}

impl Department {
    /// Every department in declaration order.
    pub const ALL: [Self; 10] = [
        Self::ComputerScience,
        Self::Mathematics,
        Self::Electronics,
        Self::Physics,
        Self::Chemistry,
        Self::Biology,
        Self::Engineering,
        Self::ElectricalEngineering,
        Self::Economics,
        Self::Literature,
    ];

    /// Stable wire and storage name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ComputerScience => "COMPUTER_SCIENCE",
            Self::Mathematics => "MATHEMATICS",
            Self::Electronics => "ELECTRONICS",
            Self::Physics => "PHYSICS",
            Self::Chemistry => "CHEMISTRY",
            Self::Biology => "BIOLOGY",
            Self::Engineering => "ENGINEERING",
            Self::ElectricalEngineering => "ELECTRICAL_ENGINEERING",
            Self::Economics => "ECONOMICS",
            Self::Literature => "LITERATURE",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while building or decoding a [`DepartmentSet`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DepartmentError {
    #[error("unknown department: {value}")]
    Unknown { value: String },
    #[error("at least one department is required")]
    Empty,
}

impl FromStr for Department {
    type Err = DepartmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == s)
            .ok_or_else(|| DepartmentError::Unknown {
                value: s.to_owned(),
            })
    }
}

/// Non-empty set of departments.
///
/// # Examples
/// ```
/// use courses_backend::domain::{Department, DepartmentSet};
///
/// let set = DepartmentSet::decode("MATHEMATICS,,PHYSICS").expect("known names");
/// assert!(set.contains(Department::Physics));
/// assert_eq!(set.encode(), "MATHEMATICS,PHYSICS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Department>", into = "Vec<Department>")]
pub struct DepartmentSet(BTreeSet<Department>);

impl DepartmentSet {
    /// Collect departments into a set, rejecting an empty collection.
    pub fn new(
        departments: impl IntoIterator<Item = Department>,
    ) -> Result<Self, DepartmentError> {
        let set: BTreeSet<Department> = departments.into_iter().collect();
        if set.is_empty() {
            return Err(DepartmentError::Empty);
        }
        Ok(Self(set))
    }

    /// Parse the stored comma-delimited form. Empty segments are skipped.
    pub fn decode(raw: &str) -> Result<Self, DepartmentError> {
        let departments = raw
            .split(DEPARTMENT_DELIMITER)
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(Department::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(departments)
    }

    /// Stored comma-delimited form, ordered by declaration order.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|department| department.as_str())
            .collect::<Vec<_>>()
            .join(DEPARTMENT_DELIMITER)
    }

    /// True set membership, never substring matching.
    pub fn contains(&self, department: Department) -> bool {
        self.0.contains(&department)
    }

    pub fn iter(&self) -> impl Iterator<Item = Department> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<Department>> for DepartmentSet {
    type Error = DepartmentError;

    fn try_from(value: Vec<Department>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DepartmentSet> for Vec<Department> {
    fn from(value: DepartmentSet) -> Self {
        value.0.into_iter().collect()
    }
}

impl fmt::Display for DepartmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
