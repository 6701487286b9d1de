//! In-memory catalogue implementing both repository ports.
//!
//! Used when no database URL is configured and by HTTP tests. Courses and
//! instructors share one lock, so uniqueness and reference checks are atomic
//! with the write they guard, matching the database constraints.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, InstructorDeletion, InstructorRepository,
    InstructorRepositoryError,
};
use crate::domain::{
    Course, CourseDetail, CourseDraft, CourseId, CoursePredicate, Instructor, InstructorDraft,
    InstructorId,
};

#[derive(Default)]
struct CatalogueState {
    instructors: BTreeMap<InstructorId, Instructor>,
    courses: BTreeMap<CourseId, Course>,
    last_instructor_id: i64,
    last_course_id: i64,
}

impl CatalogueState {
    fn code_taken(&self, code: &str, excluded: Option<CourseId>) -> bool {
        self.courses
            .values()
            .any(|course| course.code() == code && Some(course.id()) != excluded)
    }

    fn email_taken(&self, email: &str, excluded: Option<InstructorId>) -> bool {
        self.instructors
            .values()
            .any(|instructor| instructor.email() == email && Some(instructor.id()) != excluded)
    }

    fn check_course(
        &self,
        draft: &CourseDraft,
        excluded: Option<CourseId>,
    ) -> Result<(), CourseRepositoryError> {
        if self.code_taken(draft.code(), excluded) {
            return Err(CourseRepositoryError::duplicate_code(draft.code()));
        }
        if !self.instructors.contains_key(&draft.instructor_id()) {
            return Err(CourseRepositoryError::missing_instructor(
                draft.instructor_id().get(),
            ));
        }
        Ok(())
    }
}

fn page_of<T: Clone>(items: impl Iterator<Item = T>, request: PageRequest) -> Page<T> {
    let matching: Vec<T> = items.collect();
    let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
    let content = matching.into_iter().skip(offset).take(size).collect();
    Page::new(content, request, total)
}

/// Shared in-memory store of courses and instructors.
///
/// Cloning shares the same underlying data.
#[derive(Clone, Default)]
pub struct InMemoryCatalogue {
    state: Arc<Mutex<CatalogueState>>,
}

impl InMemoryCatalogue {
    /// Empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CatalogueState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory catalogue lock poisoned".to_owned())
    }

    fn lock_courses(&self) -> Result<MutexGuard<'_, CatalogueState>, CourseRepositoryError> {
        self.lock().map_err(CourseRepositoryError::query)
    }

    fn lock_instructors(
        &self,
    ) -> Result<MutexGuard<'_, CatalogueState>, InstructorRepositoryError> {
        self.lock().map_err(InstructorRepositoryError::query)
    }
}

#[async_trait]
impl CourseRepository for InMemoryCatalogue {
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut state = self.lock_courses()?;
        state.check_course(draft, None)?;
        state.last_course_id += 1;
        let course = Course::new(CourseId::new(state.last_course_id), draft.clone());
        state.courses.insert(course.id(), course.clone());
        Ok(course)
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut state = self.lock_courses()?;
        if !state.courses.contains_key(&id) {
            return Ok(None);
        }
        state.check_course(draft, Some(id))?;
        let course = Course::new(id, draft.clone());
        state.courses.insert(id, course.clone());
        Ok(Some(course))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        Ok(self.lock_courses()?.courses.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self.lock_courses()?.courses.get(&id).cloned())
    }

    async fn find_detail(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseDetail>, CourseRepositoryError> {
        let state = self.lock_courses()?;
        Ok(state.courses.get(&id).and_then(|course| {
            state
                .instructors
                .get(&course.instructor_id())
                .map(|instructor| CourseDetail {
                    course: course.clone(),
                    instructor: instructor.clone(),
                })
        }))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, CourseRepositoryError> {
        let state = self.lock_courses()?;
        Ok(state
            .courses
            .values()
            .find(|course| course.code() == code)
            .cloned())
    }

    async fn find_page(
        &self,
        predicate: &CoursePredicate,
        request: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError> {
        let state = self.lock_courses()?;
        Ok(page_of(
            state
                .courses
                .values()
                .filter(|course| predicate.matches(course))
                .cloned(),
            request,
        ))
    }
}

#[async_trait]
impl InstructorRepository for InMemoryCatalogue {
    async fn insert(
        &self,
        draft: &InstructorDraft,
    ) -> Result<Instructor, InstructorRepositoryError> {
        let mut state = self.lock_instructors()?;
        if state.email_taken(draft.email(), None) {
            return Err(InstructorRepositoryError::duplicate_email(draft.email()));
        }
        state.last_instructor_id += 1;
        let instructor = Instructor::new(InstructorId::new(state.last_instructor_id), draft.clone());
        state.instructors.insert(instructor.id(), instructor.clone());
        Ok(instructor)
    }

    async fn update(
        &self,
        id: InstructorId,
        draft: &InstructorDraft,
    ) -> Result<Option<Instructor>, InstructorRepositoryError> {
        let mut state = self.lock_instructors()?;
        if !state.instructors.contains_key(&id) {
            return Ok(None);
        }
        if state.email_taken(draft.email(), Some(id)) {
            return Err(InstructorRepositoryError::duplicate_email(draft.email()));
        }
        let instructor = Instructor::new(id, draft.clone());
        state.instructors.insert(id, instructor.clone());
        Ok(Some(instructor))
    }

    async fn find_by_id(
        &self,
        id: InstructorId,
    ) -> Result<Option<Instructor>, InstructorRepositoryError> {
        Ok(self.lock_instructors()?.instructors.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Instructor>, InstructorRepositoryError> {
        let state = self.lock_instructors()?;
        Ok(state
            .instructors
            .values()
            .find(|instructor| instructor.email() == email)
            .cloned())
    }

    async fn find_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<Instructor>, InstructorRepositoryError> {
        let state = self.lock_instructors()?;
        Ok(page_of(state.instructors.values().cloned(), request))
    }

    async fn delete_unreferenced(
        &self,
        id: InstructorId,
    ) -> Result<InstructorDeletion, InstructorRepositoryError> {
        let mut state = self.lock_instructors()?;
        if !state.instructors.contains_key(&id) {
            return Ok(InstructorDeletion::NotFound);
        }
        let referencing = state
            .courses
            .values()
            .filter(|course| course.instructor_id() == id)
            .count();
        if referencing > 0 {
            return Ok(InstructorDeletion::Referenced {
                course_count: u64::try_from(referencing).unwrap_or(u64::MAX),
            });
        }
        state.instructors.remove(&id);
        Ok(InstructorDeletion::Deleted)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory catalogue.
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{CourseClause, CoursePayload, Department, InstructorPayload};

    fn instructor_draft(email: &str) -> InstructorDraft {
        InstructorDraft::try_from(InstructorPayload {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email: Some(email.to_owned()),
        })
        .expect("valid instructor")
    }

    fn course_draft(code: &str, instructor: InstructorId, departments: &[Department]) -> CourseDraft {
        CourseDraft::try_from(CoursePayload {
            name: Some(format!("Course {code}")),
            code: Some(code.to_owned()),
            description: None,
            credits: Some(4),
            departments: Some(departments.to_vec()),
            instructor_id: Some(instructor.get()),
        })
        .expect("valid course")
    }

    #[fixture]
    fn catalogue() -> InMemoryCatalogue {
        InMemoryCatalogue::new()
    }

    async fn seed_instructor(catalogue: &InMemoryCatalogue, email: &str) -> Instructor {
        InstructorRepository::insert(catalogue, &instructor_draft(email))
            .await
            .expect("instructor stored")
    }

    #[rstest]
    #[tokio::test]
    async fn assigns_increasing_ids(catalogue: InMemoryCatalogue) {
        let first = seed_instructor(&catalogue, "a@example.org").await;
        let second = seed_instructor(&catalogue, "b@example.org").await;

        assert_eq!(first.id(), InstructorId::new(1));
        assert_eq!(second.id(), InstructorId::new(2));
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_duplicate_codes_and_unknown_instructors(catalogue: InMemoryCatalogue) {
        let teacher = seed_instructor(&catalogue, "a@example.org").await;
        let physics = [Department::Physics];
        CourseRepository::insert(&catalogue, &course_draft("P-1", teacher.id(), &physics))
            .await
            .expect("first insert");

        let duplicate =
            CourseRepository::insert(&catalogue, &course_draft("P-1", teacher.id(), &physics)).await;
        let orphan =
            CourseRepository::insert(&catalogue, &course_draft("P-2", InstructorId::new(99), &physics))
                .await;

        assert_eq!(duplicate, Err(CourseRepositoryError::duplicate_code("P-1")));
        assert_eq!(orphan, Err(CourseRepositoryError::missing_instructor(99_i64)));
    }

    #[rstest]
    #[tokio::test]
    async fn pages_filtered_courses_in_id_order(catalogue: InMemoryCatalogue) {
        let teacher = seed_instructor(&catalogue, "a@example.org").await;
        for (code, department) in [
            ("E-1", Department::Engineering),
            ("EE-1", Department::ElectricalEngineering),
            ("E-2", Department::Engineering),
            ("E-3", Department::Engineering),
        ] {
            CourseRepository::insert(&catalogue, &course_draft(code, teacher.id(), &[department]))
                .await
                .expect("insert");
        }
        let predicate =
            CoursePredicate::unconstrained().and(CourseClause::InDepartment(Department::Engineering));

        let page = CourseRepository::find_page(
            &catalogue,
            &predicate,
            PageRequest::new(1, 2).expect("valid page"),
        )
        .await
        .expect("page loads");

        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.total_pages(), 2);
        let codes: Vec<&str> = page.content().iter().map(Course::code).collect();
        assert_eq!(codes, ["E-3"]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_keeps_referenced_instructors(catalogue: InMemoryCatalogue) {
        let teacher = seed_instructor(&catalogue, "a@example.org").await;
        let course = CourseRepository::insert(
            &catalogue,
            &course_draft("C-1", teacher.id(), &[Department::Chemistry]),
        )
        .await
        .expect("insert");

        let blocked = catalogue.delete_unreferenced(teacher.id()).await;
        CourseRepository::delete(&catalogue, course.id())
            .await
            .expect("course delete");
        let allowed = catalogue.delete_unreferenced(teacher.id()).await;
        let repeated = catalogue.delete_unreferenced(teacher.id()).await;

        assert_eq!(blocked, Ok(InstructorDeletion::Referenced { course_count: 1 }));
        assert_eq!(allowed, Ok(InstructorDeletion::Deleted));
        assert_eq!(repeated, Ok(InstructorDeletion::NotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_own_email(catalogue: InMemoryCatalogue) {
        let ada = seed_instructor(&catalogue, "ada@example.org").await;
        seed_instructor(&catalogue, "other@example.org").await;

        let same = InstructorRepository::update(&catalogue, ada.id(), &instructor_draft("ada@example.org")).await;
        let taken =
            InstructorRepository::update(&catalogue, ada.id(), &instructor_draft("other@example.org"))
                .await;

        assert!(matches!(same, Ok(Some(_))));
        assert_eq!(
            taken,
            Err(InstructorRepositoryError::duplicate_email("other@example.org"))
        );
    }
}
