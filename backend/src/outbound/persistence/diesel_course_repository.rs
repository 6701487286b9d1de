//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Filter clauses are applied to a boxed `SELECT` one at a time, so the SQL
//! is always a conjunction. Department membership splits the stored
//! comma-joined column with `string_to_array` and tests array containment,
//! which keeps `ENGINEERING` from matching `ELECTRICAL_ENGINEERING`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{
    Course, CourseClause, CourseDetail, CourseDraft, CourseId, CoursePredicate,
    DEPARTMENT_DELIMITER, Instructor,
};

use super::diesel_basic_error_mapping::{
    Violation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CourseChanges, CourseRow, InstructorRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, instructors};

diesel::define_sql_function! {
    /// PostgreSQL `string_to_array(value, delimiter)`.
    fn string_to_array(value: Text, delimiter: Text) -> diesel::sql_types::Array<Text>;
}

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CourseRepositoryError {
    map_basic_pool_error(error, CourseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_basic_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

/// Map write failures, translating constraint violations for `draft`.
fn map_write_error(error: diesel::result::Error, draft: &CourseDraft) -> CourseRepositoryError {
    match constraint_violation(&error) {
        Some(Violation::Unique) => CourseRepositoryError::duplicate_code(draft.code()),
        Some(Violation::ForeignKey) => {
            CourseRepositoryError::missing_instructor(draft.instructor_id().get())
        }
        None => map_diesel_error(error),
    }
}

fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    Course::try_from(row).map_err(CourseRepositoryError::query)
}

/// Boxed `SELECT` over `courses` narrowed by every clause of `predicate`.
fn filtered(predicate: &CoursePredicate) -> courses::BoxedQuery<'static, Pg> {
    predicate
        .clauses()
        .iter()
        .fold(courses::table.into_boxed(), |query, clause| match *clause {
            CourseClause::InstructorIs(id) => query.filter(courses::instructor_id.eq(id.get())),
            CourseClause::CreditsEqual(credits) => query.filter(courses::credits.eq(credits)),
            CourseClause::InDepartment(department) => query.filter(
                string_to_array(courses::departments, DEPARTMENT_DELIMITER)
                    .contains(vec![department.as_str().to_owned()]),
            ),
        })
}

fn to_i64(value: u64, what: &'static str) -> Result<i64, CourseRepositoryError> {
    i64::try_from(value).map_err(|_| CourseRepositoryError::query(format!("{what} exceeds i64 range")))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(courses::table)
            .values(CourseChanges::from(draft))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, draft))?;
        row_to_course(row)
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(courses::table.find(id.get()))
            .set(CourseChanges::from(draft))
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, draft))?;
        row.map(row_to_course).transpose()
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(removed > 0)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn find_detail(
        &self,
        id: CourseId,
    ) -> Result<Option<CourseDetail>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(CourseRow, InstructorRow)> = courses::table
            .inner_join(instructors::table)
            .filter(courses::id.eq(id.get()))
            .select((CourseRow::as_select(), InstructorRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|(course, instructor)| {
            Ok(CourseDetail {
                course: row_to_course(course)?,
                instructor: Instructor::from(instructor),
            })
        })
        .transpose()
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = courses::table
            .filter(courses::code.eq(code))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn find_page(
        &self,
        predicate: &CoursePredicate,
        request: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError> {
        let offset = to_i64(request.offset(), "page offset")?;
        let limit = i64::from(request.size());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Rows and count read the same snapshot.
        let (rows, total) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<CourseRow> = filtered(predicate)
                        .select(CourseRow::as_select())
                        .order(courses::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    let total: i64 = filtered(predicate).count().get_result(conn).await?;
                    Ok::<_, diesel::result::Error>((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| CourseRepositoryError::query("negative course count"))?;
        let content = rows
            .into_iter()
            .map(row_to_course)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            clauses = predicate.clauses().len(),
            page = request.page(),
            total,
            "course page loaded"
        );
        Ok(Page::new(content, request, total))
    }
}
