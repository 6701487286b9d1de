//! PostgreSQL-backed `InstructorRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{InstructorDeletion, InstructorRepository, InstructorRepositoryError};
use crate::domain::{Instructor, InstructorDraft, InstructorId};

use super::diesel_basic_error_mapping::{
    Violation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{InstructorChanges, InstructorRow};
use super::pool::{DbPool, PoolError};
use super::schema::{courses, instructors};

/// Diesel-backed implementation of the `InstructorRepository` port.
#[derive(Clone)]
pub struct DieselInstructorRepository {
    pool: DbPool,
}

impl DieselInstructorRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InstructorRepositoryError {
    map_basic_pool_error(error, InstructorRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InstructorRepositoryError {
    map_basic_diesel_error(
        error,
        InstructorRepositoryError::query,
        InstructorRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error, draft: &InstructorDraft) -> InstructorRepositoryError {
    match constraint_violation(&error) {
        Some(Violation::Unique) => InstructorRepositoryError::duplicate_email(draft.email()),
        _ => map_diesel_error(error),
    }
}

#[async_trait]
impl InstructorRepository for DieselInstructorRepository {
    async fn insert(
        &self,
        draft: &InstructorDraft,
    ) -> Result<Instructor, InstructorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(instructors::table)
            .values(InstructorChanges::from(draft))
            .returning(InstructorRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Instructor::from)
            .map_err(|err| map_write_error(err, draft))
    }

    async fn update(
        &self,
        id: InstructorId,
        draft: &InstructorDraft,
    ) -> Result<Option<Instructor>, InstructorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(instructors::table.find(id.get()))
            .set(InstructorChanges::from(draft))
            .returning(InstructorRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Instructor::from))
            .map_err(|err| map_write_error(err, draft))
    }

    async fn find_by_id(
        &self,
        id: InstructorId,
    ) -> Result<Option<Instructor>, InstructorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        instructors::table
            .find(id.get())
            .select(InstructorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Instructor::from))
            .map_err(map_diesel_error)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Instructor>, InstructorRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        instructors::table
            .filter(instructors::email.eq(email))
            .select(InstructorRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Instructor::from))
            .map_err(map_diesel_error)
    }

    async fn find_page(
        &self,
        request: PageRequest,
    ) -> Result<Page<Instructor>, InstructorRepositoryError> {
        let offset = i64::try_from(request.offset())
            .map_err(|_| InstructorRepositoryError::query("page offset exceeds i64 range"))?;
        let limit = i64::from(request.size());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (rows, total) = conn
            .transaction(|conn| {
                async move {
                    let rows: Vec<InstructorRow> = instructors::table
                        .select(InstructorRow::as_select())
                        .order(instructors::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    let total: i64 = instructors::table.count().get_result(conn).await?;
                    Ok::<_, diesel::result::Error>((rows, total))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let total = u64::try_from(total)
            .map_err(|_| InstructorRepositoryError::query("negative instructor count"))?;
        let content = rows.into_iter().map(Instructor::from).collect();
        Ok(Page::new(content, request, total))
    }

    async fn delete_unreferenced(
        &self,
        id: InstructorId,
    ) -> Result<InstructorDeletion, InstructorRepositoryError> {
        let instructor_id = id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The row lock conflicts with the key-share lock a concurrent course
        // insert takes on the referenced instructor.
        let outcome = conn
            .transaction(|conn| {
                async move {
                    let locked: Option<i64> = instructors::table
                        .find(instructor_id)
                        .select(instructors::id)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    if locked.is_none() {
                        return Ok(InstructorDeletion::NotFound);
                    }

                    let referencing: i64 = courses::table
                        .filter(courses::instructor_id.eq(instructor_id))
                        .count()
                        .get_result(conn)
                        .await?;
                    if referencing > 0 {
                        return Ok(InstructorDeletion::Referenced {
                            course_count: u64::try_from(referencing).unwrap_or(u64::MAX),
                        });
                    }

                    diesel::delete(instructors::table.find(instructor_id))
                        .execute(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(InstructorDeletion::Deleted)
                }
                .scope_boxed()
            })
            .await;

        match outcome {
            Ok(outcome) => {
                debug!(instructor_id, ?outcome, "instructor delete evaluated");
                Ok(outcome)
            }
            Err(error) if constraint_violation(&error) == Some(Violation::ForeignKey) => {
                Ok(InstructorDeletion::Referenced { course_count: 1 })
            }
            Err(error) => Err(map_diesel_error(error)),
        }
    }
}
