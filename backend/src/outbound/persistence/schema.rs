//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! `diesel print-schema` regenerates them from a live database.

diesel::table! {
    /// Instructors who teach courses.
    instructors (id) {
        /// Primary key: `BIGSERIAL`.
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Unique across instructors.
        email -> Text,
    }
}

diesel::table! {
    /// Courses offered by the catalogue.
    courses (id) {
        /// Primary key: `BIGSERIAL`.
        id -> Int8,
        name -> Varchar,
        /// Unique across courses.
        code -> Text,
        description -> Nullable<Text>,
        credits -> Nullable<Int4>,
        /// Department names joined with `,`.
        departments -> Text,
        /// References `instructors.id`; deletes are restricted.
        instructor_id -> Int8,
    }
}

diesel::joinable!(courses -> instructors (instructor_id));
diesel::allow_tables_to_appear_in_same_query!(courses, instructors);
