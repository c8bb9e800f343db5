//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the embedded migrations exactly; Diesel
//! uses them for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Contact records, one row per known (email, phone number)
    /// observation.
    ///
    /// Secondary rows reference their cluster's primary through
    /// `linked_id`; primaries carry NULL there. `link_precedence` is
    /// constrained to `primary`/`secondary` by a CHECK in the migration.
    contacts (id) {
        /// Primary key, assigned by the `SERIAL` sequence.
        id -> Int4,
        /// Known phone number, when the record carries one.
        #[max_length = 20]
        phone_number -> Nullable<Varchar>,
        /// Known email address, when the record carries one.
        #[max_length = 255]
        email -> Nullable<Varchar>,
        /// The primary this record links to; NULL for primaries.
        linked_id -> Nullable<Int4>,
        /// `primary` or `secondary`.
        #[max_length = 16]
        link_precedence -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Refreshed on every mutation.
        updated_at -> Timestamptz,
        /// Reserved for soft deletion; never written by this service.
        deleted_at -> Nullable<Timestamptz>,
    }
}
