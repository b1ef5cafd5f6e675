//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Per-user stock rows.
    ///
    /// `(user_id, product)` is the primary key, so each user holds at most
    /// one row per exact product label.
    stock (user_id, product) {
        /// Chat platform user identifier.
        user_id -> Int8,
        /// Product label as first written.
        product -> Text,
        /// Accumulated quantity; a check constraint keeps it non-negative.
        quantity -> Int8,
        /// Row creation time; orders listings.
        created_at -> Timestamptz,
        /// Last increment time.
        updated_at -> Timestamptz,
    }
}
