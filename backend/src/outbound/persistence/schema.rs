//! Diesel table definitions for the bloglist store.
//!
//! Kept in sync with `backend/migrations`; regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    users (id) {
        id -> Uuid,
        username -> Text,
        name -> Nullable<Text>,
        password_hash -> Text,
        blog_ids -> Array<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    blogs (id) {
        id -> Uuid,
        title -> Text,
        author -> Text,
        url -> Nullable<Text>,
        likes -> Int8,
        user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(blogs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(blogs, users);
