//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Registered users. `email` carries a unique constraint.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
    }
}

diesel::table! {
    /// "Wanted item" requests.
    item_requests (id) {
        id -> Uuid,
        requester_id -> Uuid,
        description -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Items offered for booking.
    items (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        description -> Text,
        available -> Bool,
        request_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Bookings. `status` holds the upper-case status name.
    bookings (id) {
        id -> Uuid,
        item_id -> Uuid,
        booker_id -> Uuid,
        start_date -> Timestamptz,
        end_date -> Timestamptz,
        status -> Varchar,
    }
}

diesel::table! {
    /// Comments left on items.
    comments (id) {
        id -> Uuid,
        item_id -> Uuid,
        author_id -> Uuid,
        text -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(items -> users (owner_id));
diesel::joinable!(bookings -> items (item_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(item_requests -> users (requester_id));

diesel::allow_tables_to_appear_in_same_query!(users, item_requests, items, bookings, comments);
