diesel::table! {
    t_recent_item (seq) {
        seq -> BigInt,
        id -> Text,
        name -> Text,
        path -> Nullable<Text>,
        kind -> Text,
        captured_at_ms -> BigInt,
    }
}

diesel::table! {
    t_file_content (id) {
        id -> Text,
        name -> Text,
        path -> Nullable<Text>,
        bytes -> Binary,
        mime -> Text,
        size -> BigInt,
        modified_at_ms -> BigInt,
        captured_at_ms -> BigInt,
    }
}

diesel::table! {
    t_named_directory (key) {
        key -> Text,
        name -> Text,
        path -> Nullable<Text>,
        kind -> Text,
        captured_at_ms -> BigInt,
    }
}

diesel::allow_tables_to_appear_in_same_query!(t_recent_item, t_file_content, t_named_directory,);
