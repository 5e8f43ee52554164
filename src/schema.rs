table! {
    gedcom (gedcom_id) {
        gedcom_id -> Integer,
        gedcom_name -> Text,
        title -> Text,
    }
}

table! {
    user (user_id) {
        user_id -> Integer,
        user_name -> Text,
        real_name -> Text,
    }
}

table! {
    user_setting (user_id, setting_name) {
        user_id -> Integer,
        setting_name -> Text,
        setting_value -> Text,
    }
}

table! {
    user_gedcom_setting (user_id, gedcom_id, setting_name) {
        user_id -> Integer,
        gedcom_id -> Integer,
        setting_name -> Text,
        setting_value -> Text,
    }
}

table! {
    record (gedcom_id, xref) {
        gedcom_id -> Integer,
        xref -> Text,
        record_type -> Text,
        name -> Text,
        restricted -> Bool,
    }
}

table! {
    favorite (favorite_id) {
        favorite_id -> Integer,
        user_id -> Nullable<Integer>,
        gedcom_id -> Integer,
        xref -> Nullable<Text>,
        favorite_type -> Text,
        url -> Nullable<Text>,
        title -> Nullable<Text>,
        note -> Nullable<Text>,
    }
}

table! {
    news (news_id) {
        news_id -> Integer,
        user_id -> Nullable<Integer>,
        gedcom_id -> Nullable<Integer>,
        subject -> Text,
        body -> Text,
        updated -> Timestamp,
    }
}

allow_tables_to_appear_in_same_query!(
    gedcom,
    user,
    user_setting,
    user_gedcom_setting,
    record,
    favorite,
    news,
);
