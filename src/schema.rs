table! {
    todos (id) {
        id -> Integer,
        to_do_name -> Text,
    }
}
