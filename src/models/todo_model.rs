use crate::schema::*;
use diesel::{Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// A persisted todo, serialized with camelCase field names (`id`, `toDoName`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable)]
#[serde(rename_all = "camelCase")]
pub struct ToDo {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub to_do_name: String,
}

impl ToDo {
    /// An `id` of 0 marks a record that has not been saved yet
    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

#[derive(Debug, Insertable)]
#[table_name = "todos"]
pub struct NewToDo<'a> {
    pub to_do_name: &'a str,
}
