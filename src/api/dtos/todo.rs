use serde::Deserialize;

/// Payload of create and update requests. A client supplied `id` must be an
/// integer but is otherwise ignored, the store or the path decides the id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoDTO {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub to_do_name: String,
}
