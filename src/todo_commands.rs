use inquire::Text;
use reqwest::{blocking::Response, header::CONTENT_TYPE, StatusCode};

use crate::{
    config::ClientConfig,
    errors::TodoError,
    models::todo_model::ToDo,
    utils::{has_network_path, make_api_url},
};

/// Without a route to the server every command is skipped, never retried
fn reachable(config: &ClientConfig) -> bool {
    if has_network_path(&config.api_url) {
        return true;
    }

    log::warn!("No network path to {}, skipping", config.api_url);
    false
}

fn check_status(response: Response) -> Result<Response, TodoError> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(TodoError::NotFound),
        status if status.is_success() => Ok(response),
        status => Err(TodoError::UnexpectedStatus(status.as_u16())),
    }
}

/// Prompt user for the name of a new todo
pub fn prompt_todo_name() -> Result<String, TodoError> {
    let name = Text::new("Name")
        .with_help_message("Name for your new todo")
        .prompt()?;

    Ok(name)
}

/// Fetch all the todos
pub fn list_todos(config: &ClientConfig) -> Result<Vec<ToDo>, TodoError> {
    if !reachable(config) {
        return Ok(Vec::new());
    }

    let client = reqwest::blocking::Client::new();

    let response = client.get(make_api_url(&config.api_url, "todo")).send()?;

    let list: Vec<ToDo> = check_status(response)?.json()?;

    Ok(list)
}

/// Create a todo, returns it with the id assigned by the server
pub fn create_todo(config: &ClientConfig, name: &str) -> Result<Option<ToDo>, TodoError> {
    if !reachable(config) {
        return Ok(None);
    }

    let client = reqwest::blocking::Client::new();
    let todo = ToDo {
        id: 0,
        to_do_name: name.to_owned(),
    };

    let response = client
        .post(make_api_url(&config.api_url, "todo"))
        .header(CONTENT_TYPE, "application/json")
        .json(&todo)
        .send()?;

    let created: ToDo = check_status(response)?.json()?;

    log::info!("Successfully created todo {}", created.id);

    Ok(Some(created))
}

/// Rename an existing todo
pub fn update_todo(config: &ClientConfig, todo: &ToDo) -> Result<(), TodoError> {
    if todo.is_new() {
        return Err(TodoError::OperationError(String::from(
            "Todo has no id, create it first",
        )));
    }

    if !reachable(config) {
        return Ok(());
    }

    let client = reqwest::blocking::Client::new();

    let response = client
        .put(make_api_url(&config.api_url, &format!("todo/{}", todo.id)))
        .header(CONTENT_TYPE, "application/json")
        .json(todo)
        .send()?;

    check_status(response)?;

    log::info!("Successfully updated todo {}", todo.id);

    Ok(())
}

/// Delete a todo
pub fn delete_todo(config: &ClientConfig, id: i32) -> Result<(), TodoError> {
    if !reachable(config) {
        return Ok(());
    }

    let client = reqwest::blocking::Client::new();

    let response = client
        .delete(make_api_url(&config.api_url, &format!("todo/{}", id)))
        .send()?;

    check_status(response)?;

    log::info!("Successfully deleted todo {}", id);

    Ok(())
}
