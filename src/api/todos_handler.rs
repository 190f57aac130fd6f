use actix_web::{http::header, web, HttpResponse};

use super::dtos::todo::ToDoDTO;
use super::errors::TodoApiError;
use crate::models::todo_model::{NewToDo, ToDo};
use crate::models::Pool;

use diesel::prelude::*;

no_arg_sql_function!(
    last_insert_rowid,
    diesel::sql_types::Integer,
    "Represents the SQL last_insert_rowid() function"
);

/// Api handler listing every todo
pub async fn get_todos(pool: web::Data<Pool>) -> Result<HttpResponse, actix_web::Error> {
    let list = web::block(move || get_all_todos(pool)).await??;

    Ok(HttpResponse::Ok().json(&list))
}

/// Create a new todo, the store assigns its id
pub async fn create_todo(
    request_data: web::Json<ToDoDTO>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let inserted = web::block(move || insert_new_todo(pool, request_data.into_inner())).await??;

    log::debug!("Created todo {}", inserted.id);

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/todo/{}", inserted.id)))
        .json(&inserted))
}

/// Rename a todo
pub async fn update_todo(
    todo_id: web::Path<i32>,
    request_data: web::Json<ToDoDTO>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let todo_id = todo_id.into_inner();

    web::block(move || update_todo_name(pool, todo_id, request_data.into_inner())).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// Api to Delete a TODO
pub async fn delete_todo(
    todo_id: web::Path<i32>,
    pool: web::Data<Pool>,
) -> Result<HttpResponse, actix_web::Error> {
    let todo_id = todo_id.into_inner();

    web::block(move || remove_todo(pool, todo_id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// Get all todos, ordered by id
fn get_all_todos(pool: web::Data<Pool>) -> Result<Vec<ToDo>, TodoApiError> {
    use crate::schema::todos::dsl::*;
    let conn = &pool.get()?;

    let todos_list = todos.order(id.asc()).load::<ToDo>(conn)?;

    Ok(todos_list)
}

fn insert_new_todo(pool: web::Data<Pool>, todo: ToDoDTO) -> Result<ToDo, TodoApiError> {
    use crate::schema::todos::dsl::*;

    let conn = &pool.get()?;

    if todo.id != 0 {
        log::debug!("Ignoring client supplied id {}", todo.id);
    }

    let new_todo = NewToDo {
        to_do_name: &todo.to_do_name,
    };

    // sqlite has no RETURNING here, read the row back on the same connection
    conn.transaction::<_, TodoApiError, _>(|| {
        diesel::insert_into(todos).values(&new_todo).execute(conn)?;

        let new_id: i32 = diesel::select(last_insert_rowid).get_result(conn)?;

        Ok(todos.find(new_id).first::<ToDo>(conn)?)
    })
}

/// Overwrite the name of a todo, the id never changes
fn update_todo_name(
    pool: web::Data<Pool>,
    todo_id: i32,
    todo: ToDoDTO,
) -> Result<(), TodoApiError> {
    use crate::schema::todos::dsl::*;
    let conn = &pool.get()?;

    let update_count = diesel::update(todos.find(todo_id))
        .set(to_do_name.eq(todo.to_do_name))
        .execute(conn)?;

    if update_count > 0 {
        Ok(())
    } else {
        Err(TodoApiError::NotFound(String::from("Todo")))
    }
}

/// Remove a todo
fn remove_todo(pool: web::Data<Pool>, todo_id: i32) -> Result<(), TodoApiError> {
    use crate::schema::todos::dsl::*;

    let conn = &pool.get()?;

    let delete_count = diesel::delete(todos.find(todo_id)).execute(conn)?;

    if delete_count > 0 {
        Ok(())
    } else {
        Err(TodoApiError::NotFound(String::from("Todo")))
    }
}

#[cfg(test)]
mod test {
    use actix_web::{
        dev::{Service, ServiceResponse},
        http::{header, StatusCode},
        test, web, App,
    };
    use serde_json::json;

    use std::thread;

    use super::{get_all_todos, insert_new_todo};
    use crate::api::api::configure;
    use crate::api::dtos::todo::ToDoDTO;
    use crate::models::{file_pool, test_pool, todo_model::ToDo};

    async fn init_app(
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_pool()))
                .configure(configure),
        )
        .await
    }

    async fn create<S>(app: &S, name: &str) -> ToDo
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::post()
            .uri("/api/todo")
            .set_json(&json!({ "toDoName": name }))
            .to_request();

        let resp = test::call_service(app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);

        test::read_body_json(resp).await
    }

    async fn list<S>(app: &S) -> Vec<ToDo>
    where
        S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    {
        let req = test::TestRequest::get().uri("/api/todo").to_request();

        let resp = test::call_service(app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);

        test::read_body_json(resp).await
    }

    #[actix_web::test]
    async fn test_empty_list() {
        let app = init_app().await;

        let req = test::TestRequest::get().uri("/api/todo").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);

        let body = test::read_body(resp).await;

        assert_eq!(body, web::Bytes::from_static(b"[]"));
    }

    #[actix_web::test]
    async fn test_create_todo() {
        let app = init_app().await;

        let req = test::TestRequest::post()
            .uri("/api/todo")
            .set_json(&json!({ "toDoName": "Buy milk" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();

        let created: ToDo = test::read_body_json(resp).await;

        assert_ne!(created.id, 0);
        assert_eq!(created.to_do_name, "Buy milk");
        assert_eq!(location, format!("/api/todo/{}", created.id));

        assert_eq!(list(&app).await, vec![created]);
    }

    #[actix_web::test]
    async fn test_create_ignores_client_id() {
        let app = init_app().await;

        let req = test::TestRequest::post()
            .uri("/api/todo")
            .set_json(&json!({ "id": 555, "toDoName": "X" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: ToDo = test::read_body_json(resp).await;

        assert_eq!(created.id, 1);
        assert_eq!(created.to_do_name, "X");
    }

    #[actix_web::test]
    async fn test_create_without_name_defaults_to_empty() {
        let app = init_app().await;

        let created = create(&app, "").await;

        assert_eq!(created.to_do_name, "");

        let req = test::TestRequest::post()
            .uri("/api/todo")
            .set_json(&json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: ToDo = test::read_body_json(resp).await;

        assert_eq!(created.to_do_name, "");
    }

    #[actix_web::test]
    async fn test_create_rejects_malformed_json() {
        let app = init_app().await;

        let req = test::TestRequest::post()
            .uri("/api/todo")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(list(&app).await.is_empty());
    }

    #[actix_web::test]
    async fn test_create_rejects_non_integer_id() {
        let app = init_app().await;

        let req = test::TestRequest::post()
            .uri("/api/todo")
            .set_json(&json!({ "id": "abc", "toDoName": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(list(&app).await.is_empty());
    }

    #[actix_web::test]
    async fn test_concurrent_creates_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let pool = web::Data::new(file_pool(&dir, 8));

        let writers: Vec<_> = (0..8)
            .map(|writer| {
                let pool = pool.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|n| {
                            let todo = ToDoDTO {
                                id: 0,
                                to_do_name: format!("{}-{}", writer, n),
                            };
                            insert_new_todo(pool.clone(), todo).unwrap().id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i32> = writers
            .into_iter()
            .flat_map(|w| w.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 400);
        assert_eq!(get_all_todos(pool.clone()).unwrap().len(), 400);

        // the same store through the routes
        let app = test::init_service(App::new().app_data(pool).configure(configure)).await;

        let created = create(&app, "after").await;
        let todos = list(&app).await;

        assert_eq!(todos.len(), 401);
        assert_eq!(todos.last(), Some(&created));
    }

    #[actix_web::test]
    async fn test_update_todo() {
        let app = init_app().await;

        let created = create(&app, "A").await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/todo/{}", created.id))
            .set_json(&json!({ "id": created.id, "toDoName": "B" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(test::read_body(resp).await.is_empty());

        let todos = list(&app).await;

        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, created.id);
        assert_eq!(todos[0].to_do_name, "B");
    }

    #[actix_web::test]
    async fn test_update_uses_path_id() {
        let app = init_app().await;

        let first = create(&app, "first").await;
        let second = create(&app, "second").await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/todo/{}", first.id))
            .set_json(&json!({ "id": second.id, "toDoName": "renamed" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let todos = list(&app).await;

        assert_eq!(todos[0].to_do_name, "renamed");
        assert_eq!(todos[1], second);
    }

    #[actix_web::test]
    async fn test_update_missing_todo() {
        let app = init_app().await;

        let req = test::TestRequest::put()
            .uri("/api/todo/9999")
            .set_json(&json!({ "id": 9999, "toDoName": "nope" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(test::read_body(resp).await.is_empty());
    }

    #[actix_web::test]
    async fn test_delete_todo() {
        let app = init_app().await;

        let keep = create(&app, "keep").await;
        let created = create(&app, "remove me").await;

        let delete = || {
            test::TestRequest::delete()
                .uri(&format!("/api/todo/{}", created.id))
                .to_request()
        };

        let resp = test::call_service(&app, delete()).await;

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(list(&app).await, vec![keep]);

        let resp = test::call_service(&app, delete()).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_deleted_ids_are_not_reused() {
        let app = init_app().await;

        let created = create(&app, "gone").await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/todo/{}", created.id))
            .to_request();
        test::call_service(&app, req).await;

        let next = create(&app, "new").await;

        assert!(next.id > created.id);
    }

    #[actix_web::test]
    async fn test_non_integer_id_is_not_found() {
        let app = init_app().await;

        let req = test::TestRequest::delete()
            .uri("/api/todo/abc")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
