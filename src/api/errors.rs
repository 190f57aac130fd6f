use actix_web::{
    body::BoxBody,
    http::{
        self,
        header::{self, HeaderValue},
    },
    HttpResponse, ResponseError,
};
use derive_more::Display;
use diesel::result::Error as DBError;
use serde_json::json;
use std::convert::From;

#[derive(Debug, Display)]
pub enum TodoApiError {
    #[display(fmt = "Internal Server Error")]
    InternalServerError,

    #[display(fmt = "Database Connection Error")]
    DatabaseConnectionError,

    #[display(fmt = "{} Not Found", _0)]
    NotFound(String),
}

impl ResponseError for TodoApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            TodoApiError::NotFound(_) => http::StatusCode::NOT_FOUND,
            TodoApiError::InternalServerError | TodoApiError::DatabaseConnectionError => {
                http::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        // a missing todo is answered with a bare 404
        if let TodoApiError::NotFound(_) = self {
            return HttpResponse::new(self.status_code());
        }

        let mut res = HttpResponse::new(self.status_code());

        res.headers_mut().append(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        res.set_body(BoxBody::new(json!({"error": self.to_string()}).to_string()))
    }
}

impl From<r2d2::Error> for TodoApiError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Could not get a database connection: {}", err);
        TodoApiError::DatabaseConnectionError
    }
}

impl From<DBError> for TodoApiError {
    fn from(error: DBError) -> Self {
        match error {
            DBError::NotFound => TodoApiError::NotFound(String::from("Todo")),
            e => {
                log::error!("Database error: {}", e);
                TodoApiError::InternalServerError
            }
        }
    }
}
