use std::collections::BTreeMap;

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Request, Rocket, Route};

pub mod class;

use class::*;

use utoipa::OpenApi;

use crate::{
    data::class::{
        db::{ClassCreateData, ClassUpdateData, CreatedResponse, MessageResponse},
        Activity, Class, Student,
    },
    resp::problem::{ErrorResponse, Problem},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        class_list,
        class_create,
        class_get,
        class_update,
        class_delete,
        class_students,
        class_add_student
    ),
    components(schemas(
        Class,
        Activity,
        Student,
        ClassCreateData,
        ClassUpdateData,
        CreatedResponse,
        MessageResponse,
        ErrorResponse
    )),
    modifiers(&API_PREFIX)
)]
pub struct ApiDoc;

pub struct PathPrefix(pub &'static str);
static API_PREFIX: PathPrefix = PathPrefix("/api");

impl utoipa::Modify for PathPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut new_paths = BTreeMap::new();

        for (path, item) in std::mem::take(&mut openapi.paths.paths) {
            new_paths.insert(self.0.to_string() + path.as_ref(), item);
        }

        openapi.paths.paths = new_paths;
    }
}

#[get("/openapi.json")]
pub fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[catch(default)]
pub fn default_catcher(status: Status, req: &Request<'_>) -> Problem {
    tracing::debug!("{} {} failed with {}", req.method(), req.uri(), status);
    Problem::new(status, status.reason().unwrap_or("Unknown Error"))
}

pub fn api() -> Vec<Route> {
    routes![
        class_list,
        class_create,
        class_get,
        class_update,
        class_delete,
        class_students,
        class_add_student,
        openapi
    ]
}

pub fn mount_api(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/api", api())
        .register("/", catchers![default_catcher])
}
