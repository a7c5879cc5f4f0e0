use rocket::response::status::Created;
use rocket::serde::json::{self, Json};
use rocket::State;
use uuid::Uuid;

use crate::data::class::db::{ClassCreateData, ClassUpdateData, CreatedResponse, MessageResponse};
use crate::data::class::{Class, Student};
use crate::resp::auth::StaffToken;
use crate::resp::problem::{problems, ErrorResponse, Problem};
use crate::store::{ClassStore, DynStore};

fn parse_id(id: &str) -> Result<Uuid, Problem> {
    Uuid::parse_str(id.trim()).map_err(|_| problems::invalid_id(id))
}

/// List all class documents
#[utoipa::path(
    responses(
        (status = 200, description = "All classes", body = Vec<Class>),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
#[get("/classes")]
#[tracing::instrument(skip(store, _staff))]
pub async fn class_list(
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Json<Vec<Class>>, Problem> {
    let classes = store
        .list()
        .await
        .map_err(|e| e.into_problem("Failed to fetch classes"))?;

    Ok(Json(classes))
}

/// Create a class
#[utoipa::path(
    request_body = ClassCreateData,
    responses(
        (status = 201, description = "Generated class ID", body = CreatedResponse),
        (status = 500, description = "Malformed body or store failure", body = ErrorResponse),
    )
)]
#[post("/classes", data = "<body>")]
#[tracing::instrument(skip(store, _staff, body))]
pub async fn class_create(
    body: Result<Json<ClassCreateData>, json::Error<'_>>,
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Created<Json<CreatedResponse>>, Problem> {
    let data = body
        .map_err(|e| problems::malformed_body(e, "Failed to add class"))?
        .into_inner();

    let id = store
        .insert(data)
        .await
        .map_err(|e| e.into_problem("Failed to add class"))?;
    tracing::info!("created class {}", id);

    Ok(Created::new(format!("/api/classes/{}", id)).body(Json(CreatedResponse { id })))
}

/// Get one class
#[utoipa::path(
    params(
        ("id", description = "class ID")
    ),
    responses(
        (status = 200, description = "The class document", body = Class),
        (status = 400, description = "Invalid class ID", body = ErrorResponse),
        (status = 404, description = "Class doesn't exist", body = ErrorResponse),
    )
)]
#[get("/classes/<id>")]
#[tracing::instrument(skip(store, _staff))]
pub async fn class_get(
    id: &str,
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Json<Class>, Problem> {
    let id = parse_id(id)?;

    match store
        .get(id)
        .await
        .map_err(|e| e.into_problem("Failed to fetch class"))?
    {
        Some(class) => Ok(Json(class)),
        None => Err(problems::class_not_found()),
    }
}

/// Overwrite the fields present in the body
#[utoipa::path(
    request_body = ClassUpdateData,
    params(
        ("id", description = "class ID")
    ),
    responses(
        (status = 200, description = "Class updated", body = MessageResponse),
        (status = 400, description = "Invalid class ID", body = ErrorResponse),
        (status = 404, description = "Class doesn't exist", body = ErrorResponse),
        (status = 500, description = "Malformed body or store failure", body = ErrorResponse),
    )
)]
#[put("/classes/<id>", data = "<body>")]
#[tracing::instrument(skip(store, _staff, body))]
pub async fn class_update(
    id: &str,
    body: Result<Json<ClassUpdateData>, json::Error<'_>>,
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Json<MessageResponse>, Problem> {
    let id = parse_id(id)?;
    let data = body
        .map_err(|e| problems::malformed_body(e, "Failed to update class"))?
        .into_inner();

    store
        .update(id, data)
        .await
        .map_err(|e| e.into_problem("Failed to update class"))?;

    Ok(Json(MessageResponse::new("Class updated successfully")))
}

/// Delete a class along with its embedded students and activities
#[utoipa::path(
    params(
        ("id", description = "class ID")
    ),
    responses(
        (status = 200, description = "Class deleted", body = MessageResponse),
        (status = 400, description = "Invalid class ID", body = ErrorResponse),
    )
)]
#[delete("/classes/<id>")]
#[tracing::instrument(skip(store, _staff))]
pub async fn class_delete(
    id: &str,
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Json<MessageResponse>, Problem> {
    let id = parse_id(id)?;

    store
        .delete(id)
        .await
        .map_err(|e| e.into_problem("Failed to delete class"))?;
    tracing::info!("deleted class {}", id);

    Ok(Json(MessageResponse::new("Class deleted successfully")))
}

/// List students of a class
#[utoipa::path(
    params(
        ("id", description = "class ID")
    ),
    responses(
        (status = 200, description = "Embedded students", body = Vec<Student>),
        (status = 404, description = "Class doesn't exist", body = ErrorResponse),
    )
)]
#[get("/classes/<id>/students")]
#[tracing::instrument(skip(store, _staff))]
pub async fn class_students(
    id: &str,
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Json<Vec<Student>>, Problem> {
    let id = parse_id(id)?;

    match store
        .students(id)
        .await
        .map_err(|e| e.into_problem("Failed to fetch students"))?
    {
        Some(students) => Ok(Json(students)),
        None => Err(problems::class_not_found()),
    }
}

/// Append one student to a class
///
/// Uses an atomic array union, so concurrent appends don't overwrite each other.
#[utoipa::path(
    request_body = Student,
    params(
        ("id", description = "class ID")
    ),
    responses(
        (status = 200, description = "Student added", body = MessageResponse),
        (status = 404, description = "Class doesn't exist", body = ErrorResponse),
        (status = 500, description = "Malformed body or store failure", body = ErrorResponse),
    )
)]
#[put("/classes/<id>/students", data = "<body>")]
#[tracing::instrument(skip(store, _staff, body))]
pub async fn class_add_student(
    id: &str,
    body: Result<Json<Student>, json::Error<'_>>,
    _staff: StaffToken,
    store: &State<DynStore>,
) -> Result<Json<MessageResponse>, Problem> {
    let id = parse_id(id)?;
    let student = body
        .map_err(|e| problems::malformed_body(e, "Failed to add student"))?
        .into_inner();

    store
        .push_student(id, student)
        .await
        .map_err(|e| e.into_problem("Failed to add student"))?;

    Ok(Json(MessageResponse::new("Student added successfully")))
}

///////////////////////
//       TESTS
///////////////////////
