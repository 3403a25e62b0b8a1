use rocket::State;
use rocket::http::{ContentType, Header, Status};
use rocket::response::status::Custom;
use rocket::serde::{Deserialize, Serialize, json::Json};
use sqlx::{Pool, Sqlite};
use tracing::info;
use validator::Validate;

use crate::db::insert_student;
use crate::error::{AppError, MISSING_FIELDS_MESSAGE};
use crate::export::{EXPORT_FILENAME, export_students_xlsx};
use crate::models::{PresenceStatus, Student};
use crate::services::{
    DEFAULT_SAMPLE_SIZE, list_present_students, load_sample_students, scan_student,
};

#[derive(Debug, Deserialize, Validate)]
pub struct AddStudentRequest {
    #[validate(required, length(min = 1))]
    pub qr_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub photo: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub qr_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Responder)]
pub struct XlsxDownload {
    inner: Vec<u8>,
    content_type: ContentType,
    disposition: Header<'static>,
}

impl XlsxDownload {
    pub fn new(bytes: Vec<u8>, filename: &str) -> Self {
        Self {
            inner: bytes,
            content_type: ContentType::new(
                "application",
                "vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            disposition: Header::new(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            ),
        }
    }
}

#[post("/add_student", data = "<request>")]
pub async fn api_add_student(
    request: Json<AddStudentRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<MessageResponse>>, AppError> {
    request.validate()?;
    let request = request.into_inner();

    let (Some(qr_id), Some(name), Some(photo)) = (request.qr_id, request.name, request.photo)
    else {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    };

    let status = request
        .status
        .as_deref()
        .map(PresenceStatus::parse)
        .transpose()?;

    let id = insert_student(db.inner(), &qr_id, &name, &photo, status).await?;
    info!(id, qr_id = %qr_id, "Student added");

    Ok(Custom(
        Status::Created,
        Json(MessageResponse::new(format!(
            "Student {} added successfully",
            name
        ))),
    ))
}

#[post("/scan", data = "<request>")]
pub async fn api_scan(
    request: Json<ScanRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(qr_id) = request.into_inner().qr_id else {
        return Err(AppError::NotFound("Student not found".to_string()));
    };

    let message = scan_student(db.inner(), &qr_id).await?;
    Ok(Json(MessageResponse::new(message)))
}

#[get("/students")]
pub async fn api_get_students(db: &State<Pool<Sqlite>>) -> Result<Json<Vec<Student>>, AppError> {
    let students = list_present_students(db.inner()).await?;
    Ok(Json(students))
}

#[get("/export_students")]
pub async fn api_export_students(db: &State<Pool<Sqlite>>) -> Result<XlsxDownload, AppError> {
    let bytes = export_students_xlsx(db.inner()).await?;
    Ok(XlsxDownload::new(bytes, EXPORT_FILENAME))
}

#[post("/load_sample_data")]
pub async fn api_load_sample_data(
    db: &State<Pool<Sqlite>>,
) -> Result<Json<MessageResponse>, AppError> {
    load_sample_students(db.inner(), DEFAULT_SAMPLE_SIZE).await?;
    Ok(Json(MessageResponse::new("Sample data loaded")))
}

#[get("/health")]
pub fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
