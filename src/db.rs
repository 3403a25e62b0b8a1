use crate::error::{AppError, MISSING_FIELDS_MESSAGE};
use crate::models::{DbStudent, PresenceStatus, Student};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info, instrument};

pub const DUPLICATE_QR_ID_MESSAGE: &str = "Student with this QR ID already exists";

#[instrument(skip(pool))]
pub async fn insert_student(
    pool: &Pool<Sqlite>,
    qr_id: &str,
    name: &str,
    photo: &str,
    status: Option<PresenceStatus>,
) -> Result<i64, AppError> {
    info!("Inserting student");

    if qr_id.is_empty() || name.is_empty() || photo.is_empty() {
        return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
    }

    let status = status.unwrap_or_default();

    let res = sqlx::query(
        "INSERT INTO students (qr_id, name, photo, status)
         VALUES (?, ?, ?, ?)",
    )
    .bind(qr_id)
    .bind(name)
    .bind(photo)
    .bind(status.as_str())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Duplicate(DUPLICATE_QR_ID_MESSAGE.to_string())
        }
        other => AppError::Database(other),
    })?;

    Ok(res.last_insert_rowid())
}

#[instrument(skip(pool))]
pub async fn find_student_by_qr_id(pool: &Pool<Sqlite>, qr_id: &str) -> Result<Student, AppError> {
    info!("Fetching student by QR ID");
    let row = sqlx::query_as::<_, DbStudent>(
        "SELECT id, qr_id, name, photo, status, timestamp FROM students WHERE qr_id = ?",
    )
    .bind(qr_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(student) => Ok(Student::from(student)),
        _ => Err(AppError::NotFound("Student not found".to_string())),
    }
}

/// Overwrites status and timestamp. Affects nothing when the QR ID is
/// unknown; callers look the student up first.
#[instrument(skip(pool))]
pub async fn update_student_status(
    pool: &Pool<Sqlite>,
    qr_id: &str,
    status: PresenceStatus,
    timestamp: &str,
) -> Result<(), AppError> {
    info!("Updating student status");
    let res = sqlx::query("UPDATE students SET status = ?, timestamp = ? WHERE qr_id = ?")
        .bind(status.as_str())
        .bind(timestamp)
        .bind(qr_id)
        .execute(pool)
        .await?;

    if res.rows_affected() == 0 {
        debug!("No student matched, nothing updated");
    }

    Ok(())
}

#[instrument(skip(pool))]
pub async fn list_students(pool: &Pool<Sqlite>) -> Result<Vec<Student>, AppError> {
    info!("Listing all students");
    let rows = sqlx::query_as::<_, DbStudent>(
        "SELECT id, qr_id, name, photo, status, timestamp FROM students ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Student::from).collect())
}

#[instrument(skip(pool))]
pub async fn list_students_by_status(
    pool: &Pool<Sqlite>,
    status: PresenceStatus,
) -> Result<Vec<Student>, AppError> {
    info!("Listing students by status");
    let rows = sqlx::query_as::<_, DbStudent>(
        "SELECT id, qr_id, name, photo, status, timestamp
         FROM students
         WHERE status = ?
         ORDER BY id",
    )
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Student::from).collect())
}
