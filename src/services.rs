use chrono::{Local, NaiveDateTime};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info, instrument};

use crate::db::{
    find_student_by_qr_id, insert_student, list_students_by_status, update_student_status,
};
use crate::error::AppError;
use crate::models::{PresenceStatus, Student, format_timestamp};

pub const DEFAULT_SAMPLE_SIZE: u32 = 15;

/// Flips a student between checked in and checked out, stamping the current
/// local time. Returns e.g. "Alice Checked In".
pub async fn scan_student(pool: &Pool<Sqlite>, qr_id: &str) -> Result<String, AppError> {
    scan_student_at(pool, qr_id, Local::now().naive_local()).await
}

#[instrument(skip(pool))]
pub async fn scan_student_at(
    pool: &Pool<Sqlite>,
    qr_id: &str,
    now: NaiveDateTime,
) -> Result<String, AppError> {
    let student = find_student_by_qr_id(pool, qr_id).await?;

    let new_status = student.status.toggled();
    update_student_status(pool, qr_id, new_status, &format_timestamp(now)).await?;

    info!(from = %student.status, to = %new_status, "Toggled presence");
    Ok(format!("{} {}", student.name, new_status.display_label()))
}

#[instrument(skip(pool))]
pub async fn list_present_students(pool: &Pool<Sqlite>) -> Result<Vec<Student>, AppError> {
    list_students_by_status(pool, PresenceStatus::CheckedIn).await
}

/// Placeholder record number `i` (1-based): `QR001`, `Student 1`,
/// `/photos/photo1.jpg`.
pub fn sample_student(i: u32) -> (String, String, String) {
    (
        format!("QR{:03}", i),
        format!("Student {}", i),
        format!("/photos/photo{}.jpg", i),
    )
}

/// Seeds `count` placeholder students, skipping any whose QR ID is already
/// taken. Returns how many were actually inserted.
#[instrument(skip(pool))]
pub async fn load_sample_students(pool: &Pool<Sqlite>, count: u32) -> Result<u32, AppError> {
    let mut inserted = 0;

    for i in 1..=count {
        let (qr_id, name, photo) = sample_student(i);
        match insert_student(pool, &qr_id, &name, &photo, None).await {
            Ok(_) => inserted += 1,
            Err(AppError::Duplicate(_)) => {
                debug!(qr_id = %qr_id, "Sample student already present, skipping");
            }
            Err(e) => return Err(e),
        }
    }

    info!(requested = count, inserted, "Sample data loaded");
    Ok(inserted)
}
