use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::db::list_students;
use crate::error::AppError;
use crate::models::Student;

pub const EXPORT_FILENAME: &str = "students.xlsx";
pub const HEADERS: [&str; 6] = ["ID", "QR ID", "Name", "Photo", "Status", "Timestamp"];

const WORKSHEET_NAME: &str = "Students";

fn student_to_row(student: &Student) -> [String; 6] {
    [
        student.id.to_string(),
        student.qr_id.clone(),
        student.name.clone(),
        student.photo.clone(),
        student.status.to_string(),
        student.timestamp.clone().unwrap_or_default(),
    ]
}

/// Renders every student as an xlsx workbook held in memory.
pub fn students_to_xlsx(students: &[Student]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    let mut col_widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (index, student) in students.iter().enumerate() {
        let row = (index + 1) as u32;

        for (col, value) in student_to_row(student).iter().enumerate() {
            // Empty cells are left blank rather than written as empty strings.
            if !value.is_empty() {
                worksheet.write_string(row, col as u16, value)?;
            }
            col_widths[col] = col_widths[col].max(value.chars().count());
        }
    }

    for (col, width) in col_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64 + 2.0)?;
    }

    Ok(workbook.save_to_buffer()?)
}

#[instrument(skip(pool))]
pub async fn export_students_xlsx(pool: &Pool<Sqlite>) -> Result<Vec<u8>, AppError> {
    let students = list_students(pool).await?;
    let bytes = students_to_xlsx(&students)?;

    info!(rows = students.len(), bytes = bytes.len(), "Exported students workbook");
    Ok(bytes)
}
