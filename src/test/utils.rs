#[cfg(test)]
pub mod test_utils {
    use crate::database::create_table;
    use crate::db::insert_student;
    use crate::error::AppError;
    use crate::init_rocket;
    use crate::models::PresenceStatus;
    use rocket::local::asynchronous::Client;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Pool, Sqlite};
    use std::collections::HashMap;
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub struct TestStudent {
        pub qr_id: String,
        pub name: String,
        pub photo: String,
        pub status: Option<PresenceStatus>,
    }

    #[derive(Default)]
    pub struct TestDbBuilder {
        students: Vec<TestStudent>,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn student(mut self, qr_id: &str, name: &str) -> Self {
            self.students.push(TestStudent {
                qr_id: qr_id.to_string(),
                name: name.to_string(),
                photo: format!("/photos/{}.jpg", qr_id.to_lowercase()),
                status: None,
            });
            self
        }

        pub fn checked_in_student(mut self, qr_id: &str, name: &str) -> Self {
            self.students.push(TestStudent {
                qr_id: qr_id.to_string(),
                name: name.to_string(),
                photo: format!("/photos/{}.jpg", qr_id.to_lowercase()),
                status: Some(PresenceStatus::CheckedIn),
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .parse_filters("debug")
                    .is_test(true)
                    .try_init();
            });

            // A single connection that never expires keeps the in-memory
            // database alive for the whole test.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect("sqlite::memory:")
                .await?;

            create_table(&pool).await?;

            let mut id_map = HashMap::new();
            for student in &self.students {
                let id = insert_student(
                    &pool,
                    &student.qr_id,
                    &student.name,
                    &student.photo,
                    student.status,
                )
                .await?;
                id_map.insert(student.qr_id.clone(), id);
            }

            Ok(TestDb { pool, id_map })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub id_map: HashMap<String, i64>,
    }

    impl TestDb {
        pub fn student_id(&self, qr_id: &str) -> Option<i64> {
            self.id_map.get(qr_id).copied()
        }

        pub async fn student_count(&self) -> Result<i64, sqlx::Error> {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
                .fetch_one(&self.pool)
                .await
        }
    }

    pub async fn create_empty_test_db() -> TestDb {
        TestDbBuilder::new()
            .build()
            .await
            .expect("Failed to create empty test database")
    }

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .student("QR001", "Alice")
            .student("QR002", "Bob")
            .checked_in_student("QR003", "Carol")
            .build()
            .await
            .expect("Failed to create standard test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.pool.clone());
        let client = Client::tracked(rocket)
            .await
            .expect("Failed to build rocket client");
        (client, test_db)
    }
}
