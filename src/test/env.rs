#[cfg(test)]
mod tests {
    use serial_test::serial;
    use std::path::PathBuf;

    use crate::env::{DEFAULT_DATABASE_URL, EnvFile, database_url, load_env_files, photos_dir};

    #[test]
    #[serial]
    fn test_database_url_default() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert_eq!(database_url(), DEFAULT_DATABASE_URL);
        });
        temp_env::with_var("DATABASE_URL", Some(""), || {
            assert_eq!(database_url(), DEFAULT_DATABASE_URL);
        });
    }

    #[test]
    #[serial]
    fn test_database_url_override() {
        temp_env::with_var("DATABASE_URL", Some("sqlite://other.db"), || {
            assert_eq!(database_url(), "sqlite://other.db");
        });
    }

    #[test]
    #[serial]
    fn test_photos_dir() {
        temp_env::with_var_unset("PHOTOS_DIR", || {
            assert_eq!(photos_dir(), PathBuf::from("photos"));
        });
        temp_env::with_var("PHOTOS_DIR", Some("/srv/photos"), || {
            assert_eq!(photos_dir(), PathBuf::from("/srv/photos"));
        });
    }

    #[test]
    #[serial]
    fn test_env_files_are_reported() {
        let path = std::env::temp_dir().join(format!("qr-attendance-{}.env", std::process::id()));
        std::fs::write(&path, "QR_ATTENDANCE_TEST_VALUE=loaded\n").unwrap();
        let path = path.to_str().unwrap().to_string();

        temp_env::with_var_unset("QR_ATTENDANCE_TEST_VALUE", || {
            let report = load_env_files(&["config/does-not-exist.env", path.as_str()]).unwrap();

            assert_eq!(
                report,
                vec![
                    EnvFile::Missing("config/does-not-exist.env".to_string()),
                    EnvFile::Loaded(path.clone()),
                ]
            );
            assert_eq!(
                std::env::var("QR_ATTENDANCE_TEST_VALUE").as_deref(),
                Ok("loaded")
            );
        });

        let _ = std::fs::remove_file(&path);
    }
}
