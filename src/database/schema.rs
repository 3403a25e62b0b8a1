pub const CURRENT_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    qr_id TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    photo TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'checked_out' CHECK (status IN ('checked_in', 'checked_out')),
    timestamp TEXT
);
"#;
