use eyre::Result;
use roomresv_core::lookup::LookupKind;
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

/// Every table, in dependency order: parents before the tables that
/// reference them.
///
/// All foreign keys cascade on parent key update and restrict parent delete.
const TABLES: [(&str, &str); 25] = [
    (
        "languages",
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            lang_code VARCHAR(8) PRIMARY KEY NOT NULL,
            name VARCHAR(64) NOT NULL,
            CONSTRAINT valid_lang_code CHECK (lang_code <> '')
        );
        "#,
    ),
    (
        "user_roles",
        r#"
        CREATE TABLE IF NOT EXISTS user_roles (
            role INTEGER PRIMARY KEY NOT NULL,
            label VARCHAR(64) NOT NULL
        );
        "#,
    ),
    (
        "room_status",
        r#"
        CREATE TABLE IF NOT EXISTS room_status (
            status INTEGER PRIMARY KEY NOT NULL,
            label VARCHAR(64) NOT NULL
        );
        "#,
    ),
    (
        "room_types",
        r#"
        CREATE TABLE IF NOT EXISTS room_types (
            type INTEGER PRIMARY KEY NOT NULL,
            label VARCHAR(64) NOT NULL
        );
        "#,
    ),
    (
        "resv_privacy",
        r#"
        CREATE TABLE IF NOT EXISTS resv_privacy (
            privacy INTEGER PRIMARY KEY NOT NULL,
            label VARCHAR(64) NOT NULL
        );
        "#,
    ),
    (
        "resv_status",
        r#"
        CREATE TABLE IF NOT EXISTS resv_status (
            status INTEGER PRIMARY KEY NOT NULL,
            label VARCHAR(64) NOT NULL
        );
        "#,
    ),
    (
        "settings",
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY NOT NULL,
            name VARCHAR(255) NOT NULL UNIQUE,
            value TEXT NOT NULL,
            description TEXT NULL
        );
        "#,
    ),
    (
        "periods",
        r#"
        CREATE TABLE IF NOT EXISTS periods (
            period_id INTEGER PRIMARY KEY NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            CONSTRAINT valid_time_range CHECK (start_time < end_time)
        );
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            username VARCHAR(64) PRIMARY KEY NOT NULL,
            name VARCHAR(255) NOT NULL,
            password VARCHAR(255) NOT NULL,
            role INTEGER NOT NULL REFERENCES user_roles(role)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            email VARCHAR(255) NOT NULL DEFAULT '',
            CONSTRAINT valid_username CHECK (username <> ''),
            CONSTRAINT valid_name CHECK (name <> ''),
            CONSTRAINT valid_email CHECK (email = '' OR email LIKE '%@%')
        );
        "#,
    ),
    (
        "rooms",
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            room_id INTEGER PRIMARY KEY NOT NULL,
            status INTEGER NOT NULL REFERENCES room_status(status)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            name VARCHAR(255) NOT NULL,
            capacity INTEGER NOT NULL,
            type INTEGER NOT NULL REFERENCES room_types(type)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            image TEXT NULL
        );
        "#,
    ),
    (
        "sessions",
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            session_id INTEGER PRIMARY KEY NOT NULL,
            name VARCHAR(255) NOT NULL,
            start_time DATETIME NOT NULL,
            end_time DATETIME NOT NULL,
            is_current BOOLEAN NOT NULL DEFAULT 0,
            CONSTRAINT valid_time_range CHECK (start_time < end_time)
        );
        "#,
    ),
    (
        "notices",
        r#"
        CREATE TABLE IF NOT EXISTS notices (
            username VARCHAR(64) NOT NULL REFERENCES users(username)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            notice_id INTEGER NOT NULL,
            title VARCHAR(255) NOT NULL,
            content TEXT NOT NULL,
            create_time DATETIME NOT NULL,
            update_time DATETIME NOT NULL,
            PRIMARY KEY (username, notice_id),
            CONSTRAINT valid_update_time CHECK (create_time <= update_time)
        );
        "#,
    ),
    (
        "reservations",
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            username VARCHAR(64) NOT NULL REFERENCES users(username)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            resv_id INTEGER NOT NULL,
            room_id INTEGER NOT NULL REFERENCES rooms(room_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            privacy INTEGER NOT NULL REFERENCES resv_privacy(privacy)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            session_id INTEGER NULL REFERENCES sessions(session_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            title VARCHAR(255) NOT NULL,
            note TEXT NULL,
            create_time DATETIME NOT NULL,
            update_time DATETIME NOT NULL,
            PRIMARY KEY (username, resv_id),
            CONSTRAINT valid_update_time CHECK (create_time <= update_time)
        );
        "#,
    ),
    (
        "time_slots",
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            username VARCHAR(64) NOT NULL,
            resv_id INTEGER NOT NULL,
            slot_id INTEGER NOT NULL,
            status INTEGER NOT NULL REFERENCES resv_status(status)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            start_time DATETIME NOT NULL,
            end_time DATETIME NOT NULL,
            PRIMARY KEY (username, resv_id, slot_id),
            FOREIGN KEY (username, resv_id) REFERENCES reservations(username, resv_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            CONSTRAINT valid_time_range CHECK (start_time < end_time)
        );
        "#,
    ),
    (
        "setting_trans",
        r#"
        CREATE TABLE IF NOT EXISTS setting_trans (
            id INTEGER NOT NULL REFERENCES settings(id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            name VARCHAR(255) NOT NULL,
            description TEXT NULL,
            PRIMARY KEY (id, lang_code)
        );
        "#,
    ),
    (
        "user_role_trans",
        r#"
        CREATE TABLE IF NOT EXISTS user_role_trans (
            role INTEGER NOT NULL REFERENCES user_roles(role)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            label VARCHAR(64) NOT NULL,
            PRIMARY KEY (role, lang_code)
        );
        "#,
    ),
    (
        "user_trans",
        r#"
        CREATE TABLE IF NOT EXISTS user_trans (
            username VARCHAR(64) NOT NULL REFERENCES users(username)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            name VARCHAR(255) NOT NULL,
            PRIMARY KEY (username, lang_code)
        );
        "#,
    ),
    (
        "notice_trans",
        r#"
        CREATE TABLE IF NOT EXISTS notice_trans (
            username VARCHAR(64) NOT NULL,
            notice_id INTEGER NOT NULL,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            title VARCHAR(255) NOT NULL,
            content TEXT NULL,
            PRIMARY KEY (username, notice_id, lang_code),
            FOREIGN KEY (username, notice_id) REFERENCES notices(username, notice_id)
                ON UPDATE CASCADE ON DELETE RESTRICT
        );
        "#,
    ),
    (
        "session_trans",
        r#"
        CREATE TABLE IF NOT EXISTS session_trans (
            session_id INTEGER NOT NULL REFERENCES sessions(session_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            name VARCHAR(255) NOT NULL,
            PRIMARY KEY (session_id, lang_code)
        );
        "#,
    ),
    (
        "room_status_trans",
        r#"
        CREATE TABLE IF NOT EXISTS room_status_trans (
            status INTEGER NOT NULL REFERENCES room_status(status)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            label VARCHAR(64) NOT NULL,
            PRIMARY KEY (status, lang_code)
        );
        "#,
    ),
    (
        "room_type_trans",
        r#"
        CREATE TABLE IF NOT EXISTS room_type_trans (
            type INTEGER NOT NULL REFERENCES room_types(type)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            label VARCHAR(64) NOT NULL,
            PRIMARY KEY (type, lang_code)
        );
        "#,
    ),
    (
        "room_trans",
        r#"
        CREATE TABLE IF NOT EXISTS room_trans (
            room_id INTEGER NOT NULL REFERENCES rooms(room_id)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            name VARCHAR(255) NOT NULL,
            PRIMARY KEY (room_id, lang_code)
        );
        "#,
    ),
    (
        "resv_privacy_trans",
        r#"
        CREATE TABLE IF NOT EXISTS resv_privacy_trans (
            privacy INTEGER NOT NULL REFERENCES resv_privacy(privacy)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            label VARCHAR(64) NOT NULL,
            PRIMARY KEY (privacy, lang_code)
        );
        "#,
    ),
    (
        "resv_status_trans",
        r#"
        CREATE TABLE IF NOT EXISTS resv_status_trans (
            status INTEGER NOT NULL REFERENCES resv_status(status)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            label VARCHAR(64) NOT NULL,
            PRIMARY KEY (status, lang_code)
        );
        "#,
    ),
    (
        "resv_trans",
        r#"
        CREATE TABLE IF NOT EXISTS resv_trans (
            username VARCHAR(64) NOT NULL,
            resv_id INTEGER NOT NULL,
            lang_code VARCHAR(8) NOT NULL REFERENCES languages(lang_code)
                ON UPDATE CASCADE ON DELETE RESTRICT,
            title VARCHAR(255) NOT NULL,
            note TEXT NULL,
            PRIMARY KEY (username, resv_id, lang_code),
            FOREIGN KEY (username, resv_id) REFERENCES reservations(username, resv_id)
                ON UPDATE CASCADE ON DELETE RESTRICT
        );
        "#,
    ),
];

const INDEXES: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);
    CREATE INDEX IF NOT EXISTS idx_rooms_status ON rooms(status);
    CREATE INDEX IF NOT EXISTS idx_rooms_type ON rooms(type);
    CREATE INDEX IF NOT EXISTS idx_reservations_room_id ON reservations(room_id);
    CREATE INDEX IF NOT EXISTS idx_reservations_session_id ON reservations(session_id);
    CREATE INDEX IF NOT EXISTS idx_time_slots_start_time ON time_slots(start_time);
    CREATE INDEX IF NOT EXISTS idx_time_slots_end_time ON time_slots(end_time);
    CREATE INDEX IF NOT EXISTS idx_time_slots_status ON time_slots(status);
"#;

/// Names of all tables created by [`initialize_database`].
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

pub async fn initialize_database(pool: &Pool<Sqlite>) -> Result<()> {
    info!("Initializing database schema...");

    for (name, ddl) in TABLES {
        debug!("Creating table {}", name);
        sqlx::query(ddl).execute(pool).await?;
    }

    sqlx::query(INDEXES).execute(pool).await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Inserts the lookup vocabularies and the English locale, leaving rows
/// that already exist untouched.
pub async fn seed_defaults(pool: &Pool<Sqlite>) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("INSERT OR IGNORE INTO languages (lang_code, name) VALUES ($1, $2)")
        .bind("en")
        .bind("English")
        .execute(&mut *tx)
        .await?;

    for kind in LookupKind::ALL {
        let sql = format!(
            "INSERT OR IGNORE INTO {} ({}, label) VALUES ($1, $2)",
            kind.table(),
            kind.key_column()
        );
        for (id, label) in kind.default_vocabulary() {
            sqlx::query(&sql)
                .bind(*id)
                .bind(*label)
                .execute(&mut *tx)
                .await?;
        }
        debug!("Seeded {}", kind.table());
    }

    tx.commit().await?;
    info!("Default vocabularies seeded.");
    Ok(())
}
