use crate::error::{DbResultExt, WriteAction};
use crate::models::DbUser;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::models::user::{NewUser, UserUpdate};
use sqlx::{Pool, Sqlite};

/// Hashes a password into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> ResvResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ResvError::Internal(format!("Error hashing password: {}", e).into()))?
        .to_string();

    Ok(password_hash)
}

pub async fn create_user(pool: &Pool<Sqlite>, user: &NewUser) -> ResvResult<DbUser> {
    tracing::debug!(
        "Creating user: username={}, role={}",
        user.username,
        user.role
    );

    let password_hash = hash_password(&user.password)?;

    let created = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (username, name, password, role, email)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING username, name, password, role, email
        "#,
    )
    .bind(&user.username)
    .bind(&user.name)
    .bind(password_hash)
    .bind(user.role)
    .bind(&user.email)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "users")?;

    Ok(created)
}

pub async fn get_user(pool: &Pool<Sqlite>, username: &str) -> ResvResult<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT username, name, password, role, email
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(user)
}

/// Lists users, optionally only those holding `role`.
pub async fn list_users(pool: &Pool<Sqlite>, role: Option<i64>) -> ResvResult<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT username, name, password, role, email
        FROM users
        WHERE $1 IS NULL OR role = $1
        ORDER BY username ASC
        "#,
    )
    .bind(role)
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(users)
}

pub async fn update_user(
    pool: &Pool<Sqlite>,
    username: &str,
    update: &UserUpdate,
) -> ResvResult<DbUser> {
    let user = get_user(pool, username)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("user {}", username)))?;

    if update.is_empty() {
        return Ok(user);
    }

    let password = match &update.password {
        Some(password) => hash_password(password)?,
        None => user.password.clone(),
    };

    let updated = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET name = $2, email = $3, role = $4, password = $5
        WHERE username = $1
        RETURNING username, name, password, role, email
        "#,
    )
    .bind(username)
    .bind(update.name.as_deref().unwrap_or(&user.name))
    .bind(update.email.as_deref().unwrap_or(&user.email))
    .bind(update.role.unwrap_or(user.role))
    .bind(password)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "users")?;

    Ok(updated)
}

/// Renames a user. Their reservations, slots, notices and translations
/// follow the new name.
pub async fn rename_user(
    pool: &Pool<Sqlite>,
    username: &str,
    new_username: &str,
) -> ResvResult<DbUser> {
    tracing::debug!("Renaming user {} -> {}", username, new_username);

    sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET username = $2
        WHERE username = $1
        RETURNING username, name, password, role, email
        "#,
    )
    .bind(username)
    .bind(new_username)
    .fetch_optional(pool)
    .await
    .on_write(WriteAction::Update, "users")?
    .ok_or_else(|| ResvError::NotFound(format!("user {}", username)))
}

pub async fn delete_user(pool: &Pool<Sqlite>, username: &str) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "users")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("user {}", username)));
    }
    Ok(())
}
