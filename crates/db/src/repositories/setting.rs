use crate::error::{DbResultExt, WriteAction};
use crate::models::DbSetting;
use roomresv_core::errors::{ResvError, ResvResult};
use roomresv_core::models::setting::{NewSetting, SettingUpdate};
use sqlx::{Pool, Sqlite};

pub async fn create_setting(pool: &Pool<Sqlite>, setting: &NewSetting) -> ResvResult<DbSetting> {
    tracing::debug!("Creating setting: id={:?}, name={}", setting.id, setting.name);

    let created = sqlx::query_as::<_, DbSetting>(
        r#"
        INSERT INTO settings (id, name, value, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, value, description
        "#,
    )
    .bind(setting.id)
    .bind(&setting.name)
    .bind(&setting.value)
    .bind(&setting.description)
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Insert, "settings")?;

    Ok(created)
}

pub async fn get_setting(pool: &Pool<Sqlite>, id: i64) -> ResvResult<Option<DbSetting>> {
    let setting = sqlx::query_as::<_, DbSetting>(
        r#"
        SELECT id, name, value, description
        FROM settings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(setting)
}

pub async fn get_setting_by_name(pool: &Pool<Sqlite>, name: &str) -> ResvResult<Option<DbSetting>> {
    let setting = sqlx::query_as::<_, DbSetting>(
        r#"
        SELECT id, name, value, description
        FROM settings
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .on_read()?;

    Ok(setting)
}

pub async fn list_settings(pool: &Pool<Sqlite>) -> ResvResult<Vec<DbSetting>> {
    let settings = sqlx::query_as::<_, DbSetting>(
        r#"
        SELECT id, name, value, description
        FROM settings
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .on_read()?;

    Ok(settings)
}

pub async fn update_setting(
    pool: &Pool<Sqlite>,
    id: i64,
    update: &SettingUpdate,
) -> ResvResult<DbSetting> {
    let setting = get_setting(pool, id)
        .await?
        .ok_or_else(|| ResvError::NotFound(format!("setting {}", id)))?;

    let updated = sqlx::query_as::<_, DbSetting>(
        r#"
        UPDATE settings
        SET name = $2, value = $3, description = $4
        WHERE id = $1
        RETURNING id, name, value, description
        "#,
    )
    .bind(id)
    .bind(update.name.as_deref().unwrap_or(&setting.name))
    .bind(update.value.as_deref().unwrap_or(&setting.value))
    .bind(match &update.description {
        Some(description) => description.as_deref(),
        None => setting.description.as_deref(),
    })
    .fetch_one(pool)
    .await
    .on_write(WriteAction::Update, "settings")?;

    Ok(updated)
}

pub async fn rekey_setting(pool: &Pool<Sqlite>, id: i64, new_id: i64) -> ResvResult<DbSetting> {
    sqlx::query_as::<_, DbSetting>(
        r#"
        UPDATE settings
        SET id = $2
        WHERE id = $1
        RETURNING id, name, value, description
        "#,
    )
    .bind(id)
    .bind(new_id)
    .fetch_optional(pool)
    .await
    .on_write(WriteAction::Update, "settings")?
    .ok_or_else(|| ResvError::NotFound(format!("setting {}", id)))
}

pub async fn delete_setting(pool: &Pool<Sqlite>, id: i64) -> ResvResult<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM settings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .on_write(WriteAction::Delete, "settings")?;

    if result.rows_affected() == 0 {
        return Err(ResvError::NotFound(format!("setting {}", id)));
    }
    Ok(())
}
