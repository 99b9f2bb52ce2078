use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{AdminContact, ContactUpdate, Favorite, NewContact, ProfileUpdate, User, UserRow};
use super::store::Store;

const USER_COLUMNS: &str =
    "id, user_name, email, bio, preferences, avatar_url, user_level_id, created_at, updated_at";

const CONTACT_FIELDS: &str = "id, name, title, email, position, user_id, created_at, updated_at";

// Avatars are joined from `users` at read time, so the column is synthesized
const CONTACT_COLUMNS: &str =
    "id, name, title, email, position, user_id, NULL::text AS avatar_url, created_at, updated_at";

#[derive(FromRow)]
struct FavoriteRow {
    user_id: Uuid,
    item_id: String,
    item_type: String,
    added_at: chrono::DateTime<chrono::Utc>,
}

/// `Store` backed by Postgres through a shared sqlx pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Load favorites for every row in one query and assemble users
    async fn with_favorites(&self, rows: Vec<UserRow>) -> Result<Vec<User>, DatabaseError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let favorite_rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT user_id, item_id, item_type, added_at FROM user_favorites \
             WHERE user_id = ANY($1) ORDER BY added_at ASC, id ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_user: HashMap<Uuid, Vec<Favorite>> = HashMap::new();
        for row in favorite_rows {
            by_user.entry(row.user_id).or_default().push(Favorite {
                item_id: row.item_id,
                item_type: row.item_type,
                added_at: row.added_at,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let favorites = by_user.remove(&row.id).unwrap_or_default();
                row.into_user(favorites)
            })
            .collect())
    }
}

/// Unique-index violations become `Conflict`; everything else passes through.
fn map_write_error(err: sqlx::Error, conflict: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => DatabaseError::Conflict(conflict.to_string()),
        _ => DatabaseError::Sqlx(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.with_favorites(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_users_by_emails(&self, emails: &[String]) -> Result<Vec<User>, DatabaseError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let lowered: Vec<String> = emails.iter().map(|e| e.to_lowercase()).collect();

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = ANY($1)"
        ))
        .bind(&lowered)
        .fetch_all(&self.pool)
        .await?;

        self.with_favorites(rows).await
    }

    async fn find_users_by_levels(&self, levels: &[i32]) -> Result<Vec<User>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_level_id = ANY($1) ORDER BY email ASC"
        ))
        .bind(levels)
        .fetch_all(&self.pool)
        .await?;

        self.with_favorites(rows).await
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET \
                user_name = COALESCE($2, user_name), \
                email = COALESCE($3, email), \
                bio = CASE WHEN $6 THEN $4 ELSE bio END, \
                preferences = COALESCE($5, preferences), \
                updated_at = now() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.user_name)
        .bind(&update.email)
        .bind(update.bio.clone().flatten())
        .bind(update.preferences.clone().map(Json::<Value>))
        .bind(update.bio.is_some())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Email already in use"))?;

        match row {
            Some(row) => Ok(self.with_favorites(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list_favorites(&self, user_id: Uuid) -> Result<Vec<Favorite>, DatabaseError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT item_id, item_type, added_at FROM user_favorites \
             WHERE user_id = $1 ORDER BY added_at ASC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }

    async fn add_favorite(&self, user_id: Uuid, favorite: &Favorite) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO user_favorites (user_id, item_id, item_type, added_at) VALUES ($1, $2, $3, $4)")
            .bind(user_id)
            .bind(&favorite.item_id)
            .bind(&favorite.item_type)
            .bind(favorite.added_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn remove_favorite(&self, user_id: Uuid, item_id: &str, item_type: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM user_favorites WHERE id = ( \
                SELECT id FROM user_favorites \
                WHERE user_id = $1 AND item_id = $2 AND item_type = $3 \
                ORDER BY added_at DESC, id DESC LIMIT 1)",
        )
        .bind(user_id)
        .bind(item_id)
        .bind(item_type)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_contacts(&self) -> Result<Vec<AdminContact>, DatabaseError> {
        let contacts = sqlx::query_as::<_, AdminContact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM admincontacts ORDER BY position ASC, created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(contacts)
    }

    async fn create_contact(&self, contact: NewContact) -> Result<AdminContact, DatabaseError> {
        let contact = contact.into_contact();
        let created = sqlx::query_as::<_, AdminContact>(&format!(
            "INSERT INTO admincontacts ({CONTACT_FIELDS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.title)
        .bind(&contact.email)
        .bind(contact.position)
        .bind(contact.user)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update_contact(&self, id: Uuid, update: &ContactUpdate) -> Result<Option<AdminContact>, DatabaseError> {
        let updated = sqlx::query_as::<_, AdminContact>(&format!(
            "UPDATE admincontacts SET \
                name = COALESCE($2, name), \
                title = COALESCE($3, title), \
                email = COALESCE($4, email), \
                position = COALESCE($5, position), \
                user_id = CASE WHEN $6 THEN $7 ELSE user_id END, \
                updated_at = now() \
             WHERE id = $1 RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.title)
        .bind(&update.email)
        .bind(update.position)
        .bind(update.user.is_some())
        .bind(update.user.flatten())
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_contact(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM admincontacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn reorder_contacts(&self, ordered_ids: &[Uuid]) -> Result<Vec<Uuid>, DatabaseError> {
        let mut tx = self.pool.begin().await?;
        let mut missing = Vec::new();

        for (index, id) in ordered_ids.iter().enumerate() {
            let result = sqlx::query("UPDATE admincontacts SET position = $1, updated_at = now() WHERE id = $2")
                .bind(index as i32)
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                missing.push(*id);
            }
        }

        // Dropping `tx` on an early return above rolls everything back
        tx.commit().await?;
        Ok(missing)
    }
}
