use async_trait::async_trait;
use chrono::Utc;
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
};
use std::{str::FromStr, time::Duration};

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{UserProfile, sample_profiles},
        value_objects::UserId,
    },
    ports::repositories::ProfileRepository,
};

/// SQL-based implementation of ProfileRepository using SQLite
#[derive(Clone)]
pub struct SqlProfileRepository {
    pool: SqlitePool,
}

impl SqlProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `database_url`, creating the database file if needed
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory database lives and dies with its single connection.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        Ok(Self::new(pool))
    }

    /// Initialize database tables
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_profiles (
                id TEXT PRIMARY KEY NOT NULL,
                username TEXT NOT NULL,
                profile_image_link TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert the sample profiles unless they are already present
    pub async fn seed_sample_profiles(&self) -> Result<(), sqlx::Error> {
        for profile in sample_profiles() {
            let now = Utc::now();
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO user_profiles (id, username, profile_image_link, created_at, updated_at)
                VALUES (?, ?, NULL, ?, ?)
                "#,
            )
            .bind(profile.id().to_string())
            .bind(profile.username())
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

fn database_error(action: &str, err: sqlx::Error) -> RepositoryError {
    RepositoryError::Database {
        message: format!("{}: {}", action, err),
    }
}

fn profile_from_row(row: &SqliteRow) -> RepositoryResult<UserProfile> {
    let invalid = |message: String| RepositoryError::InvalidRecord { message };

    let id: String = row.try_get("id").map_err(|e| invalid(e.to_string()))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| invalid(e.to_string()))?;
    let link: Option<String> = row
        .try_get("profile_image_link")
        .map_err(|e| invalid(e.to_string()))?;

    let id = UserId::from_str(&id).map_err(|e| invalid(e.to_string()))?;
    UserProfile::restore(id, username, link).map_err(|e| invalid(e.to_string()))
}

#[async_trait]
impl ProfileRepository for SqlProfileRepository {
    async fn list(&self) -> RepositoryResult<Vec<UserProfile>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, profile_image_link
            FROM user_profiles
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("listing profiles", e))?;

        rows.iter().map(profile_from_row).collect()
    }

    async fn get(&self, id: &UserId) -> RepositoryResult<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, profile_image_link
            FROM user_profiles
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("retrieving profile", e))?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn add(&self, profile: UserProfile) -> RepositoryResult<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO user_profiles (id, username, profile_image_link, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile.id().to_string())
        .bind(profile.username())
        .bind(profile.profile_image_link())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::DuplicateProfile(profile.id())
            }
            other => database_error("inserting profile", other),
        })?;

        Ok(())
    }

    async fn set_profile_image_link(
        &self,
        id: &UserId,
        url: &str,
    ) -> RepositoryResult<UserProfile> {
        let row = sqlx::query(
            r#"
            UPDATE user_profiles
            SET profile_image_link = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, username, profile_image_link
            "#,
        )
        .bind(url)
        .bind(Utc::now())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("updating profile image link", e))?;

        match row {
            Some(row) => profile_from_row(&row),
            None => Err(RepositoryError::ProfileNotFound(*id)),
        }
    }
}
