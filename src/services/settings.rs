use crate::{db::DbPool, error::AppError};

const SAVED_USERNAME_KEY: &str = "saved_username";
const SAVED_PASSWORD_KEY: &str = "saved_password";

#[derive(Debug, Clone)]
pub struct SavedCredentials {
    pub username: String,
    pub password: String,
}

// Key-value vault for the one persisted thing the app has: the saved
// username/password pair. Both values are stored as plaintext strings.
#[derive(Clone)]
pub struct SettingsService {
    db: DbPool,
}

impl SettingsService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn saved_credentials(&self) -> Result<Option<SavedCredentials>, AppError> {
        let username = self.get(SAVED_USERNAME_KEY).await?;
        let password = self.get(SAVED_PASSWORD_KEY).await?;
        Ok(match (username, password) {
            (Some(username), Some(password)) => Some(SavedCredentials { username, password }),
            _ => None,
        })
    }

    pub async fn save_credentials(&self, username: &str, password: &str) -> Result<(), AppError> {
        self.set(SAVED_USERNAME_KEY, username).await?;
        self.set(SAVED_PASSWORD_KEY, password).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value = sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
