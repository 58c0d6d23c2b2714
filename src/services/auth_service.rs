use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::get_config;
use crate::dto::auth_dto::{AdminInfo, LoginResponse};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::models::admin::Admin;

const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct AuthService {
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let parsed_hash = PasswordHash::new(&admin.password_hash)
            .map_err(|e| Error::Internal(format!("Corrupt password hash: {}", e)))?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| Error::Unauthorized("Invalid credentials".to_string()))?;

        let config = get_config();
        let claims = Claims {
            sub: admin.username.clone(),
            admin_id: admin.id,
            exp: (chrono::Utc::now().timestamp() + TOKEN_TTL_SECS) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(LoginResponse {
            token,
            admin: AdminInfo {
                id: admin.id,
                username: admin.username,
            },
        })
    }

    /// Seeds the configured admin account when the table is empty, so a
    /// fresh deployment is immediately usable.
    pub async fn ensure_default_admin(&self) -> Result<()> {
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins")
                .fetch_one(&self.pool)
                .await?;
        if existing > 0 {
            return Ok(());
        }

        let config = get_config();
        let password = config.admin_password.as_deref().unwrap_or("admin123");
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?
            .to_string();

        sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?, ?)")
            .bind(&config.admin_username)
            .bind(&hash)
            .execute(&self.pool)
            .await?;

        info!(username = %config.admin_username, "default admin created");
        Ok(())
    }
}
