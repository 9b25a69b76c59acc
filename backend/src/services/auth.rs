//! Authentication service for user registration, login, and token issuance

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Claims;
use shared::types::Role;
use shared::validation::{
    normalize_location, validate_location, validate_password, validate_role, validate_username,
};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    allowed_locations: Vec<String>,
}

/// Input for logging in
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Response after a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub location: Option<String>,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Input for registering a new user (admin only)
#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub role: String,
    pub location: Option<String>,
}

/// Response after registering a user
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub location: Option<String>,
}

/// Input for changing an admin password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordInput {
    pub username: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// User row loaded for authentication
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    role: String,
    location: Option<String>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            allowed_locations: config.locations.allowed.clone(),
        }
    }

    /// Authenticate a user and issue an access token
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let username = input.username.trim();

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash, role, location FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = verify(&input.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let role = Role::parse(&user.role).ok_or_else(|| {
            AppError::Internal(format!("Unknown role '{}' for user {}", user.role, user.id))
        })?;

        let access_token = self.issue_token(user.id, &user.username, role, &user.location)?;

        tracing::info!(username = %user.username, role = %user.role, "User logged in");

        Ok(LoginResponse {
            user_id: user.id,
            username: user.username,
            role,
            location: user.location,
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Register a new user account (admin operation)
    pub async fn register(&self, input: RegisterInput) -> AppResult<RegisterResponse> {
        let username = input.username.trim().to_string();
        validate_username(&username).map_err(|msg| AppError::Validation {
            field: "username".to_string(),
            message: msg.to_string(),
        })?;
        validate_password(&input.password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
        })?;
        let role = validate_role(&input.role).map_err(|msg| AppError::Validation {
            field: "role".to_string(),
            message: msg.to_string(),
        })?;

        // Sellers and bakers must be attached to a known selling point
        let location = match input.location.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                let normalized = normalize_location(raw);
                validate_location(&normalized, &self.allowed_locations).map_err(|msg| {
                    AppError::Validation {
                        field: "location".to_string(),
                        message: msg.to_string(),
                    }
                })?;
                Some(normalized)
            }
            _ if role == Role::Admin => None,
            _ => {
                return Err(AppError::Validation {
                    field: "location".to_string(),
                    message: "A location is required for this role".to_string(),
                })
            }
        };

        let existing = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username = $1",
        )
        .bind(&username)
        .fetch_one(&self.db)
        .await?;
        if existing > 0 {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, password_hash, role, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&username)
        .bind(&password_hash)
        .bind(role.as_str())
        .bind(&location)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(%username, role = role.as_str(), ?location, "User registered");

        Ok(RegisterResponse {
            user_id,
            username,
            role,
            location,
        })
    }

    /// Change an admin account's password
    pub async fn change_admin_password(&self, input: ChangePasswordInput) -> AppResult<()> {
        if input.new_password != input.confirm_password {
            return Err(AppError::Validation {
                field: "confirm_password".to_string(),
                message: "New passwords do not match".to_string(),
            });
        }
        validate_password(&input.new_password).map_err(|msg| AppError::Validation {
            field: "new_password".to_string(),
            message: msg.to_string(),
        })?;

        let password_hash = hash(&input.new_password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let result = sqlx::query(
            "UPDATE users SET password_hash = $1 WHERE username = $2 AND role = 'admin'",
        )
        .bind(&password_hash)
        .bind(input.username.trim())
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Admin user".to_string()));
        }

        Ok(())
    }

    /// Issue a signed access token
    fn issue_token(
        &self,
        user_id: Uuid,
        username: &str,
        role: Role,
        location: &Option<String>,
    ) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            location: location.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }
}
