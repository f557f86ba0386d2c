// src/services/auth.rs

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::user_repo::UserRepository,
    models::auth::{AuthResponse, Claims, LoginUserPayload, RegisterUserPayload, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    pub async fn register(
        &self,
        pool: &PgPool,
        payload: RegisterUserPayload,
    ) -> Result<User, AppError> {
        // Bcrypt é pesado: roda fora do executor async.
        let password_hash =
            tokio::task::spawn_blocking(move || bcrypt::hash(payload.password, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| AppError::InternalServerError(e.into()))??;

        let user = self
            .user_repo
            .create(pool, &payload.name, &payload.email, &password_hash)
            .await?;

        tracing::info!("✅ Usuário registrado: {}", user.email);
        Ok(user)
    }

    pub async fn login(
        &self,
        pool: &PgPool,
        payload: LoginUserPayload,
    ) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(pool, &payload.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hash = user.password_hash.clone();
        let valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(payload.password, &hash))
                .await
                .map_err(|e| AppError::InternalServerError(e.into()))??;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        Ok(AuthResponse { token, user })
    }

    pub fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp() as usize,
            exp: (now + Duration::hours(24)).timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(data.claims)
    }
}
