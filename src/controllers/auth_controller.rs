//! Controller de autenticación

use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, UserInfo};
use crate::dto::common::ApiResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config: JwtConfig::from(config),
        }
    }

    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        if !user.is_active {
            return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
        }

        let valid = bcrypt::verify(&request.password, &user.password)
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, &user.role, &user.name, &self.jwt_config)?;

        info!("🔐 Login exitoso: {} ({})", user.email, user.role);

        Ok(ApiResponse::success_with_message(
            LoginResponse {
                token,
                user: UserInfo::from(user),
            },
            "Login exitoso".to_string(),
        ))
    }
}
