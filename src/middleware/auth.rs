//! Middleware de autenticación JWT
//!
//! Extrae y verifica el token Bearer, valida que el usuario siga activo
//! e inyecta el usuario autenticado en las extensions del request. El
//! gate de dashboard exige rol superadmin o manager.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};

use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: UserRole,
    pub name: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

    let role = UserRole::parse(&claims.role)
        .ok_or_else(|| AppError::Unauthorized("Rol inválido".to_string()))?;

    // Verificar que el usuario siga existiendo y activo
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    if !user.is_active {
        return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        role,
        name: claims.name,
    });

    Ok(next.run(request).await)
}

/// Gate de acceso al dashboard: solo superadmin y manager
pub async fn require_dashboard_access(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.role.can_view_dashboard() {
        return Err(AppError::Forbidden(
            "Se requiere rol manager o superadmin para ver el dashboard".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
