//! # 사용자 핸들러
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/v1/users` | 가입 | 201 |
//! | `GET` | `/api/v1/users/me` | 내 정보 | 200 |
//! | `POST` | `/api/v1/users/me/roles` | 역할 추가 | 200 |
//!
//! 역할을 추가한 뒤에는 새 역할이 담긴 토큰을 받기 위해 다시 로그인해야 합니다.

use actix_web::{web, HttpResponse, get, post};

use crate::core::errors::AppError;
use crate::domain::dto::users::{AddRoleRequest, CreateUserRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_payload;
use crate::services::users::UserService;

#[post("")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let service = UserService::instance();
    let response = service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let service = UserService::instance();
    let response = service.get_user(&user.object_id()?).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/roles")]
pub async fn add_role(
    user: AuthenticatedUser,
    payload: web::Json<AddRoleRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let role = payload
        .parsed_role()
        .ok_or_else(|| AppError::ValidationError("지원하지 않는 역할입니다".to_string()))?;

    let service = UserService::instance();
    let response = service.add_role(&user.object_id()?, role, user.is_admin()).await?;

    Ok(HttpResponse::Ok().json(response))
}
