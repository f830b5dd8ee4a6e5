//! 로그인/로그아웃 핸들러

use actix_web::{web, HttpRequest, HttpResponse, post};
use serde_json::json;

use crate::core::errors::AppError;
use crate::domain::dto::users::LoginRequest;
use crate::handlers::validate_payload;
use crate::services::auth::SessionService;
use crate::services::users::UserService;

/// 이메일/비밀번호 로그인
///
/// 응답: `{access_token, token_type, expires_in, user}`
#[post("/login")]
pub async fn local_login(
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let service = UserService::instance();
    let response = service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 현재 액세스 토큰 폐기
///
/// 토큰의 `jti`는 남은 유효 시간 동안 거부됩니다.
#[post("/logout")]
pub async fn logout(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("유효한 인증 토큰이 필요합니다".to_string()))?;

    SessionService::instance().logout(auth_header).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "로그아웃되었습니다" })))
}
