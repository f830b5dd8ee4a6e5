//! # 지원금 핸들러 (`/api/v1/grants`, 인증 사용자)
//!
//! 스코프는 인증만 요구하고, 작성/심사(admin)와 신청(founder)은 핸들러에서 역할을 확인합니다.

use actix_web::{web, HttpResponse, delete, get, patch, post, put};

use crate::core::errors::AppError;
use crate::domain::dto::grants::{
    ApplyGrantRequest, CreateGrantRequest, GrantQuery, ReviewApplicationRequest, UpdateGrantRequest,
};
use crate::domain::entities::parse_object_id;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::{require_role, validate_payload};
use crate::services::grants::GrantService;

#[get("")]
pub async fn list_grants(query: web::Query<GrantQuery>) -> Result<HttpResponse, AppError> {
    let grants = GrantService::instance().list(&query).await?;
    Ok(HttpResponse::Ok().json(grants))
}

#[get("/{grant_id}")]
pub async fn get_grant(grant_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let grant = GrantService::instance().get(&parse_object_id(&grant_id)?).await?;
    Ok(HttpResponse::Ok().json(grant))
}

#[post("")]
pub async fn create_grant(
    user: AuthenticatedUser,
    payload: web::Json<CreateGrantRequest>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, "admin")?;
    validate_payload(&*payload)?;

    let grant = GrantService::instance().create(&user.object_id()?, &payload).await?;
    Ok(HttpResponse::Created().json(grant))
}

#[put("/{grant_id}")]
pub async fn update_grant(
    user: AuthenticatedUser,
    grant_id: web::Path<String>,
    payload: web::Json<UpdateGrantRequest>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, "admin")?;
    validate_payload(&*payload)?;

    let grant = GrantService::instance()
        .update(&parse_object_id(&grant_id)?, &payload)
        .await?;
    Ok(HttpResponse::Ok().json(grant))
}

#[delete("/{grant_id}")]
pub async fn delete_grant(
    user: AuthenticatedUser,
    grant_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, "admin")?;

    GrantService::instance().delete(&parse_object_id(&grant_id)?).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 창업자 신청 (공고당 1회)
#[post("/{grant_id}/apply")]
pub async fn apply(
    user: AuthenticatedUser,
    grant_id: web::Path<String>,
    payload: web::Json<ApplyGrantRequest>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, "founder")?;
    validate_payload(&*payload)?;

    let application = GrantService::instance()
        .apply(&parse_object_id(&grant_id)?, &user.object_id()?, &payload)
        .await?;
    Ok(HttpResponse::Created().json(application))
}

#[get("/{grant_id}/applications")]
pub async fn list_applications(
    user: AuthenticatedUser,
    grant_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, "admin")?;

    let applications = GrantService::instance()
        .grant_applications(&parse_object_id(&grant_id)?)
        .await?;
    Ok(HttpResponse::Ok().json(applications))
}

#[patch("/{grant_id}/applications/{application_id}")]
pub async fn review_application(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<ReviewApplicationRequest>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, "admin")?;
    validate_payload(&*payload)?;

    let (grant_id, application_id) = path.into_inner();
    let application = GrantService::instance()
        .review(&parse_object_id(&grant_id)?, &parse_object_id(&application_id)?, &payload)
        .await?;
    Ok(HttpResponse::Ok().json(application))
}
