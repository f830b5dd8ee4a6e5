//! # 창업자 핸들러 (`/api/v1/founder`, founder 역할)

use actix_web::{web, HttpResponse, get, put};

use crate::core::errors::AppError;
use crate::domain::dto::profiles::UpdateFounderRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_payload;
use crate::services::dashboard::FounderDashboardService;
use crate::services::grants::GrantService;
use crate::services::profiles::ProfileService;

#[get("/profile")]
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = ProfileService::instance().founder(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateFounderRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let profile = ProfileService::instance()
        .update_founder(&user.object_id()?, &payload)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 모금 현황과 투자자 관심도
#[get("/dashboard")]
pub async fn dashboard(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let dashboard = FounderDashboardService::instance().dashboard(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// 내가 신청한 지원금 목록
#[get("/grant-applications")]
pub async fn grant_applications(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let applications = GrantService::instance()
        .founder_applications(&user.object_id()?)
        .await?;
    Ok(HttpResponse::Ok().json(applications))
}
