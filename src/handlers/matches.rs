//! # 매칭 핸들러 (`/api/v1/match`, investor 역할)
//!
//! 점수 산출 엔드포인트는 매칭을 저장하므로 201을 돌려줍니다.
//! 응답의 `created`로 새 매칭인지 기존 매칭의 재계산인지 구분합니다.

use actix_web::{web, HttpResponse, get, patch, post};

use crate::core::errors::AppError;
use crate::domain::dto::matching::{CalculateMatchRequest, UpdateBookmarkRequest};
use crate::domain::entities::parse_object_id;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_payload;
use crate::services::matching::MatchingService;

/// 선호 산업과 투자 단계가 맞는 창업자
#[get("/candidates")]
pub async fn candidates(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let founders = MatchingService::instance().candidates(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(founders))
}

#[get("/data/{founder_id}")]
pub async fn score_founder(
    user: AuthenticatedUser,
    founder_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let founder_id = parse_object_id(&founder_id)?;

    let result = MatchingService::instance()
        .score_founder(&user.object_id()?, &founder_id)
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[post("/calculate")]
pub async fn calculate(
    user: AuthenticatedUser,
    payload: web::Json<CalculateMatchRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let founder_id = parse_object_id(&payload.founder_id)?;

    let result = MatchingService::instance()
        .score_founder(&user.object_id()?, &founder_id)
        .await?;
    Ok(HttpResponse::Created().json(result))
}

#[patch("/{match_id}/bookmark")]
pub async fn update_bookmark(
    user: AuthenticatedUser,
    match_id: web::Path<String>,
    payload: web::Json<UpdateBookmarkRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let match_id = parse_object_id(&match_id)?;
    let request = payload.into_inner();

    let updated = MatchingService::instance()
        .update_bookmark(&match_id, &user.object_id()?, request.bookmark, request.tags)
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}
