//! # 딜 플로우 핸들러 (`/api/v1/dealflow`, investor 역할)
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `` | 딜 추가 | 201 (중복 409) |
//! | `GET` | `` | 딜 목록 | 200 |
//! | `GET` | `/{id}` | 딜 조회 | 200 |
//! | `DELETE` | `/{id}` | 딜 삭제 | 204 |
//! | `PATCH` | `/{id}/stage` | 단계 변경 | 200 |
//! | `PATCH` | `/{id}/status` | 상태 변경 | 200 |
//! | `POST` | `/{id}/meetings` | 미팅 예약 | 201 |
//! | `PATCH` | `/{id}/meetings/{meeting_id}` | 미팅 상태 변경 | 200 |
//! | `POST` | `/{id}/documents` | 문서 추가 | 201 |
//! | `POST` | `/{id}/tasks` | 태스크 추가 | 201 |
//! | `PATCH` | `/{id}/tasks/{task_id}` | 태스크 완료 여부 | 200 |
//! | `POST` | `/{id}/notes` | 노트 추가 | 201 |
//! | `POST` | `/{id}/invest` | 투자 실행 | 201 |

use actix_web::{web, HttpResponse, delete, get, patch, post};
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::dto::deals::{
    AddDealRequest, AddDocumentRequest, AddNoteRequest, CreateMeetingRequest, CreateTaskRequest, InvestRequest,
    UpdateMeetingStatusRequest, UpdateStageRequest, UpdateStatusRequest, UpdateTaskRequest,
};
use crate::domain::entities::parse_object_id;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_payload;
use crate::services::deals::{DealFlowService, InvestmentService};

/// (딜 ID, 투자자 ID)
fn ids(user: &AuthenticatedUser, deal_id: &str) -> Result<(ObjectId, ObjectId), AppError> {
    Ok((parse_object_id(deal_id)?, user.object_id()?))
}

#[post("")]
pub async fn add_deal(
    user: AuthenticatedUser,
    payload: web::Json<AddDealRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let deal = DealFlowService::instance().add(&user.object_id()?, &payload).await?;
    Ok(HttpResponse::Created().json(deal))
}

#[get("")]
pub async fn list_deals(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let deals = DealFlowService::instance().list(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(deals))
}

#[get("/{deal_id}")]
pub async fn get_deal(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance().get(&deal_id, &investor_id).await?;
    Ok(HttpResponse::Ok().json(deal))
}

#[delete("/{deal_id}")]
pub async fn delete_deal(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    DealFlowService::instance().delete(&deal_id, &investor_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[patch("/{deal_id}/stage")]
pub async fn update_stage(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<UpdateStageRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance()
        .update_stage(&deal_id, &investor_id, &payload.stage)
        .await?;
    Ok(HttpResponse::Ok().json(deal))
}

#[patch("/{deal_id}/status")]
pub async fn update_status(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance()
        .update_status(&deal_id, &investor_id, &payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(deal))
}

#[post("/{deal_id}/meetings")]
pub async fn schedule_meeting(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<CreateMeetingRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance()
        .schedule_meeting(&deal_id, &investor_id, &payload)
        .await?;
    Ok(HttpResponse::Created().json(deal))
}

#[patch("/{deal_id}/meetings/{meeting_id}")]
pub async fn update_meeting_status(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateMeetingStatusRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, meeting_id) = path.into_inner();
    let (deal_id, investor_id) = ids(&user, &deal_id)?;
    let meeting_id = parse_object_id(&meeting_id)?;

    let deal = DealFlowService::instance()
        .set_meeting_status(&deal_id, &investor_id, &meeting_id, &payload.status)
        .await?;
    Ok(HttpResponse::Ok().json(deal))
}

#[post("/{deal_id}/documents")]
pub async fn add_document(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<AddDocumentRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance()
        .add_document(&deal_id, &investor_id, &payload)
        .await?;
    Ok(HttpResponse::Created().json(deal))
}

#[post("/{deal_id}/tasks")]
pub async fn add_task(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance()
        .add_task(&deal_id, &investor_id, &payload)
        .await?;
    Ok(HttpResponse::Created().json(deal))
}

#[patch("/{deal_id}/tasks/{task_id}")]
pub async fn update_task(
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let (deal_id, task_id) = path.into_inner();
    let (deal_id, investor_id) = ids(&user, &deal_id)?;
    let task_id = parse_object_id(&task_id)?;

    let deal = DealFlowService::instance()
        .set_task_completed(&deal_id, &investor_id, &task_id, payload.completed)
        .await?;
    Ok(HttpResponse::Ok().json(deal))
}

#[post("/{deal_id}/notes")]
pub async fn add_note(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<AddNoteRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let deal = DealFlowService::instance()
        .add_note(&deal_id, &investor_id, &payload)
        .await?;
    Ok(HttpResponse::Created().json(deal))
}

#[post("/{deal_id}/invest")]
pub async fn invest(
    user: AuthenticatedUser,
    deal_id: web::Path<String>,
    payload: web::Json<InvestRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let (deal_id, investor_id) = ids(&user, &deal_id)?;

    let investment = InvestmentService::instance()
        .invest(&deal_id, &investor_id, payload.amount)
        .await?;
    Ok(HttpResponse::Created().json(investment))
}
