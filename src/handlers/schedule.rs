//! 딜 전체에 걸친 태스크/미팅 목록 (investor 역할)

use actix_web::{HttpResponse, get};

use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::deals::DealFlowService;

/// `GET /api/v1/tasks`
#[get("")]
pub async fn list_tasks(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let tasks = DealFlowService::instance().tasks(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// `GET /api/v1/meetings`
#[get("")]
pub async fn list_meetings(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let meetings = DealFlowService::instance().upcoming_meetings(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(meetings))
}
