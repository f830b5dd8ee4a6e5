//! # 알림 핸들러 (`/api/v1/notifications`, 인증 사용자)

use actix_web::{web, HttpResponse, delete, get, patch};

use crate::core::errors::AppError;
use crate::domain::dto::notifications::{MarkNotificationRequest, NotificationQuery};
use crate::domain::entities::parse_object_id;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::notifications::NotificationService;

#[get("")]
pub async fn list_notifications(
    user: AuthenticatedUser,
    query: web::Query<NotificationQuery>,
) -> Result<HttpResponse, AppError> {
    let response = NotificationService::instance()
        .list(&user.object_id()?, query.unread_only.unwrap_or(false))
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/{notification_id}")]
pub async fn mark_notification(
    user: AuthenticatedUser,
    notification_id: web::Path<String>,
    payload: web::Json<MarkNotificationRequest>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&notification_id)?;

    let notification = NotificationService::instance()
        .mark(&id, &user.object_id()?, payload.read)
        .await?;
    Ok(HttpResponse::Ok().json(notification))
}

#[delete("/{notification_id}")]
pub async fn delete_notification(
    user: AuthenticatedUser,
    notification_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&notification_id)?;

    NotificationService::instance().delete(&id, &user.object_id()?).await?;
    Ok(HttpResponse::NoContent().finish())
}
