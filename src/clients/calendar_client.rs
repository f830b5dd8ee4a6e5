//! # 캘린더 서비스 클라이언트
//!
//! 딜 미팅을 만들 때 외부 캘린더 서비스에 이벤트를 생성하고 참여 URL을 받아옵니다.
//!
//! ## 요청/응답 계약
//!
//! ```text
//! POST {CALENDAR_SERVICE_URL}
//! {
//!   "title": "Partner meeting",
//!   "start_time": "2024-05-01T09:00:00Z",
//!   "end_time": "2024-05-01T10:00:00Z",
//!   "description": "Q2 follow-up"
//! }
//!
//! 200 OK
//! { "meet_url": "https://meet.example.com/abc-defg-hij" }
//! ```
//!
//! 호출 실패, 2xx 이외 응답, 빈 URL은 모두 `ExternalServiceError`이며 미팅은 저장되지 않습니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::core::errors::AppError;

/// 캘린더 이벤트 생성 요청
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalendarEventResponse {
    meet_url: String,
}

/// 미팅 이벤트 생성 경계. 성공하면 참여 URL을 반환합니다.
#[async_trait]
pub trait MeetingScheduler: Send + Sync {
    async fn create_event(&self, event: &CalendarEvent) -> Result<String, AppError>;
}

/// HTTP 기반 캘린더 클라이언트
pub struct CalendarClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CalendarClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// `CALENDAR_SERVICE_URL` 설정으로 생성
    pub fn from_env() -> Self {
        Self::new(CalendarConfig::endpoint())
    }
}

fn check_window(event: &CalendarEvent) -> Result<(), AppError> {
    if event.end_time <= event.start_time {
        return Err(AppError::ValidationError(
            "미팅 종료 시간은 시작 시간 이후여야 합니다".to_string(),
        ));
    }
    Ok(())
}

fn meet_url_from(response: CalendarEventResponse) -> Result<String, AppError> {
    let url = response.meet_url.trim();
    if url.is_empty() {
        return Err(AppError::ExternalServiceError(
            "캘린더 서비스가 빈 미팅 URL을 반환했습니다".to_string(),
        ));
    }
    Ok(url.to_string())
}

#[async_trait]
impl MeetingScheduler for CalendarClient {
    async fn create_event(&self, event: &CalendarEvent) -> Result<String, AppError> {
        check_window(event)?;

        let response = self.http
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("캘린더 서비스 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "캘린더 서비스 오류 ({}): {}", status, body
            )));
        }

        let parsed = response
            .json::<CalendarEventResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("캘린더 응답 파싱 실패: {}", e)))?;

        let url = meet_url_from(parsed)?;
        log::info!("캘린더 이벤트 생성: {} ({})", event.title, url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(minutes: i64) -> CalendarEvent {
        let start = Utc::now();
        CalendarEvent {
            title: "Intro call".to_string(),
            start_time: start,
            end_time: start + Duration::minutes(minutes),
            description: None,
        }
    }

    #[test]
    fn test_event_wire_shape() {
        let json = serde_json::to_value(event(30)).unwrap();
        assert_eq!(json["title"], "Intro call");
        assert!(json["start_time"].is_string());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_meet_url_from_response() {
        let parsed: CalendarEventResponse =
            serde_json::from_str(r#"{"meet_url": " https://meet.example.com/abc "}"#).unwrap();
        assert_eq!(meet_url_from(parsed).unwrap(), "https://meet.example.com/abc");

        let blank: CalendarEventResponse = serde_json::from_str(r#"{"meet_url": ""}"#).unwrap();
        assert!(matches!(meet_url_from(blank), Err(AppError::ExternalServiceError(_))));

        assert!(serde_json::from_str::<CalendarEventResponse>(r#"{"url": "x"}"#).is_err());
    }

    #[actix_web::test]
    async fn test_unreachable_service_is_upstream_failure() {
        let client = CalendarClient::new("http://127.0.0.1:9/events/");
        let result = client.create_event(&event(30)).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_inverted_range_is_rejected_before_calling() {
        let client = CalendarClient::new("http://127.0.0.1:9/events/");
        let result = client.create_event(&event(-1)).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
