//! # 딜 플로우 서비스
//!
//! 투자자가 소유한 딜과 그 안의 미팅, 문서, 태스크, 노트를 다룹니다.
//! 모든 조회와 변경은 `(딜 ID, 투자자 ID)`로 소유권을 확인하며, 다른 투자자의 딜은 `NotFound`입니다.
//!
//! 창업자 알림과 활동 로그는 부수 효과라서 실패해도 요청은 성공합니다.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use mongodb::bson::{oid::ObjectId, DateTime};
use singleton_macro::service;

use crate::{
    clients::{CalendarClient, CalendarEvent, MeetingScheduler},
    core::errors::AppError,
    domain::{
        dto::deals::{
            AddDealRequest, AddDocumentRequest, AddNoteRequest, CreateMeetingRequest, CreateTaskRequest,
            DealListItem, DealResponse, MeetingOverview, TaskOverview,
        },
        entities::{
            profiles::Founder,
            deals::{Deal, DealDocument, DealStage, DealStatus, Meeting, MeetingStatus, Note, Task, TaskPriority},
            matching::Activity,
            notifications::Notification,
            parse_object_id, to_bson_datetime,
        },
    },
    repositories::{
        deals::DealRepository,
        matching::ActivityRepository,
        notifications::NotificationRepository,
        profiles::FounderRepository,
    },
    services::deals::overview::{collect_tasks, upcoming_meetings},
};

#[service(name = "dealflow")]
pub struct DealFlowService {
    deal_repo: Arc<DealRepository>,
    founder_repo: Arc<FounderRepository>,
    activity_repo: Arc<ActivityRepository>,
    notification_repo: Arc<NotificationRepository>,
    calendar_client: Arc<CalendarClient>,
}

fn deal_not_found() -> AppError {
    AppError::NotFound("딜을 찾을 수 없습니다".to_string())
}

fn found(updated: bool) -> Result<(), AppError> {
    if updated { Ok(()) } else { Err(deal_not_found()) }
}

/// 딜 생성에 필요한 저장소 연산
#[async_trait]
pub(crate) trait DealStore: Send + Sync {
    async fn exists_for_pair(&self, investor_id: &ObjectId, startup_id: &ObjectId) -> Result<bool, AppError>;

    async fn create(&self, deal: Deal) -> Result<Deal, AppError>;
}

#[async_trait]
impl DealStore for DealRepository {
    async fn exists_for_pair(&self, investor_id: &ObjectId, startup_id: &ObjectId) -> Result<bool, AppError> {
        DealRepository::exists_for_pair(self, investor_id, startup_id).await
    }

    async fn create(&self, deal: Deal) -> Result<Deal, AppError> {
        DealRepository::create(self, deal).await
    }
}

/// 투자자-스타트업 쌍당 딜 하나만 생성
///
/// 요청 금액이 없으면 창업자 프로필의 `fund_required`, 그마저 없으면 0.
pub(crate) async fn open_deal(
    store: &dyn DealStore,
    investor_id: &ObjectId,
    founder: &Founder,
    request: &AddDealRequest,
) -> Result<Deal, AppError> {
    let startup_id = founder.user_id;

    if store.exists_for_pair(investor_id, &startup_id).await? {
        return Err(AppError::ConflictError("이미 딜 플로우에 추가된 스타트업입니다".to_string()));
    }

    let fund_required = request
        .fund_required
        .or(founder.fund_required)
        .unwrap_or(0.0);

    store
        .create(Deal::new(*investor_id, startup_id, request.match_score.unwrap_or(0.0), fund_required))
        .await
}

/// 캘린더 이벤트를 만든 뒤 참여 URL이 담긴 미팅 생성. 캘린더 실패 시 미팅은 만들어지지 않습니다.
pub(crate) async fn book_meeting(
    scheduler: &dyn MeetingScheduler,
    request: &CreateMeetingRequest,
) -> Result<Meeting, AppError> {
    let title = request.title.trim().to_string();

    let meet_url = scheduler
        .create_event(&CalendarEvent {
            title: title.clone(),
            start_time: request.start_time,
            end_time: request.end_time,
            description: request.notes.clone(),
        })
        .await?;

    Ok(Meeting::new(
        title,
        to_bson_datetime(request.start_time),
        to_bson_datetime(request.end_time),
        request.notes.clone().unwrap_or_default(),
        Some(meet_url),
    ))
}

impl DealFlowService {
    async fn record_activity(&self, activity: Activity) {
        if let Err(e) = self.activity_repo.insert(&activity).await {
            warn!("활동 기록 실패 (투자자 {}): {}", activity.investor_id, e);
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notification_repo.insert(&notification).await {
            warn!("알림 전송 실패 (수신자 {}): {}", notification.recipient_id, e);
        }
    }

    async fn owned_deal(&self, deal_id: &ObjectId, investor_id: &ObjectId) -> Result<Deal, AppError> {
        self.deal_repo
            .find_owned(deal_id, investor_id)
            .await?
            .ok_or_else(deal_not_found)
    }

    /// 스타트업을 딜 플로우에 추가
    ///
    /// 같은 스타트업이 이미 있으면 `ConflictError`. 사전 조회를 통과한 동시 요청은
    /// 유니크 인덱스에서 같은 오류가 됩니다.
    pub async fn add(&self, investor_id: &ObjectId, request: &AddDealRequest) -> Result<DealResponse, AppError> {
        let startup_id = parse_object_id(&request.startup_id)?;

        let founder = self.founder_repo
            .find_by_user_id(&startup_id)
            .await?
            .ok_or_else(|| AppError::NotFound("창업자 프로필을 찾을 수 없습니다".to_string()))?;

        let deal = open_deal(self.deal_repo.as_ref(), investor_id, &founder, request).await?;

        info!("딜 추가: 투자자 {} → 스타트업 {}", investor_id, startup_id);

        self.notify(Notification::deal_added(startup_id)).await;
        self.record_activity(Activity::deal_added(*investor_id)).await;

        Ok(DealResponse::from(deal))
    }

    /// 창업자 이름/이메일/스타트업 이름이 포함된 딜 목록
    pub async fn list(&self, investor_id: &ObjectId) -> Result<Vec<DealListItem>, AppError> {
        let enriched = self.deal_repo.find_enriched(investor_id, None).await?;

        Ok(enriched
            .into_iter()
            .map(|e| DealListItem {
                deal: DealResponse::from(e.deal),
                founder_name: e.founder_name,
                founder_email: e.founder_email,
                startup_name: e.startup_name,
            })
            .collect())
    }

    pub async fn get(&self, deal_id: &ObjectId, investor_id: &ObjectId) -> Result<DealResponse, AppError> {
        self.owned_deal(deal_id, investor_id).await.map(DealResponse::from)
    }

    pub async fn delete(&self, deal_id: &ObjectId, investor_id: &ObjectId) -> Result<(), AppError> {
        found(self.deal_repo.delete_owned(deal_id, investor_id).await?)?;
        info!("딜 삭제: {} (투자자 {})", deal_id, investor_id);
        Ok(())
    }

    pub async fn update_stage(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        stage: &str,
    ) -> Result<DealResponse, AppError> {
        let stage = DealStage::parse(stage)?;

        let deal = self.deal_repo
            .update_stage(deal_id, investor_id, stage)
            .await?
            .ok_or_else(deal_not_found)?;

        self.record_activity(Activity::stage_changed(*investor_id, stage.as_str())).await;
        Ok(DealResponse::from(deal))
    }

    pub async fn update_status(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        status: &str,
    ) -> Result<DealResponse, AppError> {
        let status = DealStatus::parse(status)?;

        self.deal_repo
            .update_status(deal_id, investor_id, status)
            .await?
            .map(DealResponse::from)
            .ok_or_else(deal_not_found)
    }

    /// 캘린더 이벤트를 만들고 미팅 URL과 함께 딜에 추가
    pub async fn schedule_meeting(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        request: &CreateMeetingRequest,
    ) -> Result<DealResponse, AppError> {
        let deal = self.owned_deal(deal_id, investor_id).await?;

        let meeting = book_meeting(self.calendar_client.as_ref(), request).await?;

        found(self.deal_repo.push_meeting(deal_id, investor_id, &meeting).await?)?;

        self.record_activity(Activity::meeting_scheduled(*investor_id, &meeting.title)).await;
        self.notify(Notification::meeting_scheduled(deal.startup_id, &meeting.title)).await;

        self.get(deal_id, investor_id).await
    }

    pub async fn add_document(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        request: &AddDocumentRequest,
    ) -> Result<DealResponse, AppError> {
        let document = DealDocument::new(
            request.name.trim().to_string(),
            request.url.trim().to_string(),
            request.doc_type.trim().to_string(),
        );

        found(self.deal_repo.push_document(deal_id, investor_id, &document).await?)?;
        self.get(deal_id, investor_id).await
    }

    pub async fn add_task(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        request: &CreateTaskRequest,
    ) -> Result<DealResponse, AppError> {
        let priority = match request.priority.as_deref() {
            Some(raw) => TaskPriority::parse(raw)?,
            None => TaskPriority::Medium,
        };

        let task = Task::new(
            request.title.trim().to_string(),
            request.due_date.map(to_bson_datetime),
            priority,
        );

        found(self.deal_repo.push_task(deal_id, investor_id, &task).await?)?;
        self.get(deal_id, investor_id).await
    }

    pub async fn add_note(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        request: &AddNoteRequest,
    ) -> Result<DealResponse, AppError> {
        let note = Note::new(request.content.trim().to_string());

        found(self.deal_repo.push_note(deal_id, investor_id, &note).await?)?;
        self.get(deal_id, investor_id).await
    }

    pub async fn set_task_completed(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        task_id: &ObjectId,
        completed: bool,
    ) -> Result<DealResponse, AppError> {
        self.deal_repo
            .set_task_completed(deal_id, investor_id, task_id, completed)
            .await?
            .map(DealResponse::from)
            .ok_or_else(|| AppError::NotFound("태스크를 찾을 수 없습니다".to_string()))
    }

    pub async fn set_meeting_status(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        meeting_id: &ObjectId,
        status: &str,
    ) -> Result<DealResponse, AppError> {
        let status = MeetingStatus::parse(status)?;

        self.deal_repo
            .set_meeting_status(deal_id, investor_id, meeting_id, status)
            .await?
            .map(DealResponse::from)
            .ok_or_else(|| AppError::NotFound("미팅을 찾을 수 없습니다".to_string()))
    }

    /// 투자자의 모든 딜에 걸친 태스크
    pub async fn tasks(&self, investor_id: &ObjectId) -> Result<Vec<TaskOverview>, AppError> {
        let deals = self.deal_repo.find_by_investor(investor_id).await?;
        Ok(collect_tasks(deals))
    }

    /// 투자자의 모든 딜에 걸친 예정 미팅
    pub async fn upcoming_meetings(&self, investor_id: &ObjectId) -> Result<Vec<MeetingOverview>, AppError> {
        let deals = self.deal_repo.find_by_investor(investor_id).await?;
        Ok(upcoming_meetings(deals, DateTime::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::{Duration, Utc};

    #[derive(Default)]
    struct MemoryDeals {
        deals: Mutex<Vec<Deal>>,
    }

    #[async_trait]
    impl DealStore for MemoryDeals {
        async fn exists_for_pair(&self, investor_id: &ObjectId, startup_id: &ObjectId) -> Result<bool, AppError> {
            Ok(self.deals.lock().unwrap()
                .iter()
                .any(|d| d.investor_id == *investor_id && d.startup_id == *startup_id))
        }

        async fn create(&self, mut deal: Deal) -> Result<Deal, AppError> {
            deal.id = Some(ObjectId::new());
            self.deals.lock().unwrap().push(deal.clone());
            Ok(deal)
        }
    }

    struct FixedCalendar {
        result: Result<String, String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MeetingScheduler for FixedCalendar {
        async fn create_event(&self, event: &CalendarEvent) -> Result<String, AppError> {
            self.calls.lock().unwrap().push(event.title.clone());
            self.result.clone().map_err(AppError::ExternalServiceError)
        }
    }

    fn add_request(fund_required: Option<f64>) -> AddDealRequest {
        AddDealRequest {
            startup_id: ObjectId::new().to_hex(),
            match_score: Some(81.5),
            fund_required,
        }
    }

    fn meeting_request() -> CreateMeetingRequest {
        let start = Utc::now() + Duration::days(1);
        CreateMeetingRequest {
            title: "  Partner meeting ".to_string(),
            start_time: start,
            end_time: start + Duration::hours(1),
            notes: Some("Q2 follow-up".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_adding_same_startup_twice_conflicts() {
        let store = MemoryDeals::default();
        let investor_id = ObjectId::new();
        let founder = Founder::new_empty(ObjectId::new());

        let first = open_deal(&store, &investor_id, &founder, &add_request(Some(250000.0))).await.unwrap();
        assert_eq!(first.startup_id, founder.user_id);
        assert_eq!(first.fund_required, 250000.0);

        let second = open_deal(&store, &investor_id, &founder, &add_request(None)).await;
        assert!(matches!(second, Err(AppError::ConflictError(_))));
        assert_eq!(store.deals.lock().unwrap().len(), 1);

        // 다른 투자자는 같은 스타트업을 추가할 수 있음
        open_deal(&store, &ObjectId::new(), &founder, &add_request(None)).await.unwrap();
        assert_eq!(store.deals.lock().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_fund_required_falls_back_to_founder_then_zero() {
        let store = MemoryDeals::default();
        let investor_id = ObjectId::new();

        let mut funded = Founder::new_empty(ObjectId::new());
        funded.fund_required = Some(750000.0);
        let deal = open_deal(&store, &investor_id, &funded, &add_request(None)).await.unwrap();
        assert_eq!(deal.fund_required, 750000.0);

        let unfunded = Founder::new_empty(ObjectId::new());
        let deal = open_deal(&store, &investor_id, &unfunded, &add_request(None)).await.unwrap();
        assert_eq!(deal.fund_required, 0.0);
    }

    #[actix_web::test]
    async fn test_book_meeting_uses_calendar_url() {
        let calendar = FixedCalendar {
            result: Ok("https://meet.example.com/abc-defg-hij".to_string()),
            calls: Mutex::new(Vec::new()),
        };

        let meeting = book_meeting(&calendar, &meeting_request()).await.unwrap();
        assert_eq!(meeting.title, "Partner meeting");
        assert_eq!(meeting.meet_url.as_deref(), Some("https://meet.example.com/abc-defg-hij"));
        assert_eq!(meeting.notes, "Q2 follow-up");
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert_eq!(*calendar.calls.lock().unwrap(), vec!["Partner meeting".to_string()]);
    }

    #[actix_web::test]
    async fn test_book_meeting_fails_when_calendar_fails() {
        let calendar = FixedCalendar {
            result: Err("503".to_string()),
            calls: Mutex::new(Vec::new()),
        };

        let result = book_meeting(&calendar, &meeting_request()).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
