//! 딜 플로우 응답 DTO

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::deals::{
    Deal, DealDocument, DealStage, DealStatus, Investment, Meeting, MeetingStatus, Note, Task, TaskPriority,
};
use crate::domain::entities::to_chrono_datetime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingResponse {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub notes: String,
    pub meet_url: Option<String>,
    pub status: MeetingStatus,
}

impl From<Meeting> for MeetingResponse {
    fn from(meeting: Meeting) -> Self {
        Self {
            id: meeting.id.to_hex(),
            title: meeting.title,
            start_time: to_chrono_datetime(meeting.start_time),
            end_time: to_chrono_datetime(meeting.end_time),
            notes: meeting.notes,
            meet_url: meeting.meet_url,
            status: meeting.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub name: String,
    pub url: String,
    pub doc_type: String,
    pub date: DateTime<Utc>,
}

impl From<DealDocument> for DocumentResponse {
    fn from(document: DealDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            name: document.name,
            url: document.url,
            doc_type: document.doc_type,
            date: to_chrono_datetime(document.date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub completed: bool,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_hex(),
            title: task.title,
            due_date: task.due_date.map(to_chrono_datetime),
            priority: task.priority,
            completed: task.completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.to_hex(),
            content: note.content,
            created_at: to_chrono_datetime(note.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealResponse {
    pub id: String,
    pub investor_id: String,
    pub startup_id: String,
    pub stage: DealStage,
    pub status: DealStatus,
    pub match_score: f64,
    pub fund_required: f64,
    pub meetings: Vec<MeetingResponse>,
    pub documents: Vec<DocumentResponse>,
    pub tasks: Vec<TaskResponse>,
    pub notes: Vec<NoteResponse>,
    pub added_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn convert_all<T, R: From<T>>(items: Vec<T>) -> Vec<R> {
    items.into_iter().map(R::from).collect()
}

impl From<Deal> for DealResponse {
    fn from(deal: Deal) -> Self {
        Self {
            id: deal.id.map(|id| id.to_hex()).unwrap_or_default(),
            investor_id: deal.investor_id.to_hex(),
            startup_id: deal.startup_id.to_hex(),
            stage: deal.stage,
            status: deal.status,
            match_score: deal.match_score,
            fund_required: deal.fund_required,
            meetings: convert_all(deal.meetings),
            documents: convert_all(deal.documents),
            tasks: convert_all(deal.tasks),
            notes: convert_all(deal.notes),
            added_date: to_chrono_datetime(deal.added_date),
            updated_at: to_chrono_datetime(deal.updated_at),
        }
    }
}

/// 딜 목록 항목 (창업자 정보 포함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealListItem {
    #[serde(flatten)]
    pub deal: DealResponse,
    pub founder_name: Option<String>,
    pub founder_email: Option<String>,
    pub startup_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentResponse {
    pub id: String,
    pub deal_id: String,
    pub investor_id: String,
    pub founder_id: String,
    pub amount: f64,
    pub investment_date: DateTime<Utc>,
    /// 투자 반영 후 딜의 남은 모집 금액
    pub remaining_fund_required: f64,
}

impl InvestmentResponse {
    pub fn new(investment: Investment, remaining_fund_required: f64) -> Self {
        Self {
            id: investment.id.map(|id| id.to_hex()).unwrap_or_default(),
            deal_id: investment.deal_id.to_hex(),
            investor_id: investment.investor_id.to_hex(),
            founder_id: investment.founder_id.to_hex(),
            amount: investment.amount,
            investment_date: to_chrono_datetime(investment.investment_date),
            remaining_fund_required,
        }
    }
}

/// 투자자의 모든 딜에 걸친 태스크 목록 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOverview {
    pub deal_id: String,
    pub startup_id: String,
    #[serde(flatten)]
    pub task: TaskResponse,
}

/// 투자자의 모든 딜에 걸친 미팅 목록 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingOverview {
    pub deal_id: String,
    pub startup_id: String,
    #[serde(flatten)]
    pub meeting: MeetingResponse,
}

impl TaskOverview {
    pub fn new(deal_id: ObjectId, startup_id: ObjectId, task: Task) -> Self {
        Self {
            deal_id: deal_id.to_hex(),
            startup_id: startup_id.to_hex(),
            task: TaskResponse::from(task),
        }
    }
}

impl MeetingOverview {
    pub fn new(deal_id: ObjectId, startup_id: ObjectId, meeting: Meeting) -> Self {
        Self {
            deal_id: deal_id.to_hex(),
            startup_id: startup_id.to_hex(),
            meeting: MeetingResponse::from(meeting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_response_uses_hex_ids_and_wire_enums() {
        let mut deal = Deal::new(ObjectId::new(), ObjectId::new(), 64.0, 1000.0);
        deal.id = Some(ObjectId::new());
        deal.notes.push(Note::new("first look".to_string()));

        let json = serde_json::to_value(DealResponse::from(deal.clone())).unwrap();
        assert_eq!(json["id"], deal.id.unwrap().to_hex());
        assert_eq!(json["startup_id"], deal.startup_id.to_hex());
        assert_eq!(json["stage"], "screening");
        assert_eq!(json["status"], "active");
        assert_eq!(json["notes"][0]["content"], "first look");
    }

    #[test]
    fn test_list_item_flattens_deal() {
        let deal = Deal::new(ObjectId::new(), ObjectId::new(), 0.0, 0.0);
        let item = DealListItem {
            deal: DealResponse::from(deal),
            founder_name: Some("Grace Hopper".to_string()),
            founder_email: None,
            startup_name: Some("Acme".to_string()),
        };

        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["stage"], "screening");
        assert_eq!(json["founder_name"], "Grace Hopper");
    }
}
