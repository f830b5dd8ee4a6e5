//! 딜이 소유하는 하위 항목 (미팅, 문서, 태스크, 노트)
//!
//! 독립적인 생명주기가 없으며 항상 부모 딜 문서의 배열에 들어 있습니다.
//! 개별 항목은 `id`로 식별되고, 상태 갱신은 `딜 ID + 항목 ID` 조건의 위치 연산자로 수행됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl MeetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeetingStatus::Scheduled => "scheduled",
            MeetingStatus::Completed => "completed",
            MeetingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "scheduled" => Ok(MeetingStatus::Scheduled),
            "completed" => Ok(MeetingStatus::Completed),
            "cancelled" => Ok(MeetingStatus::Cancelled),
            other => Err(AppError::ValidationError(format!("유효하지 않은 미팅 상태입니다: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: ObjectId,
    pub title: String,
    pub start_time: DateTime,
    pub end_time: DateTime,
    #[serde(default)]
    pub notes: String,
    /// 캘린더 연동이 돌려준 참여 URL
    pub meet_url: Option<String>,
    pub status: MeetingStatus,
    pub created_at: DateTime,
}

impl Meeting {
    pub fn new(title: String, start_time: DateTime, end_time: DateTime, notes: String, meet_url: Option<String>) -> Self {
        Self {
            id: ObjectId::new(),
            title,
            start_time,
            end_time,
            notes,
            meet_url,
            status: MeetingStatus::Scheduled,
            created_at: DateTime::now(),
        }
    }
}

/// 딜 관련 문서 참조 (업로드 자체는 외부에서 처리)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealDocument {
    pub id: ObjectId,
    pub name: String,
    pub url: String,
    pub doc_type: String,
    pub date: DateTime,
}

impl DealDocument {
    pub fn new(name: String, url: String, doc_type: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            url,
            doc_type,
            date: DateTime::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(AppError::ValidationError(format!("유효하지 않은 우선순위입니다: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: ObjectId,
    pub title: String,
    pub due_date: Option<DateTime>,
    pub priority: TaskPriority,
    pub completed: bool,
    pub created_at: DateTime,
}

impl Task {
    /// 새 태스크는 항상 미완료 상태로 시작합니다.
    pub fn new(title: String, due_date: Option<DateTime>, priority: TaskPriority) -> Self {
        Self {
            id: ObjectId::new(),
            title,
            due_date,
            priority,
            completed: false,
            created_at: DateTime::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ObjectId,
    pub content: String,
    pub created_at: DateTime,
}

impl Note {
    pub fn new(content: String) -> Self {
        Self {
            id: ObjectId::new(),
            content,
            created_at: DateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_open() {
        let task = Task::new("Review cap table".into(), None, TaskPriority::High);
        assert!(!task.completed);
    }

    #[test]
    fn test_new_meeting_is_scheduled() {
        let now = DateTime::now();
        let meeting = Meeting::new("Intro".into(), now, now, String::new(), None);
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
    }

    #[test]
    fn test_priority_and_meeting_status_parse() {
        assert_eq!(TaskPriority::parse("medium").unwrap(), TaskPriority::Medium);
        assert!(TaskPriority::parse("urgent").is_err());
        assert_eq!(MeetingStatus::parse("completed").unwrap(), MeetingStatus::Completed);
        assert!(MeetingStatus::parse("done").is_err());
    }
}
