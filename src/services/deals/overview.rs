//! 투자자의 모든 딜에 걸친 태스크/미팅 평탄화

use mongodb::bson::DateTime;

use crate::domain::dto::deals::{MeetingOverview, TaskOverview};
use crate::domain::entities::deals::Deal;

/// 미완료 태스크 먼저, 그 안에서 마감일 오름차순 (마감일 없는 태스크는 뒤로)
pub fn collect_tasks(deals: Vec<Deal>) -> Vec<TaskOverview> {
    let mut tasks: Vec<_> = deals
        .into_iter()
        .flat_map(|deal| {
            let deal_id = deal.id;
            let startup_id = deal.startup_id;
            deal.tasks.into_iter().map(move |task| (deal_id, startup_id, task))
        })
        .filter_map(|(deal_id, startup_id, task)| deal_id.map(|id| (id, startup_id, task)))
        .collect();

    tasks.sort_by_key(|(_, _, task)| (task.completed, task.due_date.is_none(), task.due_date));

    tasks
        .into_iter()
        .map(|(deal_id, startup_id, task)| TaskOverview::new(deal_id, startup_id, task))
        .collect()
}

/// `now` 이후 시작하는 예정 미팅 (시작 시간 오름차순)
pub fn upcoming_meetings(deals: Vec<Deal>, now: DateTime) -> Vec<MeetingOverview> {
    let mut meetings: Vec<_> = deals
        .into_iter()
        .filter_map(|deal| deal.id.map(|id| (id, deal.startup_id, deal.meetings)))
        .flat_map(|(deal_id, startup_id, meetings)| {
            meetings.into_iter().map(move |meeting| (deal_id, startup_id, meeting))
        })
        .filter(|(_, _, meeting)| meeting.start_time >= now)
        .collect();

    meetings.sort_by_key(|(_, _, meeting)| meeting.start_time);

    meetings
        .into_iter()
        .map(|(deal_id, startup_id, meeting)| MeetingOverview::new(deal_id, startup_id, meeting))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::deals::{Meeting, Task, TaskPriority};
    use mongodb::bson::oid::ObjectId;

    fn deal() -> Deal {
        let mut deal = Deal::new(ObjectId::new(), ObjectId::new(), 80.0, 100000.0);
        deal.id = Some(ObjectId::new());
        deal
    }

    fn at(millis: i64) -> DateTime {
        DateTime::from_millis(millis)
    }

    #[test]
    fn test_tasks_open_first_then_by_due_date() {
        let mut first = deal();
        let mut done = Task::new("Reference calls".to_string(), Some(at(1_000)), TaskPriority::High);
        done.completed = true;
        first.tasks = vec![
            done,
            Task::new("Review cap table".to_string(), Some(at(5_000)), TaskPriority::Medium),
            Task::new("Someday".to_string(), None, TaskPriority::Low),
        ];

        let mut second = deal();
        second.tasks = vec![Task::new("Term sheet draft".to_string(), Some(at(2_000)), TaskPriority::High)];
        let second_id = second.id.unwrap().to_hex();

        let titles: Vec<_> = collect_tasks(vec![first, second])
            .into_iter()
            .map(|t| (t.task.title, t.deal_id))
            .collect();

        assert_eq!(titles[0], ("Term sheet draft".to_string(), second_id));
        assert_eq!(titles[1].0, "Review cap table");
        assert_eq!(titles[2].0, "Someday");
        assert_eq!(titles[3].0, "Reference calls");
    }

    #[test]
    fn test_upcoming_meetings_skip_past() {
        let mut d = deal();
        d.meetings = vec![
            Meeting::new("Past".to_string(), at(1_000), at(2_000), String::new(), None),
            Meeting::new("Later".to_string(), at(9_000), at(10_000), String::new(), None),
            Meeting::new("Soon".to_string(), at(6_000), at(7_000), String::new(), None),
        ];

        let titles: Vec<_> = upcoming_meetings(vec![d], at(5_000))
            .into_iter()
            .map(|m| m.meeting.title)
            .collect();

        assert_eq!(titles, vec!["Soon".to_string(), "Later".to_string()]);
    }
}
