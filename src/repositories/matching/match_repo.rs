//! # 매칭 리포지토리
//!
//! `matches` 컬렉션은 `(investor_id, founder_id)` 쌍마다 문서 하나만 가집니다.
//!
//! ## 점수 저장
//!
//! 점수 저장은 단일 `findOneAndUpdate` 업서트입니다.
//!
//! ```text
//! filter        { investor_id, founder_id }
//! $setOnInsert  { _id: <새로 만든 ObjectId>, created_at, tags: [], bookmark: false }
//! $set          { match_percentage, updated_at }
//! ```
//!
//! 반환된 문서의 `_id`가 미리 만든 ID와 같으면 이번 호출이 삽입한 것입니다.
//! 동시에 두 요청이 삽입을 시도해 유니크 인덱스 위반이 나면 한 번 더 시도하며,
//! 그때는 기존 문서를 갱신하게 됩니다.

use std::future::Future;
use std::sync::Arc;

use futures_util::TryStreamExt;
use log::debug;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::matching::Match,
    repositories::is_duplicate_key,
};

/// 점수 저장 결과
#[derive(Debug, Clone)]
pub struct StoredMatch {
    pub record: Match,
    pub created: bool,
}

#[repository(name = "match", collection = "matches")]
pub struct MatchRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn score_filter(investor_id: &ObjectId, founder_id: &ObjectId) -> Document {
    doc! { "investor_id": investor_id, "founder_id": founder_id }
}

/// 삽입 시에만 `candidate_id`와 생성 필드를 쓰고, 점수는 항상 덮어씀
fn score_update(candidate_id: ObjectId, match_percentage: f64, now: DateTime) -> Document {
    doc! {
        "$setOnInsert": {
            "_id": candidate_id,
            "created_at": now,
            "tags": [],
            "bookmark": false,
        },
        "$set": {
            "match_percentage": match_percentage,
            "updated_at": now,
        },
    }
}

/// 업서트 결과의 `_id`가 미리 만든 ID와 같을 때만 새로 삽입된 것
fn stored_match(record: Option<Match>, candidate_id: ObjectId) -> Result<StoredMatch, AppError> {
    let record = record
        .ok_or_else(|| AppError::InternalError("매칭 업서트 결과가 비어 있습니다".to_string()))?;
    let created = record.id == Some(candidate_id);

    Ok(StoredMatch { record, created })
}

/// 중복 키 오류면 한 번 더 시도
async fn retry_on_duplicate<T, F, Fut>(mut attempt: F) -> Result<T, mongodb::error::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, mongodb::error::Error>>,
{
    match attempt().await {
        Err(e) if is_duplicate_key(&e) => {
            debug!("매칭 업서트 경합 발생, 재시도");
            attempt().await
        }
        other => other,
    }
}

impl MatchRepository {
    /// 점수 업서트. 기존 문서면 백분율과 갱신 시각만 바뀝니다.
    pub async fn upsert_score(
        &self,
        investor_id: &ObjectId,
        founder_id: &ObjectId,
        match_percentage: f64,
    ) -> Result<StoredMatch, AppError> {
        let candidate_id = ObjectId::new();

        let record = retry_on_duplicate(move || self.try_upsert(candidate_id, investor_id, founder_id, match_percentage))
            .await?;

        stored_match(record, candidate_id)
    }

    async fn try_upsert(
        &self,
        candidate_id: ObjectId,
        investor_id: &ObjectId,
        founder_id: &ObjectId,
        match_percentage: f64,
    ) -> Result<Option<Match>, mongodb::error::Error> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .upsert(true)
            .build();

        self.collection::<Match>()
            .find_one_and_update(
                score_filter(investor_id, founder_id),
                score_update(candidate_id, match_percentage, DateTime::now()),
            )
            .with_options(options)
            .await
    }

    /// 투자자의 매칭 목록 (백분율 내림차순)
    pub async fn find_by_investor(&self, investor_id: &ObjectId) -> Result<Vec<Match>, AppError> {
        let matches = self.collection::<Match>()
            .find(doc! { "investor_id": investor_id })
            .sort(doc! { "match_percentage": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(matches)
    }

    /// 북마크와 태그 변경 (소유 투자자만)
    pub async fn update_bookmark(
        &self,
        match_id: &ObjectId,
        investor_id: &ObjectId,
        bookmark: bool,
        tags: Option<Vec<String>>,
    ) -> Result<Option<Match>, AppError> {
        let mut changes = doc! { "bookmark": bookmark, "updated_at": DateTime::now() };
        if let Some(tags) = tags {
            changes.insert("tags", tags);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self.collection::<Match>()
            .find_one_and_update(
                doc! { "_id": match_id, "investor_id": investor_id },
                doc! { "$set": changes },
            )
            .with_options(options)
            .await?)
    }

    async fn count(&self, filter: Document) -> Result<u64, AppError> {
        Ok(self.collection::<Match>().count_documents(filter).await?)
    }

    pub async fn count_for_founder(&self, founder_id: &ObjectId) -> Result<u64, AppError> {
        self.count(doc! { "founder_id": founder_id }).await
    }

    pub async fn count_for_founder_since(&self, founder_id: &ObjectId, since: DateTime) -> Result<u64, AppError> {
        self.count(doc! { "founder_id": founder_id, "created_at": { "$gte": since } }).await
    }

    pub async fn count_for_founder_above(&self, founder_id: &ObjectId, threshold: f64) -> Result<u64, AppError> {
        self.count(doc! { "founder_id": founder_id, "match_percentage": { "$gt": threshold } }).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "investor_id": 1, "founder_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("investor_founder_unique".to_string())
                .build())
            .build();

        let founder_index = IndexModel::builder()
            .keys(doc! { "founder_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("founder_created_desc".to_string())
                .build())
            .build();

        self.collection::<Match>()
            .create_indexes([pair_index, founder_index])
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::repositories::tests::{duplicate_key_error, io_error};

    fn record(id: ObjectId, match_percentage: f64) -> Match {
        let now = DateTime::now();
        Match {
            id: Some(id),
            founder_id: ObjectId::new(),
            investor_id: ObjectId::new(),
            match_percentage,
            tags: Vec::new(),
            bookmark: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_score_update_overwrites_percentage_only_in_set() {
        let candidate_id = ObjectId::new();
        let update = score_update(candidate_id, 64.46, DateTime::now());

        let on_insert = update.get_document("$setOnInsert").unwrap();
        assert_eq!(on_insert.get_object_id("_id").unwrap(), candidate_id);
        assert!(!on_insert.contains_key("match_percentage"));

        let set = update.get_document("$set").unwrap();
        assert_eq!(set.get_f64("match_percentage").unwrap(), 64.46);
        assert!(!set.contains_key("_id"));
    }

    #[test]
    fn test_second_store_updates_existing_match() {
        let first_candidate = ObjectId::new();
        let first = stored_match(Some(record(first_candidate, 87.31)), first_candidate).unwrap();
        assert!(first.created);

        // 두 번째 저장은 새 후보 ID를 쓰지만 기존 문서가 갱신되어 돌아옴
        let second_candidate = ObjectId::new();
        let second = stored_match(Some(record(first_candidate, 64.46)), second_candidate).unwrap();
        assert!(!second.created);
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.record.match_percentage, 64.46);
    }

    #[test]
    fn test_empty_upsert_result_is_internal_error() {
        assert!(matches!(stored_match(None, ObjectId::new()), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_score_filter_targets_pair() {
        let investor_id = ObjectId::new();
        let founder_id = ObjectId::new();
        let filter = score_filter(&investor_id, &founder_id);
        assert_eq!(filter.get_object_id("investor_id").unwrap(), investor_id);
        assert_eq!(filter.get_object_id("founder_id").unwrap(), founder_id);
        assert_eq!(filter.len(), 2);
    }

    #[actix_web::test]
    async fn test_duplicate_key_race_is_retried_once() {
        let attempts = Cell::new(0);
        let result = retry_on_duplicate(|| {
            attempts.set(attempts.get() + 1);
            let attempt = attempts.get();
            async move {
                if attempt == 1 { Err(duplicate_key_error()) } else { Ok(attempt) }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts.get(), 2);
    }

    #[actix_web::test]
    async fn test_retry_gives_up_after_second_duplicate() {
        let attempts = Cell::new(0);
        let result: Result<u32, _> = retry_on_duplicate(|| {
            attempts.set(attempts.get() + 1);
            async { Err(duplicate_key_error()) }
        })
        .await;

        assert!(is_duplicate_key(&result.unwrap_err()));
        assert_eq!(attempts.get(), 2);
    }

    #[actix_web::test]
    async fn test_other_errors_are_not_retried() {
        let attempts = Cell::new(0);
        let result: Result<u32, _> = retry_on_duplicate(|| {
            attempts.set(attempts.get() + 1);
            async { Err(io_error()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.get(), 1);
    }
}
