//! # 딜 리포지토리
//!
//! `deals` 컬렉션. 모든 변경 연산은 딜 ID와 소유 투자자 ID를 함께 필터로 사용하므로
//! 다른 투자자의 딜은 존재하지 않는 것처럼 보입니다.
//!
//! 미팅/문서/태스크/노트는 딜 문서에 내장된 배열이며 `$push`로 추가되고,
//! 개별 항목 갱신은 `arrayFilters`를 쓰는 필터 위치 연산자(`$[item]`)로 처리합니다.
//!
//! `(investor_id, startup_id)` 유니크 인덱스가 투자자-창업자 쌍당 딜 하나를 보장합니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    ClientSession, IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::redis::RedisClient,
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::deals::{
        Deal, DealDocument, DealStage, DealStatus, Meeting, MeetingStatus, Note, Task,
    },
    repositories::map_write_error,
};

/// 창업자 사용자/프로필 정보가 결합된 딜
#[derive(Debug, Clone)]
pub struct EnrichedDeal {
    pub deal: Deal,
    pub founder_name: Option<String>,
    pub founder_email: Option<String>,
    pub startup_name: Option<String>,
    pub industry: Option<String>,
}

impl EnrichedDeal {
    /// `$lookup` 결과 문서에서 변환. 결합 필드가 없거나 빈 문자열이면 `None`.
    pub fn from_document(document: Document) -> Result<Self, AppError> {
        let text = |key: &str| {
            document
                .get_str(key)
                .ok()
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let founder_name = text("founder_name");
        let founder_email = text("founder_email");
        let startup_name = text("startup_name");
        let industry = text("industry");

        Ok(Self {
            deal: bson::from_document(document)?,
            founder_name,
            founder_email,
            startup_name,
            industry,
        })
    }
}

/// 투자자 딜에 창업자 이름/이메일과 스타트업 정보를 붙이는 파이프라인
fn enrichment_pipeline(investor_id: &ObjectId, limit: Option<i64>) -> Vec<Document> {
    let mut pipeline = vec![
        doc! { "$match": { "investor_id": investor_id } },
        doc! { "$sort": { "updated_at": -1 } },
    ];

    if let Some(limit) = limit {
        pipeline.push(doc! { "$limit": limit });
    }

    pipeline.extend([
        doc! { "$lookup": {
            "from": "users",
            "localField": "startup_id",
            "foreignField": "_id",
            "as": "founder_user",
        } },
        doc! { "$lookup": {
            "from": "founders",
            "localField": "startup_id",
            "foreignField": "user_id",
            "as": "founder_profile",
        } },
        doc! { "$addFields": {
            "founder_name": { "$arrayElemAt": ["$founder_user.name", 0] },
            "founder_email": { "$arrayElemAt": ["$founder_user.email", 0] },
            "startup_name": { "$arrayElemAt": ["$founder_profile.startup_name", 0] },
            "industry": { "$arrayElemAt": ["$founder_profile.industry", 0] },
        } },
        doc! { "$project": { "founder_user": 0, "founder_profile": 0 } },
    ]);

    pipeline
}

fn owned(deal_id: &ObjectId, investor_id: &ObjectId) -> Document {
    doc! { "_id": deal_id, "investor_id": investor_id }
}

#[repository(name = "deal", collection = "deals")]
pub struct DealRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl DealRepository {
    pub async fn create(&self, mut deal: Deal) -> Result<Deal, AppError> {
        let result = self.collection::<Deal>()
            .insert_one(&deal)
            .await
            .map_err(|e| map_write_error(e, "이미 딜 플로우에 추가된 스타트업입니다"))?;

        deal.id = result.inserted_id.as_object_id();
        Ok(deal)
    }

    pub async fn exists_for_pair(&self, investor_id: &ObjectId, startup_id: &ObjectId) -> Result<bool, AppError> {
        let count = self.collection::<Deal>()
            .count_documents(doc! { "investor_id": investor_id, "startup_id": startup_id })
            .await?;
        Ok(count > 0)
    }

    pub async fn find_owned(&self, deal_id: &ObjectId, investor_id: &ObjectId) -> Result<Option<Deal>, AppError> {
        Ok(self.collection::<Deal>()
            .find_one(owned(deal_id, investor_id))
            .await?)
    }

    pub async fn find_by_investor(&self, investor_id: &ObjectId) -> Result<Vec<Deal>, AppError> {
        let deals = self.collection::<Deal>()
            .find(doc! { "investor_id": investor_id })
            .sort(doc! { "updated_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(deals)
    }

    /// 창업자 정보가 결합된 딜 목록 (최근 갱신 순, `limit` 생략 시 전체)
    pub async fn find_enriched(
        &self,
        investor_id: &ObjectId,
        limit: Option<i64>,
    ) -> Result<Vec<EnrichedDeal>, AppError> {
        let documents: Vec<Document> = self.collection::<Document>()
            .aggregate(enrichment_pipeline(investor_id, limit))
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(EnrichedDeal::from_document).collect()
    }

    pub async fn count_by_investor(&self, investor_id: &ObjectId) -> Result<u64, AppError> {
        Ok(self.collection::<Deal>()
            .count_documents(doc! { "investor_id": investor_id })
            .await?)
    }

    /// 주어진 단계의 딜 수 (이전 저장 값 포함)
    pub async fn count_in_stage(&self, investor_id: &ObjectId, stage: DealStage) -> Result<u64, AppError> {
        Ok(self.collection::<Deal>()
            .count_documents(doc! {
                "investor_id": investor_id,
                "stage": { "$in": stage.stored_values().to_vec() },
            })
            .await?)
    }

    /// 창업자 기준 특정 단계 딜 수
    pub async fn count_for_startup_in_stage(&self, startup_id: &ObjectId, stage: DealStage) -> Result<u64, AppError> {
        Ok(self.collection::<Deal>()
            .count_documents(doc! {
                "startup_id": startup_id,
                "stage": { "$in": stage.stored_values().to_vec() },
            })
            .await?)
    }

    async fn update_owned(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        mut changes: Document,
    ) -> Result<Option<Deal>, AppError> {
        changes.insert("updated_at", DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self.collection::<Deal>()
            .find_one_and_update(owned(deal_id, investor_id), doc! { "$set": changes })
            .with_options(options)
            .await?)
    }

    pub async fn update_stage(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        stage: DealStage,
    ) -> Result<Option<Deal>, AppError> {
        self.update_owned(deal_id, investor_id, doc! { "stage": stage.as_str() }).await
    }

    pub async fn update_status(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        status: DealStatus,
    ) -> Result<Option<Deal>, AppError> {
        self.update_owned(deal_id, investor_id, doc! { "status": status.as_str() }).await
    }

    /// 내장 배열에 항목 추가. 딜이 없으면 `false`.
    async fn push_item(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        field: &str,
        item: Document,
    ) -> Result<bool, AppError> {
        let mut push = Document::new();
        push.insert(field, item);

        let result = self.collection::<Deal>()
            .update_one(
                owned(deal_id, investor_id),
                doc! { "$push": push, "$set": { "updated_at": DateTime::now() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    pub async fn push_meeting(&self, deal_id: &ObjectId, investor_id: &ObjectId, meeting: &Meeting) -> Result<bool, AppError> {
        self.push_item(deal_id, investor_id, "meetings", bson::to_document(meeting)?).await
    }

    pub async fn push_document(&self, deal_id: &ObjectId, investor_id: &ObjectId, document: &DealDocument) -> Result<bool, AppError> {
        self.push_item(deal_id, investor_id, "documents", bson::to_document(document)?).await
    }

    pub async fn push_task(&self, deal_id: &ObjectId, investor_id: &ObjectId, task: &Task) -> Result<bool, AppError> {
        self.push_item(deal_id, investor_id, "tasks", bson::to_document(task)?).await
    }

    pub async fn push_note(&self, deal_id: &ObjectId, investor_id: &ObjectId, note: &Note) -> Result<bool, AppError> {
        self.push_item(deal_id, investor_id, "notes", bson::to_document(note)?).await
    }

    /// 내장 항목 필드 갱신
    ///
    /// 필터는 딜 ID, 소유 투자자, 항목 ID를 모두 요구하므로 하나라도 맞지 않으면 `None`.
    async fn update_item(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        array: &str,
        item_id: &ObjectId,
        field: &str,
        value: Bson,
    ) -> Result<Option<Deal>, AppError> {
        let mut filter = owned(deal_id, investor_id);
        filter.insert(format!("{}.id", array), item_id);

        let mut changes = doc! { "updated_at": DateTime::now() };
        changes.insert(format!("{}.$[item].{}", array, field), value);

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .array_filters(vec![doc! { "item.id": item_id }])
            .build();

        Ok(self.collection::<Deal>()
            .find_one_and_update(filter, doc! { "$set": changes })
            .with_options(options)
            .await?)
    }

    pub async fn set_task_completed(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        task_id: &ObjectId,
        completed: bool,
    ) -> Result<Option<Deal>, AppError> {
        self.update_item(deal_id, investor_id, "tasks", task_id, "completed", Bson::Boolean(completed)).await
    }

    pub async fn set_meeting_status(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        meeting_id: &ObjectId,
        status: MeetingStatus,
    ) -> Result<Option<Deal>, AppError> {
        self.update_item(
            deal_id,
            investor_id,
            "meetings",
            meeting_id,
            "status",
            Bson::String(status.as_str().to_string()),
        )
        .await
    }

    pub async fn delete_owned(&self, deal_id: &ObjectId, investor_id: &ObjectId) -> Result<bool, AppError> {
        let result = self.collection::<Deal>()
            .delete_one(owned(deal_id, investor_id))
            .await?;
        Ok(result.deleted_count > 0)
    }

    /// 투자 트랜잭션 내 남은 모집 금액 차감. 갱신 후 문서를 반환합니다.
    pub async fn decrement_fund_required(
        &self,
        deal_id: &ObjectId,
        investor_id: &ObjectId,
        amount: f64,
        session: &mut ClientSession,
    ) -> Result<Deal, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection::<Deal>()
            .find_one_and_update(
                owned(deal_id, investor_id),
                doc! {
                    "$inc": { "fund_required": -amount },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .with_options(options)
            .session(&mut *session)
            .await?
            .ok_or_else(|| AppError::NotFound("딜을 찾을 수 없습니다".to_string()))
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "investor_id": 1, "startup_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("investor_startup_unique".to_string())
                .build())
            .build();

        let recent_index = IndexModel::builder()
            .keys(doc! { "investor_id": 1, "updated_at": -1 })
            .options(IndexOptions::builder()
                .name("investor_updated_desc".to_string())
                .build())
            .build();

        self.collection::<Deal>()
            .create_indexes([pair_index, recent_index])
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_pipeline_limits_before_lookup() {
        let investor = ObjectId::new();
        let pipeline = enrichment_pipeline(&investor, Some(5));

        assert!(pipeline[0].contains_key("$match"));
        assert!(pipeline[1].contains_key("$sort"));
        assert_eq!(pipeline[2].get_i64("$limit").unwrap(), 5);
        assert!(pipeline[3].contains_key("$lookup"));

        let unlimited = enrichment_pipeline(&investor, None);
        assert!(unlimited.iter().all(|stage| !stage.contains_key("$limit")));
    }

    #[test]
    fn test_enriched_deal_from_document_with_missing_founder() {
        let deal = Deal::new(ObjectId::new(), ObjectId::new(), 75.0, 100000.0);
        let mut document = bson::to_document(&deal).unwrap();
        document.insert("_id", ObjectId::new());
        document.insert("startup_name", "");

        let enriched = EnrichedDeal::from_document(document).unwrap();
        assert_eq!(enriched.founder_name, None);
        assert_eq!(enriched.startup_name, None);
        assert_eq!(enriched.deal.match_score, 75.0);
    }

    #[test]
    fn test_enriched_deal_reads_legacy_closed_stage() {
        let deal = Deal::new(ObjectId::new(), ObjectId::new(), 60.0, 0.0);
        let mut document = bson::to_document(&deal).unwrap();
        document.insert("stage", "closed_won");
        document.insert("founder_name", "Ada");
        document.insert("industry", "Fintech");

        let enriched = EnrichedDeal::from_document(document).unwrap();
        assert_eq!(enriched.deal.stage, DealStage::Closed);
        assert_eq!(enriched.founder_name.as_deref(), Some("Ada"));
        assert_eq!(enriched.industry.as_deref(), Some("Fintech"));
    }
}
