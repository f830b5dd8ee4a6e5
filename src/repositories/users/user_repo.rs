//! # 사용자 리포지토리
//!
//! `users` 컬렉션을 담당합니다. ID와 이메일 단건 조회는 Redis에 10분간 캐시되고,
//! 쓰기 연산 후에는 관련 키를 무효화합니다.
//!
//! - 개별 사용자: `user:{user_id}`
//! - 이메일 조회: `user:email:{email}`

use std::sync::Arc;

use log::warn;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    IndexModel,
};
use singleton_macro::repository;

use crate::{
    caching::{redis::RedisClient, PROFILE_CACHE_TTL_SECONDS},
    core::{errors::AppError, registry::Repository},
    db::Database,
    domain::entities::users::{Role, User},
    repositories::map_write_error,
};

#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl UserRepository {
    fn email_cache_key(email: &str) -> String {
        format!("user:email:{}", email)
    }

    /// 이메일로 사용자 조회 (캐시 우선)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = Self::email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, PROFILE_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(&id.to_hex());

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": id })
            .await?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, PROFILE_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 새 사용자 저장
    ///
    /// 이메일 중복은 사전 조회와 유니크 인덱스 양쪽에서 `ConflictError`가 됩니다.
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let result = self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| map_write_error(e, "이미 사용 중인 이메일입니다"))?;

        user.id = result.inserted_id.as_object_id();

        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 역할 추가 (`$addToSet`이므로 이미 있으면 변화 없음)
    pub async fn add_role(&self, id: &ObjectId, role: Role) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$addToSet": { "roles": role.as_str() },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .with_options(options)
            .await?;

        if let Some(ref user) = updated {
            self.evict(id, &user.email).await;
        }

        Ok(updated)
    }

    pub async fn touch_last_login(&self, id: &ObjectId) -> Result<(), AppError> {
        let now = DateTime::now();
        self.collection::<User>()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "last_login_at": now, "updated_at": now } },
            )
            .await?;

        let _ = self.invalidate_cache(&id.to_hex()).await;
        Ok(())
    }

    async fn evict(&self, id: &ObjectId, email: &str) {
        let _ = self.invalidate_cache(&id.to_hex()).await;
        if let Err(e) = self.redis.del(&Self::email_cache_key(email)).await {
            warn!("사용자 이메일 캐시 무효화 실패 {}: {}", email, e);
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index])
            .await?;

        Ok(())
    }
}
