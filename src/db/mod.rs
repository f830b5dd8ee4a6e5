//! MongoDB 연결 관리
//!
//! 애플리케이션 전체에서 공유하는 MongoDB 클라이언트 래퍼입니다.
//! `main`에서 한 번 생성해 `ServiceLocator::set`으로 등록하면
//! 각 리포지토리에 `Arc<Database>`로 주입됩니다.
//!
//! ## 환경 변수
//!
//! - `MONGODB_URI` (기본값 `mongodb://localhost:27017`)
//! - `DATABASE_NAME` (기본값 `dealflow_dev`)
//!
//! 투자 실행처럼 여러 컬렉션을 함께 갱신하는 작업은 [`Database::begin_transaction`]으로
//! 세션을 열어 사용합니다. 트랜잭션은 레플리카셋 또는 샤드 클러스터 배포에서만 동작합니다.

use std::env;

use log::info;
use mongodb::{options::ClientOptions, Client, ClientSession};

use crate::core::errors::AppError;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 연결 후 `ping`으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| "dealflow_dev".to_string());

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("dealflow_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// 세션을 열고 트랜잭션을 시작합니다.
    ///
    /// 호출자는 같은 세션으로 모든 쓰기를 수행한 뒤 `commit_transaction`,
    /// 실패 시 `abort_transaction`을 호출해야 합니다.
    pub async fn begin_transaction(&self) -> Result<ClientSession, AppError> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(session)
    }
}
