//! # Core
//!
//! 애플리케이션 전역 기반 기능입니다.
//!
//! - [`registry`]: `#[service]` / `#[repository]` 매크로로 선언된 컴포넌트를 지연 생성하는 싱글톤 레지스트리
//! - [`errors`]: HTTP 응답으로 변환되는 `AppError` 에러 분류
//!
//! ```rust,ignore
//! #[repository(name = "deal", collection = "deals")]
//! pub struct DealRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! #[service(name = "dealflow")]
//! pub struct DealFlowService {
//!     deal_repo: Arc<DealRepository>,   // 자동 주입
//! }
//!
//! let service = DealFlowService::instance();
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
