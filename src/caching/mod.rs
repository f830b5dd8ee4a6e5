//! 캐싱 계층
//!
//! 사용자와 프로필 단건 조회 결과를 Redis에 JSON으로 10분간 보관합니다.
//! 집계(대시보드, 파이프라인, 성과) 결과는 캐시하지 않습니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;

/// 단건 조회 캐시 TTL (초)
pub const PROFILE_CACHE_TTL_SECONDS: usize = 600;
