//! # 투자자 핸들러 (`/api/v1/investor`, investor 역할)
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` / `PUT` | `/profile` | 프로필 |
//! | `GET` | `/startups` | 전체 스타트업 |
//! | `GET` | `/dashboard` | 포트폴리오, 파이프라인, 최근 활동 |
//! | `GET` | `/performance?period=` | 기간별 성과 |
//! | `POST` | `/portfolio/revalue` | 비어 있는 평가액 기록 |
//! | `GET` | `/matches` | 매칭 목록 |
//! | `GET` | `/activities` | 활동 피드 |

use actix_web::{web, HttpResponse, get, post, put};

use crate::core::errors::AppError;
use crate::domain::dto::dashboard::PerformanceQuery;
use crate::domain::dto::profiles::UpdateInvestorRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::validate_payload;
use crate::services::dashboard::{investor_dashboard_service::ACTIVITY_FEED_LIMIT, InvestorDashboardService};
use crate::services::matching::MatchingService;
use crate::services::profiles::ProfileService;

#[get("/profile")]
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = ProfileService::instance().investor(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateInvestorRequest>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let profile = ProfileService::instance()
        .update_investor(&user.object_id()?, &payload)
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/startups")]
pub async fn list_startups() -> Result<HttpResponse, AppError> {
    let startups = ProfileService::instance().list_startups().await?;
    Ok(HttpResponse::Ok().json(startups))
}

#[get("/dashboard")]
pub async fn dashboard(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let dashboard = InvestorDashboardService::instance().dashboard(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

#[get("/performance")]
pub async fn performance(
    user: AuthenticatedUser,
    query: web::Query<PerformanceQuery>,
) -> Result<HttpResponse, AppError> {
    let performance = InvestorDashboardService::instance()
        .performance(&user.object_id()?, query.period.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(performance))
}

#[post("/portfolio/revalue")]
pub async fn revalue_portfolio(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let result = InvestorDashboardService::instance()
        .refresh_valuations(&user.object_id()?)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/matches")]
pub async fn matches(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let matches = MatchingService::instance().investor_matches(&user.object_id()?).await?;
    Ok(HttpResponse::Ok().json(matches))
}

#[get("/activities")]
pub async fn activities(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let activities = InvestorDashboardService::instance()
        .recent_activities(&user.object_id()?, ACTIVITY_FEED_LIMIT)
        .await?;
    Ok(HttpResponse::Ok().json(activities))
}
