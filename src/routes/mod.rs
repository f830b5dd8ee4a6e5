//! API 라우트 설정
//!
//! 기능별 스코프마다 필요한 역할로 [`AuthMiddleware`]를 감쌉니다.
//!
//! | 스코프 | 인증 |
//! |--------|------|
//! | `/health`, `POST /api/v1/users`, `POST /api/v1/auth/login` | 없음 |
//! | `POST /api/v1/auth/logout` | 핸들러가 직접 토큰 검증 |
//! | `/api/v1/users/me`, `/api/v1/notifications`, `/api/v1/grants` | 로그인 사용자 |
//! | `/api/v1/founder` | founder |
//! | `/api/v1/investor`, `/api/v1/match`, `/api/v1/dealflow`, `/api/v1/tasks`, `/api/v1/meetings` | investor |
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::web;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health_check);

    configure_user_routes(cfg);
    configure_auth_routes(cfg);
    configure_founder_routes(cfg);
    configure_investor_routes(cfg);
    configure_match_routes(cfg);
    configure_dealflow_routes(cfg);
    configure_schedule_routes(cfg);
    configure_notification_routes(cfg);
    configure_grant_routes(cfg);
}

/// 가입은 공개, `/me` 아래는 로그인 필요
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(handlers::users::create_user)
            .service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required())
                    .service(handlers::users::get_me)
                    .service(handlers::users::add_role)
            )
    );
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(handlers::auth::local_login)
            .service(handlers::auth::logout)
    );
}

fn configure_founder_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/founder")
            .wrap(AuthMiddleware::required_with_role("founder"))
            .service(handlers::founders::get_profile)
            .service(handlers::founders::update_profile)
            .service(handlers::founders::dashboard)
            .service(handlers::founders::grant_applications)
    );
}

fn configure_investor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/investor")
            .wrap(AuthMiddleware::required_with_role("investor"))
            .service(handlers::investors::get_profile)
            .service(handlers::investors::update_profile)
            .service(handlers::investors::list_startups)
            .service(handlers::investors::dashboard)
            .service(handlers::investors::performance)
            .service(handlers::investors::revalue_portfolio)
            .service(handlers::investors::matches)
            .service(handlers::investors::activities)
    );
}

fn configure_match_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/match")
            .wrap(AuthMiddleware::required_with_role("investor"))
            .service(handlers::matches::candidates)
            .service(handlers::matches::score_founder)
            .service(handlers::matches::calculate)
            .service(handlers::matches::update_bookmark)
    );
}

fn configure_dealflow_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/dealflow")
            .wrap(AuthMiddleware::required_with_role("investor"))
            .service(handlers::dealflow::add_deal)
            .service(handlers::dealflow::list_deals)
            .service(handlers::dealflow::get_deal)
            .service(handlers::dealflow::delete_deal)
            .service(handlers::dealflow::update_stage)
            .service(handlers::dealflow::update_status)
            .service(handlers::dealflow::schedule_meeting)
            .service(handlers::dealflow::update_meeting_status)
            .service(handlers::dealflow::add_document)
            .service(handlers::dealflow::add_task)
            .service(handlers::dealflow::update_task)
            .service(handlers::dealflow::add_note)
            .service(handlers::dealflow::invest)
    );
}

fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks")
            .wrap(AuthMiddleware::required_with_role("investor"))
            .service(handlers::schedule::list_tasks)
    );
    cfg.service(
        web::scope("/api/v1/meetings")
            .wrap(AuthMiddleware::required_with_role("investor"))
            .service(handlers::schedule::list_meetings)
    );
}

fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(AuthMiddleware::required())
            .service(handlers::notifications::list_notifications)
            .service(handlers::notifications::mark_notification)
            .service(handlers::notifications::delete_notification)
    );
}

fn configure_grant_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grants")
            .wrap(AuthMiddleware::required())
            .service(handlers::grants::list_grants)
            .service(handlers::grants::create_grant)
            .service(handlers::grants::get_grant)
            .service(handlers::grants::update_grant)
            .service(handlers::grants::delete_grant)
            .service(handlers::grants::apply)
            .service(handlers::grants::list_applications)
            .service(handlers::grants::review_application)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_protected_scopes_reject_anonymous_requests() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for uri in ["/api/v1/investor/dashboard", "/api/v1/dealflow", "/api/v1/users/me", "/api/v1/tasks"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        }
    }

    #[actix_web::test]
    async fn test_health_is_public() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_logout_requires_bearer_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
