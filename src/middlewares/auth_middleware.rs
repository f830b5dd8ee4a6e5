//! JWT 인증 미들웨어
//!
//! 스코프 단위로 감싸 Bearer 토큰을 검증하고, 성공하면 [`AuthenticatedUser`]를
//! Request Extensions에 넣습니다. 토큰이 없거나 유효하지 않으면 401, 역할이 맞지 않으면 403.
//! 로그아웃으로 폐기된 토큰(`jti`)도 401로 거부합니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::repositories::tokens::RevocationList;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 접근에 필요한 역할 (없으면 인증만 확인)
    required_role: Option<RequiredRole>,
    revocations: Option<Arc<dyn RevocationList>>,
}

impl AuthMiddleware {
    /// 인증만 요구
    pub fn required() -> Self {
        Self { required_role: None, revocations: None }
    }

    /// 특정 역할 요구
    pub fn required_with_role(role: &str) -> Self {
        Self {
            required_role: Some(RequiredRole::Single(role.to_string())),
            revocations: None,
        }
    }

    /// 나열된 역할 중 하나 요구
    pub fn required_with_roles(roles: Vec<&str>) -> Self {
        let role_strings: Vec<String> = roles.into_iter().map(|s| s.to_string()).collect();
        Self {
            required_role: Some(RequiredRole::Any(role_strings)),
            revocations: None,
        }
    }

    /// 폐기 목록 지정 (기본값은 Redis의 `TokenRepository`)
    pub fn with_revocations(mut self, revocations: Arc<dyn RevocationList>) -> Self {
        self.revocations = Some(revocations);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
            revocations: self.revocations.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use async_trait::async_trait;
    use mongodb::bson::oid::ObjectId;

    use crate::core::errors::AppError;
    use crate::domain::entities::users::{Role, User};
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::services::auth::TokenService;

    #[derive(Default)]
    struct MemoryRevocations {
        jtis: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl RevocationList for MemoryRevocations {
        async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
            Ok(self.jtis.lock().unwrap().contains(jti))
        }
    }

    struct BrokenRevocations;

    #[async_trait]
    impl RevocationList for BrokenRevocations {
        async fn is_revoked(&self, _jti: &str) -> Result<bool, AppError> {
            Err(AppError::RedisError("connection refused".to_string()))
        }
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    fn bearer_for(roles: &[Role]) -> (String, String) {
        let mut user = User::new_local("jo@example.com".into(), "Jo".into(), "hash".into());
        let id = ObjectId::new();
        user.id = Some(id);
        for role in roles {
            user.grant_role(*role);
        }

        let token = TokenService::instance().issue_access_token(&user).unwrap();
        (format!("Bearer {}", token.access_token), id.to_hex())
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/investor")
                    .wrap(AuthMiddleware::required_with_role("investor"))
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/investor/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_header_is_unauthorized() {
        let app = test::init_service(
            App::new().service(
                web::scope("/any")
                    .wrap(AuthMiddleware::required())
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/any/me")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_role_gate() {
        let app = test::init_service(
            App::new().service(
                web::scope("/investor")
                    .wrap(
                        AuthMiddleware::required_with_roles(vec!["investor", "admin"])
                            .with_revocations(Arc::new(MemoryRevocations::default())),
                    )
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let (founder_header, _) = bearer_for(&[Role::Founder]);
        let req = test::TestRequest::get()
            .uri("/investor/me")
            .insert_header(("Authorization", founder_header))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let (investor_header, investor_id) = bearer_for(&[Role::Investor]);
        let req = test::TestRequest::get()
            .uri("/investor/me")
            .insert_header(("Authorization", investor_header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, investor_id.as_bytes());
    }

    #[actix_web::test]
    async fn test_revoked_token_is_unauthorized() {
        let revocations = Arc::new(MemoryRevocations::default());
        let app = test::init_service(
            App::new().service(
                web::scope("/any")
                    .wrap(AuthMiddleware::required().with_revocations(revocations.clone()))
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let (header, _) = bearer_for(&[Role::Investor]);
        let req = test::TestRequest::get()
            .uri("/any/me")
            .insert_header(("Authorization", header.clone()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let token = header.trim_start_matches("Bearer ");
        let claims = TokenService::instance().verify_token(token).unwrap();
        revocations.jtis.lock().unwrap().insert(claims.jti);

        let req = test::TestRequest::get()
            .uri("/any/me")
            .insert_header(("Authorization", header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "로그아웃된 토큰입니다");
    }

    #[actix_web::test]
    async fn test_unavailable_revocation_store_rejects() {
        let app = test::init_service(
            App::new().service(
                web::scope("/any")
                    .wrap(AuthMiddleware::required().with_revocations(Arc::new(BrokenRevocations)))
                    .route("/me", web::get().to(whoami)),
            ),
        )
        .await;

        let (header, _) = bearer_for(&[Role::Investor]);
        let req = test::TestRequest::get()
            .uri("/any/me")
            .insert_header(("Authorization", header))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
