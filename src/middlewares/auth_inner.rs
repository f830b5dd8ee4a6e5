//! AuthMiddleware 인증 로직
use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::core::errors::AppError;
use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::repositories::tokens::{RevocationList, TokenRepository};
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<RequiredRole>,
    /// 없으면 요청 시점에 `TokenRepository`를 사용
    pub revocations: Option<Arc<dyn RevocationList>>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();
        let revocations = self.revocations.clone();

        Box::pin(async move {
            let user = match authenticate_request(&req, revocations).await {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패: {} {} ({})", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
            };

            if let Some(ref required) = required_role {
                if !required.is_satisfied(&user.roles) {
                    log::warn!("권한 부족: 사용자 ID {} ({:?}), 필요 권한: {:?}",
                        user.user_id, user.roles, required);
                    let err = AppError::AuthorizationError("접근 권한이 부족합니다".to_string());
                    return Ok(reject(req, err));
                }
            }

            log::debug!("인증 성공: 사용자 ID {}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청을 핸들러로 넘기지 않고 에러 응답으로 종료
fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, err.error_response()).map_into_right_body()
}

/// `Authorization` 헤더의 Bearer 토큰 검증 후 폐기 여부 확인
async fn authenticate_request(
    req: &ServiceRequest,
    revocations: Option<Arc<dyn RevocationList>>,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("유효한 인증 토큰이 필요합니다".to_string()))?;

    let claims = TokenService::instance().verify_bearer(auth_header)?;

    let revoked = match revocations {
        Some(list) => list.is_revoked(&claims.jti).await?,
        None => TokenRepository::instance().is_revoked(&claims.jti).await?,
    };
    if revoked {
        return Err(AppError::AuthenticationError("로그아웃된 토큰입니다".to_string()));
    }

    Ok(AuthenticatedUser::from(&claims))
}
