//! 인증된 요청 주체
//!
//! 인증 미들웨어가 Request Extensions에 넣어 두고, 핸들러는 추출자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/dashboard")]
//! pub async fn dashboard(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let investor_id = user.object_id()?;
//!     // ...
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;
use crate::domain::entities::parse_object_id;
use crate::domain::models::token::TokenClaims;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }

    /// 토큰 주체를 `ObjectId`로 변환
    pub fn object_id(&self) -> Result<ObjectId, AppError> {
        parse_object_id(&self.user_id)
    }
}

impl From<&TokenClaims> for AuthenticatedUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            roles: claims.roles.clone(),
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized("인증되지 않은 요청입니다"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: ObjectId::new().to_hex(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_role_checks() {
        let investor = user(&["user", "investor"]);
        assert!(investor.has_role("investor"));
        assert!(investor.has_any_role(&["admin", "investor"]));
        assert!(!investor.has_any_role(&["admin", "founder"]));
        assert!(!investor.is_admin());
        assert!(user(&["admin"]).is_admin());
    }

    #[test]
    fn test_object_id() {
        assert!(user(&["user"]).object_id().is_ok());

        let broken = AuthenticatedUser { user_id: "xyz".into(), roles: vec![] };
        assert!(matches!(broken.object_id(), Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_extractor_without_middleware_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let extracted = AuthenticatedUser::extract(&req).await;
        assert!(extracted.is_err());
    }
}
