//! # 사용자 서비스
//!
//! ```text
//! register ── bcrypt 해싱 ── UserRepository::create (roles = ["user"])
//! login    ── 비밀번호 검증 ── TokenService::issue_access_token
//! add_role ── $addToSet ── founder / investor 이면 빈 프로필 생성
//! ```

use std::sync::Arc;

use bcrypt::{hash, verify};
use log::{debug, info};
use singleton_macro::service;

use crate::{
    config::{AdminConfig, PasswordConfig},
    core::errors::AppError,
    domain::{
        dto::users::{CreateUserRequest, CreateUserResponse, LoginRequest, LoginResponse, RoleGrantResponse, UserResponse},
        entities::users::{Role, User},
    },
    repositories::{
        profiles::{FounderRepository, InvestorRepository},
        users::UserRepository,
    },
    services::auth::TokenService,
};
use mongodb::bson::oid::ObjectId;

#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    founder_repo: Arc<FounderRepository>,
    investor_repo: Arc<InvestorRepository>,
    token_service: Arc<TokenService>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 관리자 호출자이거나 `ADMIN_EMAILS`에 등록된 본인이면 `admin` 부여 가능
fn may_grant_admin(caller_is_admin: bool, email: &str, bootstrap_emails: &[String]) -> bool {
    caller_is_admin || bootstrap_emails.contains(&normalize_email(email))
}

impl UserService {
    pub async fn register(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let start_time = std::time::Instant::now();

        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new_local(
            normalize_email(&request.email),
            request.name.trim().to_string(),
            password_hash,
        );

        let created = self.user_repo.create(user).await?;
        info!("사용자 가입 완료: {} ({:?})", created.email, start_time.elapsed());

        Ok(CreateUserResponse {
            user: UserResponse::from(created),
            message: "사용자가 성공적으로 생성되었습니다".to_string(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self.verify_password(&normalize_email(&request.email), &request.password).await?;

        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;
        self.user_repo.touch_last_login(&user_id).await?;

        let token = self.token_service.issue_access_token(&user)?;
        Ok(LoginResponse::new(user, token.access_token, token.expires_in))
    }

    async fn verify_password(&self, email: &str, password: &str) -> Result<User, AppError> {
        let invalid = || AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string());

        let user = self.user_repo.find_by_email(email).await?.ok_or_else(invalid)?;

        let verify_start = std::time::Instant::now();
        let is_valid = verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;
        debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            return Err(invalid());
        }
        if !user.is_active {
            return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
        }

        Ok(user)
    }

    pub async fn get_user(&self, user_id: &ObjectId) -> Result<UserResponse, AppError> {
        let user = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// 역할 추가
    ///
    /// 이미 가진 역할이면 아무것도 바뀌지 않고 `role_added = false`.
    /// `founder` / `investor`는 프로필이 없을 때 빈 프로필도 함께 만듭니다.
    /// `admin`은 이미 관리자인 호출자, 또는 `ADMIN_EMAILS`에 이메일이 등록된 사용자만 추가할 수 있습니다.
    /// 기존 토큰의 역할 목록은 갱신되지 않으므로 다시 로그인해야 합니다.
    pub async fn add_role(
        &self,
        user_id: &ObjectId,
        role: Role,
        caller_is_admin: bool,
    ) -> Result<RoleGrantResponse, AppError> {
        if role == Role::User {
            return Err(AppError::ValidationError("기본 역할은 추가할 수 없습니다".to_string()));
        }

        let current = self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        if role == Role::Admin && !may_grant_admin(caller_is_admin, &current.email, &AdminConfig::bootstrap_emails()) {
            return Err(AppError::AuthorizationError("관리자 역할은 관리자만 부여할 수 있습니다".to_string()));
        }
        let role_added = !current.has_role(role);

        let updated = self.user_repo
            .add_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        match role {
            Role::Founder => self.founder_repo.create_if_missing(user_id).await?,
            Role::Investor => self.investor_repo.create_if_missing(user_id).await?,
            Role::Admin | Role::User => {}
        }

        if role_added {
            info!("역할 추가: 사용자 {} → {}", user_id, role.as_str());
        }

        Ok(RoleGrantResponse {
            user: UserResponse::from(updated),
            role_added,
            message: if role_added {
                "역할이 추가되었습니다. 새 토큰을 발급받아 주세요".to_string()
            } else {
                "이미 보유한 역할입니다".to_string()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_admin_grant_rules() {
        let bootstrap = vec!["ops@example.com".to_string()];

        assert!(may_grant_admin(false, "Ops@Example.com", &bootstrap));
        assert!(may_grant_admin(true, "someone@example.com", &bootstrap));
        assert!(!may_grant_admin(false, "someone@example.com", &bootstrap));
        assert!(!may_grant_admin(false, "ops@example.com", &[]));
    }
}
