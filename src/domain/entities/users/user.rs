//! 사용자 엔티티
//!
//! 식별 정보와 역할 집합을 가집니다. 역할은 창업자/투자자/관리자 역할을 맡을 때마다
//! 추가될 뿐 제거되지 않습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 역할 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Founder,
    Investor,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Founder => "founder",
            Role::Investor => "investor",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "founder" => Ok(Role::Founder),
            "investor" => Ok(Role::Investor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("지원하지 않는 역할입니다: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub email: String,

    pub name: String,

    pub password_hash: String,

    /// 역할 태그 (`"user"`, `"founder"`, `"investor"`, `"admin"`)
    pub roles: Vec<String>,

    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime>,

    pub created_at: DateTime,

    pub updated_at: DateTime,
}

impl User {
    /// 가입 직후 사용자. 기본 역할은 `user` 하나입니다.
    pub fn new_local(email: String, name: String, password_hash: String) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            email,
            name,
            password_hash,
            roles: vec![Role::User.as_str().to_string()],
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    /// 역할 추가. 이미 있으면 `false`.
    pub fn grant_role(&mut self, role: Role) -> bool {
        if self.has_role(role) {
            return false;
        }
        self.roles.push(role.as_str().to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_local_user_has_only_user_role() {
        let user = User::new_local("a@b.io".into(), "Ada".into(), "hash".into());
        assert_eq!(user.roles, vec!["user".to_string()]);
        assert!(user.is_active);
        assert!(user.id.is_none());
    }

    #[test]
    fn test_grant_role_only_grows() {
        let mut user = User::new_local("a@b.io".into(), "Ada".into(), "hash".into());

        assert!(user.grant_role(Role::Investor));
        assert!(!user.grant_role(Role::Investor));
        assert!(user.grant_role(Role::Founder));

        assert_eq!(user.roles, vec!["user", "investor", "founder"]);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("Founder").unwrap(), Role::Founder);
        assert_eq!(Role::from_str(" admin ").unwrap(), Role::Admin);
        assert!(Role::from_str("superuser").is_err());
    }
}
