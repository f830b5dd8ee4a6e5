//! 사용자 가입/로그인/역할 요청

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::users::Role;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct CreateUserRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, max = 80, message = "이름은 1-80자 사이여야 합니다"))]
    #[validate(custom(function = "crate::domain::dto::validate_not_blank"))]
    pub name: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub password_confirm: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 역할 추가 요청 (`founder`, `investor`, `admin`)
#[derive(Debug, Deserialize, Validate)]
pub struct AddRoleRequest {
    #[validate(custom(function = "validate_assignable_role"))]
    pub role: String,
}

impl AddRoleRequest {
    /// 검증을 통과한 요청에서 역할 추출
    pub fn parsed_role(&self) -> Option<Role> {
        Role::from_str(&self.role).ok().filter(|role| *role != Role::User)
    }
}

fn validate_passwords_match(req: &CreateUserRequest) -> Result<(), ValidationError> {
    if req.password != req.password_confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}

/// 대문자, 소문자, 숫자를 각각 하나 이상 포함
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 대문자, 소문자, 숫자를 포함해야 합니다".into()));
    }
    Ok(())
}

fn validate_assignable_role(role: &str) -> Result<(), ValidationError> {
    match Role::from_str(role) {
        Ok(Role::User) | Err(_) => Err(ValidationError::new("invalid_role")
            .with_message("역할은 founder, investor, admin 중 하나여야 합니다".into())),
        Ok(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            email: "founder@acme.io".to_string(),
            name: "Grace Hopper".to_string(),
            password: "Str0ngPass".to_string(),
            password_confirm: "Str0ngPass".to_string(),
        }
    }

    #[test]
    fn test_valid_create_user_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_password_rules() {
        let mut weak = valid_request();
        weak.password = "alllowercase1".to_string();
        weak.password_confirm = weak.password.clone();
        assert!(weak.validate().is_err());

        let mut mismatch = valid_request();
        mismatch.password_confirm = "Different1".to_string();
        assert!(mismatch.validate().is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut request = valid_request();
        request.name = "   ".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_add_role_request() {
        let investor = AddRoleRequest { role: "investor".to_string() };
        assert!(investor.validate().is_ok());
        assert_eq!(investor.parsed_role(), Some(Role::Investor));

        assert!(AddRoleRequest { role: "user".to_string() }.validate().is_err());
        assert!(AddRoleRequest { role: "owner".to_string() }.validate().is_err());
    }
}
