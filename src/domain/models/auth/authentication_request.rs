//! 라우트 스코프별 역할 요구 사항

/// 스코프 접근에 필요한 역할
#[derive(Debug, Clone)]
pub enum RequiredRole {
    Single(String),
    /// 나열된 역할 중 하나 이상
    Any(Vec<String>),
}

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        match self {
            RequiredRole::Single(required) => user_roles.contains(required),
            RequiredRole::Any(required) => required.iter().any(|role| user_roles.contains(role)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single("investor".to_string());
        assert!(required.is_satisfied(&roles(&["user", "investor"])));
        assert!(!required.is_satisfied(&roles(&["user", "founder"])));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(roles(&["investor", "admin"]));
        assert!(required.is_satisfied(&roles(&["admin"])));
        assert!(required.is_satisfied(&roles(&["user", "investor"])));
        assert!(!required.is_satisfied(&roles(&["user"])));
        assert!(!required.is_satisfied(&[]));
    }
}
