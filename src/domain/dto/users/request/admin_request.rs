use serde::Deserialize;
use crate::utils::string_utils::deserialize_optional_string;

/// `GET /api/admin/auth-logs` 쿼리
#[derive(Debug, Default, Deserialize)]
pub struct AuthLogQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    pub limit: Option<i64>,
}

impl AuthLogQuery {
    /// 1..=500, 기본값 100
    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(100).clamp(1, 500)
    }
}

/// `PUT /api/admin/users/{id}/activation`
#[derive(Debug, Deserialize)]
pub struct UpdateActivationRequest {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_log_limit_is_clamped() {
        assert_eq!(AuthLogQuery::default().effective_limit(), 100);
        assert_eq!(AuthLogQuery { email: None, limit: Some(0) }.effective_limit(), 1);
        assert_eq!(AuthLogQuery { email: None, limit: Some(10_000) }.effective_limit(), 500);
    }
}
