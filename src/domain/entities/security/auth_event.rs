use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    Register,
    LoginSuccess,
    LoginFailure,
    Logout,
    PasswordChanged,
}

/// 인증 감사 로그 한 건
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ObjectId>,
    pub email: String,
    pub event: AuthEventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: DateTime,
}

impl AuthEvent {
    pub fn new(
        event: AuthEventKind,
        email: &str,
        user_id: Option<ObjectId>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            id: None,
            user_id,
            email: email.to_string(),
            event,
            ip_address,
            user_agent,
            created_at: DateTime::now(),
        }
    }
}
