//! 감사 로그용 클라이언트 정보

use actix_web::HttpRequest;
use actix_web::http::header::USER_AGENT;

/// 요청한 클라이언트의 IP와 User-Agent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    /// 프록시 뒤라면 `X-Forwarded-For`의 첫 주소를, 아니면 피어 주소를 사용합니다.
    pub fn from_request(req: &HttpRequest) -> Self {
        let ip_address = req
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string);

        let user_agent = req
            .headers()
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.chars().take(512).collect::<String>());

        Self { ip_address, user_agent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_client_info_from_request() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header((USER_AGENT, "Mozilla/5.0"))
            .to_http_request();

        let info = ClientInfo::from_request(&req);

        assert_eq!(info.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(info.user_agent.as_deref(), Some("Mozilla/5.0"));
    }
}
