/// 스코프별 인증 모드
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 토큰이 없거나 유효하지 않으면 401
    Required,
    /// 헤더가 없으면 익명으로 통과, 헤더가 있으면 `Required`와 같이 검증
    Optional,
}
