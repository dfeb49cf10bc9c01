//! # 문자열 유틸리티
//!
//! 요청 DTO 정리와 MongoDB 쿼리 구성에 쓰이는 문자열 처리 함수들입니다.

use serde::Deserialize;
use crate::core::errors::AppError;

/// 필수 문자열 필드를 검증하고 앞뒤 공백을 제거합니다.
///
/// # 반환값
/// * `Ok(String)` - 공백이 제거된 문자열
/// * `Err(AppError::ValidationError)` - 비어 있거나 공백만 있는 경우
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("Le champ '{}' est obligatoire", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열을 정리합니다. 빈 문자열과 공백 문자열은 `None`이 됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 이메일을 비교/저장용으로 정규화합니다 (공백 제거 + 소문자).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 사용자 입력을 MongoDB `$regex` 안에서 리터럴로 취급되도록 이스케이프합니다.
pub fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '^' | '$' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 쉼표로 구분된 목록을 잘라 빈 항목을 제거합니다.
///
/// `"rust, mongodb,,  docker "` → `["rust", "mongodb", "docker"]`
pub fn split_csv_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// serde 역직렬화 시 선택적 문자열 필드를 정리합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct UpdateProfile {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     telephone: Option<String>,
/// }
/// // {"telephone": "  "} → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
