//! ObjectId / BSON DateTime 변환 헬퍼
//!
//! 경로 파라미터의 24자리 hex id를 `ObjectId`로, 요청의 RFC 3339 날짜를
//! BSON `DateTime`으로 바꾸고, 응답용으로 다시 문자열로 직렬화합니다.

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::{DateTime, Document};
use mongodb::bson::oid::ObjectId;
use crate::utils::string_utils::clean_optional_string;
use crate::core::errors::AppError;

/// hex 문자열을 `ObjectId`로 변환합니다. 형식이 잘못되면 400입니다.
pub fn parse_object_id(id: &str, label: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id.trim())
        .map_err(|_| AppError::ValidationError(format!("Identifiant {} invalide: '{}'", label, id)))
}

/// 선택적 hex 문자열을 `ObjectId`로 변환합니다.
pub fn parse_optional_object_id(id: Option<&str>, label: &str) -> Result<Option<ObjectId>, AppError> {
    match id.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_object_id(value, label).map(Some),
        None => Ok(None),
    }
}

/// RFC 3339 문자열을 BSON `DateTime`으로 변환합니다.
///
/// `2025-03-14T09:30:00Z`, `2025-03-14T10:30:00+01:00` 모두 허용합니다.
pub fn parse_rfc3339(value: &str, field: &str) -> Result<DateTime, AppError> {
    ChronoDateTime::parse_from_rfc3339(value.trim())
        .map(|parsed| DateTime::from_millis(parsed.with_timezone(&Utc).timestamp_millis()))
        .map_err(|_| AppError::ValidationError(format!(
            "Le champ '{}' doit être une date RFC 3339 (ex: 2025-03-14T09:30:00Z)", field
        )))
}

/// BSON `DateTime` → RFC 3339 (UTC, `Z` 접미사)
pub fn to_rfc3339(value: &DateTime) -> String {
    ChronoDateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .map(|parsed| parsed.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
        .unwrap_or_default()
}

pub fn to_rfc3339_opt(value: &Option<DateTime>) -> Option<String> {
    value.as_ref().map(to_rfc3339)
}

/// 저장된 문서의 `_id`를 응답용 hex 문자열로 바꿉니다.
pub fn id_to_hex(id: &Option<ObjectId>) -> String {
    id.map(|oid| oid.to_hex()).unwrap_or_default()
}

/// 부분 수정용 `$set` 문서에 공백을 제거한 문자열을 넣습니다.
///
/// 값이 없거나 공백뿐이면 아무것도 넣지 않습니다.
pub fn set_trimmed(update_doc: &mut Document, field: &str, value: Option<String>) {
    if let Some(value) = clean_optional_string(value) {
        update_doc.insert(field, value);
    }
}

/// Unix 초 → BSON `DateTime`
pub fn from_unix_seconds(seconds: i64) -> DateTime {
    DateTime::from_millis(seconds.saturating_mul(1000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex(), "offre").unwrap(), oid);

        let err = parse_object_id("pas-un-id", "offre").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_parse_optional_object_id() {
        assert_eq!(parse_optional_object_id(None, "entreprise").unwrap(), None);
        assert_eq!(parse_optional_object_id(Some("  "), "entreprise").unwrap(), None);
        assert!(parse_optional_object_id(Some("123"), "entreprise").is_err());
    }

    #[test]
    fn test_rfc3339_conversion() {
        let parsed = parse_rfc3339("2025-03-14T10:30:00+01:00", "date_entretien").unwrap();
        assert_eq!(to_rfc3339(&parsed), "2025-03-14T09:30:00.000Z");

        assert!(parse_rfc3339("14/03/2025", "date_entretien").is_err());
    }

    #[test]
    fn test_set_trimmed() {
        let mut update_doc = Document::new();
        set_trimmed(&mut update_doc, "lieu", Some("  Salle B, Lyon  ".to_string()));
        set_trimmed(&mut update_doc, "notes", Some("   ".to_string()));
        set_trimmed(&mut update_doc, "salaire", None);

        assert_eq!(update_doc.get_str("lieu").unwrap(), "Salle B, Lyon");
        assert!(!update_doc.contains_key("notes"));
        assert!(!update_doc.contains_key("salaire"));
    }

    #[test]
    fn test_from_unix_seconds() {
        assert_eq!(from_unix_seconds(1_700_000_000).timestamp_millis(), 1_700_000_000_000);
    }
}
