//! 여러 API가 공유하는 DTO
use serde::{Deserialize, Serialize};
use crate::domain::entities::files::StoredFile;

/// 목록 조회 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: i64 = 20;
/// 목록 조회 최대 페이지 크기
pub const MAX_PAGE_SIZE: i64 = 100;

/// `page` (1부터), `limit` (1..=100)
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn skip(&self) -> u64 {
        ((self.page() - 1) * self.limit()) as u64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// 응답에 노출하는 파일 정보 (저장 위치 `key`는 숨김)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfoResponse {
    pub nom_fichier: String,
    pub content_type: String,
    pub taille: i64,
}

impl From<&StoredFile> for FileInfoResponse {
    fn from(file: &StoredFile) -> Self {
        Self {
            nom_fichier: file.original_name.clone(),
            content_type: file.content_type.clone(),
            taille: file.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 20);
        assert_eq!(pagination.skip(), 0);
    }

    #[test]
    fn test_pagination_bounds() {
        let pagination = Pagination { page: Some(0), limit: Some(500) };
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 100);

        let pagination = Pagination { page: Some(3), limit: Some(10) };
        assert_eq!(pagination.skip(), 20);

        let pagination = Pagination { page: Some(2), limit: Some(-5) };
        assert_eq!(pagination.limit(), 1);
    }
}
