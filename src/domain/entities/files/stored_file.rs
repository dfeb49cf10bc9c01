use serde::{Deserialize, Serialize};

/// 업로드 저장소에 기록된 파일
///
/// 파일 본문은 저장소(로컬 디렉터리 또는 Azure Blob)에 있고, 문서에는
/// 위치(`key`)와 메타데이터만 남습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    /// 저장소 기준 상대 경로 (예: `cv/8d0c...e1.pdf`)
    pub key: String,
    pub original_name: String,
    pub content_type: String,
    pub size: i64,
    /// `local` | `azure`
    pub backend: String,
}
