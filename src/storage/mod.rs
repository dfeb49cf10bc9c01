//! # Upload Storage Module
//!
//! 지원서 CV와 면접 녹화 영상을 저장하는 계층입니다.
//! 저장소 구현은 [`FileStorage`] trait 뒤에 숨기고, 서비스는 [`UploadStore`]만 사용합니다.
//!
//! ```text
//! UploadStore
//! ├── LocalDiskStorage  - UPLOAD_DIR (기본 Uploads/) 아래에 파일로 저장
//! └── AzureBlobStorage  - 컨테이너 URL + SAS 토큰으로 Blob REST API 호출
//! ```
//!
//! 저장 키는 `{category}/{uuid}.{ext}` 형식이며 MongoDB 문서에는
//! [`StoredFile`]로 키와 메타데이터만 기록합니다.
//!
//! ```rust,ignore
//! let store = UploadStore::from_config()?;
//! ServiceLocator::set(Arc::new(store));
//!
//! // 서비스에서
//! let stored = self.upload_store.save("cv", file, &extension).await?;
//! let bytes = self.upload_store.read(&stored).await?;
//! ```

pub mod local_disk;
pub mod azure_blob;

pub use local_disk::LocalDiskStorage;
pub use azure_blob::AzureBlobStorage;

use async_trait::async_trait;
use uuid::Uuid;
use crate::config::{StorageBackend, UploadConfig};
use crate::core::errors::AppError;
use crate::domain::entities::files::StoredFile;
use crate::utils::multipart::{UploadedFile, content_type_for};

/// 업로드 파일 저장소 인터페이스
#[async_trait]
pub trait FileStorage: Send + Sync {
    fn backend(&self) -> StorageBackend;

    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), AppError>;

    /// 키에 해당하는 파일이 없으면 `NotFound`
    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError>;

    /// 이미 없는 파일을 지워도 성공입니다.
    async fn delete(&self, key: &str) -> Result<(), AppError>;
}

/// 저장소 키 검증
///
/// 비어 있거나, 절대 경로이거나, `..` 구간을 포함한 키는 거부합니다.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(AppError::StorageError(format!("Clé de stockage invalide: '{}'", key)));
    }
    Ok(())
}

/// 서비스가 사용하는 업로드 저장소
pub struct UploadStore {
    storage: Box<dyn FileStorage>,
}

impl UploadStore {
    pub fn new(storage: Box<dyn FileStorage>) -> Self {
        Self { storage }
    }

    /// `STORAGE_BACKEND`에 따라 저장소를 만듭니다.
    ///
    /// `azure`인데 `AZURE_BLOB_CONTAINER_URL`이 없으면 시작 단계에서 실패합니다.
    pub fn from_config() -> Result<Self, AppError> {
        match UploadConfig::backend() {
            StorageBackend::Local => Ok(Self::new(Box::new(LocalDiskStorage::new(UploadConfig::upload_dir())))),
            StorageBackend::Azure => {
                let container_url = UploadConfig::azure_container_url().ok_or_else(|| {
                    AppError::StorageError(
                        "STORAGE_BACKEND=azure mais AZURE_BLOB_CONTAINER_URL n'est pas défini".to_string(),
                    )
                })?;
                Ok(Self::new(Box::new(AzureBlobStorage::new(
                    container_url,
                    UploadConfig::azure_sas_token(),
                ))))
            }
        }
    }

    pub fn backend(&self) -> StorageBackend {
        self.storage.backend()
    }

    /// 파일을 `{category}/{uuid}.{extension}` 키로 저장합니다.
    pub async fn save(&self, category: &str, file: UploadedFile, extension: &str) -> Result<StoredFile, AppError> {
        let key = format!("{}/{}.{}", category, Uuid::new_v4().simple(), extension);
        validate_key(&key)?;

        let content_type = content_type_for(extension).to_string();
        let size = file.size() as i64;
        self.storage.put(&key, &file.bytes, &content_type).await?;

        log::info!("📁 Fichier enregistré: {} ({} octets, {})", key, size, self.backend().as_str());

        Ok(StoredFile {
            key,
            original_name: file.file_name,
            content_type,
            size,
            backend: self.backend().as_str().to_string(),
        })
    }

    pub async fn read(&self, file: &StoredFile) -> Result<Vec<u8>, AppError> {
        validate_key(&file.key)?;
        self.storage.get(&file.key).await
    }

    /// 파일을 지웁니다. 실패는 로그만 남깁니다.
    ///
    /// 문서 삭제가 이미 끝난 뒤에 호출되므로 남은 파일은 요청 실패 사유가 아닙니다.
    pub async fn remove(&self, file: &StoredFile) {
        let result = match validate_key(&file.key) {
            Ok(()) => self.storage.delete(&file.key).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            log::warn!("⚠️ Suppression du fichier '{}' impossible: {}", file.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            field_name: "cv".to_string(),
            file_name: name.to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("cv/abc.pdf").is_ok());
        assert!(validate_key("videos/2f1e.mp4").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("cv/../../etc/passwd").is_err());
        assert!(validate_key("cv//abc.pdf").is_err());
        assert!(validate_key("cv\\abc.pdf").is_err());
    }

    #[actix_web::test]
    async fn test_save_read_remove_with_local_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(Box::new(LocalDiskStorage::new(dir.path())));

        let stored = store.save("cv", upload("CV Dupont.pdf", b"%PDF-1.4"), "pdf").await.unwrap();

        assert!(stored.key.starts_with("cv/"));
        assert!(stored.key.ends_with(".pdf"));
        assert_eq!(stored.original_name, "CV Dupont.pdf");
        assert_eq!(stored.content_type, "application/pdf");
        assert_eq!(stored.size, 8);
        assert_eq!(stored.backend, "local");

        assert_eq!(store.read(&stored).await.unwrap(), b"%PDF-1.4".to_vec());

        store.remove(&stored).await;
        let err = store.read(&stored).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_keys_are_unique_per_upload() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(Box::new(LocalDiskStorage::new(dir.path())));

        let first = store.save("cv", upload("cv.pdf", b"a"), "pdf").await.unwrap();
        let second = store.save("cv", upload("cv.pdf", b"b"), "pdf").await.unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(store.read(&first).await.unwrap(), b"a".to_vec());
    }

    #[actix_web::test]
    async fn test_read_rejects_traversal_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(Box::new(LocalDiskStorage::new(dir.path())));

        let forged = StoredFile {
            key: "../secret.pdf".to_string(),
            original_name: "secret.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            size: 1,
            backend: "local".to_string(),
        };

        assert!(matches!(store.read(&forged).await, Err(AppError::StorageError(_))));
    }
}
