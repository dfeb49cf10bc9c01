//! 로컬 디렉터리 업로드 저장소

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use crate::config::StorageBackend;
use crate::core::errors::AppError;
use super::FileStorage;

/// `root` 아래에 키 경로 그대로 파일을 씁니다.
pub struct LocalDiskStorage {
    root: PathBuf,
}

impl LocalDiskStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl FileStorage for LocalDiskStorage {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Local
    }

    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<(), AppError> {
        let path = self.path_for(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::StorageError(format!("Création du dossier {:?} impossible: {}", parent, e)))?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::StorageError(format!("Écriture de {:?} impossible: {}", path, e)))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let path = self.path_for(key);

        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::NotFound("Fichier introuvable".to_string()),
            _ => AppError::StorageError(format!("Lecture de {:?} impossible: {}", path, e)),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(format!("Suppression de {:?} impossible: {}", path, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_nests_categories() {
        let storage = LocalDiskStorage::new("Uploads");
        assert_eq!(storage.path_for("videos/a.mp4"), Path::new("Uploads").join("videos").join("a.mp4"));
    }

    #[actix_web::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDiskStorage::new(dir.path());

        assert!(storage.delete("cv/absent.pdf").await.is_ok());
    }
}
