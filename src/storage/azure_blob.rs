//! Azure Blob Storage 업로드 저장소
//!
//! 컨테이너 URL과 SAS 토큰으로 Blob REST API를 직접 호출합니다.
//!
//! ```bash
//! export STORAGE_BACKEND="azure"
//! export AZURE_BLOB_CONTAINER_URL="https://account.blob.core.windows.net/uploads"
//! export AZURE_BLOB_SAS_TOKEN="sv=2022-11-02&ss=b&srt=o&sp=rwd&sig=..."
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use crate::config::StorageBackend;
use crate::core::errors::AppError;
use super::FileStorage;

pub struct AzureBlobStorage {
    client: reqwest::Client,
    container_url: String,
    sas_token: Option<String>,
}

impl AzureBlobStorage {
    pub fn new(container_url: String, sas_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            container_url: container_url.trim_end_matches('/').to_string(),
            sas_token,
        }
    }

    /// 키의 각 구간을 URL 인코딩하고 SAS 토큰을 쿼리로 붙입니다.
    fn blob_url(&self, key: &str) -> String {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        match &self.sas_token {
            Some(sas) => format!("{}/{}?{}", self.container_url, encoded_key, sas),
            None => format!("{}/{}", self.container_url, encoded_key),
        }
    }
}

#[async_trait]
impl FileStorage for AzureBlobStorage {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Azure
    }

    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), AppError> {
        let response = self.client
            .put(self.blob_url(key))
            .header("x-ms-blob-type", "BlockBlob")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Envoi vers Azure Blob impossible: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::StorageError(format!(
                "Azure Blob a refusé l'envoi de '{}' ({}): {}", key, status, error_text
            )));
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, AppError> {
        let response = self.client
            .get(self.blob_url(key))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Lecture Azure Blob impossible: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Fichier introuvable".to_string())),
            status if !status.is_success() => Err(AppError::StorageError(format!(
                "Azure Blob a refusé la lecture de '{}' ({})", key, status
            ))),
            _ => response
                .bytes()
                .await
                .map(|bytes| bytes.to_vec())
                .map_err(|e| AppError::ExternalServiceError(format!("Lecture Azure Blob interrompue: {}", e))),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        let response = self.client
            .delete(self.blob_url(key))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Suppression Azure Blob impossible: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(AppError::StorageError(format!(
                "Azure Blob a refusé la suppression de '{}' ({})", key, status
            ))),
        }
    }
}
