//! # Multipart 업로드 파싱
//!
//! CV(`cv`)와 면접 녹화(`video`) 업로드 요청을 메모리로 읽어 들이고,
//! 확장자와 크기를 검증합니다.
//!
//! ```rust,ignore
//! #[post("/{offre_id}/candidatures")]
//! async fn apply(user: AuthenticatedUser, payload: Multipart) -> Result<HttpResponse, AppError> {
//!     let mut form = read_multipart(payload, &APPLICATION_UPLOAD, UploadConfig::max_cv_bytes()).await?;
//!     let cv = form.file("cv");
//!     let lettre = form.text("lettre_motivation");
//!     // ...
//! }
//! ```

use std::collections::HashMap;
use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use crate::core::errors::AppError;

/// CV로 허용되는 확장자
pub const CV_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

/// 면접 녹화로 허용되는 확장자
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "mkv"];

/// 텍스트 필드(lettre_motivation, transcription) 최대 크기
const MAX_TEXT_FIELD_BYTES: usize = 256 * 1024;

/// 업로드된 파일 하나
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// 소문자 확장자 (`CV.PDF` → `pdf`)
    pub fn extension(&self) -> Option<String> {
        file_extension(&self.file_name)
    }
}

/// 파싱된 multipart 요청
#[derive(Debug, Default)]
pub struct MultipartForm {
    files: HashMap<String, UploadedFile>,
    texts: HashMap<String, String>,
}

impl MultipartForm {
    /// 이름이 `name`인 파일 필드. 같은 이름이 여러 번 오면 마지막 값입니다.
    pub fn file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// 공백을 제거한 텍스트 필드. 비어 있으면 `None`.
    pub fn text(&self, name: &str) -> Option<String> {
        self.texts
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn insert_text(&mut self, name: &str, value: &str) {
        self.texts.insert(name.to_string(), value.to_string());
    }

    pub fn insert_file(&mut self, file: UploadedFile) {
        self.files.insert(file.field_name.clone(), file);
    }
}

/// 요청에서 읽어 들일 필드 이름
///
/// 목록에 없는 필드는 버퍼에 담지 않고 흘려보냅니다.
#[derive(Debug, Clone, Copy)]
pub struct UploadFields {
    pub file: &'static str,
    pub texts: &'static [&'static str],
}

impl UploadFields {
    fn accepts_text(&self, name: &str) -> bool {
        self.texts.contains(&name)
    }
}

/// 지원서: `cv` 파일 + `lettre_motivation`
pub const APPLICATION_UPLOAD: UploadFields = UploadFields { file: "cv", texts: &["lettre_motivation"] };

/// 프로필 CV 교체: `cv` 파일만
pub const PROFILE_CV_UPLOAD: UploadFields = UploadFields { file: "cv", texts: &[] };

/// 면접 녹화: `video` 파일 + `transcription`
pub const RECORDING_UPLOAD: UploadFields = UploadFields { file: "video", texts: &["transcription"] };

/// multipart 스트림 전체를 읽습니다.
///
/// `fields`에 지정된 파일 필드와 텍스트 필드만 메모리에 담습니다.
/// 파일은 `max_file_bytes`, 텍스트는 필드당 256 KiB까지이고, 담긴 바이트 합계가
/// `max_file_bytes + 256 KiB`를 넘으면 읽기를 멈추고 400을 반환합니다.
pub async fn read_multipart(
    mut payload: Multipart,
    fields: &UploadFields,
    max_file_bytes: usize,
) -> Result<MultipartForm, AppError> {
    let total_limit = max_file_bytes.saturating_add(MAX_TEXT_FIELD_BYTES);
    let mut total = 0usize;
    let mut form = MultipartForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("Requête multipart invalide: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_string);
        let content_type = field.content_type().map(|mime| mime.to_string());

        let limit = match &file_name {
            Some(_) if field_name == fields.file => max_file_bytes,
            None if fields.accepts_text(&field_name) => MAX_TEXT_FIELD_BYTES,
            _ => {
                // 알 수 없는 필드: 내용은 버림
                while field
                    .try_next()
                    .await
                    .map_err(|e| AppError::ValidationError(format!("Lecture du champ '{}' impossible: {}", field_name, e)))?
                    .is_some()
                {}
                log::debug!("Champ multipart ignoré: '{}'", field_name);
                continue;
            }
        };

        let mut bytes = Vec::new();

        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("Lecture du champ '{}' impossible: {}", field_name, e)))?
        {
            if bytes.len() + chunk.len() > limit {
                return Err(AppError::ValidationError(format!(
                    "Le champ '{}' dépasse la taille maximale autorisée ({} octets)",
                    field_name,
                    limit
                )));
            }
            if total + chunk.len() > total_limit {
                return Err(AppError::ValidationError(format!(
                    "La requête dépasse la taille maximale autorisée ({} octets)",
                    total_limit
                )));
            }
            total += chunk.len();
            bytes.extend_from_slice(&chunk);
        }

        match file_name {
            Some(file_name) => {
                // 빈 파일 입력은 파일을 보내지 않은 것으로 취급
                if bytes.is_empty() || file_name.trim().is_empty() {
                    continue;
                }
                form.insert_file(UploadedFile {
                    field_name,
                    file_name,
                    content_type,
                    bytes,
                });
            }
            None => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| AppError::ValidationError(format!("Le champ '{}' doit être du texte UTF-8", field_name)))?;
                form.insert_text(&field_name, &value);
            }
        }
    }

    Ok(form)
}

/// 파일 이름에서 소문자 확장자를 추출합니다.
pub fn file_extension(file_name: &str) -> Option<String> {
    let name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, extension) = name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_lowercase())
}

/// 확장자와 크기를 검증하고 확장자를 반환합니다.
pub fn validate_upload(file: &UploadedFile, allowed: &[&str], max_bytes: usize) -> Result<String, AppError> {
    let extension = file.extension().ok_or_else(|| {
        AppError::ValidationError(format!("Le fichier '{}' n'a pas d'extension", file.file_name))
    })?;

    if !allowed.contains(&extension.as_str()) {
        return Err(AppError::ValidationError(format!(
            "Format de fichier non autorisé: .{} (formats acceptés: {})",
            extension,
            allowed.join(", ")
        )));
    }

    if file.size() == 0 {
        return Err(AppError::ValidationError("Le fichier est vide".to_string()));
    }

    if file.size() > max_bytes {
        return Err(AppError::ValidationError(format!(
            "Le fichier dépasse la taille maximale autorisée ({} octets)",
            max_bytes
        )));
    }

    Ok(extension)
}

/// 확장자별 저장 Content-Type
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: usize) -> UploadedFile {
        UploadedFile {
            field_name: "cv".to_string(),
            file_name: name.to_string(),
            content_type: None,
            bytes: vec![b'x'; size],
        }
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("CV_Dupont.PDF"), Some("pdf".to_string()));
        assert_eq!(file_extension("lettre.v2.docx"), Some("docx".to_string()));
        assert_eq!(file_extension("C:\\Users\\jean\\cv.doc"), Some("doc".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".bashrc"), None);
        assert_eq!(file_extension("cv."), None);
    }

    #[test]
    fn test_validate_cv_extensions() {
        assert_eq!(validate_upload(&file("cv.pdf", 10), CV_EXTENSIONS, 100).unwrap(), "pdf");
        assert_eq!(validate_upload(&file("cv.DOCX", 10), CV_EXTENSIONS, 100).unwrap(), "docx");

        let err = validate_upload(&file("cv.exe", 10), CV_EXTENSIONS, 100).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(validate_upload(&file("cv", 10), CV_EXTENSIONS, 100).is_err());
    }

    #[test]
    fn test_validate_video_extensions() {
        assert!(validate_upload(&file("entretien.mp4", 10), VIDEO_EXTENSIONS, 100).is_ok());
        assert!(validate_upload(&file("entretien.webm", 10), VIDEO_EXTENSIONS, 100).is_ok());
        assert!(validate_upload(&file("entretien.pdf", 10), VIDEO_EXTENSIONS, 100).is_err());
    }

    #[test]
    fn test_validate_upload_size() {
        assert!(validate_upload(&file("cv.pdf", 100), CV_EXTENSIONS, 100).is_ok());
        assert!(validate_upload(&file("cv.pdf", 101), CV_EXTENSIONS, 100).is_err());
        assert!(validate_upload(&file("cv.pdf", 0), CV_EXTENSIONS, 100).is_err());
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("pdf"), "application/pdf");
        assert_eq!(content_type_for("mov"), "video/quicktime");
        assert_eq!(content_type_for("zip"), "application/octet-stream");
    }

    #[test]
    fn test_form_text_is_trimmed() {
        let mut form = MultipartForm::default();
        form.insert_text("lettre_motivation", "  Bonjour  ");
        form.insert_text("transcription", "   ");

        assert_eq!(form.text("lettre_motivation"), Some("Bonjour".to_string()));
        assert_eq!(form.text("transcription"), None);
        assert_eq!(form.text("absent"), None);
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Multipart {
        use actix_web::error::PayloadError;
        use actix_web::http::header::{self, HeaderMap, HeaderValue};
        use actix_web::web::Bytes;

        let boundary = "----champs-test";
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match file_name {
                Some(file_name) => body.extend_from_slice(format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                ).as_bytes()),
                None => body.extend_from_slice(format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    name
                ).as_bytes()),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={}", boundary)).unwrap(),
        );
        let stream = futures_util::stream::once(async move { Ok::<_, PayloadError>(Bytes::from(body)) });
        Multipart::new(&headers, stream)
    }

    #[actix_web::test]
    async fn test_read_multipart_keeps_expected_fields() {
        let payload = multipart_request(&[
            ("lettre_motivation", None, b"Bonjour"),
            ("cv", Some("cv.pdf"), b"%PDF-1.4"),
            ("autre", None, b"ignore"),
        ]);

        let mut form = read_multipart(payload, &APPLICATION_UPLOAD, 1024).await.unwrap();

        assert_eq!(form.text("lettre_motivation"), Some("Bonjour".to_string()));
        assert_eq!(form.text("autre"), None);
        assert_eq!(form.file("cv").unwrap().bytes, b"%PDF-1.4".to_vec());
    }

    #[actix_web::test]
    async fn test_read_multipart_drops_unexpected_files() {
        let chunk = vec![b'x'; 1024];
        let names: Vec<String> = (0..20).map(|i| format!("f{}", i)).collect();
        let parts: Vec<(&str, Option<&str>, &[u8])> = names
            .iter()
            .map(|name| (name.as_str(), Some("piece.pdf"), chunk.as_slice()))
            .collect();

        let mut form = read_multipart(multipart_request(&parts), &APPLICATION_UPLOAD, 2048).await.unwrap();

        assert!(form.files.is_empty());
        assert!(form.file("cv").is_none());
    }

    #[actix_web::test]
    async fn test_read_multipart_rejects_oversized_file() {
        let payload = multipart_request(&[("cv", Some("cv.pdf"), &[b'x'; 100])]);

        let err = read_multipart(payload, &PROFILE_CV_UPLOAD, 50).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_web::test]
    async fn test_read_multipart_caps_repeated_file_field() {
        let chunk = vec![b'x'; 40];
        let parts: Vec<(&str, Option<&str>, &[u8])> = (0..10_000)
            .map(|_| ("cv", Some("cv.pdf"), chunk.as_slice()))
            .collect();

        let err = read_multipart(multipart_request(&parts), &PROFILE_CV_UPLOAD, 50).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_form_file_is_taken_once() {
        let mut form = MultipartForm::default();
        form.insert_file(file("cv.pdf", 3));

        assert!(form.file("cv").is_some());
        assert!(form.file("cv").is_none());
    }
}
