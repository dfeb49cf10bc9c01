//! 지원서 핸들러
//!
//! - `/api/recruteur/...`: 공고별 지원자 목록, 상태 변경
//! - `/api/candidatures/{id}/cv`: CV 다운로드 (지원자 본인 또는 공고 작성자)
use actix_web::http::header::ContentDisposition;
use actix_web::{get, put, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::applications::UpdateApplicationStatusRequest,
    domain::models::auth::AuthenticatedUser,
    services::applications::ApplicationService,
};

/// # Endpoint
/// `GET /api/recruteur/offres/{id}/candidatures`
#[get("/offres/{id}/candidatures")]
pub async fn offer_applications(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let applications = ApplicationService::instance().offer_applications(&user, &path).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// # Endpoint
/// `PUT /api/recruteur/candidatures/{id}/statut`
#[put("/candidatures/{id}/statut")]
pub async fn update_application_status(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateApplicationStatusRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let application = ApplicationService::instance()
        .update_status(&user, &path, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(application))
}

/// CV 파일 본문을 첨부 파일로 내려보냅니다.
///
/// # Endpoint
/// `GET /api/candidatures/{id}/cv`
#[get("/{id}/cv")]
pub async fn download_cv(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let (file, bytes) = ApplicationService::instance().download_cv(&user, &path).await?;

    Ok(HttpResponse::Ok()
        .content_type(file.content_type.as_str())
        .insert_header(ContentDisposition::attachment(file.original_name))
        .body(bytes))
}
