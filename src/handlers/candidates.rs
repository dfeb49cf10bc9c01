//! 지원자 핸들러 (`/api/candidates`, `candidat` 역할 전용)
use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    config::UploadConfig,
    core::errors::AppError,
    domain::dto::candidates::UpdateProfileRequest,
    domain::dto::common::MessageResponse,
    domain::dto::interviews::InterviewQuery,
    domain::models::auth::AuthenticatedUser,
    services::applications::ApplicationService,
    services::candidates::CandidateService,
    services::interviews::InterviewService,
    utils::multipart::{read_multipart, PROFILE_CV_UPLOAD},
};

#[get("/profil")]
pub async fn get_profile(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = CandidateService::instance().get_profile(&user).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[put("/profil")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let profile = CandidateService::instance()
        .update_profile(&user, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 프로필 CV 교체 (multipart: `cv`)
#[post("/cv")]
pub async fn upload_cv(user: AuthenticatedUser, payload: Multipart) -> Result<HttpResponse, AppError> {
    let form = read_multipart(payload, &PROFILE_CV_UPLOAD, UploadConfig::max_cv_bytes()).await?;
    let profile = CandidateService::instance().upload_cv(&user, form).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/candidatures")]
pub async fn my_applications(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let applications = ApplicationService::instance().my_applications(&user).await?;
    Ok(HttpResponse::Ok().json(applications))
}

/// 지원 철회
#[delete("/candidatures/{id}")]
pub async fn withdraw_application(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ApplicationService::instance().withdraw(&user, &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Candidature retirée")))
}

#[get("/entretiens")]
pub async fn my_interviews(
    user: AuthenticatedUser,
    query: web::Query<InterviewQuery>,
) -> Result<HttpResponse, AppError> {
    let interviews = InterviewService::instance().list_for_candidate(&user, &query).await?;
    Ok(HttpResponse::Ok().json(interviews))
}
