//! 면접 핸들러
//!
//! - `/api/recruteur/entretiens`: 일정 생성, 목록, 수정, 취소 (`recruteur`)
//! - `/api/entretiens/{id}`: 조회와 녹화 (참여자)
use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    config::UploadConfig,
    core::errors::AppError,
    domain::dto::interviews::{CreateInterviewRequest, InterviewQuery, UpdateInterviewRequest},
    domain::models::auth::AuthenticatedUser,
    services::interviews::InterviewService,
    utils::multipart::{read_multipart, RECORDING_UPLOAD},
};

#[post("/entretiens")]
pub async fn schedule_interview(
    user: AuthenticatedUser,
    payload: web::Json<CreateInterviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let interview = InterviewService::instance().schedule(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(interview))
}

#[get("/entretiens")]
pub async fn recruiter_interviews(
    user: AuthenticatedUser,
    query: web::Query<InterviewQuery>,
) -> Result<HttpResponse, AppError> {
    let interviews = InterviewService::instance().list_for_recruiter(&user, &query).await?;
    Ok(HttpResponse::Ok().json(interviews))
}

#[put("/entretiens/{id}")]
pub async fn update_interview(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateInterviewRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let interview = InterviewService::instance()
        .update(&user, &path, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(interview))
}

/// 취소 (`annulé`)
#[delete("/entretiens/{id}")]
pub async fn cancel_interview(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let interview = InterviewService::instance().cancel(&user, &path).await?;
    Ok(HttpResponse::Ok().json(interview))
}

/// # Endpoint
/// `GET /api/entretiens/{id}`
#[get("/{id}")]
pub async fn get_interview(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let interview = InterviewService::instance().get(&user, &path).await?;
    Ok(HttpResponse::Ok().json(interview))
}

/// 녹화 업로드 (multipart: `video`, `transcription`)
///
/// # Endpoint
/// `POST /api/entretiens/{id}/enregistrements`
#[post("/{id}/enregistrements")]
pub async fn upload_recording(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_multipart(payload, &RECORDING_UPLOAD, UploadConfig::max_video_bytes()).await?;
    let recording = InterviewService::instance().add_recording(&user, &path, form).await?;
    Ok(HttpResponse::Created().json(recording))
}

#[get("/{id}/enregistrements")]
pub async fn list_recordings(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recordings = InterviewService::instance().list_recordings(&user, &path).await?;
    Ok(HttpResponse::Ok().json(recordings))
}
