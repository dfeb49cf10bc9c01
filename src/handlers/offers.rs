//! 채용 공고 핸들러
//!
//! `/api/offres-emploi`는 공개 조회와 `recruteur` 전용 작성/수정/삭제,
//! `candidat` 전용 지원이 한 스코프에 섞여 있어 역할을 핸들러에서 확인합니다.
use actix_multipart::Multipart;
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    config::UploadConfig,
    core::errors::AppError,
    domain::dto::common::MessageResponse,
    domain::dto::offers::{CreateOfferRequest, OfferQuery, UpdateOfferRequest},
    domain::entities::users::UserRole,
    domain::models::auth::AuthenticatedUser,
    services::applications::ApplicationService,
    services::offers::OfferService,
    utils::multipart::{read_multipart, APPLICATION_UPLOAD},
};

/// 공개 목록
///
/// # Endpoint
/// `GET /api/offres-emploi?statut=&q=&localisation=&type_contrat=&entreprise_id=&page=&limit=`
#[get("")]
pub async fn list_offers(query: web::Query<OfferQuery>) -> Result<HttpResponse, AppError> {
    let page = OfferService::instance().list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{id}")]
pub async fn get_offer(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let offer = OfferService::instance().get(&path).await?;
    Ok(HttpResponse::Ok().json(offer))
}

#[post("")]
pub async fn create_offer(
    user: AuthenticatedUser,
    payload: web::Json<CreateOfferRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any_role(&[UserRole::Recruteur])?;
    payload.validate()?;

    let offer = OfferService::instance().create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(offer))
}

#[put("/{id}")]
pub async fn update_offer(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateOfferRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any_role(&[UserRole::Recruteur])?;
    payload.validate()?;

    let offer = OfferService::instance()
        .update(&user, &path, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(offer))
}

#[delete("/{id}")]
pub async fn delete_offer(
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.require_any_role(&[UserRole::Recruteur])?;

    OfferService::instance().delete(&user, &path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Offre supprimée")))
}

/// 지원 (multipart: `cv`, `lettre_motivation`)
///
/// # Endpoint
/// `POST /api/offres-emploi/{id}/candidatures`
#[post("/{id}/candidatures")]
pub async fn apply_to_offer(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    user.require_any_role(&[UserRole::Candidat])?;

    let form = read_multipart(payload, &APPLICATION_UPLOAD, UploadConfig::max_cv_bytes()).await?;
    let application = ApplicationService::instance().apply(&user, &path, form).await?;
    Ok(HttpResponse::Created().json(application))
}

/// 채용 담당자 본인 공고 (지원자 수 포함)
///
/// # Endpoint
/// `GET /api/recruteur/offres`
#[get("/offres")]
pub async fn my_offers(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let offers = OfferService::instance().recruiter_offers(&user).await?;
    Ok(HttpResponse::Ok().json(offers))
}
