//! 회사 핸들러 (`/api/entreprises`)
//!
//! 조회는 공개, 등록/수정은 `recruteur` 또는 `admin`입니다.
use actix_web::{get, post, put, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::companies::{CompanyQuery, CreateCompanyRequest, UpdateCompanyRequest},
    domain::entities::users::UserRole,
    domain::models::auth::AuthenticatedUser,
    services::companies::CompanyService,
};

const COMPANY_EDITORS: &[UserRole] = &[UserRole::Recruteur, UserRole::Admin];

#[get("")]
pub async fn list_companies(query: web::Query<CompanyQuery>) -> Result<HttpResponse, AppError> {
    let companies = CompanyService::instance().list(&query).await?;
    Ok(HttpResponse::Ok().json(companies))
}

#[get("/{id}")]
pub async fn get_company(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let company = CompanyService::instance().get(&path).await?;
    Ok(HttpResponse::Ok().json(company))
}

/// # Endpoint
/// `POST /api/entreprises`
#[post("")]
pub async fn create_company(
    user: AuthenticatedUser,
    payload: web::Json<CreateCompanyRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any_role(COMPANY_EDITORS)?;
    payload.validate()?;

    let company = CompanyService::instance().create(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(company))
}

/// # Endpoint
/// `PUT /api/entreprises/{id}`
#[put("/{id}")]
pub async fn update_company(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateCompanyRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any_role(COMPANY_EDITORS)?;
    payload.validate()?;

    let company = CompanyService::instance()
        .update(&user, &path, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(company))
}
