//! 관리자 핸들러 (`/api/admin`, `admin` 역할 전용)
use actix_web::{get, put, web, HttpResponse};
use crate::{
    core::errors::AppError,
    domain::dto::users::{AuthLogQuery, UpdateActivationRequest},
    domain::models::auth::AuthenticatedUser,
    services::users::UserService,
};

/// 최근 인증 이벤트
///
/// # Endpoint
/// `GET /api/admin/auth-logs?email=&limit=`
#[get("/auth-logs")]
pub async fn auth_logs(query: web::Query<AuthLogQuery>) -> Result<HttpResponse, AppError> {
    let events = UserService::instance().list_auth_logs(&query).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// 계정 활성화/비활성화
///
/// # Endpoint
/// `PUT /api/admin/users/{id}/activation`
#[put("/users/{id}/activation")]
pub async fn set_activation(
    admin: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateActivationRequest>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance()
        .set_activation(&admin, &path, payload.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
