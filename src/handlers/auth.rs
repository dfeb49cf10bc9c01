//! Authentication HTTP Handlers
//!
//! `/api/auth` 스코프는 선택적 인증으로 감싸져 있습니다. 가입/로그인/갱신은
//! 토큰 없이 호출하고, 나머지는 `AuthenticatedUser` 추출기가 401을 돌려줍니다.
//!
//! - `POST /register`, `POST /login`, `POST /refresh`
//! - `POST /logout`, `GET /me`, `PUT /me`, `PUT /me/password`
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::common::MessageResponse,
    domain::dto::users::{ChangePasswordRequest, LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest, UpdateMeRequest},
    domain::models::auth::{AuthenticatedUser, ClientInfo},
    services::auth::AuthService,
    services::users::UserService,
};

/// 쿠키로 refresh 토큰을 보낼 때의 이름
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// 회원가입
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(
    req: HttpRequest,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance()
        .register(payload.into_inner(), &ClientInfo::from_request(&req))
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 로그인
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance()
        .login(payload.into_inner(), &ClientInfo::from_request(&req))
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신
///
/// refresh 토큰은 본문 `refresh_token` 또는 같은 이름의 쿠키로 받습니다.
///
/// # Endpoint
/// `POST /api/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    req: HttpRequest,
    payload: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = payload
        .and_then(|body| body.into_inner().refresh_token)
        .or_else(|| req.cookie(REFRESH_TOKEN_COOKIE).map(|cookie| cookie.value().to_string()))
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| AppError::AuthenticationError("Jeton de rafraîchissement manquant".to_string()))?;

    let response = AuthService::instance().refresh(refresh_token.trim()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 로그아웃
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    user: AuthenticatedUser,
    payload: Option<web::Json<LogoutRequest>>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = payload.and_then(|body| body.into_inner().refresh_token);

    AuthService::instance()
        .logout(&user, refresh_token.as_deref(), &ClientInfo::from_request(&req))
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Déconnexion réussie")))
}

/// 현재 사용자
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().me(&user).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// # Endpoint
/// `PUT /api/auth/me`
#[put("/me")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateMeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = UserService::instance().update_me(&user, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 비밀번호 변경. 사용한 access 토큰은 폐기되므로 다시 로그인해야 합니다.
///
/// # Endpoint
/// `PUT /api/auth/me/password`
#[put("/me/password")]
pub async fn change_password(
    req: HttpRequest,
    user: AuthenticatedUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance()
        .change_password(&user, payload.into_inner(), &ClientInfo::from_request(&req))
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Mot de passe modifié, veuillez vous reconnecter")))
}
