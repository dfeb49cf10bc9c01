//! # 인증 서비스 구현
//!
//! 가입, 로그인, 토큰 갱신, 로그아웃, 비밀번호 변경을 담당합니다.
//!
//! ## 토큰 폐기
//!
//! ```text
//! logout           → 제시된 access 토큰 (+ 선택적 refresh 토큰) 폐기
//! refresh          → 사용한 refresh 토큰 폐기 후 새 토큰 쌍 발급
//! change_password  → 제시된 access 토큰 폐기
//! ```
//!
//! 폐기된 토큰은 `token_blacklist`에 만료 시각까지 남고, 인증 미들웨어가
//! 매 요청마다 [`AuthService::is_revoked`]로 확인합니다.
//!
//! ## 감사 로그
//!
//! 가입/로그인 성공·실패/로그아웃/비밀번호 변경은 `auth_logs`에 기록합니다.
//! 감사 로그 저장 실패는 요청을 실패시키지 않고 `error` 로그만 남깁니다.

use std::sync::Arc;
use bcrypt::{hash, verify};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use singleton_macro::service;
use crate::{
    config::PasswordConfig,
    core::errors::{AppError, ErrorContext},
    domain::dto::users::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UserResponse},
    domain::entities::candidates::CandidateProfile,
    domain::entities::security::{AuthEvent, AuthEventKind, RevokedToken},
    domain::entities::users::{User, UserRole},
    domain::models::auth::{AuthenticatedUser, ClientInfo},
    domain::models::token::TokenType,
    repositories::candidates::CandidateRepository,
    repositories::security::{AuthLogRepository, BlacklistRepository},
    repositories::users::UserRepository,
    services::auth::TokenService,
    utils::bson_utils::from_unix_seconds,
    utils::string_utils::{clean_optional_string, normalize_email, validate_required_string},
};

const INVALID_CREDENTIALS: &str = "Email ou mot de passe incorrect";

#[service(name = "auth")]
pub struct AuthService {
    user_repo: Arc<UserRepository>,
    candidate_repo: Arc<CandidateRepository>,
    blacklist_repo: Arc<BlacklistRepository>,
    auth_log_repo: Arc<AuthLogRepository>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// 회원 가입
    ///
    /// 1. 역할 확인 (`admin`은 직접 가입 불가)
    /// 2. 이메일 중복 확인 → 400
    /// 3. bcrypt 해싱 후 저장 (고유 인덱스가 동시 가입도 막음)
    /// 4. `candidat`이면 빈 프로필 생성
    /// 5. 토큰 쌍 발급
    pub async fn register(&self, request: RegisterRequest, client: &ClientInfo) -> Result<AuthResponse, AppError> {
        let role = UserRole::from_str(&request.role)
            .filter(UserRole::can_self_register)
            .ok_or_else(|| AppError::ValidationError("Le rôle doit être 'candidat' ou 'recruteur'".to_string()))?;

        let email = normalize_email(&request.email);
        let nom = validate_required_string(&request.nom, "nom")?;
        let prenom = validate_required_string(&request.prenom, "prenom")?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError("Cet email est déjà utilisé".to_string()));
        }

        let password_hash = self.hash_password(&request.password)?;
        let user = User::new(email, password_hash, nom, prenom, clean_optional_string(request.telephone), role);
        let user = self.user_repo.create(user).await?;
        let user_id = user.id.ok_or_else(|| AppError::InternalError("Utilisateur sans identifiant".to_string()))?;

        if role == UserRole::Candidat {
            self.candidate_repo.create(CandidateProfile::empty(user_id)).await?;
        }

        self.record_event(AuthEventKind::Register, &user.email, Some(user_id), client).await;
        log::info!("👤 Nouveau compte {}: {}", role.as_str(), user.email);

        let tokens = self.token_service.generate_token_pair(&user)?;
        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }

    /// 로그인
    ///
    /// 존재하지 않는 이메일과 틀린 비밀번호는 같은 메시지의 401입니다.
    pub async fn login(&self, request: LoginRequest, client: &ClientInfo) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                self.record_event(AuthEventKind::LoginFailure, &email, None, client).await;
                log::warn!("🔒 Échec de connexion (compte inconnu): {}", email);
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !self.verify_password(&request.password, &user.password_hash)? {
            self.record_event(AuthEventKind::LoginFailure, &email, user.id, client).await;
            log::warn!("🔒 Échec de connexion (mot de passe): {}", email);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        if !user.is_active {
            self.record_event(AuthEventKind::LoginFailure, &email, user.id, client).await;
            return Err(AppError::AuthenticationError("Ce compte est désactivé".to_string()));
        }

        let user_id = user.id.ok_or_else(|| AppError::InternalError("Utilisateur sans identifiant".to_string()))?;
        let now = DateTime::now();
        let user = self.user_repo
            .update(&user_id, doc! { "last_login_at": now, "updated_at": now })
            .await?
            .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

        self.record_event(AuthEventKind::LoginSuccess, &user.email, Some(user_id), client).await;

        let tokens = self.token_service.generate_token_pair(&user)?;
        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }

    /// refresh 토큰으로 새 토큰 쌍을 발급하고, 사용한 refresh 토큰은 폐기합니다.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AppError> {
        let claims = self.token_service.verify_token(refresh_token, TokenType::Refresh)?;

        if self.is_revoked(&claims.jti).await? {
            return Err(AppError::AuthenticationError("Jeton révoqué".to_string()));
        }

        let user_id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthenticationError("Jeton invalide".to_string()))?;

        let user = self.user_repo
            .find_by_id(&user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| AppError::AuthenticationError("Compte introuvable ou désactivé".to_string()))?;

        let rotated = self.blacklist_repo
            .revoke(&self.revocation(
                claims.jti,
                self.token_service.hash_token(refresh_token),
                user_id,
                claims.exp,
                "refresh_rotated",
            ))
            .await?;

        // 같은 refresh 토큰으로 동시에 들어온 요청은 먼저 폐기한 쪽만 통과
        if !rotated {
            log::warn!("🔒 Jeton de rafraîchissement réutilisé: {}", user.email);
            return Err(AppError::AuthenticationError("Jeton révoqué".to_string()));
        }

        let tokens = self.token_service.generate_token_pair(&user)?;
        Ok(AuthResponse { user: UserResponse::from(user), tokens })
    }

    /// 로그아웃
    ///
    /// 제시된 access 토큰을 폐기합니다. 같은 사용자의 유효한 refresh 토큰이 함께
    /// 오면 그것도 폐기하고, 검증되지 않는 refresh 토큰은 무시합니다.
    pub async fn logout(&self, user: &AuthenticatedUser, refresh_token: Option<&str>, client: &ClientInfo) -> Result<(), AppError> {
        let user_id = user.object_id()?;

        self.blacklist_repo
            .revoke(&self.revocation(
                user.token_jti.clone(),
                user.token_hash.clone(),
                user_id,
                user.token_expires_at,
                "logout",
            ))
            .await?;

        if let Some(refresh_token) = refresh_token {
            match self.token_service.verify_token(refresh_token, TokenType::Refresh) {
                Ok(claims) if claims.sub == user.user_id => {
                    self.blacklist_repo
                        .revoke(&self.revocation(
                            claims.jti,
                            self.token_service.hash_token(refresh_token),
                            user_id,
                            claims.exp,
                            "logout",
                        ))
                        .await?;
                }
                _ => log::debug!("Jeton de rafraîchissement ignoré à la déconnexion de {}", user.email),
            }
        }

        self.record_event(AuthEventKind::Logout, &user.email, Some(user_id), client).await;
        Ok(())
    }

    /// 비밀번호 변경
    ///
    /// 현재 비밀번호가 틀리면 401. 성공하면 제시된 access 토큰을 폐기합니다.
    pub async fn change_password(&self, user: &AuthenticatedUser, request: ChangePasswordRequest, client: &ClientInfo) -> Result<(), AppError> {
        let user_id = user.object_id()?;

        let account = self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Utilisateur introuvable".to_string()))?;

        if !self.verify_password(&request.current_password, &account.password_hash)? {
            log::warn!("🔒 Mot de passe actuel incorrect: {}", account.email);
            return Err(AppError::AuthenticationError("Mot de passe actuel incorrect".to_string()));
        }

        let password_hash = self.hash_password(&request.new_password)?;
        self.user_repo
            .update(&user_id, doc! { "password_hash": password_hash, "updated_at": DateTime::now() })
            .await?;

        self.blacklist_repo
            .revoke(&self.revocation(
                user.token_jti.clone(),
                user.token_hash.clone(),
                user_id,
                user.token_expires_at,
                "password_changed",
            ))
            .await?;

        self.record_event(AuthEventKind::PasswordChanged, &account.email, Some(user_id), client).await;
        log::info!("🔑 Mot de passe modifié: {}", account.email);
        Ok(())
    }

    pub async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        self.blacklist_repo.is_revoked(jti).await
    }

    fn revocation(&self, jti: String, token_hash: String, user_id: ObjectId, exp: i64, reason: &str) -> RevokedToken {
        RevokedToken {
            id: None,
            jti,
            token_hash,
            user_id,
            reason: reason.to_string(),
            expires_at: from_unix_seconds(exp),
            created_at: DateTime::now(),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let start_time = std::time::Instant::now();

        let password_hash = hash(password, PasswordConfig::bcrypt_cost())
            .context("Hachage du mot de passe impossible")?;

        log::debug!("Password hashing took: {:?}", start_time.elapsed());
        Ok(password_hash)
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        verify(password, password_hash)
            .context("Vérification du mot de passe impossible")
    }

    async fn record_event(&self, kind: AuthEventKind, email: &str, user_id: Option<ObjectId>, client: &ClientInfo) {
        let event = AuthEvent::new(kind, email, user_id, client.ip_address.clone(), client.user_agent.clone());

        if let Err(e) = self.auth_log_repo.record(event).await {
            log::error!("❌ Journal d'authentification non enregistré ({:?}, {}): {}", kind, email, e);
        }
    }
}
