//! JWT 토큰 관리 서비스 구현
//!
//! HS256으로 서명한 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 토큰마다 UUID v4 `jti`를 넣어 블랙리스트 키로 사용하고,
//! 블랙리스트에는 토큰 원문 대신 SHA-256 해시를 저장합니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use singleton_macro::service;
use uuid::Uuid;
use crate::{
    config::JwtConfig,
    core::errors::{AppError, ErrorContext},
    domain::entities::users::User,
    domain::models::auth::AuthenticatedUser,
    domain::models::token::{TokenClaims, TokenPair, TokenType},
};

#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    /// 지정한 용도의 토큰 하나를 발급합니다.
    pub fn generate_token(&self, user: &User, typ: TokenType) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = match typ {
            TokenType::Access => now + Duration::seconds(JwtConfig::access_ttl_seconds()),
            TokenType::Refresh => now + Duration::seconds(JwtConfig::refresh_ttl_seconds()),
        };

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("Utilisateur sans identifiant".to_string())
            })?,
            email: user.email.clone(),
            role: user.role,
            typ,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: JwtConfig::issuer(),
        };

        self.encode_claims(&claims)
    }

    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_token(user, TokenType::Access)?,
            refresh_token: self.generate_token(user, TokenType::Refresh)?,
            token_type: "Bearer".to_string(),
            expires_in: JwtConfig::access_ttl_seconds(),
        })
    }

    fn encode_claims(&self, claims: &TokenClaims) -> Result<String, AppError> {
        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
            .context("Génération du jeton impossible")
    }

    /// 서명, 만료, 발급자, 용도를 검증합니다. 모든 실패는 401입니다.
    pub fn verify_token(&self, token: &str, expected: TokenType) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JwtConfig::issuer()]);

        let claims = decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Jeton expiré".to_string())
                }
                _ => AppError::AuthenticationError("Jeton invalide".to_string()),
            })?;

        if claims.typ != expected {
            return Err(AppError::AuthenticationError("Type de jeton incorrect".to_string()));
        }

        Ok(claims)
    }

    /// 액세스 토큰을 검증하고 요청 extensions에 넣을 사용자 정보를 만듭니다.
    ///
    /// 블랙리스트 확인은 호출하는 쪽(인증 미들웨어)의 책임입니다.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.verify_token(token, TokenType::Access)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            token_jti: claims.jti,
            token_expires_at: claims.exp,
            token_hash: self.hash_token(token),
        })
    }

    /// `Authorization` 헤더에서 Bearer 토큰을 꺼냅니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("En-tête Authorization invalide".to_string()))
    }

    /// 블랙리스트 저장용 SHA-256 hex
    pub fn hash_token(&self, token: &str) -> String {
        format!("{:x}", Sha256::digest(token.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use crate::domain::entities::users::UserRole;

    fn user(role: UserRole) -> User {
        let mut user = User::new(
            "claire.martin@example.fr".to_string(),
            "hash".to_string(),
            "Martin".to_string(),
            "Claire".to_string(),
            None,
            role,
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_token_pair_round_trip() {
        let service = TokenService::new();
        let user = user(UserRole::Recruteur);

        let pair = service.generate_token_pair(&user).unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, JwtConfig::access_ttl_seconds());

        let claims = service.verify_token(&pair.access_token, TokenType::Access).unwrap();
        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.role, UserRole::Recruteur);
        assert_eq!(claims.iss, JwtConfig::issuer());

        let refresh = service.verify_token(&pair.refresh_token, TokenType::Refresh).unwrap();
        assert_ne!(claims.jti, refresh.jti);
    }

    #[test]
    fn test_token_type_is_enforced() {
        let service = TokenService::new();
        let pair = service.generate_token_pair(&user(UserRole::Candidat)).unwrap();

        assert!(service.verify_token(&pair.refresh_token, TokenType::Access).is_err());
        assert!(service.authenticate(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_tampered_and_expired_tokens_are_rejected() {
        let service = TokenService::new();
        let pair = service.generate_token_pair(&user(UserRole::Candidat)).unwrap();

        let tampered = format!("{}x", pair.access_token);
        assert!(matches!(
            service.verify_token(&tampered, TokenType::Access),
            Err(AppError::AuthenticationError(_))
        ));

        let now = Utc::now().timestamp();
        let expired = service.encode_claims(&TokenClaims {
            sub: ObjectId::new().to_hex(),
            email: "old@example.fr".to_string(),
            role: UserRole::Candidat,
            typ: TokenType::Access,
            jti: Uuid::new_v4().to_string(),
            iat: now - 7200,
            exp: now - 3600,
            iss: JwtConfig::issuer(),
        }).unwrap();

        match service.verify_token(&expired, TokenType::Access) {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Jeton expiré"),
            other => panic!("Expected expired token error, got {:?}", other),
        }
    }

    #[test]
    fn test_authenticate_builds_user() {
        let service = TokenService::new();
        let user = user(UserRole::Admin);
        let token = service.generate_token(&user, TokenType::Access).unwrap();

        let authenticated = service.authenticate(&token).unwrap();

        assert_eq!(authenticated.user_id, user.id_string().unwrap());
        assert_eq!(authenticated.email, "claire.martin@example.fr");
        assert!(authenticated.is_admin());
        assert_eq!(authenticated.token_hash, service.hash_token(&token));
        assert_eq!(authenticated.token_hash.len(), 64);
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = TokenService::new();

        assert_eq!(service.extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(service.extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(service.extract_bearer_token("Bearer ").is_err());
        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
    }
}
