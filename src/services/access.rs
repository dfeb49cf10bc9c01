//! 소유권/참여자 확인
//!
//! 역할 확인은 라우트 스코프의 인증 미들웨어가 하고, 문서 단위 권한은
//! 서비스가 이 함수들로 확인합니다. 실패는 모두 403입니다.

use mongodb::bson::oid::ObjectId;
use crate::core::errors::AppError;
use crate::domain::entities::applications::Application;
use crate::domain::entities::companies::Company;
use crate::domain::entities::interviews::Interview;
use crate::domain::entities::offers::JobOffer;
use crate::domain::models::auth::AuthenticatedUser;

pub fn ensure_offer_owner(offer: &JobOffer, user_id: &ObjectId) -> Result<(), AppError> {
    if offer.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("Vous n'êtes pas le propriétaire de cette offre".to_string()))
    }
}

pub fn ensure_application_owner(application: &Application, user_id: &ObjectId) -> Result<(), AppError> {
    if application.is_owned_by(user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("Cette candidature ne vous appartient pas".to_string()))
    }
}

/// 회사 정보는 만든 사람이나 관리자만 수정할 수 있습니다.
pub fn ensure_company_editor(company: &Company, user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.is_admin() || company.created_by == user.object_id()? {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("Seul le créateur de l'entreprise peut la modifier".to_string()))
    }
}

pub fn ensure_interview_organizer(interview: &Interview, user_id: &ObjectId) -> Result<(), AppError> {
    if interview.is_organized_by(user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("Vous n'avez pas organisé cet entretien".to_string()))
    }
}

pub fn ensure_interview_participant(interview: &Interview, user_id: &ObjectId) -> Result<(), AppError> {
    if interview.is_participant(user_id) {
        Ok(())
    } else {
        Err(AppError::AuthorizationError("Vous ne participez pas à cet entretien".to_string()))
    }
}

/// 참여자 또는 관리자 (조회 전용)
pub fn ensure_interview_viewer(interview: &Interview, user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.is_admin() {
        return Ok(());
    }
    ensure_interview_participant(interview, &user.object_id()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;
    use crate::domain::entities::interviews::{InterviewMode, InterviewStatus};
    use crate::domain::entities::offers::{ContractType, OfferStatus};
    use crate::domain::entities::users::UserRole;

    fn offer(recruteur_id: ObjectId) -> JobOffer {
        let now = DateTime::now();
        JobOffer {
            id: Some(ObjectId::new()),
            titre: "Chargé de recrutement".to_string(),
            description: "CDI à Nantes".to_string(),
            entreprise_id: None,
            entreprise_nom: None,
            localisation: None,
            type_contrat: ContractType::Cdi,
            salaire: None,
            competences: vec![],
            recruteur_id,
            statut: OfferStatus::Ouverte,
            date_publication: now,
            date_limite: None,
            updated_at: now,
        }
    }

    fn interview(candidat_id: ObjectId, recruteur_id: ObjectId) -> Interview {
        let now = DateTime::now();
        Interview {
            id: Some(ObjectId::new()),
            candidature_id: ObjectId::new(),
            offre_id: ObjectId::new(),
            candidat_id,
            recruteur_id,
            date_entretien: now,
            duree_minutes: 60,
            mode: InterviewMode::Visio,
            lieu: None,
            lien_visio: None,
            notes: None,
            statut: InterviewStatus::Planifie,
            created_at: now,
            updated_at: now,
        }
    }

    fn authenticated(user_id: ObjectId, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user_id.to_hex(),
            email: "test@example.fr".to_string(),
            role,
            token_jti: "jti".to_string(),
            token_expires_at: 0,
            token_hash: "hash".to_string(),
        }
    }

    #[test]
    fn test_offer_owner_check() {
        let owner = ObjectId::new();
        let offer = offer(owner);

        assert!(ensure_offer_owner(&offer, &owner).is_ok());
        assert!(matches!(
            ensure_offer_owner(&offer, &ObjectId::new()),
            Err(AppError::AuthorizationError(_))
        ));
    }

    #[test]
    fn test_interview_access() {
        let candidat = ObjectId::new();
        let recruteur = ObjectId::new();
        let interview = interview(candidat, recruteur);

        assert!(ensure_interview_organizer(&interview, &recruteur).is_ok());
        assert!(ensure_interview_organizer(&interview, &candidat).is_err());

        assert!(ensure_interview_participant(&interview, &candidat).is_ok());
        assert!(ensure_interview_participant(&interview, &ObjectId::new()).is_err());

        assert!(ensure_interview_viewer(&interview, &authenticated(ObjectId::new(), UserRole::Admin)).is_ok());
        assert!(ensure_interview_viewer(&interview, &authenticated(ObjectId::new(), UserRole::Recruteur)).is_err());
    }

    #[test]
    fn test_company_editor_check() {
        let creator = ObjectId::new();
        let company = Company::new("Acme".to_string(), creator);

        assert!(ensure_company_editor(&company, &authenticated(creator, UserRole::Recruteur)).is_ok());
        assert!(ensure_company_editor(&company, &authenticated(ObjectId::new(), UserRole::Admin)).is_ok());
        assert!(ensure_company_editor(&company, &authenticated(ObjectId::new(), UserRole::Recruteur)).is_err());
    }
}
