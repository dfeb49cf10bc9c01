use std::sync::Arc;
use mongodb::bson::{doc, DateTime};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::companies::{CompanyQuery, CompanyResponse, CreateCompanyRequest, UpdateCompanyRequest},
    domain::entities::companies::Company,
    domain::models::auth::AuthenticatedUser,
    repositories::companies::CompanyRepository,
    repositories::offers::OfferRepository,
    repositories::users::UserRepository,
    services::access::ensure_company_editor,
    utils::bson_utils::parse_object_id,
    utils::string_utils::{clean_optional_string, validate_required_string},
};

/// 회사 등록/조회/수정
///
/// 이름은 공백과 대소문자를 정규화한 `nom_normalise`로 중복을 판단합니다.
#[service(name = "company")]
pub struct CompanyService {
    company_repo: Arc<CompanyRepository>,
    offer_repo: Arc<OfferRepository>,
    user_repo: Arc<UserRepository>,
}

impl CompanyService {
    pub async fn list(&self, query: &CompanyQuery) -> Result<Vec<CompanyResponse>, AppError> {
        let companies = self.company_repo.list(query.q.as_deref()).await?;
        Ok(companies.into_iter().map(CompanyResponse::from).collect())
    }

    pub async fn get(&self, id: &str) -> Result<CompanyResponse, AppError> {
        let company_id = parse_object_id(id, "entreprise")?;

        self.company_repo
            .find_by_id(&company_id)
            .await?
            .map(CompanyResponse::from)
            .ok_or_else(|| AppError::NotFound("Entreprise introuvable".to_string()))
    }

    /// 회사 등록
    ///
    /// 만든 사람의 `entreprise_id`가 비어 있으면 새 회사로 채웁니다.
    pub async fn create(&self, user: &AuthenticatedUser, request: CreateCompanyRequest) -> Result<CompanyResponse, AppError> {
        let user_id = user.object_id()?;
        let nom = validate_required_string(&request.nom, "nom")?;

        let mut company = Company::new(nom, user_id);
        company.description = clean_optional_string(request.description);
        company.secteur = clean_optional_string(request.secteur);
        company.site_web = clean_optional_string(request.site_web);
        company.localisation = clean_optional_string(request.localisation);

        let company = self.company_repo.create(company).await?;

        if let Some(company_id) = company.id {
            let creator = self.user_repo.find_by_id(&user_id).await?;
            if creator.is_some_and(|creator| creator.entreprise_id.is_none()) {
                self.user_repo
                    .update(&user_id, doc! { "entreprise_id": company_id, "updated_at": DateTime::now() })
                    .await?;
            }
        }

        log::info!("🏢 Entreprise créée: {} par {}", company.nom, user.email);
        Ok(CompanyResponse::from(company))
    }

    /// 회사 수정 (만든 사람 또는 관리자)
    ///
    /// 이름이 바뀌면 공고에 복사된 회사 이름도 함께 바꿉니다.
    pub async fn update(&self, user: &AuthenticatedUser, id: &str, request: UpdateCompanyRequest) -> Result<CompanyResponse, AppError> {
        let company_id = parse_object_id(id, "entreprise")?;

        let company = self.company_repo
            .find_by_id(&company_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entreprise introuvable".to_string()))?;

        ensure_company_editor(&company, user)?;

        let mut update_doc = doc! { "updated_at": DateTime::now() };
        let mut renamed_to = None;

        if let Some(nom) = request.nom {
            let nom = validate_required_string(&nom, "nom")?;
            update_doc.insert("nom_normalise", Company::normalize_name(&nom));
            update_doc.insert("nom", nom.clone());
            if nom != company.nom {
                renamed_to = Some(nom);
            }
        }
        if let Some(description) = request.description {
            update_doc.insert("description", description);
        }
        if let Some(secteur) = request.secteur {
            update_doc.insert("secteur", secteur);
        }
        if let Some(site_web) = request.site_web {
            update_doc.insert("site_web", site_web);
        }
        if let Some(localisation) = request.localisation {
            update_doc.insert("localisation", localisation);
        }

        let updated = self.company_repo
            .update(&company_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Entreprise introuvable".to_string()))?;

        if let Some(nom) = renamed_to {
            let count = self.offer_repo.rename_company(&company_id, &nom).await?;
            log::info!("🏢 Entreprise renommée en '{}' ({} offres mises à jour)", nom, count);
        }

        Ok(CompanyResponse::from(updated))
    }
}
