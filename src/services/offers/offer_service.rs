//! # 채용 공고 서비스
//!
//! 공개 목록 검색, 채용 담당자의 공고 작성/수정/삭제, 지원자 수 집계를 담당합니다.
//! 공고를 지우면 지원서와 면접, 녹화, 업로드 파일까지 함께 정리됩니다.

use std::sync::Arc;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::common::PaginatedResponse,
    domain::dto::offers::{CreateOfferRequest, OfferQuery, OfferResponse, RecruiterOfferResponse, UpdateOfferRequest},
    domain::entities::applications::ApplicationStatus,
    domain::entities::offers::{ContractType, JobOffer, OfferStatus},
    domain::models::auth::AuthenticatedUser,
    repositories::applications::ApplicationRepository,
    repositories::candidates::CandidateRepository,
    repositories::companies::CompanyRepository,
    repositories::interviews::{InterviewRepository, RecordingRepository},
    repositories::offers::OfferRepository,
    repositories::users::UserRepository,
    services::access::ensure_offer_owner,
    services::candidates::release_cv,
    storage::UploadStore,
    utils::bson_utils::{parse_object_id, parse_optional_object_id, parse_rfc3339, set_trimmed},
    utils::string_utils::{clean_optional_string, escape_regex, validate_required_string},
};

/// 상태 필터를 끄는 `statut` 값
pub const ALL_STATUSES: &str = "toutes";

/// 공개 목록 쿼리를 MongoDB 필터로 바꿉니다.
///
/// - `statut`: 없으면 `ouverte`, `toutes`이면 필터 없음, 그 외 알 수 없는 값은 400
/// - `q`: 제목 또는 설명 부분 일치 (대소문자 무시)
/// - `localisation`: 부분 일치 (대소문자 무시)
pub fn build_offer_filter(query: &OfferQuery) -> Result<Document, AppError> {
    let mut filter = Document::new();

    match query.statut.as_deref() {
        None => {
            filter.insert("statut", OfferStatus::Ouverte.as_str());
        }
        Some(value) if value.eq_ignore_ascii_case(ALL_STATUSES) => {}
        Some(value) => {
            let statut = OfferStatus::from_str(value).ok_or_else(|| {
                AppError::ValidationError(format!("Statut d'offre inconnu: '{}'", value))
            })?;
            filter.insert("statut", statut.as_str());
        }
    }

    if let Some(q) = query.q.as_deref() {
        let pattern = escape_regex(q);
        filter.insert("$or", vec![
            doc! { "titre": { "$regex": pattern.as_str(), "$options": "i" } },
            doc! { "description": { "$regex": pattern.as_str(), "$options": "i" } },
        ]);
    }

    if let Some(localisation) = query.localisation.as_deref() {
        filter.insert("localisation", doc! { "$regex": escape_regex(localisation), "$options": "i" });
    }

    if let Some(type_contrat) = query.type_contrat.as_deref() {
        let contract = ContractType::from_str(type_contrat).ok_or_else(|| {
            AppError::ValidationError(format!("Type de contrat inconnu: '{}'", type_contrat))
        })?;
        filter.insert("type_contrat", contract.as_str());
    }

    if let Some(entreprise_id) = parse_optional_object_id(query.entreprise_id.as_deref(), "entreprise")? {
        filter.insert("entreprise_id", entreprise_id);
    }

    Ok(filter)
}

/// 마감일은 현재 이후여야 합니다.
fn parse_future_deadline(value: &str) -> Result<DateTime, AppError> {
    let deadline = parse_rfc3339(value, "date_limite")?;
    if deadline <= DateTime::now() {
        return Err(AppError::ValidationError("La date limite doit être dans le futur".to_string()));
    }
    Ok(deadline)
}

#[service(name = "offer")]
pub struct OfferService {
    offer_repo: Arc<OfferRepository>,
    company_repo: Arc<CompanyRepository>,
    user_repo: Arc<UserRepository>,
    application_repo: Arc<ApplicationRepository>,
    candidate_repo: Arc<CandidateRepository>,
    interview_repo: Arc<InterviewRepository>,
    recording_repo: Arc<RecordingRepository>,
    upload_store: Arc<UploadStore>,
}

impl OfferService {
    pub async fn list(&self, query: &OfferQuery) -> Result<PaginatedResponse<OfferResponse>, AppError> {
        let filter = build_offer_filter(query)?;
        let pagination = query.pagination();

        let (offers, total) = self.offer_repo
            .search(filter, pagination.skip(), pagination.limit())
            .await?;

        Ok(PaginatedResponse {
            items: offers.into_iter().map(OfferResponse::from).collect(),
            total,
            page: pagination.page(),
            limit: pagination.limit(),
        })
    }

    pub async fn get(&self, id: &str) -> Result<OfferResponse, AppError> {
        let offer_id = parse_object_id(id, "offre")?;
        self.find_offer(&offer_id).await.map(OfferResponse::from)
    }

    /// 지원/면접 서비스가 공유하는 조회 (없으면 404)
    pub async fn find_offer(&self, offer_id: &ObjectId) -> Result<JobOffer, AppError> {
        self.offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Offre d'emploi introuvable".to_string()))
    }

    /// 공고 작성
    ///
    /// `entreprise_id`를 생략하면 작성자의 소속 회사를 사용합니다.
    pub async fn create(&self, user: &AuthenticatedUser, request: CreateOfferRequest) -> Result<OfferResponse, AppError> {
        let recruteur_id = user.object_id()?;

        let titre = validate_required_string(&request.titre, "titre")?;
        let description = validate_required_string(&request.description, "description")?;
        let type_contrat = ContractType::from_str(&request.type_contrat).ok_or_else(|| {
            AppError::ValidationError(format!("Type de contrat inconnu: '{}'", request.type_contrat))
        })?;
        let date_limite = request.date_limite.as_deref().map(parse_future_deadline).transpose()?;

        let entreprise_id = match parse_optional_object_id(request.entreprise_id.as_deref(), "entreprise")? {
            Some(id) => Some(id),
            None => self.user_repo
                .find_by_id(&recruteur_id)
                .await?
                .and_then(|recruiter| recruiter.entreprise_id),
        };
        let entreprise_nom = self.company_name(entreprise_id.as_ref()).await?;

        let now = DateTime::now();
        let offer = JobOffer {
            id: None,
            titre,
            description,
            entreprise_id,
            entreprise_nom,
            localisation: clean_optional_string(request.localisation),
            type_contrat,
            salaire: clean_optional_string(request.salaire),
            competences: clean_competences(request.competences),
            recruteur_id,
            statut: OfferStatus::Ouverte,
            date_publication: now,
            date_limite,
            updated_at: now,
        };

        let offer = self.offer_repo.create(offer).await?;
        log::info!("📢 Offre publiée: '{}' par {}", offer.titre, user.email);

        Ok(OfferResponse::from(offer))
    }

    /// 부분 수정 (작성자만)
    pub async fn update(&self, user: &AuthenticatedUser, id: &str, request: UpdateOfferRequest) -> Result<OfferResponse, AppError> {
        let offer_id = parse_object_id(id, "offre")?;
        let offer = self.find_offer(&offer_id).await?;
        ensure_offer_owner(&offer, &user.object_id()?)?;

        let mut update_doc = doc! { "updated_at": DateTime::now() };

        if let Some(titre) = request.titre {
            update_doc.insert("titre", validate_required_string(&titre, "titre")?);
        }
        if let Some(description) = request.description {
            update_doc.insert("description", validate_required_string(&description, "description")?);
        }
        set_trimmed(&mut update_doc, "localisation", request.localisation);
        set_trimmed(&mut update_doc, "salaire", request.salaire);
        if let Some(competences) = request.competences {
            update_doc.insert("competences", clean_competences(competences));
        }
        if let Some(type_contrat) = request.type_contrat {
            let contract = ContractType::from_str(&type_contrat).ok_or_else(|| {
                AppError::ValidationError(format!("Type de contrat inconnu: '{}'", type_contrat))
            })?;
            update_doc.insert("type_contrat", contract.as_str());
        }
        if let Some(statut) = request.statut {
            let statut = OfferStatus::from_str(&statut).ok_or_else(|| {
                AppError::ValidationError(format!("Statut d'offre inconnu: '{}'", statut))
            })?;
            update_doc.insert("statut", statut.as_str());
        }
        if let Some(date_limite) = request.date_limite {
            update_doc.insert("date_limite", parse_future_deadline(&date_limite)?);
        }
        if let Some(entreprise_id) = parse_optional_object_id(request.entreprise_id.as_deref(), "entreprise")? {
            let entreprise_nom = self.company_name(Some(&entreprise_id)).await?;
            update_doc.insert("entreprise_id", entreprise_id);
            update_doc.insert("entreprise_nom", entreprise_nom);
        }

        let updated = self.offer_repo
            .update(&offer_id, update_doc)
            .await?
            .ok_or_else(|| AppError::NotFound("Offre d'emploi introuvable".to_string()))?;

        log::info!("📝 Offre modifiée: '{}' ({})", updated.titre, offer_id);
        Ok(OfferResponse::from(updated))
    }

    /// 공고 삭제 (작성자만)
    ///
    /// 지원서, 면접, 녹화 문서를 지운 뒤 업로드 파일을 정리합니다.
    /// 프로필에서 가져온 CV 파일은 다른 지원서나 현재 프로필이 쓰지 않을 때만 지웁니다.
    pub async fn delete(&self, user: &AuthenticatedUser, id: &str) -> Result<(), AppError> {
        let offer_id = parse_object_id(id, "offre")?;
        let offer = self.find_offer(&offer_id).await?;
        ensure_offer_owner(&offer, &user.object_id()?)?;

        let interview_ids: Vec<ObjectId> = self.interview_repo
            .find_by_offer(&offer_id)
            .await?
            .into_iter()
            .filter_map(|interview| interview.id)
            .collect();
        let recordings = self.recording_repo.find_by_interviews(&interview_ids).await?;

        self.recording_repo.delete_by_interviews(&interview_ids).await?;
        self.interview_repo.delete_by_offer(&offer_id).await?;
        let applications = self.application_repo.delete_by_offer(&offer_id).await?;
        self.offer_repo.delete(&offer_id).await?;

        for recording in &recordings {
            self.upload_store.remove(&recording.video).await;
        }
        for application in &applications {
            if application.cv_from_profile {
                release_cv(&self.application_repo, &self.candidate_repo, &self.upload_store, &application.candidat_id, &application.cv).await;
            } else {
                self.upload_store.remove(&application.cv).await;
            }
        }

        log::info!(
            "🗑️ Offre supprimée: '{}' ({} candidatures, {} entretiens)",
            offer.titre,
            applications.len(),
            interview_ids.len()
        );
        Ok(())
    }

    /// 채용 담당자 본인 공고와 지원자 수
    pub async fn recruiter_offers(&self, user: &AuthenticatedUser) -> Result<Vec<RecruiterOfferResponse>, AppError> {
        let recruteur_id = user.object_id()?;
        let offers = self.offer_repo.find_by_recruiter(&recruteur_id).await?;

        let mut responses = Vec::with_capacity(offers.len());
        for offer in offers {
            let (nombre_candidatures, nombre_en_attente) = match offer.id {
                Some(offer_id) => (
                    self.application_repo.count_by_offer(&offer_id, None).await?,
                    self.application_repo.count_by_offer(&offer_id, Some(ApplicationStatus::EnAttente)).await?,
                ),
                None => (0, 0),
            };

            responses.push(RecruiterOfferResponse {
                offre: OfferResponse::from(offer),
                nombre_candidatures,
                nombre_en_attente,
            });
        }

        Ok(responses)
    }

    async fn company_name(&self, entreprise_id: Option<&ObjectId>) -> Result<Option<String>, AppError> {
        let Some(entreprise_id) = entreprise_id else {
            return Ok(None);
        };

        let company = self.company_repo
            .find_by_id(entreprise_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Entreprise introuvable".to_string()))?;

        Ok(Some(company.nom))
    }
}

/// 공백 제거, 빈 항목과 중복 제거 (입력 순서 유지)
fn clean_competences(values: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !cleaned.iter().any(|existing| existing.eq_ignore_ascii_case(value)) {
            cleaned.push(value.to_string());
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(statut: Option<&str>) -> OfferQuery {
        OfferQuery {
            statut: statut.map(str::to_string),
            ..OfferQuery::default()
        }
    }

    #[test]
    fn test_filter_defaults_to_open_offers() {
        let filter = build_offer_filter(&OfferQuery::default()).unwrap();
        assert_eq!(filter, doc! { "statut": "ouverte" });
    }

    #[test]
    fn test_filter_status_values() {
        assert_eq!(build_offer_filter(&query(Some("fermée"))).unwrap(), doc! { "statut": "fermée" });
        assert!(build_offer_filter(&query(Some("toutes"))).unwrap().is_empty());

        let err = build_offer_filter(&query(Some("archivée"))).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_filter_text_search_is_escaped() {
        let offer_query = OfferQuery {
            statut: Some("toutes".to_string()),
            q: Some("C++".to_string()),
            ..OfferQuery::default()
        };
        let filter = build_offer_filter(&offer_query).unwrap();

        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(
            clauses[0].as_document().unwrap(),
            &doc! { "titre": { "$regex": "C\\+\\+", "$options": "i" } }
        );
    }

    #[test]
    fn test_filter_contract_and_company() {
        let entreprise_id = ObjectId::new();
        let offer_query = OfferQuery {
            type_contrat: Some("cdd".to_string()),
            entreprise_id: Some(entreprise_id.to_hex()),
            ..OfferQuery::default()
        };
        let filter = build_offer_filter(&offer_query).unwrap();

        assert_eq!(filter.get_str("type_contrat").unwrap(), "CDD");
        assert_eq!(filter.get_object_id("entreprise_id").unwrap(), entreprise_id);

        let bad_contract = OfferQuery {
            type_contrat: Some("Intérim".to_string()),
            ..OfferQuery::default()
        };
        assert!(build_offer_filter(&bad_contract).is_err());

        let bad_company = OfferQuery {
            entreprise_id: Some("acme".to_string()),
            ..OfferQuery::default()
        };
        assert!(build_offer_filter(&bad_company).is_err());
    }

    #[test]
    fn test_past_deadline_is_rejected() {
        assert!(parse_future_deadline("2020-01-01T00:00:00Z").is_err());
        assert!(parse_future_deadline("2999-01-01T00:00:00Z").is_ok());
    }

    #[test]
    fn test_clean_competences() {
        let cleaned = clean_competences(vec![
            " Rust ".to_string(),
            "rust".to_string(),
            "".to_string(),
            "MongoDB".to_string(),
        ]);
        assert_eq!(cleaned, vec!["Rust".to_string(), "MongoDB".to_string()]);
    }
}
