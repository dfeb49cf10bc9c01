//! 회사 API DTO (`/api/entreprises`)

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::entities::companies::Company;
use crate::utils::bson_utils::{id_to_hex, to_rfc3339};
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 150, message = "Le nom de l'entreprise est obligatoire"))]
    pub nom: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "La description est trop longue"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub secteur: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "URL du site web invalide"))]
    pub site_web: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub localisation: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 150, message = "Le nom de l'entreprise est trop long"))]
    pub nom: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 5000, message = "La description est trop longue"))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub secteur: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "URL du site web invalide"))]
    pub site_web: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub localisation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyResponse {
    pub id: String,
    pub nom: String,
    pub description: Option<String>,
    pub secteur: Option<String>,
    pub site_web: Option<String>,
    pub localisation: Option<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: id_to_hex(&company.id),
            nom: company.nom,
            description: company.description,
            secteur: company.secteur,
            site_web: company.site_web,
            localisation: company.localisation,
            created_by: company.created_by.to_hex(),
            created_at: to_rfc3339(&company.created_at),
            updated_at: to_rfc3339(&company.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_company_validation() {
        let valid: CreateCompanyRequest = serde_json::from_str(
            r#"{"nom": "Acme Conseil", "site_web": "https://acme.example.fr"}"#
        ).unwrap();
        assert!(valid.validate().is_ok());

        let bad_url: CreateCompanyRequest = serde_json::from_str(
            r#"{"nom": "Acme", "site_web": "pas une url"}"#
        ).unwrap();
        assert!(bad_url.validate().is_err());

        let empty_name: CreateCompanyRequest = serde_json::from_str(r#"{"nom": ""}"#).unwrap();
        assert!(empty_name.validate().is_err());
    }
}
