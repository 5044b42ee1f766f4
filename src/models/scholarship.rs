use crate::utils::error::AppError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bolsa de estudos no formato do catálogo (Notion)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScholarshipRecord {
    pub university: String,
    pub scholarship_name: String,
    #[serde(rename = "type")]
    pub scholarship_type: String,
    pub degree_level: String,
    pub country: String,
    /// ISO 8601 (`YYYY-MM-DD`, opcionalmente com horário), ou vazio
    pub deadline: String,
    #[serde(default)]
    pub min_gpa: Option<f64>,
    #[serde(default)]
    pub major: Vec<String>,
}

/// Chave de identidade de um favorito: (university, scholarship_name).
///
/// Every favorites lookup goes through `ScholarshipRecord::identity_key`, so
/// two records with the same key are the same favorite no matter what the
/// other fields say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScholarshipKey<'a> {
    pub university: &'a str,
    pub scholarship_name: &'a str,
}

impl<'a> ScholarshipKey<'a> {
    pub fn new(university: &'a str, scholarship_name: &'a str) -> Self {
        Self {
            university,
            scholarship_name,
        }
    }
}

impl std::fmt::Display for ScholarshipKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.university, self.scholarship_name)
    }
}

/// Entrada "solta" (request body, propriedades do Notion) antes da validação
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ScholarshipPayload {
    pub university: Option<String>,
    pub scholarship_name: Option<String>,
    #[serde(rename = "type")]
    pub scholarship_type: Option<String>,
    pub degree_level: Option<String>,
    pub country: Option<String>,
    pub deadline: Option<String>,
    pub min_gpa: Option<f64>,
    pub major: Option<Vec<String>>,
}

impl ScholarshipRecord {
    pub fn identity_key(&self) -> ScholarshipKey<'_> {
        ScholarshipKey::new(&self.university, &self.scholarship_name)
    }

    /// Valida um payload e produz um registro tipado.
    ///
    /// `university` and `scholarship_name` are required because they form the
    /// identity key. Missing descriptive fields default to empty strings.
    pub fn parse(payload: ScholarshipPayload) -> Result<Self, AppError> {
        let university = required_field(payload.university, "university")?;
        let scholarship_name = required_field(payload.scholarship_name, "scholarship_name")?;

        let deadline = payload.deadline.unwrap_or_default().trim().to_string();
        if !deadline.is_empty() && !is_iso_date(&deadline) {
            return Err(AppError::InvalidRequest(format!(
                "deadline must be an ISO 8601 date, got '{}'",
                deadline
            )));
        }

        if let Some(gpa) = payload.min_gpa {
            if !gpa.is_finite() || gpa < 0.0 {
                return Err(AppError::InvalidRequest(format!(
                    "min_gpa must be a non-negative number, got {}",
                    gpa
                )));
            }
        }

        Ok(Self {
            university,
            scholarship_name,
            scholarship_type: payload.scholarship_type.unwrap_or_default(),
            degree_level: payload.degree_level.unwrap_or_default(),
            country: payload.country.unwrap_or_default(),
            deadline,
            min_gpa: payload.min_gpa,
            major: payload
                .major
                .unwrap_or_default()
                .into_iter()
                .filter(|m| !m.trim().is_empty())
                .collect(),
        })
    }
}

fn required_field(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::InvalidRequest(format!("{} is required", name))),
    }
}

// Notion devolve "2024-01-15" ou "2024-01-15T00:00:00.000+00:00"
fn is_iso_date(value: &str) -> bool {
    if value.len() == 10 {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
    } else {
        DateTime::parse_from_rfc3339(value).is_ok()
    }
}
