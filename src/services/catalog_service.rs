// ==================== SCHOLARSHIP CATALOG ====================
// Catálogo de bolsas vindo de um database do Notion.
// Cada página passa por ScholarshipRecord::parse antes de sair daqui.

use crate::{
    models::{ScholarshipPayload, ScholarshipRecord},
    utils::error::AppError,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

pub const NOTION_API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const NOTION_PAGE_SIZE: u32 = 100;

/// Fonte do catálogo. Sem argumentos, ordem não garantida.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ScholarshipRecord>, AppError>;
}

#[derive(Debug, Deserialize)]
struct NotionQueryResponse {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

pub struct NotionCatalog {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    database_id: String,
}

impl NotionCatalog {
    pub fn new(client: reqwest::Client, api_base: &str, api_key: &str, database_id: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            database_id: database_id.to_string(),
        }
    }

    async fn query_page(&self, cursor: Option<&str>) -> Result<NotionQueryResponse, AppError> {
        let url = format!("{}/databases/{}/query", self.api_base, self.database_id);

        let mut body = serde_json::json!({ "page_size": NOTION_PAGE_SIZE });
        if let Some(cursor) = cursor {
            body["start_cursor"] = Value::String(cursor.to_string());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::CatalogError(format!(
                "Notion API returned {}: {}",
                status, text
            )));
        }

        Ok(response.json::<NotionQueryResponse>().await?)
    }
}

#[async_trait]
impl CatalogProvider for NotionCatalog {
    async fn fetch_all(&self) -> Result<Vec<ScholarshipRecord>, AppError> {
        log::info!("📚 Fetching scholarships from Notion database {}", self.database_id);

        let mut scholarships = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.query_page(cursor.as_deref()).await?;
            log::debug!("Notion page with {} results (has_more: {})", page.results.len(), page.has_more);

            for result in &page.results {
                match parse_notion_page(result) {
                    Ok(scholarship) => scholarships.push(scholarship),
                    Err(e) => log::error!("⚠️  Error processing individual scholarship: {}", e),
                }
            }

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        log::info!("✅ Loaded {} scholarships from Notion", scholarships.len());
        Ok(scholarships)
    }
}

/// Converte uma página do Notion em `ScholarshipRecord`.
///
/// Property names follow the Notion database: `University` (rich text),
/// `Scholarship Name` (title), `Type`, `Degree Level`, `Country` (select),
/// `Deadline` (date), `Min GPA` (number), `Major` (multi-select).
pub fn parse_notion_page(page: &Value) -> Result<ScholarshipRecord, AppError> {
    let properties = page
        .get("properties")
        .ok_or_else(|| AppError::CatalogError("page has no properties".to_string()))?;

    let text_at = |name: &str, pointer: &str| -> Option<String> {
        properties
            .get(name)
            .and_then(|p| p.pointer(pointer))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    // rich_text/title vêm em segmentos (texto, menções, links)
    let joined_text = |name: &str, kind: &str| -> Option<String> {
        let segments = properties.get(name)?.get(kind)?.as_array()?;
        let text: String = segments
            .iter()
            .filter_map(|segment| {
                segment
                    .get("plain_text")
                    .or_else(|| segment.pointer("/text/content"))
                    .and_then(Value::as_str)
            })
            .collect();
        Some(text)
    };

    let major = properties
        .get("Major")
        .and_then(|p| p.get("multi_select"))
        .and_then(Value::as_array)
        .map(|options| {
            options
                .iter()
                .filter_map(|o| o.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        });

    let payload = ScholarshipPayload {
        university: joined_text("University", "rich_text"),
        scholarship_name: joined_text("Scholarship Name", "title"),
        scholarship_type: text_at("Type", "/select/name"),
        degree_level: text_at("Degree Level", "/select/name"),
        country: text_at("Country", "/select/name"),
        deadline: text_at("Deadline", "/date/start"),
        min_gpa: properties
            .get("Min GPA")
            .and_then(|p| p.get("number"))
            .and_then(Value::as_f64),
        major,
    };

    ScholarshipRecord::parse(payload)
}

// ==================== FILTERS ====================

pub fn filter_by_type(scholarships: &[ScholarshipRecord], scholarship_type: &str) -> Vec<ScholarshipRecord> {
    scholarships
        .iter()
        .filter(|s| s.scholarship_type == scholarship_type)
        .cloned()
        .collect()
}

pub fn filter_by_country(scholarships: &[ScholarshipRecord], country: &str) -> Vec<ScholarshipRecord> {
    scholarships.iter().filter(|s| s.country == country).cloned().collect()
}

pub fn filter_by_degree_level(scholarships: &[ScholarshipRecord], degree_level: &str) -> Vec<ScholarshipRecord> {
    scholarships
        .iter()
        .filter(|s| s.degree_level == degree_level)
        .cloned()
        .collect()
}

/// Bolsas cujo GPA mínimo está definido e é atingido por `gpa`
pub fn filter_by_min_gpa(scholarships: &[ScholarshipRecord], gpa: f64) -> Vec<ScholarshipRecord> {
    scholarships
        .iter()
        .filter(|s| s.min_gpa.map_or(false, |min| min <= gpa))
        .cloned()
        .collect()
}

/// Ordena por deadline (ISO 8601 ordena lexicograficamente), estável
pub fn sort_by_deadline(mut scholarships: Vec<ScholarshipRecord>) -> Vec<ScholarshipRecord> {
    scholarships.sort_by(|a, b| a.deadline.cmp(&b.deadline));
    scholarships
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scholarship(name: &str, kind: &str, country: &str, deadline: &str, gpa: Option<f64>) -> ScholarshipRecord {
        ScholarshipRecord {
            university: "MIT".into(),
            scholarship_name: name.into(),
            scholarship_type: kind.into(),
            degree_level: if gpa.is_some() { "Undergraduate".into() } else { "Graduate".into() },
            country: country.into(),
            deadline: deadline.into(),
            min_gpa: gpa,
            major: vec![],
        }
    }

    fn catalog() -> Vec<ScholarshipRecord> {
        vec![
            scholarship("Merit Scholarship", "Merit-based", "USA", "2024-01-15", Some(3.5)),
            scholarship("Need Scholarship", "Need-based", "USA", "2024-02-20", None),
            scholarship("STEM Scholarship", "Merit-based", "Canada", "2024-03-10", Some(3.7)),
        ]
    }

    #[test]
    fn test_filter_by_type() {
        let merit = filter_by_type(&catalog(), "Merit-based");
        assert_eq!(merit.len(), 2);
        assert!(merit.iter().all(|s| s.scholarship_type == "Merit-based"));
    }

    #[test]
    fn test_filter_by_country() {
        let usa = filter_by_country(&catalog(), "USA");
        assert_eq!(usa.len(), 2);
        assert!(usa.iter().all(|s| s.country == "USA"));
    }

    #[test]
    fn test_filter_by_degree_level() {
        let graduate = filter_by_degree_level(&catalog(), "Graduate");
        assert_eq!(graduate.len(), 1);
        assert_eq!(graduate[0].scholarship_name, "Need Scholarship");
    }

    #[test]
    fn test_filter_by_min_gpa_skips_unset() {
        let eligible = filter_by_min_gpa(&catalog(), 3.6);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].scholarship_name, "Merit Scholarship");
        assert_eq!(filter_by_min_gpa(&catalog(), 4.0).len(), 2);
    }

    #[test]
    fn test_sort_by_deadline() {
        let mut shuffled = catalog();
        shuffled.reverse();
        let sorted = sort_by_deadline(shuffled);
        let deadlines: Vec<_> = sorted.iter().map(|s| s.deadline.as_str()).collect();
        assert_eq!(deadlines, vec!["2024-01-15", "2024-02-20", "2024-03-10"]);
    }

    #[test]
    fn test_parse_notion_page() {
        let page = json!({
            "id": "page-1",
            "properties": {
                "University": { "rich_text": [{ "text": { "content": "MIT" } }] },
                "Scholarship Name": { "title": [{ "text": { "content": "Merit Scholarship" } }] },
                "Type": { "select": { "name": "Merit-based" } },
                "Degree Level": { "select": { "name": "Undergraduate" } },
                "Country": { "select": null },
                "Deadline": { "date": { "start": "2024-01-15" } },
                "Min GPA": { "number": 3.5 },
                "Major": { "multi_select": [{ "id": "a", "name": "Computer Science" }, { "id": "b", "name": "Engineering" }] }
            }
        });

        let record = parse_notion_page(&page).unwrap();
        assert_eq!(record.university, "MIT");
        assert_eq!(record.scholarship_name, "Merit Scholarship");
        assert_eq!(record.scholarship_type, "Merit-based");
        assert_eq!(record.country, "");
        assert_eq!(record.deadline, "2024-01-15");
        assert_eq!(record.min_gpa, Some(3.5));
        assert_eq!(record.major, vec!["Computer Science", "Engineering"]);
    }

    #[test]
    fn test_parse_notion_page_without_title_fails() {
        let page = json!({
            "properties": {
                "University": { "rich_text": [{ "text": { "content": "MIT" } }] },
                "Scholarship Name": { "title": [] }
            }
        });
        assert!(parse_notion_page(&page).is_err());
        assert!(parse_notion_page(&json!({})).is_err());
    }

    #[test]
    fn test_parse_notion_page_joins_text_segments() {
        let page = json!({
            "properties": {
                "University": { "rich_text": [
                    { "type": "text", "plain_text": "Massachusetts ", "text": { "content": "Massachusetts " } },
                    { "type": "mention", "plain_text": "Institute of Technology", "mention": { "type": "page" } }
                ] },
                "Scholarship Name": { "title": [
                    { "type": "text", "text": { "content": "Merit " } },
                    { "type": "text", "plain_text": "Scholarship" }
                ] }
            }
        });

        let record = parse_notion_page(&page).unwrap();
        assert_eq!(record.university, "Massachusetts Institute of Technology");
        assert_eq!(record.scholarship_name, "Merit Scholarship");
    }
}
