use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod draft;
pub mod store;

pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    // "fileUrl" is the key the browser predecessor wrote.
    #[serde(default, alias = "fileUrl", skip_serializing_if = "Option::is_none")]
    pub file_data_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Technical,
    Academic,
    Professional,
    Achievement,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technical,
        Category::Academic,
        Category::Professional,
        Category::Achievement,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Academic => "Academic",
            Category::Professional => "Professional",
            Category::Achievement => "Achievement",
            Category::Other => "Other",
        }
    }
}

/// Millisecond timestamp rendered as a decimal string, suffixed with `-N`
/// when two commits land in the same millisecond.
pub fn next_record_id(existing: &[CertificateRecord]) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis())
        .unwrap_or(0);

    let base = millis.to_string();
    if !existing.iter().any(|record| record.id == base) {
        return base;
    }

    let mut attempt = 1u32;
    loop {
        let candidate = format!("{base}-{attempt}");
        if !existing.iter().any(|record| record.id == candidate) {
            return candidate;
        }
        attempt += 1;
    }
}

/// Long-form rendering for dates stored as `YYYY-MM-DD`; anything else is
/// shown as entered.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CertificateRecord {
        CertificateRecord {
            id: id.to_string(),
            title: "React Cert".to_string(),
            issuer: "Meta".to_string(),
            date: "2024-01-01".to_string(),
            description: String::new(),
            category: Category::Technical,
            file_data_uri: None,
        }
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let mut sample = record("1700000000000");
        sample.file_data_uri = Some("data:image/png;base64,AAAA".to_string());

        let json = serde_json::to_value(&sample).expect("record should serialize");
        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["category"], "Technical");
        assert_eq!(json["fileDataUri"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn record_without_attachment_omits_the_file_key() {
        let json = serde_json::to_value(record("1")).expect("record should serialize");
        assert!(json.get("fileDataUri").is_none());
    }

    #[test]
    fn record_accepts_the_legacy_file_url_key() {
        let data = r#"{
  "id": "1",
  "title": "Legacy",
  "issuer": "Coursera",
  "date": "2023-06-15",
  "fileUrl": "data:application/pdf;base64,JVBERg=="
}"#;
        let parsed: CertificateRecord =
            serde_json::from_str(data).expect("legacy record should parse");
        assert_eq!(
            parsed.file_data_uri.as_deref(),
            Some("data:application/pdf;base64,JVBERg==")
        );
        assert_eq!(parsed.category, Category::Technical);
        assert!(parsed.description.is_empty());
    }

    #[test]
    fn next_record_id_disambiguates_collisions() {
        let base = next_record_id(&[]);
        let existing = vec![record(&base)];
        let second = next_record_id(&existing);
        assert_ne!(second, base);
        assert!(second.starts_with(&base));

        let mut crowded = existing;
        crowded.push(record(&second));
        let third = next_record_id(&crowded);
        assert!(!crowded.iter().any(|record| record.id == third));
    }

    #[test]
    fn format_date_renders_long_form() {
        assert_eq!(format_date("2024-01-01"), "Jan 1, 2024");
        assert_eq!(format_date("2023-11-30"), "Nov 30, 2023");
    }

    #[test]
    fn format_date_falls_back_to_the_raw_string() {
        assert_eq!(format_date("next spring"), "next spring");
        assert_eq!(format_date(""), "");
    }
}
