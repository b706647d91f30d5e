use crate::certificates::{Category, CertificateRecord};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Issuer,
    Date,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Title => "title",
            RequiredField::Issuer => "issuer",
            RequiredField::Date => "date",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing.iter().map(|field| field.label()).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

/// The in-progress record held by the add form. Fields bind directly to the
/// form widgets; nothing is validated until commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CertificateDraft {
    pub title: String,
    pub issuer: String,
    pub date: String,
    pub description: String,
    pub category: Category,
    pub file_data_uri: Option<String>,
}

impl CertificateDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(RequiredField::Title);
        }
        if self.issuer.trim().is_empty() {
            missing.push(RequiredField::Issuer);
        }
        if self.date.trim().is_empty() {
            missing.push(RequiredField::Date);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Turns the draft into a committed record under the given id, resetting
    /// the draft to defaults. On validation failure the draft is untouched.
    pub fn commit(&mut self, id: String) -> Result<CertificateRecord, ValidationError> {
        self.validate()?;
        let draft = std::mem::take(self);
        Ok(CertificateRecord {
            id,
            title: draft.title,
            issuer: draft.issuer,
            date: draft.date,
            description: draft.description,
            category: draft.category,
            file_data_uri: draft.file_data_uri.filter(|uri| !uri.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> CertificateDraft {
        CertificateDraft {
            title: "React Cert".to_string(),
            issuer: "Meta".to_string(),
            date: "2024-01-01".to_string(),
            description: "Component architecture and hooks.".to_string(),
            category: Category::Technical,
            file_data_uri: None,
        }
    }

    #[test]
    fn draft_defaults_to_the_technical_category() {
        let draft = CertificateDraft::default();
        assert_eq!(draft.category, Category::Technical);
        assert!(draft.title.is_empty());
        assert!(draft.file_data_uri.is_none());
    }

    #[test]
    fn commit_carries_the_draft_fields_verbatim_and_resets() {
        let mut draft = filled_draft();
        let record = draft
            .commit("1714000000000".to_string())
            .expect("filled draft should commit");

        assert_eq!(record.id, "1714000000000");
        assert_eq!(record.title, "React Cert");
        assert_eq!(record.issuer, "Meta");
        assert_eq!(record.date, "2024-01-01");
        assert_eq!(record.description, "Component architecture and hooks.");
        assert_eq!(record.category, Category::Technical);
        assert_eq!(draft, CertificateDraft::default());
    }

    #[test]
    fn commit_rejects_a_missing_title_and_leaves_the_draft_alone() {
        let mut draft = filled_draft();
        draft.title.clear();
        let before = draft.clone();

        let error = draft
            .commit("1".to_string())
            .expect_err("empty title should not commit");
        assert_eq!(error.missing, vec![RequiredField::Title]);
        assert_eq!(draft, before);
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut draft = filled_draft();
        draft.issuer = "   ".to_string();
        draft.date = "\t".to_string();

        let error = draft.validate().expect_err("blank fields should fail");
        assert_eq!(
            error.missing,
            vec![RequiredField::Issuer, RequiredField::Date]
        );
        assert_eq!(
            error.to_string(),
            "missing required fields: issuer, date"
        );
    }

    #[test]
    fn an_empty_draft_reports_all_three_required_fields() {
        let error = CertificateDraft::default()
            .validate()
            .expect_err("empty draft should fail");
        assert_eq!(
            error.missing,
            vec![
                RequiredField::Title,
                RequiredField::Issuer,
                RequiredField::Date
            ]
        );
    }

    #[test]
    fn commit_drops_an_empty_attachment_string() {
        let mut draft = filled_draft();
        draft.file_data_uri = Some(String::new());
        let record = draft.commit("2".to_string()).expect("draft should commit");
        assert!(record.file_data_uri.is_none());
    }
}
