//! Event feedback export formats

use std::fmt::Write;
use std::str::FromStr;

use gallery_core::DomainError;

use super::responses::FeedbackExportRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(DomainError::ValidationError(format!(
                "unsupported export format: {other}"
            ))),
        }
    }
}

const CSV_HEADER: [&str; 14] = [
    "id",
    "photo_id",
    "photo_filename",
    "feedback_type",
    "rating",
    "comment_text",
    "guest_identifier",
    "guest_name",
    "guest_email",
    "ip_address",
    "user_agent",
    "is_approved",
    "is_hidden",
    "created_at",
];

/// Render rows as RFC 4180 CSV with a header line
pub fn render_csv(rows: &[FeedbackExportRow]) -> String {
    let mut out = String::new();
    push_record(&mut out, CSV_HEADER.iter().map(|h| (*h).to_string()));

    for row in rows {
        push_record(
            &mut out,
            [
                row.id.clone(),
                row.photo_id.clone(),
                row.photo_filename.clone().unwrap_or_default(),
                row.feedback_type.as_str().to_string(),
                row.rating.map(|r| r.to_string()).unwrap_or_default(),
                row.comment_text.clone().unwrap_or_default(),
                row.guest_identifier.clone(),
                row.guest_name.clone().unwrap_or_default(),
                row.guest_email.clone().unwrap_or_default(),
                row.ip_address.clone().unwrap_or_default(),
                row.user_agent.clone().unwrap_or_default(),
                row.is_approved.to_string(),
                row.is_hidden.to_string(),
                row.created_at.to_rfc3339(),
            ],
        );
    }
    out
}

fn push_record(out: &mut String, fields: impl IntoIterator<Item = String>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains([',', '"', '\n', '\r']) {
            let _ = write!(out, "\"{}\"", field.replace('"', "\"\""));
        } else {
            out.push_str(&field);
        }
    }
    out.push_str("\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gallery_core::FeedbackType;

    fn row(comment: &str) -> FeedbackExportRow {
        FeedbackExportRow {
            id: "1".into(),
            photo_id: "2".into(),
            photo_filename: Some("IMG_1.jpg".into()),
            feedback_type: FeedbackType::Comment,
            rating: None,
            comment_text: Some(comment.into()),
            guest_identifier: "guest-1".into(),
            guest_name: None,
            guest_email: None,
            ip_address: None,
            user_agent: None,
            is_approved: false,
            is_hidden: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_csv_quotes_special_fields() {
        let csv = render_csv(&[row("Nice, really \"nice\"")]);
        let mut lines = csv.split("\r\n");
        assert!(lines.next().unwrap().starts_with("id,photo_id,photo_filename"));
        let record = lines.next().unwrap();
        assert!(record.contains("\"Nice, really \"\"nice\"\"\""));
        assert!(record.contains(",false,true,"));
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = render_csv(&[]);
        assert_eq!(csv.matches("\r\n").count(), 1);
    }
}
