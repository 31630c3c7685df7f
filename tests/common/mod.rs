pub mod pdf_assertions;

use chrono::NaiveDate;
use folio::{ExportBuilder, ExportedDocument, Exporter, MarketFitReport, PersonaProfile, SegmentFit};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn from_export(document: &ExportedDocument) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(document.bytes.clone())
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page (1-based), one line per fragment.
    pub fn page_text(&self, page: u32) -> String {
        pdf_assertions::page_lines(&self.doc, page).join("\n")
    }
}

pub fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

/// A4 exporter with a pinned filename date.
pub fn exporter() -> Exporter {
    ExportBuilder::new().with_date(fixed_date()).build().unwrap()
}

pub fn sample_persona() -> PersonaProfile {
    PersonaProfile {
        name: "Ada Park".into(),
        age: Some(34),
        occupation: Some("Product Manager".into()),
        location: Some("Oslo".into()),
        income: None,
        education: Some("MSc Informatics".into()),
        bio: Some("Leads a small platform team and evaluates tooling every quarter.".into()),
        goals: vec!["Ship faster".into(), "Reduce tool sprawl".into()],
        pain_points: vec!["Slow onboarding".into()],
        motivations: vec![],
        preferred_channels: vec!["Email".into(), "Webinars".into()],
        traits: [("risk".to_string(), "low".to_string())].into_iter().collect(),
    }
}

pub fn sample_report() -> MarketFitReport {
    MarketFitReport {
        product_name: "Acme Sync".into(),
        persona_name: Some("Ada Park".into()),
        fit_score: Some(78.0),
        purchase_likelihood: Some(0.42),
        verdict: Some("Promising".into()),
        summary: Some("Strong fit for teams that already automate deployments.".into()),
        strengths: vec!["Fast setup".into()],
        concerns: vec!["Pricing".into()],
        recommendations: vec!["Offer a team tier".into()],
        segments: vec![SegmentFit {
            name: "Startups".into(),
            score: Some(85.0),
            notes: None,
        }],
    }
}
