use super::{bullet_section, field, or_placeholder, text_section, ContentSource, DocumentKind};
use folio_types::{ContentBlock, ContentModel};
use serde::Deserialize;

/// How well a product fits one audience segment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentFit {
    #[serde(default)]
    pub name: String,
    pub score: Option<f32>,
    pub notes: Option<String>,
}

/// A market-fit simulation result for one product against one persona.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFitReport {
    #[serde(default)]
    pub product_name: String,
    pub persona_name: Option<String>,
    /// 0 to 100.
    pub fit_score: Option<f32>,
    /// 0 to 1.
    pub purchase_likelihood: Option<f32>,
    pub verdict: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub segments: Vec<SegmentFit>,
}

impl MarketFitReport {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn product(&self) -> String {
        or_placeholder(Some(&self.product_name))
    }
}

fn format_score(score: f32) -> String {
    format!("{}/100", score.round() as i64)
}

fn format_percent(ratio: f32) -> String {
    format!("{}%", (ratio * 100.0).round() as i64)
}

fn segment_block(segment: &SegmentFit) -> ContentBlock {
    let score = segment.score.map(format_score);
    let mut children = vec![field("Score", score.as_deref())];
    if let Some(notes) = segment.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        children.push(ContentBlock::paragraph(notes));
    }
    ContentBlock::section(or_placeholder(Some(&segment.name)), children)
}

impl ContentSource for MarketFitReport {
    fn kind(&self) -> DocumentKind {
        DocumentKind::MarketFit
    }

    fn title(&self) -> &str {
        &self.product_name
    }

    fn to_content(&self) -> ContentModel {
        let title = format!("Market Fit: {}", self.product());
        let score = self.fit_score.map(format_score);
        let likelihood = self.purchase_likelihood.map(format_percent);

        let mut blocks = vec![
            ContentBlock::heading(title.clone(), 1),
            field("Persona", self.persona_name.as_deref()),
            field("Fit Score", score.as_deref()),
            field("Purchase Likelihood", likelihood.as_deref()),
            field("Verdict", self.verdict.as_deref()),
        ];

        blocks.extend(text_section("Summary", self.summary.as_deref()));
        blocks.extend(bullet_section("Strengths", &self.strengths));
        blocks.extend(bullet_section("Concerns", &self.concerns));
        blocks.extend(bullet_section("Recommendations", &self.recommendations));

        if !self.segments.is_empty() {
            blocks.push(ContentBlock::section(
                "Segments",
                self.segments.iter().map(segment_block).collect(),
            ));
        }

        ContentModel::new(title, blocks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PLACEHOLDER;

    #[test]
    fn formats_scores_and_likelihood() {
        let report = MarketFitReport {
            product_name: "Acme Sync".into(),
            fit_score: Some(72.4),
            purchase_likelihood: Some(0.385),
            ..Default::default()
        };
        let model = report.to_content();
        assert_eq!(model.title, "Market Fit: Acme Sync");
        assert_eq!(model.blocks[2], ContentBlock::key_value("Fit Score", "72/100"));
        assert_eq!(
            model.blocks[3],
            ContentBlock::key_value("Purchase Likelihood", "39%")
        );
        assert_eq!(model.blocks[4], ContentBlock::key_value("Verdict", PLACEHOLDER));
    }

    #[test]
    fn segments_nest_one_section_each() {
        let report = MarketFitReport::from_json(
            r#"{
                "productName": "Acme",
                "segments": [
                    {"name": "SMB", "score": 81, "notes": "Strong pull"},
                    {"name": "", "score": null}
                ]
            }"#,
        )
        .unwrap();
        let model = report.to_content();
        let ContentBlock::Section { title, children } = model.blocks.last().unwrap() else {
            panic!("expected segments section");
        };
        assert_eq!(title, "Segments");
        assert_eq!(
            children[0],
            ContentBlock::section(
                "SMB",
                vec![
                    ContentBlock::key_value("Score", "81/100"),
                    ContentBlock::paragraph("Strong pull"),
                ]
            )
        );
        assert_eq!(
            children[1],
            ContentBlock::section(PLACEHOLDER, vec![ContentBlock::key_value("Score", PLACEHOLDER)])
        );
    }
}
