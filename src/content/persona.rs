use super::{bullet_section, field, text_section, ContentSource, DocumentKind};
use folio_types::{ContentBlock, ContentModel};
use serde::Deserialize;
use std::collections::BTreeMap;

/// A generated customer persona, as returned by the persona API.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaProfile {
    #[serde(default)]
    pub name: String,
    pub age: Option<u32>,
    pub occupation: Option<String>,
    pub location: Option<String>,
    pub income: Option<String>,
    pub education: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub motivations: Vec<String>,
    #[serde(default)]
    pub preferred_channels: Vec<String>,
    #[serde(default)]
    pub traits: BTreeMap<String, String>,
}

impl PersonaProfile {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn heading(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() { "Unnamed persona" } else { name }
    }
}

impl ContentSource for PersonaProfile {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Persona
    }

    fn title(&self) -> &str {
        self.heading()
    }

    fn to_content(&self) -> ContentModel {
        let age = self.age.map(|a| a.to_string());
        let mut blocks = vec![
            ContentBlock::heading(self.heading(), 1),
            ContentBlock::section(
                "Profile",
                vec![
                    field("Age", age.as_deref()),
                    field("Occupation", self.occupation.as_deref()),
                    field("Location", self.location.as_deref()),
                    field("Income", self.income.as_deref()),
                    field("Education", self.education.as_deref()),
                ],
            ),
        ];

        blocks.extend(text_section("About", self.bio.as_deref()));
        blocks.extend(bullet_section("Goals", &self.goals));
        blocks.extend(bullet_section("Pain Points", &self.pain_points));
        blocks.extend(bullet_section("Motivations", &self.motivations));
        blocks.extend(bullet_section("Preferred Channels", &self.preferred_channels));

        if !self.traits.is_empty() {
            let traits = self
                .traits
                .iter()
                .map(|(k, v)| field(k, Some(v.as_str())))
                .collect();
            blocks.push(ContentBlock::section("Traits", traits));
        }

        ContentModel::new(self.heading(), blocks)
    }
}
