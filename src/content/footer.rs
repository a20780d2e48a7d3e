//! Footer navigation columns and social media links.

use super::{clean, ContentKind, OrderedRecord, Record};
use crate::validation::{Checker, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const SECTIONS: &[&str] = &["about", "programmes", "resources", "legal"];
pub const PLATFORMS: &[&str] = &["facebook", "twitter", "linkedin", "instagram", "youtube"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: String,
    pub label: String,
    pub href: String,
    pub section: String,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLinkInput {
    pub label: String,
    pub href: String,
    pub section: String,
}

impl Validate for FooterLinkInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("label", &self.label, 2, 50)
            .link("href", &self.href)
            .one_of("section", &self.section, SECTIONS);
        check.finish()
    }
}

impl Record for FooterLink {
    const KIND: ContentKind = ContentKind::FooterLink;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OrderedRecord for FooterLink {
    type Input = FooterLinkInput;

    fn order(&self) -> u32 {
        self.order
    }

    fn from_input(id: String, order: u32, input: FooterLinkInput) -> Self {
        Self {
            id,
            label: clean(input.label),
            href: clean(input.href),
            section: input.section,
            order,
        }
    }

    fn apply(&mut self, input: FooterLinkInput) {
        self.label = clean(input.label);
        self.href = clean(input.href);
        self.section = input.section;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinkInput {
    pub platform: String,
    pub url: String,
}

impl Validate for SocialLinkInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .one_of("platform", &self.platform, PLATFORMS)
            .url("url", &self.url);
        check.finish()
    }
}

impl Record for SocialLink {
    const KIND: ContentKind = ContentKind::SocialLink;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OrderedRecord for SocialLink {
    type Input = SocialLinkInput;

    fn order(&self) -> u32 {
        self.order
    }

    fn from_input(id: String, order: u32, input: SocialLinkInput) -> Self {
        Self {
            id,
            platform: input.platform,
            url: clean(input.url),
            order,
        }
    }

    fn apply(&mut self, input: SocialLinkInput) {
        self.platform = input.platform;
        self.url = clean(input.url);
    }
}
