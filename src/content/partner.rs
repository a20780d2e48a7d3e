//! Funding and implementing partners shown in the logo wall.

use super::{clean, clean_opt, ContentKind, OrderedRecord, Record};
use crate::validation::{Checker, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const CATEGORIES: &[&str] = &["funding", "implementing", "strategic"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    #[serde(default)]
    pub website_url: Option<String>,
    pub category: String,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartnerInput {
    pub name: String,
    pub logo_url: String,
    #[serde(default)]
    pub website_url: Option<String>,
    pub category: String,
}

impl Validate for PartnerInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("name", &self.name, 2, 100)
            .url("logo_url", &self.logo_url)
            .url_opt("website_url", self.website_url.as_deref())
            .one_of("category", &self.category, CATEGORIES);
        check.finish()
    }
}

impl Record for Partner {
    const KIND: ContentKind = ContentKind::Partner;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OrderedRecord for Partner {
    type Input = PartnerInput;

    fn order(&self) -> u32 {
        self.order
    }

    fn from_input(id: String, order: u32, input: PartnerInput) -> Self {
        Self {
            id,
            name: clean(input.name),
            logo_url: clean(input.logo_url),
            website_url: clean_opt(input.website_url),
            category: input.category,
            order,
        }
    }

    fn apply(&mut self, input: PartnerInput) {
        self.name = clean(input.name);
        self.logo_url = clean(input.logo_url);
        self.website_url = clean_opt(input.website_url);
        self.category = input.category;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::parse_input;
    use serde_json::json;

    #[test]
    fn test_logo_must_be_url() {
        let errors = parse_input::<PartnerInput>(json!({
            "name": "Danida",
            "logo_url": "logo.png",
            "category": "funding"
        }))
        .unwrap_err();
        assert!(errors.has_field("logo_url"));
        assert!(!errors.has_field("category"));
    }
}
