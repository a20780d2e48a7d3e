//! Call-to-action buttons in the home page hero.

use super::{clean, ContentKind, OrderedRecord, Record};
use crate::validation::{Checker, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const VARIANTS: &[&str] = &["primary", "secondary", "outline"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroButton {
    pub id: String,
    pub label: String,
    pub href: String,
    pub variant: String,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroButtonInput {
    pub label: String,
    pub href: String,
    #[serde(default = "default_variant")]
    pub variant: String,
}

fn default_variant() -> String {
    "primary".to_string()
}

impl Validate for HeroButtonInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("label", &self.label, 2, 100)
            .link("href", &self.href)
            .one_of("variant", &self.variant, VARIANTS);
        check.finish()
    }
}

impl Record for HeroButton {
    const KIND: ContentKind = ContentKind::HeroButton;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OrderedRecord for HeroButton {
    type Input = HeroButtonInput;

    fn order(&self) -> u32 {
        self.order
    }

    fn from_input(id: String, order: u32, input: HeroButtonInput) -> Self {
        Self {
            id,
            label: clean(input.label),
            href: clean(input.href),
            variant: input.variant,
            order,
        }
    }

    fn apply(&mut self, input: HeroButtonInput) {
        self.label = clean(input.label);
        self.href = clean(input.href);
        self.variant = input.variant;
    }
}
