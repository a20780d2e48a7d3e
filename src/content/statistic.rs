//! Impact statistics shown in the home page stats band ("100+ jobs created").

use super::{clean, clean_opt, ContentKind, OrderedRecord, Record};
use crate::validation::{Checker, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub id: String,
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatisticInput {
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Validate for StatisticInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("label", &self.label, 2, 100)
            .positive("value", self.value)
            .max_length_opt("suffix", self.suffix.as_deref(), 10)
            .max_length_opt("icon", self.icon.as_deref(), 50);
        check.finish()
    }
}

impl Record for Statistic {
    const KIND: ContentKind = ContentKind::Statistic;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OrderedRecord for Statistic {
    type Input = StatisticInput;

    fn order(&self) -> u32 {
        self.order
    }

    fn from_input(id: String, order: u32, input: StatisticInput) -> Self {
        Self {
            id,
            label: clean(input.label),
            value: input.value,
            suffix: clean_opt(input.suffix),
            icon: clean_opt(input.icon),
            order,
        }
    }

    fn apply(&mut self, input: StatisticInput) {
        self.label = clean(input.label);
        self.value = input.value;
        self.suffix = clean_opt(input.suffix);
        self.icon = clean_opt(input.icon);
    }
}
