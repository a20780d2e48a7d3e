//! Careers page openings: jobs, internships, tenders and open calls.

use super::{clean, clean_opt, default_true, ContentKind, Record, SluggableRecord};
use crate::validation::{Checker, Validate, ValidationErrors};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const TYPES: &[&str] = &["job", "internship", "tender", "call_for_applications"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(rename = "type")]
    pub opportunity_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub application_email: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpportunityInput {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub opportunity_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub application_email: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Validate for OpportunityInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("title", &self.title, 5, 200)
            .min_length("description", &self.description, 20)
            .one_of("type", &self.opportunity_type, TYPES)
            .max_length_opt("location", self.location.as_deref(), 100)
            .email_opt("application_email", self.application_email.as_deref())
            .url_opt("application_url", self.application_url.as_deref());
        check.finish()
    }
}

impl Record for Opportunity {
    const KIND: ContentKind = ContentKind::Opportunity;

    fn id(&self) -> &str {
        &self.id
    }
}

impl SluggableRecord for Opportunity {
    type Input = OpportunityInput;

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn input_title(input: &OpportunityInput) -> &str {
        input.title.trim()
    }

    fn from_input(id: String, slug: String, input: OpportunityInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: clean(input.title),
            slug,
            description: input.description,
            opportunity_type: input.opportunity_type,
            location: clean_opt(input.location),
            deadline: input.deadline,
            application_email: clean_opt(input.application_email),
            application_url: clean_opt(input.application_url),
            is_active: input.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, slug: String, input: OpportunityInput, now: DateTime<Utc>) {
        self.title = clean(input.title);
        self.slug = slug;
        self.description = input.description;
        self.opportunity_type = input.opportunity_type;
        self.location = clean_opt(input.location);
        self.deadline = input.deadline;
        self.application_email = clean_opt(input.application_email);
        self.application_url = clean_opt(input.application_url);
        self.is_active = input.is_active;
        self.updated_at = now;
    }
}
