//! Staff and board members on the About page.

use super::{clean, clean_opt, ContentKind, OrderedRecord, Record};
use crate::validation::{Checker, Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMemberInput {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

impl Validate for TeamMemberInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("name", &self.name, 2, 100)
            .length("role", &self.role, 2, 100)
            .url_opt("photo_url", self.photo_url.as_deref())
            .max_length_opt("bio", self.bio.as_deref(), 1000)
            .url_opt("linkedin_url", self.linkedin_url.as_deref());
        check.finish()
    }
}

impl Record for TeamMember {
    const KIND: ContentKind = ContentKind::TeamMember;

    fn id(&self) -> &str {
        &self.id
    }
}

impl OrderedRecord for TeamMember {
    type Input = TeamMemberInput;

    fn order(&self) -> u32 {
        self.order
    }

    fn from_input(id: String, order: u32, input: TeamMemberInput) -> Self {
        Self {
            id,
            name: clean(input.name),
            role: clean(input.role),
            photo_url: clean_opt(input.photo_url),
            bio: clean_opt(input.bio),
            linkedin_url: clean_opt(input.linkedin_url),
            order,
        }
    }

    fn apply(&mut self, input: TeamMemberInput) {
        self.name = clean(input.name);
        self.role = clean(input.role);
        self.photo_url = clean_opt(input.photo_url);
        self.bio = clean_opt(input.bio);
        self.linkedin_url = clean_opt(input.linkedin_url);
    }
}
