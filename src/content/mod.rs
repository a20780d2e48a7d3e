//! Content kinds managed by the admin backend.
//!
//! Six kinds are ordered collections (displayed in an editor-controlled
//! sequence) and two are sluggable (addressed by a URL slug derived from their
//! title).

pub mod footer;
pub mod hero_button;
pub mod news;
pub mod opportunity;
pub mod partner;
pub mod statistic;
pub mod team_member;

pub use footer::{FooterLink, FooterLinkInput, SocialLink, SocialLinkInput};
pub use hero_button::{HeroButton, HeroButtonInput};
pub use news::{NewsArticle, NewsArticleInput};
pub use opportunity::{Opportunity, OpportunityInput};
pub use partner::{Partner, PartnerInput};
pub use statistic::{Statistic, StatisticInput};
pub use team_member::{TeamMember, TeamMemberInput};

use crate::store::{Row, StoreError};
use crate::validation::Validate;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the display-order column in ordered tables.
pub const ORDER_FIELD: &str = "order";

/// A typed row of one content table.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ContentKind;

    fn id(&self) -> &str;

    fn to_row(&self) -> Result<Row, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(row) => Ok(row),
            _ => Err(StoreError::invalid_row(
                Self::KIND.table(),
                "record did not serialize to an object",
            )),
        }
    }

    fn from_row(row: Row) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(row))?)
    }
}

/// Record with an editor-controlled display position.
pub trait OrderedRecord: Record {
    type Input: DeserializeOwned + Validate + Send;

    fn order(&self) -> u32;

    fn from_input(id: String, order: u32, input: Self::Input) -> Self;

    /// Replace the business fields, keeping id and order.
    fn apply(&mut self, input: Self::Input);
}

/// Record addressed by a slug derived from its title.
pub trait SluggableRecord: Record {
    type Input: DeserializeOwned + Validate + Send;

    fn title(&self) -> &str;

    fn slug(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn input_title(input: &Self::Input) -> &str;

    fn from_input(id: String, slug: String, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Replace the editable fields. `slug` is the value to keep or the new one.
    fn apply(&mut self, slug: String, input: Self::Input, now: DateTime<Utc>);
}

/// Discriminator for every content table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    HeroButton,
    Statistic,
    TeamMember,
    Partner,
    FooterLink,
    SocialLink,
    NewsArticle,
    Opportunity,
}

impl ContentKind {
    pub const ALL: [ContentKind; 8] = [
        ContentKind::HeroButton,
        ContentKind::Statistic,
        ContentKind::TeamMember,
        ContentKind::Partner,
        ContentKind::FooterLink,
        ContentKind::SocialLink,
        ContentKind::NewsArticle,
        ContentKind::Opportunity,
    ];

    /// Backing table name.
    #[must_use]
    pub fn table(self) -> &'static str {
        match self {
            ContentKind::HeroButton => "hero_buttons",
            ContentKind::Statistic => "statistics",
            ContentKind::TeamMember => "team_members",
            ContentKind::Partner => "partners",
            ContentKind::FooterLink => "footer_links",
            ContentKind::SocialLink => "footer_social_links",
            ContentKind::NewsArticle => "news_articles",
            ContentKind::Opportunity => "opportunities",
        }
    }

    #[must_use]
    pub fn is_ordered(self) -> bool {
        !self.is_sluggable()
    }

    #[must_use]
    pub fn is_sluggable(self) -> bool {
        matches!(self, ContentKind::NewsArticle | ContentKind::Opportunity)
    }

    /// Admin page listing this kind.
    #[must_use]
    pub fn admin_path(self) -> &'static str {
        match self {
            ContentKind::HeroButton => "/admin/hero",
            ContentKind::Statistic => "/admin/statistics",
            ContentKind::TeamMember => "/admin/team",
            ContentKind::Partner => "/admin/partners",
            ContentKind::FooterLink | ContentKind::SocialLink => "/admin/footer",
            ContentKind::NewsArticle => "/admin/news",
            ContentKind::Opportunity => "/admin/opportunities",
        }
    }

    /// Public pages that render this kind.
    #[must_use]
    pub fn public_paths(self) -> &'static [&'static str] {
        match self {
            ContentKind::HeroButton | ContentKind::Statistic => &["/"],
            ContentKind::TeamMember => &["/about"],
            ContentKind::Partner => &["/", "/partners"],
            // The footer is part of the root layout.
            ContentKind::FooterLink | ContentKind::SocialLink => &["/"],
            ContentKind::NewsArticle => &["/", "/news"],
            ContentKind::Opportunity => &["/careers"],
        }
    }

    /// Public detail page prefix for sluggable kinds.
    #[must_use]
    pub fn detail_prefix(self) -> Option<&'static str> {
        match self {
            ContentKind::NewsArticle => Some("/news"),
            ContentKind::Opportunity => Some("/careers"),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "hero_button" | "hero_buttons" | "hero" => Ok(ContentKind::HeroButton),
            "statistic" | "statistics" | "stats" => Ok(ContentKind::Statistic),
            "team_member" | "team_members" | "team" => Ok(ContentKind::TeamMember),
            "partner" | "partners" => Ok(ContentKind::Partner),
            "footer_link" | "footer_links" => Ok(ContentKind::FooterLink),
            "social_link" | "social_links" | "footer_social_links" => Ok(ContentKind::SocialLink),
            "news_article" | "news_articles" | "news" => Ok(ContentKind::NewsArticle),
            "opportunity" | "opportunities" | "careers" => Ok(ContentKind::Opportunity),
            _ => Err(format!("Unknown content kind: {s}")),
        }
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Trim a required string field.
pub(crate) fn clean(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Trim an optional field, mapping blank strings to `None`.
pub(crate) fn clean_opt(value: Option<String>) -> Option<String> {
    value.map(clean).filter(|v| !v.is_empty())
}
