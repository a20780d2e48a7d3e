//! News articles, press releases and event write-ups.

use super::{clean, clean_opt, ContentKind, Record, SluggableRecord};
use crate::validation::{Checker, Validate, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const CATEGORIES: &[&str] = &["news", "press_release", "event", "blog"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewsArticleInput {
    pub title: String,
    pub excerpt: String,
    pub body: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub published: bool,
}

fn default_category() -> String {
    "news".to_string()
}

impl Validate for NewsArticleInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut check = Checker::new();
        check
            .length("title", &self.title, 5, 200)
            .length("excerpt", &self.excerpt, 10, 500)
            .min_length("body", &self.body, 20)
            .url_opt("image_url", self.image_url.as_deref())
            .one_of("category", &self.category, CATEGORIES);
        check.finish()
    }
}

impl Record for NewsArticle {
    const KIND: ContentKind = ContentKind::NewsArticle;

    fn id(&self) -> &str {
        &self.id
    }
}

impl SluggableRecord for NewsArticle {
    type Input = NewsArticleInput;

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn input_title(input: &NewsArticleInput) -> &str {
        input.title.trim()
    }

    fn from_input(id: String, slug: String, input: NewsArticleInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: clean(input.title),
            slug,
            excerpt: clean(input.excerpt),
            body: input.body,
            image_url: clean_opt(input.image_url),
            category: input.category,
            published: input.published,
            published_at: input.published.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, slug: String, input: NewsArticleInput, now: DateTime<Utc>) {
        self.title = clean(input.title);
        self.slug = slug;
        self.excerpt = clean(input.excerpt);
        self.body = input.body;
        self.image_url = clean_opt(input.image_url);
        self.category = input.category;
        if input.published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
        self.published = input.published;
        self.updated_at = now;
    }
}
