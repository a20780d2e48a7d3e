//! Field rules used by the content input schemas.

use super::ValidationErrors;
use std::sync::LazyLock;

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX is a valid regex literal")
});

/// Absolute `http` or `https` URL with a host.
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value.trim()).is_ok_and(|u| {
        matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Site-relative path such as `/programmes/agribusiness`.
#[must_use]
pub fn is_site_path(value: &str) -> bool {
    let value = value.trim();
    value.starts_with('/') && !value.starts_with("//") && !value.chars().any(char::is_whitespace)
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Accumulates field errors across a whole input.
#[derive(Debug, Default)]
pub struct Checker {
    errors: ValidationErrors,
}

impl Checker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an arbitrary failure.
    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.add(field, message);
        self
    }

    /// Trimmed character count within `min..=max`.
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.trim().chars().count();
        if len < min {
            self.fail(field, format!("must be at least {min} characters"));
        } else if len > max {
            self.fail(field, format!("must be at most {max} characters"));
        }
        self
    }

    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.trim().chars().count() < min {
            self.fail(field, format!("must be at least {min} characters"));
        }
        self
    }

    pub fn max_length_opt(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if value.is_some_and(|v| v.trim().chars().count() > max) {
            self.fail(field, format!("must be at most {max} characters"));
        }
        self
    }

    pub fn one_of(&mut self, field: &str, value: &str, allowed: &[&str]) -> &mut Self {
        if !allowed.contains(&value) {
            self.fail(field, format!("must be one of: {}", allowed.join(", ")));
        }
        self
    }

    pub fn url(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_url(value) {
            self.fail(field, "must be a valid URL");
        }
        self
    }

    /// Empty optional strings count as absent.
    pub fn url_opt(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(v) if !v.trim().is_empty() => self.url(field, v),
            _ => self,
        }
    }

    /// Absolute URL or site-relative path.
    pub fn link(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_url(value) && !is_site_path(value) {
            self.fail(field, "must be a valid URL or a path starting with /");
        }
        self
    }

    pub fn email_opt(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if value.is_some_and(|v| !v.trim().is_empty() && !is_valid_email(v)) {
            self.fail(field, "must be a valid email address");
        }
        self
    }

    pub fn positive(&mut self, field: &str, value: i64) -> &mut Self {
        if value <= 0 {
            self.fail(field, "must be positive");
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        std::mem::take(&mut self.errors).into_result()
    }
}
