// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod actions;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod ordering;
pub mod publishing;
pub mod revalidate;
pub mod slug;
pub mod store;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use actions::{parse_kind, ActionResult, ContentActions};
pub use config::{load_config, CmsConfig, ConfigError, StoreBackend};
pub use content::{
    ContentKind, FooterLink, HeroButton, NewsArticle, Opportunity, OrderedRecord, Partner,
    Record, SluggableRecord, SocialLink, Statistic, TeamMember,
};
pub use error::{ContentError, ToErrorCode};
pub use ordering::{OrderedCollection, ReorderItem, ReorderPolicy};
pub use publishing::{Publisher, Revision};
pub use revalidate::{RecordingRevalidator, Revalidator, TracingRevalidator};
pub use slug::{ensure_unique, normalize};
pub use store::{InMemoryStore, JsonFileStore, Row, Store, StoreError};
pub use validation::{parse_input, Validate, ValidationErrors};
