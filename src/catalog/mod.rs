//! Curriculum catalog wiring.
//!
//! This module wraps the JSON catalog under `schema/labs.json` so the roadmap
//! renderer and CLI can load a validated snapshot and query it. Types here
//! mirror the schema fields; callers use `Curriculum` for lookups and the
//! roadmap queries (`topics_by_category`, `momentum_starters`) and
//! `category_order` for section ordering.

pub mod identity;
pub mod index;
pub mod integrity;
pub mod model;
pub mod query;

pub use identity::{
    CATEGORY_ORDER, CatalogKey, Category, LAB_STATUSES, LabId, LabStatus, TopicId,
    category_order,
};
pub use index::{BUILTIN_CATALOG_JSON, CatalogSummary, CategoryCount, Curriculum, StatusCount};
pub use integrity::{IntegrityIssue, Severity, check_display_order, check_document};
pub use model::{CatalogDocument, Lab, Topic, load_catalog_from_path, parse_catalog_str};
pub use query::{momentum_starters, topics_by_category};
