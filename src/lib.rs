//! Curriculum catalog behind the AI Labs roadmap.
//!
//! The crate owns a fixed catalog of learning topics, each with an ordered run
//! of hands-on labs, and answers the read-only questions the roadmap needs:
//! which topics sit in a category, which topics make up the momentum-starter
//! sequence, and in what order the category sections appear. The catalog is
//! embedded JSON, validated against `schema/labs_catalog.schema.json`, loaded
//! once, and never mutated.

pub mod catalog;
pub mod config;
pub mod display;
mod schema_loader;

pub use catalog::{
    BUILTIN_CATALOG_JSON, CATEGORY_ORDER, CatalogDocument, CatalogKey, CatalogSummary, Category,
    CategoryCount, Curriculum, IntegrityIssue, LAB_STATUSES, Lab, LabId, LabStatus, Severity,
    StatusCount, Topic, TopicId, category_order, check_display_order, check_document,
    load_catalog_from_path, momentum_starters, parse_catalog_str, topics_by_category,
};
pub use config::{CATALOG_PATH_ENV, CatalogSource, LOG_ENV};

/// Split comma- or whitespace-delimited lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
