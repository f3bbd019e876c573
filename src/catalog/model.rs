//! Deserializable representation of `schema/labs.json`.
//!
//! The types mirror the catalog schema field for field. Use `Curriculum` for
//! validation, indexing, and the roadmap queries; use these structs directly
//! when only the raw document is needed (tests, tooling).

use crate::catalog::identity::{CatalogKey, Category, LabId, LabStatus, TopicId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Full labs catalog as stored on disk.
pub struct CatalogDocument {
    #[serde(rename = "schema_version")]
    pub key: CatalogKey,
    pub title: String,
    pub topics: Vec<Topic>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Subject area made of an ordered run of labs.
pub struct Topic {
    pub id: TopicId,
    pub letter: String,
    pub name: String,
    pub category: Category,
    pub difficulty: u8,
    pub job_demand: u8,
    pub time_to_mid_level: String,
    pub description: String,
    pub is_momentum_starter: bool,
    /// Position among momentum starters. Absence is kept as `None`; only
    /// `momentum_rank` maps it to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum_order: Option<i32>,
    /// Recommended completion order.
    pub labs: Vec<Lab>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// One hands-on exercise inside a topic.
pub struct Lab {
    pub id: LabId,
    pub title: String,
    pub duration: String,
    /// Display-only labels such as `"A1"`; never resolved at load time.
    #[serde(default)]
    pub prereqs: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub status: LabStatus,
}

impl Topic {
    /// Sort key used when ordering momentum starters.
    pub fn momentum_rank(&self) -> i32 {
        self.momentum_order.unwrap_or(0)
    }

    pub fn lab_count(&self) -> usize {
        self.labs.len()
    }

    pub fn completed_labs(&self) -> usize {
        self.labs
            .iter()
            .filter(|lab| lab.status == LabStatus::Complete)
            .count()
    }

    /// Short label for one of this topic's labs, e.g. `A1` for lab `a1`.
    pub fn lab_label(&self, lab: &Lab) -> String {
        format!("{}{}", self.letter, lab.ordinal())
    }
}

/// Topic letters that prefix lab ids in the catalog (`a1` through `u3`).
pub const LAB_ID_PREFIXES: std::ops::RangeInclusive<char> = 'a'..='u';

impl Lab {
    /// The lab id with its leading topic letter removed (`a2` -> `2`).
    ///
    /// Only prefixes in `LAB_ID_PREFIXES` are stripped; any other id is
    /// returned whole.
    pub fn ordinal(&self) -> &str {
        let id = self.id.0.as_str();
        match id.chars().next() {
            Some(first) if LAB_ID_PREFIXES.contains(&first) => &id[1..],
            _ => id,
        }
    }

    pub fn has_prereqs(&self) -> bool {
        !self.prereqs.is_empty()
    }
}

/// Parse a catalog document without schema or integrity validation.
pub fn parse_catalog_str(data: &str) -> Result<CatalogDocument> {
    let catalog: CatalogDocument = serde_json::from_str(data)?;
    Ok(catalog)
}

/// Read and parse a catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogDocument> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_catalog_str(&data).with_context(|| format!("parsing {}", path.display()))
}
