use anyhow::{Error, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Versioned key for a labs catalog document (e.g., `labs_catalog_v1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable identifier for a topic (e.g., `topic-a`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub String);

/// Stable identifier for a lab, unique across the whole catalog (e.g., `a1`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabId(pub String);

/// Top-level grouping a topic is filed under on the roadmap.
///
/// The set is closed: catalogs naming any other tag are rejected at load time,
/// so `match` on a category is always exhaustive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Foundations,
    CoreArchitecture,
    Orchestration,
    Frameworks,
    DataRetrieval,
    IntegrationDeployment,
    Specializations,
}

/// Section order used when rendering the roadmap.
///
/// Maintained by hand; `integrity` checks that it names every category exactly
/// once.
pub const CATEGORY_ORDER: [Category; 7] = [
    Category::Foundations,
    Category::CoreArchitecture,
    Category::Orchestration,
    Category::Frameworks,
    Category::DataRetrieval,
    Category::IntegrationDeployment,
    Category::Specializations,
];

/// Returns the fixed category display order.
pub fn category_order() -> &'static [Category] {
    &CATEGORY_ORDER
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Foundations => "foundations",
            Category::CoreArchitecture => "core-architecture",
            Category::Orchestration => "orchestration",
            Category::Frameworks => "frameworks",
            Category::DataRetrieval => "data-retrieval",
            Category::IntegrationDeployment => "integration-deployment",
            Category::Specializations => "specializations",
        }
    }

    /// Section heading shown above the category's topics.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Foundations => "Foundations",
            Category::CoreArchitecture => "Core Architecture",
            Category::Orchestration => "Orchestration",
            Category::Frameworks => "Frameworks",
            Category::DataRetrieval => "Data & Retrieval",
            Category::IntegrationDeployment => "Integration & Deployment",
            Category::Specializations => "Specializations",
        }
    }

    /// Accent color name used for the topic letter badge.
    pub fn accent(&self) -> &'static str {
        match self {
            Category::Foundations => "emerald",
            Category::CoreArchitecture => "sky",
            Category::Orchestration => "violet",
            Category::Frameworks => "amber",
            Category::DataRetrieval => "rose",
            Category::IntegrationDeployment => "blue",
            Category::Specializations => "teal",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "foundations" => Ok(Category::Foundations),
            "core-architecture" => Ok(Category::CoreArchitecture),
            "orchestration" => Ok(Category::Orchestration),
            "frameworks" => Ok(Category::Frameworks),
            "data-retrieval" => Ok(Category::DataRetrieval),
            "integration-deployment" => Ok(Category::IntegrationDeployment),
            "specializations" => Ok(Category::Specializations),
            other => bail!(
                "unknown category '{other}' (expected one of {})",
                CATEGORY_ORDER
                    .iter()
                    .map(Category::as_str)
                    .collect::<Vec<_>>()
                    .join("|")
            ),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Seed progress marker carried by each lab.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub enum LabStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

/// Every status, in the order the summary reports them.
pub const LAB_STATUSES: [LabStatus; 3] = [
    LabStatus::NotStarted,
    LabStatus::InProgress,
    LabStatus::Complete,
];

impl LabStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabStatus::NotStarted => "not-started",
            LabStatus::InProgress => "in-progress",
            LabStatus::Complete => "complete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LabStatus::NotStarted => "Not Started",
            LabStatus::InProgress => "In Progress",
            LabStatus::Complete => "Complete",
        }
    }
}

impl FromStr for LabStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "not-started" => Ok(LabStatus::NotStarted),
            "in-progress" => Ok(LabStatus::InProgress),
            "complete" => Ok(LabStatus::Complete),
            other => {
                bail!("unknown lab status '{other}' (expected not-started|in-progress|complete)")
            }
        }
    }
}

impl fmt::Display for LabStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LabStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LabStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn category_tags_match_wire_format() {
        let json = serde_json::to_string(&Category::IntegrationDeployment).unwrap();
        assert_eq!(json, "\"integration-deployment\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::IntegrationDeployment);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = serde_json::from_str::<Category>("\"cooking\"").unwrap_err();
        assert!(err.to_string().contains("unknown category 'cooking'"));
        assert!("Foundations".parse::<Category>().is_err());
    }

    #[test]
    fn display_order_names_each_category_once() {
        let unique: BTreeSet<Category> = category_order().iter().copied().collect();
        assert_eq!(unique.len(), CATEGORY_ORDER.len());
        for category in CATEGORY_ORDER {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(category_order()[0], Category::Foundations);
        assert_eq!(category_order()[6], Category::Specializations);
    }

    #[test]
    fn category_presentation_metadata() {
        assert_eq!(Category::DataRetrieval.label(), "Data & Retrieval");
        assert_eq!(Category::Orchestration.accent(), "violet");
        assert_eq!(Category::CoreArchitecture.to_string(), "core-architecture");
    }

    #[test]
    fn lab_status_round_trips_and_labels() {
        let status: LabStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, LabStatus::InProgress);
        assert_eq!(status.label(), "In Progress");
        assert_eq!(
            serde_json::to_string(&LabStatus::Complete).unwrap(),
            "\"complete\""
        );
        assert!(serde_json::from_str::<LabStatus>("\"done\"").is_err());
        assert_eq!(LabStatus::default(), LabStatus::NotStarted);
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = TopicId("topic-a".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"topic-a\"");
        let lab: LabId = serde_json::from_str("\"a1\"").unwrap();
        assert_eq!(lab, LabId("a1".to_string()));
    }
}
