//! Indexed, validated view of a labs catalog.
//!
//! `Curriculum` is built once and never mutated. Loading is strict: the raw
//! JSON must pass the catalog schema and the authoring checks in `integrity`
//! before any query can run, so the roadmap queries themselves never fail.

use crate::catalog::identity::{
    CatalogKey, Category, LAB_STATUSES, LabId, LabStatus, TopicId, category_order,
};
use crate::catalog::integrity::{IntegrityIssue, check_document};
use crate::catalog::model::{CatalogDocument, Lab, Topic};
use crate::catalog::query;
use crate::schema_loader::{
    CATALOG_SCHEMA_FILE, SchemaLoadOptions, SchemaSource, embedded_schema_version,
    load_json_schema, validate_value,
};
use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Catalog content compiled into the crate.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../schema/labs.json");

// Used only if the embedded schema itself lacks a readable const.
const DEFAULT_SCHEMA_VERSION: &str = "labs_catalog_v1";

#[derive(Clone, Debug)]
/// Labs catalog plus derived lookups keyed by topic id, letter, and lab id.
pub struct Curriculum {
    key: CatalogKey,
    title: String,
    topics: Vec<Topic>,
    by_id: BTreeMap<TopicId, usize>,
    by_letter: BTreeMap<String, usize>,
    labs_by_id: BTreeMap<LabId, (usize, usize)>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Totals shown in the roadmap header and by `labs summary`.
pub struct CatalogSummary {
    pub title: String,
    pub topics: usize,
    pub labs: usize,
    pub momentum_starters: usize,
    /// Topic counts per category, in display order.
    pub categories: Vec<CategoryCount>,
    /// Lab counts per status, in `LAB_STATUSES` order.
    pub statuses: Vec<StatusCount>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub label: String,
    pub topics: usize,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: LabStatus,
    pub label: String,
    pub labs: usize,
}

impl Curriculum {
    /// The catalog embedded in the crate, parsed and validated on first use.
    pub fn builtin() -> Result<&'static Curriculum> {
        static BUILTIN: OnceLock<Result<Curriculum, String>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Curriculum::from_json_str(BUILTIN_CATALOG_JSON, "builtin catalog", None)
                    .map_err(|err| format!("{err:#}"))
            })
            .as_ref()
            .map_err(|err| anyhow!("builtin catalog is invalid: {err}"))
    }

    /// Load and validate a catalog from disk.
    ///
    /// A `labs_catalog.schema.json` beside the file replaces the embedded
    /// schema for validation.
    pub fn load(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let schema_path = sibling_schema_path(path);
        Self::from_json_str(
            &data,
            &path.display().to_string(),
            schema_path.as_deref(),
        )
        .with_context(|| format!("loading {}", path.display()))
    }

    /// Validate raw catalog JSON and build the index.
    pub fn from_json_str(data: &str, origin: &str, schema_path: Option<&Path>) -> Result<Self> {
        let value: Value =
            serde_json::from_str(data).with_context(|| format!("parsing {origin}"))?;
        validate_against_schema(&value, origin, schema_path)?;
        let doc: CatalogDocument = serde_json::from_value(value)
            .with_context(|| format!("decoding {origin}"))?;
        Self::from_document(doc)
    }

    /// Build the index from an already-parsed document, running the authoring
    /// checks but not the JSON schema. Only error-severity issues block
    /// loading; notes are logged at debug level.
    pub fn from_document(doc: CatalogDocument) -> Result<Self> {
        let (errors, notes): (Vec<_>, Vec<_>) = check_document(&doc)
            .into_iter()
            .partition(IntegrityIssue::is_error);
        for note in &notes {
            tracing::debug!(catalog = %doc.key.0, "{note}");
        }
        if !errors.is_empty() {
            let details = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            bail!("catalog {} failed integrity checks:\n{details}", doc.key.0);
        }

        let mut by_id = BTreeMap::new();
        let mut by_letter = BTreeMap::new();
        let mut labs_by_id = BTreeMap::new();
        for (topic_idx, topic) in doc.topics.iter().enumerate() {
            by_id.insert(topic.id.clone(), topic_idx);
            by_letter.insert(topic.letter.to_ascii_uppercase(), topic_idx);
            for (lab_idx, lab) in topic.labs.iter().enumerate() {
                labs_by_id.insert(lab.id.clone(), (topic_idx, lab_idx));
            }
        }

        tracing::debug!(
            catalog = %doc.key.0,
            topics = doc.topics.len(),
            labs = labs_by_id.len(),
            "loaded labs catalog"
        );

        Ok(Self {
            key: doc.key,
            title: doc.title,
            topics: doc.topics,
            by_id,
            by_letter,
            labs_by_id,
        })
    }

    /// The schema_version declared by the loaded document.
    pub fn key(&self) -> &CatalogKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// All topics in catalog order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Topics filed under `category`, in catalog order.
    pub fn topics_by_category(&self, category: Category) -> Vec<&Topic> {
        query::topics_by_category(&self.topics, category)
    }

    /// String-keyed variant of `topics_by_category`.
    ///
    /// Unknown tags produce an empty list rather than an error.
    pub fn topics_by_category_tag(&self, tag: &str) -> Vec<&Topic> {
        match tag.parse::<Category>() {
            Ok(category) => self.topics_by_category(category),
            Err(_) => Vec::new(),
        }
    }

    /// Momentum starters in onboarding order.
    pub fn momentum_starters(&self) -> Vec<&Topic> {
        query::momentum_starters(&self.topics)
    }

    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.by_id.get(id).map(|idx| &self.topics[*idx])
    }

    /// Case-insensitive lookup by topic letter.
    pub fn topic_by_letter(&self, letter: &str) -> Option<&Topic> {
        self.by_letter
            .get(&letter.trim().to_ascii_uppercase())
            .map(|idx| &self.topics[*idx])
    }

    /// Resolve a topic by id first, then by letter.
    pub fn find_topic(&self, needle: &str) -> Option<&Topic> {
        self.topic(&TopicId(needle.to_string()))
            .or_else(|| self.topic_by_letter(needle))
    }

    /// Resolve a lab by id along with the topic that owns it.
    pub fn lab(&self, id: &LabId) -> Option<(&Topic, &Lab)> {
        let (topic_idx, lab_idx) = self.labs_by_id.get(id)?;
        let topic = &self.topics[*topic_idx];
        Some((topic, &topic.labs[*lab_idx]))
    }

    /// Best-effort lookup of a prerequisite label such as `"C2"`.
    ///
    /// Labels are free text; `None` means nothing matched, which callers must
    /// tolerate.
    pub fn resolve_prereq(&self, label: &str) -> Option<(&Topic, &Lab)> {
        let label = label.trim();
        let mut chars = label.chars();
        let letter = chars.next()?;
        let topic = self.topic_by_letter(&letter.to_string())?;
        let ordinal = chars.as_str();
        if ordinal.is_empty() {
            return None;
        }
        topic
            .labs
            .iter()
            .find(|lab| lab.ordinal() == ordinal)
            .map(|lab| (topic, lab))
    }

    pub fn lab_count(&self) -> usize {
        self.labs_by_id.len()
    }

    pub fn summary(&self) -> CatalogSummary {
        let categories = category_order()
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                label: category.label().to_string(),
                topics: self.topics_by_category(*category).len(),
            })
            .collect();

        let statuses = LAB_STATUSES
            .iter()
            .map(|status| StatusCount {
                status: *status,
                label: status.label().to_string(),
                labs: self.labs_with_status(*status).len(),
            })
            .collect();

        CatalogSummary {
            title: self.title.clone(),
            topics: self.topics.len(),
            labs: self.lab_count(),
            momentum_starters: self.momentum_starters().len(),
            categories,
            statuses,
        }
    }

    /// Labs carrying `status`, paired with their topics, in catalog order.
    pub fn labs_with_status(&self, status: LabStatus) -> Vec<(&Topic, &Lab)> {
        self.topics
            .iter()
            .flat_map(|topic| topic.labs.iter().map(move |lab| (topic, lab)))
            .filter(|(_, lab)| lab.status == status)
            .collect()
    }
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([
        embedded_schema_version().unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
    ])
}

fn sibling_schema_path(catalog_path: &Path) -> Option<PathBuf> {
    let candidate = catalog_path.parent()?.join(CATALOG_SCHEMA_FILE);
    candidate.is_file().then_some(candidate)
}

fn validate_against_schema(value: &Value, origin: &str, schema_path: Option<&Path>) -> Result<()> {
    let allowed = allowed_schema_versions();
    let declared = value
        .get("schema_version")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if !allowed.contains(declared) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            declared,
            allowed
        );
    }

    let source = match schema_path {
        Some(path) => SchemaSource::File(path),
        None => SchemaSource::Embedded,
    };
    let schema = load_json_schema(
        source,
        SchemaLoadOptions {
            allowed_versions: Some(&allowed),
            ..Default::default()
        },
    )?;
    tracing::debug!(
        schema_version = %schema.schema_version,
        external = schema_path.is_some(),
        "validating {origin}"
    );
    validate_value(&schema.compiled, value, origin)
}
