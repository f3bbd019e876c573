//! Content-authoring checks for a catalog document.
//!
//! These catch defects the schema cannot express (uniqueness across topics and
//! labs, display order coverage). Errors make the lookup indices ambiguous and
//! block loading; notes are oddities the queries handle fine and are only
//! reported by `labs check`. Prerequisite labels are free text and are not
//! checked here.

use crate::catalog::identity::{CATEGORY_ORDER, Category};
use crate::catalog::model::CatalogDocument;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const DIFFICULTY_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
pub const JOB_DEMAND_RANGE: std::ops::RangeInclusive<u8> = 0..=10;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Error,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// A single authoring defect found in a catalog.
pub struct IntegrityIssue {
    pub severity: Severity,
    /// Topic or lab id the issue is attached to, when there is one.
    pub subject: Option<String>,
    pub message: String,
}

impl IntegrityIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.severity == Severity::Note {
            f.write_str("note: ")?;
        }
        match &self.subject {
            Some(subject) => write!(f, "{subject}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

fn issue(subject: Option<&str>, message: String) -> IntegrityIssue {
    IntegrityIssue {
        severity: Severity::Error,
        subject: subject.map(str::to_string),
        message,
    }
}

fn note(subject: Option<&str>, message: String) -> IntegrityIssue {
    IntegrityIssue {
        severity: Severity::Note,
        subject: subject.map(str::to_string),
        message,
    }
}

/// Run every authoring check, returning errors and notes in catalog order.
pub fn check_document(doc: &CatalogDocument) -> Vec<IntegrityIssue> {
    let mut issues = check_display_order(&CATEGORY_ORDER);

    if doc.title.trim().is_empty() {
        issues.push(issue(None, "catalog title must not be empty".to_string()));
    }
    if doc.topics.is_empty() {
        issues.push(note(None, "catalog contains no topics".to_string()));
    }

    let mut topic_ids: BTreeSet<&str> = BTreeSet::new();
    let mut letters: BTreeMap<String, &str> = BTreeMap::new();
    let mut lab_ids: BTreeMap<&str, &str> = BTreeMap::new();

    for topic in &doc.topics {
        let id = topic.id.0.as_str();
        let subject = Some(id);
        if id.trim().is_empty() {
            issues.push(issue(None, "encountered topic with no id".to_string()));
        } else if !topic_ids.insert(id) {
            issues.push(issue(subject, "duplicate topic id".to_string()));
        }

        let mut chars = topic.letter.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_uppercase() => {
                if let Some(previous) = letters.insert(letter.to_string(), id) {
                    issues.push(issue(
                        subject,
                        format!("letter '{}' already used by {previous}", topic.letter),
                    ));
                }
            }
            _ => issues.push(issue(
                subject,
                format!(
                    "letter must be a single uppercase ASCII letter, got '{}'",
                    topic.letter
                ),
            )),
        }

        if topic.name.trim().is_empty() {
            issues.push(issue(subject, "name must not be empty".to_string()));
        }
        if !DIFFICULTY_RANGE.contains(&topic.difficulty) {
            issues.push(issue(
                subject,
                format!("difficulty {} outside 1-5", topic.difficulty),
            ));
        }
        if !JOB_DEMAND_RANGE.contains(&topic.job_demand) {
            issues.push(issue(
                subject,
                format!("job_demand {} outside 0-10", topic.job_demand),
            ));
        }
        if !topic.is_momentum_starter && topic.momentum_order.is_some() {
            issues.push(note(
                subject,
                "momentum_order set on a topic that is not a momentum starter; it is ignored"
                    .to_string(),
            ));
        }

        for lab in &topic.labs {
            let lab_id = lab.id.0.as_str();
            if lab_id.trim().is_empty() {
                issues.push(issue(subject, "encountered lab with no id".to_string()));
                continue;
            }
            if let Some(owner) = lab_ids.insert(lab_id, id) {
                issues.push(issue(
                    Some(lab_id),
                    format!("duplicate lab id (already defined in {owner})"),
                ));
            }
            if lab.title.trim().is_empty() {
                issues.push(issue(Some(lab_id), "title must not be empty".to_string()));
            }
        }
    }

    issues
}

/// Check that a display order names every category exactly once.
pub fn check_display_order(order: &[Category]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();
    for category in order {
        if !seen.insert(*category) {
            issues.push(issue(
                None,
                format!("category {category} listed twice in display order"),
            ));
        }
    }
    for category in CATEGORY_ORDER {
        if !seen.contains(&category) {
            issues.push(issue(
                None,
                format!("category {category} missing from display order"),
            ));
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(topics: serde_json::Value) -> CatalogDocument {
        serde_json::from_value(json!({
            "schema_version": "labs_catalog_v1",
            "title": "fixture",
            "topics": topics
        }))
        .unwrap()
    }

    fn topic(id: &str, letter: &str, labs: &[&str]) -> serde_json::Value {
        json!({
            "id": id,
            "letter": letter,
            "name": "n",
            "category": "frameworks",
            "difficulty": 2,
            "job_demand": 4,
            "time_to_mid_level": "1 week",
            "description": "d",
            "is_momentum_starter": false,
            "labs": labs.iter().map(|lab| json!({
                "id": lab, "title": "t", "duration": "1 hour", "prereqs": ["Z9"], "summary": "s"
            })).collect::<Vec<_>>()
        })
    }

    #[test]
    fn clean_document_has_no_issues() {
        let doc = doc(json!([topic("topic-a", "A", &["a1"]), topic("topic-b", "B", &["b1"])]));
        assert!(check_document(&doc).is_empty());
    }

    #[test]
    fn duplicates_are_reported() {
        let doc = doc(json!([
            topic("topic-a", "A", &["a1", "a2"]),
            topic("topic-a", "A", &["a2"])
        ]));
        let messages: Vec<String> = check_document(&doc).iter().map(|i| i.to_string()).collect();
        assert!(messages.contains(&"topic-a: duplicate topic id".to_string()));
        assert!(messages.iter().any(|m| m.contains("letter 'A' already used by topic-a")));
        assert!(messages.contains(&"a2: duplicate lab id (already defined in topic-a)".to_string()));
    }

    #[test]
    fn lowercase_letters_are_rejected_like_the_schema_does() {
        let issues = check_document(&doc(json!([topic("topic-a", "a", &[])])));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("single uppercase ASCII letter, got 'a'"));
    }

    #[test]
    fn out_of_range_gauges_and_bad_letters() {
        let mut bad = topic("topic-x", "XY", &[]);
        bad["difficulty"] = json!(0);
        bad["job_demand"] = json!(11);
        let issues = check_document(&doc(json!([bad])));
        assert_eq!(issues.len(), 3, "{issues:?}");
        assert!(issues.iter().all(IntegrityIssue::is_error));
    }

    #[test]
    fn stray_momentum_order_is_only_a_note() {
        let mut stray = topic("topic-a", "A", &["a1"]);
        stray["momentum_order"] = json!(3);
        let issues = check_document(&doc(json!([stray])));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Note);
        assert!(issues[0].to_string().starts_with("note: topic-a: momentum_order set"));
    }

    #[test]
    fn empty_catalog_is_only_a_note() {
        let issues = check_document(&doc(json!([])));
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert_eq!(issues[0].to_string(), "note: catalog contains no topics");
    }

    #[test]
    fn display_order_gaps_and_repeats() {
        let issues = check_display_order(&[Category::Foundations, Category::Foundations]);
        assert!(issues[0].message.contains("listed twice"));
        assert_eq!(issues.len(), 1 + 6);
        assert!(check_display_order(&CATEGORY_ORDER).is_empty());
    }
}
