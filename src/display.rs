//! Plain-text rendering of the roadmap.
//!
//! Mirrors the AI Labs page layout: a header badge, the momentum starters, then
//! one section per non-empty category in display order. Everything here is a
//! pure function of the curriculum.

use crate::catalog::{Curriculum, Lab, Topic, category_order};
use std::fmt::Write;

const DOTS: usize = 5;
const FILLED_DOT: char = '●';
const EMPTY_DOT: char = '○';

/// Difficulty as five dots, `level` of them filled.
pub fn difficulty_dots(level: u8) -> String {
    (0..DOTS)
        .map(|i| if i < level as usize { FILLED_DOT } else { EMPTY_DOT })
        .collect()
}

/// Width of the job-demand bar as a percentage.
pub fn demand_percent(level: u8) -> u8 {
    level.saturating_mul(10).min(100)
}

/// `"{done}/{total} labs"` for a topic card.
pub fn topic_progress(topic: &Topic) -> String {
    format!("{}/{} labs", topic.completed_labs(), topic.lab_count())
}

/// Header badge, e.g. `21 Topics / 63 Labs`.
pub fn catalog_badge(curriculum: &Curriculum) -> String {
    format!(
        "{} Topics / {} Labs",
        curriculum.topics().len(),
        curriculum.lab_count()
    )
}

/// One lab row: `Lab A2: Title [Not Started] (4-6 hours; after A1)`.
pub fn lab_line(topic: &Topic, lab: &Lab) -> String {
    let mut line = format!(
        "Lab {}: {} [{}] ({}",
        topic.lab_label(lab),
        lab.title,
        lab.status.label(),
        lab.duration
    );
    if lab.has_prereqs() {
        let _ = write!(line, "; after {}", lab.prereqs.join(", "));
    }
    line.push(')');
    line
}

/// Topic card header plus meta row; labs are listed when `expanded`.
pub fn render_topic(topic: &Topic, expanded: bool) -> String {
    let mut out = String::new();
    let starter = if topic.is_momentum_starter {
        "  [momentum starter]"
    } else {
        ""
    };
    let _ = writeln!(out, "[{}] {}{starter}", topic.letter, topic.name);
    let _ = writeln!(out, "    {}", topic.description);
    let _ = writeln!(
        out,
        "    difficulty {}  demand {}%  {} to proficiency  {}",
        difficulty_dots(topic.difficulty),
        demand_percent(topic.job_demand),
        topic.time_to_mid_level,
        topic_progress(topic)
    );
    if expanded {
        for lab in &topic.labs {
            let _ = writeln!(out, "    - {}", lab_line(topic, lab));
        }
    }
    out
}

/// The momentum starter block.
pub fn render_starters(curriculum: &Curriculum) -> String {
    let mut out = String::from("Momentum Starters\n\n");
    for topic in curriculum.momentum_starters() {
        out.push_str(&render_topic(topic, false));
    }
    out
}

/// Category sections in display order; empty categories are skipped.
pub fn render_categories(curriculum: &Curriculum, expanded: bool) -> String {
    let mut out = String::new();
    for category in category_order() {
        let topics = curriculum.topics_by_category(*category);
        if topics.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}\n", category.label());
        for topic in topics {
            out.push_str(&render_topic(topic, expanded));
        }
        out.push('\n');
    }
    out
}

/// Full roadmap page.
pub fn render_roadmap(curriculum: &Curriculum, expanded: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  ({})\n", curriculum.title(), catalog_badge(curriculum));
    out.push_str(&render_starters(curriculum));
    out.push_str("\nFull Roadmap\n\n");
    out.push_str(&render_categories(curriculum, expanded));
    out
}
