//! Read-only roadmap queries over an ordered topic list.
//!
//! Every function borrows from the slice it is given and never reorders it, so
//! repeated calls return identical views.

use crate::catalog::identity::Category;
use crate::catalog::model::Topic;

/// Topics filed under `category`, in catalog order.
pub fn topics_by_category(topics: &[Topic], category: Category) -> Vec<&Topic> {
    topics
        .iter()
        .filter(|topic| topic.category == category)
        .collect()
}

/// Momentum starters ordered by `momentum_order`, absent treated as 0.
///
/// Topics with equal rank keep their catalog order (`sort_by_key` is stable).
pub fn momentum_starters(topics: &[Topic]) -> Vec<&Topic> {
    let mut starters: Vec<&Topic> = topics
        .iter()
        .filter(|topic| topic.is_momentum_starter)
        .collect();
    starters.sort_by_key(|topic| topic.momentum_rank());
    starters
}
