// src/analyze/priority.rs
use crate::record::{Priority, TenderRecord, Tiers};

/// High: primary region + at least two keywords. Everything else that matched is Medium.
pub fn tier_for(record: &TenderRecord, primary_region: &str) -> Priority {
    if record.region.as_deref() == Some(primary_region) && record.keywords.len() >= 2 {
        Priority::High
    } else {
        Priority::Medium
    }
}

/// Split matched records into tiers, keeping discovery order within each and
/// overwriting `priority` to the assigned tier.
pub fn prioritize(records: Vec<TenderRecord>, primary_region: &str) -> Tiers {
    let mut tiers = Tiers::default();
    for mut rec in records {
        // unmatched records never reach here via the matcher; drop strays
        if rec.keywords.is_empty() {
            continue;
        }
        rec.priority = tier_for(&rec, primary_region);
        match rec.priority {
            Priority::High => tiers.high.push(rec),
            Priority::Medium => tiers.medium.push(rec),
        }
    }
    tiers
}
