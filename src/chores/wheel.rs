use serde::Serialize;

use crate::spin::geometry::segment_span;

use super::model::{Chore, ChoreType};

/// One slice of the wheel as the frontend draws it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WheelSegment {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
    pub label: String,
    #[serde(rename = "type")]
    pub chore_type: ChoreType,
}

pub fn wheel_segments(chores: &[Chore]) -> Vec<WheelSegment> {
    let total = chores.len();
    chores
        .iter()
        .enumerate()
        .map(|(index, chore)| {
            let (start_deg, end_deg) = segment_span(index, total);
            WheelSegment {
                index,
                start_deg,
                end_deg,
                label: segment_label(&chore.name, total),
                chore_type: chore.chore_type.clone(),
            }
        })
        .collect()
}

/// Shortens long names so they fit narrow slices.
pub fn segment_label(name: &str, total: usize) -> String {
    let len = name.chars().count();
    if len > 15 && total > 8 {
        truncate(name, 8)
    } else if len > 20 {
        truncate(name, 16)
    } else {
        name.to_string()
    }
}

fn truncate(name: &str, keep: usize) -> String {
    let mut label: String = name.chars().take(keep).collect();
    label.push_str("...");
    label
}
