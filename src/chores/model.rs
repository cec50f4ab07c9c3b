//! Chore data models shared by the store, the filters and the frontend.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::ChoreError;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_CUSTOM_TYPE_LEN: usize = 20;
pub const MAX_NOTES_LEN: usize = 200;

/// Category tag of a chore.
///
/// The three baseline tags get their own variants; anything a user types in
/// lands in `Other`. Equality, ordering and hashing all go through the tag
/// text, so `Other("boss")` and `Boss` are the same tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChoreType {
    Afk,
    Gathering,
    Boss,
    Other(String),
}

impl ChoreType {
    pub fn as_str(&self) -> &str {
        match self {
            ChoreType::Afk => "afk",
            ChoreType::Gathering => "gathering",
            ChoreType::Boss => "boss",
            ChoreType::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for ChoreType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "afk" => ChoreType::Afk,
            "gathering" => ChoreType::Gathering,
            "boss" => ChoreType::Boss,
            _ => ChoreType::Other(value),
        }
    }
}

impl From<&str> for ChoreType {
    fn from(value: &str) -> Self {
        ChoreType::from(value.to_string())
    }
}

impl From<ChoreType> for String {
    fn from(value: ChoreType) -> Self {
        match value {
            ChoreType::Other(tag) => tag,
            baseline => baseline.as_str().to_string(),
        }
    }
}

impl fmt::Display for ChoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for ChoreType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ChoreType {}

impl Hash for ChoreType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for ChoreType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChoreType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Where a catalog entry came from. Only custom entries can be removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChoreOrigin {
    #[default]
    Builtin,
    Custom,
}

impl ChoreOrigin {
    pub fn is_builtin(&self) -> bool {
        matches!(self, ChoreOrigin::Builtin)
    }
}

/// Quantity range for chores like "kill 100-1000 of X".
///
/// `value` is only ever set on the copy handed out by a pick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountRange {
    pub min: f64,
    pub max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl CountRange {
    /// Returns `None` unless both bounds are finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> Option<Self> {
        if min.is_finite() && max.is_finite() && min <= max {
            Some(Self {
                min,
                max,
                value: None,
            })
        } else {
            None
        }
    }

    /// Integer bounds a resolved value is drawn from, or `None` when no
    /// integer lies inside the range.
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        let low = self.min.ceil();
        let high = self.max.floor();
        if low > high || !low.is_finite() || !high.is_finite() {
            return None;
        }
        Some((low as i64, high as i64))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub name: String,
    #[serde(rename = "type")]
    pub chore_type: ChoreType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<CountRange>,
    #[serde(default, skip_serializing_if = "ChoreOrigin::is_builtin")]
    pub origin: ChoreOrigin,
}

impl Chore {
    pub fn new(name: impl Into<String>, chore_type: impl Into<ChoreType>) -> Self {
        Self {
            name: name.into(),
            chore_type: chore_type.into(),
            difficulty: None,
            notes: None,
            count: None,
            origin: ChoreOrigin::Builtin,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_count(mut self, count: CountRange) -> Self {
        self.count = Some(count);
        self
    }

    pub fn is_custom(&self) -> bool {
        self.origin == ChoreOrigin::Custom
    }
}

/// Input from the add-chore form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChoreDraft {
    pub name: String,
    /// Type picked from the list of known tags.
    pub chore_type: String,
    /// Free-text type; wins over `chore_type` when not blank.
    #[serde(default)]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub count_min: Option<f64>,
    #[serde(default)]
    pub count_max: Option<f64>,
}

impl ChoreDraft {
    /// Validates the form and builds a custom chore from it.
    ///
    /// An unusable count range is dropped instead of rejecting the chore.
    pub fn into_chore(self) -> Result<Chore, ChoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ChoreError::EmptyName);
        }
        check_len("name", name, MAX_NAME_LEN)?;

        let custom_type = self
            .custom_type
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty());
        let chore_type = match custom_type {
            Some(tag) => {
                check_len("type", tag, MAX_CUSTOM_TYPE_LEN)?;
                ChoreType::from(tag)
            }
            None => {
                let picked = self.chore_type.trim();
                if picked.is_empty() {
                    ChoreType::Afk
                } else {
                    ChoreType::from(picked)
                }
            }
        };

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty());
        if let Some(notes) = notes {
            check_len("notes", notes, MAX_NOTES_LEN)?;
        }

        let count = match (self.count_min, self.count_max) {
            (Some(min), Some(max)) => {
                let range = CountRange::new(min, max);
                if range.is_none() {
                    log::warn!("Ignoring invalid count range {min}..{max} for '{name}'");
                }
                range
            }
            _ => None,
        };

        Ok(Chore {
            name: name.to_string(),
            chore_type,
            difficulty: self.difficulty,
            notes: notes.map(str::to_string),
            count,
            origin: ChoreOrigin::Custom,
        })
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ChoreError> {
    if value.chars().count() > max {
        return Err(ChoreError::FieldTooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chore_type_round_trips_as_plain_string() {
        let tags: Vec<ChoreType> =
            serde_json::from_str(r#"["afk","boss","slayer"]"#).unwrap();
        assert_eq!(tags[0], ChoreType::Afk);
        assert_eq!(tags[1], ChoreType::Boss);
        assert_eq!(tags[2], ChoreType::Other("slayer".into()));
        assert_eq!(
            serde_json::to_string(&tags).unwrap(),
            r#"["afk","boss","slayer"]"#
        );
    }

    #[test]
    fn other_with_baseline_text_equals_baseline() {
        assert_eq!(ChoreType::Other("gathering".into()), ChoreType::Gathering);
        assert_ne!(ChoreType::Other("minigame".into()), ChoreType::Boss);
    }

    #[test]
    fn builtin_origin_is_not_serialized() {
        let chore = Chore::new("Chop yews", "gathering").with_difficulty(Difficulty::Easy);
        let json = serde_json::to_value(&chore).unwrap();
        assert!(json.get("origin").is_none());
        assert_eq!(json["type"], "gathering");
        assert_eq!(json["difficulty"], "easy");
    }

    #[test]
    fn count_range_rejects_inverted_bounds() {
        assert!(CountRange::new(10.0, 5.0).is_none());
        assert!(CountRange::new(f64::NAN, 5.0).is_none());
        assert_eq!(CountRange::new(1.5, 3.2).unwrap().integer_bounds(), Some((2, 3)));
        assert_eq!(CountRange::new(1.2, 1.8).unwrap().integer_bounds(), None);
    }

    #[test]
    fn draft_rejects_blank_name() {
        let draft = ChoreDraft {
            name: "   ".into(),
            chore_type: "afk".into(),
            ..Default::default()
        };
        assert!(matches!(draft.into_chore(), Err(ChoreError::EmptyName)));
    }

    #[test]
    fn draft_prefers_custom_type_and_trims() {
        let draft = ChoreDraft {
            name: "  Barbarian Assault  ".into(),
            chore_type: "afk".into(),
            custom_type: Some(" minigame ".into()),
            difficulty: Some(Difficulty::Medium),
            notes: Some("   ".into()),
            count_min: Some(1.0),
            count_max: Some(5.0),
        };
        let chore = draft.into_chore().unwrap();
        assert_eq!(chore.name, "Barbarian Assault");
        assert_eq!(chore.chore_type.as_str(), "minigame");
        assert_eq!(chore.notes, None);
        assert_eq!(chore.origin, ChoreOrigin::Custom);
        assert_eq!(chore.count, CountRange::new(1.0, 5.0));
    }

    #[test]
    fn draft_drops_inverted_count_range() {
        let draft = ChoreDraft {
            name: "Mine iron".into(),
            chore_type: "gathering".into(),
            count_min: Some(1000.0),
            count_max: Some(100.0),
            ..Default::default()
        };
        assert_eq!(draft.into_chore().unwrap().count, None);
    }

    #[test]
    fn draft_enforces_name_length() {
        let draft = ChoreDraft {
            name: "x".repeat(MAX_NAME_LEN + 1),
            chore_type: "afk".into(),
            ..Default::default()
        };
        assert!(matches!(
            draft.into_chore(),
            Err(ChoreError::FieldTooLong { field: "name", .. })
        ));
    }
}
