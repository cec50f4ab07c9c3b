use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Chore, ChoreType, Difficulty};

/// Active filter toggles. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub types: BTreeSet<ChoreType>,
    pub difficulties: BTreeSet<Difficulty>,
    pub exclude_recent: bool,
}

/// Replacement for a single field of [`FilterState`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FilterUpdate {
    Types(BTreeSet<ChoreType>),
    Difficulties(BTreeSet<Difficulty>),
    ExcludeRecent(bool),
}

impl FilterState {
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Types(types) => self.types = types,
            FilterUpdate::Difficulties(difficulties) => self.difficulties = difficulties,
            FilterUpdate::ExcludeRecent(exclude) => self.exclude_recent = exclude,
        }
    }

    fn admits(&self, chore: &Chore, recent: &[Chore]) -> bool {
        if !self.types.is_empty() && !self.types.contains(&chore.chore_type) {
            return false;
        }

        if !self.difficulties.is_empty() {
            match chore.difficulty {
                Some(difficulty) if self.difficulties.contains(&difficulty) => {}
                _ => return false,
            }
        }

        // Recency is matched by name, so two chores sharing a name count as the same pick.
        if self.exclude_recent && recent.iter().any(|picked| picked.name == chore.name) {
            return false;
        }

        true
    }
}

/// Narrows `catalog` to the chores admitted by `filters`, keeping catalog order.
pub fn apply_filters(catalog: &[Chore], filters: &FilterState, recent: &[Chore]) -> Vec<Chore> {
    catalog
        .iter()
        .filter(|chore| filters.admits(chore, recent))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Chore> {
        vec![
            Chore::new("Blast furnace", "afk").with_difficulty(Difficulty::Easy),
            Chore::new("Chop magics", "gathering").with_difficulty(Difficulty::Medium),
            Chore::new("Vorkath", "boss").with_difficulty(Difficulty::Hard),
            Chore::new("Giant mole", "boss"),
            Chore::new("Wintertodt", "minigame").with_difficulty(Difficulty::Medium),
        ]
    }

    fn names(chores: &[Chore]) -> Vec<&str> {
        chores.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn empty_filters_keep_everything() {
        let all = catalog();
        let result = apply_filters(&all, &FilterState::default(), &[]);
        assert_eq!(result, all);
    }

    #[test]
    fn empty_sets_only_apply_recent_exclusion() {
        let all = catalog();
        let filters = FilterState {
            exclude_recent: true,
            ..Default::default()
        };
        let recent = vec![Chore::new("Vorkath", "boss")];
        let result = apply_filters(&all, &filters, &recent);
        assert_eq!(result.len(), all.len() - 1);
        assert!(!names(&result).contains(&"Vorkath"));
    }

    #[test]
    fn type_filter_keeps_only_listed_types() {
        let filters = FilterState {
            types: [ChoreType::Boss, ChoreType::from("minigame")].into_iter().collect(),
            ..Default::default()
        };
        let result = apply_filters(&catalog(), &filters, &[]);
        assert_eq!(names(&result), vec!["Vorkath", "Giant mole", "Wintertodt"]);
        assert!(result.iter().all(|c| filters.types.contains(&c.chore_type)));
    }

    #[test]
    fn difficulty_filter_drops_chores_without_difficulty() {
        let filters = FilterState {
            difficulties: [Difficulty::Hard].into_iter().collect(),
            ..Default::default()
        };
        let result = apply_filters(&catalog(), &filters, &[]);
        assert_eq!(names(&result), vec!["Vorkath"]);
    }

    #[test]
    fn conditions_combine_as_and() {
        let filters = FilterState {
            types: [ChoreType::Boss, ChoreType::Gathering].into_iter().collect(),
            difficulties: [Difficulty::Medium, Difficulty::Hard].into_iter().collect(),
            exclude_recent: true,
        };
        let recent = vec![Chore::new("Vorkath", "afk")];
        let result = apply_filters(&catalog(), &filters, &recent);
        assert_eq!(names(&result), vec!["Chop magics"]);
    }

    #[test]
    fn exclude_recent_without_history_changes_nothing() {
        let mut filters = FilterState::default();
        let without = apply_filters(&catalog(), &filters, &[]);
        filters.apply(FilterUpdate::ExcludeRecent(true));
        let with = apply_filters(&catalog(), &filters, &[]);
        assert_eq!(with, without);
    }

    #[test]
    fn filter_update_deserializes_from_tagged_json() {
        let update: FilterUpdate =
            serde_json::from_str(r#"{"field":"difficulties","value":["easy","hard"]}"#).unwrap();
        let mut filters = FilterState::default();
        filters.apply(update);
        assert_eq!(
            filters.difficulties,
            [Difficulty::Easy, Difficulty::Hard].into_iter().collect()
        );
        assert!(filters.types.is_empty());
    }
}
