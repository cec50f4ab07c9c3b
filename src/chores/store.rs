use anyhow::Context;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;

use crate::storage::KeyValueStore;

use super::{
    dataset,
    filters::{apply_filters, FilterState, FilterUpdate},
    model::{Chore, ChoreDraft, ChoreOrigin, ChoreType, CountRange, Difficulty},
    ChoreError,
};

pub const RECENT_CHORES_KEY: &str = "nutville-recent-chores";
pub const CUSTOM_CHORES_KEY: &str = "nutville-custom-chores";

/// Number of picks kept in the recent history.
pub const RECENT_LIMIT: usize = 5;

/// One random selection: the picked copy plus the segment it came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub chore: Chore,
    pub index: usize,
    pub segment_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoreSnapshot {
    pub chores: Vec<Chore>,
    pub total_chores: usize,
    pub recent_chores: Vec<Chore>,
    pub custom_chores: Vec<Chore>,
    pub filters: FilterState,
    pub available_types: Vec<ChoreType>,
    pub available_difficulties: Vec<Difficulty>,
    pub persistence_error: Option<String>,
}

/// Catalog, filters and pick history, persisted through a [`KeyValueStore`].
pub struct ChoreStore<K, R = StdRng> {
    kv: K,
    rng: R,
    catalog: Vec<Chore>,
    custom: Vec<Chore>,
    recent: Vec<Chore>,
    filters: FilterState,
    persistence_error: Option<String>,
}

impl<K: KeyValueStore> ChoreStore<K, StdRng> {
    /// Loads the bundled chores plus whatever the user saved earlier.
    ///
    /// Only a broken bundled dataset fails; unreadable saved data is treated as empty.
    pub fn load(kv: K) -> Result<Self, ChoreError> {
        let builtin = dataset::builtin_chores()?;
        Ok(Self::with_builtin(kv, builtin, StdRng::from_entropy()))
    }
}

impl<K: KeyValueStore, R: Rng> ChoreStore<K, R> {
    pub fn with_builtin(kv: K, builtin: Vec<Chore>, rng: R) -> Self {
        let mut store = Self {
            kv,
            rng,
            catalog: builtin,
            custom: Vec::new(),
            recent: Vec::new(),
            filters: FilterState::default(),
            persistence_error: None,
        };

        let mut custom = store.read_list(CUSTOM_CHORES_KEY);
        for chore in &mut custom {
            chore.origin = ChoreOrigin::Custom;
        }
        let mut recent = store.read_list(RECENT_CHORES_KEY);
        recent.truncate(RECENT_LIMIT);

        info!(
            "Loaded {} built-in chores, {} custom chores, {} recent picks",
            store.catalog.len(),
            custom.len(),
            recent.len()
        );

        store.catalog.extend(custom.iter().cloned());
        store.custom = custom;
        store.recent = recent;
        store
    }

    pub fn catalog(&self) -> &[Chore] {
        &self.catalog
    }

    pub fn custom_chores(&self) -> &[Chore] {
        &self.custom
    }

    pub fn recent_chores(&self) -> &[Chore] {
        &self.recent
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Last persistence failure, if any write or read has failed since the last success.
    pub fn persistence_error(&self) -> Option<&str> {
        self.persistence_error.as_deref()
    }

    pub fn filtered(&self) -> Vec<Chore> {
        apply_filters(&self.catalog, &self.filters, &self.recent)
    }

    pub fn set_filter(&mut self, update: FilterUpdate) {
        debug!("Filter update: {:?}", update);
        self.filters.apply(update);
    }

    /// Distinct tags in catalog order.
    pub fn available_types(&self) -> Vec<ChoreType> {
        let mut seen = Vec::new();
        for chore in &self.catalog {
            if !seen.contains(&chore.chore_type) {
                seen.push(chore.chore_type.clone());
            }
        }
        seen
    }

    /// Distinct difficulties in catalog order, skipping chores without one.
    pub fn available_difficulties(&self) -> Vec<Difficulty> {
        let mut seen = Vec::new();
        for difficulty in self.catalog.iter().filter_map(|chore| chore.difficulty) {
            if !seen.contains(&difficulty) {
                seen.push(difficulty);
            }
        }
        seen
    }

    pub fn snapshot(&self) -> ChoreSnapshot {
        ChoreSnapshot {
            chores: self.filtered(),
            total_chores: self.catalog.len(),
            recent_chores: self.recent.clone(),
            custom_chores: self.custom.clone(),
            filters: self.filters.clone(),
            available_types: self.available_types(),
            available_difficulties: self.available_difficulties(),
            persistence_error: self.persistence_error.clone(),
        }
    }

    /// Picks one chore uniformly from `filtered` and records it in the history.
    ///
    /// The returned chore is a copy; when it has a count range its `value` is
    /// drawn uniformly from the integers inside the range.
    pub fn pick_random(&mut self, filtered: &[Chore]) -> Option<Pick> {
        if filtered.is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..filtered.len());
        let mut chore = filtered[index].clone();
        if let Some(count) = chore.count.as_mut() {
            count.value = match count.integer_bounds() {
                Some((low, high)) => Some(self.rng.gen_range(low..=high)),
                None => {
                    warn!(
                        "Count range {}..{} of '{}' holds no integer",
                        count.min, count.max, chore.name
                    );
                    None
                }
            };
        }

        debug!(
            "Picked '{}' (segment {} of {})",
            chore.name,
            index,
            filtered.len()
        );

        self.recent.insert(0, chore.clone());
        self.recent.truncate(RECENT_LIMIT);
        self.persist_recent();

        Some(Pick {
            chore,
            index,
            segment_count: filtered.len(),
        })
    }

    /// Picks from the current filtered set.
    pub fn spin(&mut self) -> Option<Pick> {
        let filtered = self.filtered();
        self.pick_random(&filtered)
    }

    pub fn add_custom_chore(&mut self, mut chore: Chore) -> Result<(), ChoreError> {
        let trimmed = chore.name.trim();
        if trimmed.is_empty() {
            return Err(ChoreError::EmptyName);
        }
        chore.name = trimmed.to_string();
        chore.origin = ChoreOrigin::Custom;
        if let Some(count) = chore.count.take() {
            chore.count = CountRange::new(count.min, count.max);
            if chore.count.is_none() {
                warn!(
                    "Ignoring invalid count range {}..{} for '{}'",
                    count.min, count.max, chore.name
                );
            }
        }

        info!("Adding custom chore '{}'", chore.name);
        self.custom.push(chore.clone());
        self.catalog.push(chore);
        self.persist_custom();
        Ok(())
    }

    pub fn add_custom_draft(&mut self, draft: ChoreDraft) -> Result<Chore, ChoreError> {
        let chore = draft.into_chore()?;
        self.add_custom_chore(chore.clone())?;
        Ok(chore)
    }

    /// Removes every custom chore named `name`. Built-in chores are never removed,
    /// even when they share the name. Returns the number of catalog entries removed.
    pub fn remove_custom_chore(&mut self, name: &str) -> usize {
        let before = self.catalog.len();
        self.catalog
            .retain(|chore| !(chore.is_custom() && chore.name == name));
        self.custom.retain(|chore| chore.name != name);
        let removed = before - self.catalog.len();

        if removed > 0 {
            info!("Removed {removed} custom chore(s) named '{name}'");
            self.persist_custom();
        }
        removed
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
        let result = self
            .kv
            .remove(RECENT_CHORES_KEY)
            .context("failed to clear recent chores");
        self.record_write(result);
    }

    fn read_list(&mut self, key: &str) -> Vec<Chore> {
        let raw = match self.kv.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                self.note_failure(err.context(format!("failed to read {key}")));
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                self.note_failure(
                    anyhow::Error::new(err).context(format!("stored {key} is not a chore list")),
                );
                Vec::new()
            }
        }
    }

    fn persist_custom(&mut self) {
        let result = write_list(&self.kv, CUSTOM_CHORES_KEY, &self.custom);
        self.record_write(result);
    }

    fn persist_recent(&mut self) {
        let result = write_list(&self.kv, RECENT_CHORES_KEY, &self.recent);
        self.record_write(result);
    }

    fn record_write(&mut self, result: anyhow::Result<()>) {
        match result {
            Ok(()) => self.persistence_error = None,
            Err(err) => self.note_failure(err),
        }
    }

    fn note_failure(&mut self, err: anyhow::Error) {
        warn!("Chore persistence failed: {err:#}");
        self.persistence_error = Some(format!("{err:#}"));
    }
}

fn write_list<K: KeyValueStore>(kv: &K, key: &str, chores: &[Chore]) -> anyhow::Result<()> {
    let serialized =
        serde_json::to_string(chores).with_context(|| format!("failed to serialize {key}"))?;
    kv.set(key, &serialized)
        .with_context(|| format!("failed to write {key}"))
}
