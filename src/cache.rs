//! Input-keyed memoization of timeline models
//!
//! The layout pipeline is pure, so a model can be reused whenever every input
//! hashes the same. The cache keeps a single entry, like a render-time memo.

use crate::config::EngineConfig;
use crate::timeline::{ProjectRecord, TimelineFilters, TimelineModel, compute_timeline_model_at};
use chrono::NaiveDate;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

/// Hash of every input that influences a model
pub fn fingerprint(
    projects: &[ProjectRecord],
    filters: &TimelineFilters,
    today: NaiveDate,
    config: &EngineConfig,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    projects.hash(&mut hasher);
    filters.hash(&mut hasher);
    today.hash(&mut hasher);
    config.hash(&mut hasher);
    hasher.finish()
}

/// Single-entry model cache
#[derive(Debug, Default)]
pub struct ModelCache {
    entry: Option<(u64, Arc<TimelineModel>)>,
    hits: u64,
    misses: u64,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached model for these inputs, computing it on a miss
    pub fn get_or_compute(
        &mut self,
        projects: &[ProjectRecord],
        filters: &TimelineFilters,
        today: NaiveDate,
        config: &EngineConfig,
    ) -> Arc<TimelineModel> {
        let key = fingerprint(projects, filters, today, config);

        if let Some((cached_key, model)) = &self.entry
            && *cached_key == key
        {
            self.hits += 1;
            debug!(key, "timeline model cache hit");
            return Arc::clone(model);
        }

        self.misses += 1;
        debug!(key, rows = projects.len(), "timeline model cache miss");
        let model = Arc::new(compute_timeline_model_at(projects, filters, today, config));
        self.entry = Some((key, Arc::clone(&model)));
        model
    }

    /// Drop the cached model
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_same_inputs_share_model() {
        let record =
            ProjectRecord::new("a", "Alpha").with_dates(Some("2024-05-01"), Some("2024-07-01"));
        let projects = vec![record];
        let filters = TimelineFilters::default();
        let config = EngineConfig::default();
        let mut cache = ModelCache::new();

        let first = cache.get_or_compute(&projects, &filters, today(), &config);
        let second = cache.get_or_compute(&projects, &filters, today(), &config);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_changed_filter_recomputes() {
        let projects = vec![ProjectRecord::new("a", "Alpha")];
        let config = EngineConfig::default();
        let mut cache = ModelCache::new();

        let first = cache.get_or_compute(&projects, &TimelineFilters::default(), today(), &config);
        let second = cache.get_or_compute(
            &projects,
            &TimelineFilters::default().with_search("zzz"),
            today(),
            &config,
        );
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.rows.len(), 0);
        assert_eq!(cache.misses(), 2);

        cache.invalidate();
        cache.get_or_compute(&projects, &TimelineFilters::default(), today(), &config);
        assert_eq!(cache.misses(), 3);
    }
}
