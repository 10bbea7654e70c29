//! Interactive explorer state: records, filters and page in one place.
//!
//! Derived values are recomputed only when their inputs change. The
//! filtered index list is keyed on `(generation, filters)` and the facet
//! set on `generation` alone, so changing a filter never re-extracts facets.

use std::sync::Arc;

use crate::facets::{extract_facets, FacetSet};
use crate::filter::{apply_indices, FilterState};
use crate::paginate::{total_pages, PageState};
use crate::record::FeedbackRecord;

/// Counts of derived-value recomputations, for observing memoization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    pub filter_runs: usize,
    pub facet_runs: usize,
}

/// A page of filtered records as handed to a renderer.
#[derive(Debug)]
pub struct PageView<'a> {
    pub records: Vec<&'a FeedbackRecord>,
    pub number: usize,
    pub total_pages: usize,
    /// Number of records passing the filters
    pub total_matches: usize,
    /// Number of records before filtering
    pub total_records: usize,
    /// 1-based inclusive positions within the filtered list
    pub item_range: Option<(usize, usize)>,
}

#[derive(Debug)]
pub struct ExplorerView {
    records: Arc<[FeedbackRecord]>,
    generation: u64,
    filters: FilterState,
    page: PageState,
    filtered: Option<(u64, FilterState, Vec<usize>)>,
    facets: Option<(u64, FacetSet)>,
    stats: RecomputeStats,
}

impl ExplorerView {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Arc::from(Vec::<FeedbackRecord>::new()),
            generation: 0,
            filters: FilterState::default(),
            page: PageState::new(page_size),
            filtered: None,
            facets: None,
            stats: RecomputeStats::default(),
        }
    }

    pub fn with_records(records: Vec<FeedbackRecord>, page_size: usize) -> Self {
        let mut view = Self::new(page_size);
        view.replace_records(records);
        view
    }

    /// Install a new record collection. The page is kept but re-clamped.
    pub fn replace_records(&mut self, records: impl Into<Arc<[FeedbackRecord]>>) {
        self.records = records.into();
        self.generation += 1;
        let total = self.total_pages();
        self.page.clamp(total);
        tracing::debug!(
            generation = self.generation,
            records = self.records.len(),
            "explorer records replaced"
        );
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replace the filter state. Any actual change returns to page 1.
    pub fn set_filters(&mut self, filters: FilterState) {
        if filters == self.filters {
            return;
        }
        self.filters = filters;
        self.page.reset();
    }

    pub fn update_filters(&mut self, update: impl FnOnce(&mut FilterState)) {
        let mut next = self.filters.clone();
        update(&mut next);
        self.set_filters(next);
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn stats(&self) -> RecomputeStats {
        self.stats
    }

    /// Indices into [`Self::records`] of the records passing the filters.
    pub fn filtered_indices(&mut self) -> &[usize] {
        let fresh = matches!(
            &self.filtered,
            Some((generation, filters, _))
                if *generation == self.generation && *filters == self.filters
        );
        if !fresh {
            self.filtered = None;
        }
        let generation = self.generation;
        let (records, filters, stats) = (&self.records, &self.filters, &mut self.stats);
        let (_, _, indices) = self.filtered.get_or_insert_with(|| {
            stats.filter_runs += 1;
            (generation, filters.clone(), apply_indices(records, filters))
        });
        indices
    }

    pub fn match_count(&mut self) -> usize {
        self.filtered_indices().len()
    }

    pub fn facets(&mut self) -> &FacetSet {
        if !matches!(&self.facets, Some((generation, _)) if *generation == self.generation) {
            self.facets = None;
        }
        let generation = self.generation;
        let (records, stats) = (&self.records, &mut self.stats);
        let (_, facets) = self.facets.get_or_insert_with(|| {
            stats.facet_runs += 1;
            (generation, extract_facets(records))
        });
        facets
    }

    pub fn total_pages(&mut self) -> usize {
        let page_size = self.page.items_per_page();
        total_pages(self.match_count(), page_size)
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.total_pages();
        self.page.go_to(page, total);
    }

    pub fn next_page(&mut self) {
        let total = self.total_pages();
        self.page.next(total);
    }

    pub fn previous_page(&mut self) {
        let total = self.total_pages();
        self.page.previous(total);
    }

    pub fn has_next_page(&mut self) -> bool {
        let total = self.total_pages();
        self.page.has_next(total)
    }

    pub fn current_page(&mut self) -> PageView<'_> {
        let total_pages = self.total_pages();
        let number = self.page.current();
        let size = self.page.items_per_page();
        let total_records = self.records.len();

        self.filtered_indices();
        let indices: &[usize] = self
            .filtered
            .as_ref()
            .map_or(&[][..], |(_, _, indices)| indices.as_slice());
        let page = crate::paginate::paginate(indices, number, size);
        let records = page.items.iter().map(|&idx| &self.records[idx]).collect();

        PageView {
            records,
            number,
            total_pages,
            total_matches: indices.len(),
            total_records,
            item_range: page.item_range(),
        }
    }

    /// Record at 0-based `position` within the filtered list.
    pub fn record_at(&mut self, position: usize) -> Option<&FeedbackRecord> {
        let idx = *self.filtered_indices().get(position)?;
        self.records.get(idx)
    }
}

impl Default for ExplorerView {
    fn default() -> Self {
        Self::new(sentily_protocol::defaults::DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DimensionFilter;
    use crate::normalize::normalize;
    use crate::record::Dimension;
    use serde_json::json;

    fn numbered(count: usize) -> Vec<FeedbackRecord> {
        (0..count)
            .map(|i| {
                let sentiment = if i % 2 == 0 { "Positive" } else { "Negative" };
                normalize(&json!({"message": format!("item {}", i), "sentiment": sentiment}))
            })
            .collect()
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = ExplorerView::with_records(numbered(25), 10);
        view.go_to_page(3);
        assert_eq!(view.page_state().current(), 3);

        view.update_filters(|f| f.sentiment = DimensionFilter::parse("positive"));
        assert_eq!(view.page_state().current(), 1);
        assert_eq!(view.match_count(), 13);
    }

    #[test]
    fn test_unchanged_filters_keep_page() {
        let mut view = ExplorerView::with_records(numbered(25), 10);
        view.go_to_page(2);
        view.set_filters(FilterState::default());
        assert_eq!(view.page_state().current(), 2);
    }

    #[test]
    fn test_replacing_records_reclamps_page() {
        let mut view = ExplorerView::with_records(numbered(25), 10);
        view.go_to_page(3);
        view.replace_records(numbered(12));
        assert_eq!(view.page_state().current(), 2);

        view.replace_records(Vec::<FeedbackRecord>::new());
        assert_eq!(view.page_state().current(), 1);
        assert_eq!(view.current_page().total_pages, 0);
    }

    #[test]
    fn test_memoization_by_inputs() {
        let mut view = ExplorerView::with_records(numbered(5), 10);
        view.match_count();
        view.match_count();
        view.facets();
        view.facets();
        assert_eq!(view.stats(), RecomputeStats { filter_runs: 1, facet_runs: 1 });

        view.set_filters(FilterState::new().with_search("item 1"));
        view.match_count();
        view.facets();
        assert_eq!(view.stats(), RecomputeStats { filter_runs: 2, facet_runs: 1 });

        view.replace_records(numbered(3));
        view.match_count();
        view.facets();
        assert_eq!(view.stats(), RecomputeStats { filter_runs: 3, facet_runs: 2 });
    }

    #[test]
    fn test_current_page_slices_filtered_list() {
        let mut view = ExplorerView::with_records(numbered(25), 10);
        view.go_to_page(3);
        let page = view.current_page();
        assert_eq!(page.records.len(), 5);
        assert_eq!(page.records[0].message(), "item 20");
        assert_eq!(page.item_range, Some((21, 25)));
        assert_eq!(page.total_matches, 25);
    }

    #[test]
    fn test_page_navigation_clamps_to_filtered_pages() {
        let mut view = ExplorerView::with_records(numbered(25), 10);
        view.previous_page();
        assert_eq!(view.page_state().current(), 1);
        assert!(view.has_next_page());

        for _ in 0..5 {
            view.next_page();
        }
        assert_eq!(view.page_state().current(), 3);
        assert!(!view.has_next_page());

        view.go_to_page(0);
        assert_eq!(view.page_state().current(), 1);

        view.update_filters(|f| {
            f.set_dimension(Dimension::Sentiment, DimensionFilter::parse("negative"))
        });
        view.next_page();
        view.next_page();
        assert_eq!(view.match_count(), 12);
        assert_eq!(view.page_state().current(), 2);
        assert!(!view.has_next_page());
        view.previous_page();
        assert_eq!(view.page_state().current(), 1);
    }

    #[test]
    fn test_empty_view_has_no_next_page() {
        let mut view = ExplorerView::new(10);
        assert_eq!(view.generation(), 0);
        view.next_page();
        assert_eq!(view.page_state().current(), 1);
        assert!(!view.has_next_page());

        view.replace_records(numbered(3));
        assert_eq!(view.generation(), 1);
    }

    #[test]
    fn test_record_at_uses_filtered_positions() {
        let mut view = ExplorerView::with_records(numbered(6), 10);
        view.set_filters(FilterState::new().with_sentiment("negative"));
        assert_eq!(view.record_at(1).map(|r| r.message()), Some("item 3"));
        assert!(view.record_at(3).is_none());
    }
}
