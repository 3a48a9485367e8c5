//! # Product list view-model
//!
//! Combines the remote page (or search result) with local filter, sort,
//! pagination, and optimistic-deletion state.
//!
//! [`derive_list`] is the pure pipeline: category filter, then removed ids,
//! then price bounds, then sort. [`ListView`] holds the mutable state a list
//! screen owns and enforces its transitions (filter changes reset the page,
//! deletes are optimistic and revertible).

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::filters::{ListFilters, SortKey};
use crate::models::{ListParams, Product};

/// Page sizes offered by the list.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [6, 12, 24];

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

fn compare(sort: SortKey, a: &Product, b: &Product) -> Ordering {
    match sort {
        SortKey::PriceAsc => a.price.total_cmp(&b.price),
        SortKey::PriceDesc => b.price.total_cmp(&a.price),
        SortKey::NameAsc => a.name.cmp(&b.name),
        SortKey::Newest => b.created_at.cmp(&a.created_at),
    }
}

/// Derive the products to display from `base`.
pub fn derive_list(
    base: &[Product],
    filters: &ListFilters,
    removed: &HashSet<String>,
) -> Vec<Product> {
    let mut list: Vec<Product> = base
        .iter()
        .filter(|p| filters.category_id.is_empty() || p.category.id == filters.category_id)
        .filter(|p| !removed.contains(&p.id))
        .filter(|p| filters.price_in_bounds(p.price))
        .cloned()
        .collect();
    list.sort_by(|a, b| compare(filters.sort, a, b));
    list
}

/// Local state of the product list screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ListView {
    filters: ListFilters,
    query: String,
    page: u32,
    limit: u32,
    removed: HashSet<String>,
    /// Number of items the last list page returned.
    last_page_len: Option<usize>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(ListFilters::default(), DEFAULT_PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(filters: ListFilters, limit: u32) -> Self {
        Self {
            filters,
            query: String::new(),
            page: 0,
            limit: limit.max(1),
            removed: HashSet::new(),
            last_page_len: None,
        }
    }

    /// Seed the view from the page URL's query string.
    pub fn from_query(query: &str, limit: u32) -> Self {
        Self::new(ListFilters::from_query(query), limit)
    }

    pub fn filters(&self) -> &ListFilters {
        &self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.page * self.limit
    }

    /// Whether a free-text search replaces the paginated list.
    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Parameters of the list request for the current page.
    ///
    /// The category filter is sent server-side as well as applied locally.
    pub fn list_params(&self) -> ListParams {
        ListParams::page(self.page, self.limit).with_category(&self.filters.category_id)
    }

    /// Replace the filters. Returns `true` if they changed, in which case the
    /// page is reset to the first one.
    pub fn set_filters(&mut self, filters: ListFilters) -> bool {
        if filters == self.filters {
            return false;
        }
        self.filters = filters;
        self.page = 0;
        true
    }

    /// Apply a change to a copy of the filters, see [`ListView::set_filters`].
    pub fn update_filters(&mut self, f: impl FnOnce(&mut ListFilters)) -> bool {
        let mut next = self.filters.clone();
        f(&mut next);
        self.set_filters(next)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit.max(1);
        self.page = 0;
    }

    /// Whether the "Reset" action applies.
    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active() || !self.query.is_empty()
    }

    /// Clear the filters and the search text.
    pub fn reset(&mut self) {
        self.set_filters(ListFilters::default());
        self.query.clear();
    }

    /// Record how many items the last list page returned.
    pub fn record_page(&mut self, len: usize) {
        self.last_page_len = Some(len);
    }

    pub fn can_prev(&self) -> bool {
        self.page > 0
    }

    /// "Next" is possible only after a full page came back.
    pub fn can_next(&self) -> bool {
        self.last_page_len
            .map_or(false, |len| len >= self.limit as usize)
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        if self.can_next() {
            self.page += 1;
        }
    }

    /// Hide a product before the delete request resolves.
    pub fn mark_removed(&mut self, id: &str) {
        self.removed.insert(id.to_string());
    }

    /// Bring back a product whose delete request failed.
    pub fn restore(&mut self, id: &str) {
        self.removed.remove(id);
    }

    pub fn is_removed(&self, id: &str) -> bool {
        self.removed.contains(id)
    }

    /// Products to render, given the current list page and search result.
    pub fn visible(&self, page: Option<&[Product]>, search: Option<&[Product]>) -> Vec<Product> {
        let base = if self.is_searching() { search } else { page };
        derive_list(base.unwrap_or_default(), &self.filters, &self.removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;
    use proptest::prelude::*;

    fn ids(list: &[Product]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_price_asc_scenario() {
        let base = vec![
            product("b", "B", 10.0, "c1", 0),
            product("a", "A", 5.0, "c1", 0),
        ];
        let filters = ListFilters {
            sort: SortKey::PriceAsc,
            ..Default::default()
        };
        let list = derive_list(&base, &filters, &HashSet::new());
        assert_eq!(ids(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_keys() {
        let base = vec![
            product("1", "Pear", 3.0, "c1", 100),
            product("2", "Apple", 7.0, "c1", 300),
            product("3", "Fig", 5.0, "c1", 200),
        ];
        let run = |sort| {
            let filters = ListFilters {
                sort,
                ..Default::default()
            };
            ids(&derive_list(&base, &filters, &HashSet::new()))
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        };
        assert_eq!(run(SortKey::Newest), vec!["2", "3", "1"]);
        assert_eq!(run(SortKey::PriceAsc), vec!["1", "3", "2"]);
        assert_eq!(run(SortKey::PriceDesc), vec!["2", "3", "1"]);
        assert_eq!(run(SortKey::NameAsc), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_category_and_price_filters() {
        let base = vec![
            product("1", "A", 5.0, "shoes", 0),
            product("2", "B", 15.0, "shoes", 0),
            product("3", "C", 15.0, "hats", 0),
        ];
        let filters = ListFilters {
            category_id: "shoes".to_string(),
            min_price: "10".to_string(),
            max_price: "not a number".to_string(),
            ..Default::default()
        };
        let list = derive_list(&base, &filters, &HashSet::new());
        assert_eq!(ids(&list), vec!["2"]);
    }

    #[test]
    fn test_optimistic_delete_and_restore() {
        let page = vec![
            product("x", "X", 1.0, "c1", 2),
            product("y", "Y", 1.0, "c1", 1),
        ];
        let mut view = ListView::default();

        view.mark_removed("x");
        assert!(view.is_removed("x"));
        assert_eq!(ids(&view.visible(Some(&page), None)), vec!["y"]);

        // delete failed
        view.restore("x");
        assert_eq!(ids(&view.visible(Some(&page), None)), vec!["x", "y"]);
    }

    #[test]
    fn test_search_replaces_base_when_query_non_blank() {
        let page = vec![product("p", "Page", 1.0, "c1", 0)];
        let found = vec![product("s", "Search", 1.0, "c1", 0)];
        let mut view = ListView::default();

        view.set_query("   ");
        assert_eq!(ids(&view.visible(Some(&page), Some(&found))), vec!["p"]);

        view.set_query("sea");
        assert_eq!(ids(&view.visible(Some(&page), Some(&found))), vec!["s"]);
        assert!(view.visible(Some(&page), None).is_empty());
    }

    #[test]
    fn test_pagination_rules() {
        let mut view = ListView::new(ListFilters::default(), 2);
        assert!(!view.can_prev());
        assert!(!view.can_next());

        view.record_page(2);
        assert!(view.can_next());
        view.next_page();
        assert_eq!(view.page(), 1);
        assert_eq!(view.offset(), 2);
        assert!(view.can_prev());

        view.record_page(1);
        assert!(!view.can_next());
        view.next_page();
        assert_eq!(view.page(), 1);

        view.prev_page();
        view.prev_page();
        assert_eq!(view.page(), 0);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = ListView::new(ListFilters::default(), 6);
        view.record_page(6);
        view.next_page();
        assert_eq!(view.page(), 1);

        assert!(!view.update_filters(|_| {}));
        assert_eq!(view.page(), 1);

        assert!(view.update_filters(|f| f.category_id = "c1".to_string()));
        assert_eq!(view.page(), 0);
        assert_eq!(view.list_params().category_id.as_deref(), Some("c1"));

        view.record_page(6);
        view.next_page();
        view.set_limit(24);
        assert_eq!(view.page(), 0);
        assert_eq!(view.list_params().limit, Some(24));
    }

    #[test]
    fn test_reset_clears_filters_and_query() {
        let mut view = ListView::from_query("categoryId=c1&sort=price_asc", 12);
        view.set_query("shoe");
        assert!(view.has_active_filters());
        view.reset();
        assert!(!view.has_active_filters());
        assert_eq!(view.filters(), &ListFilters::default());
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            "[a-e]",
            "[A-Za-z]{1,6}",
            0.0f64..100.0,
            prop::sample::select(vec!["c1", "c2", "c3"]),
            0i64..1_000_000,
        )
            .prop_map(|(id, name, price, cat, created)| product(&id, &name, price, cat, created))
    }

    fn arb_filters() -> impl Strategy<Value = ListFilters> {
        (
            prop::sample::select(vec!["", "c1", "c2"]),
            prop::option::of(0u32..100),
            prop::option::of(0u32..100),
            prop::sample::select(SortKey::ALL.to_vec()),
        )
            .prop_map(|(cat, min, max, sort)| ListFilters {
                category_id: cat.to_string(),
                min_price: min.map(|v| v.to_string()).unwrap_or_default(),
                max_price: max.map(|v| v.to_string()).unwrap_or_default(),
                sort,
            })
    }

    proptest! {
        #[test]
        fn prop_list_is_sorted_filtered_subset(
            base in prop::collection::vec(arb_product(), 0..20),
            filters in arb_filters(),
            removed in prop::collection::hash_set("[a-e]", 0..3),
        ) {
            let list = derive_list(&base, &filters, &removed);

            let expected = base.iter().filter(|p| {
                (filters.category_id.is_empty() || p.category.id == filters.category_id)
                    && !removed.contains(&p.id)
                    && filters.min_bound().map_or(true, |m| p.price >= m)
                    && filters.max_bound().map_or(true, |m| p.price <= m)
            }).count();
            prop_assert_eq!(list.len(), expected);

            for p in &list {
                prop_assert!(base.contains(p));
            }
            for pair in list.windows(2) {
                prop_assert_ne!(compare(filters.sort, &pair[0], &pair[1]), Ordering::Greater);
            }

            // idempotent
            prop_assert_eq!(derive_list(&list, &filters, &removed), list.clone());
            prop_assert_eq!(derive_list(&base, &filters, &removed), list);
        }

        #[test]
        fn prop_filters_roundtrip_through_query(filters in arb_filters()) {
            prop_assert_eq!(ListFilters::from_query(&filters.to_query()), filters);
        }
    }
}
