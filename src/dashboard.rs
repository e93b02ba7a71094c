//! Per-view filter and pagination state machine for one indicator category.
//!
//! A view holds two filter states: the *live* one being edited and the
//! *applied* one last submitted. Fetches are keyed off the applied state
//! only, so edits never refetch by themselves. The table is paginated; the
//! chart always fetches up to a fixed large limit and ignores pagination.
//! Table rows display newest year first while chart points are ascending by
//! year; the divergent sort orders are intentional.

use crate::api::ApiError;
use crate::gateway::EconomicDataApi;
use crate::models::{Category, Country, DataQuery, IndicatorPoint, Paged};
use std::thread;

/// The chart is not paginated; it fetches up to this many rows.
pub const CHART_LIMIT: u64 = 1000;
pub const DEFAULT_ROWS_PER_PAGE: u64 = 5;

/// Country/year-range filter as edited or as last applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub country: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
}

/// Observable view state. `Error` holds the view-local message of the most
/// recent failure; any later successful fetch returns the view to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    LoadingTable,
    LoadingChart,
    Error(String),
}

/// State machine backing one category page (table + chart).
///
/// Owns its filter and result state exclusively; nothing is shared between
/// views except the session behind the gateway.
pub struct EconomicDataView<G> {
    gateway: G,
    category: Category,
    default_country: String,
    live: FilterDraft,
    applied: FilterDraft,
    page: u64,
    rows_per_page: u64,
    table_data: Vec<IndicatorPoint>,
    total_count: u64,
    chart_data: Vec<IndicatorPoint>,
    available_countries: Vec<Country>,
    phase: ViewPhase,
}

impl<G: EconomicDataApi> EconomicDataView<G> {
    pub fn new(gateway: G, category: Category, default_country: &str) -> Self {
        let filter = FilterDraft {
            country: default_country.to_string(),
            year_from: None,
            year_to: None,
        };
        Self {
            gateway,
            category,
            default_country: default_country.to_string(),
            live: filter.clone(),
            applied: filter,
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            table_data: Vec::new(),
            total_count: 0,
            chart_data: Vec::new(),
            available_countries: Vec::new(),
            phase: ViewPhase::Idle,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn live_filter(&self) -> &FilterDraft {
        &self.live
    }

    pub fn applied_filter(&self) -> &FilterDraft {
        &self.applied
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn rows_per_page(&self) -> u64 {
        self.rows_per_page
    }

    /// Table rows, newest year first. Empty with `total_count() == 0` is a
    /// valid "no data" state, not an error.
    pub fn table_data(&self) -> &[IndicatorPoint] {
        &self.table_data
    }

    /// Server-side count of all rows matching the applied filter.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Chart points, ascending by year.
    pub fn chart_data(&self) -> &[IndicatorPoint] {
        &self.chart_data
    }

    pub fn available_countries(&self) -> &[Country] {
        &self.available_countries
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ViewPhase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Display name for a country code, falling back to the raw code when it
    /// is not in the fetched list (or the list is empty).
    pub fn country_display_name(&self, code: &str) -> String {
        self.available_countries
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| code.to_string())
    }

    /// Edit the live filter. No fetch happens until [`Self::apply_filters`].
    pub fn set_country(&mut self, code: &str) {
        self.live.country = code.to_string();
    }

    pub fn set_year_from(&mut self, year: Option<i32>) {
        self.live.year_from = year;
    }

    pub fn set_year_to(&mut self, year: Option<i32>) {
        self.live.year_to = year;
    }

    /// Populate the country dropdown. An empty list is fine; lookups then
    /// fall back to raw codes.
    pub fn load_countries(&mut self) {
        match self.gateway.list_countries() {
            Ok(countries) => self.available_countries = countries,
            Err(e) => {
                log::warn!("country list fetch failed: {}", e);
                self.phase = ViewPhase::Error("Failed to load country list".to_string());
            }
        }
    }

    /// Change the table page. Chart data is unaffected.
    pub fn change_page(&mut self, page: u64) {
        self.page = page;
        self.refresh_table();
    }

    /// Change the page size, resetting to the first page. Table only.
    pub fn change_rows_per_page(&mut self, rows: u64) {
        self.rows_per_page = rows;
        self.page = 0;
        self.refresh_table();
    }

    fn table_query(&self) -> DataQuery {
        DataQuery {
            country: Some(self.applied.country.clone()),
            year_from: self.applied.year_from,
            year_to: self.applied.year_to,
            ..DataQuery::default()
        }
        .for_page(self.page, self.rows_per_page)
    }

    fn chart_query(&self) -> DataQuery {
        DataQuery {
            country: Some(self.applied.country.clone()),
            year_from: self.applied.year_from,
            year_to: self.applied.year_to,
            limit: Some(CHART_LIMIT),
            ..DataQuery::default()
        }
    }

    fn refresh_table(&mut self) {
        self.phase = ViewPhase::LoadingTable;
        let query = self.table_query();
        let result = self.gateway.fetch_category(self.category, &query);
        let err = self.apply_table_result(result);
        self.phase = match err {
            Some(msg) => ViewPhase::Error(msg),
            None => ViewPhase::Idle,
        };
    }

    fn apply_table_result(
        &mut self,
        result: Result<Paged<IndicatorPoint>, ApiError>,
    ) -> Option<String> {
        match result {
            Ok(paged) => {
                self.total_count = paged.total;
                self.table_data = paged.data;
                // Display order: newest year first, regardless of server order.
                self.table_data.sort_by(|a, b| b.year.cmp(&a.year));
                None
            }
            Err(e) => {
                log::warn!("{} table fetch failed: {}", self.category, e);
                self.table_data.clear();
                self.total_count = 0;
                Some(format!("Failed to load {} table data", self.category))
            }
        }
    }

    fn apply_chart_result(
        &mut self,
        result: Result<Paged<IndicatorPoint>, ApiError>,
    ) -> Option<String> {
        match result {
            Ok(paged) => {
                self.chart_data = paged.data;
                // Chart order: ascending by year, regardless of server order.
                self.chart_data.sort_by(|a, b| a.year.cmp(&b.year));
                None
            }
            Err(e) => {
                log::warn!("{} chart fetch failed: {}", self.category, e);
                self.chart_data.clear();
                Some(format!("Failed to load {} chart data", self.category))
            }
        }
    }
}

impl<G: EconomicDataApi + Sync> EconomicDataView<G> {
    /// Initial load: countries, then table and chart concurrently.
    pub fn init(&mut self) {
        self.load_countries();
        self.refresh_both();
    }

    /// Submit the live filter: it becomes the applied filter, the table
    /// resets to page 0, and table and chart refetch concurrently.
    pub fn apply_filters(&mut self) {
        self.applied = self.live.clone();
        self.page = 0;
        self.refresh_both();
    }

    /// Restore the default filter and refetch both views.
    pub fn reset_filters(&mut self) {
        let filter = FilterDraft {
            country: self.default_country.clone(),
            year_from: None,
            year_to: None,
        };
        self.live = filter.clone();
        self.applied = filter;
        self.page = 0;
        self.refresh_both();
    }

    fn refresh_both(&mut self) {
        self.phase = ViewPhase::LoadingTable;
        let table_query = self.table_query();
        let chart_query = self.chart_query();
        let gateway = &self.gateway;
        let category = self.category;
        let (table, chart) = thread::scope(|s| {
            let t = s.spawn(|| gateway.fetch_category(category, &table_query));
            let c = s.spawn(|| gateway.fetch_category(category, &chart_query));
            (
                t.join().expect("table fetch thread panicked"),
                c.join().expect("chart fetch thread panicked"),
            )
        });
        let table_err = self.apply_table_result(table);
        let chart_err = self.apply_chart_result(chart);
        self.phase = match table_err.or(chart_err) {
            Some(msg) => ViewPhase::Error(msg),
            None => ViewPhase::Idle,
        };
    }
}
