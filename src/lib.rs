//! econdash-rs
//!
//! A lightweight Rust client for an economic dashboard REST backend: bearer
//! token sessions, typed paginated indicator queries, concurrent
//! multi-indicator aggregation, and the filter/pagination state driving a
//! table-plus-chart view. Pairs with the `econdash` CLI.
//!
//! ### Features
//! - File-persisted single-slot session with central 401 teardown
//! - Typed gateway over `/data/{gdp,population,education,inflation,labour}`
//! - All-or-nothing concurrent fetch of all five categories per country,
//!   merged into per-year records
//! - Comparative GDP/inflation analysis text for three countries
//! - CSV/JSON export of fetched series and merged records
//!
//! ### Example
//! ```no_run
//! use std::sync::Arc;
//! use econdash_rs::{aggregate, ApiClient, Gateway, SessionStore};
//!
//! let session = Arc::new(SessionStore::open(SessionStore::default_path()));
//! let client = ApiClient::new("http://127.0.0.1:8000", session);
//! client.login("demo", "demo")?;
//! let gateway = Gateway::new(client);
//! let bundle = aggregate::fetch_all_for_country(&gateway, "MY", None)?;
//! let records = aggregate::merge_by_year(&bundle);
//! econdash_rs::storage::save_records_csv(&records, "my.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod api;
pub mod dashboard;
pub mod gateway;
pub mod insights;
pub mod models;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use dashboard::{EconomicDataView, FilterDraft, ViewPhase};
pub use gateway::{EconomicDataApi, Gateway};
pub use models::{Category, Country, CountryYearRecord, DataQuery, IndicatorPoint, Paged};
pub use session::SessionStore;
