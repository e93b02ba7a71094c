//! Typed gateway over the `/data/*` endpoints.
//!
//! The [`EconomicDataApi`] trait is the seam consumed by the aggregator and
//! the dashboard view; [`Gateway`] is its HTTP implementation. Tests drive
//! the consumers with in-memory implementations of the same trait.

use crate::api::{ApiClient, ApiError};
use crate::models::{Category, Country, DataQuery, IndicatorPoint, Paged};

/// Read access to one indicator backend.
pub trait EconomicDataApi {
    /// Fetch one category, filtered and paginated per `query`.
    ///
    /// Implementations must reject a query combining exact `year` with a
    /// `year_from`/`year_to` range (see [`DataQuery::validate`]).
    fn fetch_category(
        &self,
        category: Category,
        query: &DataQuery,
    ) -> Result<Paged<IndicatorPoint>, ApiError>;

    /// Distinct countries, in the order the server returns them.
    fn list_countries(&self) -> Result<Vec<Country>, ApiError>;
}

/// HTTP-backed gateway.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: ApiClient,
}

impl Gateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl EconomicDataApi for Gateway {
    fn fetch_category(
        &self,
        category: Category,
        query: &DataQuery,
    ) -> Result<Paged<IndicatorPoint>, ApiError> {
        query.validate().map_err(ApiError::InvalidQuery)?;
        let path = format!("/data/{}", category.slug());
        self.client.get_json(&path, &query.to_query_pairs())
    }

    fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        let paged: Paged<Country> = self.client.get_json("/data/countries", &[])?;
        Ok(paged.data)
    }
}
