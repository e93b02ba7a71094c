use serde::{Deserialize, Serialize};

/// One economic indicator series exposed by the backend.
///
/// The set is closed: the merge logic in [`crate::aggregate`] keys on exactly
/// these five fields, so adding a category means extending the merge key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Gdp,
    Population,
    Education,
    Inflation,
    Labour,
}

impl Category {
    /// Fixed evaluation order used by the aggregator.
    pub const ALL: [Category; 5] = [
        Category::Gdp,
        Category::Population,
        Category::Education,
        Category::Inflation,
        Category::Labour,
    ];

    /// Path segment under `/data/` on the backend.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Gdp => "gdp",
            Category::Population => "population",
            Category::Education => "education",
            Category::Inflation => "inflation",
            Category::Labour => "labour",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// One observation as returned by `/data/{category}`.
///
/// The backend identifies a row by (category, iso_code, year), but duplicates
/// are not rejected client-side; the merge keeps the first match per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub id: i64,
    pub year: i32,
    pub value: f64,
    pub country_name: String,
    pub iso_code: String,
}

/// Paged envelope used by every `/data/*` endpoint.
///
/// `total` is the server-side count of all matching rows, independent of
/// `limit`/`offset`. It drives pagination, not validation of `data.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Distinct country as listed by `/data/countries`, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

/// Per-year merge output of the aggregator: one record per year present in
/// the union of the five categories, missing values filled with `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearRecord {
    pub year: i32,
    pub gdp: Option<f64>,
    pub population: Option<f64>,
    pub education: Option<f64>,
    pub inflation: Option<f64>,
    pub labour: Option<f64>,
}

impl CountryYearRecord {
    pub fn get(&self, category: Category) -> Option<f64> {
        match category {
            Category::Gdp => self.gdp,
            Category::Population => self.population,
            Category::Education => self.education,
            Category::Inflation => self.inflation,
            Category::Labour => self.labour,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload of `POST /auth/login`. `expires_at` is a unix timestamp; it is
/// never checked locally, expiry surfaces as a 401 on a later request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
}

/// Filter parameters for one `/data/{category}` request.
///
/// Every recognized key is an explicit field; there is no pass-through map.
/// `year` is an exact match, `year_from`/`year_to` bound an inclusive range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataQuery {
    pub country: Option<String>,
    pub year: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl DataQuery {
    /// Query for one country, optionally pinned to a single year.
    pub fn for_country(country: &str, year: Option<i32>) -> Self {
        Self {
            country: Some(country.to_string()),
            year,
            ..Self::default()
        }
    }

    /// Set contiguous pagination: `offset = page * per_page`.
    pub fn for_page(mut self, page: u64, per_page: u64) -> Self {
        self.limit = Some(per_page);
        self.offset = Some(page * per_page);
        self
    }

    /// Exact `year` and a `year_from`/`year_to` range are mutually exclusive;
    /// the backend's precedence between them is unspecified, so the client
    /// rejects the combination instead of deferring to server behavior.
    pub fn validate(&self) -> Result<(), String> {
        if self.year.is_some() && (self.year_from.is_some() || self.year_to.is_some()) {
            return Err("filter `year` cannot be combined with `year_from`/`year_to`".to_string());
        }
        Ok(())
    }

    /// Query-string pairs for the set fields only.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(c) = &self.country {
            pairs.push(("country", c.clone()));
        }
        if let Some(y) = self.year {
            pairs.push(("year", y.to_string()));
        }
        if let Some(y) = self.year_from {
            pairs.push(("year_from", y.to_string()));
        }
        if let Some(y) = self.year_to {
            pairs.push(("year_to", y.to_string()));
        }
        if let Some(l) = self.limit {
            pairs.push(("limit", l.to_string()));
        }
        if let Some(o) = self.offset {
            pairs.push(("offset", o.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_offset_tracks_page() {
        let q = DataQuery::for_country("MY", None).for_page(3, 25);
        assert_eq!(q.limit, Some(25));
        assert_eq!(q.offset, Some(75));
    }

    #[test]
    fn year_and_range_are_mutually_exclusive() {
        let mut q = DataQuery::for_country("MY", Some(2020));
        q.year_from = Some(2015);
        assert!(q.validate().is_err());

        let ok = DataQuery {
            year_from: Some(2015),
            year_to: Some(2020),
            ..DataQuery::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn query_pairs_skip_unset_fields() {
        let q = DataQuery {
            country: Some("SG".into()),
            year_to: Some(2021),
            ..DataQuery::default()
        };
        assert_eq!(
            q.to_query_pairs(),
            vec![("country", "SG".to_string()), ("year_to", "2021".to_string())]
        );
    }
}
