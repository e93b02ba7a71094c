#![allow(dead_code)]

use econdash_rs::{
    ApiError, Category, Country, DataQuery, EconomicDataApi, IndicatorPoint, Paged,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in for the HTTP gateway: filters and paginates a fixed
/// dataset with the same semantics the backend advertises.
pub struct FakeApi {
    rows: HashMap<Category, Vec<IndicatorPoint>>,
    countries: Vec<Country>,
    fail: Vec<Category>,
    fail_countries: bool,
    calls: Mutex<Vec<(Category, DataQuery)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            countries: Vec::new(),
            fail: Vec::new(),
            fail_countries: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rows(mut self, category: Category, rows: Vec<IndicatorPoint>) -> Self {
        self.rows.insert(category, rows);
        self
    }

    pub fn with_countries(mut self, countries: Vec<Country>) -> Self {
        self.countries = countries;
        self
    }

    pub fn failing(mut self, category: Category) -> Self {
        self.fail.push(category);
        self
    }

    pub fn failing_countries(mut self) -> Self {
        self.fail_countries = true;
        self
    }

    pub fn calls(&self) -> Vec<(Category, DataQuery)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, category: Category) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == category)
            .count()
    }
}

impl EconomicDataApi for FakeApi {
    fn fetch_category(
        &self,
        category: Category,
        query: &DataQuery,
    ) -> Result<Paged<IndicatorPoint>, ApiError> {
        query.validate().map_err(ApiError::InvalidQuery)?;
        self.calls.lock().unwrap().push((category, query.clone()));
        if self.fail.contains(&category) {
            return Err(ApiError::Http { status: 500 });
        }
        let mut rows: Vec<IndicatorPoint> =
            self.rows.get(&category).cloned().unwrap_or_default();
        if let Some(c) = &query.country {
            rows.retain(|p| &p.iso_code == c);
        }
        if let Some(y) = query.year {
            rows.retain(|p| p.year == y);
        }
        if let Some(y) = query.year_from {
            rows.retain(|p| p.year >= y);
        }
        if let Some(y) = query.year_to {
            rows.retain(|p| p.year <= y);
        }
        let total = rows.len() as u64;
        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(100);
        let data = rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(Paged {
            data,
            total,
            limit,
            offset,
        })
    }

    fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        if self.fail_countries {
            return Err(ApiError::Http { status: 500 });
        }
        Ok(self.countries.clone())
    }
}

pub fn point(id: i64, year: i32, value: f64, code: &str, name: &str) -> IndicatorPoint {
    IndicatorPoint {
        id,
        year,
        value,
        country_name: name.to_string(),
        iso_code: code.to_string(),
    }
}

/// `count` yearly observations for one country starting at `first_year`.
pub fn series(code: &str, name: &str, first_year: i32, count: i32) -> Vec<IndicatorPoint> {
    (0..count)
        .map(|i| point(i as i64 + 1, first_year + i, 1.0 + i as f64, code, name))
        .collect()
}
