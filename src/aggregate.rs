//! Multi-indicator aggregation: all five categories for a country, merged
//! into per-year records.
//!
//! The five category fetches run concurrently on scoped threads and the
//! aggregate completes only when all five have settled. The policy is
//! all-or-nothing: one rejected category fails the whole call and the other
//! results are discarded. Siblings already in flight are not cancelled.

use crate::api::ApiError;
use crate::gateway::EconomicDataApi;
use crate::models::{Category, Country, CountryYearRecord, DataQuery, IndicatorPoint, Paged};
use std::collections::BTreeSet;
use std::thread;

/// The five category responses for one country/year filter, unmerged.
#[derive(Debug, Clone)]
pub struct CategoryBundle {
    pub gdp: Paged<IndicatorPoint>,
    pub population: Paged<IndicatorPoint>,
    pub education: Paged<IndicatorPoint>,
    pub inflation: Paged<IndicatorPoint>,
    pub labour: Paged<IndicatorPoint>,
}

impl CategoryBundle {
    pub fn get(&self, category: Category) -> &Paged<IndicatorPoint> {
        match category {
            Category::Gdp => &self.gdp,
            Category::Population => &self.population,
            Category::Education => &self.education,
            Category::Inflation => &self.inflation,
            Category::Labour => &self.labour,
        }
    }
}

/// Fetch all five categories for `country` concurrently, optionally pinned
/// to a single `year`. Fails as a whole if any one category fails.
pub fn fetch_all_for_country<G>(
    gateway: &G,
    country: &str,
    year: Option<i32>,
) -> Result<CategoryBundle, ApiError>
where
    G: EconomicDataApi + Sync,
{
    let query = DataQuery::for_country(country, year);
    let results = thread::scope(|s| {
        let handles = Category::ALL.map(|category| {
            let q = &query;
            s.spawn(move || gateway.fetch_category(category, q))
        });
        handles.map(|h| h.join().expect("category fetch thread panicked"))
    });
    let [gdp, population, education, inflation, labour] = results;
    Ok(CategoryBundle {
        gdp: gdp?,
        population: population?,
        education: education?,
        inflation: inflation?,
        labour: labour?,
    })
}

/// Merge a bundle into one record per year.
///
/// Years are the union across all five `data` arrays (duplicates within a
/// category collapse), sorted ascending. Per year, the first entry matching
/// that year in each category supplies the value; a category with no entry
/// yields `None`, never an omitted record. Linear lookup is fine here:
/// category series are at most a few hundred points.
pub fn merge_by_year(bundle: &CategoryBundle) -> Vec<CountryYearRecord> {
    let mut years: BTreeSet<i32> = BTreeSet::new();
    for category in Category::ALL {
        for point in &bundle.get(category).data {
            years.insert(point.year);
        }
    }

    let value_for = |points: &[IndicatorPoint], year: i32| {
        points.iter().find(|p| p.year == year).map(|p| p.value)
    };

    years
        .into_iter()
        .map(|year| CountryYearRecord {
            year,
            gdp: value_for(&bundle.gdp.data, year),
            population: value_for(&bundle.population.data, year),
            education: value_for(&bundle.education.data, year),
            inflation: value_for(&bundle.inflation.data, year),
            labour: value_for(&bundle.labour.data, year),
        })
        .collect()
}

/// Merged per-year series for one country of a three-country overview.
#[derive(Debug, Clone)]
pub struct CountryTrend {
    pub code: String,
    pub records: Vec<CountryYearRecord>,
}

/// Three countries' merged series plus the selectable countries and years
/// derived from their GDP data.
#[derive(Debug, Clone)]
pub struct Overview {
    pub countries: [CountryTrend; 3],
    /// Distinct countries in order of first appearance across the three GDP
    /// series.
    pub available_countries: Vec<Country>,
    /// Union of GDP years, newest first.
    pub available_years: Vec<i32>,
}

/// Fetch and merge the full overview for three countries. The per-country
/// aggregates run concurrently (each one fanning out into its five category
/// fetches) and the whole call fails if any of them does.
pub fn fetch_overview<G>(gateway: &G, codes: [&str; 3]) -> Result<Overview, ApiError>
where
    G: EconomicDataApi + Sync,
{
    let bundles = thread::scope(|s| {
        let handles = codes.map(|code| s.spawn(move || fetch_all_for_country(gateway, code, None)));
        handles.map(|h| h.join().expect("country fetch thread panicked"))
    });
    let [b1, b2, b3] = bundles;
    let (b1, b2, b3) = (b1?, b2?, b3?);

    let mut available_countries: Vec<Country> = Vec::new();
    let mut year_set: BTreeSet<i32> = BTreeSet::new();
    for bundle in [&b1, &b2, &b3] {
        for point in &bundle.gdp.data {
            if !available_countries.iter().any(|c| c.code == point.iso_code) {
                available_countries.push(Country {
                    code: point.iso_code.clone(),
                    name: point.country_name.clone(),
                });
            }
            year_set.insert(point.year);
        }
    }
    let available_years: Vec<i32> = year_set.into_iter().rev().collect();

    let countries = [
        CountryTrend {
            code: codes[0].to_string(),
            records: merge_by_year(&b1),
        },
        CountryTrend {
            code: codes[1].to_string(),
            records: merge_by_year(&b2),
        },
        CountryTrend {
            code: codes[2].to_string(),
            records: merge_by_year(&b3),
        },
    ];

    Ok(Overview {
        countries,
        available_countries,
        available_years,
    })
}
