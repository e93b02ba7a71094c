//! Comparative analysis over merged per-year records.
//!
//! Consumes [`CountryYearRecord`] series for three countries (each with its
//! own selected year) and produces natural-language comparison sentences for
//! GDP growth and inflation. Values missing for the selected year enter the
//! comparison as NaN, and any NaN among the three omits that category's
//! sentence entirely.

use crate::models::{Category, CountryYearRecord};
use num_format::{Locale, ToFormattedString};

/// One country's series and the year picked for it, plus the display name
/// (which may be a raw ISO code when the country list is unavailable).
#[derive(Debug, Clone, Copy)]
pub struct CountrySelection<'a> {
    pub name: &'a str,
    pub records: &'a [CountryYearRecord],
    pub year: i32,
}

impl CountrySelection<'_> {
    /// Value for the selected year, rounded to two decimals (comparisons
    /// happen on display precision), or NaN when missing.
    fn numeric(&self, category: Category) -> f64 {
        self.records
            .iter()
            .find(|r| r.year == self.year)
            .and_then(|r| r.get(category))
            .map(|v| (v * 100.0).round() / 100.0)
            .unwrap_or(f64::NAN)
    }
}

/// Display form of one indicator value for a given year: `"N/A"` when the
/// year or the value is missing, otherwise fixed two decimals.
pub fn value_for_year(records: &[CountryYearRecord], category: Category, year: i32) -> String {
    match records.iter().find(|r| r.year == year).and_then(|r| r.get(category)) {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Locale-grouped display of a value (thousands separators, up to two
/// decimals, trailing zeros trimmed). Used for population and labour force
/// magnitudes.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let negative = value < 0.0;
    let abs = value.abs();
    let mut int = abs.trunc() as i64;
    let mut frac = ((abs - abs.trunc()) * 100.0).round() as i64;
    if frac == 100 {
        int += 1;
        frac = 0;
    }
    let mut out = int.to_formatted_string(&Locale::en);
    if frac > 0 {
        let digits = format!("{:02}", frac);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    if negative && (int > 0 || frac > 0) {
        out.insert(0, '-');
    }
    out
}

/// Pick the first country (left to right) whose value equals `target`.
/// Strict equality on purpose: ties report the earliest country, and a
/// three-way tie reports the first for both extremes.
fn first_matching(entries: [(&str, f64); 3], target: f64) -> (&str, f64) {
    for (name, v) in entries {
        if v == target {
            return (name, v);
        }
    }
    // Unreachable for finite inputs: target is always one of the values.
    entries[0]
}

/// GDP growth comparison sentence, or `None` when any of the three values is
/// missing for its selected year.
pub fn gdp_comparison(
    c1: &CountrySelection,
    c2: &CountrySelection,
    c3: &CountrySelection,
) -> Option<String> {
    let (v1, v2, v3) = (
        c1.numeric(Category::Gdp),
        c2.numeric(Category::Gdp),
        c3.numeric(Category::Gdp),
    );
    if v1.is_nan() || v2.is_nan() || v3.is_nan() {
        return None;
    }
    let highest = v1.max(v2).max(v3);
    let lowest = v1.min(v2).min(v3);
    let entries = [(c1.name, v1), (c2.name, v2), (c3.name, v3)];
    let (strongest, sv) = first_matching(entries, highest);
    let (weakest, wv) = first_matching(entries, lowest);
    Some(format!(
        "In terms of GDP growth, {} shows the strongest growth at {:.2}%, while {} has the lowest at {:.2}%.",
        strongest, sv, weakest, wv
    ))
}

/// Inflation comparison sentence, or `None` when any of the three values is
/// missing. Names the most stable (lowest) country first, then the highest.
pub fn inflation_comparison(
    c1: &CountrySelection,
    c2: &CountrySelection,
    c3: &CountrySelection,
) -> Option<String> {
    let (v1, v2, v3) = (
        c1.numeric(Category::Inflation),
        c2.numeric(Category::Inflation),
        c3.numeric(Category::Inflation),
    );
    if v1.is_nan() || v2.is_nan() || v3.is_nan() {
        return None;
    }
    let highest = v1.max(v2).max(v3);
    let lowest = v1.min(v2).min(v3);
    let entries = [(c1.name, v1), (c2.name, v2), (c3.name, v3)];
    let (stable, lv) = first_matching(entries, lowest);
    let (worst, hv) = first_matching(entries, highest);
    Some(format!(
        "Regarding inflation rates, {} maintains the most stable prices with {:.2}% inflation, while {} faces higher inflation at {:.2}%.",
        stable, lv, worst, hv
    ))
}

/// Full analysis block: a heading plus whichever comparison sentences are
/// computable for the three selections.
pub fn analysis_text(
    c1: &CountrySelection,
    c2: &CountrySelection,
    c3: &CountrySelection,
) -> String {
    let mut out = format!(
        "Comparing the economic indicators for {}, {}, and {}:",
        c1.name, c2.name, c3.name
    );
    if let Some(gdp) = gdp_comparison(c1, c2, c3) {
        out.push_str("\n\n");
        out.push_str(&gdp);
    }
    if let Some(inflation) = inflation_comparison(c1, c2, c3) {
        out.push_str("\n\n");
        out.push_str(&inflation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(-2500.25), "-2,500.25");
        assert_eq!(format_number(f64::NAN), "N/A");
    }
}
