use crate::models::{CountryYearRecord, IndicatorPoint};
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save indicator rows as CSV with header.
pub fn save_csv<P: AsRef<Path>>(points: &[IndicatorPoint], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("id", "year", "value", "country_name", "iso_code"))?;
    for p in points {
        wtr.serialize((p.id, p.year, p.value, &p.country_name, &p.iso_code))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save indicator rows as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(points: &[IndicatorPoint], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(points)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save merged per-year records as CSV; missing values serialize as empty
/// fields.
pub fn save_records_csv<P: AsRef<Path>>(records: &[CountryYearRecord], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("year", "gdp", "population", "education", "inflation", "labour"))?;
    for r in records {
        wtr.serialize((r.year, r.gdp, r.population, r.education, r.inflation, r.labour))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save merged per-year records as pretty JSON array.
pub fn save_records_json<P: AsRef<Path>>(records: &[CountryYearRecord], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let pts = vec![IndicatorPoint {
            id: 1,
            year: 2020,
            value: 4.5,
            country_name: "Malaysia".into(),
            iso_code: "MY".into(),
        }];
        save_csv(&pts, &csvp).unwrap();
        save_json(&pts, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn write_records_csv() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("records.csv");
        let recs = vec![CountryYearRecord {
            year: 2019,
            gdp: Some(4.4),
            population: None,
            education: Some(4.2),
            inflation: Some(0.7),
            labour: None,
        }];
        save_records_csv(&recs, &p).unwrap();
        let body = std::fs::read_to_string(&p).unwrap();
        assert!(body.starts_with("year,gdp,population,education,inflation,labour"));
        assert!(body.contains("2019,4.4,,4.2,0.7,"));
    }
}
