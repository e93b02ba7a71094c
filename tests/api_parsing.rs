use econdash_rs::models::{Country, IndicatorPoint, LoginResponse, Paged};

#[test]
fn parse_paged_indicator_response() {
    let sample = r#"
    {
      "data": [
        {"id": 11, "year": 2019, "value": 4.41, "country_name": "Malaysia", "iso_code": "MY"},
        {"id": 12, "year": 2020, "value": -5.46, "country_name": "Malaysia", "iso_code": "MY"}
      ],
      "total": 34,
      "limit": 2,
      "offset": 0
    }
    "#;

    let paged: Paged<IndicatorPoint> = serde_json::from_str(sample).unwrap();
    assert_eq!(paged.total, 34);
    assert_eq!(paged.limit, 2);
    assert_eq!(paged.offset, 0);
    assert_eq!(paged.data.len(), 2);
    assert_eq!(paged.data[0].iso_code, "MY");
    assert_eq!(paged.data[0].year, 2019);
    assert_eq!(paged.data[1].value, -5.46);
}

#[test]
fn parse_empty_page_is_valid() {
    // total=0 with no rows is the renderable "no data" state, not an error.
    let sample = r#"{"data": [], "total": 0, "limit": 25, "offset": 0}"#;
    let paged: Paged<IndicatorPoint> = serde_json::from_str(sample).unwrap();
    assert!(paged.data.is_empty());
    assert_eq!(paged.total, 0);
}

#[test]
fn parse_countries_keeps_server_order() {
    let sample = r#"
    {
      "data": [
        {"code": "MY", "name": "Malaysia"},
        {"code": "SG", "name": "Singapore"},
        {"code": "TH", "name": "Thailand"}
      ],
      "total": 3,
      "limit": 100,
      "offset": 0
    }
    "#;
    let paged: Paged<Country> = serde_json::from_str(sample).unwrap();
    let codes: Vec<&str> = paged.data.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["MY", "SG", "TH"]);
}

#[test]
fn parse_login_response() {
    let sample = r#"{"access_token": "abc.def.ghi", "token_type": "bearer", "expires_at": 1735689600}"#;
    let login: LoginResponse = serde_json::from_str(sample).unwrap();
    assert_eq!(login.access_token, "abc.def.ghi");
    assert_eq!(login.token_type, "bearer");
    assert_eq!(login.expires_at, 1_735_689_600);
}
