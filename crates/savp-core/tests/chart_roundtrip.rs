use savp_core::aspects::{Aspect, AspectKind};
use savp_core::chart::{self, ChartSnapshot, Placement};
use savp_core::zodiac::{Body, Sign};
use tempfile::TempDir;

fn placed(sign: Sign, degree: f64, house: u8) -> Placement {
    Placement {
        sign,
        degree,
        house: Some(house),
        retrograde: false,
    }
}

#[test]
fn test_save_and_load_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("charts").join("natal.json");

    let mut chart = ChartSnapshot::new()
        .with(Body::Sun, placed(Sign::Leo, 14.2, 10))
        .with(Body::Moon, placed(Sign::Cancer, 2.0, 9))
        .with(Body::Saturn, placed(Sign::Aquarius, 27.9, 4));
    chart.subject = Some("roundtrip".to_string());
    chart.moment = Some("1990-08-07T10:30:00Z".parse().unwrap());
    chart.aspects.push(Aspect {
        a: Body::Sun,
        b: Body::Saturn,
        kind: AspectKind::Opposition,
        orb: 3.7,
    });

    chart::save(&path, &chart).unwrap();
    let loaded = chart::load(&path).unwrap();

    assert_eq!(loaded, chart);
    assert_eq!(loaded.placements.len(), 3);
    assert_eq!(loaded.aspects[0].kind, AspectKind::Opposition);
}

#[test]
fn test_load_missing_file_mentions_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("absent.json");
    let err = chart::load(&path).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_load_rejects_out_of_range_degree() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{ "placements": { "sun": { "sign": "leo", "degree": 31.0 } } }"#,
    )
    .unwrap();
    assert!(chart::load(&path).is_err());
}

#[test]
fn test_load_rejects_unknown_body() {
    let json = r#"{ "placements": { "chiron": { "sign": "leo", "degree": 1.0 } } }"#;
    let err = chart::from_json(json).unwrap_err();
    assert!(format!("{:#}", err).contains("unknown body"));
}

#[test]
fn test_serialized_keys_are_snake_case() {
    let chart = ChartSnapshot::new().with(Body::Jupiter, placed(Sign::Sagittarius, 5.0, 1));
    let json = chart::to_json(&chart).unwrap();
    assert!(json.contains("\"jupiter\""));
    assert!(json.contains("\"sagittarius\""));
    assert!(!json.contains("aspects"));
}
