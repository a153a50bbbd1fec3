//! Tests for WKT rendering

use crate::tiff::errors::CogError;
use crate::tiff::geo_keys::GeoCode;
use crate::tiff::wkt;

fn directory(keys: &[[u16; 4]]) -> Vec<u16> {
    let mut dir = vec![1, 1, 0, keys.len() as u16];
    for key in keys {
        dir.extend_from_slice(key);
    }
    dir
}

#[test]
fn renders_projcs_datum_and_spheroid_in_order() {
    let dir = directory(&[
        [1024, 0, 1, 1],
        [2048, 0, 1, 4326],
        [2050, 0, 1, 6326],
        [2056, 0, 1, 7030],
        [3072, 0, 1, 3857],
    ]);
    let geo = GeoCode::from_directory(&dir, &[], "").unwrap();
    let wkt = wkt::render(&geo).unwrap();

    let projcs = wkt.find("PROJCS[\"unnamed\"").expect("PROJCS missing");
    let datum = wkt.find("DATUM[\"WGS_84\"").expect("DATUM missing");
    let spheroid = wkt.find("SPHEROID[\"WGS_84\"").expect("SPHEROID missing");
    assert!(projcs < datum && datum < spheroid);
}

#[test]
fn prefers_names_scraped_from_the_citation() {
    let ascii = "GCS Name = NAD83|Datum = North_American_Datum_1983|Ellipsoid = GRS 1980|Primem = Greenwich|";
    let dir = directory(&[
        [1024, 0, 1, 1],
        [2049, 34737, ascii.len() as u16, 0],
        [2050, 0, 1, 32767],
        [2056, 0, 1, 32767],
    ]);
    let geo = GeoCode::from_directory(&dir, &[], ascii).unwrap();
    let wkt = wkt::render(&geo).unwrap();

    assert!(wkt.contains("GEOGCS[\"NAD83\""), "wkt: {}", wkt);
    assert!(
        wkt.contains("DATUM[\"North_American_Datum_1983\""),
        "wkt: {}",
        wkt
    );
    assert!(wkt.contains("SPHEROID[\"GRS 1980\""), "wkt: {}", wkt);
    assert!(wkt.contains("PRIMEM[\"Greenwich\""), "wkt: {}", wkt);
}

#[test]
fn falls_back_to_enumerated_labels_without_citation() {
    let dir = directory(&[[1024, 0, 1, 1], [2048, 0, 1, 4326], [2050, 0, 1, 6326]]);
    let geo = GeoCode::from_directory(&dir, &[], "").unwrap();
    let wkt = wkt::render(&geo).unwrap();

    assert!(wkt.contains("GEOGCS[\"WGS_84\""), "wkt: {}", wkt);
    assert!(wkt.contains("DATUM[\"WGS_84\""), "wkt: {}", wkt);
}

#[test]
fn carries_numeric_parameters_into_the_output() {
    let dir = directory(&[
        [1024, 0, 1, 1],
        [2057, 34736, 1, 0],
        [2058, 34736, 1, 1],
        [3075, 0, 1, 24],
        [3082, 34736, 1, 2],
        [3083, 34736, 1, 3],
        [3088, 34736, 1, 4],
    ]);
    let doubles = [7.0, 3.0, 500000.0, 10000000.0, 15.0];
    let geo = GeoCode::from_directory(&dir, &doubles, "").unwrap();
    let wkt = wkt::render(&geo).unwrap();

    // SPHEROID carries the semi-major axis and the raw a-b difference
    assert!(wkt.contains("SPHEROID[\"unknown\",7,4]"), "wkt: {}", wkt);
    assert!(wkt.contains("PROJECTION[\"Sinusoidal\"]"), "wkt: {}", wkt);
    assert!(
        wkt.contains("PARAMETER[\"longitude_of_center\",15]"),
        "wkt: {}",
        wkt
    );
    assert!(
        wkt.contains("PARAMETER[\"false_easting\",500000]"),
        "wkt: {}",
        wkt
    );
    assert!(
        wkt.contains("PARAMETER[\"false_northing\",10000000]"),
        "wkt: {}",
        wkt
    );
    assert!(wkt.contains("UNIT[\"degree\",0.0174532925199433]"), "wkt: {}", wkt);
    assert!(wkt.ends_with("UNIT[\"metre\",1.0]]"), "wkt: {}", wkt);
}

#[test]
fn refuses_non_projected_models() {
    let geo = GeoCode::from_directory(&directory(&[[1024, 0, 1, 2]]), &[], "").unwrap();
    let err = wkt::render(&geo).unwrap_err();
    match err {
        CogError::Unsupported(msg) => assert!(msg.contains("Geographic"), "message: {}", msg),
        other => panic!("expected Unsupported, got {}", other),
    }
}

#[test]
fn refuses_a_missing_model_type() {
    let geo = GeoCode::default();
    assert!(matches!(
        wkt::render(&geo),
        Err(CogError::Unsupported(_))
    ));
}
