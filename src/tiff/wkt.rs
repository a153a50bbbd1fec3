//! Well-Known-Text rendering of a CRS description
//!
//! Renders a populated [`GeoCode`] into the OGC WKT form. Only the
//! projected model is rendered. The human-readable names for the datum,
//! ellipsoid, geographic CS and prime meridian prefer values scraped from
//! the GeoTIFF citation text (GDAL writes them as `Key = value` fields
//! separated by `|`); when the citation carries no such field, the
//! enumerated label stands in.

use lazy_static::lazy_static;
use regex::Regex;

use crate::tiff::errors::{CogError, CogResult};
use crate::tiff::geo_keys::{AngularUnit, GeoCode, ModelType};

/// Radians per degree, the conversion factor carried by the angular UNIT
const DEGREE_IN_RADIANS: &str = "0.0174532925199433";

lazy_static! {
    static ref GCS_NAME_RE: Regex = Regex::new(r"GCS Name = ([^|]+)").unwrap();
    static ref DATUM_RE: Regex = Regex::new(r"Datum = ([^|]+)").unwrap();
    static ref ELLIPSOID_RE: Regex = Regex::new(r"Ellipsoid = ([^|]+)").unwrap();
    static ref PRIMEM_RE: Regex = Regex::new(r"Primem = ([^|]+)").unwrap();
}

/// Pulls a single captured field out of the citation text
fn scrape<'a>(re: &Regex, citation: &'a str) -> Option<&'a str> {
    re.captures(citation)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Renders the WKT form of a projected CRS
pub fn render(geo: &GeoCode) -> CogResult<String> {
    match geo.model_type {
        Some(ModelType::Projected) => {}
        Some(other) => {
            return Err(CogError::Unsupported(format!(
                "WKT output for the {} model",
                other.name()
            )))
        }
        None => {
            return Err(CogError::Unsupported(
                "WKT output without a model type".to_string(),
            ))
        }
    }

    let citation = geo
        .geog_citation
        .as_deref()
        .or(geo.citation.as_deref())
        .unwrap_or("");

    let gcs_name = scrape(&GCS_NAME_RE, citation)
        .or_else(|| geo.geographic_type.map(|g| g.name()))
        .unwrap_or("unnamed");
    let datum_name = scrape(&DATUM_RE, citation)
        .or_else(|| geo.geodetic_datum.map(|d| d.name()))
        .unwrap_or("unknown");
    let ellipsoid_name = scrape(&ELLIPSOID_RE, citation)
        .or_else(|| geo.ellipsoid.map(|e| e.name()))
        .unwrap_or("unknown");
    let primem_name = scrape(&PRIMEM_RE, citation)
        .or_else(|| geo.prime_meridian.map(|p| p.name()))
        .unwrap_or("Greenwich");

    let semi_major = geo.semi_major_axis.unwrap_or(0.0);
    let semi_minor = geo.semi_minor_axis.unwrap_or(0.0);
    // TODO: emit the inverse flattening a/(a-b) as the second SPHEROID
    // parameter instead of the raw axis difference.
    let sphere_radius = semi_major - semi_minor;

    let angular = match geo.angular_units {
        Some(AngularUnit::Radian) => "radian",
        _ => "degree",
    };
    let projection = geo
        .coord_transform
        .map(|t| t.name())
        .unwrap_or("unknown");
    let linear = geo.linear_units.map(|u| u.name()).unwrap_or("metre");

    let mut wkt = String::new();
    wkt.push_str(&format!(
        "PROJCS[\"unnamed\",GEOGCS[\"{}\",DATUM[\"{}\",SPHEROID[\"{}\",{},{}]],",
        gcs_name, datum_name, ellipsoid_name, semi_major, sphere_radius
    ));
    wkt.push_str(&format!(
        "PRIMEM[\"{}\",{}],UNIT[\"{}\",{}]],",
        primem_name,
        geo.prime_meridian_long.unwrap_or(0.0),
        angular,
        DEGREE_IN_RADIANS
    ));
    wkt.push_str(&format!(
        "PROJECTION[\"{}\"],PARAMETER[\"longitude_of_center\",{}],PARAMETER[\"false_easting\",{}],PARAMETER[\"false_northing\",{}],UNIT[\"{}\",1.0]]",
        projection,
        geo.center_long.unwrap_or(0.0),
        geo.false_easting.unwrap_or(0.0),
        geo.false_northing.unwrap_or(0.0),
        linear
    ));

    Ok(wkt)
}
