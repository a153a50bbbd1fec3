//! GeoKey sub-directory interpretation
//!
//! GeoTIFF stores its CRS description inside three ordinary TIFF tags: a
//! u16 key directory (tag 34735), a table of doubles (34736) and an ASCII
//! blob (34737). Each key in the directory names where its value lives via
//! a location word: 0 means the value is the entry's own offset word,
//! 34736 indexes the double table, 34737 slices the ASCII blob. This module
//! resolves the full key set into a typed [`GeoCode`] record.

use log::debug;

use crate::tiff::constants::{geo_keys, tags};
use crate::tiff::errors::{CogError, CogResult};

/// A raw entry of the GeoKey directory
#[derive(Debug, Clone, Copy)]
pub struct GeoKeyEntry {
    pub key_id: u16,
    pub tiff_tag_location: u16,
    pub count: u16,
    pub value_offset: u16,
}

/// Where a GeoKey's value is stored
///
/// Derived once from the entry's location word so the per-key handling
/// does not branch on magic tag numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyValue {
    /// The value is the offset word itself (used by enumerated keys)
    Inline(u16),
    /// The value is an index into the double-params table
    DoubleIdx(u16),
    /// The value is a substring of the ASCII-params blob
    AsciiSlice { offset: u16, len: u16 },
}

impl GeoKeyEntry {
    /// Classifies the entry's storage location
    pub fn classify(&self) -> CogResult<KeyValue> {
        match self.tiff_tag_location {
            0 => Ok(KeyValue::Inline(self.value_offset)),
            tags::GEO_DOUBLE_PARAMS => Ok(KeyValue::DoubleIdx(self.value_offset)),
            tags::GEO_ASCII_PARAMS => Ok(KeyValue::AsciiSlice {
                offset: self.value_offset,
                len: self.count,
            }),
            other => Err(CogError::Format(format!(
                "GeoKey {} stored in unknown tag {}",
                self.key_id, other
            ))),
        }
    }

    /// The entry's value as an enumeration code (inline storage required)
    pub fn code_value(&self) -> CogResult<u16> {
        match self.classify()? {
            KeyValue::Inline(code) => Ok(code),
            _ => Err(CogError::Format(format!(
                "GeoKey {} must carry its value inline",
                self.key_id
            ))),
        }
    }

    /// The entry's value from the double-params table
    pub fn double_value(&self, d_params: &[f64]) -> CogResult<f64> {
        match self.classify()? {
            KeyValue::DoubleIdx(idx) => {
                d_params.get(idx as usize).copied().ok_or_else(|| {
                    CogError::Format(format!(
                        "GeoKey {} indexes double parameter {} of {}",
                        self.key_id,
                        idx,
                        d_params.len()
                    ))
                })
            }
            _ => Err(CogError::Format(format!(
                "GeoKey {} must reference the double-params table",
                self.key_id
            ))),
        }
    }

    /// The entry's value as a slice of the ASCII-params blob
    pub fn ascii_value(&self, a_params: &str) -> CogResult<String> {
        match self.classify()? {
            KeyValue::AsciiSlice { offset, len } => {
                let start = offset as usize;
                let end = start + len as usize;
                a_params
                    .get(start..end)
                    .map(|s| s.to_string())
                    .ok_or_else(|| {
                        CogError::Format(format!(
                            "GeoKey {} slices ASCII parameters {}..{} of {}",
                            self.key_id,
                            start,
                            end,
                            a_params.len()
                        ))
                    })
            }
            _ => Err(CogError::Format(format!(
                "GeoKey {} must reference the ASCII-params table",
                self.key_id
            ))),
        }
    }
}

fn unknown_code(key_name: &str, code: u16) -> CogError {
    CogError::Format(format!("unknown {} code {}", key_name, code))
}

/// GTModelTypeGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    Projected,
    Geographic,
    Geocentric,
}

impl ModelType {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            1 => Ok(ModelType::Projected),
            2 => Ok(ModelType::Geographic),
            3 => Ok(ModelType::Geocentric),
            _ => Err(unknown_code("model type", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelType::Projected => "Projected",
            ModelType::Geographic => "Geographic",
            ModelType::Geocentric => "Geocentric",
        }
    }
}

/// GTRasterTypeGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterType {
    PixelIsArea,
    PixelIsPoint,
}

impl RasterType {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            1 => Ok(RasterType::PixelIsArea),
            2 => Ok(RasterType::PixelIsPoint),
            _ => Err(unknown_code("raster type", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RasterType::PixelIsArea => "PixelIsArea",
            RasterType::PixelIsPoint => "PixelIsPoint",
        }
    }
}

/// GeographicTypeGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeographicCs {
    Wgs84,
    UserDefined,
}

impl GeographicCs {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            4326 => Ok(GeographicCs::Wgs84),
            geo_keys::USER_DEFINED => Ok(GeographicCs::UserDefined),
            _ => Err(unknown_code("geographic CS", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeographicCs::Wgs84 => "WGS_84",
            GeographicCs::UserDefined => "user-defined",
        }
    }
}

/// GeogGeodeticDatumGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeodeticDatum {
    Wgs84,
    UserDefined,
}

impl GeodeticDatum {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            6326 => Ok(GeodeticDatum::Wgs84),
            geo_keys::USER_DEFINED => Ok(GeodeticDatum::UserDefined),
            _ => Err(unknown_code("geodetic datum", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeodeticDatum::Wgs84 => "WGS_84",
            GeodeticDatum::UserDefined => "user-defined",
        }
    }
}

/// GeogPrimeMeridianGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeMeridian {
    Greenwich,
    UserDefined,
}

impl PrimeMeridian {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            8901 => Ok(PrimeMeridian::Greenwich),
            geo_keys::USER_DEFINED => Ok(PrimeMeridian::UserDefined),
            _ => Err(unknown_code("prime meridian", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimeMeridian::Greenwich => "Greenwich",
            PrimeMeridian::UserDefined => "user-defined",
        }
    }
}

/// GeogAngularUnitsGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularUnit {
    Radian,
    Degree,
}

impl AngularUnit {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            9101 => Ok(AngularUnit::Radian),
            9102 => Ok(AngularUnit::Degree),
            _ => Err(unknown_code("angular unit", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AngularUnit::Radian => "radian",
            AngularUnit::Degree => "degree",
        }
    }
}

/// GeogEllipsoidGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ellipsoid {
    Wgs84,
    Sphere,
    UserDefined,
}

impl Ellipsoid {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            7030 => Ok(Ellipsoid::Wgs84),
            7035 => Ok(Ellipsoid::Sphere),
            geo_keys::USER_DEFINED => Ok(Ellipsoid::UserDefined),
            _ => Err(unknown_code("ellipsoid", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ellipsoid::Wgs84 => "WGS_84",
            Ellipsoid::Sphere => "Sphere",
            Ellipsoid::UserDefined => "user-defined",
        }
    }
}

/// ProjectedCSTypeGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectedCs {
    WebMercator,
    Wgs84UtmZone1N,
    Wgs84UtmZone33N,
    UserDefined,
}

impl ProjectedCs {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            3857 => Ok(ProjectedCs::WebMercator),
            32601 => Ok(ProjectedCs::Wgs84UtmZone1N),
            32633 => Ok(ProjectedCs::Wgs84UtmZone33N),
            geo_keys::USER_DEFINED => Ok(ProjectedCs::UserDefined),
            _ => Err(unknown_code("projected CS", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProjectedCs::WebMercator => "EPSG:3857",
            ProjectedCs::Wgs84UtmZone1N => "WGS84_UTM_zone_1N",
            ProjectedCs::Wgs84UtmZone33N => "WGS84_UTM_zone_33N",
            ProjectedCs::UserDefined => "user-defined",
        }
    }
}

/// ProjectionGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    UserDefined,
}

impl Projection {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            geo_keys::USER_DEFINED => Ok(Projection::UserDefined),
            _ => Err(unknown_code("projection", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        "user-defined"
    }
}

/// ProjCoordTransGeoKey values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordTransform {
    TransverseMercator,
    AlbersEqualArea,
    Sinusoidal,
}

impl CoordTransform {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            1 => Ok(CoordTransform::TransverseMercator),
            11 => Ok(CoordTransform::AlbersEqualArea),
            24 => Ok(CoordTransform::Sinusoidal),
            _ => Err(unknown_code("coordinate transformation", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CoordTransform::TransverseMercator => "TransverseMercator",
            CoordTransform::AlbersEqualArea => "AlbersEqualArea",
            CoordTransform::Sinusoidal => "Sinusoidal",
        }
    }
}

/// Linear unit values (GeogLinearUnitsGeoKey / ProjLinearUnitsGeoKey)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinearUnit {
    Metre,
}

impl LinearUnit {
    pub fn from_code(code: u16) -> CogResult<Self> {
        match code {
            9001 => Ok(LinearUnit::Metre),
            _ => Err(unknown_code("linear unit", code)),
        }
    }

    pub fn name(&self) -> &'static str {
        "metre"
    }
}

/// Flat record of the CRS parameters of a COG file
///
/// Fields fall into three groups: enumerated codes resolved to typed
/// labels, free-text citations sliced out of the ASCII parameters, and
/// numeric parameters indirected through the double-params table.
#[derive(Debug, Clone, Default)]
pub struct GeoCode {
    pub model_type: Option<ModelType>,
    pub raster_type: Option<RasterType>,
    pub citation: Option<String>,
    pub geographic_type: Option<GeographicCs>,
    pub geog_citation: Option<String>,
    pub geodetic_datum: Option<GeodeticDatum>,
    pub prime_meridian: Option<PrimeMeridian>,
    pub geog_linear_units: Option<LinearUnit>,
    pub angular_units: Option<AngularUnit>,
    pub ellipsoid: Option<Ellipsoid>,
    pub semi_major_axis: Option<f64>,
    pub semi_minor_axis: Option<f64>,
    pub prime_meridian_long: Option<f64>,
    pub projected_cs: Option<ProjectedCs>,
    pub projection: Option<Projection>,
    pub coord_transform: Option<CoordTransform>,
    pub linear_units: Option<LinearUnit>,
    pub false_easting: Option<f64>,
    pub false_northing: Option<f64>,
    pub center_long: Option<f64>,
}

impl GeoCode {
    /// Interprets a GeoKey directory with its companion parameter tables
    ///
    /// `directory` is the raw u16 sequence of tag 34735. The four-word
    /// header must announce directory version 1; `directory[3]` gives the
    /// number of key entries that follow, four words each.
    pub fn from_directory(
        directory: &[u16],
        d_params: &[f64],
        a_params: &str,
    ) -> CogResult<GeoCode> {
        if directory.len() < 4 {
            return Err(CogError::Format(format!(
                "GeoKey directory of {} words is shorter than its header",
                directory.len()
            )));
        }
        if directory[0] != 1 {
            return Err(CogError::Format(format!(
                "GeoKey directory version {}",
                directory[0]
            )));
        }
        let num_keys = directory[3] as usize;
        if directory.len() < 4 + 4 * num_keys {
            return Err(CogError::Format(format!(
                "GeoKey directory announces {} keys but holds {} words",
                num_keys,
                directory.len()
            )));
        }

        let mut geo = GeoCode::default();
        for chunk in directory[4..4 + 4 * num_keys].chunks_exact(4) {
            let entry = GeoKeyEntry {
                key_id: chunk[0],
                tiff_tag_location: chunk[1],
                count: chunk[2],
                value_offset: chunk[3],
            };
            geo.apply(entry, d_params, a_params)?;
        }
        Ok(geo)
    }

    /// Resolves one key entry into the matching field
    fn apply(&mut self, entry: GeoKeyEntry, d_params: &[f64], a_params: &str) -> CogResult<()> {
        match entry.key_id {
            geo_keys::MODEL_TYPE => {
                self.model_type = Some(ModelType::from_code(entry.code_value()?)?);
            }
            geo_keys::RASTER_TYPE => {
                self.raster_type = Some(RasterType::from_code(entry.code_value()?)?);
            }
            geo_keys::CITATION => {
                self.citation = Some(entry.ascii_value(a_params)?);
            }
            geo_keys::GEOGRAPHIC_TYPE => {
                self.geographic_type = Some(GeographicCs::from_code(entry.code_value()?)?);
            }
            geo_keys::GEOG_CITATION => {
                self.geog_citation = Some(entry.ascii_value(a_params)?);
            }
            geo_keys::GEOG_GEODETIC_DATUM => {
                self.geodetic_datum = Some(GeodeticDatum::from_code(entry.code_value()?)?);
            }
            geo_keys::GEOG_PRIME_MERIDIAN => {
                self.prime_meridian = Some(PrimeMeridian::from_code(entry.code_value()?)?);
            }
            geo_keys::GEOG_LINEAR_UNITS => {
                self.geog_linear_units = Some(LinearUnit::from_code(entry.code_value()?)?);
            }
            geo_keys::GEOG_ANGULAR_UNITS => {
                self.angular_units = Some(AngularUnit::from_code(entry.code_value()?)?);
            }
            geo_keys::GEOG_ELLIPSOID => {
                self.ellipsoid = Some(Ellipsoid::from_code(entry.code_value()?)?);
            }
            geo_keys::GEOG_SEMI_MAJOR_AXIS => {
                self.semi_major_axis = Some(entry.double_value(d_params)?);
            }
            geo_keys::GEOG_SEMI_MINOR_AXIS => {
                self.semi_minor_axis = Some(entry.double_value(d_params)?);
            }
            geo_keys::GEOG_PRIME_MERIDIAN_LONG => {
                self.prime_meridian_long = Some(entry.double_value(d_params)?);
            }
            geo_keys::PROJECTED_CS_TYPE => {
                self.projected_cs = Some(ProjectedCs::from_code(entry.code_value()?)?);
            }
            geo_keys::PROJECTION => {
                self.projection = Some(Projection::from_code(entry.code_value()?)?);
            }
            geo_keys::PROJ_COORD_TRANS => {
                self.coord_transform = Some(CoordTransform::from_code(entry.code_value()?)?);
            }
            geo_keys::PROJ_LINEAR_UNITS => {
                self.linear_units = Some(LinearUnit::from_code(entry.code_value()?)?);
            }
            geo_keys::PROJ_FALSE_EASTING => {
                self.false_easting = Some(entry.double_value(d_params)?);
            }
            geo_keys::PROJ_FALSE_NORTHING => {
                self.false_northing = Some(entry.double_value(d_params)?);
            }
            geo_keys::PROJ_CENTER_LONG => {
                self.center_long = Some(entry.double_value(d_params)?);
            }
            other => {
                debug!("skipping unrecognized GeoKey {}", other);
            }
        }
        Ok(())
    }
}
