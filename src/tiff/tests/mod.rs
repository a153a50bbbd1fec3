//! Unit tests for the COG decoder

mod test_utils;

mod pipeline_tests;
mod wkt_tests;
