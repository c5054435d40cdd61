//! Readers for boundary and results files, writers for the styled map.
//!
//! # Formats
//!
//! - `geojson` - FeatureCollection boundaries in, styled FeatureCollection out
//! - `shp` - ESRI shapefiles, plain or zipped (requires `files` feature)
//! - `csv` - results tables (requires `files` feature)
//! - `json` - results tables as an array of row objects
//! - `svg` - static rendering of the current view

mod geojson;
mod json;
mod svg;

#[cfg(feature = "files")]
mod csv;
#[cfg(feature = "files")]
mod shp;

pub use geojson::{features_from_geojson, features_from_geojson_str, session_to_geojson};
pub use json::{records_from_json, records_from_json_str};
pub use svg::{render_svg, SvgOptions};

#[cfg(feature = "files")]
pub use csv::records_from_csv_str;
#[cfg(feature = "files")]
pub use geojson::write_geojson;
#[cfg(feature = "files")]
pub use svg::write_svg;

#[cfg(feature = "files")]
mod files {
    use std::path::{Path, PathBuf};

    use anyhow::{bail, Context, Result};

    use crate::common::has_extension;
    use crate::election::ElectionRecord;
    use crate::map::GeoFeature;

    /// Read boundary features from `.geojson`/`.json`, `.shp` or a zipped shapefile.
    pub fn read_features(path: &Path) -> Result<Vec<GeoFeature>> {
        if has_extension(path, "zip") || has_extension(path, "shp") {
            super::shp::read_shapefile_features(path)
        } else if has_extension(path, "geojson") || has_extension(path, "json") {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("[io] Failed to read {}", path.display()))?;
            super::features_from_geojson_str(&text)
                .with_context(|| format!("[io] Invalid GeoJSON in {}", path.display()))
        } else {
            bail!("[io] Unsupported boundary file: {}", path.display())
        }
    }

    /// Read a results table from `.csv` or `.json`.
    pub fn read_records(path: &Path) -> Result<Vec<ElectionRecord>> {
        if has_extension(path, "csv") {
            super::csv::read_records_csv(path)
        } else if has_extension(path, "json") {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("[io] Failed to read {}", path.display()))?;
            super::records_from_json_str(&text)
                .with_context(|| format!("[io] Invalid records in {}", path.display()))
        } else {
            bail!("[io] Unsupported results file: {}", path.display())
        }
    }

    /// [`read_features`] on the blocking thread pool.
    pub async fn read_features_async(path: PathBuf) -> Result<Vec<GeoFeature>> {
        tokio::task::spawn_blocking(move || read_features(&path))
            .await
            .context("[io] Boundary reader task failed")?
    }

    /// [`read_records`] on the blocking thread pool.
    pub async fn read_records_async(path: PathBuf) -> Result<Vec<ElectionRecord>> {
        tokio::task::spawn_blocking(move || read_records(&path))
            .await
            .context("[io] Results reader task failed")?
    }
}

#[cfg(feature = "files")]
pub use files::*;
