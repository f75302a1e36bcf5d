//! Geospatial classification report export.
//!
//! Serializes aggregated classification results into a KML document with a
//! single point placemark at the analyzed coordinate. The embedded
//! description lists the source image, generation timestamp, and one line
//! per land-cover class with its color swatch.
//!
//! Reports are created once per export request, serialized immediately,
//! and not retained afterward.

use crate::classify::{ClassCounts, ClassPalette};
use crate::coord::GeoCoordinate;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while exporting a report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the report file failed
    #[error("Failed to write report to '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// A point-annotated classification report ready for serialization.
#[derive(Debug, Clone)]
pub struct GeoReport {
    coordinate: GeoCoordinate,
    timestamp: DateTime<Local>,
    source_name: String,
    counts: ClassCounts,
    palette: ClassPalette,
    attribution: Option<String>,
}

impl GeoReport {
    /// Creates a report stamped with the current local time.
    pub fn new(
        coordinate: GeoCoordinate,
        source_name: impl Into<String>,
        counts: ClassCounts,
        palette: ClassPalette,
    ) -> Self {
        Self {
            coordinate,
            timestamp: Local::now(),
            source_name: source_name.into(),
            counts,
            palette,
            attribution: None,
        }
    }

    /// Attaches imagery attribution text, included informationally in the
    /// report description.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// The analyzed coordinate.
    pub fn coordinate(&self) -> GeoCoordinate {
        self.coordinate
    }

    /// The aggregated per-class counts.
    pub fn counts(&self) -> &ClassCounts {
        &self.counts
    }

    /// Serializes the report as a KML document.
    ///
    /// The placemark coordinates follow the KML convention of
    /// `longitude,latitude,0` — deliberately reversed from the
    /// latitude-first input pair. Class names missing from the palette
    /// render a neutral gray swatch rather than failing the export.
    pub fn to_kml(&self) -> String {
        let lat = self.coordinate.latitude();
        let lon = self.coordinate.longitude();

        let mut kml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Satellite Image Classification</name>
    <description>Land cover classification results</description>
    <Style id="style_0">
      <IconStyle>
        <Icon>
          <href>http://maps.google.com/mapfiles/kml/paddle/1.png</href>
        </Icon>
      </IconStyle>
    </Style>
    <Placemark>
      <name>Classification Location</name>
      <description>
        <![CDATA[
        <h3>Satellite Image Classification</h3>
        <p><b>Location:</b> {lat}, {lon}</p>
        <p><b>Date:</b> {date}</p>
        <p><b>Image:</b> {image}</p>
        <h4>Classification Results:</h4>
        <ul>
"#,
            lat = lat,
            lon = lon,
            date = self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            image = self.source_name,
        );

        for (name, count) in self.counts.iter() {
            let swatch = self.palette.hex_swatch(name);
            let _ = writeln!(
                kml,
                r#"          <li><span style="color:{}">■</span> {}: {} grids</li>"#,
                swatch, name, count
            );
        }

        kml.push_str("        </ul>\n");

        if let Some(attribution) = &self.attribution {
            let _ = writeln!(kml, "        <p><i>{}</i></p>", attribution);
        }

        let _ = write!(
            kml,
            r#"        ]]>
      </description>
      <Point>
        <coordinates>{lon},{lat},0</coordinates>
      </Point>
    </Placemark>
  </Document>
</kml>"#,
            lon = lon,
            lat = lat,
        );

        kml
    }

    /// Writes the KML document to the given path.
    ///
    /// I/O failures are fatal to the export and surfaced to the caller.
    pub fn write_kml(&self, path: &Path) -> Result<(), ExportError> {
        let kml = self.to_kml();
        std::fs::write(path, kml).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

        info!(
            path = %path.display(),
            classes = self.counts.len(),
            total = self.counts.total(),
            "Report exported"
        );
        Ok(())
    }
}
