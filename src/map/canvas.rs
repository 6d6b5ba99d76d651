//! Map Canvas Module
//! In-memory model of the interactive map: named layers of markers, legends
//! and the layer toggle. Serialized once at the end of a run.

use crate::indicators::palette::{ColorBucket, RD_YL_GN_9};
use super::html::HtmlWriter;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write map: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode map data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown layer handle {0}")]
    UnknownLayer(usize),
}

/// Index of a layer inside its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerHandle(usize);

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    /// Filled circle sized in pixels.
    Point {
        lat: f64,
        lon: f64,
        color: String,
        bucket: String,
        radius: f64,
        popup: String,
    },
    /// Pin with a Font Awesome glyph.
    Icon {
        lat: f64,
        lon: f64,
        color: String,
        bucket: String,
        icon: String,
        icon_color: String,
        popup: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Layer {
    pub name: String,
    pub markers: Vec<Marker>,
}

/// Continuous color legend.
#[derive(Debug, Clone, Serialize)]
pub struct ColorLegend {
    pub min: f64,
    pub max: f64,
    pub caption: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapCanvas {
    pub center: [f64; 2],
    pub zoom: u8,
    pub layers: Vec<Layer>,
    pub legends: Vec<ColorLegend>,
    pub layer_control: bool,
}

impl MapCanvas {
    pub fn new(center_lat: f64, center_lon: f64, zoom: u8) -> Self {
        Self {
            center: [center_lat, center_lon],
            zoom,
            layers: Vec::new(),
            legends: Vec::new(),
            layer_control: false,
        }
    }

    /// Add an empty, toggleable layer.
    pub fn add_layer(&mut self, name: &str) -> LayerHandle {
        self.layers.push(Layer {
            name: name.to_string(),
            markers: Vec::new(),
        });
        LayerHandle(self.layers.len() - 1)
    }

    pub fn layer(&self, handle: LayerHandle) -> Option<&Layer> {
        self.layers.get(handle.0)
    }

    fn layer_mut(&mut self, handle: LayerHandle) -> Result<&mut Layer, RenderError> {
        self.layers
            .get_mut(handle.0)
            .ok_or(RenderError::UnknownLayer(handle.0))
    }

    pub fn add_point_marker(
        &mut self,
        layer: LayerHandle,
        lat: f64,
        lon: f64,
        color: ColorBucket,
        radius: f64,
        popup_html: String,
    ) -> Result<(), RenderError> {
        self.layer_mut(layer)?.markers.push(Marker::Point {
            lat,
            lon,
            color: color.hex().to_string(),
            bucket: color.name().to_string(),
            radius,
            popup: popup_html,
        });
        Ok(())
    }

    pub fn add_icon_marker(
        &mut self,
        layer: LayerHandle,
        lat: f64,
        lon: f64,
        color: ColorBucket,
        icon: &str,
        icon_color: &str,
        popup_html: String,
    ) -> Result<(), RenderError> {
        self.layer_mut(layer)?.markers.push(Marker::Icon {
            lat,
            lon,
            color: color.hex().to_string(),
            bucket: color.name().to_string(),
            icon: icon.to_string(),
            icon_color: icon_color.to_string(),
            popup: popup_html,
        });
        Ok(())
    }

    /// Gradient legend over `[domain_min, domain_max]`.
    pub fn add_color_legend(&mut self, domain_min: f64, domain_max: f64, caption: &str) {
        self.legends.push(ColorLegend {
            min: domain_min,
            max: domain_max,
            caption: caption.to_string(),
            colors: RD_YL_GN_9.iter().map(|c| c.to_string()).collect(),
        });
    }

    pub fn add_layer_toggle_control(&mut self) {
        self.layer_control = true;
    }

    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.markers.len()).sum()
    }

    /// Write the map as a single HTML page.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let html = HtmlWriter::render(self)?;
        fs::write(path, html)?;
        Ok(())
    }
}
