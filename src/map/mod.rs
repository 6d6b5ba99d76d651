//! Map module - interactive map model and HTML output

mod canvas;
mod html;

pub use canvas::{ColorLegend, Layer, LayerHandle, MapCanvas, Marker, RenderError};
pub use html::{escape_html, HtmlWriter};
