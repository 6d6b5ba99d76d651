//! HTML Writer Module
//! Turns a `MapCanvas` into a single Leaflet page.
//!
//! The canvas is embedded as JSON and drawn client-side:
//! - OpenStreetMap tiles
//! - one `L.featureGroup` per layer (circle markers or Font Awesome pins)
//! - gradient legends in the top-right corner
//! - `L.control.layers` when the toggle control was requested

use super::canvas::MapCanvas;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>__TITLE__</title>
  <!-- Leaflet 1.9.4 -->
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css" crossorigin="anonymous" />
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js" crossorigin="anonymous"></script>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css" crossorigin="anonymous" />
  <style>
    html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
    #map { position: absolute; top: 0; bottom: 0; left: 0; right: 0; }
    .map-pin {
      width: 26px; height: 26px; border-radius: 50% 50% 50% 0;
      transform: rotate(-45deg); border: 1px solid rgba(0, 0, 0, 0.35);
      display: flex; align-items: center; justify-content: center;
      box-shadow: 0 1px 3px rgba(0, 0, 0, 0.4);
    }
    .map-pin i { transform: rotate(45deg); font-size: 13px; }
    .map-legend {
      background: rgba(255, 255, 255, 0.9); padding: 6px 10px; border-radius: 4px;
      font: 12px/1.4 sans-serif; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.3);
    }
    .map-legend .bar { width: 220px; height: 10px; margin: 4px 0 2px; }
    .map-legend .ticks { display: flex; justify-content: space-between; }
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    const data = __DATA__;

    const map = L.map('map', { center: data.center, zoom: data.zoom });
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
      maxZoom: 19,
      attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);

    function pinIcon(marker) {
      return L.divIcon({
        className: 'pin-' + marker.bucket,
        html: '<div class="map-pin" style="background:' + marker.color + '">' +
              '<i class="fa fa-' + marker.icon + '" style="color:' + marker.icon_color + '"></i></div>',
        iconSize: [26, 26],
        iconAnchor: [13, 26],
        popupAnchor: [0, -24]
      });
    }

    const overlays = {};
    for (const layer of data.layers) {
      const group = L.featureGroup().addTo(map);
      for (const marker of layer.markers) {
        const latlng = [marker.lat, marker.lon];
        const drawn = marker.kind === 'point'
          ? L.circleMarker(latlng, {
              radius: marker.radius,
              color: marker.color,
              weight: 3,
              fill: true,
              fillColor: marker.color,
              fillOpacity: 0.2
            })
          : L.marker(latlng, { icon: pinIcon(marker) });
        drawn.bindPopup(marker.popup, { maxWidth: 300 }).addTo(group);
      }
      overlays[layer.name] = group;
    }

    for (const legend of data.legends) {
      const control = L.control({ position: 'topright' });
      control.onAdd = function () {
        const div = L.DomUtil.create('div', 'map-legend');
        const caption = document.createElement('div');
        caption.textContent = legend.caption;
        const bar = document.createElement('div');
        bar.className = 'bar';
        bar.style.background = 'linear-gradient(to right, ' + legend.colors.join(', ') + ')';
        const ticks = document.createElement('div');
        ticks.className = 'ticks';
        const steps = 4;
        for (let i = 0; i <= steps; i++) {
          const tick = document.createElement('span');
          tick.textContent = (legend.min + (legend.max - legend.min) * i / steps).toFixed(2);
          ticks.appendChild(tick);
        }
        div.appendChild(caption);
        div.appendChild(bar);
        div.appendChild(ticks);
        return div;
      };
      control.addTo(map);
    }

    if (data.layer_control) {
      L.control.layers(null, overlays, { collapsed: true }).addTo(map);
    }
  </script>
</body>
</html>
"#;

const TITLE: &str = "Indicadores Socioeconômicos por Bairro";

pub struct HtmlWriter;

impl HtmlWriter {
    /// Render the whole page.
    pub fn render(canvas: &MapCanvas) -> Result<String, serde_json::Error> {
        let data = serde_json::to_string(canvas)?;
        // `</script>` inside a popup must not close the data block
        let data = data.replace("</", "<\\/");
        Ok(TEMPLATE
            .replace("__TITLE__", &escape_html(TITLE))
            .replace("__DATA__", &data))
    }
}

/// Escape text interpolated into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::palette::ColorBucket;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Lapa" & 'Glória'</b>"#),
            "&lt;b&gt;&quot;Lapa&quot; &amp; &#39;Glória&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Copacabana"), "Copacabana");
    }

    #[test]
    fn page_embeds_layers_and_controls() {
        let mut canvas = MapCanvas::new(-22.9, -43.2, 11);
        let layer = canvas.add_layer("IDH dos Bairros");
        canvas
            .add_point_marker(layer, -22.9, -43.2, ColorBucket::High, 12.5, "<b>Bairro:</b> Centro".into())
            .unwrap();
        canvas.add_color_legend(1.0, 4.0, "Nível Médio de Educação (IDE)");
        canvas.add_layer_toggle_control();

        let html = HtmlWriter::render(&canvas).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("leaflet.js"));
        assert!(html.contains("\"IDH dos Bairros\""));
        assert!(html.contains("\"layer_control\":true"));
        assert!(html.contains("Nível Médio de Educação (IDE)"));
        assert!(!html.contains("__DATA__"));
    }

    #[test]
    fn popup_cannot_close_the_script_block() {
        let mut canvas = MapCanvas::new(0.0, 0.0, 11);
        let layer = canvas.add_layer("x");
        canvas
            .add_point_marker(layer, 0.0, 0.0, ColorBucket::Low, 5.0, "</script><script>".into())
            .unwrap();
        let html = HtmlWriter::render(&canvas).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
