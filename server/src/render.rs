//! Self-contained HTML document: Leaflet map, mode toggle and legend.
//!
//! The page carries the boundary collection and the precomputed region views
//! for both display modes. Switching modes in the browser only swaps between
//! those views.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use langmap_shared::{DisplayMode, FeatureCollection, Language, MapModel, ModeViews, RegionStyle};
use serde::Serialize;

const MAP_CENTER: [f64; 2] = [23.5, 121.0];
const MAP_ZOOM: f64 = 7.5;

#[derive(Serialize)]
struct DocumentData<'a> {
    boundaries: &'a FeatureCollection,
    highlight: &'a RegionStyle,
    views: &'a ModeViews,
    center: [f64; 2],
    zoom: f64,
    initial_mode: &'static str,
}

pub fn render_document(
    boundaries: &FeatureCollection,
    model: &MapModel,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let data = DocumentData {
        boundaries,
        highlight: &model.highlight,
        views: &model.views,
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        initial_mode: DisplayMode::default().key(),
    };
    let json = script_safe_json(&serde_json::to_string(&data)?);

    Ok(TEMPLATE
        .replace("__GENERATED_AT__", &generated_at.to_rfc3339())
        .replace("__TOGGLE__", &toggle_html())
        .replace("__LEGEND__", &legend_html())
        .replace("__MAP_DATA__", &json))
}

/// JSON that cannot close the surrounding `<script>` element. `<`, `>` and
/// `&` only occur inside JSON strings, where `\uXXXX` escapes are equivalent.
fn script_safe_json(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

fn toggle_html() -> String {
    let mut html = String::new();
    for mode in DisplayMode::ALL {
        let checked = if mode == DisplayMode::default() {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<label><input type=\"radio\" name=\"language_mode\" value=\"{key}\"{checked}>\
             <span>{label}</span></label>",
            key = mode.key(),
            label = mode.label(),
        );
    }
    html
}

fn legend_html() -> String {
    let mut html = String::new();
    for language in Language::ALL {
        let _ = write!(
            html,
            "<div class=\"legend-row\"><span class=\"swatch\" style=\"background-color: {color};\"></span>\
             <span>{label}</span></div>",
            color = language.color_hex(),
            label = language.label(),
        );
    }
    html
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="generated-at" content="__GENERATED_AT__">
<title>台澎金馬語言分布地圖</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  html, body, #map { height: 100%; margin: 0; }
  .panel { position: fixed; z-index: 1000; background-color: white; font-family: Arial, sans-serif; }
  #language-toggle { top: 10px; right: 10px; border: 2px solid #ccc; border-radius: 8px; padding: 15px; box-shadow: 0 2px 10px rgba(0,0,0,0.3); }
  #language-toggle .title { font-weight: bold; margin-bottom: 12px; color: #333; font-size: 14px; }
  #language-toggle label { display: block; margin-bottom: 10px; cursor: pointer; font-size: 13px; color: #333; }
  #language-toggle input { margin-right: 8px; transform: scale(1.2); }
  #legend { bottom: 50px; right: 50px; border: 2px solid grey; font-size: 14px; padding: 10px; opacity: 0.9; }
  #legend p { margin: 5px 0; }
  #legend .source { margin: 3px 0; font-size: 11px; color: #666; }
  #legend .legend-row { margin: 5px 0; }
  #legend .swatch { display: inline-block; width: 20px; height: 20px; border: 1px solid black; vertical-align: middle; margin-right: 5px; }
  #legend .usage { font-size: 12px; margin-top: 5px; color: #666; }
</style>
</head>
<body>
<div id="map"></div>
<div id="language-toggle" class="panel">
  <div class="title">語言顯示模式</div>
  __TOGGLE__
</div>
<div id="legend" class="panel">
  <p><b>台澎金馬語言分布地圖</b></p>
  <p class="source">(基於人口普查真實數據)</p>
  <p><b>顏色代表主要使用語言：</b></p>
  __LEGEND__
  <hr style="margin: 10px 0;">
  <p><b>使用說明：</b></p>
  <div class="usage">
    1. 右上角可切換是否包含華語<br>
    2. 點擊區域查看詳細語言比例<br>
    3. 部分縣市有額外備註說明<br>
    4. 數據為主要+次要使用之和
  </div>
</div>
<script type="application/json" id="langmap-data">__MAP_DATA__</script>
<script>
(function () {
  var data = JSON.parse(document.getElementById('langmap-data').textContent);
  var map = L.map('map', { zoomSnap: 0.5 }).setView(data.center, data.zoom);
  L.tileLayer('https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png', {
    attribution: '&copy; OpenStreetMap contributors &copy; CARTO',
    subdomains: 'abcd',
    maxZoom: 20
  }).addTo(map);

  var current = null;

  function show(mode) {
    if (current) {
      map.removeLayer(current);
    }
    var views = data.views[mode];
    current = L.featureGroup();
    data.boundaries.features.forEach(function (feature, i) {
      var view = views[i];
      L.geoJSON(feature, {
        style: view.style,
        onEachFeature: function (_, layer) {
          layer.bindPopup(view.popup, { maxWidth: 300 });
          layer.on('mouseover', function () { this.setStyle(data.highlight); });
          layer.on('mouseout', function () { this.setStyle(view.style); });
        }
      }).addTo(current);
    });
    current.addTo(map);
  }

  show(data.initial_mode);
  document.querySelectorAll('input[name="language_mode"]').forEach(function (radio) {
    radio.addEventListener('change', function () { show(this.value); });
  });
})();
</script>
</body>
</html>
"#;
