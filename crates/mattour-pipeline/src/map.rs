//! Kakao map markers and the standalone map page.
//!
//! Provider text only ever reaches the page as JSON data (with `<`, `>` and
//! `&` escaped) and is rendered with `textContent`, never as markup.

use mattour_core::{CleanedRestaurantRecord, Coordinate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// Number of restaurants placed on the map.
pub const MAP_MARKER_LIMIT: usize = 10;

/// Same set `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub search_key: String,
    /// Kakao Map search link for `search_key`.
    pub kakao_url: String,
}

impl From<&CleanedRestaurantRecord> for MapMarker {
    fn from(r: &CleanedRestaurantRecord) -> Self {
        let search_key = r.search_key();
        Self {
            name: r.name.clone(),
            address: r.address.clone(),
            phone: r.phone.clone(),
            lat: r.coordinate.lat,
            lng: r.coordinate.lng,
            kakao_url: kakao_search_url(&search_key),
            search_key,
        }
    }
}

#[must_use]
pub fn kakao_search_url(search_key: &str) -> String {
    format!(
        "https://map.kakao.com/?q={}",
        utf8_percent_encode(search_key, URI_COMPONENT)
    )
}

/// Markers for the top [`MAP_MARKER_LIMIT`] records, in rank order.
#[must_use]
pub fn markers(records: &[CleanedRestaurantRecord]) -> Vec<MapMarker> {
    records
        .iter()
        .take(MAP_MARKER_LIMIT)
        .map(MapMarker::from)
        .collect()
}

/// JSON safe to embed inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_owned())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

/// Self-contained HTML page showing `markers` around `center`.
#[must_use]
pub fn render_map_html(center: Coordinate, markers: &[MapMarker], app_key: &str) -> String {
    let app_key = utf8_percent_encode(app_key, URI_COMPONENT);
    let center_json = script_json(&center);
    let markers_json = script_json(&markers);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <script src="https://dapi.kakao.com/v2/maps/sdk.js?appkey={app_key}"></script>
</head>
<body>
  <div id="map" style="width:100%; height:500px;"></div>
  <script>
    var center = {center_json};
    var places = {markers_json};
    var map = new kakao.maps.Map(document.getElementById('map'), {{
      center: new kakao.maps.LatLng(center.lat, center.lng),
      level: 4
    }});
    places.forEach(function (p) {{
      var marker = new kakao.maps.Marker({{
        map: map,
        position: new kakao.maps.LatLng(p.lat, p.lng)
      }});
      var box = document.createElement('div');
      box.style.padding = '5px';
      box.style.fontSize = '13px';
      var title = document.createElement('div');
      title.textContent = p.name;
      var addr = document.createElement('div');
      addr.textContent = p.address;
      box.appendChild(title);
      box.appendChild(addr);
      new kakao.maps.InfoWindow({{ content: box }}).open(map, marker);
      kakao.maps.event.addListener(marker, 'click', function () {{
        window.open(p.kakao_url, '_blank');
      }});
    }});
  </script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, phone: Option<&str>) -> CleanedRestaurantRecord {
        CleanedRestaurantRecord {
            name: name.to_owned(),
            address: "제주시 항골남길 46".to_owned(),
            rating: 4.5,
            coordinate: Coordinate::new(33.5, 126.5),
            phone: phone.map(str::to_owned),
            google_place_id: "g".to_owned(),
            kakao_place_id: None,
            photo_refs: Vec::new(),
        }
    }

    #[test]
    fn kakao_url_encodes_like_encode_uri_component() {
        assert_eq!(
            kakao_search_url("064-746-2222"),
            "https://map.kakao.com/?q=064-746-2222"
        );
        assert_eq!(
            kakao_search_url("제주 국수"),
            "https://map.kakao.com/?q=%EC%A0%9C%EC%A3%BC%20%EA%B5%AD%EC%88%98"
        );
    }

    #[test]
    fn marker_search_key_uses_phone_or_address_name() {
        let with_phone = MapMarker::from(&record("자매국수", Some("064-746-2222")));
        assert_eq!(with_phone.search_key, "064-746-2222");
        let without = MapMarker::from(&record("자매국수", None));
        assert_eq!(without.search_key, "제주시 항골남길 46 자매국수");
    }

    #[test]
    fn markers_are_capped_at_ten() {
        let records: Vec<_> = (0..12).map(|i| record(&format!("r{i}"), None)).collect();
        let out = markers(&records);
        assert_eq!(out.len(), MAP_MARKER_LIMIT);
        assert_eq!(out[0].name, "r0");
    }

    #[test]
    fn provider_text_cannot_break_out_of_script() {
        let evil = record("</script><script>alert(1)</script>", None);
        let html = render_map_html(Coordinate::new(33.5, 126.5), &markers(&[evil]), "key");
        assert_eq!(html.matches("</script>").count(), 2, "only the page's own closing tags");
        assert!(html.contains("\\u003c/script\\u003e"));
    }

    #[test]
    fn app_key_is_percent_encoded() {
        let html = render_map_html(Coordinate::new(0.0, 0.0), &[], "a\"b");
        assert!(html.contains("appkey=a%22b"));
    }
}
