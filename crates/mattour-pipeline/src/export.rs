//! CSV export of the ranked restaurant table.

use std::io::Write;

use mattour_core::CleanedRestaurantRecord;
use serde::Serialize;

use crate::error::PipelineError;

/// Written in the phone column when no number is known.
pub const NO_PHONE: &str = "없음";

/// Column names, in the order [`CsvRow`] serializes its fields.
pub const CSV_HEADER: [&str; 8] = [
    "name",
    "address",
    "rating",
    "latitude",
    "longitude",
    "phone",
    "kakao_place_id",
    "google_place_id",
];

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    address: &'a str,
    rating: f64,
    latitude: f64,
    longitude: f64,
    phone: &'a str,
    kakao_place_id: &'a str,
    google_place_id: &'a str,
}

impl<'a> From<&'a CleanedRestaurantRecord> for CsvRow<'a> {
    fn from(r: &'a CleanedRestaurantRecord) -> Self {
        Self {
            name: &r.name,
            address: &r.address,
            rating: r.rating,
            latitude: r.coordinate.lat,
            longitude: r.coordinate.lng,
            phone: r.phone.as_deref().unwrap_or(NO_PHONE),
            kakao_place_id: r.kakao_place_id.as_deref().unwrap_or_default(),
            google_place_id: &r.google_place_id,
        }
    }
}

/// Writes `records` as UTF-8 CSV. The header row is always written, even
/// for an empty table.
///
/// # Errors
///
/// Returns [`PipelineError::Csv`] on serialization or write failure.
pub fn write_csv<W: Write>(writer: W, records: &[CleanedRestaurantRecord]) -> Result<(), PipelineError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.serialize(CsvRow::from(record))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Default export file name for an attraction.
#[must_use]
pub fn export_file_name(attraction_name: &str) -> String {
    let safe: String = attraction_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{safe}_맛집목록.csv")
}

#[cfg(test)]
mod tests {
    use mattour_core::Coordinate;

    use super::*;

    fn record(name: &str, phone: Option<&str>, kakao: Option<&str>) -> CleanedRestaurantRecord {
        CleanedRestaurantRecord {
            name: name.to_owned(),
            address: "제주시 항골남길 46".to_owned(),
            rating: 4.3,
            coordinate: Coordinate::new(33.4991, 126.5312),
            phone: phone.map(str::to_owned),
            google_place_id: "ChIJ1".to_owned(),
            kakao_place_id: kakao.map(str::to_owned),
            photo_refs: vec!["unused".to_owned()],
        }
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(
            &mut buf,
            &[
                record("자매국수", Some("064-746-2222"), Some("26338954")),
                record("올래, 국수", None, None),
            ],
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "name,address,rating,latitude,longitude,phone,kakao_place_id,google_place_id"
        );
        assert_eq!(
            lines[1],
            "자매국수,제주시 항골남길 46,4.3,33.4991,126.5312,064-746-2222,26338954,ChIJ1"
        );
        assert_eq!(
            lines[2],
            "\"올래, 국수\",제주시 항골남길 46,4.3,33.4991,126.5312,없음,,ChIJ1"
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "name,address,rating,latitude,longitude,phone,kakao_place_id,google_place_id\n"
        );
    }

    #[test]
    fn export_file_name_replaces_separators() {
        assert_eq!(export_file_name("성산 일출봉/정상"), "성산_일출봉_정상_맛집목록.csv");
    }
}
