use serde_json::{Map, Value};

/// One listing as found in the embedded payload. The site does not guarantee
/// a schema, so records stay dynamic and known fields are picked defensively.
pub type RawEstate = Map<String, Value>;

/// Fixed projection persisted to the `realestates` table. Fields absent or of
/// an unexpected type in the raw record become NULL; everything outside this
/// projection is dropped at persistence time.
#[derive(Debug)]
pub struct EstateRow {
    pub id: i64,
    pub title: Option<String>,
    pub bed_room: Option<i32>,
    pub max_bed: Option<i32>,
    pub bathroom: Option<i32>,
    pub metrage: Option<f64>,
    pub price: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub location: Option<String>,
    pub area: Option<String>,
    pub money_type: Option<String>,
    pub is_multi: Option<bool>,
    pub house_type: Option<String>,
    pub types: Option<String>,
    pub image_urls: Vec<String>,
}

impl EstateRow {
    /// Returns `None` when the record has no usable `id`; such a record
    /// cannot be upserted.
    pub fn from_estate(estate: &RawEstate) -> Option<Self> {
        let id = estate.get("id").and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        })?;

        Some(Self {
            id,
            title: text(estate, "title"),
            bed_room: int(estate, "bed_room"),
            max_bed: int(estate, "max_bed"),
            bathroom: int(estate, "bathroom"),
            metrage: num(estate, "metrage"),
            price: num(estate, "price"),
            price_min: num(estate, "price_min"),
            price_max: num(estate, "price_max"),
            location: text(estate, "location"),
            area: text(estate, "area"),
            money_type: text(estate, "money_type"),
            is_multi: estate.get("is_multi").and_then(Value::as_bool),
            house_type: text(estate, "houseType"),
            types: text(estate, "types"),
            image_urls: estate
                .get("image_urls")
                .and_then(Value::as_array)
                .map(|urls| {
                    urls.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

fn text(estate: &RawEstate, key: &str) -> Option<String> {
    estate.get(key).and_then(Value::as_str).map(str::to_string)
}

fn int(estate: &RawEstate, key: &str) -> Option<i32> {
    estate.get(key).and_then(Value::as_i64).map(|v| v as i32)
}

fn num(estate: &RawEstate, key: &str) -> Option<f64> {
    estate.get(key).and_then(Value::as_f64)
}
