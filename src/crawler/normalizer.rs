use serde_json::Value;

use crate::crawler::models::RawEstate;

const BASE_IMAGE_URL: &str = "https://selectumproperty.com/_next/image?url=https%3A%2F%2Fselectumproperty.com%2Fapi%2Ffiles%2Fproperty-images%2F";
const IMAGE_SUFFIX: &str = "&w=2048&q=75";

/// Fields the site double-encodes (UTF-8 bytes served as Latin-1).
const TEXT_FIELDS: [&str; 4] = ["title", "location", "area", "houseType"];

/// Outcome of the mojibake repair, so callers can see whether the text was
/// actually re-decoded or kept as-is.
#[derive(Debug, PartialEq, Eq)]
pub enum Decoded {
    Repaired(String),
    Unchanged(String),
}

impl Decoded {
    pub fn into_inner(self) -> String {
        match self {
            Decoded::Repaired(s) | Decoded::Unchanged(s) => s,
        }
    }
}

/// Reinterprets text whose code points all fit in one byte as UTF-8.
/// Code points above 0xFF or an invalid byte sequence mean the text was not
/// a Latin-1 artifact; it is returned unchanged.
pub fn decode_text(text: &str) -> Decoded {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let cp = ch as u32;
        if cp > 0xFF {
            return Decoded::Unchanged(text.to_string());
        }
        bytes.push(cp as u8);
    }
    match String::from_utf8(bytes) {
        Ok(repaired) => Decoded::Repaired(repaired),
        Err(_) => Decoded::Unchanged(text.to_string()),
    }
}

/// Normalizes one raw estate record: repairs the known text fields, derives
/// `image_urls`, flattens `types` to a display string. All other keys pass
/// through untouched.
pub fn format_estate(mut estate: RawEstate) -> RawEstate {
    for key in TEXT_FIELDS {
        if let Some(Value::String(s)) = estate.get(key) {
            let repaired = decode_text(s).into_inner();
            estate.insert(key.to_string(), Value::String(repaired));
        }
    }

    let image_urls: Vec<Value> = estate
        .get("images")
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .filter_map(|img| img.get("file_name").and_then(Value::as_str))
                .filter(|name| !name.is_empty())
                .map(|name| Value::String(format!("{BASE_IMAGE_URL}{name}{IMAGE_SUFFIX}")))
                .collect()
        })
        .unwrap_or_default();
    estate.insert("image_urls".to_string(), Value::Array(image_urls));

    let flattened = match estate.get("types") {
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.get("name").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .map(|name| decode_text(name).into_inner())
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    };
    estate.insert("types".to_string(), Value::String(flattened));

    estate
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn estate(value: serde_json::Value) -> RawEstate {
        match value {
            Value::Object(map) => map,
            _ => panic!("estate fixture must be an object"),
        }
    }

    fn as_latin1(text: &str) -> String {
        text.bytes().map(|b| b as char).collect()
    }

    #[test]
    fn decode_repairs_utf8_read_as_latin1() {
        let garbled = as_latin1("Вилла у моря");
        assert_eq!(
            decode_text(&garbled),
            Decoded::Repaired("Вилла у моря".to_string())
        );
    }

    #[test]
    fn decode_leaves_wide_code_points_alone() {
        assert_eq!(
            decode_text("日本語"),
            Decoded::Unchanged("日本語".to_string())
        );
    }

    #[test]
    fn decode_leaves_invalid_byte_sequences_alone() {
        // 0xFF 0xFE is not valid UTF-8
        assert_eq!(
            decode_text("\u{ff}\u{fe}"),
            Decoded::Unchanged("\u{ff}\u{fe}".to_string())
        );
    }

    #[test]
    fn decode_is_identity_on_ascii() {
        assert_eq!(decode_text("Alanya").into_inner(), "Alanya");
    }

    #[test]
    fn text_fields_are_repaired_in_place() {
        let e = estate(json!({
            "title": as_latin1("Пентхаус"),
            "houseType": as_latin1("Дуплекс"),
            "bed_room": 3
        }));
        let out = format_estate(e);
        assert_eq!(out["title"], json!("Пентхаус"));
        assert_eq!(out["houseType"], json!("Дуплекс"));
        assert_eq!(out["bed_room"], json!(3));
    }

    #[test]
    fn no_images_yields_empty_urls() {
        let out = format_estate(estate(json!({"id": 1})));
        assert_eq!(out["image_urls"], json!([]));
    }

    #[test]
    fn empty_file_names_are_skipped() {
        let out = format_estate(estate(json!({
            "images": [{"file_name": "a.jpg"}, {"file_name": ""}]
        })));
        assert_eq!(
            out["image_urls"],
            json!([format!("{BASE_IMAGE_URL}a.jpg{IMAGE_SUFFIX}")])
        );
    }

    #[test]
    fn image_order_is_preserved() {
        let out = format_estate(estate(json!({
            "images": [{"file_name": "b.jpg"}, {"id": 9}, {"file_name": "a.jpg"}]
        })));
        let urls = out["image_urls"].as_array().unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls[0].as_str().unwrap().contains("b.jpg"));
        assert!(urls[1].as_str().unwrap().contains("a.jpg"));
    }

    #[test]
    fn types_list_flattens_to_joined_names() {
        let out = format_estate(estate(json!({
            "types": [{"name": "Villa"}, {"name": "Condo"}, {"name": ""}]
        })));
        assert_eq!(out["types"], json!("Villa, Condo"));
    }

    #[test]
    fn non_list_types_flatten_to_empty_string() {
        let out = format_estate(estate(json!({"types": "not-a-list"})));
        assert_eq!(out["types"], json!(""));
    }

    #[test]
    fn absent_types_flatten_to_empty_string() {
        let out = format_estate(estate(json!({"id": 1})));
        assert_eq!(out["types"], json!(""));
    }

    #[test]
    fn unknown_keys_pass_through() {
        let out = format_estate(estate(json!({
            "id": 42,
            "price": {"min": 100},
            "is_multi": true
        })));
        assert_eq!(out["id"], json!(42));
        assert_eq!(out["price"], json!({"min": 100}));
        assert_eq!(out["is_multi"], json!(true));
    }
}
