use serde_json::{Map, Value};

/// Parse the packed info-line form `key:value;key:value` into a flat record.
/// Every segment must split into exactly two pieces; the whole line is
/// returned as the error so the caller can surface it verbatim.
pub fn parse_info_line(line: &str) -> Result<Map<String, Value>, String> {
    let mut record = Map::new();
    for segment in line.split(';') {
        let pieces: Vec<&str> = segment.split(':').collect();
        if pieces.len() != 2 {
            return Err(line.to_string());
        }
        record.insert(pieces[0].to_string(), Value::String(pieces[1].to_string()));
    }
    Ok(record)
}

/// Info fields arrive either as a packed line or as an already-parsed map of
/// scalars. Normalize both to the map form.
pub fn jsonify_info(value: &Value) -> Result<Map<String, Value>, String> {
    match value {
        Value::String(line) => parse_info_line(line),
        Value::Object(map) => Ok(map.clone()),
        other => Err(other.to_string()),
    }
}
