//! Shape normalization applied to raw choice records before validation

use serde_json::Value;

/// Normalize the `after` field of one raw record
///
/// - null or missing: removed
/// - a string: wrapped into a one-element array
/// - an array: non-string elements dropped, removed when nothing is left
/// - anything else: removed
///
/// Non-object records are returned unchanged and rejected later by validation.
pub fn normalize_record(record: Value) -> Value {
    let Value::Object(mut map) = record else {
        return record;
    };

    match map.remove("after") {
        Some(Value::String(cmd)) => {
            map.insert("after".to_string(), Value::Array(vec![Value::String(cmd)]));
        }
        Some(Value::Array(items)) => {
            let commands: Vec<Value> = items.into_iter().filter(Value::is_string).collect();
            if !commands.is_empty() {
                map.insert("after".to_string(), Value::Array(commands));
            }
        }
        _ => {}
    }

    Value::Object(map)
}

/// Normalize every record, keeping order
pub fn normalize_records(records: Vec<Value>) -> Vec<Value> {
    records.into_iter().map(normalize_record).collect()
}
