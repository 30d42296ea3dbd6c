use serde_json::Value;

/// Order-insensitive structural equality over nested JSON.
///
/// Mappings compare by key set and per-key equality; sequences compare
/// as multisets of canonicalized elements, so reordered registry lists
/// do not count as a semantic difference; scalars compare by value.
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, value)| b.get(key).is_some_and(|other| deep_equal(value, other)))
        }
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                return false;
            }
            let mut xs: Vec<String> = a.iter().map(canonical).collect();
            let mut ys: Vec<String> = b.iter().map(canonical).collect();
            xs.sort();
            ys.sort();
            xs == ys
        }
        _ => left == right,
    }
}

/// Canonical rendering: serde_json orders object keys, so the string
/// form is stable under key reordering.
fn canonical(value: &Value) -> String {
    value.to_string()
}
