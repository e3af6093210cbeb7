use json::JsonValue;

use crate::{error::SnapshotParseError, StatusSnapshot};

impl TryFrom<&json::object::Object> for StatusSnapshot {
    type Error = SnapshotParseError;

    /// Numbers are taken as-is, booleans become `1` / `0` and `null` entries are left out
    fn try_from(object: &json::object::Object) -> Result<Self, Self::Error> {
        let mut snapshot = StatusSnapshot::new();
        for (key, value) in object.iter() {
            let number = match value {
                JsonValue::Null => continue,
                JsonValue::Boolean(b) => f64::from(u8::from(*b)),
                JsonValue::Number(_) => value.as_f64().ok_or_else(|| {
                    SnapshotParseError::ExpectedNumber {
                        key: key.to_owned(),
                        found: value.dump(),
                    }
                })?,
                _ => {
                    return Err(SnapshotParseError::ExpectedNumber {
                        key: key.to_owned(),
                        found: value.dump(),
                    })
                }
            };
            snapshot.insert(key, number);
        }
        Ok(snapshot)
    }
}

impl TryFrom<JsonValue> for StatusSnapshot {
    type Error = SnapshotParseError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Object(object) => StatusSnapshot::try_from(&object),
            _ => Err(SnapshotParseError::ExpectedObject(value.dump())),
        }
    }
}

impl StatusSnapshot {
    /// Parse a snapshot from a flat JSON object of register values
    ///
    /// # Errors
    ///
    /// - `s` is not valid JSON
    /// - The document is not an object, or a value is neither a number, a boolean nor `null`
    pub fn from_json_str(s: &str) -> Result<Self, SnapshotParseError> {
        StatusSnapshot::try_from(json::parse(s)?)
    }
}
