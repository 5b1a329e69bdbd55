use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// Opaque signaling or chat payload.
///
/// Holds the exact JSON text the sender produced. The relay never looks
/// inside; it only hands the same bytes to the partner.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Box<RawValue>);

impl Payload {
    /// Wrap a JSON document. Fails only if `json` is not valid JSON.
    pub fn from_json(json: impl Into<String>) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json.into()).map(Payload)
    }

    /// Encode a plain chat string as a JSON string payload.
    pub fn text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::value::to_raw_value(text).map(Payload)
    }

    pub fn as_json(&self) -> &str {
        self.0.get()
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.as_json() == other.as_json()
    }
}

impl Eq for Payload {}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload")
            .field(&format_args!("{} bytes", self.as_json().len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_json_verbatim() {
        let json = r#"{"sdp":"v=0\r\n","type":"offer",  "extra":[1, 2]}"#;
        let payload = Payload::from_json(json).unwrap();
        assert_eq!(payload.as_json(), json);

        let serialized = serde_json::to_string(&payload).unwrap();
        assert_eq!(serialized, json);
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(Payload::from_json("{not json").is_err());
    }

    #[test]
    fn test_text_payload() {
        let payload = Payload::text("hi \"there\"").unwrap();
        assert_eq!(payload.as_json(), r#""hi \"there\"""#);
    }

    #[test]
    fn test_debug_hides_content() {
        let payload = Payload::text("secret").unwrap();
        let debug = format!("{:?}", payload);
        assert!(!debug.contains("secret"));
    }
}
