use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// One message definition: `(name, id, layout spec, optional field names)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDef {
    pub name: String,
    /// Message ID. Accepts a number or a `"0x.."` string in JSON.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u8,
    /// Compact layout spec, e.g. `"BBB"` or `"x"`.
    pub layout: String,
    /// Field names in data-slot order, if the message has named fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl MessageDef {
    pub fn new(name: &str, id: u8, layout: &str, fields: Option<&[&str]>) -> Self {
        Self {
            name: name.to_string(),
            id,
            layout: layout.to_string(),
            fields: fields.map(|names| names.iter().map(|name| name.to_string()).collect()),
        }
    }
}

/// On-disk definition set: outbound (host to radio) and inbound (radio to
/// host) lists, merged in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionFile {
    #[serde(default)]
    pub outbound: Vec<MessageDef>,
    #[serde(default)]
    pub inbound: Vec<MessageDef>,
}

/// Parse a message ID written as decimal (`66`) or hex (`0x42`).
pub fn parse_message_id(text: &str) -> Option<u8> {
    let text = text.trim();
    match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u8),
    Text(String),
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => parse_message_id(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid message id {text:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_id_forms() {
        assert_eq!(parse_message_id("66"), Some(0x42));
        assert_eq!(parse_message_id("0x42"), Some(0x42));
        assert_eq!(parse_message_id(" 0XFF "), Some(0xFF));
        assert_eq!(parse_message_id("0x100"), None);
        assert_eq!(parse_message_id("256"), None);
        assert_eq!(parse_message_id("channel"), None);
    }

    #[test]
    fn deserialize_numeric_and_hex_ids() {
        let file: DefinitionFile = serde_json::from_str(
            r#"{
                "outbound": [
                    { "name": "ANT_AssignChannel", "id": "0x42", "layout": "BBB",
                      "fields": ["channelNumber", "channelType", "networkNumber"] }
                ],
                "inbound": [
                    { "name": "ANT_OpenChannel", "id": 75, "layout": "B" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(file.outbound[0].id, 0x42);
        assert_eq!(file.outbound[0].fields.as_ref().map(Vec::len), Some(3));
        assert_eq!(file.inbound[0].id, 0x4B);
        assert!(file.inbound[0].fields.is_none());
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let file: DefinitionFile = serde_json::from_str("{}").unwrap();
        assert!(file.outbound.is_empty());
        assert!(file.inbound.is_empty());
    }

    #[test]
    fn rejects_bad_ids_and_unknown_keys() {
        assert!(serde_json::from_str::<MessageDef>(
            r#"{ "name": "X", "id": "0xZZ", "layout": "B" }"#
        )
        .is_err());
        assert!(serde_json::from_str::<MessageDef>(
            r#"{ "name": "X", "id": 1, "layout": "B", "extra": true }"#
        )
        .is_err());
    }

    #[test]
    fn new_builds_owned_definition() {
        let def = MessageDef::new("ANT_CloseChannel", 0x4C, "B", Some(&["channelNumber"]));
        assert_eq!(def.fields, Some(vec!["channelNumber".to_string()]));

        let def = MessageDef::new("ANT_OpenChannel", 0x4B, "B", None);
        assert!(def.fields.is_none());
    }
}
