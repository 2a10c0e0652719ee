use std::fmt::Write as _;
use std::ops::Index;
use std::sync::Arc;

/// Decoded field values with positional and, when known, named access.
///
/// Names are a projection over the same values; there is one backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgList {
    values: Vec<u32>,
    names: Option<Arc<[String]>>,
}

impl ArgList {
    /// Values without field names.
    pub fn positional(values: Vec<u32>) -> Self {
        Self {
            values,
            names: None,
        }
    }

    /// Values with field names, one name per value.
    ///
    /// Catalog entries guarantee matching lengths. A mismatch is a bug: it
    /// panics in debug builds and falls back to positional access otherwise.
    pub fn named(values: Vec<u32>, names: Arc<[String]>) -> Self {
        debug_assert_eq!(
            names.len(),
            values.len(),
            "ArgList::named needs one name per value"
        );
        let names = (names.len() == values.len()).then_some(names);
        Self { values, names }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`.
    pub fn get(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Value of the field called `name`. Always `None` without field names.
    pub fn by_name(&self, name: &str) -> Option<u32> {
        let index = self.names.as_ref()?.iter().position(|field| field == name)?;
        self.get(index)
    }

    /// Field names, if the message defines them.
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied()
    }

    /// `(name, value)` pairs. Empty without field names.
    pub fn iter_named(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.names
            .iter()
            .flat_map(|names| names.iter())
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl Index<usize> for ArgList {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.values[index]
    }
}

/// Result of disassembling one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedMessage {
    /// Payload decoded against the catalog entry for `msg_id`.
    Decoded {
        sync: u8,
        msg_id: u8,
        name: String,
        args: ArgList,
    },
    /// Lenient recovery: the whole input buffer rendered as lowercase hex.
    Fallback { sync: u8, msg_id: u8, raw_hex: String },
}

impl DecodedMessage {
    pub fn sync(&self) -> u8 {
        match self {
            Self::Decoded { sync, .. } | Self::Fallback { sync, .. } => *sync,
        }
    }

    pub fn msg_id(&self) -> u8 {
        match self {
            Self::Decoded { msg_id, .. } | Self::Fallback { msg_id, .. } => *msg_id,
        }
    }

    /// Catalog name of a decoded message.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Decoded { name, .. } => Some(name),
            Self::Fallback { .. } => None,
        }
    }

    /// Decoded arguments. `None` for a fallback.
    pub fn args(&self) -> Option<&ArgList> {
        match self {
            Self::Decoded { args, .. } => Some(args),
            Self::Fallback { .. } => None,
        }
    }

    /// Hex rendering of the original input. `None` for a decoded message.
    pub fn raw_hex(&self) -> Option<&str> {
        match self {
            Self::Decoded { .. } => None,
            Self::Fallback { raw_hex, .. } => Some(raw_hex),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Lowercase hex rendering of `bytes`, two digits per byte.
pub fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Arc<[String]> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn positional_access() {
        let args = ArgList::positional(vec![4]);
        assert_eq!(args.len(), 1);
        assert_eq!(args[0], 4);
        assert_eq!(args.get(1), None);
        assert_eq!(args.by_name("channelNumber"), None);
        assert_eq!(args.iter_named().count(), 0);
    }

    #[test]
    fn named_access_projects_over_values() {
        let args = ArgList::named(
            vec![0x04, 0x03, 0x40],
            names(&["channelNumber", "channelType", "networkNumber"]),
        );
        assert_eq!(args.by_name("channelType"), Some(0x03));
        assert_eq!(args[2], 0x40);
        assert_eq!(args.by_name("missing"), None);

        let pairs: Vec<(&str, u32)> = args.iter_named().collect();
        assert_eq!(pairs[0], ("channelNumber", 0x04));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one name per value")]
    fn mismatched_names_panic_in_debug_builds() {
        let _ = ArgList::named(vec![1, 2], names(&["only"]));
    }

    #[test]
    fn fallback_accessors() {
        let msg = DecodedMessage::Fallback {
            sync: 0xA4,
            msg_id: 0x00,
            raw_hex: "a4010000a5".to_string(),
        };
        assert!(msg.is_fallback());
        assert_eq!(msg.sync(), 0xA4);
        assert_eq!(msg.msg_id(), 0x00);
        assert_eq!(msg.raw_hex(), Some("a4010000a5"));
        assert!(msg.args().is_none());
        assert!(msg.name().is_none());
    }

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(encode_hex(&[0xA4, 0x01, 0x00, 0x00, 0xA5]), "a4010000a5");
        assert_eq!(encode_hex(&[]), "");
        assert_eq!(encode_hex(&[0x0F]), "0f");
    }
}
