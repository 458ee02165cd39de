use ethnum::U256;
use log::debug;
use merkle_hashers::MerkleHasher;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tree::{verify_proof, Node};

use crate::{
    parse_quantity, Address, AllowlistConfig, AllowlistError, AllowlistResult, Entry, EntryField,
};

/// An entry as it appears in the input file, before validation.
///
/// Unknown fields (such as `hash` and `proof` of a previous bundle) are
/// ignored, so a bundle can be fed back in as input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    pub minter: String,
    #[serde(rename = "maxCount")]
    pub max_count: Value,
    pub price: Value,
}

impl RawEntry {
    pub fn parse(&self, index: usize, config: &AllowlistConfig) -> AllowlistResult<Entry> {
        let invalid = |field: EntryField, reason: String| AllowlistError::InvalidEntry {
            index,
            field,
            reason,
        };

        let minter = Address::parse(&self.minter, config.require_checksum)
            .map_err(|e| invalid(EntryField::Minter, e.to_string()))?;
        let max_count = parse_quantity(&self.max_count)
            .map_err(|e| invalid(EntryField::MaxCount, e.to_string()))?;
        let price =
            parse_quantity(&self.price).map_err(|e| invalid(EntryField::Price, e.to_string()))?;

        Ok(Entry {
            minter,
            max_count,
            price,
        })
    }
}

#[derive(Deserialize)]
struct NamedInput {
    #[serde(default)]
    name: Option<String>,
    entries: Vec<RawEntry>,
}

/// The generator input: a bare array of entries, or `{ name, entries }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllowlistInput {
    pub name: Option<String>,
    pub entries: Vec<RawEntry>,
}

impl AllowlistInput {
    pub fn from_json(text: &str) -> AllowlistResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Array(_) => Ok(Self {
                name: None,
                entries: serde_json::from_value(value)?,
            }),
            Value::Object(_) => {
                let named: NamedInput = serde_json::from_value(value)?;
                Ok(Self {
                    name: named.name,
                    entries: named.entries,
                })
            }
            _ => Err(AllowlistError::InvalidInput(
                "expected an array of entries or an object with an `entries` array".to_string(),
            )),
        }
    }

    /// Validates every entry; the first malformed one aborts the whole list.
    pub fn into_entries(self, config: &AllowlistConfig) -> AllowlistResult<Vec<Entry>> {
        if self.entries.is_empty() {
            return Err(AllowlistError::EmptyAllowlist);
        }
        self.entries
            .iter()
            .enumerate()
            .map(|(index, raw)| raw.parse(index, config))
            .collect()
    }
}

/// The distributable output: the root to publish and, per entry, the
/// fields, leaf hash and proof its minter submits when claiming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub root: Node,
    pub entries: Vec<BundleEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub minter: Address,
    #[serde(rename = "maxCount", with = "count_format")]
    pub max_count: U256,
    #[serde(with = "decimal_format")]
    pub price: U256,
    pub hash: Node,
    pub proof: Vec<Node>,
}

impl BundleEntry {
    #[inline]
    pub fn entry(&self) -> Entry {
        Entry {
            minter: self.minter,
            max_count: self.max_count,
            price: self.price,
        }
    }
}

impl Bundle {
    /// Re-derives every leaf from its fields and checks every proof against
    /// the recorded root, the way a claim would be checked on chain.
    pub fn verify<H: MerkleHasher>(&self, hasher: &H) -> AllowlistResult<()> {
        if self.entries.is_empty() {
            return Err(AllowlistError::EmptyAllowlist);
        }
        for (index, bundle_entry) in self.entries.iter().enumerate() {
            let computed = bundle_entry.entry().leaf_hash(hasher);
            if computed != bundle_entry.hash {
                return Err(AllowlistError::HashMismatch {
                    index,
                    recorded: bundle_entry.hash,
                    computed,
                });
            }
            if !verify_proof(hasher, &computed, &bundle_entry.proof, &self.root) {
                return Err(AllowlistError::InvalidProof {
                    index,
                    root: self.root,
                });
            }
        }
        debug!("{} bundle entries verified against {}", self.entries.len(), self.root);
        Ok(())
    }

    /// Everything `minter` can claim with; one address may hold several
    /// entries with different terms.
    pub fn entries_for(&self, minter: &Address) -> Vec<&BundleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.minter == *minter)
            .collect()
    }
}

/// `maxCount` is written as a JSON number when it fits in 64 bits.
mod count_format {
    use ethnum::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::parse_quantity;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        match u64::try_from(*value) {
            Ok(small) => serializer.serialize_u64(small),
            Err(_) => serializer.collect_str(value),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_quantity(&value).map_err(de::Error::custom)
    }
}

/// Wei amounts are written as decimal strings.
mod decimal_format {
    use ethnum::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::parse_quantity;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let value = Value::deserialize(deserializer)?;
        parse_quantity(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_input_shapes() {
        let bare = AllowlistInput::from_json(
            r#"[{ "minter": "0x0000000000000000000000000000000000000010", "maxCount": 1, "price": "10000000000000000" }]"#,
        )
        .unwrap();
        assert_eq!(bare.name, None);
        assert_eq!(bare.entries.len(), 1);

        let named = AllowlistInput::from_json(
            r#"{ "name": "main", "entries": [{ "minter": "0x0000000000000000000000000000000000000010", "maxCount": 1, "price": "1", "hash": "0x00", "proof": [] }] }"#,
        )
        .unwrap();
        assert_eq!(named.name.as_deref(), Some("main"));
        assert_eq!(named.entries[0].max_count, json!(1));

        assert!(matches!(
            AllowlistInput::from_json("42"),
            Err(AllowlistError::InvalidInput(_))
        ));
        assert!(matches!(
            AllowlistInput::from_json("[{"),
            Err(AllowlistError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_entry_names_the_field() {
        let input = AllowlistInput::from_json(
            r#"[
                { "minter": "0x0000000000000000000000000000000000000010", "maxCount": 1, "price": "1" },
                { "minter": "0x0000000000000000000000000000000000000011", "maxCount": -3, "price": "1" }
            ]"#,
        )
        .unwrap();

        match input.into_entries(&AllowlistConfig::default()) {
            Err(AllowlistError::InvalidEntry { index, field, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, EntryField::MaxCount);
            }
            other => panic!("unexpected result {other:?}"),
        }

        let input = AllowlistInput::from_json(
            r#"[{ "minter": "0x00000000000000000000000000000000000010", "maxCount": 1, "price": "1" }]"#,
        )
        .unwrap();
        assert!(matches!(
            input.into_entries(&AllowlistConfig::default()),
            Err(AllowlistError::InvalidEntry {
                index: 0,
                field: EntryField::Minter,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_input() {
        let input = AllowlistInput::from_json(r#"{ "name": "main", "entries": [] }"#).unwrap();
        assert!(matches!(
            input.into_entries(&AllowlistConfig::default()),
            Err(AllowlistError::EmptyAllowlist)
        ));
    }

    #[test]
    fn test_bundle_json_format() {
        let entry = BundleEntry {
            minter: "0xc44622efe9f7b4c880e563548148810b9ce0cdb4".parse().unwrap(),
            max_count: U256::from(5u64),
            price: U256::from(80_000_000_000_000_000u64),
            hash: Node::new([1u8; 32]),
            proof: vec![Node::new([2u8; 32])],
        };
        let bundle = Bundle {
            name: None,
            root: Node::new([3u8; 32]),
            entries: vec![entry],
        };

        let value = serde_json::to_value(&bundle).unwrap();
        assert!(value.get("name").is_none());
        assert_eq!(value["root"], json!(format!("0x{}", "03".repeat(32))));
        assert_eq!(
            value["entries"][0]["minter"],
            json!("0xC44622EFe9F7b4c880e563548148810b9CE0cdb4")
        );
        assert_eq!(value["entries"][0]["maxCount"], json!(5));
        assert_eq!(value["entries"][0]["price"], json!("80000000000000000"));
        assert_eq!(
            value["entries"][0]["proof"],
            json!([format!("0x{}", "02".repeat(32))])
        );

        let back: Bundle = serde_json::from_value(value).unwrap();
        assert_eq!(back, bundle);
    }

    #[test]
    fn test_huge_max_count_is_a_string() {
        let entry = BundleEntry {
            minter: Address::ZERO,
            max_count: U256::MAX,
            price: U256::ZERO,
            hash: Node::default(),
            proof: vec![],
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["maxCount"], json!(U256::MAX.to_string()));
        assert_eq!(value["price"], json!("0"));
    }

    #[test]
    fn test_max_count_switches_to_string_past_u64() {
        let mut entry = BundleEntry {
            minter: Address::ZERO,
            max_count: U256::from(u64::MAX),
            price: U256::ZERO,
            hash: Node::default(),
            proof: vec![],
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["maxCount"], json!(u64::MAX));

        entry.max_count += U256::ONE;
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["maxCount"], json!("18446744073709551616"));
        assert_eq!(serde_json::from_value::<BundleEntry>(value).unwrap(), entry);
    }
}
