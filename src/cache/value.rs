//! Stored Value Module
//!
//! Values accepted by the cache and their byte representation in the store.

use serde::Serialize;

// == Stored Value ==
/// A value written through [`crate::cache::Cache::store`].
///
/// Serializes as the bare inner value, which is how arguments appear in the
/// recorded call history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl StoredValue {
    // == Byte Representation ==
    /// Returns the bytes written to the store.
    ///
    /// Numbers are stored as their decimal text, so an integer can be read back
    /// with [`crate::cache::Cache::get_int`].
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(text) => text.as_bytes().to_vec(),
            StoredValue::Integer(n) => n.to_string().into_bytes(),
            // Debug keeps the fractional part of whole floats ("2.0", not "2")
            StoredValue::Float(x) => format!("{:?}", x).into_bytes(),
            StoredValue::Bytes(bytes) => bytes.clone(),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Integer(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Integer(i64::from(value))
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes() {
        assert_eq!(StoredValue::from("foo").to_bytes(), b"foo".to_vec());
        assert_eq!(StoredValue::from(-42i64).to_bytes(), b"-42".to_vec());
        assert_eq!(StoredValue::from(2.0).to_bytes(), b"2.0".to_vec());
        assert_eq!(StoredValue::from(3.25).to_bytes(), b"3.25".to_vec());
        assert_eq!(StoredValue::from(vec![0u8, 255]).to_bytes(), vec![0u8, 255]);
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(serde_json::to_string(&StoredValue::from("foo")).unwrap(), r#""foo""#);
        assert_eq!(serde_json::to_string(&StoredValue::from(7i64)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&StoredValue::from(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&StoredValue::from(&b"ab"[..])).unwrap(),
            "[97,98]"
        );
    }
}
