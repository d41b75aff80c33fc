//! Secret key algorithms and the `ENC(<algorithm>:<base64>)` marker.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::HoconError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[serde(rename = "AES")]
    Aes,
    #[serde(rename = "HmacSHA1")]
    HmacSha1,
    #[serde(rename = "HmacSHA224")]
    HmacSha224,
    #[serde(rename = "HmacSHA256")]
    HmacSha256,
    #[serde(rename = "HmacSHA384")]
    HmacSha384,
    #[serde(rename = "HmacSHA512")]
    HmacSha512,
}

const ALL: [KeyAlgorithm; 6] = [
    KeyAlgorithm::Aes,
    KeyAlgorithm::HmacSha1,
    KeyAlgorithm::HmacSha224,
    KeyAlgorithm::HmacSha256,
    KeyAlgorithm::HmacSha384,
    KeyAlgorithm::HmacSha512,
];

impl KeyAlgorithm {
    /// Canonical name, e.g. `HmacSHA256`.
    pub fn name(&self) -> &'static str {
        match self {
            KeyAlgorithm::Aes => "AES",
            KeyAlgorithm::HmacSha1 => "HmacSHA1",
            KeyAlgorithm::HmacSha224 => "HmacSHA224",
            KeyAlgorithm::HmacSha256 => "HmacSHA256",
            KeyAlgorithm::HmacSha384 => "HmacSHA384",
            KeyAlgorithm::HmacSha512 => "HmacSHA512",
        }
    }

    /// Check that `bits` is a key size this algorithm accepts.
    pub fn check_size(&self, bits: u32) -> Result<(), HoconError> {
        let ok = match self {
            KeyAlgorithm::Aes => matches!(bits, 128 | 192 | 256),
            _ => bits > 0 && bits % 8 == 0,
        };
        if ok {
            Ok(())
        } else {
            Err(HoconError::AlgorithmUnavailable {
                algorithm: self.name().to_string(),
                reason: format!("unsupported key size {bits}"),
            })
        }
    }

    /// Fresh random key material of `bits` length.
    pub fn generate(&self, bits: u32) -> Result<Vec<u8>, HoconError> {
        self.check_size(bits)?;
        let mut key = vec![0u8; (bits / 8) as usize];
        rand::thread_rng().fill_bytes(&mut key);
        Ok(key)
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = HoconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HoconError::AlgorithmUnavailable {
                algorithm: s.to_string(),
                reason: "no such secret key algorithm".into(),
            })
    }
}

/// A secret key in its textual form, `ENC(<algorithm>:<base64-of-raw-key>)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedKey {
    pub algorithm: KeyAlgorithm,
    pub material: Vec<u8>,
}

impl EncodedKey {
    /// Parse the marker form. Anything else, including an unknown algorithm
    /// or invalid base64, is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.strip_prefix("ENC(")?.strip_suffix(')')?;
        let (algorithm, b64) = inner.split_once(':')?;
        Some(Self {
            algorithm: algorithm.parse().ok()?,
            material: STANDARD.decode(b64).ok()?,
        })
    }

    /// Like [`parse`](Self::parse), but only text that renders back
    /// unchanged: the canonical algorithm name and padded base64.
    pub fn parse_canonical(s: &str) -> Option<Self> {
        Self::parse(s).filter(|key| key.to_string() == s)
    }
}

impl fmt::Display for EncodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ENC({}:{})", self.algorithm, STANDARD.encode(&self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_with_canonical_name() {
        let alg: KeyAlgorithm = "hmacsha256".parse().unwrap();
        assert_eq!(alg, KeyAlgorithm::HmacSha256);
        assert_eq!(alg.to_string(), "HmacSHA256");
        assert_eq!("aes".parse::<KeyAlgorithm>().unwrap().name(), "AES");
    }

    #[test]
    fn canonical_parse_rejects_other_spellings() {
        let canonical = "ENC(HmacSHA256:AAEC/w==)";
        assert_eq!(EncodedKey::parse_canonical(canonical).unwrap().to_string(), canonical);
        assert!(EncodedKey::parse("ENC(hmacsha256:AAEC/w==)").is_some());
        assert!(EncodedKey::parse_canonical("ENC(hmacsha256:AAEC/w==)").is_none());
    }

    #[test]
    fn unknown_algorithm() {
        match "Blowfish".parse::<KeyAlgorithm>() {
            Err(HoconError::AlgorithmUnavailable { algorithm, .. }) => {
                assert_eq!(algorithm, "Blowfish")
            }
            other => panic!("Expected AlgorithmUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn aes_sizes() {
        for bits in [128, 192, 256] {
            assert_eq!(KeyAlgorithm::Aes.generate(bits).unwrap().len(), bits as usize / 8);
        }
        assert!(KeyAlgorithm::Aes.generate(2048).is_err());
    }

    #[test]
    fn hmac_sizes() {
        assert_eq!(KeyAlgorithm::HmacSha256.generate(2048).unwrap().len(), 256);
        assert!(KeyAlgorithm::HmacSha256.check_size(0).is_err());
        assert!(KeyAlgorithm::HmacSha256.check_size(12).is_err());
    }

    #[test]
    fn generated_keys_differ() {
        let a = KeyAlgorithm::HmacSha256.generate(256).unwrap();
        let b = KeyAlgorithm::HmacSha256.generate(256).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn encoded_key_format() {
        let key = EncodedKey {
            algorithm: KeyAlgorithm::HmacSha256,
            material: vec![0, 1, 2, 255],
        };
        assert_eq!(key.to_string(), "ENC(HmacSHA256:AAEC/w==)");
        assert_eq!(EncodedKey::parse("ENC(HmacSHA256:AAEC/w==)"), Some(key));
    }

    #[test]
    fn encoded_key_rejects_other_text() {
        for text in [
            "plain",
            "ENC(HmacSHA256:AAEC/w==",
            "ENC(Blowfish:AAEC)",
            "ENC(AES:not base64!)",
            "ENC(AES)",
        ] {
            assert_eq!(EncodedKey::parse(text), None, "{text}");
        }
    }
}
