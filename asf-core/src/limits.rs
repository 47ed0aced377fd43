use serde::{Deserialize, Serialize};

use crate::error::{AsfError, Result};

/// Upper bounds applied to declared lengths and counts before anything is read.
///
/// All `*_bytes` limits are in bytes after the field's length rule has been
/// applied, so a codec name declaring 129 characters (258 bytes) exceeds a
/// `codec_name_bytes` limit of 256.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    pub type_specific_data_bytes: usize,
    pub error_correction_data_bytes: usize,
    pub header_extension_data_bytes: usize,
    pub codec_entries: usize,
    pub codec_name_bytes: usize,
    pub codec_description_bytes: usize,
    pub codec_information_bytes: usize,
    pub content_descriptors: usize,
    pub descriptor_name_bytes: usize,
    pub descriptor_value_bytes: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            type_specific_data_bytes: 5000,
            error_correction_data_bytes: 5000,
            header_extension_data_bytes: 5000,
            codec_entries: 4,
            codec_name_bytes: 256,
            codec_description_bytes: 256,
            codec_information_bytes: 256,
            content_descriptors: 256,
            descriptor_name_bytes: 256,
            descriptor_value_bytes: 128,
        }
    }
}

impl DecodeLimits {
    /// Parse limits from TOML. Keys that are absent keep their default value.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn builder() -> DecodeLimitsBuilder {
        DecodeLimitsBuilder::new()
    }
}

/// Fail with `CapacityExceeded` when `declared` is above `limit`.
pub(crate) fn check(field: &'static str, declared: usize, limit: usize) -> Result<()> {
    if declared > limit {
        return Err(AsfError::CapacityExceeded {
            field,
            declared,
            limit,
        });
    }
    Ok(())
}

/// `DecodeLimitsBuilder` is a convenience builder to create `DecodeLimits` from code.
pub struct DecodeLimitsBuilder {
    limits: DecodeLimits,
}

impl DecodeLimitsBuilder {
    pub fn new() -> Self {
        Self { limits: Default::default() }
    }

    /// Applies one limit to the type-specific, error-correction and header extension payloads.
    pub fn with_payload_bytes(mut self, bytes: usize) -> Self {
        self.limits.type_specific_data_bytes = bytes;
        self.limits.error_correction_data_bytes = bytes;
        self.limits.header_extension_data_bytes = bytes;
        self
    }

    pub fn with_codec_entries(mut self, count: usize) -> Self {
        self.limits.codec_entries = count;
        self
    }

    /// Applies to codec names, descriptions and information alike.
    pub fn with_codec_string_bytes(mut self, bytes: usize) -> Self {
        self.limits.codec_name_bytes = bytes;
        self.limits.codec_description_bytes = bytes;
        self.limits.codec_information_bytes = bytes;
        self
    }

    pub fn with_content_descriptors(mut self, count: usize) -> Self {
        self.limits.content_descriptors = count;
        self
    }

    pub fn with_descriptor_name_bytes(mut self, bytes: usize) -> Self {
        self.limits.descriptor_name_bytes = bytes;
        self
    }

    pub fn with_descriptor_value_bytes(mut self, bytes: usize) -> Self {
        self.limits.descriptor_value_bytes = bytes;
        self
    }

    pub fn get(self) -> DecodeLimits {
        self.limits
    }
}

impl Default for DecodeLimitsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let limits =
            DecodeLimits::from_toml_str("codec_entries = 32\ndescriptor_value_bytes = 65535\n")
                .unwrap();
        assert_eq!(limits.codec_entries, 32);
        assert_eq!(limits.descriptor_value_bytes, 65535);
        assert_eq!(limits.codec_name_bytes, 256);
        assert_eq!(limits.header_extension_data_bytes, 5000);
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(DecodeLimits::from_toml_str("codec_entries = \"many\"").is_err());
    }

    #[test]
    fn builder_overrides() {
        let limits = DecodeLimits::builder()
            .with_payload_bytes(1 << 20)
            .with_codec_string_bytes(1024)
            .get();
        assert_eq!(limits.type_specific_data_bytes, 1 << 20);
        assert_eq!(limits.header_extension_data_bytes, 1 << 20);
        assert_eq!(limits.codec_information_bytes, 1024);
        assert_eq!(limits.content_descriptors, DecodeLimits::default().content_descriptors);
    }

    #[test]
    fn check_is_inclusive() {
        assert!(check("field", 4, 4).is_ok());
        assert!(matches!(
            check("field", 5, 4),
            Err(AsfError::CapacityExceeded {
                field: "field",
                declared: 5,
                limit: 4
            })
        ));
    }
}
