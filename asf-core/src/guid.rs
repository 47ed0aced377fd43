//! Type identifiers and the registry mapping them to object kinds.

use strum::{Display, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid(pub [u8; 16]);

impl Guid {
    pub const LEN: usize = 16;

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}{:02X}{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}",
            b[3], b[2], b[1], b[0], b[5], b[4], b[7], b[6], b[8], b[9], b[10], b[11], b[12],
            b[13], b[14], b[15]
        )
    }
}

// Well-known GUIDs (stored in little-endian GUID format)
pub const GUID_HEADER: Guid =
    Guid([0x30, 0x26, 0xB2, 0x75, 0x8E, 0x66, 0xCF, 0x11, 0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C]);
pub const GUID_FILE_PROPERTIES: Guid =
    Guid([0xA1, 0xDC, 0xAB, 0x8C, 0x47, 0xA9, 0xCF, 0x11, 0x8E, 0xE4, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65]);
pub const GUID_STREAM_PROPERTIES: Guid =
    Guid([0x91, 0x07, 0xDC, 0xB7, 0xB7, 0xA9, 0xCF, 0x11, 0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65]);
pub const GUID_HEADER_EXTENSION: Guid =
    Guid([0xB5, 0x03, 0xBF, 0x5F, 0x2E, 0xA9, 0xCF, 0x11, 0x8E, 0xE3, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65]);
pub const GUID_CODEC_LIST: Guid =
    Guid([0x40, 0x52, 0xD1, 0x86, 0x1D, 0x31, 0xD0, 0x11, 0xA3, 0xA4, 0x00, 0xA0, 0xC9, 0x03, 0x48, 0xF6]);
pub const GUID_EXTENDED_CONTENT_DESCRIPTION: Guid =
    Guid([0x40, 0xA4, 0xD0, 0xD2, 0x07, 0xE3, 0xD2, 0x11, 0x97, 0xF0, 0x00, 0xA0, 0xC9, 0x5E, 0xA8, 0x50]);
pub const GUID_STREAM_BITRATE_PROPERTIES: Guid =
    Guid([0xCE, 0x75, 0xF8, 0x7B, 0x8D, 0x46, 0xD1, 0x11, 0x8D, 0x82, 0x00, 0x60, 0x97, 0xC9, 0xA2, 0xB2]);

// Stream type GUIDs, only used for reporting.
pub const GUID_STREAM_TYPE_AUDIO: Guid =
    Guid([0x40, 0x9E, 0x69, 0xF8, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B]);
pub const GUID_STREAM_TYPE_VIDEO: Guid =
    Guid([0xC0, 0xEF, 0x19, 0xBC, 0x4D, 0x5B, 0xCF, 0x11, 0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
pub enum ObjectKind {
    #[strum(serialize = "header")]
    Header,
    #[strum(serialize = "file properties")]
    FileProperties,
    #[strum(serialize = "stream properties")]
    StreamProperties,
    #[strum(serialize = "header extension")]
    HeaderExtension,
    #[strum(serialize = "codec list")]
    CodecList,
    #[strum(serialize = "extended content description")]
    ExtendedContentDescription,
    #[strum(serialize = "stream bitrate properties")]
    StreamBitrateProperties,
}

const OBJECT_TABLE: [(Guid, ObjectKind); 7] = [
    (GUID_HEADER, ObjectKind::Header),
    (GUID_FILE_PROPERTIES, ObjectKind::FileProperties),
    (GUID_STREAM_PROPERTIES, ObjectKind::StreamProperties),
    (GUID_HEADER_EXTENSION, ObjectKind::HeaderExtension),
    (GUID_CODEC_LIST, ObjectKind::CodecList),
    (GUID_EXTENDED_CONTENT_DESCRIPTION, ObjectKind::ExtendedContentDescription),
    (GUID_STREAM_BITRATE_PROPERTIES, ObjectKind::StreamBitrateProperties),
];

impl ObjectKind {
    pub fn guid(self) -> Guid {
        match self {
            ObjectKind::Header => GUID_HEADER,
            ObjectKind::FileProperties => GUID_FILE_PROPERTIES,
            ObjectKind::StreamProperties => GUID_STREAM_PROPERTIES,
            ObjectKind::HeaderExtension => GUID_HEADER_EXTENSION,
            ObjectKind::CodecList => GUID_CODEC_LIST,
            ObjectKind::ExtendedContentDescription => GUID_EXTENDED_CONTENT_DESCRIPTION,
            ObjectKind::StreamBitrateProperties => GUID_STREAM_BITRATE_PROPERTIES,
        }
    }
}

/// Resolve an object identifier. `None` means the object is not supported.
pub fn lookup(guid: &Guid) -> Option<ObjectKind> {
    OBJECT_TABLE
        .iter()
        .find(|(known, _)| known == guid)
        .map(|&(_, kind)| kind)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Audio,
    Video,
    Other,
}

pub fn media_type(guid: &Guid) -> MediaType {
    if *guid == GUID_STREAM_TYPE_AUDIO {
        MediaType::Audio
    } else if *guid == GUID_STREAM_TYPE_VIDEO {
        MediaType::Video
    } else {
        MediaType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_round_trips_through_the_table() {
        for kind in ObjectKind::iter() {
            assert_eq!(lookup(&kind.guid()), Some(kind));
        }
    }

    #[test]
    fn media_types_are_not_object_kinds() {
        assert_eq!(lookup(&GUID_STREAM_TYPE_AUDIO), None);
        assert_eq!(lookup(&GUID_STREAM_TYPE_VIDEO), None);
        assert_eq!(media_type(&GUID_STREAM_TYPE_AUDIO), MediaType::Audio);
        assert_eq!(media_type(&GUID_STREAM_TYPE_VIDEO), MediaType::Video);
        assert_eq!(media_type(&GUID_HEADER), MediaType::Other);
    }

    #[test]
    fn lookup_needs_all_sixteen_bytes() {
        let mut almost = GUID_FILE_PROPERTIES.0;
        almost[15] ^= 0x01;
        assert_eq!(lookup(&Guid(almost)), None);
    }

    #[test]
    fn display_uses_registry_form() {
        assert_eq!(GUID_HEADER.to_string(), "75B22630-668E-11CF-A6D9-00AA0062CE6C");
    }

    #[test]
    fn kind_names() {
        assert_eq!(ObjectKind::CodecList.to_string(), "codec list");
        let name: &'static str = ObjectKind::StreamBitrateProperties.into();
        assert_eq!(name, "stream bitrate properties");
    }
}
