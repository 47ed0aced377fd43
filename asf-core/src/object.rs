//! Header object records and their decoders.
//!
//! Every decoder starts right after the object's 16-byte identifier, which
//! the walker has already consumed, and reads the fields in wire order.

use std::io::Read;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::guid::{self, Guid, MediaType, ObjectKind};
use crate::limits::{self, DecodeLimits};

/// How a declared string length converts to a byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthRule {
    /// The length counts 16-bit characters.
    WideChars,
    /// The length counts bytes.
    Bytes,
}

impl LengthRule {
    pub fn byte_len(self, declared: u16) -> usize {
        match self {
            LengthRule::WideChars => declared as usize * 2,
            LengthRule::Bytes => declared as usize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf16Le,
    SingleByte,
}

/// A length-prefixed string kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringField {
    pub declared_length: u16,
    pub rule: LengthRule,
    pub encoding: TextEncoding,
    pub bytes: Vec<u8>,
}

impl StringField {
    fn decode<R: Read>(
        cursor: &mut ByteCursor<R>,
        field: &'static str,
        rule: LengthRule,
        encoding: TextEncoding,
        limit: usize,
    ) -> Result<Self> {
        let declared_length = cursor.read_u16()?;
        let len = rule.byte_len(declared_length);
        limits::check(field, len, limit)?;
        let bytes = cursor.read_bytes(len)?;
        Ok(Self {
            declared_length,
            rule,
            encoding,
            bytes,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderObject {
    pub object_size: u64,
    pub num_objects: u32,
}

pub fn decode_header<R: Read>(cursor: &mut ByteCursor<R>) -> Result<HeaderObject> {
    let object_size = cursor.read_u64()?;
    let num_objects = cursor.read_u32()?;
    let _reserved1 = cursor.read_u8()?;
    let _reserved2 = cursor.read_u8()?;
    Ok(HeaderObject {
        object_size,
        num_objects,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileProperties {
    pub object_size: u64,
    pub file_id: Guid,
    pub file_size: u64,
    pub creation_date: u64,
    pub data_packets_count: u64,
    pub play_duration: u64,
    pub send_duration: u64,
    pub preroll: u64,
    pub flags: u32,
    pub min_data_packet_size: u32,
    pub max_data_packet_size: u32,
    pub max_bitrate: u32,
}

pub fn decode_file_properties<R: Read>(cursor: &mut ByteCursor<R>) -> Result<FileProperties> {
    Ok(FileProperties {
        object_size: cursor.read_u64()?,
        file_id: cursor.read_guid()?,
        file_size: cursor.read_u64()?,
        creation_date: cursor.read_u64()?,
        data_packets_count: cursor.read_u64()?,
        play_duration: cursor.read_u64()?,
        send_duration: cursor.read_u64()?,
        preroll: cursor.read_u64()?,
        flags: cursor.read_u32()?,
        min_data_packet_size: cursor.read_u32()?,
        max_data_packet_size: cursor.read_u32()?,
        max_bitrate: cursor.read_u32()?,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamProperties {
    pub object_size: u64,
    pub stream_type: Guid,
    pub error_correction_type: Guid,
    pub time_offset: u64,
    pub type_specific_data_length: u32,
    pub error_correction_data_length: u32,
    pub flags: u16,
    pub type_specific_data: Vec<u8>,
    pub error_correction_data: Vec<u8>,
}

impl StreamProperties {
    pub fn stream_number(&self) -> u8 {
        (self.flags & 0x7F) as u8
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & 0x8000 != 0
    }

    pub fn media_type(&self) -> MediaType {
        guid::media_type(&self.stream_type)
    }
}

pub fn decode_stream_properties<R: Read>(
    cursor: &mut ByteCursor<R>,
    limits: &DecodeLimits,
) -> Result<StreamProperties> {
    let object_size = cursor.read_u64()?;
    let stream_type = cursor.read_guid()?;
    let error_correction_type = cursor.read_guid()?;
    let time_offset = cursor.read_u64()?;
    let type_specific_data_length = cursor.read_u32()?;
    let error_correction_data_length = cursor.read_u32()?;
    let flags = cursor.read_u16()?;
    let _reserved = cursor.read_u32()?;

    limits::check(
        "type specific data",
        type_specific_data_length as usize,
        limits.type_specific_data_bytes,
    )?;
    let type_specific_data = cursor.read_bytes(type_specific_data_length as usize)?;

    limits::check(
        "error correction data",
        error_correction_data_length as usize,
        limits.error_correction_data_bytes,
    )?;
    let error_correction_data = cursor.read_bytes(error_correction_data_length as usize)?;

    Ok(StreamProperties {
        object_size,
        stream_type,
        error_correction_type,
        time_offset,
        type_specific_data_length,
        error_correction_data_length,
        flags,
        type_specific_data,
        error_correction_data,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderExtension {
    pub object_size: u64,
    pub data_size: u32,
    pub data: Vec<u8>,
}

pub fn decode_header_extension<R: Read>(
    cursor: &mut ByteCursor<R>,
    limits: &DecodeLimits,
) -> Result<HeaderExtension> {
    let object_size = cursor.read_u64()?;
    let _reserved1 = cursor.read_guid()?;
    let _reserved2 = cursor.read_u16()?;
    let data_size = cursor.read_u32()?;
    limits::check(
        "header extension data",
        data_size as usize,
        limits.header_extension_data_bytes,
    )?;
    let data = cursor.read_bytes(data_size as usize)?;
    Ok(HeaderExtension {
        object_size,
        data_size,
        data,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecEntry {
    pub codec_type: u16,
    pub codec_name: StringField,
    pub codec_description: StringField,
    pub codec_information: StringField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecList {
    pub object_size: u64,
    pub codec_entry_count: u32,
    pub entries: Vec<CodecEntry>,
}

fn decode_codec_entry<R: Read>(
    cursor: &mut ByteCursor<R>,
    limits: &DecodeLimits,
) -> Result<CodecEntry> {
    let codec_type = cursor.read_u16()?;
    let codec_name = StringField::decode(
        cursor,
        "codec name",
        LengthRule::WideChars,
        TextEncoding::Utf16Le,
        limits.codec_name_bytes,
    )?;
    let codec_description = StringField::decode(
        cursor,
        "codec description",
        LengthRule::WideChars,
        TextEncoding::Utf16Le,
        limits.codec_description_bytes,
    )?;
    let codec_information = StringField::decode(
        cursor,
        "codec information",
        LengthRule::Bytes,
        TextEncoding::SingleByte,
        limits.codec_information_bytes,
    )?;
    Ok(CodecEntry {
        codec_type,
        codec_name,
        codec_description,
        codec_information,
    })
}

pub fn decode_codec_list<R: Read>(
    cursor: &mut ByteCursor<R>,
    limits: &DecodeLimits,
) -> Result<CodecList> {
    let object_size = cursor.read_u64()?;
    let _reserved = cursor.read_guid()?;
    let codec_entry_count = cursor.read_u32()?;
    limits::check("codec entry count", codec_entry_count as usize, limits.codec_entries)?;

    let mut entries = Vec::new();
    for _ in 0..codec_entry_count {
        entries.push(decode_codec_entry(cursor, limits)?);
    }

    Ok(CodecList {
        object_size,
        codec_entry_count,
        entries,
    })
}

/// Wire tag of a content descriptor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ValueType {
    UnicodeString = 0,
    ByteArray = 1,
    Bool = 2,
    Dword = 3,
    Qword = 4,
    Word = 5,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDescriptor {
    pub name: StringField,
    pub value_data_type: u16,
    pub value_length: u16,
    pub value: Vec<u8>,
}

impl ContentDescriptor {
    /// `None` for tags outside the known set.
    pub fn value_type(&self) -> Option<ValueType> {
        ValueType::from_u16(self.value_data_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedContentDescription {
    pub object_size: u64,
    pub descriptor_count: u16,
    pub descriptors: Vec<ContentDescriptor>,
}

fn decode_content_descriptor<R: Read>(
    cursor: &mut ByteCursor<R>,
    limits: &DecodeLimits,
) -> Result<ContentDescriptor> {
    // The name length is a byte count even though the name is UTF-16.
    let name = StringField::decode(
        cursor,
        "descriptor name",
        LengthRule::Bytes,
        TextEncoding::Utf16Le,
        limits.descriptor_name_bytes,
    )?;
    let value_data_type = cursor.read_u16()?;
    let value_length = cursor.read_u16()?;
    limits::check(
        "descriptor value",
        value_length as usize,
        limits.descriptor_value_bytes,
    )?;
    let value = cursor.read_bytes(value_length as usize)?;
    Ok(ContentDescriptor {
        name,
        value_data_type,
        value_length,
        value,
    })
}

pub fn decode_extended_content_description<R: Read>(
    cursor: &mut ByteCursor<R>,
    limits: &DecodeLimits,
) -> Result<ExtendedContentDescription> {
    let object_size = cursor.read_u64()?;
    let descriptor_count = cursor.read_u16()?;
    limits::check(
        "content descriptor count",
        descriptor_count as usize,
        limits.content_descriptors,
    )?;

    let mut descriptors = Vec::new();
    for _ in 0..descriptor_count {
        descriptors.push(decode_content_descriptor(cursor, limits)?);
    }

    Ok(ExtendedContentDescription {
        object_size,
        descriptor_count,
        descriptors,
    })
}

pub const BITRATE_RECORD_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamBitrateProperties {
    pub object_size: u64,
    pub bitrate_records_count: u16,
}

pub fn decode_stream_bitrate_properties<R: Read>(
    cursor: &mut ByteCursor<R>,
) -> Result<StreamBitrateProperties> {
    let object_size = cursor.read_u64()?;
    let bitrate_records_count = cursor.read_u16()?;
    // Records are read to keep the cursor aligned; their contents are dropped.
    for _ in 0..bitrate_records_count {
        cursor.skip(BITRATE_RECORD_SIZE)?;
    }
    Ok(StreamBitrateProperties {
        object_size,
        bitrate_records_count,
    })
}

/// A decoded child of the Header Object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsfObject {
    FileProperties(FileProperties),
    StreamProperties(StreamProperties),
    HeaderExtension(HeaderExtension),
    CodecList(CodecList),
    ExtendedContentDescription(ExtendedContentDescription),
    StreamBitrateProperties(StreamBitrateProperties),
}

impl AsfObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            AsfObject::FileProperties(_) => ObjectKind::FileProperties,
            AsfObject::StreamProperties(_) => ObjectKind::StreamProperties,
            AsfObject::HeaderExtension(_) => ObjectKind::HeaderExtension,
            AsfObject::CodecList(_) => ObjectKind::CodecList,
            AsfObject::ExtendedContentDescription(_) => ObjectKind::ExtendedContentDescription,
            AsfObject::StreamBitrateProperties(_) => ObjectKind::StreamBitrateProperties,
        }
    }

    pub fn object_size(&self) -> u64 {
        match self {
            AsfObject::FileProperties(o) => o.object_size,
            AsfObject::StreamProperties(o) => o.object_size,
            AsfObject::HeaderExtension(o) => o.object_size,
            AsfObject::CodecList(o) => o.object_size,
            AsfObject::ExtendedContentDescription(o) => o.object_size,
            AsfObject::StreamBitrateProperties(o) => o.object_size,
        }
    }

    /// Decode the child object of `kind`. Returns `None` for `Header`, which
    /// cannot appear as a child.
    pub fn decode<R: Read>(
        kind: ObjectKind,
        cursor: &mut ByteCursor<R>,
        limits: &DecodeLimits,
    ) -> Result<Option<Self>> {
        let object = match kind {
            ObjectKind::Header => return Ok(None),
            ObjectKind::FileProperties => {
                AsfObject::FileProperties(decode_file_properties(cursor)?)
            }
            ObjectKind::StreamProperties => {
                AsfObject::StreamProperties(decode_stream_properties(cursor, limits)?)
            }
            ObjectKind::HeaderExtension => {
                AsfObject::HeaderExtension(decode_header_extension(cursor, limits)?)
            }
            ObjectKind::CodecList => AsfObject::CodecList(decode_codec_list(cursor, limits)?),
            ObjectKind::ExtendedContentDescription => AsfObject::ExtendedContentDescription(
                decode_extended_content_description(cursor, limits)?,
            ),
            ObjectKind::StreamBitrateProperties => {
                AsfObject::StreamBitrateProperties(decode_stream_bitrate_properties(cursor)?)
            }
        };
        Ok(Some(object))
    }
}
