//! Presentation of decoded records: labels, value interpretation and a text dump.

use std::fmt;
use std::io::{self, Write};

use byteorder::{ByteOrder, LittleEndian};

use crate::guid::MediaType;
use crate::object::{
    AsfObject, CodecList, ContentDescriptor, ExtendedContentDescription, FileProperties,
    HeaderExtension, HeaderObject, StreamBitrateProperties, StreamProperties, StringField,
    TextEncoding, ValueType,
};
use crate::walker::DecodedModel;

const SEPARATOR: &str = "--------------------------------------------------";

pub fn media_type_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Audio => "Audio",
        MediaType::Video => "Video",
        MediaType::Other => "?",
    }
}

pub fn codec_type_label(codec_type: u16) -> &'static str {
    match codec_type {
        0x0001 => "Video",
        0x0002 => "Audio",
        _ => "Unknown",
    }
}

/// Decode a string field according to its encoding hint, dropping trailing NULs.
pub fn decode_text(field: &StringField) -> String {
    let text = match field.encoding {
        TextEncoding::Utf16Le => {
            let (text, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(&field.bytes);
            text
        }
        TextEncoding::SingleByte => {
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(&field.bytes);
            text
        }
    };
    text.trim_end_matches('\0').to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorValue {
    Text(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Dword(u32),
    Qword(u64),
    Word(u16),
    Unknown { tag: u16, bytes: Vec<u8> },
}

/// Little-endian value of at most `width` leading bytes, zero-extended.
fn le_value(bytes: &[u8], width: usize) -> u64 {
    let n = bytes.len().min(width);
    if n == 0 {
        return 0;
    }
    LittleEndian::read_uint(&bytes[..n], n)
}

pub fn interpret_value(descriptor: &ContentDescriptor) -> DescriptorValue {
    let bytes = &descriptor.value;
    match descriptor.value_type() {
        Some(ValueType::UnicodeString) => {
            let (text, _) = encoding_rs::UTF_16LE.decode_without_bom_handling(bytes);
            DescriptorValue::Text(text.trim_end_matches('\0').to_string())
        }
        Some(ValueType::ByteArray) => DescriptorValue::Bytes(bytes.clone()),
        Some(ValueType::Bool) => DescriptorValue::Bool(le_value(bytes, 4) != 0),
        Some(ValueType::Dword) => DescriptorValue::Dword(le_value(bytes, 4) as u32),
        Some(ValueType::Qword) => DescriptorValue::Qword(le_value(bytes, 8)),
        Some(ValueType::Word) => DescriptorValue::Word(le_value(bytes, 2) as u16),
        None => DescriptorValue::Unknown {
            tag: descriptor.value_data_type,
            bytes: bytes.clone(),
        },
    }
}

impl fmt::Display for DescriptorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorValue::Text(s) => write!(f, "{s}"),
            DescriptorValue::Bytes(bytes) => {
                let mut first = true;
                for b in bytes {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "{b}")?;
                    first = false;
                }
                Ok(())
            }
            DescriptorValue::Bool(v) => write!(f, "{v}"),
            DescriptorValue::Dword(v) => write!(f, "{v}"),
            DescriptorValue::Qword(v) => write!(f, "{v}"),
            DescriptorValue::Word(v) => write!(f, "{v}"),
            DescriptorValue::Unknown { tag, bytes } => {
                write!(f, "<value type {tag}, {} bytes>", bytes.len())
            }
        }
    }
}

fn end_section<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{SEPARATOR}")
}

fn write_header<W: Write>(w: &mut W, header: &HeaderObject) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "HEADER OBJECT")?;
    writeln!(w, "    Object size: {} bytes", header.object_size)?;
    writeln!(w, "    Number of header objects: {}", header.num_objects)?;
    end_section(w)
}

fn write_file_properties<W: Write>(w: &mut W, fp: &FileProperties) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "FILE PROPERTIES OBJECT")?;
    writeln!(w, "    Object size: {} bytes", fp.object_size)?;
    writeln!(w, "    File ID: {}", fp.file_id)?;
    writeln!(w, "    File size: {} bytes", fp.file_size)?;
    writeln!(w, "    Data packets: {}", fp.data_packets_count)?;
    writeln!(w, "    Play duration: {} ms", fp.play_duration / 10_000)?;
    writeln!(w, "    Send duration: {} ms", fp.send_duration / 10_000)?;
    writeln!(w, "    Preroll: {} ms", fp.preroll)?;
    writeln!(w, "    Flags: {:#x}", fp.flags)?;
    writeln!(w, "    Min data packet size: {} bytes", fp.min_data_packet_size)?;
    writeln!(w, "    Max data packet size: {} bytes", fp.max_data_packet_size)?;
    writeln!(w, "    Max bitrate: {} bps", fp.max_bitrate)?;
    end_section(w)
}

fn write_stream_properties<W: Write>(w: &mut W, sp: &StreamProperties) -> io::Result<()> {
    let media_type = sp.media_type();
    writeln!(w)?;
    writeln!(w, "STREAM PROPERTIES OBJECT")?;
    writeln!(w, "    Object size: {} bytes", sp.object_size)?;
    writeln!(w, "    Stream type: {}", media_type_label(media_type))?;
    writeln!(w, "    Stream number: {}", sp.stream_number())?;
    let data_label = match media_type {
        MediaType::Audio => "Audio type data length",
        MediaType::Video => "Video type data length",
        MediaType::Other => "Type specific data length",
    };
    writeln!(w, "    {data_label}: {} bytes", sp.type_specific_data_length)?;
    writeln!(
        w,
        "    Error correction data length: {} bytes",
        sp.error_correction_data_length
    )?;
    if sp.is_encrypted() {
        writeln!(w, "    Encrypted: yes")?;
    }
    end_section(w)
}

fn write_header_extension<W: Write>(w: &mut W, ext: &HeaderExtension) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "HEADER EXTENSION OBJECT")?;
    writeln!(w, "    Object size: {} bytes", ext.object_size)?;
    writeln!(w, "    Header extension data size: {} bytes", ext.data_size)?;
    end_section(w)
}

fn write_codec_list<W: Write>(w: &mut W, list: &CodecList) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "CODEC LIST OBJECT")?;
    writeln!(w, "    Object size: {} bytes", list.object_size)?;
    writeln!(w, "    Number of codecs: {}", list.codec_entry_count)?;
    for (i, entry) in list.entries.iter().enumerate() {
        writeln!(w)?;
        writeln!(w, "        CODEC {}", i + 1)?;
        writeln!(w, "            Type: {}", codec_type_label(entry.codec_type))?;
        writeln!(w, "            Name: {}", decode_text(&entry.codec_name))?;
        writeln!(w, "            Description: {}", decode_text(&entry.codec_description))?;
        writeln!(
            w,
            "            Information: {}",
            decode_text(&entry.codec_information).escape_debug()
        )?;
    }
    end_section(w)
}

fn write_extended_content_description<W: Write>(
    w: &mut W,
    ecd: &ExtendedContentDescription,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "EXTENDED CONTENT DESCRIPTION OBJECT")?;
    writeln!(w, "    Object size: {} bytes", ecd.object_size)?;
    writeln!(w, "    Number of content descriptors: {}", ecd.descriptor_count)?;
    for (i, descriptor) in ecd.descriptors.iter().enumerate() {
        writeln!(w)?;
        writeln!(w, "        CONTENT DESCRIPTOR {}", i + 1)?;
        writeln!(
            w,
            "            {}: {}",
            decode_text(&descriptor.name),
            interpret_value(descriptor)
        )?;
    }
    end_section(w)
}

fn write_stream_bitrate_properties<W: Write>(
    w: &mut W,
    sbp: &StreamBitrateProperties,
) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "STREAM BITRATE PROPERTIES OBJECT")?;
    writeln!(w, "    Object size: {} bytes", sbp.object_size)?;
    writeln!(w, "    Number of records: {}", sbp.bitrate_records_count)?;
    end_section(w)
}

pub fn write_object<W: Write>(w: &mut W, object: &AsfObject) -> io::Result<()> {
    match object {
        AsfObject::FileProperties(o) => write_file_properties(w, o),
        AsfObject::StreamProperties(o) => write_stream_properties(w, o),
        AsfObject::HeaderExtension(o) => write_header_extension(w, o),
        AsfObject::CodecList(o) => write_codec_list(w, o),
        AsfObject::ExtendedContentDescription(o) => write_extended_content_description(w, o),
        AsfObject::StreamBitrateProperties(o) => write_stream_bitrate_properties(w, o),
    }
}

/// Render the whole model, one section per object.
pub fn write_report<W: Write>(w: &mut W, model: &DecodedModel) -> io::Result<()> {
    write_header(w, model.header())?;
    for object in model {
        write_object(w, object)?;
    }
    Ok(())
}
