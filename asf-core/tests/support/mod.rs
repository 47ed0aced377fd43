//! Builders for synthetic ASF headers.

#![allow(dead_code)]

use asf_core::guid::{
    GUID_CODEC_LIST, GUID_EXTENDED_CONTENT_DESCRIPTION, GUID_FILE_PROPERTIES, GUID_HEADER,
    GUID_HEADER_EXTENSION, GUID_STREAM_BITRATE_PROPERTIES, GUID_STREAM_PROPERTIES,
};
use asf_core::Guid;

/// Little-endian byte sink.
#[derive(Default)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.0.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u64(&mut self, v: u64) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn raw(&mut self, v: &[u8]) -> &mut Self {
        self.0.extend_from_slice(v);
        self
    }

    pub fn guid(&mut self, g: &Guid) -> &mut Self {
        self.raw(g.as_bytes())
    }
}

pub fn utf16(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Wrap a body (everything after the size field) in an identifier and size.
pub fn object(guid: &Guid, body: &[u8]) -> Vec<u8> {
    let mut out = Bytes::default();
    out.guid(guid).u64(24 + body.len() as u64).raw(body);
    out.0
}

pub fn header(num_objects: u32) -> Vec<u8> {
    let mut out = Bytes::default();
    out.guid(&GUID_HEADER).u64(30).u32(num_objects).u8(1).u8(2);
    out.0
}

pub fn file(children: &[Vec<u8>]) -> Vec<u8> {
    let mut out = header(children.len() as u32);
    for child in children {
        out.extend_from_slice(child);
    }
    out
}

#[derive(Default, Clone)]
pub struct FileProps {
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

pub fn file_properties(p: &FileProps) -> Vec<u8> {
    let mut body = Bytes::default();
    body.raw(&[0xAB; 16])
        .u64(p.file_size)
        .u64(p.creation_date)
        .u64(p.data_packets_count)
        .u64(p.play_duration)
        .u64(p.send_duration)
        .u64(p.preroll)
        .u32(p.flags)
        .u32(p.min_data_packet_size)
        .u32(p.max_data_packet_size)
        .u32(p.max_bitrate);
    object(&GUID_FILE_PROPERTIES, &body.0)
}

pub fn stream_properties(
    stream_type: &Guid,
    flags: u16,
    type_specific: &[u8],
    ecc: &[u8],
) -> Vec<u8> {
    let mut body = Bytes::default();
    body.guid(stream_type)
        .raw(&[0; 16])
        .u64(0)
        .u32(type_specific.len() as u32)
        .u32(ecc.len() as u32)
        .u16(flags)
        .u32(0)
        .raw(type_specific)
        .raw(ecc);
    object(&GUID_STREAM_PROPERTIES, &body.0)
}

pub fn header_extension(data: &[u8]) -> Vec<u8> {
    let mut body = Bytes::default();
    body.raw(&[0x11; 16]).u16(6).u32(data.len() as u32).raw(data);
    object(&GUID_HEADER_EXTENSION, &body.0)
}

pub struct Codec<'a> {
    pub codec_type: u16,
    pub name: &'a str,
    pub description: &'a str,
    pub information: &'a [u8],
}

pub fn codec_list(codecs: &[Codec<'_>]) -> Vec<u8> {
    let mut body = Bytes::default();
    body.raw(&[0; 16]).u32(codecs.len() as u32);
    for c in codecs {
        body.u16(c.codec_type)
            .u16(c.name.encode_utf16().count() as u16)
            .raw(&utf16(c.name))
            .u16(c.description.encode_utf16().count() as u16)
            .raw(&utf16(c.description))
            .u16(c.information.len() as u16)
            .raw(c.information);
    }
    object(&GUID_CODEC_LIST, &body.0)
}

pub struct Descriptor<'a> {
    pub name: &'a str,
    pub value_type: u16,
    pub value: &'a [u8],
}

pub fn extended_content_description(descriptors: &[Descriptor<'_>]) -> Vec<u8> {
    let mut body = Bytes::default();
    body.u16(descriptors.len() as u16);
    for d in descriptors {
        let name = utf16(d.name);
        body.u16(name.len() as u16)
            .raw(&name)
            .u16(d.value_type)
            .u16(d.value.len() as u16)
            .raw(d.value);
    }
    object(&GUID_EXTENDED_CONTENT_DESCRIPTION, &body.0)
}

pub fn stream_bitrate_properties(records: u16) -> Vec<u8> {
    let mut body = Bytes::default();
    body.u16(records);
    for i in 0..records {
        body.u16(i + 1).u32(64_000 * (i as u32 + 1));
    }
    object(&GUID_STREAM_BITRATE_PROPERTIES, &body.0)
}
