//! Walks the Header Object and its children in stream order.

use std::io::Read;

use crate::cursor::ByteCursor;
use crate::error::{AsfError, Result};
use crate::guid::{self, Guid, ObjectKind};
use crate::limits::DecodeLimits;
use crate::object::{
    self, AsfObject, CodecList, ExtendedContentDescription, FileProperties, HeaderObject,
    StreamProperties,
};

/// Everything decoded from one ASF header, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedModel {
    header: HeaderObject,
    objects: Vec<AsfObject>,
}

impl DecodedModel {
    pub fn new(header: HeaderObject, objects: Vec<AsfObject>) -> Self {
        Self { header, objects }
    }

    pub fn header(&self) -> &HeaderObject {
        &self.header
    }

    pub fn objects(&self) -> &[AsfObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AsfObject> {
        self.objects.iter()
    }

    pub fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &AsfObject> + '_ {
        self.objects.iter().filter(move |o| o.kind() == kind)
    }

    pub fn file_properties(&self) -> Option<&FileProperties> {
        self.objects.iter().find_map(|o| match o {
            AsfObject::FileProperties(fp) => Some(fp),
            _ => None,
        })
    }

    pub fn stream_properties(&self) -> impl Iterator<Item = &StreamProperties> + '_ {
        self.objects.iter().filter_map(|o| match o {
            AsfObject::StreamProperties(sp) => Some(sp),
            _ => None,
        })
    }

    pub fn codec_list(&self) -> Option<&CodecList> {
        self.objects.iter().find_map(|o| match o {
            AsfObject::CodecList(cl) => Some(cl),
            _ => None,
        })
    }

    pub fn extended_content_description(&self) -> Option<&ExtendedContentDescription> {
        self.objects.iter().find_map(|o| match o {
            AsfObject::ExtendedContentDescription(ecd) => Some(ecd),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a DecodedModel {
    type Item = &'a AsfObject;
    type IntoIter = std::slice::Iter<'a, AsfObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Start,
    HeaderDecoded,
    Children,
    Done,
    Failed,
}

pub struct TreeWalker<R> {
    cursor: ByteCursor<R>,
    limits: DecodeLimits,
    state: WalkState,
}

impl<R: Read> TreeWalker<R> {
    pub fn new(reader: R) -> Self {
        Self::with_limits(reader, DecodeLimits::default())
    }

    pub fn with_limits(reader: R, limits: DecodeLimits) -> Self {
        Self {
            cursor: ByteCursor::new(reader),
            limits,
            state: WalkState::Start,
        }
    }

    fn transition(&mut self, next: WalkState) {
        log::trace!("walk state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Decode the whole header tree. The first error aborts the walk.
    pub fn walk(mut self) -> Result<DecodedModel> {
        match self.walk_inner() {
            Ok(model) => {
                self.transition(WalkState::Done);
                Ok(model)
            }
            Err(e) => {
                self.transition(WalkState::Failed);
                Err(e)
            }
        }
    }

    fn walk_inner(&mut self) -> Result<DecodedModel> {
        let root = self.cursor.read_guid().map_err(|e| e.in_object(None, None))?;
        if guid::lookup(&root) != Some(ObjectKind::Header) {
            return Err(AsfError::InvalidContainer(root));
        }

        let header = object::decode_header(&mut self.cursor)
            .map_err(|e| e.in_object(None, Some(ObjectKind::Header)))?;
        log::debug!(
            "header object: {} bytes, {} child objects",
            header.object_size,
            header.num_objects
        );
        let num_objects = header.num_objects;
        self.transition(WalkState::HeaderDecoded);

        let mut objects = Vec::new();
        for index in 0..num_objects {
            objects.push(self.decode_child(index)?);
            if self.state != WalkState::Children {
                self.transition(WalkState::Children);
            }
        }

        Ok(DecodedModel { header, objects })
    }

    fn decode_child(&mut self, index: u32) -> Result<AsfObject> {
        let start = self.cursor.position();
        let id: Guid = self
            .cursor
            .read_guid()
            .map_err(|e| e.in_object(Some(index), None))?;

        let kind = match guid::lookup(&id) {
            Some(kind) => kind,
            None => return Err(AsfError::UnsupportedObject { index, guid: id }),
        };

        let object = match AsfObject::decode(kind, &mut self.cursor, &self.limits) {
            Ok(Some(object)) => object,
            // Objects nest one level only.
            Ok(None) => return Err(AsfError::UnsupportedObject { index, guid: id }),
            Err(e) => return Err(e.in_object(Some(index), Some(kind))),
        };

        let consumed = self.cursor.position() - start;
        log::debug!(
            "child {index}: {kind} object at offset {start}, declared {} bytes",
            object.object_size()
        );
        if consumed != object.object_size() {
            log::debug!(
                "child {index}: consumed {consumed} bytes, object declares {}",
                object.object_size()
            );
        }

        Ok(object)
    }
}

/// Decode an ASF header tree from `reader` using the default limits.
pub fn decode_file<R: Read>(reader: R) -> Result<DecodedModel> {
    TreeWalker::new(reader).walk()
}
