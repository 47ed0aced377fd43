use thiserror::Error;

use crate::guid::{Guid, ObjectKind};

#[derive(Debug, Error)]
pub enum AsfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("short read at offset {offset}: wanted {wanted} bytes, {available} available")]
    ShortRead {
        offset: u64,
        wanted: usize,
        available: usize,
    },

    #[error("not an ASF file: root object is {0}")]
    InvalidContainer(Guid),

    #[error("unsupported object {guid} at child index {index}")]
    UnsupportedObject { index: u32, guid: Guid },

    #[error("{field} declares {declared}, limit is {limit}")]
    CapacityExceeded {
        field: &'static str,
        declared: usize,
        limit: usize,
    },

    #[error("error parsing {}", describe_object(.index, .kind))]
    Object {
        index: Option<u32>,
        kind: Option<ObjectKind>,
        #[source]
        source: Box<AsfError>,
    },
}

/// Discriminant of an [`AsfError`], looking through object context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    ShortRead,
    InvalidContainer,
    UnsupportedObject,
    CapacityExceeded,
}

impl AsfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AsfError::Io(_) => ErrorKind::Io,
            AsfError::ShortRead { .. } => ErrorKind::ShortRead,
            AsfError::InvalidContainer(_) => ErrorKind::InvalidContainer,
            AsfError::UnsupportedObject { .. } => ErrorKind::UnsupportedObject,
            AsfError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            AsfError::Object { source, .. } => source.kind(),
        }
    }

    /// Child index and kind of the object being decoded when the error occurred.
    ///
    /// An index of `None` refers to the root Header Object.
    pub fn object(&self) -> Option<(Option<u32>, Option<ObjectKind>)> {
        match self {
            AsfError::Object { index, kind, .. } => Some((*index, *kind)),
            AsfError::UnsupportedObject { index, .. } => Some((Some(*index), None)),
            _ => None,
        }
    }

    pub(crate) fn in_object(self, index: Option<u32>, kind: Option<ObjectKind>) -> Self {
        AsfError::Object {
            index,
            kind,
            source: Box::new(self),
        }
    }
}

fn describe_object(index: &Option<u32>, kind: &Option<ObjectKind>) -> String {
    match (index, kind) {
        (None, Some(kind)) => format!("{kind} object"),
        (None, None) => "root object identifier".to_string(),
        (Some(index), Some(kind)) => format!("{kind} object (child {index})"),
        (Some(index), None) => format!("identifier of child {index}"),
    }
}

pub type Result<T> = std::result::Result<T, AsfError>;
