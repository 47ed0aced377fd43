//! Decoder for the header object tree of ASF (Advanced Systems Format) files.
//!
//! ```no_run
//! let file = std::io::BufReader::new(std::fs::File::open("movie.wmv")?);
//! let model = asf_core::decode_file(file)?;
//! for object in &model {
//!     println!("{}", object.kind());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cursor;
pub mod error;
pub mod guid;
pub mod limits;
pub mod object;
pub mod report;
pub mod walker;

pub use cursor::ByteCursor;
pub use error::{AsfError, ErrorKind, Result};
pub use guid::{lookup, media_type, Guid, MediaType, ObjectKind};
pub use limits::{DecodeLimits, DecodeLimitsBuilder};
pub use object::{
    AsfObject, CodecEntry, CodecList, ContentDescriptor, ExtendedContentDescription,
    FileProperties, HeaderExtension, HeaderObject, LengthRule, StreamBitrateProperties,
    StreamProperties, StringField, TextEncoding, ValueType,
};
pub use walker::{decode_file, DecodedModel, TreeWalker};
