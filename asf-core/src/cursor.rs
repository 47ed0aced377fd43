//! Forward-only little-endian reader.

use std::io::{ErrorKind, Read};

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{AsfError, Result};
use crate::guid::Guid;

pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Fill `buf` completely or fail with `ShortRead`.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(AsfError::ShortRead {
                        offset: self.position,
                        wanted: buf.len(),
                        available: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(AsfError::Io(e)),
            }
        }
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Read an `n`-byte unsigned little-endian integer, `1 <= n <= 8`.
    pub fn read_uint(&mut self, n: usize) -> Result<u64> {
        assert!((1..=8).contains(&n), "integer width out of range: {n}");
        let mut buf = [0u8; 8];
        self.fill(&mut buf[..n])?;
        Ok(LittleEndian::read_uint(&buf[..n], n))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u16(&buf))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u32(&buf))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(LittleEndian::read_u64(&buf))
    }

    pub fn read_guid(&mut self) -> Result<Guid> {
        let mut buf = [0u8; Guid::LEN];
        self.fill(&mut buf)?;
        Ok(Guid(buf))
    }

    /// Read exactly `len` raw bytes.
    ///
    /// The buffer grows with the bytes that arrive, so a large `len` on a
    /// short stream fails with `ShortRead` without allocating `len` up front.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(AsfError::ShortRead {
                offset: self.position,
                wanted: len,
                available: buf.len(),
            });
        }
        self.position += len as u64;
        Ok(buf)
    }

    /// Read and drop exactly `len` bytes.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        let mut scratch = [0u8; 64];
        let mut left = len;
        while left > 0 {
            let n = left.min(scratch.len());
            self.fill(&mut scratch[..n]).map_err(|e| match e {
                AsfError::ShortRead { offset, available, .. } => AsfError::ShortRead {
                    offset,
                    wanted: left,
                    available,
                },
                other => other,
            })?;
            left -= n;
        }
        Ok(())
    }
}
