//! Binary index snapshot
//!
//! Layout (little-endian):
//!
//! ```text
//! magic "ARVX" | version u32 | dim u32 | count u64
//! count * dim f32 vectors, insertion order
//! count documents, each u32 byte length + UTF-8 bytes
//! SHA-256 of everything above (32 bytes)
//! ```

use sha2::{Digest, Sha256};

use crate::error::StoreError;
use crate::store::EmbeddingStore;

const MAGIC: &[u8; 4] = b"ARVX";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 4 + 8;
const CHECKSUM_LEN: usize = 32;

/// Serialize a store into snapshot bytes
pub fn encode(store: &EmbeddingStore) -> Result<Vec<u8>, StoreError> {
    let dim = u32::try_from(store.dim())
        .map_err(|_| StoreError::TooLarge("dimension does not fit in u32"))?;

    let doc_bytes: usize = store.iter().map(|(_, doc)| 4 + doc.len()).sum();
    let mut buf = Vec::with_capacity(
        HEADER_LEN + store.raw_vectors().len() * 4 + doc_bytes + CHECKSUM_LEN,
    );

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&VERSION.to_le_bytes());
    buf.extend_from_slice(&dim.to_le_bytes());
    buf.extend_from_slice(&(store.len() as u64).to_le_bytes());

    for value in store.raw_vectors() {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    for (_, doc) in store.iter() {
        let len = u32::try_from(doc.len())
            .map_err(|_| StoreError::TooLarge("document longer than 4 GiB"))?;
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(doc.as_bytes());
    }

    let checksum = Sha256::digest(&buf);
    buf.extend_from_slice(&checksum);

    Ok(buf)
}

/// Rebuild a store from snapshot bytes
pub fn decode(bytes: &[u8]) -> Result<EmbeddingStore, StoreError> {
    if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
        return Err(StoreError::corrupt("snapshot too short"));
    }

    let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if Sha256::digest(body).as_slice() != checksum {
        return Err(StoreError::ChecksumMismatch);
    }

    let mut reader = Reader::new(body);

    if reader.take(4)? != MAGIC {
        return Err(StoreError::corrupt("bad magic"));
    }

    let version = reader.u32()?;
    if version != VERSION {
        return Err(StoreError::corrupt(format!(
            "unsupported snapshot version {}",
            version
        )));
    }

    let dim = reader.u32()? as usize;
    if dim == 0 {
        return Err(StoreError::InvalidDimension);
    }

    let count = usize::try_from(reader.u64()?)
        .map_err(|_| StoreError::corrupt("document count overflows"))?;
    let values = count
        .checked_mul(dim)
        .ok_or_else(|| StoreError::corrupt("vector block overflows"))?;

    let vector_bytes = reader.take(
        values
            .checked_mul(4)
            .ok_or_else(|| StoreError::corrupt("vector block overflows"))?,
    )?;
    let vectors: Vec<f32> = vector_bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    let mut documents = Vec::with_capacity(count.min(reader.remaining()));
    for i in 0..count {
        let len = reader.u32()? as usize;
        let raw = reader.take(len)?;
        let doc = std::str::from_utf8(raw)
            .map_err(|_| StoreError::corrupt(format!("document {} is not UTF-8", i)))?;
        documents.push(doc.to_string());
    }

    if reader.remaining() != 0 {
        return Err(StoreError::corrupt(format!(
            "{} trailing bytes",
            reader.remaining()
        )));
    }

    EmbeddingStore::from_parts(dim, vectors, documents)
}

/// Hex SHA-256 of a snapshot body, as stored in its trailer
pub fn checksum_hex(bytes: &[u8]) -> Option<String> {
    bytes
        .len()
        .checked_sub(CHECKSUM_LEN)
        .map(|start| hex::encode(&bytes[start..]))
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], StoreError> {
        if n > self.remaining() {
            return Err(StoreError::corrupt("unexpected end of snapshot"));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32, StoreError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn u64(&mut self) -> Result<u64, StoreError> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(u64::from_le_bytes(raw))
    }
}
