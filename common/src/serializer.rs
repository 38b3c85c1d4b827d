//! Binary Serialization
//!
//! Length-prefixed, deterministic binary codec used for every record the
//! registry persists. The same bytes must decode identically on every
//! validator, so all integers are big-endian and all collections carry an
//! explicit length prefix.

use primitive_types::U256;
use thiserror::Error;

/// Errors raised while decoding a byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReaderError {
    #[error("Not enough bytes available")]
    InvalidSize,
    #[error("Invalid value encountered")]
    InvalidValue,
    #[error("Invalid UTF-8 string")]
    InvalidString,
}

/// Incremental writer backed by a growable buffer
#[derive(Debug, Default)]
pub struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(value as u8);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: &u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: &u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn total_write(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Incremental reader over a borrowed byte slice
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    total: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, total: 0 }
    }

    pub fn read<T: Serializer>(&mut self) -> Result<T, ReaderError> {
        T::read(self)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, ReaderError> {
        if self.size() < count {
            return Err(ReaderError::InvalidSize);
        }
        let bytes = self.bytes[self.total..self.total + count].to_vec();
        self.total += count;
        Ok(bytes)
    }

    pub fn read_bytes_32(&mut self) -> Result<[u8; 32], ReaderError> {
        let bytes = self.read_bytes(32)?;
        bytes.try_into().map_err(|_| ReaderError::InvalidSize)
    }

    pub fn read_bool(&mut self) -> Result<bool, ReaderError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(ReaderError::InvalidValue),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, ReaderError> {
        if self.size() == 0 {
            return Err(ReaderError::InvalidSize);
        }
        let byte = self.bytes[self.total];
        self.total += 1;
        Ok(byte)
    }

    pub fn read_u16(&mut self) -> Result<u16, ReaderError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::InvalidSize)?,
        ))
    }

    pub fn read_u32(&mut self) -> Result<u32, ReaderError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::InvalidSize)?,
        ))
    }

    pub fn read_u64(&mut self) -> Result<u64, ReaderError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_be_bytes(
            bytes.try_into().map_err(|_| ReaderError::InvalidSize)?,
        ))
    }

    /// Remaining unread bytes
    pub fn size(&self) -> usize {
        self.bytes.len() - self.total
    }

    pub fn total_read(&self) -> usize {
        self.total
    }
}

/// Deterministic binary codec
pub trait Serializer: Sized {
    fn write(&self, writer: &mut Writer);

    fn read(reader: &mut Reader) -> Result<Self, ReaderError>;

    fn size(&self) -> usize;

    fn to_bytes(&self) -> Vec<u8> {
        let mut writer = Writer::with_capacity(self.size());
        self.write(&mut writer);
        writer.bytes()
    }

    /// Decode from bytes, rejecting trailing garbage
    fn from_bytes(bytes: &[u8]) -> Result<Self, ReaderError> {
        let mut reader = Reader::new(bytes);
        let value = Self::read(&mut reader)?;
        if reader.size() != 0 {
            return Err(ReaderError::InvalidSize);
        }
        Ok(value)
    }
}

impl Serializer for u8 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u8(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u8()
    }

    fn size(&self) -> usize {
        1
    }
}

impl Serializer for u16 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u16(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u16()
    }

    fn size(&self) -> usize {
        2
    }
}

impl Serializer for u32 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u32(self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u32()
    }

    fn size(&self) -> usize {
        4
    }
}

impl Serializer for u64 {
    fn write(&self, writer: &mut Writer) {
        writer.write_u64(self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_u64()
    }

    fn size(&self) -> usize {
        8
    }
}

impl Serializer for bool {
    fn write(&self, writer: &mut Writer) {
        writer.write_bool(*self);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        reader.read_bool()
    }

    fn size(&self) -> usize {
        1
    }
}

impl Serializer for String {
    fn write(&self, writer: &mut Writer) {
        debug_assert!(self.len() <= u16::MAX as usize, "string too long to encode");
        let len = self.len().min(u16::MAX as usize) as u16;
        writer.write_u16(len);
        writer.write_bytes(&self.as_bytes()[..len as usize]);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let len = reader.read_u16()? as usize;
        let bytes = reader.read_bytes(len)?;
        String::from_utf8(bytes).map_err(|_| ReaderError::InvalidString)
    }

    fn size(&self) -> usize {
        2 + self.len()
    }
}

impl<T: Serializer> Serializer for Option<T> {
    fn write(&self, writer: &mut Writer) {
        match self {
            Some(value) => {
                writer.write_bool(true);
                value.write(writer);
            }
            None => writer.write_bool(false),
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        if reader.read_bool()? {
            Ok(Some(T::read(reader)?))
        } else {
            Ok(None)
        }
    }

    fn size(&self) -> usize {
        1 + self.as_ref().map_or(0, |value| value.size())
    }
}

impl<T: Serializer> Serializer for Vec<T> {
    fn write(&self, writer: &mut Writer) {
        debug_assert!(self.len() <= u16::MAX as usize, "vec too long to encode");
        let len = self.len().min(u16::MAX as usize) as u16;
        writer.write_u16(len);
        for item in &self[..len as usize] {
            item.write(writer);
        }
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let count = reader.read_u16()? as usize;
        let mut items = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            items.push(T::read(reader)?);
        }
        Ok(items)
    }

    fn size(&self) -> usize {
        2 + self.iter().map(Serializer::size).sum::<usize>()
    }
}

// Minimal big-endian encoding with a one-byte length prefix. A zero value
// is encoded as a zero-length payload.
impl Serializer for U256 {
    fn write(&self, writer: &mut Writer) {
        let bytes = self.to_big_endian();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        let trimmed = &bytes[skip..];
        writer.write_u8(trimmed.len() as u8);
        writer.write_bytes(trimmed);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        let len = reader.read_u8()? as usize;
        if len > 32 {
            return Err(ReaderError::InvalidSize);
        }
        let bytes = reader.read_bytes(len)?;
        if bytes.first() == Some(&0) {
            // Non-minimal encodings would break byte-for-byte replay
            return Err(ReaderError::InvalidValue);
        }
        Ok(U256::from_big_endian(&bytes))
    }

    fn size(&self) -> usize {
        1 + (32 - self.to_big_endian().iter().take_while(|b| **b == 0).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_roundtrip() {
        let mut writer = Writer::new();
        writer.write_u8(7);
        writer.write_u16(300);
        writer.write_u32(&70_000);
        writer.write_u64(&u64::MAX);
        writer.write_bool(true);

        let bytes = writer.bytes();
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_u16().unwrap(), 300);
        assert_eq!(reader.read_u32().unwrap(), 70_000);
        assert_eq!(reader.read_u64().unwrap(), u64::MAX);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_string_roundtrip() {
        let value = "AliceCoin".to_string();
        let decoded = String::from_bytes(&value.to_bytes()).unwrap();
        assert_eq!(decoded, value);
        assert_eq!(value.size(), value.to_bytes().len());
    }

    #[test]
    fn test_invalid_bool_rejected() {
        let mut reader = Reader::new(&[2]);
        assert_eq!(reader.read_bool(), Err(ReaderError::InvalidValue));
    }

    #[test]
    fn test_u256_minimal_encoding() {
        let value = U256::from(1000u64);
        let bytes = value.to_bytes();
        assert_eq!(bytes, vec![2, 0x03, 0xe8]);
        assert_eq!(U256::from_bytes(&bytes).unwrap(), value);

        // Zero encodes as an empty payload
        assert_eq!(U256::zero().to_bytes(), vec![0]);
        assert_eq!(U256::from_bytes(&[0]).unwrap(), U256::zero());

        // Leading-zero padding is not canonical
        assert!(U256::from_bytes(&[3, 0x00, 0x03, 0xe8]).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = 42u64.to_bytes();
        bytes.push(0xff);
        assert_eq!(u64::from_bytes(&bytes), Err(ReaderError::InvalidSize));
    }
}
