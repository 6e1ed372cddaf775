//! KLV (Key-Length-Value) triplet handling
//!
//! Essence samples are stored as KLV triplets:
//! - Key: 16-byte Universal Label identifying the essence element
//! - Length: BER-encoded length of the value
//! - Value: the sample bytes

use crate::error::{ClipWriterError, Result};
use crate::ul::{UniversalLabel, UL};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::Write;

/// A KLV triplet
#[derive(Debug, Clone)]
pub struct Klv {
    /// Universal Label (key)
    pub key: UniversalLabel,
    /// Value data
    pub value: Vec<u8>,
    /// Offset of the key in the stream
    pub offset: u64,
}

/// Write a KLV triplet with a fixed-size BER length field
///
/// Essence writers reserve `llen` length bytes so an element's key offset
/// does not depend on its value size. Returns the number of bytes written.
pub fn write_element<W: Write>(writer: &mut W, key: &UL, llen: u8, value: &[u8]) -> Result<usize> {
    let len_bytes = encode_ber_length_fixed(value.len(), llen)?;
    writer.write_all(key)?;
    writer.write_all(&len_bytes)?;
    writer.write_all(value)?;
    Ok(16 + len_bytes.len() + value.len())
}

/// KLV reader over an essence stream
pub struct KlvReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> KlvReader<'a> {
    /// Create new KLV reader
    pub fn new(data: &'a [u8]) -> Self {
        KlvReader { data, position: 0 }
    }

    /// Check if there's more data
    pub fn has_more(&self) -> bool {
        self.position + 16 <= self.data.len()
    }

    /// Read next KLV
    pub fn read_klv(&mut self) -> Result<Option<Klv>> {
        if !self.has_more() {
            return Ok(None);
        }

        let start_offset = self.position;

        let mut key = [0u8; 16];
        key.copy_from_slice(&self.data[self.position..self.position + 16]);

        let (length, len_size) = decode_ber_length(&self.data[self.position + 16..])
            .map_err(|_| invalid_klv("bad length", start_offset))?;
        let value_start = self.position + 16 + len_size;

        let value_end = value_start
            .checked_add(length)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| invalid_klv("truncated value", start_offset))?;

        let value = self.data[value_start..value_end].to_vec();
        self.position = value_end;

        Ok(Some(Klv {
            key: UniversalLabel(key),
            value,
            offset: start_offset as u64,
        }))
    }
}

impl Iterator for KlvReader<'_> {
    type Item = Result<Klv>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_klv().transpose()
    }
}

fn invalid_klv(message: &str, offset: usize) -> ClipWriterError {
    ClipWriterError::InvalidKlv {
        message: message.to_string(),
        offset: offset as u64,
    }
}

/// Encode length as long-form BER occupying exactly `llen` bytes
pub fn encode_ber_length_fixed(length: usize, llen: u8) -> Result<Vec<u8>> {
    if !(2..=9).contains(&llen) {
        return Err(ClipWriterError::InvalidKlv {
            message: format!("unsupported BER length size {llen}"),
            offset: 0,
        });
    }
    let num_bytes = (llen - 1) as usize;
    if num_bytes < 8 && (length as u64) >> (num_bytes * 8) != 0 {
        return Err(ClipWriterError::InvalidKlv {
            message: format!("length {length} does not fit in {llen} BER bytes"),
            offset: 0,
        });
    }

    let mut out = Vec::with_capacity(llen as usize);
    out.write_u8(0x80 | num_bytes as u8)?;
    out.write_uint::<BigEndian>(length as u64, num_bytes)?;
    Ok(out)
}

/// Decode BER length from bytes, returning (length, bytes consumed)
pub fn decode_ber_length(data: &[u8]) -> Result<(usize, usize)> {
    let first_byte = *data.first().ok_or_else(|| invalid_klv("no data for length", 0))?;

    if first_byte < 0x80 {
        return Ok((first_byte as usize, 1));
    }
    if first_byte == 0x80 {
        return Err(invalid_klv("indefinite length not supported", 0));
    }

    let num_bytes = (first_byte & 0x7F) as usize;
    if num_bytes > 8 || data.len() < 1 + num_bytes {
        return Err(invalid_klv("not enough bytes for length", 0));
    }

    let length = BigEndian::read_uint(&data[1..], num_bytes);

    Ok((length as usize, 1 + num_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ber_length_short() {
        assert_eq!(decode_ber_length(&[100]).unwrap(), (100, 1));
        assert_eq!(decode_ber_length(&[0x82, 0x03, 0xE8]).unwrap(), (1000, 3));
        assert!(decode_ber_length(&[0x80]).is_err());
        assert!(decode_ber_length(&[0x83, 0x00]).is_err());
    }

    #[test]
    fn test_ber_length_fixed() {
        let encoded = encode_ber_length_fixed(1000, 4).unwrap();
        assert_eq!(encoded, vec![0x83, 0x00, 0x03, 0xE8]);

        let encoded = encode_ber_length_fixed(5, 9).unwrap();
        assert_eq!(encoded.len(), 9);
        assert_eq!(decode_ber_length(&encoded).unwrap(), (5, 9));

        assert!(encode_ber_length_fixed(0x0100_0000, 4).is_err());
        assert!(encode_ber_length_fixed(1, 1).is_err());
    }

    #[test]
    fn test_write_element_and_read_back() {
        let key = [0x06, 0x0E, 0x2B, 0x34, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut buffer = Vec::new();
        let size = write_element(&mut buffer, &key, 4, &[0xAA, 0xBB, 0xCC]).unwrap();
        assert_eq!(size, 16 + 4 + 3);

        let mut reader = KlvReader::new(&buffer);
        let klv = reader.read_klv().unwrap().unwrap();
        assert_eq!(klv.key.as_bytes(), &key);
        assert_eq!(klv.value, vec![0xAA, 0xBB, 0xCC]);
        assert!(reader.read_klv().unwrap().is_none());
    }

    #[test]
    fn test_reader_truncated() {
        let key = [0x06, 0x0E, 0x2B, 0x34, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut data = key.to_vec();
        data.push(10);
        data.extend_from_slice(&[0u8; 4]);

        let mut reader = KlvReader::new(&data);
        assert!(reader.read_klv().is_err());
    }

    #[test]
    fn test_reader_length_overflow() {
        let key = [0x06, 0x0E, 0x2B, 0x34, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut data = key.to_vec();
        data.push(0x88);
        data.extend_from_slice(&[0xFF; 8]);
        data.extend_from_slice(&[0u8; 4]);

        let mut reader = KlvReader::new(&data);
        assert!(matches!(
            reader.read_klv(),
            Err(ClipWriterError::InvalidKlv { offset: 0, .. })
        ));
    }
}
