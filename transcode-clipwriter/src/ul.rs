//! Universal Labels for essence elements
//!
//! Each family wraps its samples in KLV essence elements whose 16-byte key
//! identifies the item type (picture or sound), the element type (codec and
//! wrapping) and the output track number.

use crate::essence::EssenceType;
use std::fmt;

/// A 16-byte Universal Label
pub type UL = [u8; 16];

/// Universal Label wrapper with helper methods
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniversalLabel(pub UL);

impl UniversalLabel {
    /// Create from raw bytes
    pub fn new(bytes: UL) -> Self {
        UniversalLabel(bytes)
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &UL {
        &self.0
    }

    /// Check if this is a SMPTE-registered label (starts with 06 0E 2B 34)
    pub fn is_smpte(&self) -> bool {
        self.0[0..4] == labels::SMPTE_PREFIX
    }

    /// Check if this is an essence element key
    pub fn is_essence(&self) -> bool {
        self.is_smpte() && self.0[0..12] == labels::ESSENCE_ELEMENT_BASE[0..12]
    }

    /// Item type of an essence element key (byte 13)
    pub fn item_type(&self) -> u8 {
        self.0[12]
    }

    /// Element type of an essence element key (byte 15)
    pub fn element_type(&self) -> u8 {
        self.0[14]
    }

    /// Element number of an essence element key (byte 16)
    pub fn element_number(&self) -> u8 {
        self.0[15]
    }
}

impl fmt::Debug for UniversalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UL(")?;
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl From<UL> for UniversalLabel {
    fn from(bytes: UL) -> Self {
        UniversalLabel(bytes)
    }
}

/// How a family lays samples out in the container body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrapping {
    /// One essence element per frame (AS-02, OP-1a)
    Frame,
    /// Essence elements appended into a single clip (Avid)
    Clip,
    /// D-10 content package picture and AES3 sound elements
    ContentPackage,
}

/// Well-known essence element labels
pub mod labels {
    use super::UL;

    /// SMPTE Label prefix
    pub const SMPTE_PREFIX: [u8; 4] = [0x06, 0x0E, 0x2B, 0x34];

    /// Essence element base; bytes 13-16 are item type, element count,
    /// element type and element number
    pub const ESSENCE_ELEMENT_BASE: UL = [
        0x06, 0x0E, 0x2B, 0x34, 0x01, 0x02, 0x01, 0x01, 0x0D, 0x01, 0x03, 0x01, 0x00, 0x00, 0x00,
        0x00,
    ];

    /// Generic container picture item
    pub const GC_PICTURE_ITEM: u8 = 0x15;
    /// Generic container sound item
    pub const GC_SOUND_ITEM: u8 = 0x16;
    /// D-10 content package picture item
    pub const CP_PICTURE_ITEM: u8 = 0x05;
    /// D-10 content package sound item
    pub const CP_SOUND_ITEM: u8 = 0x06;

    /// D-10 MPEG picture element type
    pub const D10_PICTURE_ELEMENT: u8 = 0x01;
    /// D-10 AES3 sound element type
    pub const D10_AES3_ELEMENT: u8 = 0x10;
}

/// Element type byte for `essence_type`, frame or clip wrapped
fn gc_element_type(essence_type: EssenceType, clip_wrapped: bool) -> u8 {
    let (frame, clip) = if essence_type.is_dv() {
        (0x01, 0x02)
    } else if essence_type.is_uncompressed() {
        (0x02, 0x03)
    } else if essence_type.is_d10() || essence_type.is_mpeg2lg() {
        (0x05, 0x06)
    } else if essence_type.is_mjpeg() {
        (0x07, 0x08)
    } else if essence_type.is_vc3() {
        (0x0C, 0x0D)
    } else if essence_type.is_avci() {
        (0x15, 0x16)
    } else {
        // broadcast wave
        (0x01, 0x02)
    };
    if clip_wrapped {
        clip
    } else {
        frame
    }
}

/// Largest track number an essence element key can carry
pub const MAX_ELEMENT_NUMBER: u32 = 0xFF;

/// Build the essence element key for a track
///
/// The element number is a single key byte; only the low byte of
/// `track_number` is kept.
pub fn essence_element_key(wrapping: Wrapping, essence_type: EssenceType, track_number: u32) -> UL {
    let mut key = labels::ESSENCE_ELEMENT_BASE;

    match wrapping {
        Wrapping::ContentPackage => {
            if essence_type.is_picture() {
                key[12] = labels::CP_PICTURE_ITEM;
                key[14] = labels::D10_PICTURE_ELEMENT;
            } else {
                key[12] = labels::CP_SOUND_ITEM;
                key[14] = labels::D10_AES3_ELEMENT;
            }
        }
        Wrapping::Frame | Wrapping::Clip => {
            key[12] = if essence_type.is_picture() {
                labels::GC_PICTURE_ITEM
            } else {
                labels::GC_SOUND_ITEM
            };
            key[14] = gc_element_type(essence_type, wrapping == Wrapping::Clip);
        }
    }

    key[13] = 0x01;
    key[15] = (track_number & 0xFF) as u8;
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_wrapped_picture_key() {
        let key =
            UniversalLabel::new(essence_element_key(Wrapping::Frame, EssenceType::IecDv25, 1));
        assert!(key.is_smpte());
        assert!(key.is_essence());
        assert_eq!(key.item_type(), labels::GC_PICTURE_ITEM);
        assert_eq!(key.element_type(), 0x01);
        assert_eq!(key.element_number(), 1);
    }

    #[test]
    fn test_clip_wrapped_sound_key() {
        let key = UniversalLabel::new(essence_element_key(Wrapping::Clip, EssenceType::WavePcm, 3));
        assert_eq!(key.item_type(), labels::GC_SOUND_ITEM);
        assert_eq!(key.element_type(), 0x02);
        assert_eq!(key.element_number(), 3);
    }

    #[test]
    fn test_content_package_keys() {
        let picture = UniversalLabel::new(essence_element_key(
            Wrapping::ContentPackage,
            EssenceType::D10_50,
            1,
        ));
        assert_eq!(picture.item_type(), labels::CP_PICTURE_ITEM);

        let sound = UniversalLabel::new(essence_element_key(
            Wrapping::ContentPackage,
            EssenceType::WavePcm,
            1,
        ));
        assert_eq!(sound.item_type(), labels::CP_SOUND_ITEM);
        assert_eq!(sound.element_type(), labels::D10_AES3_ELEMENT);
    }
}
