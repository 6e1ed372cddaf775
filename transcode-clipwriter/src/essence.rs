//! Essence types and their static format properties
//!
//! Every essence type a clip writer family can carry, together with the
//! frame (or sampling) rates it is legal at and its nominal per-frame size.
//! The family support tables are built on top of these properties.

use crate::types::Rational;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the AVC-Intra sequence and picture parameter set header in bytes.
pub const AVCI_HEADER_SIZE: u32 = 512;

/// Audio/video codec or raw format carried by a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EssenceType {
    /// D-10 (IMX) MPEG-2 422P@ML, 30 Mbit/s
    D10_30,
    /// D-10 (IMX) MPEG-2 422P@ML, 40 Mbit/s
    D10_40,
    /// D-10 (IMX) MPEG-2 422P@ML, 50 Mbit/s
    D10_50,
    /// IEC 61834 DV25
    IecDv25,
    /// SMPTE 314M DV-based DV25
    DvBasedDv25,
    /// DV-based DV50
    Dv50,
    /// DV100 1080i
    Dv100_1080i,
    /// DV100 720p
    Dv100_720p,
    /// AVC-Intra 100 1080i
    Avci100_1080i,
    /// AVC-Intra 100 720p
    Avci100_720p,
    /// AVC-Intra 50 1080i
    Avci50_1080i,
    /// AVC-Intra 50 720p
    Avci50_720p,
    /// Uncompressed 4:2:2 standard definition
    UncSd,
    /// Uncompressed 4:2:2 1080i
    UncHd1080i,
    /// Uncompressed 4:2:2 720p
    UncHd720p,
    /// MPEG-2 long GOP 422P@HL 1080i
    Mpeg2Lg422pHl1080i,
    /// MPEG-2 long GOP MP@HL 1080i
    Mpeg2LgMpHl1080i,
    /// Avid MJPEG 2:1
    Mjpeg2_1,
    /// Avid MJPEG 20:1
    Mjpeg20_1,
    /// Avid MJPEG 15:1s, single field
    Mjpeg15_1s,
    /// VC-3 compression id 1242 (1080i)
    Vc3Hd1242,
    /// VC-3 compression id 1235 (1080p)
    Vc3Hd1235,
    /// Broadcast wave PCM audio
    WavePcm,
}

impl EssenceType {
    /// All essence types, in declaration order
    pub const ALL: [EssenceType; 23] = [
        EssenceType::D10_30,
        EssenceType::D10_40,
        EssenceType::D10_50,
        EssenceType::IecDv25,
        EssenceType::DvBasedDv25,
        EssenceType::Dv50,
        EssenceType::Dv100_1080i,
        EssenceType::Dv100_720p,
        EssenceType::Avci100_1080i,
        EssenceType::Avci100_720p,
        EssenceType::Avci50_1080i,
        EssenceType::Avci50_720p,
        EssenceType::UncSd,
        EssenceType::UncHd1080i,
        EssenceType::UncHd720p,
        EssenceType::Mpeg2Lg422pHl1080i,
        EssenceType::Mpeg2LgMpHl1080i,
        EssenceType::Mjpeg2_1,
        EssenceType::Mjpeg20_1,
        EssenceType::Mjpeg15_1s,
        EssenceType::Vc3Hd1242,
        EssenceType::Vc3Hd1235,
        EssenceType::WavePcm,
    ];

    pub fn is_picture(self) -> bool {
        self != EssenceType::WavePcm
    }

    pub fn is_sound(self) -> bool {
        self == EssenceType::WavePcm
    }

    pub fn is_d10(self) -> bool {
        matches!(
            self,
            EssenceType::D10_30 | EssenceType::D10_40 | EssenceType::D10_50
        )
    }

    pub fn is_dv(self) -> bool {
        matches!(
            self,
            EssenceType::IecDv25
                | EssenceType::DvBasedDv25
                | EssenceType::Dv50
                | EssenceType::Dv100_1080i
                | EssenceType::Dv100_720p
        )
    }

    pub fn is_avci(self) -> bool {
        matches!(
            self,
            EssenceType::Avci100_1080i
                | EssenceType::Avci100_720p
                | EssenceType::Avci50_1080i
                | EssenceType::Avci50_720p
        )
    }

    pub fn is_uncompressed(self) -> bool {
        matches!(
            self,
            EssenceType::UncSd | EssenceType::UncHd1080i | EssenceType::UncHd720p
        )
    }

    pub fn is_mpeg2lg(self) -> bool {
        matches!(
            self,
            EssenceType::Mpeg2Lg422pHl1080i | EssenceType::Mpeg2LgMpHl1080i
        )
    }

    pub fn is_mjpeg(self) -> bool {
        matches!(
            self,
            EssenceType::Mjpeg2_1 | EssenceType::Mjpeg20_1 | EssenceType::Mjpeg15_1s
        )
    }

    pub fn is_vc3(self) -> bool {
        matches!(self, EssenceType::Vc3Hd1242 | EssenceType::Vc3Hd1235)
    }

    /// Single-field MJPEG resolutions store one field per frame
    pub fn is_single_field(self) -> bool {
        self == EssenceType::Mjpeg15_1s
    }

    fn is_progressive_720(self) -> bool {
        matches!(
            self,
            EssenceType::Dv100_720p
                | EssenceType::Avci100_720p
                | EssenceType::Avci50_720p
                | EssenceType::UncHd720p
        )
    }

    /// Whether `rate` is a legal frame rate (or sampling rate for sound)
    pub fn is_valid_rate(self, rate: Rational) -> bool {
        let rate = rate.reduced();
        if self.is_sound() {
            return rate == Rational::sampling_48k();
        }
        if self.is_progressive_720() {
            return rate == Rational::fps_50() || rate == Rational::fps_59_94();
        }
        if self == EssenceType::Vc3Hd1235 && rate == Rational::fps_23_976() {
            return true;
        }
        rate == Rational::fps_25() || rate == Rational::fps_29_97()
    }

    /// True for the 25/50 Hz system, false for the 1001-based ones
    fn is_625_50(rate: Rational) -> bool {
        let rate = rate.reduced();
        rate == Rational::fps_25() || rate == Rational::fps_50()
    }

    /// Stored picture dimensions for uncompressed essence
    pub fn picture_dimensions(self, frame_rate: Rational) -> Option<(u32, u32)> {
        match self {
            EssenceType::UncSd if Self::is_625_50(frame_rate) => Some((720, 576)),
            EssenceType::UncSd => Some((720, 486)),
            EssenceType::UncHd1080i => Some((1920, 1080)),
            EssenceType::UncHd720p => Some((1280, 720)),
            _ => None,
        }
    }

    /// Nominal bytes per frame at `frame_rate`, or 0 for variable-size
    /// essence. Sound and uncompressed sizes depend on track settings and
    /// are computed by the writers.
    pub fn fixed_sample_size(self, frame_rate: Rational) -> u32 {
        let pal = Self::is_625_50(frame_rate);
        let pick = |p: u32, n: u32| if pal { p } else { n };
        match self {
            EssenceType::D10_30 => pick(150000, 125125),
            EssenceType::D10_40 => pick(200000, 166833),
            EssenceType::D10_50 => pick(250000, 208541),
            EssenceType::IecDv25 | EssenceType::DvBasedDv25 => pick(144000, 120000),
            EssenceType::Dv50 => pick(288000, 240000),
            EssenceType::Dv100_1080i => pick(576000, 480000),
            EssenceType::Dv100_720p => pick(288000, 240000),
            EssenceType::Avci100_1080i => pick(568832, 472576),
            EssenceType::Avci100_720p => pick(284672, 236544),
            EssenceType::Avci50_1080i => pick(281088, 232960),
            EssenceType::Avci50_720p => pick(140800, 116736),
            EssenceType::Vc3Hd1242 => 606208,
            EssenceType::Vc3Hd1235 => 917504,
            EssenceType::UncSd
            | EssenceType::UncHd1080i
            | EssenceType::UncHd720p
            | EssenceType::Mpeg2Lg422pHl1080i
            | EssenceType::Mpeg2LgMpHl1080i
            | EssenceType::Mjpeg2_1
            | EssenceType::Mjpeg20_1
            | EssenceType::Mjpeg15_1s
            | EssenceType::WavePcm => 0,
        }
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            EssenceType::D10_30 => "D-10 30Mbps",
            EssenceType::D10_40 => "D-10 40Mbps",
            EssenceType::D10_50 => "D-10 50Mbps",
            EssenceType::IecDv25 => "IEC DV25",
            EssenceType::DvBasedDv25 => "DV-based DV25",
            EssenceType::Dv50 => "DV50",
            EssenceType::Dv100_1080i => "DV100 1080i",
            EssenceType::Dv100_720p => "DV100 720p",
            EssenceType::Avci100_1080i => "AVC-Intra 100 1080i",
            EssenceType::Avci100_720p => "AVC-Intra 100 720p",
            EssenceType::Avci50_1080i => "AVC-Intra 50 1080i",
            EssenceType::Avci50_720p => "AVC-Intra 50 720p",
            EssenceType::UncSd => "Uncompressed SD",
            EssenceType::UncHd1080i => "Uncompressed HD 1080i",
            EssenceType::UncHd720p => "Uncompressed HD 720p",
            EssenceType::Mpeg2Lg422pHl1080i => "MPEG-2 Long GOP 422P@HL 1080i",
            EssenceType::Mpeg2LgMpHl1080i => "MPEG-2 Long GOP MP@HL 1080i",
            EssenceType::Mjpeg2_1 => "MJPEG 2:1",
            EssenceType::Mjpeg20_1 => "MJPEG 20:1",
            EssenceType::Mjpeg15_1s => "MJPEG 15:1s",
            EssenceType::Vc3Hd1242 => "VC-3 1242",
            EssenceType::Vc3Hd1235 => "VC-3 1235",
            EssenceType::WavePcm => "WAVE PCM",
        }
    }
}

impl fmt::Display for EssenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_disjoint() {
        for essence_type in EssenceType::ALL {
            let classes = [
                essence_type.is_d10(),
                essence_type.is_dv(),
                essence_type.is_avci(),
                essence_type.is_uncompressed(),
                essence_type.is_mpeg2lg(),
                essence_type.is_mjpeg(),
                essence_type.is_vc3(),
                essence_type.is_sound(),
            ];
            assert_eq!(
                classes.iter().filter(|c| **c).count(),
                1,
                "{essence_type} must belong to exactly one class"
            );
        }
    }

    #[test]
    fn test_valid_rates() {
        assert!(EssenceType::D10_50.is_valid_rate(Rational::fps_25()));
        assert!(EssenceType::D10_50.is_valid_rate(Rational::fps_29_97()));
        assert!(!EssenceType::D10_50.is_valid_rate(Rational::fps_50()));
        assert!(EssenceType::Avci100_720p.is_valid_rate(Rational::fps_59_94()));
        assert!(!EssenceType::Avci100_720p.is_valid_rate(Rational::fps_25()));
        assert!(EssenceType::Vc3Hd1235.is_valid_rate(Rational::fps_23_976()));
        assert!(EssenceType::WavePcm.is_valid_rate(Rational::new(96000, 2)));
        assert!(!EssenceType::WavePcm.is_valid_rate(Rational::new(44100, 1)));
    }

    #[test]
    fn test_fixed_sample_size() {
        assert_eq!(EssenceType::D10_50.fixed_sample_size(Rational::fps_25()), 250000);
        assert_eq!(EssenceType::IecDv25.fixed_sample_size(Rational::fps_29_97()), 120000);
        assert_eq!(
            EssenceType::Avci100_1080i.fixed_sample_size(Rational::fps_25()),
            568832
        );
        assert_eq!(EssenceType::Mpeg2LgMpHl1080i.fixed_sample_size(Rational::fps_25()), 0);
    }

    #[test]
    fn test_picture_dimensions() {
        assert_eq!(
            EssenceType::UncSd.picture_dimensions(Rational::fps_25()),
            Some((720, 576))
        );
        assert_eq!(
            EssenceType::UncSd.picture_dimensions(Rational::fps_29_97()),
            Some((720, 486))
        );
        assert_eq!(EssenceType::Dv50.picture_dimensions(Rational::fps_25()), None);
    }
}
