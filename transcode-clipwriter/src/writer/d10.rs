//! D-10 (IMX) writer track
//!
//! MPEG-2 422P@ML picture and AES3 sound in SDTI-CP content packages.

use super::{
    check_new, support_rate, D10Essence, EssenceKind, PcmEssence, SampleLayout, WriterTrack,
};
use crate::capability::{
    AfdCapable, FixedSizeCapable, PcmCapable, PictureCapable, TrackCapabilities,
};
use crate::error::Result;
use crate::essence::EssenceType;
use crate::track::ClipFamily;
use crate::types::Rational;
use crate::ul::Wrapping;

/// Essence sub-kinds of a D-10 track
#[derive(Debug)]
pub enum D10Kind {
    Mpeg(D10Essence),
    Pcm(PcmEssence),
}

pub type D10Track = WriterTrack<D10Kind>;

impl TrackCapabilities for D10Kind {
    fn picture_mut(&mut self) -> Option<&mut dyn PictureCapable> {
        match self {
            D10Kind::Mpeg(e) => Some(&mut e.picture),
            D10Kind::Pcm(_) => None,
        }
    }

    fn picture(&self) -> Option<&dyn PictureCapable> {
        match self {
            D10Kind::Mpeg(e) => Some(&e.picture),
            D10Kind::Pcm(_) => None,
        }
    }

    fn afd_mut(&mut self) -> Option<&mut dyn AfdCapable> {
        match self {
            D10Kind::Mpeg(e) => Some(&mut e.picture),
            D10Kind::Pcm(_) => None,
        }
    }

    fn afd(&self) -> Option<&dyn AfdCapable> {
        match self {
            D10Kind::Mpeg(e) => Some(&e.picture),
            D10Kind::Pcm(_) => None,
        }
    }

    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        match self {
            D10Kind::Mpeg(e) => Some(e),
            D10Kind::Pcm(_) => None,
        }
    }

    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        match self {
            D10Kind::Pcm(e) => Some(e),
            D10Kind::Mpeg(_) => None,
        }
    }

    fn pcm(&self) -> Option<&dyn PcmCapable> {
        match self {
            D10Kind::Pcm(e) => Some(e),
            D10Kind::Mpeg(_) => None,
        }
    }
}

impl EssenceKind for D10Kind {
    const FAMILY: ClipFamily = ClipFamily::D10;
    const WRAPPING: Wrapping = Wrapping::ContentPackage;

    fn layout(&self) -> &dyn SampleLayout {
        match self {
            D10Kind::Mpeg(e) => e,
            D10Kind::Pcm(e) => e,
        }
    }

    fn layout_mut(&mut self) -> &mut dyn SampleLayout {
        match self {
            D10Kind::Mpeg(e) => e,
            D10Kind::Pcm(e) => e,
        }
    }
}

impl WriterTrack<D10Kind> {
    /// Whether D-10 can write `essence_type` at `sample_rate`
    pub fn is_supported(essence_type: EssenceType, sample_rate: Rational) -> bool {
        (essence_type.is_d10() || essence_type.is_sound())
            && essence_type.is_valid_rate(sample_rate)
    }

    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Result<Self> {
        check_new(
            ClipFamily::D10,
            Self::is_supported(essence_type, support_rate(essence_type, frame_rate)),
            essence_type,
            frame_rate,
        )?;
        let kind = if essence_type.is_d10() {
            D10Kind::Mpeg(D10Essence::new(essence_type, frame_rate))
        } else {
            D10Kind::Pcm(PcmEssence::new(frame_rate))
        };
        Ok(Self::from_kind(essence_type, frame_rate, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::EssenceTrack;
    use crate::klv::KlvReader;
    use crate::ul::labels;

    #[test]
    fn test_support_table() {
        assert!(D10Track::is_supported(EssenceType::D10_30, Rational::fps_29_97()));
        assert!(D10Track::is_supported(EssenceType::WavePcm, Rational::sampling_48k()));
        assert!(!D10Track::is_supported(EssenceType::WavePcm, Rational::new(44100, 1)));
        assert!(!D10Track::is_supported(EssenceType::IecDv25, Rational::fps_25()));
    }

    #[test]
    fn test_short_frame_padded_into_content_package() {
        let mut track = D10Track::new(EssenceType::D10_30, Rational::fps_25()).unwrap();
        if let Some(fixed) = track.fixed_size_mut() {
            fixed.set_sample_size(160000);
        }
        track.write_samples(&[0x11u8; 1000], 1).unwrap();

        let element = KlvReader::new(track.essence_data()).next().unwrap().unwrap();
        assert_eq!(element.key.item_type(), labels::CP_PICTURE_ITEM);
        assert_eq!(element.value.len(), 160000);
        assert_eq!(track.bytes_written(), 160000);
    }

    #[test]
    fn test_sound_track_has_no_picture() {
        let track = D10Track::new(EssenceType::WavePcm, Rational::fps_25()).unwrap();
        assert!(track.picture().is_none());
        assert!(track.afd().is_none());
        assert!(track.pcm().is_some());
    }
}
