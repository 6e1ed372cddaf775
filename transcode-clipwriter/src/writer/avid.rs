//! Avid MXF writer track
//!
//! Clip-wrapped essence, one file per track. Avid picture descriptors
//! carry no AFD, and uncompressed SD frames are stored with extra VBI
//! lines above the active picture.

use super::{
    check_new, support_rate, AvciEssence, D10Essence, DvEssence, EssenceKind, PcmEssence,
    PictureDescriptor, PictureEssence, SampleLayout, UncEssence, WriterTrack,
};
use crate::avci::AvidAvciMode;
use crate::capability::{
    AvciCapable, ComponentDepthCapable, FixedSizeCapable, PcmCapable, PictureCapable,
    SingleFieldCapable, TrackCapabilities, UncInputCapable,
};
use crate::error::Result;
use crate::essence::EssenceType;
use crate::track::ClipFamily;
use crate::types::Rational;
use crate::ul::Wrapping;

/// Stored VBI lines above 625-line SD picture
const PAL_VBI_LINES: u32 = 16;
/// Stored VBI lines above 525-line SD picture
const NTSC_VBI_LINES: u32 = 10;

/// Essence sub-kinds of an Avid track
#[derive(Debug)]
pub enum AvidKind {
    Dv(DvEssence),
    Unc(UncEssence),
    D10(D10Essence),
    Mpeg2Lg(PictureEssence),
    Mjpeg(PictureEssence),
    Vc3(PictureEssence),
    Avci(AvciEssence<AvidAvciMode>),
    Pcm(PcmEssence),
}

pub type AvidTrack = WriterTrack<AvidKind>;

fn vbi_lines(essence_type: EssenceType, frame_rate: Rational) -> u32 {
    match essence_type.picture_dimensions(frame_rate) {
        Some((_, 576)) => PAL_VBI_LINES,
        Some((_, 486)) => NTSC_VBI_LINES,
        _ => 0,
    }
}

impl AvidKind {
    fn for_essence(essence_type: EssenceType, frame_rate: Rational) -> Self {
        if essence_type.is_dv() {
            AvidKind::Dv(DvEssence::new(essence_type, frame_rate))
        } else if essence_type.is_uncompressed() {
            let vbi = vbi_lines(essence_type, frame_rate);
            AvidKind::Unc(UncEssence::with_vbi(essence_type, frame_rate, vbi))
        } else if essence_type.is_d10() {
            AvidKind::D10(D10Essence::new(essence_type, frame_rate))
        } else if essence_type.is_avci() {
            AvidKind::Avci(AvciEssence::new(essence_type, frame_rate))
        } else if essence_type.is_mjpeg() {
            AvidKind::Mjpeg(PictureEssence::new(essence_type, frame_rate))
        } else if essence_type.is_vc3() {
            AvidKind::Vc3(PictureEssence::new(essence_type, frame_rate))
        } else if essence_type.is_picture() {
            AvidKind::Mpeg2Lg(PictureEssence::new(essence_type, frame_rate))
        } else {
            AvidKind::Pcm(PcmEssence::new(frame_rate))
        }
    }
}

impl TrackCapabilities for AvidKind {
    fn picture_mut(&mut self) -> Option<&mut dyn PictureCapable> {
        let picture: &mut PictureDescriptor = match self {
            AvidKind::Dv(e) => &mut e.picture,
            AvidKind::Unc(e) => &mut e.picture,
            AvidKind::D10(e) => &mut e.picture,
            AvidKind::Mpeg2Lg(e) | AvidKind::Mjpeg(e) | AvidKind::Vc3(e) => &mut e.picture,
            AvidKind::Avci(e) => &mut e.picture,
            AvidKind::Pcm(_) => return None,
        };
        Some(picture)
    }

    fn picture(&self) -> Option<&dyn PictureCapable> {
        let picture: &PictureDescriptor = match self {
            AvidKind::Dv(e) => &e.picture,
            AvidKind::Unc(e) => &e.picture,
            AvidKind::D10(e) => &e.picture,
            AvidKind::Mpeg2Lg(e) | AvidKind::Mjpeg(e) | AvidKind::Vc3(e) => &e.picture,
            AvidKind::Avci(e) => &e.picture,
            AvidKind::Pcm(_) => return None,
        };
        Some(picture)
    }

    fn component_depth_mut(&mut self) -> Option<&mut dyn ComponentDepthCapable> {
        match self {
            AvidKind::Dv(e) => Some(e),
            _ => None,
        }
    }

    fn component_depth(&self) -> Option<&dyn ComponentDepthCapable> {
        match self {
            AvidKind::Dv(e) => Some(e),
            _ => None,
        }
    }

    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        match self {
            AvidKind::D10(e) => Some(e),
            _ => None,
        }
    }

    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        match self {
            AvidKind::Pcm(e) => Some(e),
            _ => None,
        }
    }

    fn pcm(&self) -> Option<&dyn PcmCapable> {
        match self {
            AvidKind::Pcm(e) => Some(e),
            _ => None,
        }
    }

    fn unc_input_mut(&mut self) -> Option<&mut dyn UncInputCapable> {
        match self {
            AvidKind::Unc(e) => Some(e),
            _ => None,
        }
    }

    fn unc_input(&self) -> Option<&dyn UncInputCapable> {
        match self {
            AvidKind::Unc(e) => Some(e),
            _ => None,
        }
    }

    fn single_field(&self) -> Option<&dyn SingleFieldCapable> {
        match self {
            AvidKind::Mjpeg(e) => Some(e),
            _ => None,
        }
    }
}

impl EssenceKind for AvidKind {
    const FAMILY: ClipFamily = ClipFamily::Avid;
    const WRAPPING: Wrapping = Wrapping::Clip;

    fn layout(&self) -> &dyn SampleLayout {
        match self {
            AvidKind::Dv(e) => e,
            AvidKind::Unc(e) => e,
            AvidKind::D10(e) => e,
            AvidKind::Mpeg2Lg(e) | AvidKind::Mjpeg(e) | AvidKind::Vc3(e) => e,
            AvidKind::Avci(e) => e,
            AvidKind::Pcm(e) => e,
        }
    }

    fn layout_mut(&mut self) -> &mut dyn SampleLayout {
        match self {
            AvidKind::Dv(e) => e,
            AvidKind::Unc(e) => e,
            AvidKind::D10(e) => e,
            AvidKind::Mpeg2Lg(e) | AvidKind::Mjpeg(e) | AvidKind::Vc3(e) => e,
            AvidKind::Avci(e) => e,
            AvidKind::Pcm(e) => e,
        }
    }
}

impl WriterTrack<AvidKind> {
    /// Whether Avid can write `essence_type` at `sample_rate`
    pub fn is_supported(essence_type: EssenceType, sample_rate: Rational) -> bool {
        let family_type = essence_type.is_d10()
            || essence_type.is_dv()
            || essence_type.is_uncompressed()
            || essence_type.is_avci()
            || essence_type.is_mpeg2lg()
            || essence_type.is_mjpeg()
            || essence_type.is_vc3()
            || essence_type.is_sound();
        family_type && essence_type.is_valid_rate(sample_rate)
    }

    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Result<Self> {
        check_new(
            ClipFamily::Avid,
            Self::is_supported(essence_type, support_rate(essence_type, frame_rate)),
            essence_type,
            frame_rate,
        )?;
        Ok(Self::from_kind(
            essence_type,
            frame_rate,
            AvidKind::for_essence(essence_type, frame_rate),
        ))
    }

    pub fn avci_mut(&mut self) -> Option<&mut dyn AvciCapable<AvidAvciMode>> {
        match &mut self.kind {
            AvidKind::Avci(e) => Some(e),
            _ => None,
        }
    }

    pub fn avci(&self) -> Option<&dyn AvciCapable<AvidAvciMode>> {
        match &self.kind {
            AvidKind::Avci(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::EssenceTrack;
    use crate::klv::KlvReader;

    #[test]
    fn test_no_afd() {
        let track = AvidTrack::new(EssenceType::Dv50, Rational::fps_25()).unwrap();
        assert!(track.picture().is_some());
        assert!(track.afd().is_none());
        assert!(track.component_depth().is_some());
    }

    #[test]
    fn test_unc_sd_vbi() {
        let mut track = AvidTrack::new(EssenceType::UncSd, Rational::fps_25()).unwrap();
        assert!(track.component_depth().is_none());
        assert_eq!(track.sample_size(), 720 * 2 * 592);
        assert_eq!(track.unc_input().map(|u| u.input_height()), Some(576));

        let input = track.unc_input().map(|u| u.input_sample_size()).unwrap();
        track.write_samples(&vec![0u8; input as usize], 1).unwrap();
        assert_eq!(track.bytes_written(), 720 * 2 * 592);

        let ntsc = AvidTrack::new(EssenceType::UncSd, Rational::fps_29_97()).unwrap();
        assert_eq!(ntsc.sample_size(), 720 * 2 * 496);
    }

    #[test]
    fn test_mjpeg_single_field() {
        let single = AvidTrack::new(EssenceType::Mjpeg15_1s, Rational::fps_25()).unwrap();
        assert_eq!(single.single_field().map(|s| s.is_single_field()), Some(true));

        let double = AvidTrack::new(EssenceType::Mjpeg2_1, Rational::fps_25()).unwrap();
        assert_eq!(double.single_field().map(|s| s.is_single_field()), Some(false));
    }

    #[test]
    fn test_clip_wrapped_output() {
        let mut track = AvidTrack::new(EssenceType::WavePcm, Rational::fps_25()).unwrap();
        track.write_samples(&[1u8; 3840], 1920).unwrap();
        track.write_samples(&[2u8; 3840], 1920).unwrap();

        let elements: Vec<_> = KlvReader::new(track.essence_data())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].value.len(), 7680);
        assert_eq!(track.position(), 3840);
    }
}
