//! OP-1a writer track
//!
//! Frame-wrapped essence interleaved in a single file. Also the inner
//! track of AS-11 clips with OP-1a flavour.

use super::{
    check_new, support_rate, AvciEssence, D10Essence, DvEssence, EssenceKind, PcmEssence,
    PictureDescriptor, PictureEssence, SampleLayout, UncEssence, WriterTrack,
};
use crate::avci::Op1aAvciMode;
use crate::capability::{
    AfdCapable, AvciCapable, ComponentDepthCapable, FixedSizeCapable, PcmCapable,
    PictureCapable, TrackCapabilities,
};
use crate::error::Result;
use crate::essence::EssenceType;
use crate::track::ClipFamily;
use crate::types::Rational;
use crate::ul::Wrapping;

/// Essence sub-kinds of an OP-1a track
#[derive(Debug)]
pub enum Op1aKind {
    Dv(DvEssence),
    Unc(UncEssence),
    D10(D10Essence),
    Mpeg2Lg(PictureEssence),
    Vc3(PictureEssence),
    Avci(AvciEssence<Op1aAvciMode>),
    Pcm(PcmEssence),
}

pub type Op1aTrack = WriterTrack<Op1aKind>;

impl Op1aKind {
    fn for_essence(essence_type: EssenceType, frame_rate: Rational) -> Self {
        if essence_type.is_dv() {
            Op1aKind::Dv(DvEssence::new(essence_type, frame_rate))
        } else if essence_type.is_uncompressed() {
            Op1aKind::Unc(UncEssence::new(essence_type, frame_rate))
        } else if essence_type.is_d10() {
            Op1aKind::D10(D10Essence::new(essence_type, frame_rate))
        } else if essence_type.is_avci() {
            Op1aKind::Avci(AvciEssence::new(essence_type, frame_rate))
        } else if essence_type.is_vc3() {
            Op1aKind::Vc3(PictureEssence::new(essence_type, frame_rate))
        } else if essence_type.is_picture() {
            Op1aKind::Mpeg2Lg(PictureEssence::new(essence_type, frame_rate))
        } else {
            Op1aKind::Pcm(PcmEssence::new(frame_rate))
        }
    }

    fn descriptor(&self) -> Option<&PictureDescriptor> {
        match self {
            Op1aKind::Dv(e) => Some(&e.picture),
            Op1aKind::Unc(e) => Some(&e.picture),
            Op1aKind::D10(e) => Some(&e.picture),
            Op1aKind::Mpeg2Lg(e) | Op1aKind::Vc3(e) => Some(&e.picture),
            Op1aKind::Avci(e) => Some(&e.picture),
            Op1aKind::Pcm(_) => None,
        }
    }

    fn descriptor_mut(&mut self) -> Option<&mut PictureDescriptor> {
        match self {
            Op1aKind::Dv(e) => Some(&mut e.picture),
            Op1aKind::Unc(e) => Some(&mut e.picture),
            Op1aKind::D10(e) => Some(&mut e.picture),
            Op1aKind::Mpeg2Lg(e) | Op1aKind::Vc3(e) => Some(&mut e.picture),
            Op1aKind::Avci(e) => Some(&mut e.picture),
            Op1aKind::Pcm(_) => None,
        }
    }
}

impl TrackCapabilities for Op1aKind {
    fn picture_mut(&mut self) -> Option<&mut dyn PictureCapable> {
        self.descriptor_mut().map(|p| p as &mut dyn PictureCapable)
    }

    fn picture(&self) -> Option<&dyn PictureCapable> {
        self.descriptor().map(|p| p as &dyn PictureCapable)
    }

    fn afd_mut(&mut self) -> Option<&mut dyn AfdCapable> {
        self.descriptor_mut().map(|p| p as &mut dyn AfdCapable)
    }

    fn afd(&self) -> Option<&dyn AfdCapable> {
        self.descriptor().map(|p| p as &dyn AfdCapable)
    }

    fn component_depth_mut(&mut self) -> Option<&mut dyn ComponentDepthCapable> {
        match self {
            Op1aKind::Dv(e) => Some(e),
            Op1aKind::Unc(e) => Some(e),
            _ => None,
        }
    }

    fn component_depth(&self) -> Option<&dyn ComponentDepthCapable> {
        match self {
            Op1aKind::Dv(e) => Some(e),
            Op1aKind::Unc(e) => Some(e),
            _ => None,
        }
    }

    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        match self {
            Op1aKind::D10(e) => Some(e),
            _ => None,
        }
    }

    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        match self {
            Op1aKind::Pcm(e) => Some(e),
            _ => None,
        }
    }

    fn pcm(&self) -> Option<&dyn PcmCapable> {
        match self {
            Op1aKind::Pcm(e) => Some(e),
            _ => None,
        }
    }
}

impl EssenceKind for Op1aKind {
    const FAMILY: ClipFamily = ClipFamily::Op1a;
    const WRAPPING: Wrapping = Wrapping::Frame;

    fn layout(&self) -> &dyn SampleLayout {
        match self {
            Op1aKind::Dv(e) => e,
            Op1aKind::Unc(e) => e,
            Op1aKind::D10(e) => e,
            Op1aKind::Mpeg2Lg(e) | Op1aKind::Vc3(e) => e,
            Op1aKind::Avci(e) => e,
            Op1aKind::Pcm(e) => e,
        }
    }

    fn layout_mut(&mut self) -> &mut dyn SampleLayout {
        match self {
            Op1aKind::Dv(e) => e,
            Op1aKind::Unc(e) => e,
            Op1aKind::D10(e) => e,
            Op1aKind::Mpeg2Lg(e) | Op1aKind::Vc3(e) => e,
            Op1aKind::Avci(e) => e,
            Op1aKind::Pcm(e) => e,
        }
    }
}

impl WriterTrack<Op1aKind> {
    /// Whether OP-1a can write `essence_type` at `sample_rate`
    pub fn is_supported(essence_type: EssenceType, sample_rate: Rational) -> bool {
        let family_type = essence_type.is_d10()
            || essence_type.is_dv()
            || essence_type.is_uncompressed()
            || essence_type.is_avci()
            || essence_type.is_mpeg2lg()
            || essence_type.is_vc3()
            || essence_type.is_sound();
        family_type && essence_type.is_valid_rate(sample_rate)
    }

    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Result<Self> {
        check_new(
            ClipFamily::Op1a,
            Self::is_supported(essence_type, support_rate(essence_type, frame_rate)),
            essence_type,
            frame_rate,
        )?;
        Ok(Self::from_kind(
            essence_type,
            frame_rate,
            Op1aKind::for_essence(essence_type, frame_rate),
        ))
    }

    pub fn avci_mut(&mut self) -> Option<&mut dyn AvciCapable<Op1aAvciMode>> {
        match &mut self.kind {
            Op1aKind::Avci(e) => Some(e),
            _ => None,
        }
    }

    pub fn avci(&self) -> Option<&dyn AvciCapable<Op1aAvciMode>> {
        match &self.kind {
            Op1aKind::Avci(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::EssenceTrack;

    #[test]
    fn test_vc3_supported() {
        assert!(Op1aTrack::is_supported(EssenceType::Vc3Hd1242, Rational::fps_25()));
        assert!(Op1aTrack::is_supported(EssenceType::Vc3Hd1235, Rational::fps_23_976()));
        assert!(!Op1aTrack::is_supported(EssenceType::Mjpeg20_1, Rational::fps_25()));

        let track = Op1aTrack::new(EssenceType::Vc3Hd1242, Rational::fps_25()).unwrap();
        assert_eq!(track.sample_size(), 606208);
        assert!(track.afd().is_some());
        assert!(track.single_field().is_none());
    }

    #[test]
    fn test_avci_mode_default() {
        let mut track = Op1aTrack::new(EssenceType::Avci100_1080i, Rational::fps_25()).unwrap();
        assert_eq!(
            track.avci().map(|a| a.mode()),
            Some(Op1aAvciMode::FirstOrAllFrameHeader)
        );
        if let Some(avci) = track.avci_mut() {
            avci.set_mode(Op1aAvciMode::AllFrameHeader);
        }
        assert_eq!(
            track.avci().map(|a| a.mode()),
            Some(Op1aAvciMode::AllFrameHeader)
        );
    }

    #[test]
    fn test_pcm_track() {
        let mut track = Op1aTrack::new(EssenceType::WavePcm, Rational::fps_29_97()).unwrap();
        assert!(!track.is_picture());
        assert!(track.picture().is_none());
        if let Some(pcm) = track.pcm_mut() {
            pcm.set_channel_count(2);
            pcm.set_quantization_bits(24);
        }
        assert_eq!(track.sample_size(), 6);
        track.write_samples(&[0u8; 1602 * 6], 1602).unwrap();
        assert_eq!(track.position(), 1602);
    }
}
