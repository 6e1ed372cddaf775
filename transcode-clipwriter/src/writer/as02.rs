//! AS-02 versioned MXF writer track
//!
//! Frame-wrapped essence, one track file per essence track.

use super::{
    check_new, support_rate, AvciEssence, D10Essence, DvEssence, EssenceKind, PcmEssence,
    PictureDescriptor, PictureEssence, SampleLayout, UncEssence, WriterTrack,
};
use crate::avci::As02AvciMode;
use crate::capability::{
    AfdCapable, AvciCapable, ComponentDepthCapable, FixedSizeCapable, PcmCapable,
    PictureCapable, TrackCapabilities,
};
use crate::error::Result;
use crate::essence::EssenceType;
use crate::track::ClipFamily;
use crate::types::Rational;
use crate::ul::Wrapping;

/// Essence sub-kinds of an AS-02 track
#[derive(Debug)]
pub enum As02Kind {
    Dv(DvEssence),
    Unc(UncEssence),
    D10(D10Essence),
    Mpeg2Lg(PictureEssence),
    Avci(AvciEssence<As02AvciMode>),
    Pcm(PcmEssence),
}

pub type As02Track = WriterTrack<As02Kind>;

impl As02Kind {
    fn for_essence(essence_type: EssenceType, frame_rate: Rational) -> Self {
        if essence_type.is_dv() {
            As02Kind::Dv(DvEssence::new(essence_type, frame_rate))
        } else if essence_type.is_uncompressed() {
            As02Kind::Unc(UncEssence::new(essence_type, frame_rate))
        } else if essence_type.is_d10() {
            As02Kind::D10(D10Essence::new(essence_type, frame_rate))
        } else if essence_type.is_avci() {
            As02Kind::Avci(AvciEssence::new(essence_type, frame_rate))
        } else if essence_type.is_picture() {
            As02Kind::Mpeg2Lg(PictureEssence::new(essence_type, frame_rate))
        } else {
            As02Kind::Pcm(PcmEssence::new(frame_rate))
        }
    }

    fn descriptor(&self) -> Option<&PictureDescriptor> {
        match self {
            As02Kind::Dv(e) => Some(&e.picture),
            As02Kind::Unc(e) => Some(&e.picture),
            As02Kind::D10(e) => Some(&e.picture),
            As02Kind::Mpeg2Lg(e) => Some(&e.picture),
            As02Kind::Avci(e) => Some(&e.picture),
            As02Kind::Pcm(_) => None,
        }
    }

    fn descriptor_mut(&mut self) -> Option<&mut PictureDescriptor> {
        match self {
            As02Kind::Dv(e) => Some(&mut e.picture),
            As02Kind::Unc(e) => Some(&mut e.picture),
            As02Kind::D10(e) => Some(&mut e.picture),
            As02Kind::Mpeg2Lg(e) => Some(&mut e.picture),
            As02Kind::Avci(e) => Some(&mut e.picture),
            As02Kind::Pcm(_) => None,
        }
    }
}

impl TrackCapabilities for As02Kind {
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
            As02Kind::Dv(e) => Some(e),
            As02Kind::Unc(e) => Some(e),
            _ => None,
        }
    }

    fn component_depth(&self) -> Option<&dyn ComponentDepthCapable> {
        match self {
            As02Kind::Dv(e) => Some(e),
            As02Kind::Unc(e) => Some(e),
            _ => None,
        }
    }

    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        match self {
            As02Kind::D10(e) => Some(e),
            _ => None,
        }
    }

    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        match self {
            As02Kind::Pcm(e) => Some(e),
            _ => None,
        }
    }

    fn pcm(&self) -> Option<&dyn PcmCapable> {
        match self {
            As02Kind::Pcm(e) => Some(e),
            _ => None,
        }
    }
}

impl EssenceKind for As02Kind {
    const FAMILY: ClipFamily = ClipFamily::As02;
    const WRAPPING: Wrapping = Wrapping::Frame;

    fn layout(&self) -> &dyn SampleLayout {
        match self {
            As02Kind::Dv(e) => e,
            As02Kind::Unc(e) => e,
            As02Kind::D10(e) => e,
            As02Kind::Mpeg2Lg(e) => e,
            As02Kind::Avci(e) => e,
            As02Kind::Pcm(e) => e,
        }
    }

    fn layout_mut(&mut self) -> &mut dyn SampleLayout {
        match self {
            As02Kind::Dv(e) => e,
            As02Kind::Unc(e) => e,
            As02Kind::D10(e) => e,
            As02Kind::Mpeg2Lg(e) => e,
            As02Kind::Avci(e) => e,
            As02Kind::Pcm(e) => e,
        }
    }
}

impl WriterTrack<As02Kind> {
    /// Whether AS-02 can write `essence_type` at `sample_rate`
    pub fn is_supported(essence_type: EssenceType, sample_rate: Rational) -> bool {
        let family_type = essence_type.is_d10()
            || essence_type.is_dv()
            || essence_type.is_uncompressed()
            || essence_type.is_avci()
            || essence_type.is_mpeg2lg()
            || essence_type.is_sound();
        family_type && essence_type.is_valid_rate(sample_rate)
    }

    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Result<Self> {
        check_new(
            ClipFamily::As02,
            Self::is_supported(essence_type, support_rate(essence_type, frame_rate)),
            essence_type,
            frame_rate,
        )?;
        Ok(Self::from_kind(
            essence_type,
            frame_rate,
            As02Kind::for_essence(essence_type, frame_rate),
        ))
    }

    pub fn avci_mut(&mut self) -> Option<&mut dyn AvciCapable<As02AvciMode>> {
        match &mut self.kind {
            As02Kind::Avci(e) => Some(e),
            _ => None,
        }
    }

    pub fn avci(&self) -> Option<&dyn AvciCapable<As02AvciMode>> {
        match &self.kind {
            As02Kind::Avci(e) => Some(e),
            _ => None,
        }
    }
}
