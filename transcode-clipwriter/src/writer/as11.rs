//! AS-11 writer track
//!
//! AS-11 clips are written either as OP-1a or as D-10; the track wraps the
//! corresponding family track and forwards to it.

use super::d10::D10Track;
use super::op1a::Op1aTrack;
use crate::avci::Op1aAvciMode;
use crate::capability::{
    AfdCapable, AvciCapable, ComponentDepthCapable, EssenceTrack, FixedSizeCapable, PcmCapable,
    PictureCapable, SingleFieldCapable, TrackCapabilities, UncInputCapable,
};
use crate::error::Result;
use crate::essence::EssenceType;
use crate::types::Rational;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Underlying file format of an AS-11 clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum As11Flavour {
    Op1a,
    D10,
}

impl fmt::Display for As11Flavour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            As11Flavour::Op1a => write!(f, "OP-1a"),
            As11Flavour::D10 => write!(f, "D-10"),
        }
    }
}

#[derive(Debug)]
enum As11Inner {
    Op1a(Op1aTrack),
    D10(D10Track),
}

/// AS-11 track over an OP-1a or D-10 track
#[derive(Debug)]
pub struct As11Track {
    flavour: As11Flavour,
    inner: As11Inner,
}

impl As11Track {
    /// Whether an AS-11 clip of `flavour` can write `essence_type` at `sample_rate`
    pub fn is_supported(
        flavour: As11Flavour,
        essence_type: EssenceType,
        sample_rate: Rational,
    ) -> bool {
        match flavour {
            As11Flavour::Op1a => Op1aTrack::is_supported(essence_type, sample_rate),
            As11Flavour::D10 => D10Track::is_supported(essence_type, sample_rate),
        }
    }

    pub fn new(
        flavour: As11Flavour,
        essence_type: EssenceType,
        frame_rate: Rational,
    ) -> Result<Self> {
        let inner = match flavour {
            As11Flavour::Op1a => As11Inner::Op1a(Op1aTrack::new(essence_type, frame_rate)?),
            As11Flavour::D10 => As11Inner::D10(D10Track::new(essence_type, frame_rate)?),
        };
        Ok(As11Track { flavour, inner })
    }

    pub fn flavour(&self) -> As11Flavour {
        self.flavour
    }

    pub fn op1a(&self) -> Option<&Op1aTrack> {
        match &self.inner {
            As11Inner::Op1a(track) => Some(track),
            As11Inner::D10(_) => None,
        }
    }

    pub fn d10(&self) -> Option<&D10Track> {
        match &self.inner {
            As11Inner::D10(track) => Some(track),
            As11Inner::Op1a(_) => None,
        }
    }

    /// AVC-Intra handling of the OP-1a inner track; D-10 clips have none
    pub fn avci_mut(&mut self) -> Option<&mut dyn AvciCapable<Op1aAvciMode>> {
        match &mut self.inner {
            As11Inner::Op1a(track) => track.avci_mut(),
            As11Inner::D10(_) => None,
        }
    }

    pub fn avci(&self) -> Option<&dyn AvciCapable<Op1aAvciMode>> {
        match &self.inner {
            As11Inner::Op1a(track) => track.avci(),
            As11Inner::D10(_) => None,
        }
    }

    fn track(&self) -> &dyn EssenceTrack {
        match &self.inner {
            As11Inner::Op1a(track) => track,
            As11Inner::D10(track) => track,
        }
    }

    fn track_mut(&mut self) -> &mut dyn EssenceTrack {
        match &mut self.inner {
            As11Inner::Op1a(track) => track,
            As11Inner::D10(track) => track,
        }
    }
}

impl TrackCapabilities for As11Track {
    fn picture_mut(&mut self) -> Option<&mut dyn PictureCapable> {
        self.track_mut().picture_mut()
    }
    fn picture(&self) -> Option<&dyn PictureCapable> {
        self.track().picture()
    }
    fn afd_mut(&mut self) -> Option<&mut dyn AfdCapable> {
        self.track_mut().afd_mut()
    }
    fn afd(&self) -> Option<&dyn AfdCapable> {
        self.track().afd()
    }
    fn component_depth_mut(&mut self) -> Option<&mut dyn ComponentDepthCapable> {
        self.track_mut().component_depth_mut()
    }
    fn component_depth(&self) -> Option<&dyn ComponentDepthCapable> {
        self.track().component_depth()
    }
    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        self.track_mut().fixed_size_mut()
    }
    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        self.track_mut().pcm_mut()
    }
    fn pcm(&self) -> Option<&dyn PcmCapable> {
        self.track().pcm()
    }
    fn unc_input_mut(&mut self) -> Option<&mut dyn UncInputCapable> {
        self.track_mut().unc_input_mut()
    }
    fn unc_input(&self) -> Option<&dyn UncInputCapable> {
        self.track().unc_input()
    }
    fn single_field(&self) -> Option<&dyn SingleFieldCapable> {
        self.track().single_field()
    }
}

impl EssenceTrack for As11Track {
    fn essence_type(&self) -> EssenceType {
        self.track().essence_type()
    }

    fn edit_rate(&self) -> Rational {
        self.track().edit_rate()
    }

    fn set_output_track_number(&mut self, track_number: u32) {
        self.track_mut().set_output_track_number(track_number)
    }

    fn output_track_number(&self) -> u32 {
        self.track().output_track_number()
    }

    fn write_samples(&mut self, data: &[u8], num_samples: u32) -> Result<()> {
        self.track_mut().write_samples(data, num_samples)
    }

    fn is_picture(&self) -> bool {
        self.track().is_picture()
    }

    fn sample_size(&self) -> u32 {
        self.track().sample_size()
    }

    fn position(&self) -> u64 {
        self.track().position()
    }

    fn bytes_written(&self) -> u64 {
        self.track().bytes_written()
    }

    fn essence_data(&self) -> &[u8] {
        self.track().essence_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavour_support() {
        assert!(As11Track::is_supported(
            As11Flavour::Op1a,
            EssenceType::Avci100_1080i,
            Rational::fps_25()
        ));
        assert!(!As11Track::is_supported(
            As11Flavour::D10,
            EssenceType::Avci100_1080i,
            Rational::fps_25()
        ));
        assert!(As11Track::is_supported(
            As11Flavour::D10,
            EssenceType::D10_50,
            Rational::fps_25()
        ));
    }

    #[test]
    fn test_d10_flavour_has_no_avci() {
        let mut track =
            As11Track::new(As11Flavour::D10, EssenceType::D10_50, Rational::fps_25()).unwrap();
        assert!(track.avci_mut().is_none());
        assert!(track.d10().is_some());
        assert!(track.fixed_size_mut().is_some());
    }

    #[test]
    fn test_op1a_flavour_forwards() {
        let mut track = As11Track::new(
            As11Flavour::Op1a,
            EssenceType::Avci50_1080i,
            Rational::fps_25(),
        )
        .unwrap();
        assert_eq!(track.flavour(), As11Flavour::Op1a);
        assert!(track.avci().is_some());

        let frame = vec![0u8; track.sample_size() as usize];
        track.write_samples(&frame, 1).unwrap();
        assert_eq!(track.position(), 1);
        assert_eq!(track.op1a().map(|t| t.position()), Some(1));
    }
}
