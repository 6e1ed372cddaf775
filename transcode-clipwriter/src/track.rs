//! Uniform track over the five clip writer families
//!
//! [`ClipWriterTrack`] owns exactly one family track. Configuration setters
//! reach the family track's optional capabilities; when the track does not
//! have the capability (aspect ratio on a sound track, AFD on an Avid
//! picture, ...) the call does nothing.

use crate::avci::{translate_mode, AvciMode, FamilyAvciMode};
use crate::capability::{AvciCapable, EssenceTrack};
use crate::error::Result;
use crate::essence::EssenceType;
use crate::types::Rational;
use crate::writer::as02::As02Track;
use crate::writer::as11::{As11Flavour, As11Track};
use crate::writer::avid::AvidTrack;
use crate::writer::d10::D10Track;
use crate::writer::op1a::Op1aTrack;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clip writer family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipFamily {
    As02,
    As11(As11Flavour),
    Op1a,
    Avid,
    D10,
}

impl fmt::Display for ClipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipFamily::As02 => write!(f, "AS-02"),
            ClipFamily::As11(flavour) => write!(f, "AS-11 ({})", flavour),
            ClipFamily::Op1a => write!(f, "OP-1a"),
            ClipFamily::Avid => write!(f, "Avid"),
            ClipFamily::D10 => write!(f, "D-10"),
        }
    }
}

/// A clip writer track of any family
#[derive(Debug)]
pub enum ClipWriterTrack {
    As02(As02Track),
    As11(As11Track),
    Op1a(Op1aTrack),
    Avid(AvidTrack),
    D10(D10Track),
}

impl From<As02Track> for ClipWriterTrack {
    fn from(track: As02Track) -> Self {
        ClipWriterTrack::As02(track)
    }
}

impl From<As11Track> for ClipWriterTrack {
    fn from(track: As11Track) -> Self {
        ClipWriterTrack::As11(track)
    }
}

impl From<Op1aTrack> for ClipWriterTrack {
    fn from(track: Op1aTrack) -> Self {
        ClipWriterTrack::Op1a(track)
    }
}

impl From<AvidTrack> for ClipWriterTrack {
    fn from(track: AvidTrack) -> Self {
        ClipWriterTrack::Avid(track)
    }
}

impl From<D10Track> for ClipWriterTrack {
    fn from(track: D10Track) -> Self {
        ClipWriterTrack::D10(track)
    }
}

/// The family track's essence type is authoritative; a differing
/// `essence_type` argument is logged.
fn check_essence_type(family: ClipFamily, essence_type: EssenceType, track: &dyn EssenceTrack) {
    if track.essence_type() != essence_type {
        log::warn!(
            "{} track holds {} essence, not {}",
            family,
            track.essence_type(),
            essence_type
        );
    }
}

fn set_family_avci_mode<M: FamilyAvciMode>(avci: Option<&mut dyn AvciCapable<M>>, mode: AvciMode) {
    if let Some(avci) = avci {
        if let Some(family_mode) = translate_mode::<M>(mode) {
            avci.set_mode(family_mode);
        }
    }
}

fn set_family_avci_header<M: FamilyAvciMode>(avci: Option<&mut dyn AvciCapable<M>>, header: &[u8]) {
    if let Some(avci) = avci {
        avci.set_header(header);
    }
}

fn family_avci_size<M: FamilyAvciMode>(avci: Option<&dyn AvciCapable<M>>) -> u32 {
    avci.map_or(0, |a| a.sample_without_header_size())
}

impl ClipWriterTrack {
    pub fn from_as02(essence_type: EssenceType, track: As02Track) -> Self {
        check_essence_type(ClipFamily::As02, essence_type, &track);
        ClipWriterTrack::As02(track)
    }

    pub fn from_as11(essence_type: EssenceType, track: As11Track) -> Self {
        check_essence_type(ClipFamily::As11(track.flavour()), essence_type, &track);
        ClipWriterTrack::As11(track)
    }

    pub fn from_op1a(essence_type: EssenceType, track: Op1aTrack) -> Self {
        check_essence_type(ClipFamily::Op1a, essence_type, &track);
        ClipWriterTrack::Op1a(track)
    }

    pub fn from_avid(essence_type: EssenceType, track: AvidTrack) -> Self {
        check_essence_type(ClipFamily::Avid, essence_type, &track);
        ClipWriterTrack::Avid(track)
    }

    pub fn from_d10(essence_type: EssenceType, track: D10Track) -> Self {
        check_essence_type(ClipFamily::D10, essence_type, &track);
        ClipWriterTrack::D10(track)
    }

    /// Whether `family` can write `essence_type` at `sample_rate`
    ///
    /// `sample_rate` is the frame rate for picture essence and the audio
    /// sampling rate for sound.
    pub fn is_supported(
        family: ClipFamily,
        essence_type: EssenceType,
        sample_rate: Rational,
    ) -> bool {
        match family {
            ClipFamily::As02 => As02Track::is_supported(essence_type, sample_rate),
            ClipFamily::As11(flavour) => {
                As11Track::is_supported(flavour, essence_type, sample_rate)
            }
            ClipFamily::Op1a => Op1aTrack::is_supported(essence_type, sample_rate),
            ClipFamily::Avid => AvidTrack::is_supported(essence_type, sample_rate),
            ClipFamily::D10 => D10Track::is_supported(essence_type, sample_rate),
        }
    }

    /// Create a family track with default settings
    pub fn create(
        family: ClipFamily,
        essence_type: EssenceType,
        frame_rate: Rational,
    ) -> Result<Self> {
        let track: ClipWriterTrack = match family {
            ClipFamily::As02 => As02Track::new(essence_type, frame_rate)?.into(),
            ClipFamily::As11(flavour) => As11Track::new(flavour, essence_type, frame_rate)?.into(),
            ClipFamily::Op1a => Op1aTrack::new(essence_type, frame_rate)?.into(),
            ClipFamily::Avid => AvidTrack::new(essence_type, frame_rate)?.into(),
            ClipFamily::D10 => D10Track::new(essence_type, frame_rate)?.into(),
        };
        Ok(track)
    }

    pub fn family(&self) -> ClipFamily {
        match self {
            ClipWriterTrack::As02(_) => ClipFamily::As02,
            ClipWriterTrack::As11(track) => ClipFamily::As11(track.flavour()),
            ClipWriterTrack::Op1a(_) => ClipFamily::Op1a,
            ClipWriterTrack::Avid(_) => ClipFamily::Avid,
            ClipWriterTrack::D10(_) => ClipFamily::D10,
        }
    }

    pub fn essence_type(&self) -> EssenceType {
        self.track().essence_type()
    }

    pub fn edit_rate(&self) -> Rational {
        self.track().edit_rate()
    }

    /// The family track as its common interface
    pub fn essence_track(&self) -> &dyn EssenceTrack {
        self.track()
    }

    fn track(&self) -> &dyn EssenceTrack {
        match self {
            ClipWriterTrack::As02(track) => track,
            ClipWriterTrack::As11(track) => track,
            ClipWriterTrack::Op1a(track) => track,
            ClipWriterTrack::Avid(track) => track,
            ClipWriterTrack::D10(track) => track,
        }
    }

    fn track_mut(&mut self) -> &mut dyn EssenceTrack {
        match self {
            ClipWriterTrack::As02(track) => track,
            ClipWriterTrack::As11(track) => track,
            ClipWriterTrack::Op1a(track) => track,
            ClipWriterTrack::Avid(track) => track,
            ClipWriterTrack::D10(track) => track,
        }
    }

    pub fn as_as02(&self) -> Option<&As02Track> {
        match self {
            ClipWriterTrack::As02(track) => Some(track),
            _ => None,
        }
    }

    pub fn as_as11(&self) -> Option<&As11Track> {
        match self {
            ClipWriterTrack::As11(track) => Some(track),
            _ => None,
        }
    }

    pub fn as_op1a(&self) -> Option<&Op1aTrack> {
        match self {
            ClipWriterTrack::Op1a(track) => Some(track),
            _ => None,
        }
    }

    pub fn as_avid(&self) -> Option<&AvidTrack> {
        match self {
            ClipWriterTrack::Avid(track) => Some(track),
            _ => None,
        }
    }

    pub fn as_d10(&self) -> Option<&D10Track> {
        match self {
            ClipWriterTrack::D10(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_as02(self) -> Option<As02Track> {
        match self {
            ClipWriterTrack::As02(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_as11(self) -> Option<As11Track> {
        match self {
            ClipWriterTrack::As11(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_op1a(self) -> Option<Op1aTrack> {
        match self {
            ClipWriterTrack::Op1a(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_avid(self) -> Option<AvidTrack> {
        match self {
            ClipWriterTrack::Avid(track) => Some(track),
            _ => None,
        }
    }

    pub fn into_d10(self) -> Option<D10Track> {
        match self {
            ClipWriterTrack::D10(track) => Some(track),
            _ => None,
        }
    }

    // Configuration

    pub fn set_output_track_number(&mut self, track_number: u32) {
        self.track_mut().set_output_track_number(track_number);
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: Rational) {
        if let Some(picture) = self.track_mut().picture_mut() {
            picture.set_aspect_ratio(aspect_ratio);
        }
    }

    pub fn set_afd(&mut self, afd: u8) {
        if let Some(picture) = self.track_mut().afd_mut() {
            picture.set_afd(afd);
        }
    }

    pub fn set_component_depth(&mut self, depth: u32) {
        if let Some(picture) = self.track_mut().component_depth_mut() {
            picture.set_component_depth(depth);
        }
    }

    pub fn set_sample_size(&mut self, size: u32) {
        if let Some(picture) = self.track_mut().fixed_size_mut() {
            picture.set_sample_size(size);
        }
    }

    pub fn set_input_height(&mut self, height: u32) {
        if let Some(picture) = self.track_mut().unc_input_mut() {
            picture.set_input_height(height);
        }
    }

    pub fn set_sampling_rate(&mut self, sampling_rate: Rational) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_sampling_rate(sampling_rate);
        }
    }

    pub fn set_quantization_bits(&mut self, bits: u32) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_quantization_bits(bits);
        }
    }

    pub fn set_channel_count(&mut self, count: u32) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_channel_count(count);
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_locked(locked);
        }
    }

    pub fn set_audio_ref_level(&mut self, level: i8) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_audio_ref_level(level);
        }
    }

    pub fn set_dial_norm(&mut self, dial_norm: i8) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_dial_norm(dial_norm);
        }
    }

    pub fn set_sequence_offset(&mut self, offset: u8) {
        if let Some(pcm) = self.track_mut().pcm_mut() {
            pcm.set_sequence_offset(offset);
        }
    }

    /// Translate `mode` into the family's AVC-Intra mode and apply it
    ///
    /// Modes the family cannot express are logged and leave the current
    /// mode unchanged.
    pub fn set_avci_mode(&mut self, mode: AvciMode) {
        match self {
            ClipWriterTrack::As02(track) => set_family_avci_mode(track.avci_mut(), mode),
            ClipWriterTrack::As11(track) => set_family_avci_mode(track.avci_mut(), mode),
            ClipWriterTrack::Op1a(track) => set_family_avci_mode(track.avci_mut(), mode),
            ClipWriterTrack::Avid(track) => set_family_avci_mode(track.avci_mut(), mode),
            ClipWriterTrack::D10(_) => {}
        }
    }

    pub fn set_avci_header(&mut self, header: &[u8]) {
        match self {
            ClipWriterTrack::As02(track) => set_family_avci_header(track.avci_mut(), header),
            ClipWriterTrack::As11(track) => set_family_avci_header(track.avci_mut(), header),
            ClipWriterTrack::Op1a(track) => set_family_avci_header(track.avci_mut(), header),
            ClipWriterTrack::Avid(track) => set_family_avci_header(track.avci_mut(), header),
            ClipWriterTrack::D10(_) => {}
        }
    }

    // Essence

    pub fn write_samples(&mut self, data: &[u8], num_samples: u32) -> Result<()> {
        self.track_mut().write_samples(data, num_samples)
    }

    // Queries

    pub fn output_track_number(&self) -> u32 {
        self.track().output_track_number()
    }

    pub fn is_picture(&self) -> bool {
        self.track().is_picture()
    }

    pub fn sample_size(&self) -> u32 {
        self.track().sample_size()
    }

    /// Bytes per input frame; differs from `sample_size` only for Avid
    /// uncompressed picture
    pub fn input_sample_size(&self) -> u32 {
        let track = self.track();
        track
            .unc_input()
            .map_or_else(|| track.sample_size(), |unc| unc.input_sample_size())
    }

    pub fn avci_sample_without_header_size(&self) -> u32 {
        match self {
            ClipWriterTrack::As02(track) => family_avci_size(track.avci()),
            ClipWriterTrack::As11(track) => family_avci_size(track.avci()),
            ClipWriterTrack::Op1a(track) => family_avci_size(track.avci()),
            ClipWriterTrack::Avid(track) => family_avci_size(track.avci()),
            ClipWriterTrack::D10(_) => 0,
        }
    }

    pub fn is_single_field(&self) -> bool {
        self.track()
            .single_field()
            .is_some_and(|picture| picture.is_single_field())
    }

    /// Per-frame audio sample counts rotated by the sequence offset, or
    /// `[0]` for non-PCM tracks
    pub fn shifted_sample_sequence(&self) -> Vec<u32> {
        self.track().pcm().map_or_else(
            || vec![0],
            |pcm| pcm.shifted_sample_sequence().as_slice().to_vec(),
        )
    }

    /// Samples written so far
    pub fn position(&self) -> u64 {
        self.track().position()
    }

    pub fn bytes_written(&self) -> u64 {
        self.track().bytes_written()
    }

    pub fn essence_data(&self) -> &[u8] {
        self.track().essence_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_track_is_send_sync() {
        assert_send_sync::<ClipWriterTrack>();
    }

    #[test]
    fn test_family_display() {
        assert_eq!(ClipFamily::As02.to_string(), "AS-02");
        assert_eq!(ClipFamily::As11(As11Flavour::D10).to_string(), "AS-11 (D-10)");
        assert_eq!(ClipFamily::D10.to_string(), "D-10");
    }

    #[test]
    fn test_family_from_handle() {
        let handle = AvidTrack::new(EssenceType::Dv50, Rational::fps_25()).unwrap();
        let track = ClipWriterTrack::from_avid(EssenceType::Dv50, handle);
        assert_eq!(track.family(), ClipFamily::Avid);
        assert_eq!(track.essence_type(), EssenceType::Dv50);
        assert!(track.as_avid().is_some());
        assert!(track.as_op1a().is_none());
        assert!(track.into_as02().is_none());
    }

    #[test]
    fn test_query_defaults() {
        let track =
            ClipWriterTrack::create(ClipFamily::As02, EssenceType::IecDv25, Rational::fps_25())
                .unwrap();
        assert!(track.is_picture());
        assert_eq!(track.input_sample_size(), track.sample_size());
        assert_eq!(track.avci_sample_without_header_size(), 0);
        assert!(!track.is_single_field());
        assert_eq!(track.shifted_sample_sequence(), vec![0]);
    }

    #[test]
    fn test_create_unsupported() {
        let result =
            ClipWriterTrack::create(ClipFamily::D10, EssenceType::IecDv25, Rational::fps_25());
        assert!(result.is_err());
    }
}
