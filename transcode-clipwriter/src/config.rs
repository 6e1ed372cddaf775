//! Serializable track configuration

use crate::avci::AvciMode;
use crate::track::ClipWriterTrack;
use crate::types::Rational;
use serde::{Deserialize, Serialize};

/// Settings to push onto a clip writer track
///
/// Every field is optional; unset fields leave the track's value alone.
/// Fields that do not apply to the track's essence are ignored, so one
/// configuration can be applied to picture and sound tracks alike.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Output track number
    pub track_number: Option<u32>,
    /// Picture aspect ratio
    pub aspect_ratio: Option<Rational>,
    /// Active Format Description code
    pub afd: Option<u8>,
    /// Bits per picture component
    pub component_depth: Option<u32>,
    /// Constant picture frame size in bytes
    pub sample_size: Option<u32>,
    /// Lines per input picture frame
    pub input_height: Option<u32>,
    /// AVC-Intra header mode
    pub avci_mode: Option<AvciMode>,
    /// Audio sampling rate
    pub sampling_rate: Option<Rational>,
    /// Bits per audio sample
    pub quantization_bits: Option<u32>,
    /// Audio channels
    pub channel_count: Option<u32>,
    /// Audio locked to video
    pub locked: Option<bool>,
    /// Audio reference level in dBm
    pub audio_ref_level: Option<i8>,
    /// Dialogue normalisation
    pub dial_norm: Option<i8>,
    /// Start position in the audio sample sequence
    pub sequence_offset: Option<u8>,
}

impl TrackConfig {
    /// Apply all set fields to `track`
    pub fn apply(&self, track: &mut ClipWriterTrack) {
        if let Some(track_number) = self.track_number {
            track.set_output_track_number(track_number);
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            track.set_aspect_ratio(aspect_ratio);
        }
        if let Some(afd) = self.afd {
            track.set_afd(afd);
        }
        if let Some(depth) = self.component_depth {
            track.set_component_depth(depth);
        }
        if let Some(size) = self.sample_size {
            track.set_sample_size(size);
        }
        if let Some(height) = self.input_height {
            track.set_input_height(height);
        }
        if let Some(mode) = self.avci_mode {
            track.set_avci_mode(mode);
        }

        // Format before the sequence offset; both are frozen once the
        // sequence is computed
        if let Some(rate) = self.sampling_rate {
            track.set_sampling_rate(rate);
        }
        if let Some(bits) = self.quantization_bits {
            track.set_quantization_bits(bits);
        }
        if let Some(count) = self.channel_count {
            track.set_channel_count(count);
        }
        if let Some(locked) = self.locked {
            track.set_locked(locked);
        }
        if let Some(level) = self.audio_ref_level {
            track.set_audio_ref_level(level);
        }
        if let Some(dial_norm) = self.dial_norm {
            track.set_dial_norm(dial_norm);
        }
        if let Some(offset) = self.sequence_offset {
            track.set_sequence_offset(offset);
        }
    }
}
