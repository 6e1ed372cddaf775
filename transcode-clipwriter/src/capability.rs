//! Capability interfaces implemented by family writer tracks
//!
//! Every family track implements [`EssenceTrack`]. The optional
//! capabilities are exposed through accessors that return `None` when the
//! track's essence sub-kind does not have them; a PCM track has no picture
//! descriptor, a DV track has no sample sequence, and so on.

use crate::avci::FamilyAvciMode;
use crate::error::Result;
use crate::essence::EssenceType;
use crate::sequence::SampleSequence;
use crate::types::Rational;

/// Picture aspect ratio
pub trait PictureCapable {
    fn set_aspect_ratio(&mut self, aspect_ratio: Rational);
    fn aspect_ratio(&self) -> Rational;
}

/// Active Format Description code carried in the picture descriptor
pub trait AfdCapable {
    fn set_afd(&mut self, afd: u8);
    fn afd(&self) -> Option<u8>;
}

/// Bits per component for DV and uncompressed picture
pub trait ComponentDepthCapable {
    fn set_component_depth(&mut self, depth: u32);
    fn component_depth(&self) -> u32;
}

/// Constant bytes per frame that may be overridden (D-10)
pub trait FixedSizeCapable {
    fn set_sample_size(&mut self, size: u32);
}

/// AVC-Intra header handling, parameterised by the family's mode enum
pub trait AvciCapable<M: FamilyAvciMode> {
    fn set_mode(&mut self, mode: M);
    fn mode(&self) -> M;
    /// Cache the 512-byte sequence/picture parameter set header
    fn set_header(&mut self, header: &[u8]);
    fn header(&self) -> Option<&[u8]>;
    fn sample_without_header_size(&self) -> u32;
}

/// PCM sound properties
pub trait PcmCapable {
    fn set_sampling_rate(&mut self, sampling_rate: Rational);
    fn sampling_rate(&self) -> Rational;
    fn set_quantization_bits(&mut self, bits: u32);
    fn quantization_bits(&self) -> u32;
    fn set_channel_count(&mut self, count: u32);
    fn channel_count(&self) -> u32;
    fn set_locked(&mut self, locked: bool);
    fn locked(&self) -> bool;
    fn set_audio_ref_level(&mut self, level: i8);
    fn audio_ref_level(&self) -> Option<i8>;
    fn set_dial_norm(&mut self, dial_norm: i8);
    fn dial_norm(&self) -> Option<i8>;
    fn set_sequence_offset(&mut self, offset: u8);
    fn sequence_offset(&self) -> u8;
    /// Per-frame sample counts, rotated by the sequence offset
    fn shifted_sample_sequence(&self) -> &SampleSequence;
}

/// Uncompressed picture whose input frames are shorter than stored frames
pub trait UncInputCapable {
    fn set_input_height(&mut self, height: u32);
    fn input_height(&self) -> u32;
    fn input_sample_size(&self) -> u32;
}

/// Picture that stores a single field per frame
pub trait SingleFieldCapable {
    fn is_single_field(&self) -> bool;
}

/// Optional capabilities of a track, each `None` unless the track's
/// essence sub-kind has it
pub trait TrackCapabilities {
    fn picture_mut(&mut self) -> Option<&mut dyn PictureCapable> {
        None
    }
    fn picture(&self) -> Option<&dyn PictureCapable> {
        None
    }
    fn afd_mut(&mut self) -> Option<&mut dyn AfdCapable> {
        None
    }
    fn afd(&self) -> Option<&dyn AfdCapable> {
        None
    }
    fn component_depth_mut(&mut self) -> Option<&mut dyn ComponentDepthCapable> {
        None
    }
    fn component_depth(&self) -> Option<&dyn ComponentDepthCapable> {
        None
    }
    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        None
    }
    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        None
    }
    fn pcm(&self) -> Option<&dyn PcmCapable> {
        None
    }
    fn unc_input_mut(&mut self) -> Option<&mut dyn UncInputCapable> {
        None
    }
    fn unc_input(&self) -> Option<&dyn UncInputCapable> {
        None
    }
    fn single_field(&self) -> Option<&dyn SingleFieldCapable> {
        None
    }
}

/// Contract shared by every family writer track
pub trait EssenceTrack: TrackCapabilities + Send + Sync {
    fn essence_type(&self) -> EssenceType;

    /// Frame rate of the clip the track belongs to
    fn edit_rate(&self) -> Rational;

    fn set_output_track_number(&mut self, track_number: u32);
    fn output_track_number(&self) -> u32;

    /// Append `num_samples` samples held in `data`
    fn write_samples(&mut self, data: &[u8], num_samples: u32) -> Result<()>;

    fn is_picture(&self) -> bool;

    /// Bytes per sample as stored, or 0 for variable-size essence
    fn sample_size(&self) -> u32;

    /// Samples written so far
    fn position(&self) -> u64;

    /// Essence payload bytes written so far
    fn bytes_written(&self) -> u64;

    /// The KLV-wrapped essence stream
    fn essence_data(&self) -> &[u8];
}
