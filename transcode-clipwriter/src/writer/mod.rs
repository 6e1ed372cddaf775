//! Family writer tracks
//!
//! One module per clip writer family. Each family track is a
//! [`WriterTrack`] over a family-specific essence kind enum; the kind
//! decides which optional capabilities the track exposes and how samples
//! are validated, while the shared [`EssenceStream`] frame- or clip-wraps
//! the prepared samples into KLV essence elements.

pub mod as02;
pub mod as11;
pub mod avid;
pub mod d10;
pub mod op1a;

mod avci;
mod pcm;
mod picture;

pub use avci::AvciEssence;
pub use pcm::PcmEssence;
pub use picture::{D10Essence, DvEssence, PictureDescriptor, PictureEssence, UncEssence};

use crate::capability::{
    AfdCapable, ComponentDepthCapable, EssenceTrack, FixedSizeCapable, PcmCapable,
    PictureCapable, SingleFieldCapable, TrackCapabilities, UncInputCapable,
};
use crate::error::{ClipWriterError, Result};
use crate::essence::EssenceType;
use crate::klv::{encode_ber_length_fixed, write_element};
use crate::track::ClipFamily;
use crate::types::Rational;
use crate::ul::{essence_element_key, Wrapping, MAX_ELEMENT_NUMBER};
use std::borrow::Cow;

/// BER length size for frame-wrapped elements
const FRAME_LLEN: u8 = 4;
/// BER length size for clip-wrapped elements and oversized frames
const CLIP_LLEN: u8 = 9;

/// Validates incoming samples for one essence sub-kind and lays them out
/// for storage
pub trait SampleLayout {
    /// Bytes per stored sample, or 0 if variable
    fn sample_size(&self) -> u32;

    /// Check `data` holds `num_samples` samples and return the bytes to store
    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>>;
}

/// Family-specific set of essence sub-kinds
pub trait EssenceKind: TrackCapabilities + Send + Sync {
    const FAMILY: ClipFamily;
    const WRAPPING: Wrapping;

    fn layout(&self) -> &dyn SampleLayout;
    fn layout_mut(&mut self) -> &mut dyn SampleLayout;
}

/// KLV essence output of one track
#[derive(Debug)]
pub struct EssenceStream {
    wrapping: Wrapping,
    essence_type: EssenceType,
    track_number: u32,
    data: Vec<u8>,
    position: u64,
    bytes_written: u64,
}

impl EssenceStream {
    fn new(wrapping: Wrapping, essence_type: EssenceType) -> Self {
        EssenceStream {
            wrapping,
            essence_type,
            track_number: 1,
            data: Vec::new(),
            position: 0,
            bytes_written: 0,
        }
    }

    fn set_track_number(&mut self, track_number: u32) {
        if self.position > 0 {
            log::warn!(
                "Ignoring output track number {} set after essence was written",
                track_number
            );
            return;
        }
        if track_number > MAX_ELEMENT_NUMBER {
            log::warn!(
                "Ignoring output track number {} above the element number limit {}",
                track_number,
                MAX_ELEMENT_NUMBER
            );
            return;
        }
        self.track_number = track_number;
    }

    fn append(&mut self, payload: &[u8], num_samples: u32) -> Result<()> {
        let key = essence_element_key(self.wrapping, self.essence_type, self.track_number);

        match self.wrapping {
            Wrapping::Clip => {
                let total = self.bytes_written as usize + payload.len();
                let len_bytes = encode_ber_length_fixed(total, CLIP_LLEN)?;
                if self.data.is_empty() {
                    write_element(&mut self.data, &key, CLIP_LLEN, &[])?;
                }
                self.data[16..16 + len_bytes.len()].copy_from_slice(&len_bytes);
                self.data.extend_from_slice(payload);
            }
            Wrapping::Frame | Wrapping::ContentPackage => {
                let llen = if payload.len() < 1 << 24 {
                    FRAME_LLEN
                } else {
                    CLIP_LLEN
                };
                write_element(&mut self.data, &key, llen, payload)?;
            }
        }

        self.position += num_samples as u64;
        self.bytes_written += payload.len() as u64;
        Ok(())
    }
}

/// A family writer track: an essence kind plus its output stream
#[derive(Debug)]
pub struct WriterTrack<K> {
    essence_type: EssenceType,
    edit_rate: Rational,
    stream: EssenceStream,
    kind: K,
}

impl<K: EssenceKind> WriterTrack<K> {
    fn from_kind(essence_type: EssenceType, edit_rate: Rational, kind: K) -> Self {
        log::debug!(
            "Created {} {} track at {}",
            K::FAMILY,
            essence_type,
            edit_rate
        );
        WriterTrack {
            essence_type,
            edit_rate,
            stream: EssenceStream::new(K::WRAPPING, essence_type),
            kind,
        }
    }

    /// Family this track belongs to
    pub fn family(&self) -> ClipFamily {
        K::FAMILY
    }

    /// The essence sub-kind
    pub fn kind(&self) -> &K {
        &self.kind
    }
}

/// Common checks done by every family constructor
fn check_new(
    family: ClipFamily,
    supported: bool,
    essence_type: EssenceType,
    frame_rate: Rational,
) -> Result<()> {
    if !frame_rate.is_positive() {
        return Err(ClipWriterError::InvalidEditRate(frame_rate));
    }
    if !supported {
        return Err(ClipWriterError::Unsupported {
            family,
            essence_type,
            sample_rate: support_rate(essence_type, frame_rate),
        });
    }
    Ok(())
}

/// Rate a support table is consulted with: the default sampling rate for
/// sound, the frame rate for picture
fn support_rate(essence_type: EssenceType, frame_rate: Rational) -> Rational {
    if essence_type.is_sound() {
        Rational::sampling_48k()
    } else {
        frame_rate
    }
}

impl<K: EssenceKind> TrackCapabilities for WriterTrack<K> {
    fn picture_mut(&mut self) -> Option<&mut dyn PictureCapable> {
        self.kind.picture_mut()
    }
    fn picture(&self) -> Option<&dyn PictureCapable> {
        self.kind.picture()
    }
    fn afd_mut(&mut self) -> Option<&mut dyn AfdCapable> {
        self.kind.afd_mut()
    }
    fn afd(&self) -> Option<&dyn AfdCapable> {
        self.kind.afd()
    }
    fn component_depth_mut(&mut self) -> Option<&mut dyn ComponentDepthCapable> {
        self.kind.component_depth_mut()
    }
    fn component_depth(&self) -> Option<&dyn ComponentDepthCapable> {
        self.kind.component_depth()
    }
    fn fixed_size_mut(&mut self) -> Option<&mut dyn FixedSizeCapable> {
        self.kind.fixed_size_mut()
    }
    fn pcm_mut(&mut self) -> Option<&mut dyn PcmCapable> {
        self.kind.pcm_mut()
    }
    fn pcm(&self) -> Option<&dyn PcmCapable> {
        self.kind.pcm()
    }
    fn unc_input_mut(&mut self) -> Option<&mut dyn UncInputCapable> {
        self.kind.unc_input_mut()
    }
    fn unc_input(&self) -> Option<&dyn UncInputCapable> {
        self.kind.unc_input()
    }
    fn single_field(&self) -> Option<&dyn SingleFieldCapable> {
        self.kind.single_field()
    }
}

impl<K: EssenceKind> EssenceTrack for WriterTrack<K> {
    fn essence_type(&self) -> EssenceType {
        self.essence_type
    }

    fn edit_rate(&self) -> Rational {
        self.edit_rate
    }

    fn set_output_track_number(&mut self, track_number: u32) {
        self.stream.set_track_number(track_number);
    }

    fn output_track_number(&self) -> u32 {
        self.stream.track_number
    }

    fn write_samples(&mut self, data: &[u8], num_samples: u32) -> Result<()> {
        if num_samples == 0 || data.is_empty() {
            return Err(ClipWriterError::InvalidSampleData(
                "empty sample buffer".into(),
            ));
        }

        let payload = self.kind.layout_mut().prepare(data, num_samples)?;

        // Multi-frame picture writes are always fixed size
        if self.essence_type.is_picture() && num_samples > 1 {
            let frame_size = payload.len() / num_samples as usize;
            for frame in payload.chunks_exact(frame_size) {
                self.stream.append(frame, 1)?;
            }
            return Ok(());
        }
        self.stream.append(&payload, num_samples)
    }

    fn is_picture(&self) -> bool {
        self.essence_type.is_picture()
    }

    fn sample_size(&self) -> u32 {
        self.kind.layout().sample_size()
    }

    fn position(&self) -> u64 {
        self.stream.position
    }

    fn bytes_written(&self) -> u64 {
        self.stream.bytes_written
    }

    fn essence_data(&self) -> &[u8] {
        &self.stream.data
    }
}

/// Require `data` to hold exactly `num_samples` samples of `sample_size` bytes
fn check_fixed_size(data: &[u8], sample_size: u32, num_samples: u32) -> Result<()> {
    let expected = sample_size as usize * num_samples as usize;
    if data.len() != expected {
        return Err(ClipWriterError::SampleSizeMismatch {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::klv::KlvReader;
    use crate::ul::UniversalLabel;

    #[test]
    fn test_frame_wrapped_stream() {
        let mut stream = EssenceStream::new(Wrapping::Frame, EssenceType::IecDv25);
        stream.set_track_number(2);
        stream.append(&[1, 2, 3], 1).unwrap();
        stream.append(&[4, 5, 6], 1).unwrap();

        assert_eq!(stream.position, 2);
        assert_eq!(stream.bytes_written, 6);

        let elements: Vec<_> = KlvReader::new(&stream.data)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].value, vec![4, 5, 6]);
        assert_eq!(elements[0].key.element_number(), 2);
    }

    #[test]
    fn test_clip_wrapped_stream() {
        let mut stream = EssenceStream::new(Wrapping::Clip, EssenceType::WavePcm);
        stream.append(&[1, 2, 3, 4], 2).unwrap();
        stream.append(&[5, 6], 1).unwrap();

        let elements: Vec<_> = KlvReader::new(&stream.data)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].value, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(stream.position, 3);
    }

    #[test]
    fn test_track_number_frozen_after_write() {
        let mut stream = EssenceStream::new(Wrapping::Frame, EssenceType::WavePcm);
        stream.append(&[0, 0], 1).unwrap();
        stream.set_track_number(7);
        assert_eq!(stream.track_number, 1);

        let first = KlvReader::new(&stream.data).next().unwrap().unwrap();
        assert_eq!(UniversalLabel::new(*first.key.as_bytes()).element_number(), 1);
    }

    #[test]
    fn test_track_number_limited_to_one_byte() {
        let mut stream = EssenceStream::new(Wrapping::Frame, EssenceType::IecDv25);
        stream.set_track_number(255);
        assert_eq!(stream.track_number, 255);
        stream.set_track_number(256);
        assert_eq!(stream.track_number, 255);
    }
}
