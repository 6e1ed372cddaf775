//! WAVE PCM sound

use super::{check_fixed_size, SampleLayout};
use crate::capability::PcmCapable;
use crate::error::Result;
use crate::essence::EssenceType;
use crate::sequence::SampleSequence;
use crate::types::Rational;
use std::borrow::Cow;
use std::sync::OnceLock;

const DEFAULT_QUANTIZATION_BITS: u32 = 16;
const MAX_QUANTIZATION_BITS: u32 = 32;

/// PCM sound essence
///
/// The shifted sample sequence is computed on first query and cached; once
/// it is cached, or once samples have been written, the sampling rate and
/// sequence offset can no longer change.
#[derive(Debug, Clone)]
pub struct PcmEssence {
    edit_rate: Rational,
    sampling_rate: Rational,
    quantization_bits: u32,
    channel_count: u32,
    locked: bool,
    audio_ref_level: Option<i8>,
    dial_norm: Option<i8>,
    sequence_offset: u8,
    sequence: OnceLock<SampleSequence>,
    started: bool,
}

impl PcmEssence {
    pub fn new(edit_rate: Rational) -> Self {
        PcmEssence {
            edit_rate,
            sampling_rate: Rational::sampling_48k(),
            quantization_bits: DEFAULT_QUANTIZATION_BITS,
            channel_count: 1,
            locked: false,
            audio_ref_level: None,
            dial_norm: None,
            sequence_offset: 0,
            sequence: OnceLock::new(),
            started: false,
        }
    }

    /// Bytes per sample across all channels
    pub fn block_align(&self) -> u32 {
        self.channel_count * self.quantization_bits.div_ceil(8)
    }

    fn sequence_frozen(&self) -> bool {
        self.started || self.sequence.get().is_some()
    }
}

impl PcmCapable for PcmEssence {
    fn set_sampling_rate(&mut self, sampling_rate: Rational) {
        if self.sequence_frozen() {
            log::warn!(
                "Ignoring sampling rate {} set after the sample sequence was fixed",
                sampling_rate
            );
            return;
        }
        if !EssenceType::WavePcm.is_valid_rate(sampling_rate) {
            log::warn!("Ignoring unsupported sampling rate {}", sampling_rate);
            return;
        }
        self.sampling_rate = sampling_rate;
    }

    fn sampling_rate(&self) -> Rational {
        self.sampling_rate
    }

    fn set_quantization_bits(&mut self, bits: u32) {
        if self.started {
            log::warn!("Ignoring quantization bits change after samples were written");
            return;
        }
        if bits == 0 || bits > MAX_QUANTIZATION_BITS {
            log::warn!("Ignoring unsupported quantization bits {}", bits);
            return;
        }
        self.quantization_bits = bits;
    }

    fn quantization_bits(&self) -> u32 {
        self.quantization_bits
    }

    fn set_channel_count(&mut self, count: u32) {
        if self.started {
            log::warn!("Ignoring channel count change after samples were written");
            return;
        }
        if count == 0 {
            log::warn!("Ignoring zero channel count");
            return;
        }
        self.channel_count = count;
    }

    fn channel_count(&self) -> u32 {
        self.channel_count
    }

    fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    fn locked(&self) -> bool {
        self.locked
    }

    fn set_audio_ref_level(&mut self, level: i8) {
        self.audio_ref_level = Some(level);
    }

    fn audio_ref_level(&self) -> Option<i8> {
        self.audio_ref_level
    }

    fn set_dial_norm(&mut self, dial_norm: i8) {
        self.dial_norm = Some(dial_norm);
    }

    fn dial_norm(&self) -> Option<i8> {
        self.dial_norm
    }

    fn set_sequence_offset(&mut self, offset: u8) {
        if self.sequence_frozen() {
            log::warn!(
                "Ignoring sequence offset {} set after the sample sequence was fixed",
                offset
            );
            return;
        }
        self.sequence_offset = offset;
    }

    fn sequence_offset(&self) -> u8 {
        self.sequence_offset
    }

    fn shifted_sample_sequence(&self) -> &SampleSequence {
        self.sequence.get_or_init(|| {
            let sequence = SampleSequence::new(self.sampling_rate, self.edit_rate)
                .map(|seq| seq.shifted(self.sequence_offset as usize))
                .unwrap_or_else(|| {
                    log::warn!(
                        "No sample sequence for {} Hz at {} fps",
                        self.sampling_rate,
                        self.edit_rate
                    );
                    SampleSequence::constant(0)
                });
            log::debug!(
                "Sample sequence for {} Hz at {} fps, offset {}: {}",
                self.sampling_rate,
                self.edit_rate,
                self.sequence_offset,
                sequence
            );
            sequence
        })
    }
}

impl SampleLayout for PcmEssence {
    fn sample_size(&self) -> u32 {
        self.block_align()
    }

    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>> {
        check_fixed_size(data, self.block_align(), num_samples)?;
        self.started = true;
        Ok(Cow::Borrowed(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pcm = PcmEssence::new(Rational::fps_25());
        assert_eq!(pcm.sampling_rate(), Rational::sampling_48k());
        assert_eq!(pcm.quantization_bits(), 16);
        assert_eq!(pcm.channel_count(), 1);
        assert_eq!(pcm.sample_size(), 2);
        assert_eq!(pcm.audio_ref_level(), None);
        assert_eq!(pcm.shifted_sample_sequence().as_slice(), &[1920]);
    }

    #[test]
    fn test_block_align() {
        let mut pcm = PcmEssence::new(Rational::fps_25());
        pcm.set_quantization_bits(24);
        pcm.set_channel_count(4);
        assert_eq!(pcm.block_align(), 12);

        pcm.set_quantization_bits(20);
        assert_eq!(pcm.block_align(), 12);

        pcm.set_quantization_bits(0);
        assert_eq!(pcm.quantization_bits(), 20);
    }

    #[test]
    fn test_unsupported_sampling_rate_ignored() {
        let mut pcm = PcmEssence::new(Rational::fps_29_97());
        pcm.set_sampling_rate(Rational::new(44100, 1));
        pcm.set_sampling_rate(Rational::new(i32::MAX, i32::MAX - 1));
        pcm.set_sampling_rate(Rational::new(0, 1));
        assert_eq!(pcm.sampling_rate(), Rational::sampling_48k());

        pcm.set_sampling_rate(Rational::new(96000, 2));
        assert_eq!(pcm.sampling_rate(), Rational::new(96000, 2));
        assert_eq!(pcm.shifted_sample_sequence().sum(), 8008);
    }

    #[test]
    fn test_offset_applied_to_sequence() {
        let mut pcm = PcmEssence::new(Rational::fps_29_97());
        pcm.set_sequence_offset(2);
        assert_eq!(
            pcm.shifted_sample_sequence().as_slice(),
            &[1602, 1601, 1602, 1602, 1601]
        );
    }

    #[test]
    fn test_sequence_freezes_rate_and_offset() {
        let mut pcm = PcmEssence::new(Rational::fps_29_97());
        let first = pcm.shifted_sample_sequence().clone();

        pcm.set_sequence_offset(3);
        pcm.set_sampling_rate(Rational::new(96000, 1));
        assert_eq!(pcm.sequence_offset(), 0);
        assert_eq!(pcm.sampling_rate(), Rational::sampling_48k());
        assert_eq!(pcm.shifted_sample_sequence(), &first);
    }

    #[test]
    fn test_write_freezes_format() {
        let mut pcm = PcmEssence::new(Rational::fps_25());
        pcm.set_channel_count(2);
        pcm.prepare(&[0u8; 8], 2).unwrap();

        pcm.set_channel_count(8);
        pcm.set_quantization_bits(24);
        pcm.set_sequence_offset(1);
        assert_eq!(pcm.channel_count(), 2);
        assert_eq!(pcm.quantization_bits(), 16);
        assert_eq!(pcm.sequence_offset(), 0);

        assert!(pcm.prepare(&[0u8; 7], 2).is_err());
    }
}
