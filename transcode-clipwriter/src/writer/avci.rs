//! AVC-Intra picture with header placement

use super::picture::PictureDescriptor;
use super::SampleLayout;
use crate::avci::{FamilyAvciMode, HeaderPlacement};
use crate::capability::AvciCapable;
use crate::error::{ClipWriterError, Result};
use crate::essence::{EssenceType, AVCI_HEADER_SIZE};
use crate::types::Rational;
use std::borrow::Cow;

/// AVC-Intra essence for a family with mode enumeration `M`
///
/// Input frames either start with the 512-byte parameter set header
/// (`sample_size` bytes) or lack it (`sample_without_header_size` bytes).
/// Frames are rewritten on the way through so that the stored stream
/// follows the configured [`HeaderPlacement`].
#[derive(Debug, Clone)]
pub struct AvciEssence<M> {
    pub picture: PictureDescriptor,
    mode: M,
    header: Option<Vec<u8>>,
    sample_size: u32,
    frames_written: u64,
    first_had_header: bool,
}

impl<M: FamilyAvciMode> AvciEssence<M> {
    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Self {
        AvciEssence {
            picture: PictureDescriptor::new(),
            mode: M::default(),
            header: None,
            sample_size: essence_type.fixed_sample_size(frame_rate),
            frames_written: 0,
            first_had_header: false,
        }
    }

    fn header_size() -> usize {
        AVCI_HEADER_SIZE as usize
    }

    fn with_header<'a>(&self, payload: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let header = self
            .header
            .as_deref()
            .ok_or(ClipWriterError::MissingAvciHeader)?;
        let mut frame = Vec::with_capacity(header.len() + payload.len());
        frame.extend_from_slice(header);
        frame.extend_from_slice(payload);
        Ok(Cow::Owned(frame))
    }

    fn place<'a>(&self, frame: &'a [u8], has_header: bool) -> Result<Cow<'a, [u8]>> {
        let first = self.frames_written == 0;
        let payload = if has_header {
            &frame[Self::header_size()..]
        } else {
            frame
        };

        match self.mode.placement() {
            HeaderPlacement::FirstOrAll => {
                if first && !has_header {
                    self.with_header(payload)
                } else {
                    Ok(Cow::Borrowed(frame))
                }
            }
            HeaderPlacement::FirstOnly => {
                if !first {
                    Ok(Cow::Borrowed(payload))
                } else if has_header {
                    Ok(Cow::Borrowed(frame))
                } else {
                    self.with_header(payload)
                }
            }
            HeaderPlacement::All => {
                if has_header {
                    Ok(Cow::Borrowed(frame))
                } else {
                    self.with_header(payload)
                }
            }
            HeaderPlacement::NoneOrAll => {
                if !first && has_header != self.first_had_header {
                    return Err(ClipWriterError::InvalidSampleData(
                        "AVCI frames must either all carry a header or none".into(),
                    ));
                }
                Ok(Cow::Borrowed(frame))
            }
            HeaderPlacement::None => Ok(Cow::Borrowed(payload)),
        }
    }
}

impl<M: FamilyAvciMode> AvciCapable<M> for AvciEssence<M> {
    fn set_mode(&mut self, mode: M) {
        if self.frames_written > 0 {
            log::warn!(
                "Ignoring {} AVCI mode {:?} set after frames were written",
                M::FAMILY,
                mode
            );
            return;
        }
        self.mode = mode;
    }

    fn mode(&self) -> M {
        self.mode
    }

    fn set_header(&mut self, header: &[u8]) {
        if header.len() != Self::header_size() {
            log::warn!(
                "Ignoring AVCI header of {} bytes, expected {}",
                header.len(),
                AVCI_HEADER_SIZE
            );
            return;
        }
        self.header = Some(header.to_vec());
    }

    fn header(&self) -> Option<&[u8]> {
        self.header.as_deref()
    }

    fn sample_without_header_size(&self) -> u32 {
        self.sample_size.saturating_sub(AVCI_HEADER_SIZE)
    }
}

impl<M: FamilyAvciMode> SampleLayout for AvciEssence<M> {
    fn sample_size(&self) -> u32 {
        self.sample_size
    }

    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>> {
        if num_samples != 1 {
            return Err(ClipWriterError::InvalidSampleData(format!(
                "AVCI frames must be written one at a time, got {}",
                num_samples
            )));
        }

        let has_header = if data.len() == self.sample_size as usize {
            true
        } else if data.len() == self.sample_without_header_size() as usize {
            false
        } else {
            return Err(ClipWriterError::SampleSizeMismatch {
                expected: self.sample_size as usize,
                actual: data.len(),
            });
        };

        if has_header && self.header.is_none() {
            self.header = Some(data[..Self::header_size()].to_vec());
        }

        let stored = self.place(data, has_header)?;

        if self.frames_written == 0 {
            self.first_had_header = has_header;
        }
        self.frames_written += 1;
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avci::{AvidAvciMode, Op1aAvciMode};

    fn frame(essence: &AvciEssence<impl FamilyAvciMode>, header: bool) -> Vec<u8> {
        let size = if header {
            essence.sample_size()
        } else {
            essence.sample_without_header_size()
        };
        let mut data = vec![0x55u8; size as usize];
        if header {
            data[..AVCI_HEADER_SIZE as usize].fill(0xAA);
        }
        data
    }

    fn op1a() -> AvciEssence<Op1aAvciMode> {
        AvciEssence::new(EssenceType::Avci100_1080i, Rational::fps_25())
    }

    #[test]
    fn test_sizes() {
        let avci = op1a();
        assert_eq!(avci.sample_size(), 568832);
        assert_eq!(avci.sample_without_header_size(), 568832 - 512);
    }

    #[test]
    fn test_first_or_all_requires_header() {
        let mut avci = op1a();
        let bare = frame(&avci, false);
        assert!(matches!(
            avci.prepare(&bare, 1),
            Err(ClipWriterError::MissingAvciHeader)
        ));

        avci.set_header(&[0xAA; 512]);
        let stored = avci.prepare(&bare, 1).unwrap();
        assert_eq!(stored.len(), avci.sample_size() as usize);

        let stored = avci.prepare(&bare, 1).unwrap();
        assert_eq!(stored.len(), avci.sample_without_header_size() as usize);
    }

    #[test]
    fn test_first_only_strips_later_headers() {
        let mut avci = op1a();
        avci.set_mode(Op1aAvciMode::FirstFrameHeader);
        let full = frame(&avci, true);

        assert_eq!(avci.prepare(&full, 1).unwrap().len(), full.len());
        assert_eq!(
            avci.prepare(&full, 1).unwrap().len(),
            avci.sample_without_header_size() as usize
        );
        assert_eq!(avci.header().map(<[u8]>::len), Some(512));
    }

    #[test]
    fn test_all_frames_uses_cached_header() {
        let mut avci = op1a();
        avci.set_mode(Op1aAvciMode::AllFrameHeader);
        let full = frame(&avci, true);
        let bare = frame(&avci, false);

        avci.prepare(&full, 1).unwrap();
        let stored = avci.prepare(&bare, 1).unwrap();
        assert_eq!(stored.len(), full.len());
        assert_eq!(stored[0], 0xAA);
    }

    #[test]
    fn test_avid_consistency() {
        let mut avci: AvciEssence<AvidAvciMode> =
            AvciEssence::new(EssenceType::Avci50_1080i, Rational::fps_25());
        let full = frame(&avci, true);
        let bare = frame(&avci, false);

        avci.prepare(&bare, 1).unwrap();
        assert!(avci.prepare(&full, 1).is_err());
        assert!(avci.prepare(&bare, 1).is_ok());
    }

    #[test]
    fn test_mode_frozen_after_write() {
        let mut avci: AvciEssence<AvidAvciMode> =
            AvciEssence::new(EssenceType::Avci50_1080i, Rational::fps_25());
        avci.set_mode(AvidAvciMode::NoFrameHeader);
        let full = frame(&avci, true);
        let stored = avci.prepare(&full, 1).unwrap();
        assert_eq!(stored.len(), avci.sample_without_header_size() as usize);

        avci.set_mode(AvidAvciMode::AllFrameHeader);
        assert_eq!(avci.mode(), AvidAvciMode::NoFrameHeader);
    }

    #[test]
    fn test_bad_header_ignored() {
        let mut avci = op1a();
        avci.set_header(&[0u8; 100]);
        assert!(avci.header().is_none());
    }
}
