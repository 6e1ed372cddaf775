//! Picture essence sub-kinds

use super::{check_fixed_size, SampleLayout};
use crate::capability::{
    AfdCapable, ComponentDepthCapable, FixedSizeCapable, PictureCapable, SingleFieldCapable,
    UncInputCapable,
};
use crate::error::{ClipWriterError, Result};
use crate::essence::EssenceType;
use crate::types::Rational;
use std::borrow::Cow;

/// Picture descriptor properties shared by all picture sub-kinds
#[derive(Debug, Clone)]
pub struct PictureDescriptor {
    aspect_ratio: Rational,
    afd: Option<u8>,
}

impl PictureDescriptor {
    pub fn new() -> Self {
        PictureDescriptor {
            aspect_ratio: Rational::widescreen(),
            afd: None,
        }
    }
}

impl Default for PictureDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl PictureCapable for PictureDescriptor {
    fn set_aspect_ratio(&mut self, aspect_ratio: Rational) {
        self.aspect_ratio = aspect_ratio;
    }

    fn aspect_ratio(&self) -> Rational {
        self.aspect_ratio
    }
}

impl AfdCapable for PictureDescriptor {
    fn set_afd(&mut self, afd: u8) {
        self.afd = Some(afd);
    }

    fn afd(&self) -> Option<u8> {
        self.afd
    }
}

fn check_single_variable_sample(num_samples: u32) -> Result<()> {
    if num_samples != 1 {
        return Err(ClipWriterError::InvalidSampleData(format!(
            "variable size essence must be written one frame at a time, got {}",
            num_samples
        )));
    }
    Ok(())
}

fn is_valid_depth(depth: u32) -> bool {
    depth == 8 || depth == 10
}

/// DV25, DV50 and DV100
#[derive(Debug, Clone)]
pub struct DvEssence {
    pub picture: PictureDescriptor,
    sample_size: u32,
    component_depth: u32,
}

impl DvEssence {
    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Self {
        DvEssence {
            picture: PictureDescriptor::new(),
            sample_size: essence_type.fixed_sample_size(frame_rate),
            component_depth: 8,
        }
    }
}

impl ComponentDepthCapable for DvEssence {
    fn set_component_depth(&mut self, depth: u32) {
        if !is_valid_depth(depth) {
            log::warn!("Ignoring unsupported DV component depth {}", depth);
            return;
        }
        self.component_depth = depth;
    }

    fn component_depth(&self) -> u32 {
        self.component_depth
    }
}

impl SampleLayout for DvEssence {
    fn sample_size(&self) -> u32 {
        self.sample_size
    }

    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>> {
        check_fixed_size(data, self.sample_size, num_samples)?;
        Ok(Cow::Borrowed(data))
    }
}

/// Uncompressed 4:2:2 picture, 8-bit UYVY or 10-bit v210
///
/// Stored frames may be taller than input frames (Avid stores extra VBI
/// lines above the active picture); the missing lines are filled with black.
#[derive(Debug, Clone)]
pub struct UncEssence {
    pub picture: PictureDescriptor,
    width: u32,
    stored_height: u32,
    input_height: u32,
    component_depth: u32,
    started: bool,
}

/// 8-bit UYVY black
const BLACK_UYVY: [u8; 4] = [0x80, 0x10, 0x80, 0x10];
/// 10-bit v210 black, 6 pixels in 4 little-endian words
const BLACK_V210: [u8; 16] = [
    0x00, 0x02, 0x01, 0x20, 0x40, 0x00, 0x08, 0x04, 0x00, 0x02, 0x01, 0x20, 0x40, 0x00, 0x08, 0x04,
];

impl UncEssence {
    /// Stored height equals the input picture height
    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Self {
        Self::with_vbi(essence_type, frame_rate, 0)
    }

    /// Stored frames carry `vbi_lines` extra lines above the input picture
    pub fn with_vbi(essence_type: EssenceType, frame_rate: Rational, vbi_lines: u32) -> Self {
        let (width, height) = essence_type
            .picture_dimensions(frame_rate)
            .unwrap_or((0, 0));
        UncEssence {
            picture: PictureDescriptor::new(),
            width,
            stored_height: height + vbi_lines,
            input_height: height,
            component_depth: 8,
            started: false,
        }
    }

    fn line_size(&self) -> u32 {
        if self.component_depth == 10 {
            self.width.div_ceil(48) * 128
        } else {
            self.width * 2
        }
    }

    fn black_line(&self) -> Vec<u8> {
        let pattern: &[u8] = if self.component_depth == 10 {
            &BLACK_V210
        } else {
            &BLACK_UYVY
        };
        pattern
            .iter()
            .copied()
            .cycle()
            .take(self.line_size() as usize)
            .collect()
    }
}

impl ComponentDepthCapable for UncEssence {
    fn set_component_depth(&mut self, depth: u32) {
        if self.started {
            log::warn!("Ignoring component depth change after samples were written");
            return;
        }
        if !is_valid_depth(depth) {
            log::warn!("Ignoring unsupported uncompressed component depth {}", depth);
            return;
        }
        self.component_depth = depth;
    }

    fn component_depth(&self) -> u32 {
        self.component_depth
    }
}

impl UncInputCapable for UncEssence {
    fn set_input_height(&mut self, height: u32) {
        if self.started {
            log::warn!("Ignoring input height change after samples were written");
            return;
        }
        if height == 0 || height > self.stored_height {
            log::warn!(
                "Ignoring input height {} outside 1..={}",
                height,
                self.stored_height
            );
            return;
        }
        self.input_height = height;
    }

    fn input_height(&self) -> u32 {
        self.input_height
    }

    fn input_sample_size(&self) -> u32 {
        self.line_size() * self.input_height
    }
}

impl SampleLayout for UncEssence {
    fn sample_size(&self) -> u32 {
        self.line_size() * self.stored_height
    }

    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>> {
        let input_size = self.input_sample_size();
        check_fixed_size(data, input_size, num_samples)?;
        self.started = true;

        let padding_lines = self.stored_height - self.input_height;
        if padding_lines == 0 {
            return Ok(Cow::Borrowed(data));
        }

        let black = self.black_line();
        let mut out = Vec::with_capacity(self.sample_size() as usize * num_samples as usize);
        for frame in data.chunks_exact(input_size as usize) {
            for _ in 0..padding_lines {
                out.extend_from_slice(&black);
            }
            out.extend_from_slice(frame);
        }
        Ok(Cow::Owned(out))
    }
}

/// D-10 MPEG-2 422P@ML with a constant frame size
#[derive(Debug, Clone)]
pub struct D10Essence {
    pub picture: PictureDescriptor,
    sample_size: u32,
    started: bool,
}

impl D10Essence {
    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Self {
        D10Essence {
            picture: PictureDescriptor::new(),
            sample_size: essence_type.fixed_sample_size(frame_rate),
            started: false,
        }
    }
}

impl FixedSizeCapable for D10Essence {
    fn set_sample_size(&mut self, size: u32) {
        if self.started {
            log::warn!("Ignoring D-10 sample size change after samples were written");
            return;
        }
        if size == 0 {
            log::warn!("Ignoring zero D-10 sample size");
            return;
        }
        self.sample_size = size;
    }
}

impl SampleLayout for D10Essence {
    fn sample_size(&self) -> u32 {
        self.sample_size
    }

    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>> {
        // A single short frame is zero padded up to the constant size
        if num_samples == 1 && data.len() < self.sample_size as usize {
            self.started = true;
            let mut padded = data.to_vec();
            padded.resize(self.sample_size as usize, 0);
            return Ok(Cow::Owned(padded));
        }

        check_fixed_size(data, self.sample_size, num_samples)?;
        self.started = true;
        Ok(Cow::Borrowed(data))
    }
}

/// Compressed picture passed through as-is: MPEG-2 long GOP, MJPEG, VC-3
#[derive(Debug, Clone)]
pub struct PictureEssence {
    pub picture: PictureDescriptor,
    essence_type: EssenceType,
    sample_size: u32,
}

impl PictureEssence {
    pub fn new(essence_type: EssenceType, frame_rate: Rational) -> Self {
        PictureEssence {
            picture: PictureDescriptor::new(),
            essence_type,
            sample_size: essence_type.fixed_sample_size(frame_rate),
        }
    }
}

impl SingleFieldCapable for PictureEssence {
    fn is_single_field(&self) -> bool {
        self.essence_type.is_single_field()
    }
}

impl SampleLayout for PictureEssence {
    fn sample_size(&self) -> u32 {
        self.sample_size
    }

    fn prepare<'a>(&mut self, data: &'a [u8], num_samples: u32) -> Result<Cow<'a, [u8]>> {
        if self.sample_size == 0 {
            check_single_variable_sample(num_samples)?;
        } else {
            check_fixed_size(data, self.sample_size, num_samples)?;
        }
        Ok(Cow::Borrowed(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unc_sample_sizes() {
        let mut unc = UncEssence::new(EssenceType::UncHd1080i, Rational::fps_25());
        assert_eq!(unc.sample_size(), 1920 * 1080 * 2);

        unc.set_component_depth(10);
        // v210: 1920 pixels -> 40 groups of 48 -> 5120 bytes per line
        assert_eq!(unc.sample_size(), 5120 * 1080);

        unc.set_component_depth(12);
        assert_eq!(unc.component_depth(), 10);
    }

    #[test]
    fn test_unc_vbi_padding() {
        let mut unc = UncEssence::with_vbi(EssenceType::UncSd, Rational::fps_25(), 16);
        assert_eq!(unc.sample_size(), 720 * 2 * 592);
        assert_eq!(unc.input_sample_size(), 720 * 2 * 576);

        let frame = vec![0xEEu8; unc.input_sample_size() as usize];
        let stored = unc.prepare(&frame, 1).unwrap();
        assert_eq!(stored.len(), unc.sample_size() as usize);
        assert_eq!(&stored[0..4], &BLACK_UYVY);
        assert_eq!(stored[stored.len() - 1], 0xEE);
    }

    #[test]
    fn test_unc_input_height_bounds() {
        let mut unc = UncEssence::with_vbi(EssenceType::UncSd, Rational::fps_25(), 16);
        unc.set_input_height(600);
        assert_eq!(unc.input_height(), 576);
        unc.set_input_height(592);
        assert_eq!(unc.input_height(), 592);
        assert_eq!(unc.input_sample_size(), unc.sample_size());
    }

    #[test]
    fn test_d10_padding_and_size_override() {
        let mut d10 = D10Essence::new(EssenceType::D10_50, Rational::fps_25());
        assert_eq!(d10.sample_size(), 250000);

        d10.set_sample_size(240000);
        assert_eq!(d10.sample_size(), 240000);

        let stored = d10.prepare(&[1u8; 1000], 1).unwrap();
        assert_eq!(stored.len(), 240000);

        d10.set_sample_size(250000);
        assert_eq!(d10.sample_size(), 240000);
    }

    #[test]
    fn test_dv_size_check() {
        let mut dv = DvEssence::new(EssenceType::IecDv25, Rational::fps_25());
        assert!(dv.prepare(&vec![0u8; 144000 * 2], 2).is_ok());
        assert!(matches!(
            dv.prepare(&[0u8; 100], 1),
            Err(ClipWriterError::SampleSizeMismatch { expected: 144000, actual: 100 })
        ));
    }

    #[test]
    fn test_variable_picture() {
        let mut mpeg = PictureEssence::new(EssenceType::Mpeg2LgMpHl1080i, Rational::fps_25());
        assert_eq!(mpeg.sample_size(), 0);
        assert!(mpeg.prepare(&[0u8; 12345], 1).is_ok());
        assert!(mpeg.prepare(&[0u8; 12345], 2).is_err());

        let mjpeg = PictureEssence::new(EssenceType::Mjpeg15_1s, Rational::fps_25());
        assert!(mjpeg.is_single_field());
    }
}
