//! AVC-Intra header modes
//!
//! AVC-Intra frames may carry a 512-byte sequence/picture parameter set
//! header. Where that header is placed is configured with a family-agnostic
//! [`AvciMode`], which each AVCI-capable family maps onto its own private
//! enumeration:
//!
//! | `AvciMode`       | AS-02 / OP-1a           | Avid                   |
//! |------------------|-------------------------|------------------------|
//! | `Pass`           | `FirstOrAllFrameHeader` | `NoOrAllFrameHeader`   |
//! | `FirstOrAll`     | `FirstOrAllFrameHeader` | -                      |
//! | `NoneOrAll`      | -                       | `NoOrAllFrameHeader`   |
//! | `FirstFrameOnly` | `FirstFrameHeader`      | -                      |
//! | `NoHeader`       | -                       | `NoFrameHeader`        |
//! | `AllFrames`      | `AllFrameHeader`        | `AllFrameHeader`       |
//!
//! A dash means the family cannot express the mode; such requests are
//! logged and leave the current mode in place.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Family-agnostic AVC-Intra header mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvciMode {
    /// Keep whatever the input has, in the family's default placement
    Pass,
    /// Header in the first frame, and optionally in all others
    FirstOrAll,
    /// Header in no frame or in every frame
    NoneOrAll,
    /// Header in the first frame only
    FirstFrameOnly,
    /// No frame carries a header
    NoHeader,
    /// Every frame carries a header
    AllFrames,
}

impl AvciMode {
    pub const ALL: [AvciMode; 6] = [
        AvciMode::Pass,
        AvciMode::FirstOrAll,
        AvciMode::NoneOrAll,
        AvciMode::FirstFrameOnly,
        AvciMode::NoHeader,
        AvciMode::AllFrames,
    ];
}

/// Where a writer places headers in the frames it stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPlacement {
    /// First frame must have a header; later frames are stored as given
    FirstOrAll,
    /// First frame gets a header; headers are stripped from later frames
    FirstOnly,
    /// Every frame gets a header
    All,
    /// Frames are stored as given, but must consistently have or lack one
    NoneOrAll,
    /// Headers are stripped from every frame
    None,
}

/// A family's private AVC-Intra mode enumeration
pub trait FamilyAvciMode: Copy + Eq + Debug + Default + Send + Sync + 'static {
    /// Family name used in log messages
    const FAMILY: &'static str;

    /// Map the agnostic mode, or `None` if this family cannot express it
    fn translate(mode: AvciMode) -> Option<Self>;

    /// Header placement implemented by this mode
    fn placement(self) -> HeaderPlacement;
}

/// AS-02 AVC-Intra modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum As02AvciMode {
    #[default]
    FirstOrAllFrameHeader,
    FirstFrameHeader,
    AllFrameHeader,
}

impl FamilyAvciMode for As02AvciMode {
    const FAMILY: &'static str = "AS-02";

    fn translate(mode: AvciMode) -> Option<Self> {
        match mode {
            AvciMode::Pass | AvciMode::FirstOrAll => Some(As02AvciMode::FirstOrAllFrameHeader),
            AvciMode::FirstFrameOnly => Some(As02AvciMode::FirstFrameHeader),
            AvciMode::AllFrames => Some(As02AvciMode::AllFrameHeader),
            AvciMode::NoneOrAll | AvciMode::NoHeader => None,
        }
    }

    fn placement(self) -> HeaderPlacement {
        match self {
            As02AvciMode::FirstOrAllFrameHeader => HeaderPlacement::FirstOrAll,
            As02AvciMode::FirstFrameHeader => HeaderPlacement::FirstOnly,
            As02AvciMode::AllFrameHeader => HeaderPlacement::All,
        }
    }
}

/// OP-1a AVC-Intra modes, also used by AS-11 OP-1a clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Op1aAvciMode {
    #[default]
    FirstOrAllFrameHeader,
    FirstFrameHeader,
    AllFrameHeader,
}

impl FamilyAvciMode for Op1aAvciMode {
    const FAMILY: &'static str = "OP-1a";

    fn translate(mode: AvciMode) -> Option<Self> {
        match mode {
            AvciMode::Pass | AvciMode::FirstOrAll => Some(Op1aAvciMode::FirstOrAllFrameHeader),
            AvciMode::FirstFrameOnly => Some(Op1aAvciMode::FirstFrameHeader),
            AvciMode::AllFrames => Some(Op1aAvciMode::AllFrameHeader),
            AvciMode::NoneOrAll | AvciMode::NoHeader => None,
        }
    }

    fn placement(self) -> HeaderPlacement {
        match self {
            Op1aAvciMode::FirstOrAllFrameHeader => HeaderPlacement::FirstOrAll,
            Op1aAvciMode::FirstFrameHeader => HeaderPlacement::FirstOnly,
            Op1aAvciMode::AllFrameHeader => HeaderPlacement::All,
        }
    }
}

/// Avid AVC-Intra modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvidAvciMode {
    #[default]
    NoOrAllFrameHeader,
    NoFrameHeader,
    AllFrameHeader,
}

impl FamilyAvciMode for AvidAvciMode {
    const FAMILY: &'static str = "Avid";

    fn translate(mode: AvciMode) -> Option<Self> {
        // Avid accepts a different set of agnostic names than AS-02/OP-1a.
        match mode {
            AvciMode::Pass | AvciMode::NoneOrAll => Some(AvidAvciMode::NoOrAllFrameHeader),
            AvciMode::NoHeader => Some(AvidAvciMode::NoFrameHeader),
            AvciMode::AllFrames => Some(AvidAvciMode::AllFrameHeader),
            AvciMode::FirstOrAll | AvciMode::FirstFrameOnly => None,
        }
    }

    fn placement(self) -> HeaderPlacement {
        match self {
            AvidAvciMode::NoOrAllFrameHeader => HeaderPlacement::NoneOrAll,
            AvidAvciMode::NoFrameHeader => HeaderPlacement::None,
            AvidAvciMode::AllFrameHeader => HeaderPlacement::All,
        }
    }
}

/// Translate `mode` for family `M`, logging a warning if it has no mapping
pub fn translate_mode<M: FamilyAvciMode>(mode: AvciMode) -> Option<M> {
    let translated = M::translate(mode);
    if translated.is_none() {
        log::warn!("AVCI mode {:?} not supported by {} tracks", mode, M::FAMILY);
    }
    translated
}
