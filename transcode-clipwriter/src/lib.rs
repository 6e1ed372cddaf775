//! MXF clip writer tracks
//!
//! A single track type over the five clip writer families used for
//! broadcast and post-production delivery:
//!
//! - AS-02 versioned MXF (frame wrapped)
//! - AS-11, written as OP-1a or D-10
//! - OP-1a (frame wrapped)
//! - Avid MXF (clip wrapped)
//! - D-10 / IMX (SDTI-CP content packages)
//!
//! Each family has its own track type and its own set of optional
//! properties. [`ClipWriterTrack`] wraps any of them and exposes every
//! property; setting one the underlying track does not have is a no-op.
//!
//! # Example
//!
//! ```
//! use transcode_clipwriter::{ClipFamily, ClipWriterTrack, EssenceType, Rational};
//!
//! let mut track =
//!     ClipWriterTrack::create(ClipFamily::Op1a, EssenceType::WavePcm, Rational::fps_29_97())
//!         .unwrap();
//! track.set_channel_count(2);
//! track.set_aspect_ratio(Rational::widescreen()); // sound track: ignored
//!
//! assert_eq!(track.shifted_sample_sequence(), vec![1602, 1601, 1602, 1601, 1602]);
//! ```

mod avci;
mod capability;
mod config;
mod error;
mod essence;
mod klv;
mod sequence;
mod track;
mod types;
mod ul;
mod writer;

pub use avci::{
    translate_mode, As02AvciMode, AvciMode, AvidAvciMode, FamilyAvciMode, HeaderPlacement,
    Op1aAvciMode,
};
pub use capability::{
    AfdCapable, AvciCapable, ComponentDepthCapable, EssenceTrack, FixedSizeCapable, PcmCapable,
    PictureCapable, SingleFieldCapable, TrackCapabilities, UncInputCapable,
};
pub use config::TrackConfig;
pub use error::{ClipWriterError, Result};
pub use essence::{EssenceType, AVCI_HEADER_SIZE};
pub use klv::{decode_ber_length, encode_ber_length_fixed, write_element, Klv, KlvReader};
pub use sequence::{SampleSequence, MAX_CYCLE_LENGTH};
pub use track::{ClipFamily, ClipWriterTrack};
pub use types::Rational;
pub use ul::{essence_element_key, labels, UniversalLabel, Wrapping, UL};
pub use writer::as02::{As02Kind, As02Track};
pub use writer::as11::{As11Flavour, As11Track};
pub use writer::avid::{AvidKind, AvidTrack};
pub use writer::d10::{D10Kind, D10Track};
pub use writer::op1a::{Op1aKind, Op1aTrack};
pub use writer::{
    AvciEssence, D10Essence, DvEssence, EssenceKind, EssenceStream, PcmEssence, PictureDescriptor,
    PictureEssence, SampleLayout, UncEssence, WriterTrack,
};
