//! Property-based tests for audio sample sequences.

use proptest::prelude::*;
use transcode_clipwriter::{Rational, SampleSequence, MAX_CYCLE_LENGTH};

fn reduced_ratio(sampling: Rational, edit: Rational) -> (u64, u64) {
    let num = sampling.numerator as u64 * edit.denominator as u64;
    let den = sampling.denominator as u64 * edit.numerator as u64;
    let mut a = num;
    let mut b = den;
    while b != 0 {
        (a, b) = (b, a % b);
    }
    (num / a, den / a)
}

fn sampling_rate() -> impl Strategy<Value = Rational> {
    prop_oneof![
        Just(Rational::new(32000, 1)),
        Just(Rational::new(44100, 1)),
        Just(Rational::new(48000, 1)),
        Just(Rational::new(96000, 1)),
        (80i32..=1920).prop_map(|n| Rational::new(n * 100, 1)),
    ]
}

fn edit_rate() -> impl Strategy<Value = Rational> {
    prop_oneof![
        (1i32..=120).prop_map(|n| Rational::new(n, 1)),
        (1i32..=120).prop_map(|n| Rational::new(n * 1000, 1001)),
    ]
}

// =============================================================================
// Sequence shape
// =============================================================================

proptest! {
    /// One cycle carries exactly the reduced numerator in samples.
    #[test]
    fn cycle_sum_matches_rate(sampling in sampling_rate(), edit in edit_rate()) {
        let (p, q) = reduced_ratio(sampling, edit);
        let seq = SampleSequence::new(sampling, edit).unwrap();

        prop_assert_eq!(seq.len() as u64, q);
        prop_assert_eq!(seq.sum(), p);
    }

    /// Every frame carries floor(p/q) or floor(p/q)+1 samples.
    #[test]
    fn counts_within_one_of_mean(sampling in sampling_rate(), edit in edit_rate()) {
        let (p, q) = reduced_ratio(sampling, edit);
        let floor = (p / q) as u32;
        let seq = SampleSequence::new(sampling, edit).unwrap();

        for &count in seq.as_slice() {
            prop_assert!(count == floor || count == floor + 1, "count {} floor {}", count, floor);
        }
    }

    /// Unreduced rates give the same sequence as their reduced forms.
    #[test]
    fn scale_invariant(sampling in sampling_rate(), edit in edit_rate(), k in 1i32..=4) {
        let scaled_edit = Rational::new(edit.numerator * k, edit.denominator * k);
        prop_assert_eq!(
            SampleSequence::new(sampling, edit),
            SampleSequence::new(sampling, scaled_edit)
        );
    }

    /// Shifting is a rotation: same multiset, same sum, offset modulo length.
    #[test]
    fn shift_is_rotation(edit in edit_rate(), offset in 0usize..=255) {
        let seq = SampleSequence::new(Rational::sampling_48k(), edit).unwrap();
        let shifted = seq.shifted(offset);

        prop_assert_eq!(shifted.sum(), seq.sum());
        prop_assert_eq!(shifted.len(), seq.len());
        prop_assert_eq!(&shifted, &seq.shifted(offset % seq.len()));
        for frame in 0..seq.len() as u64 {
            prop_assert_eq!(shifted.count_at(frame), seq.count_at(frame + offset as u64));
        }
    }
}

proptest! {
    /// Arbitrary positive rates never produce a cycle past the limit.
    #[test]
    fn cycle_length_bounded(
        sampling_num in 1i32..=i32::MAX,
        sampling_den in 1i32..=i32::MAX,
        edit_num in 1i32..=i32::MAX,
        edit_den in 1i32..=i32::MAX,
    ) {
        let sampling = Rational::new(sampling_num, sampling_den);
        let edit = Rational::new(edit_num, edit_den);
        let (p, q) = reduced_ratio(sampling, edit);

        match SampleSequence::new(sampling, edit) {
            Some(seq) => prop_assert!(seq.len() as u64 <= MAX_CYCLE_LENGTH),
            None => prop_assert!(q > MAX_CYCLE_LENGTH || p / q >= u32::MAX as u64),
        }
    }
}

#[test]
fn ntsc_48k_cycle() {
    let seq = SampleSequence::new(Rational::sampling_48k(), Rational::fps_29_97()).unwrap();
    assert_eq!(seq.len(), 5);
    assert_eq!(seq.sum(), 8008);
    assert!(seq.as_slice().iter().all(|&c| c == 1601 || c == 1602));
}
