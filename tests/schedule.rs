//! Sample schedule construction tests.
//!
//! These drive the public schedule API with hand-built metadata; no media
//! fixtures are involved.

use std::time::Duration;

use filmstripe::{
    FilmstripeError, FrameRate, SampleKey, SampleSchedule, SampleStrategy, VideoMetadata,
};

fn metadata(frame_count: u64, duration_seconds: u64) -> VideoMetadata {
    VideoMetadata {
        width: 1920,
        height: 1080,
        frame_rate: FrameRate {
            numerator: 25,
            denominator: 1,
        },
        frame_count,
        duration: Duration::from_secs(duration_seconds),
        codec: "h264".to_string(),
    }
}

// ── Frame-index strategy ───────────────────────────────────────────

#[test]
fn frame_index_samples_every_stride() {
    let schedule = SampleSchedule::build(10, &metadata(100, 4), SampleStrategy::FrameIndex)
        .expect("schedule should build");

    let expected: Vec<u64> = (0..10).map(|c| c * 10).collect();
    let actual: Vec<u64> = schedule
        .iter()
        .map(|sample| match sample.key {
            SampleKey::FrameIndex(index) => index,
            SampleKey::TimeOffset(_) => panic!("frame-index schedule produced a time key"),
        })
        .collect();

    assert_eq!(actual, expected);
}

#[test]
fn columns_are_a_contiguous_permutation() {
    for sample_count in [1, 3, 7, 10, 33, 100] {
        let schedule =
            SampleSchedule::build(sample_count, &metadata(100, 4), SampleStrategy::FrameIndex)
                .expect("schedule should build");

        assert_eq!(schedule.len(), sample_count);

        let columns: Vec<usize> = schedule.iter().map(|sample| sample.column).collect();
        let expected: Vec<usize> = (0..sample_count).collect();
        assert_eq!(
            columns, expected,
            "columns must be exactly 0..{sample_count} in order",
        );
    }
}

#[test]
fn frame_keys_are_strictly_increasing_and_bounded() {
    for (sample_count, frame_count) in [(1, 1), (2, 3), (7, 100), (99, 100), (100, 100)] {
        let schedule = SampleSchedule::build(
            sample_count,
            &metadata(frame_count, 60),
            SampleStrategy::FrameIndex,
        )
        .expect("schedule should build");

        let indices: Vec<u64> = schedule
            .iter()
            .map(|sample| match sample.key {
                SampleKey::FrameIndex(index) => index,
                SampleKey::TimeOffset(_) => unreachable!(),
            })
            .collect();

        for window in indices.windows(2) {
            assert!(
                window[1] > window[0],
                "sample keys must be strictly increasing: {indices:?}",
            );
        }
        let last = *indices.last().unwrap();
        assert!(
            last <= frame_count - 1,
            "last index {last} exceeds frame {frame_count}",
        );
    }
}

#[test]
fn sample_count_exceeding_frames_is_rejected() {
    let result = SampleSchedule::build(101, &metadata(100, 4), SampleStrategy::FrameIndex);

    match result {
        Err(FilmstripeError::InvalidSampleCount {
            requested,
            available,
        }) => {
            assert_eq!(requested, 101);
            assert_eq!(available, 100);
        }
        other => panic!("Expected InvalidSampleCount, got: {other:?}"),
    }
}

#[test]
fn zero_samples_are_rejected() {
    let result = SampleSchedule::build(0, &metadata(100, 4), SampleStrategy::FrameIndex);
    assert!(matches!(
        result,
        Err(FilmstripeError::InvalidSampleCount { requested: 0, .. })
    ));

    let result = SampleSchedule::build(0, &metadata(100, 4), SampleStrategy::TimeOffset);
    assert!(matches!(
        result,
        Err(FilmstripeError::InvalidSampleCount { requested: 0, .. })
    ));
}

#[test]
fn unknown_frame_count_needs_time_offsets() {
    let result = SampleSchedule::build(10, &metadata(0, 60), SampleStrategy::FrameIndex);
    assert!(matches!(
        result,
        Err(FilmstripeError::FrameCountUnavailable)
    ));
}

// ── Time-offset strategy ───────────────────────────────────────────

#[test]
fn time_offsets_divide_the_duration() {
    let schedule = SampleSchedule::build(10, &metadata(2500, 100), SampleStrategy::TimeOffset)
        .expect("schedule should build");

    let expected: Vec<f64> = (0..10).map(|c| c as f64 * 10.0).collect();
    let actual: Vec<f64> = schedule
        .iter()
        .map(|sample| match sample.key {
            SampleKey::TimeOffset(offset) => offset.as_secs_f64(),
            SampleKey::FrameIndex(_) => panic!("time-offset schedule produced a frame key"),
        })
        .collect();

    assert_eq!(actual, expected);
}

#[test]
fn time_offsets_stay_within_the_duration() {
    let schedule = SampleSchedule::build(7, &metadata(2500, 100), SampleStrategy::TimeOffset)
        .expect("schedule should build");

    for sample in schedule.iter() {
        let SampleKey::TimeOffset(offset) = sample.key else {
            unreachable!()
        };
        assert!(offset < Duration::from_secs(100));
    }
}

#[test]
fn time_strategy_tolerates_unknown_frame_count() {
    let schedule = SampleSchedule::build(10, &metadata(0, 100), SampleStrategy::TimeOffset)
        .expect("time-offset sampling must not depend on the frame count");

    assert_eq!(schedule.len(), 10);
    assert_eq!(schedule.strategy(), SampleStrategy::TimeOffset);
}

#[test]
fn default_strategy_is_time_offset() {
    assert_eq!(SampleStrategy::default(), SampleStrategy::TimeOffset);
}
