//! Frame scheduling: phrase timings to a gapless partition of frame indices.
//!
//! The scheduler turns per-phrase timestamps plus the audio duration into
//! inclusive frame ranges that cover `[0, total_frames]` exactly: one
//! synthetic beginning range for the lead-in silence, then one range per
//! phrase in transcript order. Purely arithmetic, fully deterministic.

use crate::align::PhraseTiming;
use crate::error::{Result, SlidecastError};

/// An inclusive span of video frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u64,
    pub end: u64,
}

impl FrameRange {
    /// Number of frames in the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false // an inclusive range always holds at least one frame
    }
}

/// Frame range assigned to one phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledPhrase {
    /// Cleaned phrase text, in transcript order.
    pub text: String,
    pub range: FrameRange,
}

/// The complete frame partition for a video.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSchedule {
    /// Lead-in before the first aligned word, starting at frame 0.
    pub beginning: FrameRange,
    /// Per-phrase ranges, contiguous with the beginning range and each other.
    pub phrases: Vec<ScheduledPhrase>,
    /// Highest frame index; the partition covers `[0, total_frames]`.
    pub total_frames: u64,
}

/// Partition `[0, ceil(duration * fps)]` across the phrases.
///
/// Each phrase's frame count is anchored to the *start* of the following
/// phrase, so silence between phrases stays on the earlier phrase's image.
/// The last phrase runs to `total_frames` and absorbs rounding remainder.
/// Inverted ranges and incomplete partitions are reported, never clamped
/// away silently.
pub fn schedule_frames(
    timings: &[PhraseTiming],
    duration_secs: f64,
    fps: u32,
) -> Result<FrameSchedule> {
    if timings.is_empty() {
        return Err(invariant("no phrase timings to schedule"));
    }
    if fps == 0 {
        return Err(invariant("frame rate is zero"));
    }
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(invariant(format!(
            "audio duration {duration_secs} is not a positive number"
        )));
    }

    let fps = f64::from(fps);
    let total_frames = (duration_secs * fps).ceil() as u64;

    let first = &timings[0];
    if first.start < 0.0 {
        return Err(invariant(format!(
            "first phrase starts at negative time {}",
            first.start
        )));
    }
    let beginning = FrameRange {
        start: 0,
        end: (first.start * fps).round() as u64,
    };
    let mut running = beginning.end;

    let mut phrases = Vec::with_capacity(timings.len());
    for (index, pair) in timings.windows(2).enumerate() {
        let count = ((pair[1].start - pair[0].start) * fps).round() as i64;
        if count < 1 {
            return Err(invariant(format!(
                "phrase {index} ('{}') gets {count} frames; timestamps are not \
                 increasing fast enough for {fps} fps",
                pair[0].text
            )));
        }
        let count = count as u64;
        phrases.push(ScheduledPhrase {
            text: pair[0].text.clone(),
            range: FrameRange {
                start: running + 1,
                end: running + count,
            },
        });
        running += count;
    }

    // Last phrase absorbs the rounding remainder up to the frame budget.
    let last = &timings[timings.len() - 1];
    if running + 1 > total_frames {
        return Err(invariant(format!(
            "last phrase ('{}') would start at frame {} but the audio only has {} frames",
            last.text,
            running + 1,
            total_frames
        )));
    }
    phrases.push(ScheduledPhrase {
        text: last.text.clone(),
        range: FrameRange {
            start: running + 1,
            end: total_frames,
        },
    });

    let schedule = FrameSchedule {
        beginning,
        phrases,
        total_frames,
    };
    verify_partition(&schedule)?;
    Ok(schedule)
}

/// Check that the ranges tile `[0, total_frames]` exactly, in order.
fn verify_partition(schedule: &FrameSchedule) -> Result<()> {
    if schedule.beginning.start != 0 {
        return Err(invariant("beginning range does not start at frame 0"));
    }
    let mut expected_next = schedule.beginning.end + 1;
    for phrase in &schedule.phrases {
        if phrase.range.start != expected_next {
            return Err(invariant(format!(
                "range for '{}' starts at frame {} but frame {} is next",
                phrase.text, phrase.range.start, expected_next
            )));
        }
        if phrase.range.end < phrase.range.start {
            return Err(invariant(format!(
                "range for '{}' is inverted: {}..={}",
                phrase.text, phrase.range.start, phrase.range.end
            )));
        }
        expected_next = phrase.range.end + 1;
    }
    if expected_next != schedule.total_frames + 1 {
        return Err(invariant(format!(
            "partition ends at frame {} instead of {}",
            expected_next - 1,
            schedule.total_frames
        )));
    }
    Ok(())
}

fn invariant(message: impl Into<String>) -> SlidecastError {
    SlidecastError::SchedulingInvariant {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(text: &str, start: f64, end: f64) -> PhraseTiming {
        PhraseTiming {
            text: text.to_string(),
            start,
            end,
        }
    }

    fn spec_timings() -> Vec<PhraseTiming> {
        vec![
            timing("Hello world cat", 0.0, 1.2),
            timing("Goodbye dog video", 2.0, 3.2),
        ]
    }

    #[test]
    fn schedules_the_reference_scenario() {
        // 4.0s at 30 fps: beginning [0,0], first phrase [1,60], last [61,120].
        let schedule = schedule_frames(&spec_timings(), 4.0, 30).unwrap();

        assert_eq!(schedule.total_frames, 120);
        assert_eq!(schedule.beginning, FrameRange { start: 0, end: 0 });
        assert_eq!(schedule.phrases[0].range, FrameRange { start: 1, end: 60 });
        assert_eq!(
            schedule.phrases[1].range,
            FrameRange {
                start: 61,
                end: 120
            }
        );
    }

    #[test]
    fn beginning_range_covers_lead_in_silence() {
        let timings = vec![timing("late start", 1.5, 2.0)];
        let schedule = schedule_frames(&timings, 3.0, 30).unwrap();
        assert_eq!(schedule.beginning, FrameRange { start: 0, end: 45 });
        assert_eq!(schedule.phrases[0].range, FrameRange { start: 46, end: 90 });
    }

    #[test]
    fn partition_is_contiguous_and_exhaustive() {
        let timings = vec![
            timing("a", 0.13, 0.9),
            timing("b", 1.07, 2.2),
            timing("c", 2.31, 3.0),
            timing("d", 4.02, 5.5),
        ];
        let schedule = schedule_frames(&timings, 6.7, 24).unwrap();

        let mut next = 0;
        assert_eq!(schedule.beginning.start, next);
        next = schedule.beginning.end + 1;
        for phrase in &schedule.phrases {
            assert_eq!(phrase.range.start, next);
            assert!(phrase.range.end >= phrase.range.start);
            next = phrase.range.end + 1;
        }
        assert_eq!(next, schedule.total_frames + 1);
    }

    #[test]
    fn gap_after_a_phrase_belongs_to_that_phrase() {
        // "a" is spoken 0.0-0.5 but "b" starts at 2.0; the silent 1.5s stays
        // on a's image: a gets round((2.0-0.0)*30) = 60 frames.
        let timings = vec![timing("a", 0.0, 0.5), timing("b", 2.0, 2.5)];
        let schedule = schedule_frames(&timings, 3.0, 30).unwrap();
        assert_eq!(schedule.phrases[0].range, FrameRange { start: 1, end: 60 });
    }

    #[test]
    fn last_phrase_absorbs_rounding_remainder() {
        let timings = vec![timing("a", 0.0, 0.4), timing("b", 1.0, 1.9)];
        // 2.03s * 30 = 60.9 → 61 total frames; b runs from 31 to 61.
        let schedule = schedule_frames(&timings, 2.03, 30).unwrap();
        assert_eq!(schedule.total_frames, 61);
        assert_eq!(schedule.phrases[1].range, FrameRange { start: 31, end: 61 });
    }

    #[test]
    fn single_phrase_gets_everything_after_the_beginning() {
        let timings = vec![timing("only", 0.5, 2.0)];
        let schedule = schedule_frames(&timings, 2.5, 30).unwrap();
        assert_eq!(schedule.beginning, FrameRange { start: 0, end: 15 });
        assert_eq!(schedule.phrases[0].range, FrameRange { start: 16, end: 75 });
    }

    #[test]
    fn identical_inputs_give_identical_schedules() {
        let a = schedule_frames(&spec_timings(), 4.0, 30).unwrap();
        let b = schedule_frames(&spec_timings(), 4.0, 30).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_timings_are_rejected() {
        assert!(matches!(
            schedule_frames(&[], 4.0, 30),
            Err(SlidecastError::SchedulingInvariant { .. })
        ));
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(matches!(
            schedule_frames(&spec_timings(), 4.0, 0),
            Err(SlidecastError::SchedulingInvariant { .. })
        ));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        assert!(matches!(
            schedule_frames(&spec_timings(), 0.0, 30),
            Err(SlidecastError::SchedulingInvariant { .. })
        ));
        assert!(matches!(
            schedule_frames(&spec_timings(), f64::NAN, 30),
            Err(SlidecastError::SchedulingInvariant { .. })
        ));
    }

    #[test]
    fn phrases_too_close_for_the_frame_rate_are_rejected() {
        // 1 fps cannot give the first phrase a single frame.
        let timings = vec![timing("a", 0.0, 0.1), timing("b", 0.2, 0.4)];
        let err = schedule_frames(&timings, 1.0, 1).unwrap_err();
        assert!(matches!(err, SlidecastError::SchedulingInvariant { .. }));
    }

    #[test]
    fn non_monotonic_timestamps_are_rejected() {
        let timings = vec![timing("a", 2.0, 2.5), timing("b", 1.0, 1.5)];
        assert!(matches!(
            schedule_frames(&timings, 4.0, 30),
            Err(SlidecastError::SchedulingInvariant { .. })
        ));
    }

    #[test]
    fn duration_shorter_than_last_start_is_rejected() {
        // b would start past the total frame budget; must error, not clamp.
        let timings = vec![timing("a", 0.0, 0.5), timing("b", 3.0, 3.5)];
        let err = schedule_frames(&timings, 1.0, 30).unwrap_err();
        assert!(matches!(err, SlidecastError::SchedulingInvariant { .. }));
    }

    #[test]
    fn frame_range_len_is_inclusive() {
        assert_eq!(FrameRange { start: 1, end: 60 }.len(), 60);
        assert_eq!(FrameRange { start: 0, end: 0 }.len(), 1);
    }
}
