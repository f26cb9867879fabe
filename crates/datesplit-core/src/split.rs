//! Date-range decomposition.
//!
//! A cursor walks forward one day at a time from the start date. Whenever it
//! crosses a period boundary for the active [`SplitMode`], the running
//! segment is closed at the previous day and a new one opens at the cursor.
//! Once the cursor reaches the end date a trailing segment is always emitted,
//! so the union of all segments is exactly `[start, end]`.

use chrono::{Datelike, NaiveDate};

use crate::model::{OutputRecord, Segment, SplitMode};

/// Lazy iterator over the segments of `[start, end]`.
///
/// Yields nothing when `end < start`.
#[derive(Debug, Clone)]
pub struct Segments {
    mode: SplitMode,
    segment_start: NaiveDate,
    cursor: NaiveDate,
    end: NaiveDate,
    index: usize,
    done: bool,
}

/// Split `[start, end]` into segments for `mode`.
pub fn segments(start: NaiveDate, end: NaiveDate, mode: SplitMode) -> Segments {
    Segments {
        mode,
        segment_start: start,
        cursor: start,
        end,
        index: 0,
        done: end < start,
    }
}

/// Whether `cursor` opens a new period relative to `segment_start`.
fn crosses_boundary(mode: SplitMode, segment_start: NaiveDate, cursor: NaiveDate) -> bool {
    match mode {
        SplitMode::Day => true,
        SplitMode::Month => {
            cursor.month() != segment_start.month() || cursor.year() != segment_start.year()
        }
        // Week has no boundaries of its own; SplitConfig::validate rejects it.
        SplitMode::Year | SplitMode::Week => cursor.year() != segment_start.year(),
    }
}

impl Segments {
    fn emit(&mut self, end: NaiveDate) -> Segment {
        let segment = Segment {
            index: self.index,
            start: self.segment_start,
            end,
        };
        self.index += 1;
        segment
    }
}

impl Iterator for Segments {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.done {
            return None;
        }
        while self.cursor < self.end {
            let previous = self.cursor;
            let Some(next) = self.cursor.succ_opt() else {
                break;
            };
            self.cursor = next;
            if crosses_boundary(self.mode, self.segment_start, self.cursor) {
                let segment = self.emit(previous);
                self.segment_start = self.cursor;
                return Some(segment);
            }
        }
        self.done = true;
        Some(self.emit(self.end))
    }
}

/// Expand one identified date range into output records.
///
/// Each record's sub-id is `{id}_{n}` with `n` counting from zero, and each
/// carries a copy of `original`.
pub fn split(
    id: &str,
    start: NaiveDate,
    end: NaiveDate,
    mode: SplitMode,
    original: &[String],
) -> Vec<OutputRecord> {
    segments(start, end, mode)
        .map(|segment| OutputRecord::from_segment(id, segment, original.to_vec()))
        .collect()
}
