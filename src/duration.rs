/*!
 * Minimum on-screen duration repair for a cue stream.
 *
 * Short cues are stretched toward `min_duration` but never past the start of
 * the following cue. The last cue has nothing to bound it and is passed through.
 */

use std::iter::Fuse;

use log::debug;

use crate::subtitle::Subtitle;

/// Lazy adapter holding one cue of lookahead
pub struct DurationAdjuster<I: Iterator<Item = Subtitle>> {
    cues: Fuse<I>,
    min_duration: f64,
    // @field: Cue read ahead, waiting for its successor
    pending: Option<Subtitle>,
}

impl<I: Iterator<Item = Subtitle>> DurationAdjuster<I> {
    pub fn new<T>(cues: T, min_duration: f64) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        DurationAdjuster {
            cues: cues.into_iter().fuse(),
            min_duration,
            pending: None,
        }
    }
}

/// Stretch `prev` to the minimum duration, clamped to the start of `next`
pub fn adjust_duration(prev: &mut Subtitle, next: &Subtitle, min_duration: f64) {
    if prev.duration() >= min_duration {
        return;
    }

    let target_end = prev.start_time() + min_duration;
    let new_end = target_end.min(next.start_time());
    debug!(
        "Extending cue at {:.3}s: end {:.3}s -> {:.3}s",
        prev.start_time(),
        prev.end_time(),
        new_end
    );
    prev.extend_end_to(new_end);
}

impl<I: Iterator<Item = Subtitle>> Iterator for DurationAdjuster<I> {
    type Item = Subtitle;

    fn next(&mut self) -> Option<Subtitle> {
        let mut prev = match self.pending.take() {
            Some(cue) => cue,
            None => self.cues.next()?,
        };

        if let Some(curr) = self.cues.next() {
            adjust_duration(&mut prev, &curr, self.min_duration);
            self.pending = Some(curr);
        }

        Some(prev)
    }
}
