use std::time::Duration;

/// Returns true when a signal moved from strictly above `threshold` to at or below it.
pub fn crossed_below<T: PartialOrd>(previous: T, current: T, threshold: T) -> bool {
    previous > threshold && current <= threshold
}

/// Detects a downward crossing of a fixed threshold between two consecutive samples.
///
/// The detector itself is stateless: re-arming happens naturally because the previous value has
/// to be above the threshold again before another crossing can be reported.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdCrossingDetector<T> {
    threshold: T,
}

impl<T: PartialOrd + Copy> ThresholdCrossingDetector<T> {
    pub fn new(threshold: T) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> T {
        self.threshold
    }

    pub fn update(&self, previous: T, current: T, enabled: bool) -> bool {
        enabled && crossed_below(previous, current, self.threshold)
    }
}

/// A set/reset latch. When both inputs are active at the same time, the input selected by
/// `set_has_priority` wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryNode {
    set_has_priority: bool,
    output: bool,
}

impl MemoryNode {
    pub fn new(set_has_priority: bool) -> Self {
        Self {
            set_has_priority,
            output: false,
        }
    }

    pub fn update(&mut self, set: bool, reset: bool) -> bool {
        self.output = match (set, reset) {
            (true, true) => self.set_has_priority,
            (true, false) => true,
            (false, true) => false,
            (false, false) => self.output,
        };
        self.output
    }

    pub fn output(&self) -> bool {
        self.output
    }
}

/// Remembers when a callout last fired, measured on the engine clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LastFired {
    at: Option<Duration>,
}

impl LastFired {
    pub fn record(&mut self, now: Duration) {
        self.at = Some(now);
    }

    pub fn at(&self) -> Option<Duration> {
        self.at
    }

    /// True while `now` lies less than `window` after the last firing. Never true before the
    /// first firing.
    pub fn within(&self, now: Duration, window: Duration) -> bool {
        match self.at {
            Some(at) => match now.checked_sub(at) {
                Some(elapsed) => elapsed < window,
                None => true,
            },
            None => false,
        }
    }
}
