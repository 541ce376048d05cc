use std::collections::VecDeque;

use super::sample::{AdcSample, Precision};

/// Source of sensor samples, drained explicitly by the consumer once per
/// control cycle.
pub trait SensorFeed {
    /// Next pending sample in arrival order, or `None` when drained.
    fn next_sample(&mut self) -> Option<AdcSample>;
}

/// FIFO feed. Samples are rounded to the feed's precision on publish.
#[derive(Debug, Clone, Default)]
pub struct QueuedFeed {
    precision: Precision,
    pending: VecDeque<AdcSample>,
}

impl QueuedFeed {
    pub fn new(precision: Precision) -> Self {
        Self { precision, pending: VecDeque::new() }
    }

    /// Feed delivering whole units, as the air data and GNSS channels do.
    pub fn whole_units() -> Self {
        Self::new(Precision::WHOLE)
    }

    pub fn publish(&mut self, sample: AdcSample) {
        self.pending.push_back(self.precision.round_sample(sample));
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl SensorFeed for QueuedFeed {
    fn next_sample(&mut self) -> Option<AdcSample> {
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_order_with_rounding() {
        let mut feed = QueuedFeed::whole_units();
        feed.publish(AdcSample::IndicatedAltitude(4939.7));
        feed.publish(AdcSample::VerticalSpeed(-600.2));
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.next_sample(), Some(AdcSample::IndicatedAltitude(4940.0)));
        assert_eq!(feed.next_sample(), Some(AdcSample::VerticalSpeed(-600.0)));
        assert_eq!(feed.next_sample(), None);
        assert!(feed.is_empty());
    }
}
