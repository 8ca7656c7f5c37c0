use chrono::TimeDelta;

use crate::network::{Station, great_circle_meters};

/// Lower-bound estimate of the travel time still needed to reach `to`.
///
/// The fastest-route search stays optimal as long as the estimate never
/// exceeds the true remaining travel time.
pub trait Heuristic {
    fn estimate(&self, from: &Station, to: &Station) -> TimeDelta;
}

/// Always estimates zero, which turns A* into Dijkstra's algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHeuristic;

impl Heuristic for NoHeuristic {
    fn estimate(&self, _from: &Station, _to: &Station) -> TimeDelta {
        TimeDelta::zero()
    }
}

/// Time to cover the great-circle distance at `max_speed_m_s`.
///
/// Only admissible if no connection in the network is faster than
/// `max_speed_m_s`. Falls back to zero when either station has no location
/// or the speed is not positive, and clamps to `TimeDelta::MAX` when the
/// estimate does not fit.
#[derive(Clone, Copy, Debug)]
pub struct StraightLine {
    pub max_speed_m_s: f64,
}

impl StraightLine {
    pub fn new(max_speed_m_s: f64) -> Self {
        Self { max_speed_m_s }
    }
}

impl Heuristic for StraightLine {
    fn estimate(&self, from: &Station, to: &Station) -> TimeDelta {
        match (from.location, to.location) {
            (Some(a), Some(b)) if self.max_speed_m_s > 0.0 => {
                let millis = (great_circle_meters(a, b) / self.max_speed_m_s * 1000.0).floor();
                if millis.is_finite() && millis < i64::MAX as f64 {
                    TimeDelta::try_milliseconds(millis as i64).unwrap_or(TimeDelta::MAX)
                } else {
                    TimeDelta::MAX
                }
            }
            _ => TimeDelta::zero(),
        }
    }
}

impl<F> Heuristic for F
where
    F: Fn(&Station, &Station) -> TimeDelta,
{
    fn estimate(&self, from: &Station, to: &Station) -> TimeDelta {
        self(from, to)
    }
}
