/// Node-local time for a node whose visibility window starts at `start` and lasts `duration`.
///
/// Returns `None` before the window opens and after it closes. The upper bound is inclusive.
pub fn node_local_time(global: f64, start: f64, duration: Option<f64>) -> Option<f64> {
    let local = global - start;
    if local < 0.0 {
        return None;
    }
    if let Some(d) = duration
        && local > d
    {
        return None;
    }
    Some(local)
}

/// Where a node sits relative to its visibility window at some global time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodePhase {
    /// Before `startTime`: hidden.
    Pending,
    /// Inside the window, with the node-local time.
    Active(f64),
    /// Past `startTime + duration`: visible, frozen at its last frame.
    Finished(f64),
}

impl NodePhase {
    pub fn at(global: f64, start: Option<f64>, duration: Option<f64>) -> Self {
        let start = start.unwrap_or(0.0);
        match node_local_time(global, start, duration) {
            Some(local) => Self::Active(local),
            None => match duration {
                Some(d) if global - start > d => Self::Finished(d),
                _ => Self::Pending,
            },
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Time at which tracks should be sampled, if the node is visible.
    pub fn sample_time(self) -> Option<f64> {
        match self {
            Self::Pending => None,
            Self::Active(t) | Self::Finished(t) => Some(t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/time.rs"]
mod tests;
