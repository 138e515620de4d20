//! Kill accounting

/// Receives enemy kills
pub trait KillCounter {
    /// Record `count` kills
    fn record_kills(&mut self, count: u32);

    /// Record a single kill
    fn record_kill(&mut self) {
        self.record_kills(1);
    }
}

/// Running kill total against a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillTally {
    /// Kills so far
    pub kills: u32,
    /// Kills needed to clear the course
    pub goal: u32,
}

impl KillTally {
    /// Create an empty tally
    pub fn new(goal: u32) -> Self {
        Self { kills: 0, goal }
    }

    /// Whether the goal has been reached
    pub fn is_complete(&self) -> bool {
        self.kills >= self.goal
    }
}

impl Default for KillTally {
    fn default() -> Self {
        Self::new(10)
    }
}

impl KillCounter for KillTally {
    fn record_kills(&mut self, count: u32) {
        self.kills = self.kills.saturating_add(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally() {
        let mut tally = KillTally::new(2);
        assert!(!tally.is_complete());

        tally.record_kill();
        assert_eq!(tally.kills, 1);

        tally.record_kills(3);
        assert_eq!(tally.kills, 4);
        assert!(tally.is_complete());
    }
}
