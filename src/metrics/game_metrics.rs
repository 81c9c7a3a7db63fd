use std::time::{Duration, Instant};

/// Session record kept for the lifetime of the process
///
/// Holds the running high score across restarts. Nothing here is written to
/// disk; a new process starts from zero.
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Record a finished run; returns true if it set a new high score
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.update();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            true
        } else {
            false
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");
    }

    #[test]
    fn test_high_score_is_max_of_runs() {
        let mut metrics = GameMetrics::new();

        assert!(metrics.on_game_over(40));
        assert_eq!(metrics.high_score, 40);

        assert!(!metrics.on_game_over(20));
        assert_eq!(metrics.high_score, 40);
        assert_eq!(metrics.games_played, 2);

        assert!(metrics.on_game_over(70));
        assert_eq!(metrics.high_score, 70);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_zero_score_is_not_a_record() {
        let mut metrics = GameMetrics::new();
        assert!(!metrics.on_game_over(0));
        assert_eq!(metrics.high_score, 0);
        assert_eq!(metrics.games_played, 1);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(90);

        metrics.on_game_start();
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
        assert_eq!(metrics.format_time(), "00:00");
    }
}
