/// Frame timing
///
/// Fixed timestep updates with variable-rate rendering: physics and game
/// logic always advance in 1/60 s increments regardless of how fast frames
/// are presented.
use std::time::{Duration, Instant};

/// Update rate for physics and game logic (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Cap on updates per frame so a long stall cannot snowball
const MAX_UPDATES_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed updates
    accumulator: Duration,
    /// Time of last frame
    last_frame_time: Instant,
    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,
    /// Current frame number
    frame_count: u64,
    /// Current FPS (updated periodically)
    current_fps: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATES_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }

        // Drop time we refuse to simulate, or it would burst out later
        if updates == MAX_UPDATES_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        updates
    }

    /// Get the fixed timestep in seconds
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fixed_timestep() {
        let game_loop = GameLoop::new();
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);

        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_update_accumulation() {
        let mut game_loop = GameLoop::new();

        thread::sleep(FIXED_TIMESTEP_DURATION);

        let updates = game_loop.begin_frame();
        assert!(updates >= 1);
        assert!(updates <= MAX_UPDATES_PER_FRAME);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut game_loop = GameLoop::new();

        // 300ms would be 18 updates; the clamp caps it
        thread::sleep(Duration::from_millis(300));

        let updates = game_loop.begin_frame();
        assert_eq!(updates, MAX_UPDATES_PER_FRAME);

        // The refused time must not burst out on the next frame
        let updates = game_loop.begin_frame();
        assert!(updates <= 1);
    }
}
