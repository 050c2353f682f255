/// Game loop timing and control system
///
/// Fixed timestep for physics, variable timestep for per-frame logic.
/// Each frame produces one frame tick and zero or more physics ticks; the
/// simulation clock only advances while unpaused so cooldowns freeze with
/// the game.
use std::time::{Duration, Instant};

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Longest frame the simulation will account for (debugger pauses, window drags)
const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

/// Simulation clock reading handed to gameplay code
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Seconds of simulated time since start
    pub now: f32,
    /// Seconds since the previous tick of this kind
    pub dt: f32,
}

impl FrameTime {
    pub fn new(now: f32, dt: f32) -> Self {
        Self { now, dt }
    }
}

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Simulated seconds (stops while paused)
    sim_time: f32,

    /// Delta time of the current frame
    frame_dt: f32,

    paused: bool,
    frame_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            sim_time: 0.0,
            frame_dt: 0.0,
            paused: false,
            frame_count: 0,
        }
    }

    /// Begin a new frame, returns the number of fixed updates to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time).min(MAX_FRAME_TIME);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Advance by an explicit frame duration
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            self.frame_dt = 0.0;
            return 0;
        }

        self.frame_dt = frame_time.as_secs_f32();
        self.sim_time += self.frame_dt;
        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_PHYSICS_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }
        updates
    }

    /// Clock reading for this frame's variable-rate tick
    pub fn frame_time(&self) -> FrameTime {
        FrameTime::new(self.sim_time, self.frame_dt)
    }

    /// Clock reading for a fixed-rate physics tick
    pub fn physics_time(&self) -> FrameTime {
        FrameTime::new(self.sim_time, FIXED_TIMESTEP)
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            log::info!("Game paused");
        } else {
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game resumed");
        }
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
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_steps_from_accumulated_time() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 0);
        assert_eq!(game_loop.advance(Duration::from_millis(10)), 1);
        assert_eq!(game_loop.advance(Duration::from_millis(34)), 2);
    }

    #[test]
    fn test_max_physics_steps_limit() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(Duration::from_millis(300)), MAX_PHYSICS_STEPS);
    }

    #[test]
    fn test_clock_advances_with_frames() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(Duration::from_millis(100));
        game_loop.advance(Duration::from_millis(50));

        let time = game_loop.frame_time();
        assert_relative_eq!(time.now, 0.15, epsilon = 1e-5);
        assert_relative_eq!(time.dt, 0.05, epsilon = 1e-5);
        assert_relative_eq!(game_loop.physics_time().dt, FIXED_TIMESTEP);
    }

    #[test]
    fn test_paused_clock_stands_still() {
        let mut game_loop = GameLoop::new();
        game_loop.advance(Duration::from_millis(100));
        game_loop.toggle_pause();

        assert_eq!(game_loop.advance(Duration::from_millis(100)), 0);
        assert_relative_eq!(game_loop.frame_time().now, 0.1, epsilon = 1e-5);
        assert_eq!(game_loop.frame_time().dt, 0.0);

        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }
}
