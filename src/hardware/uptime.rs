use super::traits::Clock;
use embassy_time::Instant;

/// Milliseconds since boot from the embassy time driver, truncated to `u32`
#[derive(Clone, Copy, Default)]
pub struct Uptime;

impl Clock for Uptime {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}
