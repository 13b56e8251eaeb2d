use std::io;
use std::time::Duration;

use log::warn;

pub const SPEED_OFFSET: u32 = 2;
pub const POINTS_PER_SPEED_UP: u32 = 10;
pub const LOG_FILE: &str = "gridsnake.log";
/// How long the host waits for input before drawing the next frame.
pub const FRAME_RATE: Duration = Duration::from_millis(16);

/// Largest board the terminal host can address, two columns per cell.
pub const MAX_PLANE_SCALE: u16 = 1024;

const DEFAULT_PLANE_SCALE: u16 = 16;
const DEFAULT_SPEED: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    pub plane_scale: u16,
    pub initial_speed: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            plane_scale: DEFAULT_PLANE_SCALE,
            initial_speed: DEFAULT_SPEED,
        }
    }
}

impl Settings {
    /// Reads `--plane-scale N` and `--speed N`. Unknown flags and unparsable
    /// values are logged and skipped.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut settings = Settings::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--plane-scale" => match args.next().map(|v| v.parse::<u16>()) {
                    Some(Ok(scale)) => settings.plane_scale = scale,
                    other => warn!("Ignoring --plane-scale value: {:?}", other),
                },
                "--speed" => match args.next().map(|v| v.parse::<u32>()) {
                    Some(Ok(speed)) => settings.initial_speed = speed,
                    other => warn!("Ignoring --speed value: {:?}", other),
                },
                _ => warn!("Ignoring unknown argument {}", arg),
            }
        }

        settings
    }

    pub fn validate(&self) -> Result<(), io::Error> {
        if !(2..=MAX_PLANE_SCALE).contains(&self.plane_scale) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "plane scale must be between 2 and {}, got {}",
                    MAX_PLANE_SCALE, self.plane_scale
                ),
            ));
        }
        if self.initial_speed == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "speed must be positive",
            ));
        }
        Ok(())
    }
}

/// Seconds between moves at the given speed.
pub fn tick_interval(speed: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(speed.saturating_add(SPEED_OFFSET)).ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_args(Vec::new());
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.plane_scale, 16);
        assert_eq!(settings.initial_speed, 1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let settings = Settings::from_args(args(&["--plane-scale", "8", "--speed", "3"]));
        assert_eq!(settings.plane_scale, 8);
        assert_eq!(settings.initial_speed, 3);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let settings = Settings::from_args(args(&["--plane-scale", "huge", "--bogus", "--speed"]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_validate() {
        let tiny = Settings {
            plane_scale: 1,
            ..Settings::default()
        };
        assert_eq!(
            tiny.validate().unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );

        let stalled = Settings {
            initial_speed: 0,
            ..Settings::default()
        };
        assert!(stalled.validate().is_err());

        let huge = Settings {
            plane_scale: 40000,
            ..Settings::default()
        };
        assert_eq!(
            huge.validate().unwrap_err().kind(),
            io::ErrorKind::InvalidInput
        );

        let largest = Settings {
            plane_scale: MAX_PLANE_SCALE,
            ..Settings::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_tick_interval_at_max_speed() {
        let interval = tick_interval(u32::MAX);
        assert!(interval > Duration::ZERO);
        assert!(interval <= tick_interval(u32::MAX - 1));
    }

    #[test]
    fn test_tick_interval_shrinks_with_speed() {
        // 1 / ln(3)
        let first = tick_interval(1).as_secs_f64();
        assert!((first - 0.910_239).abs() < 1e-5);

        let mut previous = tick_interval(1);
        for speed in 2..50 {
            let interval = tick_interval(speed);
            assert!(interval < previous);
            previous = interval;
        }
    }
}
