//! Command-line actions. Each prints its result to stdout and turns an
//! empty result of the requested action into an error.

mod artwork;
pub mod config;
mod device;
mod user;

pub use artwork::{display, favorite, favorites, random, unfavorite};
pub use config::{Options, build_client};
pub use device::{backlight, current, devices, sleep, sleep_schedule};
pub use user::user;

/// Validate a 24-hour `HH:MM:SS` (or `HH:MM`, seconds assumed zero) time of
/// day and normalize it to `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Result<String, String> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    let fields: Vec<u32> = match parts.as_slice() {
        [h, m] | [h, m, _] if h.len() == 2 && m.len() == 2 => parts
            .iter()
            .map(|p| p.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| format!("invalid time '{}', expected HH:MM:SS", value))?,
        _ => return Err(format!("invalid time '{}', expected HH:MM:SS", value)),
    };

    let (hours, minutes, seconds) = (fields[0], fields[1], fields.get(2).copied().unwrap_or(0));
    if parts.get(2).is_some_and(|s| s.len() != 2) || hours > 23 || minutes > 59 || seconds > 59 {
        return Err(format!("invalid time '{}', expected HH:MM:SS", value));
    }

    Ok(format!("{:02}:{:02}:{:02}", hours, minutes, seconds))
}
