//! Countdown presentation: timer label, power LED blink, egg wobble

/// LED toggles every this many milliseconds while incubating
const LED_PERIOD_MS: i64 = 500;
/// Peak egg rotation in degrees
const WOBBLE_AMPLITUDE: f64 = 3.0;

/// What a display shows on an incubating tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    pub remaining_ms: i64,
    /// `m:ss`, seconds rounded up
    pub label: String,
    pub led_lit: bool,
    pub wobble_degrees: f64,
}

impl Countdown {
    pub fn at(remaining_ms: i64, now_ms: i64) -> Self {
        Self {
            remaining_ms,
            label: format_countdown(remaining_ms),
            led_lit: led_lit(now_ms),
            wobble_degrees: wobble_degrees(now_ms),
        }
    }
}

/// Format milliseconds as `m:ss`, rounding partial seconds up so the label
/// only reads `0:00` once time has actually run out.
///
/// ```
/// use pixel_incubator::incubator::format_countdown;
///
/// assert_eq!(format_countdown(25 * 60 * 1000), "25:00");
/// assert_eq!(format_countdown(59_001), "1:00");
/// assert_eq!(format_countdown(-5), "0:00");
/// ```
pub fn format_countdown(ms: i64) -> String {
    let ms = ms.max(0);
    let secs = ms.saturating_add(999) / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn led_lit(now_ms: i64) -> bool {
    now_ms.div_euclid(LED_PERIOD_MS) % 2 == 0
}

pub fn wobble_degrees(now_ms: i64) -> f64 {
    (now_ms as f64 / 100.0).sin() * WOBBLE_AMPLITUDE
}
