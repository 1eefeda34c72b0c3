// Adaptive timing classifier.
// Counts consecutive key-down / key-up ticks and classifies each finished press
// against a unit duration learned online from the most recent dot.
use crate::types::{MorseSymbol, TickEvents};
use tracing::{debug, trace};

/// A press up to this many units (as a ratio, 3/2) is a dot.
const DOT_MAX_NUM: u64 = 3;
const DOT_MAX_DEN: u64 = 2;
/// A press longer than this many units is a dash.
const DASH_MIN_UNITS: u64 = 2;
/// Release length, in units, that ends a character.
const CHARACTER_GAP_UNITS: u64 = 2;
/// Release length, in units, that ends a word.
const WORD_GAP_UNITS: u64 = 100;
/// Standard PARIS conversion: WPM = 1200 / dot milliseconds.
const RATE_NUMERATOR: u32 = 1200;
/// Calibrations implying a faster rate than this are discarded.
const MAX_PLAUSIBLE_WPM: u32 = 90;

/// Tick-driven classifier state. All fields start at zero; `Default` is a fresh session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingClassifier {
    press_ticks: u32,
    release_ticks: u32,
    last_press_duration: u32,
    last_release_duration: u32,
    unit_duration: u32,
    estimated_rate: u32,
    // A symbol was forwarded since the last character boundary
    symbols_pending: bool,
    // At least one character boundary has resolved a code
    character_decoded: bool,
}

impl TimingClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one key-state sample. Constant time, never allocates.
    pub fn on_tick(&mut self, key_down: bool) -> TickEvents {
        let mut events = TickEvents::default();

        if key_down {
            self.press_ticks = self.press_ticks.saturating_add(1);
            if self.press_ticks == 1 {
                self.last_release_duration = self.release_ticks;
                self.release_ticks = 0;
            }
            return events;
        }

        self.release_ticks = self.release_ticks.saturating_add(1);
        if self.release_ticks == 1 {
            events.symbol = self.end_press();
        }

        let release = u64::from(self.release_ticks);
        let unit = u64::from(self.unit_duration);

        if unit > 0 && release == CHARACTER_GAP_UNITS * unit {
            self.end_character();
            events.character_boundary = true;
        }

        if unit > 0 && release == WORD_GAP_UNITS * unit && self.character_decoded {
            trace!(release_ticks = self.release_ticks, "word boundary");
            events.word_boundary = true;
        }

        events
    }

    // Falling edge: classify the press that just ended.
    fn end_press(&mut self) -> Option<MorseSymbol> {
        // Session opened with the key up; nothing was pressed
        if self.press_ticks == 0 {
            return None;
        }

        let duration = self.press_ticks;
        self.last_press_duration = duration;
        self.press_ticks = 0;

        if self.unit_duration == 0 {
            self.unit_duration = duration;
            debug!(unit_ticks = duration, "unit duration calibrated");
        }

        let press = u64::from(duration);
        let unit = u64::from(self.unit_duration);

        let symbol = if press * DOT_MAX_DEN <= unit * DOT_MAX_NUM {
            self.unit_duration = duration;
            MorseSymbol::Dot
        } else if press > DASH_MIN_UNITS * unit {
            MorseSymbol::Dash
        } else {
            trace!(press_ticks = duration, unit_ticks = self.unit_duration, "ambiguous press dropped");
            return None;
        };

        // A long preceding gap suppresses the append, even for the first
        // symbol of a new character.
        let gap_limit = CHARACTER_GAP_UNITS * u64::from(self.unit_duration);
        if u64::from(self.last_release_duration) >= gap_limit {
            trace!(
                ?symbol,
                gap_ticks = self.last_release_duration,
                "symbol after long gap not appended"
            );
            return None;
        }

        trace!(?symbol, press_ticks = duration, "symbol formed");
        self.symbols_pending = true;
        Some(symbol)
    }

    fn end_character(&mut self) {
        self.estimated_rate = RATE_NUMERATOR / self.unit_duration;
        if self.estimated_rate > MAX_PLAUSIBLE_WPM {
            debug!(
                rate = self.estimated_rate,
                unit_ticks = self.unit_duration,
                "implausible rate, clamping"
            );
            self.estimated_rate = 0;
            self.press_ticks = 0;
        }

        if self.symbols_pending {
            self.character_decoded = true;
            self.symbols_pending = false;
        }
    }

    /// True while the stream could still produce a character boundary for
    /// the current press/release, i.e. feeding key-up ticks will reach one.
    pub fn awaiting_character_boundary(&self) -> bool {
        if self.press_ticks > 0 {
            return true;
        }
        let unit = u64::from(self.unit_duration);
        unit > 0 && u64::from(self.release_ticks) < CHARACTER_GAP_UNITS * unit
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn press_ticks(&self) -> u32 {
        self.press_ticks
    }

    pub fn release_ticks(&self) -> u32 {
        self.release_ticks
    }

    pub fn last_press_duration(&self) -> u32 {
        self.last_press_duration
    }

    pub fn last_release_duration(&self) -> u32 {
        self.last_release_duration
    }

    /// Current dot estimate in ticks; 0 until the first press completes.
    pub fn unit_duration(&self) -> u32 {
        self.unit_duration
    }

    pub fn is_calibrated(&self) -> bool {
        self.unit_duration > 0
    }

    /// Informational WPM estimate (1200 / unit), refreshed at each character boundary.
    pub fn estimated_rate(&self) -> u32 {
        self.estimated_rate
    }

    pub fn character_decoded(&self) -> bool {
        self.character_decoded
    }
}
