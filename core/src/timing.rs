use crate::error::{DecodeError, Result};
use crate::patterns::code_for_char;
use crate::types::{MorseSignal, MorseTimingParams};

// ITU timing constants
const DOT_LENGTH_WPM: f32 = 1.2; // Standard ITU timing formula: dot duration = 1.2 / WPM seconds
const DOTS_PER_DASH: f32 = 3.0;
const DOTS_PER_CHAR_GAP: f32 = 3.0;
const DOTS_PER_WORD_GAP: f32 = 7.0;
const HUMANIZATION_MAX_VARIANCE: f32 = 0.3; // Maximum timing variation as fraction of base duration

/// Seed used when `random_seed` is 0, so unseeded runs still repeat.
const DEFAULT_SEED: u32 = 0x4D4F_5253;

// Jitter source for humanized keying; same seed, same keying
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        let seed = if seed == 0 { DEFAULT_SEED } else { seed };
        Self {
            state: seed.wrapping_add(1),
        }
    }

    fn next_f32(&mut self) -> f32 {
        // LCG, normalized to [0, 1)
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        (self.state >> 16) as f32 / 65536.0
    }
}

struct KeyingBuilder {
    dot_sec: f32,
    humanization_factor: f32,
    rng: Option<SimpleRng>,
    signals: Vec<MorseSignal>,
}

impl KeyingBuilder {
    // Random variation bounded to [10% of base, base * (1 + max_variance)]
    fn humanize(&mut self, base_duration: f32) -> f32 {
        let Some(rng) = self.rng.as_mut() else {
            return base_duration;
        };
        let max_variation = base_duration * self.humanization_factor * HUMANIZATION_MAX_VARIANCE;
        let variation = (rng.next_f32() - 0.5) * 2.0 * max_variation;

        let min_duration = base_duration * 0.1;
        let max_duration = base_duration * (1.0 + HUMANIZATION_MAX_VARIANCE);
        (base_duration + variation).clamp(min_duration, max_duration)
    }

    fn push(&mut self, on: bool, dots: f32) {
        let seconds = self.humanize(self.dot_sec * dots);
        self.signals.push(MorseSignal { on, seconds });
    }

    fn push_code(&mut self, code: &str) {
        for (i, symbol) in code.bytes().enumerate() {
            if i > 0 {
                self.push(false, 1.0);
            }
            let dots = if symbol == b'-' { DOTS_PER_DASH } else { 1.0 };
            self.push(true, dots);
        }
    }
}

/// Synthesize key intervals for `text` with ITU timing.
///
/// Spaces become word gaps, characters inside `[...]` are keyed as one prosign
/// (1-dot gaps between letters), and characters with no code are skipped.
/// The output starts with the key down and ends after the last element.
pub fn morse_timing(text: &str, params: &MorseTimingParams) -> Result<Vec<MorseSignal>> {
    if params.wpm <= 0 {
        return Err(DecodeError::InvalidWpm(params.wpm));
    }

    let mut builder = KeyingBuilder {
        dot_sec: DOT_LENGTH_WPM / params.wpm as f32,
        humanization_factor: params.humanization_factor,
        rng: (params.humanization_factor > 0.0).then(|| SimpleRng::new(params.random_seed)),
        signals: Vec::new(),
    };

    let word_gap = DOTS_PER_WORD_GAP * params.word_gap_multiplier;
    let mut pending_word_gap = false;
    let mut in_prosign = false;
    let mut prosign_started = false;

    for ch in text.chars() {
        match ch {
            ' ' if !in_prosign => {
                pending_word_gap = true;
                continue;
            }
            ' ' => continue,
            '[' => {
                in_prosign = true;
                prosign_started = false;
                continue;
            }
            ']' => {
                in_prosign = false;
                continue;
            }
            _ => {}
        }

        let Some(code) = code_for_char(ch) else {
            continue;
        };

        if !builder.signals.is_empty() {
            let gap = if pending_word_gap {
                word_gap
            } else if in_prosign && prosign_started {
                1.0
            } else {
                DOTS_PER_CHAR_GAP
            };
            builder.push(false, gap);
        }
        pending_word_gap = false;
        prosign_started = in_prosign;

        builder.push_code(code);
    }

    Ok(builder.signals)
}
