use serde::{Deserialize, Serialize};

/// A single keyed element of a Morse code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorseSymbol {
    Dot = 0,
    Dash = 1,
}

impl MorseSymbol {
    /// Code-string representation: `.` or `-`.
    pub fn as_char(self) -> char {
        match self {
            MorseSymbol::Dot => '.',
            MorseSymbol::Dash => '-',
        }
    }

    pub(crate) fn as_byte(self) -> u8 {
        match self {
            MorseSymbol::Dot => b'.',
            MorseSymbol::Dash => b'-',
        }
    }
}

/// Event produced by the timing classifier on a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifiedEvent {
    SymbolFormed(MorseSymbol),
    CharacterBoundary,
    WordBoundary,
}

/// Everything one tick can produce. Fixed size so `on_tick` never allocates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub symbol: Option<MorseSymbol>,
    pub character_boundary: bool,
    pub word_boundary: bool,
}

impl TickEvents {
    pub fn is_empty(&self) -> bool {
        self.symbol.is_none() && !self.character_boundary && !self.word_boundary
    }

    /// Events in detection priority order: symbol, character boundary, word boundary.
    pub fn iter(&self) -> impl Iterator<Item = ClassifiedEvent> {
        let symbol = self.symbol.map(ClassifiedEvent::SymbolFormed);
        let character = self
            .character_boundary
            .then_some(ClassifiedEvent::CharacterBoundary);
        let word = self.word_boundary.then_some(ClassifiedEvent::WordBoundary);
        symbol.into_iter().chain(character).chain(word)
    }
}

/// A timed key interval, as recorded by a key-state sampler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MorseSignal {
    pub on: bool,
    pub seconds: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorseDecodeParams {
    /// Sampling period in seconds. Every duration threshold scales with it.
    pub tick_seconds: f32,
}

impl Default for MorseDecodeParams {
    fn default() -> Self {
        Self {
            tick_seconds: 0.001,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MorseDecodeResult {
    pub text: String,
    pub unit_ticks: u32,
    pub estimated_wpm: u32,
    pub ticks_processed: u64,
    pub characters_decoded: u32,
    pub unknown_characters: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorseTimingParams {
    pub wpm: i32,
    pub word_gap_multiplier: f32,
    pub humanization_factor: f32,
    pub random_seed: u32,
}

impl Default for MorseTimingParams {
    fn default() -> Self {
        Self {
            wpm: 20,
            word_gap_multiplier: 1.0,
            humanization_factor: 0.0,
            random_seed: 0,
        }
    }
}
