// Adaptive Morse key decoder
// Turns a periodic key-down/key-up sample stream into text, learning the
// operator's speed from the key timing itself.

pub mod assembler;
pub mod classifier;
pub mod decoder;
pub mod error;
pub mod patterns;
pub mod replay;
pub mod timing;
pub mod types;

// Re-export main public API
pub use assembler::{FnSink, NullSink, OutputSink, PendingCode, SymbolAssembler};
pub use classifier::TimingClassifier;
pub use decoder::MorseDecoder;
pub use error::{DecodeError, Result};
pub use patterns::{resolve_code, UNKNOWN_MARKER};
pub use replay::{decode_signals, decode_ticks};
pub use timing::morse_timing;
pub use types::*;

/// Synthesize keying for `text` and decode it again at the given sampling period.
pub fn key_and_decode(
    text: &str,
    timing_params: &MorseTimingParams,
    decode_params: &MorseDecodeParams,
) -> Result<MorseDecodeResult> {
    let signals = timing::morse_timing(text, timing_params)?;
    replay::decode_signals(&signals, decode_params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(pattern: &[(bool, usize)]) -> Vec<bool> {
        pattern
            .iter()
            .flat_map(|&(on, n)| std::iter::repeat(on).take(n))
            .collect()
    }

    #[test]
    fn test_basic_decode() {
        let result = decode_ticks(ticks(&[(true, 10), (false, 10), (true, 10), (false, 200)]));
        assert_eq!(result.text, "i");
    }

    #[test]
    fn test_single_character_words() {
        // e, a word gap, then .- whose dot is lost to that gap
        let result = decode_ticks(ticks(&[
            (true, 10),
            (false, 1_200),
            (true, 10),
            (false, 10),
            (true, 30),
            (false, 30),
        ]));
        assert_eq!(result.text, "e t");
        assert_eq!(result.characters_decoded, 2);
    }

    #[test]
    fn test_leading_dash_calibrates_as_dot() {
        let result = key_and_decode(
            "k",
            &MorseTimingParams::default(),
            &MorseDecodeParams::default(),
        )
        .unwrap();
        // The first press defines the unit, so the opening dash of -.- reads as a dot
        assert_eq!(result.text, "u");
        assert_eq!(result.unit_ticks, 60);
    }

    #[test]
    fn test_idle_stream() {
        let result = decode_ticks(std::iter::repeat(false).take(100_000));
        assert_eq!(result.text, "");
        assert_eq!(result.unit_ticks, 0);
        assert_eq!(result.ticks_processed, 100_000);
    }
}
