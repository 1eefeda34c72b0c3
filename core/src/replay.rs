// Replay recorded key activity through a fresh decoding session.
use crate::assembler::OutputSink;
use crate::decoder::MorseDecoder;
use crate::error::{DecodeError, Result};
use crate::types::{MorseDecodeParams, MorseDecodeResult, MorseSignal};
use tracing::debug;

/// Whole ticks covered by `seconds` at the given sampling period (nearest).
/// `None` for negative, non-finite or out-of-range durations.
pub fn signal_ticks(seconds: f32, tick_seconds: f32) -> Option<u32> {
    let ticks = (f64::from(seconds) / f64::from(tick_seconds)).round();
    if ticks.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&ticks) {
        Some(ticks as u32)
    } else {
        None
    }
}

/// Expand timed intervals into per-tick key states.
pub fn signals_to_ticks<'a>(
    signals: &'a [MorseSignal],
    params: &MorseDecodeParams,
) -> Result<impl Iterator<Item = bool> + 'a> {
    let tick_seconds = params.tick_seconds;
    if !(tick_seconds.is_finite() && tick_seconds > 0.0) {
        return Err(DecodeError::InvalidTickPeriod(tick_seconds));
    }
    if let Some((index, signal)) = signals
        .iter()
        .enumerate()
        .find(|(_, s)| s.seconds < 0.0 || signal_ticks(s.seconds, tick_seconds).is_none())
    {
        return Err(DecodeError::InvalidSignal {
            index,
            seconds: signal.seconds,
        });
    }

    Ok(signals.iter().flat_map(move |signal| {
        let ticks = signal_ticks(signal.seconds, tick_seconds).unwrap_or(0);
        std::iter::repeat(signal.on).take(ticks as usize)
    }))
}

/// Run `ticks` through `decoder`, then flush the last character.
pub fn replay_into<S, I>(decoder: &mut MorseDecoder<S>, ticks: I) -> u64
where
    S: OutputSink,
    I: IntoIterator<Item = bool>,
{
    let mut processed = 0u64;
    for key_down in ticks {
        decoder.on_tick(key_down);
        processed += 1;
    }
    processed + u64::from(decoder.finish())
}

/// Decode a complete tick log. The end of input counts as the key being released.
pub fn decode_ticks<I: IntoIterator<Item = bool>>(ticks: I) -> MorseDecodeResult {
    let mut decoder = MorseDecoder::new();
    let ticks_processed = replay_into(&mut decoder, ticks);
    summarize(&decoder, ticks_processed)
}

/// Decode timed key intervals sampled at `params.tick_seconds`.
pub fn decode_signals(
    signals: &[MorseSignal],
    params: &MorseDecodeParams,
) -> Result<MorseDecodeResult> {
    let ticks = signals_to_ticks(signals, params)?;
    let result = decode_ticks(ticks);
    debug!(
        signals = signals.len(),
        ticks = result.ticks_processed,
        unit_ticks = result.unit_ticks,
        "signals decoded"
    );
    Ok(result)
}

/// Snapshot of a session as a [`MorseDecodeResult`].
pub fn summarize<S: OutputSink>(
    decoder: &MorseDecoder<S>,
    ticks_processed: u64,
) -> MorseDecodeResult {
    let classifier = decoder.classifier();
    let assembler = decoder.assembler();
    MorseDecodeResult {
        text: assembler.transcript().to_string(),
        unit_ticks: classifier.unit_duration(),
        estimated_wpm: classifier.estimated_rate(),
        ticks_processed,
        characters_decoded: assembler.characters_decoded(),
        unknown_characters: assembler.unknown_characters(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::morse_timing;
    use crate::types::MorseTimingParams;

    fn signal(on: bool, seconds: f32) -> MorseSignal {
        MorseSignal { on, seconds }
    }

    #[test]
    fn test_empty_input() {
        let result = decode_ticks(std::iter::empty());
        assert_eq!(result, MorseDecodeResult::default());
    }

    #[test]
    fn test_decode_signals_i() {
        let params = MorseDecodeParams::default();
        let signals = vec![
            signal(true, 0.010),
            signal(false, 0.010),
            signal(true, 0.010),
            signal(false, 0.200),
        ];
        let result = decode_signals(&signals, &params).unwrap();
        assert_eq!(result.text, "i");
        assert_eq!(result.unit_ticks, 10);
        assert_eq!(result.characters_decoded, 1);
        assert_eq!(result.ticks_processed, 230);
        // 1200 / 10 is past the plausibility ceiling
        assert_eq!(result.estimated_wpm, 0);
    }

    #[test]
    fn test_trailing_character_is_flushed() {
        let params = MorseDecodeParams::default();
        let signals = vec![signal(true, 0.060), signal(false, 0.060), signal(true, 0.180)];
        let result = decode_signals(&signals, &params).unwrap();
        assert_eq!(result.text, "a");
        assert_eq!(result.estimated_wpm, 20);
        assert_eq!(result.ticks_processed, 300 + 120);
    }

    #[test]
    fn test_tick_period_scales_durations() {
        let signals = vec![signal(true, 0.060), signal(false, 0.060), signal(true, 0.060)];
        let coarse = MorseDecodeParams { tick_seconds: 0.01 };
        let result = decode_signals(&signals, &coarse).unwrap();
        assert_eq!(result.text, "i");
        assert_eq!(result.unit_ticks, 6);
    }

    #[test]
    fn test_invalid_inputs() {
        let bad_period = MorseDecodeParams { tick_seconds: 0.0 };
        assert_eq!(
            decode_signals(&[], &bad_period),
            Err(DecodeError::InvalidTickPeriod(0.0))
        );

        let params = MorseDecodeParams::default();
        let signals = vec![signal(true, 0.05), signal(false, -1.0)];
        assert_eq!(
            decode_signals(&signals, &params),
            Err(DecodeError::InvalidSignal {
                index: 1,
                seconds: -1.0
            })
        );
    }

    #[test]
    fn test_interval_longer_than_tick_counter_is_rejected() {
        let params = MorseDecodeParams::default();
        // 1e7 s at 1 ms is 1e10 ticks, past u32::MAX
        let signals = vec![signal(true, 0.01), signal(false, 1.0e7)];
        assert_eq!(
            decode_signals(&signals, &params).err(),
            Some(DecodeError::InvalidSignal {
                index: 1,
                seconds: 1.0e7
            })
        );
        assert_eq!(signal_ticks(4.0e9, 1.0), Some(4_000_000_000));
        assert_eq!(signal_ticks(5.0e9, 1.0), None);
        assert_eq!(signal_ticks(f32::INFINITY, 0.001), None);
        assert_eq!(signal_ticks(f32::NAN, 0.001), None);
    }

    #[test]
    fn test_synthesized_keying_round_trip_drops_leading_symbols() {
        // 20 WPM at 1 ms ticks: 60-tick dots, 180-tick character gaps.
        // Every character after the first loses its first symbol.
        let signals = morse_timing("sos", &MorseTimingParams::default()).unwrap();
        let result = decode_signals(&signals, &MorseDecodeParams::default()).unwrap();
        assert_eq!(result.text, "smi");
        assert_eq!(result.unit_ticks, 60);
        assert_eq!(result.estimated_wpm, 20);
    }
}
