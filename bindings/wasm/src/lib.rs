// WebAssembly bindings for the morse-rx decoder
use morse_rx::types::*;
use morse_rx::{replay, timing, MorseDecoder};
use wasm_bindgen::prelude::*;

#[macro_use]
mod support;

// Console logging for debugging
macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&JsValue::from_str(&format!($($t)*))))
}

/// Live decoding session driven one sample at a time from JavaScript.
#[wasm_bindgen(js_name = MorseDecoder)]
pub struct MorseDecoderJs {
    inner: MorseDecoder<String>,
}

impl Default for MorseDecoderJs {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = MorseDecoder)]
impl MorseDecoderJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> MorseDecoderJs {
        MorseDecoderJs {
            inner: MorseDecoder::with_sink(String::new()),
        }
    }

    /// Feed one key sample; returns any text decoded on this tick.
    #[wasm_bindgen(js_name = onTick)]
    pub fn on_tick(&mut self, key_down: bool) -> String {
        self.inner.on_tick(key_down);
        std::mem::take(self.inner.sink_mut())
    }

    /// Release the key long enough to resolve any pending character.
    pub fn finish(&mut self) -> String {
        self.inner.finish();
        std::mem::take(self.inner.sink_mut())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
        self.inner.sink_mut().clear();
    }

    #[wasm_bindgen(getter)]
    pub fn transcript(&self) -> String {
        self.inner.transcript().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn unit_ticks(&self) -> u32 {
        self.inner.classifier().unit_duration()
    }

    #[wasm_bindgen(getter)]
    pub fn estimated_wpm(&self) -> u32 {
        self.inner.classifier().estimated_rate()
    }
}

#[wasm_bindgen]
pub struct MorseKeyingResult {
    signals: Vec<MorseSignal>,
}

impl From<Vec<MorseSignal>> for MorseKeyingResult {
    fn from(signals: Vec<MorseSignal>) -> Self {
        Self { signals }
    }
}

#[wasm_bindgen]
impl MorseKeyingResult {
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.signals.len()
    }

    /// The intervals as an array of `{ on, seconds }` objects.
    pub fn signals(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.signals).map_err(JsValue::from)
    }
}

wasm_fn! {
    /// Synthesize key intervals for `text`.
    pub fn generate_keying(text: &str, config_json: &str) -> Result<MorseKeyingResult, JsValue>
    with timing::morse_timing, MorseTimingParams, MorseKeyingResult::from
}

#[wasm_bindgen]
pub struct MorseDecodeResultJs {
    result: MorseDecodeResult,
}

#[wasm_bindgen]
impl MorseDecodeResultJs {
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.result.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn unit_ticks(&self) -> u32 {
        self.result.unit_ticks
    }

    #[wasm_bindgen(getter)]
    pub fn estimated_wpm(&self) -> u32 {
        self.result.estimated_wpm
    }

    #[wasm_bindgen(getter)]
    pub fn ticks_processed(&self) -> f64 {
        self.result.ticks_processed as f64
    }

    #[wasm_bindgen(getter)]
    pub fn characters_decoded(&self) -> u32 {
        self.result.characters_decoded
    }

    #[wasm_bindgen(getter)]
    pub fn unknown_characters(&self) -> u32 {
        self.result.unknown_characters
    }
}

#[wasm_bindgen]
pub fn decode_morse_signals(
    signals_json: &str,
    config_json: &str,
) -> Result<MorseDecodeResultJs, JsValue> {
    let signals: Vec<MorseSignal> = serde_json::from_str(signals_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid signals JSON: {}", e)))?;

    let params = support::parse_with_defaults::<MorseDecodeParams>(config_json);

    let result = replay::decode_signals(&signals, &params)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    console_log!(
        "decoded {} signals into {} characters",
        signals.len(),
        result.characters_decoded
    );

    Ok(MorseDecodeResultJs { result })
}
