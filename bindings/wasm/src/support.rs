// Config parsing and wrapper generation shared by the exported functions
use serde::de::DeserializeOwned;

/// Deserialize a JS-supplied config object.
///
/// Config is advisory: an empty string, `{}` or JSON that does not fit `T`
/// all fall back to `T::default()`. Fields are defaulted individually, so a
/// partial object only overrides what it names.
pub fn parse_with_defaults<T: DeserializeOwned + Default>(config_json: &str) -> T {
    let config_json = config_json.trim();
    if config_json.is_empty() || config_json == "{}" {
        return T::default();
    }
    serde_json::from_str(config_json).unwrap_or_default()
}

/// Export `fn(text, config_json)` over a core function `fn(&str, &Config) -> Result<T, E>`.
///
/// The config goes through [`parse_with_defaults`], `Ok` values are mapped
/// with the given wrapper, and any `E: Display` (the core's `DecodeError`)
/// is thrown to JavaScript as its message string.
#[macro_export]
macro_rules! wasm_fn {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($text:ident: &str, $config:ident: &str)
        -> Result<$result:ty, JsValue>
        with $core_fn:path, $config_type:ty, $result_wrapper:expr
    ) => {
        #[wasm_bindgen]
        $(#[$meta])*
        $vis fn $name($text: &str, $config: &str) -> Result<$result, JsValue> {
            let params = $crate::support::parse_with_defaults::<$config_type>($config);
            $core_fn($text, &params)
                .map($result_wrapper)
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use morse_rx::{MorseDecodeParams, MorseTimingParams};

    #[test]
    fn test_empty_and_invalid_config_use_defaults() {
        let params: MorseDecodeParams = parse_with_defaults("");
        assert_eq!(params.tick_seconds, 0.001);
        let params: MorseDecodeParams = parse_with_defaults("not json");
        assert_eq!(params.tick_seconds, 0.001);
    }

    #[test]
    fn test_whitespace_around_empty_object_uses_defaults() {
        let params: MorseTimingParams = parse_with_defaults("  {}\n");
        assert_eq!(params.wpm, 20);
    }

    #[test]
    fn test_partial_config_overlays_defaults() {
        let params: MorseTimingParams = parse_with_defaults(r#"{"wpm": 30}"#);
        assert_eq!(params.wpm, 30);
        assert_eq!(params.humanization_factor, 0.0);
        let params: MorseDecodeParams = parse_with_defaults(r#"{"tickSeconds": 0.005}"#);
        assert_eq!(params.tick_seconds, 0.005);
    }
}
