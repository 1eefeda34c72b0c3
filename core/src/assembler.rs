// Symbol assembler: collects symbols into a code and resolves it at character boundaries.
use crate::patterns::{lookup_code, UNKNOWN_MARKER};
use crate::types::MorseSymbol;
use tracing::trace;

/// Longest code held verbatim. Longer codes are tracked only as overflowed.
pub const MAX_CODE_LEN: usize = 8;

/// Receives decoded text as it is produced.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// Discards all output; the transcript is still kept by the assembler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _text: &str) {}
}

impl OutputSink for String {
    fn emit(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl OutputSink for Vec<String> {
    fn emit(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, text: &str) {
        (**self).emit(text)
    }
}

/// Adapts a closure into an [`OutputSink`].
pub struct FnSink<F: FnMut(&str)>(pub F);

impl<F: FnMut(&str)> OutputSink for FnSink<F> {
    fn emit(&mut self, text: &str) {
        (self.0)(text)
    }
}

/// In-progress code for the character being keyed. Fixed capacity, no heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingCode {
    symbols: [u8; MAX_CODE_LEN],
    len: usize,
    overflowed: bool,
}

impl PendingCode {
    pub fn push(&mut self, symbol: MorseSymbol) {
        if self.len == MAX_CODE_LEN {
            self.overflowed = true;
            return;
        }
        self.symbols[self.len] = symbol.as_byte();
        self.len += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The code as `.`/`-` text (truncated to [`MAX_CODE_LEN`] if overflowed).
    pub fn as_str(&self) -> &str {
        // Only b'.' and b'-' are ever stored
        std::str::from_utf8(&self.symbols[..self.len]).unwrap_or_default()
    }

    /// Table entry for this code; an overflowed code never matches.
    pub fn lookup(&self) -> Option<&'static str> {
        if self.overflowed {
            None
        } else {
            lookup_code(self.as_str())
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolAssembler {
    pending: PendingCode,
    transcript: String,
    characters_decoded: u32,
    unknown_characters: u32,
}

impl SymbolAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_symbol_formed(&mut self, symbol: MorseSymbol) {
        self.pending.push(symbol);
    }

    /// Resolve the pending code, if any, and emit it.
    pub fn on_character_boundary<S: OutputSink + ?Sized>(&mut self, sink: &mut S) {
        if self.pending.is_empty() {
            return;
        }

        let text = match self.pending.lookup() {
            Some(text) => text,
            None => {
                self.unknown_characters += 1;
                UNKNOWN_MARKER
            }
        };
        trace!(code = self.pending.as_str(), text, "character resolved");
        self.characters_decoded += 1;

        self.transcript.push_str(text);
        sink.emit(text);
        self.pending.clear();
    }

    pub fn on_word_boundary<S: OutputSink + ?Sized>(&mut self, sink: &mut S) {
        self.transcript.push(' ');
        sink.emit(" ");
    }

    /// Everything decoded so far, word separators included.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn pending_code(&self) -> &PendingCode {
        &self.pending
    }

    pub fn characters_decoded(&self) -> u32 {
        self.characters_decoded
    }

    /// Resolutions that produced the unknown marker because the code had no entry.
    pub fn unknown_characters(&self) -> u32 {
        self.unknown_characters
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
