use crate::assembler::{NullSink, OutputSink, SymbolAssembler};
use crate::classifier::TimingClassifier;
use crate::types::TickEvents;

/// One decoding session: a classifier feeding an assembler feeding a sink.
///
/// Independent sessions share nothing; the symbol table is static.
#[derive(Debug, Clone, Default)]
pub struct MorseDecoder<S: OutputSink = NullSink> {
    classifier: TimingClassifier,
    assembler: SymbolAssembler,
    sink: S,
}

impl MorseDecoder<NullSink> {
    pub fn new() -> Self {
        Self::with_sink(NullSink)
    }
}

impl<S: OutputSink> MorseDecoder<S> {
    pub fn with_sink(sink: S) -> Self {
        Self {
            classifier: TimingClassifier::new(),
            assembler: SymbolAssembler::new(),
            sink,
        }
    }

    /// Advance one sampling period. Events are applied to the assembler in
    /// priority order and also returned to the caller.
    pub fn on_tick(&mut self, key_down: bool) -> TickEvents {
        let events = self.classifier.on_tick(key_down);
        if let Some(symbol) = events.symbol {
            self.assembler.on_symbol_formed(symbol);
        }
        if events.character_boundary {
            self.assembler.on_character_boundary(&mut self.sink);
        }
        if events.word_boundary {
            self.assembler.on_word_boundary(&mut self.sink);
        }
        events
    }

    /// Treat the input as ended with the key up: feed key-up ticks until the
    /// current character boundary is reached. Returns the ticks fed.
    pub fn finish(&mut self) -> u32 {
        let mut fed = 0;
        while self.classifier.awaiting_character_boundary() {
            self.on_tick(false);
            fed += 1;
        }
        fed
    }

    /// Back to a fresh session. The sink is kept.
    pub fn reset(&mut self) {
        self.classifier.reset();
        self.assembler.reset();
    }

    pub fn transcript(&self) -> &str {
        self.assembler.transcript()
    }

    pub fn classifier(&self) -> &TimingClassifier {
        &self.classifier
    }

    pub fn assembler(&self) -> &SymbolAssembler {
        &self.assembler
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
