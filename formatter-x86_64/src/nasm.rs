use crate::dialect::NASM;
use crate::engine::Engine;
use crate::options::FormatterOptions;
use crate::symbol::{FormatterOptionsProvider, SymbolResolver};

/// Intel syntax as accepted by nasm.
///
/// `mov rcx,qword [fs:rax+rdx*8-80h]`, size prefixes such as `o16` and `a32` are written
/// as prefixes and rounding decorators are operands of their own.
pub struct NasmFormatter {
    engine: Engine,
}

impl NasmFormatter {
    pub fn new() -> Self {
        Self::with_options(FormatterOptions::with_nasm())
    }

    pub fn with_options(options: FormatterOptions) -> Self {
        Self {
            engine: Engine::new(&NASM, options),
        }
    }

    /// Resolves addresses and immediates to symbols.
    pub fn with_resolver(mut self, resolver: Box<dyn SymbolResolver>) -> Self {
        self.engine.resolver = Some(resolver);
        self
    }

    /// Adjusts number formatting per operand.
    pub fn with_options_provider(mut self, provider: Box<dyn FormatterOptionsProvider>) -> Self {
        self.engine.provider = Some(provider);
        self
    }
}

impl Default for NasmFormatter {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_formatter!(NasmFormatter);
