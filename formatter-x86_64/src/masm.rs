use crate::dialect::MASM;
use crate::engine::Engine;
use crate::options::FormatterOptions;
use crate::symbol::{FormatterOptionsProvider, SymbolResolver};

/// Intel syntax as accepted by masm.
///
/// `mov rcx,qword ptr fs:[rax+rdx*8-80h]`, hex numbers are written `0FFh`.
pub struct MasmFormatter {
    engine: Engine,
}

impl MasmFormatter {
    pub fn new() -> Self {
        Self::with_options(FormatterOptions::with_masm())
    }

    pub fn with_options(options: FormatterOptions) -> Self {
        Self {
            engine: Engine::new(&MASM, options),
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

impl Default for MasmFormatter {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_formatter!(MasmFormatter);
