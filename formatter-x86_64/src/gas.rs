use crate::dialect::GAS;
use crate::engine::Engine;
use crate::options::FormatterOptions;
use crate::symbol::{FormatterOptionsProvider, SymbolResolver};

/// at&t syntax as accepted by the gnu assembler.
///
/// Operands are written source first: `movq %fs:-0x80(%rax,%rdx,8),%rcx`. Mnemonics get a
/// size suffix when no register operand gives the operand size away.
pub struct GasFormatter {
    engine: Engine,
}

impl GasFormatter {
    pub fn new() -> Self {
        Self::with_options(FormatterOptions::with_gas())
    }

    pub fn with_options(options: FormatterOptions) -> Self {
        Self {
            engine: Engine::new(&GAS, options),
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

impl Default for GasFormatter {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_formatter!(GasFormatter);
