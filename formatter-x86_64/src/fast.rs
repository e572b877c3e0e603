use crate::dialect::FAST;
use crate::engine::Engine;
use crate::options::{FastFormatterOptions, FormatterOptions, MemorySizeOptions};
use crate::symbol::SymbolResolver;

/// Masm-like syntax with a handful of options.
///
/// Output is close to [`crate::MasmFormatter`] with its defaults. Mnemonics and registers are
/// always lowercase and there's no per-operand number formatting.
pub struct FastFormatter {
    engine: Engine,
}

impl FastFormatter {
    pub fn new() -> Self {
        Self::with_options(FastFormatterOptions::default())
    }

    pub fn with_options(options: FastFormatterOptions) -> Self {
        Self::with_formatter_options(options.to_formatter_options())
    }

    /// Starts from a full option set, fields without a fast counterpart still apply.
    pub fn with_formatter_options(options: FormatterOptions) -> Self {
        Self {
            engine: Engine::new(&FAST, options),
        }
    }

    pub fn with_resolver(mut self, resolver: Box<dyn SymbolResolver>) -> Self {
        self.engine.resolver = Some(resolver);
        self
    }

    /// Current options, projected back onto the fast option set.
    pub fn fast_options(&self) -> FastFormatterOptions {
        let options = &self.engine.options;
        FastFormatterOptions {
            space_after_operand_separator: options.space_after_operand_separator,
            rip_relative_addresses: options.rip_relative_addresses,
            use_pseudo_ops: options.use_pseudo_ops,
            show_symbol_address: options.show_symbol_address,
            always_show_segment_register: options.always_show_segment_register,
            always_show_memory_size: options.memory_size_options == MemorySizeOptions::Always,
            uppercase_hex: options.uppercase_hex,
            use_hex_prefix: options.hex_prefix == "0x",
        }
    }

    pub fn set_fast_options(&mut self, options: FastFormatterOptions) {
        self.engine.options = options.to_formatter_options();
    }
}

impl Default for FastFormatter {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_formatter!(FastFormatter);
