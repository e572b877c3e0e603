//! Optional capabilities a caller can hand to a formatter.

use crate::instruction::{Instruction, MemorySize};
use formatter::NumberFormattingOptions;
use tokenizing::TextKind;

bitflags::bitflags! {
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u8 {
        /// Relative to a register, e.g. a field offset in `[rbx+Struct.field]`.
        /// Without it the symbol is an address and masm shows `offset` in front of immediates.
        const RELATIVE = 1 << 0;
        /// Shown as `-symbol` or `reg-symbol`.
        const SIGNED = 1 << 1;
    }
}

/// One piece of a symbol's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymResTextPart {
    pub text: String,
    pub kind: TextKind,
}

impl SymResTextPart {
    pub fn new(text: impl Into<String>, kind: TextKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// A resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolResult {
    /// Address of the symbol, the operand value may point past it.
    pub address: u64,
    pub text: Vec<SymResTextPart>,
    pub flags: SymbolFlags,
    /// Size of the data at the symbol, suppresses an equal memory size keyword.
    pub symbol_size: Option<MemorySize>,
}

impl SymbolResult {
    pub fn new(address: u64, text: impl Into<String>, kind: TextKind) -> Self {
        Self {
            address,
            text: vec![SymResTextPart::new(text, kind)],
            flags: SymbolFlags::empty(),
            symbol_size: None,
        }
    }

    pub fn with_flags(mut self, flags: SymbolFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_size(mut self, size: MemorySize) -> Self {
        self.symbol_size = Some(size);
        self
    }
}

/// Looks up symbols for addresses and immediates.
pub trait SymbolResolver {
    /// `operand` is the formatter operand, `instruction_operand` the instruction operand if
    /// there's one. `address_size` is the width of `address` in bytes.
    ///
    /// Called at most once per operand and formatting call, twice for far branches.
    fn symbol(
        &mut self,
        instruction: &Instruction,
        operand: u32,
        instruction_operand: Option<u32>,
        address: u64,
        address_size: u32,
    ) -> Option<SymbolResult>;
}

/// Resolvers can be plain closures.
impl<F> SymbolResolver for F
where
    F: FnMut(&Instruction, u32, Option<u32>, u64, u32) -> Option<SymbolResult>,
{
    fn symbol(
        &mut self,
        instruction: &Instruction,
        operand: u32,
        instruction_operand: Option<u32>,
        address: u64,
        address_size: u32,
    ) -> Option<SymbolResult> {
        self(instruction, operand, instruction_operand, address, address_size)
    }
}

/// Overrides number formatting of single operands.
pub trait FormatterOptionsProvider {
    /// Called once for every operand rendered as a number, before it's rendered.
    fn operand_options(
        &mut self,
        instruction: &Instruction,
        operand: u32,
        instruction_operand: Option<u32>,
        options: &mut NumberFormattingOptions<'_>,
    );
}
