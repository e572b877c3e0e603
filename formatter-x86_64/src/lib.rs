//! # x86 instruction formatters
//!
//! Renders decoded x86 instructions as text in one of four syntaxes:
//! * [`MasmFormatter`]: intel syntax as written by masm, `mov rcx,[rax+rdx*8-80h]`
//! * [`NasmFormatter`]: intel syntax as written by nasm, `mov rcx,[rax+rdx*8-80h]`
//! * [`GasFormatter`]: at&t syntax as written by the gnu assembler, `mov -0x80(%rax,%rdx,8),%rcx`
//! * [`FastFormatter`]: masm-like syntax with a reduced option set
//!
//! All of them write typed fragments to a [`FormatterOutput`], which is how callers apply
//! syntax highlighting:
//!
//! ```
//! use x86_64::{CodeSize, Formatter, Instruction, MasmFormatter, MemoryOperand, MemorySize, Opcode, Register};
//!
//! let instr = Instruction::new(CodeSize::Code64, Opcode::Mov)
//!     .with_register(Register::rcx())
//!     .with_memory(MemoryOperand::new(Register::rax(), Register::rdx(), 8, -0x80, 1, MemorySize::Qword));
//!
//! let mut output = String::new();
//! MasmFormatter::new().format(&instr, &mut output);
//! assert_eq!(output, "mov rcx,[rax+rdx*8-80h]");
//! ```

mod dialect;
mod engine;
mod instruction;
mod opcode;
mod options;
mod register;
mod symbol;

mod fast;
mod gas;
mod masm;
mod nasm;

#[cfg(test)]
mod tests;

pub use fast::FastFormatter;
pub use formatter::{
    Error, FormatterOutput, NumberBase, NumberFormattingOptions, NumberKind, TokenStream,
};
pub use gas::GasFormatter;
pub use instruction::{
    CodeSize, Instruction, MemoryOperand, MemorySize, MvexConversion, OpKind, Prefixes,
    RoundingControl,
};
pub use masm::MasmFormatter;
pub use nasm::NasmFormatter;
pub use opcode::{OpFlags, Opcode};
pub use options::{
    CcA, CcAe, CcB, CcBe, CcE, CcG, CcGe, CcL, CcLe, CcNe, CcNp, CcP, FastFormatterOptions,
    FormatterOptions, MemorySizeOptions, Syntax,
};
pub use register::{Register, RegisterClass};
pub use symbol::{
    FormatterOptionsProvider, SymResTextPart, SymbolFlags, SymbolResolver, SymbolResult,
};

bitflags::bitflags! {
    /// What [`Formatter::format_mnemonic_options`] leaves out.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct FormatMnemonicOptions: u8 {
        const NO_PREFIXES = 1 << 0;
        const NO_MNEMONIC = 1 << 1;
    }
}

/// An instruction formatter.
///
/// Formatter operands are what a formatter shows and can differ from the instruction's
/// operands: at&t syntax reverses them, pseudo-ops drop an immediate and some syntaxes show
/// rounding or branch hints as operands of their own. [`Formatter::instruction_operand`] and
/// [`Formatter::formatter_operand`] map between the two.
pub trait Formatter {
    fn options(&self) -> &FormatterOptions;

    fn options_mut(&mut self) -> &mut FormatterOptions;

    /// Formats the whole instruction: prefixes, mnemonic and operands.
    fn format(&mut self, instruction: &Instruction, output: &mut dyn FormatterOutput);

    /// Formats prefixes and mnemonic.
    fn format_mnemonic(&mut self, instruction: &Instruction, output: &mut dyn FormatterOutput) {
        self.format_mnemonic_options(instruction, output, FormatMnemonicOptions::empty());
    }

    fn format_mnemonic_options(
        &mut self,
        instruction: &Instruction,
        output: &mut dyn FormatterOutput,
        options: FormatMnemonicOptions,
    );

    /// Number of formatter operands.
    fn operand_count(&mut self, instruction: &Instruction) -> u32;

    /// Formats formatter operand `operand`.
    ///
    /// # Errors
    /// [`Error::InvalidOperand`] if `operand` isn't below [`Formatter::operand_count`].
    fn format_operand(
        &mut self,
        instruction: &Instruction,
        output: &mut dyn FormatterOutput,
        operand: u32,
    ) -> Result<(), Error>;

    /// Formats the separator between two operands.
    fn format_operand_separator(&mut self, instruction: &Instruction, output: &mut dyn FormatterOutput);

    /// Formats all operands, without the mnemonic.
    fn format_all_operands(&mut self, instruction: &Instruction, output: &mut dyn FormatterOutput);

    /// Instruction operand shown by formatter operand `operand`, `None` if the formatter made
    /// it up.
    ///
    /// # Errors
    /// [`Error::InvalidOperand`] if `operand` isn't below [`Formatter::operand_count`].
    fn instruction_operand(
        &mut self,
        instruction: &Instruction,
        operand: u32,
    ) -> Result<Option<u32>, Error>;

    /// Formatter operand showing instruction operand `instruction_operand`, `None` if it
    /// isn't shown.
    ///
    /// # Errors
    /// [`Error::InvalidInstructionOperand`] if the instruction has no such operand.
    fn formatter_operand(
        &mut self,
        instruction: &Instruction,
        instruction_operand: u32,
    ) -> Result<Option<u32>, Error>;

    /// Register name as this formatter writes it.
    fn format_register(&mut self, register: Register) -> &str;

    fn format_i8(&mut self, value: i8) -> &str;
    fn format_i16(&mut self, value: i16) -> &str;
    fn format_i32(&mut self, value: i32) -> &str;
    fn format_i64(&mut self, value: i64) -> &str;
    fn format_u8(&mut self, value: u8) -> &str;
    fn format_u16(&mut self, value: u16) -> &str;
    fn format_u32(&mut self, value: u32) -> &str;
    fn format_u64(&mut self, value: u64) -> &str;
}

/// Implements [`Formatter`] for a newtype with an `engine` field.
macro_rules! impl_formatter {
    ($name:ident) => {
        impl $crate::Formatter for $name {
            #[inline]
            fn options(&self) -> &$crate::FormatterOptions {
                &self.engine.options
            }

            #[inline]
            fn options_mut(&mut self) -> &mut $crate::FormatterOptions {
                &mut self.engine.options
            }

            fn format(
                &mut self,
                instruction: &$crate::Instruction,
                output: &mut dyn $crate::FormatterOutput,
            ) {
                self.engine.format(instruction, output);
            }

            fn format_mnemonic_options(
                &mut self,
                instruction: &$crate::Instruction,
                output: &mut dyn $crate::FormatterOutput,
                options: $crate::FormatMnemonicOptions,
            ) {
                self.engine.format_mnemonic(instruction, output, options);
            }

            fn operand_count(&mut self, instruction: &$crate::Instruction) -> u32 {
                self.engine.operand_count(instruction)
            }

            fn format_operand(
                &mut self,
                instruction: &$crate::Instruction,
                output: &mut dyn $crate::FormatterOutput,
                operand: u32,
            ) -> Result<(), $crate::Error> {
                self.engine.format_operand(instruction, output, operand)
            }

            fn format_operand_separator(
                &mut self,
                instruction: &$crate::Instruction,
                output: &mut dyn $crate::FormatterOutput,
            ) {
                self.engine.format_operand_separator(instruction, output);
            }

            fn format_all_operands(
                &mut self,
                instruction: &$crate::Instruction,
                output: &mut dyn $crate::FormatterOutput,
            ) {
                self.engine.format_all_operands(instruction, output);
            }

            fn instruction_operand(
                &mut self,
                instruction: &$crate::Instruction,
                operand: u32,
            ) -> Result<Option<u32>, $crate::Error> {
                self.engine.instruction_operand(instruction, operand)
            }

            fn formatter_operand(
                &mut self,
                instruction: &$crate::Instruction,
                instruction_operand: u32,
            ) -> Result<Option<u32>, $crate::Error> {
                self.engine.formatter_operand(instruction, instruction_operand)
            }

            fn format_register(&mut self, register: $crate::Register) -> &str {
                self.engine.format_register(register)
            }

            fn format_i8(&mut self, value: i8) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::Int8)
            }

            fn format_i16(&mut self, value: i16) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::Int16)
            }

            fn format_i32(&mut self, value: i32) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::Int32)
            }

            fn format_i64(&mut self, value: i64) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::Int64)
            }

            fn format_u8(&mut self, value: u8) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::UInt8)
            }

            fn format_u16(&mut self, value: u16) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::UInt16)
            }

            fn format_u32(&mut self, value: u32) -> &str {
                self.engine.format_number(value as u64, $crate::NumberKind::UInt32)
            }

            fn format_u64(&mut self, value: u64) -> &str {
                self.engine.format_number(value, $crate::NumberKind::UInt64)
            }
        }
    };
}

pub(crate) use impl_formatter;

/// Creates the formatter of a syntax with its default options.
pub fn formatter_for(syntax: Syntax) -> Box<dyn Formatter> {
    match syntax {
        Syntax::Masm => Box::new(MasmFormatter::new()),
        Syntax::Nasm => Box::new(NasmFormatter::new()),
        Syntax::Gas => Box::new(GasFormatter::new()),
        Syntax::Fast => Box::new(FastFormatter::new()),
    }
}

/// Creates the formatter of a syntax with the given options.
pub fn formatter_with_options(syntax: Syntax, options: FormatterOptions) -> Box<dyn Formatter> {
    match syntax {
        Syntax::Masm => Box::new(MasmFormatter::with_options(options)),
        Syntax::Nasm => Box::new(NasmFormatter::with_options(options)),
        Syntax::Gas => Box::new(GasFormatter::with_options(options)),
        Syntax::Fast => Box::new(FastFormatter::with_formatter_options(options)),
    }
}
