//! The formatting engine shared by all syntaxes.
//!
//! Every public formatter is an [`Engine`] bound to a [`Dialect`]. A call computes the
//! [`Layout`] of the instruction and then walks it, writing fragments through a [`Ctx`].

mod layout;
mod memory;
mod mnemonic;
mod operand;

use crate::dialect::Dialect;
use crate::instruction::Instruction;
use crate::options::FormatterOptions;
use crate::register::Register;
use crate::symbol::{FormatterOptionsProvider, SymbolResolver, SymbolResult};
use crate::FormatMnemonicOptions;
use formatter::{Error, FormatterOutput, NumberFormatter, NumberKind};
use tokenizing::TextKind;

pub(crate) use layout::{layout, FmtOp, Layout};

/// Column index after which operands are never padded further.
const MAX_OPERAND_COLUMN: usize = 256;

pub(crate) struct Engine {
    dialect: &'static Dialect,
    pub options: FormatterOptions,
    pub resolver: Option<Box<dyn SymbolResolver>>,
    pub provider: Option<Box<dyn FormatterOptionsProvider>>,
    numbers: NumberFormatter,
    scratch: String,
}

impl Engine {
    pub fn new(dialect: &'static Dialect, options: FormatterOptions) -> Self {
        Self {
            dialect,
            options,
            resolver: None,
            provider: None,
            numbers: NumberFormatter::new(),
            scratch: String::with_capacity(32),
        }
    }

    fn ctx<'a, 'o>(
        &'a mut self,
        instr: &'a Instruction,
        out: &'a mut (dyn FormatterOutput + 'o),
    ) -> Ctx<'a, 'o> {
        let Engine {
            dialect,
            options,
            resolver,
            provider,
            numbers,
            scratch,
        } = self;

        Ctx {
            d: *dialect,
            options,
            instr,
            resolver: resolver.as_deref_mut(),
            provider: provider.as_deref_mut(),
            numbers,
            scratch,
            out,
            column: 0,
        }
    }

    pub fn format(&mut self, instr: &Instruction, out: &mut dyn FormatterOutput) {
        let l = layout(self.dialect, &self.options, instr);
        let mut ctx = self.ctx(instr, out);

        ctx.write_mnemonic(&l, FormatMnemonicOptions::empty());
        if l.count() == 0 {
            return;
        }

        ctx.pad_to_operands();
        for operand in 0..l.count() {
            if operand != 0 {
                ctx.write_separator();
            }
            ctx.write_operand(&l, operand);
        }
    }

    pub fn format_mnemonic(
        &mut self,
        instr: &Instruction,
        out: &mut dyn FormatterOutput,
        options: FormatMnemonicOptions,
    ) {
        let l = layout(self.dialect, &self.options, instr);
        self.ctx(instr, out).write_mnemonic(&l, options);
    }

    pub fn operand_count(&self, instr: &Instruction) -> u32 {
        layout(self.dialect, &self.options, instr).count()
    }

    pub fn format_operand(
        &mut self,
        instr: &Instruction,
        out: &mut dyn FormatterOutput,
        operand: u32,
    ) -> Result<(), Error> {
        let l = layout(self.dialect, &self.options, instr);
        if operand >= l.count() {
            return Err(Error::InvalidOperand {
                index: operand,
                count: l.count(),
            });
        }

        self.ctx(instr, out).write_operand(&l, operand);
        Ok(())
    }

    pub fn format_operand_separator(&mut self, instr: &Instruction, out: &mut dyn FormatterOutput) {
        self.ctx(instr, out).write_separator();
    }

    pub fn format_all_operands(&mut self, instr: &Instruction, out: &mut dyn FormatterOutput) {
        let l = layout(self.dialect, &self.options, instr);
        let mut ctx = self.ctx(instr, out);
        for operand in 0..l.count() {
            if operand != 0 {
                ctx.write_separator();
            }
            ctx.write_operand(&l, operand);
        }
    }

    pub fn instruction_operand(&self, instr: &Instruction, operand: u32) -> Result<Option<u32>, Error> {
        let l = layout(self.dialect, &self.options, instr);
        if operand >= l.count() {
            return Err(Error::InvalidOperand {
                index: operand,
                count: l.count(),
            });
        }

        Ok(l.instruction_operand(operand))
    }

    pub fn formatter_operand(
        &self,
        instr: &Instruction,
        instruction_operand: u32,
    ) -> Result<Option<u32>, Error> {
        if instruction_operand >= instr.op_count() {
            return Err(Error::InvalidInstructionOperand {
                index: instruction_operand,
                count: instr.op_count(),
            });
        }

        let l = layout(self.dialect, &self.options, instr);
        Ok(l.formatter_operand(instruction_operand))
    }

    pub fn format_register(&mut self, reg: Register) -> &str {
        let upper = self.options.uppercase_registers || self.options.uppercase_all;
        self.scratch.clear();
        if !self.options.gas_naked_registers {
            self.scratch.push_str(self.dialect.register_prefix);
        }
        self.scratch.push_str(register_name(self.dialect, &self.options, reg));
        if upper {
            self.scratch.make_ascii_uppercase();
        }
        &self.scratch
    }

    /// Renders a value with the immediate number options of this formatter.
    pub fn format_number(&mut self, value: u64, kind: NumberKind) -> &str {
        let opts = self
            .options
            .number_options_with(self.options.leading_zeros, kind.is_signed());
        let (negative, text) = self.numbers.format_kind(&opts, value, kind);

        self.scratch.clear();
        if negative {
            self.scratch.push('-');
        }
        self.scratch.push_str(text);
        &self.scratch
    }
}

/// Name of a register without any prefix or case changes.
pub(crate) fn register_name(d: &Dialect, options: &FormatterOptions, reg: Register) -> &'static str {
    if reg.class() == crate::register::RegisterClass::ST {
        if d.plain_st_names {
            return reg.plain_st_name();
        }

        if reg == Register::st0() && !options.prefer_st0 {
            return "st";
        }
    }

    reg.name()
}

/// State of one formatting call.
pub(crate) struct Ctx<'a, 'o> {
    pub d: &'static Dialect,
    pub options: &'a FormatterOptions,
    pub instr: &'a Instruction,
    resolver: Option<&'a mut (dyn SymbolResolver + 'static)>,
    provider: Option<&'a mut (dyn FormatterOptionsProvider + 'static)>,
    numbers: &'a mut NumberFormatter,
    scratch: &'a mut String,
    out: &'a mut (dyn FormatterOutput + 'o),
    /// Characters written so far.
    column: usize,
}

impl<'a, 'o> Ctx<'a, 'o> {
    pub fn write(&mut self, text: &str, kind: TextKind) {
        self.column += text.chars().count();
        self.out.write(text, kind);
    }

    /// Writes `text`, uppercased if `upper` is set.
    pub fn write_cased(&mut self, text: &str, kind: TextKind, upper: bool) {
        if !upper {
            return self.write(text, kind);
        }

        self.scratch.clear();
        self.scratch.push_str(text);
        self.scratch.make_ascii_uppercase();
        self.column += self.scratch.chars().count();
        self.out.write(self.scratch.as_str(), kind);
    }

    pub fn write_keyword(&mut self, keyword: &str) {
        let upper = self.options.uppercase_keywords || self.options.uppercase_all;
        self.write_cased(keyword, TextKind::Keyword, upper);
    }

    /// `{text}`
    pub fn write_decorator(&mut self, text: &str) {
        let upper = self.options.uppercase_decorators || self.options.uppercase_all;
        self.write("{", TextKind::Punctuation);
        self.write_cased(text, TextKind::Decorator, upper);
        self.write("}", TextKind::Punctuation);
    }

    pub fn write_register(&mut self, reg: Register) {
        let upper = self.options.uppercase_registers || self.options.uppercase_all;

        self.scratch.clear();
        if !self.options.gas_naked_registers {
            self.scratch.push_str(self.d.register_prefix);
        }
        self.scratch.push_str(register_name(self.d, self.options, reg));
        if upper {
            self.scratch.make_ascii_uppercase();
        }

        self.column += self.scratch.chars().count();
        self.out.write(self.scratch.as_str(), TextKind::Register);
    }

    pub fn write_separator(&mut self) {
        self.write(",", TextKind::Punctuation);
        if self.options.space_after_operand_separator {
            self.write(" ", TextKind::Text);
        }
    }

    /// Pads the mnemonic column up to where operands start.
    fn pad_to_operands(&mut self) {
        let first = (self.options.first_operand_char_index as usize).min(MAX_OPERAND_COLUMN);
        let tab_size = self.options.tab_size as usize;

        if tab_size == 0 {
            let spaces = first.saturating_sub(self.column).max(1);
            for _ in 0..spaces {
                self.write(" ", TextKind::Text);
            }
            return;
        }

        let target = first.max(self.column + 1);
        let mut column = self.column;
        while column < target {
            self.write("\t", TextKind::Text);
            column = (column / tab_size + 1) * tab_size;
        }
        self.column = column;
    }

    /// Queries the symbol resolver, if any.
    pub fn symbol(
        &mut self,
        operand: u32,
        instruction_operand: Option<u32>,
        address: u64,
        address_size: u8,
    ) -> Option<SymbolResult> {
        let resolver = self.resolver.as_mut()?;
        resolver.symbol(
            self.instr,
            operand,
            instruction_operand,
            address,
            address_size as u32,
        )
    }

    /// Writes a number, letting the options provider adjust it first.
    ///
    /// `signed` shows the value as sign and magnitude of a `width`-byte integer.
    pub fn write_number(
        &mut self,
        operand: u32,
        instruction_operand: Option<u32>,
        value: u64,
        width: u8,
        leading_zeros: bool,
        signed: bool,
        kind: TextKind,
    ) {
        let options: &'a FormatterOptions = self.options;
        let mut opts = options.number_options_with(leading_zeros, signed);
        if let Some(provider) = self.provider.as_mut() {
            provider.operand_options(self.instr, operand, instruction_operand, &mut opts);
        }

        let (negative, text) =
            self.numbers
                .format_kind(&opts, value, NumberKind::from_width(width, true));

        if negative {
            self.column += 1;
            self.out.write("-", TextKind::Operator);
        }

        self.column += text.chars().count();
        self.out.write(text, kind);
    }

    /// Writes a resolved symbol with the distance of `value` from it.
    ///
    /// `leading_sign` writes the `-` of signed symbols, memory operands write their own
    /// operator instead. `leading_zeros` applies to the address shown after the symbol.
    pub fn write_symbol(
        &mut self,
        operand: u32,
        instruction_operand: Option<u32>,
        symbol: &SymbolResult,
        value: u64,
        width: u8,
        leading_zeros: bool,
        leading_sign: bool,
    ) {
        use crate::symbol::SymbolFlags;
        use formatter::{sign_magnitude, truncate};

        let signed = symbol.flags.contains(SymbolFlags::SIGNED);
        if signed && leading_sign {
            self.write("-", TextKind::Operator);
        }

        for part in symbol.text.iter() {
            self.write(&part.text, part.kind);
        }

        let target = if signed { value.wrapping_neg() } else { value };
        let distance = truncate(target.wrapping_sub(symbol.address), width);
        let (negative, magnitude) = sign_magnitude(distance, width);
        if magnitude != 0 {
            let op = if negative != signed { "-" } else { "+" };
            self.write(op, TextKind::Operator);
            self.write_number(
                operand,
                instruction_operand,
                magnitude,
                width,
                false,
                false,
                TextKind::Number,
            );
        }

        if self.options.show_symbol_address {
            self.write(" ", TextKind::Text);
            self.write("(", TextKind::Punctuation);
            self.write_number(
                operand,
                instruction_operand,
                value,
                width,
                leading_zeros,
                false,
                TextKind::Number,
            );
            self.write(")", TextKind::Punctuation);
        }
    }
}
