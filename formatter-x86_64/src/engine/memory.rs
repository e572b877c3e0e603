//! Memory operands, in intel `size ptr seg:[base+index*scale+displ]` and at&t
//! `seg:displ(base,index,scale)` form.

use super::{Ctx, Layout};
use crate::instruction::{CodeSize, Instruction, OpKind};
use crate::opcode::OpFlags;
use crate::options::{FormatterOptions, MemorySizeOptions};
use crate::register::Register;
use crate::symbol::{SymbolFlags, SymbolResult};
use formatter::{sign_magnitude, truncate};
use tokenizing::TextKind;

/// Address computation of one memory operand.
#[derive(Debug, Clone, Copy)]
struct Address {
    base: Register,
    index: Register,
    scale: u8,
    displ: u64,
    displ_size: u8,
    addr_size: u8,
    /// `rip`-relative operand shown with its target address.
    absolute: bool,
}

impl Address {
    fn of(instr: &Instruction, kind: OpKind) -> Self {
        let implicit = |base: Register, addr_size: u8| Address {
            base,
            index: Register::NONE,
            scale: 1,
            displ: 0,
            displ_size: 0,
            addr_size,
            absolute: false,
        };

        match kind {
            OpKind::MemorySegSI => implicit(Register::w(6), 2),
            OpKind::MemorySegESI => implicit(Register::d(6), 4),
            OpKind::MemorySegRSI => implicit(Register::q(6), 8),
            OpKind::MemorySegDI | OpKind::MemoryESDI => implicit(Register::w(7), 2),
            OpKind::MemorySegEDI | OpKind::MemoryESEDI => implicit(Register::d(7), 4),
            OpKind::MemorySegRDI | OpKind::MemoryESRDI => implicit(Register::q(7), 8),
            _ => {
                let mem = instr.memory();
                Address {
                    base: mem.base,
                    index: mem.index,
                    scale: mem.scale,
                    displ: mem.displacement as u64,
                    displ_size: mem.displ_size,
                    addr_size: address_size(instr),
                    absolute: false,
                }
            }
        }
    }

    fn has_registers(&self) -> bool {
        !self.base.is_none() || !self.index.is_none()
    }

    fn show_scale(&self, options: &FormatterOptions) -> bool {
        self.scale != 1 || options.always_show_scale || self.base.is_none()
    }

    /// Sign, magnitude and width of the displacement, `None` if it isn't shown.
    fn displacement(&self, options: &FormatterOptions) -> Option<(bool, u64, u8)> {
        let value = truncate(self.displ, self.addr_size);

        if !self.has_registers() {
            return Some((false, value, self.addr_size));
        }

        if value == 0 && !(options.show_zero_displacements && self.displ_size != 0) {
            return None;
        }

        if options.signed_memory_displacements && !self.absolute {
            let (negative, magnitude) = sign_magnitude(value, self.addr_size);
            let width = match self.displ_size {
                0 => self.addr_size,
                size => size.min(self.addr_size),
            };
            Some((negative, magnitude, width))
        } else {
            Some((false, value, self.addr_size))
        }
    }
}

/// Address size of the explicit memory operand.
fn address_size(instr: &Instruction) -> u8 {
    let mem = instr.memory();

    if mem.base == Register::RIP {
        8
    } else if mem.base == Register::eip() {
        4
    } else if mem.base.is_gp() {
        mem.base.width()
    } else if mem.index.is_gp() {
        mem.index.width()
    } else if mem.displ_size == 8 {
        8
    } else {
        instr.code_size().address_size()
    }
}

fn scale_text(scale: u8) -> &'static str {
    match scale {
        2 => "2",
        4 => "4",
        8 => "8",
        _ => "1",
    }
}

fn broadcast_text(elements: u8) -> Option<&'static str> {
    Some(match elements {
        2 => "1to2",
        4 => "1to4",
        8 => "1to8",
        16 => "1to16",
        32 => "1to32",
        _ => return None,
    })
}

impl<'a, 'o> Ctx<'a, 'o> {
    pub fn write_memory(&mut self, l: &Layout, operand: u32, idx: u32, kind: OpKind) {
        let instr = self.instr;
        let options = self.options;
        let d = self.d;
        let mut addr = Address::of(instr, kind);
        let mut symbol = None;

        if addr.base.is_instruction_pointer() {
            let width = addr.addr_size;
            let target = truncate(instr.next_ip().wrapping_add(addr.displ), width);
            symbol = self.symbol(operand, Some(idx), target, width);

            if symbol.is_some() || !options.rip_relative_addresses {
                addr.absolute = true;
                addr.displ = target;
                addr.displ_size = width;
                if !d.keep_rip_base {
                    addr.base = Register::NONE;
                }
            }
        } else if kind == OpKind::Memory && (addr.displ_size != 0 || !addr.has_registers()) {
            let address = truncate(addr.displ, addr.addr_size);
            symbol = self.symbol(operand, Some(idx), address, addr.addr_size);
        }

        let segment = self.memory_segment(l, kind, &addr, symbol.is_some());

        if d.att_memory {
            self.write_att_memory(operand, idx, &addr, segment, symbol.as_ref());
        } else {
            self.write_intel_memory(l, operand, idx, &addr, segment, symbol.as_ref());
        }

        self.write_memory_decorators();
    }

    fn memory_segment(&self, l: &Layout, kind: OpKind, addr: &Address, has_symbol: bool) -> Register {
        let instr = self.instr;
        let options = self.options;

        if matches!(kind, OpKind::MemoryESDI | OpKind::MemoryESEDI | OpKind::MemoryESRDI) {
            let show = self.d.att_memory
                || instr.code_size() != CodeSize::Code64
                || options.always_show_segment_register;
            return if show { Register::es() } else { Register::NONE };
        }

        let prefix = instr.segment_prefix();
        if !prefix.is_none() && !l.segment_consumed {
            return prefix;
        }

        if options.always_show_segment_register {
            return instr.default_segment(kind);
        }

        let ds32 = self.d.ds_prefix32
            && options.masm_add_ds_prefix32
            && instr.code_size() == CodeSize::Code32
            && kind == OpKind::Memory
            && !addr.has_registers()
            && !has_symbol;
        if ds32 {
            Register::ds()
        } else {
            Register::NONE
        }
    }

    /// `size ptr` keyword of intel syntax, if it should be shown.
    fn memory_size_keyword(&self, l: &Layout, symbol: Option<&SymbolResult>) -> Option<&'static str> {
        let instr = self.instr;
        let size = instr.memory_size();
        let keyword = (self.d.size_keywords)(size)?;
        let policy = self.options.memory_size_options;

        if l.flags.contains(OpFlags::MEM_SIZE_IGNORED) && policy != MemorySizeOptions::Always {
            return None;
        }

        let symbol_sized = symbol
            .and_then(|symbol| symbol.symbol_size)
            .map_or(false, |symbol_size| symbol_size.size() == size.size());

        let mut registers = (0..instr.op_count())
            .map(|idx| instr.op_register(idx))
            .filter(|reg| !reg.is_none());

        let forced = instr.is_broadcast() || l.flags.contains(OpFlags::FORCE_MEM_SIZE);
        let show = match policy {
            MemorySizeOptions::Always => true,
            MemorySizeOptions::Never => false,
            MemorySizeOptions::Default => {
                !symbol_sized
                    && (forced
                        || size.is_far_pointer()
                        || !registers.any(|reg| reg.width() == size.size()))
            }
            MemorySizeOptions::Minimum => !symbol_sized && (forced || registers.next().is_none()),
        };

        show.then_some(keyword)
    }

    fn write_memory_operator(&mut self, op: &str, spaced: bool) {
        if spaced {
            self.write(" ", TextKind::Text);
        }
        self.write(op, TextKind::Operator);
        if spaced {
            self.write(" ", TextKind::Text);
        }
    }

    fn write_intel_memory(
        &mut self,
        l: &Layout,
        operand: u32,
        idx: u32,
        addr: &Address,
        segment: Register,
        symbol: Option<&SymbolResult>,
    ) {
        let instr = self.instr;
        let options = self.options;
        let d = self.d;

        if let Some(keyword) = self.memory_size_keyword(l, symbol) {
            self.write_keyword(keyword);
            self.write(" ", TextKind::Text);

            match (instr.is_broadcast(), d.broadcast_keyword, d.ptr_keyword) {
                (true, Some(bcst), _) => {
                    self.write_keyword(bcst);
                    self.write(" ", TextKind::Text);
                }
                (_, _, Some(ptr)) => {
                    self.write_keyword(ptr);
                    self.write(" ", TextKind::Text);
                }
                _ => {}
            }
        }

        if !segment.is_none() && !d.segment_in_brackets {
            self.write_register(segment);
            self.write(":", TextKind::Punctuation);
        }

        let outside = d.displ_outside_brackets
            && addr.has_registers()
            && match symbol {
                Some(_) => !options.masm_symbol_displ_in_brackets,
                None => !options.masm_displ_in_brackets,
            };

        if outside {
            self.write_displacement(operand, idx, addr, symbol, false);
        }

        self.write("[", TextKind::Punctuation);
        if options.space_after_memory_bracket {
            self.write(" ", TextKind::Text);
        }

        if addr.absolute && addr.base.is_none() {
            if let Some(rel) = d.rel_keyword {
                self.write_keyword(rel);
                self.write(" ", TextKind::Text);
            }
        }

        if !segment.is_none() && d.segment_in_brackets {
            self.write_register(segment);
            self.write(":", TextKind::Punctuation);
        }

        let add_spaced = options.space_between_memory_add_operators;
        let mul_spaced = options.space_between_memory_mul_operators;
        let mut need_plus = false;

        if !addr.base.is_none() {
            self.write_register(addr.base);
            need_plus = true;
        }

        if !addr.index.is_none() {
            if need_plus {
                self.write_memory_operator("+", add_spaced);
            }

            let show_scale = addr.show_scale(options);
            if show_scale && options.scale_before_index {
                self.write(scale_text(addr.scale), TextKind::Number);
                self.write_memory_operator("*", mul_spaced);
                self.write_register(addr.index);
            } else {
                self.write_register(addr.index);
                if show_scale {
                    self.write_memory_operator("*", mul_spaced);
                    self.write(scale_text(addr.scale), TextKind::Number);
                }
            }
            need_plus = true;
        }

        if !outside {
            self.write_displacement(operand, idx, addr, symbol, need_plus);
        }

        if options.space_after_memory_bracket {
            self.write(" ", TextKind::Text);
        }
        self.write("]", TextKind::Punctuation);
    }

    /// Writes the symbol or displacement term, `after_register` writes it as `+displ`.
    fn write_displacement(
        &mut self,
        operand: u32,
        idx: u32,
        addr: &Address,
        symbol: Option<&SymbolResult>,
        after_register: bool,
    ) {
        let spaced = self.options.space_between_memory_add_operators;
        let value = truncate(addr.displ, addr.addr_size);

        if let Some(symbol) = symbol {
            if after_register {
                let op = if symbol.flags.contains(SymbolFlags::SIGNED) { "-" } else { "+" };
                self.write_memory_operator(op, spaced);
            }
            let leading_zeros = self.options.leading_zeros;
            return self.write_symbol(
                operand,
                Some(idx),
                symbol,
                value,
                addr.addr_size,
                leading_zeros,
                !after_register,
            );
        }

        if let Some((negative, magnitude, width)) = addr.displacement(self.options) {
            if after_register {
                self.write_memory_operator(if negative { "-" } else { "+" }, spaced);
            } else if negative {
                self.write("-", TextKind::Operator);
            }

            let leading_zeros = self.options.displacement_leading_zeros;
            self.write_number(
                operand,
                Some(idx),
                magnitude,
                width,
                leading_zeros,
                false,
                TextKind::Number,
            );
        }
    }

    fn write_att_memory(
        &mut self,
        operand: u32,
        idx: u32,
        addr: &Address,
        segment: Register,
        symbol: Option<&SymbolResult>,
    ) {
        let options = self.options;

        if !segment.is_none() {
            self.write_register(segment);
            self.write(":", TextKind::Punctuation);
        }

        self.write_displacement(operand, idx, addr, symbol, false);

        if !addr.has_registers() {
            return;
        }

        let comma = |ctx: &mut Self| {
            ctx.write(",", TextKind::Punctuation);
            if options.gas_space_after_memory_operand_comma {
                ctx.write(" ", TextKind::Text);
            }
        };

        self.write("(", TextKind::Punctuation);
        if !addr.base.is_none() {
            self.write_register(addr.base);
        }

        if !addr.index.is_none() {
            comma(self);
            self.write_register(addr.index);
            if addr.show_scale(options) {
                comma(self);
                self.write(scale_text(addr.scale), TextKind::Number);
            }
        }
        self.write(")", TextKind::Punctuation);
    }

    /// `{1toN}`, memory conversions and `{eh}`.
    fn write_memory_decorators(&mut self) {
        let instr = self.instr;

        if instr.is_broadcast() && self.d.broadcast_keyword.is_none() {
            let element = instr.memory_size().size().max(1);
            let vector = (0..instr.op_count())
                .map(|idx| instr.op_register(idx))
                .filter(|reg| reg.is_vector())
                .map(|reg| reg.width())
                .max()
                .unwrap_or(16);

            if let Some(text) = broadcast_text(vector / element) {
                self.write_decorator(text);
            }
        }

        let conversion = instr.mvex_conversion();
        if !conversion.is_swizzle() {
            if let Some(text) = conversion.decorator() {
                self.write_decorator(text);
            }
        }

        if instr.eviction_hint() {
            self.write_decorator("eh");
        }
    }
}
