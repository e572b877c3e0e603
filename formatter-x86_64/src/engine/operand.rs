//! Formatter operands other than memory.

use super::{Ctx, FmtOp, Layout};
use crate::dialect::RoundingStyle;
use crate::instruction::OpKind;
use crate::opcode::OpFlags;
use crate::options::Syntax;
use crate::symbol::SymbolFlags;
use tokenizing::TextKind;

impl<'a, 'o> Ctx<'a, 'o> {
    pub fn write_operand(&mut self, l: &Layout, operand: u32) {
        let op = match l.ops().get(operand as usize) {
            Some(op) => *op,
            None => return,
        };

        match op {
            FmtOp::Rounding => self.write_rounding(),
            FmtOp::Hint => {
                if let Some(hint) = l.hint {
                    self.write_decorator(hint);
                }
            }
            FmtOp::Data(idx) => self.write_data(operand, idx),
            FmtOp::Instr(idx) => {
                self.write_instruction_operand(l, operand, idx as u32);
                self.write_operand_decorators(l, idx);
            }
        }
    }

    fn write_rounding(&mut self) {
        match self.instr.rounding_control().decorator() {
            Some(rounding) => self.write_decorator(rounding),
            None if self.instr.suppress_all_exceptions() => self.write_decorator("sae"),
            None => {}
        }
    }

    fn write_data(&mut self, operand: u32, idx: u8) {
        let width = match self.instr.opcode().info().kind {
            crate::opcode::InfoKind::Data(width) => width,
            _ => return,
        };
        let value = self.instr.declared_element(idx as usize, width as usize);

        if let Some(symbol) = self.symbol(operand, None, value, width) {
            let leading_zeros = self.options.leading_zeros;
            return self.write_symbol(operand, None, &symbol, value, width, leading_zeros, true);
        }

        let leading_zeros = self.options.leading_zeros;
        self.write_number(operand, None, value, width, leading_zeros, false, TextKind::Number);
    }

    fn write_instruction_operand(&mut self, l: &Layout, operand: u32, idx: u32) {
        let kind = self.instr.op_kind(idx);

        if l.indirect && idx == 0 && matches!(kind, OpKind::Register | OpKind::Memory) {
            let prefix = self.d.indirect_prefix;
            if !prefix.is_empty() {
                self.write(prefix, TextKind::Operator);
            }
        }

        match kind {
            OpKind::Register => self.write_register(self.instr.op_register(idx)),
            OpKind::NearBranch16 | OpKind::NearBranch32 | OpKind::NearBranch64 => {
                self.write_near_branch(l, operand, idx, kind)
            }
            OpKind::FarBranch16 | OpKind::FarBranch32 => self.write_far_branch(l, operand, idx, kind),
            OpKind::Immediate8
            | OpKind::Immediate8_2nd
            | OpKind::Immediate16
            | OpKind::Immediate32
            | OpKind::Immediate64
            | OpKind::Immediate8to16
            | OpKind::Immediate8to32
            | OpKind::Immediate8to64
            | OpKind::Immediate32to64 => self.write_immediate(operand, idx, kind),
            _ => self.write_memory(l, operand, idx, kind),
        }
    }

    /// Opmask, zeroing, attached rounding and register swizzles.
    fn write_operand_decorators(&mut self, l: &Layout, idx: u8) {
        let instr = self.instr;

        if idx == 0 {
            let mask = instr.op_mask();
            if !mask.is_none() {
                self.write("{", TextKind::Punctuation);
                self.write_register(mask);
                self.write("}", TextKind::Punctuation);
            }

            if instr.zeroing_masking() {
                self.write_decorator("z");
            }
        }

        if l.last_register == Some(idx) {
            let conversion = instr.mvex_conversion();
            if conversion.is_swizzle() {
                if let Some(swizzle) = conversion.decorator() {
                    self.write_decorator(swizzle);
                }
            }
        }

        if self.d.rounding == RoundingStyle::Attached && l.attach_rounding == Some(idx) {
            self.write_rounding();
        }
    }

    fn write_near_branch(&mut self, l: &Layout, operand: u32, idx: u32, kind: OpKind) {
        let instr = self.instr;
        let (target, width) = match kind {
            OpKind::NearBranch16 => (instr.near_branch_target() as u16 as u64, 2),
            OpKind::NearBranch32 => (instr.near_branch_target() as u32 as u64, 4),
            _ => (instr.near_branch_target(), 8),
        };

        if let Some(short) = self.d.short_keyword {
            if self.options.show_branch_size && instr.is_short_branch() {
                self.write_keyword(short);
                self.write(" ", TextKind::Text);
            }
        }

        let text_kind = if l.flags.contains(OpFlags::CALL) {
            TextKind::FunctionAddress
        } else {
            TextKind::LabelAddress
        };

        let leading_zeros = self.options.branch_leading_zeros;
        if let Some(symbol) = self.symbol(operand, Some(idx), target, width) {
            return self.write_symbol(operand, Some(idx), &symbol, target, width, leading_zeros, true);
        }

        self.write_number(operand, Some(idx), target, width, leading_zeros, false, text_kind);
    }

    fn write_far_branch(&mut self, l: &Layout, operand: u32, idx: u32, kind: OpKind) {
        let instr = self.instr;
        let selector = instr.far_branch_selector() as u64;
        let (offset, width) = match kind {
            OpKind::FarBranch16 => (instr.far_branch_offset() as u16 as u64, 2),
            _ => (instr.far_branch_offset() as u64, 4),
        };

        let offset_kind = if l.flags.contains(OpFlags::CALL) {
            TextKind::FunctionAddress
        } else {
            TextKind::LabelAddress
        };
        let leading_zeros = self.options.branch_leading_zeros;
        let immediate_prefix = self.d.immediate_prefix;

        let offset_symbol = self.symbol(operand, Some(idx), offset, width);
        let selector_symbol = self.symbol(operand, Some(idx), selector, 2);

        if !immediate_prefix.is_empty() {
            self.write(immediate_prefix, TextKind::Operator);
        }
        match selector_symbol {
            Some(symbol) => {
                self.write_symbol(operand, Some(idx), &symbol, selector, 2, leading_zeros, true)
            }
            None => self.write_number(
                operand,
                Some(idx),
                selector,
                2,
                leading_zeros,
                false,
                TextKind::SelectorValue,
            ),
        }

        self.write(self.d.far_separator, TextKind::Punctuation);

        if !immediate_prefix.is_empty() {
            self.write(immediate_prefix, TextKind::Operator);
        }
        match offset_symbol {
            Some(symbol) => {
                self.write_symbol(operand, Some(idx), &symbol, offset, width, leading_zeros, true)
            }
            None => self.write_number(operand, Some(idx), offset, width, leading_zeros, false, offset_kind),
        }
    }

    fn write_immediate(&mut self, operand: u32, idx: u32, kind: OpKind) {
        let (value, width) = self.instr.immediate(idx);

        let immediate_prefix = self.d.immediate_prefix;
        if !immediate_prefix.is_empty() {
            self.write(immediate_prefix, TextKind::Operator);
        }

        if self.d.syntax == Syntax::Nasm
            && self.options.nasm_show_sign_extended_immediate_size
            && matches!(
                kind,
                OpKind::Immediate8to16 | OpKind::Immediate8to32 | OpKind::Immediate8to64
            )
        {
            self.write_keyword("byte");
            self.write(" ", TextKind::Text);
        }

        if let Some(symbol) = self.symbol(operand, Some(idx), value, width) {
            if let Some(offset) = self.d.offset_keyword {
                if !symbol.flags.contains(SymbolFlags::RELATIVE) {
                    self.write_keyword(offset);
                    self.write(" ", TextKind::Text);
                }
            }
            let leading_zeros = self.options.leading_zeros;
            return self.write_symbol(operand, Some(idx), &symbol, value, width, leading_zeros, true);
        }

        let leading_zeros = self.options.leading_zeros;
        let signed = self.options.signed_immediate_operands;
        self.write_number(operand, Some(idx), value, width, leading_zeros, signed, TextKind::Number);
    }
}
