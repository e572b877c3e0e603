//! Decides mnemonic text and the formatter operands of one instruction.
//!
//! Formatter operands can differ from instruction operands: pseudo-ops drop the predicate
//! immediate, at&t syntax reverses the order, string instructions may hide their implicit
//! operands and some dialects add rounding or branch hint operands.

use crate::dialect::{Dialect, HintStyle, RoundingStyle, StringForm};
use crate::instruction::{Instruction, OpKind};
use crate::opcode::{pclmul_index, InfoKind, OpFlags, Opcode};
use crate::options::{FormatterOptions, Syntax};
use crate::register::Register;
use tokenizing::TextKind;

/// At most five instruction operands plus a rounding and a hint operand, or 16 data elements.
const MAX_OPERANDS: usize = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum FmtOp {
    /// An operand of the instruction.
    Instr(u8),
    /// `{rn-sae}` as an operand of its own.
    Rounding,
    /// `{ht}`/`{hnt}` as an operand of its own.
    Hint,
    /// Element of a data directive.
    Data(u8),
}

#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub mnemonic: &'static str,
    pub mnemonic_kind: TextKind,
    /// at&t size suffix appended to the mnemonic.
    pub suffix: Option<&'static str>,
    /// `,pt`/`,pn` appended to the mnemonic.
    pub mnemonic_hint: Option<&'static str>,
    /// `ht`/`hnt` shown as a prefix or operand.
    pub hint: Option<&'static str>,
    pub notrack: bool,
    /// The segment override was turned into a hint or `notrack`.
    pub segment_consumed: bool,
    /// String instruction shown without its memory operands.
    pub hidden_memory: bool,
    /// at&t `*` in front of the branch target.
    pub indirect: bool,
    /// Instruction operand receiving an attached rounding decorator.
    pub attach_rounding: Option<u8>,
    /// Last register operand of the instruction, in intel order.
    pub last_register: Option<u8>,
    pub flags: OpFlags,
    ops: [FmtOp; MAX_OPERANDS],
    count: u8,
}

impl Layout {
    pub fn ops(&self) -> &[FmtOp] {
        &self.ops[..self.count as usize]
    }

    pub fn count(&self) -> u32 {
        self.count as u32
    }

    fn push(&mut self, op: FmtOp) {
        self.ops[self.count as usize] = op;
        self.count += 1;
    }

    fn insert(&mut self, at: usize, op: FmtOp) {
        let count = self.count as usize;
        self.ops.copy_within(at..count, at + 1);
        self.ops[at] = op;
        self.count += 1;
    }

    fn pop(&mut self) {
        self.count -= 1;
    }

    fn clear(&mut self) {
        self.count = 0;
    }

    /// Instruction operand shown at formatter operand `operand`.
    pub fn instruction_operand(&self, operand: u32) -> Option<u32> {
        match self.ops().get(operand as usize) {
            Some(FmtOp::Instr(idx)) => Some(*idx as u32),
            _ => None,
        }
    }

    /// Formatter operand showing instruction operand `operand`.
    pub fn formatter_operand(&self, operand: u32) -> Option<u32> {
        self.ops()
            .iter()
            .position(|op| *op == FmtOp::Instr(operand as u8))
            .map(|pos| pos as u32)
    }

    /// Whether any memory operand is actually rendered.
    pub fn shows_memory(&self, instr: &Instruction) -> bool {
        self.ops().iter().any(|op| match op {
            FmtOp::Instr(idx) => instr.op_kind(*idx as u32).is_memory(),
            _ => false,
        })
    }
}

/// Address size of the implicit operands of a string instruction.
pub(crate) fn string_address_size(instr: &Instruction) -> Option<u8> {
    instr.op_kinds().iter().find_map(|kind| match kind {
        OpKind::MemorySegSI | OpKind::MemorySegDI | OpKind::MemoryESDI => Some(2),
        OpKind::MemorySegESI | OpKind::MemorySegEDI | OpKind::MemoryESEDI => Some(4),
        OpKind::MemorySegRSI | OpKind::MemorySegRDI | OpKind::MemoryESRDI => Some(8),
        _ => None,
    })
}

pub(crate) fn layout(d: &Dialect, options: &FormatterOptions, instr: &Instruction) -> Layout {
    let info = instr.opcode().info();
    let gas = d.syntax == Syntax::Gas;

    let mut l = Layout {
        mnemonic: info.name,
        mnemonic_kind: TextKind::Mnemonic,
        suffix: None,
        mnemonic_hint: None,
        hint: None,
        notrack: false,
        segment_consumed: false,
        hidden_memory: false,
        indirect: false,
        attach_rounding: None,
        last_register: None,
        flags: info.flags,
        ops: [FmtOp::Rounding; MAX_OPERANDS],
        count: 0,
    };

    if let InfoKind::Data(width) = info.kind {
        l.mnemonic = d.directive(width);
        l.mnemonic_kind = TextKind::Directive;
        let elements = instr.declared_data().len() / width as usize;
        for idx in 0..elements {
            l.push(FmtOp::Data(idx as u8));
        }
        return l;
    }

    for idx in 0..instr.op_count() {
        l.push(FmtOp::Instr(idx as u8));
        if instr.op_kind(idx) == OpKind::Register {
            l.last_register = Some(idx as u8);
        }
    }

    match info.kind {
        InfoKind::Cc(group, names) => {
            l.mnemonic = names.get(options.cc_index(group)).copied().unwrap_or(info.name);
        }
        InfoKind::Pseudo(names) if options.use_pseudo_ops => {
            if let Some(imm) = trailing_imm8(instr) {
                if let Some(name) = names.get(imm as usize) {
                    l.mnemonic = *name;
                    l.pop();
                }
            }
        }
        InfoKind::PseudoPclmul(names) if options.use_pseudo_ops => {
            if let Some(slot) = trailing_imm8(instr).and_then(pclmul_index) {
                l.mnemonic = names[slot];
                l.pop();
            }
        }
        InfoKind::Gas(name) if gas => l.mnemonic = name,
        InfoKind::GasFpuSwap(name) if gas => {
            let st_dest = instr.op_count() == 2
                && instr.op_kind(0) == OpKind::Register
                && instr.op_kind(1) == OpKind::Register
                && instr.op_register(0) != Register::st0();
            if st_dest {
                l.mnemonic = name;
            }
        }
        InfoKind::GasMovx(name) if gas => {
            l.mnemonic = name;
            l.suffix = movx_suffix(instr);
        }
        InfoKind::Str(full) => {
            let overridden = !instr.segment_prefix().is_none();
            let other_size = string_address_size(instr)
                .map_or(false, |size| size != instr.code_size().address_size());
            match d.strings {
                StringForm::ShortUnlessAmbiguous if overridden || other_size => l.mnemonic = full,
                StringForm::ShortUnlessAmbiguous | StringForm::Short => {
                    l.hidden_memory = instr.has_memory_operand();
                    l.clear();
                }
                StringForm::WithOperands => {}
            }
        }
        _ => {}
    }

    if gas && instr.opcode() == Opcode::Mov && is_movabs(instr) {
        l.mnemonic = "movabs";
    }

    if gas && l.suffix.is_none() {
        l.suffix = size_suffix(options, instr, info.flags);
    }

    if instr.rounding_control().decorator().is_some() || instr.suppress_all_exceptions() {
        let target = l.last_register.unwrap_or(l.count.saturating_sub(1));
        match d.rounding {
            RoundingStyle::Attached => l.attach_rounding = Some(target),
            RoundingStyle::Operand => {
                let at = l
                    .ops()
                    .iter()
                    .position(|op| *op == FmtOp::Instr(target))
                    .map_or(l.count as usize, |pos| pos + 1);
                l.insert(at, FmtOp::Rounding);
            }
        }
    }

    let segment = instr.segment_prefix();
    if info.flags.contains(OpFlags::BRANCH_HINT)
        && (segment == Register::cs() || segment == Register::ds())
    {
        let taken = segment == Register::ds();
        l.segment_consumed = true;
        match d.hint {
            HintStyle::MnemonicSuffix => {
                l.mnemonic_hint = Some(if taken { ",pt" } else { ",pn" });
            }
            HintStyle::Prefix => l.hint = Some(if taken { "ht" } else { "hnt" }),
            HintStyle::Operand => {
                l.hint = Some(if taken { "ht" } else { "hnt" });
                l.push(FmtOp::Hint);
            }
        }
    }

    let indirect_target = instr.op_count() > 0
        && matches!(instr.op_kind(0), OpKind::Register | OpKind::Memory);

    if info.flags.contains(OpFlags::NOTRACK) && segment == Register::ds() && indirect_target {
        l.notrack = true;
        l.segment_consumed = true;
    }

    l.indirect = info.flags.contains(OpFlags::BRANCH) && indirect_target;

    if d.reverse_operands && !info.flags.contains(OpFlags::KEEP_OPERAND_ORDER) {
        let count = l.count as usize;
        l.ops[..count].reverse();
    }

    l
}

fn trailing_imm8(instr: &Instruction) -> Option<u8> {
    let last = instr.op_count().checked_sub(1)?;
    if instr.op_kind(last) == OpKind::Immediate8 {
        Some(instr.immediate(last).0 as u8)
    } else {
        None
    }
}

/// `mov` with a 64-bit immediate or a 64-bit absolute address.
fn is_movabs(instr: &Instruction) -> bool {
    instr.op_kinds().iter().any(|kind| match kind {
        OpKind::Immediate64 => true,
        OpKind::Memory => {
            let mem = instr.memory();
            mem.base.is_none() && mem.index.is_none() && mem.displ_size == 8
        }
        _ => false,
    })
}

fn int_suffix(size: u8) -> Option<&'static str> {
    match size {
        1 => Some("b"),
        2 => Some("w"),
        4 => Some("l"),
        8 => Some("q"),
        _ => None,
    }
}

/// `movzbl` style source and destination suffixes.
fn movx_suffix(instr: &Instruction) -> Option<&'static str> {
    if instr.op_count() != 2 {
        return None;
    }

    let dst = instr.op_register(0).width();
    let src = match instr.op_kind(1) {
        OpKind::Register => instr.op_register(1).width(),
        _ => instr.memory_size().size(),
    };

    Some(match (src, dst) {
        (1, 2) => "bw",
        (1, 4) => "bl",
        (1, 8) => "bq",
        (2, 4) => "wl",
        (2, 8) => "wq",
        (4, 8) => "lq",
        _ => return None,
    })
}

fn size_suffix(options: &FormatterOptions, instr: &Instruction, flags: OpFlags) -> Option<&'static str> {
    let memory = instr.op_kinds().iter().any(|kind| *kind == OpKind::Memory);
    let mem_size = instr.memory_size().size();

    if flags.contains(OpFlags::SUFFIX_FP) || flags.contains(OpFlags::SUFFIX_FPINT) {
        if !memory {
            return None;
        }

        return if flags.contains(OpFlags::SUFFIX_FP) {
            match mem_size {
                4 => Some("s"),
                8 => Some("l"),
                10 => Some("t"),
                _ => None,
            }
        } else {
            match mem_size {
                2 => Some("s"),
                4 => Some("l"),
                8 => Some("ll"),
                _ => None,
            }
        };
    }

    if !flags.contains(OpFlags::SUFFIX_INT) {
        return None;
    }

    let registers = || {
        (0..instr.op_count())
            .map(|idx| instr.op_register(idx))
            .filter(|reg| reg.is_gp())
    };

    let stack_immediate = flags.contains(OpFlags::STACK)
        && instr.op_count() == 1
        && instr.op_kind(0).is_immediate();

    let size = if memory && mem_size != 0 {
        mem_size
    } else if stack_immediate {
        stack_size(instr)
    } else {
        registers().next().map_or(0, |reg| reg.width())
    };

    let sized_by_register = if memory {
        registers().any(|reg| reg.width() == mem_size)
    } else {
        registers().next().is_some()
    };

    let ambiguous = !sized_by_register && ((memory && mem_size != 0) || stack_immediate);
    if ambiguous || options.gas_show_mnemonic_size_suffix {
        int_suffix(size)
    } else {
        None
    }
}

/// Size of a stack push, which follows the operand size prefix.
pub(crate) fn stack_size(instr: &Instruction) -> u8 {
    use crate::instruction::{CodeSize, Prefixes};

    let overridden = instr.prefixes().contains(Prefixes::OPERAND_SIZE);
    match (instr.code_size(), overridden) {
        (CodeSize::Code16, false) | (CodeSize::Code32 | CodeSize::Code64, true) => 2,
        (CodeSize::Code32, false) | (CodeSize::Code16, true) => 4,
        (CodeSize::Code64, false) => 8,
    }
}
