//! Prefixes and the mnemonic.

use super::{Ctx, Layout};
use crate::instruction::{CodeSize, Prefixes};
use crate::opcode::OpFlags;
use crate::options::{CcE, CcNe};
use crate::FormatMnemonicOptions;
use tokenizing::TextKind;

/// Upper bound of prefixes shown in front of one mnemonic.
const MAX_PREFIXES: usize = 8;

enum Prefix {
    Name(&'static str),
    Segment(crate::register::Register),
}

impl<'a, 'o> Ctx<'a, 'o> {
    fn prefixes(&self, l: &Layout) -> ([Option<Prefix>; MAX_PREFIXES], usize) {
        const NONE: Option<Prefix> = None;

        let instr = self.instr;
        let flags = l.flags;
        let prefixes = instr.prefixes();
        let useless = self.options.show_useless_prefixes;

        let mut list = [NONE; MAX_PREFIXES];
        let mut count = 0;
        let mut push = |prefix: Prefix| {
            if count < MAX_PREFIXES {
                list[count] = Some(prefix);
                count += 1;
            }
        };

        let segment = instr.segment_prefix();
        if !segment.is_none() && !l.segment_consumed && !l.shows_memory(instr) {
            if l.hidden_memory || useless {
                push(Prefix::Segment(segment));
            }
        }

        // a gas size suffix already carries the operand size
        let operand_size = prefixes.contains(Prefixes::OPERAND_SIZE)
            && flags.intersects(OpFlags::STACK | OpFlags::BRANCH)
            && l.suffix.is_none();
        if operand_size {
            if let Some([bits16, bits32]) = self.d.operand_size_prefixes {
                push(Prefix::Name(match instr.code_size() {
                    CodeSize::Code16 => bits32,
                    CodeSize::Code32 | CodeSize::Code64 => bits16,
                }));
            }
        }

        let address_size = prefixes.contains(Prefixes::ADDRESS_SIZE)
            && (flags.contains(OpFlags::ADDR_SIZE) || (flags.contains(OpFlags::STRING) && l.hidden_memory));
        if address_size {
            if let Some([bits16, bits32]) = self.d.address_size_prefixes {
                push(Prefix::Name(match instr.code_size() {
                    CodeSize::Code16 | CodeSize::Code64 => bits32,
                    CodeSize::Code32 => bits16,
                }));
            }
        }

        let lock = prefixes.contains(Prefixes::LOCK);
        let hle = (lock && flags.contains(OpFlags::LOCKABLE)) || flags.contains(OpFlags::HLE) || useless;
        if prefixes.contains(Prefixes::XACQUIRE) && hle {
            push(Prefix::Name("xacquire"));
        }
        if prefixes.contains(Prefixes::XRELEASE) && hle {
            push(Prefix::Name("xrelease"));
        }

        if lock && (flags.contains(OpFlags::LOCKABLE) || useless) {
            push(Prefix::Name("lock"));
        }

        if prefixes.contains(Prefixes::REP) {
            if flags.contains(OpFlags::REPE_REPNE) {
                push(Prefix::Name(match self.options.cc_e {
                    CcE::E => "repe",
                    CcE::Z => "repz",
                }));
            } else if flags.contains(OpFlags::REP) || useless {
                push(Prefix::Name("rep"));
            }
        }

        if prefixes.contains(Prefixes::REPNE) {
            if flags.contains(OpFlags::BND) {
                push(Prefix::Name("bnd"));
            } else if flags.contains(OpFlags::REPE_REPNE) {
                push(Prefix::Name(match self.options.cc_ne {
                    CcNe::Ne => "repne",
                    CcNe::Nz => "repnz",
                }));
            } else if useless {
                push(Prefix::Name("repne"));
            }
        }

        if l.notrack {
            push(Prefix::Name("notrack"));
        }

        if let (Some(hint), crate::dialect::HintStyle::Prefix) = (l.hint, self.d.hint) {
            push(Prefix::Name(hint));
        }

        (list, count)
    }

    /// Writes prefixes and mnemonic, returns whether anything was written.
    pub fn write_mnemonic(&mut self, l: &Layout, options: FormatMnemonicOptions) -> bool {
        let upper_prefix = self.options.uppercase_prefixes || self.options.uppercase_all;
        let upper_mnemonic = self.options.uppercase_mnemonics || self.options.uppercase_all;
        let mut written = false;

        if !options.contains(FormatMnemonicOptions::NO_PREFIXES) {
            let (prefixes, count) = self.prefixes(l);
            for prefix in prefixes.iter().take(count).flatten() {
                if written {
                    self.write(" ", TextKind::Text);
                }

                match prefix {
                    Prefix::Name(name) => self.write_cased(name, TextKind::Prefix, upper_prefix),
                    Prefix::Segment(segment) => {
                        let name = segment.name();
                        self.write_cased(name, TextKind::Prefix, upper_prefix);
                    }
                }
                written = true;
            }
        }

        if options.contains(FormatMnemonicOptions::NO_MNEMONIC) {
            return written;
        }

        if written {
            self.write(" ", TextKind::Text);
        }

        match l.suffix {
            Some(suffix) => {
                self.scratch.clear();
                self.scratch.push_str(l.mnemonic);
                self.scratch.push_str(suffix);
                if upper_mnemonic {
                    self.scratch.make_ascii_uppercase();
                }
                self.column += self.scratch.chars().count();
                self.out.write(self.scratch.as_str(), l.mnemonic_kind);
            }
            None => self.write_cased(l.mnemonic, l.mnemonic_kind, upper_mnemonic),
        }

        if let Some(hint) = l.mnemonic_hint {
            self.write_cased(hint, TextKind::Keyword, upper_mnemonic);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use crate::dialect::{GAS, MASM, NASM};
    use crate::engine::Engine;
    use crate::instruction::{CodeSize, Instruction, MemoryOperand, MemorySize, OpKind, Prefixes};
    use crate::opcode::Opcode;
    use crate::options::FormatterOptions;
    use crate::register::Register;
    use crate::FormatMnemonicOptions;

    fn mnemonic(engine: &mut Engine, instr: &Instruction) -> String {
        let mut out = String::new();
        engine.format_mnemonic(instr, &mut out, FormatMnemonicOptions::empty());
        out
    }

    fn lock_add() -> Instruction {
        Instruction::new(CodeSize::Code64, Opcode::Add)
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Dword))
            .with_register(Register::ecx())
            .with_prefixes(Prefixes::LOCK | Prefixes::XACQUIRE)
    }

    #[test]
    fn prefix_order() {
        let mut masm = Engine::new(&MASM, FormatterOptions::with_masm());
        assert_eq!(mnemonic(&mut masm, &lock_add()), "xacquire lock add");

        masm.options.uppercase_prefixes = true;
        assert_eq!(mnemonic(&mut masm, &lock_add()), "XACQUIRE LOCK add");
    }

    #[test]
    fn mnemonic_only_options() {
        let mut masm = Engine::new(&MASM, FormatterOptions::with_masm());
        let mut out = String::new();
        masm.format_mnemonic(&lock_add(), &mut out, FormatMnemonicOptions::NO_PREFIXES);
        assert_eq!(out, "add");

        let mut out = String::new();
        masm.format_mnemonic(&lock_add(), &mut out, FormatMnemonicOptions::NO_MNEMONIC);
        assert_eq!(out, "xacquire lock");
    }

    #[test]
    fn useless_prefixes() {
        let nop = Instruction::new(CodeSize::Code64, Opcode::Nop)
            .with_prefixes(Prefixes::REP)
            .with_segment_prefix(Register::fs());

        let mut masm = Engine::new(&MASM, FormatterOptions::with_masm());
        assert_eq!(mnemonic(&mut masm, &nop), "nop");

        masm.options.show_useless_prefixes = true;
        assert_eq!(mnemonic(&mut masm, &nop), "fs rep nop");
    }

    #[test]
    fn string_prefixes() {
        let movsb = Instruction::new(CodeSize::Code64, Opcode::Movsb)
            .with_string_memory(OpKind::MemoryESRDI, MemorySize::Byte)
            .with_string_memory(OpKind::MemorySegRSI, MemorySize::Byte)
            .with_prefixes(Prefixes::REP | Prefixes::ADDRESS_SIZE)
            .with_segment_prefix(Register::fs());

        let mut nasm = Engine::new(&NASM, FormatterOptions::with_nasm());
        assert_eq!(mnemonic(&mut nasm, &movsb), "fs a32 rep movsb");

        let mut masm = Engine::new(&MASM, FormatterOptions::with_masm());
        assert_eq!(mnemonic(&mut masm, &movsb), "rep movs");
    }

    #[test]
    fn branch_hints() {
        let jne = Instruction::new(CodeSize::Code64, Opcode::Jne)
            .with_near_branch(OpKind::NearBranch64, 0x10)
            .with_segment_prefix(Register::cs());

        let mut masm = Engine::new(&MASM, FormatterOptions::with_masm());
        assert_eq!(mnemonic(&mut masm, &jne), "hnt jne");

        let mut gas = Engine::new(&GAS, FormatterOptions::with_gas());
        assert_eq!(mnemonic(&mut gas, &jne), "jne,pn");
    }

    #[test]
    fn bnd_and_notrack() {
        let jmp = Instruction::new(CodeSize::Code64, Opcode::Jmp)
            .with_register(Register::rax())
            .with_prefixes(Prefixes::REPNE)
            .with_segment_prefix(Register::ds());

        let mut masm = Engine::new(&MASM, FormatterOptions::with_masm());
        assert_eq!(mnemonic(&mut masm, &jmp), "bnd notrack jmp");
    }
}
