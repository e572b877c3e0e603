mod api;
mod fast;
mod masm;

use crate::{
    CodeSize, Formatter, Instruction, MemoryOperand, MemorySize, OpKind, Opcode, Prefixes,
    Register, SymbolResolver, SymbolResult, TokenStream,
};
use tokenizing::TextKind;

fn test_display(formatter: &mut dyn Formatter, instr: &Instruction, expected: &str) {
    let mut text = String::new();
    formatter.format(instr, &mut text);

    assert!(
        text == expected,
        "display error for {:?}:\n  instruction: {:?}\n displayed: {}\n expected: {}\n",
        instr.opcode(),
        instr,
        text,
        expected
    );

    // while we're at it, check that the tokens add up to the same text
    let mut stream = TokenStream::new();
    formatter.format(instr, &mut stream);
    assert_eq!(
        stream.to_string(),
        text,
        "token stream differs from plain text, wanted {}",
        expected
    );
}

/// `mov rcx,[rax+rdx*8-80h]`
fn scaled_load() -> Instruction {
    Instruction::new(CodeSize::Code64, Opcode::Mov)
        .with_register(Register::rcx())
        .with_memory(MemoryOperand::new(
            Register::rax(),
            Register::rdx(),
            8,
            -0x80,
            1,
            MemorySize::Qword,
        ))
}

/// `lock add dword ptr [rax],1`
fn lock_add() -> Instruction {
    Instruction::new(CodeSize::Code64, Opcode::Add)
        .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Dword))
        .with_immediate(OpKind::Immediate8to32, 1)
        .with_prefixes(Prefixes::LOCK)
}

/// `vcmpps k1,zmm2,zmm3,imm`
fn vcmpps(imm: u8) -> Instruction {
    Instruction::new(CodeSize::Code64, Opcode::Vcmpps)
        .with_register(Register::mask(1))
        .with_register(Register::zmm(2))
        .with_register(Register::zmm(3))
        .with_immediate(OpKind::Immediate8, imm as u64)
}

fn near_branch(opcode: Opcode, target: u64) -> Instruction {
    Instruction::new(CodeSize::Code64, opcode).with_near_branch(OpKind::NearBranch64, target)
}

fn fpu(opcode: Opcode, dst: Register, src: Register) -> Instruction {
    Instruction::new(CodeSize::Code64, opcode)
        .with_register(dst)
        .with_register(src)
}

/// Resolves exactly `address` to `name`.
fn resolver(address: u64, name: &'static str, kind: TextKind) -> Box<dyn SymbolResolver> {
    Box::new(
        move |_: &Instruction, _: u32, _: Option<u32>, value: u64, _: u32| {
            (value == address).then(|| SymbolResult::new(address, name, kind))
        },
    )
}

/// `mov rax,[rip+10h]` at 1000h, 7 bytes long.
fn rip_load() -> Instruction {
    Instruction::new(CodeSize::Code64, Opcode::Mov)
        .with_register(Register::rax())
        .with_memory(MemoryOperand::new(
            Register::RIP,
            Register::NONE,
            1,
            0x10,
            4,
            MemorySize::Qword,
        ))
        .with_ip(0x1000, 7)
}
