use super::*;
use crate::{FastFormatter, FastFormatterOptions};

fn fast_with(options: FastFormatterOptions) -> FastFormatter {
    FastFormatter::with_options(options)
}

#[test]
fn test_instructions_fast() {
    let mut f = FastFormatter::new();

    test_display(&mut f, &scaled_load(), "mov rcx,[rax+rdx*8-80h]");
    test_display(&mut f, &lock_add(), "lock add dword ptr [rax],1");
    test_display(&mut f, &vcmpps(1), "vcmpltps k1,zmm2,zmm3");
    test_display(&mut f, &near_branch(Opcode::Jmp, 0x7ff0).with_short_branch(), "jmp 7FF0h");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code32, Opcode::JmpFar).with_far_branch(OpKind::FarBranch32, 0x1234, 0x5678),
        "jmp 1234h:5678h",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code32, Opcode::Mov)
            .with_register(Register::eax())
            .with_memory(MemoryOperand::absolute(0x1234, 4, MemorySize::Dword)),
        "mov eax,[1234h]",
    );
    test_display(&mut f, &rip_load(), "mov rax,[1017h]");
    test_display(&mut f, &Instruction::declare_bytes(CodeSize::Code64, &[1, 0xff]), "db 1,0FFh");
}

#[test]
fn test_options_fast() {
    let mov = Instruction::new(CodeSize::Code64, Opcode::Mov)
        .with_register(Register::eax())
        .with_immediate(OpKind::Immediate32, 0xdead_beef);

    let mut f = fast_with(FastFormatterOptions {
        use_hex_prefix: true,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &mov, "mov eax,0xDEADBEEF");

    let mut f = fast_with(FastFormatterOptions {
        use_hex_prefix: true,
        uppercase_hex: false,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &mov, "mov eax,0xdeadbeef");

    let mut f = fast_with(FastFormatterOptions {
        always_show_memory_size: true,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &scaled_load(), "mov rcx,qword ptr [rax+rdx*8-80h]");

    let mut f = fast_with(FastFormatterOptions {
        space_after_operand_separator: true,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &scaled_load(), "mov rcx, [rax+rdx*8-80h]");

    let mut f = fast_with(FastFormatterOptions {
        use_pseudo_ops: false,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &vcmpps(1), "vcmpps k1,zmm2,zmm3,1");

    let mut f = fast_with(FastFormatterOptions {
        rip_relative_addresses: true,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &rip_load(), "mov rax,[rip+10h]");

    let mut f = fast_with(FastFormatterOptions {
        always_show_segment_register: true,
        ..FastFormatterOptions::default()
    });
    test_display(&mut f, &scaled_load(), "mov rcx,ds:[rax+rdx*8-80h]");
}

#[test]
fn test_symbols_fast() {
    let mut f = fast_with(FastFormatterOptions {
        show_symbol_address: true,
        ..FastFormatterOptions::default()
    })
    .with_resolver(resolver(0x40_1000, "printf", TextKind::Function));

    test_display(&mut f, &near_branch(Opcode::Call, 0x40_1000), "call printf (401000h)");
    test_display(&mut f, &near_branch(Opcode::Call, 0x40_2000), "call 402000h");
}
