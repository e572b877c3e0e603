use super::*;
use crate::{
    CcB, CcE, CcNe, FormatterOptions, MasmFormatter, MemorySizeOptions, MvexConversion,
    NumberBase, RoundingControl, SymResTextPart, SymbolFlags,
};

fn masm_with(options: FormatterOptions) -> MasmFormatter {
    MasmFormatter::with_options(options)
}

#[test]
fn test_instructions_masm() {
    let mut f = MasmFormatter::new();

    test_display(&mut f, &scaled_load(), "mov rcx,[rax+rdx*8-80h]");
    test_display(
        &mut f,
        &scaled_load().with_segment_prefix(Register::fs()),
        "mov rcx,fs:[rax+rdx*8-80h]",
    );
    test_display(&mut f, &lock_add(), "lock add dword ptr [rax],1");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Push).with_immediate(OpKind::Immediate8to64, 0x10),
        "push 10h",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Lea)
            .with_register(Register::rax())
            .with_memory(MemoryOperand::with_base_displ(Register::rcx(), 8, MemorySize::Qword)),
        "lea rax,[rcx+8]",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Movzx)
            .with_register(Register::eax())
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Byte)),
        "movzx eax,byte ptr [rax]",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Movsxd)
            .with_register(Register::rax())
            .with_memory(MemoryOperand::with_base(Register::rcx(), MemorySize::Dword)),
        "movsxd rax,dword ptr [rcx]",
    );
    test_display(&mut f, &Instruction::new(CodeSize::Code64, Opcode::Cdqe), "cdqe");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Xor)
            .with_register(Register::eax())
            .with_register(Register::eax()),
        "xor eax,eax",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Mov)
            .with_register(Register::eax())
            .with_immediate(OpKind::Immediate32, 0xdead_beef),
        "mov eax,0DEADBEEFh",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Add)
            .with_register(Register::rax())
            .with_immediate(OpKind::Immediate8to64, 0x80),
        "add rax,0FFFFFFFFFFFFFF80h",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Enter)
            .with_immediate(OpKind::Immediate16, 0x20)
            .with_immediate(OpKind::Immediate8_2nd, 0),
        "enter 20h,0",
    );
}

#[test]
fn test_pseudo_ops_masm() {
    let mut f = MasmFormatter::new();

    test_display(&mut f, &vcmpps(1), "vcmpltps k1,zmm2,zmm3");
    test_display(&mut f, &vcmpps(0x1f), "vcmptrue_usps k1,zmm2,zmm3");
    // no pseudo-op for predicates past the table
    test_display(&mut f, &vcmpps(0x20), "vcmpps k1,zmm2,zmm3,20h");

    let cmpps = Instruction::new(CodeSize::Code64, Opcode::Cmpps)
        .with_register(Register::xmm(1))
        .with_register(Register::xmm(2))
        .with_immediate(OpKind::Immediate8, 4);
    test_display(&mut f, &cmpps, "cmpneqps xmm1,xmm2");

    let pclmul = |imm: u64| {
        Instruction::new(CodeSize::Code64, Opcode::Pclmulqdq)
            .with_register(Register::xmm(1))
            .with_register(Register::xmm(2))
            .with_immediate(OpKind::Immediate8, imm)
    };
    test_display(&mut f, &pclmul(0x11), "pclmulhqhqdq xmm1,xmm2");
    test_display(&mut f, &pclmul(0x01), "pclmulhqlqdq xmm1,xmm2");
    test_display(&mut f, &pclmul(0x02), "pclmulqdq xmm1,xmm2,2");

    let mut f = masm_with(FormatterOptions {
        use_pseudo_ops: false,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &vcmpps(1), "vcmpps k1,zmm2,zmm3,1");
    test_display(&mut f, &pclmul(0x11), "pclmulqdq xmm1,xmm2,11h");
}

#[test]
fn test_condition_codes_masm() {
    let mut f = masm_with(FormatterOptions {
        branch_leading_zeros: false,
        cc_b: CcB::C,
        cc_e: CcE::Z,
        cc_ne: CcNe::Nz,
        ..FormatterOptions::with_masm()
    });

    test_display(&mut f, &near_branch(Opcode::Jne, 0x10), "jnz 10h");
    test_display(&mut f, &near_branch(Opcode::Jb, 0x10), "jc 10h");
    test_display(&mut f, &near_branch(Opcode::Loopne, 0x10), "loopnz 10h");
    // groups without a selector keep their name
    test_display(&mut f, &near_branch(Opcode::Jo, 0x10), "jo 10h");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Sete).with_register(Register::al()),
        "setz al",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Cmovb)
            .with_register(Register::eax())
            .with_register(Register::ecx()),
        "cmovc eax,ecx",
    );

    let scasb = Instruction::new(CodeSize::Code64, Opcode::Scasb)
        .with_string_memory(OpKind::MemoryESRDI, MemorySize::Byte)
        .with_prefixes(Prefixes::REPNE);
    test_display(&mut f, &scasb, "repnz scasb");

    let cmpsb = Instruction::new(CodeSize::Code64, Opcode::Cmpsb)
        .with_string_memory(OpKind::MemorySegRSI, MemorySize::Byte)
        .with_string_memory(OpKind::MemoryESRDI, MemorySize::Byte)
        .with_prefixes(Prefixes::REP);
    test_display(&mut f, &cmpsb, "repz cmpsb");
}

#[test]
fn test_memory_masm() {
    let mut f = masm_with(FormatterOptions {
        memory_size_options: MemorySizeOptions::Always,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &scaled_load(), "mov rcx,qword ptr [rax+rdx*8-80h]");

    let mut f = masm_with(FormatterOptions {
        masm_displ_in_brackets: false,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &scaled_load(), "mov rcx,-80h[rax+rdx*8]");

    let mut f = masm_with(FormatterOptions {
        scale_before_index: true,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &scaled_load(), "mov rcx,[rax+8*rdx-80h]");

    let mut f = MasmFormatter::new();
    test_display(&mut f, &rip_load(), "mov rax,[1017h]");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code32, Opcode::Mov)
            .with_register(Register::eax())
            .with_memory(MemoryOperand::absolute(0x1234, 4, MemorySize::Dword)),
        "mov eax,ds:[1234h]",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Lgdt)
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Fword)),
        "lgdt fword ptr [rax]",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Movaps)
            .with_register(Register::xmm0())
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Xmmword)),
        "movaps xmm0,[rax]",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Cvtsi2sd)
            .with_register(Register::xmm0())
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Dword)),
        "cvtsi2sd xmm0,dword ptr [rax]",
    );
}

#[test]
fn test_avx512_masm() {
    let mut f = MasmFormatter::new();

    let vaddps = Instruction::new(CodeSize::Code64, Opcode::Vaddps)
        .with_register(Register::zmm(1))
        .with_register(Register::zmm(2))
        .with_register(Register::zmm(3));

    test_display(
        &mut f,
        &vaddps
            .clone()
            .with_op_mask(Register::mask(1))
            .with_zeroing()
            .with_rounding(RoundingControl::RoundDown),
        "vaddps zmm1{k1}{z},zmm2,zmm3{rd-sae}",
    );
    test_display(
        &mut f,
        &vaddps.clone().with_mvex_conversion(MvexConversion::Cdab),
        "vaddps zmm1,zmm2,zmm3{cdab}",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Vaddps)
            .with_register(Register::zmm(1))
            .with_register(Register::zmm(2))
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Dword))
            .with_broadcast(),
        "vaddps zmm1,zmm2,dword bcst [rax]",
    );

    let load = Instruction::new(CodeSize::Code64, Opcode::Vmovaps)
        .with_register(Register::zmm(1))
        .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Zmmword));
    test_display(&mut f, &load.clone().with_eviction_hint(), "vmovaps zmm1,[rax]{eh}");
    test_display(
        &mut f,
        &load.with_mvex_conversion(MvexConversion::Float16),
        "vmovaps zmm1,[rax]{float16}",
    );

    // the mask follows the first operand, memory or not
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Vmovups)
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Zmmword))
            .with_register(Register::zmm(1))
            .with_op_mask(Register::mask(1)),
        "vmovups [rax]{k1},zmm1",
    );
}

#[test]
fn test_branches_masm() {
    let mut f = MasmFormatter::new();

    test_display(
        &mut f,
        &near_branch(Opcode::Jmp, 0x7ff0).with_short_branch(),
        "jmp short 0000000000007FF0h",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code32, Opcode::Call).with_near_branch(OpKind::NearBranch32, 0x40_1000),
        "call 00401000h",
    );

    let jmp_mem = Instruction::new(CodeSize::Code64, Opcode::Jmp)
        .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::Qword));
    test_display(&mut f, &jmp_mem, "jmp qword ptr [rax]");
    test_display(
        &mut f,
        &jmp_mem.with_segment_prefix(Register::ds()),
        "notrack jmp qword ptr [rax]",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Jmp)
            .with_register(Register::rax())
            .with_prefixes(Prefixes::REPNE),
        "bnd jmp rax",
    );

    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code32, Opcode::JmpFar).with_far_branch(OpKind::FarBranch32, 0x1234, 0x5678),
        "jmp 1234h:00005678h",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::JmpFar)
            .with_memory(MemoryOperand::with_base(Register::rax(), MemorySize::FarPtr16_32)),
        "jmp fword ptr [rax]",
    );

    let mut f = masm_with(FormatterOptions {
        branch_leading_zeros: false,
        ..FormatterOptions::with_masm()
    });
    test_display(
        &mut f,
        &near_branch(Opcode::Jne, 0x10).with_segment_prefix(Register::ds()),
        "ht jne 10h",
    );
    test_display(
        &mut f,
        &near_branch(Opcode::Jne, 0x10).with_segment_prefix(Register::cs()),
        "hnt jne 10h",
    );
}

#[test]
fn test_x87_masm() {
    let mut f = MasmFormatter::new();

    test_display(&mut f, &fpu(Opcode::Fadd, Register::st0(), Register::st(1)), "fadd st,st(1)");
    test_display(&mut f, &fpu(Opcode::Fsub, Register::st(1), Register::st0()), "fsub st(1),st");

    let fpu_mem = |opcode: Opcode, size: MemorySize| {
        Instruction::new(CodeSize::Code64, opcode)
            .with_memory(MemoryOperand::with_base(Register::rax(), size))
    };
    test_display(&mut f, &fpu_mem(Opcode::Fld, MemorySize::Float64), "fld qword ptr [rax]");
    test_display(&mut f, &fpu_mem(Opcode::Fild, MemorySize::Word), "fild word ptr [rax]");
    test_display(&mut f, &fpu_mem(Opcode::Fbld, MemorySize::Bcd), "fbld tbyte ptr [rax]");

    let mut f = masm_with(FormatterOptions {
        prefer_st0: true,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &fpu(Opcode::Fadd, Register::st0(), Register::st(1)), "fadd st(0),st(1)");
}

#[test]
fn test_strings_masm() {
    let mut f = MasmFormatter::new();

    let movsb = Instruction::new(CodeSize::Code64, Opcode::Movsb)
        .with_string_memory(OpKind::MemoryESRDI, MemorySize::Byte)
        .with_string_memory(OpKind::MemorySegRSI, MemorySize::Byte);

    test_display(&mut f, &movsb, "movsb");
    test_display(&mut f, &movsb.clone().with_prefixes(Prefixes::REP), "rep movsb");
    test_display(
        &mut f,
        &movsb.with_segment_prefix(Register::fs()),
        "movs byte ptr [rdi],byte ptr fs:[rsi]",
    );

    let movsb32 = Instruction::new(CodeSize::Code64, Opcode::Movsb)
        .with_string_memory(OpKind::MemoryESEDI, MemorySize::Byte)
        .with_string_memory(OpKind::MemorySegESI, MemorySize::Byte)
        .with_prefixes(Prefixes::ADDRESS_SIZE);
    test_display(&mut f, &movsb32, "movs byte ptr [edi],byte ptr [esi]");

    let stosd = Instruction::new(CodeSize::Code32, Opcode::Stosd)
        .with_string_memory(OpKind::MemoryESEDI, MemorySize::Dword)
        .with_prefixes(Prefixes::REP);
    test_display(&mut f, &stosd, "rep stosd");
}

#[test]
fn test_data_masm() {
    let mut f = MasmFormatter::new();

    test_display(&mut f, &Instruction::declare_bytes(CodeSize::Code64, &[1, 2, 0xff]), "db 1,2,0FFh");
    test_display(&mut f, &Instruction::declare_words(CodeSize::Code64, &[0x1234]), "dw 1234h");
    test_display(&mut f, &Instruction::declare_dwords(CodeSize::Code64, &[0x1234_5678]), "dd 12345678h");
    test_display(
        &mut f,
        &Instruction::declare_qwords(CodeSize::Code64, &[0x8000_0000_0000_0000]),
        "dq 8000000000000000h",
    );

    let mut f = masm_with(FormatterOptions {
        space_after_operand_separator: true,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &Instruction::declare_bytes(CodeSize::Code64, &[1, 2, 0xff]), "db 1, 2, 0FFh");
}

#[test]
fn test_numbers_masm() {
    let mov = |imm: u64| {
        Instruction::new(CodeSize::Code64, Opcode::Mov)
            .with_register(Register::eax())
            .with_immediate(OpKind::Immediate32, imm)
    };

    let cases: &[(FormatterOptions, u64, &str)] = &[
        (
            FormatterOptions {
                number_base: NumberBase::Decimal,
                ..FormatterOptions::with_masm()
            },
            0x10,
            "mov eax,16",
        ),
        (
            FormatterOptions {
                number_base: NumberBase::Binary,
                ..FormatterOptions::with_masm()
            },
            5,
            "mov eax,101b",
        ),
        (
            FormatterOptions {
                uppercase_hex: false,
                ..FormatterOptions::with_masm()
            },
            0xdead_beef,
            "mov eax,0deadbeefh",
        ),
        (
            FormatterOptions {
                add_leading_zero_to_hex_numbers: false,
                ..FormatterOptions::with_masm()
            },
            0xdead_beef,
            "mov eax,DEADBEEFh",
        ),
        (
            FormatterOptions {
                leading_zeros: true,
                ..FormatterOptions::with_masm()
            },
            0x10,
            "mov eax,00000010h",
        ),
        (
            FormatterOptions {
                digit_separator: "_".to_string(),
                ..FormatterOptions::with_masm()
            },
            0xdead_beef,
            "mov eax,0DEAD_BEEFh",
        ),
        (
            FormatterOptions {
                small_hex_numbers_in_decimal: false,
                ..FormatterOptions::with_masm()
            },
            9,
            "mov eax,9h",
        ),
    ];

    for (options, imm, expected) in cases {
        test_display(&mut masm_with(options.clone()), &mov(*imm), expected);
    }
}

#[test]
fn test_symbols_masm() {
    let mut f = MasmFormatter::new()
        .with_resolver(resolver(0x40_1000, "printf", TextKind::Function));

    test_display(&mut f, &near_branch(Opcode::Call, 0x40_1000), "call printf");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Mov)
            .with_register(Register::rax())
            .with_immediate(OpKind::Immediate32to64, 0x40_1000),
        "mov rax,offset printf",
    );

    let mut f = masm_with(FormatterOptions {
        show_symbol_address: true,
        ..FormatterOptions::with_masm()
    })
    .with_resolver(resolver(0x40_1000, "printf", TextKind::Function));
    test_display(
        &mut f,
        &near_branch(Opcode::Call, 0x40_1000),
        "call printf (0000000000401000h)",
    );
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Mov)
            .with_register(Register::rax())
            .with_immediate(OpKind::Immediate32to64, 0x40_1000),
        "mov rax,offset printf (401000h)",
    );

    // the address follows the zero padding of the operand it belongs to
    let mut f = masm_with(FormatterOptions {
        show_symbol_address: true,
        branch_leading_zeros: false,
        leading_zeros: true,
        ..FormatterOptions::with_masm()
    })
    .with_resolver(resolver(0x40_1000, "printf", TextKind::Function));
    test_display(&mut f, &near_branch(Opcode::Call, 0x40_1000), "call printf (401000h)");
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code64, Opcode::Mov)
            .with_register(Register::rax())
            .with_immediate(OpKind::Immediate32to64, 0x40_1000),
        "mov rax,offset printf (0000000000401000h)",
    );

    // a resolved symbol replaces the ds: of displacement only operands
    let mut f = MasmFormatter::new().with_resolver(resolver(0x1234, "counter", TextKind::Data));
    test_display(
        &mut f,
        &Instruction::new(CodeSize::Code32, Opcode::Mov)
            .with_register(Register::eax())
            .with_memory(MemoryOperand::absolute(0x1234, 4, MemorySize::Dword)),
        "mov eax,[counter]",
    );

    // and takes precedence over rip-relative display
    let mut f = masm_with(FormatterOptions {
        rip_relative_addresses: true,
        ..FormatterOptions::with_masm()
    })
    .with_resolver(resolver(0x1017, "data_start", TextKind::Data));
    test_display(&mut f, &rip_load(), "mov rax,[data_start]");

    let mut f = MasmFormatter::new().with_resolver(Box::new(
        |_: &Instruction, _: u32, _: Option<u32>, address: u64, _: u32| {
            Some(SymbolResult {
                address,
                text: vec![
                    SymResTextPart::new("kernel32!", TextKind::Text),
                    SymResTextPart::new("ExitProcess", TextKind::Function),
                ],
                flags: SymbolFlags::empty(),
                symbol_size: None,
            })
        },
    ));
    test_display(&mut f, &near_branch(Opcode::Call, 0x7000), "call kernel32!ExitProcess");
}

#[test]
fn test_casing_masm() {
    let mut f = masm_with(FormatterOptions {
        uppercase_all: true,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &scaled_load(), "MOV RCX,[RAX+RDX*8-80h]");
    test_display(&mut f, &lock_add(), "LOCK ADD DWORD PTR [RAX],1");

    let mut f = masm_with(FormatterOptions {
        uppercase_registers: true,
        uppercase_keywords: true,
        ..FormatterOptions::with_masm()
    });
    test_display(&mut f, &lock_add(), "lock add DWORD PTR [RAX],1");
}
