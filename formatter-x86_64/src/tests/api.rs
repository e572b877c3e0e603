use super::*;
use crate::{
    formatter_for, formatter_with_options, Error, FormatMnemonicOptions, FormatterOptions,
    FormatterOptionsProvider, GasFormatter, MasmFormatter, NasmFormatter, NumberFormattingOptions,
    RoundingControl, Syntax,
};

#[test]
fn number_formatting() {
    let mut masm = MasmFormatter::new();
    assert_eq!(masm.format_i8(-1), "-1");
    assert_eq!(masm.format_i32(-0x80), "-80h");
    assert_eq!(masm.format_u8(0xff), "0FFh");
    assert_eq!(masm.format_u16(10), "0Ah");
    assert_eq!(masm.format_u32(9), "9");
    assert_eq!(masm.format_u64(u64::MAX), "0FFFFFFFFFFFFFFFFh");
    assert_eq!(masm.format_i64(i64::MIN), "-8000000000000000h");

    let mut gas = GasFormatter::new();
    assert_eq!(gas.format_i16(-10), "-0xa");
    assert_eq!(gas.format_u32(0xdead_beef), "0xdeadbeef");

    let mut nasm = NasmFormatter::new();
    assert_eq!(nasm.format_u8(0xa0), "0A0h");
}

#[test]
fn register_names() {
    let mut gas = GasFormatter::new();
    assert_eq!(gas.format_register(Register::rax()), "%rax");
    assert_eq!(gas.format_register(Register::st0()), "%st");

    let mut masm = MasmFormatter::new();
    masm.options_mut().uppercase_registers = true;
    assert_eq!(masm.format_register(Register::zmm(31)), "ZMM31");
}

#[test]
fn token_kinds() {
    let mut stream = TokenStream::new();
    MasmFormatter::new().format(&lock_add(), &mut stream);

    let tokens: Vec<(&str, TextKind)> = stream
        .tokens()
        .iter()
        .map(|token| (&*token.text, token.kind))
        .collect();

    assert_eq!(
        tokens,
        [
            ("lock", TextKind::Prefix),
            (" ", TextKind::Text),
            ("add", TextKind::Mnemonic),
            (" ", TextKind::Text),
            ("dword", TextKind::Keyword),
            (" ", TextKind::Text),
            ("ptr", TextKind::Keyword),
            (" ", TextKind::Text),
            ("[", TextKind::Punctuation),
            ("rax", TextKind::Register),
            ("]", TextKind::Punctuation),
            (",", TextKind::Punctuation),
            ("1", TextKind::Number),
        ]
    );
}

#[test]
fn branch_and_symbol_kinds() {
    let mut stream = TokenStream::new();
    MasmFormatter::new()
        .with_resolver(resolver(0x40_1000, "printf", TextKind::Function))
        .format(&near_branch(Opcode::Call, 0x40_1000), &mut stream);
    assert_eq!(stream.tokens().last().map(|t| t.kind), Some(TextKind::Function));

    let mut stream = TokenStream::new();
    MasmFormatter::new().format(&near_branch(Opcode::Jmp, 0x10), &mut stream);
    assert_eq!(stream.tokens().last().map(|t| t.kind), Some(TextKind::LabelAddress));

    let mut stream = TokenStream::new();
    MasmFormatter::new().format(&Instruction::declare_bytes(CodeSize::Code64, &[1]), &mut stream);
    assert_eq!(stream.tokens()[0].kind, TextKind::Directive);
}

struct PadSecond;

impl FormatterOptionsProvider for PadSecond {
    fn operand_options(
        &mut self,
        _instruction: &Instruction,
        operand: u32,
        _instruction_operand: Option<u32>,
        options: &mut NumberFormattingOptions<'_>,
    ) {
        if operand == 1 {
            options.leading_zeros = true;
        }
    }
}

#[test]
fn options_provider_changes_single_operands() {
    let add = Instruction::new(CodeSize::Code64, Opcode::Add)
        .with_memory(MemoryOperand::with_base_displ(Register::rax(), 0x10, MemorySize::Dword))
        .with_immediate(OpKind::Immediate8to32, 0x20);

    let mut f = MasmFormatter::new().with_options_provider(Box::new(PadSecond));
    test_display(&mut f, &add, "add dword ptr [rax+10h],00000020h");
}

#[test]
fn operand_mapping() {
    let instr = vcmpps(1);

    let mut masm = MasmFormatter::new();
    assert_eq!(masm.operand_count(&instr), 3);
    assert_eq!(masm.instruction_operand(&instr, 2), Ok(Some(2)));
    assert_eq!(masm.formatter_operand(&instr, 3), Ok(None));
    assert_eq!(
        masm.formatter_operand(&instr, 4),
        Err(Error::InvalidInstructionOperand { index: 4, count: 4 })
    );

    let mut out = String::new();
    assert_eq!(
        masm.format_operand(&instr, &mut out, 3),
        Err(Error::InvalidOperand { index: 3, count: 3 })
    );
    assert!(out.is_empty(), "nothing is written for invalid operands");

    let mut gas = GasFormatter::new();
    assert_eq!(gas.formatter_operand(&instr, 0), Ok(Some(2)));
    assert_eq!(gas.instruction_operand(&instr, 0), Ok(Some(2)));

    let rounded = Instruction::new(CodeSize::Code64, Opcode::Vaddps)
        .with_register(Register::zmm(1))
        .with_register(Register::zmm(2))
        .with_register(Register::zmm(3))
        .with_rounding(RoundingControl::RoundUp);
    let mut nasm = NasmFormatter::new();
    assert_eq!(nasm.operand_count(&rounded), 4);
    assert_eq!(nasm.instruction_operand(&rounded, 3), Ok(None));

    let db = Instruction::declare_bytes(CodeSize::Code64, &[1, 2]);
    assert_eq!(masm.operand_count(&db), 2);
    assert_eq!(masm.instruction_operand(&db, 0), Ok(None));
}

#[test]
fn piecewise_formatting() {
    let mut gas = GasFormatter::new();
    let instr = scaled_load();

    let mut out = String::new();
    gas.format_operand(&instr, &mut out, 0).unwrap();
    assert_eq!(out, "-0x80(%rax,%rdx,8)");

    let mut out = String::new();
    gas.format_all_operands(&instr, &mut out);
    assert_eq!(out, "-0x80(%rax,%rdx,8),%rcx");

    let mut masm = MasmFormatter::new();
    masm.options_mut().space_after_operand_separator = true;
    let mut out = String::new();
    masm.format_operand_separator(&instr, &mut out);
    assert_eq!(out, ", ");

    let mut out = String::new();
    masm.format_mnemonic(&lock_add(), &mut out);
    assert_eq!(out, "lock add");

    let mut out = String::new();
    masm.format_mnemonic_options(&lock_add(), &mut out, FormatMnemonicOptions::NO_PREFIXES);
    assert_eq!(out, "add");
}

#[test]
fn formatters_by_syntax() {
    let expected = [
        (Syntax::Masm, "mov rcx,[rax+rdx*8-80h]"),
        (Syntax::Nasm, "mov rcx,[rax+rdx*8-80h]"),
        (Syntax::Gas, "mov -0x80(%rax,%rdx,8),%rcx"),
        (Syntax::Fast, "mov rcx,[rax+rdx*8-80h]"),
    ];

    for (syntax, text) in expected {
        let mut formatter = formatter_for(syntax);
        test_display(formatter.as_mut(), &scaled_load(), text);
    }

    let options = FormatterOptions {
        uppercase_mnemonics: true,
        ..FormatterOptions::with_gas()
    };
    let mut formatter = formatter_with_options(Syntax::Gas, options);
    test_display(formatter.as_mut(), &scaled_load(), "MOV -0x80(%rax,%rdx,8),%rcx");
}

#[test]
fn options_through_yaml() {
    let options = FormatterOptions {
        number_base: crate::NumberBase::Decimal,
        cc_ne: crate::CcNe::Nz,
        digit_separator: "'".to_string(),
        ..FormatterOptions::with_nasm()
    };

    let text = serde_yaml::to_string(&options).unwrap();
    let parsed: FormatterOptions = serde_yaml::from_str(&text).unwrap();
    assert_eq!(parsed, options);

    let syntax: Syntax = serde_yaml::from_str("gas").unwrap();
    assert_eq!(syntax, Syntax::Gas);
    assert!(serde_yaml::from_str::<Syntax>("intel").is_err());
}
