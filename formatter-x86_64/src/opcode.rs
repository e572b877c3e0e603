//! Static per-opcode formatting information.
//!
//! The [`Opcode`] enum and its table are generated by one macro invocation, so every opcode
//! has exactly one entry and lookups are a plain index.

use crate::options::CcGroup;

bitflags::bitflags! {
    /// Formatting behaviour shared by every dialect.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct OpFlags: u32 {
        /// `lock` has an effect.
        const LOCKABLE = 1 << 0;
        /// `xacquire`/`xrelease` are meaningful without `lock`.
        const HLE = 1 << 1;
        /// `rep` has an effect.
        const REP = 1 << 2;
        /// `rep`/`repne` are shown as `repe`/`repne`.
        const REPE_REPNE = 1 << 3;
        /// String instruction with implicit `si`/`di` operands.
        const STRING = 1 << 4;
        /// `repne` is shown as `bnd`.
        const BND = 1 << 5;
        /// A `ds` override on the indirect form is shown as `notrack`.
        const NOTRACK = 1 << 6;
        const BRANCH = 1 << 7;
        const CALL = 1 << 8;
        /// `cs`/`ds` overrides are branch hints.
        const BRANCH_HINT = 1 << 9;
        /// The memory operand is never dereferenced, e.g. `lea`.
        const MEM_SIZE_IGNORED = 1 << 10;
        const FORCE_MEM_SIZE = 1 << 11;
        /// The operand size prefix changes the size of the stack access.
        const STACK = 1 << 12;
        /// The address size prefix changes the counter register.
        const ADDR_SIZE = 1 << 13;
        const DIRECTIVE = 1 << 14;
        /// at&t syntax keeps intel operand order.
        const KEEP_OPERAND_ORDER = 1 << 15;
        /// at&t size suffix `b`/`w`/`l`/`q`.
        const SUFFIX_INT = 1 << 16;
        /// at&t size suffix `s`/`l`/`t` of x87 float operands.
        const SUFFIX_FP = 1 << 17;
        /// at&t size suffix `s`/`l`/`ll` of x87 integer operands.
        const SUFFIX_FPINT = 1 << 18;
    }
}

/// Dialect independent mnemonic rewrites.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum InfoKind {
    Plain,
    /// Condition code aliases, chosen by the selector of the group.
    Cc(CcGroup, &'static [&'static str]),
    /// Mnemonics selected by the trailing immediate.
    Pseudo(&'static [&'static str]),
    /// Like [`InfoKind::Pseudo`], but the immediate selects `0x00`, `0x01`, `0x10` or `0x11`.
    PseudoPclmul(&'static [&'static str; 4]),
    /// Different at&t mnemonic.
    Gas(&'static str),
    /// at&t `movz`/`movs` taking a source and destination suffix.
    GasMovx(&'static str),
    /// at&t name of the register form with a destination other than `st`.
    GasFpuSwap(&'static str),
    /// Mnemonic used when a string instruction is shown with its operands.
    Str(&'static str),
    /// Data directive and its element width.
    Data(u8),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct OpcodeInfo {
    pub name: &'static str,
    pub flags: OpFlags,
    pub kind: InfoKind,
}

macro_rules! cmp_names {
    ($prefix:literal, $suffix:literal; $($pred:literal),+) => {
        &[$(concat!($prefix, $pred, $suffix)),+]
    };
}

macro_rules! legacy_cmp {
    ($prefix:literal, $suffix:literal) => {
        cmp_names!($prefix, $suffix; "eq", "lt", "le", "unord", "neq", "nlt", "nle", "ord")
    };
}

macro_rules! vex_cmp {
    ($prefix:literal, $suffix:literal) => {
        cmp_names!($prefix, $suffix;
            "eq", "lt", "le", "unord", "neq", "nlt", "nle", "ord",
            "eq_uq", "nge", "ngt", "false", "neq_oq", "ge", "gt", "true",
            "eq_os", "lt_oq", "le_oq", "unord_s", "neq_us", "nlt_uq", "nle_uq", "ord_s",
            "eq_us", "nge_uq", "ngt_uq", "false_os", "neq_os", "ge_oq", "gt_oq", "true_us"
        )
    };
}

macro_rules! int_cmp {
    ($suffix:literal) => {
        cmp_names!("vpcmp", $suffix; "eq", "lt", "le", "false", "neq", "nlt", "nle", "true")
    };
}

macro_rules! pclmul {
    ($prefix:literal) => {
        &[
            concat!($prefix, "lqlqdq"),
            concat!($prefix, "hqlqdq"),
            concat!($prefix, "lqhqdq"),
            concat!($prefix, "hqhqdq"),
        ]
    };
}

macro_rules! cc {
    (B, $p:literal) => { InfoKind::Cc(CcGroup::B, &[concat!($p, "b"), concat!($p, "c"), concat!($p, "nae")]) };
    (Ae, $p:literal) => { InfoKind::Cc(CcGroup::Ae, &[concat!($p, "ae"), concat!($p, "nb"), concat!($p, "nc")]) };
    (E, $p:literal) => { InfoKind::Cc(CcGroup::E, &[concat!($p, "e"), concat!($p, "z")]) };
    (Ne, $p:literal) => { InfoKind::Cc(CcGroup::Ne, &[concat!($p, "ne"), concat!($p, "nz")]) };
    (Be, $p:literal) => { InfoKind::Cc(CcGroup::Be, &[concat!($p, "be"), concat!($p, "na")]) };
    (A, $p:literal) => { InfoKind::Cc(CcGroup::A, &[concat!($p, "a"), concat!($p, "nbe")]) };
    (P, $p:literal) => { InfoKind::Cc(CcGroup::P, &[concat!($p, "p"), concat!($p, "pe")]) };
    (Np, $p:literal) => { InfoKind::Cc(CcGroup::Np, &[concat!($p, "np"), concat!($p, "po")]) };
    (L, $p:literal) => { InfoKind::Cc(CcGroup::L, &[concat!($p, "l"), concat!($p, "nge")]) };
    (Ge, $p:literal) => { InfoKind::Cc(CcGroup::Ge, &[concat!($p, "ge"), concat!($p, "nl")]) };
    (Le, $p:literal) => { InfoKind::Cc(CcGroup::Le, &[concat!($p, "le"), concat!($p, "ng")]) };
    (G, $p:literal) => { InfoKind::Cc(CcGroup::G, &[concat!($p, "g"), concat!($p, "nle")]) };
}

macro_rules! opcodes {
    (@kind) => { InfoKind::Plain };
    (@kind $kind:expr) => { $kind };

    ($($variant:ident = $name:literal [$($flag:ident)|*] $(=> $kind:expr)?),+ $(,)?) => {
        /// Every instruction the formatters know about.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Opcode {
            $($variant),+
        }

        static OPCODE_INFO: &[OpcodeInfo] = &[
            $(OpcodeInfo {
                name: $name,
                flags: OpFlags::from_bits_retain(0 $(| OpFlags::$flag.bits())*),
                kind: opcodes!(@kind $($kind)?),
            }),+
        ];
    };
}

opcodes! {
    // integer
    Add = "add" [LOCKABLE | SUFFIX_INT],
    Or = "or" [LOCKABLE | SUFFIX_INT],
    Adc = "adc" [LOCKABLE | SUFFIX_INT],
    Sbb = "sbb" [LOCKABLE | SUFFIX_INT],
    And = "and" [LOCKABLE | SUFFIX_INT],
    Sub = "sub" [LOCKABLE | SUFFIX_INT],
    Xor = "xor" [LOCKABLE | SUFFIX_INT],
    Cmp = "cmp" [SUFFIX_INT],
    Test = "test" [SUFFIX_INT],
    Mov = "mov" [HLE | SUFFIX_INT],
    Movzx = "movzx" [] => InfoKind::GasMovx("movz"),
    Movsx = "movsx" [] => InfoKind::GasMovx("movs"),
    Movsxd = "movsxd" [] => InfoKind::GasMovx("movs"),
    Movbe = "movbe" [SUFFIX_INT],
    Lea = "lea" [MEM_SIZE_IGNORED | SUFFIX_INT],
    Xchg = "xchg" [HLE | SUFFIX_INT],
    Xadd = "xadd" [LOCKABLE | SUFFIX_INT],
    Cmpxchg = "cmpxchg" [LOCKABLE | SUFFIX_INT],
    Cmpxchg8b = "cmpxchg8b" [LOCKABLE],
    Cmpxchg16b = "cmpxchg16b" [LOCKABLE],
    Inc = "inc" [LOCKABLE | SUFFIX_INT],
    Dec = "dec" [LOCKABLE | SUFFIX_INT],
    Neg = "neg" [LOCKABLE | SUFFIX_INT],
    Not = "not" [LOCKABLE | SUFFIX_INT],
    Mul = "mul" [SUFFIX_INT],
    Imul = "imul" [SUFFIX_INT],
    Div = "div" [SUFFIX_INT],
    Idiv = "idiv" [SUFFIX_INT],
    Shl = "shl" [SUFFIX_INT],
    Shr = "shr" [SUFFIX_INT],
    Sar = "sar" [SUFFIX_INT],
    Rol = "rol" [SUFFIX_INT],
    Ror = "ror" [SUFFIX_INT],
    Rcl = "rcl" [SUFFIX_INT],
    Rcr = "rcr" [SUFFIX_INT],
    Shld = "shld" [SUFFIX_INT],
    Shrd = "shrd" [SUFFIX_INT],
    Bt = "bt" [SUFFIX_INT],
    Bts = "bts" [LOCKABLE | SUFFIX_INT],
    Btr = "btr" [LOCKABLE | SUFFIX_INT],
    Btc = "btc" [LOCKABLE | SUFFIX_INT],
    Bsf = "bsf" [SUFFIX_INT],
    Bsr = "bsr" [SUFFIX_INT],
    Popcnt = "popcnt" [SUFFIX_INT],
    Lzcnt = "lzcnt" [SUFFIX_INT],
    Tzcnt = "tzcnt" [SUFFIX_INT],
    Bswap = "bswap" [],
    Crc32 = "crc32" [SUFFIX_INT],
    Andn = "andn" [],
    Bextr = "bextr" [],
    Blsi = "blsi" [],
    Blsr = "blsr" [],
    Pdep = "pdep" [],
    Pext = "pext" [],
    Rorx = "rorx" [],
    Sarx = "sarx" [],
    Shlx = "shlx" [],
    Shrx = "shrx" [],
    Mulx = "mulx" [],
    Push = "push" [STACK | SUFFIX_INT],
    Pop = "pop" [STACK | SUFFIX_INT],
    Pushfq = "pushfq" [],
    Popfq = "popfq" [],
    Pushfd = "pushfd" [],
    Popfd = "popfd" [],
    Cbw = "cbw" [] => InfoKind::Gas("cbtw"),
    Cwde = "cwde" [] => InfoKind::Gas("cwtl"),
    Cdqe = "cdqe" [] => InfoKind::Gas("cltq"),
    Cwd = "cwd" [] => InfoKind::Gas("cwtd"),
    Cdq = "cdq" [] => InfoKind::Gas("cltd"),
    Cqo = "cqo" [] => InfoKind::Gas("cqto"),
    Enter = "enter" [STACK | KEEP_OPERAND_ORDER],
    Leave = "leave" [STACK],

    // system and misc
    Nop = "nop" [SUFFIX_INT],
    Hlt = "hlt" [],
    Int3 = "int3" [],
    Int = "int" [],
    Ud2 = "ud2" [],
    Cpuid = "cpuid" [],
    Rdtsc = "rdtsc" [],
    Rdtscp = "rdtscp" [],
    Rdrand = "rdrand" [],
    Rdseed = "rdseed" [],
    Rdmsr = "rdmsr" [],
    Wrmsr = "wrmsr" [],
    Xgetbv = "xgetbv" [],
    Syscall = "syscall" [],
    Sysret = "sysret" [],
    Sysenter = "sysenter" [],
    Sysexit = "sysexit" [],
    Iretd = "iretd" [],
    Iretq = "iretq" [],
    Pause = "pause" [],
    Lfence = "lfence" [],
    Mfence = "mfence" [],
    Sfence = "sfence" [],
    Clflush = "clflush" [MEM_SIZE_IGNORED],
    Clflushopt = "clflushopt" [MEM_SIZE_IGNORED],
    Prefetchnta = "prefetchnta" [MEM_SIZE_IGNORED],
    Prefetcht0 = "prefetcht0" [MEM_SIZE_IGNORED],
    Invlpg = "invlpg" [MEM_SIZE_IGNORED],
    Wbinvd = "wbinvd" [],
    Lgdt = "lgdt" [],
    Lidt = "lidt" [],
    Sgdt = "sgdt" [],
    Sidt = "sidt" [],
    Xsave = "xsave" [],
    Xrstor = "xrstor" [],
    Cmc = "cmc" [],
    Clc = "clc" [],
    Stc = "stc" [],
    Cld = "cld" [],
    Std = "std" [],
    Cli = "cli" [],
    Sti = "sti" [],
    Lahf = "lahf" [],
    Sahf = "sahf" [],
    In = "in" [],
    Out = "out" [],
    Endbr32 = "endbr32" [],
    Endbr64 = "endbr64" [],
    Xlatb = "xlatb" [],

    // control flow
    Jmp = "jmp" [BRANCH | BND | NOTRACK],
    Call = "call" [BRANCH | CALL | BND | NOTRACK | STACK],
    Ret = "ret" [BRANCH | BND | STACK],
    Retf = "retf" [STACK] => InfoKind::Gas("lret"),
    JmpFar = "jmp" [BRANCH | FORCE_MEM_SIZE] => InfoKind::Gas("ljmp"),
    CallFar = "call" [BRANCH | CALL | FORCE_MEM_SIZE] => InfoKind::Gas("lcall"),
    Jo = "jo" [BRANCH | BRANCH_HINT | BND],
    Jno = "jno" [BRANCH | BRANCH_HINT | BND],
    Jb = "jb" [BRANCH | BRANCH_HINT | BND] => cc!(B, "j"),
    Jae = "jae" [BRANCH | BRANCH_HINT | BND] => cc!(Ae, "j"),
    Je = "je" [BRANCH | BRANCH_HINT | BND] => cc!(E, "j"),
    Jne = "jne" [BRANCH | BRANCH_HINT | BND] => cc!(Ne, "j"),
    Jbe = "jbe" [BRANCH | BRANCH_HINT | BND] => cc!(Be, "j"),
    Ja = "ja" [BRANCH | BRANCH_HINT | BND] => cc!(A, "j"),
    Js = "js" [BRANCH | BRANCH_HINT | BND],
    Jns = "jns" [BRANCH | BRANCH_HINT | BND],
    Jp = "jp" [BRANCH | BRANCH_HINT | BND] => cc!(P, "j"),
    Jnp = "jnp" [BRANCH | BRANCH_HINT | BND] => cc!(Np, "j"),
    Jl = "jl" [BRANCH | BRANCH_HINT | BND] => cc!(L, "j"),
    Jge = "jge" [BRANCH | BRANCH_HINT | BND] => cc!(Ge, "j"),
    Jle = "jle" [BRANCH | BRANCH_HINT | BND] => cc!(Le, "j"),
    Jg = "jg" [BRANCH | BRANCH_HINT | BND] => cc!(G, "j"),
    Jcxz = "jcxz" [BRANCH],
    Jecxz = "jecxz" [BRANCH],
    Jrcxz = "jrcxz" [BRANCH],
    Loop = "loop" [BRANCH | ADDR_SIZE],
    Loope = "loope" [BRANCH | ADDR_SIZE] => InfoKind::Cc(CcGroup::E, &["loope", "loopz"]),
    Loopne = "loopne" [BRANCH | ADDR_SIZE] => InfoKind::Cc(CcGroup::Ne, &["loopne", "loopnz"]),
    Xbegin = "xbegin" [BRANCH],
    Xend = "xend" [],
    Xabort = "xabort" [],
    Xtest = "xtest" [],

    Seto = "seto" [],
    Setno = "setno" [],
    Setb = "setb" [] => cc!(B, "set"),
    Setae = "setae" [] => cc!(Ae, "set"),
    Sete = "sete" [] => cc!(E, "set"),
    Setne = "setne" [] => cc!(Ne, "set"),
    Setbe = "setbe" [] => cc!(Be, "set"),
    Seta = "seta" [] => cc!(A, "set"),
    Sets = "sets" [],
    Setns = "setns" [],
    Setp = "setp" [] => cc!(P, "set"),
    Setnp = "setnp" [] => cc!(Np, "set"),
    Setl = "setl" [] => cc!(L, "set"),
    Setge = "setge" [] => cc!(Ge, "set"),
    Setle = "setle" [] => cc!(Le, "set"),
    Setg = "setg" [] => cc!(G, "set"),

    Cmovo = "cmovo" [],
    Cmovno = "cmovno" [],
    Cmovb = "cmovb" [] => cc!(B, "cmov"),
    Cmovae = "cmovae" [] => cc!(Ae, "cmov"),
    Cmove = "cmove" [] => cc!(E, "cmov"),
    Cmovne = "cmovne" [] => cc!(Ne, "cmov"),
    Cmovbe = "cmovbe" [] => cc!(Be, "cmov"),
    Cmova = "cmova" [] => cc!(A, "cmov"),
    Cmovs = "cmovs" [],
    Cmovns = "cmovns" [],
    Cmovp = "cmovp" [] => cc!(P, "cmov"),
    Cmovnp = "cmovnp" [] => cc!(Np, "cmov"),
    Cmovl = "cmovl" [] => cc!(L, "cmov"),
    Cmovge = "cmovge" [] => cc!(Ge, "cmov"),
    Cmovle = "cmovle" [] => cc!(Le, "cmov"),
    Cmovg = "cmovg" [] => cc!(G, "cmov"),

    // strings
    Movsb = "movsb" [STRING | REP] => InfoKind::Str("movs"),
    Movsw = "movsw" [STRING | REP] => InfoKind::Str("movs"),
    Movsd = "movsd" [STRING | REP] => InfoKind::Str("movs"),
    Movsq = "movsq" [STRING | REP] => InfoKind::Str("movs"),
    Cmpsb = "cmpsb" [STRING | REPE_REPNE] => InfoKind::Str("cmps"),
    Cmpsw = "cmpsw" [STRING | REPE_REPNE] => InfoKind::Str("cmps"),
    Cmpsd = "cmpsd" [STRING | REPE_REPNE] => InfoKind::Str("cmps"),
    Cmpsq = "cmpsq" [STRING | REPE_REPNE] => InfoKind::Str("cmps"),
    Stosb = "stosb" [STRING | REP] => InfoKind::Str("stos"),
    Stosw = "stosw" [STRING | REP] => InfoKind::Str("stos"),
    Stosd = "stosd" [STRING | REP] => InfoKind::Str("stos"),
    Stosq = "stosq" [STRING | REP] => InfoKind::Str("stos"),
    Lodsb = "lodsb" [STRING | REP] => InfoKind::Str("lods"),
    Lodsw = "lodsw" [STRING | REP] => InfoKind::Str("lods"),
    Lodsd = "lodsd" [STRING | REP] => InfoKind::Str("lods"),
    Lodsq = "lodsq" [STRING | REP] => InfoKind::Str("lods"),
    Scasb = "scasb" [STRING | REPE_REPNE] => InfoKind::Str("scas"),
    Scasw = "scasw" [STRING | REPE_REPNE] => InfoKind::Str("scas"),
    Scasd = "scasd" [STRING | REPE_REPNE] => InfoKind::Str("scas"),
    Scasq = "scasq" [STRING | REPE_REPNE] => InfoKind::Str("scas"),
    Insb = "insb" [STRING | REP] => InfoKind::Str("ins"),
    Insw = "insw" [STRING | REP] => InfoKind::Str("ins"),
    Insd = "insd" [STRING | REP] => InfoKind::Str("ins"),
    Outsb = "outsb" [STRING | REP] => InfoKind::Str("outs"),
    Outsw = "outsw" [STRING | REP] => InfoKind::Str("outs"),
    Outsd = "outsd" [STRING | REP] => InfoKind::Str("outs"),

    // x87
    Fld = "fld" [SUFFIX_FP],
    Fst = "fst" [SUFFIX_FP],
    Fstp = "fstp" [SUFFIX_FP],
    Fild = "fild" [SUFFIX_FPINT],
    Fist = "fist" [SUFFIX_FPINT],
    Fistp = "fistp" [SUFFIX_FPINT],
    Fisttp = "fisttp" [SUFFIX_FPINT],
    Fbld = "fbld" [],
    Fbstp = "fbstp" [],
    Fadd = "fadd" [SUFFIX_FP],
    Fmul = "fmul" [SUFFIX_FP],
    Fcom = "fcom" [SUFFIX_FP],
    Fcomp = "fcomp" [SUFFIX_FP],
    Fsub = "fsub" [SUFFIX_FP] => InfoKind::GasFpuSwap("fsubr"),
    Fsubr = "fsubr" [SUFFIX_FP] => InfoKind::GasFpuSwap("fsub"),
    Fdiv = "fdiv" [SUFFIX_FP] => InfoKind::GasFpuSwap("fdivr"),
    Fdivr = "fdivr" [SUFFIX_FP] => InfoKind::GasFpuSwap("fdiv"),
    Faddp = "faddp" [],
    Fmulp = "fmulp" [],
    Fsubp = "fsubp" [] => InfoKind::GasFpuSwap("fsubrp"),
    Fsubrp = "fsubrp" [] => InfoKind::GasFpuSwap("fsubp"),
    Fdivp = "fdivp" [] => InfoKind::GasFpuSwap("fdivrp"),
    Fdivrp = "fdivrp" [] => InfoKind::GasFpuSwap("fdivp"),
    Fiadd = "fiadd" [SUFFIX_FPINT],
    Fimul = "fimul" [SUFFIX_FPINT],
    Fisub = "fisub" [SUFFIX_FPINT],
    Fidiv = "fidiv" [SUFFIX_FPINT],
    Fxch = "fxch" [],
    Fucom = "fucom" [],
    Fucomi = "fucomi" [],
    Fucomip = "fucomip" [],
    Fcomi = "fcomi" [],
    Fcomip = "fcomip" [],
    Fchs = "fchs" [],
    Fabs = "fabs" [],
    Fsqrt = "fsqrt" [],
    Fsin = "fsin" [],
    Fcos = "fcos" [],
    Fldz = "fldz" [],
    Fld1 = "fld1" [],
    Fldpi = "fldpi" [],
    Fnstsw = "fnstsw" [],
    Fnstcw = "fnstcw" [],
    Fldcw = "fldcw" [],
    Fninit = "fninit" [],
    Fwait = "fwait" [],
    Fxsave = "fxsave" [],
    Fxrstor = "fxrstor" [],

    // sse
    Movaps = "movaps" [],
    Movups = "movups" [],
    Movapd = "movapd" [],
    Movdqa = "movdqa" [],
    Movdqu = "movdqu" [],
    Movd = "movd" [],
    Movq = "movq" [],
    MovssXmm = "movss" [],
    MovsdXmm = "movsd" [],
    Addps = "addps" [],
    Addpd = "addpd" [],
    Addss = "addss" [],
    Addsd = "addsd" [],
    Subps = "subps" [],
    Mulps = "mulps" [],
    Divps = "divps" [],
    Sqrtps = "sqrtps" [],
    Andps = "andps" [],
    Orps = "orps" [],
    Xorps = "xorps" [],
    Pxor = "pxor" [],
    Paddd = "paddd" [],
    Paddq = "paddq" [],
    Pshufd = "pshufd" [],
    Shufps = "shufps" [],
    Cvtsi2sd = "cvtsi2sd" [SUFFIX_INT],
    Cvtsi2ss = "cvtsi2ss" [SUFFIX_INT],
    Cvttsd2si = "cvttsd2si" [],
    Cvtss2sd = "cvtss2sd" [],
    Cvtsd2ss = "cvtsd2ss" [],
    Comiss = "comiss" [],
    Ucomiss = "ucomiss" [],
    Cmpps = "cmpps" [] => InfoKind::Pseudo(legacy_cmp!("cmp", "ps")),
    Cmppd = "cmppd" [] => InfoKind::Pseudo(legacy_cmp!("cmp", "pd")),
    Cmpss = "cmpss" [] => InfoKind::Pseudo(legacy_cmp!("cmp", "ss")),
    CmpsdXmm = "cmpsd" [] => InfoKind::Pseudo(legacy_cmp!("cmp", "sd")),
    Pclmulqdq = "pclmulqdq" [] => InfoKind::PseudoPclmul(pclmul!("pclmul")),
    Extrq = "extrq" [KEEP_OPERAND_ORDER],
    Insertq = "insertq" [KEEP_OPERAND_ORDER],

    // avx and avx512
    Vmovaps = "vmovaps" [],
    Vmovups = "vmovups" [],
    Vmovdqa = "vmovdqa" [],
    Vmovdqu = "vmovdqu" [],
    Vmovdqa32 = "vmovdqa32" [],
    Vmovdqa64 = "vmovdqa64" [],
    Vmovdqu32 = "vmovdqu32" [],
    Vmovdqu64 = "vmovdqu64" [],
    Vaddps = "vaddps" [],
    Vaddpd = "vaddpd" [],
    Vaddss = "vaddss" [],
    Vaddsd = "vaddsd" [],
    Vsubps = "vsubps" [],
    Vmulps = "vmulps" [],
    Vdivps = "vdivps" [],
    Vsqrtps = "vsqrtps" [],
    Vxorps = "vxorps" [],
    Vpxor = "vpxor" [],
    Vpxord = "vpxord" [],
    Vpxorq = "vpxorq" [],
    Vpaddd = "vpaddd" [],
    Vpaddq = "vpaddq" [],
    Vbroadcastss = "vbroadcastss" [],
    Vpbroadcastd = "vpbroadcastd" [],
    Vfmadd213ps = "vfmadd213ps" [],
    Vfmadd231ps = "vfmadd231ps" [],
    Vpermd = "vpermd" [],
    Vpermq = "vpermq" [],
    Vpternlogd = "vpternlogd" [],
    Vcvtps2pd = "vcvtps2pd" [],
    Vcvtpd2ps = "vcvtpd2ps" [FORCE_MEM_SIZE],
    Vcvtsi2sd = "vcvtsi2sd" [SUFFIX_INT],
    Vgatherdps = "vgatherdps" [],
    Vpgatherdd = "vpgatherdd" [],
    Vscatterdps = "vscatterdps" [],
    Vextracti128 = "vextracti128" [],
    Vinserti128 = "vinserti128" [],
    Vextractf32x4 = "vextractf32x4" [],
    Vzeroupper = "vzeroupper" [],
    Vcmpps = "vcmpps" [] => InfoKind::Pseudo(vex_cmp!("vcmp", "ps")),
    Vcmppd = "vcmppd" [] => InfoKind::Pseudo(vex_cmp!("vcmp", "pd")),
    Vcmpss = "vcmpss" [] => InfoKind::Pseudo(vex_cmp!("vcmp", "ss")),
    Vcmpsd = "vcmpsd" [] => InfoKind::Pseudo(vex_cmp!("vcmp", "sd")),
    Vpclmulqdq = "vpclmulqdq" [] => InfoKind::PseudoPclmul(pclmul!("vpclmul")),
    Vpcmpb = "vpcmpb" [] => InfoKind::Pseudo(int_cmp!("b")),
    Vpcmpub = "vpcmpub" [] => InfoKind::Pseudo(int_cmp!("ub")),
    Vpcmpw = "vpcmpw" [] => InfoKind::Pseudo(int_cmp!("w")),
    Vpcmpuw = "vpcmpuw" [] => InfoKind::Pseudo(int_cmp!("uw")),
    Vpcmpd = "vpcmpd" [] => InfoKind::Pseudo(int_cmp!("d")),
    Vpcmpud = "vpcmpud" [] => InfoKind::Pseudo(int_cmp!("ud")),
    Vpcmpq = "vpcmpq" [] => InfoKind::Pseudo(int_cmp!("q")),
    Vpcmpuq = "vpcmpuq" [] => InfoKind::Pseudo(int_cmp!("uq")),
    Kmovw = "kmovw" [],
    Kmovq = "kmovq" [],
    Kandw = "kandw" [],
    Korw = "korw" [],
    Kxorw = "kxorw" [],
    Knotw = "knotw" [],
    Kortestw = "kortestw" [],

    // mpx
    Bndmk = "bndmk" [MEM_SIZE_IGNORED],
    Bndcl = "bndcl" [],
    Bndcu = "bndcu" [],
    Bndmov = "bndmov" [],

    // data directives
    Db = "db" [DIRECTIVE] => InfoKind::Data(1),
    Dw = "dw" [DIRECTIVE] => InfoKind::Data(2),
    Dd = "dd" [DIRECTIVE] => InfoKind::Data(4),
    Dq = "dq" [DIRECTIVE] => InfoKind::Data(8),
}

impl Opcode {
    #[inline]
    pub(crate) fn info(self) -> &'static OpcodeInfo {
        &OPCODE_INFO[self as usize]
    }

    /// Intel mnemonic of this opcode.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn flags(self) -> OpFlags {
        self.info().flags
    }

    /// Number of opcodes, every discriminant is below this.
    pub fn count() -> usize {
        OPCODE_INFO.len()
    }
}

/// Maps the `pclmulqdq` immediate onto its pseudo-op slot.
pub(crate) fn pclmul_index(imm: u8) -> Option<usize> {
    match imm {
        0x00 => Some(0),
        0x01 => Some(1),
        0x10 => Some(2),
        0x11 => Some(3),
        _ => None,
    }
}
