use std::fmt;
use std::hash::{Hash, Hasher};

/// an `x86` register, including its number and class.
///
/// ```
/// use x86_64::{Register, RegisterClass};
///
/// assert_eq!(Register::ecx().num(), 1);
/// assert_eq!(Register::ecx().class(), RegisterClass::D);
/// ```
///
/// some registers have classes of their own and only one member: `rip` and `eip`.
/// [`Register::NONE`] stands in for an absent base, index, segment or mask register.
#[derive(Copy, Clone, Debug, PartialOrd, Ord, Eq, PartialEq)]
pub struct Register {
    num: u8,
    class: RegisterClass,
}

impl Hash for Register {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let code = ((self.class as u16) << 8) | (self.num as u16);
        code.hash(state);
    }
}

/// the kind of a register, which decides its width and how it's named.
#[derive(Copy, Clone, Debug, PartialOrd, Ord, Eq, PartialEq, Hash)]
#[allow(non_camel_case_types)]
pub enum RegisterClass {
    None,
    /// 64-bit general purpose.
    Q,
    /// 32-bit general purpose.
    D,
    /// 16-bit general purpose.
    W,
    /// legacy byte registers, `al` through `bh`.
    B,
    /// byte registers only reachable with a rex prefix, `spl` through `r15b`.
    rB,
    /// segment selectors.
    S,
    CR,
    DR,
    /// x87 stack.
    ST,
    MM,
    X,
    Y,
    Z,
    /// avx512 opmask registers.
    K,
    BND,
    RIP,
    EIP,
}

impl RegisterClass {
    /// size of a register in this class, in bytes.
    pub fn width(self) -> u8 {
        match self {
            RegisterClass::None => 0,
            RegisterClass::Q | RegisterClass::CR | RegisterClass::DR | RegisterClass::RIP => 8,
            RegisterClass::D | RegisterClass::EIP => 4,
            RegisterClass::W | RegisterClass::S => 2,
            RegisterClass::B | RegisterClass::rB => 1,
            RegisterClass::ST => 10,
            RegisterClass::MM | RegisterClass::K => 8,
            RegisterClass::X | RegisterClass::BND => 16,
            RegisterClass::Y => 32,
            RegisterClass::Z => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RegisterClass::None => "none",
            RegisterClass::Q => "qword",
            RegisterClass::D => "dword",
            RegisterClass::W => "word",
            RegisterClass::B => "byte",
            RegisterClass::rB => "rex-byte",
            RegisterClass::S => "segment",
            RegisterClass::CR => "control",
            RegisterClass::DR => "debug",
            RegisterClass::ST => "x87-stack",
            RegisterClass::MM => "mmx",
            RegisterClass::X => "xmm",
            RegisterClass::Y => "ymm",
            RegisterClass::Z => "zmm",
            RegisterClass::K => "mask",
            RegisterClass::BND => "bound",
            RegisterClass::RIP => "rip",
            RegisterClass::EIP => "eip",
        }
    }
}

macro_rules! register {
    ($class:ident, $name:ident => $num:expr, $($tail:tt)+) => {
        #[inline]
        pub const fn $name() -> Register {
            Register { class: RegisterClass::$class, num: $num }
        }

        register!($class, $($tail)*);
    };
    ($class:ident, $name:ident => $num:expr) => {
        #[inline]
        pub const fn $name() -> Register {
            Register { class: RegisterClass::$class, num: $num }
        }
    };
}

macro_rules! numbered {
    ($(#[$doc:meta])* $name:ident, $class:ident, $count:expr) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(num: u8) -> Register {
            if num >= $count {
                panic!(concat!("invalid ", stringify!($name), " register {}"), num);
            }

            Register {
                num,
                class: RegisterClass::$class,
            }
        }
    };
}

const Q_NAMES: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi",
    "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15",
];

const D_NAMES: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi",
    "r8d", "r9d", "r10d", "r11d", "r12d", "r13d", "r14d", "r15d",
];

const W_NAMES: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di",
    "r8w", "r9w", "r10w", "r11w", "r12w", "r13w", "r14w", "r15w",
];

const B_NAMES: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

const REX_B_NAMES: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil",
    "r8b", "r9b", "r10b", "r11b", "r12b", "r13b", "r14b", "r15b",
];

const S_NAMES: [&str; 6] = ["es", "cs", "ss", "ds", "fs", "gs"];

const CR_NAMES: [&str; 16] = [
    "cr0", "cr1", "cr2", "cr3", "cr4", "cr5", "cr6", "cr7",
    "cr8", "cr9", "cr10", "cr11", "cr12", "cr13", "cr14", "cr15",
];

const DR_NAMES: [&str; 16] = [
    "dr0", "dr1", "dr2", "dr3", "dr4", "dr5", "dr6", "dr7",
    "dr8", "dr9", "dr10", "dr11", "dr12", "dr13", "dr14", "dr15",
];

const ST_NAMES: [&str; 8] = [
    "st(0)", "st(1)", "st(2)", "st(3)", "st(4)", "st(5)", "st(6)", "st(7)",
];

const ST_PLAIN_NAMES: [&str; 8] = ["st0", "st1", "st2", "st3", "st4", "st5", "st6", "st7"];

const MM_NAMES: [&str; 8] = ["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"];

const X_NAMES: [&str; 32] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7",
    "xmm8", "xmm9", "xmm10", "xmm11", "xmm12", "xmm13", "xmm14", "xmm15",
    "xmm16", "xmm17", "xmm18", "xmm19", "xmm20", "xmm21", "xmm22", "xmm23",
    "xmm24", "xmm25", "xmm26", "xmm27", "xmm28", "xmm29", "xmm30", "xmm31",
];

const Y_NAMES: [&str; 32] = [
    "ymm0", "ymm1", "ymm2", "ymm3", "ymm4", "ymm5", "ymm6", "ymm7",
    "ymm8", "ymm9", "ymm10", "ymm11", "ymm12", "ymm13", "ymm14", "ymm15",
    "ymm16", "ymm17", "ymm18", "ymm19", "ymm20", "ymm21", "ymm22", "ymm23",
    "ymm24", "ymm25", "ymm26", "ymm27", "ymm28", "ymm29", "ymm30", "ymm31",
];

const Z_NAMES: [&str; 32] = [
    "zmm0", "zmm1", "zmm2", "zmm3", "zmm4", "zmm5", "zmm6", "zmm7",
    "zmm8", "zmm9", "zmm10", "zmm11", "zmm12", "zmm13", "zmm14", "zmm15",
    "zmm16", "zmm17", "zmm18", "zmm19", "zmm20", "zmm21", "zmm22", "zmm23",
    "zmm24", "zmm25", "zmm26", "zmm27", "zmm28", "zmm29", "zmm30", "zmm31",
];

const K_NAMES: [&str; 8] = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"];

const BND_NAMES: [&str; 4] = ["bnd0", "bnd1", "bnd2", "bnd3"];

#[allow(non_snake_case)]
impl Register {
    pub const NONE: Register = Register {
        num: 0,
        class: RegisterClass::None,
    };

    /// the register `rip`. this register is in the class `rip`, which contains only it.
    pub const RIP: Register = Register::rip();

    /// the number of this register in its class.
    ///
    /// for registers harkening back to `x86_32`, the first eight registers are `rax`, `rcx`,
    /// `rdx`, `rbx`, `rsp`, `rbp`, `rsi`, and `rdi` (or `eXX` for the 32-bit forms, `XX` for
    /// 16-bit forms).
    #[inline]
    pub fn num(&self) -> u8 {
        self.num
    }

    #[inline]
    pub fn class(&self) -> RegisterClass {
        self.class
    }

    /// return the size of this register, in bytes.
    #[inline]
    pub fn width(&self) -> u8 {
        self.class.width()
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.class == RegisterClass::None
    }

    /// general purpose registers of any width.
    pub fn is_gp(&self) -> bool {
        matches!(
            self.class,
            RegisterClass::Q
                | RegisterClass::D
                | RegisterClass::W
                | RegisterClass::B
                | RegisterClass::rB
        )
    }

    /// `xmm`, `ymm` and `zmm` registers.
    pub fn is_vector(&self) -> bool {
        matches!(self.class, RegisterClass::X | RegisterClass::Y | RegisterClass::Z)
    }

    pub fn is_instruction_pointer(&self) -> bool {
        matches!(self.class, RegisterClass::RIP | RegisterClass::EIP)
    }

    /// `ss`-relative base registers: `rsp`, `rbp` and their narrower forms.
    pub(crate) fn is_stack_base(&self) -> bool {
        matches!(self.class, RegisterClass::Q | RegisterClass::D | RegisterClass::W)
            && (self.num == 4 || self.num == 5)
    }

    /// return a human-friendly name for this register, as used in intel syntax.
    pub fn name(&self) -> &'static str {
        let num = self.num as usize;
        match self.class {
            RegisterClass::None => "",
            RegisterClass::Q => Q_NAMES[num],
            RegisterClass::D => D_NAMES[num],
            RegisterClass::W => W_NAMES[num],
            RegisterClass::B => B_NAMES[num],
            RegisterClass::rB => REX_B_NAMES[num],
            RegisterClass::S => S_NAMES[num],
            RegisterClass::CR => CR_NAMES[num],
            RegisterClass::DR => DR_NAMES[num],
            RegisterClass::ST => ST_NAMES[num],
            RegisterClass::MM => MM_NAMES[num],
            RegisterClass::X => X_NAMES[num],
            RegisterClass::Y => Y_NAMES[num],
            RegisterClass::Z => Z_NAMES[num],
            RegisterClass::K => K_NAMES[num],
            RegisterClass::BND => BND_NAMES[num],
            RegisterClass::RIP => "rip",
            RegisterClass::EIP => "eip",
        }
    }

    /// x87 names without parentheses, `st0` through `st7`.
    pub(crate) fn plain_st_name(&self) -> &'static str {
        ST_PLAIN_NAMES[self.num as usize]
    }

    numbered!(
        /// construct a `Register` for x87 register `st(num)`
        st, ST, 8
    );
    numbered!(
        /// construct a `Register` for xmm reg `num`
        xmm, X, 32
    );
    numbered!(
        /// construct a `Register` for ymm reg `num`
        ymm, Y, 32
    );
    numbered!(
        /// construct a `Register` for zmm reg `num`
        zmm, Z, 32
    );
    numbered!(
        /// construct a `Register` for qword reg `num`
        q, Q, 16
    );
    numbered!(
        /// construct a `Register` for dword reg `num`
        d, D, 16
    );
    numbered!(
        /// construct a `Register` for word reg `num`
        w, W, 16
    );
    numbered!(
        /// construct a `Register` for a byte reg `num` as encoded with a rex prefix
        rb, rB, 16
    );
    numbered!(
        /// construct a `Register` for non-rex byte reg `num`
        b, B, 8
    );
    numbered!(
        /// construct a `Register` for mask reg `num`
        mask, K, 8
    );
    numbered!(mm, MM, 8);
    numbered!(cr, CR, 16);
    numbered!(dr, DR, 16);
    numbered!(bnd, BND, 4);

    register!(RIP, rip => 0);
    register!(EIP, eip => 0);

    register!(S, es => 0, cs => 1, ss => 2, ds => 3, fs => 4, gs => 5);

    register!(Q,
        rax => 0, rcx => 1, rdx => 2, rbx => 3,
        rsp => 4, rbp => 5, rsi => 6, rdi => 7,
        r8 => 8, r9 => 9, r10 => 10, r11 => 11,
        r12 => 12, r13 => 13, r14 => 14, r15 => 15
    );

    register!(D,
        eax => 0, ecx => 1, edx => 2, ebx => 3,
        esp => 4, ebp => 5, esi => 6, edi => 7,
        r8d => 8, r9d => 9, r10d => 10, r11d => 11,
        r12d => 12, r13d => 13, r14d => 14, r15d => 15
    );

    register!(W,
        ax => 0, cx => 1, dx => 2, bx => 3,
        sp => 4, bp => 5, si => 6, di => 7,
        r8w => 8, r9w => 9, r10w => 10, r11w => 11,
        r12w => 12, r13w => 13, r14w => 14, r15w => 15
    );

    register!(B,
        al => 0, cl => 1, dl => 2, bl => 3,
        ah => 4, ch => 5, dh => 6, bh => 7
    );

    register!(rB,
        spl => 4, bpl => 5, sil => 6, dil => 7,
        r8b => 8, r9b => 9, r10b => 10, r11b => 11,
        r12b => 12, r13b => 13, r14b => 14, r15b => 15
    );

    register!(ST, st0 => 0);
    register!(X, xmm0 => 0);
    register!(Y, ymm0 => 0);
    register!(Z, zmm0 => 0);
    register!(MM, mm0 => 0);
}

impl Default for Register {
    fn default() -> Self {
        Register::NONE
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
