//! What makes one assembler syntax different from another.
//!
//! The engine reads everything dialect specific from a [`Dialect`], there are no per-syntax
//! code paths beyond the flags kept here.

use crate::instruction::MemorySize;
use crate::options::Syntax;

/// Where `{rn-sae}` style decorators go.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum RoundingStyle {
    /// Appended to the last register operand: `zmm3{rd-sae}`.
    Attached,
    /// An operand of its own after the last register operand.
    Operand,
}

/// How `cs`/`ds` branch hints are shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum HintStyle {
    /// `hnt jne`
    Prefix,
    /// `jne,pn`
    MnemonicSuffix,
    /// `jne 10h,{hnt}`
    Operand,
}

/// How string instructions are shown.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum StringForm {
    /// `movsb`, switching to `movs byte ptr [rdi],byte ptr fs:[rsi]` when the short form would
    /// lose a segment override or address size.
    ShortUnlessAmbiguous,
    /// Always `movsb`, overrides become prefixes.
    Short,
    /// Always `movsb (%rsi),%es:(%rdi)`.
    WithOperands,
}

#[derive(Debug)]
pub(crate) struct Dialect {
    pub syntax: Syntax,
    /// at&t source, destination order.
    pub reverse_operands: bool,
    pub register_prefix: &'static str,
    pub immediate_prefix: &'static str,
    /// Marker of `*%rax` style indirect branches.
    pub indirect_prefix: &'static str,
    /// at&t `disp(base,index,scale)` memory operands.
    pub att_memory: bool,
    /// `[fs:rax]` instead of `fs:[rax]`.
    pub segment_in_brackets: bool,
    /// Written between the size keyword and the bracket, `ptr` in masm.
    pub ptr_keyword: Option<&'static str>,
    /// Written after the element size of broadcast operands instead of a `{1toN}` decorator.
    pub broadcast_keyword: Option<&'static str>,
    /// Written in front of immediates resolved to an address.
    pub offset_keyword: Option<&'static str>,
    pub short_keyword: Option<&'static str>,
    /// Written in front of absolute `rip`-relative addresses.
    pub rel_keyword: Option<&'static str>,
    /// Keeps `rip` as the base of `rip`-relative operands shown with their absolute address.
    pub keep_rip_base: bool,
    /// `ds:` in front of 32-bit displacement only operands.
    pub ds_prefix32: bool,
    /// Displacements and symbols may move in front of the brackets.
    pub displ_outside_brackets: bool,
    /// `st0` instead of `st(0)`.
    pub plain_st_names: bool,
    pub rounding: RoundingStyle,
    pub hint: HintStyle,
    pub strings: StringForm,
    /// Separates selector and offset of direct far branches.
    pub far_separator: &'static str,
    /// 16 and 32-bit names of the `66` operand size prefix, `o16` and `o32` in nasm.
    pub operand_size_prefixes: Option<[&'static str; 2]>,
    /// 16 and 32-bit names of the `67` address size prefix.
    pub address_size_prefixes: Option<[&'static str; 2]>,
    /// `db`, `dw`, `dd` and `dq`.
    pub directives: [&'static str; 4],
    pub size_keywords: fn(MemorySize) -> Option<&'static str>,
}

impl Dialect {
    pub fn directive(&self, width: u8) -> &'static str {
        match width {
            1 => self.directives[0],
            2 => self.directives[1],
            4 => self.directives[2],
            _ => self.directives[3],
        }
    }
}

fn masm_sizes(size: MemorySize) -> Option<&'static str> {
    Some(match size {
        MemorySize::Unknown => return None,
        MemorySize::Byte => "byte",
        MemorySize::Word => "word",
        MemorySize::Dword | MemorySize::Float32 | MemorySize::FarPtr16_16 => "dword",
        MemorySize::Fword | MemorySize::FarPtr16_32 => "fword",
        MemorySize::Qword | MemorySize::Float64 => "qword",
        MemorySize::Tbyte | MemorySize::Float80 | MemorySize::Bcd | MemorySize::FarPtr16_64 => {
            "tbyte"
        }
        MemorySize::Xmmword => "xmmword",
        MemorySize::Ymmword => "ymmword",
        MemorySize::Zmmword => "zmmword",
    })
}

fn nasm_sizes(size: MemorySize) -> Option<&'static str> {
    Some(match size {
        MemorySize::Unknown | MemorySize::Fword => return None,
        MemorySize::Byte => "byte",
        MemorySize::Word => "word",
        MemorySize::Dword | MemorySize::Float32 => "dword",
        MemorySize::Qword | MemorySize::Float64 => "qword",
        MemorySize::Tbyte | MemorySize::Float80 | MemorySize::Bcd => "tword",
        MemorySize::Xmmword => "oword",
        MemorySize::Ymmword => "yword",
        MemorySize::Zmmword => "zword",
        MemorySize::FarPtr16_16 | MemorySize::FarPtr16_32 | MemorySize::FarPtr16_64 => "far",
    })
}

fn no_sizes(_: MemorySize) -> Option<&'static str> {
    None
}

const MASM_BASE: Dialect = Dialect {
    syntax: Syntax::Masm,
    reverse_operands: false,
    register_prefix: "",
    immediate_prefix: "",
    indirect_prefix: "",
    att_memory: false,
    segment_in_brackets: false,
    ptr_keyword: Some("ptr"),
    broadcast_keyword: Some("bcst"),
    offset_keyword: Some("offset"),
    short_keyword: Some("short"),
    rel_keyword: None,
    keep_rip_base: false,
    ds_prefix32: true,
    displ_outside_brackets: true,
    plain_st_names: false,
    rounding: RoundingStyle::Attached,
    hint: HintStyle::Prefix,
    strings: StringForm::ShortUnlessAmbiguous,
    far_separator: ":",
    operand_size_prefixes: None,
    address_size_prefixes: None,
    directives: ["db", "dw", "dd", "dq"],
    size_keywords: masm_sizes,
};

pub(crate) static MASM: Dialect = MASM_BASE;

pub(crate) static NASM: Dialect = Dialect {
    syntax: Syntax::Nasm,
    reverse_operands: false,
    register_prefix: "",
    immediate_prefix: "",
    indirect_prefix: "",
    att_memory: false,
    segment_in_brackets: true,
    ptr_keyword: None,
    broadcast_keyword: None,
    offset_keyword: None,
    short_keyword: Some("short"),
    rel_keyword: Some("rel"),
    keep_rip_base: false,
    ds_prefix32: false,
    displ_outside_brackets: false,
    plain_st_names: true,
    rounding: RoundingStyle::Operand,
    hint: HintStyle::Operand,
    strings: StringForm::Short,
    far_separator: ":",
    operand_size_prefixes: Some(["o16", "o32"]),
    address_size_prefixes: Some(["a16", "a32"]),
    directives: ["db", "dw", "dd", "dq"],
    size_keywords: nasm_sizes,
};

pub(crate) static GAS: Dialect = Dialect {
    syntax: Syntax::Gas,
    reverse_operands: true,
    register_prefix: "%",
    immediate_prefix: "$",
    indirect_prefix: "*",
    att_memory: true,
    segment_in_brackets: false,
    ptr_keyword: None,
    broadcast_keyword: None,
    offset_keyword: None,
    short_keyword: None,
    rel_keyword: None,
    keep_rip_base: true,
    ds_prefix32: false,
    displ_outside_brackets: false,
    plain_st_names: false,
    rounding: RoundingStyle::Operand,
    hint: HintStyle::MnemonicSuffix,
    strings: StringForm::WithOperands,
    far_separator: ",",
    operand_size_prefixes: Some(["data16", "data32"]),
    address_size_prefixes: Some(["addr16", "addr32"]),
    directives: [".byte", ".word", ".long", ".quad"],
    size_keywords: no_sizes,
};

pub(crate) static FAST: Dialect = Dialect {
    syntax: Syntax::Fast,
    short_keyword: None,
    ds_prefix32: false,
    displ_outside_brackets: false,
    ..MASM_BASE
};


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_keywords() {
        assert_eq!((MASM.size_keywords)(MemorySize::Xmmword), Some("xmmword"));
        assert_eq!((NASM.size_keywords)(MemorySize::Xmmword), Some("oword"));
        assert_eq!((NASM.size_keywords)(MemorySize::FarPtr16_32), Some("far"));
        assert_eq!((GAS.size_keywords)(MemorySize::Dword), None);
        assert_eq!((MASM.size_keywords)(MemorySize::Unknown), None);
    }

    #[test]
    fn directives() {
        assert_eq!(GAS.directive(4), ".long");
        assert_eq!(MASM.directive(8), "dq");
        assert_eq!(FAST.directive(1), "db");
    }
}
