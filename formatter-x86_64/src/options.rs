//! Formatter configuration.

use formatter::{Error, NumberBase, NumberFormattingOptions};
use serde::{Deserialize, Serialize};

/// Assembler syntax a formatter produces.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    #[default]
    Masm,
    Nasm,
    Gas,
    Fast,
}

impl TryFrom<u32> for Syntax {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Error> {
        Ok(match value {
            0 => Syntax::Masm,
            1 => Syntax::Nasm,
            2 => Syntax::Gas,
            3 => Syntax::Fast,
            _ => {
                return Err(Error::InvalidValue {
                    field: "syntax",
                    value,
                })
            }
        })
    }
}

/// When memory operands get a size keyword such as `dword ptr`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemorySizeOptions {
    /// Only when the size can't be inferred from the other operands.
    #[default]
    Default,
    /// Whenever the size is known.
    Always,
    /// Only when there are no register operands, or the operand is broadcast.
    Minimum,
    Never,
}

impl TryFrom<u32> for MemorySizeOptions {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Error> {
        Ok(match value {
            0 => MemorySizeOptions::Default,
            1 => MemorySizeOptions::Always,
            2 => MemorySizeOptions::Minimum,
            3 => MemorySizeOptions::Never,
            _ => {
                return Err(Error::InvalidValue {
                    field: "memory_size_options",
                    value,
                })
            }
        })
    }
}

/// Group of condition codes that share a set of alias mnemonics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CcGroup {
    B,
    Ae,
    E,
    Ne,
    Be,
    A,
    P,
    Np,
    L,
    Ge,
    Le,
    G,
}

macro_rules! cc_selector {
    ($(#[$doc:meta])* $name:ident, $field:literal, [$($variant:ident),+]) => {
        $(#[$doc])*
        #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl TryFrom<u32> for $name {
            type Error = Error;

            fn try_from(value: u32) -> Result<Self, Error> {
                const VALUES: &[$name] = &[$($name::$variant),+];
                VALUES
                    .get(value as usize)
                    .copied()
                    .ok_or(Error::InvalidValue { field: $field, value })
            }
        }
    };
}

cc_selector!(
    /// `jb`, `jc` or `jnae`.
    CcB, "cc_b", [B, C, Nae]
);
cc_selector!(
    /// `jae`, `jnb` or `jnc`.
    CcAe, "cc_ae", [Ae, Nb, Nc]
);
cc_selector!(
    /// `je` or `jz`, also picks `repe` or `repz`.
    CcE, "cc_e", [E, Z]
);
cc_selector!(
    /// `jne` or `jnz`, also picks `repne` or `repnz`.
    CcNe, "cc_ne", [Ne, Nz]
);
cc_selector!(CcBe, "cc_be", [Be, Na]);
cc_selector!(CcA, "cc_a", [A, Nbe]);
cc_selector!(CcP, "cc_p", [P, Pe]);
cc_selector!(CcNp, "cc_np", [Np, Po]);
cc_selector!(CcL, "cc_l", [L, Nge]);
cc_selector!(CcGe, "cc_ge", [Ge, Nl]);
cc_selector!(CcLe, "cc_le", [Le, Ng]);
cc_selector!(CcG, "cc_g", [G, Nle]);

/// Every toggle the formatters understand.
///
/// Each syntax seeds its own defaults through [`FormatterOptions::with_syntax`], every field can
/// be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterOptions {
    pub uppercase_prefixes: bool,
    pub uppercase_mnemonics: bool,
    pub uppercase_registers: bool,
    pub uppercase_keywords: bool,
    pub uppercase_decorators: bool,
    /// Uppercases everything except numbers.
    pub uppercase_all: bool,

    /// Column the first operand starts at, 0 for a single separator.
    pub first_operand_char_index: u32,
    /// Pad with tabs of this size instead of spaces when non-zero.
    pub tab_size: u32,

    pub space_after_operand_separator: bool,
    pub space_after_memory_bracket: bool,
    pub space_between_memory_add_operators: bool,
    pub space_between_memory_mul_operators: bool,
    pub scale_before_index: bool,
    pub always_show_scale: bool,
    pub always_show_segment_register: bool,
    pub show_zero_displacements: bool,

    pub hex_prefix: String,
    pub hex_suffix: String,
    pub hex_digit_group_size: u8,
    pub decimal_prefix: String,
    pub decimal_suffix: String,
    pub decimal_digit_group_size: u8,
    pub octal_prefix: String,
    pub octal_suffix: String,
    pub octal_digit_group_size: u8,
    pub binary_prefix: String,
    pub binary_suffix: String,
    pub binary_digit_group_size: u8,
    /// Digit group separator, grouping is off when empty.
    pub digit_separator: String,
    pub leading_zeros: bool,
    pub uppercase_hex: bool,
    pub small_hex_numbers_in_decimal: bool,
    pub add_leading_zero_to_hex_numbers: bool,
    pub number_base: NumberBase,
    pub branch_leading_zeros: bool,
    pub signed_immediate_operands: bool,
    pub signed_memory_displacements: bool,
    pub displacement_leading_zeros: bool,

    pub memory_size_options: MemorySizeOptions,
    /// Show `[rip+displ]` instead of the absolute target address.
    pub rip_relative_addresses: bool,
    /// `short` in front of branches with an 8-bit displacement.
    pub show_branch_size: bool,
    pub use_pseudo_ops: bool,
    /// Append the original address after a resolved symbol.
    pub show_symbol_address: bool,
    /// `st(0)` instead of `st`.
    pub prefer_st0: bool,
    pub show_useless_prefixes: bool,

    pub cc_b: CcB,
    pub cc_ae: CcAe,
    pub cc_e: CcE,
    pub cc_ne: CcNe,
    pub cc_be: CcBe,
    pub cc_a: CcA,
    pub cc_p: CcP,
    pub cc_np: CcNp,
    pub cc_l: CcL,
    pub cc_ge: CcGe,
    pub cc_le: CcLe,
    pub cc_g: CcG,

    pub gas_naked_registers: bool,
    pub gas_show_mnemonic_size_suffix: bool,
    pub gas_space_after_memory_operand_comma: bool,

    /// `ds:` in front of displacement only operands in 32-bit code.
    pub masm_add_ds_prefix32: bool,
    /// `[rax+sym]` instead of `sym[rax]`.
    pub masm_symbol_displ_in_brackets: bool,
    /// `[rax+10h]` instead of `10h[rax]`.
    pub masm_displ_in_brackets: bool,

    /// `byte` in front of sign extended 8-bit immediates.
    pub nasm_show_sign_extended_immediate_size: bool,
}

macro_rules! raw_setters {
    ($($fn:ident => $field:ident: $ty:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Sets `", stringify!($field), "` from its numeric value.")]
            pub fn $fn(&mut self, value: u32) -> Result<(), Error> {
                self.$field = <$ty>::try_from(value)?;
                Ok(())
            }
        )+
    };
}

impl FormatterOptions {
    fn base() -> Self {
        Self {
            uppercase_prefixes: false,
            uppercase_mnemonics: false,
            uppercase_registers: false,
            uppercase_keywords: false,
            uppercase_decorators: false,
            uppercase_all: false,
            first_operand_char_index: 0,
            tab_size: 0,
            space_after_operand_separator: false,
            space_after_memory_bracket: false,
            space_between_memory_add_operators: false,
            space_between_memory_mul_operators: false,
            scale_before_index: false,
            always_show_scale: false,
            always_show_segment_register: false,
            show_zero_displacements: false,
            hex_prefix: String::new(),
            hex_suffix: String::new(),
            hex_digit_group_size: 4,
            decimal_prefix: String::new(),
            decimal_suffix: String::new(),
            decimal_digit_group_size: 3,
            octal_prefix: String::new(),
            octal_suffix: String::new(),
            octal_digit_group_size: 4,
            binary_prefix: String::new(),
            binary_suffix: String::new(),
            binary_digit_group_size: 4,
            digit_separator: String::new(),
            leading_zeros: false,
            uppercase_hex: true,
            small_hex_numbers_in_decimal: true,
            add_leading_zero_to_hex_numbers: true,
            number_base: NumberBase::Hexadecimal,
            branch_leading_zeros: true,
            signed_immediate_operands: false,
            signed_memory_displacements: true,
            displacement_leading_zeros: false,
            memory_size_options: MemorySizeOptions::Default,
            rip_relative_addresses: false,
            show_branch_size: true,
            use_pseudo_ops: true,
            show_symbol_address: false,
            prefer_st0: false,
            show_useless_prefixes: false,
            cc_b: CcB::B,
            cc_ae: CcAe::Ae,
            cc_e: CcE::E,
            cc_ne: CcNe::Ne,
            cc_be: CcBe::Be,
            cc_a: CcA::A,
            cc_p: CcP::P,
            cc_np: CcNp::Np,
            cc_l: CcL::L,
            cc_ge: CcGe::Ge,
            cc_le: CcLe::Le,
            cc_g: CcG::G,
            gas_naked_registers: false,
            gas_show_mnemonic_size_suffix: false,
            gas_space_after_memory_operand_comma: false,
            masm_add_ds_prefix32: true,
            masm_symbol_displ_in_brackets: true,
            masm_displ_in_brackets: true,
            nasm_show_sign_extended_immediate_size: false,
        }
    }

    /// Defaults of the masm formatter: `0FFh` style numbers.
    pub fn with_masm() -> Self {
        Self {
            hex_suffix: "h".to_string(),
            octal_suffix: "o".to_string(),
            binary_suffix: "b".to_string(),
            ..Self::base()
        }
    }

    /// Defaults of the nasm formatter.
    pub fn with_nasm() -> Self {
        Self {
            hex_suffix: "h".to_string(),
            octal_suffix: "o".to_string(),
            binary_suffix: "b".to_string(),
            ..Self::base()
        }
    }

    /// Defaults of the gnu assembler formatter: `0xff` style numbers.
    pub fn with_gas() -> Self {
        Self {
            hex_prefix: "0x".to_string(),
            octal_prefix: "0".to_string(),
            binary_prefix: "0b".to_string(),
            uppercase_hex: false,
            add_leading_zero_to_hex_numbers: false,
            ..Self::base()
        }
    }

    pub fn with_syntax(syntax: Syntax) -> Self {
        match syntax {
            Syntax::Masm => Self::with_masm(),
            Syntax::Nasm => Self::with_nasm(),
            Syntax::Gas => Self::with_gas(),
            Syntax::Fast => FastFormatterOptions::default().to_formatter_options(),
        }
    }

    raw_setters! {
        set_number_base_raw => number_base: NumberBase,
        set_memory_size_options_raw => memory_size_options: MemorySizeOptions,
        set_cc_b_raw => cc_b: CcB,
        set_cc_ae_raw => cc_ae: CcAe,
        set_cc_e_raw => cc_e: CcE,
        set_cc_ne_raw => cc_ne: CcNe,
        set_cc_be_raw => cc_be: CcBe,
        set_cc_a_raw => cc_a: CcA,
        set_cc_p_raw => cc_p: CcP,
        set_cc_np_raw => cc_np: CcNp,
        set_cc_l_raw => cc_l: CcL,
        set_cc_ge_raw => cc_ge: CcGe,
        set_cc_le_raw => cc_le: CcLe,
        set_cc_g_raw => cc_g: CcG,
    }

    /// Index of the alias selected for a condition code group.
    pub(crate) fn cc_index(&self, group: CcGroup) -> usize {
        match group {
            CcGroup::B => self.cc_b as usize,
            CcGroup::Ae => self.cc_ae as usize,
            CcGroup::E => self.cc_e as usize,
            CcGroup::Ne => self.cc_ne as usize,
            CcGroup::Be => self.cc_be as usize,
            CcGroup::A => self.cc_a as usize,
            CcGroup::P => self.cc_p as usize,
            CcGroup::Np => self.cc_np as usize,
            CcGroup::L => self.cc_l as usize,
            CcGroup::Ge => self.cc_ge as usize,
            CcGroup::Le => self.cc_le as usize,
            CcGroup::G => self.cc_g as usize,
        }
    }

    /// Number options for immediates.
    pub fn number_options(&self) -> NumberFormattingOptions<'_> {
        self.number_options_with(self.leading_zeros, self.signed_immediate_operands)
    }

    pub(crate) fn number_options_with(
        &self,
        leading_zeros: bool,
        signed_number: bool,
    ) -> NumberFormattingOptions<'_> {
        let (prefix, suffix, digit_group_size) = match self.number_base {
            NumberBase::Hexadecimal => (&self.hex_prefix, &self.hex_suffix, self.hex_digit_group_size),
            NumberBase::Decimal => (
                &self.decimal_prefix,
                &self.decimal_suffix,
                self.decimal_digit_group_size,
            ),
            NumberBase::Octal => (&self.octal_prefix, &self.octal_suffix, self.octal_digit_group_size),
            NumberBase::Binary => (
                &self.binary_prefix,
                &self.binary_suffix,
                self.binary_digit_group_size,
            ),
        };

        NumberFormattingOptions {
            number_base: self.number_base,
            prefix,
            suffix,
            decimal_prefix: &self.decimal_prefix,
            decimal_suffix: &self.decimal_suffix,
            digit_separator: &self.digit_separator,
            digit_group_size,
            uppercase_hex: self.uppercase_hex,
            small_hex_numbers_in_decimal: self.small_hex_numbers_in_decimal,
            add_leading_zero_to_hex_numbers: self.add_leading_zero_to_hex_numbers,
            leading_zeros,
            signed_number,
        }
    }
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self::with_masm()
    }
}

/// The reduced option set of [`crate::FastFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FastFormatterOptions {
    pub space_after_operand_separator: bool,
    pub rip_relative_addresses: bool,
    pub use_pseudo_ops: bool,
    pub show_symbol_address: bool,
    pub always_show_segment_register: bool,
    pub always_show_memory_size: bool,
    pub uppercase_hex: bool,
    /// `0x` prefixed hex instead of the `h` suffix.
    pub use_hex_prefix: bool,
}

impl Default for FastFormatterOptions {
    fn default() -> Self {
        Self {
            space_after_operand_separator: false,
            rip_relative_addresses: false,
            use_pseudo_ops: true,
            show_symbol_address: false,
            always_show_segment_register: false,
            always_show_memory_size: false,
            uppercase_hex: true,
            use_hex_prefix: false,
        }
    }
}

impl FastFormatterOptions {
    /// The full option set these options stand for.
    pub fn to_formatter_options(&self) -> FormatterOptions {
        let mut options = FormatterOptions::with_masm();
        options.space_after_operand_separator = self.space_after_operand_separator;
        options.rip_relative_addresses = self.rip_relative_addresses;
        options.use_pseudo_ops = self.use_pseudo_ops;
        options.show_symbol_address = self.show_symbol_address;
        options.always_show_segment_register = self.always_show_segment_register;
        options.memory_size_options = if self.always_show_memory_size {
            MemorySizeOptions::Always
        } else {
            MemorySizeOptions::Default
        };
        options.uppercase_hex = self.uppercase_hex;
        if self.use_hex_prefix {
            options.hex_prefix = "0x".to_string();
            options.hex_suffix.clear();
        }
        options.branch_leading_zeros = false;
        options.masm_add_ds_prefix32 = false;
        options
    }
}
