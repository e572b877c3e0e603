//! Locale independent rendering of integers.

use crate::Error;
use serde::{Deserialize, Serialize};

const HEX_LOWER: [u8; 16] = *b"0123456789abcdef";
const HEX_UPPER: [u8; 16] = *b"0123456789ABCDEF";

/// Base numbers are rendered in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberBase {
    Hexadecimal,
    Decimal,
    Octal,
    Binary,
}

impl NumberBase {
    fn radix(self) -> u64 {
        match self {
            NumberBase::Hexadecimal => 16,
            NumberBase::Decimal => 10,
            NumberBase::Octal => 8,
            NumberBase::Binary => 2,
        }
    }

    /// Number of digits needed to show every bit of a `width`-byte value.
    fn full_digits(self, width: u8) -> usize {
        let bits = width as usize * 8;
        match self {
            NumberBase::Hexadecimal => bits / 4,
            NumberBase::Octal => (bits + 2) / 3,
            NumberBase::Binary => bits,
            NumberBase::Decimal => 0,
        }
    }
}

impl TryFrom<u32> for NumberBase {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Error> {
        Ok(match value {
            0 => NumberBase::Hexadecimal,
            1 => NumberBase::Decimal,
            2 => NumberBase::Octal,
            3 => NumberBase::Binary,
            _ => {
                return Err(Error::InvalidValue {
                    field: "number_base",
                    value,
                })
            }
        })
    }
}

/// The integer type a number was read as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
}

impl NumberKind {
    /// Width of the number in bytes.
    pub fn width(self) -> u8 {
        match self {
            NumberKind::Int8 | NumberKind::UInt8 => 1,
            NumberKind::Int16 | NumberKind::UInt16 => 2,
            NumberKind::Int32 | NumberKind::UInt32 => 4,
            NumberKind::Int64 | NumberKind::UInt64 => 8,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            NumberKind::Int8 | NumberKind::Int16 | NumberKind::Int32 | NumberKind::Int64
        )
    }

    pub fn from_width(width: u8, signed: bool) -> Self {
        match (width, signed) {
            (1, false) => NumberKind::UInt8,
            (1, true) => NumberKind::Int8,
            (2, false) => NumberKind::UInt16,
            (2, true) => NumberKind::Int16,
            (4, false) => NumberKind::UInt32,
            (4, true) => NumberKind::Int32,
            (_, false) => NumberKind::UInt64,
            (_, true) => NumberKind::Int64,
        }
    }
}

/// Everything that decides how a single number is spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormattingOptions<'a> {
    pub number_base: NumberBase,
    /// Prefix for the selected base, e.g. `0x`.
    pub prefix: &'a str,
    /// Suffix for the selected base, e.g. `h`.
    pub suffix: &'a str,
    /// Decimal prefix and suffix, used when a small hex number is shown in decimal.
    pub decimal_prefix: &'a str,
    pub decimal_suffix: &'a str,
    /// Inserted between digit groups. Grouping is disabled when empty.
    pub digit_separator: &'a str,
    pub digit_group_size: u8,
    pub uppercase_hex: bool,
    pub small_hex_numbers_in_decimal: bool,
    /// Prepend `0` to hex numbers starting with `A-F` when there's no prefix.
    pub add_leading_zero_to_hex_numbers: bool,
    /// Pad with zeros up to the full width of the number.
    pub leading_zeros: bool,
    /// Render signed kinds as sign and magnitude.
    pub signed_number: bool,
}

impl<'a> NumberFormattingOptions<'a> {
    /// Plain lowercase hex with a `0x` prefix.
    pub fn hex() -> Self {
        Self {
            number_base: NumberBase::Hexadecimal,
            prefix: "0x",
            suffix: "",
            decimal_prefix: "",
            decimal_suffix: "",
            digit_separator: "",
            digit_group_size: 4,
            uppercase_hex: false,
            small_hex_numbers_in_decimal: false,
            add_leading_zero_to_hex_numbers: false,
            leading_zeros: false,
            signed_number: false,
        }
    }
}

/// Splits `value`, read as a `width`-byte integer, into sign and magnitude.
///
/// The magnitude of the most negative value is its own bit pattern, e.g. `0x80` for `i8::MIN`.
pub fn sign_magnitude(value: u64, width: u8) -> (bool, u64) {
    let (negative, magnitude) = match width {
        1 => ((value as i8) < 0, (value as i8).unsigned_abs() as u64),
        2 => ((value as i16) < 0, (value as i16).unsigned_abs() as u64),
        4 => ((value as i32) < 0, (value as i32).unsigned_abs() as u64),
        _ => ((value as i64) < 0, (value as i64).unsigned_abs()),
    };
    (negative, magnitude)
}

/// Truncates `value` to `width` bytes.
pub fn truncate(value: u64, width: u8) -> u64 {
    match width {
        1 => value as u8 as u64,
        2 => value as u16 as u64,
        4 => value as u32 as u64,
        _ => value,
    }
}

/// Renders integers into an internal scratch buffer.
#[derive(Debug, Default, Clone)]
pub struct NumberFormatter {
    buf: String,
}

impl NumberFormatter {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(32),
        }
    }

    /// Renders the digits of `value` (truncated to `width` bytes) without any sign.
    pub fn format(&mut self, options: &NumberFormattingOptions, value: u64, width: u8) -> &str {
        self.buf.clear();
        let value = truncate(value, width);

        if options.number_base == NumberBase::Hexadecimal
            && options.small_hex_numbers_in_decimal
            && value <= 9
        {
            self.buf.push_str(options.decimal_prefix);
            self.buf.push((b'0' + value as u8) as char);
            self.buf.push_str(options.decimal_suffix);
            return &self.buf;
        }

        // at most 64 binary digits
        let mut digits = [0u8; 64];
        let mut len = 0;
        let radix = options.number_base.radix();
        let table = if options.uppercase_hex {
            &HEX_UPPER
        } else {
            &HEX_LOWER
        };

        let mut rest = value;
        loop {
            digits[len] = table[(rest % radix) as usize];
            len += 1;
            rest /= radix;
            if rest == 0 {
                break;
            }
        }

        if options.leading_zeros {
            let full = options.number_base.full_digits(width);
            while len < full {
                digits[len] = b'0';
                len += 1;
            }
        }

        self.buf.push_str(options.prefix);

        if options.number_base == NumberBase::Hexadecimal
            && options.add_leading_zero_to_hex_numbers
            && options.prefix.is_empty()
            && digits[len - 1].is_ascii_alphabetic()
        {
            self.buf.push('0');
        }

        let group = if options.digit_separator.is_empty() {
            0
        } else {
            options.digit_group_size as usize
        };

        for idx in (0..len).rev() {
            self.buf.push(digits[idx] as char);
            if group != 0 && idx != 0 && idx % group == 0 {
                self.buf.push_str(options.digit_separator);
            }
        }

        self.buf.push_str(options.suffix);
        &self.buf
    }

    /// Renders `value` as a number of the given kind.
    ///
    /// Signed kinds are shown as magnitude when `signed_number` is set, the returned flag tells
    /// the caller to emit a `-` first.
    pub fn format_kind(
        &mut self,
        options: &NumberFormattingOptions,
        value: u64,
        kind: NumberKind,
    ) -> (bool, &str) {
        let width = kind.width();
        if kind.is_signed() && options.signed_number {
            let (negative, magnitude) = sign_magnitude(value, width);
            (negative, self.format(options, magnitude, width))
        } else {
            (false, self.format(options, value, width))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn masm<'a>() -> NumberFormattingOptions<'a> {
        NumberFormattingOptions {
            prefix: "",
            suffix: "h",
            uppercase_hex: true,
            add_leading_zero_to_hex_numbers: true,
            ..NumberFormattingOptions::hex()
        }
    }

    #[test]
    fn masm_leading_zero() {
        let mut f = NumberFormatter::new();
        assert_eq!(f.format(&masm(), 0xff, 1), "0FFh");
        assert_eq!(f.format(&masm(), 0x7f, 1), "7Fh");
        assert_eq!(f.format(&masm(), 0, 8), "0h");
        assert_eq!(f.format(&masm(), 0xa000, 2), "0A000h");
    }

    #[test]
    fn leading_zero_needs_missing_prefix() {
        let mut f = NumberFormatter::new();
        let options = NumberFormattingOptions {
            add_leading_zero_to_hex_numbers: true,
            ..NumberFormattingOptions::hex()
        };
        assert_eq!(f.format(&options, 0xff, 1), "0xff");
    }

    #[test]
    fn small_numbers_in_decimal() {
        let mut f = NumberFormatter::new();
        let options = NumberFormattingOptions {
            small_hex_numbers_in_decimal: true,
            ..masm()
        };
        assert_eq!(f.format(&options, 9, 4), "9");
        assert_eq!(f.format(&options, 10, 4), "0Ah");

        let (negative, text) = f.format_kind(
            &NumberFormattingOptions {
                signed_number: true,
                ..options
            },
            (-9i32) as u32 as u64,
            NumberKind::Int32,
        );
        assert!(negative);
        assert_eq!(text, "9");
    }

    #[test]
    fn fixed_width_leading_zeros() {
        let mut f = NumberFormatter::new();
        let options = NumberFormattingOptions {
            leading_zeros: true,
            ..masm()
        };
        assert_eq!(f.format(&options, 0x1234, 8), "0000000000001234h");
        assert_eq!(f.format(&options, 0x1, 1), "01h");

        let octal = NumberFormattingOptions {
            number_base: NumberBase::Octal,
            prefix: "",
            suffix: "o",
            leading_zeros: true,
            ..NumberFormattingOptions::hex()
        };
        assert_eq!(f.format(&octal, 8, 1), "010o");

        let binary = NumberFormattingOptions {
            number_base: NumberBase::Binary,
            prefix: "0b",
            leading_zeros: true,
            ..NumberFormattingOptions::hex()
        };
        assert_eq!(f.format(&binary, 5, 1), "0b00000101");
    }

    #[test]
    fn decimal_never_gets_letter_zero() {
        let mut f = NumberFormatter::new();
        let options = NumberFormattingOptions {
            number_base: NumberBase::Decimal,
            ..masm()
        };
        assert_eq!(f.format(&options, 255, 1), "255h");

        let options = NumberFormattingOptions {
            number_base: NumberBase::Decimal,
            prefix: "",
            suffix: "",
            leading_zeros: true,
            ..NumberFormattingOptions::hex()
        };
        assert_eq!(f.format(&options, 255, 8), "255");
    }

    #[test]
    fn digit_groups() {
        let mut f = NumberFormatter::new();
        let options = NumberFormattingOptions {
            digit_separator: "_",
            digit_group_size: 4,
            ..NumberFormattingOptions::hex()
        };
        assert_eq!(f.format(&options, 0x12345678, 4), "0x1234_5678");
        assert_eq!(f.format(&options, 0x123, 4), "0x123");
        assert_eq!(f.format(&options, 0x12345, 4), "0x1_2345");

        let decimal = NumberFormattingOptions {
            number_base: NumberBase::Decimal,
            prefix: "",
            digit_separator: "'",
            digit_group_size: 3,
            ..NumberFormattingOptions::hex()
        };
        assert_eq!(f.format(&decimal, 1234567, 4), "1'234'567");
    }

    #[test]
    fn signed_magnitude() {
        assert_eq!(sign_magnitude(0x80, 1), (true, 0x80));
        assert_eq!(sign_magnitude(0xff, 1), (true, 1));
        assert_eq!(sign_magnitude(0xffff_ff80, 4), (true, 0x80));
        assert_eq!(sign_magnitude(0x7fff, 2), (false, 0x7fff));
        assert_eq!(sign_magnitude(u64::MAX, 8), (true, 1));
    }

    #[test]
    fn truncates_to_width() {
        let mut f = NumberFormatter::new();
        assert_eq!(f.format(&NumberFormattingOptions::hex(), 0x1234, 1), "0x34");
    }

    #[test]
    fn base_from_raw() {
        assert_eq!(NumberBase::try_from(2), Ok(NumberBase::Octal));
        assert_eq!(
            NumberBase::try_from(4),
            Err(Error::InvalidValue {
                field: "number_base",
                value: 4
            })
        );
    }

    proptest! {
        #[test]
        fn hex_digits_roundtrip(value: u64) {
            let mut f = NumberFormatter::new();
            let text = f.format(&NumberFormattingOptions::hex(), value, 8).to_string();
            prop_assert_eq!(u64::from_str_radix(&text[2..], 16).unwrap(), value);
        }

        #[test]
        fn formatting_is_deterministic(value: u64, width in prop::sample::select(vec![1u8, 2, 4, 8])) {
            let mut f = NumberFormatter::new();
            let options = NumberFormattingOptions { leading_zeros: true, ..masm() };
            let first = f.format(&options, value, width).to_string();
            let second = f.format(&options, value, width).to_string();
            prop_assert_eq!(first, second);
        }
    }
}
