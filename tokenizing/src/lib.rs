//! Text kinds and colors used for rendering formatted instructions.
use std::borrow::Cow;

pub use egui::Color32 as Color;

/// Currently used global colorscheme
pub type Colors = IBM;

/// What a piece of formatted text represents.
///
/// Every fragment a formatter writes is tagged with one of these so that front ends can
/// color or otherwise treat tokens differently without re-parsing the text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Whitespace and anything without a more specific meaning.
    Text,
    /// Assembler directives such as `db` or `.quad`.
    Directive,
    /// Instruction prefixes such as `lock` or `rep`.
    Prefix,
    Mnemonic,
    /// Keywords such as `qword`, `ptr`, `short` or `offset`.
    Keyword,
    /// Operators inside memory operands: `+`, `-`, `*`, `:`.
    Operator,
    /// Brackets, parentheses and operand separators.
    Punctuation,
    Number,
    Register,
    /// Vector decorators such as `{k1}`, `{z}` or `{1to16}`.
    Decorator,
    /// The selector half of a far branch.
    SelectorValue,
    /// A branch target that isn't a call.
    LabelAddress,
    /// A call target.
    FunctionAddress,
    /// Symbol text resolved to data.
    Data,
    /// Symbol text resolved to a label.
    Label,
    /// Symbol text resolved to a function.
    Function,
}

pub trait ColorScheme {
    fn brackets() -> &'static Color;
    fn item() -> &'static Color;

    fn spacing() -> &'static Color {
        &colors::WHITE
    }

    fn known() -> &'static Color {
        Self::item()
    }

    fn annotation() -> &'static Color {
        Self::item()
    }

    fn special() -> &'static Color {
        Self::item()
    }

    fn expr() -> &'static Color;
    fn opcode() -> &'static Color;
    fn register() -> &'static Color;
    fn immediate() -> &'static Color;
    fn attribute() -> &'static Color;
    fn segment() -> &'static Color;

    /// Color for a given kind of text.
    fn kind(kind: TextKind) -> &'static Color {
        match kind {
            TextKind::Text => Self::spacing(),
            TextKind::Directive | TextKind::Mnemonic => Self::opcode(),
            TextKind::Prefix => Self::attribute(),
            TextKind::Keyword => Self::annotation(),
            TextKind::Operator => Self::expr(),
            TextKind::Punctuation => Self::brackets(),
            TextKind::Number => Self::immediate(),
            TextKind::Register => Self::register(),
            TextKind::Decorator => Self::special(),
            TextKind::SelectorValue => Self::segment(),
            TextKind::LabelAddress | TextKind::FunctionAddress => Self::immediate(),
            TextKind::Data | TextKind::Label | TextKind::Function => Self::known(),
        }
    }
}

pub struct IBM;

impl ColorScheme for IBM {
    fn brackets() -> &'static Color {
        &colors::GRAY40
    }

    fn item() -> &'static Color {
        &colors::MAGENTA
    }

    fn known() -> &'static Color {
        &colors::PURPLE
    }

    fn annotation() -> &'static Color {
        &colors::BLUE
    }

    fn special() -> &'static Color {
        &colors::RED
    }

    fn expr() -> &'static Color {
        &colors::GRAY99
    }

    fn opcode() -> &'static Color {
        &colors::WHITE
    }

    fn register() -> &'static Color {
        &colors::MAGENTA
    }

    fn immediate() -> &'static Color {
        &colors::BLUE
    }

    fn attribute() -> &'static Color {
        &colors::GRAY40
    }

    fn segment() -> &'static Color {
        &colors::GREEN
    }
}

pub mod colors {
    //! IBM inspired colors.

    use super::Color;

    pub const WHITE: Color = Color::from_rgb(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::from_rgb(0x0f, 0x62, 0xfe);
    pub const MAGENTA: Color = Color::from_rgb(0xf5, 0x12, 0x81);
    pub const RED: Color = Color::from_rgb(0xff, 0x00, 0x0b);
    pub const PURPLE: Color = Color::from_rgb(0x89, 0x1f, 0xff);
    pub const GREEN: Color = Color::from_rgb(0x02, 0xed, 0x6e);
    pub const GRAY40: Color = Color::from_rgb(0x40, 0x40, 0x40);
    pub const GRAY99: Color = Color::from_rgb(0x99, 0x99, 0x99);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'txt> {
    pub text: Cow<'txt, str>,
    pub kind: TextKind,
}

impl<'txt> Token<'txt> {
    pub fn from_string(text: String, kind: TextKind) -> Self {
        Self {
            text: Cow::Owned(text),
            kind,
        }
    }

    pub fn from_str(text: &'txt str, kind: TextKind) -> Self {
        Self {
            text: Cow::Borrowed(text),
            kind,
        }
    }

    /// Color of this token in the global colorscheme.
    pub fn color(&self) -> &'static Color {
        Colors::kind(self.kind)
    }

    pub fn into_owned(self) -> Token<'static> {
        Token {
            text: Cow::Owned(self.text.into_owned()),
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_colors_follow_kind() {
        let reg = Token::from_str("rax", TextKind::Register);
        let num = Token::from_string("10h".to_string(), TextKind::Number);

        assert_eq!(reg.color(), &colors::MAGENTA);
        assert_eq!(num.color(), &colors::BLUE);
        assert_eq!(Token::from_str(",", TextKind::Punctuation).color(), &colors::GRAY40);
    }

    #[test]
    fn into_owned_keeps_text() {
        let text = String::from("qword");
        let token = Token::from_str(&text, TextKind::Keyword).into_owned();
        drop(text);

        assert_eq!(token.text, "qword");
        assert_eq!(token.kind, TextKind::Keyword);
    }
}
