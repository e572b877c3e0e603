//! Shared behaviour required between instruction formatter crates.

mod number;

pub use number::{
    sign_magnitude, truncate, NumberBase, NumberFormatter, NumberFormattingOptions, NumberKind,
};

use std::fmt;
use tokenizing::{TextKind, Token};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A formatter operand index outside of `[0, operand_count)`.
    #[error("formatter operand {index} is out of range, the instruction has {count} operands")]
    InvalidOperand { index: u32, count: u32 },

    /// An instruction operand index outside of the instruction's own operand count.
    #[error("instruction operand {index} is out of range, the instruction has {count} operands")]
    InvalidInstructionOperand { index: u32, count: u32 },

    /// A value that doesn't map to any variant of a closed option set.
    #[error("{value} isn't a valid value for {field}")]
    InvalidValue { field: &'static str, value: u32 },
}

/// Receives formatted text, one fragment at a time.
///
/// A formatter never buffers across calls and never calls into an output concurrently.
pub trait FormatterOutput {
    fn write(&mut self, text: &str, kind: TextKind);
}

impl FormatterOutput for String {
    #[inline]
    fn write(&mut self, text: &str, _kind: TextKind) {
        self.push_str(text);
    }
}

impl<T: FormatterOutput + ?Sized> FormatterOutput for &mut T {
    #[inline]
    fn write(&mut self, text: &str, kind: TextKind) {
        (**self).write(text, kind)
    }
}

/// Output that keeps every fragment as a [`Token`].
#[derive(Debug, Default, Clone)]
pub struct TokenStream {
    inner: Vec<Token<'static>>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self {
            inner: Vec::with_capacity(25),
        }
    }

    pub fn push_token(&mut self, token: Token<'static>) {
        self.inner.push(token);
    }

    pub fn push(&mut self, text: &'static str, kind: TextKind) {
        self.push_token(Token::from_str(text, kind));
    }

    pub fn push_owned(&mut self, text: String, kind: TextKind) {
        self.push_token(Token::from_string(text, kind));
    }

    pub fn tokens(&self) -> &[Token<'static>] {
        &self.inner
    }

    pub fn into_tokens(self) -> Vec<Token<'static>> {
        self.inner
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl FormatterOutput for TokenStream {
    fn write(&mut self, text: &str, kind: TextKind) {
        // merge runs of plain text so separators don't explode the token count
        if kind == TextKind::Text {
            if let Some(last) = self.inner.last_mut() {
                if last.kind == TextKind::Text {
                    last.text.to_mut().push_str(text);
                    return;
                }
            }
        }

        self.push_owned(text.to_string(), kind);
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for token in self.inner.iter() {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}
