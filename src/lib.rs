//! Formats decoded x86 instructions as masm, nasm, gas or fast syntax text.
//!
//! The formatters live in [`x86`], this crate ties them to the user configuration and turns
//! their tokens into colored [`egui`] text.

pub use formatter::{Error, FormatterOutput, NumberBase, NumberFormattingOptions, TokenStream};
pub use tokenizing::{TextKind, Token};
pub use x86_64 as x86;
pub use x86_64::{Formatter, FormatterOptions, Instruction, Syntax};

use config::{Colors, Config};
use egui::text::LayoutJob;

pub const FONT: egui::FontId = egui::FontId::new(14.0, egui::FontFamily::Monospace);

/// Formatter of the configured syntax with the configured options.
pub fn formatter_from_config(config: &Config) -> Box<dyn Formatter> {
    let syntax = config.formatter.syntax;
    log::trace!("[asmfmt] creating {syntax:?} formatter.");
    x86_64::formatter_with_options(syntax, config.formatter.options())
}

/// Formatter as configured in the user's config.yaml.
pub fn configured_formatter() -> Box<dyn Formatter> {
    formatter_from_config(&config::CONFIG)
}

/// Colors every token by its kind.
pub fn tokens_to_layoutjob(tokens: &[Token], colors: &Colors) -> LayoutJob {
    let mut job = LayoutJob::default();

    for token in tokens {
        job.append(
            &token.text,
            0.0,
            egui::TextFormat {
                font_id: FONT,
                color: colors.kind(token.kind),
                ..Default::default()
            },
        );
    }

    job
}

/// Formats `instr` straight into a colored layout.
pub fn format_colored(
    formatter: &mut dyn Formatter,
    instr: &Instruction,
    colors: &Colors,
) -> LayoutJob {
    let mut stream = TokenStream::new();
    formatter.format(instr, &mut stream);
    tokens_to_layoutjob(stream.tokens(), colors)
}
