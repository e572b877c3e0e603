//! User configuration, read once from `<data dir>/asmfmt/config.yaml`.

use once_cell::sync::Lazy;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::parse);

use egui::Color32;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tokenizing::TextKind;
use x86_64::{FormatterOptions, Syntax};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub formatter: FormatterConfig,
    #[serde(default)]
    pub colors: Colors,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    #[serde(default)]
    pub syntax: Syntax,
    /// Fields overriding the defaults of `syntax`.
    #[serde(default)]
    pub options: Mapping,
}

impl FormatterConfig {
    /// Defaults of the configured syntax with the configured fields on top.
    ///
    /// Unknown fields and bad values are logged and the whole overlay is dropped.
    pub fn options(&self) -> FormatterOptions {
        let defaults = FormatterOptions::with_syntax(self.syntax);
        if self.options.is_empty() {
            return defaults;
        }

        let mut merged = match serde_yaml::to_value(&defaults) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(_) | Err(_) => return defaults,
        };

        for (field, value) in self.options.iter() {
            merged.insert(field.clone(), value.clone());
        }

        match serde_yaml::from_value(Value::Mapping(merged)) {
            Ok(options) => options,
            Err(err) => {
                log::warn!("[config] ignoring formatter options: {err}.");
                defaults
            }
        }
    }
}

/// Color of every kind of formatted text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
    #[serde(deserialize_with = "color32")]
    pub text: Color32,
    #[serde(deserialize_with = "color32")]
    pub directive: Color32,
    #[serde(deserialize_with = "color32")]
    pub prefix: Color32,
    #[serde(deserialize_with = "color32")]
    pub mnemonic: Color32,
    #[serde(deserialize_with = "color32")]
    pub keyword: Color32,
    #[serde(deserialize_with = "color32")]
    pub operator: Color32,
    #[serde(deserialize_with = "color32")]
    pub punctuation: Color32,
    #[serde(deserialize_with = "color32")]
    pub number: Color32,
    #[serde(deserialize_with = "color32")]
    pub register: Color32,
    #[serde(deserialize_with = "color32")]
    pub decorator: Color32,
    #[serde(deserialize_with = "color32")]
    pub selector: Color32,
    #[serde(deserialize_with = "color32")]
    pub label_address: Color32,
    #[serde(deserialize_with = "color32")]
    pub function_address: Color32,
    #[serde(deserialize_with = "color32")]
    pub data: Color32,
    #[serde(deserialize_with = "color32")]
    pub label: Color32,
    #[serde(deserialize_with = "color32")]
    pub function: Color32,
}

impl Colors {
    pub fn kind(&self, kind: TextKind) -> Color32 {
        match kind {
            TextKind::Text => self.text,
            TextKind::Directive => self.directive,
            TextKind::Prefix => self.prefix,
            TextKind::Mnemonic => self.mnemonic,
            TextKind::Keyword => self.keyword,
            TextKind::Operator => self.operator,
            TextKind::Punctuation => self.punctuation,
            TextKind::Number => self.number,
            TextKind::Register => self.register,
            TextKind::Decorator => self.decorator,
            TextKind::SelectorValue => self.selector,
            TextKind::LabelAddress => self.label_address,
            TextKind::FunctionAddress => self.function_address,
            TextKind::Data => self.data,
            TextKind::Label => self.label,
            TextKind::Function => self.function,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            text: defaults::kind(TextKind::Text),
            directive: defaults::kind(TextKind::Directive),
            prefix: defaults::kind(TextKind::Prefix),
            mnemonic: defaults::kind(TextKind::Mnemonic),
            keyword: defaults::kind(TextKind::Keyword),
            operator: defaults::kind(TextKind::Operator),
            punctuation: defaults::kind(TextKind::Punctuation),
            number: defaults::kind(TextKind::Number),
            register: defaults::kind(TextKind::Register),
            decorator: defaults::kind(TextKind::Decorator),
            selector: defaults::kind(TextKind::SelectorValue),
            label_address: defaults::kind(TextKind::LabelAddress),
            function_address: defaults::kind(TextKind::FunctionAddress),
            data: defaults::kind(TextKind::Data),
            label: defaults::kind(TextKind::Label),
            function: defaults::kind(TextKind::Function),
        }
    }
}

/// Default colors when one is missing in the config.yaml's colors field.
mod defaults {
    use egui::Color32;
    use tokenizing::{ColorScheme, Colors, TextKind};

    pub fn kind(kind: TextKind) -> Color32 {
        *Colors::kind(kind)
    }
}

impl FromStr for Config {
    type Err = serde_yaml::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(s)
    }
}

impl Config {
    pub fn path() -> Option<PathBuf> {
        let mut dir = dirs::data_dir()?;
        dir.push("asmfmt");
        dir.push("config.yaml");
        Some(dir)
    }

    pub fn parse() -> Self {
        let path = match Self::path() {
            Some(path) => path,
            None => {
                log::warn!("[config] no data directory, using the defaults.");
                return Config::default();
            }
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                log::trace!("[config] {} not found, using the defaults.", path.display());
                return Config::default();
            }
        };

        match raw.parse() {
            Ok(parsed) => {
                log::notify!("[config] loaded {}.", path.display());
                parsed
            }
            Err(err) => {
                log::warn!("[config] failed to parse config.\nError: {err}.");

                // parse everything as default
                Config::default()
            }
        }
    }
}

fn color32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
    struct ColorParsing;
    impl<'de> Visitor<'de> for ColorParsing {
        type Value = Color32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("expected hex color values")
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
            Color32::from_hex(s).map_err(|err| E::custom(format!("{err:?}")))
        }
    }

    deserializer.deserialize_str(ColorParsing)
}
