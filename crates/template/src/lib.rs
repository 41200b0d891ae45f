//! Questionnaire template compiler.
//!
//! A template is a sequence of `KEY: "value"` pairs with `#` line comments.
//! [`compile`] turns one into a [`Config`]: the questions to ask, default tag
//! sets, alias rules and display settings.
//!
//! ```
//! let cfg = template::compile(
//!     r#"
//!     RADIO_QUESTION: "Pick one"
//!     OPTION_NAME: "Foo"
//!     OPTION_TAG: "foo_tag"
//!     DEFAULT_SAFETY: "q"
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(cfg.questions.len(), 1);
//! assert_eq!(cfg.default_safety, template::Safety::Questionable);
//! ```
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod color;
mod config;
mod defaults;
mod error;
mod lexer;
mod parser;
mod size;
mod types;

#[cfg(test)]
mod test_parse;

pub use color::Color;
pub use config::{Config, Defaults};
pub use error::{Error, LiteralError, excerpt_at};
pub use lexer::{KeyKind, Pos, Token, tokenize};
pub use size::parse_human_size;
pub use tags::{ConditionalTagger, Tag, TagsContainer};
pub use types::{ImageQuality, OptionKind, Question, QuestionOption, Safety};

use crate::parser::Compiler;

/// Compile `source` using the built-in [`Defaults`].
pub fn compile(source: &str) -> Result<Config, Error> {
    compile_with(source, Defaults::default())
}

/// Compile `source`, starting every setting from `defaults`.
///
/// Fails on the first lexer, parser or color error; there is no partial result.
pub fn compile_with(source: &str, defaults: Defaults) -> Result<Config, Error> {
    let tokens = tokenize(source)?;
    let mut compiler = Compiler::new(defaults);
    for token in tokens {
        compiler.feed(token)?;
    }
    Ok(compiler.finish())
}

/// Parse a color literal (`#rrggbb` or `<rgb|hsv|hls> v1 v2 v3`).
pub fn parse_color(text: &str) -> Result<Color, LiteralError> {
    text.parse()
}
