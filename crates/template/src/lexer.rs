//! Tokenizer for the `KEY: "value"` template format.

use std::{fmt, str::Chars};

use serde::Serialize;

use crate::Error;

/// A 1-based line/column location in template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pos {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number, counted in characters.
    pub col: usize,
}

impl Default for Pos {
    fn default() -> Self {
        Self { line: 1, col: 1 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Recognized template keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum KeyKind {
    RadioQuestion,
    CheckQuestion,
    OptionName,
    OptionTag,
    EntryQuestion,
    SessionTags,
    NameQuestion,
    SourceQuestion,
    DefaultSource,
    NamelessTag,
    SourcelessTag,
    TaglessTag,
    SafetyQuestion,
    DefaultSafety,
    MaxOpenFiles,
    UpdateInterval,
    MaxImageBufsize,
    AliasTagTo,
    AliasTagFrom,
    ImageBackgroundColorOne,
    ImageBackgroundColorTwo,
    ImageBackgroundSquareWidth,
    Keybind,
    ImageTagsEntry,
    DefaultImageQuality,
}

impl KeyKind {
    /// Every key, in documentation order.
    pub const ALL: [Self; 25] = [
        Self::RadioQuestion,
        Self::CheckQuestion,
        Self::OptionName,
        Self::OptionTag,
        Self::EntryQuestion,
        Self::SessionTags,
        Self::NameQuestion,
        Self::SourceQuestion,
        Self::DefaultSource,
        Self::NamelessTag,
        Self::SourcelessTag,
        Self::TaglessTag,
        Self::SafetyQuestion,
        Self::DefaultSafety,
        Self::MaxOpenFiles,
        Self::UpdateInterval,
        Self::MaxImageBufsize,
        Self::AliasTagTo,
        Self::AliasTagFrom,
        Self::ImageBackgroundColorOne,
        Self::ImageBackgroundColorTwo,
        Self::ImageBackgroundSquareWidth,
        Self::Keybind,
        Self::ImageTagsEntry,
        Self::DefaultImageQuality,
    ];

    /// Spelling of the key in template source.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RadioQuestion => "RADIO_QUESTION",
            Self::CheckQuestion => "CHECK_QUESTION",
            Self::OptionName => "OPTION_NAME",
            Self::OptionTag => "OPTION_TAG",
            Self::EntryQuestion => "ENTRY_QUESTION",
            Self::SessionTags => "SESSION_TAGS",
            Self::NameQuestion => "NAME_QUESTION",
            Self::SourceQuestion => "SOURCE_QUESTION",
            Self::DefaultSource => "DEFAULT_SOURCE",
            Self::NamelessTag => "NAMELESS_TAG",
            Self::SourcelessTag => "SOURCELESS_TAG",
            Self::TaglessTag => "TAGLESS_TAG",
            Self::SafetyQuestion => "SAFETY_QUESTION",
            Self::DefaultSafety => "DEFAULT_SAFETY",
            Self::MaxOpenFiles => "MAX_OPEN_FILES",
            Self::UpdateInterval => "UPDATE_INTERVAL",
            Self::MaxImageBufsize => "MAX_IMAGE_BUFSIZE",
            Self::AliasTagTo => "ALIAS_TAG_TO",
            Self::AliasTagFrom => "ALIAS_TAG_FROM",
            Self::ImageBackgroundColorOne => "IMAGE_BACKGROUND_COLOR_ONE",
            Self::ImageBackgroundColorTwo => "IMAGE_BACKGROUND_COLOR_TWO",
            Self::ImageBackgroundSquareWidth => "IMAGE_BACKGROUND_SQUARE_WIDTH",
            Self::Keybind => "KEYBIND",
            Self::ImageTagsEntry => "IMAGE_TAGS_ENTRY",
            Self::DefaultImageQuality => "DEFAULT_IMAGE_QUALITY",
        }
    }

    /// Look up a key by its exact, case-sensitive spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `KEY: "value"` pair, positioned at the first character of the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// 1-based line of the key.
    pub line: usize,
    /// 1-based column of the key.
    pub col: usize,
    /// Which key this is.
    pub key: KeyKind,
    /// Unescaped value between the quotes.
    pub value: String,
}

impl Token {
    /// Location of the key.
    pub const fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            col: self.col,
        }
    }
}

/// Character cursor that tracks line and column.
struct Scanner<'a> {
    /// Remaining input.
    chars: Chars<'a>,
    /// Location of the next character.
    pos: Pos,
}

impl<'a> Scanner<'a> {
    /// Start scanning `text` at line 1, column 1.
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            pos: Pos::default(),
        }
    }

    /// Next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Consume one character.
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.pos.line += 1;
            self.pos.col = 1;
        } else {
            self.pos.col += 1;
        }
        Some(c)
    }

    /// Consume characters while `pred` holds.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
    }

    /// Skip whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            if self.peek() != Some('#') {
                return;
            }
            self.eat_while(|c| c != '\n');
        }
    }

    /// Read a key: everything up to whitespace or `:`.
    fn key(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ':' {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    /// Read a quoted value; the opening quote is the next character.
    fn quoted(&mut self) -> Result<String, Error> {
        let open = self.pos;
        if self.peek() != Some('"') {
            return Err(Error::lexer(self.pos, "expected '\"' to start the value"));
        }
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(Error::lexer(open, "unterminated value: missing closing '\"'")),
                Some('"') => return Ok(out),
                Some('\\') if self.peek() == Some('"') => {
                    self.bump();
                    out.push('"');
                }
                Some(c) => out.push(c),
            }
        }
    }
}

/// Split template `text` into tokens.
///
/// Fails on the first unknown key, missing `:`, or missing/unterminated value.
pub fn tokenize(text: &str) -> Result<Vec<Token>, Error> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        scanner.skip_trivia();
        if scanner.peek().is_none() {
            return Ok(tokens);
        }
        let at = scanner.pos;
        let name = scanner.key();
        let key = KeyKind::from_name(&name)
            .ok_or_else(|| Error::lexer(at, format!("unknown key '{}'", name)))?;

        scanner.eat_while(char::is_whitespace);
        if scanner.peek() != Some(':') {
            return Err(Error::lexer(scanner.pos, format!("expected ':' after {}", key)));
        }
        scanner.bump();
        scanner.eat_while(char::is_whitespace);
        let value = scanner.quoted()?;

        tokens.push(Token {
            line: at.line,
            col: at.col,
            key,
            value,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(tokens: &[Token]) -> Vec<KeyKind> {
        tokens.iter().map(|t| t.key).collect()
    }

    #[test]
    fn every_key_round_trips_its_name() {
        for key in KeyKind::ALL {
            assert_eq!(KeyKind::from_name(key.as_str()), Some(key));
        }
        assert_eq!(KeyKind::from_name("radio_question"), None);
    }

    #[test]
    fn skips_comments_and_tracks_positions() {
        let src = "# header\n\n  KEYBIND : \"ctrl+s\" # trailing\nOPTION_NAME:\"x\"";
        let tokens = tokenize(src).unwrap();
        assert_eq!(keys(&tokens), vec![KeyKind::Keybind, KeyKind::OptionName]);
        assert_eq!(tokens[0].pos(), Pos { line: 3, col: 3 });
        assert_eq!(tokens[0].value, "ctrl+s");
        assert_eq!(tokens[1].pos(), Pos { line: 4, col: 1 });
        assert_eq!(tokens[1].value, "x");
    }

    #[test]
    fn unescapes_quotes_and_keeps_other_backslashes() {
        let tokens = tokenize(r#"ENTRY_QUESTION: "say \"hi\" \n ok""#).unwrap();
        assert_eq!(tokens[0].value, r#"say "hi" \n ok"#);
    }

    #[test]
    fn multiline_values_advance_lines() {
        let src = "ENTRY_QUESTION: \"a\nb\"\nKEYBIND: \"k\"";
        let tokens = tokenize(src).unwrap();
        assert_eq!(tokens[0].value, "a\nb");
        assert_eq!(tokens[1].pos(), Pos { line: 3, col: 1 });
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \n# only a comment\n\t").unwrap().is_empty());
    }

    #[test]
    fn unknown_key_is_reported_at_key_start() {
        let err = tokenize("\n  Keybind: \"x\"").unwrap_err();
        assert!(matches!(err, Error::Lexer { line: 2, col: 3, .. }));
        assert!(err.message().contains("Keybind"));
    }

    #[test]
    fn missing_colon() {
        let err = tokenize("KEYBIND \"x\"").unwrap_err();
        assert!(matches!(err, Error::Lexer { line: 1, col: 9, .. }));
    }

    #[test]
    fn missing_open_quote() {
        let err = tokenize("KEYBIND: x").unwrap_err();
        assert!(matches!(err, Error::Lexer { line: 1, col: 10, .. }));
    }

    #[test]
    fn unterminated_value_points_at_open_quote() {
        let err = tokenize("KEYBIND: \"x\\\"").unwrap_err();
        assert!(matches!(err, Error::Lexer { line: 1, col: 10, .. }));
        assert!(err.message().contains("unterminated"));
    }

    #[test]
    fn key_at_end_of_input() {
        let err = tokenize("KEYBIND").unwrap_err();
        assert!(matches!(err, Error::Lexer { line: 1, col: 8, .. }));
    }

    #[test]
    fn tokenizing_is_deterministic() {
        let src = "RADIO_QUESTION: \"q\"\nOPTION_NAME: \"a\" OPTION_TAG: \"b\"";
        assert_eq!(tokenize(src).unwrap(), tokenize(src).unwrap());
    }
}
