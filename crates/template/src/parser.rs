//! Token stream -> [`Config`] state machine.

use std::{fmt::Display, mem, str::FromStr, time::Duration};

use tracing::{debug, trace, warn};

use crate::{
    Color, Config, Defaults, Error, ImageQuality, KeyKind, OptionKind, Question, QuestionOption,
    Safety, Token, lexer::Pos, size::parse_human_size,
};

/// Strength given to tags listed by the NAMELESS/SOURCELESS/TAGLESS keys.
const TAG_LIST_STRENGTH: u32 = 1;

/// Where the compiler is within the question/alias structure.
#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    /// Between questions.
    Normal,
    /// Inside a radio/check question, no option pending.
    InOptionQuestion,
    /// An option name was given; its tag may follow.
    InOptionName,
    /// Trigger list buffered; dependent list pending.
    AliasFrom(String),
    /// Dependent list buffered; trigger list pending.
    AliasTo(String),
}

/// Consumes tokens one at a time, building a [`Config`].
pub(crate) struct Compiler {
    /// Configuration under construction.
    config: Config,
    /// Current state.
    state: State,
}

impl Compiler {
    /// Start from a configuration seeded with `defaults`.
    pub(crate) fn new(defaults: Defaults) -> Self {
        Self {
            config: Config::from_defaults(defaults),
            state: State::Normal,
        }
    }

    /// Apply one token. The first error aborts the compile.
    pub(crate) fn feed(&mut self, token: Token) -> Result<(), Error> {
        let pos = token.pos();
        let Token { key, value, .. } = token;
        trace!(target: "template::parser", %key, %pos, state = ?self.state, "token");

        match key {
            KeyKind::RadioQuestion => self.start_option_question(pos, key, OptionKind::Radio, value),
            KeyKind::CheckQuestion => self.start_option_question(pos, key, OptionKind::Check, value),
            KeyKind::EntryQuestion => self.start_question(pos, key, Question::Entry { text: value }),
            KeyKind::SessionTags => {
                self.start_question(pos, key, Question::SessionTags { text: value })
            }
            KeyKind::NameQuestion => self.start_question(pos, key, Question::Name { text: value }),
            KeyKind::SourceQuestion => {
                self.start_question(pos, key, Question::Source { text: value })
            }
            KeyKind::SafetyQuestion => {
                self.start_question(pos, key, Question::Safety { text: value })
            }
            KeyKind::ImageTagsEntry => {
                self.start_question(pos, key, Question::ImageTagsEntry { text: value })
            }
            KeyKind::OptionName => self.option_name(pos, value),
            KeyKind::OptionTag => self.option_tag(pos, value),
            KeyKind::AliasTagFrom => self.alias_from(pos, value),
            KeyKind::AliasTagTo => self.alias_to(pos, value),
            KeyKind::DefaultSource => {
                self.config.default_source = value;
                Ok(())
            }
            KeyKind::NamelessTag => {
                self.config.nameless_tags.set_str(&value, TAG_LIST_STRENGTH);
                Ok(())
            }
            KeyKind::SourcelessTag => {
                self.config.sourceless_tags.set_str(&value, TAG_LIST_STRENGTH);
                Ok(())
            }
            KeyKind::TaglessTag => {
                self.config.tagless_tags.set_str(&value, TAG_LIST_STRENGTH);
                Ok(())
            }
            KeyKind::DefaultSafety => {
                self.config.default_safety =
                    Safety::parse(value.trim()).map_err(|e| setting_error(pos, key, e))?;
                Ok(())
            }
            KeyKind::DefaultImageQuality => {
                self.config.default_image_quality =
                    ImageQuality::parse(value.trim()).map_err(|e| setting_error(pos, key, e))?;
                Ok(())
            }
            KeyKind::MaxOpenFiles => {
                self.config.max_open_files = parse_integer(pos, key, &value)?;
                Ok(())
            }
            KeyKind::UpdateInterval => {
                self.config.update_interval = parse_seconds(pos, key, &value)?;
                Ok(())
            }
            KeyKind::MaxImageBufsize => {
                self.config.max_image_buffer_size =
                    parse_human_size(&value).map_err(|e| setting_error(pos, key, e))?;
                Ok(())
            }
            KeyKind::ImageBackgroundColorOne => {
                self.config.background_color_one = parse_color(pos, key, &value)?;
                Ok(())
            }
            KeyKind::ImageBackgroundColorTwo => {
                self.config.background_color_two = parse_color(pos, key, &value)?;
                Ok(())
            }
            KeyKind::ImageBackgroundSquareWidth => {
                let width: u32 = parse_integer(pos, key, &value)?;
                if width == 0 {
                    return Err(setting_error(pos, key, "width must be greater than 0"));
                }
                self.config.background_square_width = width;
                Ok(())
            }
            KeyKind::Keybind => {
                self.config.keybinds.push(value);
                Ok(())
            }
        }
    }

    /// Finish compiling. Ending inside a question or alias is allowed.
    pub(crate) fn finish(self) -> Config {
        match &self.state {
            State::AliasFrom(list) | State::AliasTo(list) => warn!(
                target: "template::parser",
                pending = %list,
                "template ended inside an unfinished alias; it was dropped"
            ),
            State::Normal | State::InOptionQuestion | State::InOptionName => {}
        }
        debug!(
            target: "template::parser",
            questions = self.config.questions.len(),
            alias_triggers = self.config.conditional_tags.len(),
            keybinds = self.config.keybinds.len(),
            "compiled template"
        );
        self.config
    }

    /// Options of the current question, if it is an option question.
    fn options(&self) -> Option<&[QuestionOption]> {
        match self.config.questions.last()? {
            Question::Options { options, .. } => Some(options),
            _ => None,
        }
    }

    /// Mutable options of the current question, if it is an option question.
    fn options_mut(&mut self) -> Option<&mut Vec<QuestionOption>> {
        match self.config.questions.last_mut()? {
            Question::Options { options, .. } => Some(options),
            _ => None,
        }
    }

    /// True when a new question or alias may begin: nothing is open, or the
    /// open option question already has an option.
    fn ready(&self) -> bool {
        match self.state {
            State::Normal => true,
            State::InOptionQuestion => self.options().is_some_and(|o| !o.is_empty()),
            State::InOptionName | State::AliasFrom(_) | State::AliasTo(_) => false,
        }
    }

    /// Begin any question.
    fn start_question(&mut self, pos: Pos, key: KeyKind, question: Question) -> Result<(), Error> {
        if !self.ready() {
            return Err(Error::parser(
                pos,
                format!(
                    "{}: new question started while existing question or alias is being defined",
                    key
                ),
            ));
        }
        self.state = match question {
            Question::Options { .. } => State::InOptionQuestion,
            _ => State::Normal,
        };
        self.config.questions.push(question);
        Ok(())
    }

    /// Begin a radio or check question.
    fn start_option_question(
        &mut self,
        pos: Pos,
        key: KeyKind,
        kind: OptionKind,
        text: String,
    ) -> Result<(), Error> {
        let question = Question::Options {
            kind,
            text,
            options: Vec::new(),
        };
        self.start_question(pos, key, question)
    }

    /// `OPTION_NAME`: add an option whose tag may follow.
    fn option_name(&mut self, pos: Pos, name: String) -> Result<(), Error> {
        if !matches!(self.state, State::InOptionQuestion | State::InOptionName) {
            return Err(misplaced_option(pos, KeyKind::OptionName));
        }
        let options = self
            .options_mut()
            .ok_or_else(|| misplaced_option(pos, KeyKind::OptionName))?;
        options.push(QuestionOption::new(name, ""));
        self.state = State::InOptionName;
        Ok(())
    }

    /// `OPTION_TAG`: tag the pending option, or add a tag-named option.
    fn option_tag(&mut self, pos: Pos, tag: String) -> Result<(), Error> {
        if !matches!(self.state, State::InOptionQuestion | State::InOptionName) {
            return Err(misplaced_option(pos, KeyKind::OptionTag));
        }
        if tag.chars().any(char::is_whitespace) {
            return Err(Error::parser(
                pos,
                format!("{}: tag '{}' must not contain whitespace", KeyKind::OptionTag, tag),
            ));
        }
        let pending = self.state == State::InOptionName;
        let options = self
            .options_mut()
            .ok_or_else(|| misplaced_option(pos, KeyKind::OptionTag))?;
        if pending && let Some(option) = options.last_mut() {
            option.tag = tag;
        } else {
            options.push(QuestionOption::new(tag.clone(), tag));
        }
        self.state = State::InOptionQuestion;
        Ok(())
    }

    /// `ALIAS_TAG_FROM`: trigger list of an alias rule.
    fn alias_from(&mut self, pos: Pos, triggers: String) -> Result<(), Error> {
        let ready = self.ready();
        match mem::replace(&mut self.state, State::Normal) {
            State::AliasTo(dependents) => {
                self.config.conditional_tags.add_rule(&triggers, &dependents);
            }
            State::AliasFrom(_) => self.state = State::AliasFrom(triggers),
            _ if ready => self.state = State::AliasFrom(triggers),
            _ => return Err(misplaced_alias(pos, KeyKind::AliasTagFrom)),
        }
        Ok(())
    }

    /// `ALIAS_TAG_TO`: dependent list of an alias rule.
    fn alias_to(&mut self, pos: Pos, dependents: String) -> Result<(), Error> {
        let ready = self.ready();
        match mem::replace(&mut self.state, State::Normal) {
            State::AliasFrom(triggers) => {
                self.config.conditional_tags.add_rule(&triggers, &dependents);
            }
            State::AliasTo(_) => self.state = State::AliasTo(dependents),
            _ if ready => self.state = State::AliasTo(dependents),
            _ => return Err(misplaced_alias(pos, KeyKind::AliasTagTo)),
        }
        Ok(())
    }
}

/// Option key outside an option question.
fn misplaced_option(pos: Pos, key: KeyKind) -> Error {
    Error::parser(
        pos,
        format!("{}: only allowed inside a RADIO_QUESTION or CHECK_QUESTION", key),
    )
}

/// Alias key inside a question that is still being defined.
fn misplaced_alias(pos: Pos, key: KeyKind) -> Error {
    Error::parser(
        pos,
        format!(
            "{}: alias started while an option question is still being defined",
            key
        ),
    )
}

/// Error for an unusable setting value.
fn setting_error(pos: Pos, key: KeyKind, err: impl Display) -> Error {
    Error::parser(pos, format!("{}: {}", key, err))
}

/// Parse a non-negative integer setting.
fn parse_integer<T: FromStr>(pos: Pos, key: KeyKind, value: &str) -> Result<T, Error> {
    value.trim().parse().map_err(|_| {
        setting_error(
            pos,
            key,
            format!("invalid non-negative integer '{}'", value.trim()),
        )
    })
}

/// Parse a non-negative number of seconds.
fn parse_seconds(pos: Pos, key: KeyKind, value: &str) -> Result<Duration, Error> {
    let invalid = || {
        setting_error(
            pos,
            key,
            format!("invalid number of seconds '{}'", value.trim()),
        )
    };
    let secs: f64 = value.trim().parse().map_err(|_| invalid())?;
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

/// Parse a color setting, reporting failures as color errors.
fn parse_color(pos: Pos, key: KeyKind, value: &str) -> Result<Color, Error> {
    value
        .parse()
        .map_err(|e| Error::color(pos, format!("{}: {}", key, e)))
}
