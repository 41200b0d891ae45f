//! The compiled questionnaire configuration.

use std::time::Duration;

use serde::Serialize;
use tags::{ConditionalTagger, TagsContainer};

use crate::{Color, ImageQuality, Question, Safety, defaults};

/// Starting values for every scalar setting of a [`Config`].
///
/// Passed to [`compile_with`](crate::compile_with); the template then
/// overrides whatever it mentions.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    /// Source prefilled for new images.
    pub default_source: String,
    /// Rating preselected for new images.
    pub default_safety: Safety,
    /// Upper bound on simultaneously open tag files.
    pub max_open_files: usize,
    /// Interval between background flushes of pending tag writes.
    pub update_interval: Duration,
    /// Byte budget for decoded images kept in memory.
    pub max_image_buffer_size: u64,
    /// First checkerboard color behind transparent images.
    pub background_color_one: Color,
    /// Second checkerboard color behind transparent images.
    pub background_color_two: Color,
    /// Checkerboard square width in pixels.
    pub background_square_width: u32,
    /// Scaling quality used when displaying images.
    pub default_image_quality: ImageQuality,
    /// Keybind strings preceding any the template adds.
    pub keybinds: Vec<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            default_source: String::new(),
            default_safety: defaults::DEFAULT_SAFETY,
            max_open_files: defaults::MAX_OPEN_FILES,
            update_interval: defaults::UPDATE_INTERVAL,
            max_image_buffer_size: defaults::MAX_IMAGE_BUFSIZE,
            background_color_one: defaults::background_one(),
            background_color_two: defaults::background_two(),
            background_square_width: defaults::BACKGROUND_SQUARE_WIDTH,
            default_image_quality: defaults::DEFAULT_IMAGE_QUALITY,
            keybinds: Vec::new(),
        }
    }
}

/// A compiled template.
///
/// The tag registries are handed to the tagging session, which keeps
/// mutating them after compilation.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Source prefilled for new images.
    pub default_source: String,
    /// Tags applied when an image has no name.
    pub nameless_tags: TagsContainer,
    /// Tags applied when an image has no source.
    pub sourceless_tags: TagsContainer,
    /// Tags applied when an image has no tags.
    pub tagless_tags: TagsContainer,
    /// Alias rules: trigger tag -> dependent tags.
    pub conditional_tags: ConditionalTagger,
    /// Rating preselected for new images.
    pub default_safety: Safety,
    /// Upper bound on simultaneously open tag files.
    pub max_open_files: usize,
    /// Interval between background flushes of pending tag writes.
    pub update_interval: Duration,
    /// Byte budget for decoded images kept in memory.
    pub max_image_buffer_size: u64,
    /// First checkerboard color behind transparent images.
    pub background_color_one: Color,
    /// Second checkerboard color behind transparent images.
    pub background_color_two: Color,
    /// Checkerboard square width in pixels.
    pub background_square_width: u32,
    /// Keybind strings, in template order.
    pub keybinds: Vec<String>,
    /// Questions, in template order.
    pub questions: Vec<Question>,
    /// Scaling quality used when displaying images.
    pub default_image_quality: ImageQuality,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_defaults(Defaults::default())
    }
}

impl Config {
    /// An empty configuration seeded from `defaults`.
    pub fn from_defaults(defaults: Defaults) -> Self {
        Self {
            default_source: defaults.default_source,
            nameless_tags: TagsContainer::new(),
            sourceless_tags: TagsContainer::new(),
            tagless_tags: TagsContainer::new(),
            conditional_tags: ConditionalTagger::new(),
            default_safety: defaults.default_safety,
            max_open_files: defaults.max_open_files,
            update_interval: defaults.update_interval,
            max_image_buffer_size: defaults.max_image_buffer_size,
            background_color_one: defaults.background_color_one,
            background_color_two: defaults.background_color_two,
            background_square_width: defaults.background_square_width,
            keybinds: defaults.keybinds,
            questions: Vec::new(),
            default_image_quality: defaults.default_image_quality,
        }
    }
}
