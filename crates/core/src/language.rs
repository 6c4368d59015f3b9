//! Per-line language tagging.

use crate::error::{OutlineError, OutlineResult};
use crate::line::{Line, UNKNOWN_LANGUAGE};

/// Identifies the language of a line of text.
pub trait LanguageTagger: Send + Sync {
    /// Short language code for `text`, or an error when it cannot be decided.
    fn tag(&self, text: &str) -> OutlineResult<String>;
}

/// Tag every line, recovering tagger failures as `"unknown"`.
pub fn tag_lines(lines: Vec<Line>, tagger: &dyn LanguageTagger) -> Vec<Line> {
    lines
        .into_iter()
        .map(|line| {
            let tag = match tagger.tag(&line.text) {
                Ok(tag) => tag,
                Err(e) => {
                    tracing::debug!("Language tagging failed for {:?}: {}", line.text, e);
                    UNKNOWN_LANGUAGE.to_string()
                }
            };
            line.with_language(tag)
        })
        .collect()
}

/// Tagger that never identifies anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLanguage;

impl LanguageTagger for NoLanguage {
    fn tag(&self, _text: &str) -> OutlineResult<String> {
        Ok(UNKNOWN_LANGUAGE.to_string())
    }
}

/// Tags lines by the dominant Unicode script of their letters.
///
/// Scripts used by a single major language map to that language's code.
/// Latin and other shared scripts stay `"unknown"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptTagger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Han,
    Kana,
    Hangul,
    Arabic,
    Hebrew,
    Cyrillic,
    Greek,
    Devanagari,
    Thai,
    Other,
}

const SCRIPT_COUNT: usize = 11;

impl Script {
    fn of(c: char) -> Option<Self> {
        if !c.is_alphabetic() {
            return None;
        }
        let code = c as u32;
        let script = match code {
            0x0041..=0x024F | 0x1E00..=0x1EFF => Self::Latin,
            0x0370..=0x03FF => Self::Greek,
            0x0400..=0x04FF => Self::Cyrillic,
            0x0590..=0x05FF | 0xFB1D..=0xFB4F => Self::Hebrew,
            0x0600..=0x06FF | 0x0750..=0x08FF | 0xFB50..=0xFDFF => Self::Arabic,
            0x0900..=0x097F => Self::Devanagari,
            0x0E00..=0x0E7F => Self::Thai,
            0x3040..=0x30FF => Self::Kana,
            0x4E00..=0x9FFF | 0x3400..=0x4DBF => Self::Han,
            0xAC00..=0xD7AF | 0x1100..=0x11FF => Self::Hangul,
            _ => Self::Other,
        };
        Some(script)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl LanguageTagger for ScriptTagger {
    fn tag(&self, text: &str) -> OutlineResult<String> {
        let mut counts = [0usize; SCRIPT_COUNT];
        for script in text.chars().filter_map(Script::of) {
            counts[script.index()] += 1;
        }

        // Any kana marks Japanese even when kanji dominate.
        if counts[Script::Kana.index()] > 0 {
            return Ok("ja".to_string());
        }

        // Ties go to the earlier script here, so distinctive scripts win over
        // Latin and unclassified letters.
        let dominant = [
            Script::Han,
            Script::Hangul,
            Script::Arabic,
            Script::Hebrew,
            Script::Cyrillic,
            Script::Greek,
            Script::Devanagari,
            Script::Thai,
            Script::Latin,
            Script::Other,
        ]
        .into_iter()
        .fold(None, |best: Option<Script>, script| match best {
            Some(best) if counts[best.index()] >= counts[script.index()] => Some(best),
            _ if counts[script.index()] > 0 => Some(script),
            _ => best,
        })
        .ok_or_else(|| OutlineError::LanguageTag(format!("no letters in {text:?}")))?;

        let code = match dominant {
            Script::Han => "zh",
            Script::Hangul => "ko",
            Script::Arabic => "ar",
            Script::Hebrew => "he",
            Script::Cyrillic => "ru",
            Script::Greek => "el",
            Script::Devanagari => "hi",
            Script::Thai => "th",
            Script::Kana => "ja",
            Script::Latin | Script::Other => UNKNOWN_LANGUAGE,
        };
        Ok(code.to_string())
    }
}
