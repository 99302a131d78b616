//! Transcript rendering
//!
//! Two output shapes are supported: timestamped plain text with a title
//! header, and a numbered subtitle listing with raw second offsets.

use std::str::FromStr;

use super::TranscriptLine;
use crate::error::TranscriptError;

/// Output format of a rendered transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// `[m:ss] text` lines under a title header
    Text,
    /// Numbered entries with `start --> end` second offsets
    Subtitle,
}

impl TranscriptFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            TranscriptFormat::Text => "txt",
            TranscriptFormat::Subtitle => "srt",
        }
    }
}

impl FromStr for TranscriptFormat {
    type Err = TranscriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" | "txt" => Ok(TranscriptFormat::Text),
            "subtitle" | "srt" => Ok(TranscriptFormat::Subtitle),
            other => Err(TranscriptError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A rendered transcript and the file name suggested for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTranscript {
    pub file_name: String,
    pub content: String,
}

impl FormattedTranscript {
    /// Render `lines`.
    ///
    /// `language` is the explicitly requested code, or `None` when the
    /// default priority list was used; it only affects the file name.
    pub fn render(
        lines: &[TranscriptLine],
        format: TranscriptFormat,
        video_id: &str,
        title: &str,
        language: Option<&str>,
    ) -> Self {
        let stem = match format {
            TranscriptFormat::Text => title,
            TranscriptFormat::Subtitle => video_id,
        };
        let file_name = match language {
            Some(code) => format!("{}_{}_subtitles.{}", stem, code, format.extension()),
            None => format!("{}_subtitles.{}", stem, format.extension()),
        };
        let content = match format {
            TranscriptFormat::Text => render_text(lines, title),
            TranscriptFormat::Subtitle => render_subtitle(lines),
        };

        Self { file_name, content }
    }
}

/// `[minutes:seconds]`, minutes unpadded, seconds two digits, fraction dropped
pub fn format_timestamp(start: f64) -> String {
    let start = start.max(0.0);
    let minutes = (start / 60.0).floor() as u64;
    let seconds = (start % 60.0).floor() as u64;
    format!("[{}:{:02}]", minutes, seconds)
}

/// Seconds as a float literal: whole values keep one decimal (`3.0`),
/// everything else uses the shortest exact representation.
pub fn format_seconds(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

pub fn render_text(lines: &[TranscriptLine], title: &str) -> String {
    let body = lines
        .iter()
        .map(|line| format!("{} {}", format_timestamp(line.start), line.text))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Title: \"{}\"\n\n{}", title, body)
}

pub fn render_subtitle(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{}\n{} --> {}\n{}",
                i + 1,
                format_seconds(line.start),
                format_seconds(line.start + line.duration),
                line.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: f64, duration: f64, text: &str) -> TranscriptLine {
        TranscriptLine {
            start,
            duration,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("text".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Text);
        assert_eq!("txt".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Text);
        assert_eq!(
            "subtitle".parse::<TranscriptFormat>().unwrap(),
            TranscriptFormat::Subtitle
        );
        assert_eq!("srt".parse::<TranscriptFormat>().unwrap(), TranscriptFormat::Subtitle);
        assert!(matches!(
            "xml".parse::<TranscriptFormat>(),
            Err(TranscriptError::UnsupportedFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn test_timestamp_truncates() {
        assert_eq!(format_timestamp(65.7), "[1:05]");
        assert_eq!(format_timestamp(0.0), "[0:00]");
        assert_eq!(format_timestamp(59.999), "[0:59]");
        assert_eq!(format_timestamp(3600.0), "[60:00]");
        assert_eq!(format_timestamp(-1.0), "[0:00]");
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "0.0");
        assert_eq!(format_seconds(3.0), "3.0");
        assert_eq!(format_seconds(1.5), "1.5");
        assert_eq!(format_seconds(2.25 + 1.5), "3.75");
    }

    #[test]
    fn test_render_text() {
        let lines = vec![line(0.5, 2.0, "hello"), line(65.7, 1.0, "hi")];
        let out = render_text(&lines, "My Video");
        assert_eq!(out, "Title: \"My Video\"\n\n[0:00] hello\n[1:05] hi");
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[], "T"), "Title: \"T\"\n\n");
    }

    #[test]
    fn test_render_subtitle() {
        let lines = vec![line(0.0, 1.5, "first"), line(1.5, 2.0, "second")];
        assert_eq!(
            render_subtitle(&lines),
            "1\n0.0 --> 1.5\nfirst\n\n2\n1.5 --> 3.5\nsecond"
        );
    }

    #[test]
    fn test_file_names() {
        let lines = vec![line(1.0, 1.0, "x")];

        let t = FormattedTranscript::render(&lines, TranscriptFormat::Text, "vid", "Title", Some("ko"));
        assert_eq!(t.file_name, "Title_ko_subtitles.txt");

        let t = FormattedTranscript::render(&lines, TranscriptFormat::Text, "vid", "Title", None);
        assert_eq!(t.file_name, "Title_subtitles.txt");

        let t = FormattedTranscript::render(&lines, TranscriptFormat::Subtitle, "vid", "Title", Some("en"));
        assert_eq!(t.file_name, "vid_en_subtitles.srt");
        assert_eq!(t.content, "1\n1.0 --> 2.0\nx");

        let t = FormattedTranscript::render(&lines, TranscriptFormat::Subtitle, "vid", "Title", None);
        assert_eq!(t.file_name, "vid_subtitles.srt");
    }
}
