use crate::{format::TimestampStyle, types::Segment};

/// One numbered, timed block of a subtitle document.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleBlock {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Subtitle blocks derived 1:1 from transcript segments, in segment order.
///
/// Timestamps are passed through untouched: nothing checks that they are
/// monotonic or that `start <= end`. Text is trimmed but never escaped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    blocks: Vec<SubtitleBlock>,
}

impl SubtitleDocument {
    pub fn from_segments(segments: &[Segment]) -> Self {
        let blocks = segments
            .iter()
            .enumerate()
            .map(|(i, seg)| SubtitleBlock {
                index: i + 1,
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect();

        Self { blocks }
    }

    pub fn blocks(&self) -> &[SubtitleBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn render(&self, style: TimestampStyle) -> String {
        let mut output = String::new();
        for block in &self.blocks {
            output.push_str(&format!(
                "{}\n{} --> {}\n{}\n\n",
                block.index,
                style.format(block.start),
                style.format(block.end),
                block.text
            ));
        }
        output
    }
}

/// Format transcript segments as a subtitle document
pub fn format_subtitles(segments: &[Segment], style: TimestampStyle) -> String {
    SubtitleDocument::from_segments(segments).render(style)
}
