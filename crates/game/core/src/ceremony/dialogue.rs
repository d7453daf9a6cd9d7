/// Marker joining consecutive dialogue chunks.
pub const CONTINUATION_MARKER: &str = "...";

/// Splits text on whitespace into groups of `words_per_chunk` words.
///
/// Every chunk but the first opens with [`CONTINUATION_MARKER`] and every
/// chunk but the last closes with it. Blank text yields no chunks.
pub fn split_into_chunks(text: &str, words_per_chunk: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let groups: Vec<&[&str]> = words.chunks(words_per_chunk.max(1)).collect();
    let last = groups.len().saturating_sub(1);

    groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let mut chunk = String::new();
            if index > 0 {
                chunk.push_str(CONTINUATION_MARKER);
            }
            chunk.push_str(&group.join(" "));
            if index < last {
                chunk.push_str(CONTINUATION_MARKER);
            }
            chunk
        })
        .collect()
}

/// Position within a ceremony's dialogue.
///
/// The cursor only moves forward; nothing short of building a new cursor
/// sends it back to the first chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueCursor {
    chunks: Vec<String>,
    next: usize,
}

impl DialogueCursor {
    pub fn new(text: &str, words_per_chunk: usize) -> Self {
        Self {
            chunks: split_into_chunks(text, words_per_chunk),
            next: 0,
        }
    }

    /// Delivers the next chunk with its index, or `None` once exhausted.
    pub fn advance(&mut self) -> Option<(usize, &str)> {
        let index = self.next;
        let chunk = self.chunks.get(index)?;
        self.next += 1;
        Some((index, chunk.as_str()))
    }

    pub fn total(&self) -> usize {
        self.chunks.len()
    }

    /// Number of chunks delivered so far.
    pub fn delivered(&self) -> usize {
        self.next
    }

    pub fn is_started(&self) -> bool {
        self.next > 0
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.chunks.len()
    }

    pub fn chunks(&self) -> &[String] {
        &self.chunks
    }
}
