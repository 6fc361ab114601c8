//! Label list parsing.

use std::io::Read;
use std::ops::Index;

/// Class names, index-aligned with the model's output scores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelList {
    labels: Vec<String>,
}

impl LabelList {
    /// Read a label file, one label per line.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the text is not valid UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    /// Split text into labels.
    ///
    /// A line ends at `\n`, `\r\n` or a lone `\r`; the terminator is
    /// stripped and no line is skipped, so a blank line yields an empty
    /// label. A terminator after the last line does not add a label.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut labels = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            let Some(end) = rest.find(|c: char| c == '\n' || c == '\r') else {
                labels.push(rest.to_string());
                break;
            };

            labels.push(rest[..end].to_string());
            let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
            rest = &rest[end + terminator..];
        }

        Self { labels }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl From<Vec<String>> for LabelList {
    fn from(labels: Vec<String>) -> Self {
        Self { labels }
    }
}

impl<S: Into<String>> FromIterator<S> for LabelList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Index<usize> for LabelList {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.labels[index]
    }
}
