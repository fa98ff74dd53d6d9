use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POST_TITLE: &str = "No Post Title";
pub const RAW_IMAGE_WARNING: &str = "!!!WARNING FILE TYPE!!!! ";

/// Path segment marking an export in a raw camera format.
const RAW_IMAGE_SEGMENT: &str = "NEF";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageRef {
    pub source_url: String,
}

impl ImageRef {
    pub fn new(source_url: impl Into<String>) -> ImageRef {
        ImageRef {
            source_url: source_url.into(),
        }
    }

    /// Final path segment of the source URL, used verbatim as the file name.
    pub fn file_name(&self) -> &str {
        self.source_url.rsplit('/').next().unwrap_or_default()
    }

    pub fn is_raw_format(&self) -> bool {
        self.source_url.split('/').any(|part| part == RAW_IMAGE_SEGMENT)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub date: NaiveDate,
    pub title: String,
    pub body_lines: Vec<String>,
    pub image_refs: Vec<ImageRef>,
}

impl Post {
    /// `YYYYMMDD-<title>`: the text file stem and the image directory name.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.date.format("%Y%m%d"), self.title)
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.slug())
    }

    /// Text file contents: title, paragraphs, then one line per image.
    pub fn text(&self) -> String {
        let mut text = format!("{}\n\n", self.title);
        text.push_str(&self.body_lines.join("\n\n"));
        text.push_str("\n\n");

        for image in &self.image_refs {
            if image.is_raw_format() {
                text.push_str(RAW_IMAGE_WARNING);
            }
            text.push_str(image.file_name());
            text.push('\n');
        }

        text
    }
}

/// Keep alphanumerics and spaces; fall back to the default title when
/// nothing is left.
pub fn clean_title(raw: &str) -> String {
    let cleaned = raw
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect::<String>();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_POST_TITLE.to_string()
    } else {
        cleaned.to_string()
    }
}
