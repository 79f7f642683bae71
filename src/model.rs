use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Closed enumeration with an explicit name table. Unknown names parse to
/// `Error::UnknownName`, and the same table drives serde in both directions.
macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Error> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(Error::UnknownName {
                        kind: $kind,
                        name: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

named_enum!(
    /// Paragraph alignment as exchanged in `DocData`.
    Alignment, "alignment" {
        Left => "LEFT",
        Center => "CENTER",
        Right => "RIGHT",
        Justify => "JUSTIFY",
    }
);

named_enum!(
    Highlight, "highlight" {
        Yellow => "YELLOW",
        Green => "GREEN",
        Cyan => "CYAN",
        Pink => "PINK",
        Blue => "BLUE",
        Red => "RED",
        Gray => "GRAY",
        DarkYellow => "DARK_YELLOW",
        DarkGreen => "DARK_GREEN",
        DarkCyan => "DARK_CYAN",
        DarkPink => "DARK_PINK",
        DarkBlue => "DARK_BLUE",
        DarkRed => "DARK_RED",
        DarkGray => "DARK_GRAY",
        Black => "BLACK",
        White => "WHITE",
        Turquoise => "TURQUOISE",
        None => "NONE",
        Auto => "AUTO",
    }
);

named_enum!(
    /// Named underline styles. Plain single underline is `Underline::Flag(true)`.
    UnderlineStyle, "underline style" {
        Single => "SINGLE",
        Words => "WORDS",
        Double => "DOUBLE",
        Thick => "THICK",
        Dotted => "DOTTED",
        DottedHeavy => "DOTTED_HEAVY",
        Dash => "DASH",
        DashHeavy => "DASH_HEAVY",
        DashLong => "DASH_LONG",
        DashLongHeavy => "DASH_LONG_HEAVY",
        DotDash => "DOT_DASH",
        DotDashHeavy => "DOT_DASH_HEAVY",
        DotDotDash => "DOT_DOT_DASH",
        DotDotDashHeavy => "DOT_DOT_DASH_HEAVY",
        Wavy => "WAVY",
        WavyHeavy => "WAVY_HEAVY",
        WavyDouble => "WAVY_DOUBLE",
    }
);

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Underline {
    Flag(bool),
    Style(UnderlineStyle),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineSpacingRule {
    Exact,
    AtLeast,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineSpacing {
    Multiple(f32), // unitless, 1.0 = single
    Fixed { points: f32, rule: LineSpacingRule },
}

/// A span of text with the character formatting explicitly set on it.
/// `None` means inherited, never "off".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunData {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_strike: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscript: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>, // points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<String>, // "RRGGBB"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_caps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_caps: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl RunData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphData {
    /// Display name of the paragraph style; absent means "Normal".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_indent: Option<f32>, // points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_indent: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_line_indent: Option<f32>, // negative = hanging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<LineSpacing>,
    #[serde(default)]
    pub runs: Vec<RunData>,
}

impl ParagraphData {
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Index into `TableData::cells`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellContentId(pub usize);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellContent {
    pub paragraphs: Vec<ParagraphData>,
}

impl CellContent {
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(ParagraphData::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VMerge {
    #[default]
    None,
    Start,
    Continuation { origin_row: usize },
}

/// One grid column of a table row. A cell spanning N columns appears N times
/// with the same `content`; a vertical continuation points at the content of
/// the cell that started the merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub content: CellContentId,
    #[serde(default = "single_span")]
    pub h_span: u32,
    #[serde(default)]
    pub v_merge: VMerge,
}

fn single_span() -> u32 {
    1
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub cells: Vec<CellContent>,
    pub rows: Vec<Vec<GridCell>>,
}

impl TableData {
    pub fn push_content(&mut self, content: CellContent) -> CellContentId {
        self.cells.push(content);
        CellContentId(self.cells.len() - 1)
    }

    pub fn content(&self, id: CellContentId) -> Option<&CellContent> {
        self.cells.get(id.0)
    }

    pub fn grid_cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row)?.get(col)
    }

    /// Content shown at a grid position, following merges.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellContent> {
        self.grid_cell(row, col).and_then(|gc| self.content(gc.content))
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph(ParagraphData),
    Table(TableData),
}

/// Top-level blocks in document order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocData {
    pub blocks: Vec<Block>,
}

impl DocData {
    /// Unknown alignment, highlight or underline names fail with
    /// `Error::UnknownName` before the shape is checked.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        check_block_names(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &ParagraphData> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableData> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

// Values of the wrong JSON type are left for serde to report.
fn check_block_names(blocks: &serde_json::Value) -> Result<(), Error> {
    for block in blocks.as_array().into_iter().flatten() {
        check_paragraph_names(block)?;
        let cells = block.get("cells").and_then(|c| c.as_array());
        for cell in cells.into_iter().flatten() {
            let paragraphs = cell.get("paragraphs").and_then(|p| p.as_array());
            for paragraph in paragraphs.into_iter().flatten() {
                check_paragraph_names(paragraph)?;
            }
        }
    }
    Ok(())
}

fn check_paragraph_names(paragraph: &serde_json::Value) -> Result<(), Error> {
    if let Some(name) = paragraph.get("alignment").and_then(|v| v.as_str()) {
        name.parse::<Alignment>()?;
    }
    let runs = paragraph.get("runs").and_then(|r| r.as_array());
    for run in runs.into_iter().flatten() {
        if let Some(name) = run.get("highlight").and_then(|v| v.as_str()) {
            name.parse::<Highlight>()?;
        }
        if let Some(name) = run.get("underline").and_then(|v| v.as_str()) {
            name.parse::<UnderlineStyle>()?;
        }
    }
    Ok(())
}
