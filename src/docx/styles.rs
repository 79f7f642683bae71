use std::collections::HashMap;
use std::io::{Read, Seek};

use super::{WML_NS, read_zip_text, wml_attr};

/// Built-in style names Word stores in lowercase, paired with the name shown
/// in the UI. Documents keep the left form in `w:name`; `DocData` carries the right.
const UI_NAMES: &[(&str, &str)] = &[
    ("caption", "Caption"),
    ("footer", "Footer"),
    ("header", "Header"),
    ("heading 1", "Heading 1"),
    ("heading 2", "Heading 2"),
    ("heading 3", "Heading 3"),
    ("heading 4", "Heading 4"),
    ("heading 5", "Heading 5"),
    ("heading 6", "Heading 6"),
    ("heading 7", "Heading 7"),
    ("heading 8", "Heading 8"),
    ("heading 9", "Heading 9"),
    ("list", "List"),
    ("list bullet", "List Bullet"),
    ("list bullet 2", "List Bullet 2"),
    ("list bullet 3", "List Bullet 3"),
    ("list continue", "List Continue"),
    ("list number", "List Number"),
    ("list number 2", "List Number 2"),
    ("list number 3", "List Number 3"),
    ("title", "Title"),
    ("toc heading", "TOC Heading"),
];

pub(super) fn ui_style_name(internal: &str) -> &str {
    UI_NAMES
        .iter()
        .find(|(i, _)| *i == internal)
        .map(|(_, ui)| *ui)
        .unwrap_or(internal)
}

pub(super) fn internal_style_name(ui: &str) -> &str {
    UI_NAMES
        .iter()
        .find(|(_, u)| *u == ui)
        .map(|(i, _)| *i)
        .unwrap_or(ui)
}

/// Paragraph styles of a document: id → UI name.
#[derive(Default)]
pub(super) struct StyleTable {
    paragraph_names: HashMap<String, String>,
}

impl StyleTable {
    /// UI name of the style a paragraph uses. "Normal" and unknown ids
    /// read as no style.
    pub(super) fn paragraph_style(&self, style_id: Option<&str>) -> Option<&str> {
        let id = style_id?;
        let Some(name) = self.paragraph_names.get(id) else {
            log::debug!("Unknown paragraph style id {id:?}, using default style");
            return None;
        };
        (name != "Normal").then_some(name.as_str())
    }
}

pub(super) fn parse_styles<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> StyleTable {
    let mut table = StyleTable::default();

    let Some(xml_content) = read_zip_text(zip, "word/styles.xml") else {
        return table;
    };
    let Ok(xml) = roxmltree::Document::parse(&xml_content) else {
        log::warn!("word/styles.xml is not well-formed; ignoring paragraph styles");
        return table;
    };

    for style_node in xml.root_element().children() {
        if style_node.tag_name().name() != "style"
            || style_node.tag_name().namespace() != Some(WML_NS)
        {
            continue;
        }
        if style_node.attribute((WML_NS, "type")) != Some("paragraph") {
            continue;
        }
        let Some(style_id) = style_node.attribute((WML_NS, "styleId")) else {
            continue;
        };

        let name = wml_attr(style_node, "name")
            .map(ui_style_name)
            .unwrap_or(style_id);

        table
            .paragraph_names
            .insert(style_id.to_string(), name.to_string());
    }

    table
}
