mod extract;
mod package;
mod styles;
mod table;
mod write;

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Error;
use crate::model::{Block, DocData, Highlight, UnderlineStyle};

use styles::parse_styles;

pub(crate) use write::render;

pub(super) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(super) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// `w:highlight` values. CYAN precedes TURQUOISE so `cyan` reads back as CYAN;
/// AUTO is stored as `default`.
const HIGHLIGHT_VALUES: &[(Highlight, &str)] = &[
    (Highlight::Yellow, "yellow"),
    (Highlight::Green, "green"),
    (Highlight::Cyan, "cyan"),
    (Highlight::Pink, "magenta"),
    (Highlight::Blue, "blue"),
    (Highlight::Red, "red"),
    (Highlight::Gray, "lightGray"),
    (Highlight::DarkYellow, "darkYellow"),
    (Highlight::DarkGreen, "darkGreen"),
    (Highlight::DarkCyan, "darkCyan"),
    (Highlight::DarkPink, "darkMagenta"),
    (Highlight::DarkBlue, "darkBlue"),
    (Highlight::DarkRed, "darkRed"),
    (Highlight::DarkGray, "darkGray"),
    (Highlight::Black, "black"),
    (Highlight::White, "white"),
    (Highlight::Turquoise, "cyan"),
    (Highlight::None, "none"),
    (Highlight::Auto, "default"),
];

/// `w:u` values other than `single` and `none`.
const UNDERLINE_VALUES: &[(UnderlineStyle, &str)] = &[
    (UnderlineStyle::Single, "single"),
    (UnderlineStyle::Words, "words"),
    (UnderlineStyle::Double, "double"),
    (UnderlineStyle::Thick, "thick"),
    (UnderlineStyle::Dotted, "dotted"),
    (UnderlineStyle::DottedHeavy, "dottedHeavy"),
    (UnderlineStyle::Dash, "dash"),
    (UnderlineStyle::DashHeavy, "dashedHeavy"),
    (UnderlineStyle::DashLong, "dashLong"),
    (UnderlineStyle::DashLongHeavy, "dashLongHeavy"),
    (UnderlineStyle::DotDash, "dotDash"),
    (UnderlineStyle::DotDashHeavy, "dashDotHeavy"),
    (UnderlineStyle::DotDotDash, "dotDotDash"),
    (UnderlineStyle::DotDotDashHeavy, "dashDotDotHeavy"),
    (UnderlineStyle::Wavy, "wave"),
    (UnderlineStyle::WavyHeavy, "wavyHeavy"),
    (UnderlineStyle::WavyDouble, "wavyDouble"),
];

pub(super) fn highlight_from_wml(val: &str) -> Option<Highlight> {
    HIGHLIGHT_VALUES
        .iter()
        .find(|(_, v)| *v == val)
        .map(|(h, _)| *h)
}

pub(super) fn highlight_to_wml(highlight: Highlight) -> &'static str {
    HIGHLIGHT_VALUES
        .iter()
        .find(|(h, _)| *h == highlight)
        .map(|(_, v)| *v)
        .unwrap_or("none")
}

pub(super) fn underline_from_wml(val: &str) -> Option<UnderlineStyle> {
    UNDERLINE_VALUES
        .iter()
        .find(|(_, v)| *v == val)
        .map(|(u, _)| *u)
}

pub(super) fn underline_to_wml(style: UnderlineStyle) -> &'static str {
    UNDERLINE_VALUES
        .iter()
        .find(|(u, _)| *u == style)
        .map(|(_, v)| *v)
        .unwrap_or("single")
}

pub(super) fn twips_to_pts(twips: f32) -> f32 {
    twips / 20.0
}

pub(super) fn pts_to_twips(pts: f32) -> i64 {
    (pts * 20.0).round() as i64
}

pub(super) fn is_hex_color(val: &str) -> bool {
    val.len() == 6 && val.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse a WML boolean toggle element (e.g., w:b, w:i, w:strike).
/// Present with no val, or a val other than "0"/"false"/"off", means true.
pub(super) fn wml_bool(parent: roxmltree::Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .is_none_or(|v| v != "0" && v != "false" && v != "off")
    })
}

pub(super) fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

pub(super) fn wml<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    node.children().find(|n| is_wml(*n, name))
}

pub(super) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

pub(super) fn twips_attr(node: roxmltree::Node, attr: &str) -> Option<f32> {
    node.attribute((WML_NS, attr))
        .and_then(|v| v.parse::<f32>().ok())
        .map(twips_to_pts)
}

pub(super) fn read_zip_text<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    name: &str,
) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Flatten SDT wrappers: descend into w:sdtContent and collect effective children.
pub(super) fn collect_block_nodes<'a>(
    parent: roxmltree::Node<'a, 'a>,
) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}

pub fn parse(path: &Path) -> Result<DocData, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => Error::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", e, path.display()),
        )),
        _ => Error::Io(e),
    })?;
    parse_archive(file)
}

pub fn parse_bytes(data: &[u8]) -> Result<DocData, Error> {
    parse_archive(Cursor::new(data))
}

fn parse_archive<R: Read + Seek>(reader: R) -> Result<DocData, Error> {
    let mut zip = zip::ZipArchive::new(reader)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;

    let styles = parse_styles(&mut zip);

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();
    let body = wml(root, "body").ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let mut blocks = Vec::new();
    for node in collect_block_nodes(body) {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => blocks.push(Block::Paragraph(extract::paragraph(node, &styles))),
            "tbl" => blocks.push(Block::Table(table::resolve(node, &styles)?)),
            "sectPr" => {}
            other => log::debug!("Skipping body element w:{other}"),
        }
    }

    Ok(DocData { blocks })
}
