//! Package parts for newly written documents: content types, relationships
//! and the built-in style set.

use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Error;

use super::WML_NS;
use super::styles::internal_style_name;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

pub(super) const TABLE_STYLE_ID: &str = "TableGrid";

struct BuiltinStyle {
    id: &'static str,
    name: &'static str, // as stored in w:name
    based_on: Option<&'static str>,
    ppr: &'static str,
    rpr: &'static str,
}

const BUILTIN_STYLES: &[BuiltinStyle] = &[
    BuiltinStyle { id: "Normal", name: "Normal", based_on: None, ppr: "", rpr: "" },
    BuiltinStyle {
        id: "Title",
        name: "Title",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:after="80" w:line="240" w:lineRule="auto"/><w:contextualSpacing/>"#,
        rpr: r#"<w:kern w:val="28"/><w:sz w:val="56"/>"#,
    },
    BuiltinStyle {
        id: "Subtitle",
        name: "Subtitle",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:after="160"/>"#,
        rpr: r#"<w:color w:val="595959"/><w:sz w:val="28"/>"#,
    },
    BuiltinStyle {
        id: "Heading1",
        name: "heading 1",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="360" w:after="80"/><w:outlineLvl w:val="0"/>"#,
        rpr: r#"<w:b/><w:sz w:val="40"/>"#,
    },
    BuiltinStyle {
        id: "Heading2",
        name: "heading 2",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="160" w:after="80"/><w:outlineLvl w:val="1"/>"#,
        rpr: r#"<w:b/><w:sz w:val="32"/>"#,
    },
    BuiltinStyle {
        id: "Heading3",
        name: "heading 3",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="160" w:after="80"/><w:outlineLvl w:val="2"/>"#,
        rpr: r#"<w:b/><w:sz w:val="28"/>"#,
    },
    BuiltinStyle {
        id: "Heading4",
        name: "heading 4",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="80" w:after="40"/><w:outlineLvl w:val="3"/>"#,
        rpr: r#"<w:b/><w:i/>"#,
    },
    BuiltinStyle {
        id: "Heading5",
        name: "heading 5",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="80" w:after="40"/><w:outlineLvl w:val="4"/>"#,
        rpr: r#"<w:b/>"#,
    },
    BuiltinStyle {
        id: "Heading6",
        name: "heading 6",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="40"/><w:outlineLvl w:val="5"/>"#,
        rpr: r#"<w:i/>"#,
    },
    BuiltinStyle {
        id: "Heading7",
        name: "heading 7",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:spacing w:before="40"/><w:outlineLvl w:val="6"/>"#,
        rpr: r#"<w:color w:val="595959"/>"#,
    },
    BuiltinStyle {
        id: "Heading8",
        name: "heading 8",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:outlineLvl w:val="7"/>"#,
        rpr: r#"<w:i/><w:color w:val="272727"/>"#,
    },
    BuiltinStyle {
        id: "Heading9",
        name: "heading 9",
        based_on: Some("Normal"),
        ppr: r#"<w:keepNext/><w:outlineLvl w:val="8"/>"#,
        rpr: r#"<w:color w:val="272727"/>"#,
    },
    BuiltinStyle {
        id: "Quote",
        name: "Quote",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:before="160"/><w:jc w:val="center"/>"#,
        rpr: r#"<w:i/><w:color w:val="404040"/>"#,
    },
    BuiltinStyle {
        id: "IntenseQuote",
        name: "Intense Quote",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:before="360" w:after="360"/><w:ind w:left="864" w:right="864"/><w:jc w:val="center"/>"#,
        rpr: r#"<w:i/><w:color w:val="0F4761"/>"#,
    },
    BuiltinStyle {
        id: "ListParagraph",
        name: "List Paragraph",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="720"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListBullet",
        name: "List Bullet",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="360" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListNumber",
        name: "List Number",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="360" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListBullet2",
        name: "List Bullet 2",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="720" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListBullet3",
        name: "List Bullet 3",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="1080" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListNumber2",
        name: "List Number 2",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="720" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListNumber3",
        name: "List Number 3",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="1080" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "List",
        name: "List",
        based_on: Some("Normal"),
        ppr: r#"<w:ind w:left="360" w:hanging="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "ListContinue",
        name: "List Continue",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:after="120"/><w:ind w:left="360"/><w:contextualSpacing/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "Header",
        name: "header",
        based_on: Some("Normal"),
        ppr: r#"<w:tabs><w:tab w:val="center" w:pos="4680"/><w:tab w:val="right" w:pos="9360"/></w:tabs><w:spacing w:after="0" w:line="240" w:lineRule="auto"/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "Footer",
        name: "footer",
        based_on: Some("Normal"),
        ppr: r#"<w:tabs><w:tab w:val="center" w:pos="4680"/><w:tab w:val="right" w:pos="9360"/></w:tabs><w:spacing w:after="0" w:line="240" w:lineRule="auto"/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "TOCHeading",
        name: "TOC Heading",
        based_on: Some("Heading1"),
        ppr: r#"<w:outlineLvl w:val="9"/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "NoSpacing",
        name: "No Spacing",
        based_on: None,
        ppr: r#"<w:spacing w:after="0" w:line="240" w:lineRule="auto"/>"#,
        rpr: "",
    },
    BuiltinStyle {
        id: "Caption",
        name: "caption",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:after="200" w:line="240" w:lineRule="auto"/>"#,
        rpr: r#"<w:i/><w:color w:val="0E2841"/><w:sz w:val="18"/>"#,
    },
    BuiltinStyle {
        id: "BodyText",
        name: "Body Text",
        based_on: Some("Normal"),
        ppr: r#"<w:spacing w:after="120"/>"#,
        rpr: "",
    },
];

/// Style id for a paragraph style given by its UI name ("Heading 1") or its
/// stored name ("heading 1").
pub(super) fn paragraph_style_id(name: &str) -> Result<&'static str, Error> {
    let stored = internal_style_name(name);
    BUILTIN_STYLES
        .iter()
        .find(|s| s.name == stored || s.name == name)
        .map(|s| s.id)
        .ok_or_else(|| Error::StyleNotFound(name.to_string()))
}

fn styles_xml() -> Result<String, Error> {
    let mut xml = String::with_capacity(8 * 1024);
    write!(
        xml,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{WML_NS}">"#
    )?;
    xml.push_str(
        r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#,
    );

    for style in BUILTIN_STYLES {
        let default_attr = if style.id == "Normal" { r#" w:default="1""# } else { "" };
        write!(
            xml,
            r#"<w:style w:type="paragraph"{default_attr} w:styleId="{}"><w:name w:val="{}"/>"#,
            style.id, style.name
        )?;
        if let Some(parent) = style.based_on {
            write!(xml, r#"<w:basedOn w:val="{parent}"/><w:next w:val="Normal"/>"#)?;
        }
        xml.push_str("<w:qFormat/>");
        if !style.ppr.is_empty() {
            write!(xml, "<w:pPr>{}</w:pPr>", style.ppr)?;
        }
        if !style.rpr.is_empty() {
            write!(xml, "<w:rPr>{}</w:rPr>", style.rpr)?;
        }
        xml.push_str("</w:style>");
    }

    write!(
        xml,
        r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style><w:style w:type="table" w:styleId="{TABLE_STYLE_ID}"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr><w:tblPr><w:tblBorders><w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/></w:tblBorders></w:tblPr></w:style>"#
    )?;

    xml.push_str("</w:styles>");
    Ok(xml)
}

/// Zip the parts of a new document in memory.
pub(super) fn assemble(document_xml: &str) -> Result<Vec<u8>, Error> {
    let styles = styles_xml()?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, &str); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", PACKAGE_RELS),
        ("word/document.xml", document_xml),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS),
        ("word/styles.xml", styles.as_str()),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
