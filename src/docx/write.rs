//! Rendering `DocData` back into WordprocessingML.

use std::fmt::Write;

use crate::error::Error;
use crate::model::{
    Alignment, Block, DocData, GridCell, LineSpacing, LineSpacingRule, ParagraphData, RunData,
    TableData, Underline, VMerge,
};

use super::package::{self, TABLE_STYLE_ID};
use super::{REL_NS, WML_NS, highlight_to_wml, is_hex_color, pts_to_twips, underline_to_wml};

// US Letter with one inch margins
const PAGE_WIDTH: i64 = 12240;
const PAGE_HEIGHT: i64 = 15840;
const PAGE_MARGIN: i64 = 1440;
const TEXT_WIDTH: i64 = PAGE_WIDTH - 2 * PAGE_MARGIN;

/// Build a complete .docx package for `doc` in memory.
pub(crate) fn render(doc: &DocData) -> Result<Vec<u8>, Error> {
    let mut xml = String::with_capacity(4096);
    write!(
        xml,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WML_NS}" xmlns:r="{REL_NS}"><w:body>"#
    )?;

    for block in &doc.blocks {
        match block {
            Block::Paragraph(para) => write_paragraph(&mut xml, para)?,
            Block::Table(table) => write_table(&mut xml, table)?,
        }
    }

    write!(
        xml,
        r#"<w:sectPr><w:pgSz w:w="{PAGE_WIDTH}" w:h="{PAGE_HEIGHT}"/><w:pgMar w:top="{PAGE_MARGIN}" w:right="{PAGE_MARGIN}" w:bottom="{PAGE_MARGIN}" w:left="{PAGE_MARGIN}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )?;

    log::debug!(
        "Rendered {} blocks into {} bytes of document XML",
        doc.blocks.len(),
        xml.len()
    );
    package::assemble(&xml)
}

fn write_paragraph(xml: &mut String, para: &ParagraphData) -> Result<(), Error> {
    xml.push_str("<w:p>");

    let mut ppr = String::new();
    if let Some(name) = para.style.as_deref() {
        let id = package::paragraph_style_id(name)?;
        write!(ppr, r#"<w:pStyle w:val="{id}"/>"#)?;
    }
    match para.line_spacing {
        Some(LineSpacing::Multiple(m)) => {
            let line = (m * 240.0).round() as i64;
            write!(ppr, r#"<w:spacing w:line="{line}" w:lineRule="auto"/>"#)?;
        }
        Some(LineSpacing::Fixed { points, rule }) => {
            let rule = match rule {
                LineSpacingRule::Exact => "exact",
                LineSpacingRule::AtLeast => "atLeast",
            };
            write!(
                ppr,
                r#"<w:spacing w:line="{}" w:lineRule="{rule}"/>"#,
                pts_to_twips(points)
            )?;
        }
        None => {}
    }
    if para.left_indent.is_some() || para.right_indent.is_some() || para.first_line_indent.is_some()
    {
        ppr.push_str("<w:ind");
        if let Some(left) = para.left_indent {
            write!(ppr, r#" w:left="{}""#, pts_to_twips(left))?;
        }
        if let Some(right) = para.right_indent {
            write!(ppr, r#" w:right="{}""#, pts_to_twips(right))?;
        }
        match para.first_line_indent {
            Some(first) if first < 0.0 => write!(ppr, r#" w:hanging="{}""#, pts_to_twips(-first))?,
            Some(first) => write!(ppr, r#" w:firstLine="{}""#, pts_to_twips(first))?,
            None => {}
        }
        ppr.push_str("/>");
    }
    if let Some(alignment) = para.alignment {
        let jc = match alignment {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        };
        write!(ppr, r#"<w:jc w:val="{jc}"/>"#)?;
    }
    if !ppr.is_empty() {
        write!(xml, "<w:pPr>{ppr}</w:pPr>")?;
    }

    for run in &para.runs {
        write_run(xml, run)?;
    }

    xml.push_str("</w:p>");
    Ok(())
}

fn toggle(rpr: &mut String, name: &str, value: Option<bool>) -> Result<(), Error> {
    match value {
        Some(true) => write!(rpr, "<w:{name}/>")?,
        Some(false) => write!(rpr, r#"<w:{name} w:val="0"/>"#)?,
        None => {}
    }
    Ok(())
}

fn write_run(xml: &mut String, run: &RunData) -> Result<(), Error> {
    xml.push_str("<w:r>");

    let mut rpr = String::new();
    if let Some(font) = run.font_name.as_deref() {
        check_xml_chars(font)?;
        let font = escape_xml(font);
        write!(rpr, r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}"/>"#)?;
    }
    toggle(&mut rpr, "b", run.bold)?;
    toggle(&mut rpr, "i", run.italic)?;
    toggle(&mut rpr, "caps", run.all_caps)?;
    toggle(&mut rpr, "smallCaps", run.small_caps)?;
    toggle(&mut rpr, "strike", run.strikethrough)?;
    toggle(&mut rpr, "dstrike", run.double_strike)?;
    toggle(&mut rpr, "vanish", run.hidden)?;
    if let Some(color) = run.font_color.as_deref() {
        if !is_hex_color(color) {
            return Err(Error::InvalidColor(color.to_string()));
        }
        write!(rpr, r#"<w:color w:val="{}"/>"#, color.to_ascii_uppercase())?;
    }
    if let Some(size) = run.font_size {
        write!(rpr, r#"<w:sz w:val="{}"/>"#, (size * 2.0).round() as i64)?;
    }
    if let Some(highlight) = run.highlight {
        write!(rpr, r#"<w:highlight w:val="{}"/>"#, highlight_to_wml(highlight))?;
    }
    if let Some(underline) = run.underline {
        let val = match underline {
            Underline::Flag(true) => "single",
            Underline::Flag(false) => "none",
            Underline::Style(style) => underline_to_wml(style),
        };
        write!(rpr, r#"<w:u w:val="{val}"/>"#)?;
    }
    // subscript wins when both are set
    let vert_align = match (run.subscript, run.superscript) {
        (Some(true), _) => Some("subscript"),
        (_, Some(true)) => Some("superscript"),
        (Some(false), _) | (_, Some(false)) => Some("baseline"),
        _ => None,
    };
    if let Some(val) = vert_align {
        write!(rpr, r#"<w:vertAlign w:val="{val}"/>"#)?;
    }
    if !rpr.is_empty() {
        write!(xml, "<w:rPr>{rpr}</w:rPr>")?;
    }

    write_run_text(xml, &run.text)?;

    xml.push_str("</w:r>");
    Ok(())
}

/// Tabs and line breaks become `w:tab` and `w:br` so they survive a re-read.
/// `\r\n` and a lone `\r` are both written as one `w:br`.
fn write_run_text(xml: &mut String, text: &str) -> Result<(), Error> {
    check_xml_chars(text)?;

    let mut segment = String::new();
    let flush = |xml: &mut String, segment: &mut String| -> Result<(), Error> {
        if !segment.is_empty() {
            write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(segment))?;
            segment.clear();
        }
        Ok(())
    };

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\t' => {
                flush(xml, &mut segment)?;
                xml.push_str("<w:tab/>");
            }
            '\r' | '\n' => {
                if ch == '\r' {
                    chars.next_if_eq(&'\n');
                }
                flush(xml, &mut segment)?;
                xml.push_str("<w:br/>");
            }
            c => segment.push(c),
        }
    }
    flush(xml, &mut segment)
}

/// XML 1.0 has no escape for C0 controls other than tab, LF and CR, nor for
/// U+FFFE and U+FFFF.
fn check_xml_chars(text: &str) -> Result<(), Error> {
    let forbidden = |c: char| {
        (c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
    };
    match text.chars().find(|&c| forbidden(c)) {
        Some(c) => Err(Error::InvalidText(format!("U+{:04X}", c as u32))),
        None => Ok(()),
    }
}

fn write_table(xml: &mut String, table: &TableData) -> Result<(), Error> {
    let cols = table.column_count();
    if cols == 0 {
        log::debug!("Skipping table with no cells");
        return Ok(());
    }
    let col_width = TEXT_WIDTH / cols as i64;

    write!(
        xml,
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="{TABLE_STYLE_ID}"/><w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr><w:tblGrid>"#
    )?;
    for _ in 0..cols {
        write!(xml, r#"<w:gridCol w:w="{col_width}"/>"#)?;
    }
    xml.push_str("</w:tblGrid>");

    for (ri, row) in table.rows.iter().enumerate() {
        xml.push_str("<w:tr>");
        let mut col = 0;
        while col < row.len() {
            let cell = &row[col];
            let span = (cell.h_span.max(1) as usize).min(row.len() - col);
            write_cell(xml, table, cell, span, col_width)
                .map_err(|e| match e {
                    Error::InvalidTable(msg) => {
                        Error::InvalidTable(format!("row {ri}, column {col}: {msg}"))
                    }
                    other => other,
                })?;
            col += span;
        }
        xml.push_str("</w:tr>");
    }

    xml.push_str("</w:tbl>");
    Ok(())
}

fn write_cell(
    xml: &mut String,
    table: &TableData,
    cell: &GridCell,
    span: usize,
    col_width: i64,
) -> Result<(), Error> {
    let content = table.content(cell.content).ok_or_else(|| {
        Error::InvalidTable(format!(
            "cell content {} does not exist ({} entries)",
            cell.content.0,
            table.cells.len()
        ))
    })?;

    write!(
        xml,
        r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/>"#,
        col_width * span as i64
    )?;
    if span > 1 {
        write!(xml, r#"<w:gridSpan w:val="{span}"/>"#)?;
    }
    match cell.v_merge {
        VMerge::Start => xml.push_str(r#"<w:vMerge w:val="restart"/>"#),
        VMerge::Continuation { .. } => xml.push_str("<w:vMerge/>"),
        VMerge::None => {}
    }
    xml.push_str("</w:tcPr>");

    // continuation cells repeat nothing; Word still wants a paragraph
    if matches!(cell.v_merge, VMerge::Continuation { .. }) || content.paragraphs.is_empty() {
        xml.push_str("<w:p/>");
    } else {
        for para in &content.paragraphs {
            write_paragraph(xml, para)?;
        }
    }

    xml.push_str("</w:tc>");
    Ok(())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

