//! Paragraph and run formatting extraction.
//!
//! Only values written on the paragraph or run itself are reported; anything
//! inherited from styles or document defaults is left out.

use crate::model::{Alignment, LineSpacing, LineSpacingRule, ParagraphData, RunData, Underline};

use super::styles::StyleTable;
use super::{
    WML_NS, highlight_from_wml, is_hex_color, twips_attr, underline_from_wml, wml, wml_attr,
    wml_bool,
};

pub(super) fn paragraph(para_node: roxmltree::Node, styles: &StyleTable) -> ParagraphData {
    let ppr = wml(para_node, "pPr");

    let style = styles
        .paragraph_style(ppr.and_then(|n| wml_attr(n, "pStyle")))
        .map(str::to_string);

    let alignment = ppr.and_then(|n| wml_attr(n, "jc")).and_then(parse_alignment);

    let ind = ppr.and_then(|n| wml(n, "ind"));
    let left_indent = ind
        .and_then(|n| twips_attr(n, "left").or_else(|| twips_attr(n, "start")))
        .filter(|v| *v != 0.0);
    let right_indent = ind
        .and_then(|n| twips_attr(n, "right").or_else(|| twips_attr(n, "end")))
        .filter(|v| *v != 0.0);
    // w:hanging wins over w:firstLine when both are present
    let first_line_indent = ind
        .and_then(|n| {
            twips_attr(n, "hanging")
                .map(|h| -h)
                .or_else(|| twips_attr(n, "firstLine"))
        })
        .filter(|v| *v != 0.0);

    let line_spacing = ppr
        .and_then(|n| wml(n, "spacing"))
        .and_then(parse_line_spacing);

    let mut run_nodes = Vec::new();
    collect_run_nodes(para_node, &mut run_nodes);
    let runs = run_nodes.into_iter().map(run).collect();

    ParagraphData {
        style,
        alignment,
        left_indent,
        right_indent,
        first_line_indent,
        line_spacing,
        runs,
    }
}

fn parse_alignment(val: &str) -> Option<Alignment> {
    match val {
        "left" | "start" => Some(Alignment::Left),
        "center" => Some(Alignment::Center),
        "right" | "end" => Some(Alignment::Right),
        "both" => Some(Alignment::Justify),
        other => {
            log::debug!("Unsupported paragraph alignment {other:?}, omitting");
            None
        }
    }
}

fn parse_line_spacing(spacing: roxmltree::Node) -> Option<LineSpacing> {
    let line = spacing
        .attribute((WML_NS, "line"))
        .and_then(|v| v.parse::<f32>().ok())
        .filter(|v| *v != 0.0)?;
    let spacing = match spacing.attribute((WML_NS, "lineRule")).unwrap_or("auto") {
        "exact" => LineSpacing::Fixed {
            points: line / 20.0,
            rule: LineSpacingRule::Exact,
        },
        "atLeast" => LineSpacing::Fixed {
            points: line / 20.0,
            rule: LineSpacingRule::AtLeast,
        },
        _ => LineSpacing::Multiple(line / 240.0),
    };
    Some(spacing)
}

/// Runs of a paragraph in reading order, looking through hyperlinks,
/// content controls, insertions and smart tags. Deleted runs are skipped.
fn collect_run_nodes<'a>(parent: roxmltree::Node<'a, 'a>, out: &mut Vec<roxmltree::Node<'a, 'a>>) {
    for child in parent.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "r" => out.push(child),
            "hyperlink" | "ins" | "smartTag" | "fldSimple" => collect_run_nodes(child, out),
            "sdt" => {
                if let Some(content) = wml(child, "sdtContent") {
                    collect_run_nodes(content, out);
                }
            }
            _ => {}
        }
    }
}

fn run(run_node: roxmltree::Node) -> RunData {
    let rpr = wml(run_node, "rPr");
    let flag = |name: &str| rpr.and_then(|n| wml_bool(n, name)).filter(|on| *on);

    let vert_align = rpr.and_then(|n| wml_attr(n, "vertAlign"));

    let font_name = rpr.and_then(|n| wml(n, "rFonts")).and_then(|rfonts| {
        rfonts
            .attribute((WML_NS, "ascii"))
            .or_else(|| rfonts.attribute((WML_NS, "hAnsi")))
            .map(str::to_string)
    });

    let font_size = rpr
        .and_then(|n| wml_attr(n, "sz"))
        .and_then(|v| v.parse::<f32>().ok())
        .map(|hp| hp / 2.0);

    let font_color = rpr
        .and_then(|n| wml_attr(n, "color"))
        .filter(|v| is_hex_color(v))
        .map(|v| v.to_ascii_uppercase());

    let highlight = rpr.and_then(|n| wml_attr(n, "highlight")).and_then(|v| {
        let h = highlight_from_wml(v);
        if h.is_none() {
            log::debug!("Unknown highlight color {v:?}, omitting");
        }
        h
    });

    RunData {
        text: run_text(run_node),
        bold: flag("b"),
        italic: flag("i"),
        underline: rpr.and_then(parse_underline),
        strikethrough: flag("strike"),
        double_strike: flag("dstrike"),
        superscript: (vert_align == Some("superscript")).then_some(true),
        subscript: (vert_align == Some("subscript")).then_some(true),
        font_name,
        font_size,
        font_color,
        highlight,
        all_caps: flag("caps"),
        small_caps: flag("smallCaps"),
        hidden: flag("vanish"),
    }
}

/// `w:u` without a value or with `none` counts as not underlined.
fn parse_underline(rpr: roxmltree::Node) -> Option<Underline> {
    match wml_attr(rpr, "u")? {
        "none" => None,
        "single" => Some(Underline::Flag(true)),
        other => {
            let style = underline_from_wml(other);
            if style.is_none() {
                log::debug!("Unknown underline style {other:?}, omitting");
            }
            style.map(Underline::Style)
        }
    }
}

fn run_text(run_node: roxmltree::Node) -> String {
    let mut text = String::new();
    for child in run_node.children() {
        if child.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match child.tag_name().name() {
            "t" => {
                if let Some(t) = child.text() {
                    text.push_str(t);
                }
            }
            "tab" | "ptab" => text.push('\t'),
            "br" => {
                // page and column breaks carry no text
                let wraps = child
                    .attribute((WML_NS, "type"))
                    .is_none_or(|t| t == "textWrapping");
                if wraps {
                    text.push('\n');
                }
            }
            "cr" => text.push('\n'),
            "noBreakHyphen" => text.push('-'),
            _ => {}
        }
    }
    text
}
