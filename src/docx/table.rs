//! Table merge resolution.
//!
//! Every raw `w:tc` lands at grid column `raw index + offset`, where the
//! offset grows by `gridSpan - 1` after each spanning cell in the row. A
//! spanning cell fills all of its columns with the same `GridCell`. Vertical
//! merges alias the content recorded for the same column one row up; the
//! record is carried down so chains of any length resolve to the restart cell.

use std::collections::HashMap;

use crate::error::Error;
use crate::model::{CellContent, CellContentId, GridCell, TableData, VMerge};

use super::styles::StyleTable;
use super::{WML_NS, collect_block_nodes, extract, is_wml, wml};

enum MergeMark {
    Restart,
    Continue,
}

/// Widest table Word will create; the bound when `w:tblGrid` lists no columns.
const MAX_GRID_COLUMNS: usize = 63;

pub(super) fn resolve(tbl_node: roxmltree::Node, styles: &StyleTable) -> Result<TableData, Error> {
    let mut table = TableData::default();

    let grid_columns = wml(tbl_node, "tblGrid")
        .map(|grid| grid.children().filter(|n| is_wml(*n, "gridCol")).count())
        .filter(|n| *n > 0)
        .unwrap_or(MAX_GRID_COLUMNS);
    // (row, grid column) -> (content, row of the restart cell)
    let mut restarts: HashMap<(usize, usize), (CellContentId, usize)> = HashMap::new();

    let tbl_rows: Vec<_> = collect_block_nodes(tbl_node)
        .into_iter()
        .filter(|n| is_wml(*n, "tr"))
        .collect();

    for (ri, tr) in tbl_rows.iter().enumerate() {
        let mut row = Vec::new();
        let mut offset = 0usize;

        let cells = collect_block_nodes(*tr)
            .into_iter()
            .filter(|n| is_wml(*n, "tc"));
        for (ci, tc) in cells.enumerate() {
            let col = ci + offset;
            let tc_pr = wml(tc, "tcPr");

            let h_span = tc_pr
                .and_then(|pr| wml(pr, "gridSpan"))
                .and_then(|n| n.attribute((WML_NS, "val")))
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(1)
                .max(1);
            if h_span > 1 && col + h_span as usize > grid_columns {
                return Err(Error::InvalidDocx(format!(
                    "cell at row {ri}, column {col} spans {h_span} columns of a {grid_columns}-column grid"
                )));
            }
            offset += h_span as usize - 1;

            let mark = tc_pr.and_then(|pr| wml(pr, "vMerge")).map(|n| {
                match n.attribute((WML_NS, "val")) {
                    Some("restart") => MergeMark::Restart,
                    _ => MergeMark::Continue,
                }
            });

            let (content, v_merge) = match mark {
                Some(MergeMark::Restart) => {
                    let id = table.push_content(cell_content(tc, styles));
                    restarts.insert((ri, col), (id, ri));
                    (id, VMerge::Start)
                }
                Some(MergeMark::Continue) => {
                    let above = ri
                        .checked_sub(1)
                        .and_then(|prev| restarts.get(&(prev, col)))
                        .copied();
                    match above {
                        Some((id, origin_row)) => {
                            restarts.insert((ri, col), (id, origin_row));
                            (id, VMerge::Continuation { origin_row })
                        }
                        None => {
                            log::debug!(
                                "vMerge continuation at row {ri}, column {col} has nothing above it"
                            );
                            (table.push_content(cell_content(tc, styles)), VMerge::None)
                        }
                    }
                }
                None => (table.push_content(cell_content(tc, styles)), VMerge::None),
            };

            let cell = GridCell {
                content,
                h_span,
                v_merge,
            };
            row.extend(std::iter::repeat_n(cell, h_span as usize));
        }

        table.rows.push(row);
    }

    log::debug!(
        "Resolved table: {} rows x {} columns, {} distinct cells",
        table.rows.len(),
        table.column_count(),
        table.cells.len()
    );

    Ok(table)
}

/// Paragraphs directly inside a cell. Nested tables are not descended into.
fn cell_content(tc: roxmltree::Node, styles: &StyleTable) -> CellContent {
    let paragraphs = collect_block_nodes(tc)
        .into_iter()
        .filter(|n| is_wml(*n, "p"))
        .map(|p| extract::paragraph(p, styles))
        .collect();
    CellContent { paragraphs }
}
