mod common;

use common::{cell, row, table};
use docxform::{Block, TableData, VMerge, read_docx_bytes, render_docx};

fn read_table(body: &str) -> TableData {
    let _ = env_logger::try_init();
    let doc = read_docx_bytes(&common::docx_bytes(body)).expect("read synthesized docx");
    doc.tables().next().expect("one table").clone()
}

fn text_at(t: &TableData, r: usize, c: usize) -> String {
    t.cell(r, c).map(|c| c.text()).unwrap_or_default()
}

#[test]
fn grid_span_repeats_the_same_cell() {
    let t = read_table(&table(&[
        row(&[cell(r#"<w:gridSpan w:val="2"/>"#, "A")]),
        row(&[cell("", "B"), cell("", "C")]),
    ]));

    assert_eq!(t.column_count(), 2);
    assert_eq!(t.rows[0].len(), 2);
    assert_eq!(t.rows[0][0], t.rows[0][1]);
    assert_eq!(t.rows[0][0].h_span, 2);
    assert_eq!(text_at(&t, 0, 0), "A");
    assert_eq!(text_at(&t, 0, 1), "A");
    assert_eq!(text_at(&t, 1, 0), "B");
    assert_eq!(text_at(&t, 1, 1), "C");
}

#[test]
fn vertical_merge_aliases_the_restart_cell() {
    let t = read_table(&table(&[
        row(&[cell(r#"<w:vMerge w:val="restart"/>"#, "A"), cell("", "B")]),
        row(&[cell("<w:vMerge/>", ""), cell("", "D")]),
    ]));

    assert_eq!(t.rows[0][0].v_merge, VMerge::Start);
    assert_eq!(
        t.rows[1][0].v_merge,
        VMerge::Continuation { origin_row: 0 }
    );
    assert_eq!(t.rows[1][0].content, t.rows[0][0].content);
    assert_eq!(t.cell(1, 0), t.cell(0, 0));
    assert_eq!(text_at(&t, 1, 0), "A");

    assert_ne!(t.rows[1][1].content, t.rows[0][1].content);
    assert_eq!(text_at(&t, 1, 1), "D");
}

#[test]
fn vertical_merge_chains_across_many_rows() {
    let t = read_table(&table(&[
        row(&[cell(r#"<w:vMerge w:val="restart"/>"#, "top"), cell("", "r0")]),
        row(&[cell(r#"<w:vMerge w:val="continue"/>"#, ""), cell("", "r1")]),
        row(&[cell("<w:vMerge/>", ""), cell("", "r2")]),
        row(&[cell("", "fresh"), cell("", "r3")]),
    ]));

    let origin = t.rows[0][0].content;
    for r in 1..3 {
        assert_eq!(t.rows[r][0].content, origin, "row {r}");
        assert_eq!(t.rows[r][0].v_merge, VMerge::Continuation { origin_row: 0 });
        assert_eq!(text_at(&t, r, 0), "top");
    }
    assert_eq!(t.rows[3][0].v_merge, VMerge::None);
    assert_eq!(text_at(&t, 3, 0), "fresh");
}

#[test]
fn spans_shift_later_cells_to_their_grid_column() {
    // row 1 continues the merge in grid column 2, which is raw cell index 1
    let t = read_table(&table(&[
        row(&[
            cell(r#"<w:gridSpan w:val="2"/>"#, "wide"),
            cell(r#"<w:vMerge w:val="restart"/>"#, "tall"),
        ]),
        row(&[
            cell(r#"<w:gridSpan w:val="2"/>"#, "wide 2"),
            cell("<w:vMerge/>", ""),
        ]),
    ]));

    assert_eq!(t.column_count(), 3);
    assert_eq!(text_at(&t, 0, 2), "tall");
    assert_eq!(text_at(&t, 1, 2), "tall");
    assert_eq!(t.rows[1][2].content, t.rows[0][2].content);
    assert_eq!(text_at(&t, 1, 0), "wide 2");
    assert_eq!(text_at(&t, 1, 1), "wide 2");
}

#[test]
fn continuation_without_a_start_is_independent() {
    let t = read_table(&table(&[row(&[cell("<w:vMerge/>", "lonely"), cell("", "x")])]));
    assert_eq!(t.rows[0][0].v_merge, VMerge::None);
    assert_eq!(text_at(&t, 0, 0), "lonely");
}

#[test]
fn table_survives_a_write_and_read() {
    let original = read_table(&table(&[
        row(&[
            cell(r#"<w:gridSpan w:val="2"/>"#, "header"),
            cell(r#"<w:vMerge w:val="restart"/>"#, "side"),
        ]),
        row(&[cell("", "a"), cell("", "b"), cell("<w:vMerge/>", "")]),
        row(&[cell("", "c"), cell("", "d"), cell("<w:vMerge/>", "")]),
    ]));

    let doc = docxform::DocData {
        blocks: vec![Block::Table(original.clone())],
    };
    let bytes = render_docx(&doc).unwrap();
    let reread = read_docx_bytes(&bytes).unwrap();
    let t = reread.tables().next().expect("table written");

    assert_eq!(t.rows.len(), original.rows.len());
    for r in 0..t.rows.len() {
        for c in 0..t.column_count() {
            assert_eq!(t.rows[r][c].h_span, original.rows[r][c].h_span, "({r},{c})");
            assert_eq!(t.rows[r][c].v_merge, original.rows[r][c].v_merge, "({r},{c})");
            assert_eq!(text_at(t, r, c), text_at(&original, r, c), "({r},{c})");
        }
    }
}

#[test]
fn dangling_content_id_is_rejected_by_the_writer() {
    let mut t = read_table(&table(&[row(&[cell("", "only")])]));
    t.rows[0][0].content = docxform::CellContentId(7);
    let doc = docxform::DocData {
        blocks: vec![Block::Table(t)],
    };
    assert!(matches!(
        render_docx(&doc),
        Err(docxform::Error::InvalidTable(_))
    ));
}

#[test]
fn span_past_the_grid_is_an_error() {
    let _ = env_logger::try_init();
    let huge = table(&[row(&[cell(r#"<w:gridSpan w:val="4000000000"/>"#, "boom")])]);
    assert!(matches!(
        read_docx_bytes(&common::docx_bytes(&huge)),
        Err(docxform::Error::InvalidDocx(_))
    ));

    let two_col_grid = format!(
        r#"<w:tbl><w:tblGrid><w:gridCol w:w="100"/><w:gridCol w:w="100"/></w:tblGrid>{}</w:tbl>"#,
        row(&[cell("", "a"), cell(r#"<w:gridSpan w:val="2"/>"#, "b")])
    );
    assert!(matches!(
        read_docx_bytes(&common::docx_bytes(&two_col_grid)),
        Err(docxform::Error::InvalidDocx(_))
    ));

    let fits = format!(
        r#"<w:tbl><w:tblGrid><w:gridCol w:w="100"/><w:gridCol w:w="100"/></w:tblGrid>{}</w:tbl>"#,
        row(&[cell(r#"<w:gridSpan w:val="2"/>"#, "both")])
    );
    let t = read_table(&fits);
    assert_eq!(t.rows[0].len(), 2);
}
