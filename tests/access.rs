mod common;

use std::fs;

use docxform::{
    Block, Config, DocData, Error, ParagraphData, Reader, RunData, Writer, read_docx, write_docx,
};

fn one_paragraph(text: &str) -> DocData {
    DocData {
        blocks: vec![Block::Paragraph(ParagraphData {
            runs: vec![RunData::new(text)],
            ..Default::default()
        })],
    }
}

#[test]
fn reads_inside_the_allowed_directory() {
    let _ = env_logger::try_init();
    let allowed = tempfile::tempdir().unwrap();
    let sub = allowed.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let path = common::write_fixture(&sub, "x.docx", &common::docx_bytes(&common::para("hi")));

    let config = Config::new([allowed.path()]);
    let doc = Reader::new(&config).read(&path).unwrap();
    assert_eq!(doc.paragraphs().next().unwrap().text(), "hi");

    // the directory itself is allowed; it just is not a document
    assert!(config.guard().authorize(allowed.path()).is_ok());
    let err = read_docx(allowed.path(), &config).unwrap_err();
    assert!(!matches!(err, Error::Unauthorized(_)), "{err}");
}

#[test]
fn rejects_paths_outside_the_allow_list() {
    let allowed = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let path = common::write_fixture(other.path(), "x.docx", &common::docx_bytes(""));

    let config = Config::new([allowed.path()]);
    assert!(matches!(read_docx(&path, &config), Err(Error::Unauthorized(_))));

    let escape = allowed.path().join("..").join(
        other
            .path()
            .file_name()
            .expect("tempdir has a name"),
    );
    assert!(matches!(
        read_docx(&escape.join("x.docx"), &config),
        Err(Error::Unauthorized(_))
    ));

    let out = other.path().join("new.docx");
    assert!(matches!(
        write_docx(&one_paragraph("x"), &out, false, &config),
        Err(Error::Unauthorized(_))
    ));
    assert!(!out.exists());
}

#[test]
fn sibling_with_common_prefix_is_not_inside() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    let data2 = root.path().join("data2");
    fs::create_dir(&data).unwrap();
    fs::create_dir(&data2).unwrap();

    let config = Config::new([&data]);
    assert!(config.guard().authorize(&data.join("x.docx")).is_ok());
    assert!(matches!(
        config.guard().authorize(&data2.join("x.docx")),
        Err(Error::Unauthorized(_))
    ));
}

#[cfg(unix)]
#[test]
fn symlink_out_of_the_allowed_directory_is_rejected() {
    let allowed = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    common::write_fixture(other.path(), "x.docx", &common::docx_bytes(""));
    let link = allowed.path().join("link");
    std::os::unix::fs::symlink(other.path(), &link).unwrap();

    let config = Config::new([allowed.path()]);
    assert!(matches!(
        read_docx(&link.join("x.docx"), &config),
        Err(Error::Unauthorized(_))
    ));
}

#[test]
fn no_allow_list_accepts_any_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.docx");
    let config = Config::unrestricted();
    assert!(!config.guard().is_restricted());

    write_docx(&one_paragraph("anywhere"), &path, false, &config).unwrap();
    let doc = read_docx(&path, &config).unwrap();
    assert_eq!(doc.paragraphs().next().unwrap().text(), "anywhere");
}

#[test]
fn in_memory_calls_skip_the_path_check() {
    let allowed = tempfile::tempdir().unwrap();
    let config = Config::new([allowed.path()]);

    let bytes = Writer::new(&config)
        .write_bytes(&one_paragraph("memory"))
        .unwrap();
    let doc = Reader::new(&config).read_bytes(&bytes).unwrap();
    assert_eq!(doc, one_paragraph("memory"));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new([dir.path()]);
    assert!(matches!(
        read_docx(&dir.path().join("absent.docx"), &config),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn second_write_without_overwrite_fails_and_keeps_the_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.docx");
    let config = Config::new([dir.path()]);
    let writer = Writer::new(&config);

    writer.write(&one_paragraph("first"), &path, false).unwrap();
    let first_bytes = fs::read(&path).unwrap();

    let err = writer
        .write(&one_paragraph("second"), &path, false)
        .unwrap_err();
    assert!(matches!(err, Error::AlreadyExists(_)), "{err}");
    assert_eq!(fs::read(&path).unwrap(), first_bytes);

    writer.write(&one_paragraph("second"), &path, true).unwrap();
    let doc = read_docx(&path, &config).unwrap();
    assert_eq!(doc.paragraphs().next().unwrap().text(), "second");
}

#[test]
fn failed_render_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.docx");
    let config = Config::new([dir.path()]);
    let doc = DocData {
        blocks: vec![Block::Paragraph(ParagraphData {
            style: Some("No Such Style".into()),
            ..Default::default()
        })],
    };
    assert!(matches!(
        write_docx(&doc, &path, false, &config),
        Err(Error::StyleNotFound(_))
    ));
    assert!(!path.exists());
}

#[test]
fn config_values() {
    let a = tempfile::tempdir().unwrap();
    let b = tempfile::tempdir().unwrap();

    let single = Config::from_value(&a.path().display().to_string()).unwrap();
    assert_eq!(single.guard().allowed_dirs().len(), 1);
    assert!(single.guard().authorize(&a.path().join("f.docx")).is_ok());
    assert!(single.guard().authorize(&b.path().join("f.docx")).is_err());

    let list = serde_json::to_string(&[a.path(), b.path()]).unwrap();
    let both = Config::from_value(&list).unwrap();
    assert_eq!(both.guard().allowed_dirs().len(), 2);
    assert!(both.guard().authorize(&b.path().join("f.docx")).is_ok());

    let blank = Config::from_value("   ").unwrap();
    assert!(!blank.guard().is_restricted());

    let empty_list = Config::from_value("[]").unwrap();
    assert!(empty_list.guard().is_restricted());
    assert!(empty_list.guard().authorize(&a.path().join("f.docx")).is_err());

    assert!(matches!(
        Config::from_value("[not json"),
        Err(Error::Json(_))
    ));
}
