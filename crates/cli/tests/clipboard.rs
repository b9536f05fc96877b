#![cfg(unix)]

use stockclip_cli::{Clipboard, ClipboardError, CommandClipboard, FileSource, FsFileSource};
use tempfile::tempdir;

#[tokio::test]
async fn test_command_receives_text_on_stdin() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("clipboard.txt");

    let clipboard = CommandClipboard::new(
        "sh",
        vec!["-c".into(), format!("cat > '{}'", out.display())],
    );
    clipboard.write_text("a\tb\n1\t2").await.unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "a\tb\n1\t2");
}

#[tokio::test]
async fn test_failing_command_is_rejected() {
    let clipboard = CommandClipboard::new(
        "sh",
        vec!["-c".into(), "cat > /dev/null; echo 'no display' >&2; exit 3".into()],
    );

    let err = clipboard.write_text("x").await.unwrap_err();
    match &err {
        ClipboardError::Rejected { program, stderr, .. } => {
            assert_eq!(program, "sh");
            assert_eq!(stderr.trim(), "no display");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().ends_with(": no display"));
}

#[tokio::test]
async fn test_missing_program_fails_to_spawn() {
    let clipboard = CommandClipboard::parse("stockclip-no-such-clipboard-tool").unwrap();
    let err = clipboard.write_text("x").await.unwrap_err();
    assert!(matches!(err, ClipboardError::Spawn { .. }));
}

#[tokio::test]
async fn test_fs_file_source_reads_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stock.csv");
    std::fs::write(&path, "Barcode\n1\n").unwrap();

    let bytes = FsFileSource.read_file(&path).await.unwrap();
    assert_eq!(bytes, b"Barcode\n1\n");
}
