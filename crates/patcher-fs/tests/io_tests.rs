use patcher_fs::{NormalizedPath, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("Loan.tsx"));

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("Loan.tsx");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("Loan.tsx"));

    io::write_atomic(&path, b"content").unwrap();

    let names: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Loan.tsx".to_string()]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.tsx");
    assert!(io::read_text(&path).is_err());
}

#[test]
fn test_read_write_text_preserves_bytes() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("crlf.tsx"));
    let content = "line one\r\nline two\r\n";

    io::write_text(&path, content).unwrap();

    assert_eq!(io::read_text(&path).unwrap(), content);
}

#[test]
fn test_list_files_sorted_and_flat() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("b.tsx"), "").unwrap();
    fs::write(temp.path().join("a.tsx"), "").unwrap();
    fs::create_dir(temp.path().join("nested")).unwrap();
    fs::write(temp.path().join("nested").join("c.tsx"), "").unwrap();

    let files = io::list_files(&NormalizedPath::new(temp.path())).unwrap();
    let names: Vec<_> = files.iter().filter_map(|p| p.file_name()).collect();
    assert_eq!(names, vec!["a.tsx", "b.tsx"]);
}

#[test]
fn test_list_files_rejects_file_path() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("a.tsx");
    fs::write(&file, "").unwrap();

    let result = io::list_files(&NormalizedPath::new(&file));
    assert!(matches!(result, Err(patcher_fs::Error::NotADirectory { .. })));
}
