use std::fs;
use std::path::{Path, PathBuf};

use collection_core::{
    CopyOutcome, DirectoryStatus, FileAccessConfig, FileAccessError, FileAccessService,
    ImageDetection,
};

fn sorted_names(paths: &[PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn write(path: &Path, bytes: &[u8]) {
    fs::write(path, bytes).expect("write fixture");
}

#[test]
fn copy_then_destination_matches_source() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("scan.png");
    let destination = temp.path().join("copy.png");
    write(&source, b"\x89PNG payload");

    FileAccessService::default().copy_file(&source, &destination).expect("copy");
    assert_eq!(fs::read(&destination).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn copy_onto_existing_destination_fails_without_touching_it() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("a.png");
    let destination = temp.path().join("b.png");
    write(&source, b"new");
    write(&destination, b"old");

    let err = FileAccessService::default().copy_file(&source, &destination).unwrap_err();
    match err {
        FileAccessError::CopyFailed { source_path, destination_path, description } => {
            assert_eq!(source_path, source);
            assert_eq!(destination_path, destination);
            assert!(!description.is_empty());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fs::read(&destination).unwrap(), b"old");
}

#[test]
fn copy_with_missing_path_touches_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let service = FileAccessService::default();

    let err = service.copy_path(None, None).unwrap_err();
    assert!(matches!(err, FileAccessError::MissingPath { .. }));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn batch_copy_reports_partial_success() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");
    let export = temp.path().join("export");
    fs::create_dir_all(&docs).unwrap();
    fs::create_dir_all(&export).unwrap();
    write(&docs.join("a.png"), b"a");
    write(&docs.join("b.png"), b"b");
    write(&export.join("a.png"), b"already here");

    let service = FileAccessService::default();
    let report = service.copy_files([docs.join("a.png"), docs.join("b.png")], &export);

    assert_eq!(report.copied(), 1);
    let failures: Vec<&CopyOutcome> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].source(), docs.join("a.png"));
    assert_eq!(fs::read(export.join("b.png")).unwrap(), b"b");
    assert_eq!(fs::read(export.join("a.png")).unwrap(), b"already here");
}

#[test]
fn batch_copy_count_is_independent_of_failure_order() {
    let temp = tempfile::tempdir().unwrap();
    let export = temp.path().join("export");
    fs::create_dir_all(&export).unwrap();

    let mut sources = Vec::new();
    for index in 0..5 {
        let path = temp.path().join(format!("{index}.jpg"));
        if index % 2 == 0 {
            write(&path, b"jpg");
        }
        sources.push(path);
    }

    let service = FileAccessService::default();
    let forward = service.copy_files(&sources, &export);
    assert_eq!(forward.copied(), 3);
    assert_eq!(forward.len(), 5);

    fs::remove_dir_all(&export).unwrap();
    fs::create_dir_all(&export).unwrap();
    sources.reverse();
    let backward = service.copy_files(&sources, &export);
    assert_eq!(backward.copied(), 3);
}

#[test]
fn batch_copy_into_missing_folder_copies_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let source = temp.path().join("a.png");
    write(&source, b"a");

    let report = FileAccessService::default().copy_files([&source], temp.path().join("absent"));
    assert_eq!(report.copied(), 0);
    assert!(!report.is_complete());
}

#[test]
fn listing_returns_exactly_the_images() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    for name in ["cover.png", "page.JPG", "anim.gif", "notes.txt", "data.json", ".thumb.png"] {
        write(&root.join(name), b"test");
    }
    fs::create_dir(root.join("chapter")).unwrap();
    write(&root.join("chapter").join("inner.png"), b"test");

    let images = FileAccessService::default().list_image_files(root).expect("folder readable");
    assert_eq!(sorted_names(&images), vec!["anim.gif", "cover.png", "page.JPG"]);
}

#[test]
fn listing_by_content_ignores_misleading_extensions() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write(&root.join("real.bin"), b"GIF89a\x01\0\x01\0\0\0\0");
    write(&root.join("fake.png"), b"not an image");

    let config = FileAccessConfig::default().with_image_detection(ImageDetection::Content);
    let images = FileAccessService::new(config).list_image_files(root).expect("folder readable");
    assert_eq!(sorted_names(&images), vec!["real.bin"]);
}

#[test]
fn listing_missing_folder_is_absent_not_empty() {
    let temp = tempfile::tempdir().unwrap();
    let service = FileAccessService::default();

    assert!(service.list_image_files(temp.path().join("nope")).is_none());
    assert_eq!(service.list_image_files(temp.path()), Some(Vec::new()));
}

#[test]
fn counting_swallows_unreadable_folders() {
    let temp = tempfile::tempdir().unwrap();
    let service = FileAccessService::default();

    assert_eq!(service.count_entries(temp.path()), 0);
    assert_eq!(service.count_entries(temp.path().join("missing")), 0);
    assert!(matches!(
        service.try_count_entries(temp.path().join("missing")),
        Err(FileAccessError::EnumerationUnavailable { .. })
    ));

    write(&temp.path().join("a.txt"), b"a");
    fs::create_dir(temp.path().join("sub")).unwrap();
    assert_eq!(service.count_entries(temp.path()), 2);
}

#[test]
fn delete_then_gone() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("a.png");
    write(&file, b"a");
    let service = FileAccessService::default();

    assert!(service.delete_item(Some(file.as_path())));
    assert!(!file.exists());
    assert!(!service.delete_item(Some(file.as_path())));
}

#[test]
fn documents_root_can_be_prepared() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("Documents");
    let service = FileAccessService::new(FileAccessConfig::default().with_documents_root(&root));

    let exports = service.documents_root().join("exports");
    assert_eq!(service.ensure_directory_exists(&exports, true).unwrap(), DirectoryStatus::Created);
    assert_eq!(service.count_entries(service.documents_root()), 1);
}
