//! Filesystem fixtures

use camino::{Utf8Path, Utf8PathBuf};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use tempfile::TempDir;

/// UTF-8 path of a temporary directory
pub fn utf8_dir(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("temp dir is UTF-8")
}

/// Create `dir` with one file in it
pub fn occupy(dir: &Utf8Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("existing.txt"), "keep me").unwrap();
}

/// Number of entries directly under `dir`
pub fn entry_count(dir: &Utf8Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

/// Build a gzipped tarball whose entries all live under `root/`
pub fn snapshot_tarball(root: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, format!("{}/{}", root, name), content.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// Tarball with a `root/link` symlink to `target` followed by a file written through it
pub fn link_escape_tarball(root: &str, target: &std::path::Path) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut link = tar::Header::new_gnu();
    link.set_entry_type(tar::EntryType::Symlink);
    link.set_size(0);
    link.set_mode(0o777);
    builder
        .append_link(&mut link, format!("{}/link", root), target)
        .unwrap();

    let content = b"pwned";
    let mut file = tar::Header::new_gnu();
    file.set_size(content.len() as u64);
    file.set_mode(0o644);
    builder
        .append_data(&mut file, format!("{}/link/evil.txt", root), &content[..])
        .unwrap();

    builder.into_inner().unwrap().finish().unwrap()
}
