//! Template download
//!
//! Presets point at GitHub repositories. A template is fetched as a snapshot
//! tarball (no git history) and unpacked into the project directory with the
//! archive's top-level folder stripped.

use crate::error::{Error, Result};
use crate::target::{inspect, TargetState};
use async_trait::async_trait;
use camino::Utf8Path;
use flate2::read::GzDecoder;
use spawnkit_core::http;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};
use tracing::{debug, info};
use url::Url;

/// Default git ref when the URL does not name one
pub const DEFAULT_REF: &str = "HEAD";

/// Downloads a preset's repository into a directory
#[async_trait]
pub trait TemplateFetcher: Send + Sync {
    /// Fill `destination` (existing and empty, or missing) with the repository contents
    async fn fetch(&self, repo: &str, destination: &Utf8Path) -> Result<()>;
}

/// Owner, name and ref of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
    pub reference: String,
}

impl RepoSpec {
    /// Parse `https://github.com/<owner>/<name>[.git][/tree/<ref>][#<ref>]`
    pub fn parse(repo: &str) -> Result<Self> {
        let url = Url::parse(repo).map_err(|_| Error::invalid_repo_url(repo))?;

        if url.host_str() != Some("github.com") {
            return Err(Error::invalid_repo_url(repo));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let (owner, name) = match segments.as_slice() {
            [owner, name, ..] => (*owner, name.trim_end_matches(".git")),
            _ => return Err(Error::invalid_repo_url(repo)),
        };

        if name.is_empty() {
            return Err(Error::invalid_repo_url(repo));
        }

        let tree_ref = match segments.as_slice() {
            [_, _, "tree", rest @ ..] if !rest.is_empty() => Some(rest.join("/")),
            _ => None,
        };

        let reference = url
            .fragment()
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .or(tree_ref)
            .unwrap_or_else(|| DEFAULT_REF.to_string());

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
            reference,
        })
    }

    /// Snapshot URL under a codeload-compatible base
    pub fn archive_url(&self, codeload_base: &str) -> String {
        format!(
            "{}/{}/{}/tar.gz/{}",
            codeload_base.trim_end_matches('/'),
            self.owner,
            self.name,
            self.reference
        )
    }
}

/// Fetches repository snapshots over HTTP
pub struct SnapshotFetcher {
    client: reqwest::Client,
    codeload_url: String,
}

impl SnapshotFetcher {
    /// Create a fetcher using `codeload_url` as the archive host
    pub fn new(codeload_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http::client()?,
            codeload_url: codeload_url.into(),
        })
    }
}

#[async_trait]
impl TemplateFetcher for SnapshotFetcher {
    async fn fetch(&self, repo: &str, destination: &Utf8Path) -> Result<()> {
        let spec = RepoSpec::parse(repo)?;
        let url = spec.archive_url(&self.codeload_url);
        info!("Fetching template snapshot: {} -> {}", url, destination);

        match inspect(destination)? {
            TargetState::Missing => fs::create_dir_all(destination)?,
            TargetState::Empty => {}
            TargetState::Occupied => return Err(Error::target_not_empty(destination.as_str())),
        }

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch_failed(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch_failed(format!(
                "GET {} returned status {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch_failed(format!("reading {}: {}", url, e)))?;
        debug!("Downloaded {} bytes", bytes.len());

        let dest = destination.as_std_path().to_path_buf();
        let written = tokio::task::spawn_blocking(move || unpack_snapshot(&bytes, &dest))
            .await
            .map_err(|e| Error::fetch_failed(format!("extraction task failed: {}", e)))??;

        info!("Unpacked {} entries", written);
        Ok(())
    }
}

/// Unpack a gzipped tarball into `dest`, dropping the archive's top-level folder
///
/// Entries are first unpacked with their original paths into a staging folder
/// inside `dest` using tar's checked `unpack_in`, then the top-level folder's
/// contents are moved up. Links that would point outside the project are
/// rejected before anything is written for them.
///
/// Returns the number of entries written.
pub fn unpack_snapshot(data: &[u8], dest: &Path) -> Result<usize> {
    let staging = tempfile::Builder::new()
        .prefix(".spawnkit-unpack-")
        .tempdir_in(dest)?;

    let mut archive = Archive::new(GzDecoder::new(data));
    let mut top: Option<PathBuf> = None;
    let mut written = 0;

    let entries = archive
        .entries()
        .map_err(|e| Error::fetch_failed(format!("invalid archive: {}", e)))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| Error::fetch_failed(format!("invalid archive: {}", e)))?;

        let entry_type = entry.header().entry_type();
        if matches!(entry_type, EntryType::XGlobalHeader | EntryType::XHeader) {
            continue;
        }

        let path = entry.path()?.into_owned();
        let root = top_level(&path)?;
        match &top {
            Some(existing) if *existing != root => {
                return Err(Error::fetch_failed(format!(
                    "archive has more than one top-level folder: {} and {}",
                    existing.display(),
                    root.display()
                )));
            }
            Some(_) => {}
            None => top = Some(root),
        }

        let Some(relative) = strip_top_level(&path)? else {
            continue;
        };

        if matches!(entry_type, EntryType::Symlink | EntryType::Link) {
            let link = entry.link_name()?.map(|l| l.into_owned());
            check_link(&relative, entry_type, link.as_deref())?;
        }

        let unpacked = entry.unpack_in(staging.path()).map_err(|e| {
            Error::fetch_failed(format!("cannot unpack {}: {}", path.display(), e))
        })?;
        if !unpacked {
            return Err(escape_error(&path));
        }
        written += 1;
    }

    if let Some(top) = top {
        let unpacked_root = staging.path().join(top);
        if unpacked_root.is_dir() {
            for child in fs::read_dir(&unpacked_root)? {
                let child = child?;
                fs::rename(child.path(), dest.join(child.file_name()))?;
            }
        }
    }

    Ok(written)
}

fn escape_error(path: &Path) -> Error {
    Error::fetch_failed(format!(
        "archive entry escapes destination: {}",
        path.display()
    ))
}

/// First component of an archive path
fn top_level(path: &Path) -> Result<PathBuf> {
    match path.components().next() {
        Some(Component::Normal(part)) => Ok(PathBuf::from(part)),
        _ => Err(escape_error(path)),
    }
}

/// Drop the archive's root folder; reject paths that would leave the destination
fn strip_top_level(path: &Path) -> Result<Option<PathBuf>> {
    let mut components = path.components();
    components.next();

    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return Err(escape_error(path)),
        }
    }

    Ok((!relative.as_os_str().is_empty()).then_some(relative))
}

/// Symlinks must resolve inside the project; hard links must name another archive member
fn check_link(relative: &Path, entry_type: EntryType, target: Option<&Path>) -> Result<()> {
    let Some(target) = target else {
        return Err(Error::fetch_failed(format!(
            "link without a target: {}",
            relative.display()
        )));
    };

    let inside = match entry_type {
        EntryType::Symlink => {
            let base = relative.parent().unwrap_or_else(|| Path::new(""));
            stays_inside(base, target)
        }
        _ => matches!(strip_top_level(target), Ok(Some(_))),
    };

    if inside {
        Ok(())
    } else {
        Err(Error::fetch_failed(format!(
            "link {} points outside the project: {}",
            relative.display(),
            target.display()
        )))
    }
}

/// Lexically resolve `target` from `base` and check it never climbs above the root
fn stays_inside(base: &Path, target: &Path) -> bool {
    let mut depth: usize = 0;
    for component in base.components().chain(target.components()) {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plain_repo() {
        let spec = RepoSpec::parse("https://github.com/spawnkit/next-hardhat").unwrap();
        assert_eq!(spec.owner, "spawnkit");
        assert_eq!(spec.name, "next-hardhat");
        assert_eq!(spec.reference, "HEAD");
    }

    #[test]
    fn test_parse_git_suffix_and_refs() {
        let spec = RepoSpec::parse("https://github.com/a/b.git").unwrap();
        assert_eq!(spec.name, "b");

        let spec = RepoSpec::parse("https://github.com/a/b/tree/release/v2").unwrap();
        assert_eq!(spec.reference, "release/v2");

        let spec = RepoSpec::parse("https://github.com/a/b#dev").unwrap();
        assert_eq!(spec.reference, "dev");
    }

    #[test]
    fn test_parse_rejects_non_github() {
        assert!(RepoSpec::parse("https://gitlab.com/a/b").is_err());
        assert!(RepoSpec::parse("https://github.com/a").is_err());
        assert!(RepoSpec::parse("github.com/a/b").is_err());
    }

    #[test]
    fn test_archive_url() {
        let spec = RepoSpec::parse("https://github.com/x/y").unwrap();
        assert_eq!(
            spec.archive_url("https://codeload.github.com/"),
            "https://codeload.github.com/x/y/tar.gz/HEAD"
        );
    }

    fn tarball(build: impl FnOnce(&mut tar::Builder<GzEncoder<Vec<u8>>>)) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        build(&mut builder);
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn file(builder: &mut tar::Builder<GzEncoder<Vec<u8>>>, path: &str, content: &str) {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, content.as_bytes()).unwrap();
    }

    fn symlink(builder: &mut tar::Builder<GzEncoder<Vec<u8>>>, path: &str, target: &Path) {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(EntryType::Symlink);
        header.set_size(0);
        header.set_mode(0o777);
        builder.append_link(&mut header, path, target).unwrap();
    }

    #[test]
    fn test_unpack_strips_top_level_and_cleans_staging() {
        let dest = TempDir::new().unwrap();
        let data = tarball(|b| {
            file(b, "y-main/README.md", "# y");
            file(b, "y-main/src/lib.rs", "pub fn y() {}");
        });

        let written = unpack_snapshot(&data, dest.path()).unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(dest.path().join("README.md")).unwrap(), "# y");
        assert!(dest.path().join("src/lib.rs").is_file());
        let names: Vec<_> = fs::read_dir(dest.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().all(|n| !n.starts_with(".spawnkit-unpack-")), "{:?}", names);
    }

    #[test]
    fn test_unpack_rejects_write_through_absolute_symlink() {
        let outside = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let data = tarball(|b| {
            symlink(b, "top/link", outside.path());
            file(b, "top/link/evil.txt", "pwned");
        });

        let result = unpack_snapshot(&data, dest.path());

        assert!(matches!(result, Err(Error::FetchFailed { .. })), "{:?}", result);
        assert!(!outside.path().join("evil.txt").exists());
    }

    #[test]
    fn test_unpack_rejects_relative_symlink_climbing_out() {
        let dest = TempDir::new().unwrap();
        let data = tarball(|b| {
            symlink(b, "top/docs/link", Path::new("../../outside"));
        });

        assert!(unpack_snapshot(&data, dest.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_keeps_symlinks_inside_the_project() {
        let dest = TempDir::new().unwrap();
        let data = tarball(|b| {
            file(b, "top/README.md", "# y");
            symlink(b, "top/docs/readme", Path::new("../README.md"));
        });

        unpack_snapshot(&data, dest.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("docs/readme")).unwrap(),
            "# y"
        );
    }

    #[test]
    fn test_stays_inside() {
        assert!(stays_inside(Path::new("docs"), Path::new("../README.md")));
        assert!(stays_inside(Path::new(""), Path::new("./a/b")));
        assert!(!stays_inside(Path::new("docs"), Path::new("../../x")));
        assert!(!stays_inside(Path::new(""), Path::new("/etc/passwd")));
    }

    #[test]
    fn test_strip_top_level() {
        assert_eq!(
            strip_top_level(Path::new("y-main/src/lib.rs")).unwrap(),
            Some(PathBuf::from("src/lib.rs"))
        );
        assert_eq!(strip_top_level(Path::new("y-main/")).unwrap(), None);
        assert!(strip_top_level(Path::new("y-main/../../etc/passwd")).is_err());
    }
}
