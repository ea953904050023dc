//! Viewer download and installation.
//!
//! The wiki is displayed by a single self-contained HTML file shipped inside
//! a release archive. Installing it means:
//!
//! 1. Skip everything if any known viewer file is already in the wiki root.
//! 2. Download the archive to `mdwiki.zip` in the root, unless a previous run
//!    left one there.
//! 3. Extract `<top-level-dir>/<asset>` from it as the entry file
//!    (`index.html`).
//! 4. Delete the archive. A leftover archive that cannot be extracted is
//!    deleted and downloaded again; a fresh one that cannot be extracted is
//!    deleted and reported.
//!
//! Nothing else in the generator depends on the viewer, so callers treat an
//! [`InstallError`] as a warning rather than a failure.

use crate::config::WikiConfig;
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Component, Path};
use std::time::Duration;
use thiserror::Error;

/// Where the archive is downloaded to, inside the wiki root.
pub const ARCHIVE_FILENAME: &str = "mdwiki.zip";

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {url}")]
    Status { status: u16, url: String },
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("{0} not found in archive")]
    MissingAsset(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstallOutcome {
    /// A viewer file with this name was already present.
    AlreadyInstalled(String),
    Installed {
        entry_file: String,
        /// The archive was left over from an earlier run; nothing was downloaded.
        reused_archive: bool,
    },
}

/// Name of the first viewer file already present in `root`, if any.
pub fn existing_viewer(root: &Path, config: &WikiConfig) -> Option<String> {
    config
        .viewer_filenames()
        .into_iter()
        .find(|name| root.join(name).is_file())
}

/// Install the viewer into `root` unless it is already there.
pub fn install_viewer(root: &Path, config: &WikiConfig) -> Result<InstallOutcome, InstallError> {
    if let Some(name) = existing_viewer(root, config) {
        return Ok(InstallOutcome::AlreadyInstalled(name));
    }

    let archive_path = root.join(ARCHIVE_FILENAME);
    let dest = root.join(&config.viewer.entry_file);

    // An unusable leftover archive is discarded and fetched again.
    let reused_archive = archive_path.is_file()
        && unpack_archive(&archive_path, &config.viewer.asset, &dest).is_ok();
    if !reused_archive {
        let timeout = Duration::from_secs(config.viewer.timeout_secs);
        download(&config.viewer.url, &archive_path, timeout)?;
        unpack_archive(&archive_path, &config.viewer.asset, &dest)?;
    }

    Ok(InstallOutcome::Installed {
        entry_file: config.viewer.entry_file.clone(),
        reused_archive,
    })
}

/// Extract the viewer from the archive at `archive_path`, then delete the
/// archive whether or not extraction succeeded.
fn unpack_archive(archive_path: &Path, asset: &str, dest: &Path) -> Result<(), InstallError> {
    let result = File::open(archive_path)
        .map_err(InstallError::from)
        .and_then(|archive| extract_asset(archive, asset, dest));
    match result {
        Ok(()) => {
            fs::remove_file(archive_path)?;
            Ok(())
        }
        Err(e) => {
            fs::remove_file(archive_path).ok();
            Err(e)
        }
    }
}

/// Download `url` to `dest`. A partial file is removed on failure so the next
/// run does not mistake it for a cached archive.
fn download(url: &str, dest: &Path, timeout: Duration) -> Result<u64, InstallError> {
    let result = fetch_to(url, dest, timeout);
    if result.is_err() {
        fs::remove_file(dest).ok();
    }
    result
}

fn fetch_to(url: &str, dest: &Path, timeout: Duration) -> Result<u64, InstallError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()?;
    let mut response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(InstallError::Status {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }
    let mut file = File::create(dest)?;
    Ok(response.copy_to(&mut file)?)
}

/// Copy the archive member `<top-dir>/<asset>` (or a top-level `<asset>`) to
/// `dest`.
///
/// The member is written to a sibling `.part` file first and renamed into
/// place, so an interrupted extraction never looks like an installed viewer.
pub fn extract_asset<R: Read + Seek>(
    reader: R,
    asset: &str,
    dest: &Path,
) -> Result<(), InstallError> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let member = archive
        .file_names()
        .find(|name| is_asset_member(name, asset))
        .map(str::to_string)
        .ok_or_else(|| InstallError::MissingAsset(asset.to_string()))?;

    let mut entry = archive.by_name(&member)?;
    let part = dest.with_extension("part");
    let copied = File::create(&part).and_then(|mut out| io::copy(&mut entry, &mut out));
    if let Err(e) = copied {
        fs::remove_file(&part).ok();
        return Err(e.into());
    }
    fs::rename(&part, dest)?;
    Ok(())
}

fn is_asset_member(name: &str, asset: &str) -> bool {
    let parts: Vec<&str> = Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    matches!(parts.as_slice(), [file] | [_, file] if *file == asset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::read;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn archive_with(members: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn asset_member_matching() {
        assert!(is_asset_member("mdwiki-0.6.2/mdwiki.html", "mdwiki.html"));
        assert!(is_asset_member("mdwiki.html", "mdwiki.html"));
        assert!(!is_asset_member("mdwiki-0.6.2/mdwiki-slim.html", "mdwiki.html"));
        assert!(!is_asset_member("a/b/mdwiki.html", "mdwiki.html"));
    }

    #[test]
    fn extracts_asset_from_top_level_directory() {
        let tmp = TempDir::new().unwrap();
        let bytes = archive_with(&[
            ("mdwiki-0.6.2/README.md", "readme"),
            ("mdwiki-0.6.2/mdwiki-slim.html", "slim"),
            ("mdwiki-0.6.2/mdwiki.html", "<html>viewer</html>"),
        ]);

        let dest = tmp.path().join("index.html");
        extract_asset(Cursor::new(bytes), "mdwiki.html", &dest).unwrap();

        assert_eq!(read(&dest), "<html>viewer</html>");
        assert!(!tmp.path().join("index.part").exists());
    }

    #[test]
    fn missing_asset_is_error() {
        let tmp = TempDir::new().unwrap();
        let bytes = archive_with(&[("mdwiki-0.6.2/other.html", "x")]);

        let result = extract_asset(Cursor::new(bytes), "mdwiki.html", &tmp.path().join("index.html"));
        assert!(matches!(result, Err(InstallError::MissingAsset(_))));
        assert!(!tmp.path().join("index.html").exists());
    }

    #[test]
    fn corrupt_archive_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = extract_asset(
            Cursor::new(b"not a zip".to_vec()),
            "mdwiki.html",
            &tmp.path().join("index.html"),
        );
        assert!(matches!(result, Err(InstallError::Archive(_))));
    }

    #[test]
    fn existing_viewer_skips_install() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("mdwiki-debug.html"), "viewer").unwrap();

        let outcome = install_viewer(tmp.path(), &WikiConfig::default()).unwrap();
        assert_eq!(
            outcome,
            InstallOutcome::AlreadyInstalled("mdwiki-debug.html".into())
        );
    }

    #[test]
    fn titled_html_counts_as_installed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("My Wiki.html"), "viewer").unwrap();
        assert_eq!(
            existing_viewer(tmp.path(), &WikiConfig::default()).as_deref(),
            Some("My Wiki.html")
        );
    }

    #[test]
    fn leftover_archive_is_installed_without_download() {
        let tmp = TempDir::new().unwrap();
        let bytes = archive_with(&[("mdwiki-0.6.2/mdwiki.html", "<html>viewer</html>")]);
        fs::write(tmp.path().join(ARCHIVE_FILENAME), bytes).unwrap();

        let mut config = WikiConfig::default();
        // Any attempt to download would fail loudly
        config.viewer.url = "http://127.0.0.1:9/unreachable.zip".into();

        let outcome = install_viewer(tmp.path(), &config).unwrap();
        assert_eq!(
            outcome,
            InstallOutcome::Installed {
                entry_file: "index.html".into(),
                reused_archive: true,
            }
        );
        assert_eq!(read(&tmp.path().join("index.html")), "<html>viewer</html>");
        assert!(!tmp.path().join(ARCHIVE_FILENAME).exists());
    }

    #[test]
    fn corrupt_leftover_archive_is_removed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(ARCHIVE_FILENAME), b"truncated download").unwrap();

        let mut config = WikiConfig::default();
        config.viewer.url = "http://127.0.0.1:9/x.zip".into();

        let result = install_viewer(tmp.path(), &config);
        // The leftover is discarded and a fresh download attempted
        assert!(matches!(result, Err(InstallError::Http(_))));
        assert!(!tmp.path().join(ARCHIVE_FILENAME).exists());
        assert!(!tmp.path().join("index.html").exists());
    }

    #[test]
    fn unreachable_server_leaves_no_archive() {
        let tmp = TempDir::new().unwrap();
        let mut config = WikiConfig::default();
        config.viewer.url = "http://127.0.0.1:9/x.zip".into();

        let result = install_viewer(tmp.path(), &config);
        assert!(matches!(result, Err(InstallError::Http(_))));
        assert!(!tmp.path().join(ARCHIVE_FILENAME).exists());
    }
}
