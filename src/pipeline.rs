use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SyncError;
use crate::markdown::grammar::GRAMMAR_VERSION;
use crate::markdown::site_text::SiteText;
use crate::pages::{self, apply_rules};
use crate::report::{DocumentReport, Outcome, SyncReport};
use crate::settings::SyncPaths;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Write,
    DryRun,
}

/// Markdown → `index.html` + `galerii.html`, one full pass per [`run`].
///
/// [`run`]: ContentSyncPipeline::run
pub struct ContentSyncPipeline {
    paths: SyncPaths,
}

impl ContentSyncPipeline {
    pub fn new(paths: SyncPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &SyncPaths {
        &self.paths
    }

    /// All three files are read before anything else happens, and both pages
    /// are rebuilt in memory before either is written, so a failed read
    /// leaves every file as it was.
    pub fn run(&self, mode: WriteMode) -> Result<SyncReport, SyncError> {
        let markdown = read(&self.paths.markdown)?;
        let index = read(&self.paths.index)?;
        let gallery = read(&self.paths.gallery)?;

        let text = SiteText::extract(&markdown);
        debug!(
            fields = text.present_fields(),
            gallery_items = text.gallery_items.len(),
            "extracted site text"
        );

        let (new_index, index_fields) = apply_rules(index.clone(), &pages::index::rules(&text));
        let (new_gallery, gallery_fields) =
            apply_rules(gallery.clone(), &pages::gallery::rules(&text));

        let report = SyncReport {
            grammar_version: GRAMMAR_VERSION,
            dry_run: mode == WriteMode::DryRun,
            documents: vec![
                DocumentReport {
                    path: self.paths.index.clone(),
                    changed: new_index != index,
                    fields: index_fields,
                },
                DocumentReport {
                    path: self.paths.gallery.clone(),
                    changed: new_gallery != gallery,
                    fields: gallery_fields,
                },
            ],
        };

        if mode == WriteMode::Write {
            write_atomic(&self.paths.index, &new_index)?;
            write_atomic(&self.paths.gallery, &new_gallery)?;
        }

        for doc in &report.documents {
            debug!(
                path = %doc.path.display(),
                changed = doc.changed,
                updated = doc.count(Outcome::Updated),
                dry_run = report.dry_run,
                "synced document"
            );
        }
        Ok(report)
    }
}

fn read(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write through a temp file in the same directory, then rename over
/// `path`, keeping the original file's permissions. A symlinked `path` is
/// resolved first so the link keeps pointing at the rewritten file.
fn write_atomic(path: &Path, contents: &str) -> Result<(), SyncError> {
    let write_err = |source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    };
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let path = target.as_path();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("content")).unwrap();
        fs::copy(
            "tests/fixtures/site-text.md",
            dir.path().join("content/site-text.md"),
        )
        .unwrap();
        fs::copy("tests/fixtures/index.html", dir.path().join("index.html")).unwrap();
        fs::copy("tests/fixtures/galerii.html", dir.path().join("galerii.html")).unwrap();
        dir
    }

    fn pipeline(dir: &TempDir) -> ContentSyncPipeline {
        ContentSyncPipeline::new(SyncPaths::from_root(dir.path()))
    }

    fn page(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn run_writes_both_pages() {
        let dir = site();
        let report = pipeline(&dir).run(WriteMode::Write).unwrap();
        assert!(report.documents.iter().all(|d| d.changed));

        let index = page(&dir, "index.html");
        assert!(index.contains(r#"href="tel:+37255551234""#));
        assert!(index.contains(">+372 5555 1234</a>"));
        assert!(index.contains(r#"href="mailto:info@example.com""#));
        assert!(index.contains(">info@example.com</a>"));

        let gallery = page(&dir, "galerii.html");
        assert!(gallery.contains(">Sinivalge triibuline puuvillavaip</p>"));
    }

    #[test]
    fn second_run_produces_no_diff() {
        let dir = site();
        pipeline(&dir).run(WriteMode::Write).unwrap();
        let index = page(&dir, "index.html");
        let gallery = page(&dir, "galerii.html");

        let report = pipeline(&dir).run(WriteMode::Write).unwrap();
        assert_eq!(report.updated(), 0);
        assert!(report.documents.iter().all(|d| !d.changed));
        assert_eq!(page(&dir, "index.html"), index);
        assert_eq!(page(&dir, "galerii.html"), gallery);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = site();
        let before = page(&dir, "index.html");
        let report = pipeline(&dir).run(WriteMode::DryRun).unwrap();
        assert!(report.dry_run);
        assert!(report.updated() > 0);
        assert_eq!(page(&dir, "index.html"), before);
    }

    #[test]
    fn missing_markdown_aborts_untouched() {
        let dir = site();
        fs::remove_file(dir.path().join("content/site-text.md")).unwrap();
        let index = page(&dir, "index.html");
        let gallery = page(&dir, "galerii.html");

        let err = pipeline(&dir).run(WriteMode::Write).unwrap_err();
        assert!(matches!(err, SyncError::Read { ref path, .. } if path.ends_with("site-text.md")));
        assert_eq!(page(&dir, "index.html"), index);
        assert_eq!(page(&dir, "galerii.html"), gallery);
    }

    #[test]
    fn missing_gallery_leaves_index_unwritten() {
        let dir = site();
        fs::remove_file(dir.path().join("galerii.html")).unwrap();
        let index = page(&dir, "index.html");

        let err = pipeline(&dir).run(WriteMode::Write).unwrap_err();
        assert!(matches!(err, SyncError::Read { .. }));
        assert_eq!(page(&dir, "index.html"), index);
    }

    #[test]
    fn removed_field_keeps_previous_html() {
        let dir = site();
        let md_path = dir.path().join("content/site-text.md");
        let md = fs::read_to_string(&md_path).unwrap();
        fs::write(&md_path, md.replace("Asukoht: Võru, Eesti\n", "")).unwrap();

        let report = pipeline(&dir).run(WriteMode::Write).unwrap();
        assert!(page(&dir, "index.html").contains(r#"<span class="text-brand-title">Vana koht</span>"#));
        assert_eq!(report.documents[0].outcome("location"), Some(Outcome::NoFragment));
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = site();
        let index = dir.path().join("index.html");
        fs::set_permissions(&index, fs::Permissions::from_mode(0o644)).unwrap();
        pipeline(&dir).run(WriteMode::Write).unwrap();
        let mode = fs::metadata(&index).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_page_is_written_through() {
        let dir = site();
        let shared = dir.path().join("shared");
        fs::create_dir(&shared).unwrap();
        let real = shared.join("index.html");
        let link = dir.path().join("index.html");
        fs::rename(&link, &real).unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        pipeline(&dir).run(WriteMode::Write).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), real);
        assert!(fs::read_to_string(&real).unwrap().contains("<title>Käsitöövaibad | Kadri Vaibad</title>"));
    }
}
