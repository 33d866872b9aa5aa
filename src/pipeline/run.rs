//! Extraction and placement of today's image.

use std::path::PathBuf;

use chrono::NaiveDate;

use crate::dedup::{find_existing_image_with_hash, hash_bytes};
use crate::error::{Error, Result};
use crate::fs::listing::FileTypeOf;
use crate::fs::naming::{build_base_name, prepend_count, target_path};
use crate::fs::paths::write_file;
use crate::metadata::MetadataWriter;
use crate::net::Fetcher;
use crate::output::print_debug;
use crate::page::{extract, permalink, resolve_image_url};
use crate::pipeline::state::{Stage, StageTracker};

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub page_url: String,
    pub directory: PathBuf,
    /// User-supplied filename stem.
    pub filename: Option<String>,
    pub prepend_count: bool,
    /// Dump intermediate state.
    pub debug: bool,
    /// Date used for the permanent link.
    pub today: NaiveDate,
}

/// Whether a comment was attached to the saved file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataStatus {
    Skipped,
    Written,
}

/// A saved image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub path: PathBuf,
    pub image_url: String,
    pub hash: String,
    pub metadata: MetadataStatus,
}

/// Runs extraction, duplicate check, naming and writing against injected collaborators.
pub struct Pipeline<'a> {
    fetcher: &'a dyn Fetcher,
    file_types: &'a dyn FileTypeOf,
    metadata: &'a dyn MetadataWriter,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        file_types: &'a dyn FileTypeOf,
        metadata: &'a dyn MetadataWriter,
    ) -> Self {
        Self {
            fetcher,
            file_types,
            metadata,
        }
    }

    /// Run to completion or to the first failure.
    pub async fn run(&self, options: &PipelineOptions) -> Result<Placement> {
        let mut stages = StageTracker::default();
        let result = self.place(options, &mut stages).await;

        if let Err(e) = &result {
            tracing::debug!("Failed while {}: {}", stages.current(), e);
        }
        result
    }

    async fn place(&self, options: &PipelineOptions, stages: &mut StageTracker) -> Result<Placement> {
        let page_url = options.page_url.as_str();
        let directory = options.directory.as_path();

        let page = self
            .fetcher
            .fetch_text(page_url)
            .await
            .map_err(|e| Error::Fetch {
                url: page_url.to_string(),
                reason: e.to_string(),
            })?;

        stages.advance(Stage::Extracting);
        let extraction = extract(&page, page_url)?;
        if options.debug {
            print_debug(&format!(
                "Extraction: {}",
                serde_json::to_string_pretty(&extraction)?
            ));
        }

        stages.advance(Stage::FetchingImage);
        let image_url = resolve_image_url(page_url, &extraction.image)?;
        let bytes = self
            .fetcher
            .fetch_bytes(image_url.as_str())
            .await
            .map_err(|e| Error::ImageFetch {
                url: image_url.to_string(),
                reason: e.to_string(),
            })?;
        let hash = hash_bytes(&bytes);
        tracing::debug!("Image {} has hash {}", image_url, hash);

        let base_name = build_base_name(options.filename.as_deref(), &extraction.caption)
            .ok_or(Error::NoFilenameAvailable)?;

        // Must happen before anything is written.
        stages.advance(Stage::CheckingDuplicate);
        if let Some(existing) = find_existing_image_with_hash(directory, &hash, self.file_types)? {
            return Err(Error::DuplicateImage(existing));
        }

        stages.advance(Stage::BuildingName);
        let filename = if options.prepend_count {
            prepend_count(directory, &base_name, self.file_types)
        } else {
            base_name
        };
        let path = target_path(directory, &filename, &extraction.image.extension);
        if options.debug {
            print_debug(&format!("Target path: {}", path.display()));
        }

        stages.advance(Stage::Writing);
        write_file(&path, &bytes).await?;
        tracing::info!("Saved {}", path.display());

        // The image stays on disk whatever happens from here on.
        let mut metadata = MetadataStatus::Skipped;
        if self.metadata.is_available() {
            stages.advance(Stage::WritingMetadata);
            let link = permalink(page_url, options.today)?;
            let comment = comment_text(&extraction.description, link.as_str());

            let report = self.metadata.write_comment(&path, &comment).await?;
            if !report.success() {
                return Err(Error::MetadataWrite {
                    path,
                    status: report.status,
                    stdout: report.stdout,
                    stderr: report.stderr,
                });
            }
            metadata = MetadataStatus::Written;
        }

        stages.advance(Stage::Done);
        Ok(Placement {
            path,
            image_url: image_url.to_string(),
            hash,
            metadata,
        })
    }
}

/// Comment attached to the file: the description followed by the permanent link.
pub fn comment_text(description: &str, link: &str) -> String {
    if description.is_empty() {
        link.to_string()
    } else {
        format!("{} {}", description, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::listing::SniffingFileTypes;
    use crate::metadata::{CommandReport, NoopMetadataWriter};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::fs::File;
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const PAGE_URL: &str = "https://apod.nasa.gov/apod/astropix.html";
    const IMAGE_URL: &str = "https://apod.nasa.gov/apod/image.jpg";
    const IMAGE_BYTES: &[u8] = b"\xff\xd8\xff\xe0 dark nebulae pixels";

    const PAGE: &str = "<html>\n<center>\n<IMG SRC=\"image.jpg\"\nalt=\"Dark dust clouds.\"\n>\n</center>\n<b>Dark Nebulae</b>\n</html>";

    #[derive(Default)]
    struct FakeFetcher {
        responses: HashMap<String, Vec<u8>>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.responses.insert(url.to_string(), body.to_vec());
            self
        }

        fn daily(page: &str) -> Self {
            Self::default()
                .with(PAGE_URL, page.as_bytes())
                .with(IMAGE_URL, IMAGE_BYTES)
        }

        fn lookup(&self, url: &str) -> Result<Vec<u8>> {
            self.responses.get(url).cloned().ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no route to {}", url),
                ))
            })
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            Ok(String::from_utf8_lossy(&self.lookup(url)?).into_owned())
        }

        async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.lookup(url)
        }
    }

    struct RecordingWriter {
        status: i32,
        calls: Mutex<Vec<(PathBuf, String)>>,
    }

    impl RecordingWriter {
        fn exiting(status: i32) -> Self {
            Self {
                status,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetadataWriter for RecordingWriter {
        async fn write_comment(&self, path: &Path, text: &str) -> Result<CommandReport> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_path_buf(), text.to_string()));
            Ok(CommandReport {
                status: self.status,
                stdout: String::new(),
                stderr: if self.status == 0 {
                    String::new()
                } else {
                    "execution error".to_string()
                },
            })
        }
    }

    fn options(dir: &Path) -> PipelineOptions {
        PipelineOptions {
            page_url: PAGE_URL.to_string(),
            directory: dir.to_path_buf(),
            filename: None,
            prepend_count: false,
            debug: false,
            today: NaiveDate::from_ymd_opt(2024, 10, 17).unwrap(),
        }
    }

    fn write_aged(dir: &Path, name: &str, bytes: &[u8], secs_ago: u64) {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_saves_under_caption() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::daily(PAGE);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let placement = pipeline.run(&options(dir.path())).await.unwrap();

        assert_eq!(placement.path, dir.path().join("Dark Nebulae.jpg"));
        assert_eq!(placement.image_url, IMAGE_URL);
        assert_eq!(placement.metadata, MetadataStatus::Skipped);
        assert_eq!(std::fs::read(&placement.path).unwrap(), IMAGE_BYTES);
    }

    #[tokio::test]
    async fn test_prepend_count_continues_numbering() {
        let dir = TempDir::new().unwrap();
        write_aged(dir.path(), "0073-Crab Nebula.jpg", b"older image", 3600);
        let fetcher = FakeFetcher::daily(PAGE);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let mut opts = options(dir.path());
        opts.prepend_count = true;
        let placement = pipeline.run(&opts).await.unwrap();

        assert_eq!(placement.path, dir.path().join("0074-Dark Nebulae.jpg"));
    }

    #[tokio::test]
    async fn test_video_day_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("apotd");
        let page = "<iframe src=\"https://www.youtube.com/embed/abc\"></iframe>\n<b>A Video</b>";
        let fetcher = FakeFetcher::daily(page);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let err = pipeline.run(&options(&target)).await.unwrap_err();

        assert!(matches!(err, Error::NoImageFound { .. }));
        assert!(err.to_string().contains("probably not an image"));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_duplicate_content_is_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Saved Before.jpg"), IMAGE_BYTES).unwrap();
        let fetcher = FakeFetcher::daily(PAGE);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let err = pipeline.run(&options(dir.path())).await.unwrap_err();

        assert!(matches!(err, Error::DuplicateImage(ref name) if name == "Saved Before.jpg"));
        assert_eq!(file_names(dir.path()), vec!["Saved Before.jpg"]);
    }

    #[tokio::test]
    async fn test_user_filename_wins() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::daily(PAGE);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let mut opts = options(dir.path());
        opts.filename = Some("wallpaper".to_string());
        let placement = pipeline.run(&opts).await.unwrap();

        assert_eq!(placement.path, dir.path().join("wallpaper.jpg"));
    }

    #[tokio::test]
    async fn test_no_caption_and_no_filename() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::daily("<IMG SRC=\"image.jpg\">");
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let err = pipeline.run(&options(dir.path())).await.unwrap_err();

        assert!(matches!(err, Error::NoFilenameAvailable));
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_page_is_fetch_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default();
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let err = pipeline.run(&options(dir.path())).await.unwrap_err();

        assert!(matches!(err, Error::Fetch { ref url, .. } if url == PAGE_URL));
    }

    #[tokio::test]
    async fn test_missing_image_is_image_fetch_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default().with(PAGE_URL, PAGE.as_bytes());
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &NoopMetadataWriter);

        let err = pipeline.run(&options(dir.path())).await.unwrap_err();

        assert!(matches!(err, Error::ImageFetch { ref url, .. } if url == IMAGE_URL));
        assert!(file_names(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_metadata_gets_description_and_permalink() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::daily(PAGE);
        let writer = RecordingWriter::exiting(0);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &writer);

        let placement = pipeline.run(&options(dir.path())).await.unwrap();

        assert_eq!(placement.metadata, MetadataStatus::Written);
        let calls = writer.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, placement.path);
        assert_eq!(
            calls[0].1,
            "Dark dust clouds. https://apod.nasa.gov/apod/ap241017.html"
        );
    }

    #[tokio::test]
    async fn test_metadata_failure_keeps_image() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::daily(PAGE);
        let writer = RecordingWriter::exiting(1);
        let pipeline = Pipeline::new(&fetcher, &SniffingFileTypes, &writer);

        let err = pipeline.run(&options(dir.path())).await.unwrap_err();

        match err {
            Error::MetadataWrite { path, status, stderr, .. } => {
                assert_eq!(status, 1);
                assert_eq!(stderr, "execution error");
                assert_eq!(std::fs::read(path).unwrap(), IMAGE_BYTES);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_comment_text_without_description() {
        assert_eq!(comment_text("", "https://x/ap241017.html"), "https://x/ap241017.html");
        assert_eq!(comment_text("Stars.", "link"), "Stars. link");
    }
}
