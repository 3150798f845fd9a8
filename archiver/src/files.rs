use crate::config::{Config, SCAN_BATCH_SIZE};
use crate::errors::Result;
use crate::extract;
use crate::remote::Remote;
use crate::throttle::Throttle;

use db::structs::File;
use db::{InsertOutcome, WriteableDb};
use log::{debug, info, warn};
use std::ops::AddAssign;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Stored,
    Skipped,
    Failed,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileSummary {
    pub stored: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl FileSummary {
    #[inline]
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Stored => self.stored += 1,
            FileOutcome::Skipped => self.skipped += 1,
            FileOutcome::Failed => self.failed += 1,
        }
    }
}

impl AddAssign for FileSummary {
    fn add_assign(&mut self, other: FileSummary) {
        self.stored += other.stored;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Downloads uploads and avatars into the file table, at most once per path.
pub struct FileArchiver<'a, D: WriteableDb, R: Remote + ?Sized> {
    db: &'a D,
    remote: &'a R,
    throttle: Throttle,
}

impl<'a, D: WriteableDb, R: Remote + ?Sized> FileArchiver<'a, D, R> {
    pub const fn new(db: &'a D, remote: &'a R, config: &Config) -> Self {
        FileArchiver {
            db,
            remote,
            throttle: Throttle::new(config.file_delay),
        }
    }

    /// Fetches and stores `path` unless it is already stored. A failed
    /// download or insert is logged and reported as `Failed`; only a failing
    /// existence check is an error.
    pub async fn archive_path(&self, path: &str) -> Result<FileOutcome> {
        if self.db.file_exists(path)? {
            debug!("Skipping existing: {path}");
            return Ok(FileOutcome::Skipped);
        }

        let download = match self.remote.get_file(path).await {
            Ok(download) => download,
            Err(why) => {
                warn!("Error downloading file: {why}: {path}");
                return Ok(FileOutcome::Failed);
            }
        };
        info!("{:12} bytes: {path}", download.data.len());

        let file = File::new(path, download.content_type, download.data);
        let outcome = match self.db.create_file(&file) {
            Ok(InsertOutcome::Inserted) => FileOutcome::Stored,
            Ok(InsertOutcome::AlreadyExists) => FileOutcome::Skipped,
            Err(why) => {
                warn!("Error creating file: {why}: {path}");
                FileOutcome::Failed
            }
        };
        drop(file);

        self.throttle.pause().await;
        Ok(outcome)
    }

    /// One attempt per distinct avatar url among stored messages.
    pub async fn archive_avatars(&self) -> Result<FileSummary> {
        let avatars = self.db.distinct_avatar_urls()?;
        info!("Found {} avatars", avatars.len());

        let mut summary = FileSummary::default();
        for avatar in &avatars {
            summary.record(self.archive_path(avatar).await?);
        }
        Ok(summary)
    }

    /// Scans every stored message, a small batch at a time, for embedded
    /// upload paths and archives each one.
    pub async fn archive_references(&self) -> Result<FileSummary> {
        let mut summary = FileSummary::default();
        let mut offset = 0;

        loop {
            let batch = self.db.messages_page(offset, SCAN_BATCH_SIZE)?;
            for message in &batch {
                for path in extract::resource_paths(&message.content) {
                    summary.record(self.archive_path(path).await?);
                }
            }
            if (batch.len() as u64) < SCAN_BATCH_SIZE {
                break;
            }
            offset += SCAN_BATCH_SIZE;
        }

        Ok(summary)
    }
}

/// Avatars first, then everything referenced from message bodies.
pub async fn archive_files<D, R>(db: &D, remote: &R, config: &Config) -> Result<FileSummary>
where
    D: WriteableDb,
    R: Remote + ?Sized,
{
    let archiver = FileArchiver::new(db, remote, config);

    let mut summary = archiver.archive_avatars().await?;
    info!(
        "avatars: {} stored, {} skipped, {} failed",
        summary.stored, summary.skipped, summary.failed
    );
    let references = archiver.archive_references().await?;
    info!(
        "uploads: {} stored, {} skipped, {} failed",
        references.stored, references.skipped, references.failed
    );

    summary += references;
    Ok(summary)
}
