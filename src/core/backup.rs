//! Database backups: timestamped copies with retention, plus one-off copies
//! to an explicit file.
//!
//! Rotation is best effort. `run` and `run_daily` never return an error:
//! failures end up as a warning on stderr and the command carries on.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, warning};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use zip::ZipWriter;
use zip::write::FileOptions;

/// Timestamp embedded in rotated backup names.
pub const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Where the store lives, where its copies go and how many to keep.
#[derive(Debug, Clone)]
pub struct BackupPlan {
    pub db_path: PathBuf,
    pub backup_dir: PathBuf,
    pub retention: usize,
}

impl BackupPlan {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            db_path: cfg.database_path(),
            backup_dir: cfg.backup_dir(),
            retention: cfg.backup_retention,
        }
    }

    fn stem(&self) -> String {
        self.db_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "database".to_string())
    }

    fn extension(&self) -> String {
        self.db_path
            .extension()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "db".to_string())
    }

    /// `<stem>_<YYYY-MM-DD_HH-MM-SS>.<ext>`
    pub fn file_name_for(&self, at: NaiveDateTime) -> String {
        format!(
            "{}_{}.{}",
            self.stem(),
            at.format(STAMP_FORMAT),
            self.extension()
        )
    }

    /// Timestamp of a file name produced by [`file_name_for`](Self::file_name_for).
    pub fn stamp_of(&self, file_name: &str) -> Option<NaiveDateTime> {
        let prefix = format!("{}_", self.stem());
        let suffix = format!(".{}", self.extension());
        let stamp = file_name.strip_prefix(&prefix)?.strip_suffix(&suffix)?;
        NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok()
    }
}

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the store now and rotate. Returns the new file, if one was written.
    pub fn run(plan: &BackupPlan, now: NaiveDateTime) -> Option<PathBuf> {
        match Self::try_run(plan, now) {
            Ok(created) => created,
            Err(e) => {
                warning(format!("Backup skipped: {}", e));
                None
            }
        }
    }

    /// Like [`run`](Self::run), but only when no backup from today exists yet.
    pub fn run_daily(plan: &BackupPlan, now: NaiveDateTime) -> Option<PathBuf> {
        match Self::try_run_daily(plan, now) {
            Ok(created) => created,
            Err(e) => {
                warning(format!("Daily backup skipped: {}", e));
                None
            }
        }
    }

    pub fn try_run_daily(plan: &BackupPlan, now: NaiveDateTime) -> AppResult<Option<PathBuf>> {
        if !plan.db_path.exists() {
            return Ok(None);
        }
        if Self::has_backup_for(plan, now.date())? {
            return Ok(None);
        }
        Self::try_run(plan, now)
    }

    pub fn try_run(plan: &BackupPlan, now: NaiveDateTime) -> AppResult<Option<PathBuf>> {
        if !plan.db_path.exists() {
            return Ok(None);
        }

        fs::create_dir_all(&plan.backup_dir)?;

        let dest = plan.backup_dir.join(plan.file_name_for(now));
        copy_no_overwrite(&plan.db_path, &dest)?;

        let removed = Self::rotate(plan)?;
        if removed > 0 {
            info(format!("Removed {} old backup(s)", removed));
        }

        Ok(Some(dest))
    }

    /// Backups of this store, newest first (creation time, then name).
    pub fn list_backups(plan: &BackupPlan) -> AppResult<Vec<PathBuf>> {
        if !plan.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut found: Vec<(SystemTime, String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&plan.backup_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if plan.stamp_of(&name).is_none() || !entry.file_type()?.is_file() {
                continue;
            }
            let meta = entry.metadata()?;
            let created = meta
                .created()
                .or_else(|_| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((created, name, entry.path()));
        }

        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
        Ok(found.into_iter().map(|(_, _, p)| p).collect())
    }

    /// Delete everything but the newest `retention` backups.
    /// Files that refuse to go are skipped, not reported as failures.
    pub fn rotate(plan: &BackupPlan) -> AppResult<usize> {
        let mut removed = 0;
        for old in Self::list_backups(plan)?.into_iter().skip(plan.retention) {
            match fs::remove_file(&old) {
                Ok(()) => removed += 1,
                Err(e) => warning(format!("Could not remove {}: {}", old.display(), e)),
            }
        }
        Ok(removed)
    }

    pub fn has_backup_for(plan: &BackupPlan, day: NaiveDate) -> AppResult<bool> {
        if !plan.backup_dir.exists() {
            return Ok(false);
        }
        for entry in fs::read_dir(&plan.backup_dir)? {
            let name = entry?.file_name().to_string_lossy().to_string();
            if plan.stamp_of(&name).is_some_and(|s| s.date() == day) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// One-off copy to an explicit file, optionally zipped.
    pub fn backup_to_file(
        db_path: &Path,
        dest: &Path,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        //
        // 1. Check DB exists
        //
        if !db_path.exists() {
            return Err(AppError::from(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Database not found: {}", db_path.display()),
            )));
        }

        //
        // 2. Ensure destination folder exists and may be written
        //
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !compress {
            ensure_writable(dest, force)?;
            fs::copy(db_path, dest)?;
            return Ok(dest.to_path_buf());
        }

        //
        // 3. Zip straight from the database file
        //
        let zip_path = dest.with_extension("zip");
        ensure_writable(&zip_path, force)?;

        let entry = db_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "database.sqlite".to_string());
        zip_single_file(db_path, &zip_path, &entry)?;

        Ok(zip_path)
    }
}

/// Copy `src` to `dest`, failing if `dest` already exists.
/// A copy that fails halfway is removed so it never counts as a backup.
fn copy_no_overwrite(src: &Path, dest: &Path) -> AppResult<()> {
    let mut input = File::open(src)?;
    let mut output = OpenOptions::new().write(true).create_new(true).open(dest)?;

    let written = io::copy(&mut input, &mut output).and_then(|_| output.sync_all());
    if let Err(e) = written {
        drop(output);
        fs::remove_file(dest).ok();
        return Err(e.into());
    }
    Ok(())
}

/// Write `src` into a new zip archive at `zip_path` under `entry_name`.
pub fn zip_single_file(src: &Path, zip_path: &Path, entry_name: &str) -> AppResult<()> {
    let file = File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name, options)
        .map_err(io::Error::other)?;

    let mut f = File::open(src)?;
    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> BackupPlan {
        BackupPlan {
            db_path: PathBuf::from("/data/linentrack.sqlite"),
            backup_dir: PathBuf::from("/data/backups"),
            retention: 30,
        }
    }

    #[test]
    fn file_names_embed_the_timestamp() {
        let at = NaiveDateTime::parse_from_str("2024-05-01 07:08:09", "%Y-%m-%d %H:%M:%S").unwrap();
        let name = plan().file_name_for(at);
        assert_eq!(name, "linentrack_2024-05-01_07-08-09.sqlite");
        assert_eq!(plan().stamp_of(&name), Some(at));
    }

    #[test]
    fn failed_copy_leaves_no_file_behind() {
        let tmp = tempfile::tempdir().unwrap();
        // reading a directory fails after the destination was created
        let src = tmp.path().join("not_a_file");
        fs::create_dir(&src).unwrap();
        let dest = tmp.path().join("linentrack_2024-05-01_07-08-09.sqlite");

        assert!(copy_no_overwrite(&src, &dest).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn foreign_files_are_not_backups() {
        let p = plan();
        assert!(p.stamp_of("notes.txt").is_none());
        assert!(p.stamp_of("linentrack_latest.sqlite").is_none());
        assert!(p.stamp_of("other_2024-05-01_07-08-09.sqlite").is_none());
    }
}
