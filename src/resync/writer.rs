//! Applies a [`ResyncPlan`] to the filesystem.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::classify::Satellite;

use super::{FileKind, OutputLayout, PlannedFile, ResyncError, ResyncPlan};

/// Permissions of recreated directories.
pub const DIR_MODE: u32 = 0o755;

/// Satellite that owns the generated zones directory.
const ZONE_SATELLITE: Satellite = Satellite::Icinga;

/// Progress of a resync, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResyncStage {
    /// Both hosts directories are empty.
    HostTreeReset,
    /// Every host file is written.
    HostFilesWritten,
    /// The zones directory is empty.
    ZoneTreeReset,
    /// Every zone file is written.
    ZoneFilesWritten,
    /// The run finished.
    Done,
}

impl ResyncStage {
    /// Returns the following stage; `Done` is terminal.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::HostTreeReset => Self::HostFilesWritten,
            Self::HostFilesWritten => Self::ZoneTreeReset,
            Self::ZoneTreeReset => Self::ZoneFilesWritten,
            Self::ZoneFilesWritten | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for ResyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostTreeReset => write!(f, "host tree reset"),
            Self::HostFilesWritten => write!(f, "host files written"),
            Self::ZoneTreeReset => write!(f, "zone tree reset"),
            Self::ZoneFilesWritten => write!(f, "zone files written"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Writes a plan into the output tree, discarding the previous generation.
#[derive(Debug, Clone)]
pub struct ResyncWriter {
    layout: OutputLayout,
}

impl ResyncWriter {
    /// Creates a writer for the given layout.
    #[must_use]
    pub const fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }

    /// Returns the output layout.
    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Rebuilds the generated directories from `plan`.
    ///
    /// Only the hosts directories of both satellites and the zones directory
    /// of the icinga2 satellite are touched; hand-written configuration next
    /// to them is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`ResyncError`] on the first I/O failure. Nothing is rolled back.
    pub fn apply(&self, plan: &ResyncPlan) -> Result<ResyncStage, ResyncError> {
        for satellite in Satellite::ALL {
            reset_dir(&self.layout.hosts_path(satellite))?;
        }
        let mut stage = ResyncStage::HostTreeReset;
        tracing::debug!("Resync: {stage}");

        for file in plan.host_files() {
            self.write(file)?;
        }
        stage = advance(stage);

        reset_dir(&self.layout.zones_path(ZONE_SATELLITE))?;
        stage = advance(stage);

        for file in plan.zone_files() {
            self.write(file)?;
        }
        stage = advance(stage);

        Ok(advance(stage))
    }

    /// Logs what [`Self::apply`] would do without touching the filesystem.
    pub fn preview(&self, plan: &ResyncPlan) {
        for satellite in Satellite::ALL {
            tracing::info!(
                "Dry-run: would reset {}",
                self.layout.hosts_path(satellite).display()
            );
        }
        tracing::info!(
            "Dry-run: would reset {}",
            self.layout.zones_path(ZONE_SATELLITE).display()
        );

        for file in plan.files() {
            tracing::info!(
                "Dry-run: would write {} ({} for {})",
                self.target(file).display(),
                file.kind,
                file.node
            );
        }
    }

    /// Returns the full path a planned file is written to.
    #[must_use]
    pub fn target(&self, file: &PlannedFile) -> PathBuf {
        let dir = match file.kind {
            FileKind::Host => self.layout.hosts_path(file.satellite),
            FileKind::Zone => self.layout.zones_path(file.satellite),
        };
        dir.join(&file.file_name)
    }

    fn write(&self, file: &PlannedFile) -> Result<(), ResyncError> {
        let path = self.target(file);
        fs::write(&path, &file.contents).map_err(|source| ResyncError::WriteFile {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Wrote {} file {}", file.kind, path.display());
        Ok(())
    }
}

fn advance(stage: ResyncStage) -> ResyncStage {
    let next = stage.next();
    tracing::debug!("Resync: {next}");
    next
}

/// Recursively deletes `path` (a missing directory is fine) and recreates it empty.
fn reset_dir(path: &Path) -> Result<(), ResyncError> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(source) => {
            return Err(ResyncError::RemoveDir {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let create_err = |source| ResyncError::CreateDir {
        path: path.to_path_buf(),
        source,
    };

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path).map_err(create_err)?;

    // The creation mode is filtered through the umask; pin it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(DIR_MODE)).map_err(create_err)?;
    }

    Ok(())
}
