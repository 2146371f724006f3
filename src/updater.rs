use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::region::SidebarRegion;
use crate::template::{SidebarTemplate, TemplateError};

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub enum UpdateOutcome {
    Changed,
    Unchanged,
    Failed(UpdateError),
}

impl UpdateOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, UpdateOutcome::Failed(_))
    }
}

/// Whether a changed page is written back or only reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    Apply,
    Check,
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("invalid sidebar pattern: {0}")]
    Region(#[from] regex::Error),
}

/// Rewrites the sidebar of dashboard pages from one shared template.
#[derive(Debug, Clone)]
pub struct Updater {
    template: SidebarTemplate,
    region: SidebarRegion,
    mode: WriteMode,
}

impl Updater {
    pub fn new(template: SidebarTemplate, mode: WriteMode) -> Result<Self, SetupError> {
        Ok(Self {
            template,
            region: SidebarRegion::new()?,
            mode,
        })
    }

    pub fn builtin(mode: WriteMode) -> Result<Self, SetupError> {
        Self::new(SidebarTemplate::builtin()?, mode)
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn render(&self, active_page: &str) -> String {
        self.template.render(active_page)
    }

    pub fn update(&self, path: &Path, active_page: &str) -> UpdateOutcome {
        match self.try_update(path, active_page) {
            Ok(true) => UpdateOutcome::Changed,
            Ok(false) => UpdateOutcome::Unchanged,
            Err(err) => UpdateOutcome::Failed(err),
        }
    }

    fn try_update(&self, path: &Path, active_page: &str) -> Result<bool, UpdateError> {
        let bytes = fs::read(path).map_err(|source| UpdateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|source| UpdateError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        if !self.region.is_present(&content) {
            debug!("no sidebar block in {}", path.display());
            return Ok(false);
        }

        let fragment = self.render(active_page);
        let updated = self.region.splice(&content, &fragment);
        if updated == content {
            return Ok(false);
        }

        match self.mode {
            WriteMode::Apply => {
                fs::write(path, updated.as_bytes()).map_err(|source| UpdateError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!("wrote {} bytes to {}", updated.len(), path.display());
            }
            WriteMode::Check => debug!("check mode, leaving {} untouched", path.display()),
        }
        Ok(true)
    }
}
