use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Application;

/// Column names in on-disk order. The header row of the store file is
/// exactly these names, comma-separated.
const FIELDS: [&str; 6] = ["id", "company", "role", "date_applied", "status", "notes"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("company and role are required")]
    Validation,

    #[error("application #{0} not found")]
    NotFound(u32),

    #[error("malformed store file: {0}")]
    Malformed(csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Result of an update-status request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { previous: String },
    /// Empty new status: nothing was written.
    Unchanged,
}

/// The record store. Owns one CSV file; every mutation is a full
/// load-mutate-save cycle over it. Single-process use only: concurrent
/// writers race and the last save wins.
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the default platform data path.
    pub fn open() -> Result<Self> {
        Ok(Self::new(Self::default_path()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn default_path() -> PathBuf {
        // Use XDG data directory or fallback
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "apptrack") {
            proj_dirs.data_dir().join("applications.csv")
        } else {
            PathBuf::from("applications.csv")
        }
    }

    /// Create the store file with only the header row if it is absent.
    /// An existing file is left untouched.
    pub fn ensure_initialized(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.save(&[])
    }

    /// Read every record in file order. A row with the wrong column count
    /// or a non-numeric id fails the whole load.
    pub fn load(&self) -> Result<Vec<Application>> {
        self.ensure_initialized()?;
        let raw = fs::read(&self.path)?;
        let mut reader = csv::Reader::from_reader(raw.as_slice());
        let mut apps = Vec::new();
        for row in reader.deserialize() {
            apps.push(row.map_err(StoreError::Malformed)?);
        }
        Ok(apps)
    }

    /// Overwrite the store file with header + the given records. The new
    /// contents are written to a sibling temp file and renamed into place,
    /// so a crash mid-save cannot truncate the live file.
    pub fn save(&self, apps: &[Application]) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(FIELDS).map_err(StoreError::Malformed)?;
        for app in apps {
            writer.serialize(app).map_err(StoreError::Malformed)?;
        }
        let buf = writer
            .into_inner()
            .map_err(|err| io::Error::other(err.to_string()))?;

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Next id to assign: 1 for an empty store, max existing + 1 otherwise.
    pub fn next_id(apps: &[Application]) -> u32 {
        apps.iter().map(|a| a.id).max().map_or(1, |max| max + 1)
    }

    // --- Record operations ---

    /// Validate, assign an id, append, and save. `date_applied` defaults to
    /// today and `status` to "Applied" when left blank. An empty company or
    /// role rejects the add before anything is written.
    pub fn add(
        &self,
        company: &str,
        role: &str,
        date_applied: &str,
        status: &str,
        notes: &str,
    ) -> Result<Application> {
        let company = company.trim();
        let role = role.trim();
        if company.is_empty() || role.is_empty() {
            return Err(StoreError::Validation);
        }

        let mut apps = self.load()?;
        let app = Application {
            id: Self::next_id(&apps),
            company: company.to_string(),
            role: role.to_string(),
            date_applied: non_blank_or(date_applied, today),
            status: non_blank_or(status, || "Applied".to_string()),
            notes: notes.trim().to_string(),
        };
        apps.push(app.clone());
        self.save(&apps)?;
        Ok(app)
    }

    pub fn get(&self, id: u32) -> Result<Option<Application>> {
        let apps = self.load()?;
        Ok(apps.into_iter().find(|a| a.id == id))
    }

    /// Case-insensitive substring match against company or role, in file
    /// order. No matches is an empty vec, not an error.
    pub fn search(&self, keyword: &str) -> Result<Vec<Application>> {
        let keyword = keyword.trim().to_lowercase();
        let apps = self.load()?;
        Ok(apps
            .into_iter()
            .filter(|a| {
                a.company.to_lowercase().contains(&keyword)
                    || a.role.to_lowercase().contains(&keyword)
            })
            .collect())
    }

    /// Set the status of the record with the given id and save. An empty
    /// new status is a no-op: nothing is written. An unknown id is
    /// `NotFound` and nothing is written.
    pub fn update_status(&self, id: u32, new_status: &str) -> Result<UpdateOutcome> {
        let new_status = new_status.trim();
        let mut apps = self.load()?;
        let app = apps
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound(id))?;

        if new_status.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }

        let previous = std::mem::replace(&mut app.status, new_status.to_string());
        self.save(&apps)?;
        Ok(UpdateOutcome::Updated { previous })
    }
}

// --- Helper functions ---

fn non_blank_or(value: &str, default: impl FnOnce() -> String) -> String {
    let value = value.trim();
    if value.is_empty() {
        default()
    } else {
        value.to_string()
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
