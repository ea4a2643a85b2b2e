//! What to build when a change is detected.

use std::path::{Path, PathBuf};

/// A build job: which project, which goals, and how to run the tool.
///
/// The job only decides *what* to build; it never touches line processing.
#[derive(Debug, Clone)]
pub struct Job {
    /// Path to the project's pom.xml.
    pub pom_file: PathBuf,
    /// Goals to execute when a change is detected, in order.
    pub goals: Vec<String>,
    /// Maven installation to use instead of the configured one.
    pub maven_home: Option<PathBuf>,
    /// JDK to run the build with, exported as JAVA_HOME.
    pub java_home: Option<PathBuf>,
    /// Maven thread spec, e.g. "4" or "1C".
    pub threads: Option<String>,
}

impl Job {
    pub fn new(pom_file: impl Into<PathBuf>, goals: Vec<String>) -> Self {
        Self { pom_file: pom_file.into(), goals, maven_home: None, java_home: None, threads: None }
    }

    /// Root directory of the project: the directory holding the pom file.
    pub fn project_dir(&self) -> PathBuf {
        match self.pom_file.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
