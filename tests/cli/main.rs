use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod add;
mod dedup;
mod init;
mod run;
mod stages;

const BIN_NAME: &str = "keyfold";

pub const CATALOG_DIR: &str = "src/config/translations";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stops the upward config search at the project
        fs::create_dir_all(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with a `pt` base catalog, an `en` dependent and one source file.
    pub fn with_project(base: &str, source: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(".keyfoldrc.json", r#"{ "locales": ["pt", "en"] }"#)?;
        test.write_catalog("pt", base)?;
        test.write_file("src/app.tsx", source)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn write_catalog(&self, locale: &str, content: &str) -> Result<()> {
        self.write_file(&format!("{}/{}.json", CATALOG_DIR, locale), content)
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_catalog(&self, locale: &str) -> Result<String> {
        self.read_file(&format!("{}/{}.json", CATALOG_DIR, locale))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.project_dir.join(path).exists()
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run `keyfold <args>` in the project and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<RunOutput> {
        let output = self
            .command()
            .args(args)
            .output()
            .with_context(|| format!("Failed to run keyfold {}", args.join(" ")))?;
        Ok(RunOutput::from(output))
    }
}

pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Base catalog with one duplicate pair and one placeholder text.
pub const SCENARIO_BASE: &str = r#"{
  "a.b": "Hello",
  "x.y": "Hello",
  "c": "TODO"
}
"#;
