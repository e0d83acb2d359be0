use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use csvdedup::cli::Cli;
use csvdedup::error::ExitCode;
use tempfile::TempDir;

/// A scratch directory holding one input file and an empty config file.
pub struct Workspace {
    pub dir: TempDir,
    pub input: PathBuf,
    config: PathBuf,
}

impl Workspace {
    pub fn new(file_name: &str, content: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join(file_name);
        fs::write(&input, content).unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, "").unwrap();
        Self { dir, input, config }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Run csvdedup on the input with extra arguments, returning stdout.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<(ExitCode, String)> {
        let mut argv: Vec<String> = vec![
            "csvdedup".to_string(),
            "--config".to_string(),
            self.config.display().to_string(),
        ];
        argv.extend(args.iter().map(|a| a.to_string()));
        argv.push(self.input.display().to_string());

        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let code = csvdedup::run_to_writer(cli, &mut out, false)?;
        Ok((code, String::from_utf8(out).unwrap()))
    }

    pub fn write_config(&self, content: &str) {
        fs::write(&self.config, content).unwrap();
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
