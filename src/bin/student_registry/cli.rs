use clap::{Parser, Subcommand};
use std::path::PathBuf;

use student_registry::RegistryConfig;

/// Учёт студентов, курсов и оценок с сохранением в JSON
#[derive(Parser, Debug)]
#[command(
    name = "student-registry",
    version,
    about = "Student/course registry with an interactive menu and a JSON state file"
)]
pub struct Cli {
    /// State file (overrides SREG_DATA_FILE)
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Do not load the state file when the menu starts
    #[arg(long, global = true)]
    pub no_autoload: bool,

    /// Write indented JSON on save
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Interactive numbered menu (default)
    Menu,
    /// Counts of students, courses and enrollments in the state file
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Print one student from the state file
    Student {
        #[arg(long)]
        id: String,
    },
    /// Print one course from the state file
    Course {
        #[arg(long)]
        code: String,
    },
}

impl Cli {
    /// Env first, then flags on top.
    pub fn config(&self) -> RegistryConfig {
        let mut cfg = RegistryConfig::from_env();
        if let Some(p) = &self.data_file {
            cfg = cfg.with_data_file(p.clone());
        }
        if self.no_autoload {
            cfg = cfg.with_autoload(false);
        }
        if self.pretty {
            cfg = cfg.with_pretty(true);
        }
        cfg
    }
}
