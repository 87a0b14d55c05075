use anyhow::{Context, Result};
use std::io;

use student_registry::{RegistryConfig, Session};

pub fn exec(cfg: RegistryConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(cfg);
    session
        .run(stdin.lock(), stdout.lock())
        .context("terminal i/o")?;
    Ok(())
}
