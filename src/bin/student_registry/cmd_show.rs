use anyhow::{Context, Result};

use student_registry::{Registry, RegistryConfig};

fn open(cfg: &RegistryConfig) -> Result<Registry> {
    let mut reg = Registry::new();
    reg.load(&cfg.data_file)
        .with_context(|| format!("load {}", cfg.data_file.display()))?;
    Ok(reg)
}

pub fn exec_student(cfg: RegistryConfig, id: String) -> Result<()> {
    let reg = open(&cfg)?;
    let d = reg.get_student_details(&id)?;
    println!("{d}");
    Ok(())
}

pub fn exec_course(cfg: RegistryConfig, code: String) -> Result<()> {
    let reg = open(&cfg)?;
    let d = reg.get_course_details(&code)?;
    println!("{d}");
    Ok(())
}
