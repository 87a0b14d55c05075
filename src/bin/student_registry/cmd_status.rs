use anyhow::{Context, Result};

use student_registry::{Registry, RegistryConfig};

pub fn exec(cfg: RegistryConfig, json: bool) -> Result<()> {
    let mut reg = Registry::new();
    let s = reg
        .load(&cfg.data_file)
        .with_context(|| format!("load {}", cfg.data_file.display()))?;

    if json {
        let out = serde_json::json!({
            "data_file": cfg.data_file.display().to_string(),
            "students": s.students,
            "courses": s.courses,
            "enrollments": s.enrollments,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Registry at {}", cfg.data_file.display());
    println!("  students    = {}", s.students);
    println!("  courses     = {}", s.courses);
    println!("  enrollments = {}", s.enrollments);
    Ok(())
}
