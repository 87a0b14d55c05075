use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;

use student_registry::menu::Prompter;
use student_registry::{MenuOption, Registry, RegistryConfig, Session};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("sregtest-menu-{prefix}-{pid}-{t}-{id}"))
}

fn config_in(root: &PathBuf) -> RegistryConfig {
    RegistryConfig::default()
        .with_data_file(root.join("data.json"))
        .with_autoload(false)
}

/// Прогоняет сессию на заданном вводе и возвращает (сессию, весь вывод).
fn run_script(cfg: RegistryConfig, script: &str) -> Result<(Session, String)> {
    let mut session = Session::new(cfg);
    let mut out = Vec::new();
    session.run(Cursor::new(script.to_string()), &mut out)?;
    Ok((session, String::from_utf8(out)?))
}

#[test]
fn scripted_session_adds_enrolls_grades_and_saves() -> Result<()> {
    let root = unique_root("full");
    let cfg = config_in(&root);

    let script = "\
1\nAna\n20\nAddr1\nS1\n\
2\nAlgo\nC1\nDr.X\n\
3\nS1\nC1\n\
4\nS1\nC1\nA\n\
5\nS1\n\
6\nC1\n\
7\n\
0\n";
    let (session, out) = run_script(cfg.clone(), script)?;

    assert!(out.contains("Student Ana (ID: S1) added successfully."));
    assert!(out.contains("Course Algo (Code: C1) created with instructor Dr.X."));
    assert!(out.contains("Student Ana (ID: S1) enrolled in Algo (Code: C1)."));
    assert!(out.contains("Grade A added for Ana in C1."));
    assert!(out.contains("Enrolled Courses: Algo"));
    assert!(out.contains("Grades: {C1: A}"));
    assert!(out.contains("Enrolled Students: Ana"));
    assert!(out.contains("All student and course data saved successfully."));
    assert!(out.trim_end().ends_with("Exiting Student Management System. Goodbye!"));

    assert!(cfg.data_file.exists());
    let mut reloaded = Registry::new();
    reloaded.load(&cfg.data_file)?;
    assert_eq!(&reloaded, session.registry());
    Ok(())
}

#[test]
fn rejections_are_reported_and_loop_continues() -> Result<()> {
    let root = unique_root("reject");
    let script = "\
9\n\
1\nAna\ntwenty\nAddr1\nS1\n\
1\nAna\n20\nAddr1\nS1\n\
1\nAgain\n30\nAddr2\nS1\n\
3\nS1\nC404\n\
2\nAlgo\nC1\nDr.X\n\
4\nS1\nC1\nA\n\
5\nS404\n\
0\n";
    let (session, out) = run_script(config_in(&root), script)?;

    assert!(out.contains("Invalid option. Please try again."));
    assert!(out.contains("invalid age \"twenty\""));
    assert!(out.contains("Student with ID S1 already exists."));
    assert!(out.contains("Course with code C404 does not exist."));
    assert!(out.contains("Student S1 is not enrolled in the course with code C1."));
    assert!(out.contains("Student with ID S404 does not exist."));

    let reg = session.registry();
    assert_eq!(reg.student_count(), 1);
    assert_eq!(reg.student("S1").unwrap().person.name, "Ana");
    assert!(reg.student("S1").unwrap().grades.is_empty());
    Ok(())
}

#[test]
fn autoload_reports_missing_then_loads_saved_state() -> Result<()> {
    let root = unique_root("autoload");
    let cfg = config_in(&root).with_autoload(true);

    let (_, out) = run_script(cfg.clone(), "0\n")?;
    assert!(out.starts_with("No previous data found, starting fresh."));

    let mut reg = Registry::new();
    reg.add_student("Ana", 20, "Addr1", "S1")?;
    reg.save(&cfg.data_file, false)?;

    let (session, out) = run_script(cfg, "5\nS1\n0\n")?;
    assert!(out.starts_with("Data loaded successfully."));
    assert!(out.contains("Name: Ana"));
    assert_eq!(session.registry().student_count(), 1);
    Ok(())
}

#[test]
fn load_option_reports_malformed_file() -> Result<()> {
    let root = unique_root("bad-load");
    fs::create_dir_all(&root)?;
    let cfg = config_in(&root);
    fs::write(&cfg.data_file, "[1,2,3]")?;

    let (session, out) = run_script(cfg, "8\n0\n")?;
    assert!(out.contains("Error: malformed data file"));
    assert_eq!(session.registry().student_count(), 0);
    Ok(())
}

#[test]
fn end_of_input_exits_cleanly_even_mid_prompt() -> Result<()> {
    let root = unique_root("eof");
    let (session, out) = run_script(config_in(&root), "1\nAna\n20\n")?;
    assert!(out.contains("Enter Address: "));
    assert_eq!(session.registry().student_count(), 0);

    let (_, out) = run_script(config_in(&root), "")?;
    assert!(out.contains("Select Option: "));
    Ok(())
}

#[test]
fn dispatch_single_option_without_loop() -> Result<()> {
    let root = unique_root("dispatch");
    let mut session = Session::new(config_in(&root));
    let mut p = Prompter::new(Cursor::new("Algo\nC1\nDr.X\n"), Vec::new());

    let flow = session.dispatch(MenuOption::AddCourse, &mut p)?;
    assert_eq!(flow, student_registry::menu::Flow::Continue);
    assert_eq!(session.registry().course_count(), 1);

    let mut p = Prompter::new(Cursor::new(""), Vec::new());
    let flow = session.dispatch(MenuOption::Exit, &mut p)?;
    assert_eq!(flow, student_registry::menu::Flow::Exit);

    assert_eq!(session.config().data_file, root.join("data.json"));
    assert!(!session.config().autoload);

    // Реестр переживает сессию и доступен дальше без меню
    let reg = session.into_registry();
    assert_eq!(reg.course("C1").map(|c| c.instructor.as_str()), Some("Dr.X"));
    Ok(())
}
