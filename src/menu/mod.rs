//! menu — the numbered interactive menu.
//!
//! Session owns the registry and config; `run` drives the loop over any
//! BufRead/Write pair, `dispatch` handles a single option. Registry errors are
//! printed and the loop goes on; only terminal I/O errors end it.

mod prompt;

pub use prompt::Prompter;

use std::io::{self, BufRead, Write};

use log::debug;

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::model::parse_age;
use crate::registry::Registry;

pub const MENU: &str = "\n==== Student Management System ====
1. Add New Student
2. Add New Course
3. Enroll Student in Course
4. Add Grade for Student
5. Display Student Details
6. Display Course Details
7. Save Data to File
8. Load Data from File
0. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    AddStudent,
    AddCourse,
    Enroll,
    AddGrade,
    ShowStudent,
    ShowCourse,
    Save,
    Load,
    Exit,
}

impl MenuOption {
    pub fn parse(raw: &str) -> Option<Self> {
        Some(match raw.trim() {
            "1" => MenuOption::AddStudent,
            "2" => MenuOption::AddCourse,
            "3" => MenuOption::Enroll,
            "4" => MenuOption::AddGrade,
            "5" => MenuOption::ShowStudent,
            "6" => MenuOption::ShowCourse,
            "7" => MenuOption::Save,
            "8" => MenuOption::Load,
            "0" => MenuOption::Exit,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// Read one prompted field; end of input leaves the menu.
macro_rules! field {
    ($p:expr, $label:expr) => {
        match $p.ask($label)? {
            Some(v) => v,
            None => return Ok(Flow::Exit),
        }
    };
}

pub struct Session {
    registry: Registry,
    config: RegistryConfig,
}

impl Session {
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_registry(Registry::new(), config)
    }

    pub fn with_registry(registry: Registry, config: RegistryConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Run the menu until option 0 or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: W) -> io::Result<()> {
        let mut p = Prompter::new(input, out);
        if self.config.autoload {
            self.load(&mut p)?;
        }
        loop {
            p.say(MENU)?;
            let Some(choice) = p.ask("Select Option: ")? else {
                debug!("menu: end of input");
                return Ok(());
            };
            let flow = match MenuOption::parse(&choice) {
                Some(opt) => self.dispatch(opt, &mut p)?,
                None => {
                    p.say("Invalid option. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    pub fn dispatch<R: BufRead, W: Write>(
        &mut self,
        opt: MenuOption,
        p: &mut Prompter<R, W>,
    ) -> io::Result<Flow> {
        debug!("menu: {:?}", opt);
        match opt {
            MenuOption::AddStudent => {
                let name = field!(p, "Enter Name: ");
                let age_raw = field!(p, "Enter Age: ");
                let address = field!(p, "Enter Address: ");
                let student_id = field!(p, "Enter Student ID: ");
                let result = match parse_age(&age_raw) {
                    Ok(age) => self.registry.add_student(&name, age, &address, &student_id),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(s) => p.say(format!(
                        "Student {} (ID: {}) added successfully.",
                        s.name(),
                        s.student_id
                    ))?,
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::AddCourse => {
                let course_name = field!(p, "Enter Course Name: ");
                let course_code = field!(p, "Enter Course Code: ");
                let instructor = field!(p, "Enter Instructor Name: ");
                match self.registry.add_course(&course_name, &course_code, &instructor) {
                    Ok(c) => p.say(format!(
                        "Course {} (Code: {}) created with instructor {}.",
                        c.course_name, c.course_code, c.instructor
                    ))?,
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::Enroll => {
                let student_id = field!(p, "Enter Student ID: ");
                let course_code = field!(p, "Enter Course Code: ");
                match self.registry.enroll(&student_id, &course_code) {
                    Ok(course_name) => {
                        let name = self
                            .registry
                            .student(&student_id)
                            .map(|s| s.name().to_string())
                            .unwrap_or_default();
                        p.say(format!(
                            "Student {name} (ID: {student_id}) enrolled in {course_name} (Code: {course_code})."
                        ))?
                    }
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::AddGrade => {
                let student_id = field!(p, "Enter Student ID: ");
                let course_code = field!(p, "Enter Course Code: ");
                let grade = field!(p, "Enter Grade: ");
                match self.registry.add_grade(&student_id, &course_code, &grade) {
                    Ok(()) => {
                        let name = self
                            .registry
                            .student(&student_id)
                            .map(|s| s.name().to_string())
                            .unwrap_or_default();
                        p.say(format!("Grade {grade} added for {name} in {course_code}."))?
                    }
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::ShowStudent => {
                let student_id = field!(p, "Enter Student ID: ");
                match self.registry.get_student_details(&student_id) {
                    Ok(d) => p.say(d)?,
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::ShowCourse => {
                let course_code = field!(p, "Enter Course Code: ");
                match self.registry.get_course_details(&course_code) {
                    Ok(d) => p.say(d)?,
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::Save => {
                match self.registry.save(&self.config.data_file, self.config.pretty) {
                    Ok(_) => p.say("All student and course data saved successfully.")?,
                    Err(e) => report(p, &e)?,
                }
            }
            MenuOption::Load => self.load(p)?,
            MenuOption::Exit => {
                p.say("Exiting Student Management System. Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn load<R: BufRead, W: Write>(&mut self, p: &mut Prompter<R, W>) -> io::Result<()> {
        match self.registry.load(&self.config.data_file) {
            Ok(_) => p.say("Data loaded successfully."),
            Err(RegistryError::MissingFile(_)) => p.say("No previous data found, starting fresh."),
            Err(e) => report(p, &e),
        }
    }
}

fn report<R: BufRead, W: Write>(p: &mut Prompter<R, W>, e: &RegistryError) -> io::Result<()> {
    if e.is_rejection() {
        p.say(e)
    } else {
        p.say(format!("Error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_menu_options() {
        assert_eq!(MenuOption::parse("1"), Some(MenuOption::AddStudent));
        assert_eq!(MenuOption::parse(" 8 "), Some(MenuOption::Load));
        assert_eq!(MenuOption::parse("0"), Some(MenuOption::Exit));
        assert_eq!(MenuOption::parse("9"), None);
        assert_eq!(MenuOption::parse(""), None);
        assert_eq!(MenuOption::parse("one"), None);
    }
}
