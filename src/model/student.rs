use std::collections::BTreeMap;
use std::fmt;

use super::Person;

/// A student record. Grades are keyed by course code, `courses` holds course
/// names in enrollment order (re-enrolling appends again).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub person: Person,
    pub student_id: String,
    pub grades: BTreeMap<String, String>,
    pub courses: Vec<String>,
}

impl Student {
    pub fn new(person: Person, student_id: impl Into<String>) -> Self {
        Self {
            person,
            student_id: student_id.into(),
            grades: BTreeMap::new(),
            courses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.person.name
    }

    pub(crate) fn enroll_course(&mut self, course_name: &str) {
        self.courses.push(course_name.to_string());
    }

    pub(crate) fn set_grade(&mut self, course_code: &str, grade: &str) {
        self.grades.insert(course_code.to_string(), grade.to_string());
    }
}

/// Read-only projection returned by `Registry::get_student_details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub address: String,
    pub courses: Vec<String>,
    pub grades: BTreeMap<String, String>,
}

impl From<&Student> for StudentDetails {
    fn from(s: &Student) -> Self {
        Self {
            student_id: s.student_id.clone(),
            name: s.person.name.clone(),
            age: s.person.age,
            address: s.person.address.clone(),
            courses: s.courses.clone(),
            grades: s.grades.clone(),
        }
    }
}

impl fmt::Display for StudentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Student Information:")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "ID: {}", self.student_id)?;
        writeln!(f, "Age: {}", self.age)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Enrolled Courses: {}", self.courses.join(", "))?;
        let grades: Vec<String> = self
            .grades
            .iter()
            .map(|(code, g)| format!("{code}: {g}"))
            .collect();
        write!(f, "Grades: {{{}}}", grades.join(", "))
    }
}
