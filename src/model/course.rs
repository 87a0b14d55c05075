use std::fmt;

/// A course record. `students` is the roster of student ids in enrollment
/// order; every id resolves to an entry of the owning registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub course_name: String,
    pub course_code: String,
    pub instructor: String,
    pub students: Vec<String>,
}

impl Course {
    pub fn new(
        course_name: impl Into<String>,
        course_code: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            course_name: course_name.into(),
            course_code: course_code.into(),
            instructor: instructor.into(),
            students: Vec::new(),
        }
    }

    pub(crate) fn add_student(&mut self, student_id: &str) {
        self.students.push(student_id.to_string());
    }

    pub fn has_student(&self, student_id: &str) -> bool {
        self.students.iter().any(|s| s == student_id)
    }
}

/// Read-only projection returned by `Registry::get_course_details`.
/// Roster ids are resolved to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub course_name: String,
    pub course_code: String,
    pub instructor: String,
    pub student_ids: Vec<String>,
    pub student_names: Vec<String>,
}

impl fmt::Display for CourseDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Course Information:")?;
        writeln!(f, "Course Name: {}", self.course_name)?;
        writeln!(f, "Course Code: {}", self.course_code)?;
        writeln!(f, "Instructor: {}", self.instructor)?;
        write!(f, "Enrolled Students: {}", self.student_names.join(", "))
    }
}
