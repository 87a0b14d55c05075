//! Registry — the in-memory owner of all student and course records.
//!
//! Правила:
//! - ключи уникальны (student_id / course_code), повторное добавление отклоняется;
//! - запись в курс симметрична: имя курса у студента + id студента в ростере курса;
//! - каждая операция либо применяется целиком, либо не меняет ничего.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{RegistryError, RegistryResult};
use crate::model::course::CourseDetails;
use crate::model::student::StudentDetails;
use crate::model::{Course, Person, Student};
use crate::store::{self, StateFile};

/// Counts reported by save/load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registry {
    students: BTreeMap<String, Student>,
    courses: BTreeMap<String, Course>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
        student_id: &str,
    ) -> RegistryResult<&Student> {
        if self.students.contains_key(student_id) {
            return Err(RegistryError::DuplicateStudent(student_id.to_string()));
        }
        let person = Person::new(name, age, address)?;
        debug!("add_student: id={} name={}", student_id, name);
        let student = self
            .students
            .entry(student_id.to_string())
            .or_insert_with(|| Student::new(person, student_id));
        Ok(student)
    }

    pub fn add_course(
        &mut self,
        course_name: &str,
        course_code: &str,
        instructor: &str,
    ) -> RegistryResult<&Course> {
        if self.courses.contains_key(course_code) {
            return Err(RegistryError::DuplicateCourse(course_code.to_string()));
        }
        debug!("add_course: code={} name={}", course_code, course_name);
        let course = self
            .courses
            .entry(course_code.to_string())
            .or_insert_with(|| Course::new(course_name, course_code, instructor));
        Ok(course)
    }

    /// Enroll a student; re-enrolling the same pair appends again.
    /// Returns the course name that was appended to the student's list.
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> RegistryResult<String> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.to_string()))?;
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound(course_code.to_string()))?;

        student.enroll_course(&course.course_name);
        course.add_student(student_id);
        debug!("enroll: {} -> {}", student_id, course_code);
        Ok(course.course_name.clone())
    }

    /// Set (or overwrite) a grade. The student must already be on the
    /// course roster.
    pub fn add_grade(&mut self, student_id: &str, course_code: &str, grade: &str) -> RegistryResult<()> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.to_string()))?;
        let course = self
            .courses
            .get(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound(course_code.to_string()))?;

        if !course.has_student(student_id) {
            return Err(RegistryError::NotEnrolled {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        student.set_grade(course_code, grade);
        debug!("add_grade: {} {} = {}", student_id, course_code, grade);
        Ok(())
    }

    pub fn get_student_details(&self, student_id: &str) -> RegistryResult<StudentDetails> {
        self.students
            .get(student_id)
            .map(StudentDetails::from)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.to_string()))
    }

    pub fn get_course_details(&self, course_code: &str) -> RegistryResult<CourseDetails> {
        let course = self
            .courses
            .get(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound(course_code.to_string()))?;

        let student_names = course
            .students
            .iter()
            .map(|id| match self.students.get(id) {
                Some(s) => s.name().to_string(),
                None => id.clone(),
            })
            .collect();

        Ok(CourseDetails {
            course_name: course.course_name.clone(),
            course_code: course.course_code.clone(),
            instructor: course.instructor.clone(),
            student_ids: course.students.clone(),
            student_names,
        })
    }

    /// Write the whole registry to `path`, replacing any existing file.
    pub fn save(&self, path: &Path, pretty: bool) -> RegistryResult<Summary> {
        let state = StateFile::capture(self);
        store::write_state(path, &state, pretty)?;
        let summary = self.summary();
        info!(
            "saved {} student(s), {} course(s) to {}",
            summary.students,
            summary.courses,
            path.display()
        );
        Ok(summary)
    }

    /// Read `path` and merge it in: records from the file replace in-memory
    /// records with the same key, everything else is kept. The file is fully
    /// decoded before anything is touched.
    pub fn load(&mut self, path: &Path) -> RegistryResult<Summary> {
        let (students, courses) = store::read_state(path)?;

        let summary = Summary {
            students: students.len(),
            courses: courses.len(),
            enrollments: courses.values().map(|c| c.students.len()).sum(),
        };

        for (id, s) in students {
            if self.students.insert(id.clone(), s).is_some() {
                debug!("load: replaced student {}", id);
            }
        }
        for (code, c) in courses {
            if self.courses.insert(code.clone(), c).is_some() {
                debug!("load: replaced course {}", code);
            }
        }

        self.warn_on_roster_mismatch();
        info!(
            "loaded {} student(s), {} course(s) from {}",
            summary.students,
            summary.courses,
            path.display()
        );
        Ok(summary)
    }

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    pub fn course(&self, course_code: &str) -> Option<&Course> {
        self.courses.get(course_code)
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            students: self.students.len(),
            courses: self.courses.len(),
            enrollments: self.courses.values().map(|c| c.students.len()).sum(),
        }
    }

    /// (student_id, course_code) pairs holding a grade for a course whose
    /// roster no longer lists the student. Only a merging load produces these.
    pub fn orphaned_grades(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for s in self.students.values() {
            for code in s.grades.keys() {
                let on_roster = self
                    .courses
                    .get(code)
                    .is_some_and(|c| c.has_student(&s.student_id));
                if !on_roster {
                    out.push((s.student_id.clone(), code.clone()));
                }
            }
        }
        out
    }

    // A merge can pair students from the file with rosters kept in memory
    // (or the other way round); the counts then drift apart.
    fn warn_on_roster_mismatch(&self) {
        let mut listed: BTreeMap<&str, usize> = BTreeMap::new();
        for c in self.courses.values() {
            for id in &c.students {
                *listed.entry(id.as_str()).or_insert(0) += 1;
            }
        }
        for s in self.students.values() {
            let on_rosters = listed.get(s.student_id.as_str()).copied().unwrap_or(0);
            if on_rosters != s.courses.len() {
                warn!(
                    "student {} lists {} course(s) but appears on {} roster(s)",
                    s.student_id,
                    s.courses.len(),
                    on_rosters
                );
            }
        }
        for (student_id, course_code) in self.orphaned_grades() {
            warn!(
                "student {} has a grade for {} but is not on its roster",
                student_id, course_code
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut r = Registry::new();
        r.add_student("Ana", 20, "Addr1", "S1").unwrap();
        r.add_course("Algo", "C1", "Dr.X").unwrap();
        r
    }

    #[test]
    fn add_grade_checks_student_before_enrollment() {
        let mut r = sample();
        match r.add_grade("S9", "C1", "A") {
            Err(RegistryError::StudentNotFound(id)) => assert_eq!(id, "S9"),
            other => panic!("unexpected {other:?}"),
        }
        match r.add_grade("S1", "C1", "A") {
            Err(RegistryError::NotEnrolled { student_id, course_code }) => {
                assert_eq!(student_id, "S1");
                assert_eq!(course_code, "C1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn course_details_resolve_names() {
        let mut r = sample();
        r.add_student("Bo", 22, "Addr2", "S2").unwrap();
        r.enroll("S2", "C1").unwrap();
        r.enroll("S1", "C1").unwrap();
        let d = r.get_course_details("C1").unwrap();
        assert_eq!(d.student_ids, vec!["S2", "S1"]);
        assert_eq!(d.student_names, vec!["Bo", "Ana"]);
        assert!(d.to_string().ends_with("Enrolled Students: Bo, Ana"));
    }

    #[test]
    fn summary_counts_enrollments() {
        let mut r = sample();
        r.enroll("S1", "C1").unwrap();
        r.enroll("S1", "C1").unwrap();
        let s = r.summary();
        assert_eq!((s.students, s.courses, s.enrollments), (1, 1, 2));
    }
}
