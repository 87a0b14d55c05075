//! Per-record decoders for the state file.
//!
//! Shape, types and the exact field set are checked by serde
//! (`deny_unknown_fields`); the age range and the key field are checked here.
//! Any failure becomes `MalformedRecord` naming the record key.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{RecordKind, RegistryError, RegistryResult};
use crate::model::{check_age, Course, Person, Student};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StudentEntry {
    name: String,
    age: u32,
    address: String,
    student_id: String,
    grades: BTreeMap<String, String>,
    courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CourseEntry {
    course_name: String,
    course_code: String,
    instructor: String,
    students: Vec<String>,
}

fn parse<'v, T: Deserialize<'v>>(kind: RecordKind, key: &str, v: &'v Value) -> RegistryResult<T> {
    T::deserialize(v).map_err(|e| RegistryError::malformed(kind, key, e.to_string()))
}

// The record's own key field must repeat the map key.
fn check_key(kind: RecordKind, key: &str, field: &str, value: &str) -> RegistryResult<()> {
    if value != key {
        return Err(RegistryError::malformed(
            kind,
            key,
            format!("{field} {value:?} does not match its key"),
        ));
    }
    Ok(())
}

pub fn decode_student(key: &str, v: &Value) -> RegistryResult<Student> {
    let e: StudentEntry = parse(RecordKind::Student, key, v)?;
    let age = check_age(e.age)
        .map_err(|_| RegistryError::malformed(RecordKind::Student, key, format!("age {} out of range", e.age)))?;
    check_key(RecordKind::Student, key, "student_id", &e.student_id)?;
    Ok(Student {
        person: Person {
            name: e.name,
            age,
            address: e.address,
        },
        student_id: e.student_id,
        grades: e.grades,
        courses: e.courses,
    })
}

pub fn decode_course(key: &str, v: &Value) -> RegistryResult<Course> {
    let e: CourseEntry = parse(RecordKind::Course, key, v)?;
    check_key(RecordKind::Course, key, "course_code", &e.course_code)?;
    Ok(Course {
        course_name: e.course_name,
        course_code: e.course_code,
        instructor: e.instructor,
        students: e.students,
    })
}
