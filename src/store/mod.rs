//! store — JSON state file for the registry.
//!
//! Формат (один документ):
//! {
//!   "students": {
//!     "<student_id>": {"name":"..","age":20,"address":"..","student_id":"..",
//!                      "grades":{"<course_code>":"A"},"courses":["<course name>", ..]}
//!   },
//!   "courses": {
//!     "<course_code>": {"course_name":"..","course_code":"..","instructor":"..",
//!                       "students":["<student_id>", ..]}
//!   }
//! }
//!
//! Замечания:
//! - Ростер курса хранит только id студентов; при загрузке каждый id обязан
//!   найтись среди студентов того же файла.
//! - Запись атомарная: <path>.tmp + rename.
//! - Чтение строгое: сначала декодируется весь файл, и только потом вызывающая
//!   сторона что-то меняет.

mod decode;

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{RecordKind, RegistryError, RegistryResult};
use crate::model::{Course, Student};
use crate::registry::Registry;

pub use decode::{decode_course, decode_student};

/// Borrowed view of a registry, shaped exactly like the file.
#[derive(Debug, Serialize)]
pub struct StateFile<'a> {
    students: BTreeMap<&'a str, StudentRecord<'a>>,
    courses: BTreeMap<&'a str, CourseRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct StudentRecord<'a> {
    name: &'a str,
    age: u32,
    address: &'a str,
    student_id: &'a str,
    grades: &'a BTreeMap<String, String>,
    courses: &'a [String],
}

#[derive(Debug, Serialize)]
struct CourseRecord<'a> {
    course_name: &'a str,
    course_code: &'a str,
    instructor: &'a str,
    students: &'a [String],
}

impl<'a> StateFile<'a> {
    pub fn capture(reg: &'a Registry) -> Self {
        let students = reg
            .students()
            .map(|s| {
                (
                    s.student_id.as_str(),
                    StudentRecord {
                        name: &s.person.name,
                        age: s.person.age,
                        address: &s.person.address,
                        student_id: &s.student_id,
                        grades: &s.grades,
                        courses: &s.courses,
                    },
                )
            })
            .collect();
        let courses = reg
            .courses()
            .map(|c| {
                (
                    c.course_code.as_str(),
                    CourseRecord {
                        course_name: &c.course_name,
                        course_code: &c.course_code,
                        instructor: &c.instructor,
                        students: &c.students,
                    },
                )
            })
            .collect();
        Self { students, courses }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize `state` and atomically replace `path`.
pub fn write_state(path: &Path, state: &StateFile<'_>, pretty: bool) -> RegistryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RegistryError::io(parent, e))?;
        }
    }

    let data = if pretty {
        serde_json::to_vec_pretty(state)?
    } else {
        serde_json::to_vec(state)?
    };

    let tmp = tmp_path(path);
    let written = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp)
        .and_then(|mut f| {
            f.write_all(&data)?;
            let _ = f.sync_all();
            Ok(())
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(RegistryError::io(&tmp, e));
    }

    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(RegistryError::io(path, e));
    }
    Ok(())
}

pub type Decoded = (BTreeMap<String, Student>, BTreeMap<String, Course>);

/// Read and fully decode `path`. A missing file is `MissingFile`.
pub fn read_state(path: &Path) -> RegistryResult<Decoded> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(RegistryError::MissingFile(path.to_path_buf()))
        }
        Err(e) => return Err(RegistryError::io(path, e)),
    };
    decode_state(path, &bytes)
}

/// Top-level shape as read back; records stay raw until decoded one by one
/// so a failure can name its key.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawState {
    students: BTreeMap<String, Value>,
    courses: BTreeMap<String, Value>,
}

/// Decode an in-memory copy of the file. `path` is only used in errors.
pub fn decode_state(path: &Path, bytes: &[u8]) -> RegistryResult<Decoded> {
    let raw: RawState = serde_json::from_slice(bytes).map_err(|e| RegistryError::MalformedFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut students = BTreeMap::new();
    for (key, v) in &raw.students {
        students.insert(key.clone(), decode_student(key, v)?);
    }

    let mut courses = BTreeMap::new();
    for (key, v) in &raw.courses {
        let course = decode_course(key, v)?;
        if let Some(missing) = course.students.iter().find(|id| !students.contains_key(*id)) {
            return Err(RegistryError::malformed(
                RecordKind::Course,
                key,
                format!("roster references unknown student {missing:?}"),
            ));
        }
        courses.insert(key.clone(), course);
    }

    Ok((students, courses))
}
