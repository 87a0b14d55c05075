//! model — record types held by the registry.
//!
//! - Person: name/age/address shared by everyone the registry knows about.
//! - Student: a Person plus id, grades and enrolled course names.
//! - Course: name/code/instructor plus a roster of student ids.

pub mod course;
pub mod student;

pub use course::Course;
pub use student::Student;

use crate::error::{RegistryError, RegistryResult};

/// Upper bound accepted for `Person::age`.
pub const MAX_AGE: u32 = 150;

/// Person-shaped fields. Students embed this instead of extending it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub address: String,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32, address: impl Into<String>) -> RegistryResult<Self> {
        let age = check_age(age)?;
        Ok(Self {
            name: name.into(),
            age,
            address: address.into(),
        })
    }
}

/// Reject ages outside 0..=MAX_AGE.
pub fn check_age(age: u32) -> RegistryResult<u32> {
    if age > MAX_AGE {
        return Err(RegistryError::InvalidAge(age.to_string()));
    }
    Ok(age)
}

/// Parse an age typed by the user ("20", " 20 ").
pub fn parse_age(raw: &str) -> RegistryResult<u32> {
    let s = raw.trim();
    let age = s
        .parse::<u32>()
        .map_err(|_| RegistryError::InvalidAge(s.to_string()))?;
    check_age(age)
}
