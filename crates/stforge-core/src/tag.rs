//! Declared program variables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::interlock::{INTERLOCK_SIGNAL, INTERLOCK_TYPE};

/// A named, typed variable declared in program text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Name as first written in the source.
    pub name: String,
    /// Declared type as written (e.g. `BOOL`, `TON`).
    pub declared_type: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// The mandatory `E_STOP : BOOL` interlock tag.
    pub fn interlock() -> Self {
        Self::new(INTERLOCK_SIGNAL, INTERLOCK_TYPE)
    }

    /// Uniqueness key: the upper-cased name.
    pub fn key(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// True for a tag named `E_STOP` in any case.
    pub fn is_interlock(&self) -> bool {
        self.name.eq_ignore_ascii_case(INTERLOCK_SIGNAL)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {}", self.name, self.declared_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_case_normalized() {
        assert_eq!(Tag::new("Motor_Start", "BOOL").key(), "MOTOR_START");
    }

    #[test]
    fn interlock_tag() {
        let t = Tag::interlock();
        assert_eq!(t.to_string(), "E_STOP : BOOL");
        assert!(Tag::new("e_stop", "BOOL").is_interlock());
        assert!(!Tag::new("E_STOP_Reset", "BOOL").is_interlock());
    }
}
