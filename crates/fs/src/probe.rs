use serde::{Serialize, Serializer};

/// Outcome of reading one field of a file.
///
/// A failed probe keeps the literal marker the caller expects in place of
/// the value, and only turns into that string when serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Ok(T),
    Failed(&'static str),
}

impl<T> Probe<T> {
    pub fn from_result<E>(result: Result<T, E>, marker: &'static str) -> Self {
        match result {
            Ok(v) => Probe::Ok(v),
            Err(_) => Probe::Failed(marker),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Probe::Ok(_))
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            Probe::Ok(v) => Some(v),
            Probe::Failed(_) => None,
        }
    }
}

impl<T: Serialize> Serialize for Probe<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Probe::Ok(v) => v.serialize(serializer),
            Probe::Failed(marker) => serializer.serialize_str(marker),
        }
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
