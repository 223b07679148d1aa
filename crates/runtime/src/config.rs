pub const PROGRAM_NAME: &str = "filemeta";
pub const PROGRAM_LOG_LEVEL: &str = "FILEMETA_LOG_LEVEL";

/// Selects the content sniffing backend (`builtin` or `off`).
pub const SNIFFER_BACKEND_ENV: &str = "FILEMETA_SNIFFER";
/// Selects the EXIF parsing backend (`builtin` or `off`).
pub const EXIF_BACKEND_ENV: &str = "FILEMETA_EXIF";

pub const BUILTIN_BACKEND: &str = "builtin";

/// What the environment asks for when an optional backend is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSetting {
    /// Variable unset, empty, or `builtin`.
    Builtin,
    /// Explicitly switched off.
    Disabled,
    /// Anything we do not understand; carries the raw value.
    Invalid(String),
}

pub fn parse_backend_setting(raw: Option<&str>) -> BackendSetting {
    let Some(raw) = raw.map(str::trim) else {
        return BackendSetting::Builtin;
    };

    if raw.is_empty() || raw.eq_ignore_ascii_case(BUILTIN_BACKEND) {
        return BackendSetting::Builtin;
    }

    match raw.to_ascii_lowercase().as_str() {
        "off" | "none" | "0" | "false" => BackendSetting::Disabled,
        _ => BackendSetting::Invalid(raw.to_owned()),
    }
}

pub fn backend_setting(env_var: &str) -> BackendSetting {
    let value = std::env::var(env_var).ok();
    parse_backend_setting(value.as_deref())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
