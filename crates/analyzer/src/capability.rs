use filemeta_runtime::{BackendSetting, backend_setting};

/// An optional backend, resolved once at startup and injected into the
/// component that uses it.
#[derive(Debug)]
pub enum Capability<T> {
    Available(T),
    /// Not compiled in, or switched off.
    Unavailable,
    /// Requested but unusable; carries the reason.
    Misconfigured(String),
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

/// Resolve a backend from its environment switch.
///
/// `compiled` is only consulted when the environment asks for the builtin
/// backend; it yields `None` when that backend was left out of the build.
pub fn resolve_backend<T>(
    env_var: &str,
    label: &str,
    compiled: impl FnOnce() -> Option<T>,
) -> Capability<T> {
    resolve_setting(backend_setting(env_var), env_var, label, compiled)
}

pub(crate) fn resolve_setting<T>(
    setting: BackendSetting,
    env_var: &str,
    label: &str,
    compiled: impl FnOnce() -> Option<T>,
) -> Capability<T> {
    match setting {
        BackendSetting::Disabled => Capability::Unavailable,
        BackendSetting::Invalid(raw) => {
            Capability::Misconfigured(format!("unknown {label} backend '{raw}' in {env_var}"))
        }
        BackendSetting::Builtin => match compiled() {
            Some(backend) => Capability::Available(backend),
            None => Capability::Unavailable,
        },
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
