mod config;
pub mod logging;

pub use config::{
    BUILTIN_BACKEND, BackendSetting, EXIF_BACKEND_ENV, PROGRAM_LOG_LEVEL, PROGRAM_NAME,
    SNIFFER_BACKEND_ENV, backend_setting, parse_backend_setting,
};

pub use logging::init;
