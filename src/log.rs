use std::fmt::Arguments;
use std::sync::{Arc, OnceLock};

/// Handle to the process-wide logger. Does nothing if no logger has been installed.
#[derive(Clone)]
pub struct GlobalLogger {
    inner: Option<Arc<dyn Logger>>
}

impl Logger for GlobalLogger {
    fn log(&self, status: LogStatus, args: Arguments<'_>) {
        if let Some(ref logger) = self.inner {
            logger.log(status, args)
        }
    }
}

static GLOBAL_LOGGER: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Installs the global logger. Only the first call has any effect.
pub fn set_global(logger: impl Logger + 'static) {
    let _ = GLOBAL_LOGGER.set(Arc::new(logger));
}

/// Gets the global logger.
pub fn global() -> GlobalLogger {
    GlobalLogger { inner: GLOBAL_LOGGER.get().cloned() }
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if cfg!(feature = "log-debug") {
            $crate::log::Logger::debug(&$crate::log::global(), format_args!($($arg)*))
        }
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if cfg!(feature = "log-info") {
            $crate::log::Logger::info(&$crate::log::global(), format_args!($($arg)*))
        }
    }
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if cfg!(feature = "log-warn") {
            $crate::log::Logger::warn(&$crate::log::global(), format_args!($($arg)*))
        }
    }
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        if cfg!(feature = "log-error") {
            $crate::log::Logger::error(&$crate::log::global(), format_args!($($arg)*))
        }
    }
}

#[derive(std::fmt::Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogStatus {
    Debug,
    Info,
    Warn,
    Error,
}

pub trait Logger: Sync + Send {
    fn log(&self, status: LogStatus, args: Arguments<'_>);

    fn debug(&self, args: Arguments<'_>) {
        self.log(LogStatus::Debug, args)
    }

    fn info(&self, args: Arguments<'_>) {
        self.log(LogStatus::Info, args)
    }

    fn warn(&self, args: Arguments<'_>) {
        self.log(LogStatus::Warn, args)
    }

    fn error(&self, args: Arguments<'_>) {
        self.log(LogStatus::Error, args)
    }
}
