//! Logging macros used across the workspace.
//!
//! Thin wrappers over `tracing`. [`success!`] logs at `INFO` under
//! [`SUCCESS_TARGET`] so a front-end can render it apart from regular info.

pub const SUCCESS_TARGET: &str = "presence::success";
pub const PRINT_TARGET: &str = "presence::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::__tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::__tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::__tracing::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "presence::success", $($arg)*)
    };
}
