/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("scan", "{} file(s) checked", total);
/// log_status!("apply", "{} updated, {} failed", updated, failed);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;
pub mod tty;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `idswap::scan` instead of `idswap::core::scan`
pub use core::*;
pub use utils::*;
