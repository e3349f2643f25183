//! Logging facilities.
//!
//! The macros accept any value exposing `time()` and `name()` methods, such as [`Queue`](crate::Queue)
//! and [`PriorityQueue`](crate::PriorityQueue). Records are emitted with the name as log target, so
//! the output of individual queues can be filtered with `RUST_LOG=<queue name>=trace`.

use atty::Stream;
use colored::{Color, ColoredString, Colorize};

/// Applies the color to the string if stderr (log) goes to console.
pub fn get_colored(s: &str, color: Color) -> ColoredString {
    if atty::is(Stream::Stderr) {
        s.color(color)
    } else {
        s.normal()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_time {
    ($level:ident, $tag:expr, $color:ident, $src:expr, $format:expr $(, $arg:expr)*) => (
        log::$level!(
            target: $src.name(),
            concat!("[{:.3} {} {}] ", $format),
            $src.time(), $crate::log::get_colored($tag, $crate::colored::Color::$color), $src.name() $(, $arg)*
        )
    );
}

/// Logs a message at the info level.
///
/// # Examples
///
/// ```rust
/// use std::io::Write;
/// use env_logger::Builder;
/// use simcraft_queues::{log_info, Queue, SimulationClock};
///
/// // configure env_logger
/// Builder::from_default_env()
///     .format(|buf, record| writeln!(buf, "{}", record.args()))
///     .init();
///
/// let queue: Queue<u32> = Queue::new(SimulationClock::new(), 10).with_name("buffer");
/// log_info!(queue, "created with capacity {}", queue.capacity());
/// ```
#[macro_export]
macro_rules! log_info {
    ($src:expr, $format:expr $(, $arg:expr)* $(,)?) => (
        $crate::__log_with_time!(info, "INFO ", Green, $src, $format $(, $arg)*)
    );
}

/// Logs a message at the debug level.
///
/// # Examples
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_debug {
    ($src:expr, $format:expr $(, $arg:expr)* $(,)?) => (
        $crate::__log_with_time!(debug, "DEBUG", Blue, $src, $format $(, $arg)*)
    );
}

/// Logs a message at the trace level.
///
/// # Examples
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_trace {
    ($src:expr, $format:expr $(, $arg:expr)* $(,)?) => (
        $crate::__log_with_time!(trace, "TRACE", Cyan, $src, $format $(, $arg)*)
    );
}

/// Logs a message at the warn level.
///
/// # Examples
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_warn {
    ($src:expr, $format:expr $(, $arg:expr)* $(,)?) => (
        $crate::__log_with_time!(warn, "WARN ", Yellow, $src, $format $(, $arg)*)
    );
}

/// Logs a message at the error level.
///
/// # Examples
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_error {
    ($src:expr, $format:expr $(, $arg:expr)* $(,)?) => (
        $crate::__log_with_time!(error, "ERROR", Red, $src, $format $(, $arg)*)
    );
}
