/// Similar to `info!` macro in tracing.
/// You can pass in the starting time and the event will carry how long it took from starting time to now.
/// ```ignore
/// info_time!("str {}, {}", 1, 2);
/// let time = Local::now();
/// info_time!(time, "str {}, {}", 1, 2);
/// ```
#[macro_export]
macro_rules! info_time {
    ($time:ident, $($arg:tt)+) => {{
        let run_time = (::chrono::Local::now() - $time)
            .num_microseconds()
            .map(|n| n as f64 / 1_000_000.0)
            .unwrap_or(0.0);
        ::tracing::info!(runtime_secs = run_time, $($arg)+);
    }};
    ($($arg:tt)+) => {{
        ::tracing::info!($($arg)+);
    }};
}
