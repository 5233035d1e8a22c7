/// Prints a trace line to stderr when `LRE_DEBUG_RULES` is set, mirroring
/// this codebase's long-standing env-var-gated diagnostic tracing in place
/// of a logging crate.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if std::env::var_os("LRE_DEBUG_RULES").is_some() {
            eprintln!($($arg)*);
        }
    };
}

/// Compiles `$pat` into a `Regex` exactly once per call site.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
