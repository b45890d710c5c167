use crate::Config;

/// Capture the current call stack as a single unsplit block.
/// [`normalize`] takes care of splitting it into frames.
pub(crate) fn capture() -> Vec<String> {
    vec![std::backtrace::Backtrace::force_capture().to_string()]
}

/// Split a raw backtrace into frame lines and run every line through the
/// configured filter chain.
///
/// A one-element input is treated as one unsplit block: it is split on
/// newlines, each piece trimmed and blank pieces dropped. Anything else is
/// taken as already split. Each line is threaded through the full filter
/// chain before the next line is looked at.
pub(crate) fn normalize(backtrace: Vec<String>, config: &Config) -> Vec<String> {
    let lines: Vec<String> = if backtrace.len() == 1 {
        backtrace[0]
            .split('\n')
            .map(|line| line.trim().to_owned())
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        backtrace
    };
    lines
        .into_iter()
        .map(|line| config.filter_line(&line))
        .collect()
}
