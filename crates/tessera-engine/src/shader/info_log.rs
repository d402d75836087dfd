/// Maximum number of characters returned by a diagnostic log query.
///
/// Longer diagnostics are cut at this length by the query itself.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Returns `log` cut to at most [`INFO_LOG_CAPACITY`] characters.
pub(crate) fn bounded(log: String) -> String {
    match log.char_indices().nth(INFO_LOG_CAPACITY) {
        Some((cut, _)) => log[..cut].to_string(),
        None => log,
    }
}

/// Flattens an error and its `source()` chain into one line per cause.
pub(crate) fn describe(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        out.push_str("\n  caused by: ");
        out.push_str(&c.to_string());
        cause = c.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_logs_are_untouched() {
        assert_eq!(bounded("syntax error".to_string()), "syntax error");
        assert_eq!(bounded(String::new()), "");
    }

    #[test]
    fn long_logs_are_cut_at_capacity() {
        let log = "x".repeat(INFO_LOG_CAPACITY * 2);
        assert_eq!(bounded(log).chars().count(), INFO_LOG_CAPACITY);
    }

    #[test]
    fn cut_respects_char_boundaries() {
        let log = "é".repeat(INFO_LOG_CAPACITY + 10);
        let cut = bounded(log);
        assert_eq!(cut.chars().count(), INFO_LOG_CAPACITY);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn describe_walks_the_source_chain() {
        #[derive(Debug)]
        struct Outer(std::io::Error);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("function `vs_main` is invalid")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::other("type mismatch"));
        assert_eq!(
            describe(&err),
            "function `vs_main` is invalid\n  caused by: type mismatch"
        );
    }
}
