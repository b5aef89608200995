//! Color and emoji helpers for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const BOLD_RED: &'static str = "\x1b[1;31m";
    pub const BOLD_GREEN: &'static str = "\x1b[1;32m";
}

/// Output stream a line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn is_terminal(self) -> bool {
        use std::io::IsTerminal;

        match self {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Apply color to text bound for stdout if the terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    colorize_for(Stream::Stdout, text, color)
}

/// Apply color to text bound for stderr if the terminal supports it
pub fn colorize_err(text: &str, color: &str) -> String {
    colorize_for(Stream::Stderr, text, color)
}

fn colorize_for(stream: Stream, text: &str, color: &str) -> String {
    if supports_formatting(stream) {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Terminal capability detection for one output stream
pub fn supports_formatting(stream: Stream) -> bool {
    use std::env;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !stream.is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term.is_empty() || term == "dumb"),
        // Windows consoles and CI runners often leave TERM unset
        Err(_) => env::var("CI").is_ok() || env::var("WT_SESSION").is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let saved: Vec<_> = vars
            .iter()
            .map(|(key, _)| (*key, std::env::var(key).ok()))
            .collect();
        unsafe {
            for (key, value) in vars {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
        f();
        unsafe {
            for (key, value) in saved {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_colorize_with_no_color() {
        with_env(&[("NO_COLOR", Some("1"))], || {
            assert_eq!(colorize("test", Colors::RED), "test");
        });
    }

    #[test]
    #[serial]
    fn test_colorize_err_with_no_color() {
        with_env(&[("NO_COLOR", Some("1")), ("FORCE_COLOR", Some("1"))], || {
            assert_eq!(colorize_err("broken", Colors::RED), "broken");
        });
    }

    #[test]
    #[serial]
    fn test_force_color_enables_stderr() {
        with_env(&[("NO_COLOR", None), ("FORCE_COLOR", Some("1"))], || {
            assert!(supports_formatting(Stream::Stderr));
            assert_eq!(
                colorize_err("broken", Colors::RED),
                format!("{}broken{}", Colors::RED, Colors::RESET)
            );
        });
    }

    #[test]
    #[serial]
    fn test_force_color_zero_disables() {
        with_env(&[("NO_COLOR", None), ("FORCE_COLOR", Some("0"))], || {
            assert!(!supports_formatting(Stream::Stdout));
            assert!(!supports_formatting(Stream::Stderr));
        });
    }

    #[test]
    #[serial]
    fn test_force_color_enables() {
        with_env(&[("NO_COLOR", None), ("FORCE_COLOR", Some("1"))], || {
            assert_eq!(
                colorize("ok", Colors::GREEN),
                format!("{}ok{}", Colors::GREEN, Colors::RESET)
            );
        });
    }

    #[test]
    #[serial]
    fn test_disabled_under_test_even_with_capable_term() {
        with_env(
            &[
                ("NO_COLOR", None),
                ("FORCE_COLOR", None),
                ("TERM", Some("xterm-256color")),
            ],
            || {
                assert!(!supports_formatting(Stream::Stdout));
                assert!(!supports_formatting(Stream::Stderr));
                assert_eq!(colorize_err("plain", Colors::BOLD_RED), "plain");
            },
        );
    }

    #[test]
    fn test_color_constants() {
        assert_eq!(Colors::RESET, "\x1b[0m");
        assert_eq!(Colors::RED, "\x1b[31m");
        assert_eq!(Colors::GREEN, "\x1b[32m");
        assert_eq!(Colors::BOLD_RED, "\x1b[1;31m");
        assert_eq!(Colors::BOLD_GREEN, "\x1b[1;32m");
    }
}
