//! Degrading environmental failures into fallback values.
//!
//! Hooks must never block a commit because the network is down, a tool is
//! missing or a cache file is read-only. Every such call site funnels its
//! `Result` through [`Fallback`] so the failure is logged once, at `debug`,
//! and replaced with the value the hook treats as "inconclusive".

use std::fmt::Display;

/// Extension trait mapping any error to a designated fallback value.
pub trait Fallback<T> {
    /// Returns the success value, or `fallback` if this is an error.
    fn or_fallback(self, context: &str, fallback: T) -> T;

    /// Returns the success value, or the result of `fallback` if this is an error.
    fn or_fallback_with(self, context: &str, fallback: impl FnOnce() -> T) -> T;
}

impl<T, E: Display> Fallback<T> for Result<T, E> {
    fn or_fallback(self, context: &str, fallback: T) -> T {
        self.or_fallback_with(context, || fallback)
    }

    fn or_fallback_with(self, context: &str, fallback: impl FnOnce() -> T) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "{context} failed, continuing without it");
                fallback()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[test]
    fn test_ok_passes_through() {
        let result: Result<u32, Error> = Ok(7);
        assert_eq!(result.or_fallback("count", 0), 7);
    }

    #[test]
    fn test_err_yields_fallback() {
        let result: Result<u32, Error> = Err(Error::NotGitRepo);
        assert_eq!(result.or_fallback("count", 0), 0);
    }

    #[test]
    fn test_fallback_with_is_lazy() {
        let calls = std::cell::Cell::new(0);
        let result: Result<String, std::io::Error> = Ok("tracked".to_string());
        let value = result.or_fallback_with("read", || {
            calls.set(calls.get() + 1);
            String::new()
        });
        assert_eq!(value, "tracked");
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_fallback_with_on_error() {
        let result: Result<bool, std::io::Error> = Err(std::io::Error::other("denied"));
        assert!(!result.or_fallback_with("probe", || false));
    }
}
