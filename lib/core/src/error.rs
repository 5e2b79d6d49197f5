//! Error handling foundation for FinSmart.
//!
//! Only the `Result` alias lives here. Each crate defines its own domain
//! error enums and the application edge wraps them in rootcause reports,
//! adding its own context as errors propagate.

use rootcause::Report;

/// A Result type alias using rootcause's Report for error handling.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_type_works() {
        let ok: Result<u32> = Ok(7);
        assert!(matches!(ok, Ok(7)));
    }
}
