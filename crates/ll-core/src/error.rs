use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Degenerate bounds: min {min} is not below max {max}")]
    DegenerateBounds { min: f64, max: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_offender() {
        let e = CoreError::NonFinite {
            what: "kp",
            value: f64::NAN,
        };
        assert!(e.to_string().contains("kp"));

        let e = CoreError::DegenerateBounds { min: 5.0, max: 5.0 };
        assert!(e.to_string().contains('5'));
    }
}
