use crate::utils::error::{CalcError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Every entry must be one of `allowed`, and the list must not repeat itself.
pub fn validate_choices(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    if values.is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: format!("At least one value required. Valid values: {}", allowed.join(", ")),
        });
    }

    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();
    let mut seen = HashSet::new();

    for value in values {
        if !allowed_set.contains(value.as_str()) {
            return Err(CalcError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
            });
        }
        if !seen.insert(value.as_str()) {
            return Err(CalcError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: "Value listed more than once".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Filename stems are joined onto the output directory, so they must stay inside it.
pub fn validate_file_stem(field_name: &str, stem: &str) -> Result<()> {
    validate_non_empty_string(field_name, stem)?;
    if stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(CalcError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: stem.to_string(),
            reason: "Filename must not contain path separators".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./out").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_choices() {
        let allowed = ["csv", "tsv", "json"];
        let ok = vec!["csv".to_string(), "json".to_string()];
        assert!(validate_choices("output.formats", &ok, &allowed).is_ok());

        let unknown = vec!["xlsx".to_string()];
        assert!(validate_choices("output.formats", &unknown, &allowed).is_err());

        let repeated = vec!["csv".to_string(), "csv".to_string()];
        assert!(validate_choices("output.formats", &repeated, &allowed).is_err());

        assert!(validate_choices("output.formats", &[], &allowed).is_err());
    }

    #[test]
    fn test_validate_file_stem() {
        assert!(validate_file_stem("output.filename", "report").is_ok());
        assert!(validate_file_stem("output.filename", "  ").is_err());
        assert!(validate_file_stem("output.filename", "../report").is_err());
        assert!(validate_file_stem("output.filename", "..").is_err());
    }
}
