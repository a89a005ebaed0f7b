use crate::utils::error::{Result, SantaError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SantaError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// E.164 格式: '+' 加上 7 到 15 位數字
pub fn validate_phone_number(field_name: &str, phone: &str) -> Result<()> {
    let invalid = |reason: &str| SantaError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: phone.to_string(),
        reason: reason.to_string(),
    };

    let digits = phone
        .strip_prefix('+')
        .ok_or_else(|| invalid("Phone number must start with '+' and a country code"))?;

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("Phone number can only contain digits after '+'"));
    }

    if digits.len() < 7 || digits.len() > 15 {
        return Err(invalid("Phone number must have between 7 and 15 digits"));
    }

    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(SantaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("phone", "+12065550101").is_ok());
        assert!(validate_phone_number("phone", "+4420").is_err());
        assert!(validate_phone_number("phone", "12065550101").is_err());
        assert!(validate_phone_number("phone", "+1 206 555 0101").is_err());
        assert!(validate_phone_number("phone", "+1234567890123456").is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("names", ["Ann", "Bob"]).is_ok());
        assert!(validate_unique("names", ["Ann", "Bob", "Ann"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("count", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("count", &missing),
            Err(SantaError::MissingConfigError { .. })
        ));
    }
}
