//! Composite key construction for samples

use crate::domain::error::AllocationError;

/// Separator between the experiment ID and each key part
///
/// Part of the allocation contract together with the part order.
pub const KEY_SEPARATOR: &str = ":";

/// Build the hash key `"{experiment_id}:{part_1}:...:{part_n}"`
///
/// Fails with [`AllocationError::InvalidInput`] when the experiment ID is
/// empty, no parts are given, or any part is empty.
pub fn compose_key<S: AsRef<str>>(
    experiment_id: &str,
    parts: &[S],
) -> Result<String, AllocationError> {
    if experiment_id.is_empty() {
        return Err(AllocationError::invalid_input("experiment ID cannot be empty"));
    }

    if parts.is_empty() {
        return Err(AllocationError::invalid_input(
            "at least one sample key part is required",
        ));
    }

    let mut key = String::from(experiment_id);

    for (index, part) in parts.iter().enumerate() {
        let part = part.as_ref();

        if part.is_empty() {
            return Err(AllocationError::invalid_input(format!(
                "sample key part {} is empty",
                index
            )));
        }

        key.push_str(KEY_SEPARATOR);
        key.push_str(part);
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_key() {
        let key = compose_key("exp-1", &["user", "user123"]).unwrap();
        assert_eq!(key, "exp-1:user:user123");
    }

    #[test]
    fn test_compose_key_single_part() {
        let key = compose_key("exp-1", &[String::from("user123")]).unwrap();
        assert_eq!(key, "exp-1:user123");
    }

    #[test]
    fn test_part_order_matters() {
        let a = compose_key("exp-1", &["a", "b"]).unwrap();
        let b = compose_key("exp-1", &["b", "a"]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_experiment_id() {
        let result = compose_key("", &["user123"]);
        assert!(matches!(result, Err(AllocationError::InvalidInput { .. })));
    }

    #[test]
    fn test_no_parts() {
        let parts: [&str; 0] = [];
        let result = compose_key("exp-1", &parts);
        assert!(matches!(result, Err(AllocationError::InvalidInput { .. })));
    }

    #[test]
    fn test_empty_part() {
        let result = compose_key("exp-1", &["user", ""]);
        match result {
            Err(AllocationError::InvalidInput { message }) => {
                assert_eq!(message, "sample key part 1 is empty")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
