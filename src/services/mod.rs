pub mod matches;
pub mod players;

pub use matches::MatchService;
pub use players::PlayerService;

use uuid::Uuid;

use crate::error::AppError;

/// Parse a client-supplied identifier, naming the field in the error
pub(crate) fn parse_uuid(field: &str, raw: &str) -> Result<Uuid, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::invalid_argument(format!("{} is required", field)));
    }
    Uuid::parse_str(raw)
        .map_err(|_| AppError::invalid_argument(format!("{} '{}' is not a valid UUID", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid_accepts_hyphenated_and_padded_input() {
        let uuid = Uuid::new_v4();
        assert_eq!(parse_uuid("playerUuid", &uuid.to_string()).unwrap(), uuid);
        assert_eq!(
            parse_uuid("playerUuid", &format!("  {}  ", uuid)).unwrap(),
            uuid
        );
    }

    #[test]
    fn test_parse_uuid_rejects_blank_and_garbage() {
        let blank = parse_uuid("playerUuid", "   ").unwrap_err();
        assert_eq!(blank.to_string(), "playerUuid is required");

        let garbage = parse_uuid("playerUuid", "not-a-uuid").unwrap_err();
        assert!(matches!(garbage, AppError::InvalidArgument(_)));
        assert!(garbage.to_string().contains("not-a-uuid"));
    }
}
