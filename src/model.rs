// File: ./src/model.rs
// Reminder document model: decoding and the day-of-month filter.
use serde::{Deserialize, Serialize};

/// One (day, message) record from the remote document.
///
/// `day` is the day-of-month the reminder fires on (1-31 by convention,
/// unchecked against any real calendar). An absent `day` can never match
/// and simply excludes the entry; an absent `message` decodes as the
/// empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReminderEntry {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub message: String,
}

/// Decode the remote document body into an ordered reminder set.
///
/// The body must be a JSON array of objects; anything else is a hard
/// decode failure. Either the complete set decodes or nothing does.
pub fn decode(body: &str) -> Result<Vec<ReminderEntry>, serde_json::Error> {
    serde_json::from_str(body)
}

/// Select the messages of entries due on `today`, preserving source order
/// and duplicates. Pure projection; never mutates its input.
pub fn due_on(entries: &[ReminderEntry], today: u32) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.day == Some(today))
        .map(|e| e.message.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(day: u32, message: &str) -> ReminderEntry {
        ReminderEntry {
            day: Some(day),
            message: message.to_string(),
        }
    }

    #[test]
    fn decodes_well_formed_document() {
        let entries = decode(r#"[{"day": 10, "message": "Pay rent"}, {"day": 28, "message": ""}]"#)
            .unwrap();
        assert_eq!(entries, vec![entry(10, "Pay rent"), entry(28, "")]);
    }

    #[test]
    fn absent_fields_degrade_gracefully() {
        let entries = decode(r#"[{"day": 3}, {"message": "no day"}, {}]"#).unwrap();
        assert_eq!(entries[0], entry(3, ""));
        assert_eq!(entries[1].day, None);
        assert_eq!(entries[1].message, "no day");
        assert_eq!(entries[2], ReminderEntry { day: None, message: String::new() });
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let entries = decode(r#"[{"day": 5, "message": "x", "priority": "high"}]"#).unwrap();
        assert_eq!(entries, vec![entry(5, "x")]);
    }

    #[test]
    fn non_array_document_is_a_decode_failure() {
        assert!(decode(r#"{"day": 10, "message": "x"}"#).is_err());
        assert!(decode(r#""just a string""#).is_err());
        assert!(decode("not json at all").is_err());
    }

    #[test]
    fn filter_selects_matching_days_in_order_with_duplicates() {
        let entries = vec![
            entry(10, "A"),
            entry(15, "B"),
            entry(10, "C"),
            entry(10, "A"),
        ];
        assert_eq!(due_on(&entries, 10), vec!["A", "C", "A"]);
        assert_eq!(due_on(&entries, 15), vec!["B"]);
        assert_eq!(due_on(&entries, 28), Vec::<String>::new());
    }

    #[test]
    fn filter_of_empty_set_is_empty_for_any_day() {
        for day in 1..=31 {
            assert!(due_on(&[], day).is_empty());
        }
    }

    #[test]
    fn entries_without_day_never_match() {
        let entries = vec![ReminderEntry { day: None, message: "orphan".to_string() }];
        for day in 1..=31 {
            assert!(due_on(&entries, day).is_empty());
        }
    }

    #[test]
    fn filter_is_pure_and_idempotent() {
        let entries = vec![entry(10, "A"), entry(11, "B")];
        let before = entries.clone();
        let first = due_on(&entries, 10);
        let second = due_on(&entries, 10);
        assert_eq!(first, second);
        assert_eq!(entries, before);
    }
}
