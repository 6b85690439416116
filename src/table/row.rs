//! Row - the fixed-layout record stored in a table.
//!
//! # Layout (293 bytes)
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       4     id (u32, little-endian)
//! 4       33    username (≤32 bytes of text, NUL-padded)
//! 37      256   email (≤255 bytes of text, NUL-padded)
//! ```
//!
//! Fields are packed back to back with no alignment padding.

use std::fmt;

use crate::common::config::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE,
    ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};
use crate::common::{Error, Result};

/// A single table record.
///
/// Text columns are validated on construction, so every `Row` fits the
/// on-disk layout.
///
/// # Example
/// ```
/// use pagedb::Row;
/// use pagedb::common::config::ROW_SIZE;
///
/// let row = Row::new(1, "alice", "alice@example.com").unwrap();
/// let mut buf = [0u8; ROW_SIZE];
/// row.encode(&mut buf);
/// assert_eq!(Row::decode(&buf), row);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Create a row, checking that both text columns fit their fields.
    ///
    /// # Errors
    /// - `Error::StringTooLong` if a column exceeds its byte capacity
    /// - `Error::NulInString` if a column contains a NUL byte
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();

        check_text("username", &username, COLUMN_USERNAME_SIZE)?;
        check_text("email", &email, COLUMN_EMAIL_SIZE)?;

        Ok(Self {
            id,
            username,
            email,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[inline]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Serialize this row into a `ROW_SIZE` slot.
    ///
    /// Unused bytes of each text field are zeroed, so whatever the slot held
    /// before is fully overwritten.
    ///
    /// # Panics
    /// Panics if `dest.len() != ROW_SIZE`.
    pub fn encode(&self, dest: &mut [u8]) {
        assert_eq!(dest.len(), ROW_SIZE, "row slot has wrong size");

        dest[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_text(
            &mut dest[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_text(&mut dest[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Deserialize a row from a `ROW_SIZE` slot.
    ///
    /// Text ends at the first NUL in its field. Bytes that are not valid
    /// UTF-8 are replaced rather than rejected.
    ///
    /// # Panics
    /// Panics if `src.len() != ROW_SIZE`.
    pub fn decode(src: &[u8]) -> Self {
        assert_eq!(src.len(), ROW_SIZE, "row slot has wrong size");

        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

        Self {
            id: u32::from_le_bytes(id),
            username: read_text(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_text(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn check_text(column: &'static str, text: &str, max: usize) -> Result<()> {
    if text.len() > max {
        return Err(Error::StringTooLong {
            column,
            len: text.len(),
            max,
        });
    }
    if text.as_bytes().contains(&0) {
        return Err(Error::NulInString { column });
    }
    Ok(())
}

fn write_text(field: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    field[..bytes.len()].copy_from_slice(bytes);
    field[bytes.len()..].fill(0);
}

fn read_text(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_layout() {
        let row = Row::new(0x0102_0304, "bob", "b@x.io").unwrap();
        let mut buf = [0xFFu8; ROW_SIZE];
        row.encode(&mut buf);

        assert_eq!(&buf[0..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buf[4..7], b"bob");
        assert!(buf[7..37].iter().all(|&b| b == 0));
        assert_eq!(&buf[37..43], b"b@x.io");
        assert!(buf[43..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_maximum_length_strings() {
        let username = "u".repeat(COLUMN_USERNAME_SIZE);
        let email = "e".repeat(COLUMN_EMAIL_SIZE);
        let row = Row::new(u32::MAX, username.as_str(), email.as_str()).unwrap();

        let mut buf = [0u8; ROW_SIZE];
        row.encode(&mut buf);

        // Terminator byte is still present at the end of each field
        assert_eq!(buf[EMAIL_OFFSET - 1], 0);
        assert_eq!(buf[ROW_SIZE - 1], 0);

        let decoded = Row::decode(&buf);
        assert_eq!(decoded.username(), username);
        assert_eq!(decoded.email(), email);
        assert_eq!(decoded.id(), u32::MAX);
    }

    #[test]
    fn test_string_too_long() {
        let err = Row::new(1, "a".repeat(COLUMN_USERNAME_SIZE + 1), "x").unwrap_err();
        assert!(matches!(
            err,
            Error::StringTooLong {
                column: "username",
                len: 33,
                max: 32
            }
        ));
        assert!(!err.is_fatal());

        let err = Row::new(1, "a", "e".repeat(COLUMN_EMAIL_SIZE + 1)).unwrap_err();
        assert!(matches!(err, Error::StringTooLong { column: "email", .. }));
    }

    #[test]
    fn test_length_is_counted_in_bytes() {
        // 11 three-byte characters = 33 bytes
        let username = "€".repeat(11);
        assert!(Row::new(1, username, "x").is_err());

        let row = Row::new(1, "€".repeat(10), "ü@example.com").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        row.encode(&mut buf);
        assert_eq!(Row::decode(&buf), row);
    }

    #[test]
    fn test_nul_rejected() {
        let err = Row::new(1, "a\0b", "x").unwrap_err();
        assert!(matches!(err, Error::NulInString { column: "username" }));
    }

    #[test]
    fn test_encode_overwrites_previous_contents() {
        let mut buf = [0u8; ROW_SIZE];
        Row::new(1, "longer-name", "longer@example.com")
            .unwrap()
            .encode(&mut buf);
        Row::new(2, "ab", "c").unwrap().encode(&mut buf);

        let decoded = Row::decode(&buf);
        assert_eq!(decoded.username(), "ab");
        assert_eq!(decoded.email(), "c");
    }

    #[test]
    fn test_decode_zeroed_slot() {
        let row = Row::decode(&[0u8; ROW_SIZE]);
        assert_eq!(row.id(), 0);
        assert_eq!(row.username(), "");
        assert_eq!(row.email(), "");
    }

    #[test]
    #[should_panic(expected = "row slot has wrong size")]
    fn test_encode_wrong_slot_size() {
        let row = Row::new(1, "a", "b").unwrap();
        let mut buf = [0u8; ROW_SIZE - 1];
        row.encode(&mut buf);
    }

    #[test]
    fn test_display() {
        let row = Row::new(1, "user1", "person1@example.com").unwrap();
        assert_eq!(row.to_string(), "(1, user1, person1@example.com)");
    }

    proptest! {
        #[test]
        fn prop_encode_decode_inverse(
            id in any::<u32>(),
            username in "[a-zA-Z0-9_.-]{0,32}",
            email in "[a-zA-Z0-9_.@+-]{0,255}",
        ) {
            let row = Row::new(id, username, email).unwrap();
            let mut buf = [0u8; ROW_SIZE];
            row.encode(&mut buf);
            prop_assert_eq!(Row::decode(&buf), row);
        }
    }
}
