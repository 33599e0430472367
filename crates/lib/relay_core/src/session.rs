//! Cosmetic client session.
//!
//! There is no authentication. A session is derived from whatever email the
//! user types and lives only as long as the client does. It is a plain value:
//! logging in again builds a new one instead of mutating the old.

use crate::envelope::DEFAULT_DISPLAY_NAME;

/// Sender id used when the display name has no usable characters.
pub const FALLBACK_DISPLAY_ID: &str = "doctor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub display_name: String,
    pub display_id: String,
    pub webhook_url: Option<String>,
}

impl Session {
    /// Derives the display name and id from an email address.
    pub fn from_email(email: &str, webhook_url: Option<String>) -> Self {
        let local = email.trim().split('@').next().unwrap_or_default().trim();
        let display_name = if local.is_empty() {
            DEFAULT_DISPLAY_NAME.to_string()
        } else {
            local.to_string()
        };
        Self {
            display_id: display_id_for(&display_name),
            display_name,
            webhook_url: webhook_url.filter(|u| !u.is_empty()),
        }
    }
}

/// ASCII letters and digits of the display name, or [`FALLBACK_DISPLAY_ID`].
pub fn display_id_for(display_name: &str) -> String {
    let slug: String = display_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if slug.is_empty() {
        FALLBACK_DISPLAY_ID.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_local_part_of_email() {
        let s = Session::from_email("ana.souza@clinic.com", None);
        assert_eq!(s.display_name, "ana.souza");
        assert_eq!(s.display_id, "anasouza");
        assert_eq!(s.webhook_url, None);
    }

    #[test]
    fn empty_email_uses_defaults() {
        let s = Session::from_email("  ", None);
        assert_eq!(s.display_name, DEFAULT_DISPLAY_NAME);
        // "Médico" minus the accented letter.
        assert_eq!(s.display_id, "Mdico");

        let s = Session::from_email("@clinic.com", None);
        assert_eq!(s.display_name, DEFAULT_DISPLAY_NAME);
    }

    #[test]
    fn id_falls_back_when_nothing_survives() {
        let s = Session::from_email("..--@x.com", None);
        assert_eq!(s.display_name, "..--");
        assert_eq!(s.display_id, FALLBACK_DISPLAY_ID);
    }

    #[test]
    fn email_without_at_sign_is_used_whole() {
        let s = Session::from_email("drjoao", Some("http://hook".into()));
        assert_eq!(s.display_name, "drjoao");
        assert_eq!(s.webhook_url.as_deref(), Some("http://hook"));
    }

    #[test]
    fn relogin_builds_a_new_value() {
        let first = Session::from_email("ana@x.com", Some("http://hook".into()));
        let second = Session::from_email("bia@x.com", first.webhook_url.clone());
        assert_eq!(first.display_name, "ana");
        assert_eq!(second.display_name, "bia");
        assert_eq!(second.webhook_url, first.webhook_url);
    }

    #[test]
    fn empty_webhook_url_is_none() {
        let s = Session::from_email("ana@x.com", Some(String::new()));
        assert_eq!(s.webhook_url, None);
    }
}
