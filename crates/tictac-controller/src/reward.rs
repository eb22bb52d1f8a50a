//! Reward deep link derivation.
//!
//! A win unlocks a promo code, but the client never sees the code. It
//! opens the reward bot with the session id as the start payload, and the
//! bot looks the code up server-side.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tictac_protocol::SessionId;

/// The production reward bot.
pub const DEFAULT_BOT_USERNAME: &str = "ttt432_bot";

const DEEP_LINK_BASE: &str = "https://t.me/";

/// Characters escaped in the start payload.
///
/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )`, the same
/// set a browser's `encodeURIComponent` leaves alone.
const START_PAYLOAD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds `https://t.me/<bot>?start=<session id>` links.
///
/// Pure and deterministic: the same session id always yields the same
/// link, and percent-decoding the `start` value gives back the exact id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardLinkBuilder {
    bot_username: String,
}

impl RewardLinkBuilder {
    /// Creates a builder for the given bot. A leading `@` is ignored.
    pub fn new(bot_username: impl Into<String>) -> Self {
        let bot_username = bot_username.into();
        let bot_username = bot_username.trim().trim_start_matches('@').to_string();
        Self { bot_username }
    }

    /// The bot the links point at.
    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// Derives the reward link for `session_id`.
    pub fn build_link(&self, session_id: &SessionId) -> String {
        let payload = utf8_percent_encode(session_id.as_str(), START_PAYLOAD);
        format!("{DEEP_LINK_BASE}{}?start={payload}", self.bot_username)
    }
}

impl Default for RewardLinkBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BOT_USERNAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn start_payload(link: &str) -> &str {
        link.split_once("?start=").map(|(_, p)| p).unwrap()
    }

    #[test]
    fn test_build_link_plain_session_id() {
        let link = RewardLinkBuilder::default().build_link(&SessionId::new("S"));
        assert_eq!(link, "https://t.me/ttt432_bot?start=S");
    }

    #[test]
    fn test_build_link_uuid_passes_through_unescaped() {
        let id = SessionId::new("9b2f6c1e-3a4d-4f8e-b1c2-7d9e0a5f3b21");
        let link = RewardLinkBuilder::default().build_link(&id);
        assert_eq!(
            link,
            "https://t.me/ttt432_bot?start=9b2f6c1e-3a4d-4f8e-b1c2-7d9e0a5f3b21"
        );
    }

    #[test]
    fn test_build_link_escapes_reserved_characters() {
        let id = SessionId::new("a b&c=d/é");
        let link = RewardLinkBuilder::default().build_link(&id);
        assert_eq!(link, "https://t.me/ttt432_bot?start=a%20b%26c%3Dd%2F%C3%A9");
    }

    #[test]
    fn test_build_link_payload_decodes_to_original() {
        let builder = RewardLinkBuilder::default();
        for raw in ["S", "id with spaces", "?start=x&y", "ünïcødé", "(ok)*!~'"] {
            let link = builder.build_link(&SessionId::new(raw));
            let decoded = percent_decode_str(start_payload(&link))
                .decode_utf8()
                .unwrap();
            assert_eq!(decoded, raw);
        }
    }

    #[test]
    fn test_build_link_is_deterministic() {
        let builder = RewardLinkBuilder::default();
        let id = SessionId::new("same");
        assert_eq!(builder.build_link(&id), builder.build_link(&id));
    }

    #[test]
    fn test_new_strips_at_sign() {
        let builder = RewardLinkBuilder::new("@promo_bot");
        assert_eq!(builder.bot_username(), "promo_bot");
        assert_eq!(
            builder.build_link(&SessionId::new("S")),
            "https://t.me/promo_bot?start=S"
        );
    }
}
