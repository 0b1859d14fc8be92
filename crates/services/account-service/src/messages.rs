//! User-facing message catalog.
//!
//! Templates come from configuration and are rendered exactly once when the
//! catalog is built. Commands only pick a [`Message`], they never build text.

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Legacy colour code marker used in config files
const LEGACY_CODE_CHAR: char = '&';

/// Section sign colour code marker understood by the session transport
const SECTION_CODE_CHAR: char = '§';

/// Characters that form a valid colour/format code after the marker
const CODE_CHARS: &str = "0123456789abcdefklmnorABCDEFKLMNOR";

const PLACEHOLDER_PREFIX: &str = "{PRFX}";
const PLACEHOLDER_NEWLINE: &str = "{NL}";

/// A rendered, ready-to-send message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    /// Render a raw template: substitute the prefix and newline placeholders,
    /// then translate `&` colour codes to `§` codes.
    pub fn render(template: &str, prefix: &str) -> Self {
        let expanded = template
            .replace(PLACEHOLDER_PREFIX, prefix)
            .replace(PLACEHOLDER_NEWLINE, "\n")
            .replace("\\n", "\n");

        Self(translate_colour_codes(&expanded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn translate_colour_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(next) if c == LEGACY_CODE_CHAR && CODE_CHARS.contains(*next) => {
                out.push(SECTION_CODE_CHAR);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Raw message templates as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct StringsConfig {
    pub prefix: String,
    pub not_player: String,
    pub not_registered: String,
    pub unregister_successful: String,
    pub error_occurred: String,
    pub wrong_password: String,
    pub unregister_usage: String,
    pub cracked_command: String,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            prefix: "&8[&6Auth&8]".to_string(),
            not_player: "{PRFX} &cConsole is not allowed to execute this command!".to_string(),
            not_registered: "{PRFX} &cYou are not registered!".to_string(),
            unregister_successful: "{PRFX}{NL}&aSuccessfully unregistered!".to_string(),
            error_occurred: "{PRFX} &cAn internal error has occurred!".to_string(),
            wrong_password: "{PRFX} &cPassword is wrong!".to_string(),
            unregister_usage: "{PRFX} Usage: &6/unregister <current password> confirm".to_string(),
            cracked_command: "{PRFX}{NL}&aYou can not use this command since your account has no password!"
                .to_string(),
        }
    }
}

impl StringsConfig {
    /// Load templates from `MSG_*` environment variables, keeping the
    /// default for every variable that is not set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load templates through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str, fallback: String| lookup(name).unwrap_or(fallback);

        Self {
            prefix: var("MSG_PREFIX", defaults.prefix),
            not_player: var("MSG_NOT_PLAYER", defaults.not_player),
            not_registered: var("MSG_NOT_REGISTERED", defaults.not_registered),
            unregister_successful: var("MSG_UNREGISTER_SUCCESSFUL", defaults.unregister_successful),
            error_occurred: var("MSG_ERROR_OCCURRED", defaults.error_occurred),
            wrong_password: var("MSG_WRONG_PASSWORD", defaults.wrong_password),
            unregister_usage: var("MSG_UNREGISTER_USAGE", defaults.unregister_usage),
            cracked_command: var("MSG_CRACKED_COMMAND", defaults.cracked_command),
        }
    }
}

/// Every message the unregister command can send, pre-rendered.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    pub not_player: Message,
    pub not_registered: Message,
    pub unregister_successful: Message,
    pub error_occurred: Message,
    pub wrong_password: Message,
    pub unregister_usage: Message,
    pub cracked_command: Message,
}

impl MessageCatalog {
    pub fn from_config(strings: &StringsConfig) -> Self {
        let render = |template: &str| Message::render(template, &strings.prefix);

        Self {
            not_player: render(&strings.not_player),
            not_registered: render(&strings.not_registered),
            unregister_successful: render(&strings.unregister_successful),
            error_occurred: render(&strings.error_occurred),
            wrong_password: render(&strings.wrong_password),
            unregister_usage: render(&strings.unregister_usage),
            cracked_command: render(&strings.cracked_command),
        }
    }

    /// Named pairs, for diagnostics
    pub fn entries(&self) -> [(&'static str, &Message); 7] {
        [
            ("NOT_PLAYER", &self.not_player),
            ("NOT_REGISTERED", &self.not_registered),
            ("UNREGISTER_SUCCESSFUL", &self.unregister_successful),
            ("ERROR_OCCURRED", &self.error_occurred),
            ("WRONG_PASSWORD", &self.wrong_password),
            ("UNREGISTER_USAGE", &self.unregister_usage),
            ("CRACKED_COMMAND", &self.cracked_command),
        ]
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::from_config(&StringsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_translates_colour_codes() {
        let message = Message::render("&aGreen &Lbold & plain &z", "");
        assert_eq!(message.as_str(), "§aGreen §lbold & plain &z");
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let message = Message::render("{PRFX}{NL}&cDone", "[Auth]");
        assert_eq!(message.as_str(), "[Auth]\n§cDone");
    }

    #[test]
    fn test_trailing_marker_is_kept() {
        assert_eq!(Message::render("50&", "").as_str(), "50&");
    }

    #[test]
    fn test_catalog_renders_every_template_once() {
        let strings = StringsConfig {
            prefix: "P".to_string(),
            wrong_password: "{PRFX} wrong".to_string(),
            ..StringsConfig::default()
        };
        let catalog = MessageCatalog::from_config(&strings);

        assert_eq!(catalog.wrong_password.as_str(), "P wrong");
        assert_eq!(catalog.entries().len(), 7);
        assert!(catalog.entries().iter().all(|(_, m)| !m.as_str().contains("{PRFX}")));
    }

    #[test]
    fn test_msg_variables_override_defaults() {
        let strings = StringsConfig::from_lookup(|name| match name {
            "MSG_PREFIX" => Some("[Srv]".to_string()),
            "MSG_WRONG_PASSWORD" => Some("{PRFX} &4nope".to_string()),
            _ => None,
        });

        assert_eq!(strings.prefix, "[Srv]");
        assert_eq!(strings.wrong_password, "{PRFX} &4nope");
        assert_eq!(strings.not_registered, StringsConfig::default().not_registered);

        let catalog = MessageCatalog::from_config(&strings);
        assert_eq!(catalog.wrong_password.as_str(), "[Srv] §4nope");
    }
}
