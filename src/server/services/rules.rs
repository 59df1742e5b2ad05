//! Keyword rules answered without touching the AI provider.
//!
//! The table is an explicit ordered sequence: insertion order is match
//! priority, and a message containing several triggers resolves to the
//! earliest rule, not the most specific one. That tie-break is load-bearing
//! and pinned by tests.

pub const HELLO_REPLY: &str = "Hi there! How can I help you today?";
pub const MENU_REPLY: &str =
    "Our restaurant offers a variety of dishes — would you like to see the full menu?";
pub const HOURS_REPLY: &str = "We’re open from 9 AM to 10 PM daily!";
pub const LOCATION_REPLY: &str = "We are located at Street 123, Phnom Penh.";
pub const CONTACT_REPLY: &str = "You can reach us at +855 12 345 678.";
pub const THANKS_REPLY: &str = "You're welcome! Need more assistance?";
pub const HELP_REPLY: &str =
    "You can ask things like 'show me the menu' or 'what are your hours'.";

/// What the handler should do when a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Answer with a canned line.
    Reply(&'static str),
    /// Fetch the current menu from the datastore.
    Menu,
}

struct Rule {
    triggers: &'static [&'static str],
    action: RuleAction,
}

/// Ordered trigger → response table, built once at startup and read-only
/// afterwards.
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Table for the rules-only deployment: every rule answers with canned
    /// text, including the menu rule.
    pub fn new() -> Self {
        Self::build(RuleAction::Reply(MENU_REPLY))
    }

    /// Table for deployments with a datastore: the menu trigger performs a
    /// live lookup instead of answering with the canned line.
    pub fn with_live_menu() -> Self {
        Self::build(RuleAction::Menu)
    }

    fn build(menu_action: RuleAction) -> Self {
        Self {
            rules: vec![
                Rule {
                    triggers: &["hello"],
                    action: RuleAction::Reply(HELLO_REPLY),
                },
                Rule {
                    triggers: &["menu"],
                    action: menu_action,
                },
                Rule {
                    triggers: &["hours"],
                    action: RuleAction::Reply(HOURS_REPLY),
                },
                Rule {
                    triggers: &["location"],
                    action: RuleAction::Reply(LOCATION_REPLY),
                },
                Rule {
                    triggers: &["contact"],
                    action: RuleAction::Reply(CONTACT_REPLY),
                },
                Rule {
                    triggers: &["thank"],
                    action: RuleAction::Reply(THANKS_REPLY),
                },
                Rule {
                    triggers: &["help", "how do i", "commands"],
                    action: RuleAction::Reply(HELP_REPLY),
                },
            ],
        }
    }

    /// Lower-cases the message and returns the first rule whose trigger
    /// occurs as a substring. `None` means "defer to the AI fallback" and is
    /// a normal outcome, not an error.
    pub fn first_match(&self, message: &str) -> Option<RuleAction> {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.triggers.iter().any(|trigger| lowered.contains(trigger)))
            .map(|rule| rule.action)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_core_trigger_returns_its_reply() {
        let table = RuleTable::new();
        let cases = [
            ("hello", HELLO_REPLY),
            ("menu", MENU_REPLY),
            ("hours", HOURS_REPLY),
            ("location", LOCATION_REPLY),
            ("contact", CONTACT_REPLY),
            ("thank", THANKS_REPLY),
            ("help", HELP_REPLY),
        ];
        for (trigger, reply) in cases {
            assert_eq!(
                table.first_match(trigger),
                Some(RuleAction::Reply(reply)),
                "trigger {trigger:?} did not fire"
            );
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        let table = RuleTable::new();
        assert_eq!(
            table.first_match("HELLO there"),
            Some(RuleAction::Reply(HELLO_REPLY))
        );
        assert_eq!(
            table.first_match("What Are Your HOURS?"),
            Some(RuleAction::Reply(HOURS_REPLY))
        );
    }

    #[test]
    fn triggers_match_as_substrings_of_longer_messages() {
        let table = RuleTable::new();
        assert_eq!(
            table.first_match("could you tell me your location please"),
            Some(RuleAction::Reply(LOCATION_REPLY))
        );
        assert_eq!(
            table.first_match("thanks a lot!"),
            Some(RuleAction::Reply(THANKS_REPLY))
        );
    }

    #[test]
    fn overlapping_triggers_resolve_to_the_earlier_rule() {
        // Regression pin: "menu" is listed before "hours", so a message
        // containing both gets the menu reply.
        let table = RuleTable::new();
        assert_eq!(
            table.first_match("menu hours"),
            Some(RuleAction::Reply(MENU_REPLY))
        );
        assert_eq!(
            table.first_match("what hours is the menu available"),
            Some(RuleAction::Reply(MENU_REPLY))
        );
    }

    #[test]
    fn unmatched_messages_signal_no_match() {
        let table = RuleTable::new();
        assert_eq!(table.first_match("xyz123 unrelated"), None);
        assert_eq!(table.first_match(""), None);
    }

    #[test]
    fn live_menu_table_routes_the_menu_trigger_to_a_lookup() {
        let table = RuleTable::with_live_menu();
        assert_eq!(table.first_match("show me the menu"), Some(RuleAction::Menu));
        // Other rules are unaffected.
        assert_eq!(
            table.first_match("hello"),
            Some(RuleAction::Reply(HELLO_REPLY))
        );
    }
}
