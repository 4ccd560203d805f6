// Help assistant — canned answers about fake accounts.
//
// Keyword routing, checked in a fixed priority order. The first topic whose
// keywords appear in the lowercased message wins.

use serde::Serialize;

/// Greeting shown when the assistant starts.
pub const GREETING: &str =
    "Hi there! I'm your Fake Account Detective assistant. How can I help you today?";

/// A place to report a fake or abusive account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const RESOURCES: [Resource; 4] = [
    Resource {
        title: "Report to Cyber Crime Portal",
        url: "https://cybercrime.gov.in/",
        description: "Official Indian Cyber Crime Reporting Portal",
    },
    Resource {
        title: "FTC Identity Theft",
        url: "https://www.identitytheft.gov/",
        description: "US Federal Trade Commission identity theft resource",
    },
    Resource {
        title: "Meta Help Center",
        url: "https://www.facebook.com/help/1216349518398524",
        description: "Report fake accounts on Facebook & Instagram",
    },
    Resource {
        title: "Twitter Help",
        url: "https://help.twitter.com/en/safety-and-security/report-abusive-behavior",
        description: "How to report abusive behavior on Twitter",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Report,
    Identify,
    Protect,
    Hello,
    Hi,
    Help,
    Thanks,
    Default,
}

impl Topic {
    /// Classify a message. Matching is substring-based on the lowercased text.
    pub fn classify(message: &str) -> Self {
        let text = message.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["report", "cyber", "crime"]) {
            Topic::Report
        } else if has(&["identify", "detect", "spot", "recognize"]) {
            Topic::Identify
        } else if has(&["protect", "safe", "secure"]) {
            Topic::Protect
        } else if has(&["hello"]) {
            Topic::Hello
        } else if text == "hi" || text.contains("hi ") {
            Topic::Hi
        } else if has(&["help"]) {
            Topic::Help
        } else if has(&["thanks", "thank you"]) {
            Topic::Thanks
        } else {
            Topic::Default
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            Topic::Report => {
                "You can report fake accounts to the platform directly or to cybercrime \
                 authorities. Visit https://cybercrime.gov.in/ for the official Indian Cyber \
                 Crime Reporting Portal."
            }
            Topic::Identify => {
                "Look for these red flags: new accounts, few posts, stock photos, unusual \
                 follower counts, generic content, and suspicious links."
            }
            Topic::Protect => {
                "Protect yourself by checking accounts before engaging, using strong passwords, \
                 enabling 2FA, being careful about friend requests, and reporting suspicious \
                 activity."
            }
            Topic::Hello => {
                "Hello! I'm your fake account detector assistant. How can I help you today?"
            }
            Topic::Hi => {
                "Hi there! I'm here to help with fake account detection. What information do \
                 you need?"
            }
            Topic::Help => {
                "I can help with identifying fake accounts, reporting them to authorities, or \
                 protecting yourself online. What specifically do you need assistance with?"
            }
            Topic::Thanks => {
                "You're welcome! If you have any more questions, feel free to ask."
            }
            Topic::Default => {
                "I'm here to help you identify and report fake accounts. What would you like \
                 to know?"
            }
        }
    }
}

/// Answer a free-text message.
pub fn reply(message: &str) -> &'static str {
    Topic::classify(message.trim()).reply()
}

/// Answer a message, or greet when there is nothing to answer yet.
pub fn respond(message: &str) -> &'static str {
    if message.trim().is_empty() {
        GREETING
    } else {
        reply(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_beats_everything() {
        // "help" and "identify" also match, report is checked first
        assert_eq!(
            Topic::classify("help me identify and report a scammer"),
            Topic::Report
        );
        assert_eq!(Topic::classify("Is this a CYBER crime?"), Topic::Report);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(Topic::classify("how do I spot a bot"), Topic::Identify);
        assert_eq!(Topic::classify("how to stay safe"), Topic::Protect);
        assert_eq!(Topic::classify("hello there"), Topic::Hello);
        assert_eq!(Topic::classify("can you help"), Topic::Help);
        assert_eq!(Topic::classify("thank you!"), Topic::Thanks);
        assert_eq!(Topic::classify("thanks"), Topic::Thanks);
    }

    #[test]
    fn test_hi_needs_word_boundary() {
        assert_eq!(Topic::classify("hi"), Topic::Hi);
        assert_eq!(Topic::classify("Hi friend"), Topic::Hi);
        // "this" contains "hi" but not "hi "
        assert_eq!(Topic::classify("this"), Topic::Default);
    }

    #[test]
    fn test_reply_trims_and_defaults() {
        assert_eq!(reply("  hi  "), Topic::Hi.reply());
        assert_eq!(reply("???"), Topic::Default.reply());
    }

    #[test]
    fn test_empty_message_gets_greeting() {
        assert_eq!(respond(""), GREETING);
        assert_eq!(respond("   "), GREETING);
        assert_eq!(respond("thanks"), Topic::Thanks.reply());
    }

    #[test]
    fn test_resources_are_https() {
        assert!(RESOURCES.iter().all(|r| r.url.starts_with("https://")));
    }
}
