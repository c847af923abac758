//! Prompt templates and fallback drafts for the email assistants

use domain::{Category, Draft, Recipient};

/// System prompt for the routing classifier
pub const CLASSIFIER_SYSTEM_PROMPT: &str = r#"You are a router assistant that classifies email prompts.
Analyze the user's prompt and determine if it's a 'sales' email or 'follow-up' email.

Sales emails are for:
- Selling products/services
- Business proposals
- Cold outreach
- Product pitches

Follow-up emails are for:
- Checking in on previous conversations
- Meeting follow-ups
- General reminders
- Relationship maintenance

Respond with ONLY one word: either 'sales' or 'follow-up'"#;

/// System prompt for the sales assistant
pub const SALES_SYSTEM_PROMPT: &str = r#"You are a sales email specialist. Generate concise, professional sales emails.

Requirements:
- Keep total email under 40 words
- Max 7-10 words per sentence
- Be direct and compelling
- Include a clear call-to-action
- Personalize for the recipient's business domain
- Professional but friendly tone

Return JSON format: {"subject": "...", "body": "..."}"#;

/// System prompt for the follow-up assistant
pub const FOLLOW_UP_SYSTEM_PROMPT: &str = r#"You are a follow-up email specialist. Generate polite, professional follow-up emails.

Requirements:
- Polite and respectful tone
- Reference the original context
- Include gentle call-to-action
- Professional closing
- Keep it concise but warm

Return JSON format: {"subject": "...", "body": "..."}"#;

/// Token ceiling for a classification call (one word back)
pub const CLASSIFIER_MAX_TOKENS: u32 = 10;
/// Near-deterministic sampling for classification
pub const CLASSIFIER_TEMPERATURE: f32 = 0.1;

/// Token ceiling for a sales draft
pub const SALES_MAX_TOKENS: u32 = 150;
/// Sampling temperature for sales drafts
pub const SALES_TEMPERATURE: f32 = 0.7;

/// Token ceiling for a follow-up draft
pub const FOLLOW_UP_MAX_TOKENS: u32 = 200;
/// Sampling temperature for follow-up drafts
pub const FOLLOW_UP_TEMPERATURE: f32 = 0.6;

/// User message for a sales draft
pub fn format_sales_input(prompt: &str, recipient: &Recipient) -> String {
    format!(
        "Generate a sales email about: {}\nRecipient domain: {}\nRecipient email: {}",
        prompt,
        recipient.business_domain(),
        recipient
    )
}

/// User message for a follow-up draft
pub fn format_follow_up_input(prompt: &str, recipient: &Recipient) -> String {
    format!(
        "Generate a follow-up email about: {prompt}\nRecipient: {recipient}"
    )
}

/// Locally built draft used when a blocking generation call cannot produce
/// a usable response
pub fn fallback_draft(category: Category, prompt: &str, recipient: &Recipient) -> Draft {
    match category {
        Category::Sales => Draft::new(
            format!("Quick question about {}", recipient.business_domain()),
            format!(
                "Hi,\n\nRegarding: {prompt}\n\nWould love to discuss this further.\n\nBest regards"
            ),
        ),
        Category::FollowUp => Draft::new(
            "Following up",
            format!(
                "Hi,\n\nFollowing up on: {prompt}\n\nWould love to hear your thoughts.\n\nBest regards"
            ),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_prompt_demands_one_word() {
        assert!(CLASSIFIER_SYSTEM_PROMPT
            .contains("Respond with ONLY one word: either 'sales' or 'follow-up'"));
    }

    #[test]
    fn generation_prompts_demand_json() {
        let json_line = r#"Return JSON format: {"subject": "...", "body": "..."}"#;
        assert!(SALES_SYSTEM_PROMPT.contains(json_line));
        assert!(FOLLOW_UP_SYSTEM_PROMPT.contains(json_line));
    }

    #[test]
    fn sales_input_carries_domain_and_address() {
        let recipient = Recipient::new("alice@acme.com").unwrap();
        let input = format_sales_input("new pricing", &recipient);
        assert_eq!(
            input,
            "Generate a sales email about: new pricing\nRecipient domain: acme.com\nRecipient email: alice@acme.com"
        );
    }

    #[test]
    fn follow_up_input_carries_address_only() {
        let recipient = Recipient::new("bob@widgets.io").unwrap();
        let input = format_follow_up_input("our call last week", &recipient);
        assert_eq!(
            input,
            "Generate a follow-up email about: our call last week\nRecipient: bob@widgets.io"
        );
    }

    #[test]
    fn sales_fallback_personalizes_subject_with_domain() {
        let recipient = Recipient::new("alice@acme.com").unwrap();
        let draft = fallback_draft(Category::Sales, "new pricing", &recipient);
        assert_eq!(draft.subject, "Quick question about acme.com");
        assert_eq!(
            draft.body,
            "Hi,\n\nRegarding: new pricing\n\nWould love to discuss this further.\n\nBest regards"
        );
    }

    #[test]
    fn sales_fallback_uses_placeholder_without_domain() {
        let recipient = Recipient::new("not-an-address").unwrap();
        let draft = fallback_draft(Category::Sales, "new pricing", &recipient);
        assert_eq!(draft.subject, "Quick question about your business");
    }

    #[test]
    fn follow_up_fallback_has_generic_subject() {
        let recipient = Recipient::new("bob@widgets.io").unwrap();
        let draft = fallback_draft(Category::FollowUp, "our call", &recipient);
        assert_eq!(draft.subject, "Following up");
        assert!(draft.body.contains("our call"));
    }
}
