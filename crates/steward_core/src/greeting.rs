//! Rendered greeting messages, independent of the chat platform.

use crate::{Color, MemberContext, WelcomeSettings, render_template};

/// A message to post in a named channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Greeting {
    /// Name of the channel to post in.
    pub channel: String,
    /// Message content.
    pub body: GreetingBody,
}

/// Content of a greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetingBody {
    /// Plain text message.
    Plain(String),
    /// Rich embed.
    Embed(EmbedSpec),
}

/// Platform-neutral description of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    /// Title line.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Accent color.
    pub color: Color,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
    /// Footer text.
    pub footer: Option<String>,
}

impl WelcomeSettings {
    /// Greeting for a member who just joined, if join greetings are enabled.
    pub fn welcome_for(&self, member: &MemberContext) -> Option<Greeting> {
        if !self.enabled {
            return None;
        }
        let text = render_template(&self.message, member);
        let body = if self.use_embed {
            GreetingBody::Embed(self.welcome_embed(text, member))
        } else {
            GreetingBody::Plain(text)
        };
        Some(Greeting {
            channel: self.channel.clone(),
            body,
        })
    }

    /// Message for a member who left, if leave messages are enabled.
    pub fn goodbye_for(&self, member: &MemberContext) -> Option<Greeting> {
        if !self.goodbye_enabled {
            return None;
        }
        let text = render_template(&self.goodbye_message, member);
        let body = if self.use_embed {
            GreetingBody::Embed(EmbedSpec {
                title: "Goodbye! 👋".to_string(),
                description: text,
                color: Color::RED,
                thumbnail_url: None,
                footer: None,
            })
        } else {
            GreetingBody::Plain(text)
        };
        Some(Greeting {
            channel: self.goodbye_channel.clone(),
            body,
        })
    }

    /// Preview embed shown to an administrator testing the join greeting.
    pub fn preview_for(&self, member: &MemberContext) -> EmbedSpec {
        let text = render_template(&self.message, member);
        let mut embed = self.welcome_embed(text, member);
        embed.description.push_str("\n\n**(This is a test message)**");
        embed.footer = Some("Welcome message test".to_string());
        embed
    }

    fn welcome_embed(&self, description: String, member: &MemberContext) -> EmbedSpec {
        EmbedSpec {
            title: self.title.clone(),
            description,
            color: self.color,
            thumbnail_url: if self.thumbnail {
                member.avatar_url.clone()
            } else {
                None
            },
            footer: self.footer.as_ref().map(|f| render_template(f, member)),
        }
    }
}
