//! Conversion of platform-neutral embeds to serenity builders.

use serenity::all::{CreateEmbed, CreateEmbedFooter, CreateMessage};
use steward_core::{EmbedSpec, GreetingBody};

pub(crate) fn create_embed(spec: &EmbedSpec) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&spec.title)
        .description(&spec.description)
        .colour(spec.color.value());
    if let Some(url) = &spec.thumbnail_url {
        embed = embed.thumbnail(url);
    }
    if let Some(footer) = &spec.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    embed
}

pub(crate) fn create_message(body: &GreetingBody) -> CreateMessage {
    match body {
        GreetingBody::Plain(text) => CreateMessage::new().content(text),
        GreetingBody::Embed(spec) => CreateMessage::new().embed(create_embed(spec)),
    }
}
