use crate::state::{parse_instant, Message};
use chrono::{DateTime, Local, TimeZone};
use leptos::*;
use pulldown_cmark::{Event, Parser, Tag};
use std::fmt::Display;

/// Renders message content as Markdown. Raw HTML in the message is shown as
/// text and `javascript:` links are neutralised.
pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new(content).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if dest_url.trim().to_ascii_lowercase().starts_with("javascript:") => {
            Event::Start(Tag::Link {
                link_type,
                dest_url: "#".into(),
                title,
                id,
            })
        }
        event => event,
    });
    let mut parsed = String::new();
    pulldown_cmark::html::push_html(&mut parsed, parser);
    parsed
}

/// `D/M/YYYY H:MM:SS` in `tz`, or the raw value when it is not a date.
pub fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_instant(raw) {
        Some(instant) => instant
            .with_timezone(tz)
            .format("%-d/%-m/%Y %-H:%M:%S")
            .to_string(),
        None => raw.to_string(),
    }
}

#[component]
pub fn MessageRow(message: Message) -> impl IntoView {
    let parsed = render_markdown(&message.content);
    let datemsg = format_timestamp(&message.timestamp, &Local);
    let title = message
        .sent_at()
        .map(|instant| DateTime::<Local>::from(instant).to_rfc2822())
        .unwrap_or_default();
    view! {
        <tr class="bg-white border-b dark:bg-gray-800 dark:border-gray-700">
            <td class="px-6 py-4 font-medium text-gray-900 dark:text-white">{message.sender}</td>
            <td class="px-6 py-4">{message.receiver}</td>
            <td class="px-6 py-4">
                <div inner_html=parsed />
            </td>
            <td class="px-6 py-4 whitespace-nowrap" title=title>
                {datemsg}
            </td>
        </tr>
    }
}
