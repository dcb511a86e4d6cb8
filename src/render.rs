//! Rendering of single Tweets into HTML fragments.
//!
//! Rendering never fails. Entities that do not line up with the text are left as they are.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex, RegexBuilder};

use crate::entities::Media;
use crate::tweet::Tweet;
use crate::types::MediaKind;

/// CSS class of a Tweet in a thread.
pub const TWEET_CLASS: &str = "tweet";
/// CSS class of a Tweet nested in the Tweet quoting it.
pub const QUOTED_CLASS: &str = "retweet";

const TWITTER: &str = "https://twitter.com";

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").unwrap());

/// Escapes `&`, `<` and `>`, and also `'` and `"` if `quoted` is `true`.
///
/// Use `quoted` for attribute values.
pub fn html_escape(s: &str, quoted: bool) -> String {
    let mut ret = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => ret.push_str("&amp;"),
            '<' => ret.push_str("&lt;"),
            '>' => ret.push_str("&gt;"),
            '\'' if quoted => ret.push_str("&apos;"),
            '"' if quoted => ret.push_str("&quot;"),
            c => ret.push(c),
        }
    }
    ret
}

/// Renders a Tweet as a `<div>` of the given CSS class.
///
/// If `nest_quoted` is `true`, the quoted Tweet, if any, is rendered inside the text with the
/// [`QUOTED_CLASS`] class and the link to it is removed.
pub fn render_tweet(tweet: &Tweet, css_class: &str, nest_quoted: bool) -> String {
    let text = tweet_text_to_html(tweet, nest_quoted);
    let media = render_media(tweet).unwrap_or_default();

    format!(
        "<div class=\"{}\"><a class=\"tweetOriginal\" href=\"{}\">Original Tweet</a>\
         <div class=\"tweetText\">{}</div>{}</div>",
        html_escape(css_class, true),
        html_escape(&tweet.permalink(), true),
        text,
        media,
    )
}

/// Converts the text of a Tweet into a sequence of `<p>` elements with linked entities.
pub fn tweet_text_to_html(tweet: &Tweet, nest_quoted: bool) -> String {
    let text = html_escape(&tweet.full_text, false);
    let text = link_mentions(tweet, &text);
    let text = link_hashtags(tweet, &text);
    let quoted = if nest_quoted {
        tweet.quoted_status.as_deref()
    } else {
        None
    };
    let text = match quoted {
        Some(quoted) => remove_quote_links(tweet, quoted, text),
        None => text,
    };
    let text = remove_media_links(tweet, text);
    let text = paragraphs(&text);
    let text = match quoted {
        Some(quoted) => format!(
            "{}\n\n{}",
            text,
            render_tweet(quoted, QUOTED_CLASS, false)
        ),
        None => text,
    };
    link_urls(tweet, &text)
}

/// Renders the photos and animated GIFs of a Tweet, or returns `None` if it has neither.
pub fn render_media(tweet: &Tweet) -> Option<String> {
    let photos: Vec<&Media> = tweet
        .media
        .iter()
        .filter(|m| m.kind == MediaKind::Photo)
        .collect();
    let gifs: Vec<&Media> = tweet
        .media
        .iter()
        .filter(|m| m.kind == MediaKind::AnimatedGif)
        .collect();

    if photos.is_empty() && gifs.is_empty() {
        return None;
    }

    let mut html = String::new();

    if !photos.is_empty() {
        let _ = write!(
            html,
            "<div class=\"tweetMedia tweetMediaPhoto tweetMediaCount{}\">",
            photos.len()
        );
        for photo in photos {
            let _ = write!(
                html,
                "<img class=\"tweetImage {}\" src=\"{}\" alt=\"{}\" />",
                html_escape(photo.kind.as_ref(), true),
                html_escape(&photo.media_url_https, true),
                html_escape(photo.ext_alt_text.as_deref().unwrap_or(""), true),
            );
        }
        html.push_str("</div>");
    }

    if !gifs.is_empty() {
        let _ = write!(
            html,
            "<div class=\"tweetMedia tweetMediaGif tweetMediaCount{}\">",
            gifs.len()
        );
        for gif in gifs {
            let _ = write!(
                html,
                "<video class=\"tweetGif {}\" controls poster=\"{}\">",
                html_escape(gif.kind.as_ref(), true),
                html_escape(&gif.media_url_https, true),
            );
            if let Some(variant) = gif.variants().first() {
                let _ = write!(
                    html,
                    "<source type=\"{}\" src=\"{}\" />",
                    html_escape(&variant.content_type, true),
                    html_escape(&variant.url, true),
                );
            }
            html.push_str("</video>");
        }
        html.push_str("</div>");
    }

    Some(html)
}

fn link_mentions(tweet: &Tweet, text: &str) -> String {
    let mut seen = HashSet::new();
    let mentions: Vec<_> = tweet
        .user_mentions
        .iter()
        .filter(|m| !m.screen_name.is_empty())
        .filter(|m| seen.insert(m.screen_name.to_ascii_lowercase()))
        .collect();
    let re = match alternation("@", mentions.iter().map(|m| &*m.screen_name), true) {
        Some(re) => re,
        None => return text.to_owned(),
    };

    replace_outside_tags(text, &re, |caps| {
        let mention = mentions
            .iter()
            .find(|m| m.screen_name.eq_ignore_ascii_case(&caps[1]));
        match mention {
            Some(m) => format!(
                "<a title=\"{} on twitter\" class=\"tweetMention\" href=\"{}/{}\">@{}</a>",
                html_escape(&m.name, true),
                TWITTER,
                html_escape(&m.screen_name, true),
                html_escape(&m.screen_name, false),
            ),
            None => caps[0].to_owned(),
        }
    })
}

fn link_hashtags(tweet: &Tweet, text: &str) -> String {
    let mut seen = HashSet::new();
    let tags: Vec<&str> = tweet
        .hashtags
        .iter()
        .map(|h| &*h.text)
        .filter(|t| !t.is_empty() && seen.insert(*t))
        .collect();
    let re = match alternation("#", tags.iter().copied(), false) {
        Some(re) => re,
        None => return text.to_owned(),
    };

    replace_outside_tags(text, &re, |caps| {
        format!(
            "<a class=\"tweetHashTag\" href=\"{}/hashtag/{}\">#{}</a>",
            TWITTER,
            html_escape(&caps[1], true),
            &caps[1],
        )
    })
}

fn remove_quote_links(tweet: &Tweet, quoted: &Tweet, mut text: String) -> String {
    let pattern = format!(
        r"^https?://(?:(?:www|mobile)\.)?(?:twitter|x)\.[^/\s]+/(?:[^/\s]+/)+status/{}(?:[/?#]\S*)?$",
        quoted.id
    );
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return text,
    };

    for url in &tweet.urls {
        if !url.url.is_empty() && re.is_match(&url.expanded_url) {
            text = text.replace(&url.url, "");
        }
    }
    text
}

fn remove_media_links(tweet: &Tweet, text: String) -> String {
    let media: HashSet<&str> = tweet
        .media
        .iter()
        .map(|m| &*m.url)
        .filter(|u| !u.is_empty())
        .collect();
    if media.is_empty() {
        return text;
    }

    // Other short links are matched too so that a media link never cuts into a longer one.
    let mut tokens = media.clone();
    tokens.extend(tweet.urls.iter().map(|u| &*u.url).filter(|u| !u.is_empty()));
    let re = match alternation("", tokens.into_iter(), false) {
        Some(re) => re,
        None => return text,
    };

    replace_outside_tags(&text, &re, |caps| {
        if media.contains(&caps[0]) {
            String::new()
        } else {
            caps[0].to_owned()
        }
    })
}

fn paragraphs(text: &str) -> String {
    let text = text.trim_matches('\n');
    format!("<p>{}</p>", PARAGRAPH_BREAK.replace_all(text, "</p>\n\n<p>"))
}

fn link_urls(tweet: &Tweet, text: &str) -> String {
    let mut seen = HashSet::new();
    let urls: Vec<_> = tweet
        .urls
        .iter()
        .filter(|u| !u.url.is_empty() && !u.expanded_url.is_empty())
        .filter(|u| seen.insert(&*u.url))
        .collect();
    let re = match alternation("", urls.iter().map(|u| &*u.url), false) {
        Some(re) => re,
        None => return text.to_owned(),
    };

    replace_outside_tags(text, &re, |caps| {
        match urls.iter().find(|u| u.url == caps[0]) {
            Some(u) => format!(
                "<a class=\"tweetLink\" href=\"{}\">{}</a>",
                html_escape(&u.expanded_url, true),
                html_escape(&u.expanded_url, false),
            ),
            None => caps[0].to_owned(),
        }
    })
}

/// Builds `{prefix}(a|b|...)` out of the escaped alternatives, longest first.
fn alternation<'a, I>(prefix: &str, alternatives: I, case_insensitive: bool) -> Option<Regex>
where
    I: Iterator<Item = &'a str>,
{
    let mut alternatives: Vec<&str> = alternatives.collect();
    if alternatives.is_empty() {
        return None;
    }
    alternatives.sort_by(|a, b| b.len().cmp(&a.len()));

    let escaped: Vec<String> = alternatives.into_iter().map(regex::escape).collect();
    let pattern = format!("{}({})", regex::escape(prefix), escaped.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(case_insensitive)
        .build()
        .ok()
}

/// Applies `re` to the text between the tags of `html`, leaving the tags themselves untouched.
///
/// The text has been escaped before any tag is inserted, so every `<` in it starts a tag.
fn replace_outside_tags<F>(html: &str, re: &Regex, mut replace: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut ret = String::with_capacity(html.len());
    let mut rest = html;

    while !rest.is_empty() {
        let (text, tag, next) = match rest.find('<') {
            Some(start) => {
                let end = rest[start..].find('>').map_or(rest.len(), |i| start + i + 1);
                (&rest[..start], &rest[start..end], &rest[end..])
            }
            None => (rest, "", ""),
        };
        ret.push_str(&re.replace_all(text, |caps: &Captures<'_>| replace(caps)));
        ret.push_str(tag);
        rest = next;
    }

    ret
}
