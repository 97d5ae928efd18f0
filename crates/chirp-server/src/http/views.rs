//! HTML rendering for the list and create pages.

use std::fmt::Write;

use chirp_core::{FormErrors, MAX_TWEET_CHARS, Tweet};

pub const EMPTY_LIST: &str = "No tweets yet!";
pub const POSTED: &str = "Tweet posted successfully!";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

pub fn tweet_list(tweets: &[Tweet], flash: Option<&str>) -> String {
    let mut body = String::from("<h1>Tweets</h1>\n");
    if let Some(message) = flash {
        let _ = writeln!(body, "<p class=\"flash success\">{}</p>", escape(message));
    }
    body.push_str("<p><a href=\"/create/\">Post a Tweet</a></p>\n");

    if tweets.is_empty() {
        let _ = writeln!(body, "<p>{EMPTY_LIST}</p>");
        return page("Tweets", &body);
    }

    body.push_str("<ul class=\"tweets\">\n");
    for tweet in tweets {
        let _ = write!(
            body,
            "<li class=\"tweet\" title=\"{}\">\n<strong>{}</strong>\n\
             <time datetime=\"{}\">{}</time>\n<p>{}</p>\n",
            escape(&tweet.to_string()),
            escape(tweet.author_name()),
            tweet.created_at.to_rfc3339(),
            tweet.created_at.format("%Y-%m-%d %H:%M"),
            escape(&tweet.text),
        );
        if let Some(image) = &tweet.image {
            let _ = writeln!(
                body,
                "<img src=\"/media/{}\" alt=\"Tweet image\">",
                escape(image)
            );
        }
        body.push_str("</li>\n");
    }
    body.push_str("</ul>\n");
    page("Tweets", &body)
}

pub fn create_form(text: &str, errors: &FormErrors) -> String {
    let mut body = String::from("<h1>Post a Tweet</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/create/\" enctype=\"multipart/form-data\">\n",
    );

    field_errors(&mut body, errors, "text");
    // Parsers drop one newline right after `<textarea>`; emit our own so a
    // leading newline in the submitted text survives.
    let _ = writeln!(
        body,
        "<p><label for=\"id_text\">Tweet:</label>\n\
         <textarea name=\"text\" id=\"id_text\" maxlength=\"{MAX_TWEET_CHARS}\" rows=\"4\" \
         placeholder=\"What&#x27;s happening?\" required>\n{}</textarea></p>",
        escape(text)
    );

    field_errors(&mut body, errors, "image");
    body.push_str(
        "<p><label for=\"id_image\">Image (optional):</label>\n\
         <input type=\"file\" name=\"image\" id=\"id_image\" accept=\"image/*\"></p>\n",
    );

    body.push_str("<button type=\"submit\">Post</button>\n</form>\n");
    body.push_str("<p><a href=\"/\">Back to tweets</a></p>\n");
    page("Post a Tweet", &body)
}

fn field_errors(body: &mut String, errors: &FormErrors, field: &str) {
    let messages = errors.get(field);
    if messages.is_empty() {
        return;
    }
    body.push_str("<ul class=\"errorlist\">");
    for message in messages {
        let _ = write!(body, "<li>{}</li>", escape(message));
    }
    body.push_str("</ul>\n");
}
