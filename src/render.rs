//! HTML render engine.
//!
//! [`generate_html`] maps an ordered block list to one complete HTML document
//! string. It is pure and deterministic: same list in, identical string out,
//! no I/O, no hidden state. It also never fails — missing content or
//! properties fall back to the registered defaults, and a block whose type
//! tag is not recognized renders as a comment marker without disturbing its
//! siblings. The factory is the creation-time gate for bad types; this module
//! is the read-time safety net.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::block::{Block, BlockType, Content};

const DOCTYPE: &str = "<!DOCTYPE html>\n";
const SHELL_HEAD: &str = "<html>\n<head>\n  <title>Blockforge Generated Page</title>\n  <meta charset=\"UTF-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n  <style>\n    body { font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif; margin: 0; padding: 0; }\n  </style>\n</head>\n<body>\n";
const SHELL_FOOT: &str = "</body>\n</html>";

/// Render an ordered block list into a standalone HTML document.
///
/// Fragments appear in list order, separated by newlines, inside a fixed
/// doctype/head/body shell.
pub fn generate_html(blocks: &[Block]) -> String {
    let body: Vec<String> = blocks.iter().map(render_block).collect();
    format!("{DOCTYPE}{SHELL_HEAD}{}{SHELL_FOOT}", body.join("\n"))
}

/// Render a single block to its HTML fragment.
pub fn render_block(block: &Block) -> String {
    match &block.kind {
        BlockType::Heading => render_heading(block),
        BlockType::Paragraph => render_paragraph(block),
        BlockType::List => render_list(block),
        BlockType::Image => render_image(block),
        BlockType::Video => render_video(block),
        BlockType::Container => render_container(block),
        BlockType::Section => render_section(block),
        BlockType::Row => render_row(block),
        BlockType::Input => render_input(block),
        BlockType::Button => render_button(block),
        BlockType::Form => render_form(block),
        // Raw passthrough, the one place author content is not escaped.
        BlockType::CustomHtml => block
            .content
            .as_ref()
            .and_then(Content::as_text)
            .unwrap_or("")
            .to_string(),
        BlockType::Link => render_link(block),
        BlockType::Unknown(tag) => format!("<!-- Unknown block type: {} -->", escape_html(tag)),
    }
}

/// Escape the five XML-significant characters for text nodes and attribute
/// values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

// Property accessors: merge over the registered defaults key by key, never
// assuming a key is present or well-typed.

fn text_prop<'a>(block: &'a Block, key: &str, default: &'a str) -> &'a str {
    block
        .properties
        .as_ref()
        .and_then(|p| p.get(key))
        .and_then(Value::as_str)
        .unwrap_or(default)
}

fn bool_prop(block: &Block, key: &str, default: bool) -> bool {
    block
        .properties
        .as_ref()
        .and_then(|p| p.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

fn int_prop(block: &Block, key: &str, default: i64) -> i64 {
    block
        .properties
        .as_ref()
        .and_then(|p| p.get(key))
        .and_then(Value::as_i64)
        .unwrap_or(default)
}

fn text_content(block: &Block) -> &str {
    block
        .content
        .as_ref()
        .and_then(Content::as_text)
        .unwrap_or("")
}

// Inline `text-align` attribute, omitted for the default left alignment.
fn align_style(block: &Block) -> String {
    let align = text_prop(block, "align", "left");
    if align == "left" {
        String::new()
    } else {
        format!(" style=\"text-align: {};\"", escape_html(align))
    }
}

fn render_heading(block: &Block) -> String {
    let level = match int_prop(block, "level", 2) {
        n @ 1..=6 => n,
        _ => 2,
    };
    format!(
        "<h{level}{}>{}</h{level}>",
        align_style(block),
        escape_html(text_content(block))
    )
}

fn render_paragraph(block: &Block) -> String {
    format!(
        "<p{}>{}</p>",
        align_style(block),
        escape_html(text_content(block))
    )
}

fn render_list(block: &Block) -> String {
    let empty = [String::new()];
    let items = block
        .content
        .as_ref()
        .and_then(Content::as_items)
        .unwrap_or(&empty);
    let tag = if text_prop(block, "type", "unordered") == "ordered" {
        "ol"
    } else {
        "ul"
    };
    let list_items: Vec<String> = items
        .iter()
        .map(|item| format!("  <li>{}</li>", escape_html(item)))
        .collect();
    format!("<{tag}>\n{}\n</{tag}>", list_items.join("\n"))
}

fn render_image(block: &Block) -> String {
    let src = text_prop(block, "src", "");
    let alt = text_prop(block, "alt", "");
    let width = text_prop(block, "width", "100%");
    let height = text_prop(block, "height", "auto");

    // The wrapper div is emitted even when src is empty; an editor-side
    // empty state is a presentation concern, not an engine concern.
    let wrapper = match text_prop(block, "align", "center") {
        "center" => "<div style=\"text-align: center;\">",
        "right" => "<div style=\"text-align: right;\">",
        _ => "<div>",
    };

    format!(
        "{wrapper}\n  <img src=\"{}\" alt=\"{}\" style=\"width: {}; height: {}; max-width: 100%;\">\n</div>",
        escape_html(src),
        escape_html(alt),
        escape_html(width),
        escape_html(height)
    )
}

/// Extract an 11-character video id from the known YouTube URL shapes
/// (`youtu.be/`, `v/`, `u/_/`, `embed/`, `watch?v=`, `&v=`).
fn youtube_video_id(url: &str) -> Option<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)")
            .expect("youtube id pattern")
    });
    let id = re.captures(url)?.get(2)?.as_str();
    (id.len() == 11).then_some(id)
}

fn render_video(block: &Block) -> String {
    let src = text_prop(block, "src", "");
    let width = text_prop(block, "width", "100%");
    let height = text_prop(block, "height", "315");

    if text_prop(block, "type", "youtube") == "youtube" {
        let Some(id) = youtube_video_id(src) else {
            return "<!-- Invalid YouTube URL -->".to_string();
        };
        let autoplay = if bool_prop(block, "autoplay", false) {
            "?autoplay=1"
        } else {
            ""
        };
        format!(
            "<div style=\"text-align: center;\">\n  <iframe width=\"{}\" height=\"{}\" src=\"https://www.youtube.com/embed/{id}{autoplay}\" frameborder=\"0\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe>\n</div>",
            escape_html(width),
            escape_html(height)
        )
    } else {
        let mut attrs = String::new();
        if bool_prop(block, "controls", true) {
            attrs.push_str(" controls");
        }
        if bool_prop(block, "autoplay", false) {
            attrs.push_str(" autoplay");
        }
        format!(
            "<div style=\"text-align: center;\">\n  <video src=\"{}\" width=\"{}\" height=\"{}\"{attrs}></video>\n</div>",
            escape_html(src),
            escape_html(width),
            escape_html(height)
        )
    }
}

fn render_container(block: &Block) -> String {
    let mut style = format!(
        "max-width: {}; padding: {}; margin: {};",
        escape_html(text_prop(block, "maxWidth", "100%")),
        escape_html(text_prop(block, "padding", "1rem")),
        escape_html(text_prop(block, "margin", "0 auto"))
    );
    let background = text_prop(block, "backgroundColor", "");
    if !background.is_empty() {
        style.push_str(&format!(" background-color: {};", escape_html(background)));
    }
    let text_color = text_prop(block, "textColor", "");
    if !text_color.is_empty() {
        style.push_str(&format!(" color: {};", escape_html(text_color)));
    }

    // Children are not rendered recursively; structural blocks are flat
    // leaves with placeholder markup.
    format!("<div style=\"{style}\">\n  <!-- Container content here -->\n</div>")
}

fn render_section(block: &Block) -> String {
    let mut style = format!(
        "height: {}; padding: {};",
        escape_html(text_prop(block, "height", "auto")),
        escape_html(text_prop(block, "padding", "2rem 1rem"))
    );
    let background = text_prop(block, "backgroundColor", "");
    if !background.is_empty() {
        style.push_str(&format!(" background-color: {};", escape_html(background)));
    }
    let image = text_prop(block, "backgroundImage", "");
    if !image.is_empty() {
        style.push_str(&format!(
            " background-image: url({}); background-size: cover; background-position: center;",
            escape_html(image)
        ));
    }

    format!("<section style=\"{style}\">\n  <!-- Section content here -->\n</section>")
}

fn render_row(block: &Block) -> String {
    let columns = match int_prop(block, "columns", 2) {
        n if n >= 1 => n,
        _ => 2,
    };
    let style = format!(
        "display: grid; grid-template-columns: repeat({columns}, 1fr); gap: {}; align-items: {};",
        escape_html(text_prop(block, "gap", "1rem")),
        escape_html(text_prop(block, "alignment", "stretch"))
    );

    let mut column_html = String::new();
    for i in 1..=columns {
        column_html.push_str(&format!("  <div><!-- Column {i} content --></div>\n"));
    }

    format!("<div style=\"{style}\">\n{column_html}</div>")
}

fn render_input(block: &Block) -> String {
    let name = escape_html(text_prop(block, "name", "input-name"));
    let label = text_prop(block, "label", "Input Label");
    let kind = text_prop(block, "type", "text");
    let placeholder = escape_html(text_prop(block, "placeholder", "Enter value..."));
    let required = if bool_prop(block, "required", false) {
        " required"
    } else {
        ""
    };

    let label_html = if label.is_empty() {
        String::new()
    } else {
        let marker = if required.is_empty() {
            ""
        } else {
            " <span style=\"color: #dc2626;\">*</span>"
        };
        format!(
            "<label for=\"{name}\" style=\"display: block; margin-bottom: 0.5rem; font-weight: 500;\">{}{marker}</label>\n  ",
            escape_html(label)
        )
    };

    if kind == "textarea" {
        format!(
            "<div style=\"margin-bottom: 1rem;\">\n  {label_html}<textarea name=\"{name}\" id=\"{name}\" placeholder=\"{placeholder}\"{required} style=\"width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.25rem;\"></textarea>\n</div>"
        )
    } else {
        format!(
            "<div style=\"margin-bottom: 1rem;\">\n  {label_html}<input type=\"{}\" name=\"{name}\" id=\"{name}\" placeholder=\"{placeholder}\"{required} style=\"width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.25rem;\">\n</div>",
            escape_html(kind)
        )
    }
}

// Fixed variant -> color and size -> padding/font tables; anything
// unrecognized falls back to primary/medium.
fn button_variant_style(variant: &str) -> &'static str {
    match variant {
        "secondary" => "background-color: #e5e7eb; color: #1f2937; border: none;",
        "success" => "background-color: #10b981; color: white; border: none;",
        "danger" => "background-color: #ef4444; color: white; border: none;",
        "outline" => "background-color: transparent; color: #3b82f6; border: 1px solid #3b82f6;",
        _ => "background-color: #3b82f6; color: white; border: none;",
    }
}

fn button_size_style(size: &str) -> &'static str {
    match size {
        "small" => " padding: 0.25rem 0.5rem; font-size: 0.875rem;",
        "large" => " padding: 0.75rem 1.5rem; font-size: 1.125rem;",
        _ => " padding: 0.5rem 1rem; font-size: 1rem;",
    }
}

fn render_button(block: &Block) -> String {
    let text = text_prop(block, "text", "Submit");
    let kind = text_prop(block, "type", "submit");

    let mut style = String::new();
    style.push_str(button_variant_style(text_prop(block, "variant", "primary")));
    style.push_str(button_size_style(text_prop(block, "size", "medium")));
    style.push_str(" border-radius: 0.25rem; font-weight: 500; cursor: pointer; transition: all 0.2s;");

    format!(
        "<div style=\"text-align: center;\">\n  <button type=\"{}\" style=\"{style}\">{}</button>\n</div>",
        escape_html(kind),
        escape_html(text)
    )
}

fn render_form(block: &Block) -> String {
    format!(
        "<form action=\"{}\" method=\"{}\">\n  <!-- Form inputs here -->\n</form>",
        escape_html(text_prop(block, "action", "")),
        escape_html(text_prop(block, "method", "post"))
    )
}

fn link_style(variant: &str) -> &'static str {
    match variant {
        "button" => "display: inline-block; padding: 0.5rem 1rem; background-color: #3b82f6; color: white; text-decoration: none; border-radius: 0.25rem;",
        "underlined" => "color: #3b82f6; text-decoration: underline;",
        "subtle" => "color: #6b7280; text-decoration: none;",
        _ => "color: #3b82f6; text-decoration: none;",
    }
}

fn render_link(block: &Block) -> String {
    let content = block
        .content
        .as_ref()
        .and_then(Content::as_text)
        .unwrap_or("Click here");
    let href = text_prop(block, "href", "#");
    let target = text_prop(block, "target", "_self");
    let external = if target == "_blank" {
        " <span style=\"font-size: 0.75em;\">\u{2197}</span>"
    } else {
        ""
    };

    format!(
        "<a href=\"{}\" target=\"{}\" style=\"{}\">{}{external}</a>",
        escape_html(href),
        escape_html(target),
        link_style(text_prop(block, "style", "default")),
        escape_html(content)
    )
}
