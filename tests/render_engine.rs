use blockforge::{generate_html, Block};
use serde_json::{json, Value};

fn block(value: Value) -> Block {
    serde_json::from_value(value).expect("test block")
}

#[test]
fn rendering_is_deterministic() {
    let page = vec![
        block(json!({"id": "1", "type": "heading", "content": "Title", "properties": {"level": 3}})),
        block(json!({"id": "2", "type": "list", "content": ["x", "y"], "properties": {"type": "ordered"}})),
        block(json!({"id": "3", "type": "button"})),
    ];
    assert_eq!(generate_html(&page), generate_html(&page));
}

#[test]
fn fragments_follow_list_order() {
    let heading = block(json!({"id": "h", "type": "heading", "content": "First"}));
    let paragraph = block(json!({"id": "p", "type": "paragraph", "content": "Second"}));

    let forward = generate_html(&[heading.clone(), paragraph.clone()]);
    let h_pos = forward.find("First").unwrap();
    let p_pos = forward.find("Second").unwrap();
    assert!(h_pos < p_pos);

    let reversed = generate_html(&[paragraph, heading]);
    let h_pos = reversed.find("First").unwrap();
    let p_pos = reversed.find("Second").unwrap();
    assert!(p_pos < h_pos);
}

#[test]
fn text_content_is_escaped() {
    let page = vec![block(json!({
        "id": "1",
        "type": "paragraph",
        "content": "<script>alert('x')</script>",
    }))];
    let html = generate_html(&page);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[test]
fn custom_html_passes_through_verbatim() {
    let page = vec![block(json!({
        "id": "1",
        "type": "customHtml",
        "content": "<script>initWidget()</script>",
    }))];
    let html = generate_html(&page);
    assert!(html.contains("<script>initWidget()</script>"));
}

#[test]
fn custom_html_without_content_renders_empty() {
    let page = vec![
        block(json!({"id": "1", "type": "heading", "content": "A"})),
        block(json!({"id": "2", "type": "customHtml"})),
        block(json!({"id": "3", "type": "heading", "content": "B"})),
    ];
    let html = generate_html(&page);
    assert!(html.contains("<h2>A</h2>\n\n<h2>B</h2>"));
}

#[test]
fn unknown_type_degrades_to_comment_without_dropping_siblings() {
    let page = vec![
        block(json!({"id": "1", "type": "heading", "content": "Before"})),
        block(json!({"id": "2", "type": "bogus", "content": "whatever"})),
        block(json!({"id": "3", "type": "paragraph", "content": "After"})),
    ];
    let html = generate_html(&page);
    assert!(html.contains("Before"));
    assert!(html.contains("<!-- Unknown block type: bogus -->"));
    assert!(html.contains("After"));
}

#[test]
fn missing_properties_merge_over_defaults() {
    // Empty property map: default level 2, default left alignment, no style.
    let html = generate_html(&[block(json!({
        "id": "1", "type": "heading", "content": "Hi", "properties": {},
    }))]);
    assert!(html.contains("<h2>Hi</h2>"));

    // Partial map: explicit level, align still defaults to left.
    let html = generate_html(&[block(json!({
        "id": "1", "type": "heading", "content": "Hi", "properties": {"level": 1},
    }))]);
    assert!(html.contains("<h1>Hi</h1>"));
    assert!(!html.contains("text-align"));
}

#[test]
fn out_of_range_heading_level_falls_back() {
    let html = generate_html(&[block(json!({
        "id": "1", "type": "heading", "content": "Hi", "properties": {"level": 9},
    }))]);
    assert!(html.contains("<h2>Hi</h2>"));
}

#[test]
fn block_with_no_content_or_properties_still_renders() {
    let html = generate_html(&[block(json!({"id": "1", "type": "paragraph"}))]);
    assert!(html.contains("<p></p>"));
}

#[test]
fn youtube_url_becomes_embed_iframe() {
    let html = generate_html(&[block(json!({
        "id": "1",
        "type": "video",
        "properties": {"src": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"},
    }))]);
    assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ\""));
    assert!(html.contains("<iframe"));
}

#[test]
fn youtube_autoplay_appends_query_parameter() {
    let html = generate_html(&[block(json!({
        "id": "1",
        "type": "video",
        "properties": {"src": "https://youtu.be/dQw4w9WgXcQ", "autoplay": true},
    }))]);
    assert!(html.contains("embed/dQw4w9WgXcQ?autoplay=1"));
}

#[test]
fn invalid_youtube_url_renders_marker_not_iframe() {
    let html = generate_html(&[block(json!({
        "id": "1",
        "type": "video",
        "properties": {"src": "https://notyoutube.com/x", "type": "youtube"},
    }))]);
    assert!(html.contains("<!-- Invalid YouTube URL -->"));
    assert!(!html.contains("<iframe"));
}

#[test]
fn native_video_reflects_boolean_attributes() {
    let html = generate_html(&[block(json!({
        "id": "1",
        "type": "video",
        "properties": {"src": "movie.mp4", "type": "file", "autoplay": true},
    }))]);
    assert!(html.contains("<video src=\"movie.mp4\""));
    assert!(html.contains(" controls"));
    assert!(html.contains(" autoplay"));
}

#[test]
fn image_wrapper_is_emitted_even_with_empty_src() {
    let html = generate_html(&[block(json!({"id": "1", "type": "image"}))]);
    assert!(html.contains("<div style=\"text-align: center;\">"));
    assert!(html.contains("<img src=\"\""));
}

#[test]
fn structural_blocks_render_flat_placeholders() {
    let html = generate_html(&[
        block(json!({"id": "1", "type": "container", "properties": {"backgroundColor": "#fff"}})),
        block(json!({"id": "2", "type": "section"})),
        block(json!({"id": "3", "type": "form"})),
    ]);
    assert!(html.contains("<!-- Container content here -->"));
    assert!(html.contains("background-color: #fff;"));
    assert!(html.contains("<!-- Section content here -->"));
    assert!(html.contains("<form action=\"\" method=\"post\">"));
    assert!(html.contains("<!-- Form inputs here -->"));
}

#[test]
fn section_background_image_style_only_when_set() {
    let plain = generate_html(&[block(json!({"id": "1", "type": "section"}))]);
    assert!(!plain.contains("background-image"));

    let with_image = generate_html(&[block(json!({
        "id": "1",
        "type": "section",
        "properties": {"backgroundImage": "bg.png"},
    }))]);
    assert!(with_image
        .contains("background-image: url(bg.png); background-size: cover; background-position: center;"));
}

#[test]
fn row_emits_one_placeholder_per_column() {
    let html = generate_html(&[block(json!({
        "id": "1", "type": "row", "properties": {"columns": 3},
    }))]);
    assert!(html.contains("grid-template-columns: repeat(3, 1fr)"));
    assert!(html.contains("<!-- Column 1 content -->"));
    assert!(html.contains("<!-- Column 3 content -->"));
    assert!(!html.contains("<!-- Column 4 content -->"));
}

#[test]
fn input_renders_label_marker_and_textarea_variant() {
    let html = generate_html(&[block(json!({
        "id": "1",
        "type": "input",
        "properties": {"label": "Message", "type": "textarea", "required": true},
    }))]);
    assert!(html.contains("<label for=\"input-name\""));
    assert!(html.contains("Message <span style=\"color: #dc2626;\">*</span>"));
    assert!(html.contains("<textarea name=\"input-name\""));
    assert!(html.contains(" required "));

    let no_label = generate_html(&[block(json!({
        "id": "1", "type": "input", "properties": {"label": ""},
    }))]);
    assert!(!no_label.contains("<label"));
    assert!(no_label.contains("<input type=\"text\""));
}

#[test]
fn link_marks_external_targets() {
    let html = generate_html(&[block(json!({
        "id": "1",
        "type": "link",
        "content": "Docs",
        "properties": {"href": "https://example.com", "target": "_blank", "style": "button"},
    }))]);
    assert!(html.contains("<a href=\"https://example.com\" target=\"_blank\""));
    assert!(html.contains("\u{2197}"));
    assert!(html.contains("display: inline-block;"));

    let internal = generate_html(&[block(json!({"id": "1", "type": "link", "content": "Home"}))]);
    assert!(!internal.contains("\u{2197}"));
}

#[test]
fn empty_block_list_yields_bare_shell() {
    let html = generate_html(&[]);
    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head>"));
    assert!(html.contains("<body>\n</body>"));
    assert!(html.ends_with("</html>"));
}

#[test]
fn end_to_end_heading_and_ordered_list() {
    let page = vec![
        block(json!({
            "id": "1",
            "type": "heading",
            "content": "Hi",
            "properties": {"level": 1, "align": "center"},
        })),
        block(json!({
            "id": "2",
            "type": "list",
            "content": ["A", "B"],
            "properties": {"type": "ordered"},
        })),
    ];
    let html = generate_html(&page);

    let heading = "<h1 style=\"text-align: center;\">Hi</h1>";
    let list = "<ol>\n  <li>A</li>\n  <li>B</li>\n</ol>";
    let h_pos = html.find(heading).expect("heading fragment");
    let l_pos = html.find(list).expect("list fragment");
    assert!(h_pos < l_pos);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</body>\n</html>"));
}
