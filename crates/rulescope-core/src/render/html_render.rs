use super::outline::{Outline, OutlineNode};

/// Render an outline as nested `<ul>`/`<li>` markup
///
/// Artifact references become `<a data-appId="..." href="#">name</a>` links,
/// comma separated inside brackets after the method name. Rule type and object
/// items always get a `<ul>`, even when it is empty. Text is HTML-escaped.
pub fn render_outline_html(outline: &Outline) -> String {
    let mut output = String::from("<ul>");
    for item in outline.items() {
        push_node(&mut output, item);
    }
    output.push_str("</ul>");
    output
}

fn push_node(output: &mut String, node: &OutlineNode) {
    output.push_str("<li>");
    output.push_str(&escape(&node.label));

    if let Some(artifacts) = &node.artifacts {
        output.push_str(" [");
        for (i, artifact) in artifacts.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            output.push_str(&format!(
                "<a data-appId=\"{}\" href=\"#\">{}</a>",
                escape(&artifact.app_id),
                escape(&artifact.name)
            ));
        }
        output.push(']');
    }

    if let Some(children) = &node.children {
        output.push_str("<ul>");
        for child in children {
            push_node(output, child);
        }
        output.push_str("</ul>");
    }
    output.push_str("</li>");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
