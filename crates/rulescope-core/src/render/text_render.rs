use super::outline::{Outline, OutlineNode};

/// Render an outline as an indented bullet list
///
/// One line per item, two spaces of indentation per level. Control
/// characters inside labels are written escaped (`\n`, `\t`, `\u{1b}`):
///
/// ```text
/// - Validation (Validator)
///   - Obj1
///     - checkX [N1]
/// ```
pub fn render_outline_text(outline: &Outline) -> String {
    let mut output = String::new();
    for item in outline.items() {
        push_node(&mut output, item, 0);
    }
    output
}

fn push_node(output: &mut String, node: &OutlineNode, depth: usize) {
    output.push_str(&"  ".repeat(depth));
    output.push_str("- ");
    push_escaped(output, &node.display_label());
    output.push('\n');
    for child in node.child_items() {
        push_node(output, child, depth + 1);
    }
}

fn push_escaped(output: &mut String, label: &str) {
    for c in label.chars() {
        if c.is_control() {
            output.extend(c.escape_default());
        } else {
            output.push(c);
        }
    }
}
