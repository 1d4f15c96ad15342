//! HTML rendering of field nodes.
//!
//! Every user-derived value is escaped here, at render time. Invalidation
//! messages are emitted as-is because they may contain the configured
//! separator markup.

use crate::attributes::AttributeStore;
use crate::error::RenderError;
use crate::field::{FieldKind, FieldNode};
use crate::submission::SubmittedValue;

/// Width given to date inputs that have none.
const DEFAULT_DATE_WIDTH: &str = "80px";

/// Length of a formatted date.
const DATE_MAX_LENGTH: usize = 10;

/// Size given to file inputs that have none.
const DEFAULT_FILE_SIZE: &str = "40";

/// Render a node, refusing when its construction-time checks failed.
pub(crate) fn render_node(node: &FieldNode) -> Result<String, RenderError> {
    node.ensure_renderable()?;

    let mut out = match node.kind() {
        FieldKind::Hidden => input(node, node.styles(), None, None),
        FieldKind::TextArea => label(node) + &textarea(node),
        FieldKind::Dropdown => label(node) + &select(node),
        FieldKind::Checkbox | FieldKind::Radio => choices(node),
        FieldKind::Date => date(node),
        FieldKind::File => {
            let size = node.size().unwrap_or(DEFAULT_FILE_SIZE);
            label(node) + &input(node, node.styles(), Some(size), None)
        }
        // Composites render through their children.
        FieldKind::DateRange | FieldKind::Address => String::new(),
        _ => label(node) + &input(node, node.styles(), node.size(), node.max_length()),
    };
    out.push_str(&invalidations(node));
    Ok(out)
}

/// The invalidation block of a node, empty when the node is valid.
pub(crate) fn invalidations(node: &FieldNode) -> String {
    if node.is_valid() {
        return String::new();
    }
    format!(
        "<div class=\"invalidations\">{}</div>\n",
        node.invalidations().join(&node.config().error_separator)
    )
}

/// Escape a value for use in text content or a quoted attribute.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Incremental builder for one opening tag.
struct Tag {
    out: String,
}

impl Tag {
    fn open(name: &str) -> Self {
        Self {
            out: format!("<{}", name),
        }
    }

    fn attr(mut self, key: &str, value: &str) -> Self {
        self.out.push_str(&format!(" {}=\"{}\"", key, escape(value)));
        self
    }

    fn attr_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => self.attr(key, value),
            _ => self,
        }
    }

    fn flag(mut self, key: &str, on: bool) -> Self {
        if on {
            self.out.push(' ');
            self.out.push_str(key);
        }
        self
    }

    /// Id, classes, style, disabled state, title and data attributes.
    fn presentation(self, node: &FieldNode, style: &AttributeStore) -> Self {
        let classes = node.classes().join(" ");
        let mut tag = self
            .attr("id", node.id())
            .attr_opt("class", Some(&classes))
            .attr_opt("style", Some(&style.to_inline_style()));
        if let Some(disabled) = node.disabled() {
            tag = tag.attr(disabled.as_str(), disabled.as_str());
        }
        tag = tag.attr_opt("title", node.title());
        for (key, value) in node.data_attributes().iter() {
            let key = if key.starts_with("data-") {
                key.to_string()
            } else {
                format!("data-{}", key)
            };
            tag = tag.attr(&key, value);
        }
        tag
    }

    fn void(mut self) -> String {
        self.out.push_str(" />\n");
        self.out
    }

    fn close(mut self) -> String {
        self.out.push('>');
        self.out
    }
}

fn label(node: &FieldNode) -> String {
    match node.label() {
        Some(text) if node.render_with_label() && !text.is_empty() => {
            let class = if node.is_required() {
                " class=\"required\""
            } else {
                ""
            };
            format!(
                "<label for=\"{}\"{}>{}</label> ",
                escape(node.id()),
                class,
                escape(text)
            )
        }
        _ => String::new(),
    }
}

fn single_value(node: &FieldNode) -> Option<String> {
    match node.effective_value()? {
        SubmittedValue::Single(value) => Some(value),
        SubmittedValue::Many(values) => values.into_iter().next(),
    }
}

fn is_chosen(node: &FieldNode, value: &str) -> bool {
    node.effective_value()
        .is_some_and(|chosen| chosen.iter().any(|v| v == value))
}

fn input(
    node: &FieldNode,
    style: &AttributeStore,
    size: Option<&str>,
    max_length: Option<usize>,
) -> String {
    let value = single_value(node);
    let max_length = max_length.map(|len| len.to_string());
    Tag::open("input")
        .attr("type", node.kind().input_type())
        .attr("name", node.name())
        .attr_opt("value", value.as_deref())
        .presentation(node, style)
        .attr_opt("size", size)
        .attr_opt("maxlength", max_length.as_deref())
        .flag("required", node.is_required())
        .attr_opt("placeholder", node.placeholder())
        .flag("autofocus", node.auto_focus())
        .void()
}

/// A date input inside a container that carries the hidden state.
fn date(node: &FieldNode) -> String {
    let mut style = node.styles().without("display");
    if !style.contains("width") {
        style.put("width", DEFAULT_DATE_WIDTH);
    }
    let hidden = if node.is_hidden() {
        " style=\"display:none;\""
    } else {
        ""
    };
    format!(
        "<div id=\"{}-container\"{}>{}{}</div>\n",
        escape(node.id()),
        hidden,
        label(node),
        input(node, &style, node.size(), Some(DATE_MAX_LENGTH)),
    )
}

fn textarea(node: &FieldNode) -> String {
    let open = Tag::open("textarea")
        .attr("name", node.name())
        .presentation(node, node.styles())
        .flag("required", node.is_required())
        .attr_opt("placeholder", node.placeholder())
        .flag("autofocus", node.auto_focus())
        .close();
    format!(
        "{}{}</textarea>\n",
        open,
        escape(&single_value(node).unwrap_or_default())
    )
}

fn select(node: &FieldNode) -> String {
    let mut out = Tag::open("select")
        .attr("name", node.name())
        .presentation(node, node.styles())
        .attr_opt("size", node.size())
        .flag("required", node.is_required())
        .flag("autofocus", node.auto_focus())
        .close();
    out.push('\n');
    for option in node.options() {
        let tag = Tag::open("option")
            .attr("value", &option.value)
            .flag("selected", is_chosen(node, &option.value))
            .close();
        out.push_str(&format!("{}{}</option>\n", tag, escape(&option.label)));
    }
    out.push_str("</select>\n");
    out
}

/// A checkbox or radio group; one input and label per option.
fn choices(node: &FieldNode) -> String {
    let mut out = label(node);
    if node.options().is_empty() {
        out.push_str(&input(node, node.styles(), None, None));
        return out;
    }

    let name = match node.kind() {
        FieldKind::Checkbox if !node.name().ends_with("[]") => format!("{}[]", node.name()),
        _ => node.name().to_string(),
    };
    for (i, option) in node.options().iter().enumerate() {
        let id = format!("{}-{}", node.id(), i);
        let classes = node.classes().join(" ");
        let mut tag = Tag::open("input")
            .attr("type", node.kind().input_type())
            .attr("id", &id)
            .attr("name", &name)
            .attr("value", &option.value)
            .attr_opt("class", Some(&classes))
            .attr_opt("style", Some(&node.styles().to_inline_style()));
        if let Some(disabled) = node.disabled() {
            tag = tag.attr(disabled.as_str(), disabled.as_str());
        }
        let input = tag
            .flag("checked", is_chosen(node, &option.value))
            .close();
        out.push_str(&format!(
            "{}<label for=\"{}\">{}</label>\n",
            input,
            escape(&id),
            escape(&option.label)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_tag_builder() {
        let tag = Tag::open("input")
            .attr("name", "q")
            .attr_opt("value", None)
            .attr_opt("class", Some(""))
            .flag("required", true)
            .void();
        assert_eq!(tag, "<input name=\"q\" required />\n");
    }
}
