//! SVG serialization of a [`Surface`].

use crate::{ElementId, Surface};
use std::fmt::Write;

impl Surface {
    /// Serializes the whole surface as an SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_element(self.root(), 0, &mut out);
        out
    }

    fn write_element(&self, id: ElementId, depth: usize, out: &mut String) {
        let Some(element) = self.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let kind = element.kind();
        let tag: &str = kind.as_ref();

        let _ = write!(out, "{indent}<{tag}");
        for (name, value) in element.attributes() {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if !element.styles().is_empty() {
            let style = element
                .styles()
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }

        let has_body = element.get_text().is_some()
            || element.get_markup().is_some()
            || !element.children().is_empty();
        if !has_body {
            out.push_str("/>\n");
            return;
        }
        out.push('>');

        if let Some(text) = element.get_text() {
            out.push_str(&escape(text));
        }
        if let Some(markup) = element.get_markup() {
            out.push_str(markup);
        }
        if !element.children().is_empty() {
            out.push('\n');
            for &child in element.children() {
                self.write_element(child, depth + 1, out);
            }
            out.push_str(&indent);
        }

        let _ = writeln!(out, "</{tag}>");
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use crate::{ElementKind, Surface};

    #[test]
    fn test_serialize_tree() {
        let mut surface = Surface::new(200.0, 100.0);
        let root = surface.root();
        let group = surface.append(root, ElementKind::Group);
        surface.update(group, |e| {
            e.attr("transform", "scale(1, -1)");
        });
        let circle = surface.append(group, ElementKind::Circle);
        surface.update(circle, |e| {
            e.attr("r", 3).style("fill", "#000").style("stroke", "#fff");
        });

        let svg = surface.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("<g transform=\"scale(1, -1)\">"));
        assert!(svg.contains("<circle r=\"3\" style=\"fill: #000; stroke: #fff\"/>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped_markup_is_not() {
        let mut surface = Surface::new(10.0, 10.0);
        let root = surface.root();
        let text = surface.append(root, ElementKind::Text);
        surface.update(text, |e| {
            e.text("a < b & c");
        });
        let div = surface.append(root, ElementKind::Div);
        surface.update(div, |e| {
            e.inner_markup("<math><mi>x</mi></math>");
        });

        let svg = surface.to_svg();
        assert!(svg.contains("<text>a &lt; b &amp; c</text>"));
        assert!(svg.contains("<div><math><mi>x</mi></math></div>"));
    }
}
