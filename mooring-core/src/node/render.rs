use std::fmt::{self, Write};

use bitflags::bitflags;

use crate::node::{Node, NodeKind};

const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Mode: u8 {
        /// One node per line, children indented by two spaces.
        const PRETTY = 0b01;
        /// Wrap component boundaries in `<!--Name-->` / `<!--/Name-->` comments.
        const MARKERS = 0b10;
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::PRETTY
    }
}

pub fn render_to_string(mode: Mode, node: &Node) -> String {
    let mut out = String::new();
    render(&mut out, mode, node).expect("writing to a String cannot fail");
    out
}

pub fn render<W: Write>(w: &mut W, mode: Mode, node: &Node) -> fmt::Result {
    let nl = |w: &mut W| {
        if mode.contains(Mode::PRETTY) {
            writeln!(w)
        } else {
            Ok(())
        }
    };

    match node.kind() {
        NodeKind::Element {
            name,
            namespace,
            attrs,
        } => {
            let full_name = if let Some(ns) = namespace {
                format!("{ns}:{name}")
            } else {
                name.clone()
            };

            let attr_str = attrs
                .borrow()
                .iter()
                .map(|(key, value)| format!(" {}=\"{}\"", key, html_escape(value)))
                .collect::<Vec<_>>()
                .join("");

            if VOID.contains(&name.as_str()) {
                write!(w, "<{full_name}{attr_str} />")?;
                nl(w)
            } else {
                write!(w, "<{full_name}{attr_str}>")?;
                nl(w)?;
                render_children(w, mode, true, node)?;
                write!(w, "</{full_name}>")?;
                nl(w)
            }
        }
        NodeKind::Text(content) => {
            w.write_str(&html_escape(&content.borrow()))?;
            nl(w)
        }
        NodeKind::Component(component) if mode.contains(Mode::MARKERS) => {
            write!(w, "<!--{}-->", component.name())?;
            nl(w)?;
            render_children(w, mode, false, node)?;
            write!(w, "<!--/{}-->", component.name())?;
            nl(w)
        }
        NodeKind::Fragment | NodeKind::Component(_) => render_children(w, mode, false, node),
    }
}

fn render_children<W: Write>(w: &mut W, mode: Mode, indent: bool, node: &Node) -> fmt::Result {
    if indent && mode.contains(Mode::PRETTY) {
        let mut buf = String::new();
        for child in &*node.children_ref() {
            render(&mut buf, mode, child)?;
        }

        for line in buf.lines() {
            writeln!(w, "  {}", line)?;
        }
    } else {
        for child in &*node.children_ref() {
            render(w, mode, child)?;
        }
    }
    Ok(())
}

// See https://cheatsheetseries.owasp.org/cheatsheets/Cross_Site_Scripting_Prevention_Cheat_Sheet.html#output-encoding-for-html-contexts
fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_output() {
        let node = Node::element("p")
            .with_attr("title", "a \"quote\"")
            .with_child("1 < 2")
            .with_child(Node::element("br"));

        assert_eq!(
            render_to_string(Mode::empty(), &node),
            "<p title=\"a &quot;quote&quot;\">1 &lt; 2<br /></p>"
        );
    }

    #[test]
    fn pretty_output_indents_children() {
        let node = Node::element("ul").with_child(Node::element("li").with_child("one"));

        assert_eq!(
            render_to_string(Mode::PRETTY, &node),
            "<ul>\n  <li>\n    one\n  </li>\n</ul>\n"
        );
    }

    #[test]
    fn markers_wrap_components() {
        let node = Node::component("Greeting", || Node::text("hi"));

        assert_eq!(render_to_string(Mode::empty(), &node), "hi");
        assert_eq!(
            render_to_string(Mode::MARKERS, &node),
            "<!--Greeting-->hi<!--/Greeting-->"
        );
    }

    #[test]
    fn namespaced_elements() {
        let node = Node::element_ns("svg", "svg");
        assert_eq!(render_to_string(Mode::empty(), &node), "<svg:svg></svg:svg>");
    }
}
