use wasm_bindgen::intern;

use crate::{
    host::{AttachmentPoint, Host, Stylesheet},
    node::{Node, NodeKind},
    util,
};

/// A host backed by the page's DOM.
///
/// Outside a browser there is no document, so nothing resolves.
#[derive(Clone, Default, Debug)]
pub struct BrowserHost {
    document: Option<web_sys::Document>,
}

impl BrowserHost {
    pub fn new() -> Self {
        Self {
            document: util::document(),
        }
    }

    pub fn with_document(document: web_sys::Document) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub fn document(&self) -> Option<&web_sys::Document> {
        self.document.as_ref()
    }

    fn build(
        &self,
        document: &web_sys::Document,
        node: &Node,
        parent: &web_sys::Node,
        before: Option<&web_sys::Node>,
    ) {
        match node.kind() {
            NodeKind::Element {
                name,
                namespace,
                attrs,
            } => {
                let element = if let Some(ns) = namespace {
                    document.create_element_ns(Some(intern(ns)), intern(name))
                } else {
                    document.create_element(intern(name))
                }
                .expect("element name rejected by the DOM");

                for (key, value) in &*attrs.borrow() {
                    element
                        .set_attribute(intern(key), value)
                        .expect("attribute name rejected by the DOM");
                }

                for child in &*node.children_ref() {
                    self.build(document, child, &element, None);
                }

                parent
                    .insert_before(&element, before)
                    .expect("failed to insert element");
            }
            NodeKind::Text(content) => {
                let text = document.create_text_node(&content.borrow());
                parent
                    .insert_before(&text, before)
                    .expect("failed to insert text");
            }
            NodeKind::Fragment | NodeKind::Component(_) => {
                for child in &*node.children_ref() {
                    self.build(document, child, parent, before);
                }
            }
        }
    }
}

impl Host for BrowserHost {
    type Target = web_sys::Element;

    fn resolve(&self, id: &str) -> Option<AttachmentPoint<web_sys::Element>> {
        self.document
            .as_ref()?
            .get_element_by_id(id)
            .map(|element| AttachmentPoint::new(id, element))
    }

    fn resolve_anchor(
        &self,
        point: &AttachmentPoint<web_sys::Element>,
        id: &str,
    ) -> Option<web_sys::Element> {
        let children = point.target().children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .find(|element| element.id() == id)
    }

    fn attach(
        &self,
        point: &AttachmentPoint<web_sys::Element>,
        content: &Node,
        anchor: Option<&web_sys::Element>,
    ) {
        let Some(document) = &self.document else {
            return;
        };
        let anchor: Option<&web_sys::Node> = anchor.map(|element| &**element);
        self.build(document, content, point.target(), anchor);
    }

    fn apply_stylesheet(&self, sheet: &Stylesheet) {
        let Some(document) = &self.document else {
            return;
        };
        let Some(head) = document.head() else {
            tracing::warn!("document has no <head>, skipping stylesheet");
            return;
        };

        let element = match sheet {
            Stylesheet::Href(href) => {
                let link = document
                    .create_element(intern("link"))
                    .expect("failed to create <link>");
                link.set_attribute("rel", "stylesheet")
                    .and_then(|_| link.set_attribute("href", href))
                    .expect("failed to set stylesheet attributes");
                link
            }
            Stylesheet::Inline(css) => {
                let style = document
                    .create_element(intern("style"))
                    .expect("failed to create <style>");
                style.set_text_content(Some(css.as_str()));
                style
            }
        };
        head.append_child(&element)
            .expect("failed to append stylesheet");
    }
}

#[cfg(all(test, target_family = "wasm"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::{
        bootstrap::{Bootstrapper, MountOptions},
        component::ComponentDefinition,
        config::BootstrapConfig,
    };

    wasm_bindgen_test_configure!(run_in_browser);

    fn fresh_point(id: &str) -> web_sys::Element {
        let document = util::document().expect("running in a browser");
        let div = document.create_element("div").unwrap();
        div.set_id(id);
        document.body().unwrap().append_child(&div).unwrap();
        div
    }

    #[wasm_bindgen_test]
    fn builds_native_tree() {
        let div = fresh_point("browser-build");
        let host = BrowserHost::new();
        let point = host.resolve("browser-build").unwrap();

        let content = Node::component("Card", || {
            Node::element("section")
                .with_attr("class", "card")
                .with_child("hello")
        });
        host.attach(&point, &content, None);

        assert_eq!(
            div.inner_html(),
            "<section class=\"card\">hello</section>"
        );
    }

    #[wasm_bindgen_test]
    fn anchor_must_be_a_direct_child() {
        let div = fresh_point("browser-anchor");
        let document = util::document().unwrap();
        let child = document.create_element("span").unwrap();
        child.set_id("browser-anchor-child");
        div.append_child(&child).unwrap();

        let host = BrowserHost::new();
        let point = host.resolve("browser-anchor").unwrap();
        assert!(host.resolve_anchor(&point, "browser-anchor-child").is_some());
        assert!(host.resolve_anchor(&point, "browser-build").is_none());

        let anchor = host.resolve_anchor(&point, "browser-anchor-child");
        host.attach(&point, &Node::text("first"), anchor.as_ref());
        assert_eq!(
            div.inner_html(),
            "first<span id=\"browser-anchor-child\"></span>"
        );
    }

    #[wasm_bindgen_test]
    fn anchor_ignores_earlier_duplicate_ids() {
        let decoy = fresh_point("browser-dup-child");
        let div = fresh_point("browser-dup");
        let document = util::document().unwrap();
        let child = document.create_element("span").unwrap();
        child.set_id("browser-dup-child");
        div.append_child(&child).unwrap();

        let host = BrowserHost::new();
        let point = host.resolve("browser-dup").unwrap();
        let anchor = host
            .resolve_anchor(&point, "browser-dup-child")
            .expect("direct child found");

        assert!(anchor.is_same_node(Some(&*child)));
        assert!(!anchor.is_same_node(Some(&*decoy)));
    }

    #[wasm_bindgen_test]
    fn configured_mount_adds_stylesheets_to_head() {
        fresh_point("browser-styled");
        let config = BootstrapConfig {
            target: "browser-styled".into(),
            anchor: None,
            stylesheets: vec![
                Stylesheet::Href("browser-style.css".into()),
                Stylesheet::Inline(".browser-styled { color: red; }".into()),
            ],
        };
        let definition = ComponentDefinition::new("Styled", || Node::text("styled"));

        let _instance = Bootstrapper::with_config(BrowserHost::new(), &config)
            .mount_with(&definition, MountOptions::from(&config))
            .unwrap();

        let head = util::document().unwrap().head().unwrap();
        let link = head
            .query_selector("link[href=\"browser-style.css\"]")
            .unwrap()
            .expect("<link> appended");
        assert_eq!(link.get_attribute("rel").as_deref(), Some("stylesheet"));

        let styles = head.get_elements_by_tag_name("style");
        let inline = (0..styles.length())
            .filter_map(|i| styles.item(i))
            .find(|style| {
                style.text_content().as_deref() == Some(".browser-styled { color: red; }")
            });
        assert!(inline.is_some());
    }

    #[wasm_bindgen_test]
    fn stylesheet_skipped_without_head() {
        let document = web_sys::Document::new().unwrap();
        let host = BrowserHost::with_document(document.clone());

        host.apply_stylesheet(&Stylesheet::Href("nowhere.css".into()));

        assert!(document.head().is_none());
        assert!(document.document_element().is_none());
    }

    #[wasm_bindgen_test]
    fn missing_point_does_not_resolve() {
        assert!(BrowserHost::new().resolve("browser-missing").is_none());
    }
}
