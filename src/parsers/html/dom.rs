use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::Attribute;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::core::{parse_content_type, CleanError};

use super::utils::is_blank;

/// Parses HTML bytes into a DOM
///
/// The bytes are decoded with `document_encoding` when it names a known
/// encoding, and read as (lossy) UTF-8 otherwise. A byte order mark wins over
/// the given label.
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> Result<RcDom, CleanError> {
    let s: String = if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        string.into_owned()
    } else {
        String::from_utf8_lossy(data).into_owned()
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .map_err(|e| CleanError::Parse(e.to_string()))
}

/// Finds element nodes matching a path of tag names
///
/// `find_nodes(&doc, &["html", "head", "meta"])` returns every `<meta>` nested
/// in a `<head>` nested in an `<html>`, at any depth in between.
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    let Some((node_name, rest)) = node_names.split_first() else {
        return found_nodes;
    };

    if get_node_name(node) == Some(*node_name) {
        if rest.is_empty() {
            found_nodes.push(node.clone());
        } else {
            for child_node in node.children.borrow().iter() {
                found_nodes.append(&mut find_nodes(child_node, rest));
            }
            return found_nodes;
        }
    }

    for child_node in node.children.borrow().iter() {
        found_nodes.append(&mut find_nodes(child_node, node_names));
    }

    found_nodes
}

/// Returns the tag name of an element node
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Returns the value of an attribute, if the node is an element carrying it
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Removes an attribute from an element
///
/// Nodes that are not elements, or that do not carry the attribute, are left
/// untouched.
pub fn remove_node_attr(node: &Handle, attr_name: &str) {
    retain_node_attrs(node, |attr| &*attr.name.local != attr_name);
}

/// Keeps only the attributes for which `keep` returns true
pub fn retain_node_attrs<F>(node: &Handle, keep: F)
where
    F: FnMut(&Attribute) -> bool,
{
    if let NodeData::Element { attrs, .. } = &node.data {
        attrs.borrow_mut().retain(keep);
    }
}

/// Detaches a node (and with it, its whole subtree) from its parent
///
/// Detaching a node that has no parent does nothing.
pub fn detach_node(node: &Handle) {
    let parent = node.parent.take().and_then(|weak| weak.upgrade());

    if let Some(parent) = parent {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
}

/// Joins runs of sibling text nodes into one, throughout the subtree
///
/// Removing a comment or an element between two text nodes leaves them side
/// by side; a reparse of the serialized output would see them as one.
pub fn merge_adjacent_text_nodes(node: &Handle) {
    {
        let mut children = node.children.borrow_mut();
        let mut merged: Vec<Handle> = Vec::with_capacity(children.len());

        for child_node in children.drain(..) {
            if let (Some(previous), NodeData::Text { contents }) = (merged.last(), &child_node.data)
            {
                if let NodeData::Text {
                    contents: previous_contents,
                } = &previous.data
                {
                    previous_contents.borrow_mut().push_slice(&contents.borrow());
                    child_node.parent.set(None);
                    continue;
                }
            }
            merged.push(child_node);
        }

        *children = merged;
    }

    for child_node in node.children.borrow().iter() {
        merge_adjacent_text_nodes(child_node);
    }
}

/// Concatenates the text of every descendant text node
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    push_text_content(node, &mut text);
    text
}

fn push_text_content(node: &Handle, text: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        text.push_str(&contents.borrow());
        return;
    }

    for child_node in node.children.borrow().iter() {
        push_text_content(child_node, text);
    }
}

/// Decides whether a node carries nothing worth keeping
///
/// - text: blank once ASCII whitespace is trimmed
/// - element: no children and no text
/// - anything else (comments, doctype, the document itself): never empty
///
/// Meant to be called once the node's own children went through pruning, so
/// that an element whose children were all removed reads as childless.
pub fn is_node_empty(node: &Handle) -> bool {
    match &node.data {
        NodeData::Text { contents } => is_blank(&contents.borrow()),
        NodeData::Element { .. } => {
            node.children.borrow().is_empty() && is_blank(&text_content(node))
        }
        _ => false,
    }
}

/// Extracts the charset a document declares for itself
///
/// Handles both `<meta charset="...">` and the
/// `<meta http-equiv="content-type" content="text/html; charset=...">` form Word
/// writes.
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, &["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset, _is_base64) =
                    parse_content_type(&meta_content_type_node_attr_value);
                return Some(charset);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dom(html: &str) -> RcDom {
        html_to_dom(html.as_bytes(), "utf-8").unwrap()
    }

    #[test]
    fn test_find_nodes_by_path() {
        let dom = dom("<html><head><meta charset=utf-8><title>T</title></head><body><meta name=x></body></html>");

        assert_eq!(find_nodes(&dom.document, &["html", "head", "meta"]).len(), 1);
        assert_eq!(find_nodes(&dom.document, &["meta"]).len(), 2);
        assert!(find_nodes(&dom.document, &[]).is_empty());
    }

    #[test]
    fn test_merge_adjacent_text_nodes() {
        let dom = dom("<p>a<!-- c -->b<i>x</i>c</p>");
        let p = find_nodes(&dom.document, &["p"])[0].clone();
        let comment = p.children.borrow()[1].clone();
        detach_node(&comment);

        merge_adjacent_text_nodes(&dom.document);

        let children = p.children.borrow();
        assert_eq!(children.len(), 3);
        assert_eq!(text_content(&children[0]), "ab");
        assert_eq!(get_node_name(&children[1]), Some("i"));
        assert_eq!(text_content(&children[2]), "c");
    }

    #[test]
    fn test_get_node_attr() {
        let dom = dom("<p class=MsoNormal lang=no>x</p>");
        let p = &find_nodes(&dom.document, &["p"])[0];

        assert_eq!(get_node_attr(p, "class"), Some("MsoNormal".to_string()));
        assert_eq!(get_node_attr(p, "style"), None);
        assert_eq!(get_node_attr(&dom.document, "class"), None);
    }

    #[test]
    fn test_remove_node_attr_absent_is_noop() {
        let dom = dom("<p class=a>x</p>");
        let p = &find_nodes(&dom.document, &["p"])[0];

        remove_node_attr(p, "style");
        assert_eq!(get_node_attr(p, "class"), Some("a".to_string()));

        remove_node_attr(p, "class");
        assert_eq!(get_node_attr(p, "class"), None);

        remove_node_attr(p, "class");
        remove_node_attr(&dom.document, "class");
    }

    #[test]
    fn test_detach_node_twice() {
        let dom = dom("<div><span>a</span><b>b</b></div>");
        let span = find_nodes(&dom.document, &["span"]).remove(0);

        detach_node(&span);
        detach_node(&span);

        assert!(find_nodes(&dom.document, &["span"]).is_empty());
        assert_eq!(find_nodes(&dom.document, &["b"]).len(), 1);
    }

    #[test]
    fn test_text_content() {
        let dom = dom("<div>a<span> b <i>c</i></span></div>");
        let div = &find_nodes(&dom.document, &["div"])[0];

        assert_eq!(text_content(div), "a b c");
    }

    #[test]
    fn test_is_node_empty() {
        let dom = dom("<div><p> \n </p><p>&nbsp;</p><p>x</p><br><!-- c --></div>");
        let div = &find_nodes(&dom.document, &["div"])[0];
        let children: Vec<Handle> = div.children.borrow().clone();

        // <p> with whitespace text is not childless yet
        assert!(!is_node_empty(&children[0]));
        assert!(is_node_empty(&children[0].children.borrow()[0]));
        // &nbsp; counts as content
        assert!(!is_node_empty(&children[1].children.borrow()[0]));
        assert!(!is_node_empty(&children[2]));
        // childless void element
        assert!(is_node_empty(&children[3]));
        // comments are never pruned by emptiness
        assert!(!is_node_empty(&children[4]));
        assert!(!is_node_empty(&dom.document));
    }

    #[test]
    fn test_get_charset() {
        let dom = dom("<html><head><meta http-equiv=Content-Type content=\"text/html; charset=windows-1252\"></head></html>");
        assert_eq!(get_charset(&dom.document), Some("windows-1252".to_string()));

        let dom = super::html_to_dom(b"<meta charset=\"iso-8859-1\">", "utf-8").unwrap();
        assert_eq!(get_charset(&dom.document), Some("iso-8859-1".to_string()));

        let dom = super::html_to_dom(b"<p>x</p>", "utf-8").unwrap();
        assert_eq!(get_charset(&dom.document), None);
    }

    #[test]
    fn test_html_to_dom_decodes_declared_encoding() {
        let dom = html_to_dom(b"<p>bl\xe5b\xe6r</p>", "windows-1252").unwrap();
        let p = &find_nodes(&dom.document, &["p"])[0];

        assert_eq!(text_content(p), "blåbær");
    }
}
