use std::io;

use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

/// Serializes a whole document into UTF-8 bytes
///
/// html5ever writes every attribute as `name="value"` and escapes U+00A0 in
/// text back into `&nbsp;`.
pub fn serialize_document(dom: RcDom) -> io::Result<Vec<u8>> {
    serialize_node(&dom.document)
}

/// Serializes the children of a node (the node's inner HTML)
pub fn serialize_node(node: &Handle) -> io::Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    let serializable: SerializableHandle = node.clone().into();

    serialize(&mut buf, &serializable, SerializeOpts::default())?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::html::dom::html_to_dom;

    #[test]
    fn test_serialize_quotes_and_nbsp() {
        let dom = html_to_dom(b"<p class=a nowrap>x&nbsp;y</p>", "utf-8").unwrap();
        let html = String::from_utf8(serialize_document(dom).unwrap()).unwrap();

        assert_eq!(
            html,
            "<html><head></head><body><p class=\"a\" nowrap=\"\">x&nbsp;y</p></body></html>"
        );
    }
}
