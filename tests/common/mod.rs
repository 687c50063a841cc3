// Shared helpers for the integration tests
//
// Pulled into each test crate with `include!`, so every item here must build
// on its own in any of them.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io::Cursor;

use wordclean::parsers::html::{
    collect_nodes, find_first_element, get_node_attr, get_node_name, is_node_empty,
    serialize_node,
};

pub struct HtmlTestHelper;

impl HtmlTestHelper {
    pub fn create_test_dom(html: &str) -> RcDom {
        let mut input = Cursor::new(html);
        parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut input)
            .unwrap()
    }

    pub fn to_html(node: &Handle) -> String {
        String::from_utf8(serialize_node(node).unwrap()).unwrap()
    }

    /// A trimmed down "Save as Web Page" export, with the usual Word debris
    pub fn create_word_export() -> String {
        r##"<html xmlns:v="urn:schemas-microsoft-com:vml"
xmlns:o="urn:schemas-microsoft-com:office:office"
xmlns:w="urn:schemas-microsoft-com:office:word"
xmlns="http://www.w3.org/TR/REC-html40" lang="NO-BOK">

<head>
<meta http-equiv=Content-Type content="text/html; charset=utf-8">
<meta name=ProgId content=Word.Document>
<meta name=Generator content="Microsoft Word 15">
<title>Årsrapport</title>
<!--[if gte mso 9]><xml>
 <o:DocumentProperties>
  <o:Author>Kari Nordmann</o:Author>
 </o:DocumentProperties>
</xml><![endif]-->
<link rel=File-List href="rapport_files/filelist.xml">
<style>
<!--
p.MsoNormal {margin:0cm; font-size:11.0pt;}
-->
</style>
</head>

<body lang=NO-BOK link="#0563C1" vlink="#954F72" style='tab-interval:35.4pt'>
<div class=WordSection1>
<p class=MsoTitle>Årsrapport 2023</p>
<p class=MsoNormal>Første&nbsp;&nbsp;&nbsp;avsnitt med <b style='mso-bidi-font-weight:normal'>fet</b> tekst.<o:p></o:p></p>
<p class=MsoNormal><o:p>&nbsp;</o:p></p>
<table class=MsoTableGrid border=1 cellspacing=0 cellpadding=0 width=604
 style='border-collapse:collapse'>
 <tr>
  <td width=302 valign=top style='width:226.5pt'>
  <p class=MsoNormal>Inntekter<o:p></o:p></p>
  </td>
  <td width=302 valign=top>
  <p class=MsoNormal>1&nbsp;200&nbsp;000</p>
  </td>
 </tr>
</table>
<p class=MsoNormal><v:shape id="_x0000_i1025" type="#_x0000_t75"><v:imagedata
  src="rapport_files/image001.png" o:title=""></v:imagedata></v:shape></p>
<!-- page break -->
<p class=MsoNormal>  </p>
<p class=intro>Siste avsnitt</p>
</div>
</body>
</html>"##
            .to_string()
    }
}

pub struct AssertionHelper;

impl AssertionHelper {
    /// Checks every post-condition of a cleaned tree
    pub fn assert_clean(document: &Handle) {
        for node in collect_nodes(document, |_| true) {
            if !std::rc::Rc::ptr_eq(&node, document) {
                assert!(!is_node_empty(&node), "empty node left: {:?}", describe(&node));
            }

            match &node.data {
                NodeData::Comment { contents } => panic!("comment left: {contents}"),
                NodeData::Text { contents } => {
                    assert!(
                        !contents.borrow().contains("\u{a0}\u{a0}"),
                        "nbsp run left in {:?}",
                        contents.borrow()
                    );
                }
                NodeData::Element { name, attrs, .. } => {
                    let tag_name: &str = &name.local;
                    assert!(
                        !(tag_name.starts_with("o:")
                            || tag_name.starts_with("v:")
                            || tag_name == "xml"
                            || tag_name == "w:worddocument"
                            || tag_name == "style"),
                        "element left: {tag_name}"
                    );

                    for attr in attrs.borrow().iter() {
                        let attr_name: &str = &attr.name.local;
                        assert_ne!(attr_name, "style");
                        assert_ne!(attr_name, "link");
                        assert_ne!(attr_name, "vlink");
                        assert!(!attr_name.contains(['"', '\'', '<', '=']));
                        if attr_name == "class" {
                            assert!(!attr.value.contains("Mso"), "Mso class left");
                        }
                    }

                    if tag_name == "table" {
                        for attr_name in ["width", "border", "cellspacing", "cellpadding"] {
                            assert_eq!(get_node_attr(&node, attr_name), None);
                        }
                    }
                    if tag_name == "td" {
                        assert_eq!(get_node_attr(&node, "width"), None);
                    }
                }
                _ => {}
            }
        }

        if let Some(html) = find_first_element(document, "html") {
            if let NodeData::Element { attrs, .. } = &html.data {
                assert!(attrs.borrow().iter().all(|attr| &*attr.name.local == "lang"));
            }
        }

        if let Some(head) = find_first_element(document, "head") {
            for child in head.children.borrow().iter() {
                assert_eq!(get_node_name(child), Some("meta"));
            }
        }
    }
}

fn describe(node: &Handle) -> String {
    match &node.data {
        NodeData::Element { name, .. } => format!("<{}>", name.local),
        NodeData::Text { contents } => format!("{:?}", contents.borrow()),
        _ => "other".to_string(),
    }
}
