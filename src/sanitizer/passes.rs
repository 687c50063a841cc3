//! The twelve cleaning passes
//!
//! Each pass is a unit struct implementing [`Pass`]. A pass never fails: when
//! there is nothing for it to do (no `<head>`, no tables, no comments) it
//! leaves the tree as it found it.
//!
//! Passes that remove things collect their targets first and only then detach
//! or edit them, so no child list is mutated while being iterated.

use std::sync::OnceLock;

use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;
use tracing::debug;

use crate::parsers::html::dom::{
    detach_node, get_node_attr, get_node_name, is_node_empty, merge_adjacent_text_nodes,
    remove_node_attr, retain_node_attrs,
};
use crate::parsers::html::utils::{
    is_word_tag, HTML_TAG_ALLOWED_ATTRIBUTES, LINK_ATTRIBUTES, NBSP, TABLE_ATTRIBUTES,
    TABLE_CELL_ATTRIBUTES,
};
use crate::parsers::html::walker::{
    collect_elements, collect_elements_named, collect_nodes, find_first_element,
    walk_post_order,
};

static NBSP_RUN_REGEX: OnceLock<Regex> = OnceLock::new();

fn nbsp_run_regex() -> &'static Regex {
    NBSP_RUN_REGEX.get_or_init(|| {
        Regex::new(r"\x{A0}{2,}").expect("nbsp run regex is a valid literal pattern")
    })
}

/// Class names Word puts on nearly everything (`MsoNormal`, `MsoTableGrid`, ...)
const MSO_CLASS_MARKER: &str = "Mso";

/// A single tree transformation
///
/// `apply` receives the document root and edits the tree in place.
pub trait Pass {
    /// Short identifier, used in logs
    fn name(&self) -> &'static str;

    fn apply(&self, document: &Handle);
}

/// Drops every `style` attribute
pub struct RemoveInlineStyles;

impl Pass for RemoveInlineStyles {
    fn name(&self) -> &'static str {
        "remove-inline-styles"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements(document) {
            remove_node_attr(&node, "style");
        }
    }
}

/// Drops `class` attributes that mention an `Mso` class
///
/// The match is a case-sensitive substring match, so `class="MsoNormal intro"`
/// goes away entirely while `class="mso-like"` stays.
pub struct RemoveMsoClasses;

impl Pass for RemoveMsoClasses {
    fn name(&self) -> &'static str {
        "remove-mso-classes"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements(document) {
            if get_node_attr(&node, "class").map_or(false, |class| class.contains(MSO_CLASS_MARKER))
            {
                remove_node_attr(&node, "class");
            }
        }
    }
}

/// Removes `<style>` elements together with their content
pub struct RemoveStyleTags;

impl Pass for RemoveStyleTags {
    fn name(&self) -> &'static str {
        "remove-style-tags"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements_named(document, |name| name == "style") {
            detach_node(&node);
        }
    }
}

/// Removes Office-only elements (`<o:p>`, `<v:shape>`, `<xml>`, ...) along
/// with everything inside them
///
/// This is removal, not unwrapping: text inside `<o:p>` goes too.
pub struct RemoveWordTags;

impl Pass for RemoveWordTags {
    fn name(&self) -> &'static str {
        "remove-word-tags"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements_named(document, is_word_tag) {
            detach_node(&node);
        }
    }
}

/// Strips the first `<html>` element down to its whitelisted attributes
pub struct CleanHtmlTagAttributes;

impl Pass for CleanHtmlTagAttributes {
    fn name(&self) -> &'static str {
        "clean-html-tag-attributes"
    }

    fn apply(&self, document: &Handle) {
        if let Some(html) = find_first_element(document, "html") {
            retain_node_attrs(&html, |attr| {
                HTML_TAG_ALLOWED_ATTRIBUTES.contains(&attr.name.local.as_ref())
            });
        }
    }
}

/// Keeps only `<meta>` children in the first `<head>` element
///
/// Text and comment children count as "not meta" and are removed as well.
pub struct RemoveFromHeadSection;

impl Pass for RemoveFromHeadSection {
    fn name(&self) -> &'static str {
        "remove-from-head-section"
    }

    fn apply(&self, document: &Handle) {
        let Some(head) = find_first_element(document, "head") else {
            return;
        };

        let children: Vec<Handle> = head.children.borrow().clone();
        for child_node in children.iter() {
            if get_node_name(child_node) != Some("meta") {
                detach_node(child_node);
            }
        }
    }
}

/// Removes every comment node, including Word's conditional comments
pub struct RemoveComments;

impl Pass for RemoveComments {
    fn name(&self) -> &'static str {
        "remove-comments"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_nodes(document, |n| matches!(n.data, NodeData::Comment { .. })) {
            detach_node(&node);
        }
    }
}

/// Prunes empty text and element nodes, bottom-up
///
/// Children are pruned before their parent is judged, so `<div><span> </span></div>`
/// loses the whitespace text, then the span, then the div.
pub struct RemoveEmptyNodes;

impl Pass for RemoveEmptyNodes {
    fn name(&self) -> &'static str {
        "remove-empty-nodes"
    }

    fn apply(&self, document: &Handle) {
        walk_post_order(document, &mut |_parent: &Handle, child_node: &Handle| {
            if is_node_empty(child_node) {
                detach_node(child_node);
            }
        });
    }
}

/// Collapses runs of non-breaking spaces into a single one
///
/// Text nodes left next to each other by earlier removals are joined first,
/// so a run split by a removed comment or `<o:p>` collapses too.
pub struct NormalizeNbsp;

impl Pass for NormalizeNbsp {
    fn name(&self) -> &'static str {
        "normalize-nbsp"
    }

    fn apply(&self, document: &Handle) {
        merge_adjacent_text_nodes(document);

        for node in collect_nodes(document, |n| matches!(n.data, NodeData::Text { .. })) {
            if let NodeData::Text { ref contents } = node.data {
                let nbsp_run = nbsp_run_regex();
                let mut tendril = contents.borrow_mut();
                if !nbsp_run.is_match(&tendril) {
                    continue;
                }

                let replacement = nbsp_run
                    .replace_all(&tendril, NBSP.to_string().as_str())
                    .into_owned();
                tendril.clear();
                tendril.push_slice(&replacement);
            }
        }
    }
}

/// Drops the `link` and `vlink` colour attributes wherever they appear
pub struct RemoveLinkAttributes;

impl Pass for RemoveLinkAttributes {
    fn name(&self) -> &'static str {
        "remove-link-attributes"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements(document) {
            for attr_name in LINK_ATTRIBUTES {
                remove_node_attr(&node, attr_name);
            }
        }
    }
}

/// Drops fixed layout attributes from tables and table cells
pub struct RemoveTableAttributes;

impl Pass for RemoveTableAttributes {
    fn name(&self) -> &'static str {
        "remove-table-attributes"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements(document) {
            let attr_names: &[&str] = match get_node_name(&node) {
                Some(name) if name.eq_ignore_ascii_case("table") => TABLE_ATTRIBUTES,
                Some(name) if name.eq_ignore_ascii_case("td") => TABLE_CELL_ATTRIBUTES,
                _ => continue,
            };

            for attr_name in attr_names {
                remove_node_attr(&node, attr_name);
            }
        }
    }
}

/// Makes sure every attribute comes out double-quoted
///
/// The DOM keeps no quoting style; the serializer writes every attribute as
/// `name="value"` and escapes quotes inside values. What it cannot fix is a
/// name that itself holds a quote or `=`, which the tokenizer produces from
/// broken markup such as `<td width=50% ">`. Such attributes have no
/// well-formed quoted form and are dropped here, with a `debug!` line per
/// attribute.
pub struct EnsureQuotedAttributes;

impl Pass for EnsureQuotedAttributes {
    fn name(&self) -> &'static str {
        "ensure-quoted-attributes"
    }

    fn apply(&self, document: &Handle) {
        for node in collect_elements(document) {
            retain_node_attrs(&node, |attr| {
                if !has_unquotable_name(&attr.name.local) {
                    return true;
                }

                debug!(
                    element = get_node_name(&node).unwrap_or_default(),
                    attribute = %attr.name.local,
                    "dropping attribute with unquotable name"
                );
                false
            });
        }
    }
}

fn has_unquotable_name(attr_name: &str) -> bool {
    attr_name.contains(['"', '\'', '<', '='])
}
