//! HTML parsing, traversal and serialization
//!
//! - `dom`: parsing and basic node operations
//! - `walker`: document-order snapshots and post-order traversal
//! - `serializer`: turning a DOM back into bytes
//! - `utils`: constants and small predicates shared by the passes

pub mod dom;
pub mod serializer;
pub mod utils;
pub mod walker;

pub use dom::{
    detach_node, find_nodes, get_charset, get_node_attr, get_node_name, html_to_dom,
    is_node_empty, merge_adjacent_text_nodes, remove_node_attr, retain_node_attrs, text_content,
};
pub use serializer::{serialize_document, serialize_node};
pub use utils::{is_blank, is_word_tag, NBSP, WHITESPACES};
pub use walker::{
    collect_elements, collect_elements_named, collect_nodes, find_first_element,
    walk_post_order,
};
