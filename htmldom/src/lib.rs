pub mod element;
pub mod hit;
pub mod render;

pub use element::{Content, Element, find_element, find_element_mut};
pub use hit::{find_target, hit_test};
pub use render::{escape_attr, escape_text, to_html};
