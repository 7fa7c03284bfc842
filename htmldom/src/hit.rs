use crate::element::{Content, Element};

/// Resolve the element that should receive a click whose raw target has the
/// given ID: the target itself when clickable, otherwise its nearest
/// clickable ancestor. Returns None if the ID is unknown or nothing on the
/// path is clickable.
pub fn find_target<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    let mut path = Vec::new();
    if !collect_path(root, id, &mut path) {
        return None;
    }
    path.into_iter().rev().find(|el| el.clickable)
}

/// ID-returning variant of [`find_target`].
pub fn hit_test(root: &Element, id: &str) -> Option<String> {
    find_target(root, id).and_then(|el| el.id.clone())
}

fn collect_path<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);

    if element.id.as_deref() == Some(id) {
        return true;
    }

    if let Content::Children(children) = &element.content {
        for child in children {
            if collect_path(child, id, path) {
                return true;
            }
        }
    }

    path.pop();
    false
}
