//! Conditional wrapping of view children.

use crate::view::{ElementNode, ViewNode};

/// Put `children` inside `wrapper` when `condition` holds, otherwise return
/// them unchanged. Any children `wrapper` already had are replaced.
pub fn wrap_if(condition: bool, wrapper: ElementNode, children: ViewNode) -> ViewNode {
    if condition {
        wrapper.with_children(vec![children]).into()
    } else {
        children
    }
}
