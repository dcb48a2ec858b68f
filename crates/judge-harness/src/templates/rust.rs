// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rust wrapper template (signature-extraction). The original judging
//! service this system is modeled on has no Rust executor; it is added
//! here as a fourth signature-extraction language alongside C, C++, and
//! Go, parsed with `judge-sigparse::rust`'s `syn`-based scanner rather
//! than a regex, since a `syn::Item::Fn` is already a structured AST and
//! reparsing it with a hand-rolled pattern would throw that structure
//! away.

/// The literal Rust wrapper source. Built with `rustc` directly (no
/// `Cargo.toml` needed for a single-file solution), compiled at `-O`.
pub const RUST_WRAPPER_TEMPLATE: &str = r#"
use std::collections::{HashSet, VecDeque};
use std::io::Read;

#[derive(serde::Deserialize)]
struct Payload {
    function_name: String,
    input: serde_json::Map<String, serde_json::Value>,
}

#[derive(serde::Serialize)]
struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub struct ListNode {
    pub val: i64,
    pub next: Option<Box<ListNode>>,
}

pub struct TreeNode {
    pub val: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

pub struct GraphNode {
    pub val: i64,
    pub neighbors: Vec<std::rc::Rc<std::cell::RefCell<GraphNode>>>,
}

fn build_linked_list(values: &[i64], pos: i64) -> Option<Box<ListNode>> {
    if values.is_empty() {
        return None;
    }
    let mut head: Option<Box<ListNode>> = None;
    for &v in values.iter().rev() {
        head = Some(Box::new(ListNode { val: v, next: head }));
    }
    let _ = pos; // cycle construction is not observable through JSON output
    head
}

fn linked_list_to_array(mut head: &Option<Box<ListNode>>) -> Vec<i64> {
    let mut out = Vec::new();
    while let Some(node) = head {
        out.push(node.val);
        head = &node.next;
    }
    out
}

fn build_tree(values: &[Option<i64>]) -> Option<Box<TreeNode>> {
    if values.is_empty() || values[0].is_none() {
        return None;
    }
    let mut nodes: Vec<Option<TreeNode>> = values
        .iter()
        .map(|v| v.map(|val| TreeNode { val, left: None, right: None }))
        .collect();
    let mut pos = 1usize;
    let mut i = 0usize;
    while i < nodes.len() && pos < nodes.len() {
        if nodes[i].is_some() {
            if pos < nodes.len() {
                let child = nodes[pos].take().map(Box::new);
                nodes[i].as_mut().unwrap().left = child;
                pos += 1;
            }
            if pos < nodes.len() {
                let child = nodes[pos].take().map(Box::new);
                nodes[i].as_mut().unwrap().right = child;
                pos += 1;
            }
        }
        i += 1;
    }
    nodes.into_iter().next().flatten().map(Box::new)
}

fn tree_to_array(root: &Option<Box<TreeNode>>) -> Vec<Option<i64>> {
    let mut out = Vec::new();
    let mut queue: VecDeque<&Option<Box<TreeNode>>> = VecDeque::new();
    queue.push_back(root);
    while let Some(slot) = queue.pop_front() {
        match slot {
            None => out.push(None),
            Some(node) => {
                out.push(Some(node.val));
                queue.push_back(&node.left);
                queue.push_back(&node.right);
            }
        }
    }
    while matches!(out.last(), Some(None)) {
        out.pop();
    }
    out
}

fn build_graph(adj: &[Vec<i64>]) -> Option<std::rc::Rc<std::cell::RefCell<GraphNode>>> {
    use std::cell::RefCell;
    use std::rc::Rc;
    if adj.is_empty() {
        return None;
    }
    let nodes: Vec<_> = (1..=adj.len() as i64)
        .map(|v| Rc::new(RefCell::new(GraphNode { val: v, neighbors: Vec::new() })))
        .collect();
    for (i, neighbors) in adj.iter().enumerate() {
        for &n in neighbors {
            if n >= 1 && (n as usize) <= nodes.len() {
                nodes[i].borrow_mut().neighbors.push(nodes[(n - 1) as usize].clone());
            }
        }
    }
    Some(nodes[0].clone())
}

fn graph_to_adj_list(node: &Option<std::rc::Rc<std::cell::RefCell<GraphNode>>>) -> Vec<Vec<i64>> {
    let Some(start) = node else { return Vec::new() };
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start.clone());
    let mut order = Vec::new();
    while let Some(curr) = queue.pop_front() {
        let ptr = curr.as_ptr() as usize;
        if !visited.insert(ptr) {
            continue;
        }
        for n in &curr.borrow().neighbors {
            if !visited.contains(&(n.as_ptr() as usize)) {
                queue.push_back(n.clone());
            }
        }
        order.push(curr);
    }
    order.sort_by_key(|n| n.borrow().val);
    let max_val = order.iter().map(|n| n.borrow().val).max().unwrap_or(0) as usize;
    let mut result = vec![Vec::new(); max_val];
    for curr in &order {
        let curr_ref = curr.borrow();
        result[(curr_ref.val - 1) as usize] = curr_ref.neighbors.iter().map(|n| n.borrow().val).collect();
    }
    result
}

__SOURCE_CODE_PLACEHOLDER__

fn execute(function_name: &str, input: &serde_json::Map<String, serde_json::Value>) -> Result<serde_json::Value, String> {
    if function_name != "__FUNCTION_NAME_PLACEHOLDER__" {
        return Err(format!("function '{}' not found", function_name));
    }

__PARAM_BINDINGS_PLACEHOLDER__

__CALL_PLACEHOLDER__
}

fn main() {
    let mut raw = String::new();
    if std::io::stdin().read_to_string(&mut raw).is_err() {
        print_output(Output { result: None, error: Some("failed to read input".to_string()) });
        std::process::exit(1);
    }

    if raw.trim().is_empty() {
        print_output(Output { result: None, error: Some("no input provided".to_string()) });
        std::process::exit(1);
    }

    let payload: Payload = match serde_json::from_str(&raw) {
        Ok(p) => p,
        Err(_) => {
            print_output(Output { result: None, error: Some("invalid JSON input".to_string()) });
            std::process::exit(1);
        }
    };

    match execute(&payload.function_name, &payload.input) {
        Ok(value) => print_output(Output { result: Some(value), error: None }),
        Err(message) => {
            print_output(Output { result: None, error: Some(message) });
            std::process::exit(1);
        }
    }
}

fn print_output(output: Output) {
    match serde_json::to_string(&output) {
        Ok(s) => println!("{}", s),
        Err(_) => println!("{{\"error\":\"failed to serialize output\"}}"),
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_every_placeholder_token() {
        for token in [
            "__SOURCE_CODE_PLACEHOLDER__",
            "__FUNCTION_NAME_PLACEHOLDER__",
            "__PARAM_BINDINGS_PLACEHOLDER__",
            "__CALL_PLACEHOLDER__",
        ] {
            assert!(RUST_WRAPPER_TEMPLATE.contains(token), "template missing token {token}");
        }
    }
}
