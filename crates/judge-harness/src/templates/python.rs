// SPDX-License-Identifier: MIT OR Apache-2.0
//! Python wrapper template (reflection: the marshaling code inspects the
//! user's function via `inspect.signature` at run time rather than a
//! signature parsed ahead of time by `judge-sigparse`). The only
//! placeholder is the user's source; parameter binding, tree/list/graph
//! construction, and output normalization all happen inside the container
//! from the JSON payload's own shape plus the function's declared
//! annotations.

/// The literal Python wrapper source. Read from stdin as
/// `{"function_name": ..., "input": {...}}`; writes `{"result": ...}` or
/// `{"error": ...}` to stdout.
pub const PYTHON_WRAPPER_TEMPLATE: &str = r#"
import sys
import json
import inspect


class ListNode:
    def __init__(self, val=0, next=None):
        self.val = val
        self.next = next


class TreeNode:
    def __init__(self, val=0, left=None, right=None):
        self.val = val
        self.left = left
        self.right = right


class Node:
    def __init__(self, val=0, neighbors=None):
        self.val = val
        self.neighbors = neighbors or []


def build_linked_list(values, pos=-1):
    if not values:
        return None
    nodes = [ListNode(v) for v in values]
    for i in range(len(nodes) - 1):
        nodes[i].next = nodes[i + 1]
    if 0 <= pos < len(nodes):
        nodes[-1].next = nodes[pos]
    return nodes[0]


def linked_list_to_array(head):
    out = []
    seen = set()
    while head is not None and id(head) not in seen:
        seen.add(id(head))
        out.append(head.val)
        head = head.next
    return out


def build_tree(values):
    if not values or values[0] is None:
        return None
    nodes = [TreeNode(v) if v is not None else None for v in values]
    pos = 1
    for i, node in enumerate(nodes):
        if node is None:
            continue
        if pos < len(nodes):
            node.left = nodes[pos]
            pos += 1
        if pos < len(nodes):
            node.right = nodes[pos]
            pos += 1
    return nodes[0]


def tree_to_array(root):
    if root is None:
        return []
    out = []
    queue = [root]
    while queue:
        curr = queue.pop(0)
        if curr is None:
            out.append(None)
            continue
        out.append(curr.val)
        queue.append(curr.left)
        queue.append(curr.right)
    while out and out[-1] is None:
        out.pop()
    return out


def build_graph(adj_list):
    if not adj_list:
        return None
    nodes = [Node(i + 1) for i in range(len(adj_list))]
    for i, neighbors in enumerate(adj_list):
        for n in neighbors:
            if 1 <= n <= len(nodes):
                nodes[i].neighbors.append(nodes[n - 1])
    return nodes[0]


def graph_to_adj_list(node):
    if node is None:
        return []
    visited = {}
    queue = [node]
    order = []
    while queue:
        curr = queue.pop(0)
        if curr is None or id(curr) in visited:
            continue
        visited[id(curr)] = curr
        order.append(curr)
        for neighbor in curr.neighbors:
            if neighbor is not None and id(neighbor) not in visited:
                queue.append(neighbor)
    order.sort(key=lambda n: n.val)
    max_val = max((n.val for n in order), default=0)
    result = [[] for _ in range(max_val)]
    for curr in order:
        result[curr.val - 1] = [n.val for n in curr.neighbors]
    return result


def bind_argument(annotation, raw):
    if annotation is ListNode:
        return build_linked_list(raw["values"], raw.get("pos", -1)) if isinstance(raw, dict) else build_linked_list(raw)
    if annotation is TreeNode:
        return build_tree(raw)
    if annotation is Node:
        return build_graph(raw)
    return raw


def normalize_output(value):
    if isinstance(value, ListNode):
        return linked_list_to_array(value)
    if isinstance(value, TreeNode):
        return tree_to_array(value)
    if isinstance(value, Node):
        return graph_to_adj_list(value)
    return value


__SOURCE_CODE_PLACEHOLDER__


def _execute(function_name, raw_input):
    target = globals().get(function_name)
    if target is None or not callable(target):
        raise NameError(f"function '{function_name}' not found")

    sig = inspect.signature(target)
    kwargs = {}
    for param_name, param in sig.parameters.items():
        if param_name not in raw_input:
            continue
        kwargs[param_name] = bind_argument(param.annotation, raw_input[param_name])

    result = target(**kwargs)
    return normalize_output(result)


def main():
    raw = sys.stdin.read()
    if not raw.strip():
        print(json.dumps({"error": "no input provided"}))
        sys.exit(1)

    try:
        payload = json.loads(raw)
    except json.JSONDecodeError:
        print(json.dumps({"error": "invalid JSON input"}))
        sys.exit(1)

    try:
        result = _execute(payload["function_name"], payload.get("input", {}))
    except Exception as exc:
        print(json.dumps({"error": str(exc)}))
        sys.exit(1)

    try:
        print(json.dumps({"result": result}))
    except TypeError:
        print(json.dumps({"error": "failed to serialize output"}))
        sys.exit(1)


if __name__ == "__main__":
    main()
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_source_placeholder() {
        assert!(PYTHON_WRAPPER_TEMPLATE.contains("__SOURCE_CODE_PLACEHOLDER__"));
    }
}
