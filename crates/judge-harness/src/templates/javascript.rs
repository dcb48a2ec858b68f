// SPDX-License-Identifier: MIT OR Apache-2.0
//! JavaScript wrapper template (reflection via `Function.length`/parameter
//! names parsed out of the function's own source text, since plain
//! JavaScript carries no type annotations to introspect). Same
//! `{"function_name", "input"}` / `{"result"|"error"}` stdio protocol as
//! the other reflection languages.

/// The literal JavaScript (Node) wrapper source.
pub const JS_WRAPPER_TEMPLATE: &str = r#"
class ListNode {
  constructor(val, next = null) {
    this.val = val;
    this.next = next;
  }
}

class TreeNode {
  constructor(val, left = null, right = null) {
    this.val = val;
    this.left = left;
    this.right = right;
  }
}

class GraphNode {
  constructor(val, neighbors = []) {
    this.val = val;
    this.neighbors = neighbors;
  }
}

function buildLinkedList(values, pos = -1) {
  if (!values.length) return null;
  const nodes = values.map((v) => new ListNode(v));
  for (let i = 0; i < nodes.length - 1; i++) nodes[i].next = nodes[i + 1];
  if (pos >= 0 && pos < nodes.length) nodes[nodes.length - 1].next = nodes[pos];
  return nodes[0];
}

function linkedListToArray(head) {
  const out = [];
  const seen = new Set();
  while (head && !seen.has(head)) {
    seen.add(head);
    out.push(head.val);
    head = head.next;
  }
  return out;
}

function buildTree(values) {
  if (!values.length || values[0] === null) return null;
  const nodes = values.map((v) => (v === null ? null : new TreeNode(v)));
  let pos = 1;
  for (let i = 0; i < nodes.length && pos < nodes.length; i++) {
    if (!nodes[i]) continue;
    if (pos < nodes.length) nodes[i].left = nodes[pos++];
    if (pos < nodes.length) nodes[i].right = nodes[pos++];
  }
  return nodes[0];
}

function treeToArray(root) {
  if (!root) return [];
  const out = [];
  const queue = [root];
  while (queue.length) {
    const curr = queue.shift();
    if (!curr) {
      out.push(null);
      continue;
    }
    out.push(curr.val);
    queue.push(curr.left, curr.right);
  }
  while (out.length && out[out.length - 1] === null) out.pop();
  return out;
}

function buildGraph(adjList) {
  if (!adjList.length) return null;
  const nodes = adjList.map((_, i) => new GraphNode(i + 1));
  adjList.forEach((neighbors, i) => {
    neighbors.forEach((n) => {
      if (n >= 1 && n <= nodes.length) nodes[i].neighbors.push(nodes[n - 1]);
    });
  });
  return nodes[0];
}

function graphToAdjList(node) {
  if (!node) return [];
  const visited = new Set();
  const queue = [node];
  const order = [];
  while (queue.length) {
    const curr = queue.shift();
    if (!curr || visited.has(curr)) continue;
    visited.add(curr);
    order.push(curr);
    curr.neighbors.forEach((n) => {
      if (n && !visited.has(n)) queue.push(n);
    });
  }
  order.sort((a, b) => a.val - b.val);
  const maxVal = order.reduce((m, n) => Math.max(m, n.val), 0);
  const result = Array.from({ length: maxVal }, () => []);
  order.forEach((curr) => {
    result[curr.val - 1] = curr.neighbors.map((n) => n.val);
  });
  return result;
}

function normalizeOutput(value) {
  if (value instanceof ListNode) return linkedListToArray(value);
  if (value instanceof TreeNode) return treeToArray(value);
  if (value instanceof GraphNode) return graphToAdjList(value);
  return value === undefined ? null : value;
}

__SOURCE_CODE_PLACEHOLDER__

function readStdin() {
  return new Promise((resolve) => {
    let data = "";
    process.stdin.setEncoding("utf8");
    process.stdin.on("data", (chunk) => (data += chunk));
    process.stdin.on("end", () => resolve(data));
  });
}

function parseParamNames(fn) {
  const src = fn.toString();
  const match = src.match(/\(([^)]*)\)/);
  if (!match || !match[1].trim()) return [];
  return match[1].split(",").map((p) => p.trim().split("=")[0].trim());
}

async function main() {
  const raw = await readStdin();
  if (!raw.trim()) {
    console.log(JSON.stringify({ error: "no input provided" }));
    process.exit(1);
  }

  let payload;
  try {
    payload = JSON.parse(raw);
  } catch (e) {
    console.log(JSON.stringify({ error: "invalid JSON input" }));
    process.exit(1);
  }

  try {
    const target = typeof globalThis[payload.function_name] === "function"
      ? globalThis[payload.function_name]
      : eval(`typeof ${payload.function_name} === "function" ? ${payload.function_name} : undefined`);

    if (!target) {
      throw new Error(`function '${payload.function_name}' not found`);
    }

    const input = payload.input || {};
    const paramNames = parseParamNames(target);
    const args = paramNames.map((name) => input[name]);
    const result = normalizeOutput(target(...args));
    console.log(JSON.stringify({ result }));
  } catch (err) {
    console.log(JSON.stringify({ error: err.message || "Runtime error" }));
    process.exit(1);
  }
}

main();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_source_placeholder() {
        assert!(JS_WRAPPER_TEMPLATE.contains("__SOURCE_CODE_PLACEHOLDER__"));
    }
}
