// SPDX-License-Identifier: MIT OR Apache-2.0
//! TypeScript wrapper template (reflection). Compiled with `tsc` before
//! `node` runs the emitted JS, so the marshaling code can be fully typed;
//! structurally the same `{"function_name","input"}` / `{"result"|"error"}`
//! protocol as the JavaScript template.

/// The literal TypeScript wrapper source, compiled to `main.js` before
/// execution.
pub const TS_WRAPPER_TEMPLATE: &str = r#"
class ListNode {
  val: number;
  next: ListNode | null;
  constructor(val: number, next: ListNode | null = null) {
    this.val = val;
    this.next = next;
  }
}

class TreeNode {
  val: number;
  left: TreeNode | null;
  right: TreeNode | null;
  constructor(val: number, left: TreeNode | null = null, right: TreeNode | null = null) {
    this.val = val;
    this.left = left;
    this.right = right;
  }
}

class GraphNode {
  val: number;
  neighbors: GraphNode[];
  constructor(val: number, neighbors: GraphNode[] = []) {
    this.val = val;
    this.neighbors = neighbors;
  }
}

function buildLinkedList(values: number[], pos = -1): ListNode | null {
  if (!values.length) return null;
  const nodes = values.map((v) => new ListNode(v));
  for (let i = 0; i < nodes.length - 1; i++) nodes[i].next = nodes[i + 1];
  if (pos >= 0 && pos < nodes.length) nodes[nodes.length - 1].next = nodes[pos];
  return nodes[0];
}

function linkedListToArray(head: ListNode | null): number[] {
  const out: number[] = [];
  const seen = new Set<ListNode>();
  while (head && !seen.has(head)) {
    seen.add(head);
    out.push(head.val);
    head = head.next;
  }
  return out;
}

function buildTree(values: Array<number | null>): TreeNode | null {
  if (!values.length || values[0] === null) return null;
  const nodes: Array<TreeNode | null> = values.map((v) => (v === null ? null : new TreeNode(v)));
  let pos = 1;
  for (let i = 0; i < nodes.length && pos < nodes.length; i++) {
    const n = nodes[i];
    if (!n) continue;
    if (pos < nodes.length) n.left = nodes[pos++];
    if (pos < nodes.length) n.right = nodes[pos++];
  }
  return nodes[0];
}

function treeToArray(root: TreeNode | null): Array<number | null> {
  if (!root) return [];
  const out: Array<number | null> = [];
  const queue: Array<TreeNode | null> = [root];
  while (queue.length) {
    const curr = queue.shift() as TreeNode | null;
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

function buildGraph(adjList: number[][]): GraphNode | null {
  if (!adjList.length) return null;
  const nodes = adjList.map((_, i) => new GraphNode(i + 1));
  adjList.forEach((neighbors, i) => {
    neighbors.forEach((n) => {
      if (n >= 1 && n <= nodes.length) nodes[i].neighbors.push(nodes[n - 1]);
    });
  });
  return nodes[0];
}

function graphToAdjList(node: GraphNode | null): number[][] {
  if (!node) return [];
  const visited = new Set<GraphNode>();
  const queue: GraphNode[] = [node];
  const order: GraphNode[] = [];
  while (queue.length) {
    const curr = queue.shift()!;
    if (!curr || visited.has(curr)) continue;
    visited.add(curr);
    order.push(curr);
    curr.neighbors.forEach((n) => {
      if (n && !visited.has(n)) queue.push(n);
    });
  }
  order.sort((a, b) => a.val - b.val);
  const maxVal = order.reduce((m, n) => Math.max(m, n.val), 0);
  const result: number[][] = Array.from({ length: maxVal }, () => []);
  order.forEach((curr) => {
    result[curr.val - 1] = curr.neighbors.map((n) => n.val);
  });
  return result;
}

function normalizeOutput(value: unknown): unknown {
  if (value instanceof ListNode) return linkedListToArray(value);
  if (value instanceof TreeNode) return treeToArray(value);
  if (value instanceof GraphNode) return graphToAdjList(value);
  return value === undefined ? null : value;
}

__SOURCE_CODE_PLACEHOLDER__

function readStdin(): Promise<string> {
  return new Promise((resolve) => {
    let data = "";
    process.stdin.setEncoding("utf8");
    process.stdin.on("data", (chunk) => (data += chunk));
    process.stdin.on("end", () => resolve(data));
  });
}

function parseParamNames(fn: (...args: unknown[]) => unknown): string[] {
  const src = fn.toString();
  const match = src.match(/\(([^)]*)\)/);
  if (!match || !match[1].trim()) return [];
  return match[1].split(",").map((p) => p.trim().split(":")[0].trim());
}

async function main() {
  const raw = await readStdin();
  if (!raw.trim()) {
    console.log(JSON.stringify({ error: "no input provided" }));
    process.exit(1);
  }

  let payload: { function_name: string; input?: Record<string, unknown> };
  try {
    payload = JSON.parse(raw);
  } catch (e) {
    console.log(JSON.stringify({ error: "invalid JSON input" }));
    process.exit(1);
    return;
  }

  try {
    const target = (globalThis as Record<string, unknown>)[payload.function_name] as
      | ((...args: unknown[]) => unknown)
      | undefined;

    if (typeof target !== "function") {
      throw new Error(`function '${payload.function_name}' not found`);
    }

    const input = payload.input || {};
    const paramNames = parseParamNames(target);
    const args = paramNames.map((name) => input[name]);
    const result = normalizeOutput(target(...args));
    console.log(JSON.stringify({ result }));
  } catch (err) {
    console.log(JSON.stringify({ error: (err as Error).message || "Runtime error" }));
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
        assert!(TS_WRAPPER_TEMPLATE.contains("__SOURCE_CODE_PLACEHOLDER__"));
    }
}
