// SPDX-License-Identifier: MIT OR Apache-2.0
//! C# wrapper template (reflection via `System.Reflection` + `System.Text.Json`).
//! Unlike the other templates, the rendered program is not a single file:
//! `judge-executors::csharp` also needs the accompanying `.csproj`
//! descriptor this module exports, since `dotnet build` compiles a project
//! directory rather than a single source file.

/// The literal `Program.cs` wrapper source.
pub const CSHARP_WRAPPER_TEMPLATE: &str = r#"
using System;
using System.Linq;
using System.Reflection;
using System.Text.Json;
using System.Text.Json.Nodes;

public class ListNode {
    public int val;
    public ListNode next;
    public ListNode(int val = 0, ListNode next = null) { this.val = val; this.next = next; }
}

public class TreeNode {
    public int val;
    public TreeNode left;
    public TreeNode right;
    public TreeNode(int val = 0, TreeNode left = null, TreeNode right = null) {
        this.val = val; this.left = left; this.right = right;
    }
}

public class GraphNode {
    public int val;
    public System.Collections.Generic.List<GraphNode> neighbors = new();
    public GraphNode(int val = 0) { this.val = val; }
}

public static class Harness {
    static ListNode BuildLinkedList(int[] values, int pos = -1) {
        if (values.Length == 0) return null;
        var nodes = values.Select(v => new ListNode(v)).ToArray();
        for (int i = 0; i < nodes.Length - 1; i++) nodes[i].next = nodes[i + 1];
        if (pos >= 0 && pos < nodes.Length) nodes[^1].next = nodes[pos];
        return nodes[0];
    }

    static System.Collections.Generic.List<int> LinkedListToArray(ListNode head) {
        var result = new System.Collections.Generic.List<int>();
        var seen = new System.Collections.Generic.HashSet<ListNode>();
        while (head != null && seen.Add(head)) {
            result.Add(head.val);
            head = head.next;
        }
        return result;
    }

    static TreeNode BuildTree(int?[] values) {
        if (values.Length == 0 || values[0] == null) return null;
        var nodes = values.Select(v => v.HasValue ? new TreeNode(v.Value) : null).ToArray();
        int pos = 1;
        for (int i = 0; i < nodes.Length && pos < nodes.Length; i++) {
            if (nodes[i] == null) continue;
            if (pos < nodes.Length) nodes[i].left = nodes[pos++];
            if (pos < nodes.Length) nodes[i].right = nodes[pos++];
        }
        return nodes[0];
    }

    static JsonArray TreeToArray(TreeNode root) {
        var result = new JsonArray();
        if (root == null) return result;
        var queue = new System.Collections.Generic.Queue<TreeNode>();
        queue.Enqueue(root);
        while (queue.Count > 0) {
            var curr = queue.Dequeue();
            if (curr == null) { result.Add((int?)null); continue; }
            result.Add(curr.val);
            queue.Enqueue(curr.left);
            queue.Enqueue(curr.right);
        }
        while (result.Count > 0 && result[^1] == null) result.RemoveAt(result.Count - 1);
        return result;
    }

    static GraphNode BuildGraph(int[][] adjList) {
        if (adjList.Length == 0) return null;
        var nodes = Enumerable.Range(0, adjList.Length).Select(i => new GraphNode(i + 1)).ToArray();
        for (int i = 0; i < adjList.Length; i++) {
            foreach (var n in adjList[i]) {
                if (n >= 1 && n <= nodes.Length) nodes[i].neighbors.Add(nodes[n - 1]);
            }
        }
        return nodes[0];
    }

    static JsonArray GraphToAdjList(GraphNode node) {
        var result = new JsonArray();
        if (node == null) return result;
        var visited = new System.Collections.Generic.HashSet<GraphNode>();
        var queue = new System.Collections.Generic.Queue<GraphNode>();
        queue.Enqueue(node);
        var order = new System.Collections.Generic.List<GraphNode>();
        while (queue.Count > 0) {
            var curr = queue.Dequeue();
            if (curr == null || !visited.Add(curr)) continue;
            order.Add(curr);
            foreach (var n in curr.neighbors) if (n != null && !visited.Contains(n)) queue.Enqueue(n);
        }
        order.Sort((a, b) => a.val.CompareTo(b.val));
        int maxVal = order.Count == 0 ? 0 : order.Max(n => n.val);
        var rows = Enumerable.Range(0, maxVal).Select(_ => new JsonArray()).ToArray();
        foreach (var curr in order) {
            rows[curr.val - 1] = new JsonArray(curr.neighbors.Select(n => (JsonNode)JsonValue.Create(n.val)).ToArray());
        }
        var wrapper = new JsonArray();
        foreach (var r in rows) wrapper.Add(r);
        return wrapper;
    }

    public static int Main() {
        var raw = Console.In.ReadToEnd();
        if (string.IsNullOrWhiteSpace(raw)) {
            Console.WriteLine(JsonSerializer.Serialize(new { error = "no input provided" }));
            return 1;
        }

        JsonNode payload;
        try {
            payload = JsonNode.Parse(raw);
        } catch (JsonException) {
            Console.WriteLine(JsonSerializer.Serialize(new { error = "invalid JSON input" }));
            return 1;
        }

        try {
            var functionName = payload["function_name"]!.GetValue<string>();
            var input = payload["input"] as JsonObject ?? new JsonObject();

            var method = typeof(Solution).GetMethod(functionName, BindingFlags.Public | BindingFlags.Static);
            if (method == null) throw new Exception($"function '{functionName}' not found");

            var args = method.GetParameters()
                .Select(p => BindArgument(p.ParameterType, input[p.Name]))
                .ToArray();

            var result = method.Invoke(null, args);
            var normalized = NormalizeOutput(result);

            Console.WriteLine(JsonSerializer.Serialize(new { result = normalized }));
            return 0;
        } catch (Exception exc) {
            Console.WriteLine(JsonSerializer.Serialize(new { error = exc.InnerException?.Message ?? exc.Message }));
            return 1;
        }
    }

    static object BindArgument(Type paramType, JsonNode raw) {
        if (paramType == typeof(ListNode)) return BuildLinkedList(raw!.AsArray().Select(n => n!.GetValue<int>()).ToArray());
        if (paramType == typeof(TreeNode)) return BuildTree(raw!.AsArray().Select(n => n == null ? (int?)null : n.GetValue<int>()).ToArray());
        if (paramType == typeof(GraphNode)) return BuildGraph(raw!.AsArray().Select(n => n!.AsArray().Select(x => x!.GetValue<int>()).ToArray()).ToArray());
        return JsonSerializer.Deserialize(raw!.ToJsonString(), paramType);
    }

    static object NormalizeOutput(object value) {
        return value switch {
            ListNode ln => LinkedListToArray(ln),
            TreeNode tn => TreeToArray(tn),
            GraphNode gn => GraphToAdjList(gn),
            _ => value,
        };
    }
}

__SOURCE_CODE_PLACEHOLDER__
"#;

/// `SandboxApp.csproj`, written alongside the rendered `Program.cs`.
pub const CSHARP_PROJECT_DESCRIPTOR: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <TargetFramework>net8.0</TargetFramework>
    <ImplicitUsings>enable</ImplicitUsings>
    <Nullable>disable</Nullable>
  </PropertyGroup>
</Project>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_source_placeholder() {
        assert!(CSHARP_WRAPPER_TEMPLATE.contains("__SOURCE_CODE_PLACEHOLDER__"));
    }

    #[test]
    fn project_descriptor_targets_net8() {
        assert!(CSHARP_PROJECT_DESCRIPTOR.contains("net8.0"));
    }
}
