// SPDX-License-Identifier: MIT OR Apache-2.0
//! Java wrapper template (reflection via `java.lang.reflect` + Jackson,
//! the same `jackson-databind`/`jackson-core`/`jackson-annotations` jars
//! the Kotlin template compiles against, since both share the
//! `java-sandbox` image).

/// The literal `Main.java` wrapper source.
pub const JAVA_WRAPPER_TEMPLATE: &str = r#"
import com.fasterxml.jackson.databind.ObjectMapper;
import com.fasterxml.jackson.databind.node.ArrayNode;
import com.fasterxml.jackson.databind.node.JsonNodeFactory;
import com.fasterxml.jackson.databind.node.ObjectNode;
import com.fasterxml.jackson.databind.JsonNode;

import java.lang.reflect.Method;
import java.lang.reflect.Parameter;
import java.util.*;

public class Main {

    static class ListNode {
        int val;
        ListNode next;
        ListNode(int val) { this.val = val; }
    }

    static class TreeNode {
        int val;
        TreeNode left;
        TreeNode right;
        TreeNode(int val) { this.val = val; }
    }

    static class GraphNode {
        int val;
        List<GraphNode> neighbors = new ArrayList<>();
        GraphNode(int val) { this.val = val; }
    }

    static ListNode buildLinkedList(List<Integer> values, int pos) {
        if (values.isEmpty()) return null;
        ListNode[] nodes = new ListNode[values.size()];
        for (int i = 0; i < values.size(); i++) nodes[i] = new ListNode(values.get(i));
        for (int i = 0; i < nodes.length - 1; i++) nodes[i].next = nodes[i + 1];
        if (pos >= 0 && pos < nodes.length) nodes[nodes.length - 1].next = nodes[pos];
        return nodes[0];
    }

    static List<Integer> linkedListToArray(ListNode head) {
        List<Integer> result = new ArrayList<>();
        Set<ListNode> seen = new HashSet<>();
        while (head != null && seen.add(head)) {
            result.add(head.val);
            head = head.next;
        }
        return result;
    }

    static TreeNode buildTree(List<Integer> values) {
        if (values.isEmpty() || values.get(0) == null) return null;
        TreeNode[] nodes = new TreeNode[values.size()];
        for (int i = 0; i < values.size(); i++) {
            Integer v = values.get(i);
            nodes[i] = v == null ? null : new TreeNode(v);
        }
        int pos = 1;
        for (int i = 0; i < nodes.length && pos < nodes.length; i++) {
            if (nodes[i] == null) continue;
            if (pos < nodes.length) nodes[i].left = nodes[pos++];
            if (pos < nodes.length) nodes[i].right = nodes[pos++];
        }
        return nodes[0];
    }

    static ArrayNode treeToArray(TreeNode root) {
        ArrayNode result = JsonNodeFactory.instance.arrayNode();
        if (root == null) return result;
        Deque<TreeNode> queue = new ArrayDeque<>();
        queue.add(root);
        while (!queue.isEmpty()) {
            TreeNode curr = queue.poll();
            if (curr == null) {
                result.addNull();
                continue;
            }
            result.add(curr.val);
            queue.add(curr.left);
            queue.add(curr.right);
        }
        while (result.size() > 0 && result.get(result.size() - 1).isNull()) {
            result.remove(result.size() - 1);
        }
        return result;
    }

    static GraphNode buildGraph(List<List<Integer>> adjList) {
        if (adjList.isEmpty()) return null;
        GraphNode[] nodes = new GraphNode[adjList.size()];
        for (int i = 0; i < nodes.length; i++) nodes[i] = new GraphNode(i + 1);
        for (int i = 0; i < adjList.size(); i++) {
            for (int n : adjList.get(i)) {
                if (n >= 1 && n <= nodes.length) nodes[i].neighbors.add(nodes[n - 1]);
            }
        }
        return nodes[0];
    }

    static List<List<Integer>> graphToAdjList(GraphNode node) {
        if (node == null) return new ArrayList<>();
        Set<GraphNode> visited = new HashSet<>();
        Deque<GraphNode> queue = new ArrayDeque<>();
        queue.add(node);
        List<GraphNode> order = new ArrayList<>();
        while (!queue.isEmpty()) {
            GraphNode curr = queue.poll();
            if (curr == null || !visited.add(curr)) continue;
            order.add(curr);
            for (GraphNode n : curr.neighbors) if (!visited.contains(n)) queue.add(n);
        }
        order.sort(Comparator.comparingInt(n -> n.val));
        int maxVal = order.stream().mapToInt(n -> n.val).max().orElse(0);
        List<List<Integer>> result = new ArrayList<>();
        for (int i = 0; i < maxVal; i++) result.add(new ArrayList<>());
        for (GraphNode curr : order) {
            List<Integer> row = new ArrayList<>();
            for (GraphNode n : curr.neighbors) row.add(n.val);
            result.set(curr.val - 1, row);
        }
        return result;
    }

    static Object normalizeOutput(Object value) {
        if (value instanceof ListNode) return linkedListToArray((ListNode) value);
        if (value instanceof TreeNode) return treeToArray((TreeNode) value);
        if (value instanceof GraphNode) return graphToAdjList((GraphNode) value);
        return value;
    }

    __SOURCE_CODE_PLACEHOLDER__

    public static void main(String[] args) throws Exception {
        ObjectMapper mapper = new ObjectMapper();
        String raw = new String(System.in.readAllBytes());

        if (raw.isBlank()) {
            System.out.println(mapper.writeValueAsString(Map.of("error", "no input provided")));
            System.exit(1);
        }

        ObjectNode payload;
        try {
            payload = (ObjectNode) mapper.readTree(raw);
        } catch (Exception e) {
            System.out.println(mapper.writeValueAsString(Map.of("error", "invalid JSON input")));
            System.exit(1);
            return;
        }

        try {
            String functionName = payload.get("function_name").asText();
            JsonNode input = payload.has("input") ? payload.get("input") : mapper.createObjectNode();

            Solution solution = new Solution();
            Method target = Arrays.stream(Solution.class.getMethods())
                    .filter(m -> m.getName().equals(functionName))
                    .findFirst()
                    .orElseThrow(() -> new NoSuchMethodException("function '" + functionName + "' not found"));

            Parameter[] params = target.getParameters();
            Object[] callArgs = new Object[params.length];
            for (int i = 0; i < params.length; i++) {
                JsonNode node = input.get(params[i].getName());
                Class<?> type = params[i].getType();
                if (type == ListNode.class) {
                    callArgs[i] = buildLinkedList(mapper.convertValue(node, List.class), -1);
                } else if (type == TreeNode.class) {
                    callArgs[i] = buildTree(mapper.convertValue(node, List.class));
                } else if (type == GraphNode.class) {
                    callArgs[i] = buildGraph(mapper.convertValue(node, List.class));
                } else {
                    callArgs[i] = mapper.convertValue(node, type);
                }
            }

            Object result = target.invoke(solution, callArgs);
            Object normalized = normalizeOutput(result);
            System.out.println(mapper.writeValueAsString(Map.of("result", normalized)));
        } catch (Exception exc) {
            Throwable cause = exc.getCause() != null ? exc.getCause() : exc;
            System.out.println(mapper.writeValueAsString(Map.of("error", cause.getMessage() == null ? "Runtime error" : cause.getMessage())));
            System.exit(1);
        }
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_source_placeholder() {
        assert!(JAVA_WRAPPER_TEMPLATE.contains("__SOURCE_CODE_PLACEHOLDER__"));
    }
}
