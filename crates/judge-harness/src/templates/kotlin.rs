// SPDX-License-Identifier: MIT OR Apache-2.0
//! Kotlin wrapper template (reflection via `kotlin-reflect` + Jackson,
//! using the same `jackson-databind`/`jackson-core` jars the image already
//! vendors for compilation against `LIB_CLASSPATH`). Entry point is a
//! top-level `main`, compiled by `kotlinc` into `MainKt`.

/// The literal `Main.kt` wrapper source.
pub const KOTLIN_WRAPPER_TEMPLATE: &str = r#"
import com.fasterxml.jackson.databind.ObjectMapper
import com.fasterxml.jackson.databind.node.ObjectNode
import com.fasterxml.jackson.databind.node.ArrayNode
import com.fasterxml.jackson.databind.node.JsonNodeFactory
import kotlin.reflect.full.memberFunctions
import kotlin.reflect.jvm.javaType

class ListNode(var `val`: Int, var next: ListNode? = null)
class TreeNode(var `val`: Int, var left: TreeNode? = null, var right: TreeNode? = null)
class GraphNode(var `val`: Int, var neighbors: MutableList<GraphNode> = mutableListOf())

fun buildLinkedList(values: List<Int>, pos: Int = -1): ListNode? {
    if (values.isEmpty()) return null
    val nodes = values.map { ListNode(it) }
    for (i in 0 until nodes.size - 1) nodes[i].next = nodes[i + 1]
    if (pos in nodes.indices) nodes.last().next = nodes[pos]
    return nodes[0]
}

fun linkedListToArray(head: ListNode?): List<Int> {
    val result = mutableListOf<Int>()
    val seen = mutableSetOf<ListNode>()
    var curr = head
    while (curr != null && seen.add(curr)) {
        result.add(curr.`val`)
        curr = curr.next
    }
    return result
}

fun buildTree(values: List<Int?>): TreeNode? {
    if (values.isEmpty() || values[0] == null) return null
    val nodes = values.map { it?.let { v -> TreeNode(v) } }.toMutableList()
    var pos = 1
    var i = 0
    while (i < nodes.size && pos < nodes.size) {
        val node = nodes[i]
        if (node != null) {
            if (pos < nodes.size) node.left = nodes[pos++]
            if (pos < nodes.size) node.right = nodes[pos++]
        }
        i++
    }
    return nodes[0]
}

fun treeToArray(root: TreeNode?): ArrayNode {
    val result = JsonNodeFactory.instance.arrayNode()
    if (root == null) return result
    val queue = ArrayDeque<TreeNode?>()
    queue.add(root)
    while (queue.isNotEmpty()) {
        val curr = queue.removeFirst()
        if (curr == null) {
            result.addNull()
            continue
        }
        result.add(curr.`val`)
        queue.add(curr.left)
        queue.add(curr.right)
    }
    while (result.size() > 0 && result.get(result.size() - 1).isNull) {
        result.remove(result.size() - 1)
    }
    return result
}

fun buildGraph(adjList: List<List<Int>>): GraphNode? {
    if (adjList.isEmpty()) return null
    val nodes = (1..adjList.size).map { GraphNode(it) }
    adjList.forEachIndexed { i, neighbors ->
        neighbors.forEach { n -> if (n in 1..nodes.size) nodes[i].neighbors.add(nodes[n - 1]) }
    }
    return nodes[0]
}

fun graphToAdjList(node: GraphNode?): List<List<Int>> {
    if (node == null) return emptyList()
    val visited = mutableSetOf<GraphNode>()
    val queue = ArrayDeque<GraphNode>()
    queue.add(node)
    val order = mutableListOf<GraphNode>()
    while (queue.isNotEmpty()) {
        val curr = queue.removeFirst()
        if (!visited.add(curr)) continue
        order.add(curr)
        curr.neighbors.forEach { if (it !in visited) queue.add(it) }
    }
    order.sortBy { it.`val` }
    val maxVal = order.maxOfOrNull { it.`val` } ?: 0
    val result = MutableList(maxVal) { mutableListOf<Int>() }
    order.forEach { result[it.`val` - 1] = it.neighbors.map { n -> n.`val` }.toMutableList() }
    return result
}

fun normalizeOutput(value: Any?): Any? = when (value) {
    is ListNode -> linkedListToArray(value)
    is TreeNode -> treeToArray(value)
    is GraphNode -> graphToAdjList(value)
    else -> value
}

__SOURCE_CODE_PLACEHOLDER__

fun main() {
    val raw = System.`in`.bufferedReader().readText()
    val mapper = ObjectMapper()

    if (raw.isBlank()) {
        println(mapper.writeValueAsString(mapOf("error" to "no input provided")))
        kotlin.system.exitProcess(1)
    }

    val payload: ObjectNode
    try {
        payload = mapper.readTree(raw) as ObjectNode
    } catch (e: Exception) {
        println(mapper.writeValueAsString(mapOf("error" to "invalid JSON input")))
        kotlin.system.exitProcess(1)
    }

    try {
        val functionName = payload.get("function_name").asText()
        val input = payload.get("input") as? ObjectNode ?: mapper.createObjectNode()

        val function = Solution::class.memberFunctions.find { it.name == functionName }
            ?: throw NoSuchMethodException("function '$functionName' not found")

        val instance = Solution()
        val args = function.parameters.drop(1).map { param ->
            val node = input.get(param.name)
            when (param.type.javaType) {
                ListNode::class.java -> buildLinkedList(mapper.convertValue(node, List::class.java) as List<Int>)
                TreeNode::class.java -> buildTree(mapper.convertValue(node, List::class.java) as List<Int?>)
                GraphNode::class.java -> buildGraph(mapper.convertValue(node, List::class.java) as List<List<Int>>)
                else -> mapper.convertValue(node, Any::class.java)
            }
        }

        val result = function.call(instance, *args.toTypedArray())
        val normalized = normalizeOutput(result)
        println(mapper.writeValueAsString(mapOf("result" to normalized)))
    } catch (exc: Exception) {
        println(mapper.writeValueAsString(mapOf("error" to (exc.cause?.message ?: exc.message ?: "Runtime error"))))
        kotlin.system.exitProcess(1)
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_source_placeholder() {
        assert!(KOTLIN_WRAPPER_TEMPLATE.contains("__SOURCE_CODE_PLACEHOLDER__"));
    }
}
