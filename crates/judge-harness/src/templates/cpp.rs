// SPDX-License-Identifier: MIT OR Apache-2.0
//! C++ wrapper template (signature-extraction). Uses `nlohmann::json` for
//! input/output marshaling, the same dependency the image this wrapper
//! compiles against already vendors; linked-list and tree parameters get
//! dedicated `build*`/`serialize*` helpers, mirroring the same build/
//! serialize split the Go and other reflection templates use.

/// The literal C++ wrapper source.
pub const CPP_WRAPPER_TEMPLATE: &str = r#"
#include <iostream>
#include <vector>
#include <string>
#include <queue>
#include <optional>
#include <sstream>
#include <stdexcept>
#include <nlohmann/json.hpp>

using json = nlohmann::json;
using namespace std;

struct ListNode {
    int val;
    ListNode* next;
    ListNode(int x) : val(x), next(nullptr) {}
};

struct TreeNode {
    int val;
    TreeNode* left;
    TreeNode* right;
    TreeNode(int x) : val(x), left(nullptr), right(nullptr) {}
};

ListNode* buildLinkedList(const vector<int>& values) {
    ListNode* dummy = new ListNode(0);
    ListNode* curr = dummy;
    for (int v : values) {
        curr->next = new ListNode(v);
        curr = curr->next;
    }
    return dummy->next;
}

json serializeLinkedList(ListNode* head) {
    json out = json::array();
    while (head != nullptr) {
        out.push_back(head->val);
        head = head->next;
    }
    return out;
}

TreeNode* buildTree(const vector<optional<int>>& values) {
    if (values.empty() || !values[0].has_value()) {
        return nullptr;
    }
    vector<TreeNode*> nodes(values.size(), nullptr);
    for (size_t i = 0; i < values.size(); ++i) {
        if (values[i].has_value()) {
            nodes[i] = new TreeNode(*values[i]);
        }
    }
    size_t pos = 1;
    for (size_t i = 0; i < nodes.size() && pos < nodes.size(); ++i) {
        if (nodes[i] == nullptr) {
            continue;
        }
        if (pos < nodes.size()) {
            nodes[i]->left = nodes[pos++];
        }
        if (pos < nodes.size()) {
            nodes[i]->right = nodes[pos++];
        }
    }
    return nodes[0];
}

json serializeTree(TreeNode* root) {
    json out = json::array();
    if (root == nullptr) {
        return out;
    }
    queue<TreeNode*> q;
    q.push(root);
    while (!q.empty()) {
        TreeNode* curr = q.front();
        q.pop();
        if (curr == nullptr) {
            out.push_back(nullptr);
            continue;
        }
        out.push_back(curr->val);
        q.push(curr->left);
        q.push(curr->right);
    }
    while (!out.empty() && out.back().is_null()) {
        out.erase(out.size() - 1);
    }
    return out;
}

__USER_CODE_PLACEHOLDER__

__FUNCTION_SIGNATURE_PLACEHOLDER__;

int main() {
    string raw((istreambuf_iterator<char>(cin)), istreambuf_iterator<char>());
    if (raw.find_first_not_of(" \t\n\r") == string::npos) {
        cout << json{{"error", "no input provided"}}.dump();
        return 1;
    }

    json j;
    try {
        j = json::parse(raw);
    } catch (const exception&) {
        cout << json{{"error", "invalid JSON input"}}.dump();
        return 1;
    }

    json output;
    try {
        __PARAMETER_DESERIALIZATION_PLACEHOLDER__

        auto result = __FUNCTION_NAME_PLACEHOLDER__(__FUNCTION_ARGUMENT_LIST_PLACEHOLDER__);

        __RETURN_SERIALIZATION_PLACEHOLDER__
    } catch (const exception& e) {
        cout << json{{"error", string(e.what())}}.dump();
        return 1;
    }

    cout << json{{"result", output}}.dump();
    return 0;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_carries_every_placeholder_token() {
        for token in [
            "__USER_CODE_PLACEHOLDER__",
            "__FUNCTION_SIGNATURE_PLACEHOLDER__",
            "__PARAMETER_DESERIALIZATION_PLACEHOLDER__",
            "__FUNCTION_NAME_PLACEHOLDER__",
            "__FUNCTION_ARGUMENT_LIST_PLACEHOLDER__",
            "__RETURN_SERIALIZATION_PLACEHOLDER__",
        ] {
            assert!(CPP_WRAPPER_TEMPLATE.contains(token), "template missing token {token}");
        }
    }
}
