// SPDX-License-Identifier: MIT OR Apache-2.0
//! The signature-extraction executor: C, C++, Go, Rust. `compile` first
//! asks `judge-sigparse` for the declared signature, then generates the
//! param-binding/call/output code the template's placeholders expect —
//! the same split the original Go and C executors used between
//! "parse signature" and "generate wrapper" steps.

use crate::docker;
use crate::executor::{Executor, State};
use async_trait::async_trait;
use judge_core::{Language, ResourcePolicy};
use judge_error::{ExecutionError, SignatureError};
use judge_harness::{render, templates, Substitution};
use judge_sandbox_paths::{SandboxRoots, Workspace};
use judge_sigparse::{go as sig_go, Signature};
use serde_json::{Map, Value};

fn image_for(language: Language) -> &'static str {
    match language {
        Language::C | Language::Cpp => "cpp-sandbox:latest",
        Language::Go => "go-sandbox:latest",
        Language::Rust => "rust-sandbox:latest",
        _ => unreachable!("image_for called with a non-signature language"),
    }
}

/// The signature-extraction executor.
pub struct SignatureExecutor {
    language: Language,
    source_code: String,
    function_name: String,
    roots: SandboxRoots,
    policy: ResourcePolicy,
    workspace: Option<Workspace>,
    container_id: Option<String>,
    /// `int`/`long long`/`double` for C, recovered at compile time so
    /// `run` knows how to parse the plain-text stdout back into JSON.
    c_return_type: Option<String>,
    state: State,
}

impl SignatureExecutor {
    /// Construct an executor for one of the four signature-extraction
    /// languages.
    pub fn new(
        language: Language,
        source_code: String,
        function_name: String,
        roots: SandboxRoots,
        policy: ResourcePolicy,
    ) -> Self {
        Self {
            language,
            source_code,
            function_name,
            roots,
            policy,
            workspace: None,
            container_id: None,
            c_return_type: None,
            state: State::New,
        }
    }

    fn parse_signature(&self) -> Result<Signature, SignatureError> {
        match self.language {
            Language::C => judge_sigparse::c::parse_signature(&self.source_code, &self.function_name),
            Language::Cpp => judge_sigparse::cpp::parse_signature(&self.source_code, &self.function_name),
            Language::Go => judge_sigparse::go::parse_signature(&self.source_code, &self.function_name),
            Language::Rust => judge_sigparse::rust::parse_signature(&self.source_code, &self.function_name),
            _ => unreachable!("parse_signature called with a non-signature language"),
        }
    }

    fn file_name(&self) -> &'static str {
        match self.language {
            Language::C => "solution.c",
            Language::Cpp => "solution.cpp",
            Language::Go => "main.go",
            Language::Rust => "solution.rs",
            _ => unreachable!(),
        }
    }

    async fn compile_step(&mut self, container_id: &str, signature: &Signature) -> Result<(), ExecutionError> {
        match self.language {
            Language::C => {
                docker::exec_compile(container_id, &["gcc", "solution.c", "-O2", "-std=c11", "-o", "solution"], &self.policy)
                    .await?;
                self.c_return_type = signature.return_type.clone();
                Ok(())
            }
            Language::Cpp => {
                docker::exec_compile(container_id, &["g++", "solution.cpp", "-O2", "-std=c++20", "-o", "solution"], &self.policy)
                    .await
            }
            Language::Go => {
                docker::exec_compile(
                    container_id,
                    &["go", "build", "-buildvcs=false", "-trimpath", "-o", "main", "main.go"],
                    &self.policy,
                )
                .await
            }
            Language::Rust => {
                docker::exec_compile(container_id, &["rustc", "-O", "solution.rs", "-o", "solution"], &self.policy).await
            }
            _ => unreachable!(),
        }
    }

    fn run_args(&self) -> Vec<&'static str> {
        match self.language {
            Language::C | Language::Cpp | Language::Rust => vec!["./solution"],
            Language::Go => vec!["./main"],
            _ => unreachable!(),
        }
    }

    fn render_wrapper(&self, signature: &Signature) -> Result<String, ExecutionError> {
        match self.language {
            Language::C => render_c(&self.source_code, &self.function_name, signature),
            Language::Cpp => render_cpp(&self.source_code, &self.function_name, signature),
            Language::Go => render_go(&self.source_code, &self.function_name, signature),
            Language::Rust => render_rust(&self.source_code, &self.function_name, signature),
            _ => unreachable!(),
        }
    }

    /// Build the per-test stdin payload. C alone uses whitespace framing
    /// (spec §9); the others send the JSON input object directly.
    fn build_stdin(&self, input: &Map<String, Value>) -> String {
        if self.language != Language::C {
            return serde_json::json!({ "function_name": self.function_name, "input": input }).to_string();
        }

        let mut lines = Vec::new();
        for value in input.values() {
            match value {
                Value::Array(items) => {
                    lines.push(items.len().to_string());
                    let row: Vec<String> = items.iter().map(value_to_token).collect();
                    lines.push(row.join(" "));
                }
                other => lines.push(value_to_token(other)),
            }
        }
        lines.join("\n")
    }

    fn parse_output(&self, raw: &str) -> Result<Value, ExecutionError> {
        if self.language != Language::C {
            let parsed: Value =
                serde_json::from_str(raw).map_err(|_| ExecutionError::Runtime("invalid output format".to_string()))?;
            if let Some(error) = parsed.get("error").and_then(Value::as_str) {
                return Err(ExecutionError::Runtime(error.to_string()));
            }
            return parsed.get("result").cloned().ok_or_else(|| ExecutionError::Runtime("missing result field".to_string()));
        }

        match self.c_return_type.as_deref() {
            Some("int") | Some("long long") => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| ExecutionError::Runtime("invalid output format".to_string())),
            Some("double") => raw
                .trim()
                .parse::<f64>()
                .map(|v| serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null))
                .map_err(|_| ExecutionError::Runtime("invalid output format".to_string())),
            _ => Err(ExecutionError::Compile("unsupported return type".to_string())),
        }
    }
}

fn value_to_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Executor for SignatureExecutor {
    async fn compile(&mut self) -> Result<(), ExecutionError> {
        let signature = self.parse_signature()?;
        let wrapped = self.render_wrapper(&signature)?;

        let workspace = self.roots.allocate_workspace();
        tokio::fs::create_dir_all(&workspace.container_path)
            .await
            .map_err(|e| ExecutionError::Runtime(format!("failed to create workspace: {e}")))?;
        tokio::fs::write(workspace.file(self.file_name()), &wrapped)
            .await
            .map_err(|e| ExecutionError::Runtime(format!("failed to write solution: {e}")))?;

        let container_id = docker::start_container(image_for(self.language), &workspace.host_path, "/app", &self.policy).await?;

        // Record the container/workspace before the fallible toolchain step
        // runs, so `cleanup()` can find and remove them even if compilation
        // itself fails (matching every original executor, which sets
        // `self.container_id` right after `docker run` and before compiling).
        self.workspace = Some(workspace);
        self.container_id = Some(container_id.clone());

        self.compile_step(&container_id, &signature).await?;

        self.state = State::Ready;
        Ok(())
    }

    async fn run(&mut self, input: &Map<String, Value>) -> Result<Value, ExecutionError> {
        let container_id = self
            .container_id
            .clone()
            .ok_or_else(|| ExecutionError::Runtime("container not initialized".to_string()))?;

        let stdin_payload = self.build_stdin(input);
        let args = self.run_args();
        let stdout = docker::exec_run(&container_id, &args, &stdin_payload, &self.policy).await?;
        self.parse_output(&stdout)
    }

    async fn cleanup(&mut self) {
        if let Some(container_id) = self.container_id.take() {
            docker::remove_container(&container_id).await;
        }
        if let Some(workspace) = self.workspace.take() {
            judge_sandbox_paths::remove_workspace_best_effort(&workspace.container_path);
        }
        self.state = State::Closed;
    }

    fn state(&self) -> State {
        self.state
    }
}

fn render_c(source_code: &str, function_name: &str, signature: &Signature) -> Result<String, ExecutionError> {
    let return_type = signature.return_type.as_deref().unwrap_or_default();

    let mut input_decl = Vec::new();
    let mut input_scan = Vec::new();
    let mut call_args = Vec::new();
    let mut cleanup = Vec::new();

    for param in &signature.params {
        match param.type_name.as_str() {
            "int" => {
                input_decl.push(format!("int {};", param.name));
                input_scan.push(format!(r#"scanf("%d", &{});"#, param.name));
                call_args.push(param.name.clone());
            }
            "long long" => {
                input_decl.push(format!("long long {};", param.name));
                input_scan.push(format!(r#"scanf("%lld", &{});"#, param.name));
                call_args.push(param.name.clone());
            }
            "double" => {
                input_decl.push(format!("double {};", param.name));
                input_scan.push(format!(r#"scanf("%lf", &{});"#, param.name));
                call_args.push(param.name.clone());
            }
            "int*" => {
                let size_name = format!("{}Size", param.name);
                input_decl.push(format!("int {size_name};"));
                input_decl.push(format!("int* {};", param.name));
                input_scan.push(format!(r#"scanf("%d", &{size_name});"#));
                input_scan.push(format!("{} = (int*)malloc(sizeof(int) * {size_name});", param.name));
                input_scan.push(format!(
                    "for(int i=0;i<{size_name};i++) scanf(\"%d\",&{}[i]);",
                    param.name
                ));
                call_args.push(param.name.clone());
                call_args.push(size_name.clone());
                cleanup.push(format!("free({});", param.name));
            }
            other => {
                return Err(ExecutionError::Compile(format!("unsupported C type: {other}")));
            }
        }
    }

    let output_print = match return_type {
        "int" => r#"printf("%d", result);"#.to_string(),
        "long long" => r#"printf("%lld", result);"#.to_string(),
        "double" => r#"printf("%f", result);"#.to_string(),
        _ => return Err(ExecutionError::Compile("unsupported return type".to_string())),
    };

    let function_signature =
        format!("{return_type} {function_name}({})", signature.params.iter().map(|p| format!("{} {}", p.type_name, p.name)).collect::<Vec<_>>().join(", "));
    let function_call = format!("{return_type} result = {function_name}({});", call_args.join(", "));

    Ok(render(
        templates::c::C_WRAPPER_TEMPLATE,
        &[
            Substitution::new("__USER_CODE_PLACEHOLDER__", source_code.to_string()),
            Substitution::new("__FUNCTION_SIGNATURE_PLACEHOLDER__", function_signature),
            Substitution::new("__INPUT_DECLARATION_PLACEHOLDER__", input_decl.join("\n    ")),
            Substitution::new("__INPUT_SCAN_PLACEHOLDER__", input_scan.join("\n    ")),
            Substitution::new("__FUNCTION_CALL_PLACEHOLDER__", function_call),
            Substitution::new("__OUTPUT_PRINT_PLACEHOLDER__", output_print),
            Substitution::new("__CLEANUP_PLACEHOLDER__", cleanup.join("\n    ")),
        ],
    )?)
}

fn render_cpp(source_code: &str, function_name: &str, signature: &Signature) -> Result<String, ExecutionError> {
    let return_type = signature.return_type.clone().unwrap_or_default();

    let mut param_deserialization = Vec::new();
    let mut param_names = Vec::new();

    for param in &signature.params {
        let clean = judge_sigparse::cpp::clean_type(&param.type_name);
        let name = &param.name;
        match clean.as_str() {
            "int" => param_deserialization.push(format!(r#"int {name} = j["{name}"];"#)),
            "long long" => param_deserialization.push(format!(r#"long long {name} = j["{name}"];"#)),
            "string" => param_deserialization.push(format!(r#"string {name} = j["{name}"];"#)),
            "vector<int>" => param_deserialization.push(format!(r#"vector<int> {name} = j["{name}"].get<vector<int>>();"#)),
            "vector<vector<int>>" => {
                param_deserialization.push(format!(r#"vector<vector<int>> {name} = j["{name}"].get<vector<vector<int>>>();"#))
            }
            "ListNode*" => {
                param_deserialization.push(format!(r#"vector<int> {name}_vec = j["{name}"].get<vector<int>>();"#));
                param_deserialization.push(format!("ListNode* {name} = buildLinkedList({name}_vec);"));
            }
            "TreeNode*" => {
                param_deserialization.push(format!("vector<optional<int>> {name}_vec;"));
                param_deserialization.push(format!(r#"for (auto& el : j["{name}"]) {{"#));
                param_deserialization.push(format!("    if (el.is_null()) {name}_vec.push_back(nullopt);"));
                param_deserialization.push(format!("    else {name}_vec.push_back(el.get<int>());"));
                param_deserialization.push("}".to_string());
                param_deserialization.push(format!("TreeNode* {name} = buildTree({name}_vec);"));
            }
            other => return Err(ExecutionError::Compile(format!("unsupported type: {other}"))),
        }
        param_names.push(name.clone());
    }

    let return_serialization = match return_type.as_str() {
        "ListNode*" => "output = serializeLinkedList(result);".to_string(),
        "TreeNode*" => "output = serializeTree(result);".to_string(),
        _ => "output = result;".to_string(),
    };

    let function_signature = format!(
        "{return_type} {function_name}({})",
        signature.params.iter().map(|p| format!("{} {}", p.type_name, p.name)).collect::<Vec<_>>().join(", ")
    );

    Ok(render(
        templates::cpp::CPP_WRAPPER_TEMPLATE,
        &[
            Substitution::new("__USER_CODE_PLACEHOLDER__", source_code.to_string()),
            Substitution::new("__FUNCTION_SIGNATURE_PLACEHOLDER__", function_signature),
            Substitution::new("__PARAMETER_DESERIALIZATION_PLACEHOLDER__", param_deserialization.join("\n        ")),
            Substitution::new("__FUNCTION_NAME_PLACEHOLDER__", function_name.to_string()),
            Substitution::new("__FUNCTION_ARGUMENT_LIST_PLACEHOLDER__", param_names.join(", ")),
            Substitution::new("__RETURN_SERIALIZATION_PLACEHOLDER__", return_serialization),
        ],
    )?)
}

fn render_go(source_code: &str, function_name: &str, signature: &Signature) -> Result<String, ExecutionError> {
    let mut param_lines = Vec::new();

    for param in &signature.params {
        let name = &param.name;
        let ty = &param.type_name;

        if sig_go::is_listnode_type(ty) {
            param_lines.push(format!(r#"    raw_{name}, ok := input["{name}"]"#));
            param_lines.push(format!(r#"    if !ok {{ return nil, fmt.Errorf("missing parameter: {name}") }}"#));
            param_lines.push(format!("    var {name}_arr []int"));
            param_lines.push(format!("    if err := json.Unmarshal(raw_{name}, &{name}_arr); err != nil {{"));
            param_lines.push(format!(r#"        return nil, fmt.Errorf("invalid parameter {name}: %w", err)"#));
            param_lines.push("    }".to_string());
            param_lines.push(format!("    pos_{name} := -1"));
            param_lines.push(format!(r#"    if rawPos_{name}, ok := input["pos"]; ok {{"#));
            param_lines.push(format!("        if err := json.Unmarshal(rawPos_{name}, &pos_{name}); err != nil {{"));
            param_lines.push(r#"            return nil, fmt.Errorf("invalid parameter pos: %w", err)"#.to_string());
            param_lines.push("        }".to_string());
            param_lines.push("    }".to_string());
            if sig_go::is_pointer_type(ty) {
                param_lines.push(format!("    {name} := buildLinkedList({name}_arr, pos_{name})"));
            } else {
                param_lines.push(format!("    tmp_{name} := buildLinkedList({name}_arr, pos_{name})"));
                param_lines.push(format!("    var {name} ListNode"));
                param_lines.push(format!("    if tmp_{name} != nil {{ {name} = *tmp_{name} }}"));
            }
            param_lines.push(String::new());
        } else if sig_go::is_treenode_type(ty) {
            param_lines.push(format!(r#"    raw_{name}, ok := input["{name}"]"#));
            param_lines.push(format!(r#"    if !ok {{ return nil, fmt.Errorf("missing parameter: {name}") }}"#));
            param_lines.push(format!("    var {name}_arr []interface{{}}"));
            param_lines.push(format!("    if err := json.Unmarshal(raw_{name}, &{name}_arr); err != nil {{"));
            param_lines.push(format!(r#"        return nil, fmt.Errorf("invalid parameter {name}: %w", err)"#));
            param_lines.push("    }".to_string());
            if sig_go::is_pointer_type(ty) {
                param_lines.push(format!("    {name} := buildTree({name}_arr)"));
            } else {
                param_lines.push(format!("    tmp_{name} := buildTree({name}_arr)"));
                param_lines.push(format!("    var {name} TreeNode"));
                param_lines.push(format!("    if tmp_{name} != nil {{ {name} = *tmp_{name} }}"));
            }
            param_lines.push(String::new());
        } else if sig_go::is_graph_node_type(ty) {
            param_lines.push(format!(r#"    raw_{name}, ok := input["{name}"]"#));
            param_lines.push(format!(r#"    if !ok {{ return nil, fmt.Errorf("missing parameter: {name}") }}"#));
            param_lines.push(format!("    var {name}_adj [][]int"));
            param_lines.push(format!("    if err := json.Unmarshal(raw_{name}, &{name}_adj); err != nil {{"));
            param_lines.push(format!(r#"        return nil, fmt.Errorf("invalid parameter {name}: %w", err)"#));
            param_lines.push("    }".to_string());
            if sig_go::is_pointer_type(ty) {
                param_lines.push(format!("    {name} := buildGraph({name}_adj)"));
            } else {
                param_lines.push(format!("    tmp_{name} := buildGraph({name}_adj)"));
                param_lines.push(format!("    var {name} Node"));
                param_lines.push(format!("    if tmp_{name} != nil {{ {name} = *tmp_{name} }}"));
            }
            param_lines.push(String::new());
        } else {
            param_lines.push(format!(r#"    raw_{name}, ok := input["{name}"]"#));
            param_lines.push(format!(r#"    if !ok {{ return nil, fmt.Errorf("missing parameter: {name}") }}"#));
            param_lines.push(format!("    var {name} {ty}"));
            param_lines.push(format!("    if err := json.Unmarshal(raw_{name}, &{name}); err != nil {{"));
            param_lines.push(format!(r#"        return nil, fmt.Errorf("invalid parameter {name}: %w", err)"#));
            param_lines.push("    }".to_string());
            param_lines.push(String::new());
        }
    }

    let arg_list = signature.params.iter().map(|p| p.name.clone()).collect::<Vec<_>>().join(", ");
    let (invoker_setup, invoke_expr) = match &signature.receiver_type {
        Some(receiver_type) if receiver_type.starts_with('*') => {
            let setup_type = receiver_type.trim_start_matches('*');
            (format!("    solver := &{setup_type}{{}}"), format!("solver.{function_name}({arg_list})"))
        }
        Some(receiver_type) => (format!("    solver := {receiver_type}{{}}"), format!("solver.{function_name}({arg_list})")),
        None => (String::new(), format!("{function_name}({arg_list})")),
    };

    let call_block = match (&signature.return_type, signature.return_type.as_deref() == Some("error")) {
        (None, _) => format!("    {invoke_expr}\n    return nil, nil"),
        (Some(_), true) => format!("    err := {invoke_expr}\n    if err != nil {{ return nil, err }}\n    return nil, nil"),
        (Some(_), false) => format!("    result := {invoke_expr}\n    return autoConvertOutput(result), nil"),
    };

    Ok(render(
        templates::go::GO_WRAPPER_TEMPLATE,
        &[
            Substitution::new("__SOURCE_CODE_PLACEHOLDER__", source_code.to_string()),
            Substitution::new("__FUNCTION_NAME_PLACEHOLDER__", function_name.to_string()),
            Substitution::new("__PARAM_BINDINGS_PLACEHOLDER__", param_lines.join("\n")),
            Substitution::new("__INVOKER_SETUP_PLACEHOLDER__", invoker_setup),
            Substitution::new("__CALL_PLACEHOLDER__", call_block),
        ],
    )?)
}

fn render_rust(source_code: &str, function_name: &str, signature: &Signature) -> Result<String, ExecutionError> {
    let mut bindings = Vec::new();
    let mut call_args = Vec::new();

    for param in &signature.params {
        let name = &param.name;
        match param.type_name.as_str() {
            "i64" | "i32" | "f64" | "bool" | "String" => {
                bindings.push(format!(
                    r#"    let {name}: {} = serde_json::from_value(input.get("{name}").cloned().unwrap_or_default()).map_err(|e| e.to_string())?;"#,
                    param.type_name
                ));
            }
            other if other.starts_with("Vec<") => {
                bindings.push(format!(
                    r#"    let {name}: {other} = serde_json::from_value(input.get("{name}").cloned().unwrap_or_default()).map_err(|e| e.to_string())?;"#
                ));
            }
            other => {
                return Err(ExecutionError::Compile(format!("unsupported type: {other}")));
            }
        }
        call_args.push(name.clone());
    }

    let call = format!("    let result = {function_name}({});", call_args.join(", "));
    let return_expr = "    serde_json::to_value(result).map_err(|e| e.to_string())".to_string();

    Ok(render(
        templates::rust::RUST_WRAPPER_TEMPLATE,
        &[
            Substitution::new("__SOURCE_CODE_PLACEHOLDER__", source_code.to_string()),
            Substitution::new("__FUNCTION_NAME_PLACEHOLDER__", function_name.to_string()),
            Substitution::new("__PARAM_BINDINGS_PLACEHOLDER__", bindings.join("\n")),
            Substitution::new("__CALL_PLACEHOLDER__", format!("{call}\n{return_expr}")),
        ],
    )?)
}
