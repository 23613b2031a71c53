//! End-to-end finder and validator behaviour on real Python sources.

use enclosing_context::{
    find_enclosing_context, validate_syntax, LanguageParser, LineRange, PythonBackend,
    SYNTAX_ERROR_MESSAGE,
};

const SINGLE_FUNCTION: &str = r#"def process(items):
    total = 0
    for item in items:
        total += item
    count = len(items)
    if count:
        avg = total / count
    else:
        avg = 0
    return avg
"#;

const FUNCTION_WITH_IF: &str = r#"def check(value):
    result = []
    value = value or 0
    if value > 10:
        result.append(1)
        result.append(2)
    result.append(3)
    result.append(4)
    result.append(5)
    return result
"#;

const CLASS_WITH_METHODS: &str = r#"class Service:
    def start(self):
        self.running = True
        self.count = 0
        return self

    name = "service"
    def stop(self):
        self.running = False
        self.count = 0
        self.flushed = True
        return self

    timeout = 30
    retries = 3
    backoff = 2
    label = "svc"
    enabled = True
    owner = None
    region = "eu"
"#;

fn lines_of(source: &str, start: usize, end: usize) -> Option<(String, usize, usize)> {
    find_enclosing_context(source, start, end)
        .enclosing_context
        .map(|node| (node.node_type, node.loc.start.line, node.loc.end.line))
}

#[test]
fn function_encloses_inner_lines() {
    assert_eq!(
        lines_of(SINGLE_FUNCTION, 3, 5),
        Some(("function_definition".to_string(), 1, 10))
    );
}

#[test]
fn function_preferred_over_nested_if() {
    assert_eq!(
        lines_of(FUNCTION_WITH_IF, 4, 5),
        Some(("function_definition".to_string(), 1, 10))
    );
}

#[test]
fn class_preferred_over_method() {
    assert_eq!(
        lines_of(CLASS_WITH_METHODS, 9, 11),
        Some(("class_definition".to_string(), 1, 20))
    );
}

#[test]
fn method_is_found_without_class_in_allow_list() {
    let mut kinds = enclosing_context::NodeKinds::python();
    kinds.remove("class_definition");
    let mut backend = PythonBackend::with_kinds(kinds).unwrap();

    let node = backend
        .try_find_enclosing_context(CLASS_WITH_METHODS, LineRange::new(9, 11).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(node.node_type, "function_definition");
    assert_eq!((node.start_line(), node.end_line()), (8, 12));
}

#[test]
fn broken_source_is_invalid() {
    for source in [
        "def broken(:\n    return 1\n",
        "for x in range(3)\n    print(x)\n",
        "values = {\n    'a': 1,\n",
    ] {
        let result = validate_syntax(source);
        assert!(!result.valid, "expected invalid: {source:?}");
        assert_eq!(result.error, SYNTAX_ERROR_MESSAGE);
    }
}

#[test]
fn well_formed_sources_are_valid() {
    for source in [SINGLE_FUNCTION, FUNCTION_WITH_IF, CLASS_WITH_METHODS] {
        let result = validate_syntax(source);
        assert!(result.valid);
        assert!(result.error.is_empty());
    }
}

#[test]
fn empty_source() {
    assert!(validate_syntax("").valid);
    for (start, end) in [(1, 1), (1, 10), (3, 4)] {
        assert!(!find_enclosing_context("", start, end).is_found());
    }
}

#[test]
fn range_beyond_file_is_absent() {
    assert!(lines_of(SINGLE_FUNCTION, 10, 11).is_none());
    assert!(lines_of(SINGLE_FUNCTION, 50, 60).is_none());
}

#[test]
fn range_outside_any_scope_is_absent() {
    let source = "import sys\n\nx = 1\ny = 2\n\ndef f():\n    return x\n";
    assert!(lines_of(source, 3, 4).is_none());
    assert!(lines_of(source, 1, 7).is_none());
}

#[test]
fn control_blocks_at_module_level() {
    let source = r#"import json

with open("data.json") as fh:
    data = json.load(fh)
    keys = list(data)

try:
    value = data["key"]
except KeyError:
    value = None

while keys:
    keys.pop()
"#;
    assert_eq!(lines_of(source, 4, 5), Some(("with_statement".to_string(), 3, 5)));
    assert_eq!(lines_of(source, 8, 10), Some(("try_statement".to_string(), 7, 10)));
    assert_eq!(lines_of(source, 13, 13), Some(("while_statement".to_string(), 12, 13)));
}

#[test]
fn async_function_is_a_function_definition() {
    let source = "async def fetch(client):\n    async for row in client:\n        yield row\n";
    assert_eq!(
        lines_of(source, 2, 3),
        Some(("function_definition".to_string(), 1, 3))
    );
}

#[test]
fn columns_are_zero_based() {
    let source = "class Outer:\n    def inner(self):\n        return 1\n";
    let ctx = find_enclosing_context(source, 2, 3);
    let node = ctx.node().unwrap();
    assert_eq!(node.node_type, "class_definition");
    assert_eq!(node.loc.start.column, 0);
    assert_eq!(node.loc.end.column, 16);
}

#[test]
fn error_inside_scope_does_not_hide_it() {
    let source = "def f():\n    x = (1 +\n    return x\n\ny = 2\n";
    let mut backend = PythonBackend::new().unwrap();

    assert!(!backend.dry_run(source).valid);
    let ctx = backend.find_enclosing_context(source, 1, 1);
    if let Some(node) = ctx.node() {
        assert!(node.start_line() <= 1 && 1 <= node.end_line());
        assert_ne!(node.node_type, "ERROR");
    }
}

#[test]
fn repeated_queries_are_identical() {
    let mut backend = PythonBackend::new().unwrap();
    let first = backend.find_enclosing_context(CLASS_WITH_METHODS, 3, 4);
    let second = backend.find_enclosing_context(CLASS_WITH_METHODS, 3, 4);
    assert_eq!(first, second);
    assert_eq!(first, find_enclosing_context(CLASS_WITH_METHODS, 3, 4));
}

#[test]
fn json_output_shape() {
    let ctx = find_enclosing_context(SINGLE_FUNCTION, 2, 2);
    let json = serde_json::to_value(&ctx).unwrap();

    assert_eq!(json["enclosingContext"]["type"], "function_definition");
    assert_eq!(json["enclosingContext"]["loc"]["start"]["line"], 1);
    assert_eq!(json["enclosingContext"]["loc"]["start"]["column"], 0);
    assert_eq!(json["enclosingContext"]["loc"]["end"]["line"], 10);
    assert!(json["enclosingContext"]["leadingComments"].is_null());
}
