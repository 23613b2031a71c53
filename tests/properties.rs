//! Property tests for containment, maximality and idempotence of the finder,
//! and agreement of the validator with the tree's error markers.

use enclosing_context::ts::has_error_nodes;
use enclosing_context::{
    LanguageParser, LineRange, NodeKinds, OwnedNode, PythonBackend, PythonParser,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Stmt {
    Simple,
    Block(&'static str, Vec<Stmt>),
}

const HEADERS: &[&str] = &[
    "def f():",
    "class C:",
    "if x:",
    "for i in y:",
    "while z:",
    "with w:",
];

fn stmt() -> impl Strategy<Value = Stmt> {
    Just(Stmt::Simple).prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(HEADERS),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(header, body)| Stmt::Block(header, body))
    })
}

fn render(stmts: &[Stmt], depth: usize, out: &mut String) {
    let indent = "    ".repeat(depth);
    for stmt in stmts {
        match stmt {
            Stmt::Simple => {
                out.push_str(&indent);
                out.push_str("a = 1\n");
            }
            Stmt::Block(header, body) => {
                out.push_str(&indent);
                out.push_str(header);
                out.push('\n');
                render(body, depth + 1, out);
            }
        }
    }
}

fn program() -> impl Strategy<Value = (String, usize, usize)> {
    prop::collection::vec(stmt(), 1..6).prop_flat_map(|stmts| {
        let mut source = String::new();
        render(&stmts, 0, &mut source);
        let line_count = source.lines().count();
        (Just(source), 1..=line_count, 0..line_count)
            .prop_map(move |(source, start, len)| (source, start, (start + len).min(line_count)))
    })
}

/// Every allow-listed node as (start_line, end_line), in traversal order.
fn scopes(node: &OwnedNode, kinds: &NodeKinds, out: &mut Vec<(usize, usize)>) {
    if kinds.contains(&node.kind) {
        out.push((node.start.row + 1, node.end.row + 1));
    }
    for child in &node.children {
        scopes(child, kinds, out);
    }
}

fn snapshot(source: &str) -> OwnedNode {
    let mut parser = PythonParser::new().unwrap();
    let tree = parser.parse(source).unwrap();
    OwnedNode::snapshot(&tree.root_node())
}

proptest! {
    #[test]
    fn result_contains_range_and_is_maximal((source, start, end) in program()) {
        let mut backend = PythonBackend::new().unwrap();
        let range = LineRange::new(start, end).unwrap();
        let found = backend.try_find_enclosing_context(&source, range).unwrap();

        let mut all = Vec::new();
        scopes(&snapshot(&source), &NodeKinds::python(), &mut all);
        let largest = all
            .iter()
            .filter(|(s, e)| *s <= start && end <= *e)
            .map(|(s, e)| e - s)
            .max();

        match (found, largest) {
            (Some(node), Some(size)) => {
                prop_assert!(node.start_line() <= start);
                prop_assert!(end <= node.end_line());
                prop_assert_eq!(node.end_line() - node.start_line(), size);
            }
            (None, None) => {}
            (found, largest) => {
                prop_assert!(false, "finder returned {:?}, brute force {:?}", found, largest);
            }
        }
    }

    #[test]
    fn repeated_queries_agree((source, start, end) in program()) {
        let mut backend = PythonBackend::new().unwrap();
        let first = backend.find_enclosing_context(&source, start, end);
        let second = backend.find_enclosing_context(&source, start, end);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_programs_are_valid((source, _start, _end) in program()) {
        let mut backend = PythonBackend::new().unwrap();
        prop_assert!(backend.dry_run(&source).valid);
    }

    #[test]
    fn validator_agrees_with_error_markers(
        (source, _start, _end) in program(),
        cut in 0usize..200,
    ) {
        // The unclosed paren always leaves an error marker.
        let end = source
            .char_indices()
            .map(|(i, _)| i)
            .nth(cut)
            .unwrap_or(source.len());
        let truncated = format!("{}{}", &source[..end], "(\n");

        let mut backend = PythonBackend::new().unwrap();
        let result = backend.dry_run(&truncated);
        prop_assert_eq!(result.valid, !has_error_nodes(&&snapshot(&truncated)));
        prop_assert!(!result.valid);
    }
}
