//! Printer for the block notation

use crate::block::{escape, BlockNode};
use crate::notation::lexer::is_bare_key;

const INDENT: &str = "    ";

/// Print a forest of block nodes, one node per line
pub fn print(nodes: &[BlockNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &BlockNode, depth: usize) {
    let indent = INDENT.repeat(depth);
    out.push_str(&indent);
    out.push_str(&node.type_id);

    if !node.attributes.is_empty() {
        let attrs = node
            .attributes
            .iter()
            .map(|(key, value)| format!("{}: {}", format_key(key), value))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(" [{}]", attrs));
    }

    if node.children.is_empty() {
        out.push('\n');
        return;
    }

    out.push_str(" {\n");
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
    out.push_str(&indent);
    out.push_str("}\n");
}

fn format_key(key: &str) -> String {
    if is_bare_key(key) {
        key.to_string()
    } else {
        format!("\"{}\"", escape(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse;

    #[test]
    fn test_print_leaf() {
        assert_eq!(print(&[BlockNode::new("core/image")]), "core/image\n");
    }

    #[test]
    fn test_print_nested() {
        let tree = BlockNode::new("ltic/card-inner-text-block")
            .with_attr("templateLock", "false")
            .with_children(vec![
                BlockNode::new("core/heading").with_attr("level", 2),
                BlockNode::new("core/paragraph"),
            ]);
        assert_eq!(
            print(&[tree]),
            "ltic/card-inner-text-block [templateLock: \"false\"] {\n    core/heading [level: 2]\n    core/paragraph\n}\n"
        );
    }

    #[test]
    fn test_print_quotes_awkward_keys() {
        let node = BlockNode::new("core/group")
            .with_attr("data key", true)
            .with_attr("null", 1);
        assert_eq!(print(&[node]), "core/group [\"data key\": true, \"null\": 1]\n");
    }

    #[test]
    fn test_printed_tree_parses_back() {
        let tree = vec![
            BlockNode::new("core/image").with_attr("url", r#"a "quoted" \ path"#),
            BlockNode::new("core/group")
                .with_attr("gap", -0.25)
                .with_attr("hidden", false)
                .with_children(vec![BlockNode::new("core/heading").with_attr("level", 3)]),
        ];
        let parsed = parse(&print(&tree)).expect("Printed notation should parse");
        assert_eq!(parsed, tree);
    }
}
