use super::tree::PhyloTree;

/// Newick string for `tree`, starting at its root (or the last node added
/// when no root was set). Branch lengths use six decimals; an unnamed
/// internal node with a confidence value is labelled with that value.
pub fn to_newick(tree: &PhyloTree) -> String {
    let start = match tree.root() {
        Some(root) => root,
        None if tree.num_nodes() == 0 => return ";".to_string(),
        None => tree.num_nodes() - 1,
    };

    let mut s = String::new();
    write_subtree(tree, start, &mut s);
    s.push(';');
    s
}

fn needs_quoting(label: &str) -> bool {
    label.chars().any(|ch| {
        ch.is_whitespace() || matches!(ch, ':' | ',' | '(' | ')' | ';' | '[' | ']' | '\'')
    })
}

fn write_label(out: &mut String, label: &str) {
    if label.is_empty() {
        return;
    }
    if needs_quoting(label) {
        out.push('\'');
        for ch in label.chars() {
            if ch == '\'' {
                out.push_str("''");
            } else {
                out.push(ch);
            }
        }
        out.push('\'');
    } else {
        out.push_str(label);
    }
}

fn write_subtree(tree: &PhyloTree, idx: usize, out: &mut String) {
    let node = tree.node(idx);

    if node.is_leaf() {
        write_label(out, node.name_or_empty());
        return;
    }

    out.push('(');
    for (i, &child) in node.children.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_subtree(tree, child, out);
        if let Some(bl) = tree.node(child).branch_length {
            out.push(':');
            out.push_str(&format!("{:.6}", bl));
        }
    }
    out.push(')');
    match (&node.name, &node.confidence) {
        (Some(name), _) if !name.is_empty() => write_label(out, name),
        (_, Some(conf)) => out.push_str(&format!("{:.2}", conf.value)),
        _ => {}
    }
}
