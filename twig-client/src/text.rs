//! Plain-text rendition of the tree description, for terminals and logs

use std::fmt::Write;

use crate::render::{Fragment, Node, Pager, Trigger, NO_COMMENTS};

pub fn tree_to_text(fragment: &Fragment) -> String {
    let mut out = String::new();
    match fragment {
        Fragment::Placeholder => out.push_str(NO_COMMENTS),
        Fragment::Nodes(nodes) => {
            for n in nodes {
                write_node(&mut out, n);
            }
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn write_node(out: &mut String, n: &Node) {
    let pad = " ".repeat(n.indent());
    let marker = n.marker().map(|m| format!("{m} ")).unwrap_or_default();
    let triggers = n
        .triggers
        .iter()
        .map(|t| match t {
            Trigger::Delete(id) => format!("[delete {id}]"),
            Trigger::ReplyTo(id) => format!("[reply {id}]"),
        })
        .collect::<Vec<_>>()
        .join(" ");
    // writing into a String never fails
    let _ = writeln!(
        out,
        "{pad}{marker}#{} | {}  {triggers}",
        n.id,
        n.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    for line in n.content.lines() {
        let _ = writeln!(out, "{pad}    {line}");
    }
    // nested empty reply lists are not worth a placeholder line
    for r in n.replies.nodes() {
        write_node(out, r);
    }
}

pub fn pager_to_text(pager: &Pager) -> String {
    let buttons = pager
        .buttons
        .iter()
        .map(|p| match *p == pager.current {
            true => format!("[{p}]"),
            false => format!("{p}"),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("Pages: {buttons}")
}
